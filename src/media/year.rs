//! Release year extraction from folder names written as `Title (YYYY)`.

use regex::Regex;
use std::sync::LazyLock;

static YEAR_IN_PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d{4})\)").expect("Failed to compile year regex"));

/// Return the first parenthesized 4-digit year found in `name`.
///
/// Only the first match is considered; `Remake (2010) of Original (1980)`
/// yields `2010`.
pub fn extract_year(name: &str) -> Option<i32> {
    YEAR_IN_PARENS
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
