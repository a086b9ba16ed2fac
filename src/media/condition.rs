//! `Year <op> YYYY` conditions evaluated against folder names.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use super::year::extract_year;

// Two-character operators must come first in the alternation so `>=` is not
// read as `>` followed by a stray `=`. Unanchored: the first occurrence of the
// grammar anywhere in the text is used.
static CONDITION_GRAMMAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Year\s*(==|!=|>=|<=|>|<)\s*(\d{4})")
        .expect("Failed to compile condition regex")
});

/// Comparison operator of a year condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Ge,
    Le,
    Gt,
    Lt,
}

impl CompareOp {
    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "==" => Some(Self::Eq),
            "!=" => Some(Self::Ne),
            ">=" => Some(Self::Ge),
            "<=" => Some(Self::Le),
            ">" => Some(Self::Gt),
            "<" => Some(Self::Lt),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Lt => "<",
        }
    }

    /// Apply the operator as `lhs <op> rhs`
    pub fn apply(self, lhs: i32, rhs: i32) -> bool {
        match self {
            Self::Eq => lhs == rhs,
            Self::Ne => lhs != rhs,
            Self::Ge => lhs >= rhs,
            Self::Le => lhs <= rhs,
            Self::Gt => lhs > rhs,
            Self::Lt => lhs < rhs,
        }
    }
}

/// A parsed year condition.
///
/// Parsing never fails: an expression outside the grammar becomes
/// [`YearFilter::Unparsable`], which matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum YearFilter {
    /// No condition configured; every folder matches.
    #[default]
    Any,
    /// `Year <op> <year>`
    Compare { op: CompareOp, year: i32 },
    /// Condition text that does not follow the grammar.
    Unparsable(String),
}

impl YearFilter {
    /// Parse an optional condition. `None`, empty and whitespace-only input
    /// all mean "no condition".
    pub fn parse(condition: Option<&str>) -> Self {
        let Some(text) = condition.map(str::trim).filter(|t| !t.is_empty()) else {
            return Self::Any;
        };

        CONDITION_GRAMMAR
            .captures(text)
            .and_then(|caps| {
                let op = CompareOp::from_symbol(caps.get(1)?.as_str())?;
                let year = caps.get(2)?.as_str().parse().ok()?;
                Some(Self::Compare { op, year })
            })
            .unwrap_or_else(|| Self::Unparsable(text.to_string()))
    }

    /// Whether a folder called `name` satisfies this condition
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Unparsable(_) => false,
            Self::Compare { op, year } => {
                extract_year(name).is_some_and(|found| op.apply(found, *year))
            }
        }
    }

    pub fn is_unparsable(&self) -> bool {
        matches!(self, Self::Unparsable(_))
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "(none)"),
            Self::Compare { op, year } => write!(f, "Year {} {}", op.symbol(), year),
            Self::Unparsable(text) => write!(f, "{text} (unparsable)"),
        }
    }
}

/// One-shot evaluation of an optional condition string against a folder name.
pub fn evaluate(condition: Option<&str>, name: &str) -> bool {
    YearFilter::parse(condition).matches(name)
}
