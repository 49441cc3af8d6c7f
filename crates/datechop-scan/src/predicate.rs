//! Match predicates counted per bucket.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};

/// How predicate strings are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Fixed substring containment.
    #[default]
    Literal,
    /// Regular expression search.
    Pattern,
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::Literal => write!(f, "literal"),
            MatchMode::Pattern => write!(f, "pattern"),
        }
    }
}

/// A test applied to every line. A line counts once per predicate no matter
/// how many times the predicate occurs in it.
#[derive(Debug, Clone)]
pub enum Predicate {
    Literal(String),
    Pattern(Regex),
}

impl Predicate {
    pub fn literal(text: impl Into<String>) -> Self {
        Predicate::Literal(text.into())
    }

    pub fn pattern(expr: &str) -> Result<Self> {
        Regex::new(expr)
            .map(Predicate::Pattern)
            .map_err(|source| ScanError::InvalidPredicate {
                predicate: expr.to_string(),
                source,
            })
    }

    /// Build a predicate from `text` according to `mode`.
    pub fn compile(text: &str, mode: MatchMode) -> Result<Self> {
        match mode {
            MatchMode::Literal => Ok(Predicate::literal(text)),
            MatchMode::Pattern => Predicate::pattern(text),
        }
    }

    pub fn matches(&self, line: &str) -> bool {
        match self {
            Predicate::Literal(text) => line.contains(text.as_str()),
            Predicate::Pattern(regex) => regex.is_match(line),
        }
    }

    /// The text the predicate was built from, used as its report label.
    pub fn label(&self) -> &str {
        match self {
            Predicate::Literal(text) => text,
            Predicate::Pattern(regex) => regex.as_str(),
        }
    }
}
