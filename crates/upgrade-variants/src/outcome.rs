//! Outcome of a variant check
//!
//! Distinguishes identical values from catalogued changes so callers can
//! report why a comparison passed.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariantOutcome {
    /// A catalogued row matched both values
    Catalogued {
        /// Registration index of the matching row
        row: usize,
    },

    /// No row matched but the values are equal
    Identical,

    /// An unexplained discrepancy
    Unexpected {
        /// Post-upgrade values the catalogue allows for this pre-upgrade value
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        expected: Vec<String>,
    },
}

impl VariantOutcome {
    /// Whether the calling assertion should pass
    pub fn is_pass(&self) -> bool {
        matches!(self, VariantOutcome::Catalogued { .. } | VariantOutcome::Identical)
    }

    /// Catalogued post-upgrade values, if the check failed
    pub fn expected(&self) -> &[String] {
        match self {
            VariantOutcome::Unexpected { expected } => expected,
            _ => &[],
        }
    }
}

impl fmt::Display for VariantOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VariantOutcome::Catalogued { row } => write!(f, "EXPECTED (row {})", row),
            VariantOutcome::Identical => write!(f, "IDENTICAL"),
            VariantOutcome::Unexpected { expected } => {
                write!(f, "UNEXPECTED")?;
                if !expected.is_empty() {
                    write!(f, " (expected one of: {})", expected.join(" | "))?;
                }
                Ok(())
            }
        }
    }
}
