//! Unified Error Model
use std::path::PathBuf;
use thiserror::Error;

use crate::version::VersionRole;

#[derive(Error, Debug)]
pub enum VariantError {
    /// A from/to version outside the supported list. Signals a harness
    /// misconfiguration rather than a failed comparison.
    #[error(
        "Unsupported {role} version {} provided for entity variants existence tests",
        .value.as_deref().unwrap_or("<unset>")
    )]
    UnsupportedVersion {
        role: VersionRole,
        value: Option<String>,
    },

    #[error("Variant row {index} of component '{component}' has {found} values, expected {expected}")]
    MalformedRow {
        component: String,
        index: usize,
        found: usize,
        expected: usize,
    },

    #[error("Unknown version '{0}' used as a deprecation key")]
    UnknownVersionKey(String),

    #[error("Failed to read catalog {}: {source}", .path.display())]
    CatalogLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    CatalogParse(#[from] serde_yaml::Error),
}

impl VariantError {
    /// True for the version-validation failure.
    pub fn is_unsupported_version(&self) -> bool {
        matches!(self, VariantError::UnsupportedVersion { .. })
    }
}

pub type Result<T> = std::result::Result<T, VariantError>;
