//! Supported product versions and upgrade paths
//!
//! Versions are index keys into variant rows. They are ordered but never
//! used for arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, VariantError};

/// One of the product releases the harness understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SupportedVersion {
    #[serde(rename = "6.1")]
    V6_1,
    #[serde(rename = "6.2")]
    V6_2,
    #[serde(rename = "6.3")]
    V6_3,
    #[serde(rename = "6.4")]
    V6_4,
    #[serde(rename = "6.5")]
    V6_5,
}

impl SupportedVersion {
    /// Every supported version, oldest first
    pub const ALL: [SupportedVersion; 5] = [
        SupportedVersion::V6_1,
        SupportedVersion::V6_2,
        SupportedVersion::V6_3,
        SupportedVersion::V6_4,
        SupportedVersion::V6_5,
    ];

    /// Number of supported versions, and so the width of every variant row
    pub const COUNT: usize = Self::ALL.len();

    /// Position of this version in [`SupportedVersion::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SupportedVersion::V6_1 => "6.1",
            SupportedVersion::V6_2 => "6.2",
            SupportedVersion::V6_3 => "6.3",
            SupportedVersion::V6_4 => "6.4",
            SupportedVersion::V6_5 => "6.5",
        }
    }

    /// Parse a raw identifier supplied for the given role.
    ///
    /// A missing identifier is rejected the same way as an unknown one.
    pub fn parse_for(role: VersionRole, raw: Option<&str>) -> Result<Self> {
        match raw.and_then(|value| value.parse::<SupportedVersion>().ok()) {
            Some(version) => Ok(version),
            None => {
                tracing::warn!(%role, value = ?raw, "rejected unsupported version");
                Err(VariantError::UnsupportedVersion {
                    role,
                    value: raw.map(str::to_string),
                })
            }
        }
    }
}

impl FromStr for SupportedVersion {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        SupportedVersion::ALL
            .into_iter()
            .find(|version| version.as_str() == s)
            .ok_or_else(|| format!("unsupported version '{}'", s))
    }
}

impl fmt::Display for SupportedVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of the upgrade a version identifier describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionRole {
    From,
    To,
}

impl fmt::Display for VersionRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VersionRole::From => write!(f, "preupgrade"),
            VersionRole::To => write!(f, "postupgrade"),
        }
    }
}

/// A validated pair of versions an upgrade runs between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradePath {
    pub from: SupportedVersion,
    pub to: SupportedVersion,
}

impl UpgradePath {
    pub fn new(from: SupportedVersion, to: SupportedVersion) -> Self {
        Self { from, to }
    }

    /// Validate raw identifiers, `from` first.
    pub fn parse(from: &str, to: &str) -> Result<Self> {
        Self::resolve(Some(from), Some(to))
    }

    /// Like [`UpgradePath::parse`], for identifiers that may be unset.
    pub fn resolve(from: Option<&str>, to: Option<&str>) -> Result<Self> {
        let from = SupportedVersion::parse_for(VersionRole::From, from)?;
        let to = SupportedVersion::parse_for(VersionRole::To, to)?;
        Ok(Self { from, to })
    }

    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }

    pub fn is_downgrade(&self) -> bool {
        self.to < self.from
    }
}

impl fmt::Display for UpgradePath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
