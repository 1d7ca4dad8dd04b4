//! Harness environment
//!
//! Upgrade runs advertise their versions through `FROM_VERSION` and
//! `TO_VERSION`. The checks themselves take versions as parameters; this
//! type is the one place those variables are read.

use serde::{Deserialize, Serialize};
use std::env::VarError;

use crate::catalog::VariantCatalog;
use crate::error::Result;
use crate::outcome::VariantOutcome;
use crate::version::UpgradePath;

pub const FROM_VERSION_VAR: &str = "FROM_VERSION";
pub const TO_VERSION_VAR: &str = "TO_VERSION";

/// Raw, unvalidated version identifiers of an upgrade run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeEnv {
    pub from_version: Option<String>,
    pub to_version: Option<String>,
}

impl UpgradeEnv {
    pub fn new(from_version: Option<&str>, to_version: Option<&str>) -> Self {
        Self {
            from_version: from_version.map(str::to_string),
            to_version: to_version.map(str::to_string),
        }
    }

    /// Read `FROM_VERSION` / `TO_VERSION` from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(read_var)
    }

    /// Build from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            from_version: lookup(FROM_VERSION_VAR),
            to_version: lookup(TO_VERSION_VAR),
        }
    }

    /// Replace either identifier with an explicit value
    pub fn with_overrides(mut self, from_version: Option<String>, to_version: Option<String>) -> Self {
        if from_version.is_some() {
            self.from_version = from_version;
        }
        if to_version.is_some() {
            self.to_version = to_version;
        }
        self
    }

    pub fn upgrade_path(&self) -> Result<UpgradePath> {
        UpgradePath::resolve(self.from_version.as_deref(), self.to_version.as_deref())
    }

    pub fn check_variant(
        &self,
        catalog: &VariantCatalog,
        component: &str,
        pre: &str,
        post: &str,
    ) -> Result<VariantOutcome> {
        let path = self.upgrade_path()?;
        Ok(catalog.check(component, pre, post, path))
    }

    pub fn strip_deprecated(
        &self,
        catalog: &VariantCatalog,
        component: &str,
        attr_data: Vec<String>,
    ) -> Vec<String> {
        catalog.strip_deprecated(component, self.to_version.as_deref(), attr_data)
    }
}

/// Read a variable, keeping a non-UTF-8 value (lossily) so it is reported
/// as unsupported rather than unset.
fn read_var(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) => Some(value),
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(raw)) => Some(raw.to_string_lossy().into_owned()),
    }
}
