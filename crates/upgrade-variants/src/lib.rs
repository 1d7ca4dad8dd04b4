//! Upgrade Variants: expected value changes across product releases
//!
//! Upgrade tests compare an attribute of some component before and after an
//! upgrade. Some of those attributes are known to change between releases
//! (renamed roles, reworded setting descriptions, new permissions). This
//! crate holds that catalogue and decides whether an observed change is a
//! catalogued variation or a regression.
//!
//! # Example
//!
//! ```
//! use upgrade_variants::assert_varients;
//!
//! // Renamed in 6.4
//! let ok = assert_varients(
//!     "organization",
//!     "default_organization",
//!     "default organization",
//!     "6.3",
//!     "6.5",
//! )
//! .unwrap();
//! assert!(ok);
//!
//! // Anything else must be unchanged
//! assert!(!assert_varients("organization", "default_organization", "acme", "6.1", "6.5").unwrap());
//!
//! // Unknown versions are a harness error, not a failed comparison
//! assert!(assert_varients("filter", "x", "y", "6.0", "6.5").is_err());
//! ```
//!
//! # Deprecated entities
//!
//! ```
//! use upgrade_variants::depreciated_attrs_less_component_data;
//!
//! let settings = vec!["use_pulp_oauth".to_string(), "other_setting".to_string()];
//! let remaining = depreciated_attrs_less_component_data("settings", Some("6.4"), settings);
//! assert_eq!(remaining, vec!["other_setting".to_string()]);
//! ```

pub mod builtin;
pub mod catalog;
pub mod env;
pub mod error;
pub mod outcome;
pub mod version;

pub use catalog::{VariantCatalog, VariantRow};
pub use env::{UpgradeEnv, FROM_VERSION_VAR, TO_VERSION_VAR};
pub use error::{Result, VariantError};
pub use outcome::VariantOutcome;
pub use version::{SupportedVersion, UpgradePath, VersionRole};

/// Whether `pre` -> `post` is identical or a catalogued change for
/// `component` when upgrading `from_version` -> `to_version`.
///
/// Fails with [`VariantError::UnsupportedVersion`] when either version is
/// not supported.
pub fn assert_varients(
    component: &str,
    pre: &str,
    post: &str,
    from_version: &str,
    to_version: &str,
) -> Result<bool> {
    builtin::catalog().assert_varients(component, pre, post, from_version, to_version)
}

/// Like [`assert_varients`], keeping the reason for the verdict
pub fn check_variant(
    component: &str,
    pre: &str,
    post: &str,
    from_version: &str,
    to_version: &str,
) -> Result<VariantOutcome> {
    builtin::catalog().check_variant(component, pre, post, from_version, to_version)
}

/// Drop attribute entities of `component` that no longer exist in
/// `to_version`, so they are not reported as missing after the upgrade.
pub fn depreciated_attrs_less_component_data(
    component: &str,
    to_version: Option<&str>,
    attr_data: Vec<String>,
) -> Vec<String> {
    builtin::catalog().strip_deprecated(component, to_version, attr_data)
}
