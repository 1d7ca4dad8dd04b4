//! Variant catalogue
//!
//! Holds the expected per-version values of every attribute known to change
//! across releases, plus the attribute entities removed at each release.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Result, VariantError};
use crate::outcome::VariantOutcome;
use crate::version::{SupportedVersion, UpgradePath};

/// Expected value of one attribute at every supported version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VariantRow {
    values: [String; SupportedVersion::COUNT],
}

impl VariantRow {
    pub fn new(values: [&str; SupportedVersion::COUNT]) -> Self {
        Self {
            values: values.map(str::to_string),
        }
    }

    /// `before` up to (not including) `pivot`, `after` from `pivot` onwards.
    pub fn changed_at(pivot: SupportedVersion, before: &str, after: &str) -> Self {
        Self {
            values: std::array::from_fn(|i| {
                let value = if i < pivot.index() { before } else { after };
                value.to_string()
            }),
        }
    }

    /// Build a row from loaded data, rejecting the wrong width.
    pub fn from_values(component: &str, index: usize, values: Vec<String>) -> Result<Self> {
        let found = values.len();
        let values = <[String; SupportedVersion::COUNT]>::try_from(values).map_err(|_| {
            VariantError::MalformedRow {
                component: component.to_string(),
                index,
                found,
                expected: SupportedVersion::COUNT,
            }
        })?;
        Ok(Self { values })
    }

    pub fn value_at(&self, version: SupportedVersion) -> &str {
        &self.values[version.index()]
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Whether this row explains `pre` turning into `post` along `path`
    pub fn explains(&self, pre: &str, post: &str, path: UpgradePath) -> bool {
        self.value_at(path.from) == pre && self.value_at(path.to) == post
    }
}

/// Component name to variant rows, and per-version deprecations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VariantCatalog {
    variants: BTreeMap<String, Vec<VariantRow>>,
    deprecated: BTreeMap<SupportedVersion, BTreeMap<String, Vec<String>>>,
}

/// On-disk layout of a catalogue file
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    variants: BTreeMap<String, Vec<Vec<String>>>,
    #[serde(default)]
    deprecated: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl VariantCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `row` after any rows already known for `component`
    pub fn add_row(&mut self, component: impl Into<String>, row: VariantRow) -> &mut Self {
        self.variants.entry(component.into()).or_default().push(row);
        self
    }

    pub fn with_rows(
        mut self,
        component: impl Into<String>,
        rows: impl IntoIterator<Item = VariantRow>,
    ) -> Self {
        self.variants.entry(component.into()).or_default().extend(rows);
        self
    }

    /// Mark attribute entities of `component` as removed in `version`
    pub fn deprecate<I, S>(&mut self, version: SupportedVersion, component: &str, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self
            .deprecated
            .entry(version)
            .or_default()
            .entry(component.to_string())
            .or_default();
        for name in names {
            let name = name.into();
            if !entry.contains(&name) {
                entry.push(name);
            }
        }
        self
    }

    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }

    pub fn rows(&self, component: &str) -> &[VariantRow] {
        self.variants.get(component).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn deprecated_for(&self, version: SupportedVersion, component: &str) -> &[String] {
        self.deprecated
            .get(&version)
            .and_then(|components| components.get(component))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Decide whether `pre` -> `post` is acceptable along `path`.
    ///
    /// Rows are scanned in registration order and the first match wins.
    /// Without a match the values must be equal.
    pub fn check(&self, component: &str, pre: &str, post: &str, path: UpgradePath) -> VariantOutcome {
        let rows = self.rows(component);
        if let Some(row) = rows.iter().position(|r| r.explains(pre, post, path)) {
            tracing::debug!(component, row, %path, "catalogued variation");
            return VariantOutcome::Catalogued { row };
        }

        if pre == post {
            VariantOutcome::Identical
        } else {
            let expected = self.expected_post_values(component, pre, path);
            tracing::debug!(component, pre, post, %path, "unexpected variation");
            VariantOutcome::Unexpected { expected }
        }
    }

    /// Validate raw version identifiers, then [`VariantCatalog::check`].
    pub fn check_variant(
        &self,
        component: &str,
        pre: &str,
        post: &str,
        from_version: &str,
        to_version: &str,
    ) -> Result<VariantOutcome> {
        let path = UpgradePath::parse(from_version, to_version)?;
        Ok(self.check(component, pre, post, path))
    }

    pub fn assert_varients(
        &self,
        component: &str,
        pre: &str,
        post: &str,
        from_version: &str,
        to_version: &str,
    ) -> Result<bool> {
        Ok(self
            .check_variant(component, pre, post, from_version, to_version)?
            .is_pass())
    }

    /// Catalogued post-upgrade values for a pre-upgrade value, in row order
    pub fn expected_post_values(&self, component: &str, pre: &str, path: UpgradePath) -> Vec<String> {
        let mut expected: Vec<String> = Vec::new();
        for row in self.rows(component) {
            if row.value_at(path.from) == pre {
                let post = row.value_at(path.to);
                if !expected.iter().any(|e| e == post) {
                    expected.push(post.to_string());
                }
            }
        }
        expected
    }

    /// Remove the entities deprecated for `component` at `to_version`.
    ///
    /// Only the first occurrence of each deprecated name is removed. An
    /// unset or unknown version leaves the data untouched.
    pub fn strip_deprecated(
        &self,
        component: &str,
        to_version: Option<&str>,
        mut attr_data: Vec<String>,
    ) -> Vec<String> {
        let Some(version) = to_version.and_then(|v| v.parse::<SupportedVersion>().ok()) else {
            return attr_data;
        };

        for name in self.deprecated_for(version, component) {
            if let Some(pos) = attr_data.iter().position(|attr| attr == name) {
                attr_data.remove(pos);
                tracing::debug!(component, %version, attr = %name, "dropped deprecated entity");
            }
        }
        attr_data
    }

    /// Parse a YAML catalogue, validating every row and version key.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        let mut catalog = Self::new();

        for (component, rows) in file.variants {
            for (index, values) in rows.into_iter().enumerate() {
                let row = VariantRow::from_values(&component, index, values)?;
                catalog.add_row(component.as_str(), row);
            }
        }

        for (version, components) in file.deprecated {
            let version: SupportedVersion = version
                .parse()
                .map_err(|_| VariantError::UnknownVersionKey(version.clone()))?;
            for (component, names) in components {
                catalog.deprecate(version, &component, names);
            }
        }

        Ok(catalog)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| VariantError::CatalogLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_yaml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            components = catalog.variants.len(),
            "loaded variant catalog"
        );
        Ok(catalog)
    }

    /// Append `other` after this catalogue's own rows and deprecations.
    pub fn merge(&mut self, other: VariantCatalog) {
        for (component, rows) in other.variants {
            self.variants.entry(component).or_default().extend(rows);
        }
        for (version, components) in other.deprecated {
            for (component, names) in components {
                self.deprecate(version, &component, names);
            }
        }
    }
}
