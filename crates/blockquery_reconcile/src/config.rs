//! Configuration for the reconciler.

/// Namespace used when neither the query nor the record names one.
pub const DEFAULT_NSPACE: &str = "default";

/// Field names and defaults the reconciler operates with.
///
/// The defaults match the upstream API conventions: records are keyed by
/// a `Name` slug, scoped by `Datacenter` and `Namespace` fields, and the
/// computed compound identifier lands under `uid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileConfig {
    /// Field the compound identifier is written under.
    pub primary_key: String,
    /// Field(s) holding the natural key. Comma-separated names form a
    /// compound slug.
    pub slug_key: String,
    /// Field holding the namespace scope.
    pub nspace_key: String,
    /// Field holding the data-center scope.
    pub datacenter_key: String,
    /// Namespace used when none is supplied.
    pub default_nspace: String,
}

impl ReconcileConfig {
    /// Creates a configuration with the default field names.
    #[must_use]
    pub fn new() -> Self {
        Self {
            primary_key: "uid".into(),
            slug_key: "Name".into(),
            nspace_key: "Namespace".into(),
            datacenter_key: "Datacenter".into(),
            default_nspace: DEFAULT_NSPACE.into(),
        }
    }

    /// Sets the primary-key field name.
    #[must_use]
    pub fn with_primary_key(mut self, key: impl Into<String>) -> Self {
        self.primary_key = key.into();
        self
    }

    /// Sets the slug-key field name(s).
    #[must_use]
    pub fn with_slug_key(mut self, key: impl Into<String>) -> Self {
        self.slug_key = key.into();
        self
    }

    /// Sets the namespace field name.
    #[must_use]
    pub fn with_nspace_key(mut self, key: impl Into<String>) -> Self {
        self.nspace_key = key.into();
        self
    }

    /// Sets the data-center field name.
    #[must_use]
    pub fn with_datacenter_key(mut self, key: impl Into<String>) -> Self {
        self.datacenter_key = key.into();
        self
    }

    /// Sets the default namespace.
    #[must_use]
    pub fn with_default_nspace(mut self, nspace: impl Into<String>) -> Self {
        self.default_nspace = nspace.into();
        self
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ReconcileConfig::new();
        assert_eq!(config.primary_key, "uid");
        assert_eq!(config.slug_key, "Name");
        assert_eq!(config.nspace_key, "Namespace");
        assert_eq!(config.datacenter_key, "Datacenter");
        assert_eq!(config.default_nspace, DEFAULT_NSPACE);
    }

    #[test]
    fn builder() {
        let config = ReconcileConfig::new()
            .with_primary_key("id")
            .with_slug_key("ID,Name")
            .with_default_nspace("ns0");
        assert_eq!(config.primary_key, "id");
        assert_eq!(config.slug_key, "ID,Name");
        assert_eq!(config.default_nspace, "ns0");
    }
}
