//! Compound identifier computation.
//!
//! The API hands back records keyed only by a natural "slug" key that is
//! unique within one (data-center, namespace) scope. The fingerprinter
//! derives a globally unique identifier from the scope plus the slug and
//! writes it onto the record, so two tenants with identical slugs never
//! collide in the local store.

use crate::config::ReconcileConfig;
use crate::error::ReconcileResult;
use blockquery_protocol::Record;

/// Computes compound identifiers for records within one scope.
///
/// Pure and deterministic: the same `(data-center, namespace, slug)`
/// always yields the same identifier, and applying the fingerprinter to
/// an already-fingerprinted record is a no-op in effect.
#[derive(Debug, Clone)]
pub struct Fingerprinter {
    primary_key: String,
    slug_key: String,
    nspace_key: String,
    datacenter_key: String,
    default_nspace: String,
    datacenter: Option<String>,
}

impl Fingerprinter {
    /// Creates a fingerprinter for one reconciliation pass.
    ///
    /// `datacenter` is the ambient scope, usually taken from the query
    /// parameters (reads) or the submitted data (writes). When absent,
    /// the data-center embedded in each record is used instead.
    #[must_use]
    pub fn new(config: &ReconcileConfig, datacenter: Option<&str>) -> Self {
        Self {
            primary_key: config.primary_key.clone(),
            slug_key: config.slug_key.clone(),
            nspace_key: config.nspace_key.clone(),
            datacenter_key: config.datacenter_key.clone(),
            default_nspace: config.default_nspace.clone(),
            datacenter: datacenter
                .filter(|dc| !dc.is_empty())
                .map(ToString::to_string),
        }
    }

    /// Fingerprints one record.
    ///
    /// Writes the compound identifier under the primary-key field and
    /// makes the namespace field explicit on the output, so downstream
    /// consumers never see an implicit default. Missing slug values
    /// degrade to the empty string rather than failing; partially
    /// populated write echoes still get a deterministic identifier.
    pub fn apply(&self, mut record: Record) -> ReconcileResult<Record> {
        let nspace = record
            .get_str(&self.nspace_key)
            .filter(|ns| !ns.is_empty())
            .unwrap_or(&self.default_nspace)
            .to_string();
        let datacenter = self
            .datacenter
            .as_deref()
            .or_else(|| record.get_str(&self.datacenter_key))
            .unwrap_or("")
            .to_string();

        let mut parts = vec![nspace.clone(), datacenter];
        for key in self.slug_key.split(',') {
            parts.push(record.get_str(key.trim()).unwrap_or("").to_string());
        }
        let uid = serde_json::to_string(&parts)?;

        record.set(self.nspace_key.clone(), nspace);
        record.set(self.primary_key.clone(), uid);
        Ok(record)
    }

    /// The field the identifier is written under.
    #[must_use]
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fingerprinter(dc: Option<&str>) -> Fingerprinter {
        Fingerprinter::new(&ReconcileConfig::new(), dc)
    }

    #[test]
    fn identifier_embeds_scope_and_slug() {
        let record = Record::new().with("Name", "svc1");
        let out = fingerprinter(Some("dc1")).apply(record).unwrap();
        assert_eq!(out.get_str("uid"), Some(r#"["default","dc1","svc1"]"#));
        assert_eq!(out.get_str("Namespace"), Some("default"));
    }

    #[test]
    fn record_namespace_wins_over_default() {
        let record = Record::new().with("Name", "svc1").with("Namespace", "team-a");
        let out = fingerprinter(Some("dc1")).apply(record).unwrap();
        assert_eq!(out.get_str("uid"), Some(r#"["team-a","dc1","svc1"]"#));
    }

    #[test]
    fn ambient_datacenter_falls_back_to_record_field() {
        let record = Record::new().with("Name", "svc1").with("Datacenter", "dc2");
        let out = fingerprinter(None).apply(record).unwrap();
        assert_eq!(out.get_str("uid"), Some(r#"["default","dc2","svc1"]"#));
    }

    #[test]
    fn missing_slug_degrades_to_empty() {
        let out = fingerprinter(Some("dc1")).apply(Record::new()).unwrap();
        assert_eq!(out.get_str("uid"), Some(r#"["default","dc1",""]"#));
    }

    #[test]
    fn compound_slug_keys() {
        let config = ReconcileConfig::new().with_slug_key("Node,ServiceID");
        let record = Record::new().with("Node", "n1").with("ServiceID", "s1");
        let out = Fingerprinter::new(&config, Some("dc1")).apply(record).unwrap();
        assert_eq!(out.get_str("uid"), Some(r#"["default","dc1","n1","s1"]"#));
    }

    #[test]
    fn apply_is_idempotent() {
        let record = Record::new().with("Name", "svc1");
        let fp = fingerprinter(Some("dc1"));
        let once = fp.apply(record).unwrap();
        let twice = fp.apply(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    proptest! {
        #[test]
        fn deterministic(dc in "[a-z0-9-]{1,12}", ns in "[a-z0-9-]{0,12}", slug in "\\PC{0,24}") {
            let mut record = Record::new().with("Name", slug);
            if !ns.is_empty() {
                record.set("Namespace", ns);
            }
            let fp = fingerprinter(Some(&dc));
            let a = fp.apply(record.clone()).unwrap();
            let b = fp.apply(record).unwrap();
            prop_assert_eq!(a.get_str("uid"), b.get_str("uid"));
        }

        #[test]
        fn scope_separates_identical_slugs(slug in "\\PC{0,24}") {
            let record = Record::new().with("Name", slug);
            let a = fingerprinter(Some("dc1")).apply(record.clone()).unwrap();
            let b = fingerprinter(Some("dc2")).apply(record).unwrap();
            prop_assert_ne!(a.get_str("uid"), b.get_str("uid"));
        }
    }
}
