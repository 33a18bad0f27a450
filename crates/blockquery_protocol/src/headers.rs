//! Transport header names and the lower-cased header map.

use crate::query::QueryParams;
use std::collections::BTreeMap;

/// Cursor/index header: the monotonically increasing blocking-query token.
pub const HEADER_INDEX: &str = "x-consul-index";

/// Whether the answering server was the leader at response time.
pub const HEADER_KNOWN_LEADER: &str = "x-consul-knownleader";

/// Milliseconds since the answering server last contacted the leader.
pub const HEADER_LAST_CONTACT: &str = "x-consul-lastcontact";

/// Standard HTTP cache-control directives.
pub const CACHE_CONTROL: &str = "cache-control";

/// Synthetic data-center pseudo-header.
///
/// Never sent on the wire; seeded from the request's query parameters so
/// the scope survives alongside the real transport metadata.
pub const HEADER_DATACENTER: &str = "x-consul-datacenter";

/// Synthetic namespace pseudo-header, same provenance as
/// [`HEADER_DATACENTER`].
pub const HEADER_NAMESPACE: &str = "x-consul-namespace";

/// Transport metadata for one completed HTTP exchange.
///
/// Header names are normalized to lower-case at construction, so lookups
/// are case-insensitive regardless of how the transport spelled them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportHeaders {
    entries: BTreeMap<String, String>,
}

impl TransportHeaders {
    /// Creates an empty header map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a header map from arbitrary-case name/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_ascii_lowercase(), v.into()))
            .collect();
        Self { entries }
    }

    /// Builds the reconciliation-time header map: the raw transport
    /// headers plus the synthetic scope pseudo-headers seeded from `query`.
    ///
    /// The data-center pseudo-header is added only when the query named a
    /// data-center; the namespace pseudo-header is always present, using
    /// `default_nspace` when the query did not name one.
    pub fn attach<I, K, V>(raw: I, query: &QueryParams, default_nspace: &str) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut headers = Self::from_pairs(raw);
        headers.attach_scope(query, default_nspace);
        headers
    }

    /// Adds the synthetic scope pseudo-headers to an existing header map.
    ///
    /// See [`TransportHeaders::attach`].
    pub fn attach_scope(&mut self, query: &QueryParams, default_nspace: &str) {
        if let Some(dc) = &query.dc {
            self.insert(HEADER_DATACENTER, dc.clone());
        }
        let nspace = query.ns.clone().unwrap_or_else(|| default_nspace.to_string());
        self.insert(HEADER_NAMESPACE, nspace);
    }

    /// Inserts a header, lower-casing the name.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.entries.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Looks up a header by name, case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns true if no headers are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the lower-cased name/value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let headers = TransportHeaders::from_pairs([("X-Consul-Index", "42")]);
        assert_eq!(headers.get("x-consul-index"), Some("42"));
        assert_eq!(headers.get("X-CONSUL-INDEX"), Some("42"));
    }

    #[test]
    fn mixed_case_spellings_collapse() {
        let upper = TransportHeaders::from_pairs([("DataCenter", "dc1")]);
        let lower = TransportHeaders::from_pairs([("datacenter", "dc1")]);
        assert_eq!(upper, lower);
    }

    #[test]
    fn attach_synthesizes_scope_from_query() {
        let query = QueryParams::new().with_dc("dc1");
        let headers =
            TransportHeaders::attach([("X-Consul-Index", "42")], &query, "default");
        assert_eq!(headers.get(HEADER_DATACENTER), Some("dc1"));
        assert_eq!(headers.get(HEADER_NAMESPACE), Some("default"));
        assert_eq!(headers.get(HEADER_INDEX), Some("42"));
    }

    #[test]
    fn attach_without_dc_omits_datacenter_header() {
        let query = QueryParams::new().with_ns("team-a");
        let headers = TransportHeaders::attach::<_, &str, String>([], &query, "default");
        assert_eq!(headers.get(HEADER_DATACENTER), None);
        assert_eq!(headers.get(HEADER_NAMESPACE), Some("team-a"));
    }

    proptest! {
        #[test]
        fn lookup_ignores_name_case(name in "[A-Za-z-]{1,20}", value in "\\PC{0,16}") {
            let headers = TransportHeaders::from_pairs([(name.clone(), value.clone())]);
            prop_assert_eq!(headers.get(&name.to_ascii_uppercase()), Some(value.as_str()));
            prop_assert_eq!(headers.get(&name.to_ascii_lowercase()), Some(value.as_str()));
        }
    }
}
