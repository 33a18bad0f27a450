//! Reconciled consistency metadata.

use serde::{Deserialize, Serialize};

/// The out-of-band consistency metadata attached to a reconciled
/// response.
///
/// Everything here comes from the transport headers (including the
/// synthetic scope pseudo-headers), except `date`, which is the local
/// wall-clock time the batch was reconciled. `date` is present only for
/// collection fetches and drives "staleness since last full sync"
/// comparisons in the store, not cache-control freshness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledMeta {
    /// Cache-control directives, verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_control: Option<String>,
    /// The blocking-query cursor/index, kept opaque.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Whether the answering server knew the current leader.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub known_leader: Option<bool>,
    /// Milliseconds since the answering server contacted the leader.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contact: Option<u64>,
    /// Data-center scope the response belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dc: Option<String>,
    /// Namespace scope the response belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nspace: Option<String>,
    /// Local synchronization timestamp in milliseconds since the epoch.
    /// Present only for collection fetches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_are_omitted_when_absent() {
        let meta = ReconciledMeta {
            cursor: Some("42".into()),
            ..ReconciledMeta::default()
        };
        let json = serde_json::to_string(&meta).unwrap();
        assert_eq!(json, r#"{"cursor":"42"}"#);
    }

    #[test]
    fn roundtrip() {
        let meta = ReconciledMeta {
            cache_control: Some("no-store".into()),
            cursor: Some("42".into()),
            known_leader: Some(true),
            last_contact: Some(12),
            dc: Some("dc1".into()),
            nspace: Some("default".into()),
            date: Some(1_700_000_000_000),
        };
        let json = serde_json::to_string(&meta).unwrap();
        let back: ReconciledMeta = serde_json::from_str(&json).unwrap();
        assert_eq!(back, meta);
    }
}
