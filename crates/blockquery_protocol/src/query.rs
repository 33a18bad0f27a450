//! Query-string scope parameters.

use serde::{Deserialize, Serialize};

/// The scope a request's query string may carry.
///
/// Both fields are optional: an absent data-center means "the ambient
/// default the API is configured with", an absent namespace means the
/// default namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    /// Target data-center (`dc` query parameter).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dc: Option<String>,
    /// Target namespace (`ns` query parameter).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ns: Option<String>,
}

impl QueryParams {
    /// Creates empty query parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the data-center.
    #[must_use]
    pub fn with_dc(mut self, dc: impl Into<String>) -> Self {
        self.dc = Some(dc.into());
        self
    }

    /// Sets the namespace.
    #[must_use]
    pub fn with_ns(mut self, ns: impl Into<String>) -> Self {
        self.ns = Some(ns.into());
        self
    }
}
