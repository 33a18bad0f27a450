//! A completed HTTP exchange as handed to the reconciler.

use crate::body::ResponseBody;
use crate::headers::TransportHeaders;

/// The decoded result of one completed HTTP exchange.
///
/// Transport metadata travels next to the body as an explicit pair; it is
/// never smuggled through as a disguised field on the payload, so it can
/// never collide with real payload keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Lower-cased transport headers.
    pub headers: TransportHeaders,
    /// Decoded body.
    pub body: ResponseBody,
}

impl Response {
    /// Builds a response from arbitrary-case header pairs and a decoded
    /// body.
    pub fn new<I, K, V>(headers: I, body: impl Into<ResponseBody>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            headers: TransportHeaders::from_pairs(headers),
            body: body.into(),
        }
    }

    /// Builds a response with no headers.
    pub fn bare(body: impl Into<ResponseBody>) -> Self {
        Self {
            headers: TransportHeaders::new(),
            body: body.into(),
        }
    }
}
