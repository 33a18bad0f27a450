//! # Blockquery Protocol
//!
//! Boundary types for reconciling blocking-query (long-poll) HTTP
//! responses with a local object store.
//!
//! This crate provides:
//! - `TransportHeaders` for case-insensitive transport metadata
//! - `QueryParams` for the scope carried by a request's query string
//! - `Record` and `ResponseBody` for decoded response payloads
//! - `ReconciledMeta` for the consistency metadata handed to the store
//!
//! This is a pure boundary crate with no I/O and no clock access.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod body;
mod headers;
mod meta;
mod query;
mod record;
mod response;

pub use body::ResponseBody;
pub use headers::{
    TransportHeaders, CACHE_CONTROL, HEADER_DATACENTER, HEADER_INDEX, HEADER_KNOWN_LEADER,
    HEADER_LAST_CONTACT, HEADER_NAMESPACE,
};
pub use meta::ReconciledMeta;
pub use query::QueryParams;
pub use record::Record;
pub use response::Response;
