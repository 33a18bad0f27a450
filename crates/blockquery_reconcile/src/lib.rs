//! # Blockquery Reconcile
//!
//! Client-side reconciliation between a blocking-query (long-poll) HTTP
//! API and a local object store.
//!
//! This crate provides:
//! - `Fingerprinter` for scope-qualified compound identifiers
//! - `Reconciler` for per-operation response shaping
//! - `extract_meta` for structured consistency metadata
//! - `Clock` abstraction so tests can pin the wall clock
//!
//! ## Architecture
//!
//! One reconciliation runs per completed HTTP exchange:
//!
//! 1. The raw headers and the query's scope are merged into a lower-cased
//!    transport header map.
//! 2. Every record is given a compound identifier derived from
//!    `(data-center, namespace, slug)`.
//! 3. The headers become a [`ReconciledMeta`](blockquery_protocol::ReconciledMeta),
//!    with collection fetches stamped with a shared synchronization time.
//!
//! ## Key Invariants
//!
//! - Identical `(data-center, namespace, slug)` always yields the same
//!   identifier; differing scope always yields a different one
//! - Header lookups are case-insensitive
//! - Scope travels as explicit metadata, never as a payload field
//! - Missing slug or namespace values degrade to defaults, never fail
//! - The reconciler is stateless across calls

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod clock;
mod config;
mod error;
mod extract;
mod fingerprint;
mod payload;
mod reconcile;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ReconcileConfig, DEFAULT_NSPACE};
pub use error::{ReconcileError, ReconcileResult};
pub use extract::{extract_meta, SYNC_TIME_FIELD};
pub use fingerprint::Fingerprinter;
pub use payload::{Normalized, Payload, Reconciled};
pub use reconcile::{Operation, Reconciler};
