//! Normalized output shapes handed to the store.

use crate::error::{ReconcileError, ReconcileResult};
use blockquery_protocol::{ReconciledMeta, Record};
use serde_json::Value;

/// The domain data of a reconciled response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A single record.
    One(Record),
    /// An ordered sequence of records.
    Many(Vec<Record>),
    /// A body shape this layer does not understand, unmodified.
    Passthrough(Value),
}

impl Payload {
    fn shape(&self) -> &'static str {
        match self {
            Payload::One(_) => "record",
            Payload::Many(_) => "collection",
            Payload::Passthrough(_) => "passthrough",
        }
    }
}

/// A reconciled read or write response: consistency metadata next to the
/// scoped, identified records.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Consistency metadata extracted from the transport headers.
    pub meta: ReconciledMeta,
    /// The reconciled domain data.
    pub payload: Payload,
}

impl Normalized {
    /// The single record this response carries.
    pub fn record(&self) -> ReconcileResult<&Record> {
        match &self.payload {
            Payload::One(record) => Ok(record),
            other => Err(ReconcileError::UnexpectedShape {
                expected: "record",
                got: other.shape(),
            }),
        }
    }

    /// The record sequence this response carries.
    pub fn records(&self) -> ReconcileResult<&[Record]> {
        match &self.payload {
            Payload::Many(records) => Ok(records),
            other => Err(ReconcileError::UnexpectedShape {
                expected: "collection",
                got: other.shape(),
            }),
        }
    }
}

/// Outcome of reconciling one operation.
///
/// Deletes return only the compound identifier of the removed record;
/// everything else returns a full metadata-bearing envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciled {
    /// A read or write envelope: metadata plus records.
    Envelope(Normalized),
    /// A delete result: a record holding exactly the primary-key field.
    Deleted(Record),
}

impl Reconciled {
    /// The envelope, for read and write operations.
    pub fn envelope(self) -> ReconcileResult<Normalized> {
        match self {
            Reconciled::Envelope(normalized) => Ok(normalized),
            Reconciled::Deleted(_) => Err(ReconcileError::UnexpectedShape {
                expected: "envelope",
                got: "deleted",
            }),
        }
    }

    /// The minimal deleted-record mapping, for delete operations.
    pub fn deleted(self) -> ReconcileResult<Record> {
        match self {
            Reconciled::Deleted(record) => Ok(record),
            Reconciled::Envelope(normalized) => Err(ReconcileError::UnexpectedShape {
                expected: "deleted",
                got: normalized.payload.shape(),
            }),
        }
    }
}
