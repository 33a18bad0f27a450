//! Decoded response body shapes.

use crate::record::Record;
use serde_json::Value;

/// The decoded body of a completed HTTP exchange.
///
/// Write operations on the API may echo only a bare boolean instead of
/// the full record; reads return one record or a sequence. Anything else
/// is carried through as [`ResponseBody::Other`] so request types this
/// layer was not built for still pass untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// A write result echoed as a bare boolean.
    Ack(bool),
    /// A single record.
    Record(Record),
    /// An ordered sequence of records.
    Collection(Vec<Record>),
    /// Any shape this layer does not recognize, passed through unmodified.
    Other(Value),
}

impl ResponseBody {
    /// Returns true for the boolean write acknowledgement.
    #[must_use]
    pub fn is_ack(&self) -> bool {
        matches!(self, ResponseBody::Ack(_))
    }
}

impl From<Value> for ResponseBody {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(ok) => ResponseBody::Ack(ok),
            Value::Object(fields) => ResponseBody::Record(Record::from(fields)),
            Value::Array(items) => {
                let records: Option<Vec<Record>> = items
                    .iter()
                    .map(|item| item.as_object().cloned().map(Record::from))
                    .collect();
                match records {
                    Some(records) => ResponseBody::Collection(records),
                    // Not a sequence of records; carry it through untouched.
                    None => ResponseBody::Other(Value::Array(items)),
                }
            }
            other => ResponseBody::Other(other),
        }
    }
}

impl From<Record> for ResponseBody {
    fn from(record: Record) -> Self {
        ResponseBody::Record(record)
    }
}

impl From<Vec<Record>> for ResponseBody {
    fn from(records: Vec<Record>) -> Self {
        ResponseBody::Collection(records)
    }
}
