//! Per-operation response reconciliation.

use crate::clock::{Clock, SystemClock};
use crate::config::ReconcileConfig;
use crate::error::ReconcileResult;
use crate::extract::extract_meta;
use crate::fingerprint::Fingerprinter;
use crate::payload::{Normalized, Payload, Reconciled};
use blockquery_protocol::{QueryParams, Record, Response, ResponseBody};
use serde_json::Value;
use tracing::debug;

/// One reconcilable request, tagged by kind.
///
/// The set of supported operations is closed: adding a kind means adding
/// a variant, and every handler site is checked exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Fetch a collection of records.
    Query {
        /// Query parameters the request was issued with.
        query: QueryParams,
        /// The completed exchange.
        response: Response,
    },
    /// Fetch a single record.
    QueryRecord {
        /// Query parameters the request was issued with.
        query: QueryParams,
        /// The completed exchange.
        response: Response,
    },
    /// Create a record.
    Create {
        /// The data the caller submitted.
        data: Record,
        /// The completed exchange.
        response: Response,
    },
    /// Update a record.
    Update {
        /// The data the caller submitted.
        data: Record,
        /// The completed exchange.
        response: Response,
    },
    /// Delete a record. Only the submitted data matters; the response
    /// carries nothing the store needs.
    Delete {
        /// The data identifying the record being deleted.
        data: Record,
    },
}

/// Reconciles completed HTTP exchanges into store-ready shapes.
///
/// Stateless across calls; the only side effect is one wall-clock read
/// per collection fetch, isolated behind [`Clock`]. Two in-flight
/// reconciliations never share mutable state.
#[derive(Debug, Clone)]
pub struct Reconciler<C: Clock = SystemClock> {
    config: ReconcileConfig,
    clock: C,
}

impl Reconciler<SystemClock> {
    /// Creates a reconciler using the system wall clock.
    #[must_use]
    pub fn new(config: ReconcileConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Reconciler<C> {
    /// Creates a reconciler with an explicit clock.
    #[must_use]
    pub fn with_clock(config: ReconcileConfig, clock: C) -> Self {
        Self { config, clock }
    }

    /// The configuration this reconciler operates with.
    #[must_use]
    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Reconciles one operation.
    pub fn reconcile(&self, op: Operation) -> ReconcileResult<Reconciled> {
        match op {
            Operation::Query { query, response } => self
                .query(&query, response)
                .map(Reconciled::Envelope),
            Operation::QueryRecord { query, response } => self
                .query_record(&query, response)
                .map(Reconciled::Envelope),
            Operation::Create { data, response } => self
                .create(&data, response)
                .map(Reconciled::Envelope),
            Operation::Update { data, response } => self
                .update(&data, response)
                .map(Reconciled::Envelope),
            Operation::Delete { data } => self.delete(&data).map(Reconciled::Deleted),
        }
    }

    /// Reconciles a collection fetch.
    ///
    /// Every record is fingerprinted under the query's data-center, the
    /// batch is stamped with a shared `SyncTime`, and the metadata
    /// carries the reconciliation time as `date`.
    pub fn query(&self, query: &QueryParams, response: Response) -> ReconcileResult<Normalized> {
        self.handle_read(query, response, true)
    }

    /// Reconciles a single-record fetch. No `SyncTime` is stamped.
    pub fn query_record(
        &self,
        query: &QueryParams,
        response: Response,
    ) -> ReconcileResult<Normalized> {
        self.handle_read(query, response, false)
    }

    /// Reconciles a create response.
    ///
    /// A bare `true` body means the API acknowledged without echoing the
    /// record; the submitted data is fingerprinted in its place, under
    /// the data-center embedded in that data (creates may target a scope
    /// no query string reflects). See [`Reconciler::update`] for the
    /// staleness caveat this substitution shares.
    pub fn create(&self, data: &Record, response: Response) -> ReconcileResult<Normalized> {
        self.handle_write(data, response, "create")
    }

    /// Reconciles an update response.
    ///
    /// Same substitution rule as [`Reconciler::create`]: a bare `true`
    /// body reuses the submitted data. This is an optimization, not a
    /// guarantee — if a field participating in the compound identifier
    /// (the namespace, say) was changed server-side without being
    /// echoed, the recomputed identifier is based on stale submitted
    /// data. Callers that cannot accept that window should re-fetch
    /// after updating.
    pub fn update(&self, data: &Record, response: Response) -> ReconcileResult<Normalized> {
        self.handle_write(data, response, "update")
    }

    /// Reconciles a delete.
    ///
    /// Returns a record holding exactly one field: the primary key
    /// mapped to the compound identifier of the deleted record, rebuilt
    /// from the slug and namespace of the submitted data. Nothing else
    /// is returned; the record is gone.
    pub fn delete(&self, data: &Record) -> ReconcileResult<Record> {
        let fingerprinter =
            Fingerprinter::new(&self.config, data.get_str(&self.config.datacenter_key));
        let mut minimal = Record::new();
        for key in self.config.slug_key.split(',') {
            let key = key.trim();
            if let Some(value) = data.get(key) {
                minimal.set(key, value.clone());
            }
        }
        if let Some(nspace) = data.get(&self.config.nspace_key) {
            minimal.set(self.config.nspace_key.clone(), nspace.clone());
        }
        let fingerprinted = fingerprinter.apply(minimal)?;
        let uid = fingerprinted
            .get(&self.config.primary_key)
            .cloned()
            .unwrap_or(Value::Null);
        Ok(Record::new().with(self.config.primary_key.clone(), uid))
    }

    fn handle_read(
        &self,
        query: &QueryParams,
        response: Response,
        is_collection_fetch: bool,
    ) -> ReconcileResult<Normalized> {
        let mut headers = response.headers;
        headers.attach_scope(query, &self.config.default_nspace);
        let fingerprinter = Fingerprinter::new(&self.config, query.dc.as_deref());
        let mut payload = match response.body {
            ResponseBody::Collection(records) => Payload::Many(
                records
                    .into_iter()
                    .map(|record| fingerprinter.apply(record))
                    .collect::<ReconcileResult<_>>()?,
            ),
            ResponseBody::Record(record) => Payload::One(fingerprinter.apply(record)?),
            other => passthrough(other),
        };
        let meta = extract_meta(&headers, &mut payload, is_collection_fetch, &self.clock);
        Ok(Normalized { meta, payload })
    }

    fn handle_write(
        &self,
        data: &Record,
        response: Response,
        op: &'static str,
    ) -> ReconcileResult<Normalized> {
        let fingerprinter =
            Fingerprinter::new(&self.config, data.get_str(&self.config.datacenter_key));
        let mut payload = match response.body {
            ResponseBody::Ack(true) => {
                debug!(op, "write acknowledged without echo, reusing submitted data");
                Payload::One(fingerprinter.apply(data.clone())?)
            }
            ResponseBody::Record(record) => Payload::One(fingerprinter.apply(record)?),
            other => passthrough(other),
        };
        let meta = extract_meta(&response.headers, &mut payload, false, &self.clock);
        Ok(Normalized { meta, payload })
    }
}

/// Carries an unrecognized body shape through unmodified, preserving
/// forward-compatibility with request types this layer was not built for.
fn passthrough(body: ResponseBody) -> Payload {
    debug!("unrecognized body shape, passing through");
    let value = match body {
        ResponseBody::Ack(ok) => Value::Bool(ok),
        ResponseBody::Record(record) => record.into(),
        ResponseBody::Collection(records) => {
            Value::Array(records.into_iter().map(Value::from).collect())
        }
        ResponseBody::Other(value) => value,
    };
    Payload::Passthrough(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::extract::SYNC_TIME_FIELD;
    use serde_json::json;

    const T: u64 = 1_700_000_000_000;

    fn reconciler() -> Reconciler<FixedClock> {
        Reconciler::with_clock(ReconcileConfig::new(), FixedClock::new(T))
    }

    #[test]
    fn query_fingerprints_under_query_datacenter() {
        let query = QueryParams::new().with_dc("dc1");
        let response = Response::new(
            [("X-Consul-Index", "42")],
            json!([{"Name": "svc1"}, {"Name": "svc2"}]),
        );
        let normalized = reconciler().query(&query, response).unwrap();
        let records = normalized.records().unwrap();
        assert_eq!(
            records[0].get_str("uid"),
            Some(r#"["default","dc1","svc1"]"#)
        );
        assert_eq!(
            records[1].get_str("uid"),
            Some(r#"["default","dc1","svc2"]"#)
        );
        assert_eq!(normalized.meta.cursor.as_deref(), Some("42"));
        assert_eq!(normalized.meta.date, Some(T));
    }

    #[test]
    fn query_record_is_not_stamped() {
        let query = QueryParams::new().with_dc("dc1");
        let response = Response::new([("X-Consul-Index", "5")], json!({"Name": "svc1"}));
        let normalized = reconciler().query_record(&query, response).unwrap();
        let record = normalized.record().unwrap();
        assert_eq!(record.get_str("uid"), Some(r#"["default","dc1","svc1"]"#));
        assert!(!record.contains(SYNC_TIME_FIELD));
        assert_eq!(normalized.meta.date, None);
    }

    #[test]
    fn create_substitutes_submitted_data_for_ack() {
        let data = Record::new().with("Name", "svc1").with("Datacenter", "dc1");
        let response = Response::bare(json!(true));
        let normalized = reconciler().create(&data, response).unwrap();
        let record = normalized.record().unwrap();
        assert_eq!(record.get_str("uid"), Some(r#"["default","dc1","svc1"]"#));
        assert_eq!(record.get_str("Name"), Some("svc1"));
    }

    #[test]
    fn create_uses_echoed_record_when_present() {
        let data = Record::new().with("Name", "svc1").with("Datacenter", "dc1");
        let response = Response::bare(json!({"Name": "svc1", "Port": 8080}));
        let normalized = reconciler().create(&data, response).unwrap();
        let record = normalized.record().unwrap();
        assert_eq!(record.get("Port"), Some(&json!(8080)));
        assert_eq!(record.get_str("uid"), Some(r#"["default","dc1","svc1"]"#));
    }

    #[test]
    fn update_substitutes_like_create() {
        let data = Record::new()
            .with("Name", "svc1")
            .with("Datacenter", "dc1")
            .with("Namespace", "team-a");
        let response = Response::bare(json!(true));
        let normalized = reconciler().update(&data, response).unwrap();
        let record = normalized.record().unwrap();
        assert_eq!(record.get_str("uid"), Some(r#"["team-a","dc1","svc1"]"#));
    }

    #[test]
    fn failed_ack_passes_through() {
        let data = Record::new().with("Name", "svc1");
        let response = Response::bare(json!(false));
        let normalized = reconciler().create(&data, response).unwrap();
        assert_eq!(normalized.payload, Payload::Passthrough(json!(false)));
    }

    #[test]
    fn delete_returns_only_the_identifier() {
        let data = Record::new()
            .with("Name", "svc1")
            .with("Namespace", "default")
            .with("Datacenter", "dc1")
            .with("Port", 8080);
        let deleted = reconciler().delete(&data).unwrap();
        assert_eq!(deleted.len(), 1);
        assert_eq!(deleted.get_str("uid"), Some(r#"["default","dc1","svc1"]"#));
    }

    #[test]
    fn unrecognized_query_body_passes_through() {
        let query = QueryParams::new();
        let response = Response::bare(json!("leader:8300"));
        let normalized = reconciler().query(&query, response).unwrap();
        assert_eq!(
            normalized.payload,
            Payload::Passthrough(json!("leader:8300"))
        );
        // The clock still stamps the batch time onto the metadata.
        assert_eq!(normalized.meta.date, Some(T));
    }

    #[test]
    fn reconcile_dispatches_exhaustively() {
        let op = Operation::Delete {
            data: Record::new().with("Name", "svc1").with("Datacenter", "dc1"),
        };
        let deleted = reconciler().reconcile(op).unwrap().deleted().unwrap();
        assert_eq!(deleted.len(), 1);
    }
}
