//! Transport metadata extraction.

use crate::clock::Clock;
use crate::payload::Payload;
use blockquery_protocol::{
    ReconciledMeta, TransportHeaders, CACHE_CONTROL, HEADER_DATACENTER, HEADER_INDEX,
    HEADER_KNOWN_LEADER, HEADER_LAST_CONTACT, HEADER_NAMESPACE,
};
use tracing::trace;

/// Field stamped onto every element of a collection fetch with the
/// batch's reconciliation time.
pub const SYNC_TIME_FIELD: &str = "SyncTime";

/// Converts the lower-cased transport metadata into a structured
/// [`ReconciledMeta`].
///
/// For collection fetches this also reads the wall clock once, records it
/// as `meta.date`, and stamps the same value onto every payload element
/// as [`SYNC_TIME_FIELD`], so the store can detect "this batch was
/// resynchronized at time T" independent of any per-record timestamps
/// the API supplies. Non-collection requests are never stamped; their
/// update tracking belongs to the store.
pub fn extract_meta<C: Clock>(
    headers: &TransportHeaders,
    payload: &mut Payload,
    is_collection_fetch: bool,
    clock: &C,
) -> ReconciledMeta {
    let mut meta = ReconciledMeta {
        cache_control: headers.get(CACHE_CONTROL).map(ToString::to_string),
        cursor: headers.get(HEADER_INDEX).map(ToString::to_string),
        known_leader: headers.get(HEADER_KNOWN_LEADER).and_then(|v| v.parse().ok()),
        last_contact: headers.get(HEADER_LAST_CONTACT).and_then(|v| v.parse().ok()),
        dc: headers.get(HEADER_DATACENTER).map(ToString::to_string),
        nspace: headers.get(HEADER_NAMESPACE).map(ToString::to_string),
        date: None,
    };
    if is_collection_fetch {
        let date = clock.now_millis();
        meta.date = Some(date);
        if let Payload::Many(records) = payload {
            for record in records.iter_mut() {
                record.set(SYNC_TIME_FIELD, date);
            }
        }
    }
    trace!(cursor = ?meta.cursor, dc = ?meta.dc, nspace = ?meta.nspace, "extracted meta");
    meta
}
