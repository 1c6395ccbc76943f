//! Domain entities - persisted records with identity

mod issue;
mod repository;

pub use issue::{Issue, IssueDraft};
pub use repository::{find_duplicate, Repository, GITHUB_ORIGIN};

use std::cmp::Reverse;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::common::parse_datetime;

/// A record that can live in a keyed collection.
///
/// Collections are keyed by [`Record::record_id`] and displayed newest first
/// by [`Record::created_at`], which is the ISO-8601 text as stored.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Human-readable entity name used in errors and logs.
    const ENTITY_TYPE: &'static str;

    fn record_id(&self) -> &str;

    fn created_at(&self) -> &str;
}

/// Sort records newest first, breaking ties by id so the order is stable
/// regardless of how the collection was stored.
///
/// Timestamps are compared as instants, so offsets are honoured. Records
/// whose timestamp does not parse sort after all others.
pub fn sort_newest_first<T: Record>(records: &mut [T]) {
    records.sort_by_cached_key(|record| {
        (
            Reverse(parse_datetime(record.created_at())),
            record.record_id().to_string(),
        )
    });
}
