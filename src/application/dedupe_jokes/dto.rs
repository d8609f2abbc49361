use serde::Serialize;
use ts_rs::TS;
use uuid::Uuid;

/// Report of one dedup maintenance sweep.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct DedupeReport {
    /// Active jokes examined
    pub scanned: usize,
    /// Groups that contained more than one equivalent joke
    pub duplicate_groups: usize,
    /// Ids hard-deleted by this sweep
    pub removed: Vec<Uuid>,
}
