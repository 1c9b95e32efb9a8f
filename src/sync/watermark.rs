use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// How much archive history has been imported, and whether the station has
/// produced more since. Process-local; re-seeded from the archive store on
/// startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct SyncWatermark {
    /// Station archive pointer seen at the last accepted live poll
    pub next_record_pointer: Option<i64>,
    /// Identity of the newest imported archive record
    pub last_archive_timestamp: Option<DateTime<Utc>>,
}

impl SyncWatermark {
    #[must_use]
    pub fn new(
        next_record_pointer: Option<i64>,
        last_archive_timestamp: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            next_record_pointer,
            last_archive_timestamp,
        }
    }

    /// True when `observed` differs from the stored pointer, or when no
    /// pointer has been accepted yet.
    #[must_use]
    pub fn pointer_changed(&self, observed: Option<i64>) -> bool {
        match self.next_record_pointer {
            None => true,
            Some(current) => observed != Some(current),
        }
    }

    pub fn seed_pointer(&mut self, observed: Option<i64>) {
        self.next_record_pointer = observed;
    }

    pub fn seed_archive_timestamp(&mut self, latest: Option<DateTime<Utc>>) {
        self.last_archive_timestamp = latest;
    }

    /// Accept a batch that has been durably stored: advance the timestamp to
    /// `last_in_batch` (never backwards) and take `observed_pointer` as the
    /// current pointer. Returns whether the timestamp moved.
    ///
    /// Must only be called after the store write succeeded.
    pub fn record_persisted(
        &mut self,
        last_in_batch: DateTime<Utc>,
        observed_pointer: Option<i64>,
    ) -> bool {
        let advanced = self
            .last_archive_timestamp
            .is_none_or(|current| last_in_batch > current);
        if advanced {
            self.last_archive_timestamp = Some(last_in_batch);
        }
        self.next_record_pointer = observed_pointer;
        advanced
    }
}
