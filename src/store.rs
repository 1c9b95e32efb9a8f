//! Persistence for current conditions and the archive time series.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::entity::{live_weather, weather_archive};
use crate::error::{AppError, AppResult};
use crate::station::{ArchiveRecord, LiveConditions};

/// Rows per insert statement. Keeps bind parameters well under SQLite's limit.
const BATCH_SIZE: usize = 500;

/// Time-bounded slice of the archive, ascending by time.
#[derive(Debug, Clone, Default)]
pub struct ArchiveQuery {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub limit: Option<u64>,
}

#[async_trait]
pub trait WeatherStore: Send + Sync {
    /// Overwrite the single current-conditions row.
    async fn upsert_live(&self, live: &LiveConditions) -> AppResult<()>;

    async fn current_live(&self) -> AppResult<Option<LiveConditions>>;

    /// Insert or replace archive records by timestamp. The batch is written
    /// atomically: either every record lands or none does.
    async fn upsert_archive(&self, records: &[ArchiveRecord]) -> AppResult<u64>;

    /// Timestamp of the newest archive row, if any.
    async fn latest_archive_time(&self) -> AppResult<Option<DateTime<Utc>>>;

    async fn archive_range(&self, query: &ArchiveQuery) -> AppResult<Vec<ArchiveRecord>>;
}

/// Store backed by a sea-orm connection (Postgres in production, SQLite in
/// tests). Tables are created by the `migration` crate.
#[derive(Clone)]
pub struct DbStore {
    db: DatabaseConnection,
}

impl DbStore {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Verify both collections are queryable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` naming the collection that failed.
    pub async fn check_collections(&self) -> AppResult<()> {
        live_weather::Entity::find()
            .one(&self.db)
            .await
            .map_err(|e| AppError::Store(format!("Problem with live database: {e}")))?;
        weather_archive::Entity::find()
            .one(&self.db)
            .await
            .map_err(|e| AppError::Store(format!("Problem with archive database: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl WeatherStore for DbStore {
    async fn upsert_live(&self, live: &LiveConditions) -> AppResult<()> {
        let model = live_weather::ActiveModel::from(live);

        live_weather::Entity::insert(model)
            .on_conflict(
                OnConflict::column(live_weather::Column::Slot)
                    .update_columns(live_weather::VALUE_COLUMNS)
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }

    async fn current_live(&self) -> AppResult<Option<LiveConditions>> {
        Ok(live_weather::Entity::find_by_id(live_weather::CURRENT_SLOT.to_string())
            .one(&self.db)
            .await?
            .map(LiveConditions::from))
    }

    async fn upsert_archive(&self, records: &[ArchiveRecord]) -> AppResult<u64> {
        if records.is_empty() {
            return Ok(0);
        }

        let txn = self.db.begin().await?;
        let mut written = 0;

        for chunk in records.chunks(BATCH_SIZE) {
            let models: Vec<weather_archive::ActiveModel> =
                chunk.iter().map(weather_archive::ActiveModel::from).collect();

            written += weather_archive::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::column(weather_archive::Column::Time)
                        .update_columns(weather_archive::VALUE_COLUMNS)
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(written)
    }

    async fn latest_archive_time(&self) -> AppResult<Option<DateTime<Utc>>> {
        Ok(weather_archive::Entity::find()
            .order_by_desc(weather_archive::Column::Time)
            .one(&self.db)
            .await?
            .map(|m| m.time))
    }

    async fn archive_range(&self, query: &ArchiveQuery) -> AppResult<Vec<ArchiveRecord>> {
        let mut select = weather_archive::Entity::find();
        if let Some(start) = query.start {
            select = select.filter(weather_archive::Column::Time.gte(start));
        }
        if let Some(end) = query.end {
            select = select.filter(weather_archive::Column::Time.lte(end));
        }
        select = select.order_by_asc(weather_archive::Column::Time);
        if let Some(limit) = query.limit {
            select = select.limit(limit);
        }

        Ok(select
            .all(&self.db)
            .await?
            .into_iter()
            .map(ArchiveRecord::from)
            .collect())
    }
}

#[derive(Default)]
struct MemoryInner {
    live: Option<LiveConditions>,
    archive: BTreeMap<DateTime<Utc>, ArchiveRecord>,
}

/// In-process store with the same upsert semantics as `DbStore`.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn archive_len(&self) -> usize {
        self.inner.read().await.archive.len()
    }
}

#[async_trait]
impl WeatherStore for MemoryStore {
    async fn upsert_live(&self, live: &LiveConditions) -> AppResult<()> {
        self.inner.write().await.live = Some(live.clone());
        Ok(())
    }

    async fn current_live(&self) -> AppResult<Option<LiveConditions>> {
        Ok(self.inner.read().await.live.clone())
    }

    async fn upsert_archive(&self, records: &[ArchiveRecord]) -> AppResult<u64> {
        let mut inner = self.inner.write().await;
        for record in records {
            inner.archive.insert(record.time, record.clone());
        }
        Ok(records.len() as u64)
    }

    async fn latest_archive_time(&self) -> AppResult<Option<DateTime<Utc>>> {
        Ok(self.inner.read().await.archive.keys().next_back().copied())
    }

    async fn archive_range(&self, query: &ArchiveQuery) -> AppResult<Vec<ArchiveRecord>> {
        let inner = self.inner.read().await;
        let limit = query
            .limit
            .and_then(|l| usize::try_from(l).ok())
            .unwrap_or(usize::MAX);

        Ok(inner
            .archive
            .values()
            .filter(|r| query.start.is_none_or(|start| r.time >= start))
            .filter(|r| query.end.is_none_or(|end| r.time <= end))
            .take(limit)
            .cloned()
            .collect())
    }
}
