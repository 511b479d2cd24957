//! PostgreSQL event store
//!
//! Append-only: only INSERT and SELECT ever touch `campaign_events`.
//! Uses dynamic queries (sqlx::query) instead of compile-time checked
//! macros (sqlx::query!) to allow compilation without DATABASE_URL.
//!
//! `event_id` is stored as a fixed-width 26-character ULID, so text
//! ordering on the column matches id ordering.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use reloop_domain::{EventId, EventKind};

use crate::store::EventStore;
use crate::types::{Actor, ActorType, CorrectionQuery, EventLogError, EventRecord, Result};

const SELECT_COLUMNS: &str = "SELECT event_id, stream_type, stream_id, kind, payload, \
     actor_type, actor_id, occurred_at, recorded_at FROM campaign_events";

/// PostgreSQL implementation of the event store.
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    /// Create a store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn insert(&self, record: EventRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO campaign_events (
                event_id, stream_type, stream_id, kind, payload,
                actor_type, actor_id, occurred_at, recorded_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(record.event_id.to_string())
        .bind(&record.stream_type)
        .bind(&record.stream_id)
        .bind(&record.kind)
        .bind(&record.payload)
        .bind(record.actor.actor_type.as_str())
        .bind(&record.actor.actor_id)
        .bind(record.occurred_at)
        .bind(record.recorded_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn fetch_stream(&self, stream_type: &str, stream_id: &str) -> Result<Vec<EventRecord>> {
        let query = format!(
            "{} WHERE stream_type = $1 AND stream_id = $2 \
             ORDER BY recorded_at ASC, event_id ASC",
            SELECT_COLUMNS
        );

        let rows = sqlx::query_as::<_, EventRecordRow>(&query)
            .bind(stream_type)
            .bind(stream_id)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn fetch_by_kind(&self, kind: &str) -> Result<Vec<EventRecord>> {
        let query = format!(
            "{} WHERE kind = $1 ORDER BY recorded_at DESC, event_id DESC",
            SELECT_COLUMNS
        );

        let rows = sqlx::query_as::<_, EventRecordRow>(&query)
            .bind(kind)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn fetch_latest(
        &self,
        stream_type: &str,
        stream_id: &str,
    ) -> Result<Option<EventRecord>> {
        let query = format!(
            "{} WHERE stream_type = $1 AND stream_id = $2 \
             ORDER BY recorded_at DESC, event_id DESC LIMIT 1",
            SELECT_COLUMNS
        );

        let row = sqlx::query_as::<_, EventRecordRow>(&query)
            .bind(stream_type)
            .bind(stream_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn fetch_corrections(
        &self,
        query: &CorrectionQuery,
    ) -> Result<(Vec<EventRecord>, u64)> {
        let mut where_clause = String::from("WHERE kind = $1");
        let mut bind_count = 1;

        // Build dynamic filter based on the query
        if query.stream_id.is_some() {
            bind_count += 1;
            where_clause.push_str(&format!(" AND stream_id = ${}", bind_count));
        }

        if query.corrected_kind.is_some() {
            bind_count += 1;
            where_clause.push_str(&format!(
                " AND payload->>'corrects_event_kind' = ${}",
                bind_count
            ));
        }

        if query.recorded_from.is_some() {
            bind_count += 1;
            where_clause.push_str(&format!(" AND recorded_at >= ${}", bind_count));
        }

        if query.recorded_until.is_some() {
            bind_count += 1;
            where_clause.push_str(&format!(" AND recorded_at < ${}", bind_count));
        }

        let correction_kind = EventKind::CorrectionRecorded.as_str();

        // Total before paging
        let count_sql = format!("SELECT COUNT(*) FROM campaign_events {}", where_clause);
        let mut count_query =
            sqlx::query_scalar::<_, i64>(&count_sql).bind(correction_kind);
        if let Some(ref stream_id) = query.stream_id {
            count_query = count_query.bind(stream_id);
        }
        if let Some(ref corrected_kind) = query.corrected_kind {
            count_query = count_query.bind(corrected_kind);
        }
        if let Some(recorded_from) = query.recorded_from {
            count_query = count_query.bind(recorded_from);
        }
        if let Some(recorded_until) = query.recorded_until {
            count_query = count_query.bind(recorded_until);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        // Page, newest first
        let page_sql = format!(
            "{} {} ORDER BY recorded_at DESC, event_id DESC OFFSET ${} LIMIT ${}",
            SELECT_COLUMNS,
            where_clause,
            bind_count + 1,
            bind_count + 2
        );
        let mut page_query =
            sqlx::query_as::<_, EventRecordRow>(&page_sql).bind(correction_kind);
        if let Some(ref stream_id) = query.stream_id {
            page_query = page_query.bind(stream_id);
        }
        if let Some(ref corrected_kind) = query.corrected_kind {
            page_query = page_query.bind(corrected_kind);
        }
        if let Some(recorded_from) = query.recorded_from {
            page_query = page_query.bind(recorded_from);
        }
        if let Some(recorded_until) = query.recorded_until {
            page_query = page_query.bind(recorded_until);
        }
        let rows = page_query
            .bind(query.offset as i64)
            .bind(query.limit as i64)
            .fetch_all(&self.pool)
            .await?;

        let page = rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>>>()?;
        Ok((page, total as u64))
    }
}

/// Database row mapping
#[derive(sqlx::FromRow)]
struct EventRecordRow {
    event_id: String,
    stream_type: String,
    stream_id: String,
    kind: String,
    payload: serde_json::Value,
    actor_type: String,
    actor_id: String,
    occurred_at: DateTime<Utc>,
    recorded_at: DateTime<Utc>,
}

impl TryFrom<EventRecordRow> for EventRecord {
    type Error = EventLogError;

    fn try_from(row: EventRecordRow) -> Result<EventRecord> {
        let event_id: EventId = row
            .event_id
            .parse()
            .map_err(|e| EventLogError::InvalidRecord(format!("event_id: {}", e)))?;

        let actor_type = ActorType::parse(&row.actor_type).ok_or_else(|| {
            EventLogError::InvalidRecord(format!("unknown actor_type: {}", row.actor_type))
        })?;

        Ok(EventRecord {
            event_id,
            stream_type: row.stream_type,
            stream_id: row.stream_id,
            kind: row.kind,
            payload: row.payload,
            actor: Actor {
                actor_type,
                actor_id: row.actor_id,
            },
            occurred_at: row.occurred_at,
            recorded_at: row.recorded_at,
        })
    }
}
