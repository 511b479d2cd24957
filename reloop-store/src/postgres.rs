//! PostgreSQL projection store
//!
//! Persists the `campaigns_current` read model. Uses dynamic queries
//! (sqlx::query) instead of compile-time checked macros (sqlx::query!)
//! to allow compilation without DATABASE_URL.
//!
//! Rows here are derived state. The event log stays authoritative, so
//! every write is an idempotent upsert keyed by campaign id.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::debug;

use reloop_domain::{
    CampaignId, CampaignProjection, CampaignStatus, DomainError, WeightKg,
};

use crate::error::StoreError;
use crate::repository::ProjectionRepository;

const SELECT_COLUMNS: &str = "SELECT campaign_id, reference_code, material, description, \
     status, current_step, current_weight_kg, next_expected_step, echa_cleared, \
     last_event_kind, last_event_at, created_at, updated_at, completed_at \
     FROM campaigns_current";

/// PostgreSQL implementation of the projection repository.
pub struct PgProjectionStore {
    pool: PgPool,
}

impl PgProjectionStore {
    /// Create a store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectionRepository for PgProjectionStore {
    async fn upsert(&self, projection: &CampaignProjection) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO campaigns_current (
                campaign_id, reference_code, material, description, status,
                current_step, current_weight_kg, next_expected_step, echa_cleared,
                last_event_kind, last_event_at, created_at, updated_at, completed_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (campaign_id) DO UPDATE SET
                reference_code = EXCLUDED.reference_code,
                material = EXCLUDED.material,
                description = EXCLUDED.description,
                status = EXCLUDED.status,
                current_step = EXCLUDED.current_step,
                current_weight_kg = EXCLUDED.current_weight_kg,
                next_expected_step = EXCLUDED.next_expected_step,
                echa_cleared = EXCLUDED.echa_cleared,
                last_event_kind = EXCLUDED.last_event_kind,
                last_event_at = EXCLUDED.last_event_at,
                created_at = EXCLUDED.created_at,
                updated_at = EXCLUDED.updated_at,
                completed_at = EXCLUDED.completed_at
            "#,
        )
        .bind(projection.campaign_id.to_string())
        .bind(&projection.reference_code)
        .bind(&projection.material)
        .bind(&projection.description)
        .bind(projection.status.as_str())
        .bind(&projection.current_step)
        .bind(projection.current_weight_kg.map(|w| w.as_decimal()))
        .bind(&projection.next_expected_step)
        .bind(projection.echa_cleared)
        .bind(&projection.last_event_kind)
        .bind(projection.last_event_at)
        .bind(projection.created_at)
        .bind(projection.updated_at)
        .bind(projection.completed_at)
        .execute(&self.pool)
        .await?;

        debug!(
            campaign_id = %projection.campaign_id,
            status = %projection.status,
            "Projection upserted"
        );

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &CampaignId,
    ) -> Result<Option<CampaignProjection>, StoreError> {
        let query = format!("{} WHERE campaign_id = $1", SELECT_COLUMNS);

        let row = sqlx::query_as::<_, CampaignRow>(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_by_reference(
        &self,
        reference_code: &str,
    ) -> Result<Option<CampaignProjection>, StoreError> {
        let query = format!(
            "{} WHERE reference_code = $1 ORDER BY created_at DESC, campaign_id DESC LIMIT 1",
            SELECT_COLUMNS
        );

        let row = sqlx::query_as::<_, CampaignRow>(&query)
            .bind(reference_code)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_by_status(
        &self,
        status: CampaignStatus,
    ) -> Result<Vec<CampaignProjection>, StoreError> {
        let query = format!(
            "{} WHERE status = $1 ORDER BY created_at DESC, campaign_id DESC",
            SELECT_COLUMNS
        );

        let rows = sqlx::query_as::<_, CampaignRow>(&query)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn list(&self) -> Result<Vec<CampaignProjection>, StoreError> {
        let query = format!(
            "{} ORDER BY created_at DESC, campaign_id DESC",
            SELECT_COLUMNS
        );

        let rows = sqlx::query_as::<_, CampaignRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}

/// Database row mapping
#[derive(sqlx::FromRow)]
struct CampaignRow {
    campaign_id: String,
    reference_code: String,
    material: String,
    description: Option<String>,
    status: String,
    current_step: String,
    current_weight_kg: Option<Decimal>,
    next_expected_step: Option<String>,
    echa_cleared: bool,
    last_event_kind: Option<String>,
    last_event_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl TryFrom<CampaignRow> for CampaignProjection {
    type Error = StoreError;

    fn try_from(row: CampaignRow) -> Result<CampaignProjection, StoreError> {
        let campaign_id: CampaignId = row.campaign_id.parse().map_err(|e: DomainError| {
            StoreError::Deserialization(format!("campaign_id: {}", e))
        })?;

        let status = CampaignStatus::parse(&row.status).ok_or_else(|| {
            StoreError::Deserialization(format!("unknown status: {}", row.status))
        })?;

        let current_weight_kg = row
            .current_weight_kg
            .map(WeightKg::new)
            .transpose()
            .map_err(|e| StoreError::Deserialization(format!("current_weight_kg: {}", e)))?;

        Ok(CampaignProjection {
            campaign_id,
            reference_code: row.reference_code,
            material: row.material,
            description: row.description,
            status,
            current_step: row.current_step,
            current_weight_kg,
            next_expected_step: row.next_expected_step,
            echa_cleared: row.echa_cleared,
            last_event_kind: row.last_event_kind,
            last_event_at: row.last_event_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
            completed_at: row.completed_at,
        })
    }
}
