//! Projection maintenance service
//!
//! Ties the event log to the projection store. Writes go through here:
//! append to the log first, then fold the event into the read model.
//! The log is authoritative; a missing projection row is rebuilt from
//! the stream rather than patched.

use std::sync::Arc;

use tracing::{debug, info};

use reloop_domain::{
    CampaignCreated, CampaignEvent, CampaignId, CampaignProjection, CorrectionDraft,
};
use reloop_eventlog::{Actor, EventLog, EventLogError, EventRecord};
use reloop_store::ProjectionRepository;

use crate::apply;
use crate::error::{ProjectionError, Result};
use crate::replay::replay_current_weight;

/// Event-sourced write and read service for campaigns.
///
/// Cheap to clone; clones share the log and the projection store.
#[derive(Clone)]
pub struct Projector {
    log: EventLog,
    projections: Arc<dyn ProjectionRepository>,
}

impl Projector {
    /// Create a projector over a log and a projection store.
    pub fn new(log: EventLog, projections: Arc<dyn ProjectionRepository>) -> Self {
        Self { log, projections }
    }

    /// The underlying event log.
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// The underlying projection store.
    pub fn projections(&self) -> &Arc<dyn ProjectionRepository> {
        &self.projections
    }

    /// Open a new campaign: mints the id, appends campaign_created and
    /// materializes the initial projection.
    pub async fn open_campaign(
        &self,
        details: CampaignCreated,
        actor: Actor,
    ) -> Result<CampaignProjection> {
        let campaign_id = CampaignId::new();
        self.record(
            &campaign_id,
            &CampaignEvent::CampaignCreated(details),
            actor,
        )
        .await?;

        match self.projections.find_by_id(&campaign_id).await? {
            Some(projection) => Ok(projection),
            // The row was just written; reaching here means the store
            // lost it between calls
            None => Err(ProjectionError::Store(reloop_store::StoreError::not_found(
                "campaign",
                campaign_id.to_string(),
            ))),
        }
    }

    /// Append a campaign event and fold it into the live projection.
    ///
    /// Correction events are routed through [`Projector::apply_correction`]
    /// so the target check always runs.
    ///
    /// # Errors
    /// Propagates log and store errors; `InvalidPayload` when a
    /// campaign_created payload does not match its schema.
    pub async fn record(
        &self,
        campaign_id: &CampaignId,
        event: &CampaignEvent,
        actor: Actor,
    ) -> Result<EventRecord> {
        if let CampaignEvent::CorrectionRecorded(payload) = event {
            let mut draft = CorrectionDraft::new(payload.corrects_event_id, &payload.reason);
            for (field, change) in &payload.changes {
                draft = draft.with_change(field, change.was.clone(), change.now.clone());
            }
            return self.apply_correction(campaign_id, draft, actor).await;
        }

        let record = self.log.append_event(campaign_id, event, actor).await?;

        match self.projections.find_by_id(campaign_id).await? {
            Some(mut projection) => {
                apply::apply_event(&mut projection, &record)?;
                self.projections.upsert(&projection).await?;
            }
            None => {
                self.rebuild(campaign_id).await?;
            }
        }

        Ok(record)
    }

    /// Record a non-destructive correction against an earlier event.
    ///
    /// The target must already be in the campaign's stream; nothing is
    /// appended otherwise. The target's kind is resolved from the stored
    /// record, never taken from the caller. A correction touching a
    /// weight field triggers a weight replay over the whole stream.
    ///
    /// # Errors
    /// `CorrectionTargetNotFound` when the target event is not in the
    /// stream; `InvalidPayload` when the reason is blank.
    pub async fn apply_correction(
        &self,
        campaign_id: &CampaignId,
        draft: CorrectionDraft,
        actor: Actor,
    ) -> Result<EventRecord> {
        if draft.reason.trim().is_empty() {
            return Err(ProjectionError::InvalidPayload {
                kind: "correction_recorded".to_string(),
                reason: "reason must not be blank".to_string(),
            });
        }

        let records = self.log.read_campaign(campaign_id).await?;
        let Some(target) = records
            .iter()
            .find(|r| r.event_id == draft.corrects_event_id)
        else {
            return Err(EventLogError::CorrectionTargetNotFound {
                stream_id: campaign_id.to_string(),
                event_id: draft.corrects_event_id,
            }
            .into());
        };

        let payload = draft.into_payload(&target.kind);
        let touches_weight = payload.touches_weight();
        let event = CampaignEvent::CorrectionRecorded(payload);
        let record = self.log.append_event(campaign_id, &event, actor).await?;

        match self.projections.find_by_id(campaign_id).await? {
            Some(mut projection) => {
                if touches_weight {
                    let records = self.log.read_campaign(campaign_id).await?;
                    projection.current_weight_kg = replay_current_weight(&records);
                }
                projection.updated_at = record.recorded_at;
                self.projections.upsert(&projection).await?;
            }
            None => {
                self.rebuild(campaign_id).await?;
            }
        }

        debug!(
            campaign_id = %campaign_id,
            corrects = %record.payload["corrects_event_id"],
            touches_weight,
            "Correction recorded"
        );

        Ok(record)
    }

    /// Current projection of a campaign, if it exists.
    pub async fn get(&self, campaign_id: &CampaignId) -> Result<Option<CampaignProjection>> {
        Ok(self.projections.find_by_id(campaign_id).await?)
    }

    /// Rebuild a campaign's projection from its full stream.
    ///
    /// Returns `None` (and stores nothing) for an unknown campaign.
    pub async fn rebuild(&self, campaign_id: &CampaignId) -> Result<Option<CampaignProjection>> {
        let records = self.log.read_campaign(campaign_id).await?;
        let Some(projection) = apply::project_stream(campaign_id, &records)? else {
            return Ok(None);
        };

        self.projections.upsert(&projection).await?;
        info!(
            campaign_id = %campaign_id,
            events = records.len(),
            "Projection rebuilt from stream"
        );

        Ok(Some(projection))
    }
}
