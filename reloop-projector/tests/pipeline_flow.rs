//! End-to-end pipeline tests over the in-memory stores.
//!
//! Each test drives the projector the way operators would: append
//! events through the write path, then assert on the read model.

use reloop_domain::{CampaignCreated, CampaignStatus, MaterialCode, ReferenceCode, WeightKg};
use reloop_eventlog::{Actor, NewEvent};
use reloop_testkit::{
    completion_event, created_event, echa_event, extrusion_event, granulation_event,
    inbound_event, manufacturing_completed_event, manufacturing_started_event,
    metal_removal_event, purification_event, return_event, test_actor, transfer_event,
    TestPipeline,
};
use serde_json::json;

fn kg(value: &str) -> WeightKg {
    WeightKg::new(value.parse().unwrap()).unwrap()
}

#[tokio::test]
async fn test_open_campaign_materializes_projection() {
    let pipeline = TestPipeline::new();

    let projection = pipeline
        .projector
        .open_campaign(
            CampaignCreated {
                reference_code: ReferenceCode::new("LEGO-2024-001").unwrap(),
                material: MaterialCode::new("rABS").unwrap(),
                description: Some("pilot batch".to_string()),
            },
            test_actor(),
        )
        .await
        .unwrap();

    assert_eq!(projection.reference_code, "LEGO-2024-001");
    assert_eq!(projection.material, "RABS");
    assert_eq!(projection.status, CampaignStatus::Created);
    assert_eq!(projection.current_step, "Campaign created");
    assert_eq!(
        projection.next_expected_step.as_deref(),
        Some("Inbound shipment")
    );
    assert!(projection.current_weight_kg.is_none());
    assert!(!projection.echa_cleared);

    // Exactly one event exists: the creation
    let stream = pipeline
        .projector
        .log()
        .read_campaign(&projection.campaign_id)
        .await
        .unwrap();
    assert_eq!(stream.len(), 1);
    assert_eq!(stream[0].kind, "campaign_created");
}

#[tokio::test]
async fn test_full_pipeline_reaches_completion() {
    let pipeline = TestPipeline::new();
    let projection = pipeline
        .projector
        .open_campaign(
            CampaignCreated {
                reference_code: ReferenceCode::new("LEGO-2024-002").unwrap(),
                material: MaterialCode::new("rABS").unwrap(),
                description: None,
            },
            test_actor(),
        )
        .await
        .unwrap();
    let id = projection.campaign_id;

    let events = [
        inbound_event("100"),
        granulation_event("95.5"),
        metal_removal_event("94"),
        purification_event("92.3"),
        extrusion_event("91"),
        echa_event(),
        transfer_event(Some("90.8")),
        manufacturing_started_event(),
        manufacturing_completed_event(Some(250_000)),
        return_event(),
        completion_event(),
    ];
    for event in &events {
        pipeline
            .projector
            .record(&id, event, test_actor())
            .await
            .unwrap();
    }

    let projection = pipeline.projection(&id).await;
    assert_eq!(projection.status, CampaignStatus::Completed);
    assert!(projection.is_completed());
    assert!(projection.echa_cleared);
    assert_eq!(projection.current_weight_kg, Some(kg("90.8")));
    assert_eq!(projection.current_step, "Campaign closed");
    assert!(projection.next_expected_step.is_none());
    assert!(projection.completed_at.is_some());
    assert_eq!(pipeline.event_store.event_count(), 12);
}

#[tokio::test]
async fn test_projection_weight_follows_each_step() {
    let pipeline = TestPipeline::new();
    let projection = pipeline
        .projector
        .open_campaign(
            CampaignCreated {
                reference_code: ReferenceCode::new("LEGO-2024-003").unwrap(),
                material: MaterialCode::new("rPC").unwrap(),
                description: None,
            },
            test_actor(),
        )
        .await
        .unwrap();
    let id = projection.campaign_id;

    pipeline
        .projector
        .record(&id, &inbound_event("100"), test_actor())
        .await
        .unwrap();
    assert_eq!(
        pipeline.projection(&id).await.current_weight_kg,
        Some(kg("100"))
    );

    pipeline
        .projector
        .record(&id, &granulation_event("95.5"), test_actor())
        .await
        .unwrap();
    let projection = pipeline.projection(&id).await;
    assert_eq!(projection.current_weight_kg, Some(kg("95.5")));
    assert_eq!(projection.status, CampaignStatus::GranulationComplete);
    assert_eq!(projection.next_expected_step.as_deref(), Some("Metal removal"));
}

#[tokio::test]
async fn test_transfer_without_reweigh_keeps_weight() {
    let pipeline = TestPipeline::new();
    let projection = pipeline
        .projector
        .open_campaign(
            CampaignCreated {
                reference_code: ReferenceCode::new("LEGO-2024-004").unwrap(),
                material: MaterialCode::new("rABS").unwrap(),
                description: None,
            },
            test_actor(),
        )
        .await
        .unwrap();
    let id = projection.campaign_id;

    for event in [
        inbound_event("100"),
        granulation_event("95"),
        metal_removal_event("94"),
        purification_event("93"),
        extrusion_event("91"),
        echa_event(),
        transfer_event(None),
    ] {
        pipeline
            .projector
            .record(&id, &event, test_actor())
            .await
            .unwrap();
    }

    let projection = pipeline.projection(&id).await;
    assert_eq!(projection.status, CampaignStatus::TransferredToRge);
    // No receiving weighbridge value, extrusion output still stands
    assert_eq!(projection.current_weight_kg, Some(kg("91")));
}

#[tokio::test]
async fn test_out_of_order_event_still_applies() {
    let pipeline = TestPipeline::new();
    let projection = pipeline
        .projector
        .open_campaign(
            CampaignCreated {
                reference_code: ReferenceCode::new("LEGO-2024-005").unwrap(),
                material: MaterialCode::new("rABS").unwrap(),
                description: None,
            },
            test_actor(),
        )
        .await
        .unwrap();
    let id = projection.campaign_id;

    // Extrusion with three steps missing: logged, but applied
    pipeline
        .projector
        .record(&id, &extrusion_event("90"), test_actor())
        .await
        .unwrap();

    let projection = pipeline.projection(&id).await;
    assert_eq!(projection.status, CampaignStatus::ExtrusionComplete);
    assert_eq!(projection.current_weight_kg, Some(kg("90")));
}

#[tokio::test]
async fn test_unknown_event_kind_is_skipped() {
    let pipeline = TestPipeline::new();
    let projection = pipeline
        .projector
        .open_campaign(
            CampaignCreated {
                reference_code: ReferenceCode::new("LEGO-2024-006").unwrap(),
                material: MaterialCode::new("rABS").unwrap(),
                description: None,
            },
            test_actor(),
        )
        .await
        .unwrap();
    let id = projection.campaign_id;

    pipeline
        .projector
        .record(&id, &inbound_event("100"), test_actor())
        .await
        .unwrap();

    // A future vocabulary entry lands in the same stream
    pipeline
        .log
        .append(NewEvent::new(
            "campaign",
            id.to_string(),
            "pallet_shrink_wrapped",
            json!({"wrap": "double"}),
            Actor::system("importer-v9"),
        ))
        .await
        .unwrap();

    let rebuilt = pipeline.projector.rebuild(&id).await.unwrap().unwrap();
    assert_eq!(rebuilt.status, CampaignStatus::InboundShipmentRecorded);
    assert_eq!(rebuilt.current_weight_kg, Some(kg("100")));
    assert_eq!(
        rebuilt.last_event_kind.as_deref(),
        Some("inbound_shipment_recorded")
    );
}

#[tokio::test]
async fn test_rebuild_matches_incremental_projection_exactly() {
    let pipeline = TestPipeline::new();
    let projection = pipeline
        .projector
        .open_campaign(
            CampaignCreated {
                reference_code: ReferenceCode::new("LEGO-2024-007").unwrap(),
                material: MaterialCode::new("rABS").unwrap(),
                description: Some("determinism check".to_string()),
            },
            test_actor(),
        )
        .await
        .unwrap();
    let id = projection.campaign_id;

    for event in [
        inbound_event("100"),
        granulation_event("95.5"),
        metal_removal_event("94"),
        echa_event(),
    ] {
        pipeline
            .projector
            .record(&id, &event, test_actor())
            .await
            .unwrap();
    }

    let incremental = pipeline.projection(&id).await;
    let rebuilt = pipeline.projector.rebuild(&id).await.unwrap().unwrap();

    // Field-for-field identical, timestamps included
    assert_eq!(incremental, rebuilt);
}

#[tokio::test]
async fn test_rebuild_is_idempotent() {
    let pipeline = TestPipeline::new();
    let projection = pipeline
        .projector
        .open_campaign(
            CampaignCreated {
                reference_code: ReferenceCode::new("LEGO-2024-008").unwrap(),
                material: MaterialCode::new("rABS").unwrap(),
                description: None,
            },
            test_actor(),
        )
        .await
        .unwrap();
    let id = projection.campaign_id;

    pipeline
        .projector
        .record(&id, &inbound_event("100"), test_actor())
        .await
        .unwrap();

    let first = pipeline.projector.rebuild(&id).await.unwrap().unwrap();
    let second = pipeline.projector.rebuild(&id).await.unwrap().unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_rebuild_unknown_campaign_returns_none() {
    let pipeline = TestPipeline::new();
    let rebuilt = pipeline
        .projector
        .rebuild(&reloop_domain::CampaignId::new())
        .await
        .unwrap();
    assert!(rebuilt.is_none());
    assert_eq!(pipeline.projection_store.campaign_count(), 0);
}

#[tokio::test]
async fn test_record_rebuilds_when_projection_row_is_lost() {
    let pipeline = TestPipeline::new();
    let projection = pipeline
        .projector
        .open_campaign(
            CampaignCreated {
                reference_code: ReferenceCode::new("LEGO-2024-009").unwrap(),
                material: MaterialCode::new("rABS").unwrap(),
                description: None,
            },
            test_actor(),
        )
        .await
        .unwrap();
    let id = projection.campaign_id;

    pipeline
        .projector
        .record(&id, &inbound_event("100"), test_actor())
        .await
        .unwrap();

    // Simulate a wiped read model
    pipeline.projection_store.clear();

    pipeline
        .projector
        .record(&id, &granulation_event("95"), test_actor())
        .await
        .unwrap();

    let projection = pipeline.projection(&id).await;
    assert_eq!(projection.status, CampaignStatus::GranulationComplete);
    assert_eq!(projection.reference_code, "LEGO-2024-009");
    assert_eq!(projection.current_weight_kg, Some(kg("95")));
}

#[tokio::test]
async fn test_events_after_completion_warn_but_apply() {
    let pipeline = TestPipeline::new();
    let projection = pipeline
        .projector
        .open_campaign(
            CampaignCreated {
                reference_code: ReferenceCode::new("LEGO-2024-010").unwrap(),
                material: MaterialCode::new("rABS").unwrap(),
                description: None,
            },
            test_actor(),
        )
        .await
        .unwrap();
    let id = projection.campaign_id;

    for event in [inbound_event("100"), completion_event()] {
        pipeline
            .projector
            .record(&id, &event, test_actor())
            .await
            .unwrap();
    }
    assert!(pipeline.projection(&id).await.is_completed());

    // A late shipment event after closeout; the log keeps the truth
    pipeline
        .projector
        .record(&id, &granulation_event("95"), test_actor())
        .await
        .unwrap();

    let projection = pipeline.projection(&id).await;
    assert_eq!(projection.status, CampaignStatus::GranulationComplete);
    assert_eq!(projection.current_weight_kg, Some(kg("95")));
}
