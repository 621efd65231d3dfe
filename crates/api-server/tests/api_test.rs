//! Integration tests for the REST API, exercising the full router with
//! an in-memory store behind it.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::Utc;
use leadflow_analytics::AnalyticsEngine;
use leadflow_api::{build_router, AppState};
use leadflow_core::types::{Budget, CampaignStatus, Channel, LeadStatus};
use leadflow_store::models::{CreateCampaignRequest, CreateLeadRequest};
use leadflow_store::MemoryStore;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower::util::ServiceExt; // for `oneshot`
use uuid::Uuid;

/// Build an app wired to a fresh empty store, returning both so tests
/// can stage records directly.
fn setup_app() -> (axum::Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let engine = Arc::new(AnalyticsEngine::new(store.clone(), Duration::from_secs(2)));
    let state = AppState {
        store: store.clone(),
        engine,
        start_time: Instant::now(),
    };
    (build_router(state), store)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("should read body");
    serde_json::from_slice(&bytes).expect("should parse JSON")
}

fn stage_lead(
    store: &MemoryStore,
    name: &str,
    email: &str,
    status: LeadStatus,
    source: Option<Channel>,
    score: u8,
    campaign_id: Option<Uuid>,
) -> Uuid {
    store
        .create_lead(CreateLeadRequest {
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
            company: None,
            source,
            status,
            score,
            campaign_id,
            tags: Vec::new(),
        })
        .expect("lead fixture should be valid")
        .id
}

fn stage_campaign(store: &MemoryStore, name: &str, budget: f64) -> Uuid {
    store
        .create_campaign(CreateCampaignRequest {
            name: name.to_string(),
            description: None,
            status: CampaignStatus::Active,
            start_date: Utc::now(),
            end_date: None,
            budget: Budget {
                amount: budget,
                currency: "USD".to_string(),
            },
            channels: vec![Channel::Email],
            tags: Vec::new(),
        })
        .expect("campaign fixture should be valid")
        .id
}

// ============================================================================
// Operational endpoints
// ============================================================================

#[tokio::test]
async fn test_health_and_liveness() {
    let (app, _store) = setup_app();

    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "healthy");

    let response = app.oneshot(get("/live")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_reflects_store_reachability() {
    let (app, _store) = setup_app();
    let response = app.oneshot(get("/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// Lead CRUD
// ============================================================================

#[tokio::test]
async fn test_lead_crud_flow() {
    let (app, _store) = setup_app();

    // Create
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/leads",
            json!({ "name": "Dana Whitfield", "email": "Dana@Acme.Example" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = extract_json(response.into_body()).await;
    assert_eq!(created["email"], "dana@acme.example");
    assert_eq!(created["status"], "new");
    let id = created["id"].as_str().unwrap().to_string();

    // Read
    let response = app
        .clone()
        .oneshot(get(&format!("/api/v1/leads/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Update
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/leads/{id}"),
            json!({ "status": "qualified", "score": 85 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = extract_json(response.into_body()).await;
    assert_eq!(updated["status"], "qualified");
    assert_eq!(updated["score"], 85);
    assert_eq!(updated["name"], "Dana Whitfield");

    // Delete, then the record is gone
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/leads/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(get(&format!("/api/v1/leads/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_lead_rejects_bad_email() {
    let (app, _store) = setup_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/leads",
            json!({ "name": "Dana", "email": "not-an-email" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "validation_failed");
    assert!(body["message"].as_str().unwrap().contains("'email'"));
}

#[tokio::test]
async fn test_list_leads_pagination_and_status_filter() {
    let (app, store) = setup_app();
    stage_lead(&store, "A", "a@x.example", LeadStatus::Qualified, None, 80, None);
    stage_lead(&store, "B", "b@x.example", LeadStatus::New, None, 20, None);
    stage_lead(&store, "C", "c@x.example", LeadStatus::New, None, 30, None);

    let response = app
        .clone()
        .oneshot(get("/api/v1/leads?per_page=2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["total"], 3);
    assert_eq!(body["meta"]["total_pages"], 2);
    assert_eq!(body["meta"]["has_next"], true);

    let response = app
        .oneshot(get("/api/v1/leads?status=qualified"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "A");
}

#[tokio::test]
async fn test_add_note_returns_updated_lead() {
    let (app, store) = setup_app();
    let id = stage_lead(&store, "Dana", "dana@x.example", LeadStatus::New, None, 10, None);

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/leads/{id}/notes"),
            json!({ "content": "Asked for a follow-up call" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    let notes = body["notes"].as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["content"], "Asked for a follow-up call");
}

#[tokio::test]
async fn test_invalid_uuid_in_path_is_client_error() {
    let (app, _store) = setup_app();
    let response = app.oneshot(get("/api/v1/leads/not-a-uuid")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Campaign CRUD and metrics
// ============================================================================

#[tokio::test]
async fn test_campaign_metrics_endpoint() {
    let (app, store) = setup_app();
    let campaign_id = stage_campaign(&store, "Spring Launch", 5000.0);
    stage_lead(
        &store,
        "Dana",
        "dana@x.example",
        LeadStatus::Converted,
        Some(Channel::Email),
        90,
        Some(campaign_id),
    );
    stage_lead(&store, "Eli", "eli@x.example", LeadStatus::New, None, 30, Some(campaign_id));

    let response = app
        .clone()
        .oneshot(get(&format!("/api/v1/campaigns/{campaign_id}/metrics")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total_leads"], 2);
    assert_eq!(body["conversion_rate"], 50.0);
    assert_eq!(body["leads_by_source"]["email"], 1);
    assert_eq!(body["leads_by_source"]["unspecified"], 1);

    let response = app
        .oneshot(get(&format!("/api/v1/campaigns/{}/metrics", Uuid::new_v4())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_campaign_detaches_its_leads() {
    let (app, store) = setup_app();
    let campaign_id = stage_campaign(&store, "Doomed", 100.0);
    let lead_id = stage_lead(
        &store,
        "Dana",
        "dana@x.example",
        LeadStatus::New,
        None,
        10,
        Some(campaign_id),
    );

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/campaigns/{campaign_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(get(&format!("/api/v1/leads/{lead_id}")))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert!(body["campaign_id"].is_null());
}

// ============================================================================
// Analytics endpoints
// ============================================================================

#[tokio::test]
async fn test_overview_endpoint_shapes_and_invariants() {
    let (app, store) = setup_app();
    let campaign_id = stage_campaign(&store, "Spring Launch", 1000.0);
    stage_lead(
        &store,
        "Dana",
        "dana@x.example",
        LeadStatus::Qualified,
        Some(Channel::Email),
        80,
        Some(campaign_id),
    );
    stage_lead(
        &store,
        "Eli",
        "eli@x.example",
        LeadStatus::New,
        Some(Channel::Email),
        40,
        None,
    );

    let response = app
        .clone()
        .oneshot(get("/api/v1/analytics/overview"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total_leads"], 2);
    assert_eq!(body["qualified_leads"], 1);
    assert_eq!(body["conversion_rate"], 50.0);
    assert_eq!(body["leads_by_source"]["email"], 2);

    let status_total: u64 = body["leads_by_status"]
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_u64().unwrap())
        .sum();
    assert_eq!(status_total, 2);

    let rows = body["campaign_performance"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["leads"], 1);
    assert_eq!(rows[0]["cpl"], 1000.0);

    // A window in the past excludes today's records.
    let response = app
        .clone()
        .oneshot(get(
            "/api/v1/analytics/overview?start_date=2000-01-01&end_date=2000-12-31",
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total_leads"], 0);
    assert_eq!(body["conversion_rate"], 0.0);

    // Malformed bound is the caller's fault.
    let response = app
        .oneshot(get("/api/v1/analytics/overview?start_date=tomorrow"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "invalid_query");
}

#[tokio::test]
async fn test_sources_endpoint_groups_unspecified() {
    let (app, store) = setup_app();
    stage_lead(&store, "A", "a@x.example", LeadStatus::Qualified, Some(Channel::Email), 80, None);
    stage_lead(&store, "B", "b@x.example", LeadStatus::New, None, 20, None);

    let response = app
        .oneshot(get("/api/v1/analytics/sources"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let rows = extract_json(response.into_body()).await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["source"], "email");
    assert_eq!(rows[0]["qualification_rate"], 100.0);
    assert_eq!(rows[1]["source"], "unspecified");
}

#[tokio::test]
async fn test_timeline_endpoint_periods() {
    let (app, store) = setup_app();
    stage_lead(&store, "A", "a@x.example", LeadStatus::New, None, 10, None);

    // Default period is month: keys look like YYYY-MM.
    let response = app
        .clone()
        .oneshot(get("/api/v1/analytics/timeline"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let buckets = extract_json(response.into_body()).await;
    let buckets = buckets.as_array().unwrap();
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0]["bucket_key"].as_str().unwrap().len(), 7);
    assert_eq!(buckets[0]["total_leads"], 1);

    let response = app
        .clone()
        .oneshot(get("/api/v1/analytics/timeline?period=day"))
        .await
        .unwrap();
    let buckets = extract_json(response.into_body()).await;
    assert_eq!(buckets[0]["bucket_key"].as_str().unwrap().len(), 10);

    let response = app
        .oneshot(get("/api/v1/analytics/timeline?period=quarter"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "invalid_query");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (app, _store) = setup_app();
    let response = app.oneshot(get("/api/v1/reports")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
