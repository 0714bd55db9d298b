//! End-to-end scenarios driven through the public service facade and HTTP router,
//! backed by the on-disk JSON-lines store.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use genai_maturity::assessment::{
    assessment_router, summarize, AssessmentService, AssessmentSubmission, JsonLinesStore,
    MaturityLevel, RecordStore,
};
use tower::ServiceExt;

fn answers(values: [i64; 4]) -> BTreeMap<String, i64> {
    ["q1", "q2", "q3", "q4"]
        .into_iter()
        .zip(values)
        .map(|(id, value)| (id.to_string(), value))
        .collect()
}

#[test]
fn submissions_persist_across_store_handles() {
    let dir = tempfile::tempdir().expect("tempdir");

    let first_id = {
        let service = AssessmentService::new(Arc::new(JsonLinesStore::open(dir.path())));
        let receipt = service
            .submit(
                AssessmentSubmission {
                    responses: answers([2, 3, 1, 4]),
                    email: Some("head-of-ml@example.com".to_string()),
                },
                Some("Mozilla/5.0".to_string()),
            )
            .expect("first submission");
        assert_eq!(receipt.result.maturity_level, MaturityLevel::Established);
        receipt.id
    };

    let store = Arc::new(JsonLinesStore::open(dir.path()));
    let service = AssessmentService::new(store.clone());
    service
        .submit(
            AssessmentSubmission {
                responses: answers([1, 1, 1, 2]),
                email: None,
            },
            None,
        )
        .expect("second submission");

    let listing = service.list_submissions().expect("listing");
    assert_eq!(listing.assessments.len(), 2);
    assert!(listing.assessments.iter().any(|record| record.id == first_id));
    assert_eq!(listing.summary, summarize(&store.list_assessments().expect("list")));
    assert_eq!(listing.summary.emails_collected, 1);
    assert_eq!(listing.summary.maturity_breakdown.get("Nascent"), Some(&1));
    assert!((listing.summary.average_score - (2.5 + 1.25) / 2.0).abs() < 1e-12);

    let emails = service.list_email_log().expect("email log");
    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0].to, "head-of-ml@example.com");
}

#[tokio::test]
async fn http_round_trip_against_disk_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = Arc::new(AssessmentService::new(Arc::new(JsonLinesStore::open(
        dir.path(),
    ))));
    let router = assessment_router(service);

    let body = serde_json::json!({ "responses": { "q1": 3, "q2": 3, "q3": 3, "q4": 3 } });
    let response = router
        .clone()
        .oneshot(
            Request::post("/api/v1/assessments")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).expect("json")))
                .expect("request"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let response = router
        .oneshot(
            Request::get("/api/v1/assessments/export")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let csv = String::from_utf8(bytes.to_vec()).expect("utf-8");
    let row = csv.lines().nth(1).expect("data row");
    assert!(row.contains(r#""3.00","Advanced","3","3","3","3""#));
}
