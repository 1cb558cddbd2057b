use super::*;
use axum::{body, body::Body, http::Request};
use tower::ServiceExt;

const FIXTURES: &str = r#"
[[college]]
id = "12345"
[college.reviews]
Placements = [["Great placements", "Average infra"], ["Good faculty"]]
"#;

fn test_app() -> Router {
    let fixtures = FixtureSet::parse(FIXTURES).expect("fixtures");
    build_router(Arc::new(AppState { fixtures }))
}

async fn post_scrape(app: Router, payload: serde_json::Value) -> (StatusCode, ScrapeResponse) {
    let request = Request::post(SCRAPE_PATH)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let decoded: ScrapeResponse = serde_json::from_slice(&bytes).expect("json");
    (status, decoded)
}

fn listing(page: &str, college_id: &str) -> String {
    format!("https://www.careers360.com/colleges/reviews?page={page}&college_id={college_id}")
}

#[tokio::test]
async fn healthz_reports_ok() {
    let request = Request::get("/healthz")
        .body(Body::empty())
        .expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn serves_fixture_pages_by_url_query() {
    let (status, page_one) = post_scrape(
        test_app(),
        serde_json::json!({ "url": listing("1", "12345"), "reviewType": "Placements" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        page_one.content,
        Some(vec!["Great placements".to_string(), "Average infra".to_string()])
    );

    let (_, page_two) = post_scrape(
        test_app(),
        serde_json::json!({ "url": listing("2", "12345"), "reviewType": "Placements" }),
    )
    .await;
    assert_eq!(page_two.content, Some(vec!["Good faculty".to_string()]));
}

#[tokio::test]
async fn past_last_page_returns_empty_content() {
    let (status, response) = post_scrape(
        test_app(),
        serde_json::json!({ "url": listing("3", "12345"), "reviewType": "Placements" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response.content, Some(Vec::new()));
}

#[tokio::test]
async fn unknown_college_is_not_found_with_error_body() {
    let (status, response) = post_scrape(
        test_app(),
        serde_json::json!({ "url": listing("1", "404"), "reviewType": "Academics" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response.error.as_deref(), Some("Unknown college 404"));
}

#[tokio::test]
async fn malformed_target_url_is_bad_request() {
    let (status, response) = post_scrape(
        test_app(),
        serde_json::json!({ "url": listing("zero", "12345"), "reviewType": "Academics" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.error.as_deref(),
        Some("Page must be a positive integer")
    );
}

#[test]
fn parse_target_requires_both_parameters() {
    assert_eq!(
        parse_target("https://example.test/reviews?page=2&college_id=9"),
        Ok((2, "9".to_string()))
    );
    assert_eq!(
        parse_target("https://example.test/reviews?page=2"),
        Err("Missing college_id parameter".to_string())
    );
    assert_eq!(
        parse_target("https://example.test/reviews?college_id=9"),
        Err("Missing page parameter".to_string())
    );
    assert!(parse_target("not a url").is_err());
}
