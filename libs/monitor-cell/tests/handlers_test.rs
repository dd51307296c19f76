use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use mockall::predicate::eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use monitor_cell::router::monitor_routes;
use shared_kuma::{KumaError, MockKumaApi};
use shared_utils::test_utils::{JwtTestUtils, MockKumaResponses, TestConfig, TestUser};

fn app(kuma: MockKumaApi) -> (Router, String) {
    let config = TestConfig::default();
    let router = monitor_routes(config.to_state(Arc::new(kuma)));
    (router, config.bearer())
}

fn request(method: &str, uri: &str, auth: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", auth)
        .header("content-type", "application/json");

    match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_requests_without_token_are_rejected() {
    let (router, _) = app(MockKumaApi::new());

    let response = router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let config = TestConfig::default();
    let router = monitor_routes(config.to_state(Arc::new(MockKumaApi::new())));
    let token = JwtTestUtils::create_expired_token(&TestUser::default(), &config.jwt_secret);

    let response = router
        .oneshot(request("GET", "/", &format!("Bearer {}", token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_monitors() {
    let mut kuma = MockKumaApi::new();
    kuma.expect_list_monitors().returning(|| {
        Ok(vec![
            MockKumaResponses::monitor(1, "http"),
            MockKumaResponses::monitor(2, "ping"),
        ])
    });
    let (router, auth) = app(kuma);

    let response = router.oneshot(request("GET", "/", &auth, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["monitors"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_invalid_monitor_never_reaches_engine() {
    let (router, auth) = app(MockKumaApi::new());

    let response = router
        .oneshot(request(
            "POST",
            "/",
            &auth,
            Some(json!({ "type": "http", "name": "web", "url": "https://example.com", "interval": 0 })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["fields"][0]["field"], "interval");
}

#[tokio::test]
async fn test_create_monitor_returns_normalized_entity() {
    let mut kuma = MockKumaApi::new();
    kuma.expect_add_monitor()
        .withf(|config| {
            config.get("url") == Some(&json!("https://example.com"))
                && config.get("maxredirects") == Some(&json!(10))
                && !config.contains_key("hostname")
        })
        .times(1)
        .returning(|_| Ok(MockKumaResponses::added("monitorID", 17)));
    let (router, auth) = app(kuma);

    let response = router
        .oneshot(request(
            "POST",
            "/",
            &auth,
            Some(json!({
                "type": "http",
                "name": "web",
                "url": "https://example.com",
                "hostname": "inert.example.com"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["monitorID"], 17);
    assert_eq!(body["monitor"]["type"], "http");
    assert_eq!(body["monitor"]["interval"], 60);
}

#[tokio::test]
async fn test_patch_echoes_supplied_fields_only() {
    let mut kuma = MockKumaApi::new();
    kuma.expect_edit_monitor()
        .withf(|id, changes| *id == 4 && Value::Object(changes.clone()) == json!({ "name": "new" }))
        .times(1)
        .returning(|_, _| Ok(MockKumaResponses::message("Saved.")));
    let (router, auth) = app(kuma);

    let response = router
        .oneshot(request("PATCH", "/4", &auth, Some(json!({ "name": "new" }))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["monitor"], json!({ "name": "new" }));
    assert_eq!(body["msg"], "Saved.");
}

#[tokio::test]
async fn test_patch_checked_against_stored_type() {
    let mut kuma = MockKumaApi::new();
    kuma.expect_get_monitor()
        .with(eq(9))
        .returning(|id| Ok(MockKumaResponses::monitor(id, "port")));
    let (router, auth) = app(kuma);

    let response = router
        .oneshot(request("PATCH", "/9", &auth, Some(json!({ "port": 0 }))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["fields"][0]["field"], "port");
}

#[tokio::test]
async fn test_type_change_requires_new_type_keys() {
    let mut kuma = MockKumaApi::new();
    kuma.expect_get_monitor()
        .with(eq(9))
        .returning(|id| Ok(MockKumaResponses::monitor(id, "http")));
    kuma.expect_edit_monitor().never();
    let (router, auth) = app(kuma);

    let response = router
        .oneshot(request("PATCH", "/9", &auth, Some(json!({ "type": "keyword" }))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["fields"], json!([{
        "field": "keyword",
        "message": "is required when changing the type to 'keyword'"
    }]));
}

#[tokio::test]
async fn test_type_change_uses_stored_keys() {
    let mut kuma = MockKumaApi::new();
    kuma.expect_get_monitor()
        .with(eq(9))
        .returning(|id| Ok(MockKumaResponses::monitor(id, "http")));
    kuma.expect_edit_monitor()
        .withf(|id, changes| *id == 9 && Value::Object(changes.clone()) == json!({ "type": "port" }))
        .returning(|_, _| Ok(MockKumaResponses::message("Saved.")));
    let (router, auth) = app(kuma);

    let response = router
        .oneshot(request("PATCH", "/9", &auth, Some(json!({ "type": "PORT" }))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["monitor"], json!({ "type": "port" }));
}

#[tokio::test]
async fn test_get_unknown_monitor_is_not_found() {
    let mut kuma = MockKumaApi::new();
    kuma.expect_get_monitor()
        .returning(|_| Err(KumaError::NotFound("Monitor not found".into())));
    let (router, auth) = app(kuma);

    let response = router.oneshot(request("GET", "/77", &auth, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["entity"], "monitor");
    assert_eq!(body["id"], "77");
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let mut kuma = MockKumaApi::new();
    kuma.expect_delete_monitor()
        .with(eq(12))
        .returning(|_| Err(KumaError::NotFound("Monitor not found".into())));
    let (router, auth) = app(kuma);

    let response = router.oneshot(request("DELETE", "/12", &auth, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["msg"], "Deleted Successfully.");
}

#[tokio::test]
async fn test_upstream_failure_detail_is_hidden() {
    let mut kuma = MockKumaApi::new();
    kuma.expect_pause_monitor()
        .returning(|_| Err(KumaError::Failure("SQLITE_BUSY: database is locked".into())));
    let (router, auth) = app(kuma);

    let response = router.oneshot(request("POST", "/3/pause", &auth, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert!(!body.to_string().contains("SQLITE"));
}

#[tokio::test]
async fn test_add_tag_defaults_value() {
    let mut kuma = MockKumaApi::new();
    kuma.expect_add_monitor_tag()
        .with(eq(3), eq(8), eq(String::new()))
        .times(1)
        .returning(|_, _, _| Ok(MockKumaResponses::message("Added Successfully.")));
    let (router, auth) = app(kuma);

    let response = router
        .oneshot(request("POST", "/3/tag", &auth, Some(json!({ "tag_id": 8 }))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cert_for_monitor_without_data_is_not_found() {
    let mut kuma = MockKumaApi::new();
    kuma.expect_cert_info()
        .returning(|| Ok([(1, MockKumaResponses::cert(30))].into_iter().collect()));
    let (router, auth) = app(kuma);

    let response = router.oneshot(request("GET", "/2/cert", &auth, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_route_reports_partial_failure() {
    let mut kuma = MockKumaApi::new();
    kuma.expect_get_monitor()
        .returning(|id| Ok(MockKumaResponses::monitor(id, "http")));
    kuma.expect_avg_response_times()
        .returning(|| Ok([(5, 42.0)].into_iter().collect()));
    kuma.expect_uptimes()
        .returning(|| Err(KumaError::Transport("timeout".into())));
    kuma.expect_get_monitor_beats()
        .with(eq(5), eq(6))
        .returning(|_, _| Ok(Vec::new()));
    kuma.expect_cert_info()
        .returning(|| Ok(Default::default()));
    let (router, auth) = app(kuma);

    let response = router
        .oneshot(request("GET", "/5/dashboard?heartbeat_hours=6", &auth, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["avgResponseTime"], 42.0);
    assert_eq!(body["uptimes"], json!({ "24": null, "720": null }));
    assert_eq!(body["failures"][0]["source"], "uptimes");
}

#[tokio::test]
async fn test_negative_hours_name_the_parameter() {
    let (router, auth) = app(MockKumaApi::new());

    let response = router
        .oneshot(request("GET", "/5/beats?hours=-1", &auth, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["fields"][0]["field"], "hours");
}

#[tokio::test]
async fn test_unparsable_query_is_invalid_input() {
    let (router, auth) = app(MockKumaApi::new());

    let response = router
        .oneshot(request("GET", "/5/dashboard?heartbeat_hours=soon", &auth, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["fields"][0]["field"], "query");
}

#[tokio::test]
async fn test_non_json_body_is_invalid_input() {
    let (router, auth) = app(MockKumaApi::new());

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("Authorization", &auth)
                .header("content-type", "application/json")
                .body(Body::from("type=http&name=web"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["fields"][0]["field"], "body");
    assert_eq!(body["fields"][0]["message"], "is not valid JSON");
}

#[tokio::test]
async fn test_non_numeric_id_is_invalid_input() {
    let (router, auth) = app(MockKumaApi::new());

    let response = router.oneshot(request("GET", "/web", &auth, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["fields"][0]["field"], "path");
}
