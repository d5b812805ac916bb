use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use httpmock::prelude::*;
use std::time::Duration;
use terms_resolver::{
    AltinnClient, AppState, OrgDirectoryClient, ResolutionEngine, TermsStoreClient,
};
use tower::ServiceExt;

const API_KEY: &str = "test-key";

/// All three upstreams share one mock server; their paths never collide.
fn app(upstream: &MockServer) -> Router {
    let timeout = Duration::from_secs(2);
    let roles = AltinnClient::new(upstream.base_url(), timeout).unwrap();
    let names = OrgDirectoryClient::new(upstream.base_url(), timeout).unwrap();
    let store = TermsStoreClient::new(upstream.base_url(), timeout, 0).unwrap();

    let engine = ResolutionEngine::new(roles, names, store);
    terms_resolver::router(AppState::new(engine, API_KEY.to_string()))
}

async fn get_with_key(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(uri)
                .header("X-API-KEY", API_KEY)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn mock_acceptances(server: &MockServer, org: &str, versions: &[&str]) {
    let records: Vec<serde_json::Value> = versions
        .iter()
        .map(|v| serde_json::json!({"orgId": org, "acceptedVersion": v}))
        .collect();
    server.mock(|when, then| {
        when.method(GET).path(format!("/acceptances/{}", org));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::Value::Array(records));
    });
}

fn mock_no_acceptances(server: &MockServer, org: &str) {
    server.mock(|when, then| {
        when.method(GET).path(format!("/acceptances/{}", org));
        then.status(404);
    });
}

fn mock_org_name(server: &MockServer, name: &str, org: &str) {
    server.mock(|when, then| {
        when.method(GET)
            .path("/organizations")
            .query_param("name", name);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"name": name, "organizationNumber": org}));
    });
}

#[tokio::test]
async fn checks_all_given_org_numbers_in_order() {
    let upstream = MockServer::start();
    mock_no_acceptances(&upstream, "123456789");
    mock_acceptances(&upstream, "910258028", &["1.0.0"]);
    mock_acceptances(&upstream, "920210023", &["1.0.0", "1.2.3"]);

    let (status, body) = get_with_key(
        app(&upstream),
        "/terms/difi?orgs=123456789,910258028,920210023",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "123456789:0.0.0,910258028:1.0.0,920210023:1.2.3");
}

#[tokio::test]
async fn responds_with_version_zero_when_no_acceptance_found() {
    let upstream = MockServer::start();
    mock_no_acceptances(&upstream, "123456789");

    let (status, body) = get_with_key(app(&upstream), "/terms/difi?orgs=123456789").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "123456789:0.0.0");
}

#[tokio::test]
async fn invalid_org_numbers_are_dropped_silently() {
    let upstream = MockServer::start();
    mock_acceptances(&upstream, "910258028", &["1.0.0"]);

    let (status, body) = get_with_key(
        app(&upstream),
        "/terms/difi?orgs=garbage,910258028,12345",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "910258028:1.0.0");
}

#[tokio::test]
async fn missing_orgs_query_yields_empty_body() {
    let upstream = MockServer::start();

    let (status, body) = get_with_key(app(&upstream), "/terms/difi").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "");
}

#[tokio::test]
async fn checks_all_orgs_altinn_has_associated_with_the_person() {
    let upstream = MockServer::start();
    upstream.mock(|when, then| {
        when.method(GET)
            .path("/api/serviceowner/reportees")
            .query_param("subject", "11223344556");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"name": "ORG A", "organizationNumber": "910258028"},
                {"name": "ORG B", "organizationNumber": "123456789"}
            ]));
    });
    mock_acceptances(&upstream, "910258028", &["1.0.0"]);
    mock_no_acceptances(&upstream, "123456789");

    let (status, body) = get_with_key(app(&upstream), "/terms/altinn/11223344556").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "910258028:1.0.0,123456789:0.0.0");
}

#[tokio::test]
async fn ok_with_empty_body_when_person_not_found() {
    let upstream = MockServer::start();
    upstream.mock(|when, then| {
        when.method(GET)
            .path("/api/serviceowner/reportees")
            .query_param("subject", "12345678901");
        then.status(404);
    });

    let (status, body) = get_with_key(app(&upstream), "/terms/altinn/12345678901").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "");
}

#[tokio::test]
async fn checks_all_given_org_names() {
    let upstream = MockServer::start();
    mock_org_name(&upstream, "Drift", "971183675");
    mock_org_name(&upstream, "Oslo Havn KF", "987592567");
    mock_org_name(&upstream, "Renovasjons- og gjenvinningsetaten", "923954791");
    mock_no_acceptances(&upstream, "971183675");
    mock_acceptances(&upstream, "987592567", &["1.0.1"]);
    mock_acceptances(&upstream, "923954791", &["12.16.11"]);

    let (status, body) = get_with_key(
        app(&upstream),
        "/terms/oslokommune?orgnames=Drift,Oslo%20Havn%20KF,Renovasjons-%20og%20gjenvinningsetaten",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "971183675:0.0.0,987592567:1.0.1,923954791:12.16.11");
}

#[tokio::test]
async fn unresolved_org_names_are_dropped() {
    let upstream = MockServer::start();
    mock_org_name(&upstream, "Drift", "971183675");
    upstream.mock(|when, then| {
        when.method(GET)
            .path("/organizations")
            .query_param("name", "No Such Org");
        then.status(404);
    });
    mock_no_acceptances(&upstream, "971183675");

    let (status, body) = get_with_key(
        app(&upstream),
        "/terms/oslokommune?orgnames=Drift,No%20Such%20Org",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "971183675:0.0.0");
}

#[tokio::test]
async fn acceptance_store_outage_fails_the_whole_request() {
    let upstream = MockServer::start();
    mock_acceptances(&upstream, "910258028", &["1.0.0"]);
    upstream.mock(|when, then| {
        when.method(GET).path("/acceptances/123456789");
        then.status(503);
    });

    let (status, body) = get_with_key(
        app(&upstream),
        "/terms/difi?orgs=910258028,123456789",
    )
    .await;

    // all-or-nothing: no partial list when any lookup failed
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, "");
}
