use crate::adapters::{AltinnClient, OrgDirectoryClient, TermsStoreClient};
use crate::core::engine::ResolutionEngine;
use crate::utils::error::TermsError;
use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const API_KEY_HEADER: &str = "X-API-KEY";

pub type Engine = ResolutionEngine<AltinnClient, OrgDirectoryClient, TermsStoreClient>;

#[derive(Clone)]
pub struct AppState {
    engine: Arc<Engine>,
    api_key: Arc<String>,
}

impl AppState {
    pub fn new(engine: Engine, api_key: String) -> Self {
        Self {
            engine: Arc::new(engine),
            api_key: Arc::new(api_key),
        }
    }
}

/// Builds the HTTP surface. The three terms routes sit behind the API-key
/// layer; `/ping` stays open for liveness probes.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/terms/altinn/:person_id", get(terms_by_person))
        .route("/terms/difi", get(terms_by_org_numbers))
        .route("/terms/oslokommune", get(terms_by_org_names))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .route("/ping", get(ping))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Shared-secret check. Missing or wrong key is a 403 with no body; the
/// engine is never invoked.
async fn require_api_key(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(key) if key == state.api_key.as_str() => next.run(request).await,
        _ => StatusCode::FORBIDDEN.into_response(),
    }
}

async fn ping() -> &'static str {
    "pong"
}

/// Engine failures only surface here; the split is transient upstream
/// trouble (502) versus everything else (500), both with empty bodies.
struct GatewayError(TermsError);

impl From<TermsError> for GatewayError {
    fn from(e: TermsError) -> Self {
        GatewayError(e)
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "resolution failed");
        let status = if self.0.is_transient() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        status.into_response()
    }
}

#[derive(Debug, Deserialize)]
struct OrgNumbersQuery {
    orgs: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrgNamesQuery {
    orgnames: Option<String>,
}

fn split_csv(raw: Option<String>) -> Vec<String> {
    raw.map(|value| value.split(',').map(|part| part.to_string()).collect())
        .unwrap_or_default()
}

async fn terms_by_person(
    State(state): State<AppState>,
    Path(person_id): Path<String>,
) -> Result<String, GatewayError> {
    let result = state.engine.resolve_by_person(&person_id).await?;
    Ok(result.to_string())
}

async fn terms_by_org_numbers(
    State(state): State<AppState>,
    Query(query): Query<OrgNumbersQuery>,
) -> Result<String, GatewayError> {
    let numbers = split_csv(query.orgs);
    let result = state.engine.resolve_by_org_numbers(&numbers).await?;
    Ok(result.to_string())
}

async fn terms_by_org_names(
    State(state): State<AppState>,
    Query(query): Query<OrgNamesQuery>,
) -> Result<String, GatewayError> {
    let names = split_csv(query.orgnames);
    let result = state.engine.resolve_by_org_names(&names).await?;
    Ok(result.to_string())
}
