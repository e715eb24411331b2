//! Weather proxy handler
//!
//! Forwards a request to the configured Weatherstack endpoint with the
//! server-side access key injected. The client's `endpoint` and
//! `access_key` parameters never reach the upstream; everything else is
//! forwarded verbatim, repeated names included. The upstream body passes
//! through untouched, so in-band Weatherstack envelopes stay intact for
//! the dashboard to interpret.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use secrecy::ExposeSecret;
use tracing::{debug, instrument};

use crate::{error::ApiError, state::AppState};

const DEFAULT_ENDPOINT: &str = "current";

/// GET `/api/weather/{endpoint}`
#[instrument(skip(state, params))]
pub async fn proxy_endpoint(
    State(state): State<AppState>,
    Path(endpoint): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    forward(&state, Some(endpoint), params).await
}

/// GET `/api/weather`
///
/// The endpoint may also arrive as an `endpoint` query parameter; absent
/// that, `current` is assumed.
#[instrument(skip(state, params))]
pub async fn proxy_default(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    forward(&state, None, params).await
}

async fn forward(
    state: &AppState,
    endpoint: Option<String>,
    params: Vec<(String, String)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let endpoint = endpoint
        .or_else(|| {
            params
                .iter()
                .find(|(k, _)| k == "endpoint")
                .map(|(_, v)| v.clone())
        })
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
        .to_lowercase();

    let Some(api_key) = state.upstream.api_key.as_ref() else {
        return Err(ApiError::MissingApiKey);
    };

    let mut pairs: Vec<(&str, &str)> = vec![("access_key", api_key.expose_secret())];
    pairs.extend(
        params
            .iter()
            .filter(|(k, _)| k != "endpoint" && k != "access_key")
            .map(|(k, v)| (k.as_str(), v.as_str())),
    );

    let url = format!(
        "{}/{endpoint}",
        state.upstream.base_url.trim_end_matches('/')
    );
    debug!(url = %url, "Forwarding weather request");

    let response = state
        .client
        .get(&url)
        .query(&pairs)
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    let body: serde_json::Value =
        serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));

    if status.is_success() {
        Ok(Json(body))
    } else {
        Err(ApiError::Upstream {
            status: status.as_u16(),
            details: body,
        })
    }
}
