//! Same-origin relay in front of the arXiv query API.
//!
//! A front end that cannot call arXiv directly asks the relay instead:
//!
//! ```text
//! GET /info?topic=lattices
//!
//! 200 OK                                  500 Internal Server Error
//! Content-Type: application/xml           { "error": "Error fetching data from arXiv API" }
//! <feed ...>...</feed>
//! ```
//!
//! The body is arXiv's feed, untouched; parsing stays on the client side.

use axum::{
  extract::{Query, State},
  http::{header, StatusCode},
  response::{IntoResponse, Response},
  routing::get,
  Json, Router,
};
use tokio::net::TcpListener;

use super::*;
use crate::clients::SearchEndpoint;

/// Error message returned when the upstream query fails.
pub const RELAY_ERROR: &str = "Error fetching data from arXiv API";

/// Shared state for relay handlers.
#[derive(Debug, Clone)]
pub struct RelayState {
  /// Client for the upstream arXiv API
  upstream: SearchClient,
}

impl RelayState {
  /// Relay to the arXiv endpoint configured in `[search]`, regardless of the search mode.
  pub fn from_config(config: &Config) -> Self {
    Self::new(SearchClient::new(SearchEndpoint::Direct {
      url:         config.search.arxiv_url.clone(),
      max_results: config.search.max_results,
    }))
  }

  /// Relay through the given client.
  pub fn new(upstream: SearchClient) -> Self { Self { upstream } }
}

/// Query parameters of `GET /info`.
#[derive(Debug, Deserialize)]
struct InfoParams {
  /// Search topic; missing means empty
  topic: Option<String>,
}

/// Builds the relay's router.
pub fn router(state: RelayState) -> Router { Router::new().route("/info", get(info)).with_state(state) }

/// Handler for `GET /info`.
async fn info(State(state): State<RelayState>, Query(params): Query<InfoParams>) -> Response {
  let topic = params.topic.unwrap_or_default();
  debug!("Relaying search for {topic:?}");

  match state.upstream.search(&topic).await {
    Ok(body) => ([(header::CONTENT_TYPE, "application/xml")], body).into_response(),
    Err(e) => {
      error!("Error fetching from arXiv: {e}");
      (StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!({ "error": RELAY_ERROR })))
        .into_response()
    },
  }
}

/// Serves the relay on an already-bound listener until the task is cancelled.
pub async fn serve(listener: TcpListener, state: RelayState) -> Result<(), PaperchatError> {
  debug!("Relay listening on {}", listener.local_addr()?);
  axum::serve(listener, router(state)).await?;
  Ok(())
}

/// Binds `[relay] host:port` and serves the relay.
pub async fn run(config: &Config) -> Result<(), PaperchatError> {
  let addr = format!("{}:{}", config.relay.host, config.relay.port);
  let listener = TcpListener::bind(&addr).await?;
  serve(listener, RelayState::from_config(config)).await
}
