pub mod search;

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::state::AppState;

/// Build the HTTP router with CORS restricted to the configured origins.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allow_origin(&state.config.allowed_origins))
        .allow_methods([Method::GET]);

    Router::new()
        .route("/api/projects", get(search::search_projects))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

/// `*` allows any origin; anything else is an exact-match allow list.
fn allow_origin(configured: &[String]) -> AllowOrigin {
    if configured.iter().any(|o| o == "*") {
        return AllowOrigin::any();
    }

    let origins: Vec<HeaderValue> = configured
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin {o:?}: {e}");
                None
            }
        })
        .collect();
    AllowOrigin::list(origins)
}

async fn health() -> &'static str {
    "ok"
}
