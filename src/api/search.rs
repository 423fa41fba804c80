use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::SearchError;
use crate::models::{ErrorBody, FetchMode, SearchParams, SearchResponse};
use crate::search::aggregate;
use crate::search::window::pagination;
use crate::state::AppState;

/// GET /api/projects - Search GitHub repositories ranked by stars.
///
/// Query parameters: `q` (free text), `tags` (comma list, wins over `q`),
/// `page` (1..=10, default 1) and `all` (`true`/`1` merges the first five
/// pages instead of returning one).
///
/// Single-page responses also carry a `pagination` block with the clamped
/// page and the page buttons to render.
pub async fn search_projects(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, SearchError> {
    let req = params.into_request();
    let result = aggregate::search(state.source.as_ref(), &req).await?;
    let nav = match req.mode {
        FetchMode::SinglePage { page } => Some(pagination(page, result.total_count)),
        FetchMode::All => None,
    };
    Ok(Json(SearchResponse {
        result,
        pagination: nav,
    }))
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!("Search failed: {self}");
        } else {
            tracing::warn!("Search failed: {self}");
        }

        let body = ErrorBody {
            error: self.to_string(),
            details: self.details(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rate_limited_response_shape() {
        let resp = SearchError::RateLimited {
            status: 403,
            message: "API rate limit exceeded".to_string(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert!(body.error.contains("403"));
        assert!(body.details.as_str().unwrap().contains("GITHUB_TOKEN"));
    }

    #[tokio::test]
    async fn test_transport_response_is_500() {
        let resp = SearchError::Transport("timed out".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_invalid_upstream_status_falls_back_to_500() {
        let resp = SearchError::Upstream {
            status: 42,
            details: serde_json::Value::Null,
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
