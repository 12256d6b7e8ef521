//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};
use chrono::Local;
use tower_http::services::ServeDir;

use crate::domain::Direction;
use crate::history::HistoryError;
use crate::pipeline::PipelineError;

use super::dto::*;
use super::state::AppState;
use super::templates::IndexTemplate;

/// Create the application router.
///
/// `static_dir` is the directory rendered graphics are served from; it
/// must be the pipeline's output directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/crowding", get(crowding))
        .route("/healthz", get(health))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the station picker.
async fn index_page(State(state): State<AppState>) -> impl IntoResponse {
    let template = IndexTemplate {
        stations: state.directory.names(),
    };
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Estimate platform crowding and render the graphic.
async fn crowding(
    State(state): State<AppState>,
    Query(req): Query<CrowdingRequest>,
) -> Result<Json<CrowdingResponse>, AppError> {
    let direction = Direction::parse(&req.direction).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let now = Local::now().time();
    let outcome = state
        .pipeline
        .resolve_and_render(&req.station, direction, now)
        .await?;

    Ok(Json(CrowdingResponse {
        crowding: format_crowding(outcome.crowding),
        image_url: format!("/static/{}", outcome.image_file),
    }))
}

/// Render a crowding value the way the frontend expects: a plain decimal
/// with no trailing zeros (`1`, `0.42`).
fn format_crowding(value: f64) -> String {
    let mut s = format!("{value}");
    if s.ends_with(".0") {
        s.truncate(s.len() - 2);
    }
    s
}

/// Application-level error type for handlers.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::NoMatch { input } => AppError::NotFound {
                message: format!("no station matching {input:?}"),
            },
            PipelineError::History(err @ HistoryError::DataUnavailable { .. }) => {
                AppError::NotFound {
                    message: err.to_string(),
                }
            }
            other => AppError::Internal {
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        tracing::warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crowding_values_format_without_trailing_zero() {
        assert_eq!(format_crowding(1.0), "1");
        assert_eq!(format_crowding(0.42), "0.42");
        assert_eq!(format_crowding(2.5), "2.5");
    }

    #[test]
    fn no_match_maps_to_not_found() {
        let err = AppError::from(PipelineError::NoMatch {
            input: "Narnia".to_string(),
        });
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[test]
    fn data_unavailable_maps_to_not_found() {
        let bucket =
            crate::domain::TimeBucket::from_time(chrono::NaiveTime::from_hms_opt(9, 35, 0).unwrap());
        let err = AppError::from(PipelineError::History(HistoryError::DataUnavailable {
            station: "South Kensington Underground Station".to_string(),
            direction: Direction::Westbound,
            bucket,
        }));
        match err {
            AppError::NotFound { message } => assert!(message.contains("no historical data")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
