//! Web layer: axum routes, DTOs, templates and shared state.

mod dto;
mod routes;
mod state;
mod templates;

pub use dto::{CrowdingRequest, CrowdingResponse, ErrorResponse};
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::IndexTemplate;
