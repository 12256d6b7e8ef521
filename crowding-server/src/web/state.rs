//! Application state for the web layer.

use std::sync::Arc;

use crate::pipeline::RenderPipeline;
use crate::stations::StationDirectory;

/// Shared application state.
///
/// Contains everything the handlers need to serve requests.
#[derive(Clone)]
pub struct AppState {
    /// The resolve-fetch-model-render pipeline.
    pub pipeline: Arc<RenderPipeline>,

    /// Station directory, for the index page listing.
    pub directory: Arc<StationDirectory>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(pipeline: RenderPipeline, directory: Arc<StationDirectory>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            directory,
        }
    }
}
