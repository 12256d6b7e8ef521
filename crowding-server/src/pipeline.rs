//! End-to-end render pipeline: resolve, fetch, model, composite.

use std::sync::Arc;

use chrono::NaiveTime;

use crate::crowding::CrowdingService;
use crate::domain::{Direction, TimeBucket};
use crate::history::{HistoryError, RouteHistoryStore, RouteRecord};
use crate::model::{
    LineGeometry, MixtureConfig, average_routes, bin_centers, normalize_weights, route_mixture,
};
use crate::render::{OverlayCompositor, RenderError};
use crate::stations::StationResolver;

/// Errors from a render request.
///
/// Live-data trouble never appears here; it degrades to neutral weights
/// inside the pipeline. What can fail a render is an unresolvable query
/// station, missing historical data, or the image write itself.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The query text matched no Tube station.
    #[error("no station matching {input:?}")]
    NoMatch { input: String },

    /// Historical data missing or unreadable.
    #[error(transparent)]
    History(#[from] HistoryError),

    /// Compositing or writing the output image failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result of a successful render.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    /// Canonical name of the resolved query station.
    pub station_name: String,
    /// Live crowding for the query station (1.0 when unavailable).
    pub crowding: f64,
    /// File name of the rendered graphic, relative to the static dir.
    pub image_file: String,
}

/// Wires the resolver, crowding service, history store, geometry and
/// compositor into the one public operation:
/// [`RenderPipeline::resolve_and_render`].
pub struct RenderPipeline {
    resolver: Arc<StationResolver>,
    crowding: Arc<CrowdingService>,
    history: RouteHistoryStore,
    geometry: Arc<LineGeometry>,
    compositor: OverlayCompositor,
    mixture: MixtureConfig,
}

impl RenderPipeline {
    /// Assemble a pipeline from its components.
    pub fn new(
        resolver: Arc<StationResolver>,
        crowding: Arc<CrowdingService>,
        history: RouteHistoryStore,
        geometry: Arc<LineGeometry>,
        compositor: OverlayCompositor,
        mixture: MixtureConfig,
    ) -> Self {
        Self {
            resolver,
            crowding,
            history,
            geometry,
            compositor,
            mixture,
        }
    }

    /// Resolve a free-text station, blend live and historical crowding,
    /// and render the overlay graphic.
    ///
    /// The full mixture and image are recomputed on every call, even for
    /// an unchanged key within the same time bucket; only the live
    /// samples are cached.
    pub async fn resolve_and_render(
        &self,
        station_text: &str,
        direction: Direction,
        now: NaiveTime,
    ) -> Result<RenderOutcome, PipelineError> {
        let resolved =
            self.resolver
                .resolve(station_text)
                .ok_or_else(|| PipelineError::NoMatch {
                    input: station_text.to_string(),
                })?;

        let crowding = self.crowding.get_or_fetch(&resolved.id).await.weight();

        let bucket = TimeBucket::from_time(now);
        let routes = self
            .history
            .routes_for(&resolved.name, direction, bucket)?;

        tracing::debug!(
            station = %resolved.name,
            %direction,
            bucket = %bucket,
            routes = routes.len(),
            "rendering crowding overlay"
        );

        let mixture = self.mixture_for_routes(&routes, direction).await;
        let image_file = self
            .compositor
            .render_to_file(&mixture, &resolved.id, direction, bucket)?;

        Ok(RenderOutcome {
            station_name: resolved.name,
            crowding,
            image_file,
        })
    }

    /// Build the averaged mixture for a set of routes.
    ///
    /// Per route: take the upstream sub-sequence, weight each station by
    /// its live crowding (neutral on any failure), normalize, and sum
    /// truncated-normal contributions. Stations without a known position
    /// on the line are dropped before normalization.
    async fn mixture_for_routes(&self, routes: &[RouteRecord], direction: Direction) -> Vec<f64> {
        let centers = bin_centers(self.mixture.bins);
        let mut per_route = Vec::with_capacity(routes.len());

        for route in routes {
            // Pivot bounds were checked by the history store.
            let Some(upstream) = route.upstream() else {
                continue;
            };

            let mut means = Vec::with_capacity(upstream.len());
            let mut raw_weights = Vec::with_capacity(upstream.len());

            for name in upstream {
                let Some(mean) = self.geometry.position(name, direction) else {
                    tracing::warn!(station = %name, "no line position; dropping from mixture");
                    continue;
                };
                let weight = self.crowding.weight_for_name(&self.resolver, name).await;
                means.push(mean);
                raw_weights.push(weight);
            }

            let weights = normalize_weights(&raw_weights);
            let components: Vec<(f64, f64)> = means.into_iter().zip(weights).collect();
            per_route.push(route_mixture(&centers, &components, self.mixture.std_dev));
        }

        average_routes(&per_route)
    }
}
