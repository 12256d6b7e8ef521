//! Crowding model: line geometry and the truncated-normal mixture.

mod geometry;
mod mixture;

pub use geometry::{GeometryError, LineGeometry, line_color};
pub use mixture::{
    MixtureConfig, average_routes, bin_centers, normalize_weights, route_mixture,
    truncated_normal_row, weighted_mean,
};
