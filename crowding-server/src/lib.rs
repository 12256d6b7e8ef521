//! Platform crowding estimation for the London Underground.
//!
//! Blends live TfL crowding data with historical route information to
//! estimate where along a platform passengers will gather, and renders
//! the estimate as a train-overlay graphic served by a small web app.

pub mod crowding;
pub mod domain;
pub mod history;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod stations;
pub mod tfl;
pub mod web;
