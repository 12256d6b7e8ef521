//! Image output: theme gradients and overlay compositing.

mod compositor;
mod gradient;

pub use compositor::{OverlayCompositor, RenderError, min_max_normalize, output_name};
pub use gradient::{InvalidColor, ThemeGradient};
