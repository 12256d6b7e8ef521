//! Mixture-to-image compositing.
//!
//! Paints the mixture as vertical color bands across the overlay's pixel
//! extent, then alpha-composites the overlay asset (a train outline with
//! transparent windows) on top. Every call re-renders; the deterministic
//! file name exists for stable URLs, not for skip-if-present reuse.

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage, imageops};
use sha2::{Digest, Sha256};

use crate::domain::{Direction, StationId, TimeBucket};

use super::gradient::{InvalidColor, ThemeGradient};

/// Errors from the overlay compositor.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The overlay asset could not be read or decoded.
    #[error("failed to load overlay {path}: {message}")]
    Overlay { path: PathBuf, message: String },

    /// The theme color could not be parsed.
    #[error(transparent)]
    Color(#[from] InvalidColor),

    /// Writing the output image failed.
    #[error("failed to write image {path}: {message}")]
    Write { path: PathBuf, message: String },
}

/// Composites mixtures into output graphics.
pub struct OverlayCompositor {
    overlay: RgbaImage,
    gradient: ThemeGradient,
    out_dir: PathBuf,
}

impl OverlayCompositor {
    /// Create a compositor from an overlay asset, a theme color and an
    /// output directory.
    pub fn new(
        overlay_path: impl AsRef<Path>,
        theme_color: &str,
        out_dir: impl Into<PathBuf>,
    ) -> Result<Self, RenderError> {
        let overlay_path = overlay_path.as_ref();
        let overlay = image::open(overlay_path)
            .map_err(|e| RenderError::Overlay {
                path: overlay_path.to_path_buf(),
                message: e.to_string(),
            })?
            .into_rgba8();

        Ok(Self {
            overlay,
            gradient: ThemeGradient::from_hex(theme_color)?,
            out_dir: out_dir.into(),
        })
    }

    /// The output directory.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Render a mixture to an in-memory image.
    ///
    /// The canvas matches the overlay's dimensions; each spatial bin maps
    /// to a vertical band of uniform height colored by its min-max
    /// normalized density.
    pub fn render(&self, mixture: &[f64]) -> RgbaImage {
        let (width, height) = self.overlay.dimensions();
        let mut canvas = RgbaImage::new(width, height);

        let normalized = min_max_normalize(mixture);
        for x in 0..width {
            let bin = if normalized.is_empty() {
                None
            } else {
                let idx = (x as usize * normalized.len()) / width as usize;
                Some(idx.min(normalized.len() - 1))
            };
            let [r, g, b] = match bin {
                Some(idx) => self.gradient.sample(normalized[idx]),
                None => [255, 255, 255],
            };
            for y in 0..height {
                canvas.put_pixel(x, y, Rgba([r, g, b, 255]));
            }
        }

        imageops::overlay(&mut canvas, &self.overlay, 0, 0);
        canvas
    }

    /// Render a mixture and write it under its deterministic name.
    ///
    /// Returns the file name (not the full path).
    pub fn render_to_file(
        &self,
        mixture: &[f64],
        station: &StationId,
        direction: Direction,
        bucket: TimeBucket,
    ) -> Result<String, RenderError> {
        let name = output_name(station, direction, bucket);
        let path = self.out_dir.join(&name);

        if !self.out_dir.exists() {
            std::fs::create_dir_all(&self.out_dir).map_err(|e| RenderError::Write {
                path: self.out_dir.clone(),
                message: e.to_string(),
            })?;
        }

        let canvas = self.render(mixture);
        canvas.save(&path).map_err(|e| RenderError::Write {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(name)
    }
}

/// Min-max normalize to [0, 1]. A flat mixture normalizes to all zeros
/// (rendered as the gradient's white end).
pub fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    let Some(min) = values.iter().copied().reduce(f64::min) else {
        return Vec::new();
    };
    let max = values.iter().copied().fold(min, f64::max);

    if max > min {
        values.iter().map(|v| (v - min) / (max - min)).collect()
    } else {
        vec![0.0; values.len()]
    }
}

/// Deterministic output file name for a render key.
pub fn output_name(station: &StationId, direction: Direction, bucket: TimeBucket) -> String {
    let mut hasher = Sha256::new();
    hasher.update(station.as_str());
    hasher.update(direction.as_str());
    hasher.update(bucket.key());
    let digest = hasher.finalize();

    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    format!("{}.png", &hex[..32])
}
