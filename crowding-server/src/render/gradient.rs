//! White-to-theme-color gradient lookup table.

use palette::{LinSrgb, Mix, Srgb};

/// Number of discrete colors in the gradient.
const GRADIENT_STEPS: usize = 256;

/// Error for an unparsable theme color.
#[derive(Debug, thiserror::Error)]
#[error("invalid theme color {input}: {message}")]
pub struct InvalidColor {
    input: String,
    message: String,
}

/// Sequential gradient from white to a theme color.
///
/// Built once per compositor; sampling is a table lookup.
#[derive(Debug, Clone)]
pub struct ThemeGradient {
    colors: Vec<[u8; 3]>,
}

impl ThemeGradient {
    /// Build a gradient toward the given hex color (e.g. `#E32017`).
    pub fn from_hex(hex: &str) -> Result<Self, InvalidColor> {
        let theme: Srgb<u8> = hex.parse().map_err(|e: palette::rgb::FromHexError| {
            InvalidColor {
                input: hex.to_string(),
                message: e.to_string(),
            }
        })?;

        let theme: LinSrgb = theme.into_format::<f32>().into_linear();
        let white = LinSrgb::new(1.0, 1.0, 1.0);

        let colors = (0..GRADIENT_STEPS)
            .map(|i| {
                let t = i as f32 / (GRADIENT_STEPS - 1) as f32;
                let mixed = white.mix(theme, t);
                let srgb: Srgb<u8> = Srgb::from_linear(mixed);
                [srgb.red, srgb.green, srgb.blue]
            })
            .collect();

        Ok(Self { colors })
    }

    /// Sample the gradient at `t` in [0, 1] (clamped).
    pub fn sample(&self, t: f64) -> [u8; 3] {
        let t = t.clamp(0.0, 1.0);
        let idx = (t * (GRADIENT_STEPS - 1) as f64).round() as usize;
        self.colors[idx]
    }
}
