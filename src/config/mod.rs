pub mod settings;

use crate::color::Rgb;
use crate::error::CleanError;

/// Default background colour of the booklets this tool was written for.
pub const DEFAULT_BACKGROUND: &str = "#899093";

/// R, G and B must all exceed this for a pixel to count as white.
pub const DEFAULT_WHITE_THRESHOLD: u8 = 230;

/// Distance below which a pixel seeds the recolouring (near-exact match).
pub const DEFAULT_SEED_DISTANCE: f32 = 2.0;

/// Distance below which a pixel is made transparent after recolouring.
/// Wide enough to catch anti-aliasing halos around the background.
pub const DEFAULT_CLEAR_DISTANCE: f32 = 20.0;

/// Default rasterization resolution.
pub const DEFAULT_DPI: u32 = 300;

/// Parameters of the page cleaner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CleanConfig {
    pub background: Rgb,
    pub white_threshold: u8,
    pub seed_distance: f32,
    pub clear_distance: f32,
}

impl CleanConfig {
    /// Default thresholds for the given background.
    pub fn new(background: Rgb) -> Self {
        CleanConfig {
            background,
            white_threshold: DEFAULT_WHITE_THRESHOLD,
            seed_distance: DEFAULT_SEED_DISTANCE,
            clear_distance: DEFAULT_CLEAR_DISTANCE,
        }
    }

    /// Both distances must be finite and non-negative.
    pub fn validate(&self) -> crate::error::Result<()> {
        for (name, value) in [
            ("seed distance", self.seed_distance),
            ("clear distance", self.clear_distance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CleanError::invalid_argument(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Strict `distance < seed_distance`, compared on squared values.
    pub(crate) fn seed_limit_sq(&self) -> f32 {
        self.seed_distance * self.seed_distance
    }

    pub(crate) fn clear_limit_sq(&self) -> f32 {
        self.clear_distance * self.clear_distance
    }
}
