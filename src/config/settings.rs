use crate::color::hex_to_rgb;
use crate::error::CleanError;

use super::{
    CleanConfig, DEFAULT_BACKGROUND, DEFAULT_CLEAR_DISTANCE, DEFAULT_DPI, DEFAULT_SEED_DISTANCE,
    DEFAULT_WHITE_THRESHOLD,
};

/// Run-level settings, as collected from the command line.
#[derive(Debug, Clone)]
pub struct Settings {
    pub dpi: u32,
    pub background: String,
    pub parallel_workers: usize,
    pub white_threshold: u8,
    pub seed_distance: f32,
    pub clear_distance: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            dpi: DEFAULT_DPI,
            background: DEFAULT_BACKGROUND.to_string(),
            parallel_workers: 0,
            white_threshold: DEFAULT_WHITE_THRESHOLD,
            seed_distance: DEFAULT_SEED_DISTANCE,
            clear_distance: DEFAULT_CLEAR_DISTANCE,
        }
    }
}

impl Settings {
    /// Parse the background colour and build a validated [`CleanConfig`].
    pub fn clean_config(&self) -> crate::error::Result<CleanConfig> {
        let config = CleanConfig {
            background: hex_to_rgb(&self.background)?,
            white_threshold: self.white_threshold,
            seed_distance: self.seed_distance,
            clear_distance: self.clear_distance,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate_dpi(&self) -> crate::error::Result<u32> {
        if self.dpi == 0 {
            return Err(CleanError::invalid_argument("DPI must be a positive integer"));
        }
        Ok(self.dpi)
    }
}
