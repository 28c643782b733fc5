//! Rain effect tuning.
//!
//! Defaults reproduce the stock effect: 16px glyphs, a 300-frame run whose
//! last 60 frames fade out, and a half-second CSS fade before the canvas is
//! removed.

use thiserror::Error;

pub const DEFAULT_GLYPH_SIZE: f64 = 16.0;
pub const DEFAULT_MAX_FRAMES: u32 = 300; // ~5s at 60fps
pub const DEFAULT_FADE_FRAMES: u32 = 60;
pub const DEFAULT_RESET_PROBABILITY: f64 = 0.025;
pub const DEFAULT_GLYPHS: &str = "01010101010101010101";
pub const DEFAULT_TRAIL_COLOR: &str = "rgba(15, 23, 42, 0.05)";
pub const DEFAULT_ACCENT_RGB: [u8; 3] = [99, 102, 241];
pub const DEFAULT_TEARDOWN_MS: u32 = 500;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("glyph_size must be positive, got {0}")]
    GlyphSize(f64),
    #[error("fade_frames ({fade}) exceeds max_frames ({max})")]
    FadeLongerThanRun { fade: u32, max: u32 },
    #[error("glyph set is empty")]
    NoGlyphs,
    #[error("reset_probability must lie in [0, 1], got {0}")]
    ResetProbability(f64),
    #[error("invalid rain config JSON: {0}")]
    Parse(String),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RainConfig {
    /// Cell size in CSS pixels; also the font size.
    pub glyph_size: f64,
    pub max_frames: u32,
    pub fade_frames: u32,
    /// Per-frame chance that a column past the bottom edge restarts at the top.
    pub reset_probability: f64,
    pub glyphs: String,
    pub trail_color: String,
    pub accent_rgb: [u8; 3],
    pub teardown_ms: u32,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            glyph_size: DEFAULT_GLYPH_SIZE,
            max_frames: DEFAULT_MAX_FRAMES,
            fade_frames: DEFAULT_FADE_FRAMES,
            reset_probability: DEFAULT_RESET_PROBABILITY,
            glyphs: DEFAULT_GLYPHS.to_string(),
            trail_color: DEFAULT_TRAIL_COLOR.to_string(),
            accent_rgb: DEFAULT_ACCENT_RGB,
            teardown_ms: DEFAULT_TEARDOWN_MS,
        }
    }
}

impl RainConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.glyph_size.is_nan() || self.glyph_size <= 0.0 {
            return Err(ConfigError::GlyphSize(self.glyph_size));
        }
        if self.fade_frames > self.max_frames {
            return Err(ConfigError::FadeLongerThanRun {
                fade: self.fade_frames,
                max: self.max_frames,
            });
        }
        if self.glyphs.is_empty() {
            return Err(ConfigError::NoGlyphs);
        }
        if !(0.0..=1.0).contains(&self.reset_probability) {
            return Err(ConfigError::ResetProbability(self.reset_probability));
        }
        Ok(())
    }

    /// Parse and validate a JSON object; missing fields keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Accent colour as a CSS `rgba()` at the given opacity.
    pub fn accent_rgba(&self, opacity: f64) -> String {
        let [r, g, b] = self.accent_rgb;
        format!("rgba({}, {}, {}, {})", r, g, b, opacity.clamp(0.0, 1.0))
    }

    pub fn font(&self) -> String {
        format!("{}px monospace", self.glyph_size)
    }

    /// CSS transition used while the finished canvas fades out.
    pub fn teardown_transition(&self) -> String {
        format!("opacity {}s ease-out", self.teardown_ms as f64 / 1000.0)
    }
}
