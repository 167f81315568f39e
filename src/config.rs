//! JSON configuration for a bouquet animation.
//!
//! Every field has a default, so `{}` is a complete configuration.

use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::{
        color::Rgba8,
        core::{Canvas, TimeMs},
        error::{BloomError, BloomResult},
    },
    scene::{
        bouquet::{Bouquet, DEFAULT_PALETTES, LayoutParams, RING_SIZE},
        rose::{BloomTiming, Palette, RoseStyle, SwayParams},
    },
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BloomConfig {
    pub canvas: Canvas,
    pub fps: u32,
    /// Length of a rendered sequence.
    pub duration_ms: TimeMs,
    /// Seeds stem curvature and sway phases.
    pub seed: u64,
    pub background: Rgba8,
    pub stem_color: Rgba8,
    pub leaf_color: Rgba8,
    /// Palette per ring position.
    pub palettes: [Palette; RING_SIZE],
    pub timing: BloomTiming,
    pub sway: SwayParams,
}

impl Default for BloomConfig {
    fn default() -> Self {
        let style = RoseStyle::default();
        Self {
            canvas: Canvas::default(),
            fps: 60,
            duration_ms: 6_000.0,
            seed: 1,
            background: Rgba8::rgb(0xff, 0xe6, 0xf0),
            stem_color: style.stem_color,
            leaf_color: style.leaf_color,
            palettes: DEFAULT_PALETTES,
            timing: style.timing,
            sway: style.sway,
        }
    }
}

impl BloomConfig {
    pub fn from_json_str(s: &str) -> BloomResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| BloomError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> BloomResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn to_json_pretty(&self) -> BloomResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| BloomError::serde(e.to_string()))
    }

    pub fn validate(&self) -> BloomResult<()> {
        self.canvas.validate()?;
        if self.fps == 0 {
            return Err(BloomError::validation("fps must be > 0"));
        }
        if !self.duration_ms.is_finite() || self.duration_ms < 0.0 {
            return Err(BloomError::validation(
                "duration_ms must be finite and non-negative",
            ));
        }
        let t = self.timing;
        if !(t.petal_delay_ms.is_finite() && t.petal_delay_ms > 0.0) {
            return Err(BloomError::validation("timing.petal_delay_ms must be > 0"));
        }
        if !(t.petal_duration_ms.is_finite() && t.petal_duration_ms > 0.0) {
            return Err(BloomError::validation(
                "timing.petal_duration_ms must be > 0",
            ));
        }
        let s = self.sway;
        if !(s.amplitude_px.is_finite() && s.amplitude_px >= 0.0) {
            return Err(BloomError::validation("sway.amplitude_px must be >= 0"));
        }
        if !(s.frequency_rad_per_ms.is_finite() && s.frequency_rad_per_ms >= 0.0) {
            return Err(BloomError::validation(
                "sway.frequency_rad_per_ms must be >= 0",
            ));
        }
        Ok(())
    }

    pub fn rose_style(&self) -> RoseStyle {
        RoseStyle {
            timing: self.timing,
            sway: self.sway,
            stem_color: self.stem_color,
            leaf_color: self.leaf_color,
        }
    }

    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            palettes: self.palettes,
            rose: self.rose_style(),
        }
    }

    /// Fresh bouquet for this configuration's canvas and seed.
    pub fn bouquet(&self) -> Bouquet {
        Bouquet::seeded(self.canvas, &self.layout_params(), self.seed)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
