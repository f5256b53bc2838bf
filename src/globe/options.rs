use serde::{Deserialize, Serialize};

use crate::foundation::core::Size;
use crate::foundation::error::{GlobeError, GlobeResult};

/// Timing of the intro animation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IntroTimings {
    /// Collapsed scale the scene starts from. Non-zero to keep transforms
    /// invertible.
    pub epsilon: f64,
    /// Delay between readiness and the first tween step.
    pub settle_delay_ms: f64,
    /// Duration of the scale-in.
    pub scale_duration_ms: f64,
    /// Duration of the spin-down.
    pub rotation_duration_ms: f64,
}

impl Default for IntroTimings {
    fn default() -> Self {
        Self {
            epsilon: 1e-6,
            settle_delay_ms: 600.0,
            scale_duration_ms: 600.0,
            rotation_duration_ms: 1200.0,
        }
    }
}

impl IntroTimings {
    /// Reject timings that would produce a degenerate animation.
    pub fn validate(&self) -> GlobeResult<()> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0 && self.epsilon < 1.0) {
            return Err(GlobeError::configuration(
                "intro epsilon must be in the open interval (0, 1)",
            ));
        }
        for (name, ms) in [
            ("settleDelayMs", self.settle_delay_ms),
            ("scaleDurationMs", self.scale_duration_ms),
            ("rotationDurationMs", self.rotation_duration_ms),
        ] {
            if !ms.is_finite() || ms < 0.0 {
                return Err(GlobeError::configuration(format!(
                    "intro {name} must be a finite, non-negative duration (got {ms})"
                )));
            }
        }
        Ok(())
    }
}

/// Options accepted by [`crate::Globe::initialize`].
///
/// Every field has a default, so `{}` is a valid JSON document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlobeOptions {
    /// Hide the scene until the globe is ready, then play the intro.
    #[serde(alias = "animateIn")]
    pub start_with_intro_animation: bool,
    /// Intro timing overrides.
    pub intro: IntroTimings,
    /// Initial output resolution forwarded to resolution-dependent layers.
    pub renderer_size: Size,
}

impl Default for GlobeOptions {
    fn default() -> Self {
        Self {
            start_with_intro_animation: true,
            intro: IntroTimings::default(),
            renderer_size: Size::new(1280.0, 720.0),
        }
    }
}

impl GlobeOptions {
    /// Parse options from JSON and validate them.
    pub fn from_json_str(s: &str) -> GlobeResult<Self> {
        let options: Self = serde_json::from_str(s)?;
        options.validate()?;
        Ok(options)
    }

    /// Check option invariants.
    pub fn validate(&self) -> GlobeResult<()> {
        self.intro.validate()?;
        let Size { width, height } = self.renderer_size;
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(GlobeError::configuration(format!(
                "rendererSize must be finite and non-negative (got {width}x{height})"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/globe/options.rs"]
mod tests;
