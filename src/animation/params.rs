use std::time::Duration;

use crate::foundation::error::{AutographError, AutographResult};

/// Delays and step counts of the reveal, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationTiming {
    /// Pause before each character starts fading in.
    pub char_delay_ms: u64,
    /// Opacity steps per character (`0/n .. (n-1)/n`); `0` runs as `1`.
    pub fade_steps: u32,
    /// Hold after each opacity step.
    pub fade_step_delay_ms: u64,
    /// Pause between the last character and the flourish.
    pub flourish_pause_ms: u64,
    /// Flourish intervals; `flourish_steps + 1` segments are drawn.
    pub flourish_steps: u32,
    /// Hold after each flourish segment.
    pub flourish_step_delay_ms: u64,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            char_delay_ms: 80,
            fade_steps: 8,
            fade_step_delay_ms: 8,
            flourish_pause_ms: 200,
            flourish_steps: 20,
            flourish_step_delay_ms: 8,
        }
    }
}

impl AnimationTiming {
    pub fn validate(&self) -> AutographResult<()> {
        if self.fade_steps == 0 {
            return Err(AutographError::validation("timing fade_steps must be > 0"));
        }
        Ok(())
    }

    /// Opacity steps actually drawn per character; at least one.
    pub fn fade_step_count(&self) -> u32 {
        self.fade_steps.max(1)
    }

    pub fn char_delay(&self) -> Duration {
        Duration::from_millis(self.char_delay_ms)
    }

    pub fn fade_step_delay(&self) -> Duration {
        Duration::from_millis(self.fade_step_delay_ms)
    }

    pub fn flourish_pause(&self) -> Duration {
        Duration::from_millis(self.flourish_pause_ms)
    }

    pub fn flourish_step_delay(&self) -> Duration {
        Duration::from_millis(self.flourish_step_delay_ms)
    }

    /// Total suspension time for `chars` characters.
    ///
    /// `n*80 + n*8*8 + 200 + 21*8` with the defaults.
    pub fn total_duration(&self, chars: usize) -> Duration {
        let n = chars as u64;
        let per_char =
            self.char_delay_ms + u64::from(self.fade_step_count()) * self.fade_step_delay_ms;
        let flourish = (u64::from(self.flourish_steps) + 1) * self.flourish_step_delay_ms;
        Duration::from_millis(n * per_char + self.flourish_pause_ms + flourish)
    }
}

/// Look of the underline flourish.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FlourishStyle {
    /// Extra length past each end of the measured text.
    pub overhang: f64,
    /// Distance below the baseline center.
    pub drop: f64,
    pub alpha: f32,
    pub line_width: f64,
}

impl Default for FlourishStyle {
    fn default() -> Self {
        Self {
            overhang: 10.0,
            drop: 40.0,
            alpha: 0.6,
            line_width: 2.0,
        }
    }
}

impl FlourishStyle {
    pub fn validate(&self) -> AutographResult<()> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(AutographError::validation("flourish alpha must be in [0, 1]"));
        }
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(AutographError::validation(
                "flourish line_width must be finite and > 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/params.rs"]
mod tests;
