use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::ppg::PpgError;
/// Upper bound on the detrended window (10 minutes at 1 kHz).
const MAX_WINDOW_SAMPLES: usize = 600_000;
const MAX_PEAKS: usize = 1024;
/// Tunable parameters of the PPG estimator.
///
/// `ema_alpha` and `peak_threshold` were tuned by hand against webcam footage;
/// they are exposed here rather than baked in so they can be re-tuned per camera.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Actual sampling cadence in samples per second.
    pub frame_rate: f32,
    /// Length of the detrended window, in seconds.
    pub window_seconds: f32,
    pub ema_alpha: f32,
    pub peak_threshold: f32,
    /// Number of peak timestamps kept for interval statistics.
    pub max_peaks: usize,
    /// Physiological ceiling used to size the refractory period.
    pub refractory_ceiling_bpm: f32,
    pub min_bpm: f32,
    pub max_bpm: f32,
}
impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            frame_rate: 30.0,
            window_seconds: 5.0,
            ema_alpha: 0.1,
            peak_threshold: 0.2,
            max_peaks: 10,
            refractory_ceiling_bpm: 200.0,
            min_bpm: 40.0,
            max_bpm: 180.0,
        }
    }
}
impl EstimatorConfig {
    pub fn with_frame_rate(frame_rate: f32) -> Self {
        Self {
            frame_rate,
            ..Self::default()
        }
    }
    pub fn from_json_str(text: &str) -> Result<Self, PpgError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PpgError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
    pub fn validate(&self) -> Result<(), PpgError> {
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(PpgError::InvalidFrameRate(self.frame_rate));
        }
        if !self.ema_alpha.is_finite() || self.ema_alpha <= 0.0 || self.ema_alpha > 1.0 {
            return Err(PpgError::InvalidSmoothing(self.ema_alpha));
        }
        if !self.peak_threshold.is_finite() || self.peak_threshold < 0.0 {
            return Err(PpgError::InvalidThreshold(self.peak_threshold));
        }
        if !self.window_seconds.is_finite() || self.buffer_capacity() < 3 {
            return Err(PpgError::InvalidConfig(format!(
                "window of {} s holds fewer than 3 samples",
                self.window_seconds
            )));
        }
        if self.buffer_capacity() > MAX_WINDOW_SAMPLES {
            return Err(PpgError::InvalidConfig(format!(
                "window of {} s at {} fps exceeds {MAX_WINDOW_SAMPLES} samples",
                self.window_seconds, self.frame_rate
            )));
        }
        if !(2..=MAX_PEAKS).contains(&self.max_peaks) {
            return Err(PpgError::InvalidConfig(format!(
                "max_peaks must lie in [2, {MAX_PEAKS}], got {}",
                self.max_peaks
            )));
        }
        if !self.refractory_ceiling_bpm.is_finite() || self.refractory_ceiling_bpm <= 0.0 {
            return Err(PpgError::InvalidConfig(format!(
                "refractory ceiling must be positive, got {}",
                self.refractory_ceiling_bpm
            )));
        }
        if !(self.min_bpm > 0.0 && self.min_bpm < self.max_bpm && self.max_bpm.is_finite()) {
            return Err(PpgError::InvalidConfig(format!(
                "heart-rate range [{}, {}] is empty or non-positive",
                self.min_bpm, self.max_bpm
            )));
        }
        Ok(())
    }
    /// Capacity of the detrended window: `frame_rate * window_seconds`.
    pub fn buffer_capacity(&self) -> usize {
        (self.frame_rate * self.window_seconds).ceil().max(0.0) as usize
    }
    /// Minimum number of samples between two confirmed peaks.
    pub fn refractory_samples(&self) -> f32 {
        (60.0 / self.refractory_ceiling_bpm) * self.frame_rate
    }
}
