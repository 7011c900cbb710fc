use serde::{Deserialize, Serialize};
/// One heart-rate reading handed to the display / transport layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Beats per minute.
    #[serde(rename = "hr")]
    pub heart_rate: f32,
    /// Interval regularity in `[0, 1]`; 1 means perfectly even beats.
    pub quality: f32,
}
/// Mean and population standard deviation of inter-peak intervals (ms).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntervalStats {
    pub mean_ms: f64,
    pub std_dev_ms: f64,
    pub count: usize,
}
impl IntervalStats {
    /// `max(0, 1 - std / mean)`; zero when the mean is not positive.
    pub fn regularity(&self) -> f64 {
        if self.mean_ms <= 0.0 {
            return 0.0;
        }
        (1.0 - self.std_dev_ms / self.mean_ms).max(0.0)
    }
}
pub fn interval_stats(intervals: &[f64]) -> Option<IntervalStats> {
    if intervals.is_empty() {
        return None;
    }
    let n = intervals.len() as f64;
    let mean = intervals.iter().sum::<f64>() / n;
    let variance = intervals
        .iter()
        .map(|v| {
            let delta = v - mean;
            delta * delta
        })
        .sum::<f64>()
        / n;
    Some(IntervalStats {
        mean_ms: mean,
        std_dev_ms: variance.sqrt(),
        count: intervals.len(),
    })
}
/// Turns a run of peak timestamps into a gated heart-rate estimate.
#[derive(Clone, Copy, Debug)]
pub struct RateCalculator {
    min_bpm: f32,
    max_bpm: f32,
}
impl RateCalculator {
    pub fn new(min_bpm: f32, max_bpm: f32) -> Self {
        Self { min_bpm, max_bpm }
    }
    pub fn compute<'a, I>(&self, timestamps_ms: I) -> Option<Estimate>
    where
        I: IntoIterator<Item = &'a f64>,
    {
        let stamps: Vec<f64> = timestamps_ms.into_iter().copied().collect();
        if stamps.len() < 2 {
            return None;
        }
        let intervals: Vec<f64> = stamps.windows(2).map(|w| w[1] - w[0]).collect();
        let stats = interval_stats(&intervals)?;
        if stats.mean_ms == 0.0 {
            return None;
        }
        let heart_rate = 60_000.0 / stats.mean_ms;
        if heart_rate < self.min_bpm as f64 || heart_rate > self.max_bpm as f64 {
            log::trace!(
                "suppressing {heart_rate:.1} BPM outside [{}, {}]",
                self.min_bpm,
                self.max_bpm
            );
            return None;
        }
        Some(Estimate {
            heart_rate: heart_rate as f32,
            quality: stats.regularity() as f32,
        })
    }
}
