use crate::ppg::baseline::BaselineTracker;
use crate::ppg::buffer::{SlidingWindow, TraceFrame};
use crate::ppg::clock::{Clock, SystemClock};
use crate::ppg::config::EstimatorConfig;
use crate::ppg::peak::PeakDetector;
use crate::ppg::rate::{Estimate, RateCalculator};
use crate::ppg::PpgError;
/// Streaming heart-rate estimator for a single brightness channel.
///
/// Every call to [`PpgEstimator::ingest`] runs the whole causal pipeline for one
/// sample: baseline update, detrended window push, refractory gate, peak test and,
/// on a confirmed peak, the rate/quality calculation.
pub struct PpgEstimator<C: Clock = SystemClock> {
    config: EstimatorConfig,
    baseline: BaselineTracker,
    detector: PeakDetector,
    peaks: SlidingWindow<f64>,
    rate: RateCalculator,
    clock: C,
    last_sample_ms: Option<f64>,
}
impl PpgEstimator<SystemClock> {
    pub fn new(config: EstimatorConfig) -> Result<Self, PpgError> {
        Self::with_clock(config, SystemClock)
    }
}
impl<C: Clock> PpgEstimator<C> {
    pub fn with_clock(config: EstimatorConfig, clock: C) -> Result<Self, PpgError> {
        config.validate()?;
        Ok(Self {
            baseline: BaselineTracker::new(config.ema_alpha),
            detector: PeakDetector::new(
                config.buffer_capacity(),
                config.peak_threshold,
                config.refractory_samples(),
            ),
            peaks: SlidingWindow::new(config.max_peaks),
            rate: RateCalculator::new(config.min_bpm, config.max_bpm),
            config,
            clock,
            last_sample_ms: None,
        })
    }
    /// Feed one sample stamped by the estimator's clock.
    pub fn ingest(&mut self, sample: f32) -> Result<Option<Estimate>, PpgError> {
        check_sample(sample)?;
        let now = self.clock.now_ms();
        Ok(self.step(sample, now))
    }
    /// Feed one sample with an externally supplied timestamp; the clock is not read.
    pub fn ingest_at(&mut self, sample: f32, timestamp_ms: f64) -> Result<Option<Estimate>, PpgError> {
        check_sample(sample)?;
        Ok(self.step(sample, timestamp_ms))
    }
    fn step(&mut self, sample: f32, now_ms: f64) -> Option<Estimate> {
        self.last_sample_ms = Some(now_ms);
        let detrended = self.baseline.update(sample);
        if !self.detector.push(detrended) {
            return None;
        }
        self.peaks.push(now_ms);
        log::debug!("peak confirmed at {now_ms:.0} ms ({} in window)", self.peaks.len());
        let estimate = self.rate.compute(self.peaks.iter());
        if let Some(e) = &estimate {
            log::debug!("estimate {:.1} BPM, quality {:.2}", e.heart_rate, e.quality);
        }
        estimate
    }
    /// Recompute the estimate from the peaks recorded so far.
    pub fn current_estimate(&self) -> Option<Estimate> {
        self.rate.compute(self.peaks.iter())
    }
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }
    pub fn baseline(&self) -> Option<f32> {
        self.baseline.value()
    }
    pub fn detrended_len(&self) -> usize {
        self.detector.len()
    }
    pub fn peak_count(&self) -> usize {
        self.peaks.len()
    }
    pub fn peak_timestamps(&self) -> Vec<f64> {
        self.peaks.to_vec()
    }
    pub fn samples_since_peak(&self) -> u32 {
        self.detector.samples_since_peak()
    }
    /// Timestamp of the most recently accepted sample.
    pub fn last_sample_ms(&self) -> Option<f64> {
        self.last_sample_ms
    }
    pub fn clock(&self) -> &C {
        &self.clock
    }
    pub fn trace(&self) -> TraceFrame {
        TraceFrame {
            frame_rate: self.config.frame_rate,
            detrended: self.detector.window(),
            peak_threshold: self.detector.threshold(),
        }
    }
    /// Drop all history; the configuration and clock are kept.
    pub fn reset(&mut self) {
        self.baseline.reset();
        self.detector.reset();
        self.peaks.clear();
        self.last_sample_ms = None;
    }
}
fn check_sample(sample: f32) -> Result<(), PpgError> {
    if sample.is_finite() {
        Ok(())
    } else {
        Err(PpgError::InvalidSample(sample))
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ppg::clock::FrameClock;
    use std::f32::consts::PI;
    fn estimator(frame_rate: f32) -> PpgEstimator<FrameClock> {
        PpgEstimator::with_clock(
            EstimatorConfig::with_frame_rate(frame_rate),
            FrameClock::new(frame_rate),
        )
        .unwrap()
    }
    /// Brightness around 120 with a sinusoidal pulse of the given period.
    fn pulse(index: usize, period_samples: f32, amplitude: f32) -> f32 {
        120.0 + amplitude * (2.0 * PI * index as f32 / period_samples).sin()
    }
    #[test]
    fn rejects_invalid_frame_rate() {
        let err = PpgEstimator::new(EstimatorConfig::with_frame_rate(0.0)).err();
        assert!(matches!(err, Some(PpgError::InvalidFrameRate(_))));
    }
    #[test]
    fn huge_frame_rate_fails_construction() {
        let err = PpgEstimator::new(EstimatorConfig::with_frame_rate(f32::MAX)).err();
        assert!(matches!(err, Some(PpgError::InvalidConfig(_))));
    }
    #[test]
    fn constant_input_never_estimates() {
        let mut est = estimator(30.0);
        for _ in 0..1000 {
            assert_eq!(est.ingest(87.5).unwrap(), None);
        }
        assert_eq!(est.peak_count(), 0);
        assert_eq!(est.current_estimate(), None);
    }
    #[test]
    fn periodic_pulse_converges_to_expected_rate() {
        // 25 samples at 30 fps = 833.3 ms -> 72 BPM
        let mut est = estimator(30.0);
        let mut last = None;
        for i in 0..900 {
            if let Some(e) = est.ingest(pulse(i, 25.0, 2.0)).unwrap() {
                last = Some(e);
            }
        }
        let last = last.expect("pulse should produce estimates");
        assert!((last.heart_rate - 72.0).abs() < 0.5, "got {}", last.heart_rate);
        assert!(last.quality > 0.99, "got {}", last.quality);
        assert_eq!(est.current_estimate(), Some(last));
    }
    #[test]
    fn emitted_rates_stay_in_physiological_range() {
        // ~7 samples per beat at 30 fps: faster than 180 BPM and inside the refractory window
        let mut est = estimator(30.0);
        for i in 0..900 {
            if let Some(e) = est.ingest(pulse(i, 7.0, 3.0)).unwrap() {
                assert!((40.0..=180.0).contains(&e.heart_rate), "got {}", e.heart_rate);
            }
        }
        // very slow pulse: one beat every 2.5 s
        let mut est = estimator(30.0);
        for i in 0..1800 {
            if let Some(e) = est.ingest(pulse(i, 75.0, 3.0)).unwrap() {
                assert!((40.0..=180.0).contains(&e.heart_rate), "got {}", e.heart_rate);
            }
        }
    }
    /// Flat brightness with a one-frame spike every `every` samples.
    fn spike_train(every: usize, len: usize) -> (PpgEstimator<FrameClock>, Vec<Estimate>) {
        let mut est = estimator(30.0);
        let mut out = Vec::new();
        for i in 0..len {
            let sample = if i >= every && i % every == 0 { 105.0 } else { 100.0 };
            out.extend(est.ingest(sample).unwrap());
        }
        (est, out)
    }
    #[test]
    fn rate_gate_applies_at_the_upper_bound() {
        // 9 frames at 30 fps = 300 ms -> 200 BPM: peaks register, rate is suppressed
        let (est, estimates) = spike_train(9, 300);
        assert_eq!(est.peak_count(), 10);
        assert!(estimates.is_empty(), "{estimates:?}");
        assert_eq!(est.current_estimate(), None);
        // 10 frames = 333.3 ms -> 180 BPM, still reported
        let (_, estimates) = spike_train(10, 300);
        let last = estimates.last().copied().unwrap();
        assert!((last.heart_rate - 180.0).abs() < 1e-3, "got {}", last.heart_rate);
        assert!(last.quality > 0.99);
    }
    #[test]
    fn buffers_are_bounded() {
        let mut est = estimator(30.0);
        for i in 0..900 {
            est.ingest(pulse(i, 25.0, 2.0)).unwrap();
            assert!(est.detrended_len() <= 150);
            assert!(est.peak_count() <= 10);
        }
        assert_eq!(est.detrended_len(), 150);
        assert_eq!(est.peak_count(), 10);
    }
    #[test]
    fn refractory_counter_resets_exactly_on_peaks() {
        let mut est = estimator(30.0);
        let mut peaks = 0;
        for i in 0..300 {
            let before = est.peak_timestamps().last().copied();
            est.ingest(pulse(i, 25.0, 2.0)).unwrap();
            let peaked = est.peak_timestamps().last().copied() != before;
            assert_eq!(peaked, est.samples_since_peak() == 0);
            if peaked {
                peaks += 1;
            }
        }
        assert!(peaks >= 10);
    }
    #[test]
    fn non_finite_samples_do_not_touch_state() {
        let mut est = estimator(30.0);
        est.ingest(100.0).unwrap();
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            assert!(matches!(est.ingest(bad), Err(PpgError::InvalidSample(_))));
        }
        assert_eq!(est.baseline(), Some(100.0));
        assert_eq!(est.detrended_len(), 1);
        assert_eq!(est.clock().frames(), 1);
        assert_eq!(est.last_sample_ms(), Some(0.0));
    }
    #[test]
    fn identical_inputs_are_deterministic() {
        let mut a = estimator(30.0);
        let mut b = estimator(30.0);
        let run = |est: &mut PpgEstimator<FrameClock>| -> Vec<Option<Estimate>> {
            (0..600)
                .map(|i| est.ingest(pulse(i, 22.0, 1.5) + (i % 7) as f32 * 0.05).unwrap())
                .collect()
        };
        let first = run(&mut a);
        let second = run(&mut b);
        assert_eq!(first, second);
        assert!(first.iter().any(Option::is_some));
    }
    #[test]
    fn ingest_at_uses_supplied_timestamps() {
        let mut est = PpgEstimator::new(EstimatorConfig::default()).unwrap();
        let mut last = None;
        for i in 0..600 {
            // timestamps in ms for a nominal 30 fps feed, 30 samples per beat -> 60 BPM
            if let Some(e) = est.ingest_at(pulse(i, 30.0, 2.0), i as f64 * 1000.0 / 30.0).unwrap() {
                last = Some(e);
            }
        }
        let last = last.unwrap();
        assert!((last.heart_rate - 60.0).abs() < 0.5, "got {}", last.heart_rate);
    }
    #[test]
    fn reset_clears_history() {
        let mut est = estimator(30.0);
        for i in 0..300 {
            est.ingest(pulse(i, 25.0, 2.0)).unwrap();
        }
        assert!(est.peak_count() > 0);
        est.reset();
        assert_eq!(est.peak_count(), 0);
        assert_eq!(est.detrended_len(), 0);
        assert_eq!(est.baseline(), None);
        assert_eq!(est.current_estimate(), None);
    }
    #[test]
    fn trace_reflects_detrended_window() {
        let mut est = estimator(30.0);
        for i in 0..40 {
            est.ingest(pulse(i, 25.0, 2.0)).unwrap();
        }
        let trace = est.trace();
        assert_eq!(trace.detrended.len(), 40);
        assert_eq!(trace.peak_threshold, 0.2);
        assert_eq!(trace.detrended[0], 0.0);
    }
}
