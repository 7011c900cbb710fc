use crate::ppg::buffer::SlidingWindow;
/// Local-maximum detector over the detrended signal with a refractory gate.
///
/// Each push looks at the newest three values and asks whether the middle one
/// is a peak, so a peak is confirmed one sample after it happens.
#[derive(Clone, Debug)]
pub struct PeakDetector {
    window: SlidingWindow<f32>,
    threshold: f32,
    refractory_samples: f32,
    samples_since_peak: u32,
}
impl PeakDetector {
    pub fn new(capacity: usize, threshold: f32, refractory_samples: f32) -> Self {
        Self {
            window: SlidingWindow::new(capacity),
            threshold,
            refractory_samples,
            samples_since_peak: 0,
        }
    }
    /// Append one detrended value; returns `true` when a peak is confirmed.
    pub fn push(&mut self, detrended: f32) -> bool {
        self.window.push(detrended);
        self.samples_since_peak = self.samples_since_peak.saturating_add(1);
        if (self.samples_since_peak as f32) < self.refractory_samples {
            return false;
        }
        let (Some(right), Some(candidate), Some(left)) = (
            self.window.from_back(0),
            self.window.from_back(1),
            self.window.from_back(2),
        ) else {
            return false;
        };
        let is_peak = candidate > left && candidate > right && candidate > self.threshold;
        if is_peak {
            self.samples_since_peak = 0;
        }
        is_peak
    }
    pub fn len(&self) -> usize {
        self.window.len()
    }
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
    pub fn capacity(&self) -> usize {
        self.window.capacity()
    }
    pub fn threshold(&self) -> f32 {
        self.threshold
    }
    pub fn refractory_samples(&self) -> f32 {
        self.refractory_samples
    }
    pub fn samples_since_peak(&self) -> u32 {
        self.samples_since_peak
    }
    pub fn window(&self) -> Vec<f32> {
        self.window.to_vec()
    }
    pub fn reset(&mut self) {
        self.window.clear();
        self.samples_since_peak = 0;
    }
}
