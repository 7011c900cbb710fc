/// Adaptive baseline: an exponential moving average of every sample seen.
///
/// The first sample seeds the average so there is no start-up transient.
#[derive(Clone, Debug)]
pub struct BaselineTracker {
    alpha: f32,
    ema: Option<f32>,
}
impl BaselineTracker {
    pub fn new(alpha: f32) -> Self {
        Self { alpha, ema: None }
    }
    /// Fold `sample` into the average and return `sample - ema`.
    pub fn update(&mut self, sample: f32) -> f32 {
        let ema = match self.ema {
            Some(previous) => self.alpha * sample + (1.0 - self.alpha) * previous,
            None => sample,
        };
        self.ema = Some(ema);
        sample - ema
    }
    pub fn value(&self) -> Option<f32> {
        self.ema
    }
    pub fn reset(&mut self) {
        self.ema = None;
    }
}
