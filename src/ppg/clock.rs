use std::time::{SystemTime, UNIX_EPOCH};
/// Time source read once for every accepted sample.
pub trait Clock {
    fn now_ms(&mut self) -> f64;
}
/// Wall-clock milliseconds since the UNIX epoch.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
    fn now_ms(&mut self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or_default()
    }
}
/// Deterministic clock that advances one frame period per read.
///
/// The first read returns `start_ms`.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    period_ms: f64,
    start_ms: f64,
    frames: u64,
}
impl FrameClock {
    pub fn new(frame_rate: f32) -> Self {
        Self::starting_at(frame_rate, 0.0)
    }
    pub fn starting_at(frame_rate: f32, start_ms: f64) -> Self {
        Self {
            period_ms: 1000.0 / frame_rate as f64,
            start_ms,
            frames: 0,
        }
    }
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
impl Clock for FrameClock {
    fn now_ms(&mut self) -> f64 {
        let now = self.start_ms + self.frames as f64 * self.period_ms;
        self.frames += 1;
        now
    }
}
