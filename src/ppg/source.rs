use std::collections::VecDeque;
use std::f32::consts::PI;
use std::io::BufRead;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::ppg::PpgError;
/// Something that yields one brightness sample per frame.
pub trait SampleSource {
    fn next_sample(&mut self) -> Result<Option<f32>, PpgError>;
}
impl<S: SampleSource + ?Sized> SampleSource for Box<S> {
    fn next_sample(&mut self) -> Result<Option<f32>, PpgError> {
        (**self).next_sample()
    }
}
/// In-memory source useful for tests and deterministic playback.
pub struct ManualSource {
    queue: VecDeque<f32>,
}
impl ManualSource {
    pub fn new(samples: impl IntoIterator<Item = f32>) -> Self {
        Self {
            queue: samples.into_iter().collect(),
        }
    }
}
impl SampleSource for ManualSource {
    fn next_sample(&mut self) -> Result<Option<f32>, PpgError> {
        Ok(self.queue.pop_front())
    }
}
/// Reads one sample per line. Blank lines and `#` comments are skipped.
pub struct TextSource<R> {
    reader: R,
    line: usize,
    text: String,
}
impl<R: BufRead> TextSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            text: String::new(),
        }
    }
}
impl<R: BufRead> SampleSource for TextSource<R> {
    fn next_sample(&mut self) -> Result<Option<f32>, PpgError> {
        loop {
            self.text.clear();
            if self.reader.read_line(&mut self.text)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            let trimmed = self.text.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            // allow `timestamp,value` rows; the last column is the sample
            let field = trimmed.rsplit(',').next().unwrap_or(trimmed).trim();
            return field.parse::<f32>().map(Some).map_err(|_| PpgError::Parse {
                line: self.line,
                value: field.to_owned(),
            });
        }
    }
}
/// Simulated fingertip/face brightness: a sinusoidal pulse riding on a slow
/// illumination drift, with optional uniform noise.
pub struct SyntheticPulse {
    frame_rate: f32,
    bpm: f32,
    amplitude: f32,
    baseline: f32,
    drift_per_second: f32,
    noise: f32,
    rng: StdRng,
    index: usize,
    remaining: Option<usize>,
}
impl SyntheticPulse {
    pub fn new(frame_rate: f32, bpm: f32, seed: u64) -> Self {
        Self {
            frame_rate,
            bpm,
            amplitude: 2.0,
            baseline: 120.0,
            drift_per_second: 0.0,
            noise: 0.0,
            rng: StdRng::seed_from_u64(seed),
            index: 0,
            remaining: None,
        }
    }
    pub fn amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }
    pub fn drift(mut self, per_second: f32) -> Self {
        self.drift_per_second = per_second;
        self
    }
    pub fn noise(mut self, peak_to_peak: f32) -> Self {
        self.noise = peak_to_peak.abs();
        self
    }
    /// Stop after `seconds` worth of frames.
    pub fn duration(mut self, seconds: f32) -> Self {
        self.remaining = Some((seconds * self.frame_rate).round().max(0.0) as usize);
        self
    }
}
impl SampleSource for SyntheticPulse {
    fn next_sample(&mut self) -> Result<Option<f32>, PpgError> {
        if let Some(left) = self.remaining.as_mut() {
            if *left == 0 {
                return Ok(None);
            }
            *left -= 1;
        }
        let t = self.index as f32 / self.frame_rate;
        self.index += 1;
        let phase = 2.0 * PI * self.bpm / 60.0 * t;
        let jitter = if self.noise > 0.0 {
            self.rng.gen_range(-0.5f32..0.5) * self.noise
        } else {
            0.0
        };
        Ok(Some(
            self.baseline + self.drift_per_second * t + self.amplitude * phase.sin() + jitter,
        ))
    }
}
