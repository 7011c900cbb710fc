use crate::ppg::clock::Clock;
use crate::ppg::error::PpgError;
use crate::ppg::estimator::PpgEstimator;
use crate::ppg::rate::Estimate;
use crate::ppg::source::SampleSource;
use crate::ppg::TraceFrame;
/// Result of pulling one sample through the estimator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PumpOutcome {
    pub sample: f32,
    pub timestamp_ms: f64,
    pub estimate: Option<Estimate>,
}
/// Pulls samples from a source and pushes them through an estimator.
pub struct PpgPipeline<S: SampleSource, C: Clock> {
    source: S,
    estimator: PpgEstimator<C>,
    skipped: usize,
}
impl<S: SampleSource, C: Clock> PpgPipeline<S, C> {
    pub fn new(source: S, estimator: PpgEstimator<C>) -> Self {
        Self {
            source,
            estimator,
            skipped: 0,
        }
    }
    /// Process the next usable sample. `Ok(None)` once the source is exhausted.
    pub fn pump_once(&mut self) -> Result<Option<PumpOutcome>, PpgError> {
        loop {
            let Some(sample) = self.source.next_sample()? else {
                return Ok(None);
            };
            match self.estimator.ingest(sample) {
                Ok(estimate) => {
                    return Ok(Some(PumpOutcome {
                        sample,
                        timestamp_ms: self.estimator.last_sample_ms().unwrap_or_default(),
                        estimate,
                    }))
                }
                Err(PpgError::InvalidSample(bad)) => {
                    self.skipped += 1;
                    log::warn!("skipping non-finite sample {bad}");
                }
                Err(other) => return Err(other),
            }
        }
    }
    /// Drain the source, handing every outcome to `on_outcome`.
    /// Returns the number of samples processed.
    pub fn run<F>(&mut self, mut on_outcome: F) -> Result<usize, PpgError>
    where
        F: FnMut(&PpgEstimator<C>, &PumpOutcome),
    {
        let mut processed = 0;
        while let Some(outcome) = self.pump_once()? {
            processed += 1;
            on_outcome(&self.estimator, &outcome);
        }
        log::info!(
            "source exhausted after {processed} samples ({} skipped, {} peaks in window)",
            self.skipped,
            self.estimator.peak_count()
        );
        Ok(processed)
    }
    pub fn estimator(&self) -> &PpgEstimator<C> {
        &self.estimator
    }
    pub fn skipped(&self) -> usize {
        self.skipped
    }
    pub fn latest_trace(&self) -> TraceFrame {
        self.estimator.trace()
    }
}
