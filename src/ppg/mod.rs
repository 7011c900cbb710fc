// src/ppg/mod.rs
// Remote-PPG core: brightness samples in, heart-rate estimates out.
pub mod baseline;
pub mod buffer;
pub mod clock;
pub mod config;
pub mod error;
pub mod estimator;
pub mod frame;
pub mod peak;
pub mod pipeline;
pub mod plot;
pub mod rate;
pub mod source;
pub use baseline::BaselineTracker;
pub use buffer::{SlidingWindow, TraceFrame};
pub use clock::{Clock, FrameClock, SystemClock};
pub use config::EstimatorConfig;
pub use error::PpgError;
pub use estimator::PpgEstimator;
pub use frame::green_channel_mean;
pub use peak::PeakDetector;
pub use pipeline::{PpgPipeline, PumpOutcome};
pub use plot::{render_trace_png, PlotStyle};
pub use rate::{interval_stats, Estimate, IntervalStats, RateCalculator};
pub use source::{ManualSource, SampleSource, SyntheticPulse, TextSource};
