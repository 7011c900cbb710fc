// src/lib.rs
pub mod pacer;
pub mod ppg;
pub use pacer::{Pacemaker, PacerEvent, PacingMode, PacingState, Vitals};
pub use ppg::{Estimate, EstimatorConfig, PpgError, PpgEstimator};
