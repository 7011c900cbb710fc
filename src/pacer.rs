// src/pacer.rs
//! Single-chamber pacemaker simulator driven by the PPG heart rate.
//!
//! The simulated patient has an intrinsic rhythm (`patient_hr`). In `VVI`
//! mode the device senses those beats and paces the ventricle whenever no
//! pace has happened for one lower-rate-limit interval. In `ODO` mode it only
//! senses.
use serde::{Deserialize, Serialize};
use crate::ppg::PpgError;
/// Minimum gap after an intrinsic beat before a pace may fire (ms).
const PACE_BLANKING_MS: f64 = 200.0;
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PacingMode {
    Vvi,
    Odo,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PacingState {
    Idle,
    VSense,
    VPace,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PacerEvent {
    None,
    Intrinsic,
    VPace,
}
/// One tick of simulator output for the vitals display.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub ecg: f32,
    pub egm: f32,
    pub hr: f32,
    pub state: PacingState,
    pub lrl: u32,
    pub mode: PacingMode,
    pub event: PacerEvent,
}
pub struct Pacemaker {
    mode: PacingMode,
    lrl: u32,
    v_interval_ms: f64,
    last_pace_ms: f64,
    last_intrinsic_ms: f64,
    patient_hr: f32,
    patient_interval_ms: f64,
    current_hr: f32,
    state: PacingState,
}
impl Default for Pacemaker {
    fn default() -> Self {
        Self::new()
    }
}
impl Pacemaker {
    pub fn new() -> Self {
        let lrl = 60;
        let patient_hr = 45.0;
        Self {
            mode: PacingMode::Vvi,
            lrl,
            v_interval_ms: 60_000.0 / lrl as f64,
            last_pace_ms: 0.0,
            last_intrinsic_ms: 0.0,
            patient_hr,
            patient_interval_ms: 60_000.0 / patient_hr as f64,
            current_hr: lrl as f32,
            state: PacingState::Idle,
        }
    }
    pub fn set_params(&mut self, mode: PacingMode, lrl: u32) -> Result<(), PpgError> {
        if lrl == 0 {
            return Err(PpgError::InvalidLowerRateLimit(lrl));
        }
        self.mode = mode;
        self.lrl = lrl;
        self.v_interval_ms = 60_000.0 / lrl as f64;
        log::info!("pacer params: mode={mode:?} lrl={lrl}");
        Ok(())
    }
    /// Adopt a measured patient rate. Rates outside (30, 200) BPM are ignored.
    pub fn set_patient_hr(&mut self, hr: f32) -> bool {
        if hr > 30.0 && hr < 200.0 {
            self.patient_hr = hr;
            self.patient_interval_ms = 60_000.0 / hr as f64;
            true
        } else {
            log::debug!("ignoring implausible patient rate {hr}");
            false
        }
    }
    pub fn update(&mut self, now_ms: f64) -> Vitals {
        let since_pace = now_ms - self.last_pace_ms;
        let mut since_intrinsic = now_ms - self.last_intrinsic_ms;
        let mut event = PacerEvent::None;
        if since_intrinsic > self.patient_interval_ms {
            self.last_intrinsic_ms = now_ms;
            since_intrinsic = 0.0;
            let sensed = match self.mode {
                PacingMode::Vvi => since_pace < self.v_interval_ms,
                PacingMode::Odo => true,
            };
            if sensed {
                self.current_hr = self.patient_hr;
                event = PacerEvent::Intrinsic;
            }
        }
        if self.mode == PacingMode::Vvi
            && since_pace > self.v_interval_ms
            && since_intrinsic > PACE_BLANKING_MS
        {
            self.last_pace_ms = now_ms;
            self.current_hr = self.lrl as f32;
            event = PacerEvent::VPace;
        }
        let (ecg, egm) = match event {
            PacerEvent::VPace => {
                self.state = PacingState::VPace;
                (1.0, -0.8)
            }
            PacerEvent::Intrinsic => {
                self.state = PacingState::VSense;
                (0.8, 0.6)
            }
            PacerEvent::None => (0.0, 0.0),
        };
        Vitals {
            ecg,
            egm,
            hr: self.current_hr,
            state: self.state,
            lrl: self.lrl,
            mode: self.mode,
            event,
        }
    }
    pub fn lrl(&self) -> u32 {
        self.lrl
    }
    pub fn patient_hr(&self) -> f32 {
        self.patient_hr
    }
}
