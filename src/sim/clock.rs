//! Fixed-timestep scheduler
//!
//! Decouples the 60 Hz simulation rate from whatever rate the host's render
//! callback fires at. Slow frames run catch-up updates (capped to avoid the
//! spiral of death); fast frames may run none. A single update is never
//! double-applied.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Accumulates wall-clock time from render callbacks and hands back whole
/// simulation steps.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    accumulator: f32,
    last_time_ms: Option<f64>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current wall-clock timestamp (milliseconds) and get the
    /// number of fixed steps to run before rendering this frame.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_time_ms {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, 0.1),
            None => SIM_DT,
        };
        self.last_time_ms = Some(now_ms);
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        steps
    }

    /// Drop accumulated time (session restart / tab refocus)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time_ms = None;
    }
}
