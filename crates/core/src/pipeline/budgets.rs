use std::time::Duration;

/// Per-stage time allowances for one pipeline run.
///
/// The geometry stage carries the largest budget since the external
/// detector dominates wall time. The total budget is deliberately less
/// than the sum of stage budgets, so a caller-facing deadline can fire
/// while an individual stage is still inside its own allowance.
#[derive(Clone, Copy, Debug)]
pub struct StageBudgets {
    pub quality: Duration,
    pub geometry: Duration,
    pub calibration: Duration,
    pub uniformity: Duration,
    pub total: Duration,
}

impl Default for StageBudgets {
    fn default() -> Self {
        Self {
            quality: Duration::from_millis(500),
            geometry: Duration::from_millis(3000),
            calibration: Duration::from_millis(1000),
            uniformity: Duration::from_millis(500),
            total: Duration::from_millis(4000),
        }
    }
}

impl StageBudgets {
    pub fn stage_sum(&self) -> Duration {
        self.quality + self.geometry + self.calibration + self.uniformity
    }

    /// True when the total deadline is tighter than the stage allowances
    /// combined and geometry holds the largest single budget.
    pub fn is_consistent(&self) -> bool {
        self.total < self.stage_sum()
            && self.geometry >= self.quality
            && self.geometry >= self.calibration
            && self.geometry >= self.uniformity
    }
}
