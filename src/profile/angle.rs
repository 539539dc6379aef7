// src/profile/angle.rs - angle-wrapping adapter around AccelPlanner

use std::f64::consts::PI;

use super::{MotionState, ProfileError, Trajectory, accel::AccelPlanner};

/// Wrap an angle into `[-pi, pi)`.
pub fn normalize_angle(input: f64) -> f64 {
    (input + PI).rem_euclid(2.0 * PI) - PI
}

/// Plans between two angles across the shortest wrapped displacement.
///
/// Wrapping is orthogonal to the solve itself, so this owns an
/// [`AccelPlanner`] and normalizes around it instead of reimplementing
/// anything: inputs are wrapped into `[-pi, pi)` before planning and
/// sampled positions are wrapped on the way out (unless disabled).
#[derive(Debug)]
pub struct AnglePlanner {
    inner: AccelPlanner,
    normalize_output: bool,
}

impl Default for AnglePlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl AnglePlanner {
    pub fn new() -> Self {
        Self {
            inner: AccelPlanner::new(),
            normalize_output: true,
        }
    }

    /// Disable or re-enable wrapping of sampled positions. The unwrapped
    /// position is continuous across the whole profile, which some
    /// consumers prefer.
    pub fn set_normalize_output(&mut self, normalize: bool) {
        self.normalize_output = normalize;
    }

    /// Set every input in one call, wrapping `p0` and `pe` and planning
    /// across the shortest angular displacement.
    #[allow(clippy::too_many_arguments)]
    pub fn init(
        &mut self,
        p0: f64,
        pe: f64,
        accel_max: f64,
        velocity_max: f64,
        t0: f64,
        v0: f64,
        ve: f64,
        decel_max: Option<f64>,
    ) -> Result<(), ProfileError> {
        let p0n = normalize_angle(p0);
        let pen = normalize_angle(pe);
        let dp = normalize_angle(pen - p0n);

        self.inner.set_initial(t0, p0n, v0);
        self.inner.set_target(p0n + dp, ve);
        self.inner.set_constraints(accel_max, velocity_max, decel_max)
    }

    /// Solve and return the total duration `te`.
    pub fn calc_trajectory(&mut self) -> Result<f64, ProfileError> {
        self.inner.calc_trajectory()
    }

    /// Evaluate at absolute time `t`, wrapping the position when output
    /// normalization is on.
    pub fn sample(&self, t: f64) -> Result<MotionState, ProfileError> {
        let mut state = self.inner.sample(t)?;
        if self.normalize_output {
            state.position = normalize_angle(state.position);
        }
        Ok(state)
    }

    pub fn trajectory(&self) -> Option<&Trajectory> {
        self.inner.trajectory()
    }

    /// The wrapped planner, for accessing limits and phase data.
    pub fn planner(&self) -> &AccelPlanner {
        &self.inner
    }
}
