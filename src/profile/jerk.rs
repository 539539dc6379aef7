// src/profile/jerk.rs - jerk-bounded (S-curve) planner

use super::{
    BoundaryState, MotionState, ProfileCase, ProfileError, TargetState, Trajectory,
};

/// Limits for the jerk-bounded planner. All strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JerkLimits {
    pub accel_max: f64,
    pub velocity_max: f64,
    pub jerk_max: f64,
}

impl JerkLimits {
    pub fn new(accel_max: f64, velocity_max: f64, jerk_max: f64) -> Result<Self, ProfileError> {
        if accel_max <= 0.0 || velocity_max <= 0.0 || jerk_max <= 0.0 {
            return Err(ProfileError::InvalidArgument(format!(
                "all constraint values must be positive, got accel_max {accel_max}, \
                 velocity_max {velocity_max}, jerk_max {jerk_max}"
            )));
        }
        Ok(Self {
            accel_max,
            velocity_max,
            jerk_max,
        })
    }
}

/// Minimum-time S-curve planner between two positions under jerk,
/// acceleration and velocity limits.
///
/// The motion starts and ends at zero acceleration and jerk. The phase
/// duration formulas are derived for a standstill start; a nonzero start
/// or end velocity is accepted for interface parity with
/// [`super::AccelPlanner`] but does not alter the durations, and the
/// synthesized profile ramps from rest. Out-of-window samples still clamp
/// to the supplied boundary velocities.
#[derive(Debug, Default)]
pub struct JerkPlanner {
    limits: Option<JerkLimits>,
    start: Option<BoundaryState>,
    target: Option<TargetState>,
    trajectory: Option<Trajectory>,
}

impl JerkPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the limits. Fails on non-positive values; see [`JerkLimits::new`].
    pub fn set_constraints(
        &mut self,
        accel_max: f64,
        velocity_max: f64,
        jerk_max: f64,
    ) -> Result<(), ProfileError> {
        self.limits = Some(JerkLimits::new(accel_max, velocity_max, jerk_max)?);
        self.trajectory = None;
        Ok(())
    }

    /// Set the start time, position and velocity.
    pub fn set_initial(&mut self, t0: f64, p0: f64, v0: f64) {
        self.start = Some(BoundaryState { t0, p0, v0 });
        self.trajectory = None;
    }

    /// Set the end position and velocity.
    pub fn set_target(&mut self, pe: f64, ve: f64) {
        self.target = Some(TargetState { pe, ve });
        self.trajectory = None;
    }

    /// Set every input in one call.
    #[allow(clippy::too_many_arguments)]
    pub fn init(
        &mut self,
        p0: f64,
        pe: f64,
        accel_max: f64,
        velocity_max: f64,
        jerk_max: f64,
        t0: f64,
        v0: f64,
        ve: f64,
    ) -> Result<(), ProfileError> {
        self.set_initial(t0, p0, v0);
        self.set_target(pe, ve);
        self.set_constraints(accel_max, velocity_max, jerk_max)
    }

    pub fn limits(&self) -> Option<&JerkLimits> {
        self.limits.as_ref()
    }

    pub fn trajectory(&self) -> Option<&Trajectory> {
        self.trajectory.as_ref()
    }

    pub fn is_solved(&self) -> bool {
        self.trajectory.is_some()
    }

    /// Classify the topology, solve the phase durations and return the
    /// total duration `te`.
    pub fn calc_trajectory(&mut self) -> Result<f64, ProfileError> {
        let target = self
            .target
            .ok_or(ProfileError::NotReady("end point not set, call set_target first"))?;
        let limits = self.limits.ok_or(ProfileError::NotReady(
            "constraints not set, call set_constraints first",
        ))?;
        let start = self.start.ok_or(ProfileError::NotReady(
            "initial state not set, call set_initial first",
        ))?;

        let dp = target.pe - start.p0;
        if dp == 0.0 {
            if target.ve != start.v0 {
                return Err(ProfileError::InvalidArgument(format!(
                    "zero displacement cannot absorb a velocity change (dp = 0, dv = {})",
                    target.ve - start.v0
                )));
            }
            self.trajectory = Some(Trajectory::stationary(start, target));
            tracing::debug!("stationary trajectory, te = 0");
            return Ok(0.0);
        }

        let d = dp.abs();
        let sign = dp / d;
        let j = limits.jerk_max * sign;
        let jmax = limits.jerk_max;
        let amax = limits.accel_max;
        let vmax = limits.velocity_max;

        // Base jerk-segment duration if neither cap were active.
        let t1 = (d / (2.0 * jmax)).cbrt();

        let (case, segments): (ProfileCase, Vec<(f64, f64)>) = if t1 * jmax < amax {
            if t1 * t1 * jmax < vmax {
                // Neither cap reached: four pure jerk ramps.
                (
                    ProfileCase::SCurve,
                    vec![(t1, j), (t1, -j), (t1, -j), (t1, j)],
                )
            } else {
                // Velocity cap reached before the acceleration cap.
                let t1 = (vmax / jmax).sqrt();
                let t2 = d / vmax - 2.0 * t1;
                (
                    ProfileCase::SCurveCruise,
                    vec![(t1, j), (t1, -j), (t2, 0.0), (t1, -j), (t1, j)],
                )
            }
        } else {
            let t1 = amax / jmax;
            let t2 = -1.5 * t1 + 0.5 * (4.0 * d / amax + t1 * t1 / 3.0).sqrt();
            if (t1 + t2) * amax < vmax {
                // Acceleration cap reached, velocity cap not.
                (
                    ProfileCase::SCurveAccel,
                    vec![(t1, j), (t2, 0.0), (t1, -j), (t1, -j), (t2, 0.0), (t1, j)],
                )
            } else {
                // Both caps reached: full seven-segment profile. When
                // amax² > vmax·jmax the velocity cap binds before the
                // acceleration cap can be held at all (t2 would go
                // negative), so the constant-acceleration segments vanish
                // and the profile reduces to the cruise topology.
                let t2 = vmax / amax - t1;
                if t2 < 0.0 {
                    let t1 = (vmax / jmax).sqrt();
                    let t2 = d / vmax - 2.0 * t1;
                    (
                        ProfileCase::SCurveCruise,
                        vec![(t1, j), (t1, -j), (t2, 0.0), (t1, -j), (t1, j)],
                    )
                } else {
                    let t3 = d / vmax - 2.0 * t1 - t2;
                    (
                        ProfileCase::SCurveFull,
                        vec![
                            (t1, j),
                            (t2, 0.0),
                            (t1, -j),
                            (t3, 0.0),
                            (t1, -j),
                            (t2, 0.0),
                            (t1, j),
                        ],
                    )
                }
            }
        };

        let trajectory =
            Trajectory::integrate(case, start, target, (start.p0, 0.0, 0.0), &segments);
        let te = trajectory.duration();
        tracing::debug!(
            "solved case {:?}, te = {:.6}, dt = {:?}",
            case,
            te,
            trajectory.phase_durations()
        );
        self.trajectory = Some(trajectory);
        Ok(te)
    }

    /// Evaluate the solved trajectory at absolute time `t`.
    pub fn sample(&self, t: f64) -> Result<MotionState, ProfileError> {
        let trajectory = self.trajectory.as_ref().ok_or(ProfileError::NotReady(
            "trajectory not solved, call calc_trajectory first",
        ))?;
        Ok(trajectory.sample(t))
    }
}
