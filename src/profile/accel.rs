// src/profile/accel.rs - bang-bang (trapezoidal velocity) planner

use super::{
    BoundaryState, MotionState, Phase, ProfileCase, ProfileError, TargetState, Trajectory,
    integ_p, integ_v,
};

/// Relative tolerance for the deceleration-distance diagnostic (2%).
///
/// When the distance needed to brake from `v0` to `ve` is within this
/// fraction of the available distance, an infeasible solve is reported
/// as a re-issued-goal condition instead of a parameter mismatch.
const DECEL_DISTANCE_TOLERANCE: f64 = 0.02;

/// Limits for the acceleration-bounded planner. All strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelLimits {
    pub accel_max: f64,
    pub decel_max: f64,
    pub velocity_max: f64,
}

impl AccelLimits {
    /// `decel_max = None` defaults the deceleration limit to `accel_max`.
    pub fn new(
        accel_max: f64,
        velocity_max: f64,
        decel_max: Option<f64>,
    ) -> Result<Self, ProfileError> {
        if accel_max <= 0.0 {
            return Err(ProfileError::InvalidArgument(format!(
                "accel_max must be positive, got {accel_max}"
            )));
        }
        if velocity_max <= 0.0 {
            return Err(ProfileError::InvalidArgument(format!(
                "velocity_max must be positive, got {velocity_max}"
            )));
        }
        let decel_max = match decel_max {
            Some(d) if d <= 0.0 => {
                return Err(ProfileError::InvalidArgument(format!(
                    "decel_max must be positive, got {d}"
                )));
            }
            Some(d) => d,
            None => accel_max,
        };
        Ok(Self {
            accel_max,
            decel_max,
            velocity_max,
        })
    }
}

/// Minimum-time planner between two `(position, velocity)` states under
/// acceleration, deceleration and velocity limits.
///
/// Lifecycle: construct empty, supply constraints/initial/target (in any
/// order, or together via [`AccelPlanner::init`]), call
/// [`AccelPlanner::calc_trajectory`] once, then sample freely. Any setter
/// invalidates the solved trajectory.
#[derive(Debug, Default)]
pub struct AccelPlanner {
    limits: Option<AccelLimits>,
    start: Option<BoundaryState>,
    target: Option<TargetState>,
    trajectory: Option<Trajectory>,
}

impl AccelPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the limits. Fails on non-positive values; see [`AccelLimits::new`].
    pub fn set_constraints(
        &mut self,
        accel_max: f64,
        velocity_max: f64,
        decel_max: Option<f64>,
    ) -> Result<(), ProfileError> {
        self.limits = Some(AccelLimits::new(accel_max, velocity_max, decel_max)?);
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
        t0: f64,
        v0: f64,
        ve: f64,
        decel_max: Option<f64>,
    ) -> Result<(), ProfileError> {
        self.set_initial(t0, p0, v0);
        self.set_target(pe, ve);
        self.set_constraints(accel_max, velocity_max, decel_max)
    }

    pub fn limits(&self) -> Option<&AccelLimits> {
        self.limits.as_ref()
    }

    /// The solved trajectory, if [`AccelPlanner::calc_trajectory`] has run
    /// since the last input change.
    pub fn trajectory(&self) -> Option<&Trajectory> {
        self.trajectory.as_ref()
    }

    pub fn is_solved(&self) -> bool {
        self.trajectory.is_some()
    }

    /// Solve for the phase durations and return the total duration `te`.
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
        let dv = target.ve - start.v0;

        if dp == 0.0 {
            if dv == 0.0 {
                self.trajectory = Some(Trajectory::stationary(start, target));
                tracing::debug!("stationary trajectory, te = 0");
                return Ok(0.0);
            }
            return Err(ProfileError::InvalidArgument(format!(
                "zero displacement cannot absorb a velocity change (dp = 0, dv = {dv})"
            )));
        }

        let sign = dp / dp.abs();
        let acc = limits.accel_max * sign;
        let dec = limits.decel_max * sign;

        // Quadratic in the acceleration-phase duration t1: accelerate to a
        // peak velocity, decelerate at `dec` to exactly ve, while covering
        // exactly dp.
        let ratio = acc / dec;
        let a_coeff = 0.5 * acc * (1.0 + ratio);
        let b_coeff = start.v0 * (1.0 + ratio);
        let c_coeff = -dp + (start.v0 * start.v0 - target.ve * target.ve) / (2.0 * dec);

        let discriminant = b_coeff * b_coeff - 4.0 * a_coeff * c_coeff;
        if discriminant <= 0.0 {
            return Err(self.decel_diagnostic(
                &limits,
                start.v0,
                target.ve,
                dp,
                dec,
                sign,
                DiagContext::Discriminant,
            ));
        }

        let sqrt_disc = discriminant.sqrt();
        let root_plus = (-b_coeff + sqrt_disc) / (2.0 * a_coeff);
        let root_minus = (-b_coeff - sqrt_disc) / (2.0 * a_coeff);

        // Both roots positive: the smaller one is the more time-efficient
        // maneuver. Otherwise take whichever is positive.
        let dt01 = if root_plus > 0.0 && root_minus > 0.0 {
            root_plus.min(root_minus)
        } else if root_plus > 0.0 {
            root_plus
        } else if root_minus > 0.0 {
            root_minus
        } else {
            return Err(self.decel_diagnostic(
                &limits,
                start.v0,
                target.ve,
                dp,
                dec,
                sign,
                DiagContext::NoPositiveRoot,
            ));
        };

        let v1 = integ_v(start.v0, acc, dt01);
        let trajectory = if v1.abs() < limits.velocity_max {
            // Case 0: accelerate, decelerate. The peak stays below the cap.
            let p1 = integ_p(start.p0, start.v0, acc, dt01);
            let dt1e = ((v1 - target.ve) / dec).abs();
            Trajectory::new(
                ProfileCase::Triangle,
                start,
                target,
                vec![
                    Phase {
                        dt: dt01,
                        jerk: 0.0,
                        accel: acc,
                        velocity: start.v0,
                        position: start.p0,
                    },
                    Phase {
                        dt: dt1e,
                        jerk: 0.0,
                        accel: -dec,
                        velocity: v1,
                        position: p1,
                    },
                ],
            )
        } else {
            // Case 1: clip the peak to the signed velocity cap and insert a
            // cruise phase whose duration absorbs the remaining distance.
            let v1 = limits.velocity_max * sign;
            let dt01 = (v1 - start.v0) / acc;
            let p1 = integ_p(start.p0, start.v0, acc, dt01);

            let dt2e = ((v1 - target.ve) / dec).abs();
            let dp2e = integ_p(0.0, v1, -dec, dt2e);
            let dt12 = (target.pe - p1 - dp2e) / v1;

            // Analytically dt12 >= 0: the Case-0 root satisfies pe exactly
            // and clipping the peak only shortens the accel/decel
            // displacement. Negative values indicate floating-point edge
            // cases or an infeasible combination.
            if dt12 < 0.0 {
                return Err(ProfileError::Infeasible(format!(
                    "cannot reach target with given constraints: distance {} too short for \
                     velocity_max {}; consider reducing velocity_max or increasing distance",
                    dp.abs(),
                    limits.velocity_max
                )));
            }

            let p2 = target.pe - dp2e;
            Trajectory::new(
                ProfileCase::Trapezoid,
                start,
                target,
                vec![
                    Phase {
                        dt: dt01,
                        jerk: 0.0,
                        accel: acc,
                        velocity: start.v0,
                        position: start.p0,
                    },
                    Phase {
                        dt: dt12,
                        jerk: 0.0,
                        accel: 0.0,
                        velocity: v1,
                        position: p1,
                    },
                    Phase {
                        dt: dt2e,
                        jerk: 0.0,
                        accel: -dec,
                        velocity: v1,
                        position: p2,
                    },
                ],
            )
        };

        let te = trajectory.duration();
        tracing::debug!(
            "solved case {:?}, te = {:.6}, dt = {:?}",
            trajectory.case(),
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

    /// Classify why the quadratic produced no usable root and build the
    /// matching diagnostic.
    #[allow(clippy::too_many_arguments)]
    fn decel_diagnostic(
        &self,
        limits: &AccelLimits,
        v0: f64,
        ve: f64,
        dp: f64,
        dec: f64,
        sign: f64,
        context: DiagContext,
    ) -> ProfileError {
        // Minimum braking distance from v0 to ve: (v0² - ve²) / (2 dec)
        let decel_distance = (v0 * v0 - ve * ve) / (2.0 * dec.abs());
        let available = dp.abs();
        let moving_toward_target = sign * v0 > 0.0;

        if moving_toward_target
            && (decel_distance - available).abs() < available * DECEL_DISTANCE_TOLERANCE
        {
            let prefix = match context {
                DiagContext::Discriminant => "no valid trajectory found",
                DiagContext::NoPositiveRoot => "insufficient distance for trajectory planning",
            };
            return ProfileError::Infeasible(format!(
                "{prefix}: current velocity {} requires approximately {} distance to reach \
                 target velocity {}, nearly equal to available distance {}; this leaves no room \
                 for trajectory planning and typically occurs when the same goal is resent \
                 during motion - check whether the goal has changed before recalculating",
                v0.abs(),
                decel_distance,
                ve.abs(),
                available
            ));
        }

        if moving_toward_target && decel_distance > available {
            let shortage = decel_distance - available;
            return ProfileError::Infeasible(format!(
                "insufficient distance to decelerate: current velocity {} requires {} distance \
                 to reach target velocity {}, but only {} available; shortage {} ({:.1}%) - \
                 consider reducing initial velocity or increasing distance",
                v0.abs(),
                decel_distance,
                ve.abs(),
                available,
                shortage,
                shortage / available * 100.0
            ));
        }

        match context {
            DiagContext::Discriminant => ProfileError::Infeasible(format!(
                "no real solution for phase durations (discriminant <= 0); the constraints may \
                 be too restrictive for the end conditions: distance {}, v0 {}, ve {}, \
                 accel_max {}, decel_max {}, velocity_max {}",
                available,
                v0.abs(),
                ve.abs(),
                limits.accel_max,
                limits.decel_max,
                limits.velocity_max
            )),
            DiagContext::NoPositiveRoot => ProfileError::Infeasible(format!(
                "no positive time solution for trajectory: distance {}, v0 {}, ve {}, \
                 accel_max {}, decel_max {}",
                available,
                v0.abs(),
                ve.abs(),
                limits.accel_max,
                limits.decel_max
            )),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum DiagContext {
    Discriminant,
    NoPositiveRoot,
}
