// src/profile/mod.rs - Two-point motion profile planners

pub mod accel;
pub mod angle;
pub mod jerk;

pub use accel::{AccelLimits, AccelPlanner};
pub use angle::{AnglePlanner, normalize_angle};
pub use jerk::{JerkLimits, JerkPlanner};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("planner not ready: {0}")]
    NotReady(&'static str),

    #[error("infeasible trajectory: {0}")]
    Infeasible(String),
}

/// Kinematic state of the profile at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    /// Absolute time of the sample (seconds)
    pub time: f64,

    /// Position (m)
    pub position: f64,

    /// Velocity (m/s)
    pub velocity: f64,

    /// Acceleration (m/s²)
    pub acceleration: f64,

    /// Jerk (m/s³), always zero for acceleration-limited profiles
    pub jerk: f64,
}

/// Start of the motion: absolute time, position and velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryState {
    pub t0: f64,
    pub p0: f64,
    pub v0: f64,
}

/// End of the motion. End acceleration is implicitly zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetState {
    pub pe: f64,
    pub ve: f64,
}

/// Which qualitative shape the solver selected, determined by which of
/// the velocity/acceleration limits are saturated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileCase {
    /// Zero displacement and zero velocity change; the trajectory is a
    /// single point with zero duration.
    Stationary,
    /// Accelerate then decelerate without touching the velocity cap.
    Triangle,
    /// Accelerate to the velocity cap, cruise, decelerate.
    Trapezoid,
    /// Jerk-bounded S-curve; neither the acceleration nor the velocity
    /// limit is reached.
    SCurve,
    /// S-curve with a cruise plateau at the velocity cap.
    SCurveCruise,
    /// S-curve with constant-acceleration holds at the acceleration cap.
    SCurveAccel,
    /// S-curve with constant-acceleration holds and a cruise plateau.
    SCurveFull,
}

/// One interval during which the jerk is held constant.
///
/// The entry state is precomputed by the solver, so evaluation inside a
/// phase is a single cubic. Acceleration-limited planners emit phases
/// with zero jerk and the quadratic falls out naturally.
#[derive(Debug, Clone, Copy)]
pub struct Phase {
    /// Phase duration (seconds, >= 0)
    pub dt: f64,
    /// Constant jerk held over the phase
    pub jerk: f64,
    /// Acceleration at phase entry
    pub accel: f64,
    /// Velocity at phase entry
    pub velocity: f64,
    /// Position at phase entry
    pub position: f64,
}

impl Phase {
    /// State `tau` seconds after phase entry.
    fn eval(&self, tau: f64) -> (f64, f64, f64) {
        let a = self.accel + self.jerk * tau;
        let v = self.velocity + self.accel * tau + 0.5 * self.jerk * tau * tau;
        let p = self.position
            + self.velocity * tau
            + 0.5 * self.accel * tau * tau
            + self.jerk * tau * tau * tau / 6.0;
        (p, v, a)
    }

    /// State at the end of the phase, used to chain entry states.
    fn exit(&self) -> (f64, f64, f64) {
        self.eval(self.dt)
    }
}

/// Solved piecewise-polynomial trajectory.
///
/// Immutable once built; the owning planner replaces it wholesale when
/// inputs change.
#[derive(Debug, Clone)]
pub struct Trajectory {
    case: ProfileCase,
    start: BoundaryState,
    target: TargetState,
    phases: Vec<Phase>,
    duration: f64,
}

impl Trajectory {
    pub(crate) fn stationary(start: BoundaryState, target: TargetState) -> Self {
        Self {
            case: ProfileCase::Stationary,
            start,
            target,
            phases: Vec::new(),
            duration: 0.0,
        }
    }

    /// Build a trajectory from raw `(dt, jerk, entry)` phases.
    pub(crate) fn new(
        case: ProfileCase,
        start: BoundaryState,
        target: TargetState,
        phases: Vec<Phase>,
    ) -> Self {
        let duration = phases.iter().map(|ph| ph.dt).sum();
        Self {
            case,
            start,
            target,
            phases,
            duration,
        }
    }

    /// Build a trajectory by integrating `(dt, jerk)` segments forward
    /// from an entry state, chaining each phase's exit into the next
    /// phase's entry.
    pub(crate) fn integrate(
        case: ProfileCase,
        start: BoundaryState,
        target: TargetState,
        entry: (f64, f64, f64),
        segments: &[(f64, f64)],
    ) -> Self {
        let (mut p, mut v, mut a) = entry;
        let mut phases = Vec::with_capacity(segments.len());
        for &(dt, jerk) in segments {
            let phase = Phase {
                dt,
                jerk,
                accel: a,
                velocity: v,
                position: p,
            };
            (p, v, a) = phase.exit();
            phases.push(phase);
        }
        Self::new(case, start, target, phases)
    }

    pub fn case(&self) -> ProfileCase {
        self.case
    }

    /// Total duration `te` (seconds).
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Per-phase durations, in order.
    pub fn phase_durations(&self) -> Vec<f64> {
        self.phases.iter().map(|ph| ph.dt).collect()
    }

    pub fn start(&self) -> BoundaryState {
        self.start
    }

    pub fn target(&self) -> TargetState {
        self.target
    }

    /// Evaluate the trajectory at absolute time `t`.
    ///
    /// Before `t0` the start state is held, after `t0 + te` the target
    /// state is held, both with zero acceleration and jerk.
    pub fn sample(&self, t: f64) -> MotionState {
        if self.case == ProfileCase::Stationary {
            return MotionState {
                time: t,
                position: self.start.p0,
                velocity: self.start.v0,
                acceleration: 0.0,
                jerk: 0.0,
            };
        }

        let tau = t - self.start.t0;
        if tau < 0.0 {
            return MotionState {
                time: t,
                position: self.start.p0,
                velocity: self.start.v0,
                acceleration: 0.0,
                jerk: 0.0,
            };
        }
        if tau >= self.duration {
            return MotionState {
                time: t,
                position: self.target.pe,
                velocity: self.target.ve,
                acceleration: 0.0,
                jerk: 0.0,
            };
        }

        let mut elapsed = 0.0;
        for phase in &self.phases {
            if tau <= elapsed + phase.dt {
                let (p, v, a) = phase.eval(tau - elapsed);
                return MotionState {
                    time: t,
                    position: p,
                    velocity: v,
                    acceleration: a,
                    jerk: phase.jerk,
                };
            }
            elapsed += phase.dt;
        }

        // tau < duration but past the last window: floating-point slack
        // in the cumulative sums. Hold the target state.
        MotionState {
            time: t,
            position: self.target.pe,
            velocity: self.target.ve,
            acceleration: 0.0,
            jerk: 0.0,
        }
    }
}

/// Velocity after `dt` seconds of constant acceleration.
pub(crate) fn integ_v(v0: f64, a: f64, dt: f64) -> f64 {
    v0 + a * dt
}

/// Position after `dt` seconds of constant acceleration.
pub(crate) fn integ_p(p0: f64, v0: f64, a: f64, dt: f64) -> f64 {
    p0 + v0 * dt + 0.5 * a * dt * dt
}
