//! Minimum-time two-point trajectory planning.
//!
//! Two closed-form planners share one lifecycle: set boundary states and
//! limits, solve once, then sample the piecewise-polynomial profile at
//! arbitrary instants.
//!
//! - [`AccelPlanner`]: bang-bang (trapezoidal velocity) profiles with
//!   independently tunable acceleration and deceleration limits.
//! - [`JerkPlanner`]: S-curve (jerk-limited) profiles with up to four
//!   phase topologies depending on which limits saturate.
//! - [`AnglePlanner`]: angle-wrapping adapter planning across the
//!   shortest displacement in `[-pi, pi)`.

pub mod config;
pub mod plot;
pub mod profile;

pub use config::{ConfigError, PlanConfig};
pub use profile::{
    AccelLimits, AccelPlanner, AnglePlanner, BoundaryState, JerkLimits, JerkPlanner, MotionState,
    Phase, ProfileCase, ProfileError, TargetState, Trajectory,
};
