//! bf-control: closed-loop control for the brewing plant.
//!
//! On each control tick the engine recomputes the drive output of every
//! enabled controller from its linked sensor's latest value and hands back
//! the updated entities for dispatch; it never touches the store itself.
//!
//! Two laws are available:
//! - `StepProportional` (default): nudges the previous output by a fixed
//!   per-tick gain times the error. This is the plant's historical behavior;
//!   the `kp`/`ki`/`kd` fields are carried but inert.
//! - `FullPid`: parallel-form three-term PID using the controller's own
//!   gains, with derivative-on-measurement and anti-windup.

pub mod engine;
pub mod error;
pub mod law;

pub use engine::{ControlEngine, ControlPass};
pub use error::{ControlError, ControlResult};
pub use law::{ControlLaw, PidTerms, OUTPUT_MAX, OUTPUT_MIN, STEP_GAIN_PER_TICK};
