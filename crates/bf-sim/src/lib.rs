//! bf-sim: stand-in telemetry for the brewing plant.
//!
//! Two generators:
//! - `drift`: per-tick jitter applied to every sensor and vessel temperature
//!   in a plant snapshot, emulating live readings when no hardware is wired.
//! - `fermenter`: free-standing virtual fermenters producing temperature,
//!   head pressure, and CO2 telemetry along a plausible fermentation curve.
//!
//! Both own a seedable RNG; tests assert invariants, never literal values.

pub mod drift;
pub mod fermenter;

pub use drift::DriftSimulator;
pub use fermenter::VirtualFermenter;
