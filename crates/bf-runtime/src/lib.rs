//! bf-runtime: tick scheduling for the plant.
//!
//! Two independent periodic drivers over the store actor:
//! - the telemetry ticker dispatches a drift pass (default every 5 s),
//! - the control ticker runs the engine over a snapshot and dispatches its
//!   updates (default every 2 s).
//!
//! The tickers are unsynchronized with each other; the control tick may read
//! a sensor value the latest telemetry tick has or has not produced yet.
//! That eventual consistency over a sub-5-second horizon is accepted. For
//! deterministic output there is `run_lockstep`, which merges both drivers
//! into a fixed drift-then-control sequence.

pub mod error;
pub mod runtime;
pub mod ticker;

pub use error::{RuntimeError, RuntimeResult};
pub use runtime::{run_lockstep, PlantRuntime, RuntimeConfig};
pub use ticker::Ticker;
