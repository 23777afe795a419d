//! bf-core: stable foundation for brewflow.
//!
//! Contains:
//! - ids (typed identifiers for plant entities)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{BfError, BfResult};
pub use ids::*;
pub use numeric::*;
