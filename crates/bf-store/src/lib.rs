//! bf-store: the shared plant state store.
//!
//! One authoritative `PlantState` snapshot, mutated only through a closed set
//! of typed actions. The transition function replaces exactly the addressed
//! entity, all-or-nothing; a missing target leaves the state untouched and is
//! surfaced as `StoreError::NotFound`. Selected transitions notify an
//! external `NotificationSink` with a human-readable message.
//!
//! For concurrent use, `StoreHandle::spawn` moves the store onto a dedicated
//! thread that owns the state; tickers and frontends enqueue actions over a
//! channel and read by snapshot.

pub mod action;
pub mod error;
pub mod handle;
pub mod notify;
pub mod store;

pub use action::Action;
pub use error::{EntityKind, StoreError, StoreResult};
pub use handle::{StoreClient, StoreHandle};
pub use notify::{LogSink, NoticeLevel, NotificationSink, RecordingSink};
pub use store::Store;
