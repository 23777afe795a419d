//! Error types for store operations.

use core::fmt;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Kind of entity a dispatch failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Device,
    Vessel,
    Process,
    Controller,
    Equipment,
    Alarm,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::Device => "device",
            EntityKind::Vessel => "vessel",
            EntityKind::Process => "process",
            EntityKind::Controller => "controller",
            EntityKind::Equipment => "equipment",
            EntityKind::Alarm => "alarm",
        };
        f.write_str(s)
    }
}

/// Errors that can occur when dispatching actions.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    /// The action addressed an identifier with no matching entity. The state
    /// is left untouched.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// The store thread is gone (shut down or panicked).
    #[error("store is disconnected")]
    Disconnected,
}

impl StoreError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}
