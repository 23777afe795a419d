//! Brewing processes: named runs of recipe-driven activity.

use bf_core::{ProcessId, RecipeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessKind {
    Mash,
    Boil,
    Fermentation,
    Conditioning,
}

/// Process state machine: idle -> running <-> paused, terminal states
/// completed/error. Start/pause/stop actions are the only drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    Idle,
    Running,
    Paused,
    Completed,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrewingProcess {
    pub id: ProcessId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<RecipeId>,
    pub kind: ProcessKind,
    pub status: ProcessStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub current_step: u32,
    pub total_steps: u32,
    /// Completion fraction in percent; presentation-derived, not advanced by
    /// any timer.
    pub progress: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_step_start_time: Option<DateTime<Utc>>,
    /// Remaining time estimate in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time_remaining: Option<f64>,
}
