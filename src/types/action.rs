//! Actions accepted by the director's reducer

use crate::types::script::{ResultCategory, StepIndex};
use serde::{Deserialize, Serialize};

/// A single state transition request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Move to the next index
    Advance,
    /// Move to an arbitrary index
    Goto { next: StepIndex },
    /// Record a minigame result under `lastResult`
    SetResult { result: ResultCategory },
}
