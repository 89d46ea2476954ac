//! Director state representation

use crate::types::script::{ResultCategory, StepIndex, Variable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mutable state of one narrative session
///
/// Only the director's reducer writes to it; hosts read it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct State {
    /// Current index into the script, never clamped
    pub position: StepIndex,
    /// Recorded results, one entry per variable
    pub variables: BTreeMap<Variable, ResultCategory>,
}

impl State {
    /// Initial state at position 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state at an arbitrary position
    pub fn at(position: StepIndex) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn variable(&self, var: Variable) -> Option<ResultCategory> {
        self.variables.get(&var).copied()
    }

    pub fn last_result(&self) -> Option<ResultCategory> {
        self.variable(Variable::LastResult)
    }
}
