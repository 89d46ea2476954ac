//! Pure transition functions of the director
//!
//! `reduce` is the whole state machine: a `(State, Action) -> State`
//! function with no knowledge of hosts or rendering. `resolve_branch` is the
//! one place where the script itself decides the next position.

use crate::types::{
    action::Action,
    script::{Script, Step, Variable},
    state::State,
};

pub mod debug;


/// Step at the state's position, `end` when out of range
pub fn current<'a>(script: &'a Script, state: &State) -> &'a Step {
    script.get(state.position)
}

/// Apply one action
pub fn reduce(state: State, action: &Action) -> State {
    reduce_with_debug(state, action, &debug::DebugConfig::default())
}

/// Apply one action, logging through the given debug configuration
pub fn reduce_with_debug(
    mut state: State,
    action: &Action,
    debug_config: &debug::DebugConfig,
) -> State {
    match action {
        Action::Advance => {
            let next = state.position.saturating_add(1);
            debug::log(
                debug_config,
                debug::DebugCategory::Engine,
                debug::LogLevel::Trace,
                format_args!("[Advance] {} -> {}", state.position, next),
            );
            state.position = next;
        }
        Action::Goto { next } => {
            debug::log(
                debug_config,
                debug::DebugCategory::Engine,
                debug::LogLevel::Debug,
                format_args!("[Goto] {} -> {}", state.position, next),
            );
            state.position = *next;
        }
        Action::SetResult { result } => {
            debug::log(
                debug_config,
                debug::DebugCategory::Variables,
                debug::LogLevel::Debug,
                format_args!(
                    "[SetResult] lastResult: {:?} -> {} at position {}",
                    state.last_result(),
                    result,
                    state.position
                ),
            );
            state.variables.insert(Variable::LastResult, *result);
        }
    }
    state
}

/// The jump `maybe_auto_advance` performs, if the current step is a branch
///
/// A recorded result present in the mapping selects its target; anything
/// else (no result yet, or an unmapped one) falls through to the next index.
pub fn resolve_branch(script: &Script, state: &State) -> Option<Action> {
    resolve_branch_with_debug(script, state, &debug::DebugConfig::default())
}

pub fn resolve_branch_with_debug(
    script: &Script,
    state: &State,
    debug_config: &debug::DebugConfig,
) -> Option<Action> {
    let Step::BranchOnResult {
        var,
        next_by_result,
    } = current(script, state)
    else {
        return None;
    };

    let recorded = state.variable(*var);
    let next = match recorded.and_then(|result| next_by_result.get(&result)) {
        Some(target) => {
            debug::log(
                debug_config,
                debug::DebugCategory::Flow,
                debug::LogLevel::Debug,
                format_args!(
                    "[Branch] {}={:?} selects {} at position {}",
                    var, recorded, target, state.position
                ),
            );
            *target
        }
        None => {
            debug::log(
                debug_config,
                debug::DebugCategory::Flow,
                debug::LogLevel::Info,
                format_args!(
                    "[Branch] {}={:?} has no mapping at position {}, falling through",
                    var, recorded, state.position
                ),
            );
            state.position.saturating_add(1)
        }
    };

    Some(Action::Goto { next })
}
