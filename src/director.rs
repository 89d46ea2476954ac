//! The scene director
//!
//! A [`Director`] binds one immutable [`Script`] to one [`State`] and exposes
//! the host-facing operations. Every operation is total: out-of-range reads
//! yield the synthetic `end` step, jumps are never validated, and branch
//! steps with no matching result fall through to the next index.
//!
//! The director never moves on its own. A host reads [`Director::current`],
//! renders it, and answers with [`Director::advance`], [`Director::goto`] or
//! [`Director::set_result`]. After any change that could land on a
//! `branchOnResult` step, the host calls [`Director::maybe_auto_advance`].
//!
//! ```rust
//! use scene_director::{Director, GameId, ResultCategory, Script, Speaker, Step, Variable};
//! use std::collections::BTreeMap;
//!
//! let script = Script::new(vec![
//!     Step::StartGame { game: GameId::Dice },
//!     Step::AwaitGameResult { to_var: Variable::LastResult },
//!     Step::BranchOnResult {
//!         var: Variable::LastResult,
//!         next_by_result: BTreeMap::from([(ResultCategory::Win, 4)]),
//!     },
//!     Step::say(Speaker::Narrator, "Better luck next time."),
//!     Step::say(Speaker::Narrator, "Lucky roll!"),
//! ]);
//!
//! let mut director = Director::new(script);
//! director.advance(); // the host mounted the dice game
//! director.set_result(ResultCategory::Win);
//! director.advance();
//! director.maybe_auto_advance();
//! assert_eq!(director.state().position, 4);
//! ```

use crate::runtime::{self, debug::DebugConfig};
use crate::types::{
    action::Action,
    script::{ResultCategory, Script, Step, StepIndex},
    state::State,
};

/// Interpreter bound to a single script
#[derive(Debug, Clone)]
pub struct Director {
    script: Script,
    state: State,
    debug_config: DebugConfig,
}

impl Director {
    /// Director at position 0 with no recorded results
    pub fn new(script: Script) -> Self {
        Self::starting_at(script, 0)
    }

    /// Director at an arbitrary start index
    pub fn starting_at(script: Script, start: StepIndex) -> Self {
        Self::restore(script, State::at(start))
    }

    /// Director resuming from a previously captured state
    pub fn restore(script: Script, state: State) -> Self {
        Self {
            script,
            state,
            debug_config: DebugConfig::default(),
        }
    }

    /// Replace the debug configuration used for transition logging
    pub fn with_debug(mut self, debug_config: DebugConfig) -> Self {
        self.debug_config = debug_config;
        self
    }

    /// Step at the current position, or the synthetic `end` step
    pub fn current(&self) -> &Step {
        runtime::current(&self.script, &self.state)
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn position(&self) -> StepIndex {
        self.state.position
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn debug_config(&self) -> &DebugConfig {
        &self.debug_config
    }

    /// Whether the current step reads as `end`
    pub fn is_ended(&self) -> bool {
        matches!(self.current(), Step::End)
    }

    /// Move to `position + 1`, whatever the current step is
    pub fn advance(&mut self) {
        self.dispatch(Action::Advance);
    }

    /// Move to `next` without validating it
    pub fn goto(&mut self, next: StepIndex) {
        self.dispatch(Action::Goto { next });
    }

    /// Record a minigame result under `lastResult`; position is unchanged
    pub fn set_result(&mut self, result: ResultCategory) {
        self.dispatch(Action::SetResult { result });
    }

    /// Resolve the current step if it is a `branchOnResult`
    ///
    /// Returns whether a branch was resolved. Once resolved the position no
    /// longer sits on the branch step, so calling again is a no-op unless the
    /// branch targeted another branch.
    pub fn maybe_auto_advance(&mut self) -> bool {
        match runtime::resolve_branch_with_debug(&self.script, &self.state, &self.debug_config) {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Apply an action through the reducer
    pub fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = runtime::reduce_with_debug(state, &action, &self.debug_config);
    }

    /// Swap in a saved state, returning the one it replaces
    pub(crate) fn replace_state(&mut self, state: State) -> State {
        std::mem::replace(&mut self.state, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::script::{ChoiceOption, Speaker, StepKind};

    fn choice_script() -> Script {
        Script::new(vec![
            Step::say(Speaker::Ivan, "Pick a game."),
            Step::Choice {
                prompt: "Choose:".to_string(),
                options: vec![ChoiceOption::new("Dice", 2), ChoiceOption::new("Leave", 3)],
            },
            Step::say(Speaker::Ivan, "Roll them."),
            Step::End,
        ])
    }

    #[test]
    fn new_director_starts_at_zero_with_no_variables() {
        let director = Director::new(choice_script());
        assert_eq!(director.position(), 0);
        assert!(director.state().variables.is_empty());
        assert_eq!(director.current(), &Step::say(Speaker::Ivan, "Pick a game."));
    }

    #[test]
    fn choice_is_resolved_by_host_goto() {
        let mut director = Director::new(choice_script());
        director.advance();
        assert_eq!(director.current().kind(), StepKind::Choice);

        // The director leaves choices alone.
        assert!(!director.maybe_auto_advance());
        assert_eq!(director.position(), 1);

        director.goto(3);
        assert!(director.is_ended());
    }

    #[test]
    fn dispatch_applies_actions_in_order() {
        let mut director = Director::new(choice_script());
        director.dispatch(Action::Goto { next: 2 });
        director.dispatch(Action::SetResult {
            result: ResultCategory::Completed,
        });
        director.dispatch(Action::Advance);

        assert_eq!(director.position(), 3);
        assert_eq!(director.state().last_result(), Some(ResultCategory::Completed));
    }

    #[test]
    fn restore_resumes_from_state() {
        let mut saved = State::at(2);
        saved.variables.insert(
            crate::types::script::Variable::LastResult,
            ResultCategory::Lose,
        );

        let director = Director::restore(choice_script(), saved.clone());
        assert_eq!(director.state(), &saved);
        assert_eq!(director.current(), &Step::say(Speaker::Ivan, "Roll them."));
    }

    #[test]
    fn replace_state_returns_previous() {
        let mut director = Director::new(choice_script());
        director.advance();
        let previous = director.replace_state(State::at(0));
        assert_eq!(previous.position, 1);
        assert_eq!(director.position(), 0);
    }
}
