//! Host-side scene session
//!
//! [`SceneSession`] wraps a [`Director`] with the discipline a host is
//! expected to follow: branches are resolved before anything is shown,
//! choices are answered with `goto`, and results are only reported while the
//! script waits at an `awaitGameResult` step. It also keeps a bounded undo
//! history of states.

use crate::director::Director;
use crate::runtime::debug::{self, DebugCategory, LogLevel};
use crate::types::{
    script::{
        ChoiceOption, GameId, ResultCategory, Script, Speaker, Step, StepIndex, StepKind,
        Variable,
    },
    state::State,
};
use std::collections::VecDeque;
use thiserror::Error;

/// Default number of states kept for undo
pub const DEFAULT_HISTORY_DEPTH: usize = 100;

/// Manages state history for undo functionality
#[derive(Debug, Clone)]
pub struct StateHistory {
    /// Previous states, oldest first
    history: VecDeque<State>,
    /// Maximum number of states to keep
    max_size: usize,
}

impl StateHistory {
    /// Create a new state history with a maximum size
    pub fn new(max_size: usize) -> Self {
        Self {
            history: VecDeque::new(),
            max_size,
        }
    }

    /// Push a state snapshot, dropping the oldest one past the limit
    pub fn push(&mut self, state: State) {
        if self.max_size == 0 {
            return;
        }
        self.history.push_back(state);
        while self.history.len() > self.max_size {
            self.history.pop_front();
        }
    }

    /// Pop the most recent state
    pub fn pop(&mut self) -> Option<State> {
        self.history.pop_back()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

impl Default for StateHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

/// What the host has to render for the current step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    /// Show a dialogue line and wait for the player to continue
    Dialogue { speaker: Speaker, text: String },
    /// Show a prompt and its options; answer with [`SceneSession::choose`]
    Choice {
        prompt: String,
        options: Vec<ChoiceOption>,
    },
    /// Mount the named minigame, then continue onto its suspension point
    MountGame { game: GameId },
    /// Waiting for the mounted minigame; answer with
    /// [`SceneSession::report_result`]
    AwaitingResult { var: Variable },
    /// A jump marker the session follows on continue
    Jump { next: StepIndex },
    /// The narrative is over
    Ended,
}

impl Presentation {
    fn of(step: &Step) -> Self {
        match step {
            Step::Say { speaker, text } => Presentation::Dialogue {
                speaker: *speaker,
                text: text.clone(),
            },
            Step::Choice { prompt, options } => Presentation::Choice {
                prompt: prompt.clone(),
                options: options.clone(),
            },
            Step::StartGame { game } => Presentation::MountGame { game: *game },
            Step::AwaitGameResult { to_var } => Presentation::AwaitingResult { var: *to_var },
            Step::Goto { next } => Presentation::Jump { next: *next },
            // `settle` never leaves the position on a branch.
            Step::BranchOnResult { .. } | Step::End => Presentation::Ended,
        }
    }

    pub fn is_ended(&self) -> bool {
        matches!(self, Presentation::Ended)
    }
}

/// Host protocol violations; the rejected operation is not applied
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("step {position} is a choice; pick an option instead of continuing")]
    ChoiceRequired { position: StepIndex },

    #[error("step {position} waits for a game result; report one instead of continuing")]
    ResultRequired { position: StepIndex },

    #[error("step {position} is a {kind} step, not a choice")]
    NotAtChoice { position: StepIndex, kind: StepKind },

    #[error("choice {index} does not exist at step {position} ({available} options)")]
    ChoiceOutOfRange {
        position: StepIndex,
        index: usize,
        available: usize,
    },

    #[error("step {position} is a {kind} step, not waiting for a game result")]
    NotAwaitingResult { position: StepIndex, kind: StepKind },

    #[error("branch steps keep jumping to each other starting at step {position}")]
    BranchCycle { position: StepIndex },
}

/// A narrative session driven by a host
#[derive(Debug, Clone)]
pub struct SceneSession {
    director: Director,
    history: StateHistory,
}

impl SceneSession {
    pub fn new(script: Script) -> Self {
        Self::from_director(Director::new(script))
    }

    pub fn from_director(director: Director) -> Self {
        Self {
            director,
            history: StateHistory::default(),
        }
    }

    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.history = StateHistory::new(depth);
        self
    }

    pub fn director(&self) -> &Director {
        &self.director
    }

    pub fn state(&self) -> &State {
        self.director.state()
    }

    pub fn is_ended(&self) -> bool {
        self.director.is_ended()
    }

    /// Resolve pending branches and describe the current step
    pub fn present(&mut self) -> Result<Presentation, SessionError> {
        self.settle()?;
        Ok(Presentation::of(self.director.current()))
    }

    /// The player asked to continue
    ///
    /// Dialogue and game markers advance by one, jump markers are followed,
    /// `end` stays put. Choices and suspension points refuse.
    pub fn proceed(&mut self) -> Result<Presentation, SessionError> {
        self.settle()?;
        let position = self.director.position();

        enum Move {
            Advance,
            Jump(StepIndex),
            Stay,
        }

        let movement = match self.director.current() {
            Step::Say { .. } | Step::StartGame { .. } => Move::Advance,
            Step::Goto { next } => Move::Jump(*next),
            Step::End | Step::BranchOnResult { .. } => Move::Stay,
            Step::Choice { .. } => return Err(SessionError::ChoiceRequired { position }),
            Step::AwaitGameResult { .. } => {
                return Err(SessionError::ResultRequired { position });
            }
        };

        match movement {
            Move::Advance => {
                self.remember();
                self.director.advance();
            }
            Move::Jump(next) => {
                self.remember();
                self.director.goto(next);
            }
            Move::Stay => {}
        }

        self.present()
    }

    /// Pick option `index` of the current choice
    pub fn choose(&mut self, index: usize) -> Result<Presentation, SessionError> {
        self.settle()?;
        let position = self.director.position();

        let next = match self.director.current() {
            Step::Choice { options, .. } => match options.get(index) {
                Some(option) => option.next,
                None => {
                    return Err(SessionError::ChoiceOutOfRange {
                        position,
                        index,
                        available: options.len(),
                    });
                }
            },
            other => {
                return Err(SessionError::NotAtChoice {
                    position,
                    kind: other.kind(),
                });
            }
        };

        self.log(format_args!("[Choose] option {} at {} -> {}", index, position, next));
        self.remember();
        self.director.goto(next);
        self.present()
    }

    /// Report the result of the minigame the script is waiting for
    ///
    /// Records the result, leaves the suspension point and resolves the
    /// branch that usually follows it.
    pub fn report_result(
        &mut self,
        result: ResultCategory,
    ) -> Result<Presentation, SessionError> {
        self.settle()?;
        let position = self.director.position();

        let kind = self.director.current().kind();
        if kind != StepKind::AwaitGameResult {
            return Err(SessionError::NotAwaitingResult { position, kind });
        }

        self.log(format_args!("[Result] {} reported at {}", result, position));
        self.remember();
        self.director.set_result(result);
        self.director.advance();
        self.present()
    }

    /// Undo the last successful operation
    ///
    /// Returns what to render for the restored state, or `None` when there
    /// is nothing to undo.
    pub fn undo(&mut self) -> Option<Result<Presentation, SessionError>> {
        let previous = self.history.pop()?;
        self.log(format_args!(
            "[Undo] {} -> {}",
            self.director.position(),
            previous.position
        ));
        self.director.replace_state(previous);
        Some(self.present())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Follow branch steps until the position rests on something else
    fn settle(&mut self) -> Result<(), SessionError> {
        let start = self.director.position();
        // Each resolution lands somewhere new unless branches form a loop.
        let limit = self.director.script().len() + 1;
        for _ in 0..limit {
            if !self.director.maybe_auto_advance() {
                return Ok(());
            }
        }

        if self.director.current().kind() == StepKind::BranchOnResult {
            return Err(SessionError::BranchCycle { position: start });
        }
        Ok(())
    }

    fn remember(&mut self) {
        self.history.push(self.director.state().clone());
    }

    fn log(&self, args: std::fmt::Arguments<'_>) {
        debug::log(
            self.director.debug_config(),
            DebugCategory::Host,
            LogLevel::Debug,
            args,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_pop() {
        let mut history = StateHistory::new(10);
        history.push(State::new());
        history.push(State::at(5));

        assert_eq!(history.depth(), 2);
        assert!(history.can_undo());
        assert_eq!(history.pop().map(|s| s.position), Some(5));
        assert_eq!(history.pop().map(|s| s.position), Some(0));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_max_size() {
        let mut history = StateHistory::new(3);
        for i in 0..5 {
            history.push(State::at(i));
        }

        // Should only keep the last 3
        assert_eq!(history.depth(), 3);
        assert_eq!(history.pop().map(|s| s.position), Some(4));
        assert_eq!(history.pop().map(|s| s.position), Some(3));
        assert_eq!(history.pop().map(|s| s.position), Some(2));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_zero_depth_keeps_nothing() {
        let mut history = StateHistory::new(0);
        history.push(State::at(1));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_clear() {
        let mut history = StateHistory::default();
        history.push(State::new());
        history.push(State::new());
        history.clear();
        assert_eq!(history.depth(), 0);
    }

    #[test]
    fn settle_detects_branch_cycle() {
        let script = Script::new(vec![
            Step::BranchOnResult {
                var: Variable::LastResult,
                next_by_result: [(ResultCategory::Lose, 1)].into_iter().collect(),
            },
            Step::BranchOnResult {
                var: Variable::LastResult,
                next_by_result: [(ResultCategory::Lose, 0)].into_iter().collect(),
            },
        ]);
        let mut director = Director::new(script);
        director.set_result(ResultCategory::Lose);
        let mut session = SceneSession::from_director(director);

        assert_eq!(
            session.present(),
            Err(SessionError::BranchCycle { position: 0 })
        );
    }

    #[test]
    fn chained_branches_settle_in_one_present() {
        let script = Script::new(vec![
            Step::BranchOnResult {
                var: Variable::LastResult,
                next_by_result: [(ResultCategory::Win, 2)].into_iter().collect(),
            },
            Step::say(Speaker::Narrator, "skipped"),
            Step::BranchOnResult {
                var: Variable::LastResult,
                next_by_result: [(ResultCategory::Win, 4)].into_iter().collect(),
            },
            Step::say(Speaker::Narrator, "skipped too"),
            Step::say(Speaker::Narrator, "landed"),
        ]);
        let mut director = Director::new(script);
        director.set_result(ResultCategory::Win);
        let mut session = SceneSession::from_director(director);

        assert_eq!(
            session.present(),
            Ok(Presentation::Dialogue {
                speaker: Speaker::Narrator,
                text: "landed".to_string(),
            })
        );
        assert_eq!(session.state().position, 4);
    }
}
