//! # scene-director
//!
//! A small interpreter for linear scene scripts with choices, jumps and
//! minigame rounds whose results pick the next branch.
//!
//! The library is split in layers:
//! - [`types`]: the script model, the director state and reducer actions
//! - [`runtime`]: the pure reducer and branch resolution
//! - [`director`]: the host-facing interpreter bound to one script
//! - [`session`]: a step-aware wrapper with undo for interactive hosts
//! - [`runner`]: an async loop that drives a session against a [`SceneHost`]
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_director::{parse_script, Presentation, ResultCategory, SceneSession};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let script = parse_script(r#"[
//!     { "kind": "say", "speaker": "Ivan", "text": "Pick a game." },
//!     { "kind": "startGame", "game": "Blackjack" },
//!     { "kind": "awaitGameResult", "toVar": "lastResult" },
//!     { "kind": "branchOnResult", "var": "lastResult", "nextByResult": { "win": 5 } },
//!     { "kind": "say", "speaker": "Ivan", "text": "Too bad." },
//!     { "kind": "say", "speaker": "Ivan", "text": "You won!" },
//!     { "kind": "end" }
//! ]"#)?;
//!
//! let mut session = SceneSession::new(script);
//! assert!(matches!(session.present()?, Presentation::Dialogue { .. }));
//!
//! // Continue past the line; the host mounts the game
//! assert!(matches!(session.proceed()?, Presentation::MountGame { .. }));
//! assert!(matches!(session.proceed()?, Presentation::AwaitingResult { .. }));
//!
//! // The game reports a win and the branch is taken
//! match session.report_result(ResultCategory::Win)? {
//!     Presentation::Dialogue { text, .. } => assert_eq!(text, "You won!"),
//!     other => panic!("unexpected {:?}", other),
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod director;
pub mod lint;
pub mod parser;
pub mod runner;
pub mod runtime;
pub mod session;
pub mod storage;
pub mod types;

pub use director::Director;
pub use parser::{ParseError, parse as parse_script};
pub use runner::{RunOutcome, RunSummary, RunnerConfig, RunnerError, SceneHost, run_scene};
pub use runtime::debug::DebugConfig;
pub use session::{Presentation, SceneSession, SessionError};
pub use storage::{load, save};
pub use types::{
    Action, ChoiceOption, GameId, ResultCategory, Script, Speaker, State, Step, StepIndex,
    StepKind, Variable,
};

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"[
        { "kind": "say", "speaker": "Ivan", "text": "Pick a game." },
        { "kind": "choice", "prompt": "Choose:", "options": [
            { "label": "Blackjack", "next": 2 },
            { "label": "Leave", "next": 4 }
        ] },
        { "kind": "startGame", "game": "Blackjack" },
        { "kind": "awaitGameResult", "toVar": "lastResult" },
        { "kind": "end" }
    ]"#;

    #[test]
    fn test_parse_and_direct() {
        let script = parse_script(SCRIPT).unwrap();
        let mut director = Director::new(script);

        assert_eq!(director.current(), &Step::say(Speaker::Ivan, "Pick a game."));
        director.advance();
        assert_eq!(director.current().kind(), StepKind::Choice);

        director.goto(2);
        assert_eq!(
            director.current(),
            &Step::StartGame {
                game: GameId::Blackjack
            }
        );
    }

    #[test]
    fn test_session_choice_leads_to_end() {
        let mut session = SceneSession::new(parse_script(SCRIPT).unwrap());
        session.present().unwrap();
        session.proceed().unwrap();

        let presentation = session.choose(1).unwrap();
        assert_eq!(presentation, Presentation::Ended);
        assert!(session.is_ended());
    }

    #[test]
    fn test_save_and_resume() {
        let script = parse_script(SCRIPT).unwrap();
        let mut director = Director::new(script.clone());
        director.goto(3);
        director.set_result(ResultCategory::Draw);

        let bytes = save(&script, director.state()).unwrap();
        let restored = Director::restore(script.clone(), load(&script, &bytes).unwrap());

        assert_eq!(restored.state(), director.state());
        assert_eq!(restored.state().last_result(), Some(ResultCategory::Draw));
    }
}
