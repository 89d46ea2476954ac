//! Async scene runner
//!
//! Drives a [`SceneSession`] to its end against a [`SceneHost`]. The host
//! renders lines, collects choices and runs minigames; the runner keeps the
//! protocol: a game is mounted at `startGame`, the script moves onto its
//! `awaitGameResult` step, and only the game's result moves it further.

use crate::session::{Presentation, SceneSession, SessionError};
use crate::types::{
    script::{ChoiceOption, GameId, ResultCategory, Speaker, StepIndex, StepKind},
    state::State,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Presentation layer the runner talks to
#[async_trait]
pub trait SceneHost: Send {
    /// Show a line and return once the player wants to continue
    async fn show_line(&mut self, speaker: &Speaker, text: &str) -> anyhow::Result<()>;

    /// Show a prompt and return the index of the picked option
    async fn choose(&mut self, prompt: &str, options: &[ChoiceOption]) -> anyhow::Result<usize>;

    /// Mount and play a minigame
    ///
    /// `None` means the game was abandoned without a result.
    async fn play_game(&mut self, game: GameId) -> anyhow::Result<Option<ResultCategory>>;
}

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Time limit for a single minigame
    pub game_timeout: Option<Duration>,
    /// Result recorded when a minigame runs out of time
    pub timeout_result: ResultCategory,
    /// Upper bound on rendered steps before giving up
    pub max_transitions: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            game_timeout: None,
            timeout_result: ResultCategory::Lose,
            max_transitions: 10_000,
        }
    }
}

/// How a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The script reached `end`
    Finished,
    /// A minigame ended without a result; the director is parked on its
    /// suspension point
    Abandoned { game: GameId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    /// Number of steps rendered
    pub transitions: usize,
    pub final_state: State,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Host(#[from] anyhow::Error),

    #[error("minigame {game} was mounted at step {position} but the next step is {found}, not awaitGameResult")]
    MissingSuspension {
        game: GameId,
        position: StepIndex,
        found: StepKind,
    },

    #[error("step {position} waits for a game result but no game was mounted")]
    NothingMounted { position: StepIndex },

    #[error("gave up after {limit} steps without reaching the end")]
    TransitionLimit { limit: usize },
}

/// Run the session until the script ends or a game is abandoned
pub async fn run_scene<H>(
    session: &mut SceneSession,
    host: &mut H,
    config: &RunnerConfig,
) -> Result<RunSummary, RunnerError>
where
    H: SceneHost + ?Sized,
{
    let mut transitions = 0usize;

    loop {
        let presentation = session.present()?;
        if !presentation.is_ended() {
            if transitions >= config.max_transitions {
                return Err(RunnerError::TransitionLimit {
                    limit: config.max_transitions,
                });
            }
            transitions += 1;
        }

        match presentation {
            Presentation::Ended => {
                log::info!(
                    "scene finished at step {} after {} transitions",
                    session.state().position,
                    transitions
                );
                return Ok(summary(session, RunOutcome::Finished, transitions));
            }
            Presentation::Dialogue { speaker, text } => {
                host.show_line(&speaker, &text).await?;
                session.proceed()?;
            }
            Presentation::Choice { prompt, options } => {
                let index = host.choose(&prompt, &options).await?;
                log::debug!("host picked option {} of '{}'", index, prompt);
                session.choose(index)?;
            }
            Presentation::MountGame { game } => {
                let mounted_at = session.state().position;
                session.proceed()?;

                let found = session.director().current().kind();
                if found != StepKind::AwaitGameResult {
                    return Err(RunnerError::MissingSuspension {
                        game,
                        position: mounted_at,
                        found,
                    });
                }

                match play(host, game, config).await? {
                    Some(result) => {
                        log::debug!("{} finished with {}", game, result);
                        session.report_result(result)?;
                    }
                    None => {
                        log::info!(
                            "{} abandoned, parked at step {}",
                            game,
                            session.state().position
                        );
                        let outcome = RunOutcome::Abandoned { game };
                        return Ok(summary(session, outcome, transitions));
                    }
                }
            }
            Presentation::AwaitingResult { .. } => {
                return Err(RunnerError::NothingMounted {
                    position: session.state().position,
                });
            }
            Presentation::Jump { .. } => {
                session.proceed()?;
            }
        }
    }
}

async fn play<H>(
    host: &mut H,
    game: GameId,
    config: &RunnerConfig,
) -> Result<Option<ResultCategory>, RunnerError>
where
    H: SceneHost + ?Sized,
{
    let Some(limit) = config.game_timeout else {
        return Ok(host.play_game(game).await?);
    };

    match tokio::time::timeout(limit, host.play_game(game)).await {
        Ok(result) => Ok(result?),
        Err(_) => {
            log::warn!(
                "{} exceeded {:?}, recording {}",
                game,
                limit,
                config.timeout_result
            );
            Ok(Some(config.timeout_result))
        }
    }
}

fn summary(session: &SceneSession, outcome: RunOutcome, transitions: usize) -> RunSummary {
    RunSummary {
        outcome,
        transitions,
        final_state: session.state().clone(),
    }
}
