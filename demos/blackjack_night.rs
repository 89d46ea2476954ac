//! Blackjack night: drives a scene script with a scripted terminal host
//!
//! Run with `cargo run --example blackjack_night`. Choices always pick the
//! first option and minigames report from a fixed rotation, so the run is
//! reproducible.

use async_trait::async_trait;
use log::LevelFilter;
use scene_director::{
    ChoiceOption, GameId, ResultCategory, RunOutcome, RunnerConfig, SceneHost, SceneSession,
    Speaker, cli, parser, run_scene,
};
use std::path::Path;
use std::time::Duration;

struct TerminalHost {
    rotation: Vec<ResultCategory>,
    played: usize,
}

#[async_trait]
impl SceneHost for TerminalHost {
    async fn show_line(&mut self, speaker: &Speaker, text: &str) -> anyhow::Result<()> {
        println!("{}: {}", speaker, text);
        Ok(())
    }

    async fn choose(&mut self, prompt: &str, options: &[ChoiceOption]) -> anyhow::Result<usize> {
        println!("--- {} ---", prompt);
        for (i, option) in options.iter().enumerate() {
            println!("{}. {}", i + 1, option.label);
        }
        println!("> 1");
        Ok(0)
    }

    async fn play_game(&mut self, game: GameId) -> anyhow::Result<Option<ResultCategory>> {
        let result = self.rotation[self.played % self.rotation.len()];
        self.played += 1;
        tokio::time::sleep(Duration::from_millis(200)).await;
        println!("[Minigame: {} -> {}]", game, result);
        Ok(Some(result))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::logger::init(LevelFilter::Info)?;

    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scripts/blackjack_night.json");
    let script = parser::load(&path).await?;

    let mut session = SceneSession::new(script);
    let mut host = TerminalHost {
        rotation: vec![ResultCategory::Draw, ResultCategory::Completed],
        played: 0,
    };
    let config = RunnerConfig {
        game_timeout: Some(Duration::from_secs(5)),
        ..RunnerConfig::default()
    };

    let summary = run_scene(&mut session, &mut host, &config).await?;
    match summary.outcome {
        RunOutcome::Finished => println!("== THE END == ({} steps)", summary.transitions),
        RunOutcome::Abandoned { game } => println!("{} was abandoned", game),
    }

    Ok(())
}
