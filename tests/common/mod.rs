//! Shared fixtures for integration tests

#![allow(dead_code)]

use scene_director::{ChoiceOption, GameId, ResultCategory, Script, Speaker, Step, Variable};
use std::collections::BTreeMap;

/// Two rounds: a Blackjack match chosen at a prompt, then a round of Shots
pub fn director_script() -> Script {
    Script::new(vec![
        // 0
        Step::say(Speaker::Ivan, "Pick a game."),
        // 1
        Step::Choice {
            prompt: "Choose:".to_string(),
            options: vec![ChoiceOption::new("Blackjack", 2), ChoiceOption::new("Shots", 6)],
        },
        // 2
        Step::StartGame {
            game: GameId::Blackjack,
        },
        // 3
        Step::AwaitGameResult {
            to_var: Variable::LastResult,
        },
        // 4
        Step::BranchOnResult {
            var: Variable::LastResult,
            next_by_result: BTreeMap::from([
                (ResultCategory::Win, 5),
                (ResultCategory::Lose, 6),
                (ResultCategory::Draw, 8),
            ]),
        },
        // 5
        Step::say(Speaker::Ivan, "You won at Blackjack."),
        // 6
        Step::say(Speaker::Ivan, "You lost at Blackjack."),
        // 7
        Step::Goto { next: 9 },
        // 8
        Step::say(Speaker::Ivan, "A draw? Boring."),
        // 9
        Step::say(Speaker::Ivan, "Shots time."),
        // 10
        Step::StartGame { game: GameId::Shots },
        // 11
        Step::AwaitGameResult {
            to_var: Variable::LastResult,
        },
        // 12
        Step::BranchOnResult {
            var: Variable::LastResult,
            next_by_result: BTreeMap::from([(ResultCategory::Completed, 13)]),
        },
        // 13
        Step::say(Speaker::Ivan, "Done with shots."),
        // 14
        Step::End,
    ])
}

pub fn end_only_script() -> Script {
    Script::new(vec![Step::End])
}

pub fn fixture_path(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
