//! Minigame protocol checking implementation
//!
//! A game round is authored as `startGame`, `awaitGameResult`, then usually
//! `branchOnResult`. The director does not enforce that shape; these checks
//! point out scripts that break it.

use crate::lint::config::LintConfig;
use crate::lint::{LintIssue, LintLevel, LintResult};
use crate::types::script::{Script, Step};
use std::collections::HashSet;

/// Check the start/await/branch shape of game rounds
pub fn check(script: &Script, result: &mut LintResult, config: &LintConfig) {
    check_rounds(script, result);
    check_branch_variables(script, result, config);
}

fn check_rounds(script: &Script, result: &mut LintResult) {
    let steps = script.steps();
    for (index, step) in steps.iter().enumerate() {
        match step {
            Step::StartGame { game } => {
                let followed_by_await = matches!(
                    steps.get(index + 1),
                    Some(Step::AwaitGameResult { .. })
                );
                if !followed_by_await {
                    result.add_issue(LintIssue::at(
                        LintLevel::Warning,
                        "protocol",
                        index,
                        format!("{} is started but nothing waits for its result", game),
                    ));
                }
            }
            Step::AwaitGameResult { .. } => {
                let preceded_by_start = index
                    .checked_sub(1)
                    .and_then(|previous| steps.get(previous))
                    .is_some_and(|previous| matches!(previous, Step::StartGame { .. }));
                if !preceded_by_start {
                    result.add_issue(LintIssue::at(
                        LintLevel::Warning,
                        "protocol",
                        index,
                        "waits for a game result but no game is started right before it"
                            .to_string(),
                    ));
                }
            }
            _ => {}
        }
    }
}

fn check_branch_variables(script: &Script, result: &mut LintResult, config: &LintConfig) {
    let written: HashSet<_> = script
        .steps()
        .iter()
        .filter_map(|step| match step {
            Step::AwaitGameResult { to_var } => Some(*to_var),
            _ => None,
        })
        .collect();

    for (index, step) in script.steps().iter().enumerate() {
        let Step::BranchOnResult {
            var,
            next_by_result,
        } = step
        else {
            continue;
        };

        if !written.contains(var) {
            result.add_issue(LintIssue::at(
                LintLevel::Warning,
                "protocol",
                index,
                format!("branches on {} but no step awaits a result into it", var),
            ));
        }

        if config.protocol.report_empty_branches && next_by_result.is_empty() {
            result.add_issue(LintIssue::at(
                LintLevel::Info,
                "protocol",
                index,
                "branch has no mapping and always falls through".to_string(),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn protocol_accepts_full_round() {
        let script = parse(
            r#"[
                { "kind": "startGame", "game": "Snake" },
                { "kind": "awaitGameResult", "toVar": "lastResult" },
                { "kind": "branchOnResult", "var": "lastResult", "nextByResult": { "completed": 3 } },
                { "kind": "end" }
            ]"#,
        )
        .unwrap();
        let mut result = LintResult::new();

        check(&script, &mut result, &LintConfig::default());

        assert!(result.is_clean(), "unexpected issues: {:?}", result.issues);
    }

    #[test]
    fn protocol_flags_await_without_start() {
        let script = parse(
            r#"[
                { "kind": "say", "speaker": "Narrator", "text": "..." },
                { "kind": "awaitGameResult", "toVar": "lastResult" }
            ]"#,
        )
        .unwrap();
        let mut result = LintResult::new();

        check(&script, &mut result, &LintConfig::default());

        assert_eq!(result.warning_count, 1);
        assert_eq!(result.issues[0].index, Some(1));
        assert!(result.issues[0].message.contains("no game is started"));
    }

    #[test]
    fn protocol_flags_start_without_await() {
        let script = parse(
            r#"[
                { "kind": "startGame", "game": "Keypad" },
                { "kind": "end" }
            ]"#,
        )
        .unwrap();
        let mut result = LintResult::new();

        check(&script, &mut result, &LintConfig::default());

        assert_eq!(result.warning_count, 1);
        assert!(result.issues[0].message.contains("Keypad"));
    }

    #[test]
    fn protocol_flags_branch_on_unwritten_variable() {
        let script = parse(
            r#"[ { "kind": "branchOnResult", "var": "lastResult", "nextByResult": {} } ]"#,
        )
        .unwrap();
        let mut result = LintResult::new();

        check(&script, &mut result, &LintConfig::default());

        assert_eq!(result.warning_count, 1);
        assert_eq!(result.info_count, 1);
        assert!(result.issues[1].message.contains("falls through"));
    }
}
