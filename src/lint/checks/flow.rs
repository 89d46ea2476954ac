//! Flow analysis implementation

use crate::lint::config::LintConfig;
use crate::lint::{LintIssue, LintLevel, LintResult};
use crate::types::script::{Script, Step, StepIndex};
use std::collections::{HashSet, VecDeque};

/// Check flow issues (unreachable steps, scripts that cannot finish)
pub fn check(script: &Script, result: &mut LintResult, config: &LintConfig) {
    if script.is_empty() {
        return;
    }

    let reach = explore(script);

    if config.flow.check_unreachable {
        check_unreachable(script, &reach, result);
    }

    if config.flow.check_termination && !reach.can_finish {
        result.add_issue(LintIssue::global(
            LintLevel::Info,
            "flow",
            "no path from the start reaches an end step or runs off the script".to_string(),
        ));
    }
}

struct Reachability {
    reachable: HashSet<usize>,
    /// An `end` step or an out-of-range position is reachable
    can_finish: bool,
}

/// Positions the host can move to from `index`, following the session's
/// policy: continue on dialogue and game steps, follow gotos, pick any
/// option, take any branch arm or the fallthrough.
fn successors(index: usize, step: &Step) -> Vec<StepIndex> {
    let next = index as StepIndex + 1;
    match step {
        Step::Say { .. } | Step::StartGame { .. } | Step::AwaitGameResult { .. } => vec![next],
        Step::Choice { .. } | Step::Goto { .. } => step.targets(),
        Step::BranchOnResult { .. } => {
            let mut targets = step.targets();
            targets.push(next);
            targets
        }
        Step::End => Vec::new(),
    }
}

fn explore(script: &Script) -> Reachability {
    let mut reachable = HashSet::new();
    let mut can_finish = false;
    let mut queue = VecDeque::new();

    // Start from position 0
    queue.push_back(0usize);
    reachable.insert(0usize);

    while let Some(index) = queue.pop_front() {
        let step = &script.steps()[index];
        if matches!(step, Step::End) {
            can_finish = true;
            continue;
        }

        for target in successors(index, step) {
            match usize::try_from(target) {
                Ok(target) if target < script.len() => {
                    if reachable.insert(target) {
                        queue.push_back(target);
                    }
                }
                _ => can_finish = true,
            }
        }
    }

    Reachability {
        reachable,
        can_finish,
    }
}

fn check_unreachable(script: &Script, reach: &Reachability, result: &mut LintResult) {
    for (index, step) in script.steps().iter().enumerate() {
        // Stray end markers are harmless
        if reach.reachable.contains(&index) || matches!(step, Step::End) {
            continue;
        }
        result.add_issue(LintIssue::at(
            LintLevel::Warning,
            "flow",
            index,
            format!("unreachable {} step", step.kind()),
        ));
    }
}
