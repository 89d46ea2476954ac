//! Jump target checking implementation

use crate::lint::config::LintConfig;
use crate::lint::{LintIssue, LintLevel, LintResult};
use crate::types::script::{Script, Step};

/// Check that explicit jumps land inside the script
pub fn check(script: &Script, result: &mut LintResult, config: &LintConfig) {
    if config.references.check_targets {
        check_targets(script, result);
    }
    check_choices(script, result);
}

fn check_targets(script: &Script, result: &mut LintResult) {
    for (index, step) in script.steps().iter().enumerate() {
        for target in step.targets() {
            if !script.contains(target) {
                result.add_issue(LintIssue::at(
                    LintLevel::Warning,
                    "references",
                    index,
                    format!(
                        "{} step targets {} outside 0..{}; it will read as end",
                        step.kind(),
                        target,
                        script.len()
                    ),
                ));
            }
        }
    }
}

fn check_choices(script: &Script, result: &mut LintResult) {
    for (index, step) in script.steps().iter().enumerate() {
        if let Step::Choice { options, .. } = step
            && options.is_empty()
        {
            result.add_issue(LintIssue::at(
                LintLevel::Error,
                "references",
                index,
                "choice has no options; the player can never leave it".to_string(),
            ));
        }
    }
}
