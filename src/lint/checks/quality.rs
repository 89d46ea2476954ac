//! Quality checking implementation

use crate::lint::config::LintConfig;
use crate::lint::{LintIssue, LintLevel, LintResult};
use crate::types::script::{Script, Step};

/// Check dialogue and prompt text
pub fn check(script: &Script, result: &mut LintResult, config: &LintConfig) {
    for (index, step) in script.steps().iter().enumerate() {
        match step {
            Step::Say { text, .. } => check_text(index, "dialogue", text, result, config),
            Step::Choice { prompt, options } => {
                check_text(index, "prompt", prompt, result, config);
                for option in options {
                    if option.label.trim().is_empty() {
                        result.add_issue(LintIssue::at(
                            LintLevel::Warning,
                            "quality",
                            index,
                            format!("option leading to {} has an empty label", option.next),
                        ));
                    }
                }
            }
            _ => {}
        }
    }
}

fn check_text(
    index: usize,
    what: &str,
    text: &str,
    result: &mut LintResult,
    config: &LintConfig,
) {
    if text.trim().is_empty() {
        result.add_issue(LintIssue::at(
            LintLevel::Warning,
            "quality",
            index,
            format!("empty {}", what),
        ));
        return;
    }

    let length = text.chars().count();
    if length > config.quality.max_text_length {
        result.add_issue(LintIssue::at(
            LintLevel::Warning,
            "quality",
            index,
            format!(
                "{} is {} characters long (threshold: {})",
                what, length, config.quality.max_text_length
            ),
        ));
    }
}
