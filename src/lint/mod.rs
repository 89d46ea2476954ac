//! Lint module for script authoring checks
//!
//! The director accepts any script and degrades gracefully at runtime
//! (out-of-range jumps read as `end`, unmapped results fall through). The
//! linter reports the places where that graceful degradation is probably a
//! content bug:
//! - Jump targets outside the script
//! - Game protocol mistakes (await without start, branch on unwritten vars)
//! - Unreachable steps
//! - Dialogue quality

use crate::types::script::Script;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod checks;
pub mod config;

/// Lint severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LintLevel {
    /// Error: must be fixed
    Error,
    /// Warning: should be reviewed
    Warning,
    /// Info: for your information
    Info,
}

impl fmt::Display for LintLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintLevel::Error => f.write_str("error"),
            LintLevel::Warning => f.write_str("warning"),
            LintLevel::Info => f.write_str("info"),
        }
    }
}

/// A lint issue found in the script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintIssue {
    /// Severity level
    pub level: LintLevel,
    /// Issue message
    pub message: String,
    /// Index of the offending step, if the issue is tied to one
    pub index: Option<usize>,
    /// Category of the issue
    pub category: String,
}

impl LintIssue {
    pub fn at(level: LintLevel, category: &str, index: usize, message: String) -> Self {
        Self {
            level,
            message,
            index: Some(index),
            category: category.to_string(),
        }
    }

    pub fn global(level: LintLevel, category: &str, message: String) -> Self {
        Self {
            level,
            message,
            index: None,
            category: category.to_string(),
        }
    }
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(
                f,
                "{} [{}] step {}: {}",
                self.level, self.category, index, self.message
            ),
            None => write!(f, "{} [{}] {}", self.level, self.category, self.message),
        }
    }
}

/// Result of linting a script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LintResult {
    /// Issues found
    pub issues: Vec<LintIssue>,
    /// Number of errors
    pub error_count: usize,
    /// Number of warnings
    pub warning_count: usize,
    /// Number of info messages
    pub info_count: usize,
}

impl LintResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&mut self, issue: LintIssue) {
        match issue.level {
            LintLevel::Error => self.error_count += 1,
            LintLevel::Warning => self.warning_count += 1,
            LintLevel::Info => self.info_count += 1,
        }
        self.issues.push(issue);
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Lint a script with default configuration
pub fn lint(script: &Script) -> LintResult {
    let config = config::LintConfig::default();
    lint_with_config(script, &config)
}

/// Lint a script with custom configuration
pub fn lint_with_config(script: &Script, config: &config::LintConfig) -> LintResult {
    let mut result = LintResult::new();

    if config.references.enabled {
        checks::references::check(script, &mut result, config);
    }

    if config.protocol.enabled {
        checks::protocol::check(script, &mut result, config);
    }

    if config.flow.enabled {
        checks::flow::check(script, &mut result, config);
    }

    if config.quality.enabled {
        checks::quality::check(script, &mut result, config);
    }

    result
}
