//! Debug logging for director transitions
//!
//! Messages are filtered by category and level here, then handed to the
//! `log` facade under a per-category target such as
//! `scene_director::flow`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Environment variable that switches debug logging on by default
pub const DEBUG_ENV: &str = "SCENE_DIRECTOR_DEBUG";

/// Debug log level, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// All internal state changes
    Trace,
    /// Development debugging information
    Debug,
    /// Important state changes
    Info,
    /// Potential issues
    Warn,
    /// Error situations
    Error,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => log::Level::Trace,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}

/// Debug log category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebugCategory {
    /// Position changes
    Engine,
    /// Branch resolution
    Flow,
    /// Recorded results
    Variables,
    /// Host protocol (sessions, runner)
    Host,
}

impl DebugCategory {
    pub const ALL: [DebugCategory; 4] = [
        DebugCategory::Engine,
        DebugCategory::Flow,
        DebugCategory::Variables,
        DebugCategory::Host,
    ];

    /// `log` target used for this category
    pub fn target(&self) -> &'static str {
        match self {
            DebugCategory::Engine => "scene_director::engine",
            DebugCategory::Flow => "scene_director::flow",
            DebugCategory::Variables => "scene_director::variables",
            DebugCategory::Host => "scene_director::host",
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Enable debug logging
    pub enabled: bool,
    /// Minimum log level
    pub level: LogLevel,
    /// Enabled categories
    pub categories: HashSet<DebugCategory>,
}

impl Default for DebugConfig {
    fn default() -> Self {
        let mut categories = HashSet::new();
        categories.insert(DebugCategory::Engine);
        categories.insert(DebugCategory::Flow);

        Self {
            enabled: std::env::var(DEBUG_ENV).is_ok(),
            level: LogLevel::Debug,
            categories,
        }
    }
}

impl DebugConfig {
    /// Everything on, down to trace
    pub fn verbose() -> Self {
        Self {
            enabled: true,
            level: LogLevel::Trace,
            categories: DebugCategory::ALL.into_iter().collect(),
        }
    }

    /// Nothing is ever emitted
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Whether a message of this category and level passes the filter
    pub fn allows(&self, category: DebugCategory, level: LogLevel) -> bool {
        self.enabled && level >= self.level && self.categories.contains(&category)
    }
}

/// Log a debug message
pub fn log(
    config: &DebugConfig,
    category: DebugCategory,
    level: LogLevel,
    args: fmt::Arguments<'_>,
) {
    if !config.allows(category, level) {
        return;
    }

    log::log!(target: category.target(), log::Level::from(level), "{}", args);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_config_default_categories() {
        let config = DebugConfig::default();
        assert!(!config.enabled || std::env::var(DEBUG_ENV).is_ok());
        assert!(config.categories.contains(&DebugCategory::Engine));
        assert!(config.categories.contains(&DebugCategory::Flow));
        assert!(!config.categories.contains(&DebugCategory::Host));
    }

    #[test]
    fn allows_filters_by_level_and_category() {
        let mut config = DebugConfig::verbose();
        config.level = LogLevel::Info;
        config.categories.remove(&DebugCategory::Host);

        assert!(config.allows(DebugCategory::Flow, LogLevel::Warn));
        assert!(config.allows(DebugCategory::Flow, LogLevel::Info));
        assert!(!config.allows(DebugCategory::Flow, LogLevel::Debug));
        assert!(!config.allows(DebugCategory::Host, LogLevel::Error));
    }

    #[test]
    fn disabled_config_allows_nothing() {
        let config = DebugConfig::disabled();
        for category in DebugCategory::ALL {
            assert!(!config.allows(category, LogLevel::Error));
        }
    }
}
