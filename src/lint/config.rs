//! Lint configuration

use serde::{Deserialize, Serialize};

/// Lint configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LintConfig {
    /// Jump target checks
    pub references: ReferencesConfig,
    /// Minigame protocol checks
    pub protocol: ProtocolConfig,
    /// Flow analysis
    pub flow: FlowConfig,
    /// Dialogue quality checks
    pub quality: QualityConfig,
}

/// Reference checking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferencesConfig {
    /// Enable reference checks
    pub enabled: bool,
    /// Check that jump targets address a real step
    pub check_targets: bool,
}

impl Default for ReferencesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            check_targets: true,
        }
    }
}

/// Minigame protocol configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Enable protocol checks
    pub enabled: bool,
    /// Report branches whose mapping cannot match anything
    pub report_empty_branches: bool,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            report_empty_branches: true,
        }
    }
}

/// Flow analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Enable flow analysis
    pub enabled: bool,
    /// Report steps no path from the start reaches
    pub check_unreachable: bool,
    /// Report scripts with no way to finish
    pub check_termination: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            check_unreachable: true,
            check_termination: true,
        }
    }
}

/// Quality checking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Enable quality checks
    pub enabled: bool,
    /// Maximum text length (characters)
    pub max_text_length: usize,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_text_length: 200,
        }
    }
}
