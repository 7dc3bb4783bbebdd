//! Stage flags configuration.
//!
//! This module contains the `StagesConfig` struct which switches the
//! optional post-processing stages and debug artifacts on and off.

use serde::{Deserialize, Serialize};

/// Stage flags configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StagesConfig {
    /// Splice footnote bodies into their references.
    /// Default: true
    #[serde(default = "default_true")]
    pub footnotes: bool,

    /// Insert section marker lines.
    /// Default: true
    #[serde(default = "default_true")]
    pub sectionize: bool,

    /// Write the token stream next to the output.
    /// Default: false
    #[serde(default)]
    pub token_log: bool,
}

impl Default for StagesConfig {
    fn default() -> Self {
        Self {
            footnotes: true,
            sectionize: true,
            token_log: false,
        }
    }
}

impl StagesConfig {
    /// Only lex and parse; skip every post-processing stage.
    pub fn core_only() -> Self {
        Self {
            footnotes: false,
            sectionize: false,
            token_log: false,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stages() {
        let stages = StagesConfig::default();
        assert!(stages.footnotes);
        assert!(stages.sectionize);
        assert!(!stages.token_log);
    }

    #[test]
    fn test_core_only() {
        let stages = StagesConfig::core_only();
        assert!(!stages.footnotes);
        assert!(!stages.sectionize);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let stages: StagesConfig = toml::from_str("TokenLog = true").unwrap();
        assert!(stages.token_log);
        assert!(stages.footnotes);
    }
}
