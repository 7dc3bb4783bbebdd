//! Sectionize heuristics configuration.

use serde::{Deserialize, Serialize};

/// Sectionize heuristics configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SectionizeConfig {
    /// Paragraphs this long or longer are never treated as section openers.
    /// Default: 400
    #[serde(default = "default_paragraph_limit")]
    pub paragraph_limit: usize,

    /// Number of dashes after a marker name.
    /// Default: 80
    #[serde(default = "default_marker_width")]
    pub marker_width: usize,
}

impl Default for SectionizeConfig {
    fn default() -> Self {
        Self {
            paragraph_limit: default_paragraph_limit(),
            marker_width: default_marker_width(),
        }
    }
}

impl SectionizeConfig {
    /// Build the marker line for a section name, e.g. `DISSENT-----...`.
    pub fn marker(&self, name: &str) -> String {
        format!("{}{}\n", name, "-".repeat(self.marker_width))
    }
}

fn default_paragraph_limit() -> usize {
    400
}

fn default_marker_width() -> usize {
    80
}
