//! Link filtering configuration.
//!
//! Decides which `<a>` elements survive into the wikitext.

use serde::{Deserialize, Serialize};

/// Link filtering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LinksConfig {
    /// Href fragments identifying case-citation links, whose text is kept.
    /// Default: ["/cases/federal/us/"]
    #[serde(default = "default_case_paths")]
    pub case_paths: Vec<String>,

    /// Class marking page-number anchors.
    /// Default: "page-name"
    #[serde(default = "default_page_class")]
    pub page_class: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            case_paths: default_case_paths(),
            page_class: default_page_class(),
        }
    }
}

impl LinksConfig {
    /// Whether `href` points at an allow-listed case citation.
    pub fn is_case_link(&self, href: &str) -> bool {
        self.case_paths.iter().any(|path| href.contains(path.as_str()))
    }
}

fn default_case_paths() -> Vec<String> {
    vec!["/cases/federal/us/".to_string()]
}

fn default_page_class() -> String {
    "page-name".to_string()
}
