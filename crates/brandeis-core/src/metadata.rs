//! Document metadata shared by every processing stage.
//!
//! A [`Metadata`] value is created once per document and passed by `&mut`
//! reference from title extraction through the parser and into the
//! post-processing stages. It only offers operations that add information:
//! once a field is set it is never cleared, and one-time markers refuse a
//! second value.

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

/// Fields extracted from a document's title line.
///
/// For `Marbury v. Madison - 5 U.S. 137 (1803)`, `title` is
/// `Marbury v. Madison`, `number` is `5 U.S. 137`, and so on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseTitle {
    pub full_title: String,
    pub title: String,
    pub petitioner: String,
    pub respondent: String,
    pub number: String,
    pub volume: String,
    pub abbr: String,
    pub page: String,
    pub date: String,
}

/// Where the opinion's sections start, by paragraph index.
///
/// Syllabus, per curiam and opinion markers are placed once per document;
/// concurrences and dissents are placed once per justice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMarkers {
    #[serde(skip_serializing_if = "Option::is_none")]
    syllabus: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    per_curiam: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    opinion: Option<usize>,
    #[serde(default)]
    concurrence: Vec<usize>,
    #[serde(default)]
    dissent: Vec<usize>,
    #[serde(default)]
    concurrence_justices: Vec<String>,
    #[serde(default)]
    dissent_justices: Vec<String>,
}

impl SectionMarkers {
    pub fn syllabus(&self) -> Option<usize> {
        self.syllabus
    }

    pub fn per_curiam(&self) -> Option<usize> {
        self.per_curiam
    }

    pub fn opinion(&self) -> Option<usize> {
        self.opinion
    }

    pub fn concurrence(&self) -> &[usize] {
        &self.concurrence
    }

    pub fn dissent(&self) -> &[usize] {
        &self.dissent
    }

    pub fn concurrence_justices(&self) -> &[String] {
        &self.concurrence_justices
    }

    pub fn dissent_justices(&self) -> &[String] {
        &self.dissent_justices
    }

    /// Record the syllabus paragraph. Returns false if already seen.
    pub fn mark_syllabus(&mut self, paragraph: usize) -> bool {
        set_once(&mut self.syllabus, paragraph)
    }

    /// Record the per curiam paragraph. Returns false if already seen.
    pub fn mark_per_curiam(&mut self, paragraph: usize) -> bool {
        set_once(&mut self.per_curiam, paragraph)
    }

    /// Record the opinion paragraph. Returns false if already seen.
    pub fn mark_opinion(&mut self, paragraph: usize) -> bool {
        set_once(&mut self.opinion, paragraph)
    }

    /// Record a concurrence by `justice` starting at `paragraph`.
    ///
    /// Returns false if this justice already has a concurrence marker.
    pub fn add_concurrence(&mut self, justice: &str, paragraph: usize) -> bool {
        if self.concurrence_justices.iter().any(|j| j == justice) {
            return false;
        }
        self.concurrence_justices.push(justice.to_string());
        self.concurrence.push(paragraph);
        true
    }

    /// Record a dissent by `justice` starting at `paragraph`.
    ///
    /// Returns false if this justice already has a dissent marker.
    pub fn add_dissent(&mut self, justice: &str, paragraph: usize) -> bool {
        if self.dissent_justices.iter().any(|j| j == justice) {
            return false;
        }
        self.dissent_justices.push(justice.to_string());
        self.dissent.push(paragraph);
        true
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(value);
    true
}

/// Metadata for one document.
///
/// # Example
///
/// ```
/// use brandeis_core::Metadata;
///
/// let mut meta = Metadata::new();
/// meta.extend_sections(["Syllabus", "Opinion"]);
/// meta.record_footnote(1, 3);
/// assert_eq!(meta.sections(), ["Syllabus", "Opinion"]);
/// assert_eq!(meta.max_footnote(1), Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pdf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pdf_filename: Option<String>,
    #[serde(default)]
    sections: Vec<String>,
    /// Highest footnote number per section, keyed by section number
    #[serde(default)]
    max_footnote: BTreeMap<String, u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<CaseTitle>,
    #[serde(default)]
    markers: SectionMarkers,
}

impl Metadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create metadata pre-populated with title fields.
    pub fn with_title(title: CaseTitle) -> Self {
        Self {
            title: Some(title),
            ..Self::default()
        }
    }

    pub fn title(&self) -> Option<&CaseTitle> {
        self.title.as_ref()
    }

    /// Set the title fields unless they are already set.
    pub fn set_title(&mut self, title: CaseTitle) -> bool {
        if let Some(existing) = &self.title {
            warn!(
                "Ignoring second title {:?}, keeping {:?}",
                title.full_title, existing.full_title
            );
            return false;
        }
        self.title = Some(title);
        true
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Record the scraper's source URL unless one is already recorded.
    pub fn set_source(&mut self, url: &str) -> bool {
        set_once(&mut self.source, url.to_string())
    }

    pub fn pdf(&self) -> Option<&str> {
        self.pdf.as_deref()
    }

    pub fn pdf_filename(&self) -> Option<&str> {
        self.pdf_filename.as_deref()
    }

    /// Record the opinion's PDF URL and derive its file name.
    ///
    /// Only the first PDF link is kept.
    pub fn set_pdf(&mut self, url: &str) -> bool {
        if !set_once(&mut self.pdf, url.to_string()) {
            return false;
        }
        let name = url.rsplit('/').next().unwrap_or(url);
        if !name.is_empty() {
            self.pdf_filename = Some(name.to_string());
        }
        true
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Append section names, preserving order.
    pub fn extend_sections<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sections.extend(names.into_iter().map(Into::into));
    }

    /// Note that footnote `number` exists in `section`.
    pub fn record_footnote(&mut self, section: u32, number: u32) {
        let max = self.max_footnote.entry(section.to_string()).or_insert(0);
        if number > *max {
            *max = number;
        }
    }

    /// Highest footnote number seen in `section`.
    pub fn max_footnote(&self, section: u32) -> Option<u32> {
        self.max_footnote.get(&section.to_string()).copied()
    }

    /// All `(section, max footnote)` pairs in numeric section order.
    pub fn footnote_sections(&self) -> Vec<(u32, u32)> {
        let mut pairs: Vec<(u32, u32)> = self
            .max_footnote
            .iter()
            .filter_map(|(section, max)| section.parse().ok().map(|s| (s, *max)))
            .collect();
        pairs.sort_unstable();
        pairs
    }

    pub fn markers(&self) -> &SectionMarkers {
        &self.markers
    }

    pub fn markers_mut(&mut self) -> &mut SectionMarkers {
        &mut self.markers
    }
}
