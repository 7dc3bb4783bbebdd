//! Section markers.
//!
//! Scans the paragraphs of the converted opinion for the sentences that open
//! its parts (syllabus, per curiam, the opinion of the Court, each
//! concurrence and dissent) and puts a marker line in front of them.

use std::sync::LazyLock;

use brandeis_config::SectionizeConfig;
use brandeis_core::{Metadata, SectionMarkers};
use log::{debug, warn};
use regex::Regex;

static CONCURRING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i),\sconcurring(\.|\z)").unwrap());

static DISSENTING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i),\sdissenting(\.|\z)").unwrap());

/// The sentence naming the justices, up to `, concurring`
static CONCURRING_SENTENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\.|\A)(?P<justices>.*?),\sconcurring(\.|\z)").unwrap()
});

static DISSENTING_SENTENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\.|\A)(?P<justices>.*?),\sdissenting(\.|\z)").unwrap()
});

/// First small-caps name in a sentence, without its title
static JUSTICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{{2}sc\|(?:(?:Mr\.\s)?(?:Chief\s)?Justice\s)?(?P<justice>.*?)\}{2}").unwrap()
});

/// Kind of separate writing a paragraph opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Writing {
    Concurrence,
    Dissent,
}

/// Insert section markers and record where each section starts.
///
/// Paragraphs are separated by blank lines. Only paragraphs shorter than
/// `config.paragraph_limit` characters are considered; the first matching
/// test wins, in this order: mentions `syllabus`, ends a sentence with
/// `, concurring`, ends a sentence with `, dissenting`, mentions
/// `per curiam`, mentions `delivered the opinion`. Each marker is placed
/// once, except concurrences and dissents which are placed once per
/// justice.
pub fn sectionize(text: &str, config: &SectionizeConfig, metadata: &mut Metadata) -> String {
    let paragraphs: Vec<&str> = text.split("\n\n").collect();
    let mut out = Vec::with_capacity(paragraphs.len());

    for (index, paragraph) in paragraphs.iter().enumerate() {
        if paragraph.chars().count() < config.paragraph_limit {
            if let Some(name) = classify(paragraph, index, metadata.markers_mut()) {
                debug!("{} starts at paragraph {}", name, index);
                out.push(format!("{}{}", config.marker(name), paragraph));
                continue;
            }
        }
        out.push(paragraph.to_string());
    }

    out.join("\n\n")
}

/// The marker name for `paragraph`, if it opens a section not seen before.
fn classify(paragraph: &str, index: usize, markers: &mut SectionMarkers) -> Option<&'static str> {
    let lower = paragraph.to_lowercase();

    if lower.contains("syllabus") {
        markers.mark_syllabus(index).then_some("SYLLABUS")
    } else if CONCURRING_RE.is_match(paragraph) {
        separate_writing(paragraph, index, Writing::Concurrence, markers)
    } else if DISSENTING_RE.is_match(paragraph) {
        separate_writing(paragraph, index, Writing::Dissent, markers)
    } else if lower.contains("per curiam") {
        markers.mark_per_curiam(index).then_some("PER CURIAM")
    } else if lower.contains("delivered the opinion") {
        markers.mark_opinion(index).then_some("OPINION")
    } else {
        None
    }
}

fn separate_writing(
    paragraph: &str,
    index: usize,
    writing: Writing,
    markers: &mut SectionMarkers,
) -> Option<&'static str> {
    let sentence_re = match writing {
        Writing::Concurrence => &CONCURRING_SENTENCE_RE,
        Writing::Dissent => &DISSENTING_SENTENCE_RE,
    };
    let sentence = sentence_re.captures(paragraph)?.name("justices")?.as_str();

    let Some(justice) = JUSTICE_RE
        .captures(sentence)
        .and_then(|caps| caps.name("justice"))
        .map(|m| m.as_str())
    else {
        warn!("No justice named in {:?}", sentence);
        return None;
    };

    match writing {
        Writing::Concurrence => markers
            .add_concurrence(justice, index)
            .then_some("CONCURRENCE"),
        Writing::Dissent => markers.add_dissent(justice, index).then_some("DISSENT"),
    }
}
