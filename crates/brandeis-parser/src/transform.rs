//! Token payload transformations.
//!
//! Free functions used by the dispatcher for the tokens whose output is
//! more than a constant string.

use std::sync::LazyLock;

use brandeis_config::LinksConfig;
use brandeis_core::{Metadata, Result};
use log::{debug, warn};
use regex::Regex;

use crate::entities::decode_html_entities;

// =============================================================================
// Regex patterns
// =============================================================================

static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"class="(.*?)""#).unwrap());

static HREF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"href="(.*?)""#).unwrap());

/// Footnote label in link text: `3`, `2/3` or `Footnote 2/3`
static FOOTNOTE_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:Footnote\s+)?(?:(\d+)/)?(\d+)").unwrap());

/// Opening or closing anchor tag inside a heading
static ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[aA](?:\s[^>]*)?>").unwrap());

/// Text between the tags of a supremelinks list
static FRAGMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">([^<]*)<").unwrap());

// =============================================================================
// Small caps
// =============================================================================

/// Title-case an uppercase run and wrap it in a small-caps template.
///
/// A letter is upper-cased when the character before it is not a letter and
/// lower-cased otherwise. Trailing whitespace stays outside the template.
///
/// # Example
///
/// ```
/// use brandeis_parser::smallcaps;
///
/// assert_eq!(smallcaps("FOO"), "{{sc|Foo}}");
/// assert_eq!(smallcaps("MR. JUSTICE HOLMES "), "{{sc|Mr. Justice Holmes}} ");
/// ```
pub fn smallcaps(text: &str) -> String {
    let body = text.trim_end();
    let trailing = &text[body.len()..];

    let mut titled = String::with_capacity(body.len());
    let mut prev_alpha = false;
    for c in body.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                titled.extend(c.to_lowercase());
            } else {
                titled.extend(c.to_uppercase());
            }
        } else {
            titled.push(c);
        }
        prev_alpha = c.is_alphabetic();
    }

    format!("{{{{sc|{}}}}}{}", titled, trailing)
}

// =============================================================================
// Links
// =============================================================================

/// Footnote reference parsed from link text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FootnoteLabel {
    /// Opinion section, 1 for the majority opinion
    pub section: u32,
    /// Footnote number within the section
    pub number: u32,
}

impl FootnoteLabel {
    /// Parse `N`, `S/N` or `Footnote S/N`.
    pub fn parse(text: &str) -> Option<Self> {
        let caps = FOOTNOTE_LABEL_RE.captures(text)?;
        let number = caps.get(2)?.as_str().parse().ok()?;
        let section = match caps.get(1) {
            Some(s) => s.as_str().parse().ok()?,
            None => 1,
        };
        Some(Self { section, number })
    }
}

impl std::fmt::Display for FootnoteLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.section == 1 {
            write!(f, "{}", self.number)
        } else {
            write!(f, "{}/{}", self.section, self.number)
        }
    }
}

/// Decide what an `<a>` element becomes.
///
/// Page anchors turn into `PAGE` lines, case citations keep their text,
/// footnote links become ref markers or footnote headers, and everything
/// else is dropped. Footnote and PDF links are recorded in `metadata`.
pub fn link(attributes: &str, text: &str, links: &LinksConfig, metadata: &mut Metadata) -> String {
    if let Some(caps) = CLASS_RE.captures(attributes) {
        let class = caps.get(1).map_or("", |m| m.as_str());
        if class == links.page_class {
            return format!("\nPAGE {}\n", text);
        }
        debug!("Dropping link with class {:?}", class);
        return String::new();
    }

    let Some(href) = HREF_RE
        .captures(attributes)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
    else {
        return String::new();
    };

    if links.is_case_link(href) {
        text.to_string()
    } else if href.starts_with("#F") {
        match FootnoteLabel::parse(text) {
            Some(label) => {
                metadata.record_footnote(label.section, label.number);
                format!("<ref name=\"ref{}\"></ref>", label)
            }
            None => {
                warn!("Footnote link without a number: {:?}", text);
                String::new()
            }
        }
    } else if href.starts_with("#T") {
        match FootnoteLabel::parse(text) {
            Some(label) => format!("Footnote {}", label),
            None => {
                warn!("Footnote back-reference without a number: {:?}", text);
                String::new()
            }
        }
    } else if href.ends_with(".pdf") {
        metadata.set_pdf(href);
        String::new()
    } else {
        String::new()
    }
}

// =============================================================================
// Other payloads
// =============================================================================

/// Section names from the content of a supremelinks list, in order.
pub fn supremelinks(content: &str) -> Vec<String> {
    FRAGMENT_RE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Wikitext heading; level 1 is dropped because the title comes from metadata.
///
/// Anchor tags are removed and entities decoded, since heading text is
/// not lexed token by token.
pub fn header(level: u8, content: &str) -> Result<String> {
    if level <= 1 {
        return Ok(String::new());
    }
    let text = decode_html_entities(&ANCHOR_RE.replace_all(content, ""))?;
    let marks = "=".repeat(level as usize);
    Ok(format!("\n{} {} {}\n", marks, text.trim(), marks))
}

/// Line breaks become `\n`, any other whitespace a single space.
pub fn whitespace(text: &str) -> &'static str {
    if text.contains(['\n', '\r']) {
        "\n"
    } else {
        " "
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_link(attributes: &str, text: &str) -> (String, Metadata) {
        let mut metadata = Metadata::new();
        let out = link(attributes, text, &LinksConfig::default(), &mut metadata);
        (out, metadata)
    }

    #[test]
    fn test_smallcaps() {
        assert_eq!(smallcaps("FOO"), "{{sc|Foo}}");
        assert_eq!(smallcaps("USA "), "{{sc|Usa}} ");
        assert_eq!(smallcaps("HOLMES, J."), "{{sc|Holmes, J.}}");
    }

    #[test]
    fn test_smallcaps_is_not_idempotent() {
        let once = smallcaps("FOO");
        assert_ne!(smallcaps(&once), once);
    }

    #[test]
    fn test_case_link_keeps_text() {
        let (out, metadata) = run_link(r#"href="/cases/federal/us/531/98/""#, "Syllabus");
        assert_eq!(out, "Syllabus");
        assert_eq!(metadata, Metadata::new());
    }

    #[test]
    fn test_other_link_is_dropped() {
        let (out, _) = run_link(r#"href="http://addthis.com/""#, "Share");
        assert_eq!(out, "");
        let (out, _) = run_link(r#"name="top""#, "Top");
        assert_eq!(out, "");
    }

    #[test]
    fn test_page_link() {
        let (out, _) = run_link(
            r#"class="page-name" href="/cases/federal/us/531/98/""#,
            "Page 531 U. S. 99",
        );
        assert_eq!(out, "\nPAGE Page 531 U. S. 99\n");
    }

    #[test]
    fn test_class_wins_over_href() {
        let (out, _) = run_link(r#"class="nav" href="/cases/federal/us/531/98/""#, "Next");
        assert_eq!(out, "");
    }

    #[test]
    fn test_configured_page_class() {
        let links = LinksConfig {
            page_class: "pg".into(),
            ..LinksConfig::default()
        };
        let mut metadata = Metadata::new();
        assert_eq!(link(r#"class="pg""#, "12", &links, &mut metadata), "\nPAGE 12\n");
        assert_eq!(link(r#"class="page-name""#, "12", &links, &mut metadata), "");
    }

    #[test]
    fn test_footnote_reference() {
        let mut metadata = Metadata::new();
        let links = LinksConfig::default();
        assert_eq!(
            link(r##"href="#F1""##, "1", &links, &mut metadata),
            r#"<ref name="ref1"></ref>"#
        );
        assert_eq!(
            link(r##"href="#F2/3""##, "2/3", &links, &mut metadata),
            r#"<ref name="ref2/3"></ref>"#
        );
        link(r##"href="#F4""##, "4", &links, &mut metadata);
        assert_eq!(metadata.max_footnote(1), Some(4));
        assert_eq!(metadata.max_footnote(2), Some(3));
    }

    #[test]
    fn test_footnote_back_reference() {
        let (out, metadata) = run_link(r##"href="#T2/1""##, "2/1");
        assert_eq!(out, "Footnote 2/1");
        assert_eq!(metadata.max_footnote(2), None);
    }

    #[test]
    fn test_pdf_link() {
        let (out, metadata) = run_link(r#"href="http://x.gov/pdf/531/98.pdf""#, "PDF");
        assert_eq!(out, "");
        assert_eq!(metadata.pdf(), Some("http://x.gov/pdf/531/98.pdf"));
        assert_eq!(metadata.pdf_filename(), Some("98.pdf"));
    }

    #[test]
    fn test_footnote_label() {
        assert_eq!(
            FootnoteLabel::parse("Footnote 3"),
            Some(FootnoteLabel { section: 1, number: 3 })
        );
        assert_eq!(FootnoteLabel::parse("1/7").map(|l| l.to_string()), Some("7".into()));
        assert_eq!(FootnoteLabel::parse("*"), None);
    }

    #[test]
    fn test_supremelinks() {
        assert_eq!(
            supremelinks("<li>Syllabus</li><li> Opinion </li>"),
            vec!["Syllabus", "Opinion"]
        );
        assert!(supremelinks("").is_empty());
    }

    #[test]
    fn test_supremelinks_keeps_inner_spaces() {
        assert_eq!(
            supremelinks("<li>\n  Per Curiam\n</li><li>Dissent</li>"),
            vec!["Per Curiam", "Dissent"]
        );
    }

    #[test]
    fn test_header() {
        assert_eq!(header(1, "Bush v. Gore").unwrap(), "");
        assert_eq!(header(2, "Opinion").unwrap(), "\n== Opinion ==\n");
        assert_eq!(header(4, "Note").unwrap(), "\n==== Note ====\n");
    }

    #[test]
    fn test_header_strips_anchors_and_decodes() {
        assert_eq!(
            header(2, r#"<a name="opinion">Opinion</a> &amp; more"#).unwrap(),
            "\n== Opinion & more ==\n"
        );
        assert!(header(2, "A &bogus; B").is_err());
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(whitespace("\n"), "\n");
        assert_eq!(whitespace("\r"), "\n");
        assert_eq!(whitespace("\t"), " ");
        assert_eq!(whitespace("\u{a0}"), " ");
    }
}
