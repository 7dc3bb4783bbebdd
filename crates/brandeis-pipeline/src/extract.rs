//! Title and article extraction from the raw scraped page.

use std::sync::LazyLock;

use brandeis_core::{BrandeisError, CaseTitle, Result};
use brandeis_parser::decode_html_entities;
use regex::Regex;

/// `<h1>Petitioner v. Respondent - 531 U.S. 98 (2000)</h1>`
static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\s*<h1>(?P<full>(?P<title>(?P<petitioner>.*?)\sv\.\s(?P<respondent>.*?))",
        r"\s-\s(?P<number>(?P<volume>\d{1,3})\s(?P<abbr>U\.S\.)\s(?P<page>\d{1,3}))",
        r"\s\((?P<date>\d{4})\))</h1>",
    ))
    .unwrap()
});

/// Main article plus whatever the scraper appended after `</html>`
static ARTICLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?s)<article\sid="maincontent">(?P<content>.*?)</article>"#,
        r".*?</html>(?P<source>.*)",
    ))
    .unwrap()
});

/// Read the case title from the first non-blank line.
///
/// Entities in the title (`Smith &amp; Co.`) are decoded.
///
/// # Example
///
/// ```
/// use brandeis_pipeline::extract_title;
///
/// let title = extract_title("\n<h1>Bush v. Gore - 531 U.S. 98 (2000)</h1>\n").unwrap();
/// assert_eq!(title.petitioner, "Bush");
/// assert_eq!(title.number, "531 U.S. 98");
/// ```
pub fn extract_title(text: &str) -> Result<CaseTitle> {
    let line = text
        .lines()
        .find(|line| !line.trim().is_empty())
        .ok_or(BrandeisError::MissingTitle)?;
    let caps = TITLE_RE.captures(line).ok_or(BrandeisError::MissingTitle)?;
    let group = |name: &str| decode_html_entities(caps.name(name).map_or("", |m| m.as_str()));

    Ok(CaseTitle {
        full_title: group("full")?,
        title: group("title")?,
        petitioner: group("petitioner")?,
        respondent: group("respondent")?,
        number: group("number")?,
        volume: group("volume")?,
        abbr: group("abbr")?,
        page: group("page")?,
        date: group("date")?,
    })
}

/// Keep only the main article and the trailing source line.
///
/// Returns `None` when the page has no `maincontent` article.
pub fn strip_extraneous(text: &str) -> Option<String> {
    let caps = ARTICLE_RE.captures(text)?;
    let content = caps.name("content").map_or("", |m| m.as_str());
    let source = caps.name("source").map_or("", |m| m.as_str());
    Some(format!("{}{}", content, source))
}
