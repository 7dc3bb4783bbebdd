//! Core enums for the brandeis lexer.
//!
//! These enums represent the scanner's mode and the closed set of token
//! categories it can produce.

use serde::{Deserialize, Serialize};

/// Selects which rule table the lexer scans with.
///
/// `Blockquote` is entered on `<blockquote>` and left on `</blockquote>`.
/// Modes are not stacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LexMode {
    /// Outside any blockquote
    #[default]
    Normal,
    /// Between `<blockquote>` and `</blockquote>`
    Blockquote,
}

impl std::fmt::Display for LexMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LexMode::Normal => write!(f, "normal"),
            LexMode::Blockquote => write!(f, "blockquote"),
        }
    }
}

/// Category of a lexed token.
///
/// The variants are listed in lexer priority order; the three
/// blockquote-only kinds sit next to their normal-mode counterparts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Tag whose content is dropped along with it (`<script>`, disclaimers)
    IgnoredTagContent,
    /// Tag dropped while its content is kept (`<div>`, `<span>`, `<hr>`)
    IgnoredTag,
    /// `</i><i>`
    Consecutive,
    /// Source line appended by the scraper
    Source,
    /// `<blockquote>`
    Blockquote,
    /// `</blockquote>`, blockquote mode only
    EndBlockquote,
    /// Repeated section name
    Section,
    /// "It is so ordered." paragraph
    Ordered,
    /// `<p>` or `</p>` in blockquote mode
    BlockquoteParagraph,
    /// `<p>` or `</p>`
    Paragraph,
    /// `<a>` element
    Link,
    /// `<!-- ... -->`
    Comment,
    /// `<h1>` to `<h6>` element
    Header,
    /// `&name;`
    HtmlEntity,
    /// `<ul class="supremelinks">` block
    Supremelinks,
    /// Run of italics tags
    Italics,
    /// Bold tag
    Bold,
    /// `<br>` in blockquote mode
    BlockquoteNewline,
    /// `<br>`
    Newline,
    /// Run of uppercase words
    SmallCaps,
    /// Short uppercase abbreviation
    Abbr,
    Whitespace,
    Word,
    Number,
    /// `''` or `'''` in the text
    MultiApostrophes,
    /// `***`
    Asterisks,
    Punctuation,
    /// U+FFFD replacement character
    Unknown,
}

impl TokenKind {
    /// Name of the kind as used in logs and the token log.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::IgnoredTagContent => "ignored_tag_content",
            TokenKind::IgnoredTag => "ignored_tag",
            TokenKind::Consecutive => "consecutive",
            TokenKind::Source => "source",
            TokenKind::Blockquote => "blockquote",
            TokenKind::EndBlockquote => "e_blockquote",
            TokenKind::Section => "section",
            TokenKind::Ordered => "ordered",
            TokenKind::BlockquoteParagraph => "b_paragraph",
            TokenKind::Paragraph => "paragraph",
            TokenKind::Link => "link",
            TokenKind::Comment => "comment",
            TokenKind::Header => "header",
            TokenKind::HtmlEntity => "html_entity",
            TokenKind::Supremelinks => "supremelinks",
            TokenKind::Italics => "italics",
            TokenKind::Bold => "bold",
            TokenKind::BlockquoteNewline => "b_newline",
            TokenKind::Newline => "newline",
            TokenKind::SmallCaps => "smallcaps",
            TokenKind::Abbr => "abbr",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Word => "word",
            TokenKind::Number => "number",
            TokenKind::MultiApostrophes => "multi_apostrophes",
            TokenKind::Asterisks => "asterisks",
            TokenKind::Punctuation => "punctuation",
            TokenKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_mode_display() {
        assert_eq!(LexMode::Normal.to_string(), "normal");
        assert_eq!(LexMode::Blockquote.to_string(), "blockquote");
        assert_eq!(LexMode::default(), LexMode::Normal);
    }

    #[test]
    fn test_token_kind_display() {
        assert_eq!(TokenKind::HtmlEntity.to_string(), "html_entity");
        assert_eq!(TokenKind::SmallCaps.to_string(), "smallcaps");
        assert_eq!(TokenKind::BlockquoteNewline.to_string(), "b_newline");
    }
}
