//! Brandeis Parser
//!
//! Turns the scraped HTML of a court opinion into wikitext, one token at a
//! time.
//!
//! # Overview
//!
//! The [`Lexer`] splits the document into [`Token`]s using ordered regex
//! rule tables, switching tables when it enters and leaves a blockquote.
//! The [`Parser`] then maps every token to its wikitext, writing the result
//! to any [`Write`] sink and recording side information (footnotes, PDF
//! link, section list) in the document's [`Metadata`].
//!
//! # Example
//!
//! ```
//! use brandeis_core::Metadata;
//! use brandeis_parser::{tokenize, Parser};
//!
//! let lexemes = tokenize("<!-- note --><p>Text</p>").unwrap();
//! let mut metadata = Metadata::new();
//! let mut out = Vec::new();
//! Parser::new().parse(&lexemes, &mut metadata, &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "Text\n\n");
//! ```

pub mod entities;
pub mod tokenizer;
pub mod transform;

pub use entities::{decode_html_entities, html_entity};
pub use tokenizer::{first_match, rules, tokenize, write_token_log, Lexeme, Lexer, Rule, Token};
pub use transform::{smallcaps, FootnoteLabel};

use std::io::Write;

use brandeis_config::LinksConfig;
use brandeis_core::{BrandeisError, Metadata, Result};
use log::{debug, error};

/// Token-to-wikitext dispatcher.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    links: LinksConfig,
}

impl Parser {
    /// Create a parser with the default link rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom link rules.
    pub fn with_links(links: LinksConfig) -> Self {
        Self { links }
    }

    pub fn links(&self) -> &LinksConfig {
        &self.links
    }

    /// The wikitext for a single token.
    ///
    /// Only HTML entities can fail, when the name is not in the table.
    pub fn transform(&self, token: &Token, metadata: &mut Metadata) -> Result<String> {
        let out = match token {
            Token::IgnoredTagContent(_)
            | Token::IgnoredTag(_)
            | Token::Comment(_)
            | Token::Consecutive
            | Token::Unknown => String::new(),
            Token::Source(url) => {
                metadata.set_source(url);
                String::new()
            }
            Token::Blockquote => "<blockquote>".to_string(),
            Token::EndBlockquote => "</blockquote>".to_string(),
            Token::Section(name) => name.clone(),
            Token::Ordered(sentence) => format!("{}\n\n", sentence),
            Token::Paragraph { closing, .. } => {
                if *closing {
                    "\n\n".to_string()
                } else {
                    String::new()
                }
            }
            Token::BlockquoteParagraph { closing, .. } => {
                if *closing {
                    "<br /><br />".to_string()
                } else {
                    String::new()
                }
            }
            Token::Newline => "\n".to_string(),
            Token::BlockquoteNewline => "<br />".to_string(),
            Token::Link { attributes, text } => {
                transform::link(attributes, text, &self.links, metadata)
            }
            Token::Header { level, content } => transform::header(*level, content)?,
            Token::HtmlEntity(name) => html_entity(name)?.to_string(),
            Token::Supremelinks(content) => {
                metadata.extend_sections(transform::supremelinks(content));
                String::new()
            }
            Token::Italics(_) => "''".to_string(),
            Token::Bold(_) => "'''".to_string(),
            Token::SmallCaps(run) => smallcaps(run),
            Token::Abbr(text)
            | Token::Word(text)
            | Token::Number(text)
            | Token::Punctuation(text) => text.clone(),
            Token::Whitespace(text) => transform::whitespace(text).to_string(),
            Token::MultiApostrophes(_) => "<nowiki>''</nowiki>".to_string(),
            Token::Asterisks => "<nowiki>***</nowiki>".to_string(),
        };
        Ok(out)
    }

    /// Transform every lexeme in order, writing the wikitext to `out`.
    ///
    /// Stops at the first failing token and returns
    /// [`BrandeisError::Transform`] with its kind and position. Whatever was
    /// written before the failure stays in `out`.
    pub fn parse<W: Write>(
        &self,
        lexemes: &[Lexeme],
        metadata: &mut Metadata,
        out: &mut W,
    ) -> Result<()> {
        for lexeme in lexemes {
            let kind = lexeme.token.kind();
            let text = self.transform(&lexeme.token, metadata).map_err(|source| {
                error!(
                    "Failed to transform {} token at {}: {}",
                    kind, lexeme.position, source
                );
                BrandeisError::Transform {
                    kind,
                    position: lexeme.position,
                    source: Box::new(source),
                }
            })?;
            out.write_all(text.as_bytes())?;
        }
        debug!("Transformed {} tokens", lexemes.len());
        Ok(())
    }

    /// Transform every lexeme into a `String`.
    pub fn parse_to_string(&self, lexemes: &[Lexeme], metadata: &mut Metadata) -> Result<String> {
        let mut out = Vec::new();
        self.parse(lexemes, metadata, &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandeis_core::TokenKind;

    fn render(text: &str) -> (String, Metadata) {
        let lexemes = tokenize(text).unwrap();
        let mut metadata = Metadata::new();
        let out = Parser::new().parse_to_string(&lexemes, &mut metadata).unwrap();
        (out, metadata)
    }

    #[test]
    fn test_ordered_end_to_end() {
        let (out, _) = render("<p>It is so ordered.</p>");
        assert_eq!(out, "It is so ordered.\n\n");
    }

    #[test]
    fn test_comment_leaves_no_trace() {
        let (out, _) = render("<!-- note --><p>Text</p>");
        assert_eq!(out, "Text\n\n");
        assert!(!out.contains("note"));
    }

    #[test]
    fn test_supremelinks_metadata() {
        let (out, metadata) =
            render(r#"<ul class="supremelinks"><li>Syllabus</li><li>Opinion</li></ul>"#);
        assert_eq!(out, "");
        assert_eq!(metadata.sections(), ["Syllabus", "Opinion"]);
    }

    #[test]
    fn test_supremelinks_append() {
        let mut metadata = Metadata::new();
        metadata.extend_sections(["Syllabus"]);
        let parser = Parser::new();
        parser
            .transform(&Token::Supremelinks("<li>Dissent</li>".into()), &mut metadata)
            .unwrap();
        assert_eq!(metadata.sections(), ["Syllabus", "Dissent"]);
    }

    #[test]
    fn test_inline_formatting() {
        let (out, _) = render("<p><i>Roe</i> and <b>Wade</b></p>");
        assert_eq!(out, "''Roe'' and '''Wade'''\n\n");
    }

    #[test]
    fn test_entities_and_smallcaps() {
        let (out, _) = render("<p>MR. JUSTICE HOLMES, dissenting &sect; 1.</p>");
        assert_eq!(out, "{{sc|Mr. Justice Holmes}}, dissenting § 1.\n\n");
    }

    #[test]
    fn test_blockquote_paragraphs() {
        let (out, _) = render("<blockquote><p>One</p><p>Two<br>three</p></blockquote><p>Out</p>");
        assert_eq!(
            out,
            "<blockquote>One<br /><br />Two<br />three<br /><br /></blockquote>Out\n\n"
        );
    }

    #[test]
    fn test_headers() {
        let (out, _) = render("<h1>Bush v. Gore</h1><h3>Opinion</h3>");
        assert_eq!(out, "\n=== Opinion ===\n");
    }

    #[test]
    fn test_source_recorded() {
        let (out, metadata) = render("Source: http://example.com/us/531/98/case.html\n");
        assert_eq!(out, "\n");
        assert_eq!(
            metadata.source(),
            Some("http://example.com/us/531/98/case.html")
        );
    }

    #[test]
    fn test_escaped_markup() {
        let (out, _) = render("a '' b *** c");
        assert_eq!(out, "a <nowiki>''</nowiki> b <nowiki>***</nowiki> c");
    }

    #[test]
    fn test_links_filtered() {
        let (out, _) = render(concat!(
            r#"<p>See <a href="/cases/federal/us/410/113/">Roe</a>"#,
            r#"<a href="http://addthis.com/">Share</a></p>"#,
        ));
        assert_eq!(out, "See Roe\n\n");
    }

    #[test]
    fn test_unknown_entity_aborts_with_partial_output() {
        let lexemes = tokenize("<p>Before &bogus; after</p>").unwrap();
        let mut metadata = Metadata::new();
        let mut out = Vec::new();
        let err = Parser::new()
            .parse(&lexemes, &mut metadata, &mut out)
            .unwrap_err();

        match err {
            BrandeisError::Transform {
                kind,
                position,
                source,
            } => {
                assert_eq!(kind, TokenKind::HtmlEntity);
                assert_eq!(position.offset, 10);
                assert!(matches!(*source, BrandeisError::Entity(ref name) if name == "bogus"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(String::from_utf8(out).unwrap(), "Before ");
    }

    #[test]
    fn test_custom_links() {
        let links = LinksConfig {
            case_paths: vec!["/opinions/".into()],
            ..LinksConfig::default()
        };
        let parser = Parser::with_links(links);
        let mut metadata = Metadata::new();
        let token = Token::Link {
            attributes: r#"href="/opinions/12""#.into(),
            text: "Smith".into(),
        };
        assert_eq!(parser.transform(&token, &mut metadata).unwrap(), "Smith");
        assert_eq!(parser.links().case_paths, vec!["/opinions/"]);
    }
}
