//! Tokenizer for scraped court-opinion text.
//!
//! The lexer tries an ordered table of anchored regex rules at the current
//! position and takes the first one that matches. Which table is used
//! depends on the [`LexMode`]: inside a blockquote, three extra rules are
//! tried before the normal ones.

use std::io::{self, Write};
use std::sync::LazyLock;

use brandeis_core::{BrandeisError, LexMode, Position, Result, TokenKind};
use log::{trace, warn};
use regex::{Captures, Regex};

/// Token produced by the lexer, with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Dropped tag together with its content
    IgnoredTagContent(String),
    /// Dropped tag; the payload is the tag name
    IgnoredTag(String),
    /// `</i><i>`
    Consecutive,
    /// Source URL from the scraper's trailing line
    Source(String),
    /// `<blockquote>`
    Blockquote,
    /// `</blockquote>`
    EndBlockquote,
    /// Repeated section name, e.g. `Per Curiam`
    Section(String),
    /// "It is so ordered." sentence
    Ordered(String),
    /// Paragraph tag inside a blockquote
    BlockquoteParagraph { closing: bool, attributes: String },
    /// Paragraph tag
    Paragraph { closing: bool, attributes: String },
    /// `<a attributes>text</a>`
    Link { attributes: String, text: String },
    /// Comment body
    Comment(String),
    /// `<hN>content</hN>`
    Header { level: u8, content: String },
    /// Entity name without `&` and `;`
    HtmlEntity(String),
    /// Inner content of a supremelinks list
    Supremelinks(String),
    /// Run of italics tags
    Italics(String),
    /// Bold tag
    Bold(String),
    /// `<br>` inside a blockquote
    BlockquoteNewline,
    /// `<br>`
    Newline,
    SmallCaps(String),
    Abbr(String),
    Whitespace(String),
    Word(String),
    Number(String),
    MultiApostrophes(String),
    Asterisks,
    Punctuation(String),
    /// U+FFFD
    Unknown,
}

impl Token {
    /// The category of this token.
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::IgnoredTagContent(_) => TokenKind::IgnoredTagContent,
            Token::IgnoredTag(_) => TokenKind::IgnoredTag,
            Token::Consecutive => TokenKind::Consecutive,
            Token::Source(_) => TokenKind::Source,
            Token::Blockquote => TokenKind::Blockquote,
            Token::EndBlockquote => TokenKind::EndBlockquote,
            Token::Section(_) => TokenKind::Section,
            Token::Ordered(_) => TokenKind::Ordered,
            Token::BlockquoteParagraph { .. } => TokenKind::BlockquoteParagraph,
            Token::Paragraph { .. } => TokenKind::Paragraph,
            Token::Link { .. } => TokenKind::Link,
            Token::Comment(_) => TokenKind::Comment,
            Token::Header { .. } => TokenKind::Header,
            Token::HtmlEntity(_) => TokenKind::HtmlEntity,
            Token::Supremelinks(_) => TokenKind::Supremelinks,
            Token::Italics(_) => TokenKind::Italics,
            Token::Bold(_) => TokenKind::Bold,
            Token::BlockquoteNewline => TokenKind::BlockquoteNewline,
            Token::Newline => TokenKind::Newline,
            Token::SmallCaps(_) => TokenKind::SmallCaps,
            Token::Abbr(_) => TokenKind::Abbr,
            Token::Whitespace(_) => TokenKind::Whitespace,
            Token::Word(_) => TokenKind::Word,
            Token::Number(_) => TokenKind::Number,
            Token::MultiApostrophes(_) => TokenKind::MultiApostrophes,
            Token::Asterisks => TokenKind::Asterisks,
            Token::Punctuation(_) => TokenKind::Punctuation,
            Token::Unknown => TokenKind::Unknown,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = self.kind();
        match self {
            Token::Consecutive
            | Token::Blockquote
            | Token::EndBlockquote
            | Token::BlockquoteNewline
            | Token::Newline
            | Token::Asterisks
            | Token::Unknown => write!(f, "{}", kind),
            Token::BlockquoteParagraph {
                closing,
                attributes,
            }
            | Token::Paragraph {
                closing,
                attributes,
            } => write!(f, "{}({}, {:?})", kind, closing, attributes),
            Token::Link { attributes, text } => {
                write!(f, "{}({:?}, {:?})", kind, attributes, text)
            }
            Token::Header { level, content } => write!(f, "{}({}, {:?})", kind, level, content),
            Token::IgnoredTagContent(s)
            | Token::IgnoredTag(s)
            | Token::Source(s)
            | Token::Section(s)
            | Token::Ordered(s)
            | Token::Comment(s)
            | Token::HtmlEntity(s)
            | Token::Supremelinks(s)
            | Token::Italics(s)
            | Token::Bold(s)
            | Token::SmallCaps(s)
            | Token::Abbr(s)
            | Token::Whitespace(s)
            | Token::Word(s)
            | Token::Number(s)
            | Token::MultiApostrophes(s)
            | Token::Punctuation(s) => write!(f, "{}({:?})", kind, s),
        }
    }
}

/// A token together with where it starts in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub token: Token,
    pub position: Position,
}

/// Checks the text preceding a candidate match.
type Lookbehind = fn(&str) -> bool;

/// One lexer rule.
///
/// Patterns are anchored at the scan position. A rule that needs
/// lookahead matches the following context too and puts the token itself
/// in a group named `tok`; only that group is consumed.
#[derive(Debug, Clone)]
pub struct Rule {
    kind: TokenKind,
    pattern: Regex,
    lookbehind: Option<Lookbehind>,
}

impl Rule {
    /// Compile a rule. Panics on an invalid pattern, which is a bug in
    /// the static rule tables.
    pub fn new(kind: TokenKind, pattern: &str) -> Self {
        Self {
            kind,
            pattern: Regex::new(&format!(r"\A(?:{})", pattern)).unwrap(),
            lookbehind: None,
        }
    }

    /// Require `check` to accept the text before the match.
    pub fn with_lookbehind(mut self, check: Lookbehind) -> Self {
        self.lookbehind = Some(check);
        self
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Try this rule at byte offset `pos` of `text`.
    ///
    /// Returns the consumed length and the captures.
    fn try_at<'t>(&self, text: &'t str, pos: usize) -> Option<(usize, Captures<'t>)> {
        if let Some(check) = self.lookbehind {
            if !check(&text[..pos]) {
                return None;
            }
        }
        let caps = self.pattern.captures(&text[pos..])?;
        let len = caps
            .name("tok")
            .or_else(|| caps.get(0))
            .map_or(0, |m| m.end());
        Some((len, caps))
    }
}

const PARAGRAPH: &str = r"<(?P<end>/?)[Pp](?P<info>.*?)>";
const LINE_BREAK: &str = r"<[Bb][Rr]\s?/?>";

fn ends_with_uppercase(before: &str) -> bool {
    before.chars().next_back().is_some_and(|c| c.is_ascii_uppercase())
}

/// Rules active in normal mode, in priority order.
fn normal_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            TokenKind::IgnoredTagContent,
            r#"<(script|SCRIPT|div\sclass="disclaimer"|img)(.*?)>.*?</(div|script|SCRIPT|img)>"#,
        ),
        Rule::new(
            TokenKind::IgnoredTag,
            r"</?(?P<tag>div|DIV|span|SPAN|hr|HR|L=)(.*?)>",
        ),
        Rule::new(TokenKind::Consecutive, r"</i><i>"),
        Rule::new(TokenKind::Source, r"Source:\s(?P<source>http.*?\.html).*"),
        Rule::new(TokenKind::Blockquote, r"<blockquote>"),
        Rule::new(TokenKind::Section, r"(?P<tok>Per\sCuriam)</p>")
            .with_lookbehind(|before| before.ends_with("</A></p><p>")),
        Rule::new(
            TokenKind::Ordered,
            r"<p>(<em>)?(?P<ordered>(?:It\sis\s)?[sS]o\sordered\.)(</em>)?</p>",
        ),
        Rule::new(TokenKind::Paragraph, PARAGRAPH),
        Rule::new(
            TokenKind::Link,
            r"\[?<[aA]\s(?P<info>.*?)>(?P<text>.*?)</[aA]>\]?",
        ),
        Rule::new(TokenKind::Comment, r"<!--(?P<comment>.*?)-->"),
        Rule::new(
            TokenKind::Header,
            r"<[Hh](?P<level>[1-6])>(?P<content>.*?)</[Hh][1-6]>",
        ),
        Rule::new(TokenKind::HtmlEntity, r"&(?P<entity>[a-zA-Z]+|#[0-9]{3,4});"),
        Rule::new(
            TokenKind::Supremelinks,
            r#"<(ul|UL)\s(class|CLASS)="supremelinks">(?P<content>.*?)</(ul|UL)>"#,
        ),
        Rule::new(TokenKind::Italics, r"(</?([Ii]|em|EM)>)+"),
        Rule::new(TokenKind::Bold, r"</?(B|b|strong|STRONG)>"),
        Rule::new(TokenKind::Newline, LINE_BREAK),
        // Small caps goes first so ambiguous uppercase runs are small caps.
        Rule::new(
            TokenKind::SmallCaps,
            r"(?P<tok>(?:(?:[A-Z]{2,}\.?\s?)+|[A-Z]+,\s[A-Z]\.)+)\W",
        ),
        Rule::new(TokenKind::Abbr, r"(?P<tok>[A-Z]{1,4})(?:[^A-Z]|\z)")
            .with_lookbehind(|before| !ends_with_uppercase(before)),
        // CRLF is one line break, not two
        Rule::new(TokenKind::Whitespace, r"\r\n|\s"),
        // A-z also admits [ \ ] ^ _ and the backtick
        Rule::new(TokenKind::Word, r"[a-zA-z]+"),
        Rule::new(TokenKind::Number, r"[0-9]+"),
        Rule::new(TokenKind::MultiApostrophes, r"'{2,3}"),
        Rule::new(TokenKind::Asterisks, r"\*{3}"),
        Rule::new(
            TokenKind::Punctuation,
            r#"[!@#$%^&*()\-;+=\[\]{}\\|:;"',.?~°–—/±]"#,
        ),
        Rule::new(TokenKind::Unknown, r"\x{FFFD}"),
    ]
}

/// Normal mode rules.
static NORMAL_RULES: LazyLock<Vec<Rule>> = LazyLock::new(normal_rules);

/// Blockquote mode rules: the blockquote overrides, then every normal rule.
static BLOCKQUOTE_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    let mut rules = vec![
        Rule::new(TokenKind::EndBlockquote, r"</blockquote>"),
        Rule::new(TokenKind::BlockquoteParagraph, PARAGRAPH),
        Rule::new(TokenKind::BlockquoteNewline, LINE_BREAK),
    ];
    rules.extend(normal_rules());
    rules
});

/// The rule table for `mode`.
pub fn rules(mode: LexMode) -> &'static [Rule] {
    match mode {
        LexMode::Normal => &NORMAL_RULES,
        LexMode::Blockquote => &BLOCKQUOTE_RULES,
    }
}

/// Find the first rule in `rules` matching at byte offset `pos`.
///
/// Zero-length matches are skipped so the scan always advances.
pub fn first_match(rules: &[Rule], text: &str, pos: usize) -> Option<(usize, Token)> {
    for rule in rules {
        let Some((len, caps)) = rule.try_at(text, pos) else {
            continue;
        };
        if len == 0 {
            warn!("Rule {} matched empty text at byte {}", rule.kind, pos);
            continue;
        }
        let matched = &text[pos..pos + len];
        return Some((len, build_token(rule.kind, &caps, matched)));
    }
    None
}

fn build_token(kind: TokenKind, caps: &Captures, matched: &str) -> Token {
    let group = |name: &str| caps.name(name).map_or("", |m| m.as_str()).to_string();
    match kind {
        TokenKind::IgnoredTagContent => Token::IgnoredTagContent(matched.to_string()),
        TokenKind::IgnoredTag => Token::IgnoredTag(group("tag")),
        TokenKind::Consecutive => Token::Consecutive,
        TokenKind::Source => Token::Source(group("source")),
        TokenKind::Blockquote => Token::Blockquote,
        TokenKind::EndBlockquote => Token::EndBlockquote,
        TokenKind::Section => Token::Section(matched.to_string()),
        TokenKind::Ordered => Token::Ordered(group("ordered")),
        TokenKind::BlockquoteParagraph => Token::BlockquoteParagraph {
            closing: !group("end").is_empty(),
            attributes: group("info"),
        },
        TokenKind::Paragraph => Token::Paragraph {
            closing: !group("end").is_empty(),
            attributes: group("info"),
        },
        TokenKind::Link => Token::Link {
            attributes: group("info"),
            text: group("text"),
        },
        TokenKind::Comment => Token::Comment(group("comment")),
        TokenKind::Header => Token::Header {
            level: group("level").parse().unwrap_or(1),
            content: group("content"),
        },
        TokenKind::HtmlEntity => Token::HtmlEntity(group("entity")),
        TokenKind::Supremelinks => Token::Supremelinks(group("content")),
        TokenKind::Italics => Token::Italics(matched.to_string()),
        TokenKind::Bold => Token::Bold(matched.to_string()),
        TokenKind::BlockquoteNewline => Token::BlockquoteNewline,
        TokenKind::Newline => Token::Newline,
        TokenKind::SmallCaps => Token::SmallCaps(matched.to_string()),
        TokenKind::Abbr => Token::Abbr(matched.to_string()),
        TokenKind::Whitespace => Token::Whitespace(matched.to_string()),
        TokenKind::Word => Token::Word(matched.to_string()),
        TokenKind::Number => Token::Number(matched.to_string()),
        TokenKind::MultiApostrophes => Token::MultiApostrophes(matched.to_string()),
        TokenKind::Asterisks => Token::Asterisks,
        TokenKind::Punctuation => Token::Punctuation(matched.to_string()),
        TokenKind::Unknown => Token::Unknown,
    }
}

/// Streaming lexer over a whole document.
///
/// Yields lexemes in source order. After an illegal character it yields
/// the error once and then stops.
///
/// # Example
///
/// ```
/// use brandeis_parser::{Lexer, Token};
///
/// let tokens: Vec<Token> = Lexer::new("<p>It is so ordered.</p>")
///     .map(|lexeme| lexeme.unwrap().token)
///     .collect();
/// assert_eq!(tokens, vec![Token::Ordered("It is so ordered.".into())]);
/// ```
#[derive(Debug)]
pub struct Lexer<'a> {
    text: &'a str,
    pos: usize,
    position: Position,
    mode: LexMode,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            position: Position::default(),
            mode: LexMode::Normal,
            failed: false,
        }
    }

    /// The mode the next token will be scanned in.
    pub fn mode(&self) -> LexMode {
        self.mode
    }

    fn transition(&mut self, kind: TokenKind) {
        match kind {
            TokenKind::Blockquote => {
                if self.mode == LexMode::Blockquote {
                    warn!("Nested blockquote at {} is not supported", self.position);
                }
                self.mode = LexMode::Blockquote;
            }
            TokenKind::EndBlockquote => self.mode = LexMode::Normal,
            _ => {}
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Lexeme>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.text.len() {
            return None;
        }

        let Some((len, token)) = first_match(rules(self.mode), self.text, self.pos) else {
            self.failed = true;
            let character = self.text[self.pos..].chars().next().unwrap_or_default();
            return Some(Err(BrandeisError::IllegalCharacter {
                character,
                position: self.position,
            }));
        };

        let position = self.position;
        trace!("{} at {} ({} mode)", token, position, self.mode);
        self.transition(token.kind());
        self.position = position.advance(&self.text[self.pos..self.pos + len]);
        self.pos += len;

        Some(Ok(Lexeme { token, position }))
    }
}

/// Tokenize a whole document.
///
/// Fails with [`BrandeisError::IllegalCharacter`] at the first position no
/// rule matches.
pub fn tokenize(text: &str) -> Result<Vec<Lexeme>> {
    Lexer::new(text).collect()
}

/// Write the token stream, one token per line, for debugging.
pub fn write_token_log<W: Write>(lexemes: &[Lexeme], out: &mut W) -> io::Result<()> {
    for lexeme in lexemes {
        writeln!(
            out,
            "{}:{}\t{}",
            lexeme.position.line, lexeme.position.column, lexeme.token
        )?;
    }
    Ok(())
}
