//! Property-based tests for brandeis.
//!
//! These tests use proptest to generate random inputs and verify
//! that the lexer, parser and post-processing stages handle them gracefully.

use proptest::prelude::*;

use brandeis_config::SectionizeConfig;
use brandeis_core::Metadata;
use brandeis_parser::{smallcaps, tokenize, Lexer, Parser};
use brandeis_pipeline::{sectionize, tidy};

/// Generate arbitrary text, markup and non-ASCII included.
fn any_text() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"(?s).{0,300}").unwrap()
}

/// Generate HTML-ish text built from the characters and tags the scraper emits.
fn page_fragment() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        prop::string::string_regex(r"[a-zA-Z0-9 \n.,;:!?()'-]{1,20}").unwrap(),
        Just("<p>".to_string()),
        Just("</p>".to_string()),
        Just("<i>".to_string()),
        Just("</i>".to_string()),
        Just("<br>".to_string()),
        Just("<blockquote><p>Quoted</p><br></blockquote>".to_string()),
        Just("&amp;".to_string()),
        Just("<!-- x -->".to_string()),
    ];
    prop::collection::vec(piece, 0..30).prop_map(|pieces| pieces.concat())
}

/// Generate lowercase words separated by single spaces.
fn lowercase_words() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[a-z]{1,10}( [a-z]{1,10}){0,10}").unwrap()
}

/// Generate text that never mentions a section opener.
fn opener_free_text() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[b-h \n]{0,200}").unwrap()
}

/// Generate plain text made of the characters every rule table covers.
fn plain_text() -> impl Strategy<Value = String> {
    prop::string::string_regex(r#"[a-zA-Z0-9 \t\n.,;:!?()'"\-]{0,200}"#).unwrap()
}

// =============================================================================
// Lexer Property Tests
// =============================================================================

proptest! {
    /// The lexer should never panic on any input.
    #[test]
    fn lexer_never_panics(input in any_text()) {
        let _ = tokenize(&input);
    }

    /// Plain text is always covered by some rule.
    #[test]
    fn plain_text_tokenizes(input in plain_text()) {
        prop_assert!(tokenize(&input).is_ok());
    }

    /// Offsets start at zero and strictly increase.
    #[test]
    fn offsets_increase(input in plain_text()) {
        let lexemes = tokenize(&input).unwrap();
        let mut last = None;
        for lexeme in &lexemes {
            let offset = lexeme.position.offset;
            match last {
                None => prop_assert_eq!(offset, 0),
                Some(prev) => prop_assert!(offset > prev),
            }
            last = Some(offset);
        }
        if let Some(offset) = last {
            prop_assert!(offset < input.chars().count());
        }
    }

    /// The lexer yields at most one error and stops there.
    #[test]
    fn lexer_stops_after_error(input in any_text()) {
        let results: Vec<_> = Lexer::new(&input).collect();
        let errors = results.iter().filter(|r| r.is_err()).count();
        prop_assert!(errors <= 1);
        if errors == 1 {
            prop_assert!(results.last().is_some_and(|r| r.is_err()));
        }
    }

    /// Scraper-style fragments always tokenize and transform.
    #[test]
    fn page_fragments_convert(input in page_fragment()) {
        let lexemes = tokenize(&input).unwrap();
        let mut metadata = Metadata::new();
        prop_assert!(Parser::new().parse_to_string(&lexemes, &mut metadata).is_ok());
    }
}

// =============================================================================
// Parser Property Tests
// =============================================================================

proptest! {
    /// Lowercase words and single spaces pass through unchanged.
    #[test]
    fn lowercase_text_unchanged(input in lowercase_words()) {
        let lexemes = tokenize(&input).unwrap();
        let mut metadata = Metadata::new();
        let out = Parser::new().parse_to_string(&lexemes, &mut metadata).unwrap();
        prop_assert_eq!(out, input);
    }

    /// Small caps title-cases a run of capitals.
    #[test]
    fn smallcaps_title_cases(run in "[A-Z]{2,12}") {
        let expected = format!("{{{{sc|{}{}}}}}", &run[..1], run[1..].to_lowercase());
        prop_assert_eq!(smallcaps(&run), expected);
    }
}

// =============================================================================
// Post-processing Property Tests
// =============================================================================

proptest! {
    /// Tidying twice changes nothing.
    #[test]
    fn tidy_is_idempotent(input in prop::string::string_regex(r"[a-z \t\n]{0,200}").unwrap()) {
        let once = tidy(&input);
        prop_assert_eq!(tidy(&once), once);
    }

    /// Tidy output has no triple newlines and no indented lines.
    #[test]
    fn tidy_output_is_clean(input in prop::string::string_regex(r"[a-z \t\n]{0,200}").unwrap()) {
        let out = tidy(&input);
        prop_assert!(!out.contains("\n\n\n"));
        prop_assert!(out.lines().all(|line| !line.starts_with([' ', '\t'])));
        prop_assert_eq!(out.trim(), out.as_str());
    }

    /// Text without section openers comes back untouched.
    #[test]
    fn sectionize_without_openers(input in opener_free_text()) {
        let mut metadata = Metadata::new();
        let out = sectionize(&input, &SectionizeConfig::default(), &mut metadata);
        prop_assert_eq!(out, input);
        prop_assert_eq!(metadata, Metadata::new());
    }

    /// The recorded footnote maximum is the largest number seen.
    #[test]
    fn footnote_maximum(numbers in prop::collection::vec(1u32..500, 1..20)) {
        let mut metadata = Metadata::new();
        for &n in &numbers {
            metadata.record_footnote(1, n);
        }
        prop_assert_eq!(metadata.max_footnote(1), numbers.iter().copied().max());
    }
}
