//! HTML entity decoding

use std::collections::HashMap;
use std::sync::LazyLock;

use brandeis_core::{BrandeisError, Result};
use regex::Regex;

/// Named entities the scraper is known to emit
static HTML_ENTITIES: LazyLock<HashMap<&'static str, char>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    // Markup characters
    m.insert("quot", '"');
    m.insert("amp", '&');
    m.insert("lt", '<');
    m.insert("gt", '>');
    m.insert("apos", '\'');
    // Spaces
    m.insert("nbsp", '\u{a0}');
    m.insert("ensp", '\u{2002}');
    m.insert("emsp", '\u{2003}');
    m.insert("thinsp", '\u{2009}');
    m.insert("shy", '\u{ad}');
    // Legal citations
    m.insert("sect", '§');
    m.insert("para", '¶');
    m.insert("dagger", '†');
    m.insert("Dagger", '‡');
    // Dashes and quotes
    m.insert("mdash", '—');
    m.insert("ndash", '–');
    m.insert("hellip", '…');
    m.insert("lsquo", '‘');
    m.insert("rsquo", '’');
    m.insert("ldquo", '“');
    m.insert("rdquo", '”');
    m.insert("laquo", '«');
    m.insert("raquo", '»');
    m.insert("prime", '′');
    m.insert("Prime", '″');
    // Symbols
    m.insert("copy", '©');
    m.insert("reg", '®');
    m.insert("trade", '™');
    m.insert("deg", '°');
    m.insert("plusmn", '±');
    m.insert("middot", '·');
    m.insert("bull", '•');
    m.insert("times", '×');
    m.insert("divide", '÷');
    m.insert("frac14", '¼');
    m.insert("frac12", '½');
    m.insert("frac34", '¾');
    m.insert("cent", '¢');
    m.insert("pound", '£');
    // Accented letters in party names
    m.insert("aacute", 'á');
    m.insert("agrave", 'à');
    m.insert("acirc", 'â');
    m.insert("auml", 'ä');
    m.insert("ccedil", 'ç');
    m.insert("eacute", 'é');
    m.insert("Eacute", 'É');
    m.insert("egrave", 'è');
    m.insert("ecirc", 'ê');
    m.insert("iacute", 'í');
    m.insert("ntilde", 'ñ');
    m.insert("oacute", 'ó');
    m.insert("ocirc", 'ô');
    m.insert("ouml", 'ö');
    m.insert("uacute", 'ú');
    m.insert("uuml", 'ü');
    m.insert("szlig", 'ß');
    m
});

/// Entity references inside a larger piece of text.
static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&([a-zA-Z]+|#[0-9]{3,4});").unwrap());

/// Decode one entity, given its name without `&` and `;`.
///
/// `name` is either a named entity from the table or a decimal reference
/// such as `#167`. Anything else is an [`BrandeisError::Entity`] error.
///
/// # Example
///
/// ```
/// use brandeis_parser::html_entity;
///
/// assert_eq!(html_entity("quot").unwrap(), '"');
/// assert_eq!(html_entity("#167").unwrap(), '§');
/// assert!(html_entity("foo").is_err());
/// ```
pub fn html_entity(name: &str) -> Result<char> {
    if let Some(digits) = name.strip_prefix('#') {
        return digits
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| BrandeisError::Entity(name.to_string()));
    }
    HTML_ENTITIES
        .get(name)
        .copied()
        .ok_or_else(|| BrandeisError::Entity(name.to_string()))
}

/// Decode every entity reference in `text`.
///
/// A bare `&` that doesn't form a reference is left alone.
pub fn decode_html_entities(text: &str) -> Result<String> {
    let mut result = String::with_capacity(text.len());
    let mut last_end = 0;
    for cap in ENTITY_RE.captures_iter(text) {
        let (Some(whole), Some(name)) = (cap.get(0), cap.get(1)) else {
            continue;
        };
        result.push_str(&text[last_end..whole.start()]);
        result.push(html_entity(name.as_str())?);
        last_end = whole.end();
    }
    result.push_str(&text[last_end..]);
    Ok(result)
}
