//! Whitespace cleanup of the parser output.

/// Normalise blank lines and line-edge whitespace.
///
/// Every line loses its leading and trailing whitespace (a leading space
/// would make wikitext render the line as preformatted), runs of blank lines
/// collapse to one, and the document is trimmed.
///
/// ```
/// use brandeis_pipeline::tidy;
///
/// assert_eq!(tidy("\n\n  One \n\n\n\nTwo\n\n"), "One\n\nTwo");
/// ```
pub fn tidy(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = false;

    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            blank_run = true;
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
            if blank_run {
                out.push('\n');
            }
        }
        out.push_str(line);
        blank_run = false;
    }

    out
}
