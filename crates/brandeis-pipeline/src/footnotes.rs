//! Footnote re-insertion.
//!
//! The scraped page lists footnotes at the end of each opinion, each one
//! introduced by a `Footnote N` paragraph (or `Footnote S/N` outside the
//! first opinion section). This stage moves every footnote body into the
//! `<ref>` marker the parser left at the point of reference.

use brandeis_core::{BrandeisError, Metadata, Result};
use log::{debug, warn};

const PARAGRAPH_BREAK: &str = "\n\n";

fn prefix(section: u32) -> String {
    if section == 1 {
        String::new()
    } else {
        format!("{}/", section)
    }
}

fn heading(prefix: &str, number: u32) -> String {
    format!("Footnote {}{}", prefix, number)
}

/// Move footnote bodies into their ref markers, section by section.
///
/// Sections and their highest footnote numbers come from
/// [`Metadata::footnote_sections`]. Fails with
/// [`BrandeisError::MissingFootnote`] when a footnote in `1..=max` is not
/// where the sequence expects it.
pub fn reinsert_footnotes(text: &str, metadata: &Metadata) -> Result<String> {
    let mut text = text.to_string();
    for (section, max) in metadata.footnote_sections() {
        text = reinsert_section(&text, section, max)?;
    }
    Ok(text)
}

fn reinsert_section(text: &str, section: u32, max: u32) -> Result<String> {
    let prefix = prefix(section);
    let paragraphs: Vec<&str> = text.split(PARAGRAPH_BREAK).collect();

    let first = heading(&prefix, 1);
    let start = paragraphs
        .iter()
        .position(|p| *p == first)
        .ok_or(BrandeisError::MissingFootnote { section, number: 1 })?;
    let (body, list) = paragraphs.split_at(start);

    let mut bodies = Vec::with_capacity(max as usize);
    let mut ind = 0;
    for number in 1..=max {
        if list.get(ind).copied() != Some(heading(&prefix, number).as_str()) {
            return Err(BrandeisError::MissingFootnote { section, number });
        }
        ind += 1;

        let collected: Vec<&str> = if number == max {
            let last = list.get(ind).copied().into_iter().collect();
            ind = (ind + 1).min(list.len());
            last
        } else {
            let next = heading(&prefix, number + 1);
            let end = list[ind..]
                .iter()
                .position(|p| *p == next)
                .map_or(list.len(), |offset| ind + offset);
            let paras = list[ind..end].to_vec();
            ind = end;
            paras
        };
        bodies.push(collected.join(PARAGRAPH_BREAK));
    }

    let mut out = body.join(PARAGRAPH_BREAK);
    for (number, footnote) in (1..=max).zip(&bodies) {
        let marker = format!("<ref name=\"ref{}{}\">", prefix, number);
        match out.find(&marker) {
            Some(at) => out.insert_str(at + marker.len(), footnote),
            None => warn!("No reference to footnote {}{} in text", prefix, number),
        }
    }
    debug!("Reinserted {} footnotes for section {}", max, section);

    let trailing = &list[ind..];
    if !trailing.is_empty() {
        if !out.is_empty() {
            out.push_str(PARAGRAPH_BREAK);
        }
        out.push_str(&trailing.join(PARAGRAPH_BREAK));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(footnotes: &[(u32, u32)]) -> Metadata {
        let mut metadata = Metadata::new();
        for &(section, number) in footnotes {
            metadata.record_footnote(section, number);
        }
        metadata
    }

    #[test]
    fn test_no_footnotes_is_identity() {
        let text = "One\n\nTwo";
        assert_eq!(reinsert_footnotes(text, &Metadata::new()).unwrap(), text);
    }

    #[test]
    fn test_reinsert() {
        let text = concat!(
            "Held one<ref name=\"ref1\"></ref> and two<ref name=\"ref2\"></ref>.\n\n",
            "It is so ordered.\n\n",
            "Footnote 1\n\n",
            "First note.\n\n",
            "Footnote 2\n\n",
            "Second note."
        );
        let out = reinsert_footnotes(text, &metadata(&[(1, 2)])).unwrap();
        assert_eq!(
            out,
            concat!(
                "Held one<ref name=\"ref1\">First note.</ref> and ",
                "two<ref name=\"ref2\">Second note.</ref>.\n\n",
                "It is so ordered."
            )
        );
    }

    #[test]
    fn test_multi_paragraph_footnote() {
        let text = concat!(
            "A<ref name=\"ref1\"></ref>B<ref name=\"ref2\"></ref>\n\n",
            "Footnote 1\n\nPart one.\n\nPart two.\n\n",
            "Footnote 2\n\nOnly.\n\nTrailing paragraph"
        );
        let out = reinsert_footnotes(text, &metadata(&[(1, 2)])).unwrap();
        assert_eq!(
            out,
            concat!(
                "A<ref name=\"ref1\">Part one.\n\nPart two.</ref>",
                "B<ref name=\"ref2\">Only.</ref>\n\n",
                "Trailing paragraph"
            )
        );
    }

    #[test]
    fn test_second_section() {
        let text = concat!(
            "Majority<ref name=\"ref1\"></ref>\n\n",
            "Dissent<ref name=\"ref2/1\"></ref>\n\n",
            "Footnote 1\n\nMajority note.\n\n",
            "Footnote 2/1\n\nDissent note."
        );
        let out = reinsert_footnotes(text, &metadata(&[(1, 1), (2, 1)])).unwrap();
        assert_eq!(
            out,
            concat!(
                "Majority<ref name=\"ref1\">Majority note.</ref>\n\n",
                "Dissent<ref name=\"ref2/1\">Dissent note.</ref>"
            )
        );
    }

    #[test]
    fn test_gap_is_missing_footnote() {
        let text = "A<ref name=\"ref1\"></ref>\n\nFootnote 1\n\nNote.\n\nFootnote 3\n\nNote.";
        match reinsert_footnotes(text, &metadata(&[(1, 3)])) {
            Err(BrandeisError::MissingFootnote { section, number }) => {
                assert_eq!((section, number), (1, 2));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_no_footnote_list() {
        let text = "A<ref name=\"ref1\"></ref>";
        assert!(matches!(
            reinsert_footnotes(text, &metadata(&[(1, 1)])),
            Err(BrandeisError::MissingFootnote { section: 1, number: 1 })
        ));
    }
}
