//! Brandeis Pipeline
//!
//! Runs one scraped opinion through every stage, from the raw page to the
//! final wikitext.
//!
//! # Stages
//!
//! 1. **Title** - read the case title from the first line ([`extract_title`])
//! 2. **Article** - drop the page chrome around the opinion ([`strip_extraneous`])
//! 3. **Lex and parse** - tokens to wikitext ([`brandeis_parser`])
//! 4. **Tidy** - normalise blank lines and line-edge whitespace ([`tidy`])
//! 5. **Footnotes** - move footnote bodies into their refs ([`reinsert_footnotes`])
//! 6. **Sectionize** - mark where each part of the opinion starts ([`sectionize`])
//!
//! Footnotes and sectionize can be switched off in [`StagesConfig`].
//!
//! # Example
//!
//! ```
//! use brandeis_config::Config;
//! use brandeis_pipeline::Pipeline;
//!
//! let page = "<h1>Roe v. Wade - 410 U.S. 113 (1973)</h1>\n<p>It is so ordered.</p>\n";
//! let doc = Pipeline::new(Config::default()).convert(page).unwrap();
//! assert_eq!(doc.wikitext, "It is so ordered.");
//! assert_eq!(doc.metadata.title().unwrap().date, "1973");
//! ```
//!
//! [`StagesConfig`]: brandeis_config::StagesConfig

pub mod extract;
pub mod footnotes;
pub mod sectionize;
pub mod tidy;

pub use extract::{extract_title, strip_extraneous};
pub use footnotes::reinsert_footnotes;
pub use sectionize::sectionize;
pub use tidy::tidy;

use std::path::Path;

use brandeis_config::Config;
use brandeis_core::{Metadata, Result};
use brandeis_parser::{tokenize, Lexeme, Parser};
use log::{debug, info, warn};

/// A converted document.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Final wikitext
    pub wikitext: String,
    /// Everything recorded about the document along the way
    pub metadata: Metadata,
    /// Token stream the wikitext was produced from
    pub lexemes: Vec<Lexeme>,
}

/// Document conversion pipeline.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: Config,
    parser: Parser,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        let parser = Parser::with_links(config.links.clone());
        Self { config, parser }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert one scraped page.
    ///
    /// Any failing stage aborts the conversion.
    pub fn convert(&self, page: &str) -> Result<Conversion> {
        let mut metadata = Metadata::with_title(extract_title(page)?);

        let body = match strip_extraneous(page) {
            Some(article) => article,
            None => {
                warn!("No main article found, converting the whole page");
                page.to_string()
            }
        };

        let lexemes = tokenize(&body)?;
        debug!("Lexed {} tokens", lexemes.len());

        let parsed = self.parser.parse_to_string(&lexemes, &mut metadata)?;
        let mut wikitext = tidy(&parsed);

        let stages = &self.config.stages;
        if stages.footnotes {
            wikitext = reinsert_footnotes(&wikitext, &metadata)?;
        }
        if stages.sectionize {
            wikitext = sectionize(&wikitext, &self.config.sectionize, &mut metadata);
        }

        Ok(Conversion {
            wikitext,
            metadata,
            lexemes,
        })
    }

    /// Read and convert one file.
    pub fn convert_file(&self, path: &Path) -> Result<Conversion> {
        info!("Converting {}", path.display());
        let page = std::fs::read_to_string(path)?;
        self.convert(&page)
    }
}
