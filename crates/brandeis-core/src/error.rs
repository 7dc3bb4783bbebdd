//! Error types for brandeis

use thiserror::Error;

use crate::enums::TokenKind;
use crate::types::Position;

/// Main error type for brandeis operations.
///
/// Every variant is fatal for the document being processed.
#[derive(Error, Debug)]
pub enum BrandeisError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No lexer rule matched the character at this position
    #[error("Illegal character {character:?} at {position}")]
    IllegalCharacter { character: char, position: Position },

    /// HTML entity name outside the known table
    #[error("Unknown HTML entity '&{0};'")]
    Entity(String),

    /// A footnote expected in sequence was not found in the footnote list
    #[error("Missing footnote {number} in section {section}")]
    MissingFootnote { section: u32, number: u32 },

    /// The document does not start with a recognisable title line
    #[error("No case title found in document")]
    MissingTitle,

    /// A transformation failed while dispatching a token
    #[error("Transformation for {kind} token at {position} failed: {source}")]
    Transform {
        kind: TokenKind,
        position: Position,
        #[source]
        source: Box<BrandeisError>,
    },
}

/// Result type alias for brandeis operations
pub type Result<T> = std::result::Result<T, BrandeisError>;
