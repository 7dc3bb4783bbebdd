//! Brandeis Core
//!
//! This crate provides core types, the shared document metadata, and error
//! definitions for the brandeis court-opinion converter.
//!
//! # Overview
//!
//! The core crate contains:
//! - [`Metadata`] - The additive context object threaded through every stage
//! - [`LexMode`], [`TokenKind`] - Lexer mode and token category enums
//! - [`BrandeisError`] - Error types
//! - [`Position`] - Source location of a token or failure

pub mod enums;
pub mod error;
pub mod metadata;
pub mod types;

pub use enums::{LexMode, TokenKind};
pub use error::{BrandeisError, Result};
pub use metadata::{CaseTitle, Metadata, SectionMarkers};
pub use types::Position;
