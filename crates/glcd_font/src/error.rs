//! Unified error types for glcd_font

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for font loading and conversion
#[derive(Debug, Error)]
pub enum FontError {
    // === I/O Errors ===
    #[error("Failed to open font file '{path}': {source}")]
    FileNotFound { path: PathBuf, source: std::io::Error },

    #[error("Failed to open mapping table '{path}': {source}")]
    TableLoad { path: PathBuf, source: std::io::Error },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === BDF Errors ===
    #[error("BDF line {line}: {kind}")]
    Structural { line: usize, kind: StructuralError },

    // === Encoding Errors ===
    #[error("JIS code 0x{jis:04x} (Shift_JIS 0x{sjis:04x}) has no Unicode mapping")]
    UnmappedCodePoint { jis: u32, sjis: u32 },
}

/// BDF grammar invariants a font file can break.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("glyph height {height} differs from font bounding box height {expected}")]
    HeightMismatch { height: u32, expected: u32 },

    #[error("bitmap row has {digits} hex digits, expected {expected}")]
    RowWidthMismatch { digits: usize, expected: usize },

    #[error("glyph has {rows} bitmap rows, expected {expected}")]
    RowCountMismatch { rows: usize, expected: u32 },

    #[error("BBX before FONTBOUNDINGBOX")]
    MissingFontBoundingBox,

    #[error("bitmap row before BBX")]
    MissingBoundingBox,

    #[error("invalid bitmap row '{0}'")]
    InvalidHexRow(String),

    #[error("glyph width {0} exceeds 32 pixels")]
    WidthTooLarge(u32),

    #[error("glyph has no ENCODING or a negative one")]
    MissingEncoding,

    #[error("file ends inside BITMAP")]
    UnterminatedGlyph,

    #[error("number out of range in '{0}'")]
    InvalidNumber(String),
}

/// Result type alias for glcd_font operations
pub type Result<T> = std::result::Result<T, FontError>;

// === Convenience constructors ===
impl FontError {
    /// Create a structural error at the given 1-based line number
    pub fn structural(line: usize, kind: StructuralError) -> Self {
        Self::Structural { line, kind }
    }

    /// Returns the broken invariant if this is a structural error
    pub fn structural_kind(&self) -> Option<&StructuralError> {
        match self {
            Self::Structural { kind, .. } => Some(kind),
            _ => None,
        }
    }
}
