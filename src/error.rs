//! Error types for pdfmux.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdfmux operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving page ranges or assembling documents.
#[derive(Error, Debug)]
pub enum Error {
    /// The page range expression contains a malformed, empty, or
    /// out-of-order token.
    #[error("invalid page range token '{token}' in '{expression}'")]
    InvalidRange {
        /// The offending token, as written by the user.
        token: String,
        /// The full range expression the token came from.
        expression: String,
    },

    /// A resolved page index does not exist in the source document.
    #[error("page {page} is out of range (document has {total} pages)")]
    PageOutOfRange { page: usize, total: usize },

    /// Too few input files for the requested operation.
    #[error("at least {needed} input file(s) required, got {got}")]
    NotEnoughInputs { needed: usize, got: usize },

    /// A file could not be parsed as a PDF document.
    #[error("failed to load PDF {}: {source}", .path.display())]
    DocumentLoad {
        path: PathBuf,
        source: lopdf::Error,
    },

    /// An input to image conversion is neither JPEG nor PNG.
    #[error("{} is not a supported image type (expected JPEG or PNG)", .path.display())]
    UnsupportedImageType { path: PathBuf },

    /// A JPEG or PNG file could not be decoded.
    #[error("failed to decode image {}: {source}", .path.display())]
    ImageDecode {
        path: PathBuf,
        source: image::ImageError,
    },

    /// Error from the PDF library while assembling or saving a document.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
