//! Error types for the PDF border frame library

use std::path::PathBuf;
use thiserror::Error;

use crate::layout::FrameRect;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the PDF border frame library
#[derive(Error, Debug)]
pub enum Error {
    /// Input path is not valid Unicode
    #[error(
        "Input file path encoding issue ({}). Please ensure the file path is UTF-8 encoded.",
        .0.display()
    )]
    PathEncoding(PathBuf),

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The document could not be loaded
    #[error("Cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    /// A page is missing or has malformed geometry
    #[error("Page {page}: {reason}")]
    InvalidPage { page: usize, reason: String },

    /// Margins leave no room for a frame on this page
    #[error(
        "Page {page}: margins produce an empty or inverted frame \
         (left {:.2}, top {:.2}, right {:.2}, bottom {:.2})",
        .rect.left, .rect.top, .rect.right, .rect.bottom
    )]
    DegenerateFrame { page: usize, rect: FrameRect },

    /// Writing the framed document failed
    #[error("Cannot save {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
}
