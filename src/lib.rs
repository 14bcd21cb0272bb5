//! PDF Border Frame Library
//!
//! Draws a rectangular border frame on every page of a PDF document.
//! This library provides functionality to:
//! - Compute a frame rectangle from per-side margins and each page's size
//! - Stroke that rectangle onto every page with lopdf
//! - Save the framed copy next to the input as `<stem>_framed.pdf`
//!
//! # Example
//!
//! ```no_run
//! use pdf_border_frame::layout::FrameOptions;
//! use pdf_border_frame::pdf::apply_frame;
//! use std::path::Path;
//!
//! let output = apply_frame(Path::new("slides.pdf"), &FrameOptions::default())
//!     .expect("Failed to frame PDF");
//! println!("Saved {}", output.display());
//! ```

pub mod error;
pub mod pdf;
pub mod layout;

// Re-export commonly used items
pub use error::{Error, Result};
