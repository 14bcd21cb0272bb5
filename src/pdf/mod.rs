//! PDF manipulation module

pub mod document;
pub mod frame;

// Re-export commonly used items
pub use document::{FrameDocument, LopdfDocument};
pub use frame::{apply_frame, apply_frame_with, frame_document, framed_output_path, FRAMED_SUFFIX};
