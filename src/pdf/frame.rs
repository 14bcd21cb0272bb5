//! Drawing border frames on every page of a PDF

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use log::{debug, info};
use crate::error::{Error, Result};
use crate::layout::{FrameOptions, FrameRect};
use super::document::{FrameDocument, LopdfDocument};

/// Appended to the input file stem to name the output file
pub const FRAMED_SUFFIX: &str = "_framed.pdf";

/// Draw a frame on every page of `input_path` and save the result next to it
///
/// The output lands at [`framed_output_path`] of the input, overwriting any
/// file already there. Returns the output path.
///
/// # Example
///
/// ```no_run
/// use pdf_border_frame::layout::{FrameOptions, Margins};
/// use pdf_border_frame::pdf::apply_frame;
/// use std::path::Path;
///
/// let options = FrameOptions {
///     margins: Margins::uniform(36.0),
///     thickness: 1.5,
/// };
///
/// let output = apply_frame(Path::new("report.pdf"), &options)
///     .expect("Failed to frame PDF");
/// assert_eq!(output, Path::new("report_framed.pdf"));
/// ```
pub fn apply_frame(input_path: &Path, options: &FrameOptions) -> Result<PathBuf> {
    apply_frame_with(input_path, options, LopdfDocument::open)
}

/// Same as [`apply_frame`], with the document opened by `open`
///
/// The opened document is dropped before this returns, on success and on
/// every error after a successful open. A failed open yields no document,
/// so nothing is released.
pub fn apply_frame_with<D, F>(input_path: &Path, options: &FrameOptions, open: F) -> Result<PathBuf>
where
    D: FrameDocument,
    F: FnOnce(&Path) -> Result<D>,
{
    if input_path.to_str().is_none() {
        return Err(Error::PathEncoding(input_path.to_path_buf()));
    }

    let mut doc = open(input_path)?;

    let page_count = frame_document(&mut doc, options)?;

    let output_path = framed_output_path(input_path);
    doc.save(&output_path)?;

    info!("Framed {} pages into {}", page_count, output_path.display());

    Ok(output_path)
}

/// Draw a frame on each page of an open document, in order
///
/// Every page's frame is computed from that page's own size. Stops at the
/// first page whose geometry is unusable or whose frame would be empty.
/// Returns the number of pages framed.
pub fn frame_document<D: FrameDocument>(doc: &mut D, options: &FrameOptions) -> Result<usize> {
    let pages = doc.pages();

    for (index, page) in pages.iter().enumerate() {
        let page_number = index + 1;
        let page_box = doc.page_box(*page)?;

        let rect = FrameRect::for_page(page_box.size(), &options.margins);
        if rect.is_degenerate() {
            return Err(Error::DegenerateFrame { page: page_number, rect });
        }

        let user_rect = page_box.to_user_space(&rect);
        debug!(
            "Page {}: frame ({}, {}, {}, {}) -> {:?}",
            page_number, rect.left, rect.top, rect.right, rect.bottom, user_rect
        );

        doc.draw_rectangle(*page, &user_rect, options.thickness)?;
    }

    Ok(pages.len())
}

/// Output path for a framed copy of `input_path`
///
/// Only the final extension is replaced: `archive.v2.pdf` becomes
/// `archive.v2_framed.pdf`, and `noext` becomes `noext_framed.pdf`.
pub fn framed_output_path(input_path: &Path) -> PathBuf {
    let mut name = input_path
        .file_stem()
        .map(OsStr::to_os_string)
        .unwrap_or_default();
    name.push(FRAMED_SUFFIX);
    input_path.with_file_name(name)
}
