//! Page access and drawing on top of lopdf
//!
//! [`FrameDocument`] is the small surface the frame applicator needs from a
//! PDF library. [`LopdfDocument`] implements it for files loaded with lopdf.

use std::path::{Path, PathBuf};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use log::debug;
use crate::error::{Error, Result};
use crate::layout::{PageBox, UserRect};

/// Operations the frame applicator performs on an open document
///
/// Dropping the value releases the document.
pub trait FrameDocument {
    /// Handle identifying one page
    type Page: Copy;

    /// Pages in document order
    fn pages(&self) -> Vec<Self::Page>;

    /// Visible box and rotation of a page
    fn page_box(&self, page: Self::Page) -> Result<PageBox>;

    /// Stroke an unfilled rectangle onto a page, in the page's user space
    fn draw_rectangle(&mut self, page: Self::Page, rect: &UserRect, stroke_width: f64) -> Result<()>;

    /// Write the document to `path`, replacing any existing file
    fn save(&mut self, path: &Path) -> Result<()>;
}

/// A PDF loaded into memory with lopdf
pub struct LopdfDocument {
    doc: Document,
    path: PathBuf,
}

impl LopdfDocument {
    /// Load a PDF from disk
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let doc = Document::load(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Opened {} ({} pages)", path.display(), doc.get_pages().len());

        Ok(Self {
            doc,
            path: path.to_path_buf(),
        })
    }
}

impl Drop for LopdfDocument {
    fn drop(&mut self) {
        debug!("Closing {}", self.path.display());
    }
}

impl FrameDocument for LopdfDocument {
    type Page = ObjectId;

    fn pages(&self) -> Vec<ObjectId> {
        // get_pages is keyed by 1-based page number, so values come out in order
        self.doc.get_pages().into_values().collect()
    }

    fn page_box(&self, page: ObjectId) -> Result<PageBox> {
        // Page number is only looked up once something is wrong
        let invalid = |reason: String| Error::InvalidPage { page: self.page_number(page), reason };

        let box_obj = match resolve_inherited(&self.doc, page, b"CropBox")? {
            Some(obj) => obj,
            None => resolve_inherited(&self.doc, page, b"MediaBox")?
                .ok_or_else(|| invalid("no MediaBox on page or its ancestors".to_string()))?,
        };

        let array = deref(&self.doc, box_obj)?
            .as_array()
            .map_err(|e| invalid(format!("page box is not an array: {e}")))?;
        let corners = box_corners(&self.doc, array).map_err(invalid)?;

        let rotate = match resolve_inherited(&self.doc, page, b"Rotate")? {
            Some(obj) => deref(&self.doc, obj)?
                .as_i64()
                .map_err(|e| invalid(format!("Rotate is not an integer: {e}")))?,
            None => 0,
        };

        Ok(PageBox::new(corners, rotate))
    }

    fn draw_rectangle(&mut self, page: ObjectId, rect: &UserRect, stroke_width: f64) -> Result<()> {
        // Isolate whatever graphics state the existing content leaves behind
        let save_id = self.doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
        let restore_id = self.doc.add_object(Stream::new(Dictionary::new(), b"Q\n".to_vec()));

        let frame = frame_content(rect, stroke_width);
        let frame_id = self.doc.add_object(Stream::new(Dictionary::new(), frame.into_bytes()));

        wrap_page_contents(&mut self.doc, page, &[save_id], &[restore_id, frame_id])
    }

    fn save(&mut self, path: &Path) -> Result<()> {
        self.doc.save(path).map_err(|e| Error::Save {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        Ok(())
    }
}

impl LopdfDocument {
    /// 1-based page number for error messages
    fn page_number(&self, page: ObjectId) -> usize {
        self.doc
            .get_pages()
            .into_iter()
            .find(|(_, id)| *id == page)
            .map(|(number, _)| number as usize)
            .unwrap_or(0)
    }
}

/// Content stream that strokes `rect` in solid black
pub(crate) fn frame_content(rect: &UserRect, stroke_width: f64) -> String {
    format!(
        "q\n0 G\n{} w\n[] 0 d\n{} {} {} {} re\nS\nQ\n",
        format_number(stroke_width),
        format_number(rect.x),
        format_number(rect.y),
        format_number(rect.width),
        format_number(rect.height),
    )
}

/// Format a coordinate for a content stream
///
/// PDF has no exponent syntax, so values are written in plain decimal with
/// trailing zeros removed.
fn format_number(value: f64) -> String {
    let text = format!("{:.4}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "" | "-" | "-0" => "0".to_string(),
        _ => text.to_string(),
    }
}

/// Follow a reference to the object it points at
fn deref<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a Object> {
    match obj {
        Object::Reference(id) => Ok(doc.get_object(*id)?),
        _ => Ok(obj),
    }
}

/// Look up a key in the page dictionary, walking up the page tree
/// (via /Parent) if the key is not found on the page itself.
fn resolve_inherited<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Result<Option<&'a Object>> {
    let mut current_id = page_id;
    // Bounded so a cyclic /Parent chain cannot hang us
    for _ in 0..64 {
        let dict = doc.get_dictionary(current_id)?;

        if let Ok(value) = dict.get(key) {
            return Ok(Some(value));
        }

        match dict.get(b"Parent") {
            Ok(Object::Reference(parent_id)) => current_id = *parent_id,
            _ => return Ok(None),
        }
    }

    Ok(None)
}

/// Read the four numbers of a `[x0 y0 x1 y1]` box
fn box_corners(doc: &Document, array: &[Object]) -> std::result::Result<[f64; 4], String> {
    if array.len() != 4 {
        return Err(format!("expected 4-element page box, got {}", array.len()));
    }

    let mut corners = [0.0; 4];
    for (corner, obj) in corners.iter_mut().zip(array) {
        let obj = deref(doc, obj).map_err(|e| e.to_string())?;
        *corner = match obj {
            Object::Integer(i) => *i as f64,
            Object::Real(f) => *f as f64,
            _ => return Err(format!("expected number in page box, got {obj:?}")),
        };
    }

    Ok(corners)
}

/// Surround a page's existing content with extra content streams
///
/// `/Contents` may be a stream reference, an array of them, or a reference
/// to such an array; the result is always a flat array of stream references
/// written directly on the page. Streams in `after` are drawn on top.
fn wrap_page_contents(
    doc: &mut Document,
    page_id: ObjectId,
    before: &[ObjectId],
    after: &[ObjectId],
) -> Result<()> {
    let existing = match doc.get_dictionary(page_id)?.get(b"Contents") {
        Ok(Object::Reference(id)) => match doc.get_object(*id)? {
            Object::Array(items) => items.clone(),
            _ => vec![Object::Reference(*id)],
        },
        Ok(Object::Array(items)) => items.clone(),
        _ => Vec::new(),
    };

    let contents: Vec<Object> = before
        .iter()
        .map(|id| Object::Reference(*id))
        .chain(existing)
        .chain(after.iter().map(|id| Object::Reference(*id)))
        .collect();

    doc.get_dictionary_mut(page_id)?.set("Contents", Object::Array(contents));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    fn wrap(doc: Document) -> LopdfDocument {
        LopdfDocument { doc, path: PathBuf::new() }
    }

    /// Two-page document: page 1 has its own MediaBox, page 2 inherits
    /// A4 from the page tree and carries a CropBox
    fn sample_document() -> (Document, ObjectId, ObjectId) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"0 0 m 10 10 l S\n".to_vec()));
        let first = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
        });
        let second = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "CropBox" => vec![10.into(), 20.into(), Object::Real(585.5), 822.into()],
        });

        doc.objects.insert(pages_id, Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![first.into(), second.into()],
            "Count" => 2,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            "Rotate" => 90,
        }));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        (doc, first, second)
    }

    #[test]
    fn test_pages_in_document_order() {
        let (doc, first, second) = sample_document();
        let doc = wrap(doc);
        assert_eq!(doc.pages(), vec![first, second]);
    }

    #[test]
    fn test_page_box_reads_own_media_box() {
        let (doc, first, _) = sample_document();
        let doc = wrap(doc);
        let page_box = doc.page_box(first).unwrap();
        assert_eq!(page_box, PageBox::new([0.0, 0.0, 612.0, 792.0], 90));
    }

    #[test]
    fn test_page_box_prefers_crop_box() {
        let (doc, _, second) = sample_document();
        let doc = wrap(doc);
        let page_box = doc.page_box(second).unwrap();
        assert_eq!(page_box, PageBox::new([10.0, 20.0, 585.5, 822.0], 90));
    }

    #[test]
    fn test_page_box_missing() {
        let (mut doc, first, _) = sample_document();
        doc.get_dictionary_mut(first).unwrap().remove(b"MediaBox");
        let pages_id = doc.get_dictionary(first).unwrap().get(b"Parent").unwrap().as_reference().unwrap();
        doc.get_dictionary_mut(pages_id).unwrap().remove(b"MediaBox");

        let doc = wrap(doc);
        let err = doc.page_box(first).unwrap_err();
        assert!(matches!(err, Error::InvalidPage { page: 1, .. }));
    }

    #[test]
    fn test_draw_rectangle_wraps_existing_content() {
        let (doc, first, second) = sample_document();
        let mut doc = wrap(doc);
        let rect = UserRect { x: 20.0, y: 20.0, width: 572.0, height: 752.0 };

        doc.draw_rectangle(first, &rect, 2.0).unwrap();
        doc.draw_rectangle(second, &rect, 2.0).unwrap();

        let contents = doc.doc.get_dictionary(first).unwrap().get(b"Contents").unwrap();
        let ids: Vec<ObjectId> = contents
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o.as_reference().unwrap())
            .collect();
        assert_eq!(ids.len(), 4);

        let stream_text = |id: ObjectId| {
            let stream = doc.doc.get_object(id).unwrap().as_stream().unwrap();
            String::from_utf8(stream.content.clone()).unwrap()
        };
        assert_eq!(stream_text(ids[0]), "q\n");
        assert_eq!(stream_text(ids[1]), "0 0 m 10 10 l S\n");
        assert_eq!(stream_text(ids[2]), "Q\n");
        assert_eq!(stream_text(ids[3]), frame_content(&rect, 2.0));

        // Page without Contents gets q, Q and the frame
        let contents = doc.doc.get_dictionary(second).unwrap().get(b"Contents").unwrap();
        assert_eq!(contents.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_draw_rectangle_flattens_referenced_contents_array() {
        let (mut doc, first, _) = sample_document();
        let original = doc.get_dictionary(first).unwrap().get(b"Contents").unwrap().as_reference().unwrap();
        let array_id = doc.add_object(Object::Array(vec![original.into()]));
        doc.get_dictionary_mut(first).unwrap().set("Contents", array_id);

        let mut doc = wrap(doc);
        let rect = UserRect { x: 20.0, y: 20.0, width: 572.0, height: 752.0 };
        doc.draw_rectangle(first, &rect, 2.0).unwrap();

        let contents = doc.doc.get_dictionary(first).unwrap().get(b"Contents").unwrap();
        let entries = contents.as_array().unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[1].as_reference().unwrap(), original);
        for entry in entries {
            let id = entry.as_reference().unwrap();
            assert!(doc.doc.get_object(id).unwrap().as_stream().is_ok());
        }
    }

    #[test]
    fn test_frame_content_operators() {
        let rect = UserRect { x: 20.0, y: 20.0, width: 572.0, height: 752.0 };
        assert_eq!(
            frame_content(&rect, 2.0),
            "q\n0 G\n2 w\n[] 0 d\n20 20 572 752 re\nS\nQ\n"
        );

        let rect = UserRect { x: 10.25, y: 0.0, width: 100.5, height: 1e-7 };
        assert_eq!(
            frame_content(&rect, 0.75),
            "q\n0 G\n0.75 w\n[] 0 d\n10.25 0 100.5 0 re\nS\nQ\n"
        );
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(20.0), "20");
        assert_eq!(format_number(-5.5), "-5.5");
        assert_eq!(format_number(0.12345), "0.1235");
        assert_eq!(format_number(-0.00001), "0");
        assert_eq!(format_number(1e9), "1000000000");
    }

    #[test]
    fn test_open_missing_file() {
        let result = LopdfDocument::open(Path::new("nonexistent.pdf"));
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }
}
