//! Frame geometry calculations
//!
//! Frames are described in the coordinate system a reader sees: origin at the
//! top-left of the visible page, x growing right and y growing down, in points.
//! [`PageBox::to_user_space`] maps such a rectangle back into the page's own
//! bottom-left-origin, unrotated user space, which is what content streams use.

/// Margins between the page edges and the frame, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Margins {
    /// Create margins with same value on all sides
    pub fn uniform(margin: f64) -> Self {
        Self {
            left: margin,
            right: margin,
            top: margin,
            bottom: margin,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(FrameOptions::DEFAULT_MARGIN)
    }
}

/// Everything needed to frame a document
///
/// Negative margins or thickness are passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOptions {
    pub margins: Margins,
    /// Stroke width of the frame line in points
    pub thickness: f64,
}

impl FrameOptions {
    pub const DEFAULT_MARGIN: f64 = 20.0;
    pub const DEFAULT_THICKNESS: f64 = 2.0;
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            thickness: Self::DEFAULT_THICKNESS,
        }
    }
}

/// Width and height of the visible page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

/// Frame rectangle in top-left-origin page coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl FrameRect {
    /// Compute the frame for a page of the given size
    ///
    /// No clamping is applied: margins larger than the page produce an
    /// inverted rectangle, see [`FrameRect::is_degenerate`].
    pub fn for_page(size: PageSize, margins: &Margins) -> Self {
        Self {
            left: margins.left,
            top: margins.top,
            right: size.width - margins.right,
            bottom: size.height - margins.bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// True when the rectangle has no area or its edges are swapped
    pub fn is_degenerate(&self) -> bool {
        // NaN margins must not slip through as a valid frame
        !(self.width() > 0.0 && self.height() > 0.0)
    }
}

/// Axis-aligned rectangle in PDF user space (bottom-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A page's visible box together with its display rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    /// Clockwise rotation in degrees: 0, 90, 180 or 270
    pub rotate: i64,
}

impl PageBox {
    /// Build a page box from raw `[x0 y0 x1 y1]` corners and a `/Rotate` value
    ///
    /// Corners may come in any order. Rotations are normalized into 0..360;
    /// anything that is not a multiple of 90 is treated as no rotation.
    pub fn new(corners: [f64; 4], rotate: i64) -> Self {
        let [ax, ay, bx, by] = corners;
        let rotate = match rotate.rem_euclid(360) {
            r @ (0 | 90 | 180 | 270) => r,
            _ => 0,
        };

        Self {
            x0: ax.min(bx),
            y0: ay.min(by),
            x1: ax.max(bx),
            y1: ay.max(by),
            rotate,
        }
    }

    /// Size of the page as displayed, after rotation
    pub fn size(&self) -> PageSize {
        let width = self.x1 - self.x0;
        let height = self.y1 - self.y0;

        if self.rotate == 90 || self.rotate == 270 {
            PageSize { width: height, height: width }
        } else {
            PageSize { width, height }
        }
    }

    /// Map a top-left-origin point of the displayed page into user space
    fn point_to_user_space(&self, u: f64, v: f64) -> (f64, f64) {
        match self.rotate {
            90 => (self.x0 + v, self.y0 + u),
            180 => (self.x1 - u, self.y0 + v),
            270 => (self.x1 - v, self.y1 - u),
            _ => (self.x0 + u, self.y1 - v),
        }
    }

    /// Map a frame rectangle into the page's unrotated user space
    pub fn to_user_space(&self, rect: &FrameRect) -> UserRect {
        let (ax, ay) = self.point_to_user_space(rect.left, rect.top);
        let (bx, by) = self.point_to_user_space(rect.right, rect.bottom);

        UserRect {
            x: ax.min(bx),
            y: ay.min(by),
            width: (ax - bx).abs(),
            height: (ay - by).abs(),
        }
    }
}
