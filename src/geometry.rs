//! Box representations, Intersection-over-Union and coordinate rescaling.
//!
//! Detector heads emit center-form boxes; overlap tests and downstream
//! consumers want corner form. Conversion is a pure function and boxes are
//! only ever held in one form at a time.

/// Box described by its center and extent, in model-input pixel units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CenterBox {
    /// Center x coordinate.
    pub cx: f32,
    /// Center y coordinate.
    pub cy: f32,
    /// Box width.
    pub w: f32,
    /// Box height.
    pub h: f32,
}

impl CenterBox {
    /// Converts to corner form.
    #[inline]
    pub fn to_corners(self) -> CornerBox {
        CornerBox {
            x1: self.cx - self.w / 2.0,
            y1: self.cy - self.h / 2.0,
            x2: self.cx + self.w / 2.0,
            y2: self.cy + self.h / 2.0,
        }
    }
}

/// Box described by its top-left and bottom-right corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerBox {
    /// Left edge.
    pub x1: f32,
    /// Top edge.
    pub y1: f32,
    /// Right edge.
    pub x2: f32,
    /// Bottom edge.
    pub y2: f32,
}

impl CornerBox {
    /// Returns the box area, clamped at zero for degenerate boxes.
    #[inline]
    pub fn area(self) -> f32 {
        (self.x2 - self.x1).max(0.0) * (self.y2 - self.y1).max(0.0)
    }
}

/// Width and height of an image or model input, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Size {
    /// Creates a size from width and height.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Computes Intersection-over-Union of two corner-form boxes.
///
/// Returns a value in `[0, 1]`. A zero-area union yields `0.0`, so
/// degenerate boxes never count as overlapping anything.
pub fn iou(a: CornerBox, b: CornerBox) -> f32 {
    let ix1 = a.x1.max(b.x1);
    let iy1 = a.y1.max(b.y1);
    let ix2 = a.x2.min(b.x2);
    let iy2 = a.y2.min(b.y2);

    let inter = (ix2 - ix1).max(0.0) * (iy2 - iy1).max(0.0);
    let union = a.area() + b.area() - inter;

    if union > 0.0 {
        inter / union
    } else {
        0.0
    }
}

/// Linearly rescales a box from one coordinate space to another.
///
/// Each axis scales independently by `to / from`; `rescale(b, s, s)` is the
/// identity. Used to map model-input-space boxes back to original-image
/// pixel space.
pub fn rescale(bbox: CornerBox, from: Size, to: Size) -> CornerBox {
    let sx = to.width / from.width;
    let sy = to.height / from.height;
    CornerBox {
        x1: bbox.x1 * sx,
        y1: bbox.y1 * sy,
        x2: bbox.x2 * sx,
        y2: bbox.y2 * sy,
    }
}
