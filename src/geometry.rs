//! Crop-box geometry and the clamps that keep it square and inside the image.
//!
//! Everything here is in intrinsic (source) pixels unless a name says
//! otherwise. Nothing in this module mutates shared state: callers pass a
//! rectangle in and get a proposed rectangle back.

/// Intrinsic size of the source image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageBounds {
    pub width: f64,
    pub height: f64,
}

impl ImageBounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
        }
    }

    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}

/// The square crop box. Width and height are the same value, `size`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl CropRect {
    pub fn new(x: f64, y: f64, size: f64) -> Self {
        Self { x, y, size }
    }

    pub fn right(&self) -> f64 {
        self.x + self.size
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.size
    }

    /// Grow the box by `margin` on every side, for restore blits.
    pub fn inflate(&self, margin: f64) -> PixelRect {
        PixelRect::new(
            self.x - margin,
            self.y - margin,
            self.size + margin * 2.0,
            self.size + margin * 2.0,
        )
    }

    pub fn to_pixel_rect(&self) -> PixelRect {
        PixelRect::new(self.x, self.y, self.size, self.size)
    }

    /// True when the box lies inside `bounds` and has a non-negative size.
    pub fn is_within(&self, bounds: ImageBounds) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.size >= 0.0
            && self.right() <= bounds.width
            && self.bottom() <= bounds.height
    }
}

/// A general axis-aligned rectangle, used at the drawing-surface boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl PixelRect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_size(w: f64, h: f64) -> Self {
        Self::new(0.0, 0.0, w, h)
    }
}

/// Ratio of intrinsic pixels to rendered (client) pixels on each axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

impl Default for Scale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Scale {
    pub const IDENTITY: Scale = Scale { x: 1.0, y: 1.0 };

    /// Scale for a surface of `intrinsic` pixels currently shown at
    /// `rendered` size. A surface that is not laid out yet (zero rendered
    /// size) is treated as 1:1.
    pub fn from_sizes(intrinsic: (u32, u32), rendered: (f32, f32)) -> Self {
        let axis = |intrinsic: u32, rendered: f32| {
            if rendered > 0.0 {
                intrinsic as f64 / rendered as f64
            } else {
                1.0
            }
        };
        Self {
            x: axis(intrinsic.0, rendered.0),
            y: axis(intrinsic.1, rendered.1),
        }
    }
}

/// The box a new session starts with: anchored at the origin, its side a
/// fraction of the image's short axis.
pub fn initial_rect(bounds: ImageBounds, fraction: f64) -> CropRect {
    let axis = if bounds.is_landscape() {
        bounds.height
    } else {
        bounds.width
    };
    CropRect::new(0.0, 0.0, axis * fraction)
}

/// Keep `value` in `[0, max]`. The lower bound wins when `max` is negative.
pub fn clamp_axis(value: f64, max: f64) -> f64 {
    value.min(max).max(0.0)
}

/// Clamp the origin so the box stays inside `bounds`, each axis on its own.
/// The size is left alone.
pub fn clamp_origin(rect: CropRect, bounds: ImageBounds) -> CropRect {
    CropRect {
        x: clamp_axis(rect.x, bounds.width - rect.size),
        y: clamp_axis(rect.y, bounds.height - rect.size),
        size: rect.size,
    }
}

/// Collapsed boxes restart from zero instead of carrying a negative size.
pub fn floor_size(rect: CropRect) -> CropRect {
    if rect.size <= 0.0 {
        CropRect { size: 0.0, ..rect }
    } else {
        rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_uses_height_for_initial_box() {
        let rect = initial_rect(ImageBounds::new(400, 300), 2.0 / 3.0);
        assert_eq!(rect, CropRect::new(0.0, 0.0, 200.0));
    }

    #[test]
    fn portrait_uses_width_for_initial_box() {
        let rect = initial_rect(ImageBounds::new(300, 600), 2.0 / 3.0);
        assert_eq!(rect, CropRect::new(0.0, 0.0, 200.0));
    }

    #[test]
    fn square_image_initial_box_fits() {
        let bounds = ImageBounds::new(300, 300);
        let rect = initial_rect(bounds, 2.0 / 3.0);
        assert_eq!(rect.size, 200.0);
        assert!(rect.is_within(bounds));
    }

    #[test]
    fn clamp_origin_is_independent_per_axis() {
        let bounds = ImageBounds::new(400, 300);
        let rect = clamp_origin(CropRect::new(-30.0, 250.0, 200.0), bounds);
        assert_eq!(rect, CropRect::new(0.0, 100.0, 200.0));
    }

    #[test]
    fn clamp_origin_leaves_inside_box_untouched() {
        let bounds = ImageBounds::new(400, 300);
        let rect = CropRect::new(12.5, 40.0, 100.0);
        assert_eq!(clamp_origin(rect, bounds), rect);
    }

    #[test]
    fn floor_size_zeroes_negative() {
        let rect = floor_size(CropRect::new(10.0, 10.0, -3.0));
        assert_eq!(rect.size, 0.0);
        assert_eq!(rect.x, 10.0);
    }

    #[test]
    fn scale_from_unlaid_surface_is_identity() {
        assert_eq!(Scale::from_sizes((400, 300), (0.0, 0.0)), Scale::IDENTITY);
    }

    #[test]
    fn scale_is_intrinsic_over_rendered() {
        let scale = Scale::from_sizes((400, 300), (200.0, 100.0));
        assert_eq!(scale, Scale { x: 2.0, y: 3.0 });
    }
}
