//! Corner-drag resizing of the square crop box.
//!
//! Each corner moves along its own diagonal while the opposite corner stays
//! put. Breaching the top or left edge, or shrinking the box to nothing,
//! discards the whole tick's update instead of clamping.

use crate::config::valid_clearance;
use crate::geometry::{CropRect, ImageBounds, Scale, floor_size};
use crate::hit_test::Corner;

#[derive(Clone, Copy, Debug)]
pub struct ResizeEngine {
    /// Every delta is divided by this before use.
    pub zoom_clearance: f64,
}

impl Default for ResizeEngine {
    fn default() -> Self {
        Self { zoom_clearance: 2.0 }
    }
}

impl ResizeEngine {
    /// Falls back to the default clearance if `zoom_clearance` would turn
    /// deltas into inf or NaN.
    pub fn new(zoom_clearance: f64) -> Self {
        if !valid_clearance(zoom_clearance) {
            log::warn!("zoom_clearance {} unusable, using default", zoom_clearance);
            return Self::default();
        }
        Self { zoom_clearance }
    }

    /// Apply one tick of pointer movement (`delta`, client pixels) to `rect`
    /// dragged by `corner`.
    pub fn apply(
        &self,
        delta: (f64, f64),
        rect: CropRect,
        corner: Corner,
        bounds: ImageBounds,
        scale: Scale,
    ) -> CropRect {
        let before = floor_size(rect);
        let dx = delta.0 * scale.x / self.zoom_clearance;
        let dy = delta.1 * scale.y / self.zoom_clearance;
        let mut next = before;

        match corner {
            Corner::BottomRight => {
                next.size += dx + dy;
                if next.right() > bounds.width {
                    next.size = bounds.width - next.x;
                }
                if next.bottom() > bounds.height {
                    next.size = bounds.height - next.y;
                }
            }
            Corner::TopRight => {
                // Right and up both grow the box.
                let d = dx - dy;
                next.y -= d;
                next.size += d;
                if next.right() > bounds.width {
                    next.size = bounds.width - next.x;
                }
                if next.y <= 0.0 {
                    return before;
                }
            }
            Corner::BottomLeft => {
                // Left and down both grow the box.
                let d = dx - dy;
                next.x += d;
                next.size -= d;
                if next.x <= 0.0 {
                    return before;
                }
                if next.bottom() > bounds.height {
                    next.size = bounds.height - next.y;
                    next.x = before.x;
                }
            }
            Corner::TopLeft => {
                let d = dx + dy;
                next.x += d;
                next.y += d;
                next.size -= d;
                if next.x <= 0.0 || next.y <= 0.0 {
                    return before;
                }
            }
        }

        // A zero-size box overlaps every corner zone and can't be regrown
        // once it sits on the right or bottom edge.
        if next.size <= 0.0 {
            return before;
        }
        fit(next, bounds)
    }
}

/// Trim the size so the box ends inside the image on both axes.
fn fit(rect: CropRect, bounds: ImageBounds) -> CropRect {
    let size = rect
        .size
        .min(bounds.width - rect.x)
        .min(bounds.height - rect.y)
        .max(0.0);
    CropRect { size, ..rect }
}
