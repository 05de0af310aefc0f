use crate::geometry::{CropRect, ImageBounds, Scale, clamp_origin};
use crate::pointer::PointerSample;

/// Center the box under the pointer, then clamp each axis into the image on
/// its own. The size never changes.
pub fn apply_move(
    pointer: &PointerSample,
    rect: CropRect,
    bounds: ImageBounds,
    scale: Scale,
) -> CropRect {
    let x = (pointer.offset_x - rect.size / scale.x / 2.0) * scale.x;
    let y = (pointer.offset_y - rect.size / scale.y / 2.0) * scale.y;
    clamp_origin(CropRect::new(x, y, rect.size), bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: ImageBounds = ImageBounds {
        width: 400.0,
        height: 300.0,
    };

    #[test]
    fn pointer_at_center_changes_nothing() {
        let rect = CropRect::new(40.0, 30.0, 200.0);
        let moved = apply_move(&PointerSample::at(140.0, 130.0), rect, BOUNDS, Scale::IDENTITY);
        assert_eq!(moved, rect);
    }

    #[test]
    fn out_of_bounds_on_both_axes_clamps_each() {
        // Pointer places the top-left at (-30, 250).
        let rect = CropRect::new(0.0, 0.0, 200.0);
        let moved = apply_move(&PointerSample::at(70.0, 350.0), rect, BOUNDS, Scale::IDENTITY);
        assert_eq!(moved, CropRect::new(0.0, 100.0, 200.0));
    }

    #[test]
    fn one_axis_out_of_bounds_still_moves_other() {
        let rect = CropRect::new(0.0, 0.0, 100.0);
        let moved = apply_move(&PointerSample::at(20.0, 150.0), rect, BOUNDS, Scale::IDENTITY);
        assert_eq!(moved, CropRect::new(0.0, 100.0, 100.0));
    }

    #[test]
    fn scaled_surface_maps_to_intrinsic_pixels() {
        // Surface rendered at half size: client (100, 75) is intrinsic (200, 150).
        let rect = CropRect::new(0.0, 0.0, 100.0);
        let scale = Scale { x: 2.0, y: 2.0 };
        let moved = apply_move(&PointerSample::at(100.0, 75.0), rect, BOUNDS, scale);
        assert_eq!(moved, CropRect::new(150.0, 100.0, 100.0));
    }

    #[test]
    fn far_bottom_right_snaps_to_edge() {
        let rect = CropRect::new(0.0, 0.0, 200.0);
        let moved = apply_move(&PointerSample::at(9000.0, 9000.0), rect, BOUNDS, Scale::IDENTITY);
        assert_eq!(moved, CropRect::new(200.0, 100.0, 200.0));
        assert!(moved.is_within(BOUNDS));
    }
}
