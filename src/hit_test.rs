use crate::geometry::{CropRect, Scale};
use crate::pointer::PointerSample;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// What part of the crop box the pointer is over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Region {
    #[default]
    None,
    Move,
    Corner(Corner),
}

/// Classifies pointer positions against the crop box.
///
/// Zones are tested in a fixed order and a later match replaces an earlier
/// one: move, then top-left, bottom-left, top-right, bottom-right. On boxes
/// smaller than two corner zones this means the bottom/right corners win.
#[derive(Clone, Copy, Debug)]
pub struct HitTester {
    /// Half-width of the move zone, client pixels.
    pub move_radius: f64,
    /// Half-width of a corner zone, intrinsic pixels.
    pub corner_radius: f64,
    pub move_enabled: bool,
    pub corners_enabled: bool,
}

impl HitTester {
    pub fn new(move_radius: f64, corner_radius: f64) -> Self {
        Self {
            move_radius,
            corner_radius,
            move_enabled: true,
            corners_enabled: true,
        }
    }

    pub fn classify(&self, pointer: &PointerSample, rect: CropRect, scale: Scale) -> Region {
        let mut region = Region::None;

        if self.move_enabled {
            // Move zone lives in client space around the box center.
            let cx = rect.x / scale.x + rect.size / scale.x / 2.0;
            let cy = rect.y / scale.y + rect.size / scale.y / 2.0;
            if within(pointer.offset_x, cx, self.move_radius)
                && within(pointer.offset_y, cy, self.move_radius)
            {
                region = Region::Move;
            }
        }

        if self.corners_enabled {
            let px = pointer.offset_x * scale.x;
            let py = pointer.offset_y * scale.y;
            let r = self.corner_radius;
            let top = within(py, rect.y, r);
            let bottom = within(py, rect.bottom(), r);

            if within(px, rect.x, r) {
                if top {
                    region = Region::Corner(Corner::TopLeft);
                }
                if bottom {
                    region = Region::Corner(Corner::BottomLeft);
                }
            }
            if within(px, rect.right(), r) {
                if top {
                    region = Region::Corner(Corner::TopRight);
                }
                if bottom {
                    region = Region::Corner(Corner::BottomRight);
                }
            }
        }

        region
    }
}

fn within(value: f64, center: f64, radius: f64) -> bool {
    value >= center - radius && value <= center + radius
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tester() -> HitTester {
        HitTester::new(10.0, 15.0)
    }

    #[test]
    fn center_is_move() {
        let rect = CropRect::new(0.0, 0.0, 200.0);
        let region = tester().classify(&PointerSample::at(100.0, 100.0), rect, Scale::IDENTITY);
        assert_eq!(region, Region::Move);
    }

    #[test]
    fn move_zone_edge_is_inclusive() {
        let rect = CropRect::new(0.0, 0.0, 200.0);
        let region = tester().classify(&PointerSample::at(110.0, 90.0), rect, Scale::IDENTITY);
        assert_eq!(region, Region::Move);
    }

    #[test]
    fn just_outside_move_zone_is_none() {
        let rect = CropRect::new(0.0, 0.0, 200.0);
        let region = tester().classify(&PointerSample::at(121.0, 100.0), rect, Scale::IDENTITY);
        assert_eq!(region, Region::None);
    }

    #[test]
    fn move_zone_is_in_client_space() {
        // 400px box rendered at half size: center is at client (100, 100).
        let rect = CropRect::new(0.0, 0.0, 200.0);
        let scale = Scale { x: 2.0, y: 2.0 };
        assert_eq!(
            tester().classify(&PointerSample::at(50.0, 50.0), rect, scale),
            Region::Move
        );
        assert_eq!(
            tester().classify(&PointerSample::at(100.0, 100.0), rect, scale),
            Region::None
        );
    }

    #[test]
    fn each_corner_is_found() {
        let rect = CropRect::new(100.0, 100.0, 200.0);
        let t = tester();
        let at = |x, y| t.classify(&PointerSample::at(x, y), rect, Scale::IDENTITY);
        assert_eq!(at(95.0, 110.0), Region::Corner(Corner::TopLeft));
        assert_eq!(at(310.0, 90.0), Region::Corner(Corner::TopRight));
        assert_eq!(at(100.0, 300.0), Region::Corner(Corner::BottomLeft));
        assert_eq!(at(315.0, 285.0), Region::Corner(Corner::BottomRight));
    }

    #[test]
    fn corner_zone_is_in_intrinsic_space() {
        // Pointer 10 client px from the corner at scale 2 is 20 intrinsic px away.
        let rect = CropRect::new(100.0, 100.0, 200.0);
        let scale = Scale { x: 2.0, y: 2.0 };
        assert_eq!(
            tester().classify(&PointerSample::at(40.0, 50.0), rect, scale),
            Region::None
        );
        assert_eq!(
            tester().classify(&PointerSample::at(45.0, 50.0), rect, scale),
            Region::Corner(Corner::TopLeft)
        );
    }

    #[test]
    fn tiny_box_resolves_to_last_corner() {
        // Every zone overlaps on a 10px box; bottom-right is evaluated last.
        let rect = CropRect::new(50.0, 50.0, 10.0);
        let region = tester().classify(&PointerSample::at(55.0, 55.0), rect, Scale::IDENTITY);
        assert_eq!(region, Region::Corner(Corner::BottomRight));
    }

    #[test]
    fn disabled_corners_leave_move_zone() {
        let rect = CropRect::new(50.0, 50.0, 10.0);
        let mut t = tester();
        t.corners_enabled = false;
        let region = t.classify(&PointerSample::at(55.0, 55.0), rect, Scale::IDENTITY);
        assert_eq!(region, Region::Move);
    }

    #[test]
    fn disabled_move_zone_is_none() {
        let rect = CropRect::new(0.0, 0.0, 200.0);
        let mut t = tester();
        t.move_enabled = false;
        let region = t.classify(&PointerSample::at(100.0, 100.0), rect, Scale::IDENTITY);
        assert_eq!(region, Region::None);
    }
}
