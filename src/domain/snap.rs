//! Aero-snap direction resolution
//!
//! Maps a pointer position on a monitor to the edge or corner it is snapping
//! to, and each direction to the region of the monitor it fills. Corners are
//! tested before edges so a corner gesture is never swallowed by the wider
//! edge band.

use crate::domain::core::{Point, Rect};
use crate::domain::direction::{Direction, VDirection};

/// Edge and corner trigger widths
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapAllowance {
    /// Distance from an edge that triggers an edge snap
    pub edge: f64,
    /// Distance from both edges of a corner that triggers a corner snap
    pub corner: f64,
}

/// Resolves the snap direction for `pointer` on a monitor with `visual_bounds`.
pub fn resolve(pointer: Point, visual_bounds: &Rect, allowance: SnapAllowance) -> Option<Direction> {
    let near_top = |band: f64| pointer.y <= visual_bounds.y + band;
    let near_bottom = |band: f64| pointer.y >= visual_bounds.bottom() - band;
    let near_left = |band: f64| pointer.x <= visual_bounds.x + band;
    let near_right = |band: f64| pointer.x >= visual_bounds.right() - band;

    let corner = allowance.corner;
    let edge = allowance.edge;

    if near_top(corner) && near_right(corner) {
        Some(Direction::TopRight)
    } else if near_top(corner) && near_left(corner) {
        Some(Direction::TopLeft)
    } else if near_bottom(corner) && near_right(corner) {
        Some(Direction::BottomRight)
    } else if near_bottom(corner) && near_left(corner) {
        Some(Direction::BottomLeft)
    } else if near_right(edge) {
        Some(Direction::Right)
    } else if near_left(edge) {
        Some(Direction::Left)
    } else if near_top(edge) {
        Some(Direction::Top)
    } else if near_bottom(edge) {
        Some(Direction::Bottom)
    } else {
        None
    }
}

/// Region of the monitor a snap in `direction` fills.
///
/// `min_width` only applies to the half-width side tiles.
pub fn target_rect(direction: Direction, visual_bounds: &Rect, min_width: f64) -> Rect {
    let screen = visual_bounds;
    let half_w = screen.w / 2.0;
    let half_h = screen.h / 2.0;

    match direction {
        Direction::TopRight => Rect::new(screen.x + half_w, screen.y, half_w, half_h),
        Direction::TopLeft => Rect::new(screen.x, screen.y, half_w, half_h),
        Direction::BottomRight => {
            Rect::new(screen.x + half_w, screen.bottom() - half_h, half_w, half_h)
        }
        Direction::BottomLeft => Rect::new(screen.x, screen.bottom() - half_h, half_w, half_h),
        Direction::Right => {
            let width = half_w.max(min_width);
            Rect::new(screen.right() - width, screen.y, width, screen.h)
        }
        Direction::Left => Rect::new(screen.x, screen.y, half_w.max(min_width), screen.h),
        Direction::Top | Direction::Bottom => *screen,
    }
}

/// Whether a vertical resize may snap to the monitor's full height.
///
/// The top handle is judged by the window's own top edge while the bottom
/// handle is judged by the pointer. The two anchors differ on purpose.
pub fn vertical_resize_snap_legal(
    handle: VDirection,
    window_top: f64,
    pointer_y: f64,
    visual_bounds: &Rect,
    edge_allowance: f64,
) -> bool {
    let upper_boundary = visual_bounds.y + edge_allowance;
    let lower_boundary = visual_bounds.bottom() - edge_allowance;

    match handle {
        VDirection::Top => window_top <= upper_boundary,
        VDirection::Bottom => pointer_y >= lower_boundary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SCREEN: Rect = Rect {
        x: 0.0,
        y: 0.0,
        w: 1920.0,
        h: 1080.0,
    };

    fn allowance(edge: f64, corner: f64) -> SnapAllowance {
        SnapAllowance { edge, corner }
    }

    #[test]
    fn right_edge_resolves_right() {
        let direction = resolve(Point::new(1915.0, 500.0), &SCREEN, allowance(10.0, 50.0));
        assert_eq!(direction, Some(Direction::Right));
        assert_eq!(
            target_rect(Direction::Right, &SCREEN, 0.0),
            Rect::new(960.0, 0.0, 960.0, 1080.0)
        );
    }

    #[test]
    fn each_edge_and_corner_resolves() {
        let a = allowance(10.0, 50.0);
        let cases = [
            (Point::new(1900.0, 20.0), Direction::TopRight),
            (Point::new(20.0, 20.0), Direction::TopLeft),
            (Point::new(1900.0, 1060.0), Direction::BottomRight),
            (Point::new(20.0, 1060.0), Direction::BottomLeft),
            (Point::new(5.0, 500.0), Direction::Left),
            (Point::new(900.0, 5.0), Direction::Top),
            (Point::new(900.0, 1075.0), Direction::Bottom),
        ];
        for (pointer, expected) in cases {
            assert_eq!(resolve(pointer, &SCREEN, a), Some(expected), "{pointer:?}");
        }
    }

    #[test]
    fn corner_beats_edge() {
        // Inside both the right edge band and the top-right corner band
        let direction = resolve(Point::new(1918.0, 2.0), &SCREEN, allowance(10.0, 50.0));
        assert_eq!(direction, Some(Direction::TopRight));
    }

    #[test]
    fn offset_monitor_uses_its_own_bounds() {
        let second = Rect::new(1920.0, -200.0, 1280.0, 1024.0);
        let direction = resolve(Point::new(1925.0, 300.0), &second, allowance(10.0, 50.0));
        assert_eq!(direction, Some(Direction::Left));
        assert_eq!(
            target_rect(Direction::BottomRight, &second, 0.0),
            Rect::new(2560.0, 312.0, 640.0, 512.0)
        );
    }

    #[test]
    fn side_tiles_honour_minimum_width() {
        let rect = target_rect(Direction::Right, &SCREEN, 1200.0);
        assert_eq!(rect, Rect::new(720.0, 0.0, 1200.0, 1080.0));
        let rect = target_rect(Direction::Left, &SCREEN, 1200.0);
        assert_eq!(rect, Rect::new(0.0, 0.0, 1200.0, 1080.0));
    }

    #[test]
    fn top_and_bottom_fill_the_monitor() {
        assert_eq!(target_rect(Direction::Top, &SCREEN, 0.0), SCREEN);
        assert_eq!(target_rect(Direction::Bottom, &SCREEN, 0.0), SCREEN);
    }

    #[test]
    fn vertical_snap_uses_window_top_for_top_handle() {
        // Pointer far from the top, but the window's top edge is near it
        assert!(vertical_resize_snap_legal(VDirection::Top, 5.0, 600.0, &SCREEN, 10.0));
        // Pointer at the very top, but the window's top edge is far away
        assert!(!vertical_resize_snap_legal(VDirection::Top, 300.0, 0.0, &SCREEN, 10.0));
    }

    #[test]
    fn vertical_snap_uses_pointer_for_bottom_handle() {
        assert!(vertical_resize_snap_legal(VDirection::Bottom, 500.0, 1075.0, &SCREEN, 10.0));
        assert!(!vertical_resize_snap_legal(VDirection::Bottom, 0.0, 1000.0, &SCREEN, 10.0));
    }

    proptest! {
        #[test]
        fn interior_points_resolve_to_none(
            x in 51.0f64..1869.0,
            y in 51.0f64..1029.0,
        ) {
            prop_assert_eq!(resolve(Point::new(x, y), &SCREEN, allowance(10.0, 50.0)), None);
        }

        #[test]
        fn corner_bands_always_resolve_to_corners(
            dx in 0.0f64..=50.0,
            dy in 0.0f64..=50.0,
        ) {
            let a = allowance(10.0, 50.0);
            let top_right = resolve(Point::new(SCREEN.right() - dx, SCREEN.y + dy), &SCREEN, a);
            let bottom_left = resolve(Point::new(SCREEN.x + dx, SCREEN.bottom() - dy), &SCREEN, a);
            prop_assert_eq!(top_right, Some(Direction::TopRight));
            prop_assert_eq!(bottom_left, Some(Direction::BottomLeft));
        }
    }
}
