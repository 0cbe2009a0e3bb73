//! Edge and corner resize handles
//!
//! Each of the eight handles resizes along its horizontal component, its
//! vertical component, or both. Each axis is checked against the window's
//! size limits on its own: a rejected width does not stop the height from
//! changing. Vertical handles can also snap the window to the full height
//! of its monitor, on release or on double click.

use tracing::{debug, info};

use crate::app::controller::WindowController;
use crate::domain::core::Rect;
use crate::domain::direction::{Direction, HDirection, VDirection};
use crate::domain::snap;
use crate::input::pointer::{MouseButton, PointerEvent, PointerPhase};
use crate::platform::monitors::ScreenLayoutService;
use crate::platform::window::HostWindow;

impl<H: HostWindow, S: ScreenLayoutService> WindowController<H, S> {
    pub(crate) fn handle_resize(&mut self, direction: Direction, phase: PointerPhase, event: &PointerEvent) {
        match phase {
            PointerPhase::Pressed => self.resize_pressed(event),
            PointerPhase::Dragged => self.resize_dragged(direction, event),
            PointerPhase::Released => self.resize_released(direction, event),
            PointerPhase::Clicked => self.resize_clicked(direction, event),
        }
    }

    fn resize_pressed(&mut self, event: &PointerEvent) {
        if !event.primary_down || self.state.snapped {
            return;
        }
        self.snapshot.record(self.host.bounds());
    }

    fn resize_dragged(&mut self, direction: Direction, event: &PointerEvent) {
        if !event.primary_down {
            return;
        }

        let pointer = event.screen;
        let bounds = self.host.bounds();
        let limits = self.host.size_limits();
        let home = self.home_monitor(&bounds);

        if self.config.prevent_cursor_over_taskbar {
            if let Some(monitor) = home {
                self.limit_pointer(&monitor.visual_bounds, pointer);
            }
        }

        let mut next = bounds;

        if let Some(horizontal) = direction.horizontal() {
            let width = match horizontal {
                HDirection::Left => bounds.right() - pointer.x,
                HDirection::Right => pointer.x - bounds.x,
            };
            if limits.accepts_width(width) {
                if horizontal == HDirection::Left {
                    next.x = pointer.x;
                }
                next.w = width;
            } else {
                debug!(width, "resize width rejected");
            }
        }

        let mut vertical_step = None;

        if let Some(vertical) = direction.vertical() {
            if let Some(monitor) = home {
                let screen = monitor.visual_bounds;
                let touches_side = next.x <= screen.x || next.right() >= screen.right();
                if self.state.snapped && !touches_side {
                    next.h = self.snapshot.size_or(bounds.size()).height;
                    self.set_snapped(false);
                    debug!("resized off vertical snap");
                }
            }

            let height = match vertical {
                VDirection::Top => bounds.bottom() - pointer.y,
                VDirection::Bottom => pointer.y - bounds.y,
            };
            if limits.accepts_height(height) {
                if vertical == VDirection::Top {
                    next.y = pointer.y;
                }
                next.h = height;
                vertical_step = Some(vertical);
            } else {
                debug!(height, "resize height rejected");
            }
        }

        self.apply_bounds(next);

        let Some(vertical) = vertical_step else {
            return;
        };
        if !(self.config.aero_snap && self.config.vertical_resize_snap) {
            return;
        }
        let Some(monitor) = home else {
            return;
        };

        let screen = monitor.visual_bounds;
        let window = self.host.bounds();
        if snap::vertical_resize_snap_legal(
            vertical,
            window.y,
            pointer.y,
            &screen,
            self.config.edge_allowance,
        ) {
            self.show_preview(Rect::new(window.x, screen.y, window.w, screen.h));
        } else {
            self.end_preview();
        }
    }

    fn resize_released(&mut self, direction: Direction, event: &PointerEvent) {
        if let Some(vertical) = direction.vertical() {
            if self.config.vertical_resize_snap && event.button == MouseButton::Primary {
                self.commit_vertical_snap(vertical, event);
            }
        }

        if self.config.aero_snap {
            self.end_preview();
        }
    }

    fn commit_vertical_snap(&mut self, vertical: VDirection, event: &PointerEvent) {
        let Some(monitor) = self.monitor_under(event.screen) else {
            debug!(pointer = ?event.screen, "resize released outside every monitor");
            return;
        };

        let screen = monitor.visual_bounds;
        let window = self.host.bounds();
        if snap::vertical_resize_snap_legal(
            vertical,
            window.y,
            event.screen.y,
            &screen,
            self.config.edge_allowance,
        ) {
            self.apply_bounds(Rect::new(window.x, screen.y, window.w, screen.h));
            self.set_snapped(true);
            info!(?vertical, "snapped to full height");
        }
    }

    /// Double click on a vertical handle toggles full height at the current X
    fn resize_clicked(&mut self, direction: Direction, event: &PointerEvent) {
        if !event.is_primary_double_click() || direction.vertical().is_none() {
            return;
        }

        let window = self.host.bounds();

        if self.state.snapped {
            let size = self.snapshot.size_or(window.size());
            let position = self.snapshot.position_or(window.origin());
            self.apply_bounds(Rect::new(window.x, position.y, window.w, size.height));
            self.set_snapped(false);
            info!("restored height from vertical snap");
        } else if let Some(monitor) = self.home_monitor(&window) {
            let screen = monitor.visual_bounds;
            self.snapshot.record_vertical(window.y, window.h);
            self.apply_bounds(Rect::new(window.x, screen.y, window.w, screen.h));
            self.set_snapped(true);
            info!("snapped to full height");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChromeConfig;
    use crate::domain::core::{Point, Size};
    use crate::input::pointer::PointerTarget;
    use crate::platform::headless::{HeadlessScreens, HeadlessWindow};
    use crate::platform::window::SizeLimits;
    use crate::ui::overlay::HeadlessOverlayBackend;

    type TestController = WindowController<HeadlessWindow, HeadlessScreens>;

    fn controller(window: HeadlessWindow) -> TestController {
        let mut c = WindowController::new(
            window,
            HeadlessScreens::single(1920.0, 1080.0, 40.0),
            Box::new(HeadlessOverlayBackend::new()),
            ChromeConfig::default(),
        )
        .unwrap();
        c.on_shown();
        c
    }

    fn send(c: &mut TestController, direction: Direction, phase: PointerPhase, x: f64, y: f64) {
        let event = PointerEvent::primary(Point::new(x, y), &c.host().bounds());
        let event = if phase == PointerPhase::Released {
            event.released()
        } else {
            event
        };
        c.handle_pointer(PointerTarget::ResizeHandle(direction), phase, &event);
    }

    #[test]
    fn right_handle_anchors_left_edge() {
        let mut c = controller(HeadlessWindow::new(Rect::new(100.0, 100.0, 800.0, 600.0)));
        send(&mut c, Direction::Right, PointerPhase::Pressed, 900.0, 300.0);
        send(&mut c, Direction::Right, PointerPhase::Dragged, 1000.0, 300.0);
        assert_eq!(c.host().bounds(), Rect::new(100.0, 100.0, 900.0, 600.0));
    }

    #[test]
    fn top_left_handle_anchors_bottom_right() {
        let mut c = controller(HeadlessWindow::new(Rect::new(100.0, 100.0, 800.0, 600.0)));
        send(&mut c, Direction::TopLeft, PointerPhase::Pressed, 100.0, 100.0);
        send(&mut c, Direction::TopLeft, PointerPhase::Dragged, 50.0, 80.0);
        assert_eq!(c.host().bounds(), Rect::new(50.0, 80.0, 850.0, 620.0));
    }

    #[test]
    fn rejected_width_still_allows_height() {
        let window = HeadlessWindow::new(Rect::new(100.0, 100.0, 800.0, 600.0)).with_size_limits(
            SizeLimits {
                min: Size::new(400.0, 200.0),
                max: Size::new(1000.0, 1000.0),
            },
        );
        let mut c = controller(window);
        send(&mut c, Direction::BottomRight, PointerPhase::Pressed, 900.0, 700.0);
        // Width would be 1500, above the max
        send(&mut c, Direction::BottomRight, PointerPhase::Dragged, 1600.0, 800.0);
        assert_eq!(c.host().bounds(), Rect::new(100.0, 100.0, 800.0, 700.0));
    }

    #[test]
    fn resize_keeps_pointer_off_the_taskbar() {
        let mut c = controller(HeadlessWindow::new(Rect::new(100.0, 100.0, 800.0, 600.0)));
        send(&mut c, Direction::BottomRight, PointerPhase::Pressed, 900.0, 700.0);
        send(&mut c, Direction::BottomRight, PointerPhase::Dragged, 1000.0, 1060.0);
        assert_eq!(c.host().pointer_warps(), &[Point::new(999.0, 1039.0)]);

        // Inside the visual bounds nothing is warped
        send(&mut c, Direction::BottomRight, PointerPhase::Dragged, 1000.0, 900.0);
        assert_eq!(c.host().pointer_warps().len(), 1);

        c.set_prevent_cursor_over_taskbar(false);
        send(&mut c, Direction::BottomRight, PointerPhase::Dragged, 1000.0, 1070.0);
        assert_eq!(c.host().pointer_warps().len(), 1);
    }

    #[test]
    fn pointer_crossing_the_anchor_is_rejected() {
        let mut c = controller(HeadlessWindow::new(Rect::new(100.0, 100.0, 800.0, 600.0)));
        send(&mut c, Direction::Left, PointerPhase::Dragged, 950.0, 300.0);
        assert_eq!(c.host().bounds(), Rect::new(100.0, 100.0, 800.0, 600.0));
    }

    #[test]
    fn handles_are_disabled_when_fixed_or_maximized() {
        let mut c = controller(HeadlessWindow::new(Rect::new(100.0, 100.0, 800.0, 600.0)));
        c.set_resizable(false);
        send(&mut c, Direction::Right, PointerPhase::Dragged, 1000.0, 300.0);
        assert_eq!(c.width(), 800.0);

        c.set_resizable(true);
        c.set_maximized(true);
        send(&mut c, Direction::Right, PointerPhase::Dragged, 1000.0, 300.0);
        assert_eq!(c.width(), 1920.0);
    }

    #[test]
    fn top_handle_snap_is_judged_by_window_top() {
        let mut c = controller(HeadlessWindow::new(Rect::new(100.0, 100.0, 800.0, 600.0)));
        send(&mut c, Direction::Top, PointerPhase::Pressed, 300.0, 100.0);
        send(&mut c, Direction::Top, PointerPhase::Dragged, 300.0, 5.0);

        let overlay = c.overlay().unwrap();
        assert!(overlay.is_visible());
        assert_eq!(overlay.bounds(), Rect::new(100.0, 0.0, 800.0, 1040.0));
        assert!(c.host().is_always_on_top());

        send(&mut c, Direction::Top, PointerPhase::Released, 300.0, 5.0);
        assert!(c.snapped());
        assert_eq!(c.host().bounds(), Rect::new(100.0, 0.0, 800.0, 1040.0));
        assert!(!c.overlay().unwrap().is_visible());
        assert!(!c.host().is_always_on_top());
    }

    #[test]
    fn bottom_handle_snap_is_judged_by_pointer() {
        let mut c = controller(HeadlessWindow::new(Rect::new(100.0, 100.0, 800.0, 600.0)));
        send(&mut c, Direction::Bottom, PointerPhase::Pressed, 300.0, 700.0);
        send(&mut c, Direction::Bottom, PointerPhase::Dragged, 300.0, 790.0);
        assert!(!c.overlay().unwrap().is_visible());

        // The window's bottom edge is still at 790; only the pointer is near
        // the bottom of the monitor
        send(&mut c, Direction::Bottom, PointerPhase::Released, 300.0, 1035.0);
        assert!(c.snapped());
        assert_eq!(c.host().bounds(), Rect::new(100.0, 0.0, 800.0, 1040.0));
    }

    #[test]
    fn top_handle_ignores_pointer_near_bottom() {
        let mut c = controller(HeadlessWindow::new(Rect::new(100.0, 100.0, 800.0, 600.0)));
        send(&mut c, Direction::Top, PointerPhase::Released, 300.0, 1035.0);
        assert!(!c.snapped());
    }

    #[test]
    fn vertical_double_click_toggles_full_height() {
        let mut c = controller(HeadlessWindow::new(Rect::new(100.0, 100.0, 800.0, 600.0)));
        let click = PointerEvent::primary(Point::new(300.0, 700.0), &c.host().bounds()).with_clicks(2);

        c.handle_pointer(PointerTarget::ResizeHandle(Direction::Bottom), PointerPhase::Clicked, &click);
        assert!(c.snapped());
        assert_eq!(c.host().bounds(), Rect::new(100.0, 0.0, 800.0, 1040.0));

        c.handle_pointer(PointerTarget::ResizeHandle(Direction::Bottom), PointerPhase::Clicked, &click);
        assert!(!c.snapped());
        assert_eq!(c.host().bounds(), Rect::new(100.0, 100.0, 800.0, 600.0));
    }

    #[test]
    fn horizontal_double_click_does_nothing() {
        let mut c = controller(HeadlessWindow::new(Rect::new(100.0, 100.0, 800.0, 600.0)));
        let click = PointerEvent::primary(Point::new(900.0, 300.0), &c.host().bounds()).with_clicks(2);
        c.handle_pointer(PointerTarget::ResizeHandle(Direction::Right), PointerPhase::Clicked, &click);
        assert!(!c.snapped());
        assert_eq!(c.host().bounds(), Rect::new(100.0, 100.0, 800.0, 600.0));
    }

    #[test]
    fn resizing_snapped_window_away_from_sides_unsnaps() {
        let mut c = controller(HeadlessWindow::new(Rect::new(100.0, 100.0, 800.0, 600.0)));
        let click = PointerEvent::primary(Point::new(300.0, 700.0), &c.host().bounds()).with_clicks(2);
        c.handle_pointer(PointerTarget::ResizeHandle(Direction::Bottom), PointerPhase::Clicked, &click);
        assert!(c.snapped());

        // Pointer far above the bottom edge keeps the snap preview hidden
        send(&mut c, Direction::Bottom, PointerPhase::Dragged, 300.0, 500.0);
        assert!(!c.snapped());
        assert_eq!(c.host().bounds(), Rect::new(100.0, 0.0, 800.0, 500.0));
    }
}
