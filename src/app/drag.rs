//! Move gesture on the designated move surface
//!
//! Press records the drag offset, drag moves the window and updates the
//! snap preview, release commits a snap, and a double click toggles
//! maximize. A maximized or snapped window is pulled back to its free size
//! under the pointer at the same relative position it was grabbed at.

use tracing::{debug, info, warn};

use crate::app::controller::{ChromeError, DragSession, WindowController};
use crate::app::state::{MaximizeOrigin, StateChange};
use crate::domain::core::{Point, Rect};
use crate::domain::snap;
use crate::input::pointer::{MouseButton, MoveSurface, PointerEvent, PointerPhase};
use crate::platform::monitors::{Monitor, ScreenLayoutService};
use crate::platform::window::HostWindow;

impl<H: HostWindow, S: ScreenLayoutService> WindowController<H, S> {
    pub(crate) fn handle_move(&mut self, surface: MoveSurface, phase: PointerPhase, event: &PointerEvent) {
        match phase {
            PointerPhase::Pressed => self.move_pressed(surface, event),
            PointerPhase::Dragged => self.move_dragged(event),
            PointerPhase::Released => self.move_released(event),
            PointerPhase::Clicked => self.move_clicked(event),
        }
    }

    fn move_pressed(&mut self, surface: MoveSurface, event: &PointerEvent) {
        if !event.primary_down {
            return;
        }

        let bounds = self.host.bounds();
        let delta = if self.state.is_managed() {
            // Grab the free-size window at the same relative spot
            let free = self.snapshot.size_or(bounds.size());
            Point::new(
                proportional(free.width, event.scene.x, bounds.w),
                proportional(free.height, event.scene.y, bounds.h),
            )
        } else {
            self.snapshot.record(bounds);
            event.scene
        };

        self.drag = Some(DragSession {
            delta,
            press_screen_x: event.screen.x,
            reference_y: bounds.y + surface.preferred_height,
        });
        debug!(?delta, "move gesture started");
    }

    fn move_dragged(&mut self, event: &PointerEvent) {
        if !event.primary_down {
            return;
        }
        let Some(session) = self.drag else {
            return;
        };

        let pointer = event.screen;
        let current = self.host.bounds();
        let mut next = current;

        if self.state.maximized {
            let free = self.snapshot.size_or(current.size());
            next.w = free.width;
            next.h = free.height;
            self.state.maximized = false;
            self.emit(StateChange::Maximized(false));
            self.set_snapped(false);
            info!("dragged out of maximized");
        }

        next.x = pointer.x - session.delta.x;

        if self.state.snapped {
            if pointer.y > session.reference_y {
                let free = self.snapshot.size_or(current.size());
                next.w = free.width;
                next.h = free.height;
                next.y = pointer.y - session.delta.y;
                self.set_snapped(false);
                info!("dragged off snap");
            } else if let Some(monitor) = self.monitor_under(pointer) {
                // Stay full height on whichever monitor the pointer is on
                next.h = monitor.visual_bounds.h;
            }
        } else {
            next.y = pointer.y - session.delta.y;
        }

        self.apply_bounds(next);

        let Some(monitor) = self.monitor_under(pointer) else {
            return;
        };

        if self.config.prevent_cursor_over_taskbar {
            self.limit_pointer(&monitor.visual_bounds, pointer);
        }

        if self.config.aero_snap {
            self.update_snap_preview(pointer, &monitor);
        }
    }

    fn update_snap_preview(&mut self, pointer: Point, monitor: &Monitor) {
        let direction = snap::resolve(pointer, &monitor.visual_bounds, self.config.allowance());

        match direction {
            Some(direction) if !self.config.is_disabled(direction) => {
                let target = snap::target_rect(
                    direction,
                    &monitor.visual_bounds,
                    self.config.overlay_min_width,
                );
                self.show_preview(target);
            }
            _ => self.end_preview(),
        }
    }

    fn move_released(&mut self, event: &PointerEvent) {
        let session = self.drag.take();

        if let Err(err) = self.commit_snap(session, event) {
            warn!(%err, "snap on release failed");
        }

        self.end_preview();
    }

    /// Applies the snap resolved at the release point, if any
    fn commit_snap(&mut self, session: Option<DragSession>, event: &PointerEvent) -> Result<(), ChromeError> {
        if !self.config.aero_snap || event.button != MouseButton::Primary {
            return Ok(());
        }
        let Some(session) = session else {
            return Ok(());
        };
        // A press and release in place is not a drag
        if event.screen.x == session.press_screen_x {
            return Ok(());
        }

        let Some(monitor) = self.monitor_under(event.screen) else {
            debug!(pointer = ?event.screen, "released outside every monitor");
            return Ok(());
        };

        let allowance = self.config.allowance();
        let Some(direction) = snap::resolve(event.screen, &monitor.visual_bounds, allowance) else {
            return Ok(());
        };
        if self.config.is_disabled(direction) {
            debug!(?direction, "snap direction disabled");
            return Ok(());
        }

        if direction.maximizes() {
            self.set_maximized_from(true, MaximizeOrigin::Snap);
        } else {
            let target = snap::target_rect(
                direction,
                &monitor.visual_bounds,
                self.config.overlay_min_width,
            );
            self.try_apply_bounds(target)?;
            self.set_snapped(true);
            info!(?direction, ?target, "snapped");
        }
        Ok(())
    }

    fn move_clicked(&mut self, event: &PointerEvent) {
        if !event.is_primary_double_click() || !self.config.double_click_maximize {
            return;
        }

        if !self.state.snapped {
            self.maximize_toggle();
            return;
        }

        self.set_snapped(false);
        let current = self.host.bounds();
        let free = Rect::from_parts(current.origin(), self.snapshot.size_or(current.size()));
        let target = match self.home_monitor(&free) {
            Some(monitor) => self.clamped_restore_target(&monitor.visual_bounds),
            None => self.snapshot.bounds_or(current),
        };
        self.apply_bounds(target);
        info!(?target, "restored from snap");
    }
}

/// `free * (offset / current)`, or the raw offset for a degenerate window
fn proportional(free: f64, offset: f64, current: f64) -> f64 {
    if current > 0.0 {
        free * (offset / current)
    } else {
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChromeConfig;
    use crate::domain::core::Size;
    use crate::domain::direction::Direction;
    use crate::input::pointer::{PointerTarget, SurfaceId};
    use crate::platform::headless::{HeadlessScreens, HeadlessWindow};
    use crate::platform::window::{SizeLimits, WindowError, WindowHandle};
    use crate::ui::overlay::HeadlessOverlayBackend;

    const TITLE: MoveSurface = MoveSurface {
        id: SurfaceId(1),
        preferred_height: 30.0,
    };

    fn controller(bounds: Rect) -> WindowController<HeadlessWindow, HeadlessScreens> {
        let mut c = WindowController::new(
            HeadlessWindow::new(bounds),
            HeadlessScreens::single(1920.0, 1080.0, 0.0),
            Box::new(HeadlessOverlayBackend::new()),
            ChromeConfig::default(),
        )
        .unwrap();
        c.set_move_control(TITLE);
        c.on_shown();
        c
    }

    fn send(c: &mut WindowController<HeadlessWindow, HeadlessScreens>, phase: PointerPhase, x: f64, y: f64) {
        let event = PointerEvent::primary(Point::new(x, y), &c.host().bounds());
        let event = if phase == PointerPhase::Released {
            event.released()
        } else {
            event
        };
        c.handle_pointer(PointerTarget::Surface(TITLE.id), phase, &event);
    }

    #[test]
    fn drag_moves_window_by_pointer_offset() {
        let mut c = controller(Rect::new(100.0, 100.0, 800.0, 600.0));
        send(&mut c, PointerPhase::Pressed, 150.0, 110.0);
        send(&mut c, PointerPhase::Dragged, 450.0, 310.0);
        assert_eq!(c.host().bounds(), Rect::new(400.0, 300.0, 800.0, 600.0));
        send(&mut c, PointerPhase::Released, 450.0, 310.0);
        assert!(!c.snapped());
        assert!(!c.host().is_always_on_top());
    }

    #[test]
    fn events_on_other_surfaces_are_ignored() {
        let mut c = controller(Rect::new(100.0, 100.0, 800.0, 600.0));
        let event = PointerEvent::primary(Point::new(150.0, 110.0), &c.host().bounds());
        c.handle_pointer(PointerTarget::Surface(SurfaceId(9)), PointerPhase::Pressed, &event);
        assert!(c.drag.is_none());
    }

    #[test]
    fn drag_without_primary_button_does_nothing() {
        let mut c = controller(Rect::new(100.0, 100.0, 800.0, 600.0));
        send(&mut c, PointerPhase::Pressed, 150.0, 110.0);
        let event = PointerEvent::primary(Point::new(600.0, 600.0), &c.host().bounds()).released();
        c.handle_pointer(PointerTarget::Surface(TITLE.id), PointerPhase::Dragged, &event);
        assert_eq!(c.host().bounds(), Rect::new(100.0, 100.0, 800.0, 600.0));
    }

    #[test]
    fn dragging_maximized_window_restores_size_under_pointer() {
        let mut c = controller(Rect::new(100.0, 100.0, 800.0, 600.0));
        c.set_maximized(true);

        // Grab the title bar at the horizontal middle of the screen
        send(&mut c, PointerPhase::Pressed, 960.0, 10.0);
        send(&mut c, PointerPhase::Dragged, 960.0, 200.0);

        assert!(!c.is_maximized());
        let bounds = c.host().bounds();
        assert_eq!(bounds.size(), Size::new(800.0, 600.0));
        // Same relative x: half of the free width left of the pointer
        assert_eq!(bounds.x, 560.0);
    }

    #[test]
    fn quarter_snap_preview_follows_pointer() {
        let mut c = controller(Rect::new(100.0, 100.0, 800.0, 600.0));
        send(&mut c, PointerPhase::Pressed, 150.0, 110.0);
        send(&mut c, PointerPhase::Dragged, 1900.0, 20.0);

        let overlay = c.overlay().unwrap();
        assert!(overlay.is_visible());
        assert_eq!(overlay.bounds(), Rect::new(960.0, 0.0, 960.0, 540.0));
        assert!(c.host().is_always_on_top());

        send(&mut c, PointerPhase::Dragged, 900.0, 500.0);
        assert!(!c.overlay().unwrap().is_visible());
        assert!(!c.host().is_always_on_top());
    }

    #[test]
    fn top_release_maximizes_without_resnapshot() {
        let mut c = controller(Rect::new(100.0, 100.0, 800.0, 600.0));
        send(&mut c, PointerPhase::Pressed, 150.0, 110.0);
        send(&mut c, PointerPhase::Dragged, 900.0, 5.0);
        send(&mut c, PointerPhase::Released, 900.0, 5.0);

        assert!(c.is_maximized());
        assert!(!c.snapped());
        c.set_maximized(false);
        assert_eq!(c.host().bounds(), Rect::new(100.0, 100.0, 800.0, 600.0));
    }

    #[test]
    fn release_in_place_does_not_snap() {
        let mut c = controller(Rect::new(1500.0, 100.0, 400.0, 300.0));
        send(&mut c, PointerPhase::Pressed, 1915.0, 110.0);
        send(&mut c, PointerPhase::Released, 1915.0, 110.0);
        assert!(!c.snapped());
    }

    #[test]
    fn secondary_release_does_not_snap() {
        let mut c = controller(Rect::new(100.0, 100.0, 800.0, 600.0));
        send(&mut c, PointerPhase::Pressed, 150.0, 110.0);
        send(&mut c, PointerPhase::Dragged, 1915.0, 500.0);
        let event = PointerEvent::primary(Point::new(1915.0, 500.0), &c.host().bounds())
            .with_button(MouseButton::Secondary);
        c.handle_pointer(PointerTarget::Surface(TITLE.id), PointerPhase::Released, &event);
        assert!(!c.snapped());
        assert!(!c.overlay().unwrap().is_visible());
        assert!(!c.host().is_always_on_top());
    }

    #[test]
    fn double_click_on_snapped_window_restores_clamped() {
        // Free geometry hangs off the left edge and is wider than the monitor
        let mut c = controller(Rect::new(-300.0, 700.0, 2400.0, 600.0));
        send(&mut c, PointerPhase::Pressed, -290.0, 710.0);
        send(&mut c, PointerPhase::Dragged, 10.0, 500.0);
        send(&mut c, PointerPhase::Released, 10.0, 500.0);
        assert!(c.snapped());
        assert_eq!(c.host().bounds(), Rect::new(0.0, 0.0, 960.0, 1080.0));

        let event = PointerEvent::primary(Point::new(100.0, 10.0), &c.host().bounds()).with_clicks(2);
        c.handle_pointer(PointerTarget::Surface(TITLE.id), PointerPhase::Clicked, &event);

        assert!(!c.snapped());
        assert_eq!(c.host().bounds(), Rect::new(0.0, 700.0, 1920.0, 600.0));
        assert_eq!(c.snapshot().bounds_or(Rect::default()), Rect::new(-300.0, 700.0, 2400.0, 600.0));
    }

    /// Headless window whose `set_bounds` can be switched to fail
    struct FailingHost {
        inner: HeadlessWindow,
        fail_bounds: bool,
    }

    impl HostWindow for FailingHost {
        fn handle(&self) -> WindowHandle {
            self.inner.handle()
        }

        fn bounds(&self) -> Rect {
            self.inner.bounds()
        }

        fn set_bounds(&mut self, bounds: Rect) -> Result<(), WindowError> {
            if self.fail_bounds {
                return Err(WindowError::PositionFailed(self.inner.handle()));
            }
            self.inner.set_bounds(bounds)
        }

        fn size_limits(&self) -> SizeLimits {
            self.inner.size_limits()
        }

        fn set_always_on_top(&mut self, on_top: bool) -> Result<(), WindowError> {
            self.inner.set_always_on_top(on_top)
        }

        fn set_iconified(&mut self, iconified: bool) -> Result<(), WindowError> {
            self.inner.set_iconified(iconified)
        }

        fn warp_pointer(&mut self, to: Point) -> Result<(), WindowError> {
            self.inner.warp_pointer(to)
        }
    }

    #[test]
    fn failed_snap_still_cleans_up_on_release() {
        let host = FailingHost {
            inner: HeadlessWindow::new(Rect::new(100.0, 100.0, 800.0, 600.0)),
            fail_bounds: false,
        };
        let mut c = WindowController::new(
            host,
            HeadlessScreens::single(1920.0, 1080.0, 0.0),
            Box::new(HeadlessOverlayBackend::new()),
            ChromeConfig::default(),
        )
        .unwrap();
        c.set_move_control(TITLE);
        c.on_shown();

        let title = |c: &mut WindowController<FailingHost, HeadlessScreens>, phase: PointerPhase, x: f64, y: f64| {
            let event = PointerEvent::primary(Point::new(x, y), &c.host().bounds());
            let event = if phase == PointerPhase::Released {
                event.released()
            } else {
                event
            };
            c.handle_pointer(PointerTarget::Surface(TITLE.id), phase, &event);
        };

        title(&mut c, PointerPhase::Pressed, 150.0, 110.0);
        title(&mut c, PointerPhase::Dragged, 1915.0, 500.0);
        assert!(c.overlay().unwrap().is_visible());
        assert!(c.host().inner.is_always_on_top());

        c.host_mut().fail_bounds = true;
        let before = c.host().bounds();
        title(&mut c, PointerPhase::Released, 1915.0, 500.0);

        assert!(!c.overlay().unwrap().is_visible());
        assert!(!c.host().inner.is_always_on_top());
        assert!(!c.snapped());
        assert_eq!(c.host().bounds(), before);
    }

    #[test]
    fn side_tiles_respect_overlay_min_width() {
        let mut c = controller(Rect::new(100.0, 100.0, 800.0, 600.0));
        c.set_overlay_min_width(1200.0);
        send(&mut c, PointerPhase::Pressed, 150.0, 110.0);
        send(&mut c, PointerPhase::Dragged, 1915.0, 500.0);
        assert_eq!(c.overlay().unwrap().bounds().w, 1200.0);
        send(&mut c, PointerPhase::Released, 1915.0, 500.0);
        assert_eq!(c.host().bounds().w, 1200.0);
    }

    #[test]
    fn double_click_toggles_maximize_when_enabled() {
        let mut c = controller(Rect::new(100.0, 100.0, 800.0, 600.0));
        let click = PointerEvent::primary(Point::new(150.0, 110.0), &c.host().bounds()).with_clicks(2);
        c.handle_pointer(PointerTarget::Surface(TITLE.id), PointerPhase::Clicked, &click);
        assert!(c.is_maximized());

        c.set_double_click_maximize(false);
        c.handle_pointer(PointerTarget::Surface(TITLE.id), PointerPhase::Clicked, &click);
        assert!(c.is_maximized());
    }

    #[test]
    fn pointer_is_kept_off_the_taskbar() {
        let mut c = WindowController::new(
            HeadlessWindow::new(Rect::new(100.0, 100.0, 800.0, 600.0)),
            HeadlessScreens::single(1920.0, 1080.0, 40.0),
            Box::new(HeadlessOverlayBackend::new()),
            ChromeConfig::default(),
        )
        .unwrap();
        c.set_move_control(TITLE);
        send(&mut c, PointerPhase::Pressed, 150.0, 110.0);
        send(&mut c, PointerPhase::Dragged, 700.0, 1060.0);
        assert_eq!(c.host().pointer_warps(), &[Point::new(699.0, 1039.0)]);

        c.set_prevent_cursor_over_taskbar(false);
        send(&mut c, PointerPhase::Dragged, 700.0, 1061.0);
        assert_eq!(c.host().pointer_warps().len(), 1);
    }

    #[test]
    fn disabled_corner_never_previews() {
        let mut c = controller(Rect::new(100.0, 100.0, 800.0, 600.0));
        c.disable_direction(Direction::TopLeft);
        send(&mut c, PointerPhase::Pressed, 150.0, 110.0);
        send(&mut c, PointerPhase::Dragged, 5.0, 5.0);
        assert!(!c.overlay().unwrap().is_visible());
        send(&mut c, PointerPhase::Released, 5.0, 5.0);
        assert!(!c.snapped());
        assert!(!c.is_maximized());
    }
}
