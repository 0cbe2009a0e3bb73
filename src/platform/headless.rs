//! In-memory platform
//!
//! A fixed monitor layout and a window that only records what it is told.
//! Used by the replay tool and by tests; it never touches the OS.

use std::cell::RefCell;
use std::rc::Rc;

use crate::domain::core::{Point, Rect, clamp};
use crate::platform::monitors::{Monitor, ScreenLayoutService, intersecting};
use crate::platform::window::{HostWindow, SizeLimits, WindowError, WindowHandle};
use crate::platform::windows::NativeStyleBridge;

/// Static monitor layout
#[derive(Debug, Clone, Default)]
pub struct HeadlessScreens {
    monitors: Vec<Monitor>,
}

impl HeadlessScreens {
    pub fn new(monitors: Vec<Monitor>) -> Self {
        Self { monitors }
    }

    /// One monitor at the origin whose visual bounds lose `taskbar` units
    /// at the bottom
    pub fn single(width: f64, height: f64, taskbar: f64) -> Self {
        Self::new(vec![Monitor::new(
            0,
            Rect::new(0.0, 0.0, width, height),
            Rect::new(0.0, 0.0, width, height - taskbar),
        )])
    }

    pub fn monitors(&self) -> &[Monitor] {
        &self.monitors
    }
}

impl ScreenLayoutService for HeadlessScreens {
    fn monitors_intersecting(&self, rect: &Rect) -> Vec<Monitor> {
        intersecting(&self.monitors, rect)
    }
}

/// Window that stores its state in plain fields
#[derive(Debug, Clone)]
pub struct HeadlessWindow {
    handle: WindowHandle,
    bounds: Rect,
    limits: SizeLimits,
    always_on_top: bool,
    iconified: bool,
    warps: Vec<Point>,
}

impl HeadlessWindow {
    pub fn new(bounds: Rect) -> Self {
        Self {
            handle: WindowHandle(1),
            bounds,
            limits: SizeLimits::default(),
            always_on_top: false,
            iconified: false,
            warps: Vec::new(),
        }
    }

    pub fn with_size_limits(mut self, limits: SizeLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn is_always_on_top(&self) -> bool {
        self.always_on_top
    }

    pub fn is_iconified(&self) -> bool {
        self.iconified
    }

    /// Every position the pointer was warped to, oldest first
    pub fn pointer_warps(&self) -> &[Point] {
        &self.warps
    }
}

impl HostWindow for HeadlessWindow {
    fn handle(&self) -> WindowHandle {
        self.handle
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) -> Result<(), WindowError> {
        // Like a real window manager, size limits win over requests
        self.bounds = Rect::new(
            bounds.x,
            bounds.y,
            clamp(bounds.w, self.limits.min.width, self.limits.max.width),
            clamp(bounds.h, self.limits.min.height, self.limits.max.height),
        );
        Ok(())
    }

    fn size_limits(&self) -> SizeLimits {
        self.limits
    }

    fn set_always_on_top(&mut self, on_top: bool) -> Result<(), WindowError> {
        self.always_on_top = on_top;
        Ok(())
    }

    fn set_iconified(&mut self, iconified: bool) -> Result<(), WindowError> {
        self.iconified = iconified;
        Ok(())
    }

    fn warp_pointer(&mut self, to: Point) -> Result<(), WindowError> {
        self.warps.push(to);
        Ok(())
    }
}

/// Style bridge that records each request
#[derive(Debug, Clone, Default)]
pub struct RecordingStyleBridge {
    calls: Rc<RefCell<Vec<(WindowHandle, bool)>>>,
}

impl RecordingStyleBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests seen so far as `(window, iconified)` pairs
    pub fn calls(&self) -> Vec<(WindowHandle, bool)> {
        self.calls.borrow().clone()
    }
}

impl NativeStyleBridge for RecordingStyleBridge {
    fn ensure_minimizable_style(
        &self,
        window: WindowHandle,
        iconified: bool,
    ) -> Result<(), WindowError> {
        self.calls.borrow_mut().push((window, iconified));
        Ok(())
    }
}
