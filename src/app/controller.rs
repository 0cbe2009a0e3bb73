//! Window chrome controller
//!
//! The controller owns the window-geometry state machine. It turns pointer
//! events and property toggles into bounds changes on the host window,
//! arbitrates between the free, maximized and snapped states, and drives the
//! snap preview overlay. Gesture handling lives in the `drag` and `resize`
//! modules; this file holds the state, lifecycle and shared helpers.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::app::state::{ChromeState, MaximizeOrigin, StateChange, WindowState};
use crate::config::ChromeConfig;
use crate::domain::core::{Point, Rect, Size, clamp};
use crate::domain::direction::Direction;
use crate::domain::snapshot::GeometrySnapshot;
use crate::input::pointer::{MoveSurface, PointerEvent, PointerPhase, PointerTarget};
use crate::platform::monitors::{Monitor, ScreenLayoutService};
use crate::platform::window::{HostWindow, WindowError};
use crate::platform::windows::{NativeStyleBridge, NoopStyleBridge};
use crate::ui::overlay::{OverlayBackend, OverlayError, OverlayWindow};
use crate::ui::renderer::OverlayStyle;

/// Errors surfaced by controller lifecycle operations
#[derive(Debug, thiserror::Error)]
pub enum ChromeError {
    #[error("Overlay error: {0}")]
    Overlay(#[from] OverlayError),

    #[error("Window error: {0}")]
    Window(#[from] WindowError),
}

type Listener = Box<dyn FnMut(&StateChange)>;

/// Transient state of a move gesture, created on press and dropped on
/// release
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DragSession {
    /// Pointer offset from the window origin
    pub delta: Point,
    pub press_screen_x: f64,
    /// Dragging a snapped window below this screen Y pulls it off the snap
    pub reference_y: f64,
}

/// Drives move, resize, maximize, minimize and aero snap for one window
pub struct WindowController<H: HostWindow, S: ScreenLayoutService> {
    pub(crate) host: H,
    pub(crate) screens: S,
    bridge: Box<dyn NativeStyleBridge>,
    overlay_backend: Box<dyn OverlayBackend>,
    pub(crate) overlay: Option<OverlayWindow>,
    pub(crate) config: ChromeConfig,
    pub(crate) state: WindowState,
    pub(crate) snapshot: GeometrySnapshot,
    pub(crate) move_surface: Option<MoveSurface>,
    pub(crate) drag: Option<DragSession>,
    /// Set while the window is raised above a visible preview
    pinned: bool,
    /// Changes are only queued for `take_changes` after `record_changes(true)`
    recording: bool,
    pending: Vec<StateChange>,
    listeners: Vec<Listener>,
}

impl<H: HostWindow, S: ScreenLayoutService> std::fmt::Debug for WindowController<H, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowController")
            .field("handle", &self.host.handle())
            .field("state", &self.state)
            .field("config", &self.config)
            .field("snapshot", &self.snapshot)
            .field("overlay", &self.overlay)
            .field("drag", &self.drag)
            .finish()
    }
}

impl<H: HostWindow, S: ScreenLayoutService> WindowController<H, S> {
    /// Creates a controller for `host`.
    ///
    /// The snap preview overlay is created up front when aero snap is
    /// enabled in `config`.
    pub fn new(
        host: H,
        screens: S,
        overlay_backend: Box<dyn OverlayBackend>,
        config: ChromeConfig,
    ) -> Result<Self, ChromeError> {
        let mut controller = Self {
            host,
            screens,
            bridge: Box::new(NoopStyleBridge),
            overlay_backend,
            overlay: None,
            config: config.sanitized(),
            state: WindowState::default(),
            snapshot: GeometrySnapshot::unset(),
            move_surface: None,
            drag: None,
            pinned: false,
            recording: false,
            pending: Vec::new(),
            listeners: Vec::new(),
        };

        if controller.config.aero_snap {
            controller.create_overlay()?;
        }

        debug!(handle = ?controller.host.handle(), "window controller created");
        Ok(controller)
    }

    /// Replaces the native style bridge (no-op by default)
    pub fn with_style_bridge(mut self, bridge: Box<dyn NativeStyleBridge>) -> Self {
        self.bridge = bridge;
        self
    }

    /// Seeds the snapshot from the first laid-out geometry
    pub fn on_shown(&mut self) {
        let bounds = self.host.bounds();
        self.snapshot.record(bounds);
        debug!(?bounds, "window shown");
    }

    /// Routes a pointer event to the move surface or a resize handle
    pub fn handle_pointer(&mut self, target: PointerTarget, phase: PointerPhase, event: &PointerEvent) {
        match target {
            PointerTarget::Surface(id) => match self.move_surface {
                Some(surface) if surface.id == id => self.handle_move(surface, phase, event),
                _ => {}
            },
            PointerTarget::ResizeHandle(direction) => {
                if self.state.handles_enabled() {
                    self.handle_resize(direction, phase, event);
                } else {
                    debug!(?direction, "resize handle disabled");
                }
            }
        }
    }

    // ---- observable state ----

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn chrome_state(&self) -> ChromeState {
        self.state.chrome()
    }

    pub fn is_maximized(&self) -> bool {
        self.state.maximized
    }

    pub fn is_minimized(&self) -> bool {
        self.state.minimized
    }

    /// Read-only; only gestures change it
    pub fn snapped(&self) -> bool {
        self.state.snapped
    }

    pub fn is_resizable(&self) -> bool {
        self.state.resizable
    }

    pub fn width(&self) -> f64 {
        self.host.bounds().w
    }

    pub fn height(&self) -> f64 {
        self.host.bounds().h
    }

    /// Last free-form size, or the live size before the first layout
    pub fn stage_size(&self) -> Size {
        self.snapshot.size_or(self.host.bounds().size())
    }

    /// Last free-form position, or the live position before the first layout
    pub fn stage_position(&self) -> Point {
        self.snapshot.position_or(self.host.bounds().origin())
    }

    pub fn snapshot(&self) -> &GeometrySnapshot {
        &self.snapshot
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn overlay(&self) -> Option<&OverlayWindow> {
        self.overlay.as_ref()
    }

    pub fn config(&self) -> &ChromeConfig {
        &self.config
    }

    /// Registers a callback invoked for every state change
    pub fn subscribe(&mut self, listener: impl FnMut(&StateChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Starts or stops queueing changes for [`Self::take_changes`].
    ///
    /// Off by default. Turning it off drops anything still queued.
    pub fn record_changes(&mut self, enabled: bool) {
        self.recording = enabled;
        if !enabled {
            self.pending.clear();
        }
    }

    /// Drains the changes queued since the last call
    pub fn take_changes(&mut self) -> Vec<StateChange> {
        std::mem::take(&mut self.pending)
    }

    // ---- maximize / minimize ----

    pub fn set_maximized(&mut self, maximized: bool) {
        self.set_maximized_from(maximized, MaximizeOrigin::User);
    }

    pub fn maximize_toggle(&mut self) {
        self.set_maximized(!self.state.maximized);
    }

    pub(crate) fn set_maximized_from(&mut self, maximized: bool, origin: MaximizeOrigin) {
        if self.state.maximized == maximized {
            return;
        }

        if maximized {
            let bounds = self.host.bounds();
            let Some(monitor) = self.home_monitor(&bounds) else {
                warn!(?bounds, "no monitor for window, not maximizing");
                return;
            };

            // A snapped window or a snap-triggered maximize already holds the
            // geometry to come back to
            if !self.state.snapped && origin == MaximizeOrigin::User {
                self.snapshot.record(bounds);
            }

            self.apply_bounds(monitor.visual_bounds);
            self.state.maximized = true;
            self.emit(StateChange::Maximized(true));
            self.set_snapped(false);
            info!(monitor = monitor.index, ?origin, "maximized");
        } else {
            self.state.maximized = false;
            self.emit(StateChange::Maximized(false));
            let target = self.snapshot.bounds_or(self.host.bounds());
            self.apply_bounds(target);
            info!(?target, "restored from maximized");
        }
    }

    /// Iconifies or restores the window through the OS
    pub fn set_minimized(&mut self, minimized: bool) {
        if self.state.minimized == minimized {
            return;
        }

        self.state.minimized = minimized;
        self.emit(StateChange::Minimized(minimized));

        let handle = self.host.handle();
        if let Err(err) = self.bridge.ensure_minimizable_style(handle, minimized) {
            warn!(%err, "native style bridge failed");
        }
        if let Err(err) = self.host.set_iconified(minimized) {
            warn!(%err, minimized, "failed to change iconified state");
        }
        info!(minimized, "minimize toggled");
    }

    pub fn minimize_toggle(&mut self) {
        self.set_minimized(!self.state.minimized);
    }

    /// The OS iconified or restored the window on its own (taskbar click).
    ///
    /// Only the flag follows; nothing is sent back to the OS.
    pub fn on_native_iconify_changed(&mut self, iconified: bool) {
        if self.state.minimized != iconified {
            self.state.minimized = iconified;
            self.emit(StateChange::Minimized(iconified));
            debug!(iconified, "native iconify synchronized");
        }
    }

    // ---- configuration ----

    /// Enables or disables aero snap, creating or destroying the overlay
    pub fn set_aero_snap(&mut self, enabled: bool) -> Result<(), ChromeError> {
        if enabled {
            if self.overlay.is_none() {
                self.create_overlay()?;
            }
        } else if let Some(mut overlay) = self.overlay.take() {
            overlay.destroy();
            self.unpin();
            debug!("snap preview destroyed");
        }
        self.config.aero_snap = enabled;
        Ok(())
    }

    pub fn set_edge_allowance(&mut self, allowance: f64) {
        self.config.edge_allowance = allowance;
        self.config = self.config.clone().sanitized();
    }

    pub fn set_corner_allowance(&mut self, allowance: f64) {
        self.config.corner_allowance = allowance;
        self.config = self.config.clone().sanitized();
    }

    pub fn set_double_click_maximize(&mut self, enabled: bool) {
        self.config.double_click_maximize = enabled;
    }

    pub fn set_vertical_resize_snap(&mut self, enabled: bool) {
        self.config.vertical_resize_snap = enabled;
    }

    pub fn set_prevent_cursor_over_taskbar(&mut self, enabled: bool) {
        self.config.prevent_cursor_over_taskbar = enabled;
    }

    /// Stops `direction` from snapping. Maximize/restore are unaffected.
    pub fn disable_direction(&mut self, direction: Direction) {
        self.config.disabled_directions.insert(direction);
    }

    pub fn enable_direction(&mut self, direction: Direction) {
        self.config.disabled_directions.remove(&direction);
    }

    pub fn disabled_directions(&self) -> &BTreeSet<Direction> {
        &self.config.disabled_directions
    }

    /// Replaces the preview style; applies to a live overlay immediately
    pub fn set_overlay_style(&mut self, style: OverlayStyle) -> Result<(), ChromeError> {
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.set_style(style)?;
        }
        self.config.overlay_style = style;
        Ok(())
    }

    pub fn set_overlay_min_width(&mut self, min_width: f64) {
        self.config.overlay_min_width = min_width;
        self.config = self.config.clone().sanitized();
    }

    /// Enables or disables all eight resize handles
    pub fn set_resizable(&mut self, resizable: bool) {
        if self.state.resizable != resizable {
            self.state.resizable = resizable;
            self.emit(StateChange::Resizable(resizable));
        }
    }

    /// Designates the element whose pointer events move the window
    pub fn set_move_control(&mut self, surface: MoveSurface) {
        self.move_surface = Some(surface);
        self.drag = None;
    }

    // ---- shared helpers ----

    fn create_overlay(&mut self) -> Result<(), ChromeError> {
        let overlay = OverlayWindow::create(self.overlay_backend.as_ref(), self.config.overlay_style)?;
        self.overlay = Some(overlay);
        debug!(style = ?self.config.overlay_style, "snap preview created");
        Ok(())
    }

    pub(crate) fn emit(&mut self, change: StateChange) {
        for listener in self.listeners.iter_mut() {
            listener(&change);
        }
        if self.recording {
            self.pending.push(change);
        }
    }

    pub(crate) fn set_snapped(&mut self, snapped: bool) {
        if self.state.snapped != snapped {
            self.state.snapped = snapped;
            self.emit(StateChange::Snapped(snapped));
            debug!(snapped, "snap state changed");
        }
    }

    /// Moves the host window, reporting a size change when there is one
    pub(crate) fn try_apply_bounds(&mut self, bounds: Rect) -> Result<(), WindowError> {
        let before = self.host.bounds();
        if before == bounds {
            return Ok(());
        }
        self.host.set_bounds(bounds)?;
        let after = self.host.bounds();
        if after.size() != before.size() {
            self.emit(StateChange::Size {
                width: after.w,
                height: after.h,
            });
        }
        Ok(())
    }

    pub(crate) fn apply_bounds(&mut self, bounds: Rect) {
        if let Err(err) = self.try_apply_bounds(bounds) {
            warn!(%err, ?bounds, "failed to apply window bounds");
        }
    }

    /// First monitor under `point`, sampled with a 1x1 probe
    pub(crate) fn monitor_under(&self, point: Point) -> Option<Monitor> {
        self.screens.monitors_at(point).into_iter().next()
    }

    /// Monitor the window "belongs" to: the first one overlapping its
    /// top-left quadrant, else the first one overlapping it at all
    pub(crate) fn home_monitor(&self, bounds: &Rect) -> Option<Monitor> {
        self.screens
            .monitors_intersecting(&bounds.top_left_quadrant())
            .into_iter()
            .next()
            .or_else(|| self.screens.monitors_intersecting(bounds).into_iter().next())
    }

    /// Snapshot geometry clamped into `visual_bounds` and the size limits
    pub(crate) fn clamped_restore_target(&self, visual_bounds: &Rect) -> Rect {
        let current = self.host.bounds();
        let size = self.snapshot.size_or(current.size());
        let position = self.snapshot.position_or(current.origin());
        let limits = self.host.size_limits();

        Rect::new(
            clamp(position.x, visual_bounds.x, visual_bounds.right()),
            clamp(position.y, visual_bounds.y, visual_bounds.bottom()),
            clamp(
                size.width,
                limits.min.width,
                visual_bounds.w.min(limits.max.width),
            ),
            clamp(
                size.height,
                limits.min.height,
                visual_bounds.h.min(limits.max.height),
            ),
        )
    }

    /// Keeps the hardware pointer off the reserved area right/below the
    /// visual bounds
    pub(crate) fn limit_pointer(&mut self, visual_bounds: &Rect, pointer: Point) {
        if pointer.x >= visual_bounds.right() || pointer.y >= visual_bounds.bottom() {
            let to = Point::new(
                pointer.x.min(visual_bounds.right()) - 1.0,
                pointer.y.min(visual_bounds.bottom()) - 1.0,
            );
            if let Err(err) = self.host.warp_pointer(to) {
                warn!(%err, "failed to warp pointer");
            }
        }
    }

    /// Shows the preview at `bounds` and pins the window above it
    pub(crate) fn show_preview(&mut self, bounds: Rect) {
        let Some(overlay) = self.overlay.as_mut() else {
            return;
        };
        let shown = overlay.set_bounds(bounds).and_then(|_| overlay.show());
        match shown {
            Ok(()) => {
                if self.pinned {
                    return;
                }
                match self.host.set_always_on_top(true) {
                    Ok(()) => self.pinned = true,
                    Err(err) => warn!(%err, "failed to pin window above preview"),
                }
            }
            Err(err) => warn!(%err, "failed to show snap preview"),
        }
    }

    /// Hides the preview and unpins the window if the preview pinned it
    pub(crate) fn end_preview(&mut self) {
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.close();
        }
        self.unpin();
    }

    /// Clears always-on-top, but only if `show_preview` set it
    fn unpin(&mut self) {
        if !self.pinned {
            return;
        }
        self.pinned = false;
        if let Err(err) = self.host.set_always_on_top(false) {
            warn!(%err, "failed to unpin window");
        }
    }
}

#[cfg(windows)]
impl WindowController<crate::platform::window::Win32Window, crate::platform::monitors::Win32Screens> {
    /// Attaches to an existing top-level window.
    ///
    /// Uses live monitor enumeration, the layered preview overlay and the
    /// Win32 minimize style bridge.
    pub fn attach(
        hwnd: windows::Win32::Foundation::HWND,
        limits: crate::platform::window::SizeLimits,
        config: ChromeConfig,
    ) -> Result<Self, ChromeError> {
        let host = crate::platform::window::Win32Window::new(hwnd)?.with_size_limits(limits);
        let bridge = crate::platform::windows::Win32StyleBridge::capture(hwnd);
        let mut controller = Self::new(
            host,
            crate::platform::monitors::Win32Screens,
            Box::new(crate::ui::layered::LayeredOverlayBackend),
            config,
        )?
        .with_style_bridge(Box::new(bridge));
        controller.on_shown();
        Ok(controller)
    }
}
