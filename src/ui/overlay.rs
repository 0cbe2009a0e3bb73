//! Snap preview overlay
//!
//! A borderless, click-through, always-on-top surface that shows where the
//! window will land if the pointer is released now. The controller owns at
//! most one overlay; it is created when aero snap is enabled and destroyed
//! when it is disabled.

use std::cell::RefCell;
use std::rc::Rc;

use crate::domain::core::Rect;
use crate::ui::renderer::{OverlayStyle, RendererError};

/// Overlay management errors
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("Failed to register overlay window class")]
    WindowClassRegistrationFailed,

    #[error("Failed to create overlay window")]
    WindowCreationFailed,

    #[error("Failed to acquire screen device context")]
    DeviceContextFailed,

    #[error("Failed to create memory device context")]
    MemoryDeviceContextFailed,

    #[error("Failed to create DIB section for overlay frame")]
    DibSectionCreationFailed,

    #[error("Failed to select bitmap into memory DC")]
    BitmapSelectionFailed,

    #[error("Failed to update layered window surface")]
    LayerUpdateFailed,

    #[error("Overlay used after it was destroyed")]
    Destroyed,

    #[error("Rendering failed: {0}")]
    RenderingError(#[from] RendererError),
}

/// The native resource behind an overlay
pub trait OverlaySurface {
    fn set_bounds(&mut self, bounds: Rect) -> Result<(), OverlayError>;
    fn set_style(&mut self, style: OverlayStyle) -> Result<(), OverlayError>;
    fn show(&mut self) -> Result<(), OverlayError>;
    /// Brings an already visible surface back to the front
    fn focus(&mut self);
    fn hide(&mut self);
}

/// Creates overlay surfaces on demand
pub trait OverlayBackend {
    fn create_surface(&self) -> Result<Box<dyn OverlaySurface>, OverlayError>;
}

/// Snap preview window
pub struct OverlayWindow {
    surface: Option<Box<dyn OverlaySurface>>,
    bounds: Rect,
    style: OverlayStyle,
    visible: bool,
}

impl std::fmt::Debug for OverlayWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayWindow")
            .field("bounds", &self.bounds)
            .field("style", &self.style)
            .field("visible", &self.visible)
            .field("destroyed", &self.surface.is_none())
            .finish()
    }
}

impl OverlayWindow {
    /// Create an overlay on a fresh surface from `backend`
    pub fn create(backend: &dyn OverlayBackend, style: OverlayStyle) -> Result<Self, OverlayError> {
        let mut surface = backend.create_surface()?;
        surface.set_style(style)?;
        Ok(Self {
            surface: Some(surface),
            bounds: Rect::default(),
            style,
            visible: false,
        })
    }

    fn surface(&mut self) -> Result<&mut Box<dyn OverlaySurface>, OverlayError> {
        self.surface.as_mut().ok_or(OverlayError::Destroyed)
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) -> Result<(), OverlayError> {
        if self.bounds != bounds {
            self.surface()?.set_bounds(bounds)?;
            self.bounds = bounds;
        }
        Ok(())
    }

    pub fn style(&self) -> OverlayStyle {
        self.style
    }

    pub fn set_style(&mut self, style: OverlayStyle) -> Result<(), OverlayError> {
        self.surface()?.set_style(style)?;
        self.style = style;
        Ok(())
    }

    /// Shows the overlay, or re-focuses it if it is already showing
    pub fn show(&mut self) -> Result<(), OverlayError> {
        if self.visible {
            self.surface()?.focus();
        } else {
            self.surface()?.show()?;
            self.visible = true;
        }
        Ok(())
    }

    /// Hides the overlay but keeps the surface for reuse
    pub fn close(&mut self) {
        if self.visible {
            if let Some(surface) = self.surface.as_mut() {
                surface.hide();
            }
            self.visible = false;
        }
    }

    /// Releases the surface for good
    pub fn destroy(&mut self) {
        self.close();
        self.surface = None;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_destroyed(&self) -> bool {
        self.surface.is_none()
    }
}

impl Drop for OverlayWindow {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// What a headless surface has been asked to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceCall {
    SetBounds(Rect),
    SetStyle(OverlayStyle),
    Show,
    Focus,
    Hide,
    Dropped,
}

/// Backend whose surfaces only record calls
#[derive(Debug, Clone, Default)]
pub struct HeadlessOverlayBackend {
    log: Rc<RefCell<Vec<SurfaceCall>>>,
    created: Rc<RefCell<usize>>,
}

impl HeadlessOverlayBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls made on every surface this backend created, in order
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.log.borrow().clone()
    }

    pub fn surfaces_created(&self) -> usize {
        *self.created.borrow()
    }
}

impl OverlayBackend for HeadlessOverlayBackend {
    fn create_surface(&self) -> Result<Box<dyn OverlaySurface>, OverlayError> {
        *self.created.borrow_mut() += 1;
        Ok(Box::new(HeadlessSurface {
            log: Rc::clone(&self.log),
        }))
    }
}

struct HeadlessSurface {
    log: Rc<RefCell<Vec<SurfaceCall>>>,
}

impl HeadlessSurface {
    fn record(&self, call: SurfaceCall) {
        self.log.borrow_mut().push(call);
    }
}

impl OverlaySurface for HeadlessSurface {
    fn set_bounds(&mut self, bounds: Rect) -> Result<(), OverlayError> {
        self.record(SurfaceCall::SetBounds(bounds));
        Ok(())
    }

    fn set_style(&mut self, style: OverlayStyle) -> Result<(), OverlayError> {
        self.record(SurfaceCall::SetStyle(style));
        Ok(())
    }

    fn show(&mut self) -> Result<(), OverlayError> {
        self.record(SurfaceCall::Show);
        Ok(())
    }

    fn focus(&mut self) {
        self.record(SurfaceCall::Focus);
    }

    fn hide(&mut self) {
        self.record(SurfaceCall::Hide);
    }
}

impl Drop for HeadlessSurface {
    fn drop(&mut self) {
        self.record(SurfaceCall::Dropped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay() -> (OverlayWindow, HeadlessOverlayBackend) {
        let backend = HeadlessOverlayBackend::new();
        let overlay = OverlayWindow::create(&backend, OverlayStyle::Minimalistic).unwrap();
        (overlay, backend)
    }

    #[test]
    fn show_is_idempotent() {
        let (mut overlay, backend) = overlay();
        overlay.show().unwrap();
        overlay.show().unwrap();
        assert!(overlay.is_visible());
        assert_eq!(
            backend.calls(),
            vec![
                SurfaceCall::SetStyle(OverlayStyle::Minimalistic),
                SurfaceCall::Show,
                SurfaceCall::Focus,
            ]
        );
    }

    #[test]
    fn close_hides_without_destroying() {
        let (mut overlay, backend) = overlay();
        overlay.show().unwrap();
        overlay.close();
        overlay.close();
        assert!(!overlay.is_visible());
        assert!(!overlay.is_destroyed());
        assert_eq!(
            backend.calls().iter().filter(|c| **c == SurfaceCall::Hide).count(),
            1
        );
        overlay.show().unwrap();
        assert!(overlay.is_visible());
    }

    #[test]
    fn destroyed_overlay_rejects_use() {
        let (mut overlay, backend) = overlay();
        overlay.show().unwrap();
        overlay.destroy();
        assert!(overlay.is_destroyed());
        assert!(!overlay.is_visible());
        assert!(backend.calls().contains(&SurfaceCall::Dropped));
        assert!(matches!(overlay.show(), Err(OverlayError::Destroyed)));
        assert!(matches!(
            overlay.set_bounds(Rect::new(0.0, 0.0, 10.0, 10.0)),
            Err(OverlayError::Destroyed)
        ));
    }

    #[test]
    fn style_replaces_previous_style() {
        let (mut overlay, backend) = overlay();
        overlay.set_style(OverlayStyle::Gnome).unwrap();
        overlay.set_style(OverlayStyle::None).unwrap();
        assert_eq!(overlay.style(), OverlayStyle::None);
        assert_eq!(
            backend.calls().last(),
            Some(&SurfaceCall::SetStyle(OverlayStyle::None))
        );
    }

    #[test]
    fn unchanged_bounds_are_not_resent() {
        let (mut overlay, backend) = overlay();
        let bounds = Rect::new(0.0, 0.0, 960.0, 1080.0);
        overlay.set_bounds(bounds).unwrap();
        overlay.set_bounds(bounds).unwrap();
        let sets = backend
            .calls()
            .iter()
            .filter(|c| matches!(c, SurfaceCall::SetBounds(_)))
            .count();
        assert_eq!(sets, 1);
        assert_eq!(overlay.bounds(), bounds);
    }
}
