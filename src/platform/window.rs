//! Host window abstraction and positioning
//!
//! This module handles:
//! - Reading and writing the undecorated window's bounds
//! - Pinning the window above the snap preview (always-on-top)
//! - Iconifying and restoring through the OS
//! - Warping the hardware pointer while a gesture is active

use crate::domain::core::{Point, Rect, Size};

/// Opaque native window handle (an `HWND` value on Windows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowHandle(pub isize);

/// Error types for window operations
#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("Window handle {0:?} is invalid")]
    InvalidHandle(WindowHandle),
    #[error("Failed to get info for window {0:?}")]
    InfoFailed(WindowHandle),
    #[error("Failed to position window {0:?}")]
    PositionFailed(WindowHandle),
    #[error("Failed to change z-order of window {0:?}")]
    ZOrderFailed(WindowHandle),
    #[error("Failed to update native style of window {0:?}")]
    StyleFailed(WindowHandle),
    #[error("Failed to move the pointer to ({x}, {y})")]
    PointerWarpFailed { x: f64, y: f64 },
}

/// Minimum and maximum window size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeLimits {
    pub min: Size,
    pub max: Size,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            min: Size::new(0.0, 0.0),
            max: Size::new(f64::MAX, f64::MAX),
        }
    }
}

impl SizeLimits {
    pub fn accepts_width(&self, width: f64) -> bool {
        width > 0.0 && width >= self.min.width && width <= self.max.width
    }

    pub fn accepts_height(&self, height: f64) -> bool {
        height > 0.0 && height >= self.min.height && height <= self.max.height
    }
}

/// The undecorated window the chrome behaviour is attached to.
///
/// All calls happen on the UI thread.
pub trait HostWindow {
    fn handle(&self) -> WindowHandle;

    /// Current bounds in screen coordinates
    fn bounds(&self) -> Rect;

    fn set_bounds(&mut self, bounds: Rect) -> Result<(), WindowError>;

    fn size_limits(&self) -> SizeLimits;

    fn set_always_on_top(&mut self, on_top: bool) -> Result<(), WindowError>;

    /// Asks the OS to iconify or restore the window
    fn set_iconified(&mut self, iconified: bool) -> Result<(), WindowError>;

    /// Moves the hardware pointer to `to` (screen coordinates)
    fn warp_pointer(&mut self, to: Point) -> Result<(), WindowError>;
}

#[cfg(windows)]
pub use win32::Win32Window;

#[cfg(windows)]
mod win32 {
    use windows::Win32::Foundation::{HWND, RECT};
    use windows::Win32::UI::WindowsAndMessaging::{
        GetWindowRect, HWND_NOTOPMOST, HWND_TOPMOST, IsWindow, SW_MINIMIZE, SW_RESTORE,
        SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER, SetCursorPos, SetWindowPos,
        ShowWindow,
    };

    use super::{HostWindow, SizeLimits, WindowError, WindowHandle};
    use crate::domain::core::{Point, Rect};
    use crate::platform::windows::{rect_to_win32_rect, win32_rect_to_rect};

    /// A real top-level window driven through user32
    #[derive(Debug)]
    pub struct Win32Window {
        hwnd: HWND,
        limits: SizeLimits,
    }

    impl Win32Window {
        pub fn new(hwnd: HWND) -> Result<Self, WindowError> {
            if !unsafe { IsWindow(hwnd) }.as_bool() {
                return Err(WindowError::InvalidHandle(WindowHandle(hwnd.0)));
            }
            Ok(Self {
                hwnd,
                limits: SizeLimits::default(),
            })
        }

        pub fn with_size_limits(mut self, limits: SizeLimits) -> Self {
            self.limits = limits;
            self
        }

        fn handle_id(&self) -> WindowHandle {
            WindowHandle(self.hwnd.0)
        }
    }

    impl HostWindow for Win32Window {
        fn handle(&self) -> WindowHandle {
            self.handle_id()
        }

        fn bounds(&self) -> Rect {
            let mut window_rect = RECT::default();
            if unsafe { GetWindowRect(self.hwnd, &mut window_rect) }.is_err() {
                tracing::warn!(hwnd = self.hwnd.0, "GetWindowRect failed");
                return Rect::default();
            }
            win32_rect_to_rect(&window_rect)
        }

        fn set_bounds(&mut self, bounds: Rect) -> Result<(), WindowError> {
            let target = rect_to_win32_rect(&bounds);
            // SWP_NOZORDER keeps the always-on-top state chosen by the controller
            unsafe {
                SetWindowPos(
                    self.hwnd,
                    HWND(0),
                    target.left,
                    target.top,
                    target.right - target.left,
                    target.bottom - target.top,
                    SWP_NOACTIVATE | SWP_NOZORDER,
                )
            }
            .map_err(|_| WindowError::PositionFailed(self.handle_id()))
        }

        fn size_limits(&self) -> SizeLimits {
            self.limits
        }

        fn set_always_on_top(&mut self, on_top: bool) -> Result<(), WindowError> {
            let insert_after = if on_top { HWND_TOPMOST } else { HWND_NOTOPMOST };
            unsafe {
                SetWindowPos(
                    self.hwnd,
                    insert_after,
                    0,
                    0,
                    0,
                    0,
                    SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
                )
            }
            .map_err(|_| WindowError::ZOrderFailed(self.handle_id()))
        }

        fn set_iconified(&mut self, iconified: bool) -> Result<(), WindowError> {
            let command = if iconified { SW_MINIMIZE } else { SW_RESTORE };
            // ShowWindow reports the previous visibility, not success
            unsafe {
                let _ = ShowWindow(self.hwnd, command);
            }
            Ok(())
        }

        fn warp_pointer(&mut self, to: Point) -> Result<(), WindowError> {
            unsafe { SetCursorPos(to.x.round() as i32, to.y.round() as i32) }
                .map_err(|_| WindowError::PointerWarpFailed { x: to.x, y: to.y })
        }
    }
}
