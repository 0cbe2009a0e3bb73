//! Native style bridge and Win32 helpers
//!
//! Undecorated windows lose the style bits the shell needs to animate
//! minimize and restore. The bridge puts them back right before an iconify
//! transition; everywhere else it does nothing.

use crate::platform::window::{WindowError, WindowHandle};

/// Per-platform hook run before the window is iconified or restored
pub trait NativeStyleBridge {
    /// Makes sure the native style allows the OS minimize animation.
    ///
    /// `iconified` is the state being entered.
    fn ensure_minimizable_style(
        &self,
        window: WindowHandle,
        iconified: bool,
    ) -> Result<(), WindowError>;
}

/// Bridge for platforms without native minimize animations
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStyleBridge;

impl NativeStyleBridge for NoopStyleBridge {
    fn ensure_minimizable_style(
        &self,
        _window: WindowHandle,
        _iconified: bool,
    ) -> Result<(), WindowError> {
        Ok(())
    }
}

#[cfg(windows)]
pub use win32::{Win32StyleBridge, rect_to_win32_rect, win32_rect_to_rect};

#[cfg(windows)]
mod win32 {
    use windows::Win32::Foundation::{HWND, RECT};
    use windows::Win32::UI::WindowsAndMessaging::{
        GWL_STYLE, GetWindowLongW, SetWindowLongW, WS_CAPTION, WS_MINIMIZEBOX, WS_SYSMENU,
    };

    use super::NativeStyleBridge;
    use crate::domain::core::Rect;
    use crate::platform::window::{WindowError, WindowHandle};

    /// Converts a domain rectangle to Windows RECT structure
    pub fn rect_to_win32_rect(rect: &Rect) -> RECT {
        RECT {
            left: rect.x.round() as i32,
            top: rect.y.round() as i32,
            right: rect.right().round() as i32,
            bottom: rect.bottom().round() as i32,
        }
    }

    /// Converts a Windows RECT to domain rectangle
    pub fn win32_rect_to_rect(rect: &RECT) -> Rect {
        Rect::new(
            rect.left as f64,
            rect.top as f64,
            (rect.right - rect.left) as f64,
            (rect.bottom - rect.top) as f64,
        )
    }

    /// Restores `WS_MINIMIZEBOX` (and while iconifying, `WS_SYSMENU |
    /// WS_CAPTION`) on top of the style the window was created with.
    #[derive(Debug, Clone, Copy)]
    pub struct Win32StyleBridge {
        original_style: u32,
    }

    impl Win32StyleBridge {
        /// Captures the window's current style as the base to extend
        pub fn capture(hwnd: HWND) -> Self {
            let original_style = unsafe { GetWindowLongW(hwnd, GWL_STYLE) } as u32;
            Self { original_style }
        }

        pub fn style_for(&self, iconified: bool) -> u32 {
            let mut style = self.original_style | WS_MINIMIZEBOX.0;
            if iconified {
                style |= WS_SYSMENU.0 | WS_CAPTION.0;
            }
            style
        }
    }

    impl NativeStyleBridge for Win32StyleBridge {
        fn ensure_minimizable_style(
            &self,
            window: WindowHandle,
            iconified: bool,
        ) -> Result<(), WindowError> {
            let style = self.style_for(iconified);
            // SetWindowLongW returns the previous value; zero can be a
            // legitimate previous style, so only the write itself matters here.
            unsafe {
                SetWindowLongW(HWND(window.0), GWL_STYLE, style as i32);
            }
            tracing::debug!(hwnd = window.0, style, "applied minimizable style");
            Ok(())
        }
    }
}
