//! Platform collaborators
//!
//! This module encapsulates everything the controller consumes from the OS:
//! monitor layout, the host window and the native style bridge. Each one is
//! a trait with a headless implementation and, on Windows, a Win32 one.

pub mod headless;
pub mod monitors;
pub mod window;
pub mod windows;

pub use monitors::{Monitor, MonitorError, ScreenLayoutService};
pub use window::{HostWindow, SizeLimits, WindowError, WindowHandle};
pub use self::windows::{NativeStyleBridge, NoopStyleBridge};

#[cfg(windows)]
pub use monitors::Win32Screens;
#[cfg(windows)]
pub use self::windows::Win32StyleBridge;
#[cfg(windows)]
pub use window::Win32Window;
