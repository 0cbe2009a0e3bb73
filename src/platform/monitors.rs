//! Monitor layout queries
//!
//! This module is responsible for:
//! - Describing monitors by their full bounds and visual bounds
//! - Answering "which monitors does this rectangle overlap" in a stable order
//! - Enumerating real monitors on Windows
//!
//! CRITICAL: secondary monitors can have negative coordinates in the
//! virtual desktop, so nothing here may assume a non-negative origin.

use crate::domain::core::{Point, Rect};

/// A monitor as seen by the chrome controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Monitor {
    /// Zero-based index for stable identification
    pub index: usize,
    /// Full monitor rectangle
    pub bounds: Rect,
    /// Usable area excluding OS-reserved regions such as the taskbar
    pub visual_bounds: Rect,
    /// Whether this is the primary monitor
    pub is_primary: bool,
}

impl Monitor {
    pub fn new(index: usize, bounds: Rect, visual_bounds: Rect) -> Self {
        Self {
            index,
            bounds,
            visual_bounds,
            is_primary: index == 0,
        }
    }
}

/// Error types for monitor operations
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("Failed to enumerate monitors")]
    EnumerationFailed,
    #[error("No monitors found during enumeration")]
    NoMonitors,
}

/// Screen/monitor enumeration consumed by the controller.
pub trait ScreenLayoutService {
    /// Monitors whose bounds overlap `rect`, in enumeration order
    fn monitors_intersecting(&self, rect: &Rect) -> Vec<Monitor>;

    /// Monitors under `point`, sampled with a 1x1 probe
    fn monitors_at(&self, point: Point) -> Vec<Monitor> {
        self.monitors_intersecting(&Rect::probe(point))
    }
}

/// Filters `monitors` down to those overlapping `rect`, keeping their order
pub fn intersecting(monitors: &[Monitor], rect: &Rect) -> Vec<Monitor> {
    monitors
        .iter()
        .filter(|monitor| monitor.bounds.intersects(rect))
        .copied()
        .collect()
}

#[cfg(windows)]
pub use win32::{Win32Screens, enumerate_monitors};

#[cfg(windows)]
mod win32 {
    use windows::Win32::Foundation::{BOOL, FALSE, LPARAM, RECT, TRUE};
    use windows::Win32::Graphics::Gdi::{
        EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO,
    };

    use super::{Monitor, MonitorError, ScreenLayoutService, intersecting};
    use crate::domain::core::Rect;
    use crate::platform::windows::win32_rect_to_rect;

    const MONITORINFOF_PRIMARY: u32 = 1;

    /// Context for monitor enumeration callback
    struct EnumContext {
        monitors: Vec<Monitor>,
        next_index: usize,
    }

    /// Callback function for monitor enumeration
    ///
    /// Continues enumeration even if an individual monitor fails to report
    /// its info; partial data beats no data.
    unsafe extern "system" fn enum_monitor_proc(
        hmonitor: HMONITOR,
        _hdc: HDC,
        _rect: *mut RECT,
        lparam: LPARAM,
    ) -> BOOL {
        unsafe {
            let context = &mut *(lparam.0 as *mut EnumContext);

            let mut info = MONITORINFO {
                cbSize: std::mem::size_of::<MONITORINFO>() as u32,
                ..Default::default()
            };

            if GetMonitorInfoW(hmonitor, &mut info) == FALSE {
                return TRUE;
            }

            let index = context.next_index;
            context.monitors.push(Monitor {
                index,
                bounds: win32_rect_to_rect(&info.rcMonitor),
                visual_bounds: win32_rect_to_rect(&info.rcWork),
                is_primary: (info.dwFlags & MONITORINFOF_PRIMARY) != 0,
            });
            context.next_index += 1;

            TRUE
        }
    }

    /// Enumerates all monitors in OS order
    pub fn enumerate_monitors() -> Result<Vec<Monitor>, MonitorError> {
        let mut context = EnumContext {
            monitors: Vec::new(),
            next_index: 0,
        };

        unsafe {
            if EnumDisplayMonitors(
                None,
                None,
                Some(enum_monitor_proc),
                LPARAM(&mut context as *mut _ as isize),
            ) == FALSE
            {
                return Err(MonitorError::EnumerationFailed);
            }
        }

        if context.monitors.is_empty() {
            return Err(MonitorError::NoMonitors);
        }

        Ok(context.monitors)
    }

    /// Live monitor layout; re-enumerates on every query so hot-plugged
    /// monitors are picked up mid-session.
    #[derive(Debug, Default)]
    pub struct Win32Screens;

    impl ScreenLayoutService for Win32Screens {
        fn monitors_intersecting(&self, rect: &Rect) -> Vec<Monitor> {
            match enumerate_monitors() {
                Ok(monitors) => intersecting(&monitors, rect),
                Err(err) => {
                    tracing::warn!(%err, "monitor enumeration failed");
                    Vec::new()
                }
            }
        }
    }
}
