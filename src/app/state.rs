//! Observable window state
//!
//! Defines the flags the embedding application can observe and the change
//! notifications the controller emits when any of them moves. Geometry is
//! not stored here; the host window is the source of truth for bounds.

/// Externally observable chrome flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowState {
    pub maximized: bool,
    /// Iconified by us or by the OS; orthogonal to the other flags
    pub minimized: bool,
    /// Only the controller writes this
    pub snapped: bool,
    pub resizable: bool,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            maximized: false,
            minimized: false,
            snapped: false,
            resizable: true,
        }
    }
}

impl WindowState {
    /// Geometry state derived from the flags
    ///
    /// A gesture may briefly hold both `maximized` and `snapped`; maximized
    /// wins while that lasts.
    pub fn chrome(&self) -> ChromeState {
        if self.maximized {
            ChromeState::Maximized
        } else if self.snapped {
            ChromeState::Snapped
        } else {
            ChromeState::Free
        }
    }

    /// Whether the window geometry is currently controlled by us rather than
    /// the user
    pub fn is_managed(&self) -> bool {
        self.maximized || self.snapped
    }

    /// Resize handles only respond while this holds
    pub fn handles_enabled(&self) -> bool {
        self.resizable && !self.maximized
    }
}

/// Geometry state of the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChromeState {
    /// Geometry set freely by the user
    #[default]
    Free,
    Maximized,
    /// Quarter tile, half tile or full-height vertical snap
    Snapped,
}

/// Change notification delivered to subscribers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateChange {
    Maximized(bool),
    Minimized(bool),
    Snapped(bool),
    Resizable(bool),
    /// The window's size changed
    Size { width: f64, height: f64 },
}

/// Why a maximize is happening. Snap-triggered maximizes do not take a new
/// snapshot when the window was already snapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaximizeOrigin {
    #[default]
    User,
    Snap,
}
