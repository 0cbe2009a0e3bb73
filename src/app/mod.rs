//! Application orchestration layer
//!
//! This module turns pointer events and property toggles into window
//! geometry changes. It coordinates between the input, domain, UI and
//! platform layers.

pub mod controller;
mod drag;
mod resize;
pub mod state;

pub use controller::{ChromeError, WindowController};
pub use state::{ChromeState, MaximizeOrigin, StateChange, WindowState};
