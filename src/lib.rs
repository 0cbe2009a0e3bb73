//! Native-feeling chrome for undecorated windows
//!
//! Drag-to-move, edge and corner resize, maximize/restore with geometry
//! recall, minimize, and aero snap with a live preview overlay. The
//! [`app::WindowController`] consumes pointer events and drives a
//! [`platform::HostWindow`] using a [`platform::ScreenLayoutService`] for
//! monitor layout.

pub mod app;
pub mod config;
pub mod domain;
pub mod input;
pub mod platform;
pub mod ui;

pub use app::{ChromeError, ChromeState, StateChange, WindowController, WindowState};
pub use config::ChromeConfig;
pub use domain::{Direction, Point, Rect, Size};
pub use input::{MouseButton, MoveSurface, PointerEvent, PointerPhase, PointerTarget, SurfaceId};
