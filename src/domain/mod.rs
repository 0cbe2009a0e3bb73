//! Domain logic and core data structures
//!
//! This module contains pure geometry logic that is independent
//! of Win32 APIs and platform-specific implementations.

pub mod core;
pub mod direction;
pub mod snap;
pub mod snapshot;

pub use self::core::{Point, Rect, Size, clamp};
pub use direction::{Direction, HDirection, VDirection};
pub use snap::SnapAllowance;
pub use snapshot::GeometrySnapshot;
