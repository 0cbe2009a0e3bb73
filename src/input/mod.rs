//! Pointer input model
//!
//! Hosts forward mouse messages as [`PointerEvent`]s addressed to a
//! [`PointerTarget`]; the controller decides what each one means.

pub mod pointer;

pub use pointer::{MouseButton, MoveSurface, PointerEvent, PointerPhase, PointerTarget, SurfaceId};
