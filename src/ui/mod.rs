//! Snap preview overlay and its rendering

#[cfg(windows)]
pub mod layered;
pub mod overlay;
pub mod renderer;

#[cfg(windows)]
pub use layered::LayeredOverlayBackend;
pub use overlay::{HeadlessOverlayBackend, OverlayBackend, OverlayError, OverlayWindow};
pub use renderer::{OverlayStyle, PreviewRenderer, RendererError};
