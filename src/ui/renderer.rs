//! Snap preview rendering
//!
//! Paints the overlay's cosmetic style with tiny-skia. Style resolution is
//! separated from rasterization so the palette can be tested without
//! touching pixels.

use serde::{Deserialize, Serialize};
use tiny_skia::{
    Color, GradientStop, LinearGradient, Paint, PathBuilder, Pixmap, PremultipliedColorU8,
    Rect as SkiaRect, SpreadMode, Stroke, Transform,
};

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("Failed to create pixmap for rendering")]
    PixmapCreationFailed,

    #[error("Invalid preview dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Fixed palette of preview styles. A style replaces the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OverlayStyle {
    WhiteNoise,
    GlassGlare,
    GlassTransparent,
    Gnome,
    #[default]
    Minimalistic,
    None,
}

/// Resolved drawing instructions for a style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleSpec {
    pub fill: Option<Color>,
    pub border: Option<(Color, f32)>,
    /// Diagonal highlight across the top-left half
    pub glare: bool,
    /// Per-pixel grain of this maximum alpha
    pub noise_alpha: Option<u8>,
}

impl OverlayStyle {
    pub fn spec(self) -> StyleSpec {
        match self {
            OverlayStyle::WhiteNoise => StyleSpec {
                fill: None,
                border: Some((Color::from_rgba8(255, 255, 255, 160), 1.0)),
                glare: false,
                noise_alpha: Some(110),
            },
            OverlayStyle::GlassGlare => StyleSpec {
                fill: Some(Color::from_rgba8(170, 200, 230, 70)),
                border: Some((Color::from_rgba8(255, 255, 255, 140), 1.0)),
                glare: true,
                noise_alpha: None,
            },
            OverlayStyle::GlassTransparent => StyleSpec {
                fill: Some(Color::from_rgba8(255, 255, 255, 25)),
                border: Some((Color::from_rgba8(255, 255, 255, 120), 1.0)),
                glare: false,
                noise_alpha: None,
            },
            OverlayStyle::Gnome => StyleSpec {
                fill: Some(Color::from_rgba8(53, 132, 228, 80)),
                border: Some((Color::from_rgba8(53, 132, 228, 220), 2.0)),
                glare: false,
                noise_alpha: None,
            },
            OverlayStyle::Minimalistic => StyleSpec {
                fill: Some(Color::from_rgba8(255, 255, 255, 50)),
                border: Some((Color::from_rgba8(128, 128, 128, 200), 1.0)),
                glare: false,
                noise_alpha: None,
            },
            OverlayStyle::None => StyleSpec {
                fill: None,
                border: None,
                glare: false,
                noise_alpha: None,
            },
        }
    }
}

/// Rasterizes preview styles
#[derive(Debug, Default)]
pub struct PreviewRenderer;

impl PreviewRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render `style` into a fresh pixmap of the given size
    pub fn render(
        &self,
        style: OverlayStyle,
        width: u32,
        height: u32,
    ) -> Result<Pixmap, RendererError> {
        if width == 0 || height == 0 {
            return Err(RendererError::InvalidDimensions { width, height });
        }

        let mut pixmap = Pixmap::new(width, height).ok_or(RendererError::PixmapCreationFailed)?;
        pixmap.fill(Color::TRANSPARENT);

        let spec = style.spec();
        let bounds = SkiaRect::from_xywh(0.0, 0.0, width as f32, height as f32)
            .ok_or(RendererError::InvalidDimensions { width, height })?;

        if let Some(alpha) = spec.noise_alpha {
            fill_noise(&mut pixmap, alpha);
        }

        if let Some(color) = spec.fill {
            let mut paint = Paint::default();
            paint.set_color(color);
            pixmap.fill_rect(bounds, &paint, Transform::identity(), None);
        }

        if spec.glare {
            draw_glare(&mut pixmap, bounds);
        }

        if let Some((color, width)) = spec.border {
            draw_border(&mut pixmap, bounds, color, width);
        }

        Ok(pixmap)
    }
}

fn fill_noise(pixmap: &mut Pixmap, max_alpha: u8) {
    // xorshift32; a fixed seed keeps repeated frames from shimmering
    let mut state: u32 = 0x9E37_79B9;
    for pixel in pixmap.pixels_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let alpha = (state % (max_alpha as u32 + 1)) as u8;
        // white premultiplied by its own alpha
        if let Some(color) = PremultipliedColorU8::from_rgba(alpha, alpha, alpha, alpha) {
            *pixel = color;
        }
    }
}

fn draw_glare(pixmap: &mut Pixmap, bounds: SkiaRect) {
    let stops = vec![
        GradientStop::new(0.0, Color::from_rgba8(255, 255, 255, 110)),
        GradientStop::new(0.45, Color::from_rgba8(255, 255, 255, 30)),
        GradientStop::new(0.5, Color::TRANSPARENT),
    ];
    let shader = LinearGradient::new(
        tiny_skia::Point::from_xy(bounds.left(), bounds.top()),
        tiny_skia::Point::from_xy(bounds.right(), bounds.bottom()),
        stops,
        SpreadMode::Pad,
        Transform::identity(),
    );

    if let Some(shader) = shader {
        let paint = Paint {
            shader,
            anti_alias: true,
            ..Paint::default()
        };
        pixmap.fill_rect(bounds, &paint, Transform::identity(), None);
    }
}

fn draw_border(pixmap: &mut Pixmap, bounds: SkiaRect, color: Color, width: f32) {
    // Inset by half the stroke so the whole line lands inside the surface
    let inset = width / 2.0;
    let Some(rect) = SkiaRect::from_ltrb(
        bounds.left() + inset,
        bounds.top() + inset,
        bounds.right() - inset,
        bounds.bottom() - inset,
    ) else {
        return;
    };

    let path = PathBuilder::from_rect(rect);
    let mut paint = Paint::default();
    paint.set_color(color);
    let stroke = Stroke {
        width,
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}
