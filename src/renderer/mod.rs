//! Rendering module
//!
//! The scene is described as a flat display list of canvas-style primitives
//! ([`DrawCmd`]) built from the run state each frame. A [`Surface`] replays
//! the list; on wasm32 that is an HTML canvas 2D context.

pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use glam::Vec2;

pub use scene::{SceneBuilder, Theme};

#[cfg(target_arch = "wasm32")]
pub use canvas::Canvas2d;

/// 8-bit RGB with float alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::from_hex(0xFFFFFF);

    /// Opaque color from 0xRRGGBB
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
            a: 1.0,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS color string
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a.max(0.0))
        }
    }
}

/// One drawing primitive
///
/// State commands (`Save`, `Translate`, `Alpha`, `Shadow`...) behave like
/// their canvas 2D counterparts and persist until restored or overwritten.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Save,
    Restore,
    Translate(Vec2),
    /// Radians, clockwise in screen space
    Rotate(f32),
    /// Global alpha for subsequent fills
    Alpha(f32),
    /// Glow around subsequent fills; blur 0 turns it off
    Shadow { color: Rgba, blur: f32 },
    /// Rect filled with a top-to-bottom gradient
    VerticalGradient {
        pos: Vec2,
        size: Vec2,
        top: Rgba,
        bottom: Rgba,
    },
    FillRect { pos: Vec2, size: Vec2, color: Rgba },
    StrokeRect {
        pos: Vec2,
        size: Vec2,
        color: Rgba,
        width: f32,
    },
    FillTriangle { points: [Vec2; 3], color: Rgba },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Rgba,
        width: f32,
    },
}

/// Something that can replay a display list
pub trait Surface {
    fn draw(&mut self, cmds: &[DrawCmd]);
}

/// Recording surface (tests, headless runs)
impl Surface for Vec<DrawCmd> {
    fn draw(&mut self, cmds: &[DrawCmd]) {
        self.clear();
        self.extend_from_slice(cmds);
    }
}
