//! Drawing primitives
//!
//! The scene only talks to a `Painter`, so it can be drawn to a browser
//! canvas or recorded in tests.

use glam::Vec2;

use crate::platform::SpriteId;
use crate::sim::Rect;

/// 2D drawing surface
pub trait Painter {
    /// Erase the whole surface
    fn clear(&mut self);

    /// Draw a whole sprite scaled into `dest`
    fn sprite(&mut self, sprite: SpriteId, dest: Rect);

    /// Draw the `src` cell of a sprite sheet scaled into `dest`
    fn sprite_cell(&mut self, sprite: SpriteId, src: Rect, dest: Rect);

    /// Fill a rectangle with a CSS color
    fn fill_rect(&mut self, rect: Rect, color: &str);

    /// Stroke a circle outline
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str, line_width: f32);

    /// Fill text with its baseline starting at `pos`
    fn text(&mut self, text: &str, pos: Vec2, font: &str, color: &str);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Sprite(SpriteId, Rect),
    SpriteCell(SpriteId, Rect, Rect),
    FillRect(Rect, String),
    StrokeCircle {
        center: Vec2,
        radius: f32,
        color: String,
        line_width: f32,
    },
    Text {
        text: String,
        pos: Vec2,
        font: String,
        color: String,
    },
}

/// Painter that records calls instead of drawing (headless runs and tests)
#[derive(Debug, Default)]
pub struct RecordingPainter {
    pub calls: Vec<DrawCall>,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text strings drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of whole-sprite draws of `sprite`
    pub fn sprite_count(&self, sprite: SpriteId) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Sprite(id, _) if *id == sprite))
            .count()
    }
}

impl Painter for RecordingPainter {
    fn clear(&mut self) {
        self.calls.clear();
        self.calls.push(DrawCall::Clear);
    }

    fn sprite(&mut self, sprite: SpriteId, dest: Rect) {
        self.calls.push(DrawCall::Sprite(sprite, dest));
    }

    fn sprite_cell(&mut self, sprite: SpriteId, src: Rect, dest: Rect) {
        self.calls.push(DrawCall::SpriteCell(sprite, src, dest));
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.calls.push(DrawCall::FillRect(rect, color.to_string()));
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str, line_width: f32) {
        self.calls.push(DrawCall::StrokeCircle {
            center,
            radius,
            color: color.to_string(),
            line_width,
        });
    }

    fn text(&mut self, text: &str, pos: Vec2, font: &str, color: &str) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            pos,
            font: font.to_string(),
            color: color.to_string(),
        });
    }
}
