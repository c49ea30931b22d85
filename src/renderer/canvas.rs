//! Canvas 2D backend

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::painter::Painter;
use crate::error::AssetError;
use crate::platform::SpriteId;
use crate::platform::assets::Sprites;
use crate::sim::Rect;

/// Paints onto an `HtmlCanvasElement` with loaded sprites
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
    sprites: Sprites,
    size: Vec2,
}

impl CanvasPainter {
    pub fn new(canvas: &HtmlCanvasElement, sprites: Sprites) -> Result<Self, AssetError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(AssetError::Dom("2d canvas context"))?;
        Ok(Self {
            ctx,
            sprites,
            size: Vec2::new(canvas.width() as f32, canvas.height() as f32),
        })
    }

    /// Logical canvas size
    pub fn size(&self) -> Vec2 {
        self.size
    }
}

impl Painter for CanvasPainter {
    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, f64::from(self.size.x), f64::from(self.size.y));
    }

    fn sprite(&mut self, sprite: SpriteId, dest: Rect) {
        let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            self.sprites.get(sprite),
            f64::from(dest.pos.x),
            f64::from(dest.pos.y),
            f64::from(dest.size.x),
            f64::from(dest.size.y),
        );
    }

    fn sprite_cell(&mut self, sprite: SpriteId, src: Rect, dest: Rect) {
        let _ = self
            .ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                self.sprites.get(sprite),
                f64::from(src.pos.x),
                f64::from(src.pos.y),
                f64::from(src.size.x),
                f64::from(src.size.y),
                f64::from(dest.pos.x),
                f64::from(dest.pos.y),
                f64::from(dest.size.x),
                f64::from(dest.size.y),
            );
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            f64::from(rect.pos.x),
            f64::from(rect.pos.y),
            f64::from(rect.size.x),
            f64::from(rect.size.y),
        );
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str, line_width: f32) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            f64::from(center.x),
            f64::from(center.y),
            f64::from(radius),
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(f64::from(line_width));
        self.ctx.stroke();
        self.ctx.close_path();
    }

    fn text(&mut self, text: &str, pos: Vec2, font: &str, color: &str) {
        self.ctx.set_font(font);
        self.ctx.set_fill_style_str(color);
        let _ = self
            .ctx
            .fill_text(text, f64::from(pos.x), f64::from(pos.y));
    }
}
