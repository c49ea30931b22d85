//! Rendering module
//!
//! Scenes draw through the `Painter` trait; the browser backend paints onto
//! a Canvas 2D context.

pub mod painter;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
pub use painter::{DrawCall, Painter, RecordingPainter};
pub use scene::draw_frame;
