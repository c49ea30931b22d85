//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key names to actions)
//! - Sprite assets (browser image loading)

pub mod assets;
pub mod input;

pub use assets::SpriteId;
pub use input::{Direction, KeyAction, key_action};
