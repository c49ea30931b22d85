//! Space Shooter - A browser arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation (entities, spawning, motion, collisions, game phases)
//! - `game`: Loop driver shell shared by the browser and headless runners
//! - `renderer`: Painter seam, scene drawing and the Canvas 2D backend
//! - `platform`: Input mapping and sprite assets
//! - `leaderboard`: Read-only scoreboard model and fetch
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod game;
pub mod leaderboard;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use error::{AssetError, LeaderboardError, NameError, SessionError, TuningError};
pub use game::Game;
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Default logical canvas size (the page's canvas element wins when present)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Lives cap (hearts drawn in the HUD)
    pub const MAX_LIVES: u8 = 5;

    /// Player craft
    pub const CRAFT_SIZE: f32 = 50.0;
    /// Distance from the craft's top edge to the canvas bottom at spawn
    pub const CRAFT_SPAWN_BOTTOM_OFFSET: f32 = 60.0;
    /// Radius of the shield ring drawn around the craft
    pub const SHIELD_RING_RADIUS: f32 = 40.0;
    pub const SHIELD_RING_WIDTH: f32 = 5.0;

    /// Asteroids
    pub const ASTEROID_SIZE: f32 = 50.0;

    /// Projectiles
    pub const PROJECTILE_WIDTH: f32 = 2.0;
    pub const PROJECTILE_HEIGHT: f32 = 10.0;

    /// Power-ups
    pub const POWER_UP_SIZE: f32 = 30.0;

    /// Explosion sprite sheet: 4x4 grid of 64px cells
    pub const EXPLOSION_FRAMES: f32 = 16.0;
    pub const EXPLOSION_SHEET_COLUMNS: u32 = 4;
    pub const EXPLOSION_CELL: f32 = 64.0;

    /// HUD hearts
    pub const HEART_SIZE: f32 = 25.0;
    pub const HEART_SPACING: f32 = 30.0;
    pub const HUD_MARGIN: f32 = 10.0;

    /// Player name length limit (characters, after trimming)
    pub const NAME_MAX_CHARS: usize = 5;

    /// Leaderboard rows shown on the game-over screen
    pub const LEADERBOARD_ROWS: usize = 10;
}
