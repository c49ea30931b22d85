//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - Wall-clock time arrives through `TickInput`
//! - Seeded RNG only
//! - Two-phase removal (mark ids, then filter)

pub mod collision;
pub mod motion;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, resolve_collisions};
pub use rect::Rect;
pub use spawn::{IntervalTimer, spawn_asteroid, spawn_power_up};
pub use state::{
    Asteroid, Craft, Explosion, GameEvent, GamePhase, GameSession, PowerUp, PowerUpKind,
    Projectile, RemovalSet, validate_player_name,
};
pub use tick::{TickInput, tick};
