//! Game state and core simulation types
//!
//! `GameSession` is the single owner of everything a play-through mutates:
//! the craft, the four transient entity collections and the session scalars.

use std::collections::HashSet;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::rect::Rect;
use crate::consts::*;
use crate::error::{NameError, SessionError};
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for a name and the start action
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Restores one life (up to the cap)
    Life,
    /// Grants a timed shield
    Shield,
}

/// Something that happened during a tick (for logging and the driver)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Asteroid shot down at the given position
    AsteroidDestroyed { pos: Vec2 },
    /// Asteroid struck the craft; `shielded` if no life was lost
    CraftHit { shielded: bool },
    /// Asteroid left the bottom of the screen; `shielded` if no life was lost
    AsteroidEscaped { shielded: bool },
    /// Power-up picked up
    PowerUpCollected { kind: PowerUpKind },
    /// Shield window ran out
    ShieldExpired,
    /// Lives reached zero
    GameOver { score: u32 },
}

/// The player's craft
#[derive(Debug, Clone)]
pub struct Craft {
    pub rect: Rect,
    /// Per-tick velocity set by directional input
    pub vel: Vec2,
    pub shield_active: bool,
    /// Wall-clock time (ms) after which the shield drops
    pub shield_expires_at_ms: f64,
}

impl Craft {
    /// Craft centred horizontally near the bottom of the canvas
    pub fn spawn(canvas: Vec2) -> Self {
        Self {
            rect: Rect::new(
                canvas.x / 2.0 - CRAFT_SIZE / 2.0,
                canvas.y - CRAFT_SPAWN_BOTTOM_OFFSET,
                CRAFT_SIZE,
                CRAFT_SIZE,
            ),
            vel: Vec2::ZERO,
            shield_active: false,
            shield_expires_at_ms: 0.0,
        }
    }

    /// Where a fired projectile appears: centred on the craft's nose
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(
            self.rect.pos.x + self.rect.size.x / 2.0 - PROJECTILE_WIDTH / 2.0,
            self.rect.pos.y,
        )
    }

    /// Start or extend the shield window
    pub fn raise_shield(&mut self, now_ms: f64, duration_ms: f64) {
        self.shield_active = true;
        self.shield_expires_at_ms = now_ms + duration_ms;
    }

    pub fn drop_shield(&mut self) {
        self.shield_active = false;
        self.shield_expires_at_ms = 0.0;
    }
}

/// A falling asteroid
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub id: u32,
    pub rect: Rect,
    /// Downward speed per tick
    pub speed: f32,
}

/// A player projectile travelling up
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub rect: Rect,
}

/// An explosion animation
#[derive(Debug, Clone)]
pub struct Explosion {
    pub id: u32,
    pub pos: Vec2,
    /// Animation frame, fractional; finished at `EXPLOSION_FRAMES`
    pub frame: f32,
}

impl Explosion {
    pub fn is_finished(&self) -> bool {
        self.frame >= EXPLOSION_FRAMES
    }

    /// Source cell in the explosion sprite sheet for the current frame
    pub fn sheet_cell(&self) -> Rect {
        let frame = self.frame.max(0.0).floor() as u32;
        let col = frame % EXPLOSION_SHEET_COLUMNS;
        let row = frame / EXPLOSION_SHEET_COLUMNS;
        Rect::new(
            col as f32 * EXPLOSION_CELL,
            row as f32 * EXPLOSION_CELL,
            EXPLOSION_CELL,
            EXPLOSION_CELL,
        )
    }
}

/// A falling pickup
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub rect: Rect,
    /// Downward speed per tick
    pub speed: f32,
}

/// Ids marked for removal during one pass, applied afterwards
#[derive(Debug, Default)]
pub struct RemovalSet {
    ids: HashSet<u32>,
}

impl RemovalSet {
    /// Mark an id; returns false if it was already marked
    pub fn mark(&mut self, id: u32) -> bool {
        self.ids.insert(id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Drop every marked item from `items`
    pub fn apply<T>(&self, items: &mut Vec<T>, id_of: impl Fn(&T) -> u32) {
        if !self.ids.is_empty() {
            items.retain(|item| !self.ids.contains(&id_of(item)));
        }
    }
}

/// Normalize a typed name and check it fits on the leaderboard
pub fn validate_player_name(raw: &str) -> Result<String, NameError> {
    let name = raw.trim();
    let len = name.chars().count();
    if len == 0 {
        return Err(NameError::Empty);
    }
    if len > NAME_MAX_CHARS {
        return Err(NameError::TooLong {
            len,
            max: NAME_MAX_CHARS,
        });
    }
    Ok(name.to_string())
}

/// Complete state of one game (entity store plus session scalars)
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Logical canvas size
    pub canvas: Vec2,
    /// Balance values
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Name entered on the title screen
    pub player_name: Option<String>,
    pub score: u32,
    pub lives: u8,
    /// Simulation tick counter (ticks spent playing)
    pub time_ticks: u64,
    pub craft: Craft,
    pub asteroids: Vec<Asteroid>,
    pub projectiles: Vec<Projectile>,
    pub explosions: Vec<Explosion>,
    pub power_ups: Vec<PowerUp>,
    /// Spawn randomness
    pub rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameSession {
    /// Create a session on the title screen
    pub fn new(canvas: Vec2, tuning: Tuning, seed: u64) -> Self {
        Self {
            canvas,
            phase: GamePhase::Start,
            player_name: None,
            score: 0,
            lives: tuning.max_lives,
            time_ticks: 0,
            craft: Craft::spawn(canvas),
            asteroids: Vec::new(),
            projectiles: Vec::new(),
            explosions: Vec::new(),
            power_ups: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Leave the title screen with the typed name
    pub fn start(&mut self, raw_name: &str) -> Result<(), SessionError> {
        if self.phase != GamePhase::Start {
            return Err(SessionError::WrongPhase {
                action: "start",
                phase: self.phase,
            });
        }
        let name = validate_player_name(raw_name)?;
        log::info!("Session started for {name}");
        self.player_name = Some(name);
        self.begin_round();
        Ok(())
    }

    /// Play again after a game over
    pub fn restart(&mut self) -> Result<(), SessionError> {
        if self.phase != GamePhase::GameOver {
            return Err(SessionError::WrongPhase {
                action: "restart",
                phase: self.phase,
            });
        }
        log::info!("Session restarted");
        self.begin_round();
        Ok(())
    }

    /// Reset score, lives and entities, then enter `Playing`
    fn begin_round(&mut self) {
        self.score = 0;
        self.lives = self.tuning.max_lives;
        self.time_ticks = 0;
        self.asteroids.clear();
        self.projectiles.clear();
        self.explosions.clear();
        self.power_ups.clear();
        self.craft.vel = Vec2::ZERO;
        self.craft.drop_shield();
        self.phase = GamePhase::Playing;
    }

    /// Fire a projectile from the craft (only while playing)
    pub fn fire(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        let pos = self.craft.muzzle();
        let id = self.next_entity_id();
        self.projectiles.push(Projectile {
            id,
            rect: Rect::new(pos.x, pos.y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
        });
        true
    }

    pub fn add_asteroid(&mut self, pos: Vec2, speed: f32) -> u32 {
        let id = self.next_entity_id();
        self.asteroids.push(Asteroid {
            id,
            rect: Rect::new(pos.x, pos.y, ASTEROID_SIZE, ASTEROID_SIZE),
            speed,
        });
        id
    }

    pub fn add_power_up(&mut self, pos: Vec2, kind: PowerUpKind, speed: f32) -> u32 {
        let id = self.next_entity_id();
        self.power_ups.push(PowerUp {
            id,
            kind,
            rect: Rect::new(pos.x, pos.y, POWER_UP_SIZE, POWER_UP_SIZE),
            speed,
        });
        id
    }

    pub fn add_explosion(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.explosions.push(Explosion { id, pos, frame: 0.0 });
        id
    }

    /// Lose one life (floored at zero)
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    /// Gain one life (capped at the maximum); returns whether it was granted
    pub fn gain_life(&mut self) -> bool {
        if self.lives < self.tuning.max_lives {
            self.lives += 1;
            true
        } else {
            false
        }
    }

    /// Total transient entities alive
    pub fn entity_count(&self) -> usize {
        self.asteroids.len() + self.projectiles.len() + self.explosions.len() + self.power_ups.len()
    }
}
