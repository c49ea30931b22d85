//! Keyboard mapping
//!
//! Browser `KeyboardEvent.key` values to game actions. Older browsers report
//! `Left`/`Right`/`Up`/`Down`/`Spacebar`, so both spellings are accepted.

use glam::Vec2;

/// Direction key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Unit step on the canvas (y grows downward)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
            Direction::Up => Vec2::NEG_Y,
            Direction::Down => Vec2::Y,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Pressing sets this axis of the velocity to full speed
    pub fn press(self, vel: &mut Vec2, speed: f32) {
        let step = self.unit() * speed;
        if self.is_horizontal() {
            vel.x = step.x;
        } else {
            vel.y = step.y;
        }
    }

    /// Releasing stops this axis if the craft is still moving this way, or
    /// both axes with `legacy` release
    pub fn release(self, vel: &mut Vec2, legacy: bool) {
        if legacy {
            *vel = Vec2::ZERO;
            return;
        }
        let unit = self.unit();
        if self.is_horizontal() {
            if vel.x != 0.0 && vel.x.signum() == unit.x {
                vel.x = 0.0;
            }
        } else if vel.y != 0.0 && vel.y.signum() == unit.y {
            vel.y = 0.0;
        }
    }
}

/// Action bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(Direction),
    Fire,
}

/// Map a `KeyboardEvent.key` value
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "ArrowLeft" | "Left" => Some(KeyAction::Move(Direction::Left)),
        "ArrowRight" | "Right" => Some(KeyAction::Move(Direction::Right)),
        "ArrowUp" | "Up" => Some(KeyAction::Move(Direction::Up)),
        "ArrowDown" | "Down" => Some(KeyAction::Move(Direction::Down)),
        " " | "Spacebar" => Some(KeyAction::Fire),
        _ => None,
    }
}
