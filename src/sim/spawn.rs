//! Timer-driven spawning
//!
//! Spawns are driven by wall-clock timers that run independently of the
//! frame loop. Timers are never cancelled: every spawn checks the session
//! phase itself, so a timer firing on the title screen or after a game over
//! does nothing.

use glam::Vec2;
use rand::Rng;

use super::state::{GameSession, PowerUpKind};
use crate::consts::*;

/// Uniform position in `[0, span)`, or 0 when the canvas is too narrow
fn random_x(rng: &mut impl Rng, span: f32) -> f32 {
    if span > 0.0 {
        rng.random_range(0.0..span)
    } else {
        0.0
    }
}

/// Asteroid timer callback: add one asteroid just above the top edge.
/// Returns the new asteroid's id, or `None` when not playing.
pub fn spawn_asteroid(session: &mut GameSession) -> Option<u32> {
    if !session.is_playing() {
        return None;
    }
    let x = random_x(&mut session.rng, session.canvas.x - ASTEROID_SIZE);
    let (min, max) = (
        session.tuning.asteroid_speed_min,
        session.tuning.asteroid_speed_max,
    );
    let speed = session.rng.random_range(min..max);
    let id = session.add_asteroid(Vec2::new(x, -ASTEROID_SIZE), speed);
    log::debug!("Spawned asteroid {id} at x={x:.0} speed={speed:.2}");
    Some(id)
}

/// Power-up timer callback: add one pickup just above the top edge.
/// Returns the new pickup's id, or `None` when not playing.
pub fn spawn_power_up(session: &mut GameSession) -> Option<u32> {
    if !session.is_playing() {
        return None;
    }
    let x = random_x(&mut session.rng, session.canvas.x - POWER_UP_SIZE);
    let kind = if session.rng.random_bool(0.5) {
        PowerUpKind::Life
    } else {
        PowerUpKind::Shield
    };
    let speed = session.tuning.power_up_speed;
    let id = session.add_power_up(Vec2::new(x, -POWER_UP_SIZE), kind, speed);
    log::debug!("Spawned {kind:?} power-up {id} at x={x:.0}");
    Some(id)
}

/// Periodic wall-clock timer for hosts without `setInterval`
///
/// Fires once per elapsed period regardless of how often it is polled, so a
/// slow frame catches up instead of dropping spawns.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period_ms: f64,
    next_due_ms: f64,
}

impl IntervalTimer {
    /// Timer whose first fire is one period after `now_ms`
    pub fn new(period_ms: u32, now_ms: f64) -> Self {
        let period_ms = f64::from(period_ms.max(1));
        Self {
            period_ms,
            next_due_ms: now_ms + period_ms,
        }
    }

    /// Number of fires due at `now_ms` (advances the timer past them)
    pub fn poll(&mut self, now_ms: f64) -> u32 {
        let mut fires = 0;
        while now_ms >= self.next_due_ms {
            self.next_due_ms += self.period_ms;
            fires += 1;
        }
        fires
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;
    use crate::tuning::Tuning;

    fn playing() -> GameSession {
        let mut s = GameSession::new(Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT), Tuning::default(), 42);
        s.start("Ace").unwrap();
        s
    }

    #[test]
    fn test_spawns_suppressed_unless_playing() {
        let mut s = GameSession::new(Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT), Tuning::default(), 42);
        assert_eq!(spawn_asteroid(&mut s), None);
        assert_eq!(spawn_power_up(&mut s), None);

        s.phase = GamePhase::GameOver;
        assert_eq!(spawn_asteroid(&mut s), None);
        assert_eq!(spawn_power_up(&mut s), None);
        assert_eq!(s.entity_count(), 0);
    }

    #[test]
    fn test_asteroid_attributes_in_range() {
        let mut s = playing();
        for _ in 0..200 {
            spawn_asteroid(&mut s).unwrap();
        }
        for a in &s.asteroids {
            assert!(a.rect.pos.x >= 0.0 && a.rect.pos.x <= CANVAS_WIDTH - ASTEROID_SIZE);
            assert_eq!(a.rect.pos.y, -50.0);
            assert_eq!(a.rect.size, Vec2::new(50.0, 50.0));
            assert!(a.speed >= 2.0 && a.speed < 5.0);
        }
    }

    #[test]
    fn test_power_up_attributes_and_kinds() {
        let mut s = playing();
        for _ in 0..200 {
            spawn_power_up(&mut s).unwrap();
        }
        for p in &s.power_ups {
            assert!(p.rect.pos.x >= 0.0 && p.rect.pos.x <= CANVAS_WIDTH - POWER_UP_SIZE);
            assert_eq!(p.rect.pos.y, -30.0);
            assert_eq!(p.speed, 2.0);
        }
        // Both kinds show up with a fair coin
        assert!(s.power_ups.iter().any(|p| p.kind == PowerUpKind::Life));
        assert!(s.power_ups.iter().any(|p| p.kind == PowerUpKind::Shield));
    }

    #[test]
    fn test_narrow_canvas_spawns_at_zero() {
        let mut s = GameSession::new(Vec2::new(40.0, 600.0), Tuning::default(), 1);
        s.start("Ace").unwrap();
        spawn_asteroid(&mut s).unwrap();
        assert_eq!(s.asteroids[0].rect.pos.x, 0.0);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = playing();
        let mut b = playing();
        for _ in 0..10 {
            spawn_asteroid(&mut a);
            spawn_asteroid(&mut b);
        }
        let xs = |s: &GameSession| s.asteroids.iter().map(|a| a.rect.pos.x).collect::<Vec<_>>();
        assert_eq!(xs(&a), xs(&b));
    }

    #[test]
    fn test_interval_timer() {
        let mut t = IntervalTimer::new(2000, 1000.0);
        assert_eq!(t.poll(2999.0), 0);
        assert_eq!(t.poll(3000.0), 1);
        assert_eq!(t.poll(3001.0), 0);
        // A long stall catches up
        assert_eq!(t.poll(9500.0), 3);
        assert_eq!(t.poll(11_000.0), 1);
    }
}
