//! Per-frame simulation tick
//!
//! One call per display refresh. Only `Playing` advances; the title and
//! game-over screens are static.

use super::collision::resolve_collisions;
use super::motion::integrate;
use super::state::{GameEvent, GamePhase, GameSession};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Wall-clock time in milliseconds (shield timing)
    pub now_ms: f64,
}

/// Advance the game state by one tick, returning what happened
pub fn tick(state: &mut GameSession, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Don't tick unless playing
    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;

    integrate(state, input.now_ms, &mut events);
    resolve_collisions(state, input.now_ms, &mut events);

    // Terminal check
    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over for {} with score {}",
            state.player_name.as_deref().unwrap_or("?"),
            state.score
        );
        events.push(GameEvent::GameOver { score: state.score });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::spawn::{spawn_asteroid, spawn_power_up};
    use crate::sim::{PowerUpKind, Rect};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    fn playing(seed: u64) -> GameSession {
        let mut s = GameSession::new(Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT), Tuning::default(), seed);
        s.start("Ace").unwrap();
        s
    }

    #[test]
    fn test_tick_idle_outside_playing() {
        let mut s = GameSession::new(Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT), Tuning::default(), 1);
        s.add_asteroid(Vec2::new(0.0, 0.0), 3.0);
        let events = tick(&mut s, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(s.time_ticks, 0);
        assert_eq!(s.asteroids[0].rect.pos.y, 0.0);
    }

    #[test]
    fn test_projectile_meets_falling_asteroid() {
        let mut s = playing(1);
        s.craft.rect = Rect::new(100.0, 100.0, 50.0, 50.0);
        let pid = s.next_entity_id();
        s.projectiles.push(crate::sim::state::Projectile {
            id: pid,
            rect: Rect::new(100.0, 50.0, 2.0, 10.0),
        });
        s.add_asteroid(Vec2::new(100.0, -50.0), 3.0);

        let input = TickInput::default();
        let mut ticks = 0;
        while s.explosions.is_empty() {
            tick(&mut s, &input);
            ticks += 1;
            assert!(ticks < 20, "never collided");
        }

        // Asteroid bottom passes the projectile top on tick 6
        assert_eq!(ticks, 6);
        assert_eq!(s.explosions.len(), 1);
        assert_eq!(s.score, 1);
        assert!(s.asteroids.is_empty());
        assert!(s.projectiles.is_empty());
        assert_eq!(s.lives, 5);
    }

    #[test]
    fn test_last_life_lost_ends_game() {
        let mut s = playing(1);
        s.lives = 1;
        let craft = s.craft.rect.pos;
        // Overlaps the craft after falling one tick
        s.add_asteroid(craft + Vec2::new(10.0, -20.0), 3.0);

        let events = tick(&mut s, &TickInput::default());
        assert_eq!(s.lives, 0);
        assert_eq!(s.phase, GamePhase::GameOver);
        assert_eq!(events.last(), Some(&GameEvent::GameOver { score: 0 }));

        // Terminal until restart
        let events = tick(&mut s, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(s.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_shield_window_protects_then_lapses() {
        let mut s = playing(1);
        s.add_power_up(s.craft.rect.pos, PowerUpKind::Shield, 0.0);
        tick(&mut s, &TickInput { now_ms: 1000.0 });
        assert!(s.craft.shield_active);
        assert_eq!(s.craft.shield_expires_at_ms, 8000.0);

        let craft = s.craft.rect.pos;
        s.add_asteroid(craft + Vec2::new(0.0, -10.0), 3.0);
        tick(&mut s, &TickInput { now_ms: 7999.0 });
        assert_eq!(s.lives, 5);

        s.add_asteroid(craft + Vec2::new(0.0, -10.0), 3.0);
        tick(&mut s, &TickInput { now_ms: 8001.0 });
        assert!(!s.craft.shield_active);
        assert_eq!(s.lives, 4);
    }

    #[test]
    fn test_restart_after_game_over_is_clean() {
        let mut s = playing(5);
        for _ in 0..5 {
            spawn_asteroid(&mut s);
            spawn_power_up(&mut s);
            s.fire();
        }
        s.lives = 1;
        // Clips the craft's lower-left corner, clear of the projectiles' lane
        s.add_asteroid(s.craft.rect.pos + Vec2::new(-35.0, 20.0), 0.0);
        tick(&mut s, &TickInput::default());
        assert_eq!(s.phase, GamePhase::GameOver);

        // Stale timer fires after game over are ignored
        assert_eq!(spawn_asteroid(&mut s), None);

        for _ in 0..2 {
            s.phase = GamePhase::GameOver;
            s.restart().unwrap();
            assert_eq!(s.score, 0);
            assert_eq!(s.lives, 5);
            assert!(s.asteroids.is_empty());
            assert!(s.projectiles.is_empty());
            assert!(s.power_ups.is_empty());
        }
    }

    #[derive(Debug, Clone)]
    enum Action {
        Idle,
        Fire,
        Steer(f32, f32),
        SpawnAsteroid,
        SpawnPowerUp,
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            4 => Just(Action::Idle),
            2 => Just(Action::Fire),
            2 => (-5.0f32..=5.0, -5.0f32..=5.0).prop_map(|(x, y)| Action::Steer(x, y)),
            2 => Just(Action::SpawnAsteroid),
            1 => Just(Action::SpawnPowerUp),
        ]
    }

    proptest! {
        #[test]
        fn prop_lives_bounded_score_monotonic(
            seed in any::<u64>(),
            actions in proptest::collection::vec(action(), 1..400),
        ) {
            let mut s = playing(seed);
            let mut last_score = 0;
            for (i, a) in actions.iter().enumerate() {
                match a {
                    Action::Idle => {}
                    Action::Fire => { s.fire(); }
                    Action::Steer(x, y) => s.craft.vel = Vec2::new(*x, *y),
                    Action::SpawnAsteroid => { spawn_asteroid(&mut s); }
                    Action::SpawnPowerUp => { spawn_power_up(&mut s); }
                }
                let was_playing = s.is_playing();
                tick(&mut s, &TickInput { now_ms: i as f64 * 16.0 });

                prop_assert!(s.lives <= 5);
                if was_playing {
                    prop_assert!(s.score >= last_score);
                }
                last_score = s.score;

                // No duplicate ids survive a tick
                let mut ids: Vec<u32> = s.asteroids.iter().map(|a| a.id)
                    .chain(s.projectiles.iter().map(|p| p.id))
                    .chain(s.power_ups.iter().map(|p| p.id))
                    .chain(s.explosions.iter().map(|e| e.id))
                    .collect();
                let total = ids.len();
                ids.sort_unstable();
                ids.dedup();
                prop_assert_eq!(ids.len(), total);

                if s.phase == GamePhase::GameOver {
                    prop_assert_eq!(s.lives, 0);
                    break;
                }
            }
        }

        #[test]
        fn prop_shield_prevents_life_loss(
            seed in any::<u64>(),
            spawns in 1usize..60,
        ) {
            let mut s = playing(seed);
            s.craft.raise_shield(0.0, 1.0e12);
            for i in 0..600 {
                if i % 10 == 0 && i / 10 < spawns {
                    spawn_asteroid(&mut s);
                }
                tick(&mut s, &TickInput { now_ms: i as f64 * 16.0 });
                prop_assert_eq!(s.lives, 5);
            }
        }
    }
}
