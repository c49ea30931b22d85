//! Collision detection and response
//!
//! Every pair test runs against the collections as they were at the start of
//! the pass; removals are collected and applied once all tests are done.

use glam::Vec2;

use super::state::{GameEvent, GameSession, PowerUpKind, RemovalSet};

/// Outcome counters of one resolution pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionResult {
    pub asteroids_shot: u32,
    pub craft_hits: u32,
    pub power_ups_collected: u32,
}

/// Resolve projectile×asteroid, asteroid×craft and power-up×craft contacts
pub fn resolve_collisions(
    session: &mut GameSession,
    now_ms: f64,
    events: &mut Vec<GameEvent>,
) -> CollisionResult {
    let mut result = CollisionResult::default();
    let mut dead_asteroids = RemovalSet::default();
    let mut spent_projectiles = RemovalSet::default();
    let mut taken_power_ups = RemovalSet::default();
    let mut explosions: Vec<Vec2> = Vec::new();

    let craft_rect = session.craft.rect;
    let shielded = session.craft.shield_active;
    let mut lives_lost = 0u32;

    for asteroid in &session.asteroids {
        // Every overlapping pair scores and explodes; the asteroid is removed once
        for projectile in &session.projectiles {
            if projectile.rect.overlaps(&asteroid.rect) {
                dead_asteroids.mark(asteroid.id);
                spent_projectiles.mark(projectile.id);
                explosions.push(asteroid.rect.pos);
                result.asteroids_shot += 1;
                events.push(GameEvent::AsteroidDestroyed {
                    pos: asteroid.rect.pos,
                });
            }
        }

        // Tested against the asteroid as it was at the start of the pass, so a
        // shot asteroid can still strike the craft
        if asteroid.rect.overlaps(&craft_rect) {
            dead_asteroids.mark(asteroid.id);
            explosions.push(asteroid.rect.pos);
            result.craft_hits += 1;
            if !shielded {
                lives_lost += 1;
            }
            events.push(GameEvent::CraftHit { shielded });
        }
    }

    let mut pickups: Vec<PowerUpKind> = Vec::new();
    for power_up in &session.power_ups {
        if power_up.rect.overlaps(&craft_rect) {
            taken_power_ups.mark(power_up.id);
            pickups.push(power_up.kind);
        }
    }

    // Apply effects
    session.score = session.score.saturating_add(result.asteroids_shot);
    for _ in 0..lives_lost {
        session.lose_life();
    }
    for kind in pickups {
        match kind {
            PowerUpKind::Life => {
                session.gain_life();
            }
            PowerUpKind::Shield => {
                let duration = session.tuning.shield_duration_ms;
                session.craft.raise_shield(now_ms, duration);
            }
        }
        result.power_ups_collected += 1;
        events.push(GameEvent::PowerUpCollected { kind });
    }
    for pos in explosions {
        session.add_explosion(pos);
    }

    dead_asteroids.apply(&mut session.asteroids, |a| a.id);
    spent_projectiles.apply(&mut session.projectiles, |p| p.id);
    taken_power_ups.apply(&mut session.power_ups, |p| p.id);

    result
}
