//! Motion integration
//!
//! Advances every entity by one tick and evicts what left the screen.

use super::state::{GameEvent, GameSession, RemovalSet};

/// Move the craft by its velocity and keep it on the canvas
pub fn move_craft(session: &mut GameSession) {
    let craft = &mut session.craft;
    craft.rect.pos += craft.vel;
    craft.rect.clamp_within(session.canvas);
}

/// Drop the shield once its window has passed
pub fn expire_shield(session: &mut GameSession, now_ms: f64, events: &mut Vec<GameEvent>) {
    let craft = &mut session.craft;
    if craft.shield_active && now_ms > craft.shield_expires_at_ms {
        craft.drop_shield();
        events.push(GameEvent::ShieldExpired);
    }
}

/// Asteroids fall; each one past the bottom edge costs a life unless shielded
pub fn move_asteroids(session: &mut GameSession, events: &mut Vec<GameEvent>) {
    let bottom = session.canvas.y;
    let mut escaped = RemovalSet::default();
    let mut escaped_count = 0;
    for asteroid in &mut session.asteroids {
        asteroid.rect.pos.y += asteroid.speed;
        if asteroid.rect.pos.y > bottom && escaped.mark(asteroid.id) {
            log::debug!("Asteroid {} escaped", asteroid.id);
            escaped_count += 1;
        }
    }
    if escaped.is_empty() {
        return;
    }

    let shielded = session.craft.shield_active;
    for _ in 0..escaped_count {
        events.push(GameEvent::AsteroidEscaped { shielded });
        if !shielded {
            session.lose_life();
        }
    }
    escaped.apply(&mut session.asteroids, |a| a.id);
}

/// Projectiles rise and vanish past the top edge
pub fn move_projectiles(session: &mut GameSession) {
    let speed = session.tuning.projectile_speed;
    for projectile in &mut session.projectiles {
        projectile.rect.pos.y -= speed;
    }
    session.projectiles.retain(|p| p.rect.pos.y >= 0.0);
}

/// Power-ups fall and vanish past the bottom edge (no penalty)
pub fn move_power_ups(session: &mut GameSession) {
    let bottom = session.canvas.y;
    for power_up in &mut session.power_ups {
        power_up.rect.pos.y += power_up.speed;
    }
    session.power_ups.retain(|p| p.rect.pos.y <= bottom);
}

/// Advance explosion animations and drop finished ones
pub fn age_explosions(session: &mut GameSession) {
    let step = session.tuning.explosion_frame_step;
    for explosion in &mut session.explosions {
        explosion.frame += step;
    }
    session.explosions.retain(|e| !e.is_finished());
}

/// Run the whole integrator in order: craft, shield, asteroids,
/// projectiles, power-ups, explosions
pub fn integrate(session: &mut GameSession, now_ms: f64, events: &mut Vec<GameEvent>) {
    move_craft(session);
    expire_shield(session, now_ms, events);
    move_asteroids(session, events);
    move_projectiles(session);
    move_power_ups(session);
    age_explosions(session);
}
