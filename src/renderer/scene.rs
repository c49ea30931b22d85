//! Scene drawing for each game phase

use glam::Vec2;

use super::painter::Painter;
use crate::consts::*;
use crate::platform::SpriteId;
use crate::sim::{GamePhase, GameSession, PowerUpKind, Rect};

const TITLE_FONT: &str = "45pt Courier";
const LABEL_FONT: &str = "20pt Courier";

/// Clear the surface and draw the current phase
pub fn draw_frame(painter: &mut impl Painter, session: &GameSession) {
    painter.clear();
    match session.phase {
        GamePhase::Start => draw_title(painter, session.canvas),
        GamePhase::Playing => draw_playfield(painter, session),
        GamePhase::GameOver => draw_game_over(painter, session.canvas),
    }
}

fn draw_title(painter: &mut impl Painter, canvas: Vec2) {
    let (cx, cy) = (canvas.x / 2.0, canvas.y / 2.0);
    painter.text(
        "Space Shooter",
        Vec2::new(cx - 180.0, cy - 100.0),
        TITLE_FONT,
        "white",
    );
    painter.text("Start Game", Vec2::new(cx - 75.0, cy), LABEL_FONT, "white");
}

fn draw_game_over(painter: &mut impl Painter, canvas: Vec2) {
    let (cx, cy) = (canvas.x / 2.0, canvas.y / 2.0);
    painter.text("Game Over", Vec2::new(cx - 150.0, cy - 20.0), TITLE_FONT, "red");
    painter.text("Start Again", Vec2::new(cx - 75.0, cy + 40.0), LABEL_FONT, "red");
}

fn draw_playfield(painter: &mut impl Painter, session: &GameSession) {
    let craft = &session.craft;
    if craft.shield_active {
        painter.stroke_circle(
            craft.rect.center(),
            SHIELD_RING_RADIUS,
            "blue",
            SHIELD_RING_WIDTH,
        );
    }
    painter.sprite(SpriteId::Craft, craft.rect);

    for asteroid in &session.asteroids {
        painter.sprite(SpriteId::Asteroid, asteroid.rect);
    }

    for projectile in &session.projectiles {
        painter.fill_rect(projectile.rect, "red");
    }

    for explosion in &session.explosions {
        let dest = Rect::new(
            explosion.pos.x,
            explosion.pos.y,
            EXPLOSION_CELL,
            EXPLOSION_CELL,
        );
        painter.sprite_cell(SpriteId::Explosion, explosion.sheet_cell(), dest);
    }

    for power_up in &session.power_ups {
        let sprite = match power_up.kind {
            PowerUpKind::Life => SpriteId::LifePowerUp,
            PowerUpKind::Shield => SpriteId::ShieldPowerUp,
        };
        painter.sprite(sprite, power_up.rect);
    }

    draw_hud(painter, session);
}

/// Score (top right) and hearts (top left)
fn draw_hud(painter: &mut impl Painter, session: &GameSession) {
    painter.text(
        &format_score(session.score),
        Vec2::new(session.canvas.x - 70.0, 30.0),
        LABEL_FONT,
        "red",
    );

    for i in 0..session.tuning.max_lives {
        let sprite = if i < session.lives {
            SpriteId::FullHeart
        } else {
            SpriteId::EmptyHeart
        };
        let x = HUD_MARGIN + f32::from(i) * HEART_SPACING;
        painter.sprite(sprite, Rect::new(x, HUD_MARGIN, HEART_SIZE, HEART_SIZE));
    }
}

/// Score padded to four digits
pub fn format_score(score: u32) -> String {
    format!("{score:04}")
}
