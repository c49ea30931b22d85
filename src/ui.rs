//! On-canvas buttons
//!
//! The title and game-over screens draw their button labels as text; clicks
//! are matched against fixed regions around those labels.

use glam::Vec2;

use crate::sim::{GamePhase, Rect};

/// Half-width of a button region
const BUTTON_HALF_WIDTH: f32 = 75.0;
/// Height of a button region
const BUTTON_HEIGHT: f32 = 40.0;

/// Buttons that can be clicked on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasButton {
    /// "Start Game" on the title screen
    Start,
    /// "Start Again" on the game-over screen
    Restart,
}

impl CanvasButton {
    /// Clickable region for a canvas of the given size
    pub fn region(self, canvas: Vec2) -> Rect {
        let top = match self {
            CanvasButton::Start => canvas.y / 2.0 - BUTTON_HEIGHT / 2.0,
            CanvasButton::Restart => canvas.y / 2.0 + BUTTON_HEIGHT / 2.0,
        };
        Rect::new(
            canvas.x / 2.0 - BUTTON_HALF_WIDTH,
            top,
            BUTTON_HALF_WIDTH * 2.0,
            BUTTON_HEIGHT,
        )
    }

    /// The button live in a phase, if any
    pub fn for_phase(phase: GamePhase) -> Option<Self> {
        match phase {
            GamePhase::Start => Some(CanvasButton::Start),
            GamePhase::GameOver => Some(CanvasButton::Restart),
            GamePhase::Playing => None,
        }
    }
}

/// Which button (if any) a click at canvas-relative `point` pressed
pub fn hit_test(phase: GamePhase, canvas: Vec2, point: Vec2) -> Option<CanvasButton> {
    CanvasButton::for_phase(phase).filter(|button| button.region(canvas).contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_start_region() {
        assert_eq!(
            hit_test(GamePhase::Start, CANVAS, Vec2::new(400.0, 300.0)),
            Some(CanvasButton::Start)
        );
        // Strict bounds: x = W/2 - 75 is outside
        assert_eq!(hit_test(GamePhase::Start, CANVAS, Vec2::new(325.0, 300.0)), None);
        assert_eq!(hit_test(GamePhase::Start, CANVAS, Vec2::new(400.0, 321.0)), None);
    }

    #[test]
    fn test_restart_region_below_centre() {
        assert_eq!(
            hit_test(GamePhase::GameOver, CANVAS, Vec2::new(400.0, 340.0)),
            Some(CanvasButton::Restart)
        );
        assert_eq!(hit_test(GamePhase::GameOver, CANVAS, Vec2::new(400.0, 300.0)), None);
        assert_eq!(hit_test(GamePhase::GameOver, CANVAS, Vec2::new(400.0, 360.0)), None);
    }

    #[test]
    fn test_no_buttons_while_playing() {
        assert_eq!(hit_test(GamePhase::Playing, CANVAS, Vec2::new(400.0, 300.0)), None);
        assert_eq!(hit_test(GamePhase::Playing, CANVAS, Vec2::new(400.0, 340.0)), None);
    }
}
