//! Loop driver shell
//!
//! `Game` owns the session and everything the host callbacks touch. The
//! browser wires DOM events and timers to these methods; the headless runner
//! and tests call them directly. Hosts guarantee callbacks never overlap.

use glam::Vec2;

use crate::error::{LeaderboardError, SessionError};
use crate::leaderboard::{FetchTicket, Leaderboard, LeaderboardPanel, LeaderboardState};
use crate::platform::{KeyAction, key_action};
use crate::renderer::{Painter, draw_frame};
use crate::sim::{GameEvent, GameSession, TickInput, spawn_asteroid, spawn_power_up, tick};
use crate::tuning::Tuning;
use crate::ui::{CanvasButton, hit_test};

/// What one frame produced
#[derive(Debug, Default)]
pub struct FrameReport {
    pub events: Vec<GameEvent>,
    /// Set when the game just ended: the host should fetch the leaderboard
    /// and hand the result back with this ticket
    pub leaderboard_fetch: Option<FetchTicket>,
}

/// Game instance holding all state
pub struct Game {
    pub session: GameSession,
    leaderboard: LeaderboardState,
    frames: u64,
}

impl Game {
    pub fn new(canvas: Vec2, tuning: Tuning, seed: u64) -> Self {
        log::info!("Game initialized with seed: {seed}");
        Self {
            session: GameSession::new(canvas, tuning, seed),
            leaderboard: LeaderboardState::default(),
            frames: 0,
        }
    }

    /// Frames driven so far (all phases)
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// One display refresh: advance the simulation, then repaint
    pub fn frame(&mut self, now_ms: f64, painter: &mut impl Painter) -> FrameReport {
        self.frames += 1;
        let events = tick(&mut self.session, &TickInput { now_ms });

        let leaderboard_fetch = events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. }))
            .then(|| self.begin_leaderboard_fetch());

        draw_frame(painter, &self.session);
        FrameReport {
            events,
            leaderboard_fetch,
        }
    }

    /// Key pressed; returns true if the key is bound
    pub fn key_down(&mut self, key: &str) -> bool {
        match key_action(key) {
            Some(KeyAction::Move(dir)) => {
                let speed = self.session.tuning.craft_speed;
                dir.press(&mut self.session.craft.vel, speed);
                true
            }
            Some(KeyAction::Fire) => {
                self.session.fire();
                true
            }
            None => false,
        }
    }

    /// Key released; returns true if the key is bound
    pub fn key_up(&mut self, key: &str) -> bool {
        match key_action(key) {
            Some(KeyAction::Move(dir)) => {
                let legacy = self.session.tuning.legacy_key_release;
                dir.release(&mut self.session.craft.vel, legacy);
                true
            }
            Some(KeyAction::Fire) => true,
            None => false,
        }
    }

    /// Canvas click at a canvas-relative point. `name_input` is the current
    /// content of the name field, read only when the start button is hit.
    pub fn click(
        &mut self,
        point: Vec2,
        name_input: &str,
    ) -> Result<Option<CanvasButton>, SessionError> {
        let Some(button) = hit_test(self.session.phase, self.session.canvas, point) else {
            return Ok(None);
        };
        match button {
            CanvasButton::Start => self.start(name_input)?,
            CanvasButton::Restart => self.restart()?,
        }
        Ok(Some(button))
    }

    /// Start from the title screen (canvas button or page button)
    pub fn start(&mut self, name_input: &str) -> Result<(), SessionError> {
        self.session.start(name_input)?;
        self.leaderboard.hide();
        Ok(())
    }

    /// Play again from the game-over screen
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.session.restart()?;
        self.leaderboard.hide();
        Ok(())
    }

    /// Asteroid interval timer fired
    pub fn on_asteroid_timer(&mut self) {
        spawn_asteroid(&mut self.session);
    }

    /// Power-up interval timer fired
    pub fn on_power_up_timer(&mut self) {
        spawn_power_up(&mut self.session);
    }

    /// Show the leaderboard as loading; the ticket identifies this request
    pub fn begin_leaderboard_fetch(&mut self) -> FetchTicket {
        self.leaderboard.begin_fetch()
    }

    /// Hand back a leaderboard fetch result; returns whether it was applied
    pub fn finish_leaderboard_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Leaderboard, LeaderboardError>,
    ) -> bool {
        self.leaderboard.finish_fetch(ticket, result)
    }

    pub fn leaderboard_panel(&self) -> &LeaderboardPanel {
        self.leaderboard.panel()
    }
}
