//! Leaderboard shown on the game-over screen
//!
//! Read-only: fetched from `scores.json` and displayed as-is. The source is
//! trusted to be sorted already; only the first `LEADERBOARD_ROWS` entries
//! are kept.

use serde::{Deserialize, Serialize};

use crate::consts::LEADERBOARD_ROWS;
use crate::error::LeaderboardError;

/// Where the game-over screen fetches scores from
pub const LEADERBOARD_URL: &str = "scores.json";

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
}

/// Top entries in source order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Keep the first rows of an already-ordered list
    pub fn from_entries(mut entries: Vec<LeaderboardEntry>) -> Self {
        entries.truncate(LEADERBOARD_ROWS);
        Self { entries }
    }

    /// Parse the JSON array served by the leaderboard endpoint
    pub fn from_json(json: &str) -> Result<Self, LeaderboardError> {
        let entries: Vec<LeaderboardEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display lines, e.g. `1. ACE: 42`
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{}. {}: {}", i + 1, e.name, e.score))
    }
}

/// Ticket identifying one fetch request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// State of the leaderboard panel
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LeaderboardPanel {
    /// Nothing to show (not at game over yet)
    #[default]
    Hidden,
    /// Fetch in flight
    Loading(FetchTicket),
    /// Fetched and shown
    Ready(Leaderboard),
    /// Fetch failed; the panel stays empty
    Unavailable,
}

/// Tracks fetch requests so each result is applied at most once, and only
/// to the game over that asked for it
#[derive(Debug, Default)]
pub struct LeaderboardState {
    panel: LeaderboardPanel,
    next_ticket: u64,
}

impl LeaderboardState {
    pub fn panel(&self) -> &LeaderboardPanel {
        &self.panel
    }

    /// Start a new request, superseding any in flight
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.next_ticket += 1;
        let ticket = FetchTicket(self.next_ticket);
        self.panel = LeaderboardPanel::Loading(ticket);
        ticket
    }

    /// Apply a fetch result; returns false if it was stale or already applied
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Leaderboard, LeaderboardError>,
    ) -> bool {
        if self.panel != LeaderboardPanel::Loading(ticket) {
            log::debug!("Dropping stale leaderboard result");
            return false;
        }
        self.panel = match result {
            Ok(board) => {
                log::info!("Loaded {} leaderboard entries", board.entries.len());
                LeaderboardPanel::Ready(board)
            }
            Err(err) => {
                log::warn!("Leaderboard unavailable: {err}");
                LeaderboardPanel::Unavailable
            }
        };
        true
    }

    /// Hide the panel (a new round started); in-flight results become stale
    pub fn hide(&mut self) {
        self.panel = LeaderboardPanel::Hidden;
    }
}

/// Fetch and parse the leaderboard (WASM only)
#[cfg(target_arch = "wasm32")]
pub async fn fetch_leaderboard() -> Result<Leaderboard, LeaderboardError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let js_err = |e: wasm_bindgen::JsValue| LeaderboardError::Request(format!("{e:?}"));

    let window = web_sys::window().ok_or_else(|| LeaderboardError::Request("no window".into()))?;
    let response = JsFuture::from(window.fetch_with_str(LEADERBOARD_URL))
        .await
        .map_err(js_err)?;
    let response: web_sys::Response = response.dyn_into().map_err(js_err)?;
    if !response.ok() {
        return Err(LeaderboardError::Status(response.status()));
    }
    let text = JsFuture::from(response.text().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    let text = text
        .as_string()
        .ok_or_else(|| LeaderboardError::Parse("body is not text".into()))?;
    Leaderboard::from_json(&text)
}

/// Render the panel into the page's `#scoreboard` element (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn render_panel(panel: &LeaderboardPanel) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(container) = document.get_element_by_id("scoreboard") else {
        return;
    };

    container.set_inner_html("");
    let LeaderboardPanel::Ready(board) = panel else {
        return;
    };

    if let Ok(heading) = document.create_element("h2") {
        heading.set_text_content(Some("Scoreboard"));
        let _ = container.append_child(&heading);
    }
    for line in board.lines() {
        if let Ok(row) = document.create_element("p") {
            row.set_text_content(Some(&line));
            let _ = container.append_child(&row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            name: name.to_string(),
            score,
        }
    }

    #[test]
    fn test_parse_keeps_source_order_and_top_ten() {
        let json = serde_json::to_string(
            &(0..15)
                .map(|i| entry(&format!("P{i}"), i))
                .collect::<Vec<_>>(),
        )
        .unwrap();
        let board = Leaderboard::from_json(&json).unwrap();
        assert_eq!(board.entries.len(), 10);
        // Not re-sorted: ascending input stays ascending
        assert_eq!(board.entries[0], entry("P0", 0));
        assert_eq!(board.entries[9], entry("P9", 9));
    }

    #[test]
    fn test_lines_format() {
        let board = Leaderboard::from_entries(vec![entry("ACE", 42), entry("BOB", 7)]);
        let lines: Vec<_> = board.lines().collect();
        assert_eq!(lines, vec!["1. ACE: 42", "2. BOB: 7"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Leaderboard::from_json(r#"{"name": "x"}"#),
            Err(LeaderboardError::Parse(_))
        ));
        assert!(matches!(
            Leaderboard::from_json(r#"[{"name": "x", "score": -1}]"#),
            Err(LeaderboardError::Parse(_))
        ));
        assert!(Leaderboard::from_json("[]").unwrap().is_empty());
    }

    #[test]
    fn test_result_applied_once() {
        let mut state = LeaderboardState::default();
        let ticket = state.begin_fetch();
        let board = Leaderboard::from_entries(vec![entry("ACE", 1)]);

        assert!(state.finish_fetch(ticket, Ok(board.clone())));
        assert_eq!(state.panel(), &LeaderboardPanel::Ready(board.clone()));
        assert!(!state.finish_fetch(ticket, Ok(Leaderboard::default())));
        assert_eq!(state.panel(), &LeaderboardPanel::Ready(board));
    }

    #[test]
    fn test_stale_result_ignored() {
        let mut state = LeaderboardState::default();
        let first = state.begin_fetch();
        state.hide();
        assert!(!state.finish_fetch(first, Ok(Leaderboard::default())));
        assert_eq!(state.panel(), &LeaderboardPanel::Hidden);

        let second = state.begin_fetch();
        assert!(!state.finish_fetch(first, Ok(Leaderboard::default())));
        assert!(state.finish_fetch(second, Err(LeaderboardError::Status(404))));
        assert_eq!(state.panel(), &LeaderboardPanel::Unavailable);
    }
}
