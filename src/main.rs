//! Space Shooter entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement, KeyboardEvent, MouseEvent};

    use space_shooter::leaderboard::{FetchTicket, fetch_leaderboard, render_panel};
    use space_shooter::platform::assets::Sprites;
    use space_shooter::renderer::CanvasPainter;
    use space_shooter::ui::CanvasButton;
    use space_shooter::{AssetError, Game, SessionError, Tuning};

    const INVALID_NAME_MESSAGE: &str = "Please enter a valid name (1-5 characters).";

    /// Everything the browser callbacks share
    struct App {
        game: Game,
        painter: CanvasPainter,
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Space Shooter starting...");

        if let Err(err) = start().await {
            log::error!("Startup failed: {err}");
            set_status(&format!("Failed to start: {err}"));
            return;
        }

        log::info!("Space Shooter running!");
    }

    async fn start() -> Result<(), AssetError> {
        let window = web_sys::window().ok_or(AssetError::Dom("window"))?;
        let document = window.document().ok_or(AssetError::Dom("document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into().ok())
            .ok_or(AssetError::Dom("#gameCanvas"))?;

        let tuning = Tuning::load();
        let sprites = Sprites::load_all().await?;
        let painter = CanvasPainter::new(&canvas, sprites)?;

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(painter.size(), tuning.clone(), seed);
        let app = Rc::new(RefCell::new(App { game, painter }));

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        setup_keyboard(&window, app.clone());
        setup_canvas_click(&canvas, app.clone());
        setup_start_button(&document, app.clone());
        setup_spawn_timers(&window, &tuning, app.clone())?;

        request_animation_frame(app);
        Ok(())
    }

    /// Write a message into the page's status element
    fn set_status(message: &str) {
        let status = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("loading"));
        if let Some(el) = status {
            el.set_text_content(Some(message));
            let _ = el.set_attribute("class", "error");
        }
    }

    fn name_input(document: &Document) -> Option<HtmlInputElement> {
        document
            .get_element_by_id("nameInput")
            .and_then(|el| el.dyn_into().ok())
    }

    fn read_name() -> String {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| name_input(&d))
            .map(|input| input.value())
            .unwrap_or_default()
    }

    /// The name field and page start button are only needed once
    fn hide_name_entry() {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        for id in ["nameInput", "startButton"] {
            if let Some(el) = document.get_element_by_id(id) {
                let _ = el.set_attribute("class", "hidden");
            }
        }
    }

    fn report_session_error(err: &SessionError) {
        match err {
            SessionError::InvalidName(reason) => {
                log::info!("Name refused: {reason}");
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(INVALID_NAME_MESSAGE);
                }
            }
            SessionError::WrongPhase { .. } => log::warn!("{err}"),
        }
    }

    fn setup_keyboard(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if app.borrow_mut().game.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().game.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_canvas_click(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = canvas_clone.get_bounding_client_rect();
            let point = Vec2::new(
                (f64::from(event.client_x()) - rect.left()) as f32,
                (f64::from(event.client_y()) - rect.top()) as f32,
            );

            let name = read_name();
            let result = app.borrow_mut().game.click(point, &name);
            match result {
                Ok(Some(CanvasButton::Start)) => hide_name_entry(),
                Ok(Some(CanvasButton::Restart)) => {
                    render_panel(app.borrow().game.leaderboard_panel());
                }
                Ok(None) => {}
                Err(err) => report_session_error(&err),
            }
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_start_button(document: &Document, app: Rc<RefCell<App>>) {
        let Some(btn) = document.get_element_by_id("startButton") else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let name = read_name();
            let result = app.borrow_mut().game.start(&name);
            match result {
                Ok(()) => hide_name_entry(),
                Err(err) => report_session_error(&err),
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Spawn timers run on wall-clock intervals, independent of frame rate
    fn setup_spawn_timers(
        window: &web_sys::Window,
        tuning: &Tuning,
        app: Rc<RefCell<App>>,
    ) -> Result<(), AssetError> {
        let delay = |ms: u32| i32::try_from(ms).map_err(|_| AssetError::Dom("spawn interval"));
        let asteroid_delay = delay(tuning.asteroid_spawn_interval_ms)?;
        let power_up_delay = delay(tuning.power_up_spawn_interval_ms)?;

        let asteroid = {
            let app = app.clone();
            Closure::<dyn FnMut()>::new(move || app.borrow_mut().game.on_asteroid_timer())
        };
        window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                asteroid.as_ref().unchecked_ref(),
                asteroid_delay,
            )
            .map_err(|_| AssetError::Dom("setInterval"))?;
        asteroid.forget();

        let power_up =
            Closure::<dyn FnMut()>::new(move || app.borrow_mut().game.on_power_up_timer());
        window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                power_up.as_ref().unchecked_ref(),
                power_up_delay,
            )
            .map_err(|_| AssetError::Dom("setInterval"))?;
        power_up.forget();

        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let fetch = {
            let mut app_ref = app.borrow_mut();
            let App { game, painter } = &mut *app_ref;
            game.frame(time, painter).leaderboard_fetch
        };

        if let Some(ticket) = fetch {
            spawn_leaderboard_fetch(app.clone(), ticket);
        }

        request_animation_frame(app);
    }

    /// Fetch the scoreboard without blocking the loop; the result lands
    /// only if the ticket is still current
    fn spawn_leaderboard_fetch(app: Rc<RefCell<App>>, ticket: FetchTicket) {
        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_leaderboard().await;
            let mut app = app.borrow_mut();
            if app.game.finish_leaderboard_fetch(ticket, result) {
                render_panel(app.game.leaderboard_panel());
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Space Shooter (native) starting...");
    log::info!("The playable build runs in the browser via `trunk serve`; running a headless session");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(headless::DEFAULT_SEED);
    let summary = headless::run(seed);

    log::info!(
        "Headless session over after {} frames: score {}, lives {}, {} asteroids destroyed, {} power-ups collected",
        summary.frames,
        summary.score,
        summary.lives,
        summary.asteroids_destroyed,
        summary.power_ups_collected,
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {}

/// Deterministic session driven by a scripted pilot on a simulated clock
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use space_shooter::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
    use space_shooter::renderer::RecordingPainter;
    use space_shooter::sim::{GameEvent, GamePhase, IntervalTimer};
    use space_shooter::{Game, LeaderboardError, Tuning};

    pub const DEFAULT_SEED: u64 = 0x5eed;

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Three simulated minutes
    const MAX_FRAMES: u64 = 60 * 180;
    const STRAFE_FRAMES: u64 = 75;
    const FIRE_EVERY: u64 = 10;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Summary {
        pub frames: u64,
        pub score: u32,
        pub lives: u8,
        pub game_over: bool,
        pub asteroids_destroyed: u32,
        pub power_ups_collected: u32,
    }

    pub fn run(seed: u64) -> Summary {
        let mut game = Game::new(
            Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            Tuning::default(),
            seed,
        );
        let mut painter = RecordingPainter::new();

        if let Err(err) = game.start("BOT") {
            log::error!("Could not start headless session: {err}");
        }

        let tuning = game.session.tuning.clone();
        let mut asteroid_timer = IntervalTimer::new(tuning.asteroid_spawn_interval_ms, 0.0);
        let mut power_up_timer = IntervalTimer::new(tuning.power_up_spawn_interval_ms, 0.0);

        let mut heading = "ArrowLeft";
        game.key_down(heading);

        let mut asteroids_destroyed = 0;
        let mut power_ups_collected = 0;
        let mut frames = 0;

        for frame in 1..=MAX_FRAMES {
            frames = frame;
            let now_ms = frame as f64 * FRAME_MS;

            for _ in 0..asteroid_timer.poll(now_ms) {
                game.on_asteroid_timer();
            }
            for _ in 0..power_up_timer.poll(now_ms) {
                game.on_power_up_timer();
            }

            if frame % STRAFE_FRAMES == 0 {
                game.key_up(heading);
                heading = if heading == "ArrowLeft" {
                    "ArrowRight"
                } else {
                    "ArrowLeft"
                };
                game.key_down(heading);
            }
            if frame % FIRE_EVERY == 0 {
                game.key_down(" ");
                game.key_up(" ");
            }

            let report = game.frame(now_ms, &mut painter);
            for event in &report.events {
                match event {
                    GameEvent::AsteroidDestroyed { .. } => asteroids_destroyed += 1,
                    GameEvent::PowerUpCollected { .. } => power_ups_collected += 1,
                    _ => {}
                }
            }

            if let Some(ticket) = report.leaderboard_fetch {
                let offline = LeaderboardError::Request("no network in headless mode".into());
                game.finish_leaderboard_fetch(ticket, Err(offline));
            }

            if game.session.phase == GamePhase::GameOver {
                break;
            }
        }

        Summary {
            frames,
            score: game.session.score,
            lives: game.session.lives,
            game_over: game.session.phase == GamePhase::GameOver,
            asteroids_destroyed,
            power_ups_collected,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_same_seed_same_outcome() {
            assert_eq!(run(7), run(7));
        }

        #[test]
        fn test_summary_is_consistent() {
            let summary = run(DEFAULT_SEED);
            assert!(summary.frames >= 1 && summary.frames <= MAX_FRAMES);
            assert_eq!(summary.score, summary.asteroids_destroyed);
            assert!(summary.lives <= 5);
            assert_eq!(summary.game_over, summary.lives == 0);
        }
    }
}
