//! Timon entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlInputElement, MouseEvent};

    use timon::audio::{AudioManager, SoundEffect};
    use timon::platform::{LocalStorage, SystemClock};
    use timon::sim::{
        Color, Controller, GameEvent, GamePhase, MAX_FRAME_MS, MatchResult, Notice, NoticeKind,
    };
    use timon::GameConfig;

    /// Game instance holding all state
    struct Game {
        controller: Controller<LocalStorage, SystemClock>,
        audio: AudioManager,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let config = GameConfig::load(LocalStorage);
            Self {
                controller: Controller::new(config, LocalStorage, SystemClock, seed),
                audio: AudioManager::new(),
                last_time: 0.0,
            }
        }

        /// React to everything the controller emitted
        fn apply_events(&mut self) {
            let document = document();
            let flash_ms = self.controller.config().flash_duration_ms;

            for event in self.controller.drain_events() {
                match event {
                    GameEvent::LevelChanged { level } => {
                        set_text(&document, ".level", &format!("Level: {level}"));
                    }
                    GameEvent::HighScore { high_score } => {
                        set_text(&document, "#high-score", &format!("🏆 Best: Level {high_score}"));
                    }
                    GameEvent::Flash { color, .. } | GameEvent::PadPressed { color } => {
                        flash_pad(&document, color, flash_ms);
                        self.audio.play(SoundEffect::Pad(color), flash_ms);
                    }
                    GameEvent::AwaitingInput => {}
                    GameEvent::Notice(notice) => show_toast(&document, &notice),
                    GameEvent::GameOver { .. } => self.audio.play(SoundEffect::GameOver, 0),
                    GameEvent::GameWon { .. } => self.audio.play(SoundEffect::Victory, 0),
                }
            }

            // Pads only look pressable while input is open
            let live = self.controller.phase() == GamePhase::AwaitingInput;
            if let Some(board) = query(&document, ".pads") {
                let _ = board.class_list().toggle_with_force("live", live);
            }
        }

        fn press(&mut self, color: Color) {
            let result = self.controller.press(color);
            if result == Some(MatchResult::Mismatch) && !self.controller.strict_mode() {
                self.audio.play(SoundEffect::WrongMove, 0);
            }
            self.apply_events();
        }

        fn refresh_stats(&self) {
            let summary = self.controller.analytics().summary();
            let document = document();
            set_text(&document, "#games-played", &summary.games_played.to_string());
            set_text(&document, "#win-rate", &format!("{:.1}%", summary.win_rate));
            set_text(&document, "#highest-level", &summary.highest_level.to_string());
            set_text(&document, "#avg-level", &format!("{:.1}", summary.average_level));
            set_text(&document, "#avg-time", &format!("{:.0}s", summary.average_game_time));
        }
    }

    fn document() -> Document {
        web_sys::window()
            .and_then(|w| w.document())
            .expect("no document")
    }

    fn query(document: &Document, selector: &str) -> Option<Element> {
        document.query_selector(selector).ok().flatten()
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = query(document, selector) {
            el.set_text_content(Some(text));
        }
    }

    fn confirm(question: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(question).ok())
            .unwrap_or(false)
    }

    fn after(ms: u64, f: impl FnOnce() + 'static) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once_into_js(f);
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.unchecked_ref(),
            ms as i32,
        );
    }

    /// Light a pad for `ms`
    fn flash_pad(document: &Document, color: Color, ms: u64) {
        let Some(pad) = query(document, &format!(".pad.{color}")) else {
            return;
        };
        let _ = pad.class_list().add_1("active");
        after(ms, move || {
            let _ = pad.class_list().remove_1("active");
        });
    }

    fn show_toast(document: &Document, notice: &Notice) {
        let Some(container) = query(document, ".toast-container") else {
            log::info!("{}", notice.message);
            return;
        };
        let Ok(toast) = document.create_element("div") else {
            return;
        };
        let icon = match notice.kind {
            NoticeKind::Success => "✓",
            NoticeKind::Error => "✕",
            NoticeKind::Info => "ℹ",
            NoticeKind::Warning => "⚠",
        };
        toast.set_class_name(&format!("toast toast-{}", notice.kind.as_str()));
        let icon_el = document.create_element("span").ok();
        let message_el = document.create_element("span").ok();
        if let (Some(icon_el), Some(message_el)) = (icon_el, message_el) {
            icon_el.set_class_name("toast-icon");
            icon_el.set_text_content(Some(icon));
            message_el.set_class_name("toast-message");
            message_el.set_text_content(Some(&notice.message));
            let _ = toast.append_child(&icon_el);
            let _ = toast.append_child(&message_el);
        }
        let _ = container.append_child(&toast);

        // Trigger animation, then fade out and remove
        let shown = toast.clone();
        after(10, move || {
            let _ = shown.class_list().add_1("toast-show");
        });
        after(u64::from(notice.duration_ms), move || {
            let _ = toast.class_list().remove_1("toast-show");
            after(300, move || toast.remove());
        });
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Timon starting...");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        {
            let mut g = game.borrow_mut();
            let high_score = g.controller.high_score();
            set_text(&document(), "#high-score", &format!("🏆 Best: Level {high_score}"));
            g.controller.check_saved_game();
            g.apply_events();
        }

        setup_start_button(game.clone());
        setup_pads(game.clone());
        setup_strict_toggle(game.clone());
        setup_stats_panel(game.clone());

        request_animation_frame(game);

        log::info!("Timon running!");
    }

    fn on_click(selector: &str, mut handler: impl FnMut() + 'static) {
        let Some(el) = query(&document(), selector) else {
            log::warn!("Missing element {selector}");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        on_click("#start-button", move || {
            let mut g = game.borrow_mut();
            g.controller.start(&mut confirm);
            g.apply_events();
            set_text(&document(), "#start-button", "Restart");
        });
    }

    fn setup_pads(game: Rc<RefCell<Game>>) {
        for color in Color::ALL {
            let game = game.clone();
            on_click(&format!(".pad.{color}"), move || {
                game.borrow_mut().press(color);
            });
        }
    }

    fn setup_strict_toggle(game: Rc<RefCell<Game>>) {
        let Some(el) = query(&document(), "#strict-mode") else {
            return;
        };
        let Ok(input) = el.dyn_into::<HtmlInputElement>() else {
            return;
        };
        let target = input.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let strict = target.checked();
            game.borrow_mut().controller.set_strict_mode(strict);
            log::info!("Strict mode: {strict}");
        });
        let _ = input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_stats_panel(game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click("#stats-button", move || {
                game.borrow().refresh_stats();
                if let Some(panel) = query(&document(), ".stats-modal") {
                    let _ = panel.class_list().remove_1("hidden");
                }
            });
        }
        on_click(".modal-close", || {
            if let Some(panel) = query(&document(), ".stats-modal") {
                let _ = panel.class_list().add_1("hidden");
            }
        });
        on_click(".reset-stats-btn", move || {
            let mut g = game.borrow_mut();
            if g.controller.reset_stats(&mut confirm) {
                g.refresh_stats();
            }
        });
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt_ms = if g.last_time > 0.0 {
                (time - g.last_time).clamp(0.0, MAX_FRAME_MS as f64) as u64
            } else {
                0
            };
            g.last_time = time;

            g.controller.tick(dt_ms);
            g.apply_events();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Timon (native) starting...");
    log::info!("Native mode has no UI - run with `trunk serve` for the web version");

    autoplay_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Plays a few perfect rounds, then fumbles in strict mode
#[cfg(not(target_arch = "wasm32"))]
fn autoplay_demo() {
    use timon::persistence::MemoryStore;
    use timon::platform::SystemClock;
    use timon::sim::{Color, Controller, GameEvent, MAX_FRAME_MS};
    use timon::ui::LogNotifier;
    use timon::GameConfig;

    const ROUNDS: u32 = 5;

    let store = MemoryStore::new();
    let mut game = Controller::new(GameConfig::default(), store, SystemClock, 2024);
    let mut notifier = LogNotifier;

    let mut report = |game: &mut Controller<MemoryStore, SystemClock>| {
        for event in game.drain_events() {
            match event {
                GameEvent::Notice(notice) => notice.deliver(&mut notifier),
                GameEvent::Flash { index, color } => log::debug!("flash #{index}: {color}"),
                _ => {}
            }
        }
    };

    let settle = |game: &mut Controller<MemoryStore, SystemClock>| {
        while game.is_busy() {
            game.tick(MAX_FRAME_MS);
        }
    };

    game.start(&mut |_: &str| false);
    while game.level() < ROUNDS {
        settle(&mut game);
        report(&mut game);
        println!("Level {}: {:?}", game.level(), game.sequence());
        for color in game.sequence().to_vec() {
            game.press(color);
        }
        settle(&mut game);
        report(&mut game);
    }

    settle(&mut game);
    game.set_strict_mode(true);
    let expected = game.sequence()[0];
    let wrong = Color::ALL
        .into_iter()
        .find(|c| *c != expected)
        .unwrap_or(Color::Green);
    game.press(wrong);
    report(&mut game);
    log::info!("Demo finished in {:?}", game.phase());

    println!("\n{}", game.analytics().summary());
}
