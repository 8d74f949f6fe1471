//! Blockfall terminal runner (default binary).
//!
//! Reads `BLOCKFALL_*` settings, sets up file logging and the high score
//! store, then runs a fixed 16ms frame loop: poll crossterm events until the
//! next frame, queue decoded commands, advance the session, render.

use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, warn};

use blockfall::config::AppConfig;
use blockfall::core::{GameSnapshot, GameState};
use blockfall::engine::Session;
use blockfall::input::{handle_mouse_event, should_quit, InputHandler};
use blockfall::logging::init_log;
use blockfall::store::JsonFileStore;
use blockfall::term::{FrameBuffer, GameView, HudInfo, TerminalBell, TerminalRenderer, Viewport};
use blockfall::types::TICK_MS;

type GameSession = Session<TerminalBell, JsonFileStore>;

fn main() -> Result<()> {
    let cfg = AppConfig::from_env();
    if let Some(path) = &cfg.log_path {
        init_log(cfg.log_level, path)?;
    }

    let game_cfg = cfg.game_config();
    let view = GameView::default();
    let needed = view.min_viewport(game_cfg.board_width, game_cfg.board_height);
    let (w, h) = crossterm::terminal::size()?;
    if !Viewport::new(w, h).contains(needed) {
        bail!(
            "terminal is {}x{}, the game needs at least {}x{}",
            w,
            h,
            needed.width,
            needed.height
        );
    }

    let store = match &cfg.highscore_path {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::default_location().unwrap_or_else(|err| {
            warn!("{:#}; keeping the high score in the working directory", err);
            JsonFileStore::new(blockfall::store::FILE_NAME)
        }),
    };
    info!("high score file: {}", store.path().display());

    let seed = cfg.seed.unwrap_or_else(rand::random);
    info!("seed {}", seed);

    let mut session = Session::new(
        GameState::with_config(game_cfg, seed),
        TerminalBell::new(),
        store,
    );
    session.set_sound_enabled(cfg.sound);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &view, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!(
        "exit: score {}, high score {}",
        session.game().score(),
        session.high_score()
    );
    result
}

fn run(term: &mut TerminalRenderer, view: &GameView, session: &mut GameSession) -> Result<()> {
    let mut input = InputHandler::new();
    let mut snap = GameSnapshot::default();
    let mut regions = Vec::new();

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut viewport = Viewport::new(w, h);
    let mut fb = FrameBuffer::new(w, h);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        session.snapshot_into(&mut snap);
        let hud = HudInfo {
            high_score: session.high_score(),
            sound_enabled: session.sound_enabled(),
        };
        view.render_into(&snap, hud, viewport, &mut fb);
        term.draw_swap(&mut fb)?;
        view.control_regions_into(&snap, viewport, &mut regions);

        // Input with timeout until next frame.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = input.handle_key(key) {
                        session.push(action);
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = handle_mouse_event(mouse, &regions) {
                        session.push(action);
                    }
                }
                Event::Resize(w, h) => {
                    viewport = Viewport::new(w, h);
                    term.invalidate();
                }
                _ => {}
            }
        }

        // Frame.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);

            for action in input.update(elapsed_ms) {
                session.push(action);
            }
            session.advance(elapsed_ms);
        }
    }
}
