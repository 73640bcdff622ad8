//! Terminal block-puzzle runner (default binary).
//!
//! Polls crossterm for keys, feeds intents to the session once per tick and
//! draws through the framebuffer renderer. Settings come from the environment
//! (see [`tui_blocks::RunConfig`]).

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

use tui_blocks::core::{GameSnapshot, Session};
use tui_blocks::input::{is_decline, is_restart, key_to_intent, should_quit, SoftDropLatch};
use tui_blocks::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_blocks::types::{GameConfig, Intent, TICK_MS};
use tui_blocks::{EventLog, RunConfig};

fn main() -> Result<()> {
    let settings = RunConfig::from_env();
    let config = settings.game_config().inspect_err(report)?;
    let session = Session::new(config.clone(), settings.seed_for(0))
        .context("starting session")
        .inspect_err(report)?;
    let log = open_log(&settings);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &settings, config, session, log);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn report(err: &anyhow::Error) {
    eprintln!("[tui-blocks] {err:#}");
}

fn open_log(settings: &RunConfig) -> EventLog {
    let Some(path) = &settings.log_path else {
        return EventLog::disabled();
    };
    match EventLog::open(path) {
        Ok(log) => log,
        Err(e) => {
            eprintln!("[tui-blocks] event log {} disabled: {e}", path.display());
            EventLog::disabled()
        }
    }
}

fn run(
    term: &mut TerminalRenderer,
    settings: &RunConfig,
    config: GameConfig,
    mut session: Session,
    mut log: EventLog,
) -> Result<()> {
    let view = GameView::from_config(&config);
    let mut fb = FrameBuffer::new(0, 0);
    let mut snapshot = GameSnapshot::default();
    let mut latch = SoftDropLatch::new();
    let mut intents: Vec<Intent> = Vec::with_capacity(8);

    let mut session_index = 0u32;
    log.session_start(session_index, session.seed(), &config, session.events());

    let tick_duration = Duration::from_millis(u64::from(TICK_MS));
    let mut last_tick = Instant::now();

    loop {
        // Render.
        session.snapshot_into(&mut snapshot);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if session.is_terminal() {
                        if is_decline(key) {
                            return Ok(());
                        }
                        if is_restart(key) {
                            session_index += 1;
                            let seed = settings.seed_for(session_index);
                            session = Session::new(config.clone(), seed)?;
                            log.session_start(session_index, seed, &config, session.events());
                            latch = SoftDropLatch::new();
                            intents.clear();
                            last_tick = Instant::now();
                        }
                    } else if let Some(intent) = key_to_intent(key).and_then(|i| latch.observe(i)) {
                        intents.push(intent);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);

            if let Some(release) = latch.update(elapsed_ms) {
                intents.push(release);
            }
            if session.is_terminal() {
                intents.clear();
            } else {
                session.tick(elapsed_ms, intents.drain(..));
                log.record(session_index, session.ticks(), session.events());
            }
        }
    }
}
