mod assets;
mod audio;
mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tile_runner::compute::{advance_level, new_session, start, tick};
use tile_runner::config::Config;
use tile_runner::entities::{GameState, InputSnapshot, SessionState};
use tile_runner::pacing::FramePacer;

use crate::assets::AssetCatalog;
use crate::audio::Audio;
use crate::display::Viewport;

/// Environment variable naming the log file.
const LOG_ENV: &str = "TILE_RUNNER_LOG";

/// Seconds the "level cleared" banner stays up before the next level loads.
const CLEARED_BANNER_SECS: u32 = 2;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events: the
/// OS key-repeat rate is at least 15 Hz, so 8 frames at 60 FPS (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

/// Build this frame's input snapshot from the held-key map.
fn snapshot(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> InputSnapshot {
    InputSnapshot {
        left: any_held(
            key_frame,
            &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            frame,
        ),
        right: any_held(
            key_frame,
            &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
            frame,
        ),
        jump: any_held(
            key_frame,
            &[KeyCode::Up, KeyCode::Char(' '), KeyCode::Char('w'), KeyCode::Char('W')],
            frame,
        ),
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw mode while playing, so logs go to a file.
fn init_logging() -> anyhow::Result<PathBuf> {
    let path = std::env::var(LOG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir().join("tile_runner.log"));
    let file = File::create(&path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(path)
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

const MENU_ENTRIES: [&str; 2] = ["Start Game", "Exit"];

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    assets: &AssetCatalog,
    view: &Viewport,
) -> std::io::Result<MenuResult> {
    let mut selected = 0usize;

    // Block until the user makes a choice
    loop {
        display::render_menu(out, &MENU_ENTRIES, selected, assets, view)?;

        let Ok(ev) = rx.recv() else {
            return Ok(MenuResult::Quit);
        };
        let Event::Key(KeyEvent { code, kind, .. }) = ev else {
            continue; // resize and friends just repaint
        };
        if kind == KeyEventKind::Release {
            continue;
        }
        match code {
            KeyCode::Up => selected = (selected + MENU_ENTRIES.len() - 1) % MENU_ENTRIES.len(),
            KeyCode::Down => selected = (selected + 1) % MENU_ENTRIES.len(),
            KeyCode::Enter => {
                return Ok(if selected == 0 {
                    MenuResult::Start
                } else {
                    MenuResult::Quit
                });
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                return Ok(MenuResult::Quit);
            }
            _ => {}
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program, `false` → back to menu.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key. Each frame the keys that are still
/// "fresh" become the input snapshot handed to the simulation, so jumping
/// while running works on terminals with and without key-release events.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut ChaCha8Rng,
    env: &Env,
) -> std::io::Result<bool> {
    let config = &env.config;
    let audio = Audio::new(&env.assets, config.audio.bell);
    let mut pacer = FramePacer::new(config.session.fps);
    let banner_frames = u64::from(CLEARED_BANNER_SECS) * u64::from(config.session.fps);

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut cleared_at: Option<u64> = None;

    loop {
        pacer.begin();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(true);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if state.status == SessionState::GameOver =>
                        {
                            return Ok(false);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Simulate ──────────────────────────────────────────────────────────
        match state.status {
            SessionState::Playing => {
                *state = tick(state, &snapshot(&key_frame, frame), config);
                audio.play(out, &state.events)?;
            }
            SessionState::LevelCleared => {
                let since = *cleared_at.get_or_insert(frame);
                if frame - since >= banner_frames {
                    *state = advance_level(state, config, rng);
                    cleared_at = None;
                }
            }
            SessionState::Menu | SessionState::GameOver => {}
        }

        display::render(out, state, &env.assets, &env.view, config)?;
        pacer.yield_frame();
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Long-lived collaborators shared by every session.
struct Env {
    config: Config,
    assets: AssetCatalog,
    view: Viewport,
}

fn main() -> anyhow::Result<()> {
    let log_path = init_logging()?;
    let config = Config::load_or_default();
    tracing::info!(log = %log_path.display(), ?config, "starting");

    let env = Env {
        view: Viewport::from_config(&config),
        assets: AssetCatalog::load(),
        config,
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("cannot enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, &env);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        tracing::error!("{e}");
    }
    Ok(result?)
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, env: &Env) -> std::io::Result<()> {
    let mut rng = match env.config.session.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    loop {
        match show_menu(out, rx, &env.assets, &env.view)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                let mut state = start(&new_session(&env.config, &mut rng));
                let quit = game_loop(out, &mut state, rx, &mut rng, env)?;
                tracing::info!(
                    level = state.level_number,
                    score = state.player.score,
                    "session ended"
                );

                if quit {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    Ok(())
}
