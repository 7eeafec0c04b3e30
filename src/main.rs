mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
    ExecutableCommand,
};
use rand::thread_rng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use portfolio_arcade::board::Board;
use portfolio_arcade::config::GameConfig;
use portfolio_arcade::entities::HeldKeys;
use portfolio_arcade::error::ArcadeError;
use portfolio_arcade::portfolio::{load_projects, parse_projects, Project};
use portfolio_arcade::session::{Page, Session};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS, one physics step per frame

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 5 frames (≈80 ms) is
/// refreshed before expiry while the key is down.
const HOLD_WINDOW: u64 = 5;

const DEFAULT_DATA: &str = "data.json";
const DEMO_DATA: &str = include_str!("../demos/data.json");

const CONFIG_ENV: &str = "PORTFOLIO_ARCADE_CONFIG";
const LOG_ENV: &str = "PORTFOLIO_ARCADE_LOG";

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| {
        key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    })
}

fn held_keys(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> HeldKeys {
    HeldKeys {
        left: is_held(key_frame, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame),
        right: is_held(key_frame, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame),
        forward: is_held(key_frame, &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], frame),
        brake: is_held(key_frame, &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], frame),
    }
}

fn is_quit(code: &KeyCode, modifiers: KeyModifiers) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (*code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Log to the file named by `PORTFOLIO_ARCADE_LOG`; the terminal itself is
/// in raw mode and can't take log lines.
fn init_logging() -> Result<(), ArcadeError> {
    let Ok(path) = std::env::var(LOG_ENV) else {
        return Ok(());
    };
    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn load_config() -> Result<GameConfig, ArcadeError> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            info!(path = %path, "loading game config");
            GameConfig::load(path)
        }
        Err(_) => Ok(GameConfig::default()),
    }
}

/// Projects from the path given on the command line (or `data.json`), else
/// the bundled demo portfolio.
fn load_portfolio() -> Result<Vec<Project>, ArcadeError> {
    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_DATA.to_string());
    match load_projects(&path) {
        Ok(projects) => {
            info!(path = %path, count = projects.len(), "loaded portfolio data");
            Ok(projects)
        }
        Err(e) => {
            warn!(path = %path, error = %e, "could not load portfolio data, using bundled demo");
            parse_projects(DEMO_DATA)
        }
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Play,
    Quit,
}

/// The portfolio page at rest.  Effects from the last game keep animating.
fn menu_loop<W: Write>(
    out: &mut W,
    board: &mut Board,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
    clock: Instant,
) -> Result<MenuResult, ArcadeError> {
    let mut rng = thread_rng();
    loop {
        let frame_start = Instant::now();

        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) => {
                    if is_quit(&code, modifiers) || code == KeyCode::Esc {
                        return Ok(MenuResult::Quit);
                    }
                    if matches!(code, KeyCode::Char('g') | KeyCode::Char('G')) {
                        board.post_message("game started - use arrow keys to move, space to shoot");
                        return Ok(MenuResult::Play);
                    }
                }
                Event::Resize(cols, rows) => resize(board, session, cols, rows),
                _ => {}
            }
        }

        let now = clock.elapsed();
        session.frame(now, &HeldKeys::default(), board, &mut rng);

        let (cols, rows) = terminal::size()?;
        display::render(out, board, session, now, cols, rows)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

fn resize(board: &mut Board, session: &mut Session, cols: u16, rows: u16) {
    let viewport = display::viewport_for(cols, rows);
    board.resize(viewport);
    session.set_viewport(viewport);
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key.  Each frame the keys still "fresh"
/// (within `HOLD_WINDOW` frames) become the held directions, so steering,
/// thrust and shooting combine freely.  Terminals with keyboard enhancement
/// send real `Release` events and keys drop out immediately.
///
/// Shooting is one bullet per press or repeat event, like a browser keydown.
fn game_loop<W: Write>(
    out: &mut W,
    board: &mut Board,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
    clock: Instant,
) -> Result<bool, ArcadeError> {
    let mut rng = thread_rng();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    session.start(clock.elapsed(), board);

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let now = clock.elapsed();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        key_frame.insert(code.clone(), frame);
                        if is_quit(&code, modifiers) {
                            session.cancel(now, board);
                            return Ok(true);
                        }
                        match code {
                            KeyCode::Char(' ') => session.fire(),
                            KeyCode::Esc => {
                                session.cancel(now, board);
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Resize(cols, rows) => resize(board, session, cols, rows),
                _ => {}
            }
        }

        session.pump(now, board);
        session.frame(now, &held_keys(&key_frame, frame), board, &mut rng);

        let (cols, rows) = terminal::size()?;
        display::render(out, board, session, now, cols, rows)?;

        // Back to the page once the session is over; particles keep flying
        // there.
        if !session.is_active() {
            board.clear_scoreboard();
            return Ok(false);
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), ArcadeError> {
    dotenvy::dotenv().ok();
    init_logging()?;

    let config = load_config()?;
    let projects = load_portfolio()?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the frame loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, config, projects);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: GameConfig,
    projects: Vec<Project>,
) -> Result<(), ArcadeError> {
    let (cols, rows) = terminal::size()?;
    let viewport = display::viewport_for(cols, rows);
    let mut board = Board::new(projects, viewport);
    let mut session = Session::new(config, viewport);
    let clock = Instant::now();

    loop {
        match menu_loop(out, &mut board, &mut session, rx, clock)? {
            MenuResult::Quit => break,
            MenuResult::Play => {
                if game_loop(out, &mut board, &mut session, rx, clock)? {
                    break;
                }
            }
        }
    }
    Ok(())
}
