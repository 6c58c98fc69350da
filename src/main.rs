mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing_subscriber::EnvFilter;

use galactic_defense::audio::SoundBank;
use galactic_defense::config;
use galactic_defense::input::{Key, PlayerInput};
use galactic_defense::persistence::HighScoreStore;
use galactic_defense::state::{App, Flow};

const FRAME: Duration = Duration::from_micros(1_000_000 / config::FPS as u64);

/// A key counts as held if its last press/repeat arrived within this many
/// frames. Terminals without release events only send OS key-repeat, which
/// arrives at 15 Hz or faster, so 8 frames @ 60 FPS (≈133 ms) never lapses
/// while the key is down.
const HOLD_WINDOW: u64 = 8;

fn is_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| {
        key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    })
}

fn sample_input(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> PlayerInput {
    PlayerInput {
        left: is_held(key_frame, &[KeyCode::Left, KeyCode::Char('a')], frame),
        right: is_held(key_frame, &[KeyCode::Right, KeyCode::Char('d')], frame),
        up: is_held(key_frame, &[KeyCode::Up, KeyCode::Char('w')], frame),
        down: is_held(key_frame, &[KeyCode::Down, KeyCode::Char('s')], frame),
        shoot: is_held(key_frame, &[KeyCode::Char(' ')], frame),
    }
}

/// Screen-navigation meaning of a fresh key press, if any.
fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Quit),
        KeyCode::Char(' ') => Some(Key::Start),
        KeyCode::Char('1') => Some(Key::Easy),
        KeyCode::Char('2') => Some(Key::Normal),
        KeyCode::Char('3') => Some(Key::Hard),
        KeyCode::Enter => Some(Key::Confirm),
        KeyCode::Esc => Some(Key::Back),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Key::Pause),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Key::Menu),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Key::Restart),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Key::Quit),
        _ => None,
    }
}

/// The terminal is the game screen, so logs go to a file. Logging is simply
/// off when that file cannot be created.
fn init_logging() {
    let Ok(file) = File::create(config::log_path()) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

// ── Frame loop ────────────────────────────────────────────────────────────────

/// Input model: `key_frame` records the frame of the last press/repeat for
/// every key. Each frame, keys still within `HOLD_WINDOW` count as held, so
/// Space plus a direction work together. Release events (kitty-protocol
/// terminals) drop a key immediately.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let mut app = App::new(HighScoreStore::new(config::high_score_path()));
    app.selected = config::preferred_difficulty();
    // The bank resolves assets and tracks music state; no output device is
    // attached, so the terminal build runs silent.
    let mut audio = SoundBank::load(config::sounds_dir());
    let mut rng = thread_rng();

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain pending input (non-blocking) ────────────────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    if let Some(key) = map_key(code, modifiers) {
                        if app.handle_key(key, &mut audio) == Flow::Quit {
                            return Ok(());
                        }
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

        let input = sample_input(&key_frame, frame);
        app.frame(&input, &mut rng, &mut audio);
        display::render(out, &app)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_logging();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for release/repeat events; terminals without the protocol ignore it.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread so the frame loop never waits.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = run(&mut out, &rx);

    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        tracing::error!("terminal error: {err}");
    }
    result
}
