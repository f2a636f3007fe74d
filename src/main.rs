mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_invaders::collaborators::{AudioCue, InputSnapshot, LogAudio, NullAudio};
use space_invaders::config::{Cli, Tuning};
use space_invaders::score::ScoreStore;
use space_invaders::session::{Flow, GameSession};

use display::TerminalRenderer;

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// OS key repeat refreshes the entry well before it expires.
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

/// Drain pending key events into `key_frame` and build this tick's snapshot.
/// Pause, restart and quit fire only on the press itself.
fn poll_input(
    rx: &mpsc::Receiver<Event>,
    key_frame: &mut HashMap<KeyCode, u64>,
    frame: u64,
) -> InputSnapshot {
    let mut input = InputSnapshot::default();

    while let Ok(ev) = rx.try_recv() {
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
            continue;
        };
        match kind {
            KeyEventKind::Press => {
                key_frame.insert(code, frame);
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => input.quit = true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        input.quit = true
                    }
                    KeyCode::Char('p') | KeyCode::Char('P') => input.pause = true,
                    KeyCode::Char('r') | KeyCode::Char('R') => input.restart = true,
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

    input.move_left = any_held(
        key_frame,
        &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
        frame,
    );
    input.move_right = any_held(
        key_frame,
        &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
        frame,
    );
    input.shoot = any_held(key_frame, &[KeyCode::Char(' ')], frame);
    input.dash = any_held(key_frame, &[KeyCode::Char('x'), KeyCode::Char('X')], frame);
    input
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    high_scores: &[u32],
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  SPACE  INVADERS  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(8),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    let prompt = "ENTER : Start    Q : Quit";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(prompt.chars().count() as u16 / 2),
        cy.saturating_sub(5),
    ))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(prompt))?;

    if !high_scores.is_empty() {
        out.queue(cursor::MoveTo(cx.saturating_sub(6), cy.saturating_sub(2)))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print("HIGH SCORES"))?;
        for (i, score) in high_scores.iter().enumerate() {
            out.queue(cursor::MoveTo(cx.saturating_sub(6), cy + i as u16))?;
            out.queue(style::SetForegroundColor(Color::DarkGrey))?;
            out.queue(Print(format!("{}. {:>7}", i + 1, score)))?;
        }
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(21), cy + 7))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("Catch power-ups: ★ weapon  ◊ shield  ♥ life  » speed"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) = rx.recv() {
            match code {
                KeyCode::Enter => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Fixed-rate loop: poll input, tick, render, then sleep off the rest of
/// the frame budget.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut GameSession,
    rx: &mpsc::Receiver<Event>,
    fps: u32,
) -> std::io::Result<()> {
    let frame_budget = Duration::from_secs(1) / fps.max(1);
    let tuning = session.tuning();
    let (width, height) = terminal::size()?;
    let mut renderer =
        TerminalRenderer::new(width, height, tuning.screen_width, tuning.screen_height);

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let input = poll_input(rx, &mut key_frame, frame);
        if session.tick(&input) == Flow::Quit {
            return Ok(());
        }

        let (width, height) = terminal::size()?;
        renderer.resize(width, height);
        renderer.present(out, session)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(cli: &Cli) -> Result<()> {
    let file = File::create(&cli.log_file)
        .with_context(|| format!("creating log file {}", cli.log_file.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let audio: Box<dyn AudioCue> = if cli.mute {
        Box::new(NullAudio)
    } else {
        Box::new(LogAudio)
    };
    let scores = ScoreStore::open(cli.scores_file.clone());
    info!(
        "[Main] Starting with {} saved scores, {} fps",
        scores.scores().len(),
        cli.fps
    );

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enabling raw mode")?;
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

    let result = run(&mut out, &rx, &cli, rng, audio, scores);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("terminal I/O failed")
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    cli: &Cli,
    rng: StdRng,
    audio: Box<dyn AudioCue>,
    scores: ScoreStore,
) -> std::io::Result<()> {
    match show_menu(out, rx, scores.scores())? {
        MenuResult::Quit => Ok(()),
        MenuResult::Start => {
            let mut session = GameSession::new(Tuning::default(), rng, audio, scores);
            game_loop(out, &mut session, rx, cli.fps)
        }
    }
}
