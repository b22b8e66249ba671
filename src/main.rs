use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use skyraid::compute::{init_state, move_player, player_fire, tick};
use skyraid::config::{Config, Difficulty};
use skyraid::display;
use skyraid::entities::{Direction, FireKind, GameState, GameStatus, TICK_MS};
use skyraid::events::GameEvent;

const FRAME: Duration = Duration::from_millis(TICK_MS as u64); // 50 Hz, one sim tick per frame

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// Min frames between shots while the fire key repeats.
/// 10 frames @ 50 FPS = 5 shots/sec.
const FIRE_COOLDOWN: u32 = 10;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 7 frames (140 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 7;

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

// ── High-score persistence ────────────────────────────────────────────────────

fn high_score_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".skyraid_score")
}

fn load_high_score() -> u32 {
    std::fs::read_to_string(high_score_path())
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn save_high_score(score: u32) {
    let _ = std::fs::write(high_score_path(), score.to_string());
}

// ── Audio collaborator (terminal bell) ────────────────────────────────────────

/// The closest thing a terminal has to a sound card.  One bell per
/// noteworthy cue; quieter events stay silent.
fn audio_cues<W: Write>(out: &mut W, events: &[GameEvent]) -> std::io::Result<()> {
    let audible = events.iter().any(|e| {
        matches!(
            e,
            GameEvent::GameStart
                | GameEvent::BossWarning
                | GameEvent::BossDefeated
                | GameEvent::PlayerDied
        )
    });
    if audible {
        out.queue(Print("\x07"))?;
    }
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(Difficulty),
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    default_difficulty: Difficulty,
    high_score: u32,
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  S K Y R A I D  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(7),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    // High score display
    if high_score > 0 {
        let hs_str = format!("Best Score: {}", high_score);
        out.queue(cursor::MoveTo(
            cx.saturating_sub(hs_str.chars().count() as u16 / 2),
            cy.saturating_sub(6),
        ))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(&hs_str))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy.saturating_sub(4)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select difficulty:"))?;

    let options: &[(&str, &str, Color, &str)] = &[
        ("1", "Easy  ", Color::Green,  "Sparse waves, soft boss"),
        ("2", "Normal", Color::Yellow, "Balanced challenge"),
        ("3", "Hard  ", Color::Red,    "Dense waves, iron boss!"),
    ];

    for (i, (key, label, color, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(2) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(12), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<8}", label)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" — {}", desc)))?;
    }

    let default_str = format!("[ENTER] use skyraid.toml default ({:?})", default_difficulty);
    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy + 2))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print(&default_str))?;

    // Power-up ladder legend
    let legend: &[&str] = &[
        "★ items raise power: 1 twin · 2 beam · 3 homing · 4 triple",
        "  at power 5 a barrier absorbs three hits",
        "  survive 60s to face the boss — defeat it to advance the stage",
    ];
    for (i, line) in legend.iter().enumerate() {
        out.queue(cursor::MoveTo(cx.saturating_sub(12), cy + 4 + i as u16))?;
        out.queue(style::SetForegroundColor(if i == 0 {
            Color::Yellow
        } else {
            Color::DarkGrey
        }))?;
        out.queue(Print(*line))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy + 8))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("↑ ↓ ← → / WASD : Move   SPACE : Shoot   Z : Beam   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Char('1') => return Ok(MenuResult::Start(Difficulty::Easy)),
                KeyCode::Char('2') => return Ok(MenuResult::Start(Difficulty::Normal)),
                KeyCode::Char('3') => return Ok(MenuResult::Start(Difficulty::Hard)),
                KeyCode::Enter => return Ok(MenuResult::Start(default_difficulty)),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key; each frame, all keys still "fresh"
/// (within `HOLD_WINDOW` frames) apply their effects simultaneously, so
/// fire + two directions can be held at once with no interference.
/// Movement is continuous while held; fire is edge-triggered per press,
/// throttled by `FIRE_COOLDOWN`.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let mut rng = thread_rng();

    // The start cue is queued by init_state; surface it before the first
    // tick clears the event buffer.
    audio_cues(out, &std::mem::take(&mut state.events))?;

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut fire_cooldown: u32 = 0;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut pressed_fire: Option<FireKind> = None;
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                // Press: record key + handle one-shot actions
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(true);
                        }
                        KeyCode::Char('c')
                            if modifiers.contains(KeyModifiers::CONTROL) =>
                        {
                            return Ok(true);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if state.status == GameStatus::GameOver =>
                        {
                            return Ok(false);
                        }
                        KeyCode::Char(' ') => pressed_fire = Some(FireKind::Normal),
                        KeyCode::Char('z') | KeyCode::Char('Z') => {
                            pressed_fire = Some(FireKind::Strong)
                        }
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Apply held-key movement every frame ───────────────────────────────
        if state.status == GameStatus::Playing {
            let up = any_held(
                &key_frame,
                &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
                frame,
            );
            let down = any_held(
                &key_frame,
                &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')],
                frame,
            );
            let left = any_held(
                &key_frame,
                &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
                frame,
            );
            let right = any_held(
                &key_frame,
                &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
                frame,
            );

            if up {
                *state = move_player(state, Direction::Up);
            }
            if down {
                *state = move_player(state, Direction::Down);
            }
            if left {
                *state = move_player(state, Direction::Left);
            }
            if right {
                *state = move_player(state, Direction::Right);
            }

            // Fire — throttled so key repeat can't flood the field
            if fire_cooldown == 0 {
                if let Some(kind) = pressed_fire {
                    *state = player_fire(state, kind);
                    fire_cooldown = FIRE_COOLDOWN;
                }
            }
        }

        fire_cooldown = fire_cooldown.saturating_sub(1);

        if state.status == GameStatus::Playing {
            *state = tick(state, &mut rng);
        }

        // Drain the cue buffer so a frozen post-game-over state doesn't
        // replay its last events every frame.
        audio_cues(out, &std::mem::take(&mut state.events))?;
        display::render(out, state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx);

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
) -> std::io::Result<()> {
    let config = Config::load(&PathBuf::from("skyraid.toml"));
    let mut high_score = load_high_score();

    loop {
        match show_menu(out, rx, config.difficulty(), high_score)? {
            MenuResult::Quit => break,
            MenuResult::Start(difficulty) => {
                let mut state = init_state(difficulty, config.tuning(), high_score);
                let quit = game_loop(out, &mut state, rx)?;

                // Persist new high score if beaten
                if state.score > high_score {
                    high_score = state.score;
                    save_high_score(high_score);
                }

                if quit {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    Ok(())
}
