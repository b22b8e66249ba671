/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.  Logical field coordinates (800×480) are
/// scaled to whatever terminal the game runs in.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::{
    Boss, BossMotion, BossPattern, ChargePhase, Enemy, EnemyKind, Explosion, GameState,
    GameStatus, Item, Projectile, ProjectileKind, BOSS_HEIGHT, FIELD_HEIGHT, FIELD_WIDTH,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_STAR: Color = Color::DarkGrey;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_STAGE: Color = Color::Cyan;
const C_HUD_POWER: Color = Color::Green;
const C_HUD_BARRIER: Color = Color::Blue;
const C_HUD_COUNTDOWN: Color = Color::Magenta;
const C_PLAYER: Color = Color::White;
const C_BARRIER_RING: Color = Color::Blue;
const C_GRUNT: Color = Color::Red;
const C_STRONG: Color = Color::Green;
const C_FAST: Color = Color::Yellow;
const C_SHOOTER: Color = Color::Magenta;
const C_SHOT: Color = Color::Cyan;
const C_BEAM: Color = Color::Yellow;
const C_HOMING: Color = Color::Green;
const C_ENEMY_BULLET: Color = Color::Red;
const C_ITEM: Color = Color::Yellow;
const C_EXPLOSION: Color = Color::DarkYellow;
const C_BOSS: Color = Color::Red;
const C_BOSS_TELEGRAPH: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

// ── Coordinate scaling ───────────────────────────────────────────────────────

/// Maps logical field coordinates onto the terminal cell grid, leaving one
/// border row/column on each side and two HUD rows at the top.
struct Viewport {
    width: u16,
    height: u16,
}

const PLAY_TOP: u16 = 2;

impl Viewport {
    fn new() -> Self {
        let (width, height) = terminal::size().unwrap_or((80, 24));
        Viewport { width, height }
    }

    fn cell(&self, x: f32, y: f32) -> (u16, u16) {
        let cols = self.width.saturating_sub(2) as f32;
        let rows = self.height.saturating_sub(PLAY_TOP + 2) as f32;
        let cx = 1.0 + (x.clamp(0.0, FIELD_WIDTH) / FIELD_WIDTH) * (cols - 1.0).max(1.0);
        let cy = PLAY_TOP as f32 + (y.clamp(0.0, FIELD_HEIGHT) / FIELD_HEIGHT) * (rows - 1.0).max(1.0);
        (cx as u16, cy as u16)
    }

    fn play_bottom(&self) -> u16 {
        self.height.saturating_sub(2)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let vp = Viewport::new();

    draw_starfield(out, state, &vp)?;
    draw_border(out, &vp)?;
    draw_hud(out, state, &vp)?;

    for item in &state.items {
        draw_item(out, item, &vp)?;
    }
    for enemy in &state.enemies {
        draw_enemy(out, enemy, &vp)?;
    }
    if let Some(boss) = &state.boss {
        draw_boss(out, boss, &vp)?;
    }
    for projectile in &state.projectiles {
        draw_projectile(out, projectile, &vp)?;
    }
    for explosion in &state.explosions {
        draw_explosion(out, explosion, &vp)?;
    }

    draw_player(out, state, &vp)?;
    draw_controls_hint(out, &vp)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state, &vp)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, vp.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Background ────────────────────────────────────────────────────────────────

/// Sparse starfield driven by the scroll offset; freezes with it during
/// encounters.
fn draw_starfield<W: Write>(out: &mut W, state: &GameState, vp: &Viewport) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_STAR))?;
    for i in 0..14u32 {
        // Deterministic pseudo-positions so stars don't shimmer frame to frame.
        let seed = (i * 97 + 13) as f32;
        let x = (seed * 53.0 - state.scroll_offset * (1.0 + (i % 3) as f32 * 0.5))
            .rem_euclid(FIELD_WIDTH);
        let y = (seed * 31.0).rem_euclid(FIELD_HEIGHT);
        let (cx, cy) = vp.cell(x, y);
        out.queue(cursor::MoveTo(cx, cy))?;
        out.queue(Print(if i % 3 == 0 { "✦" } else { "·" }))?;
    }
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    let w = vp.width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, PLAY_TOP - 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, vp.play_bottom()))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in PLAY_TOP..vp.play_bottom() {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(vp.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, vp: &Viewport) -> std::io::Result<()> {
    // Score + best — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    let best = state.high_score.max(state.score);
    out.queue(Print(format!("Score: {:>7}  Best: {:>7}", state.score, best)))?;

    // Stage + difficulty — centre
    let stage_str = format!("[ STAGE {} · {:?} ]", state.stage, state.difficulty);
    let sx = (vp.width / 2).saturating_sub(stage_str.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_STAGE))?;
    out.queue(Print(&stage_str))?;

    // Power / barrier / boss countdown — right
    let barrier: String = "●".repeat(state.player.barrier as usize);
    let status = if let Some(boss) = &state.boss {
        format!("P{} {} BOSS {:>4}", state.player.power, barrier, boss.hp.max(0))
    } else {
        format!(
            "P{} {} Boss in {:>3}s",
            state.player.power,
            barrier,
            state.boss_countdown_ms / 1000
        )
    };
    let rx = vp.width.saturating_sub(status.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(if state.player.barrier > 0 {
        C_HUD_BARRIER
    } else if state.boss_active() {
        C_HUD_COUNTDOWN
    } else {
        C_HUD_POWER
    }))?;
    out.queue(Print(&status))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, state: &GameState, vp: &Viewport) -> std::io::Result<()> {
    let p = &state.player;
    if !p.alive {
        return Ok(());
    }
    let (cx, cy) = vp.cell(p.x, p.y + 12.0);

    if p.barrier > 0 {
        out.queue(style::SetForegroundColor(C_BARRIER_RING))?;
        out.queue(cursor::MoveTo(cx.saturating_sub(1), cy))?;
        out.queue(Print("(>=>)"))?;
        return Ok(());
    }

    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(cursor::MoveTo(cx, cy))?;
    out.queue(Print(">=>"))?;
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, enemy: &Enemy, vp: &Viewport) -> std::io::Result<()> {
    let (cx, cy) = vp.cell(enemy.x, enemy.y + enemy.kind.size().1 / 2.0);
    let (color, sprite) = match enemy.kind {
        EnemyKind::Grunt => (C_GRUNT, "<o<"),
        EnemyKind::Strong => (C_STRONG, "{O<"),
        EnemyKind::Fast => (C_FAST, "«─<"),
        EnemyKind::Shooter => (C_SHOOTER, "<∩<"),
    };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(cx, cy))?;
    out.queue(Print(sprite))?;
    Ok(())
}

fn draw_projectile<W: Write>(
    out: &mut W,
    projectile: &Projectile,
    vp: &Viewport,
) -> std::io::Result<()> {
    let (cx, cy) = vp.cell(projectile.x, projectile.y);
    let (color, glyph) = match projectile.kind {
        ProjectileKind::Normal => (C_SHOT, "─"),
        ProjectileKind::Beam => (C_BEAM, "━━"),
        ProjectileKind::Homing => (C_HOMING, "➤"),
        ProjectileKind::EnemyBullet => (C_ENEMY_BULLET, "•"),
    };
    out.queue(cursor::MoveTo(cx, cy))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_item<W: Write>(out: &mut W, item: &Item, vp: &Viewport) -> std::io::Result<()> {
    let (cx, cy) = vp.cell(item.x, item.y);
    out.queue(cursor::MoveTo(cx, cy))?;
    out.queue(style::SetForegroundColor(C_ITEM))?;
    out.queue(Print("★"))?;
    Ok(())
}

fn draw_explosion<W: Write>(
    out: &mut W,
    explosion: &Explosion,
    vp: &Viewport,
) -> std::io::Result<()> {
    let (cx, cy) = vp.cell(explosion.x, explosion.y);
    out.queue(cursor::MoveTo(cx.saturating_sub(1), cy))?;
    out.queue(style::SetForegroundColor(C_EXPLOSION))?;
    // Two visual phases over the 300 ms lifetime.
    out.queue(Print(if explosion.remaining_ms > 150 { "✷✷" } else { "✧" }))?;
    Ok(())
}

// ── Boss ──────────────────────────────────────────────────────────────────────

fn draw_boss<W: Write>(out: &mut W, boss: &Boss, vp: &Viewport) -> std::io::Result<()> {
    let telegraphing = boss.is_telegraphing()
        || matches!(
            boss.motion,
            BossMotion::Pattern(BossPattern::Charge {
                phase: ChargePhase::Telegraph { .. }
            })
        );
    let color = if telegraphing { C_BOSS_TELEGRAPH } else { C_BOSS };
    out.queue(style::SetForegroundColor(color))?;

    // 3-row sprite spanning the boss box.
    let rows = [r"╔◣██◢╗", r"◀██████", r"╚◢██◣╝"];
    for (i, row) in rows.iter().enumerate() {
        let frac = (i as f32 + 0.5) / rows.len() as f32;
        let (cx, cy) = vp.cell(boss.x, boss.y + BOSS_HEIGHT * frac);
        out.queue(cursor::MoveTo(cx, cy))?;
        out.queue(Print(row))?;
    }

    // HP bar on the second HUD row during the encounter.
    let bar_width = (vp.width as usize / 2).max(10);
    let filled = ((boss.hp.max(0) as f32 / boss.max_hp as f32) * bar_width as f32) as usize;
    let bar: String = format!(
        "BOSS [{}{}]",
        "█".repeat(filled),
        "░".repeat(bar_width.saturating_sub(filled))
    );
    let bx = (vp.width as usize).saturating_sub(bar.chars().count()) as u16 / 2;
    out.queue(cursor::MoveTo(bx, 1))?;
    out.queue(style::SetForegroundColor(C_BOSS))?;
    out.queue(Print(&bar))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, vp.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("↑ ↓ ← → / WASD : Move   SPACE : Shoot   Z : Beam   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &GameState, vp: &Viewport) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", state.score);
    let best_line = if state.score > state.high_score {
        "★ NEW BEST SCORE ★".to_string()
    } else {
        format!("Best: {}", state.high_score)
    };
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&score_line, Color::Yellow),
        (&best_line, Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = vp.width / 2;
    let start_row = (vp.height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
