/// All game entity types — pure data, no logic.

use crate::config::{Difficulty, Tuning};
use crate::events::GameEvent;
use crate::geometry::Rect;

// ── Field & timing constants ─────────────────────────────────────────────────

/// Logical play-field size in pixels; the display layer scales to the terminal.
pub const FIELD_WIDTH: f32 = 800.0;
pub const FIELD_HEIGHT: f32 = 480.0;

/// One simulation step.  Every timer in the game counts down in multiples
/// of this.
pub const TICK_MS: u32 = 20;

/// Background scroll per tick, frozen during boss encounters.
pub const SCROLL_SPEED: f32 = 2.0;

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: f32 = 48.0;
pub const PLAYER_HEIGHT: f32 = 24.0;
/// Pixels moved per tick while a direction is held.
pub const PLAYER_SPEED: f32 = 6.0;

pub const POWER_MAX: u8 = 5;
pub const BARRIER_CHARGES: u8 = 3;

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub alive: bool,
    /// 0–5; never decreases within a session.
    pub power: u8,
    /// 0–3; the barrier is active iff this is > 0.
    pub barrier: u8,
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FireKind {
    Normal,
    Strong,
}

// ── Projectiles ──────────────────────────────────────────────────────────────

pub const SHOT_SPEED: f32 = 10.0;
pub const BEAM_SPEED: f32 = 12.0;
pub const HOMING_SPEED: f32 = 10.0;
/// Vertical correction applied per tick while a homing shot tracks a target.
pub const HOMING_STEER: f32 = 3.0;
pub const ENEMY_BULLET_SPEED: f32 = -7.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProjectileKind {
    /// Consumed on first hit.
    Normal,
    /// Pierces: destroys everything it overlaps without being consumed.
    Beam,
    /// Steers toward the nearest live enemy; consumed on first hit.
    Homing,
    /// Fired by shooter/strong enemies and the boss; travels leftward.
    EnemyBullet,
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    /// Signed horizontal velocity in px/tick; negative moves left.
    pub vx: f32,
    pub kind: ProjectileKind,
}

impl Projectile {
    pub fn size(&self) -> (f32, f32) {
        match self.kind {
            ProjectileKind::Normal | ProjectileKind::Homing => (14.0, 4.0),
            ProjectileKind::Beam => (36.0, 6.0),
            ProjectileKind::EnemyBullet => (10.0, 6.0),
        }
    }

    pub fn rect(&self) -> Rect {
        let (w, h) = self.size();
        Rect::new(self.x, self.y, w, h)
    }
}

// ── Enemies ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EnemyKind {
    Grunt,
    Strong,
    Fast,
    Shooter,
}

impl EnemyKind {
    pub fn size(&self) -> (f32, f32) {
        match self {
            EnemyKind::Grunt | EnemyKind::Fast => (40.0, 24.0),
            EnemyKind::Strong | EnemyKind::Shooter => (48.0, 28.0),
        }
    }

    /// Leftward travel speed in px/tick.
    pub fn speed(&self) -> f32 {
        match self {
            EnemyKind::Grunt => 3.0,
            EnemyKind::Strong => 2.4,
            EnemyKind::Fast => 5.0,
            EnemyKind::Shooter => 2.6,
        }
    }

    /// Angular step added to the weave phase each tick.
    pub fn weave_step(&self) -> f32 {
        match self {
            EnemyKind::Fast => 0.25,
            _ => 0.10,
        }
    }

    /// Milliseconds between shots, for the kinds that fire.
    pub fn fire_interval_ms(&self) -> Option<u32> {
        match self {
            EnemyKind::Strong => Some(1500),
            EnemyKind::Shooter => Some(1000),
            EnemyKind::Grunt | EnemyKind::Fast => None,
        }
    }

    pub fn score(&self) -> u32 {
        match self {
            EnemyKind::Grunt => 100,
            EnemyKind::Fast => 150,
            EnemyKind::Strong | EnemyKind::Shooter => 200,
        }
    }
}

/// Sinusoidal vertical oscillation overlaid on constant horizontal motion.
#[derive(Clone, Debug)]
pub struct Weave {
    pub base_y: f32,
    pub amplitude: f32,
    pub angle: f32,
    pub step: f32,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub kind: EnemyKind,
    pub speed: f32,
    pub weave: Weave,
    /// Countdown to the next shot; `None` for kinds that never fire.
    pub fire_timer_ms: Option<u32>,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        let (w, h) = self.kind.size();
        Rect::new(self.x, self.y, w, h)
    }
}

// ── Items ────────────────────────────────────────────────────────────────────

pub const ITEM_SIZE: f32 = 22.0;
pub const ITEM_SPEED: f32 = -2.2;
pub const ITEM_SPAWN_INTERVAL_MS: u32 = 15_000;

#[derive(Clone, Debug)]
pub struct Item {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
}

impl Item {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, ITEM_SIZE, ITEM_SIZE)
    }
}

// ── Explosions ───────────────────────────────────────────────────────────────

/// Cosmetic lifetime of a destruction marker.
pub const EXPLOSION_MS: u32 = 300;

#[derive(Clone, Debug)]
pub struct Explosion {
    pub x: f32,
    pub y: f32,
    pub remaining_ms: u32,
}

// ── Boss ─────────────────────────────────────────────────────────────────────

pub const BOSS_WIDTH: f32 = 120.0;
pub const BOSS_HEIGHT: f32 = 80.0;
pub const BOSS_HOME_X: f32 = 620.0;
pub const BOSS_APPROACH_SPEED: f32 = 2.5;
pub const BOSS_FIRE_INTERVAL_MS: u32 = 1500;
pub const BOSS_TELEGRAPH_MS: u32 = 500;
/// Extra hit-points granted per stage already cleared.
pub const BOSS_HP_PER_STAGE: i32 = 50;
pub const BOSS_SCORE: u32 = 1000;
pub const BOSS_COUNTDOWN_MS: u32 = 60_000;

/// Pause between one movement pattern finishing and the next starting.
pub const PATTERN_PAUSE_MS: u32 = 500;
pub const PATTERN_DURATION_MS: u32 = 3000;
pub const VERTICAL_BOUNCE_SPEED: f32 = 4.0;
pub const ZIGZAG_DX: f32 = 3.0;
pub const ZIGZAG_DY: f32 = 4.0;
/// Horizontal band the zigzag pattern bounces in, relative to home.
pub const ZIGZAG_BAND_LEFT: f32 = 140.0;
pub const ZIGZAG_BAND_RIGHT: f32 = 60.0;
pub const CHARGE_ACCEL: f32 = 0.45;
pub const CHARGE_TRACK: f32 = 3.0;
/// The charge dash reverses once the boss reaches this x.
pub const CHARGE_TURN_X: f32 = 120.0;
pub const CHARGE_RETURN_SPEED: f32 = 3.5;

#[derive(Clone, Debug, PartialEq)]
pub enum ChargePhase {
    /// Visual warning before the dash; the boss holds still.
    Telegraph { remaining_ms: u32 },
    Dash { vx: f32 },
    Return,
}

#[derive(Clone, Debug, PartialEq)]
pub enum BossPattern {
    /// Bounces up/down within field bounds for the pattern duration.
    Vertical { dir: f32, remaining_ms: u32 },
    /// Telegraph, dash at the player, then return home.
    Charge { phase: ChargePhase },
    /// Diagonal bouncing near home, then snap back.
    Zigzag { dx: f32, dy: f32, remaining_ms: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub enum BossMotion {
    /// Sliding in from the right edge toward home.
    Approaching,
    /// Between patterns.
    Resting { remaining_ms: u32 },
    Pattern(BossPattern),
}

#[derive(Clone, Debug)]
pub struct Boss {
    pub x: f32,
    pub y: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub home_x: f32,
    pub home_y: f32,
    pub motion: BossMotion,
    /// Countdown to the next shot; runs only while engaged.
    pub fire_timer_ms: u32,
}

impl Boss {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, BOSS_WIDTH, BOSS_HEIGHT)
    }

    /// True during the warning window before the boss fires.
    pub fn is_telegraphing(&self) -> bool {
        !matches!(self.motion, BossMotion::Approaching)
            && self.fire_timer_ms <= BOSS_TELEGRAPH_MS
    }
}

// ── Session status ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Master game state ────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub items: Vec<Item>,
    /// Short-lived destruction markers, rendered only.
    pub explosions: Vec<Explosion>,
    /// At most one boss exists at a time.
    pub boss: Option<Boss>,
    pub score: u32,
    /// The highest score seen so far (updated live during play).
    pub high_score: u32,
    /// Starts at 1; advances on kill threshold or boss defeat.
    pub stage: u32,
    /// Kills since the last stage transition.
    pub destroyed_this_stage: u32,
    /// Current enemy spawn cadence; shrinks 300 ms per stage, floor 500 ms.
    pub spawn_interval_ms: u32,
    /// Countdown to the next enemy spawn; frozen while a boss is active.
    pub spawn_timer_ms: u32,
    pub item_timer_ms: u32,
    /// Countdown to the next boss encounter.
    pub boss_countdown_ms: u32,
    /// Background scroll position; frozen during encounters.
    pub scroll_offset: f32,
    pub difficulty: Difficulty,
    /// Session knobs fixed at start (config file or defaults).
    pub tuning: Tuning,
    pub status: GameStatus,
    pub frame: u64,
    /// Cues for the rendering/audio side, rebuilt every tick and drained by
    /// the frontend.
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn boss_active(&self) -> bool {
        self.boss.is_some()
    }
}
