/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG, so a seeded
/// RNG makes whole sessions reproducible.
///
/// One `tick` call is the single authoritative time step: movement first,
/// then spawning, then the boss, then collision resolution.  Nothing in the
/// game owns its own timer — destruction of an entity drops its countdown
/// fields with it, so there is nothing left to cancel.

pub mod boss;
pub mod collision;
pub mod movement;
pub mod power;
pub mod spawner;

use rand::Rng;

use crate::config::{Difficulty, Tuning};
use crate::entities::{
    Direction, FireKind, GameState, GameStatus, Player, FIELD_HEIGHT, FIELD_WIDTH,
    PLAYER_HEIGHT, PLAYER_SPEED, PLAYER_WIDTH, SCROLL_SPEED,
};
use crate::events::GameEvent;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for a selected difficulty.
pub fn init_state(difficulty: Difficulty, tuning: Tuning, high_score: u32) -> GameState {
    let spawn_interval_ms = difficulty.base_spawn_interval_ms();
    GameState {
        player: Player {
            x: 60.0,
            y: (FIELD_HEIGHT - PLAYER_HEIGHT) / 2.0,
            alive: true,
            power: 0,
            barrier: 0,
        },
        enemies: Vec::new(),
        projectiles: Vec::new(),
        items: Vec::new(),
        explosions: Vec::new(),
        boss: None,
        score: 0,
        high_score,
        stage: 1,
        destroyed_this_stage: 0,
        spawn_interval_ms,
        spawn_timer_ms: spawn_interval_ms,
        item_timer_ms: tuning.item_interval_ms,
        boss_countdown_ms: tuning.boss_countdown_ms,
        scroll_offset: 0.0,
        difficulty,
        tuning,
        status: GameStatus::Playing,
        frame: 0,
        events: vec![GameEvent::GameStart],
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Move the player one step in `dir`, clamped to the field.
pub fn move_player(state: &GameState, dir: Direction) -> GameState {
    if state.status != GameStatus::Playing || !state.player.alive {
        return state.clone();
    }
    let (dx, dy) = match dir {
        Direction::Up => (0.0, -PLAYER_SPEED),
        Direction::Down => (0.0, PLAYER_SPEED),
        Direction::Left => (-PLAYER_SPEED, 0.0),
        Direction::Right => (PLAYER_SPEED, 0.0),
    };
    GameState {
        player: Player {
            x: (state.player.x + dx).clamp(0.0, FIELD_WIDTH - PLAYER_WIDTH),
            y: (state.player.y + dy).clamp(0.0, FIELD_HEIGHT - PLAYER_HEIGHT),
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Fire from the player's nose.  The shot set depends on the power level
/// for `FireKind::Normal`; `FireKind::Strong` is always a single beam.
pub fn player_fire(state: &GameState, kind: FireKind) -> GameState {
    if state.status != GameStatus::Playing || !state.player.alive {
        return state.clone();
    }
    let mut projectiles = state.projectiles.clone();
    projectiles.extend(power::shots_for(&state.player, kind));
    GameState {
        projectiles,
        ..state.clone()
    }
}

// ── Per-tick update (nearly pure — RNG is injected) ─────────────────────────

/// Advance the simulation by one fixed 20 ms step.  All randomness comes
/// through `rng` so callers control determinism (tests run seeded).
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    next.events.clear();

    // A finished session is frozen: no movement, no spawning, no timers.
    if next.status != GameStatus::Playing {
        return next;
    }
    next.frame += 1;

    // ── 1. Background scroll & boss countdown (suspended in encounters) ──────
    if !next.boss_active() {
        next.scroll_offset = (next.scroll_offset + SCROLL_SPEED) % FIELD_WIDTH;
        boss::advance_countdown(&mut next);
    }

    // ── 2. Movement: projectiles, enemies (weave + periodic fire), items ─────
    movement::advance(&mut next);

    // ── 3. Timed spawning (enemies suppressed while the boss is up) ──────────
    spawner::advance(&mut next, rng);

    // ── 4. Boss motion, pattern cycling and fire cadence ─────────────────────
    boss::advance(&mut next, rng);

    // ── 5. Collision resolution, scoring, stage transitions ──────────────────
    collision::resolve(&mut next);

    next
}
