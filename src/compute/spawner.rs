/// Timed creation of enemies and items.
///
/// Both schedules are countdown timers re-armed after each spawn.  The item
/// schedule always runs; the enemy schedule is frozen (not reset) while a
/// boss is active, so normal spawning resumes the instant the boss dies.

use std::f32::consts::TAU;

use rand::Rng;

use crate::entities::{
    Enemy, EnemyKind, GameState, Item, Weave, FIELD_HEIGHT, FIELD_WIDTH, ITEM_SIZE, ITEM_SPEED,
    TICK_MS,
};

pub(crate) fn advance(state: &mut GameState, rng: &mut impl Rng) {
    state.item_timer_ms = state.item_timer_ms.saturating_sub(TICK_MS);
    if state.item_timer_ms == 0 {
        state.item_timer_ms = state.tuning.item_interval_ms;
        state.items.push(Item {
            x: FIELD_WIDTH,
            y: rng.gen_range(20.0..FIELD_HEIGHT - ITEM_SIZE - 20.0),
            vx: ITEM_SPEED,
        });
    }

    if state.boss_active() {
        return;
    }
    state.spawn_timer_ms = state.spawn_timer_ms.saturating_sub(TICK_MS);
    if state.spawn_timer_ms == 0 {
        state.spawn_timer_ms = state.spawn_interval_ms;
        let enemy = random_enemy(rng);
        state.enemies.push(enemy);
    }
}

/// Roll a fresh enemy at the right edge with a randomized weave profile.
/// The resting line is kept far enough from both field edges that the full
/// swing stays in bounds.
fn random_enemy(rng: &mut impl Rng) -> Enemy {
    let kind = match rng.gen_range(0..4) {
        0 => EnemyKind::Grunt,
        1 => EnemyKind::Strong,
        2 => EnemyKind::Fast,
        _ => EnemyKind::Shooter,
    };
    let (_, h) = kind.size();
    let amplitude = rng.gen_range(12.0..56.0);
    let margin = amplitude + 10.0;
    let base_y = rng.gen_range(margin..FIELD_HEIGHT - h - margin);

    Enemy {
        x: FIELD_WIDTH,
        y: base_y,
        kind,
        speed: kind.speed(),
        weave: Weave {
            base_y,
            amplitude,
            angle: rng.gen_range(0.0..TAU),
            // per-craft jitter around the kind's base frequency
            step: kind.weave_step() * rng.gen_range(0.75..1.25),
        },
        fire_timer_ms: kind.fire_interval_ms(),
    }
}
