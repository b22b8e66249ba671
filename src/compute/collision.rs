/// Collision & damage resolution — runs after all movement in a tick.
///
/// Pass order: player shots vs enemies, player shots vs boss, hostiles vs
/// player, player vs items, then the stage-threshold check.  Every pass
/// evaluates the full current entity set, so one beam can score several
/// kills in the same pass — that is the intended pierce behavior.

use crate::config::SPAWN_INTERVAL_STEP_MS;
use crate::entities::{
    Explosion, GameState, GameStatus, ProjectileKind, BOSS_SCORE, EXPLOSION_MS,
    PLAYER_HEIGHT, PLAYER_WIDTH,
};
use crate::events::GameEvent;

use super::power;

/// Boss damage per hit by projectile kind.
fn boss_damage(kind: ProjectileKind) -> i32 {
    match kind {
        ProjectileKind::Beam => 20,
        _ => 10,
    }
}

pub(crate) fn resolve(state: &mut GameState) {
    player_shots_vs_enemies(state);
    player_shots_vs_boss(state);
    hostiles_vs_player(state);
    player_vs_items(state);
    check_stage_threshold(state);
}

// ── Player shots vs enemies ──────────────────────────────────────────────────

fn player_shots_vs_enemies(state: &mut GameState) {
    let mut killed = vec![false; state.enemies.len()];
    let mut consumed = vec![false; state.projectiles.len()];
    let mut score_gain: u32 = 0;
    let mut kills: u32 = 0;

    for (pi, p) in state.projectiles.iter().enumerate() {
        if p.kind == ProjectileKind::EnemyBullet {
            continue;
        }
        let pr = p.rect();
        for (ei, e) in state.enemies.iter().enumerate() {
            if killed[ei] || !pr.intersects(&e.rect()) {
                continue;
            }
            killed[ei] = true;
            score_gain += e.kind.score();
            kills += 1;
            let er = e.rect();
            state.explosions.push(Explosion {
                x: er.x + er.w / 2.0,
                y: er.y + er.h / 2.0,
                remaining_ms: EXPLOSION_MS,
            });
            // Beams pierce; everything else is spent on the first hit.
            if p.kind != ProjectileKind::Beam {
                consumed[pi] = true;
                break;
            }
        }
    }

    state.score += score_gain;
    state.destroyed_this_stage += kills;
    retain_by_flag(&mut state.enemies, &killed);
    retain_by_flag(&mut state.projectiles, &consumed);
}

// ── Player shots vs boss ─────────────────────────────────────────────────────

fn player_shots_vs_boss(state: &mut GameState) {
    let Some(mut boss) = state.boss.take() else {
        return;
    };

    let boss_rect = boss.rect();
    let mut consumed = vec![false; state.projectiles.len()];
    for (pi, p) in state.projectiles.iter().enumerate() {
        if p.kind == ProjectileKind::EnemyBullet || !p.rect().intersects(&boss_rect) {
            continue;
        }
        boss.hp -= boss_damage(p.kind);
        // One shot, one hit: the boss absorbs beams rather than letting
        // them pierce through.
        consumed[pi] = true;
        state.explosions.push(Explosion {
            x: p.x + p.rect().w,
            y: p.y,
            remaining_ms: EXPLOSION_MS,
        });
    }
    retain_by_flag(&mut state.projectiles, &consumed);

    if boss.hp <= 0 {
        state.explosions.push(Explosion {
            x: boss.x + boss_rect.w / 2.0,
            y: boss.y + boss_rect.h / 2.0,
            remaining_ms: EXPLOSION_MS,
        });
        state.score += BOSS_SCORE;
        state.boss_countdown_ms = state.tuning.boss_countdown_ms;
        state.events.push(GameEvent::BossDefeated);
        advance_stage(state);
        // Dropping the boss here also drops its fire/pattern timers, and
        // the spawner resumes on the next tick.
    } else {
        state.boss = Some(boss);
    }
}

// ── Hostiles vs player ───────────────────────────────────────────────────────

/// One lethal contact.  A charged barrier absorbs it; otherwise the player
/// dies exactly once no matter how many contacts land this tick.
fn hit_player(state: &mut GameState) {
    if !state.player.alive {
        return;
    }
    if state.player.barrier > 0 {
        state.player.barrier -= 1;
        return;
    }
    state.player.alive = false;
    state.status = GameStatus::GameOver;
    state.events.push(GameEvent::PlayerDied);
    state.explosions.push(Explosion {
        x: state.player.x + PLAYER_WIDTH / 2.0,
        y: state.player.y + PLAYER_HEIGHT / 2.0,
        remaining_ms: EXPLOSION_MS,
    });
}

fn hostiles_vs_player(state: &mut GameState) {
    if !state.player.alive {
        return;
    }
    let player_rect = state.player.rect();

    // Enemy bullets: consumed whether absorbed or lethal.
    let mut consumed = vec![false; state.projectiles.len()];
    for (pi, p) in state.projectiles.iter().enumerate() {
        if p.kind == ProjectileKind::EnemyBullet && p.rect().intersects(&player_rect) {
            consumed[pi] = true;
        }
    }
    for (pi, hit) in consumed.iter().enumerate() {
        if *hit {
            let r = state.projectiles[pi].rect();
            state.explosions.push(Explosion {
                x: r.x,
                y: r.y + r.h / 2.0,
                remaining_ms: EXPLOSION_MS,
            });
            hit_player(state);
        }
    }
    retain_by_flag(&mut state.projectiles, &consumed);

    // Enemy craft: destroyed on contact in both the absorbed and lethal case.
    let mut destroyed = vec![false; state.enemies.len()];
    for (ei, e) in state.enemies.iter().enumerate() {
        if e.rect().intersects(&player_rect) {
            destroyed[ei] = true;
        }
    }
    for (ei, hit) in destroyed.iter().enumerate() {
        if *hit {
            let r = state.enemies[ei].rect();
            state.explosions.push(Explosion {
                x: r.x + r.w / 2.0,
                y: r.y + r.h / 2.0,
                remaining_ms: EXPLOSION_MS,
            });
            hit_player(state);
        }
    }
    retain_by_flag(&mut state.enemies, &destroyed);

    // Boss contact: the boss persists, so this can drain one charge per tick
    // of sustained overlap.
    if let Some(boss) = &state.boss {
        if boss.rect().intersects(&player_rect) {
            hit_player(state);
        }
    }
}

// ── Items ────────────────────────────────────────────────────────────────────

fn player_vs_items(state: &mut GameState) {
    if !state.player.alive {
        return;
    }
    let player_rect = state.player.rect();
    let mut picked = vec![false; state.items.len()];
    for (ii, item) in state.items.iter().enumerate() {
        if item.rect().intersects(&player_rect) {
            picked[ii] = true;
        }
    }
    for hit in &picked {
        if *hit {
            state.events.push(GameEvent::ItemCollected);
            if power::apply_item_pickup(&mut state.player) {
                state.events.push(GameEvent::BarrierActivated);
            }
        }
    }
    retain_by_flag(&mut state.items, &picked);
}

// ── Stage progression ────────────────────────────────────────────────────────

/// Kill-count threshold: outside encounters, `stage × 10` kills advance the
/// stage.
fn check_stage_threshold(state: &mut GameState) {
    if state.boss_active() {
        return;
    }
    if state.destroyed_this_stage >= state.stage * 10 {
        advance_stage(state);
    }
}

/// Shared by the kill threshold and boss defeat: bump the stage, reset the
/// per-stage kill counter, and tighten the spawn cadence down to the floor.
fn advance_stage(state: &mut GameState) {
    state.stage += 1;
    state.destroyed_this_stage = 0;
    state.spawn_interval_ms = state
        .spawn_interval_ms
        .saturating_sub(SPAWN_INTERVAL_STEP_MS)
        .max(state.tuning.spawn_floor_ms);
    state.events.push(GameEvent::StageAdvanced { stage: state.stage });
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Drop every element whose flag is set, preserving order.
fn retain_by_flag<T>(items: &mut Vec<T>, flags: &[bool]) {
    let mut idx = 0;
    items.retain(|_| {
        let keep = !flags[idx];
        idx += 1;
        keep
    });
}
