/// Boss encounter state machine.
///
/// Lifecycle: the countdown runs between encounters; at zero a boss enters
/// from the right edge, slides to its home position, then alternates
/// randomly-chosen movement patterns with short rests while firing
/// telegraphed shots.  Defeat (handled in `collision`) removes the boss and
/// with it every timer it owned.

use rand::Rng;

use crate::entities::{
    Boss, BossMotion, BossPattern, ChargePhase, GameState, Projectile, ProjectileKind,
    BOSS_APPROACH_SPEED, BOSS_FIRE_INTERVAL_MS, BOSS_HEIGHT, BOSS_HOME_X, BOSS_HP_PER_STAGE,
    BOSS_TELEGRAPH_MS, BOSS_WIDTH, CHARGE_ACCEL, CHARGE_RETURN_SPEED, CHARGE_TRACK, CHARGE_TURN_X,
    ENEMY_BULLET_SPEED, FIELD_HEIGHT, FIELD_WIDTH, PATTERN_DURATION_MS, PATTERN_PAUSE_MS,
    PLAYER_HEIGHT, TICK_MS, VERTICAL_BOUNCE_SPEED, ZIGZAG_BAND_LEFT, ZIGZAG_BAND_RIGHT, ZIGZAG_DX,
    ZIGZAG_DY,
};
use crate::events::GameEvent;

// ── Countdown ────────────────────────────────────────────────────────────────

/// Run the between-encounter countdown; at zero, instantiate the boss.
/// Callers only invoke this while no boss exists.
pub(crate) fn advance_countdown(state: &mut GameState) {
    state.boss_countdown_ms = state.boss_countdown_ms.saturating_sub(TICK_MS);
    if state.boss_countdown_ms == 0 {
        spawn_boss(state);
    }
}

fn spawn_boss(state: &mut GameState) {
    let hp = state.difficulty.base_boss_hp() + BOSS_HP_PER_STAGE * (state.stage as i32 - 1);
    let home_y = (FIELD_HEIGHT - BOSS_HEIGHT) / 2.0;
    state.boss = Some(Boss {
        x: FIELD_WIDTH + BOSS_WIDTH,
        y: home_y,
        hp,
        max_hp: hp,
        home_x: BOSS_HOME_X,
        home_y,
        motion: BossMotion::Approaching,
        fire_timer_ms: BOSS_FIRE_INTERVAL_MS,
    });
    state.events.push(GameEvent::BossWarning);
}

// ── Per-tick update ──────────────────────────────────────────────────────────

pub(crate) fn advance(state: &mut GameState, rng: &mut impl Rng) {
    // Taking the boss out lets us push projectiles/events on `state` while
    // mutating it.
    let Some(mut boss) = state.boss.take() else {
        return;
    };

    let player_center_y = state.player.y + PLAYER_HEIGHT / 2.0;

    boss.motion = match boss.motion.clone() {
        BossMotion::Approaching => {
            boss.x -= BOSS_APPROACH_SPEED;
            if boss.x <= boss.home_x {
                boss.x = boss.home_x;
                BossMotion::Resting {
                    remaining_ms: PATTERN_PAUSE_MS,
                }
            } else {
                BossMotion::Approaching
            }
        }
        BossMotion::Resting { remaining_ms } => {
            let remaining_ms = remaining_ms.saturating_sub(TICK_MS);
            if remaining_ms == 0 {
                BossMotion::Pattern(select_pattern(rng))
            } else {
                BossMotion::Resting { remaining_ms }
            }
        }
        BossMotion::Pattern(pattern) => step_pattern(&mut boss, pattern, player_center_y),
    };

    // Fire cadence runs only once the boss is on station.
    if !matches!(boss.motion, BossMotion::Approaching) {
        advance_fire(state, &mut boss);
    }

    state.boss = Some(boss);
}

fn advance_fire(state: &mut GameState, boss: &mut Boss) {
    let before = boss.fire_timer_ms;
    boss.fire_timer_ms = boss.fire_timer_ms.saturating_sub(TICK_MS);

    // Entering the telegraph window is a one-shot cue for the frontend.
    if before > BOSS_TELEGRAPH_MS && boss.fire_timer_ms <= BOSS_TELEGRAPH_MS {
        state.events.push(GameEvent::BossTelegraph);
    }
    if boss.fire_timer_ms == 0 {
        boss.fire_timer_ms = BOSS_FIRE_INTERVAL_MS;
        state.projectiles.push(Projectile {
            x: boss.x - 10.0,
            y: boss.y + BOSS_HEIGHT / 2.0 - 3.0,
            vx: ENEMY_BULLET_SPEED,
            kind: ProjectileKind::EnemyBullet,
        });
    }
}

// ── Pattern cycle ────────────────────────────────────────────────────────────

/// Uniform pick among the three patterns.  Each runs to completion, then the
/// boss rests briefly before the next roll.
fn select_pattern(rng: &mut impl Rng) -> BossPattern {
    match rng.gen_range(0..3) {
        0 => BossPattern::Vertical {
            dir: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
            remaining_ms: PATTERN_DURATION_MS,
        },
        1 => BossPattern::Charge {
            phase: ChargePhase::Telegraph {
                remaining_ms: BOSS_TELEGRAPH_MS,
            },
        },
        _ => BossPattern::Zigzag {
            dx: -ZIGZAG_DX,
            dy: if rng.gen_bool(0.5) {
                ZIGZAG_DY
            } else {
                -ZIGZAG_DY
            },
            remaining_ms: PATTERN_DURATION_MS,
        },
    }
}

fn rest() -> BossMotion {
    BossMotion::Resting {
        remaining_ms: PATTERN_PAUSE_MS,
    }
}

fn step_pattern(boss: &mut Boss, pattern: BossPattern, player_center_y: f32) -> BossMotion {
    match pattern {
        // Bounce up and down, reversing on boundary contact.
        BossPattern::Vertical { mut dir, remaining_ms } => {
            boss.y += dir * VERTICAL_BOUNCE_SPEED;
            if boss.y <= 0.0 {
                boss.y = 0.0;
                dir = 1.0;
            } else if boss.y >= FIELD_HEIGHT - BOSS_HEIGHT {
                boss.y = FIELD_HEIGHT - BOSS_HEIGHT;
                dir = -1.0;
            }
            let remaining_ms = remaining_ms.saturating_sub(TICK_MS);
            if remaining_ms == 0 {
                rest()
            } else {
                BossMotion::Pattern(BossPattern::Vertical { dir, remaining_ms })
            }
        }

        BossPattern::Charge { phase } => step_charge(boss, phase, player_center_y),

        // Diagonal bouncing in a band near home, then snap back.
        BossPattern::Zigzag {
            mut dx,
            mut dy,
            remaining_ms,
        } => {
            boss.x += dx;
            boss.y += dy;
            let left = (boss.home_x - ZIGZAG_BAND_LEFT).max(0.0);
            let right = (boss.home_x + ZIGZAG_BAND_RIGHT).min(FIELD_WIDTH - BOSS_WIDTH);
            if boss.x <= left {
                boss.x = left;
                dx = ZIGZAG_DX;
            } else if boss.x >= right {
                boss.x = right;
                dx = -ZIGZAG_DX;
            }
            if boss.y <= 0.0 {
                boss.y = 0.0;
                dy = ZIGZAG_DY;
            } else if boss.y >= FIELD_HEIGHT - BOSS_HEIGHT {
                boss.y = FIELD_HEIGHT - BOSS_HEIGHT;
                dy = -ZIGZAG_DY;
            }
            let remaining_ms = remaining_ms.saturating_sub(TICK_MS);
            if remaining_ms == 0 {
                boss.x = boss.home_x;
                boss.y = boss.home_y;
                rest()
            } else {
                BossMotion::Pattern(BossPattern::Zigzag { dx, dy, remaining_ms })
            }
        }
    }
}

/// Telegraph standing still, dash at the player, turn around at the charge
/// threshold, crawl back home.
fn step_charge(boss: &mut Boss, phase: ChargePhase, player_center_y: f32) -> BossMotion {
    match phase {
        ChargePhase::Telegraph { remaining_ms } => {
            let remaining_ms = remaining_ms.saturating_sub(TICK_MS);
            let phase = if remaining_ms == 0 {
                ChargePhase::Dash { vx: 0.0 }
            } else {
                ChargePhase::Telegraph { remaining_ms }
            };
            BossMotion::Pattern(BossPattern::Charge { phase })
        }
        ChargePhase::Dash { mut vx } => {
            vx += CHARGE_ACCEL;
            boss.x -= vx;
            let dy = player_center_y - (boss.y + BOSS_HEIGHT / 2.0);
            boss.y = (boss.y + dy.clamp(-CHARGE_TRACK, CHARGE_TRACK))
                .clamp(0.0, FIELD_HEIGHT - BOSS_HEIGHT);
            let phase = if boss.x <= CHARGE_TURN_X {
                boss.x = CHARGE_TURN_X;
                ChargePhase::Return
            } else {
                ChargePhase::Dash { vx }
            };
            BossMotion::Pattern(BossPattern::Charge { phase })
        }
        ChargePhase::Return => {
            boss.x += CHARGE_RETURN_SPEED;
            let dy = boss.home_y - boss.y;
            boss.y += dy.clamp(-CHARGE_RETURN_SPEED, CHARGE_RETURN_SPEED);
            if boss.x >= boss.home_x {
                boss.x = boss.home_x;
                boss.y = boss.home_y;
                rest()
            } else {
                BossMotion::Pattern(BossPattern::Charge {
                    phase: ChargePhase::Return,
                })
            }
        }
    }
}
