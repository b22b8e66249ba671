use skyraid::compute::{init_state, tick};
use skyraid::config::{Difficulty, Tuning};
use skyraid::entities::*;
use skyraid::events::GameEvent;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> GameState {
    init_state(Difficulty::Normal, Tuning::default(), 0)
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

const BOSS_HOME_Y: f32 = (FIELD_HEIGHT - BOSS_HEIGHT) / 2.0;

/// A boss already on station, resting between patterns.
fn engaged_boss(hp: i32) -> Boss {
    Boss {
        x: BOSS_HOME_X,
        y: BOSS_HOME_Y,
        hp,
        max_hp: hp,
        home_x: BOSS_HOME_X,
        home_y: BOSS_HOME_Y,
        motion: BossMotion::Resting {
            remaining_ms: PATTERN_PAUSE_MS,
        },
        fire_timer_ms: BOSS_FIRE_INTERVAL_MS,
    }
}

fn beam_hitting_boss(boss: &Boss) -> Projectile {
    Projectile {
        x: boss.x - 20.0,
        y: boss.y + BOSS_HEIGHT / 2.0,
        vx: BEAM_SPEED,
        kind: ProjectileKind::Beam,
    }
}

// ── Countdown → Approaching ──────────────────────────────────────────────────

#[test]
fn countdown_expiry_spawns_boss_and_stops_spawning() {
    let mut s = make_state();
    s.boss_countdown_ms = TICK_MS;
    s.spawn_timer_ms = 2 * TICK_MS;
    let s2 = tick(&s, &mut seeded_rng());

    let boss = s2.boss.as_ref().expect("boss must exist");
    assert!(s2.boss_active());
    assert_eq!(boss.motion, BossMotion::Approaching);
    assert!(boss.x > FIELD_WIDTH); // enters from off-field right
    assert!(s2.events.contains(&GameEvent::BossWarning));

    // Normal enemy spawning ceases for the whole encounter
    let mut s3 = s2;
    let mut rng = seeded_rng();
    for _ in 0..10 {
        s3 = tick(&s3, &mut rng);
    }
    assert!(s3.enemies.is_empty());
    assert_eq!(s3.spawn_timer_ms, 2 * TICK_MS); // frozen, not reset
}

#[test]
fn boss_hp_scales_with_difficulty_and_stage() {
    for (difficulty, stage, expected) in [
        (Difficulty::Easy, 1, 80),
        (Difficulty::Normal, 1, 100),
        (Difficulty::Hard, 1, 150),
        (Difficulty::Normal, 3, 200), // 100 + 50×2
    ] {
        let mut s = init_state(difficulty, Tuning::default(), 0);
        s.stage = stage;
        s.boss_countdown_ms = TICK_MS;
        let s2 = tick(&s, &mut seeded_rng());
        assert_eq!(s2.boss.as_ref().unwrap().hp, expected);
    }
}

#[test]
fn countdown_ticks_down_only_outside_encounters() {
    let mut s = make_state();
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.boss_countdown_ms, 60_000 - TICK_MS);

    s = make_state();
    s.boss = Some(engaged_boss(100));
    s.boss_countdown_ms = 5000;
    let s3 = tick(&s, &mut seeded_rng());
    assert_eq!(s3.boss_countdown_ms, 5000); // paused during the fight
}

// ── Approaching → Engaged ────────────────────────────────────────────────────

#[test]
fn boss_slides_to_home_and_starts_the_cycle() {
    let mut s = make_state();
    let mut boss = engaged_boss(100);
    boss.x = BOSS_HOME_X + 1.0;
    boss.motion = BossMotion::Approaching;
    s.boss = Some(boss);

    let s2 = tick(&s, &mut seeded_rng());
    let boss = s2.boss.as_ref().unwrap();
    assert_eq!(boss.x, BOSS_HOME_X); // snapped to home
    assert_eq!(
        boss.motion,
        BossMotion::Resting {
            remaining_ms: PATTERN_PAUSE_MS
        }
    );
}

#[test]
fn rest_expires_into_a_movement_pattern() {
    let mut s = make_state();
    let mut boss = engaged_boss(100);
    boss.motion = BossMotion::Resting {
        remaining_ms: TICK_MS,
    };
    s.boss = Some(boss);
    let s2 = tick(&s, &mut seeded_rng());
    assert!(matches!(
        s2.boss.as_ref().unwrap().motion,
        BossMotion::Pattern(_)
    ));
}

#[test]
fn pattern_selection_is_deterministic_under_a_seed() {
    let run = || {
        let mut s = make_state();
        let mut boss = engaged_boss(10_000);
        boss.motion = BossMotion::Resting {
            remaining_ms: TICK_MS,
        };
        s.boss = Some(boss);
        let mut rng = seeded_rng();
        let mut motions = Vec::new();
        for _ in 0..600 {
            s = tick(&s, &mut rng);
            motions.push(s.boss.as_ref().unwrap().motion.clone());
        }
        motions
    };
    assert_eq!(run(), run());
}

// ── Patterns ─────────────────────────────────────────────────────────────────

#[test]
fn vertical_pattern_bounces_at_the_top() {
    let mut s = make_state();
    let mut boss = engaged_boss(100);
    boss.y = 2.0;
    boss.motion = BossMotion::Pattern(BossPattern::Vertical {
        dir: -1.0,
        remaining_ms: PATTERN_DURATION_MS,
    });
    s.boss = Some(boss);
    let s2 = tick(&s, &mut seeded_rng());
    let boss = s2.boss.as_ref().unwrap();
    assert_eq!(boss.y, 0.0);
    assert_eq!(
        boss.motion,
        BossMotion::Pattern(BossPattern::Vertical {
            dir: 1.0,
            remaining_ms: PATTERN_DURATION_MS - TICK_MS,
        })
    );
}

#[test]
fn vertical_pattern_stays_in_field_for_its_whole_run() {
    let mut s = make_state();
    let mut boss = engaged_boss(100_000);
    boss.motion = BossMotion::Pattern(BossPattern::Vertical {
        dir: 1.0,
        remaining_ms: PATTERN_DURATION_MS,
    });
    s.boss = Some(boss);
    let mut rng = seeded_rng();
    for _ in 0..(PATTERN_DURATION_MS / TICK_MS) {
        s = tick(&s, &mut rng);
        let b = s.boss.as_ref().unwrap();
        assert!(b.y >= 0.0 && b.y + BOSS_HEIGHT <= FIELD_HEIGHT);
    }
    // Pattern over: back to resting before the next roll
    assert!(matches!(
        s.boss.as_ref().unwrap().motion,
        BossMotion::Resting { .. }
    ));
}

#[test]
fn zigzag_snaps_back_home_when_done() {
    let mut s = make_state();
    let mut boss = engaged_boss(100);
    boss.x = BOSS_HOME_X - 80.0;
    boss.y = 40.0;
    boss.motion = BossMotion::Pattern(BossPattern::Zigzag {
        dx: -ZIGZAG_DX,
        dy: ZIGZAG_DY,
        remaining_ms: TICK_MS,
    });
    s.boss = Some(boss);
    let s2 = tick(&s, &mut seeded_rng());
    let boss = s2.boss.as_ref().unwrap();
    assert_eq!(boss.x, BOSS_HOME_X);
    assert_eq!(boss.y, BOSS_HOME_Y);
    assert!(matches!(boss.motion, BossMotion::Resting { .. }));
}

#[test]
fn charge_telegraph_holds_still_then_dashes() {
    let mut s = make_state();
    let mut boss = engaged_boss(100);
    boss.motion = BossMotion::Pattern(BossPattern::Charge {
        phase: ChargePhase::Telegraph {
            remaining_ms: TICK_MS,
        },
    });
    s.boss = Some(boss);
    let s2 = tick(&s, &mut seeded_rng());
    let boss = s2.boss.as_ref().unwrap();
    assert_eq!(boss.x, BOSS_HOME_X); // no motion during the warning
    assert!(matches!(
        boss.motion,
        BossMotion::Pattern(BossPattern::Charge {
            phase: ChargePhase::Dash { .. }
        })
    ));

    // The dash accelerates leftward and tracks the player's row
    let s3 = tick(&s2, &mut seeded_rng());
    let dashing = s3.boss.as_ref().unwrap();
    assert!(dashing.x < BOSS_HOME_X);
}

#[test]
fn charge_reverses_at_threshold_and_returns_home() {
    let mut s = make_state();
    // park the player out of the bullet row so the long return leg
    // is not cut short by a stray boss shot
    s.player.y = 0.0;
    let mut boss = engaged_boss(100);
    boss.x = CHARGE_TURN_X + 1.0;
    boss.motion = BossMotion::Pattern(BossPattern::Charge {
        phase: ChargePhase::Dash { vx: 5.0 },
    });
    s.boss = Some(boss);
    let s2 = tick(&s, &mut seeded_rng());
    let boss = s2.boss.as_ref().unwrap();
    assert_eq!(boss.x, CHARGE_TURN_X);
    assert!(matches!(
        boss.motion,
        BossMotion::Pattern(BossPattern::Charge {
            phase: ChargePhase::Return
        })
    ));

    // Crawling back: arrives home and rests
    let mut s = s2;
    let mut rng = seeded_rng();
    for _ in 0..200 {
        s = tick(&s, &mut rng);
        if matches!(s.boss.as_ref().unwrap().motion, BossMotion::Resting { .. }) {
            break;
        }
    }
    let boss = s.boss.as_ref().unwrap();
    assert_eq!(boss.x, BOSS_HOME_X);
    assert_eq!(boss.y, BOSS_HOME_Y);
}

// ── Boss fire ────────────────────────────────────────────────────────────────

#[test]
fn boss_telegraphs_then_fires_on_cadence() {
    let mut s = make_state();
    let mut boss = engaged_boss(100);
    boss.fire_timer_ms = BOSS_TELEGRAPH_MS + TICK_MS;
    s.boss = Some(boss);

    // Crossing into the warning window emits the cue once
    let s2 = tick(&s, &mut seeded_rng());
    assert!(s2.events.contains(&GameEvent::BossTelegraph));
    assert!(s2.boss.as_ref().unwrap().is_telegraphing());

    // …and the shot lands when the timer runs out
    let mut s = s2;
    let mut rng = seeded_rng();
    for _ in 0..(BOSS_TELEGRAPH_MS / TICK_MS) {
        s = tick(&s, &mut rng);
    }
    let bullets: Vec<_> = s
        .projectiles
        .iter()
        .filter(|p| p.kind == ProjectileKind::EnemyBullet)
        .collect();
    assert_eq!(bullets.len(), 1);
    assert_eq!(s.boss.as_ref().unwrap().fire_timer_ms, BOSS_FIRE_INTERVAL_MS);
}

#[test]
fn approaching_boss_does_not_fire() {
    let mut s = make_state();
    let mut boss = engaged_boss(100);
    boss.x = FIELD_WIDTH + 60.0;
    boss.motion = BossMotion::Approaching;
    boss.fire_timer_ms = TICK_MS;
    s.boss = Some(boss);
    let s2 = tick(&s, &mut seeded_rng());
    assert!(s2.projectiles.is_empty());
    assert_eq!(s2.boss.as_ref().unwrap().fire_timer_ms, TICK_MS); // held
}

// ── Damage & defeat ──────────────────────────────────────────────────────────

#[test]
fn boss_takes_10_from_shots_and_20_from_beams() {
    let mut s = make_state();
    let boss = engaged_boss(100);
    s.projectiles.push(Projectile {
        x: boss.x - 15.0,
        y: boss.y + 10.0,
        vx: SHOT_SPEED,
        kind: ProjectileKind::Normal,
    });
    s.boss = Some(boss);
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.boss.as_ref().unwrap().hp, 90);
    assert!(s2.projectiles.is_empty()); // shot consumed

    let mut s3 = make_state();
    let boss = engaged_boss(100);
    s3.projectiles.push(beam_hitting_boss(&boss));
    s3.boss = Some(boss);
    let s4 = tick(&s3, &mut seeded_rng());
    assert_eq!(s4.boss.as_ref().unwrap().hp, 80);
    assert!(s4.projectiles.is_empty()); // the boss absorbs beams too
}

#[test]
fn five_beams_defeat_a_100_hp_boss() {
    let mut s = make_state();
    s.boss = Some(engaged_boss(100));
    let stage1_interval = s.spawn_interval_ms;
    let mut rng = seeded_rng();

    for hit in 1..=5 {
        let boss = s.boss.clone().expect("boss alive before the last hit");
        s.projectiles.push(beam_hitting_boss(&boss));
        s = tick(&s, &mut rng);
        if hit < 5 {
            assert_eq!(s.boss.as_ref().unwrap().hp, 100 - 20 * hit);
        }
    }

    // Destroyed on the 5th hit: reward, stage, countdown, spawning all reset
    assert!(s.boss.is_none());
    assert_eq!(s.score, 1000);
    assert_eq!(s.stage, 2);
    assert_eq!(s.boss_countdown_ms, 60_000);
    assert_eq!(s.spawn_interval_ms, stage1_interval - 300);
    assert!(s.events.contains(&GameEvent::BossDefeated));
    assert!(s.events.contains(&GameEvent::StageAdvanced { stage: 2 }));
}

#[test]
fn spawning_resumes_immediately_after_defeat() {
    let mut s = make_state();
    s.boss = Some(engaged_boss(10));
    s.spawn_timer_ms = TICK_MS;
    let boss = s.boss.clone().unwrap();
    s.projectiles.push(beam_hitting_boss(&boss));
    let mut rng = seeded_rng();
    s = tick(&s, &mut rng); // boss dies; spawner was frozen this tick
    assert!(s.boss.is_none());
    assert!(s.enemies.is_empty());

    s = tick(&s, &mut rng); // next tick the frozen timer runs out
    assert_eq!(s.enemies.len(), 1);
}

#[test]
fn boss_contact_kills_an_unshielded_player() {
    let mut s = make_state();
    let mut boss = engaged_boss(100);
    boss.x = s.player.x;
    boss.y = s.player.y;
    boss.home_y = boss.y;
    s.boss = Some(boss);
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::GameOver);
    assert!(s2.events.contains(&GameEvent::PlayerDied));
    // The boss is not destroyed by contact
    assert!(s2.boss.is_some());
}

#[test]
fn boss_contact_drains_barrier_charges() {
    let mut s = make_state();
    s.player.barrier = 3;
    let mut boss = engaged_boss(100);
    boss.x = s.player.x;
    boss.y = s.player.y;
    s.boss = Some(boss);
    let s2 = tick(&s, &mut seeded_rng());
    assert!(s2.player.alive);
    assert_eq!(s2.player.barrier, 2); // one charge per tick of overlap
}

#[test]
fn player_death_freezes_the_encounter() {
    let mut s = make_state();
    let mut boss = engaged_boss(100);
    boss.x = s.player.x;
    boss.y = s.player.y;
    s.boss = Some(boss);
    let mut rng = seeded_rng();
    s = tick(&s, &mut rng);
    assert_eq!(s.status, GameStatus::GameOver);

    // Frozen session: the boss no longer moves, fires or telegraphs
    let snapshot = s.boss.clone().unwrap();
    for _ in 0..50 {
        s = tick(&s, &mut rng);
    }
    let after = s.boss.as_ref().unwrap();
    assert_eq!(after.x, snapshot.x);
    assert_eq!(after.fire_timer_ms, snapshot.fire_timer_ms);
    assert!(s.projectiles.is_empty());
}
