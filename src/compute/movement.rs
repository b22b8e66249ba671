/// Movement & pattern engine for everything except the boss (see `boss`).
///
/// Order inside one tick: projectiles steer and advance, enemies weave and
/// fire, items drift, explosions decay, then everything off-field is culled.
/// Collision runs after all movement (see `tick`).

use crate::entities::{
    Enemy, GameState, Projectile, ProjectileKind, ENEMY_BULLET_SPEED, FIELD_WIDTH, HOMING_STEER,
    TICK_MS,
};

/// Margin past the field edge before a projectile is discarded.
const CULL_MARGIN: f32 = 40.0;

pub(crate) fn advance(state: &mut GameState) {
    advance_projectiles(state);
    advance_enemies(state);
    advance_items(state);
    advance_explosions(state);
}

// ── Projectiles ──────────────────────────────────────────────────────────────

fn advance_projectiles(state: &mut GameState) {
    // Homing targets are decided against enemy positions at the start of the
    // step, before the enemies themselves move.
    let targets: Vec<(f32, f32)> = state
        .enemies
        .iter()
        .map(|e| {
            let (w, h) = e.kind.size();
            (e.x + w / 2.0, e.y + h / 2.0)
        })
        .chain(state.boss.iter().map(|b| {
            let r = b.rect();
            (r.x + r.w / 2.0, r.y + r.h / 2.0)
        }))
        .collect();

    for p in &mut state.projectiles {
        if p.kind == ProjectileKind::Homing {
            steer_homing(p, &targets);
        }
        p.x += p.vx;
    }

    state
        .projectiles
        .retain(|p| p.x < FIELD_WIDTH + CULL_MARGIN && p.x + p.rect().w > -CULL_MARGIN);
}

/// Steer one homing shot toward the nearest target's vertical center.
/// The shot always advances horizontally; with no targets it flies straight.
fn steer_homing(p: &mut Projectile, targets: &[(f32, f32)]) {
    let (w, h) = p.size();
    let (lead_x, lead_y) = (p.x + w, p.y + h / 2.0);
    let nearest = targets.iter().min_by(|a, b| {
        let da = (a.0 - lead_x).powi(2) + (a.1 - lead_y).powi(2);
        let db = (b.0 - lead_x).powi(2) + (b.1 - lead_y).powi(2);
        da.total_cmp(&db)
    });
    if let Some(&(_, target_y)) = nearest {
        let dy = target_y - lead_y;
        p.y += dy.clamp(-HOMING_STEER, HOMING_STEER);
    }
}

// ── Enemies ──────────────────────────────────────────────────────────────────

fn advance_enemies(state: &mut GameState) {
    let mut fired: Vec<Projectile> = Vec::new();

    for e in &mut state.enemies {
        e.x -= e.speed;
        e.weave.angle += e.weave.step;
        e.y = e.weave.base_y + e.weave.amplitude * e.weave.angle.sin();

        if let Some(timer) = &mut e.fire_timer_ms {
            *timer = timer.saturating_sub(TICK_MS);
            if *timer == 0 {
                // the timer only exists for kinds with a fire interval
                *timer = e.kind.fire_interval_ms().unwrap_or(u32::MAX);
                fired.push(enemy_bullet(e));
            }
        }
    }
    state.projectiles.extend(fired);

    state.enemies.retain(|e| e.x + e.rect().w > 0.0);
}

fn enemy_bullet(e: &Enemy) -> Projectile {
    let (_, h) = e.kind.size();
    Projectile {
        x: e.x - 10.0,
        y: e.y + h / 2.0 - 3.0,
        vx: ENEMY_BULLET_SPEED,
        kind: ProjectileKind::EnemyBullet,
    }
}

// ── Items & explosions ───────────────────────────────────────────────────────

fn advance_items(state: &mut GameState) {
    for item in &mut state.items {
        item.x += item.vx;
    }
    state.items.retain(|i| i.x + i.rect().w > 0.0);
}

fn advance_explosions(state: &mut GameState) {
    for ex in &mut state.explosions {
        ex.remaining_ms = ex.remaining_ms.saturating_sub(TICK_MS);
    }
    state.explosions.retain(|ex| ex.remaining_ms > 0);
}
