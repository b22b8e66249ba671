/// Power/upgrade state machine: power level 0–5 plus the barrier.
///
/// Power only ever goes up; it resets to 0 only because a new session builds
/// a fresh player.  The barrier is a charge counter — active iff > 0.

use crate::entities::{
    FireKind, Player, Projectile, ProjectileKind, BARRIER_CHARGES, BEAM_SPEED, HOMING_SPEED,
    PLAYER_HEIGHT, PLAYER_WIDTH, POWER_MAX, SHOT_SPEED,
};

/// Apply one item pickup.  Returns `true` when the barrier (re-)activated.
///
/// At the cap the pickup re-arms a depleted barrier; while the barrier is
/// still holding charges the pickup is a no-op.
pub(crate) fn apply_item_pickup(player: &mut Player) -> bool {
    if player.power < POWER_MAX {
        player.power += 1;
    }
    if player.power == POWER_MAX && player.barrier == 0 {
        player.barrier = BARRIER_CHARGES;
        return true;
    }
    false
}

/// The projectiles one fire command produces at the player's current level.
///
/// Levels: 0 single shot, 1 twin shots ±10 px, 2 beam, 3 homing,
/// 4+ triple shots −20/0/+20 px.  A strong fire is always a beam.
pub fn shots_for(player: &Player, kind: FireKind) -> Vec<Projectile> {
    let nose_x = player.x + PLAYER_WIDTH;
    let center_y = player.y + PLAYER_HEIGHT / 2.0;

    if kind == FireKind::Strong {
        return vec![beam(nose_x, center_y)];
    }

    match player.power {
        0 => vec![shot(nose_x, center_y, 0.0)],
        1 => vec![shot(nose_x, center_y, -10.0), shot(nose_x, center_y, 10.0)],
        2 => vec![beam(nose_x, center_y)],
        3 => vec![Projectile {
            x: nose_x,
            y: center_y - 2.0,
            vx: HOMING_SPEED,
            kind: ProjectileKind::Homing,
        }],
        _ => vec![
            shot(nose_x, center_y, -20.0),
            shot(nose_x, center_y, 0.0),
            shot(nose_x, center_y, 20.0),
        ],
    }
}

fn shot(nose_x: f32, center_y: f32, offset: f32) -> Projectile {
    Projectile {
        x: nose_x,
        y: center_y + offset - 2.0,
        vx: SHOT_SPEED,
        kind: ProjectileKind::Normal,
    }
}

fn beam(nose_x: f32, center_y: f32) -> Projectile {
    Projectile {
        x: nose_x,
        y: center_y - 3.0,
        vx: BEAM_SPEED,
        kind: ProjectileKind::Beam,
    }
}
