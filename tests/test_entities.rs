use skyraid::config::{Difficulty, Tuning};
use skyraid::entities::*;

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(EnemyKind::Grunt, EnemyKind::Grunt);
    assert_ne!(EnemyKind::Grunt, EnemyKind::Fast);
    assert_eq!(Difficulty::Easy, Difficulty::Easy);
    assert_ne!(Difficulty::Easy, Difficulty::Hard);
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
    assert_eq!(ProjectileKind::Beam, ProjectileKind::Beam);
    assert_ne!(ProjectileKind::Normal, ProjectileKind::EnemyBullet);

    // Clone must produce an equal value
    let kind = EnemyKind::Shooter;
    assert_eq!(kind.clone(), EnemyKind::Shooter);
}

#[test]
fn enemy_kind_tables() {
    // Rewards
    assert_eq!(EnemyKind::Grunt.score(), 100);
    assert_eq!(EnemyKind::Fast.score(), 150);
    assert_eq!(EnemyKind::Strong.score(), 200);
    assert_eq!(EnemyKind::Shooter.score(), 200);

    // Only strong/shooter fire, on their own cadences
    assert_eq!(EnemyKind::Strong.fire_interval_ms(), Some(1500));
    assert_eq!(EnemyKind::Shooter.fire_interval_ms(), Some(1000));
    assert_eq!(EnemyKind::Grunt.fire_interval_ms(), None);
    assert_eq!(EnemyKind::Fast.fire_interval_ms(), None);

    // Fast weaves harder and flies faster than everything else
    assert!(EnemyKind::Fast.weave_step() > 2.0 * EnemyKind::Grunt.weave_step());
    assert!(EnemyKind::Fast.speed() > EnemyKind::Grunt.speed());
}

#[test]
fn boss_telegraph_window() {
    let boss = Boss {
        x: BOSS_HOME_X,
        y: 200.0,
        hp: 100,
        max_hp: 100,
        home_x: BOSS_HOME_X,
        home_y: 200.0,
        motion: BossMotion::Resting { remaining_ms: 500 },
        fire_timer_ms: BOSS_FIRE_INTERVAL_MS,
    };
    assert!(!boss.is_telegraphing()); // timer far from firing

    let mut warming = boss.clone();
    warming.fire_timer_ms = BOSS_TELEGRAPH_MS;
    assert!(warming.is_telegraphing());

    // An approaching boss never telegraphs, whatever its timer says
    let mut approaching = warming.clone();
    approaching.motion = BossMotion::Approaching;
    assert!(!approaching.is_telegraphing());
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        player: Player {
            x: 60.0,
            y: 228.0,
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
        high_score: 0,
        stage: 1,
        destroyed_this_stage: 0,
        spawn_interval_ms: 2000,
        spawn_timer_ms: 2000,
        item_timer_ms: 15_000,
        boss_countdown_ms: 60_000,
        scroll_offset: 0.0,
        difficulty: Difficulty::Normal,
        tuning: Tuning::default(),
        status: GameStatus::Playing,
        frame: 0,
        events: Vec::new(),
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99.0;
    cloned.score = 999;
    cloned.enemies.push(Enemy {
        x: 400.0,
        y: 200.0,
        kind: EnemyKind::Grunt,
        speed: EnemyKind::Grunt.speed(),
        weave: Weave {
            base_y: 200.0,
            amplitude: 0.0,
            angle: 0.0,
            step: 0.0,
        },
        fire_timer_ms: None,
    });

    assert_eq!(original.player.x, 60.0);
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
}
