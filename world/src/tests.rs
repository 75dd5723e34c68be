use std::time::Duration;

use wave_arena_core::{
    BossPhase, Command, EnemyId, EnemyProjectileKind, EnemySpawn, Event, ExitReason, FrameInput,
    Movement, PlayerIndex, Progress, RunState, SpawnKind, Vec2, WaveNumber,
};

use crate::{
    advance, apply,
    entities::{Enemy, EnemyProjectile},
    query,
    sequence::RunPhase,
    Config, DeathRule, World,
};

const FRAME: Duration = Duration::from_nanos(16_666_667);
const PRIMARY: PlayerIndex = PlayerIndex::PRIMARY;

fn quiet_enemy(id: u32, position: Vec2, hp: i32) -> Enemy {
    Enemy::from_spawn(
        EnemyId::new(id),
        &EnemySpawn {
            position,
            velocity: Vec2::ZERO,
            speed: 30.0,
            hp,
            fire_delay: Duration::from_secs(60),
            kind: SpawnKind::Regular,
        },
    )
}

fn quiet_boss(id: u32, position: Vec2, hp: i32) -> Enemy {
    Enemy::from_spawn(
        EnemyId::new(id),
        &EnemySpawn {
            position,
            velocity: Vec2::ZERO,
            speed: 0.0,
            hp,
            fire_delay: Duration::from_secs(60),
            kind: SpawnKind::Boss {
                summon_delay: Duration::from_secs(60),
                special_delay: Duration::from_secs(60),
            },
        },
    )
}

fn arena(world: World, enemies: Vec<Enemy>) -> World {
    let mut world = world;
    world.enemies = enemies;
    world.projectiles.clear();
    world.enemy_projectiles.clear();
    world.next_enemy_id = 100;
    world
}

fn solo_arena(enemies: Vec<Enemy>) -> World {
    arena(World::new(), enemies)
}

fn fire(player: PlayerIndex) -> FrameInput {
    FrameInput {
        fire: vec![player],
        ..FrameInput::default()
    }
}

fn tick(world: &mut World, dt: Duration) -> Vec<Event> {
    let mut events = Vec::new();
    apply(world, Command::Tick { dt }, &mut events);
    events
}

fn shot_at(position: Vec2, kind: EnemyProjectileKind) -> EnemyProjectile {
    EnemyProjectile {
        position,
        direction: Vec2::new(0.0, 1.0),
        speed: 160.0,
        kind,
        homing: Duration::ZERO,
        payload: None,
    }
}

#[test]
fn fresh_run_starts_first_wave_immediately() {
    let world = World::new();

    assert_eq!(query::run_state(&world), RunState::Active);
    assert_eq!(query::wave(&world), WaveNumber::FIRST);
    assert!((8..=12).contains(&query::enemy_count(&world)));
    assert_eq!(world.players[0].position, Vec2::new(400.0, 300.0));
}

#[test]
fn player_shot_destroys_enemy_and_charges_ultimate() {
    let mut world = solo_arena(vec![quiet_enemy(1, Vec2::new(400.0, 200.0), 1)]);
    let mut events = Vec::new();

    apply(&mut world, Command::Fire { player: PRIMARY }, &mut events);
    assert_eq!(query::player_projectile_count(&world), 1);

    for _ in 0..60 {
        apply(&mut world, Command::Tick { dt: FRAME }, &mut events);
        if events
            .iter()
            .any(|event| matches!(event, Event::WaveAdvanced { .. }))
        {
            break;
        }
    }

    assert!(!world.enemies.iter().any(|enemy| enemy.id == EnemyId::new(1)));
    assert_eq!(world.players[0].ultimate_charge, 20);
    assert!(events.contains(&Event::WaveAdvanced {
        wave: WaveNumber::new(2)
    }));
    assert_eq!(query::progress(&world), Progress::new(1));
    assert_eq!(query::player_projectile_count(&world), 0);
}

#[test]
fn boss_bullet_kills_weakened_player() {
    let mut world = solo_arena(vec![quiet_enemy(1, Vec2::new(100.0, 100.0), 1)]);
    world.players[0].hp = 10.0;
    world
        .enemy_projectiles
        .push(shot_at(Vec2::new(400.0, 295.0), EnemyProjectileKind::Boss));

    let events = tick(&mut world, FRAME);

    assert_eq!(world.players[0].hp, 0.0);
    assert!(events.contains(&Event::PlayerDied));
    assert_eq!(query::run_state(&world), RunState::Dead);
    assert_eq!(
        world.phase,
        RunPhase::PlayerDead {
            remaining: Duration::from_millis(1500)
        }
    );
    assert_eq!(
        query::snapshot(&world).hud.death_message,
        Some(Duration::from_millis(1500))
    );

    let events = tick(&mut world, Duration::from_secs(1));
    assert_eq!(query::run_state(&world), RunState::Dead);
    assert_eq!(events, vec![Event::TimeAdvanced { dt: Duration::from_secs(1) }]);

    let events = tick(&mut world, Duration::from_millis(500));
    assert_eq!(query::run_state(&world), RunState::Finished);
    assert!(events.contains(&Event::ReturnToMenu {
        reason: ExitReason::Defeated
    }));
}

#[test]
fn ultimate_requires_full_charge_and_expires() {
    let mut world = solo_arena(vec![quiet_enemy(1, Vec2::new(60.0, 60.0), 50)]);
    let mut events = Vec::new();

    world.players[0].ultimate_charge = 80;
    apply(&mut world, Command::ActivateUltimate { player: PRIMARY }, &mut events);
    assert!(events.is_empty());
    assert_eq!(query::player_projectile_count(&world), 0);

    world.players[0].ultimate_charge = 100;
    apply(&mut world, Command::ActivateUltimate { player: PRIMARY }, &mut events);
    assert_eq!(events, vec![Event::UltimateActivated { player: PRIMARY }]);
    assert_eq!(query::player_projectile_count(&world), 12);
    assert_eq!(world.players[0].ultimate_charge, 0);
    assert!(query::snapshot(&world).projectiles.iter().all(|p| p.ultimate));

    world.players[0].ultimate_charge = 100;
    events.clear();
    apply(&mut world, Command::ActivateUltimate { player: PRIMARY }, &mut events);
    assert!(events.is_empty(), "an active ultimate cannot be re-triggered");

    let _ = tick(&mut world, Duration::from_secs(1));
    let _ = tick(&mut world, Duration::from_secs(1));
    assert!(world.players[0].ultimate_remaining.is_some());
    let _ = tick(&mut world, Duration::from_secs(1));
    assert!(world.players[0].ultimate_remaining.is_none());
    assert!(!query::snapshot(&world).players[0].ultimate_active);
}

#[test]
fn boss_changes_phase_once_then_falls_and_sequence_resumes_waves() {
    let mut world = solo_arena(vec![quiet_boss(7, Vec2::new(400.0, 150.0), 1)]);
    world.players[0].weapon_power = 10.0;
    world.players[0].hp = 30.0;
    let mut events = Vec::new();

    for _ in 0..600 {
        advance(&mut world, FRAME, &fire(PRIMARY), &mut events);
        if events
            .iter()
            .any(|event| matches!(event, Event::BossSlain { .. }))
        {
            break;
        }
    }

    let phase_changes: Vec<_> = events
        .iter()
        .filter(|event| matches!(event, Event::BossPhaseChanged { .. }))
        .collect();
    assert_eq!(
        phase_changes,
        vec![&Event::BossPhaseChanged {
            boss: EnemyId::new(7)
        }]
    );
    assert!(events.iter().any(|event| matches!(
        event,
        Event::BossSlain { boss, .. } if *boss == EnemyId::new(7)
    )));

    let snapshot = query::snapshot(&world);
    assert_eq!(snapshot.run_state, RunState::BossSequence);
    assert!(snapshot.enemies.is_empty());
    assert!(snapshot.projectiles.is_empty());
    assert!(snapshot.enemy_projectiles.is_empty());
    assert_eq!(snapshot.effects.len(), 1);
    assert_eq!(snapshot.hud.boss_slain_banner, Some(Duration::from_secs(3)));
    assert!(snapshot.hud.phase_banner.is_some());
    assert_eq!(snapshot.players[0].hp, 80.0);
    assert_eq!(snapshot.players[0].weapon_power, 10.5);

    let events = tick(&mut world, Duration::from_secs(3));
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::WaveAdvanced { .. })));
    assert_eq!(query::run_state(&world), RunState::BossSequence);
    assert_eq!(
        query::snapshot(&world).hud.next_wave_in,
        Some(Duration::from_secs(5))
    );

    let events = tick(&mut world, Duration::from_secs(5));
    assert!(events.contains(&Event::WaveAdvanced {
        wave: WaveNumber::new(2)
    }));
    assert_eq!(query::run_state(&world), RunState::Active);
    assert_eq!(query::progress(&world), Progress::new(1));
    assert!(query::enemy_count(&world) > 0);
}

#[test]
fn second_phase_resets_boss_health_and_disables_summons() {
    let mut world = solo_arena(vec![quiet_boss(3, Vec2::new(400.0, 150.0), 30)]);
    let mut events = Vec::new();

    world.enter_second_phase(0, &mut events);

    let boss = &world.enemies[0];
    assert_eq!(boss.max_hp, 20);
    assert_eq!(boss.hp, 20);
    assert_eq!(boss.boss_phase(), Some(BossPhase::Second));
    match boss.kind {
        crate::entities::EnemyKind::Boss(state) => {
            assert!(state.summon_timer.is_none());
            assert_eq!(state.special_timer, Duration::from_secs(3));
        }
        crate::entities::EnemyKind::Regular => panic!("boss lost its kind"),
    }
    assert_eq!(world.phase_banner, Duration::from_secs(3));
}

#[test]
fn boss_summons_minions_and_fires_debuffing_spread() {
    let mut boss = quiet_boss(1, Vec2::new(100.0, 100.0), 40);
    if let crate::entities::EnemyKind::Boss(state) = &mut boss.kind {
        state.summon_timer = Some(FRAME);
        state.special_timer = FRAME;
    }
    let mut world = solo_arena(vec![boss]);

    let _ = tick(&mut world, FRAME);

    assert_eq!(query::enemy_count(&world), 6);
    let specials: Vec<_> = world
        .enemy_projectiles
        .iter()
        .filter(|shot| shot.kind == EnemyProjectileKind::Special)
        .collect();
    assert_eq!(specials.len(), 8);
    assert!(specials.iter().all(|shot| shot.payload.is_some()));
}

#[test]
fn special_shot_applies_debuffs() {
    let mut world = solo_arena(vec![quiet_enemy(1, Vec2::new(100.0, 100.0), 1)]);
    let mut shot = shot_at(Vec2::new(400.0, 295.0), EnemyProjectileKind::Special);
    shot.payload = Some(crate::entities::Payload::SPECIAL);
    world.enemy_projectiles.push(shot);

    let _ = tick(&mut world, FRAME);

    let snapshot = query::snapshot(&world);
    assert!(snapshot.players[0].bleeding);
    assert!(snapshot.players[0].fire_penalized);
    assert!(snapshot.players[0].hp < 80.0);

    let mut events = Vec::new();
    apply(&mut world, Command::Fire { player: PRIMARY }, &mut events);
    assert_eq!(world.players[0].fire_timer, Duration::from_millis(650));
}

#[test]
fn clearing_enemies_advances_wave_in_same_tick() {
    let mut world = solo_arena(Vec::new());

    let events = tick(&mut world, FRAME);

    assert!(events.contains(&Event::WaveAdvanced {
        wave: WaveNumber::new(2)
    }));
    assert_eq!(query::run_state(&world), RunState::Active);
    assert!(query::enemy_count(&world) > 0);
    assert_eq!(query::progress(&world), Progress::new(1));
}

#[test]
fn contact_destroys_any_enemy_and_respects_hurt_cooldown() {
    let mut world = solo_arena(vec![
        quiet_enemy(1, Vec2::new(410.0, 300.0), 1),
        quiet_boss(2, Vec2::new(400.0, 520.0), 40),
    ]);

    let _ = tick(&mut world, FRAME);

    assert_eq!(world.players[0].hp, 90.0);
    assert_eq!(world.players[0].position, Vec2::new(390.0, 300.0));
    assert_eq!(query::enemy_count(&world), 1);
    assert_eq!(world.hurt_cooldown, Duration::from_secs(1));

    world.enemies[0].position = world.players[0].position + Vec2::new(0.0, 5.0);
    let _ = tick(&mut world, FRAME);
    assert_eq!(world.players[0].hp, 90.0, "hurt cooldown still running");

    let events = tick(&mut world, Duration::from_secs(1));
    assert_eq!(world.players[0].hp, 80.0);
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::BossSlain { .. })));
    assert!(events.contains(&Event::WaveAdvanced {
        wave: WaveNumber::new(2)
    }));
}

#[test]
fn co_op_contact_hurts_only_one_player_per_window() {
    let world = World::try_new(Config::two_players()).expect("valid config");
    let mut world = arena(
        world,
        vec![
            quiet_enemy(1, Vec2::new(210.0, 300.0), 1),
            quiet_enemy(2, Vec2::new(610.0, 300.0), 1),
            quiet_enemy(3, Vec2::new(400.0, 80.0), 1),
        ],
    );

    let _ = tick(&mut world, FRAME);

    assert_eq!(world.players[0].hp, 90.0);
    assert_eq!(world.players[1].hp, 100.0, "second player spared this window");
    assert_eq!(query::enemy_count(&world), 2);

    let _ = tick(&mut world, Duration::from_secs(1));

    assert_eq!(world.players[0].hp, 90.0);
    assert_eq!(world.players[1].hp, 90.0);
    assert_eq!(query::enemy_count(&world), 1);
}

#[test]
fn hurt_cooldown_keeps_ticking_during_boss_sequence() {
    let mut world = solo_arena(Vec::new());
    world.phase = RunPhase::BossSlainDisplay {
        remaining: Duration::from_secs(3),
    };
    world.hurt_cooldown = Duration::from_secs(1);

    let _ = tick(&mut world, Duration::from_millis(400));

    assert_eq!(world.hurt_cooldown, Duration::from_millis(600));
    assert_eq!(query::run_state(&world), RunState::BossSequence);
}

#[test]
fn regular_enemy_fires_straight_at_nearest_player() {
    let world = World::try_new(Config::two_players()).expect("valid config");
    let mut shooter = quiet_enemy(1, Vec2::new(500.0, 100.0), 1);
    shooter.fire_timer = FRAME;
    let mut world = arena(world, vec![shooter]);

    let _ = tick(&mut world, FRAME);

    assert_eq!(world.enemy_projectiles.len(), 1);
    let shot = &world.enemy_projectiles[0];
    assert_eq!(shot.kind, EnemyProjectileKind::Regular);
    assert!(shot.homing.is_zero());
    assert!(shot.payload.is_none());
    let expected = Vec2::new(100.0, 200.0).normalize();
    assert!((shot.direction - expected).length() < 1e-5);

    let reset = world.enemies[0].fire_timer;
    assert!(
        (Duration::from_secs(1)..=Duration::from_secs(3)).contains(&reset),
        "regular fire delay out of range: {reset:?}"
    );
}

#[test]
fn boss_shot_homes_only_during_grace() {
    let mut boss = quiet_boss(1, Vec2::new(400.0, 100.0), 40);
    boss.fire_timer = FRAME;
    let mut world = solo_arena(vec![boss]);

    let _ = tick(&mut world, FRAME);

    assert_eq!(world.enemies[0].fire_timer, Duration::from_millis(500));
    let shot = &world.enemy_projectiles[0];
    assert_eq!(shot.kind, EnemyProjectileKind::Boss);
    assert_eq!(shot.homing, Duration::from_secs(1) - FRAME);
    assert!((shot.direction - Vec2::new(0.0, 1.0)).length() < 1e-5);

    world.players[0].position = Vec2::new(700.0, 300.0);
    for _ in 0..30 {
        let _ = tick(&mut world, FRAME);
    }
    assert!(
        world.enemy_projectiles[0].direction.x > 0.1,
        "shot should bend toward the moved player"
    );

    for _ in 0..40 {
        let _ = tick(&mut world, FRAME);
    }
    assert!(world.enemy_projectiles[0].homing.is_zero());
    let settled = world.enemy_projectiles[0].direction;
    world.players[0].position = Vec2::new(100.0, 300.0);
    let _ = tick(&mut world, FRAME);
    assert_eq!(world.enemy_projectiles[0].direction, settled);
}

#[test]
fn boss_special_spreads_around_bearing_to_nearest_player() {
    let mut boss = quiet_boss(1, Vec2::new(400.0, 100.0), 40);
    if let crate::entities::EnemyKind::Boss(state) = &mut boss.kind {
        state.special_timer = FRAME;
    }
    let mut world = solo_arena(vec![boss]);

    let _ = tick(&mut world, FRAME);

    let specials: Vec<_> = world
        .enemy_projectiles
        .iter()
        .filter(|shot| shot.kind == EnemyProjectileKind::Special)
        .collect();
    assert_eq!(specials.len(), 8);

    let aim = std::f32::consts::FRAC_PI_2;
    for (slot, shot) in specials.iter().enumerate() {
        let angle = aim + (slot as f32 - 3.5) * std::f32::consts::TAU / 8.0;
        let expected = Vec2::new(angle.cos(), angle.sin());
        assert!(
            (shot.direction - expected).length() < 1e-4,
            "slot {slot}: {:?} != {expected:?}",
            shot.direction
        );
        assert!(shot.homing.is_zero());
    }
}

#[test]
fn fire_is_capped_at_twenty_projectiles() {
    let mut world = solo_arena(vec![quiet_enemy(1, Vec2::new(400.0, 100.0), 50)]);
    let mut events = Vec::new();

    for _ in 0..25 {
        world.players[0].fire_timer = Duration::ZERO;
        apply(&mut world, Command::Fire { player: PRIMARY }, &mut events);
    }

    assert_eq!(query::player_projectile_count(&world), 20);
}

#[test]
fn fire_respects_cooldown() {
    let mut world = solo_arena(vec![quiet_enemy(1, Vec2::new(400.0, 100.0), 50)]);
    let mut events = Vec::new();

    apply(&mut world, Command::Fire { player: PRIMARY }, &mut events);
    apply(&mut world, Command::Fire { player: PRIMARY }, &mut events);

    assert_eq!(query::player_projectile_count(&world), 1);
    assert_eq!(world.players[0].fire_timer, Duration::from_millis(400));
}

#[test]
fn fire_without_enemies_travels_straight_up() {
    let mut world = solo_arena(Vec::new());
    let mut events = Vec::new();

    apply(&mut world, Command::Fire { player: PRIMARY }, &mut events);

    assert_eq!(world.projectiles[0].direction, Vec2::new(0.0, -1.0));
    assert!(world.projectiles[0].target.is_none());
}

#[test]
fn invalid_player_indices_are_ignored() {
    let mut world = solo_arena(vec![quiet_enemy(1, Vec2::new(400.0, 100.0), 1)]);
    let mut events = Vec::new();

    apply(&mut world, Command::Fire { player: PlayerIndex::new(5) }, &mut events);
    apply(
        &mut world,
        Command::SetMovement {
            player: PlayerIndex::new(5),
            movement: Movement {
                left: true,
                ..Movement::IDLE
            },
        },
        &mut events,
    );
    apply(
        &mut world,
        Command::ActivateUltimate {
            player: PlayerIndex::new(5),
        },
        &mut events,
    );

    assert!(events.is_empty());
    assert_eq!(query::player_projectile_count(&world), 0);
}

#[test]
fn movement_is_normalized_and_clamped() {
    let mut world = solo_arena(vec![quiet_enemy(1, Vec2::new(100.0, 100.0), 1)]);
    let input = FrameInput {
        movement: vec![Movement {
            right: true,
            down: true,
            ..Movement::IDLE
        }],
        ..FrameInput::default()
    };
    let mut events = Vec::new();

    advance(&mut world, Duration::from_millis(100), &input, &mut events);
    let moved = world.players[0].position - Vec2::new(400.0, 300.0);
    assert!((moved.length() - 22.0).abs() < 1e-3);

    advance(&mut world, Duration::from_secs(10), &input, &mut events);
    assert_eq!(world.players[0].position, Vec2::new(792.0, 592.0));
}

#[test]
fn lobby_waits_for_threshold_participants() {
    let config = Config {
        auto_start: false,
        lobby_threshold: 3,
        ..Config::default()
    };
    let mut world = World::try_new(config).expect("valid config");
    let mut events = Vec::new();

    assert_eq!(query::run_state(&world), RunState::Lobby);
    assert_eq!(query::enemy_count(&world), 0);

    apply(&mut world, Command::Fire { player: PRIMARY }, &mut events);
    apply(&mut world, Command::Tick { dt: FRAME }, &mut events);
    assert_eq!(events, vec![Event::TimeAdvanced { dt: FRAME }]);
    assert_eq!(query::player_projectile_count(&world), 0);

    events.clear();
    let joins = FrameInput {
        joins: 2,
        ..FrameInput::default()
    };
    advance(&mut world, FRAME, &joins, &mut events);
    assert_eq!(query::run_state(&world), RunState::Lobby);
    assert_eq!(query::snapshot(&world).hud.lobby_participants, Some(2));

    events.clear();
    apply(&mut world, Command::Join, &mut events);
    assert_eq!(
        events,
        vec![
            Event::ParticipantJoined { participants: 3 },
            Event::RunStarted {
                wave: WaveNumber::FIRST
            },
        ]
    );
    assert_eq!(query::run_state(&world), RunState::Active);
    assert!(query::enemy_count(&world) > 0);

    events.clear();
    apply(&mut world, Command::Join, &mut events);
    assert!(events.is_empty());
}

#[test]
fn exit_finishes_run_from_any_phase() {
    let mut world = World::new();
    let mut events = Vec::new();

    apply(&mut world, Command::ExitToMenu, &mut events);
    assert_eq!(
        events,
        vec![Event::ReturnToMenu {
            reason: ExitReason::Requested
        }]
    );
    assert_eq!(query::run_state(&world), RunState::Finished);

    events.clear();
    let enemies = query::enemy_count(&world);
    apply(&mut world, Command::Tick { dt: FRAME }, &mut events);
    apply(&mut world, Command::ExitToMenu, &mut events);
    assert_eq!(events, vec![Event::TimeAdvanced { dt: FRAME }]);
    assert_eq!(query::enemy_count(&world), enemies);
}

#[test]
fn downed_partner_is_inert_until_everyone_falls() {
    let world = World::try_new(Config::two_players()).expect("valid config");
    let mut world = arena(world, vec![quiet_enemy(1, Vec2::new(100.0, 100.0), 1)]);
    world.players[1].hp = 0.0;
    let partner = PlayerIndex::new(1);
    let start = world.players[1].position;

    let input = FrameInput {
        movement: vec![
            Movement::IDLE,
            Movement {
                right: true,
                ..Movement::IDLE
            },
        ],
        fire: vec![partner],
        ..FrameInput::default()
    };
    let mut events = Vec::new();
    advance(&mut world, FRAME, &input, &mut events);

    assert_eq!(world.players[1].position, start);
    assert_eq!(query::player_projectile_count(&world), 0);
    assert_eq!(query::run_state(&world), RunState::Active);

    world.players[0].hp = 0.0;
    let events = tick(&mut world, FRAME);
    assert!(events.contains(&Event::PlayerDied));
    assert_eq!(query::run_state(&world), RunState::Dead);
}

#[test]
fn primary_player_rule_ends_run_on_first_death() {
    let config = Config {
        death_rule: DeathRule::PrimaryPlayer,
        ..Config::two_players()
    };
    let world = World::try_new(config).expect("valid config");
    let mut world = arena(world, vec![quiet_enemy(1, Vec2::new(100.0, 100.0), 1)]);
    world.players[0].hp = 0.0;

    let events = tick(&mut world, FRAME);

    assert!(events.contains(&Event::PlayerDied));
    assert_eq!(query::run_state(&world), RunState::Dead);
}

#[test]
fn starting_boss_wave_spawns_one_boss_per_player() {
    let config = Config {
        starting_wave: WaveNumber::new(5),
        ..Config::two_players()
    };
    let world = World::try_new(config).expect("valid config");

    let snapshot = query::snapshot(&world);
    assert_eq!(snapshot.wave, WaveNumber::new(5));
    assert_eq!(snapshot.bosses().count(), 2);
    assert!(snapshot
        .bosses()
        .all(|boss| boss.boss_phase == Some(BossPhase::First)));
    assert_eq!(snapshot.players[0].position, Vec2::new(200.0, 300.0));
    assert_eq!(snapshot.players[1].position, Vec2::new(600.0, 300.0));
}

#[test]
fn stale_homing_target_is_reacquired() {
    let mut world = solo_arena(vec![
        quiet_enemy(1, Vec2::new(400.0, 100.0), 5),
        quiet_enemy(2, Vec2::new(250.0, 300.0), 5),
    ]);
    let mut events = Vec::new();
    apply(&mut world, Command::Fire { player: PRIMARY }, &mut events);
    assert_eq!(world.projectiles[0].target, Some(EnemyId::new(2)));

    let _ = world.enemies.remove(1);
    let _ = tick(&mut world, FRAME);

    assert_eq!(world.projectiles[0].target, Some(EnemyId::new(1)));
}

#[test]
fn invalid_config_is_rejected() {
    let config = Config {
        participants: Vec::new(),
        ..Config::default()
    };
    assert!(World::try_new(config).is_err());
}

#[test]
fn huge_starting_wave_is_rejected_before_spawning() {
    let config = Config {
        starting_wave: WaveNumber::new(500_000_000),
        ..Config::default()
    };
    assert!(matches!(
        World::try_new(config),
        Err(crate::ConfigError::StartingWaveTooHigh { .. })
    ));
}
