#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave director that decides which enemies enter the arena.
//!
//! The director owns no randomness of its own: every roll is drawn from the
//! generator supplied by the caller so the world can replay a seeded run
//! exactly.

use std::{f32::consts::TAU, ops::RangeInclusive, time::Duration};

use rand::Rng;
use wave_arena_core::{
    EnemySpawn, SpawnKind, Vec2, WaveKind, WaveNumber, WavePlan, ENEMY_BOUNDS,
};

const SPAWN_EDGE_COLUMNS: [f32; 2] = [80.0, 720.0];
const SPAWN_X: RangeInclusive<f32> = 80.0..=720.0;
const SPAWN_Y: RangeInclusive<f32> = 80.0..=520.0;

const REGULAR_COUNT: RangeInclusive<u32> = 8..=12;
const REGULAR_COUNT_STEP: u32 = 4;
const MAX_REGULAR_COUNT: u32 = 512;
const REGULAR_HP_STEP: u32 = 3;
const REGULAR_VELOCITY: RangeInclusive<f32> = -24.0..=24.0;
const REGULAR_SPEED: RangeInclusive<f32> = 24.0..=48.0;
const REGULAR_FIRE_DELAY: RangeInclusive<f32> = 1.0..=3.0;
const SPEED_SCALE_PER_WAVE: f32 = 0.03;

const CLUSTER_ATTEMPTS: usize = 16;
const CLUSTER_MIN_DISTANCE: f32 = 160.0;
const CLUSTER_RADIUS: RangeInclusive<f32> = 20.0..=100.0;

const MINION_COUNT: usize = 5;
const MINION_RADIUS: RangeInclusive<f32> = 24.0..=64.0;

const BOSS_VELOCITY: RangeInclusive<f32> = -40.0..=40.0;
const BOSS_HP_PER_WAVE: i32 = 5;
const BOSS_SUMMON_DELAY: Duration = Duration::from_secs(20);

/// Stat line of one of the two boss slots.
#[derive(Clone, Copy, Debug)]
struct BossProfile {
    base_hp: i32,
    fire_delay: Duration,
    special_delay: Duration,
}

const PRIMARY_BOSS: BossProfile = BossProfile {
    base_hp: 40,
    fire_delay: Duration::from_millis(800),
    special_delay: Duration::from_secs(5),
};

const SECONDARY_BOSS: BossProfile = BossProfile {
    base_hp: 36,
    fire_delay: Duration::from_secs(1),
    special_delay: Duration::from_secs(6),
};

/// Pure system that rolls wave compositions and boss summons.
#[derive(Clone, Copy, Debug, Default)]
pub struct WaveDirector;

impl WaveDirector {
    /// Creates a new wave director.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Rolls the enemies that make up the provided wave.
    ///
    /// Every fifth wave spawns one boss per participant (at most two) and no
    /// regular enemies. Other waves spawn a cluster of regular enemies placed
    /// away from the primary player, whose position is the first entry of
    /// `player_positions`. Regular waves are capped at 512 enemies and hit
    /// points saturate instead of overflowing on extreme wave numbers.
    pub fn start_wave<R>(
        &self,
        wave: WaveNumber,
        player_positions: &[Vec2],
        player_count: usize,
        rng: &mut R,
    ) -> WavePlan
    where
        R: Rng + ?Sized,
    {
        if wave.is_boss_wave() {
            let mut spawns = vec![boss_spawn(wave, PRIMARY_BOSS, rng)];
            if player_count > 1 {
                spawns.push(boss_spawn(wave, SECONDARY_BOSS, rng));
            }
            return WavePlan::new(wave, WaveKind::Boss, spawns);
        }

        let elapsed = wave.elapsed();
        let count = rng
            .gen_range(REGULAR_COUNT)
            .saturating_add(elapsed / REGULAR_COUNT_STEP)
            .min(MAX_REGULAR_COUNT);
        let centre = cluster_centre(player_positions.first().copied(), rng);
        let speed_scale = 1.0 + elapsed as f32 * SPEED_SCALE_PER_WAVE;
        let hp = saturating_i32(elapsed / REGULAR_HP_STEP).saturating_add(1);

        let spawns = (0..count)
            .map(|_| {
                let offset = polar_offset(CLUSTER_RADIUS, rng);
                regular_spawn(centre + offset, hp, speed_scale, rng)
            })
            .collect();

        WavePlan::new(wave, WaveKind::Regular, spawns)
    }

    /// Rolls the minions a boss summons around its position.
    pub fn summon_minions<R>(&self, center: Vec2, rng: &mut R) -> Vec<EnemySpawn>
    where
        R: Rng + ?Sized,
    {
        (0..MINION_COUNT)
            .map(|_| {
                let offset = polar_offset(MINION_RADIUS, rng);
                regular_spawn(center + offset, 1, 1.0, rng)
            })
            .collect()
    }

    /// Rolls the delay before a regular enemy fires again.
    pub fn regular_fire_delay<R>(&self, rng: &mut R) -> Duration
    where
        R: Rng + ?Sized,
    {
        Duration::from_secs_f32(rng.gen_range(REGULAR_FIRE_DELAY))
    }
}

fn boss_spawn<R>(wave: WaveNumber, profile: BossProfile, rng: &mut R) -> EnemySpawn
where
    R: Rng + ?Sized,
{
    let position = edge_position(rng);
    let velocity = Vec2::new(rng.gen_range(BOSS_VELOCITY), rng.gen_range(BOSS_VELOCITY));
    let hp = saturating_i32(wave.elapsed())
        .saturating_mul(BOSS_HP_PER_WAVE)
        .saturating_add(profile.base_hp);

    EnemySpawn {
        position: ENEMY_BOUNDS.clamp(position),
        velocity,
        speed: 0.0,
        hp,
        fire_delay: profile.fire_delay,
        kind: SpawnKind::Boss {
            summon_delay: BOSS_SUMMON_DELAY,
            special_delay: profile.special_delay,
        },
    }
}

fn regular_spawn<R>(position: Vec2, hp: i32, speed_scale: f32, rng: &mut R) -> EnemySpawn
where
    R: Rng + ?Sized,
{
    let velocity = Vec2::new(
        rng.gen_range(REGULAR_VELOCITY),
        rng.gen_range(REGULAR_VELOCITY),
    ) * speed_scale;
    let speed = rng.gen_range(REGULAR_SPEED) * speed_scale;
    let fire_delay = Duration::from_secs_f32(rng.gen_range(REGULAR_FIRE_DELAY));

    EnemySpawn {
        position: ENEMY_BOUNDS.clamp(position),
        velocity,
        speed,
        hp,
        fire_delay,
        kind: SpawnKind::Regular,
    }
}

fn cluster_centre<R>(primary: Option<Vec2>, rng: &mut R) -> Vec2
where
    R: Rng + ?Sized,
{
    for _ in 0..CLUSTER_ATTEMPTS {
        let candidate = Vec2::new(rng.gen_range(SPAWN_X), rng.gen_range(SPAWN_Y));
        match primary {
            Some(player) if candidate.distance(player) <= CLUSTER_MIN_DISTANCE => {}
            _ => return candidate,
        }
    }
    edge_position(rng)
}

fn edge_position<R>(rng: &mut R) -> Vec2
where
    R: Rng + ?Sized,
{
    let column = SPAWN_EDGE_COLUMNS[rng.gen_range(0..SPAWN_EDGE_COLUMNS.len())];
    Vec2::new(column, rng.gen_range(SPAWN_Y))
}

fn saturating_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn polar_offset<R>(radius: RangeInclusive<f32>, rng: &mut R) -> Vec2
where
    R: Rng + ?Sized,
{
    let angle = rng.gen_range(0.0..TAU);
    let distance = rng.gen_range(radius);
    Vec2::new(angle.cos(), angle.sin()) * distance
}
