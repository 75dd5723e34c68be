//! Gameplay constants for the combat simulator.

use std::time::Duration;

use wave_arena_core::Vec2;

pub(crate) const DEFAULT_SEED: u64 = 0x5eed_a7e4_a0c0_1d15;
pub(crate) const LOBBY_THRESHOLD: u32 = 30;
pub(crate) const MAX_PARTICIPANTS: usize = 2;
pub(crate) const MAX_STARTING_WAVE: u32 = 1_000;

pub(crate) const SOLO_SPAWN: Vec2 = Vec2::new(400.0, 300.0);
pub(crate) const DUO_SPAWNS: [Vec2; 2] = [Vec2::new(200.0, 300.0), Vec2::new(600.0, 300.0)];

pub(crate) const PLAYER_SPEED: f32 = 220.0;
pub(crate) const PLAYER_MAX_HP: f32 = 100.0;
pub(crate) const FIRE_COOLDOWN: Duration = Duration::from_millis(400);

pub(crate) const ULTIMATE_MAX: u32 = 100;
pub(crate) const ULTIMATE_CHARGE_PER_KILL: u32 = 20;
pub(crate) const ULTIMATE_DURATION: Duration = Duration::from_secs(3);
pub(crate) const ULTIMATE_BURST: usize = 12;

pub(crate) const PROJECTILE_SPEED: f32 = 200.0;
pub(crate) const ULTIMATE_PROJECTILE_SPEED: f32 = 320.0;
pub(crate) const PROJECTILE_CAP: usize = 20;
pub(crate) const PROJECTILE_TURN_RATE: f32 = 6.0;
pub(crate) const PROJECTILE_HIT_RADIUS: f32 = 14.0;
pub(crate) const PROJECTILE_DAMAGE: f32 = 1.0;
pub(crate) const ULTIMATE_PROJECTILE_DAMAGE: f32 = 5.0;

pub(crate) const REGULAR_SHOT_SPEED: f32 = 140.0;
pub(crate) const BOSS_SHOT_SPEED: f32 = 160.0;
pub(crate) const SPECIAL_SHOT_SPEED: f32 = 180.0;
pub(crate) const BOSS_SHOT_GRACE: Duration = Duration::from_secs(1);
pub(crate) const ENEMY_SHOT_TURN_RATE: f32 = 4.0;
pub(crate) const ENEMY_SHOT_HIT_RADIUS: f32 = 12.0;
pub(crate) const REGULAR_SHOT_DAMAGE: f32 = 2.0;
pub(crate) const HEAVY_SHOT_DAMAGE: f32 = 20.0;

pub(crate) const BOSS_FIRE_INTERVAL: Duration = Duration::from_millis(500);
pub(crate) const BOSS_SUMMON_INTERVAL: Duration = Duration::from_secs(20);
pub(crate) const SPECIAL_SPREAD: usize = 8;
pub(crate) const SPECIAL_BASE_INTERVAL: f32 = 5.0;
pub(crate) const SPECIAL_MIN_INTERVAL: f32 = 3.0;
pub(crate) const SPECIAL_INTERVAL_STEP: f32 = 0.1;
pub(crate) const SPECIAL_PHASE_TWO_DELAY: Duration = Duration::from_secs(3);

pub(crate) const BLEED_DPS: f32 = 3.0;
pub(crate) const BLEED_DURATION: Duration = Duration::from_secs(3);
pub(crate) const COOLDOWN_PENALTY: Duration = Duration::from_millis(250);
pub(crate) const COOLDOWN_PENALTY_DURATION: Duration = Duration::from_secs(5);

pub(crate) const BOSS_PHASE_HP_LOSS: i32 = 10;
pub(crate) const BOSS_PHASE_MIN_HP: i32 = 8;
pub(crate) const PHASE_BANNER: Duration = Duration::from_secs(3);
pub(crate) const BOSS_WEAPON_POWER_BONUS: f32 = 0.5;

pub(crate) const EXPLOSION_DURATION: Duration = Duration::from_millis(600);
pub(crate) const EXPLOSION_RADIUS: f32 = 8.0;

pub(crate) const HURT_COOLDOWN: Duration = Duration::from_secs(1);
pub(crate) const CONTACT_RADIUS: f32 = 20.0;
pub(crate) const CONTACT_DAMAGE: f32 = 10.0;
pub(crate) const KNOCKBACK: f32 = 10.0;

pub(crate) const BOSS_SLAIN_DISPLAY: Duration = Duration::from_secs(3);
pub(crate) const POST_BOSS_PAUSE: Duration = Duration::from_secs(5);
pub(crate) const DEATH_MESSAGE: Duration = Duration::from_millis(1500);

/// Interval between boss special attacks at the provided wave.
pub(crate) fn special_interval(elapsed_waves: u32) -> Duration {
    let seconds = (SPECIAL_BASE_INTERVAL - elapsed_waves as f32 * SPECIAL_INTERVAL_STEP)
        .max(SPECIAL_MIN_INTERVAL);
    Duration::from_secs_f32(seconds)
}
