//! Entity records owned by the world.

use std::time::Duration;

use wave_arena_core::{
    BossPhase, EffectKind, EnemyId, EnemyProjectileKind, EnemySpawn, Movement, PlayerIndex,
    SpawnKind, Vec2, PLAYER_BOUNDS,
};

use crate::{config::ParticipantConfig, tuning};

/// Damage over time applied by special boss shots.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Bleed {
    pub(crate) dps: f32,
    pub(crate) remaining: Duration,
}

/// Extra fire cooldown applied by special boss shots.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CooldownPenalty {
    pub(crate) amount: Duration,
    pub(crate) remaining: Duration,
}

/// Debuffs carried by an enemy projectile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Payload {
    pub(crate) bleed: Bleed,
    pub(crate) penalty: CooldownPenalty,
}

impl Payload {
    pub(crate) const SPECIAL: Self = Self {
        bleed: Bleed {
            dps: tuning::BLEED_DPS,
            remaining: tuning::BLEED_DURATION,
        },
        penalty: CooldownPenalty {
            amount: tuning::COOLDOWN_PENALTY,
            remaining: tuning::COOLDOWN_PENALTY_DURATION,
        },
    };
}

#[derive(Clone, Debug)]
pub(crate) struct Player {
    pub(crate) index: PlayerIndex,
    pub(crate) name: String,
    pub(crate) position: Vec2,
    pub(crate) movement: Movement,
    pub(crate) fire_timer: Duration,
    pub(crate) hp: f32,
    pub(crate) max_hp: f32,
    pub(crate) weapon_power: f32,
    pub(crate) ultimate_charge: u32,
    pub(crate) ultimate_remaining: Option<Duration>,
    pub(crate) bleed: Option<Bleed>,
    pub(crate) penalty: Option<CooldownPenalty>,
}

impl Player {
    pub(crate) fn from_config(index: PlayerIndex, position: Vec2, config: &ParticipantConfig) -> Self {
        Self {
            index,
            name: config.name.clone(),
            position: PLAYER_BOUNDS.clamp(position),
            movement: Movement::IDLE,
            fire_timer: Duration::ZERO,
            hp: config.starting_hp(),
            max_hp: config.max_hp,
            weapon_power: config.weapon_power,
            ultimate_charge: 0,
            ultimate_remaining: None,
            bleed: None,
            penalty: None,
        }
    }

    /// Downed players stay in the roster but take no further part in combat.
    pub(crate) fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    pub(crate) fn take_damage(&mut self, amount: f32) {
        self.hp = (self.hp - amount).max(0.0);
    }

    pub(crate) fn heal(&mut self, amount: f32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    pub(crate) fn add_ultimate_charge(&mut self, amount: u32) {
        self.ultimate_charge = self
            .ultimate_charge
            .saturating_add(amount)
            .min(tuning::ULTIMATE_MAX);
    }

    pub(crate) fn fire_cooldown(&self) -> Duration {
        let penalty = self.penalty.map_or(Duration::ZERO, |penalty| penalty.amount);
        tuning::FIRE_COOLDOWN.saturating_add(penalty)
    }

    /// Applies a debuff payload, keeping whichever remaining time is longer.
    pub(crate) fn apply_payload(&mut self, payload: Payload) {
        self.bleed = Some(match self.bleed {
            Some(current) => Bleed {
                dps: payload.bleed.dps,
                remaining: current.remaining.max(payload.bleed.remaining),
            },
            None => payload.bleed,
        });
        self.penalty = Some(match self.penalty {
            Some(current) => CooldownPenalty {
                amount: payload.penalty.amount,
                remaining: current.remaining.max(payload.penalty.remaining),
            },
            None => payload.penalty,
        });
    }

    /// Advances the cooldown, ultimate and debuff timers by `dt`.
    pub(crate) fn advance_timers(&mut self, dt: Duration) {
        self.fire_timer = self.fire_timer.saturating_sub(dt);

        if let Some(remaining) = self.ultimate_remaining {
            let remaining = remaining.saturating_sub(dt);
            self.ultimate_remaining = (!remaining.is_zero()).then_some(remaining);
        }

        if let Some(bleed) = self.bleed.as_mut() {
            let hp = (self.hp - bleed.dps * dt.as_secs_f32()).max(0.0);
            self.hp = hp;
            bleed.remaining = bleed.remaining.saturating_sub(dt);
            if bleed.remaining.is_zero() {
                self.bleed = None;
            }
        }

        if let Some(penalty) = self.penalty.as_mut() {
            penalty.remaining = penalty.remaining.saturating_sub(dt);
            if penalty.remaining.is_zero() {
                self.penalty = None;
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct BossState {
    pub(crate) phase: BossPhase,
    pub(crate) summon_timer: Option<Duration>,
    pub(crate) special_timer: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum EnemyKind {
    Regular,
    Boss(BossState),
}

#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) speed: f32,
    pub(crate) hp: i32,
    pub(crate) max_hp: i32,
    pub(crate) fire_timer: Duration,
    pub(crate) kind: EnemyKind,
}

impl Enemy {
    pub(crate) fn from_spawn(id: EnemyId, spawn: &EnemySpawn) -> Self {
        let kind = match spawn.kind {
            SpawnKind::Regular => EnemyKind::Regular,
            SpawnKind::Boss {
                summon_delay,
                special_delay,
            } => EnemyKind::Boss(BossState {
                phase: BossPhase::First,
                summon_timer: Some(summon_delay),
                special_timer: special_delay,
            }),
        };
        Self {
            id,
            position: spawn.position,
            velocity: spawn.velocity,
            speed: spawn.speed,
            hp: spawn.hp,
            max_hp: spawn.hp.max(1),
            fire_timer: spawn.fire_delay,
            kind,
        }
    }

    pub(crate) fn boss_phase(&self) -> Option<BossPhase> {
        match self.kind {
            EnemyKind::Regular => None,
            EnemyKind::Boss(state) => Some(state.phase),
        }
    }

    pub(crate) fn is_boss(&self) -> bool {
        matches!(self.kind, EnemyKind::Boss(_))
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    pub(crate) position: Vec2,
    pub(crate) direction: Vec2,
    pub(crate) speed: f32,
    pub(crate) target: Option<EnemyId>,
    pub(crate) owner: PlayerIndex,
    pub(crate) ultimate: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct EnemyProjectile {
    pub(crate) position: Vec2,
    pub(crate) direction: Vec2,
    pub(crate) speed: f32,
    pub(crate) kind: EnemyProjectileKind,
    pub(crate) homing: Duration,
    pub(crate) payload: Option<Payload>,
}

impl EnemyProjectile {
    pub(crate) fn damage(&self) -> f32 {
        match self.kind {
            EnemyProjectileKind::Regular => tuning::REGULAR_SHOT_DAMAGE,
            EnemyProjectileKind::Boss | EnemyProjectileKind::Special => tuning::HEAVY_SHOT_DAMAGE,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct VisualEffect {
    pub(crate) kind: EffectKind,
    pub(crate) position: Vec2,
    pub(crate) remaining: Duration,
    pub(crate) radius: f32,
}

impl VisualEffect {
    pub(crate) fn explosion(position: Vec2) -> Self {
        Self {
            kind: EffectKind::Explosion,
            position,
            remaining: tuning::EXPLOSION_DURATION,
            radius: tuning::EXPLOSION_RADIUS,
        }
    }
}
