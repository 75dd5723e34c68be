#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for the Wave Arena combat engine.
//!
//! The world owns every entity of a run. Hosts mutate it exclusively through
//! [`apply`] (or [`advance`] for a whole frame of intents) and observe it
//! through the read-only functions in [`query`].

mod combat;
mod config;
mod entities;
mod sequence;
mod tuning;

use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};
use wave_arena_core::{
    Command, EnemyId, EnemySpawn, Event, ExitReason, FrameInput, PlayerIndex, Progress, Vec2,
    WaveNumber,
};
use wave_arena_system_wave_director::WaveDirector;

pub use config::{Config, ConfigError, DeathRule, ParticipantConfig};

use entities::{Enemy, EnemyProjectile, Player, Projectile, VisualEffect};
use sequence::RunPhase;

/// Represents the authoritative state of a single combat run.
#[derive(Debug)]
pub struct World {
    players: Vec<Player>,
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    enemy_projectiles: Vec<EnemyProjectile>,
    effects: Vec<VisualEffect>,
    phase: RunPhase,
    wave: WaveNumber,
    progress: Progress,
    phase_banner: Duration,
    hurt_cooldown: Duration,
    death_rule: DeathRule,
    lobby_threshold: u32,
    next_enemy_id: u32,
    director: WaveDirector,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates a single-player run using the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_validated(Config::default())
    }

    /// Creates a run from the provided configuration after validating it.
    pub fn try_new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: Config) -> Self {
        let count = config.participants.len();
        let players = config
            .participants
            .iter()
            .enumerate()
            .map(|(slot, participant)| {
                Player::from_config(
                    PlayerIndex::new(slot),
                    spawn_position(slot, count),
                    participant,
                )
            })
            .collect();

        let mut world = Self {
            players,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            effects: Vec::new(),
            phase: RunPhase::Lobby { participants: 0 },
            wave: config.starting_wave,
            progress: config.progress,
            phase_banner: Duration::ZERO,
            hurt_cooldown: Duration::ZERO,
            death_rule: config.death_rule,
            lobby_threshold: config.lobby_threshold,
            next_enemy_id: 0,
            director: WaveDirector::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
        };

        if config.auto_start {
            world.phase = RunPhase::Active;
            world.start_wave();
        }
        world
    }

    /// Replaces the arena contents with the plan for the current wave.
    fn start_wave(&mut self) {
        let positions: Vec<Vec2> = self.players.iter().map(|player| player.position).collect();
        let plan = self
            .director
            .start_wave(self.wave, &positions, self.players.len(), &mut self.rng);

        self.projectiles.clear();
        self.enemy_projectiles.clear();
        self.enemies.clear();
        for spawn in plan.spawns() {
            self.spawn_enemy(spawn);
        }
        debug!(
            wave = self.wave.get(),
            kind = ?plan.kind(),
            enemies = self.enemies.len(),
            "wave started"
        );
    }

    fn advance_wave(&mut self, out_events: &mut Vec<Event>) {
        self.progress = self.progress.incremented();
        self.wave = self.wave.next();
        self.start_wave();
        out_events.push(Event::WaveAdvanced { wave: self.wave });
    }

    fn spawn_enemy(&mut self, spawn: &EnemySpawn) {
        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id = self.next_enemy_id.wrapping_add(1);
        self.enemies.push(Enemy::from_spawn(id, spawn));
    }

    fn join_lobby(&mut self, out_events: &mut Vec<Event>) {
        let RunPhase::Lobby { participants } = self.phase else {
            return;
        };
        let participants = participants.saturating_add(1);
        out_events.push(Event::ParticipantJoined { participants });

        if participants < self.lobby_threshold {
            self.phase = RunPhase::Lobby { participants };
            return;
        }

        self.phase = RunPhase::Active;
        self.start_wave();
        info!(wave = self.wave.get(), participants, "lobby closed, run started");
        out_events.push(Event::RunStarted { wave: self.wave });
    }

    fn exit_to_menu(&mut self, out_events: &mut Vec<Event>) {
        if self.phase == RunPhase::Finished {
            return;
        }
        self.phase = RunPhase::Finished;
        info!(wave = self.wave.get(), "run abandoned");
        out_events.push(Event::ReturnToMenu {
            reason: ExitReason::Requested,
        });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_position(slot: usize, count: usize) -> Vec2 {
    if count <= 1 {
        return tuning::SOLO_SPAWN;
    }
    tuning::DUO_SPAWNS
        .get(slot)
        .copied()
        .unwrap_or(tuning::SOLO_SPAWN)
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Join => world.join_lobby(out_events),
        Command::SetMovement { player, movement } => {
            if let Some(player) = world.players.get_mut(player.get()) {
                player.movement = movement;
            }
        }
        Command::Fire { player } => world.fire(player),
        Command::ActivateUltimate { player } => world.activate_ultimate(player, out_events),
        Command::ExitToMenu => world.exit_to_menu(out_events),
        Command::Tick { dt } => world.tick(dt, out_events),
    }
}

/// Applies a whole frame of intents followed by the frame tick.
pub fn advance(world: &mut World, dt: Duration, input: &FrameInput, out_events: &mut Vec<Event>) {
    let mut commands = Vec::new();
    input.commands(dt, &mut commands);
    for command in commands {
        apply(world, command, out_events);
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use wave_arena_core::{
        EffectSnapshot, EnemyProjectileSnapshot, EnemySnapshot, Hud, PlayerSnapshot,
        ProjectileSnapshot, Progress, RunState, WaveNumber, WorldSnapshot,
    };

    use super::{tuning, World};

    /// Captures an owned, read-only copy of everything presentation needs.
    #[must_use]
    pub fn snapshot(world: &World) -> WorldSnapshot {
        let players = world
            .players
            .iter()
            .map(|player| PlayerSnapshot {
                index: player.index,
                name: player.name.clone(),
                position: player.position,
                hp: player.hp,
                max_hp: player.max_hp,
                ultimate_fraction: player.ultimate_charge as f32 / tuning::ULTIMATE_MAX as f32,
                ultimate_active: player.ultimate_remaining.is_some(),
                weapon_power: player.weapon_power,
                bleeding: player.bleed.is_some(),
                fire_penalized: player.penalty.is_some(),
            })
            .collect();

        let enemies = world
            .enemies
            .iter()
            .map(|enemy| EnemySnapshot {
                id: enemy.id,
                position: enemy.position,
                hp_fraction: enemy.hp.max(0) as f32 / enemy.max_hp as f32,
                speed: enemy.speed,
                boss_phase: enemy.boss_phase(),
            })
            .collect();

        let projectiles = world
            .projectiles
            .iter()
            .map(|projectile| ProjectileSnapshot {
                position: projectile.position,
                owner: projectile.owner,
                ultimate: projectile.ultimate,
            })
            .collect();

        let enemy_projectiles = world
            .enemy_projectiles
            .iter()
            .map(|shot| EnemyProjectileSnapshot {
                position: shot.position,
                kind: shot.kind,
            })
            .collect();

        let effects = world
            .effects
            .iter()
            .map(|effect| EffectSnapshot {
                kind: effect.kind,
                position: effect.position,
                remaining: effect.remaining,
                radius: effect.radius,
            })
            .collect();

        let mut hud = Hud {
            phase_banner: (!world.phase_banner.is_zero()).then_some(world.phase_banner),
            ..Hud::default()
        };
        world.phase.fill_hud(&mut hud);

        WorldSnapshot {
            run_state: world.phase.run_state(),
            wave: world.wave,
            progress: world.progress,
            hud,
            players,
            enemies,
            projectiles,
            enemy_projectiles,
            effects,
        }
    }

    /// Coarse state of the run.
    #[must_use]
    pub fn run_state(world: &World) -> RunState {
        world.phase.run_state()
    }

    /// Current wave number.
    #[must_use]
    pub fn wave(world: &World) -> WaveNumber {
        world.wave
    }

    /// Progress counter to persist between sessions.
    #[must_use]
    pub fn progress(world: &World) -> Progress {
        world.progress
    }

    /// Number of live player projectiles.
    #[must_use]
    pub fn player_projectile_count(world: &World) -> usize {
        world.projectiles.len()
    }

    /// Number of live enemies, bosses included.
    #[must_use]
    pub fn enemy_count(world: &World) -> usize {
        world.enemies.len()
    }
}

#[cfg(test)]
mod tests;
