#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Wave Arena combat engine.
//!
//! This crate defines the message surface that connects hosts, the
//! authoritative world, and pure systems. Hosts submit [`Command`] values
//! describing player intents, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing
//! lifecycle changes. Presentation reads an owned [`WorldSnapshot`] and never
//! touches the world's entity collections.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod geometry;

pub use geometry::Bounds;
pub use glam::Vec2;

/// Width of the playfield measured in world units.
pub const PLAYFIELD_WIDTH: f32 = 800.0;
/// Height of the playfield measured in world units.
pub const PLAYFIELD_HEIGHT: f32 = 600.0;

/// Region players are clamped to.
pub const PLAYER_BOUNDS: Bounds = Bounds::new(8.0, 8.0, 792.0, 592.0);
/// Region enemies bounce inside.
pub const ENEMY_BOUNDS: Bounds = Bounds::new(20.0, 20.0, 780.0, 580.0);
/// Player projectiles leaving this region are discarded.
pub const PROJECTILE_BOUNDS: Bounds = Bounds::new(-10.0, -10.0, 810.0, 610.0);
/// Enemy projectiles leaving this region are discarded.
pub const ENEMY_PROJECTILE_BOUNDS: Bounds = Bounds::new(-20.0, -20.0, 820.0, 620.0);

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Adds a simulated participant while the run waits in the lobby.
    Join,
    /// Replaces the held movement directions of a player.
    SetMovement {
        /// Player whose movement state changes.
        player: PlayerIndex,
        /// Directions currently held by the player.
        movement: Movement,
    },
    /// Requests a single shot from the player's weapon.
    Fire {
        /// Player pulling the trigger.
        player: PlayerIndex,
    },
    /// Requests activation of the player's ultimate ability.
    ActivateUltimate {
        /// Player attempting the activation.
        player: PlayerIndex,
    },
    /// Abandons the run and hands control back to the menu.
    ExitToMenu,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a simulated participant joined the lobby.
    ParticipantJoined {
        /// Number of participants gathered so far.
        participants: u32,
    },
    /// Announces that the lobby closed and combat began.
    RunStarted {
        /// Wave spawned as the run started.
        wave: WaveNumber,
    },
    /// Announces that a new wave was spawned after the previous one ended.
    WaveAdvanced {
        /// Number of the freshly spawned wave.
        wave: WaveNumber,
    },
    /// Reports that a boss survived a lethal hit by entering its second phase.
    BossPhaseChanged {
        /// Boss that changed phase.
        boss: EnemyId,
    },
    /// Reports that a boss was defeated in its final phase.
    BossSlain {
        /// Boss that was removed.
        boss: EnemyId,
        /// Position where the boss fell.
        position: Vec2,
    },
    /// Confirms that a player unleashed their ultimate ability.
    UltimateActivated {
        /// Player that activated the ultimate.
        player: PlayerIndex,
    },
    /// Reports that the run was lost.
    PlayerDied,
    /// Requests that the host leave the combat scene.
    ReturnToMenu {
        /// Why the run ended.
        reason: ExitReason,
    },
}

/// Reasons a run hands control back to the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ExitReason {
    /// The host requested the exit.
    Requested,
    /// The death message finished displaying.
    Defeated,
}

/// Directions held by a player during the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Movement {
    /// Movement toward decreasing x.
    pub left: bool,
    /// Movement toward increasing x.
    pub right: bool,
    /// Movement toward decreasing y.
    pub up: bool,
    /// Movement toward increasing y.
    pub down: bool,
}

impl Movement {
    /// Movement with no directions held.
    pub const IDLE: Self = Self {
        left: false,
        right: false,
        up: false,
        down: false,
    };

    /// Raw axis vector of the held directions; opposing keys cancel out.
    #[must_use]
    pub fn axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.left {
            axis.x -= 1.0;
        }
        if self.right {
            axis.x += 1.0;
        }
        if self.up {
            axis.y -= 1.0;
        }
        if self.down {
            axis.y += 1.0;
        }
        axis
    }
}

/// Intents gathered by the host for a single frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Simulated participants that joined the lobby this frame.
    pub joins: u32,
    /// Held directions per player, indexed by player slot.
    pub movement: Vec<Movement>,
    /// Players that pressed fire this frame.
    pub fire: Vec<PlayerIndex>,
    /// Players that pressed the ultimate key this frame.
    pub activate_ultimate: Vec<PlayerIndex>,
    /// Whether the host asked to leave the run.
    pub exit_to_menu: bool,
}

impl FrameInput {
    /// Expands the intents into commands, finishing with the frame tick.
    pub fn commands(&self, dt: Duration, out: &mut Vec<Command>) {
        out.extend((0..self.joins).map(|_| Command::Join));
        out.extend(
            self.movement
                .iter()
                .enumerate()
                .map(|(index, movement)| Command::SetMovement {
                    player: PlayerIndex::new(index),
                    movement: *movement,
                }),
        );
        out.extend(self.fire.iter().map(|player| Command::Fire { player: *player }));
        out.extend(
            self.activate_ultimate
                .iter()
                .map(|player| Command::ActivateUltimate { player: *player }),
        );
        if self.exit_to_menu {
            out.push(Command::ExitToMenu);
        }
        out.push(Command::Tick { dt });
    }
}

/// Slot of a participant in the combat session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PlayerIndex(usize);

impl PlayerIndex {
    /// Index of the primary player.
    pub const PRIMARY: Self = Self(0);

    /// Creates a new player index.
    #[must_use]
    pub const fn new(value: usize) -> Self {
        Self(value)
    }

    /// Retrieves the numeric slot.
    #[must_use]
    pub const fn get(&self) -> usize {
        self.0
    }
}

/// Unique handle assigned to an enemy; never reused within a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Number of a wave within the run, starting at one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaveNumber(u32);

impl WaveNumber {
    /// Opening wave of a fresh run.
    pub const FIRST: Self = Self(1);

    /// Every wave divisible by this interval is a boss wave.
    pub const BOSS_INTERVAL: u32 = 5;

    /// Creates a wave number wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying wave number.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Wave that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Number of waves elapsed before this one (`wave - 1`).
    #[must_use]
    pub const fn elapsed(self) -> u32 {
        self.0.saturating_sub(1)
    }

    /// Reports whether this wave spawns bosses instead of regular enemies.
    #[must_use]
    pub const fn is_boss_wave(self) -> bool {
        self.0 % Self::BOSS_INTERVAL == 0
    }
}

/// Opaque counter persisted by the host between sessions.
///
/// The combat core increments it once per cleared wave.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Progress(u64);

impl Progress {
    /// Creates a progress counter with the provided value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the counter value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Counter advanced by one cleared wave.
    #[must_use]
    pub const fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Phase of a boss encounter; only ever advances from first to second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BossPhase {
    /// Opening phase with minion summons.
    First,
    /// Enraged phase with faster special attacks and no summons.
    Second,
}

impl BossPhase {
    /// Human-facing phase number (1 or 2).
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }
}

/// Whether a wave spawns regular enemies or bosses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WaveKind {
    /// Cluster of regular enemies.
    Regular,
    /// One boss per participant, up to two.
    Boss,
}

/// Behaviour attached to a spawned enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpawnKind {
    /// Regular enemy that fires aimed shots.
    Regular,
    /// Boss with summon and special-attack timers.
    Boss {
        /// Delay before the first minion summon.
        summon_delay: Duration,
        /// Delay before the first radial special attack.
        special_delay: Duration,
    },
}

/// Description of a single enemy to place into the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySpawn {
    /// Spawn location, already inside [`ENEMY_BOUNDS`].
    pub position: Vec2,
    /// Initial velocity in world units per second.
    pub velocity: Vec2,
    /// Base speed rolled for the enemy.
    pub speed: f32,
    /// Starting and maximum hit points.
    pub hp: i32,
    /// Delay before the enemy's first shot.
    pub fire_delay: Duration,
    /// Regular or boss behaviour.
    pub kind: SpawnKind,
}

/// Enemies selected for a wave.
#[derive(Clone, Debug, PartialEq)]
pub struct WavePlan {
    wave: WaveNumber,
    kind: WaveKind,
    spawns: Vec<EnemySpawn>,
}

impl WavePlan {
    /// Creates a plan for the provided wave.
    #[must_use]
    pub fn new(wave: WaveNumber, kind: WaveKind, spawns: Vec<EnemySpawn>) -> Self {
        Self { wave, kind, spawns }
    }

    /// Wave the plan was generated for.
    #[must_use]
    pub const fn wave(&self) -> WaveNumber {
        self.wave
    }

    /// Whether the plan spawns regular enemies or bosses.
    #[must_use]
    pub const fn kind(&self) -> WaveKind {
        self.kind
    }

    /// Enemies to spawn, in placement order.
    #[must_use]
    pub fn spawns(&self) -> &[EnemySpawn] {
        &self.spawns
    }

    /// Consumes the plan, yielding the spawn list.
    #[must_use]
    pub fn into_spawns(self) -> Vec<EnemySpawn> {
        self.spawns
    }
}

/// Coarse run state exposed to hosts for scene decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RunState {
    /// Waiting for participants; nothing is simulated.
    Lobby,
    /// Normal wave combat.
    Active,
    /// Boss-slain banner or the pause before the next wave.
    BossSequence,
    /// Death message is showing.
    Dead,
    /// The run ended; the host should leave the scene.
    Finished,
}

/// Immutable representation of a single player used for presentation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    /// Slot of the player.
    pub index: PlayerIndex,
    /// Display name shown above the player.
    pub name: String,
    /// Current position.
    pub position: Vec2,
    /// Remaining hit points.
    pub hp: f32,
    /// Maximum hit points.
    pub max_hp: f32,
    /// Ultimate charge as a fraction of its maximum.
    pub ultimate_fraction: f32,
    /// Whether the ultimate is currently active.
    pub ultimate_active: bool,
    /// Damage multiplier applied to the player's projectiles.
    pub weapon_power: f32,
    /// Whether a bleed is ticking on the player.
    pub bleeding: bool,
    /// Whether a fire-rate penalty is active.
    pub fire_penalized: bool,
}

/// Immutable representation of a single enemy used for presentation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnemySnapshot {
    /// Handle of the enemy.
    pub id: EnemyId,
    /// Current position.
    pub position: Vec2,
    /// Remaining hit points as a fraction of the maximum.
    pub hp_fraction: f32,
    /// Base speed rolled at spawn.
    pub speed: f32,
    /// Phase of the boss, `None` for regular enemies.
    pub boss_phase: Option<BossPhase>,
}

impl EnemySnapshot {
    /// Reports whether the enemy is a boss.
    #[must_use]
    pub const fn is_boss(&self) -> bool {
        self.boss_phase.is_some()
    }
}

/// Immutable representation of a player projectile.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProjectileSnapshot {
    /// Current position.
    pub position: Vec2,
    /// Player that fired the projectile.
    pub owner: PlayerIndex,
    /// Whether the projectile belongs to an ultimate burst.
    pub ultimate: bool,
}

/// Families of enemy projectiles, used to pick visuals and damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum EnemyProjectileKind {
    /// Straight shot fired by a regular enemy.
    Regular,
    /// Briefly homing shot fired by a boss.
    Boss,
    /// Radial boss shot carrying a debuff payload.
    Special,
}

/// Immutable representation of an enemy projectile.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnemyProjectileSnapshot {
    /// Current position.
    pub position: Vec2,
    /// Family the projectile belongs to.
    pub kind: EnemyProjectileKind,
}

/// Cosmetic effect families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum EffectKind {
    /// Expanding blast left behind by a slain boss.
    Explosion,
}

/// Immutable representation of a visual effect.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EffectSnapshot {
    /// Effect family.
    pub kind: EffectKind,
    /// Centre of the effect.
    pub position: Vec2,
    /// Display time left before the effect disappears.
    pub remaining: Duration,
    /// Base radius of the effect.
    pub radius: f32,
}

/// Counters and banners shown on the heads-up display.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Hud {
    /// Time left on the "phase 2" banner, if showing.
    pub phase_banner: Option<Duration>,
    /// Time left on the "boss slain" banner, if showing.
    pub boss_slain_banner: Option<Duration>,
    /// Time left before the next wave after a boss, if pausing.
    pub next_wave_in: Option<Duration>,
    /// Time left on the death message, if showing.
    pub death_message: Option<Duration>,
    /// Participants gathered while in the lobby.
    pub lobby_participants: Option<u32>,
}

/// Owned, read-only copy of the world used by presentation layers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WorldSnapshot {
    /// Coarse run state.
    pub run_state: RunState,
    /// Current wave number.
    pub wave: WaveNumber,
    /// Persisted progress counter.
    pub progress: Progress,
    /// Banners and counters.
    pub hud: Hud,
    /// Players in slot order.
    pub players: Vec<PlayerSnapshot>,
    /// Live enemies in spawn order.
    pub enemies: Vec<EnemySnapshot>,
    /// Live player projectiles.
    pub projectiles: Vec<ProjectileSnapshot>,
    /// Live enemy projectiles.
    pub enemy_projectiles: Vec<EnemyProjectileSnapshot>,
    /// Active visual effects.
    pub effects: Vec<EffectSnapshot>,
}

impl WorldSnapshot {
    /// Iterator over the bosses currently alive.
    pub fn bosses(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.enemies.iter().filter(|enemy| enemy.is_boss())
    }
}
