//! Run configuration accepted when the combat scene is entered.

use serde::Deserialize;
use thiserror::Error;
use wave_arena_core::{Progress, WaveNumber};

use crate::tuning;

/// Decides which player deaths end the run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathRule {
    /// The run ends as soon as the primary player falls.
    PrimaryPlayer,
    /// The run ends once every participant has fallen.
    #[default]
    AllPlayers,
}

/// Stats a participant brings into the run.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParticipantConfig {
    /// Display name shown above the player.
    pub name: String,
    /// Maximum hit points.
    pub max_hp: f32,
    /// Starting hit points; defaults to `max_hp` when omitted.
    pub hp: Option<f32>,
    /// Damage multiplier applied to the player's projectiles.
    pub weapon_power: f32,
}

impl ParticipantConfig {
    /// Creates a participant at full health with default stats.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Hit points the participant starts the run with.
    #[must_use]
    pub fn starting_hp(&self) -> f32 {
        self.hp.unwrap_or(self.max_hp)
    }
}

impl Default for ParticipantConfig {
    fn default() -> Self {
        Self {
            name: String::from("Player1"),
            max_hp: tuning::PLAYER_MAX_HP,
            hp: None,
            weapon_power: 1.0,
        }
    }
}

/// Parameters used to construct a [`crate::World`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed for the world's random number generator.
    pub seed: u64,
    /// Whether combat begins immediately instead of waiting in the lobby.
    pub auto_start: bool,
    /// Number of simulated participants that closes the lobby.
    pub lobby_threshold: u32,
    /// Which deaths end the run.
    pub death_rule: DeathRule,
    /// Wave spawned when combat begins.
    pub starting_wave: WaveNumber,
    /// Progress carried over from a previous session.
    pub progress: Progress,
    /// Participants in slot order; one or two entries.
    pub participants: Vec<ParticipantConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: tuning::DEFAULT_SEED,
            auto_start: true,
            lobby_threshold: tuning::LOBBY_THRESHOLD,
            death_rule: DeathRule::default(),
            starting_wave: WaveNumber::FIRST,
            progress: Progress::default(),
            participants: vec![ParticipantConfig::default()],
        }
    }
}

impl Config {
    /// Default configuration with two participants named `Player1` and `Player2`.
    #[must_use]
    pub fn two_players() -> Self {
        Self {
            participants: vec![
                ParticipantConfig::named("Player1"),
                ParticipantConfig::named("Player2"),
            ],
            ..Self::default()
        }
    }

    /// Checks that the configuration describes a playable run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let count = self.participants.len();
        if !(1..=tuning::MAX_PARTICIPANTS).contains(&count) {
            return Err(ConfigError::ParticipantCount { count });
        }
        if self.lobby_threshold == 0 {
            return Err(ConfigError::ZeroLobbyThreshold);
        }
        if self.starting_wave.get() == 0 {
            return Err(ConfigError::ZeroStartingWave);
        }
        if self.starting_wave.get() > tuning::MAX_STARTING_WAVE {
            return Err(ConfigError::StartingWaveTooHigh {
                wave: self.starting_wave.get(),
                max: tuning::MAX_STARTING_WAVE,
            });
        }

        for (participant, entry) in self.participants.iter().enumerate() {
            if !entry.max_hp.is_finite() || entry.max_hp <= 0.0 {
                return Err(ConfigError::NonPositiveMaxHp {
                    participant,
                    max_hp: entry.max_hp,
                });
            }
            let hp = entry.starting_hp();
            if !hp.is_finite() || hp < 0.0 || hp > entry.max_hp {
                return Err(ConfigError::HpOutOfRange {
                    participant,
                    hp,
                    max_hp: entry.max_hp,
                });
            }
            if !entry.weapon_power.is_finite() || entry.weapon_power <= 0.0 {
                return Err(ConfigError::InvalidWeaponPower {
                    participant,
                    weapon_power: entry.weapon_power,
                });
            }
        }

        Ok(())
    }
}

/// Reasons a [`Config`] is rejected.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The run needs one or two participants.
    #[error("expected 1 or 2 participants, got {count}")]
    ParticipantCount {
        /// Number of participants supplied.
        count: usize,
    },
    /// Maximum hit points must be a positive number.
    #[error("participant {participant} has non-positive max hp {max_hp}")]
    NonPositiveMaxHp {
        /// Slot of the offending participant.
        participant: usize,
        /// Value supplied.
        max_hp: f32,
    },
    /// Starting hit points must lie within `[0, max_hp]`.
    #[error("participant {participant} hp {hp} is outside [0, {max_hp}]")]
    HpOutOfRange {
        /// Slot of the offending participant.
        participant: usize,
        /// Value supplied.
        hp: f32,
        /// Maximum allowed.
        max_hp: f32,
    },
    /// Weapon power must be a finite positive multiplier.
    #[error("participant {participant} has invalid weapon power {weapon_power}")]
    InvalidWeaponPower {
        /// Slot of the offending participant.
        participant: usize,
        /// Value supplied.
        weapon_power: f32,
    },
    /// The lobby would never close.
    #[error("lobby threshold must be at least 1")]
    ZeroLobbyThreshold,
    /// Waves are numbered from one.
    #[error("starting wave must be at least 1")]
    ZeroStartingWave,
    /// Runs cannot be entered arbitrarily deep into the wave sequence.
    #[error("starting wave {wave} exceeds the maximum of {max}")]
    StartingWaveTooHigh {
        /// Value supplied.
        wave: u32,
        /// Highest accepted starting wave.
        max: u32,
    },
}
