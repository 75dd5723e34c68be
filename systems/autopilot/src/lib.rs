#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that plays the arena on behalf of every participant.
//!
//! The autopilot reads a [`WorldSnapshot`] and emits the intents a player
//! would have produced for the frame: it sidesteps the nearest enemy, keeps
//! the trigger held and fires the ultimate as soon as it is charged. While
//! the run waits in the lobby it can optionally add one simulated participant
//! per frame.

use wave_arena_core::{
    geometry::nearest_index, Command, Movement, RunState, Vec2, WorldSnapshot, PLAYFIELD_HEIGHT,
    PLAYFIELD_WIDTH,
};

const DEFAULT_EVADE_RADIUS: f32 = 160.0;
const HOME_RADIUS: f32 = 120.0;
const AXIS_DEADZONE: f32 = 0.25;

/// Configuration parameters required to construct the autopilot.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    evade_radius: f32,
    join_lobby: bool,
}

impl Config {
    /// Creates a configuration with the provided evasion radius and lobby behaviour.
    #[must_use]
    pub const fn new(evade_radius: f32, join_lobby: bool) -> Self {
        Self {
            evade_radius,
            join_lobby,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_EVADE_RADIUS, true)
    }
}

/// Autopilot that reuses a scratch buffer of enemy positions between frames.
#[derive(Debug)]
pub struct Autopilot {
    config: Config,
    enemy_positions: Vec<Vec2>,
}

impl Autopilot {
    /// Creates a new autopilot using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            enemy_positions: Vec::new(),
        }
    }

    /// Emits the intents for the frame described by the snapshot.
    ///
    /// The host is expected to follow the emitted commands with the frame's
    /// `Tick`.
    pub fn handle(&mut self, snapshot: &WorldSnapshot, out: &mut Vec<Command>) {
        match snapshot.run_state {
            RunState::Lobby => {
                if self.config.join_lobby {
                    out.push(Command::Join);
                }
                return;
            }
            RunState::Active => {}
            RunState::BossSequence | RunState::Dead | RunState::Finished => return,
        }

        self.enemy_positions.clear();
        self.enemy_positions
            .extend(snapshot.enemies.iter().map(|enemy| enemy.position));

        for player in snapshot.players.iter().filter(|player| player.hp > 0.0) {
            let movement = self.steer(player.position);
            out.push(Command::SetMovement {
                player: player.index,
                movement,
            });
            out.push(Command::Fire {
                player: player.index,
            });
            if player.ultimate_fraction >= 1.0 && !player.ultimate_active {
                out.push(Command::ActivateUltimate {
                    player: player.index,
                });
            }
        }
    }

    fn steer(&self, position: Vec2) -> Movement {
        let threat = nearest_index(position, self.enemy_positions.iter().copied())
            .and_then(|slot| self.enemy_positions.get(slot).copied())
            .filter(|enemy| enemy.distance(position) < self.config.evade_radius);

        match threat {
            Some(enemy) => movement_along(position - enemy),
            None => {
                let home = Vec2::new(PLAYFIELD_WIDTH / 2.0, PLAYFIELD_HEIGHT / 2.0);
                if home.distance(position) > HOME_RADIUS {
                    movement_along(home - position)
                } else {
                    Movement::IDLE
                }
            }
        }
    }
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

fn movement_along(heading: Vec2) -> Movement {
    let heading = heading.normalize_or_zero();
    Movement {
        left: heading.x < -AXIS_DEADZONE,
        right: heading.x > AXIS_DEADZONE,
        up: heading.y < -AXIS_DEADZONE,
        down: heading.y > AXIS_DEADZONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_maps_to_held_directions() {
        let movement = movement_along(Vec2::new(-3.0, 3.0));
        assert_eq!(
            movement,
            Movement {
                left: true,
                down: true,
                ..Movement::IDLE
            }
        );
        assert_eq!(movement_along(Vec2::ZERO), Movement::IDLE);
    }

    #[test]
    fn small_components_fall_inside_deadzone() {
        let movement = movement_along(Vec2::new(10.0, 1.0));
        assert_eq!(
            movement,
            Movement {
                right: true,
                ..Movement::IDLE
            }
        );
    }
}
