//! Per-frame combat update.
//!
//! A tick while the run is active executes, in order: player movement, enemy
//! motion, enemy fire, boss summons, boss specials, player projectiles, enemy
//! projectiles, player timers, contact damage, the death check, the wave-clear
//! check and effect decay. Boss sequences and the death message run a reduced
//! subset of those steps.

use std::{f32::consts::TAU, time::Duration};

use tracing::{debug, info};
use wave_arena_core::{
    geometry::{bearing, direction_between, nearest_index, normalize_or_fallback, steer_towards},
    BossPhase, Bounds, EnemyProjectileKind, Event, ExitReason, PlayerIndex, Vec2, ENEMY_BOUNDS,
    ENEMY_PROJECTILE_BOUNDS, PLAYER_BOUNDS, PROJECTILE_BOUNDS,
};

use crate::{
    config::DeathRule,
    entities::{EnemyKind, EnemyProjectile, Payload, Projectile, VisualEffect},
    sequence::{PhaseTimer, RunPhase},
    tuning, World,
};

/// What became of a player projectile after its update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ProjectileFate {
    Live,
    Spent,
    ArenaCleared,
}

impl World {
    pub(crate) fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        out_events.push(Event::TimeAdvanced { dt });
        match self.phase {
            RunPhase::Lobby { .. } | RunPhase::Finished => {}
            RunPhase::Active => self.combat_frame(dt, out_events),
            RunPhase::BossSlainDisplay { .. } | RunPhase::PostBossPause { .. } => {
                self.boss_sequence_frame(dt, out_events)
            }
            RunPhase::PlayerDead { .. } => self.death_frame(dt, out_events),
        }
    }

    pub(crate) fn fire(&mut self, index: PlayerIndex) {
        if self.phase != RunPhase::Active || self.projectiles.len() >= tuning::PROJECTILE_CAP {
            return;
        }
        let Some(player) = self.players.get(index.get()) else {
            return;
        };
        if !player.is_alive() || !player.fire_timer.is_zero() {
            return;
        }

        let origin = player.position;
        let target = nearest_index(origin, self.enemies.iter().map(|enemy| enemy.position))
            .and_then(|slot| self.enemies.get(slot));
        let (direction, target) = match target {
            Some(enemy) => (direction_between(origin, enemy.position), Some(enemy.id)),
            None => (Vec2::NEG_Y, None),
        };

        self.projectiles.push(Projectile {
            position: origin,
            direction,
            speed: tuning::PROJECTILE_SPEED,
            target,
            owner: index,
            ultimate: false,
        });
        if let Some(player) = self.players.get_mut(index.get()) {
            player.fire_timer = player.fire_cooldown();
        }
    }

    pub(crate) fn activate_ultimate(&mut self, index: PlayerIndex, out_events: &mut Vec<Event>) {
        if self.phase != RunPhase::Active {
            return;
        }
        let Some(player) = self.players.get_mut(index.get()) else {
            return;
        };
        if !player.is_alive()
            || player.ultimate_remaining.is_some()
            || player.ultimate_charge < tuning::ULTIMATE_MAX
        {
            return;
        }

        player.ultimate_charge = 0;
        player.ultimate_remaining = Some(tuning::ULTIMATE_DURATION);
        let origin = player.position;

        let step = TAU / tuning::ULTIMATE_BURST as f32;
        self.projectiles
            .extend((0..tuning::ULTIMATE_BURST).map(|slot| {
                let angle = slot as f32 * step;
                Projectile {
                    position: origin,
                    direction: Vec2::new(angle.cos(), angle.sin()),
                    speed: tuning::ULTIMATE_PROJECTILE_SPEED,
                    target: None,
                    owner: index,
                    ultimate: true,
                }
            }));
        debug!(player = index.get(), "ultimate activated");
        out_events.push(Event::UltimateActivated { player: index });
    }

    fn combat_frame(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.move_players(dt);
        self.move_enemies(dt);
        self.fire_enemy_weapons(dt);
        self.summon_minions(dt);
        self.fire_boss_specials(dt);
        self.advance_projectiles(dt, out_events);
        if self.phase == RunPhase::Active {
            self.advance_enemy_projectiles(dt);
        }
        self.advance_player_timers(dt);
        self.hurt_cooldown = self.hurt_cooldown.saturating_sub(dt);
        if self.phase == RunPhase::Active {
            self.resolve_contacts();
        }
        let _ = self.check_death(out_events);
        if self.phase == RunPhase::Active && self.enemies.is_empty() {
            self.advance_wave(out_events);
        }
        self.decay_effects(dt);
    }

    fn boss_sequence_frame(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.move_players(dt);
        self.advance_player_timers(dt);
        self.hurt_cooldown = self.hurt_cooldown.saturating_sub(dt);
        if !self.check_death(out_events) && self.phase.advance(dt) == PhaseTimer::Elapsed {
            match self.phase {
                RunPhase::BossSlainDisplay { .. } => {
                    self.phase = RunPhase::PostBossPause {
                        remaining: tuning::POST_BOSS_PAUSE,
                    };
                }
                RunPhase::PostBossPause { .. } => {
                    self.phase = RunPhase::Active;
                    self.advance_wave(out_events);
                }
                _ => {}
            }
        }
        self.decay_effects(dt);
    }

    fn death_frame(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if self.phase.advance(dt) == PhaseTimer::Elapsed {
            self.phase = RunPhase::Finished;
            info!(wave = self.wave.get(), "death message elapsed, leaving run");
            out_events.push(Event::ReturnToMenu {
                reason: ExitReason::Defeated,
            });
        }
        self.decay_effects(dt);
    }

    fn move_players(&mut self, dt: Duration) {
        let seconds = dt.as_secs_f32();
        for player in self.players.iter_mut().filter(|player| player.is_alive()) {
            let heading = normalize_or_fallback(player.movement.axis());
            let moved = player.position + heading * tuning::PLAYER_SPEED * seconds;
            player.position = PLAYER_BOUNDS.clamp(moved);
        }
    }

    fn move_enemies(&mut self, dt: Duration) {
        let seconds = dt.as_secs_f32();
        for enemy in &mut self.enemies {
            enemy.position += enemy.velocity * seconds;
            bounce(&mut enemy.position, &mut enemy.velocity, ENEMY_BOUNDS);
        }
    }

    fn fire_enemy_weapons(&mut self, dt: Duration) {
        let targets = self.living_player_positions();
        for enemy in &mut self.enemies {
            enemy.fire_timer = enemy.fire_timer.saturating_sub(dt);
            if !enemy.fire_timer.is_zero() {
                continue;
            }
            let Some(target) = nearest_point(enemy.position, &targets) else {
                continue;
            };

            let direction = direction_between(enemy.position, target);
            if enemy.is_boss() {
                self.enemy_projectiles.push(EnemyProjectile {
                    position: enemy.position,
                    direction,
                    speed: tuning::BOSS_SHOT_SPEED,
                    kind: EnemyProjectileKind::Boss,
                    homing: tuning::BOSS_SHOT_GRACE,
                    payload: None,
                });
                enemy.fire_timer = tuning::BOSS_FIRE_INTERVAL;
            } else {
                self.enemy_projectiles.push(EnemyProjectile {
                    position: enemy.position,
                    direction,
                    speed: tuning::REGULAR_SHOT_SPEED,
                    kind: EnemyProjectileKind::Regular,
                    homing: Duration::ZERO,
                    payload: None,
                });
                enemy.fire_timer = self.director.regular_fire_delay(&mut self.rng);
            }
        }
    }

    fn summon_minions(&mut self, dt: Duration) {
        let mut summoners = Vec::new();
        for enemy in &mut self.enemies {
            let EnemyKind::Boss(state) = &mut enemy.kind else {
                continue;
            };
            let Some(timer) = state.summon_timer.as_mut() else {
                continue;
            };
            *timer = timer.saturating_sub(dt);
            if timer.is_zero() {
                *timer = tuning::BOSS_SUMMON_INTERVAL;
                summoners.push(enemy.position);
            }
        }

        for center in summoners {
            let minions = self.director.summon_minions(center, &mut self.rng);
            debug!(count = minions.len(), "boss summoned minions");
            for minion in &minions {
                self.spawn_enemy(minion);
            }
        }
    }

    fn fire_boss_specials(&mut self, dt: Duration) {
        let targets = self.living_player_positions();
        let interval = tuning::special_interval(self.wave.elapsed());
        let spread = tuning::SPECIAL_SPREAD as f32;
        let centre_offset = (spread - 1.0) / 2.0;

        for enemy in &mut self.enemies {
            let EnemyKind::Boss(state) = &mut enemy.kind else {
                continue;
            };
            state.special_timer = state.special_timer.saturating_sub(dt);
            if !state.special_timer.is_zero() {
                continue;
            }
            state.special_timer = interval;

            let aim = nearest_point(enemy.position, &targets)
                .map_or(0.0, |target| bearing(enemy.position, target));
            let origin = enemy.position;
            self.enemy_projectiles
                .extend((0..tuning::SPECIAL_SPREAD).map(|slot| {
                    let angle = aim + (slot as f32 - centre_offset) * TAU / spread;
                    EnemyProjectile {
                        position: origin,
                        direction: Vec2::new(angle.cos(), angle.sin()),
                        speed: tuning::SPECIAL_SHOT_SPEED,
                        kind: EnemyProjectileKind::Special,
                        homing: Duration::ZERO,
                        payload: Some(Payload::SPECIAL),
                    }
                }));
        }
    }

    fn advance_projectiles(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let projectiles = std::mem::take(&mut self.projectiles);
        let mut live = Vec::with_capacity(projectiles.len());
        for mut projectile in projectiles {
            match self.advance_projectile(&mut projectile, dt, out_events) {
                ProjectileFate::Live => live.push(projectile),
                ProjectileFate::Spent => {}
                ProjectileFate::ArenaCleared => {
                    live.clear();
                    break;
                }
            }
        }
        self.projectiles = live;
    }

    fn advance_projectile(
        &mut self,
        projectile: &mut Projectile,
        dt: Duration,
        out_events: &mut Vec<Event>,
    ) -> ProjectileFate {
        let seconds = dt.as_secs_f32();

        if let Some(target) = projectile.target {
            if !self.enemies.iter().any(|enemy| enemy.id == target) {
                projectile.target = nearest_index(
                    projectile.position,
                    self.enemies.iter().map(|enemy| enemy.position),
                )
                .and_then(|slot| self.enemies.get(slot))
                .map(|enemy| enemy.id);
            }
        }

        let homing_on = projectile
            .target
            .and_then(|target| self.enemies.iter().find(|enemy| enemy.id == target))
            .map(|enemy| enemy.position);
        if let Some(destination) = homing_on {
            let desired = direction_between(projectile.position, destination);
            projectile.direction = steer_towards(
                projectile.direction,
                desired,
                tuning::PROJECTILE_TURN_RATE * seconds,
            );
        }

        projectile.position += projectile.direction * projectile.speed * seconds;
        if !PROJECTILE_BOUNDS.contains(projectile.position) {
            return ProjectileFate::Spent;
        }

        let Some(hit) = self.enemies.iter().position(|enemy| {
            enemy.position.distance(projectile.position) < tuning::PROJECTILE_HIT_RADIUS
        }) else {
            return ProjectileFate::Live;
        };

        let weapon_power = self
            .players
            .get(projectile.owner.get())
            .map_or(1.0, |owner| owner.weapon_power);
        let base = if projectile.ultimate {
            tuning::ULTIMATE_PROJECTILE_DAMAGE
        } else {
            tuning::PROJECTILE_DAMAGE
        };
        let damage = (base * weapon_power).trunc() as i32;
        self.damage_enemy(hit, damage, projectile.owner, out_events)
    }

    fn damage_enemy(
        &mut self,
        slot: usize,
        damage: i32,
        owner: PlayerIndex,
        out_events: &mut Vec<Event>,
    ) -> ProjectileFate {
        let Some(enemy) = self.enemies.get_mut(slot) else {
            return ProjectileFate::Spent;
        };
        enemy.hp = enemy.hp.saturating_sub(damage);
        if enemy.hp > 0 {
            return ProjectileFate::Spent;
        }

        let kind = enemy.kind;
        match kind {
            EnemyKind::Regular => {
                let _ = self.enemies.remove(slot);
                if let Some(player) = self.players.get_mut(owner.get()) {
                    player.add_ultimate_charge(tuning::ULTIMATE_CHARGE_PER_KILL);
                }
                ProjectileFate::Spent
            }
            EnemyKind::Boss(state) if state.phase == BossPhase::First => {
                self.enter_second_phase(slot, out_events);
                ProjectileFate::Spent
            }
            EnemyKind::Boss(_) => {
                self.slay_boss(slot, out_events);
                ProjectileFate::ArenaCleared
            }
        }
    }

    pub(crate) fn enter_second_phase(&mut self, slot: usize, out_events: &mut Vec<Event>) {
        let Some(boss) = self.enemies.get_mut(slot) else {
            return;
        };
        boss.max_hp = (boss.max_hp - tuning::BOSS_PHASE_HP_LOSS).max(tuning::BOSS_PHASE_MIN_HP);
        boss.hp = boss.max_hp;
        if let EnemyKind::Boss(state) = &mut boss.kind {
            state.phase = BossPhase::Second;
            state.summon_timer = None;
            state.special_timer = tuning::SPECIAL_PHASE_TWO_DELAY;
        }
        let id = boss.id;
        self.phase_banner = tuning::PHASE_BANNER;
        info!(boss = id.get(), wave = self.wave.get(), "boss entered second phase");
        out_events.push(Event::BossPhaseChanged { boss: id });
    }

    fn slay_boss(&mut self, slot: usize, out_events: &mut Vec<Event>) {
        if slot >= self.enemies.len() {
            return;
        }
        let boss = self.enemies.remove(slot);
        self.projectiles.clear();
        self.enemy_projectiles.clear();

        for player in &mut self.players {
            let half = player.max_hp / 2.0;
            player.heal(half);
            player.weapon_power += tuning::BOSS_WEAPON_POWER_BONUS;
        }
        self.effects.push(VisualEffect::explosion(boss.position));
        self.phase = RunPhase::BossSlainDisplay {
            remaining: tuning::BOSS_SLAIN_DISPLAY,
        };

        info!(boss = boss.id.get(), wave = self.wave.get(), "boss slain");
        out_events.push(Event::BossSlain {
            boss: boss.id,
            position: boss.position,
        });
    }

    fn advance_enemy_projectiles(&mut self, dt: Duration) {
        let seconds = dt.as_secs_f32();
        let targets = self.living_player_positions();
        let players = &mut self.players;

        self.enemy_projectiles.retain_mut(|shot| {
            if !shot.homing.is_zero() {
                if let Some(target) = nearest_point(shot.position, &targets) {
                    let desired = direction_between(shot.position, target);
                    shot.direction = steer_towards(
                        shot.direction,
                        desired,
                        tuning::ENEMY_SHOT_TURN_RATE * seconds,
                    );
                }
                shot.homing = shot.homing.saturating_sub(dt);
            }

            shot.position += shot.direction * shot.speed * seconds;
            if !ENEMY_PROJECTILE_BOUNDS.contains(shot.position) {
                return false;
            }

            let Some(victim) = players.iter_mut().find(|player| {
                player.is_alive()
                    && player.position.distance(shot.position) < tuning::ENEMY_SHOT_HIT_RADIUS
            }) else {
                return true;
            };
            victim.take_damage(shot.damage());
            if let Some(payload) = shot.payload {
                victim.apply_payload(payload);
            }
            false
        });
    }

    fn advance_player_timers(&mut self, dt: Duration) {
        for player in &mut self.players {
            player.advance_timers(dt);
        }
    }

    /// Applies at most one contact hit per hurt-cooldown window.
    ///
    /// The colliding enemy is destroyed whatever its kind; the wave-clear
    /// check later in the frame handles an emptied arena.
    fn resolve_contacts(&mut self) {
        if !self.hurt_cooldown.is_zero() {
            return;
        }

        for player in self.players.iter_mut().filter(|player| player.is_alive()) {
            let Some(slot) = self.enemies.iter().position(|enemy| {
                enemy.position.distance(player.position) < tuning::CONTACT_RADIUS
            }) else {
                continue;
            };

            let enemy = self.enemies.remove(slot);
            player.take_damage(tuning::CONTACT_DAMAGE);
            let away = direction_between(enemy.position, player.position);
            player.position = PLAYER_BOUNDS.clamp(player.position + away * tuning::KNOCKBACK);
            self.hurt_cooldown = tuning::HURT_COOLDOWN;
            debug!(
                player = player.index.get(),
                enemy = enemy.id.get(),
                "contact damage"
            );
            return;
        }
    }

    /// Enters the death phase when the configured death rule is met.
    fn check_death(&mut self, out_events: &mut Vec<Event>) -> bool {
        let defeated = match self.death_rule {
            DeathRule::PrimaryPlayer => self
                .players
                .first()
                .map_or(true, |player| !player.is_alive()),
            DeathRule::AllPlayers => self.players.iter().all(|player| !player.is_alive()),
        };
        if !defeated {
            return false;
        }

        self.phase = RunPhase::PlayerDead {
            remaining: tuning::DEATH_MESSAGE,
        };
        info!(
            wave = self.wave.get(),
            progress = self.progress.get(),
            "run lost"
        );
        out_events.push(Event::PlayerDied);
        true
    }

    fn decay_effects(&mut self, dt: Duration) {
        self.phase_banner = self.phase_banner.saturating_sub(dt);
        for effect in &mut self.effects {
            effect.remaining = effect.remaining.saturating_sub(dt);
        }
        self.effects.retain(|effect| !effect.remaining.is_zero());
    }

    fn living_player_positions(&self) -> Vec<Vec2> {
        self.players
            .iter()
            .filter(|player| player.is_alive())
            .map(|player| player.position)
            .collect()
    }
}

fn nearest_point(origin: Vec2, points: &[Vec2]) -> Option<Vec2> {
    nearest_index(origin, points.iter().copied()).and_then(|slot| points.get(slot).copied())
}

/// Pins the position to the rectangle and reflects the velocity off any edge it crossed.
fn bounce(position: &mut Vec2, velocity: &mut Vec2, bounds: Bounds) {
    let min = bounds.min();
    let max = bounds.max();
    if position.x < min.x {
        position.x = min.x;
        velocity.x = velocity.x.abs();
    } else if position.x > max.x {
        position.x = max.x;
        velocity.x = -velocity.x.abs();
    }
    if position.y < min.y {
        position.y = min.y;
        velocity.y = velocity.y.abs();
    } else if position.y > max.y {
        position.y = max.y;
        velocity.y = -velocity.y.abs();
    }
}
