//! The turn/action resolution engine.
//!
//! A [`Session`] owns every live collection for one game: the player, the
//! enemies, the projectiles and area visuals in flight, and the placed
//! mines. Actions are resolved here (enum dispatch, no callbacks), ticks
//! advance the transient effects, and the phase machine hands control back
//! and forth between the player and the enemies.

use gridui_core::{Point, Range};
use gridui_paths::{euclidean2, ray};
use rand::prelude::*;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::effects::{AreaEffect, Mine, Projectile, check_mines};
use crate::entity::Character;
use crate::log::{GameLog, LogStyle};
use crate::weapons::PlayerAction;

/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No enemies remain.
    Victory,
    /// The player died.
    Defeat,
}

/// The turn-engine state machine.
///
/// `EnemyPhase` is only ever observable from inside a tick: the enemy
/// steps run to completion in the same tick that entered the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for one consumed player action.
    PlayerInput,
    /// Advancing transient effects until no projectile remains.
    ResolvingActions,
    /// Stepping each enemy toward the player.
    EnemyPhase,
    /// Terminal. The session no longer mutates.
    Over(Outcome),
}

/// One game session. Exclusive owner of all live game state.
pub struct Session {
    pub config: Config,
    pub player: Character,
    pub enemies: Vec<Character>,
    pub projectiles: Vec<Projectile>,
    pub area_effects: Vec<AreaEffect>,
    pub mines: Vec<Mine>,
    pub phase: Phase,
    pub log: GameLog,
    rng: SmallRng,
}

impl Session {
    /// Start a session with OS-seeded randomness.
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, SmallRng::from_rng(&mut rand::rng()))
    }

    /// Start a session with the given RNG (deterministic in tests).
    pub fn with_rng(config: Config, rng: SmallRng) -> Self {
        let player = Character::new(config.center(), config.player_health);
        let mut session = Self {
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            area_effects: Vec::new(),
            mines: Vec::new(),
            phase: Phase::PlayerInput,
            log: GameLog::new(),
            rng,
            config,
        };
        session.spawn_enemies();
        session.log.log("Enemies approach. Choose your weapon.");
        session
    }

    fn spawn_enemies(&mut self) {
        for _ in 0..self.config.enemy_count {
            let pos = self.random_free_cell();
            self.enemies
                .push(Character::new(pos, self.config.enemy_health));
        }
    }

    /// A uniformly random cell not occupied by the player or any enemy.
    fn random_free_cell(&mut self) -> Point {
        loop {
            let p = Point::new(
                self.rng.random_range(0..self.config.cols),
                self.rng.random_range(0..self.config.rows),
            );
            if !self.player.is_at(p) && !self.enemies.iter().any(|e| e.is_at(p)) {
                return p;
            }
        }
    }

    /// The grid as a half-open range.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.config.bounds()
    }

    /// Whether the session reached a terminal state.
    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Over(_))
    }

    // -------------------------------------------------------------------
    // Action resolution
    // -------------------------------------------------------------------

    /// Resolve one player action. Returns whether the action was consumed;
    /// a consumed action moves the phase machine to `ResolvingActions`,
    /// a rejected one leaves the turn with the player.
    pub fn act(&mut self, action: PlayerAction) -> bool {
        if self.phase != Phase::PlayerInput {
            return false;
        }

        let consumed = match action {
            PlayerAction::Move(dir) => {
                self.move_player(dir);
                true
            }
            PlayerAction::Sword => self.attack_with_sword(),
            PlayerAction::Gun(target) => {
                if !self.config.in_grid(target) {
                    false
                } else {
                    self.projectiles
                        .push(Projectile::bullet(self.player.pos, target, &self.config));
                    true
                }
            }
            PlayerAction::Bow(dir) => {
                self.projectiles
                    .push(Projectile::arrow(self.player.pos, dir, &self.config));
                true
            }
            PlayerAction::Spell(target) => {
                if !self.config.in_grid(target) {
                    false
                } else {
                    self.cast_spell(target);
                    true
                }
            }
            PlayerAction::Mine(target) => {
                if !self.config.in_grid(target) {
                    false
                } else {
                    self.mines.push(Mine {
                        pos: target,
                        active: true,
                    });
                    self.log
                        .log_styled(&format!("Mine placed at {target}."), LogStyle::Info);
                    true
                }
            }
            PlayerAction::Laser => {
                self.fire_laser();
                true
            }
        };

        if consumed {
            log::debug!("action {action:?} consumed, resolving");
            self.phase = Phase::ResolvingActions;
        }
        consumed
    }

    /// Step the player one cell. Bumping an occupied cell hurts both
    /// parties and blocks the move; stepping off-grid does nothing. Either
    /// way the action is consumed.
    fn move_player(&mut self, dir: Point) {
        let dest = self.player.pos + dir;
        if !self.config.in_grid(dest) {
            return;
        }
        if let Some(i) = self.enemies.iter().position(|e| e.is_at(dest)) {
            let dmg = self.config.collision_damage;
            self.player.health -= dmg;
            self.enemies[i].health -= dmg;
            self.log.log_styled(
                &format!("Collision! You and the enemy both lose {dmg} health."),
                LogStyle::HurtPlayer,
            );
            return;
        }
        self.player.pos = dest;
    }

    /// Swing at the four cardinal-adjacent cells; the first adjacent enemy
    /// takes the full sword damage (the actor takes none — unlike the
    /// movement-collision rule). No adjacent enemy means no turn consumed.
    fn attack_with_sword(&mut self) -> bool {
        let dmg = self.config.sword_damage;
        for dest in self.player.pos.neighbors_4() {
            if let Some(e) = self.enemies.iter_mut().find(|e| e.is_at(dest)) {
                e.health -= dmg;
                self.log.log_styled(
                    &format!("Sword attack! Enemy loses {dmg} health."),
                    LogStyle::HurtEnemy,
                );
                return true;
            }
        }
        self.log.log("No enemy adjacent to attack.");
        false
    }

    /// Damage every enemy within the spell radius of `target`, immediately,
    /// then leave a visual blast behind.
    fn cast_spell(&mut self, target: Point) {
        let dmg = self.config.spell_damage;
        let r2 = self.config.spell_radius * self.config.spell_radius;
        for e in self
            .enemies
            .iter_mut()
            .filter(|e| euclidean2(e.pos, target) <= r2)
        {
            e.health -= dmg;
            self.log.log_styled(
                &format!("Spell hit! Enemy loses {dmg} health."),
                LogStyle::HurtEnemy,
            );
        }
        self.area_effects.push(AreaEffect::Spell {
            center: target,
            radius: self.config.spell_radius,
            ticks_left: self.config.spell_effect_ticks,
        });
    }

    /// Damage every enemy on the four cardinal rays from the player to the
    /// grid edge, immediately, then leave the beams visible.
    fn fire_laser(&mut self) {
        let dmg = self.config.laser_damage;
        let bounds = self.bounds();
        let mut paths = Vec::with_capacity(4);
        for dir in [
            Point::new(-1, 0),
            Point::new(1, 0),
            Point::new(0, -1),
            Point::new(0, 1),
        ] {
            let path = ray(self.player.pos, dir, bounds);
            for &cell in &path {
                if let Some(e) = self.enemies.iter_mut().find(|e| e.is_at(cell)) {
                    e.health -= dmg;
                    self.log.log_styled(
                        &format!("Laser hit! Enemy loses {dmg} health."),
                        LogStyle::HurtEnemy,
                    );
                }
            }
            paths.push(path);
        }
        self.area_effects.push(AreaEffect::Laser {
            origin: self.player.pos,
            paths,
            ticks_left: self.config.laser_effect_ticks,
        });
    }

    // -------------------------------------------------------------------
    // Tick processing
    // -------------------------------------------------------------------

    /// Advance the session by one tick.
    ///
    /// Projectiles step, visuals decay, mines sweep, the dead are purged;
    /// then, once no projectile is pending, the enemy phase runs and the
    /// turn returns to the player. Terminal conditions are checked every
    /// tick regardless of phase.
    pub fn tick(&mut self) {
        if self.is_over() {
            return;
        }

        let bounds = self.config.bounds();
        for p in &mut self.projectiles {
            p.update(&mut self.enemies, bounds, &mut self.log);
        }
        self.projectiles.retain(|p| !p.is_finished());

        // Visual decay runs in every phase and never gates the transition.
        for fx in &mut self.area_effects {
            fx.update();
        }
        self.area_effects.retain(|fx| !fx.is_finished());

        check_mines(
            &mut self.mines,
            &mut self.enemies,
            self.config.mine_damage,
            &mut self.log,
        );
        self.enemies.retain(|e| e.is_alive());

        if self.phase == Phase::ResolvingActions && self.projectiles.is_empty() {
            self.phase = Phase::EnemyPhase;
            self.enemy_phase();
            self.enemies.retain(|e| e.is_alive());
            self.phase = Phase::PlayerInput;
        }

        if !self.player.is_alive() {
            self.log.log_styled("You die...", LogStyle::HurtPlayer);
            self.phase = Phase::Over(Outcome::Defeat);
        } else if self.enemies.is_empty() {
            self.log
                .log_styled("The last enemy falls. You win!", LogStyle::Info);
            self.phase = Phase::Over(Outcome::Victory);
        }
    }

    // -------------------------------------------------------------------
    // Enemy phase
    // -------------------------------------------------------------------

    /// Step every enemy once, in collection order. Later enemies see the
    /// already-updated positions of earlier ones.
    fn enemy_phase(&mut self) {
        log::debug!("enemy phase: {} enemies", self.enemies.len());
        for i in 0..self.enemies.len() {
            if !self.player.is_alive() {
                break;
            }
            if !self.enemies[i].is_alive() {
                continue;
            }
            self.enemy_step(i);
        }
    }

    /// One greedy chase step: move by the per-axis sign toward the player.
    /// Off-grid destinations are rejected silently; occupied destinations
    /// cost both parties collision damage and block the move.
    fn enemy_step(&mut self, i: usize) {
        let dest = {
            let e = &self.enemies[i];
            e.pos + e.pos.step_toward(self.player.pos)
        };
        if dest == self.enemies[i].pos || !self.config.in_grid(dest) {
            return;
        }
        let dmg = self.config.collision_damage;
        if self.player.is_at(dest) {
            self.player.health -= dmg;
            self.enemies[i].health -= dmg;
            self.log.log_styled(
                &format!("An enemy slams into you! Both lose {dmg} health."),
                LogStyle::HurtPlayer,
            );
            return;
        }
        if let Some(j) = self.enemies.iter().position(|e| e.is_at(dest)) {
            self.enemies[i].health -= dmg;
            self.enemies[j].health -= dmg;
            self.log.log_styled(
                &format!("Enemies collide! Both lose {dmg} health."),
                LogStyle::HurtEnemy,
            );
            return;
        }
        self.enemies[i].pos = dest;
    }
}
