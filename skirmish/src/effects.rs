//! Transient action effects: projectiles, area visuals, and mines.
//!
//! Projectiles carry their own collision-and-damage rule and apply it per
//! grid step; area effects are pure visual countdowns whose damage was
//! already applied when the action resolved. Either way damage lands
//! exactly once per enemy per hit event.

use gridui_core::{Point, Range};
use gridui_paths::line;

use crate::config::Config;
use crate::entity::Character;
use crate::log::{GameLog, LogStyle};

// ---------------------------------------------------------------------------
// Projectiles
// ---------------------------------------------------------------------------

/// A projectile in flight. The only effects that gate the turn transition.
#[derive(Debug, Clone)]
pub enum Projectile {
    /// Gun bullet: follows a precomputed Bresenham path and stops
    /// permanently on its first hit.
    Bullet {
        path: Vec<Point>,
        step: usize,
        frame: u32,
        speed: u32,
        damage: i32,
        done: bool,
    },
    /// Bow arrow: flies in a fixed direction up to a range limit, damaging
    /// every enemy on the cells it enters without stopping.
    Arrow {
        pos: Point,
        dir: Point,
        frame: u32,
        speed: u32,
        range: i32,
        traveled: i32,
        damage: i32,
        done: bool,
    },
}

impl Projectile {
    /// A bullet from `from` to `to` (both cells inclusive).
    pub fn bullet(from: Point, to: Point, cfg: &Config) -> Self {
        Self::Bullet {
            path: line(from, to),
            step: 0,
            frame: 0,
            speed: cfg.bullet_speed,
            damage: cfg.bullet_damage,
            done: false,
        }
    }

    /// An arrow from `from` flying toward `dir`.
    pub fn arrow(from: Point, dir: Point, cfg: &Config) -> Self {
        Self::Arrow {
            pos: from,
            dir,
            frame: 0,
            speed: cfg.arrow_speed,
            range: cfg.arrow_range,
            traveled: 0,
            damage: cfg.arrow_damage,
            done: false,
        }
    }

    /// Advance by one tick: count down the per-step delay, then take one
    /// path step and apply this projectile's collision rule.
    pub fn update(&mut self, enemies: &mut [Character], bounds: Range, log: &mut GameLog) {
        match self {
            Projectile::Bullet {
                path,
                step,
                frame,
                speed,
                damage,
                done,
            } => {
                if *done {
                    return;
                }
                *frame += 1;
                if *frame < *speed {
                    return;
                }
                *frame = 0;
                if *step < path.len() {
                    let p = path[*step];
                    if let Some(e) = enemies.iter_mut().find(|e| e.is_at(p) && e.is_alive()) {
                        e.health -= *damage;
                        log.log_styled(
                            &format!("Bullet hit! Enemy loses {damage} health."),
                            LogStyle::HurtEnemy,
                        );
                        *done = true;
                        return;
                    }
                    *step += 1;
                }
                if *step >= path.len() {
                    *done = true;
                }
            }
            Projectile::Arrow {
                pos,
                dir,
                frame,
                speed,
                range,
                traveled,
                damage,
                done,
            } => {
                if *done {
                    return;
                }
                *frame += 1;
                if *frame < *speed {
                    return;
                }
                *frame = 0;
                let next = *pos + *dir;
                if !bounds.contains(next) {
                    *done = true;
                    return;
                }
                *pos = next;
                *traveled += 1;
                for e in enemies.iter_mut().filter(|e| e.is_at(next) && e.is_alive()) {
                    e.health -= *damage;
                    log.log_styled(
                        &format!("Arrow hit! Enemy loses {damage} health."),
                        LogStyle::HurtEnemy,
                    );
                }
                if *traveled >= *range {
                    *done = true;
                }
            }
        }
    }

    /// Whether the projectile has resolved and can be dropped.
    pub fn is_finished(&self) -> bool {
        match self {
            Projectile::Bullet { done, .. } | Projectile::Arrow { done, .. } => *done,
        }
    }

    /// The cell to draw this projectile at, if it is still visible.
    pub fn render_pos(&self) -> Option<Point> {
        match self {
            Projectile::Bullet {
                path, step, done, ..
            } => {
                if !*done && *step < path.len() {
                    Some(path[*step])
                } else {
                    None
                }
            }
            Projectile::Arrow { pos, done, .. } => if *done { None } else { Some(*pos) },
        }
    }
}

// ---------------------------------------------------------------------------
// Area effects
// ---------------------------------------------------------------------------

/// A time-limited visual footprint left behind by an instantaneous action.
///
/// Carries no collision logic: it decays on-screen across phases and never
/// gates the turn transition.
#[derive(Debug, Clone)]
pub enum AreaEffect {
    /// Spell blast at `center`, covering cells within `radius`.
    Spell {
        center: Point,
        radius: i32,
        ticks_left: i32,
    },
    /// Laser beams from `origin` along the four cardinal rays.
    Laser {
        origin: Point,
        paths: Vec<Vec<Point>>,
        ticks_left: i32,
    },
}

impl AreaEffect {
    /// Decay by one tick.
    pub fn update(&mut self) {
        match self {
            AreaEffect::Spell { ticks_left, .. } | AreaEffect::Laser { ticks_left, .. } => {
                *ticks_left -= 1;
            }
        }
    }

    /// Whether the visual has fully decayed.
    pub fn is_finished(&self) -> bool {
        match self {
            AreaEffect::Spell { ticks_left, .. } | AreaEffect::Laser { ticks_left, .. } => {
                *ticks_left <= 0
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Mines
// ---------------------------------------------------------------------------

/// A placed hazard. Inert until an enemy occupies its cell, then it
/// detonates once and deactivates.
#[derive(Debug, Clone, Copy)]
pub struct Mine {
    pub pos: Point,
    pub active: bool,
}

/// One mine sweep: purge mines that already detonated, then detonate any
/// active mine with an enemy standing on it.
pub fn check_mines(
    mines: &mut Vec<Mine>,
    enemies: &mut [Character],
    damage: i32,
    log: &mut GameLog,
) {
    mines.retain(|m| m.active);
    for mine in mines.iter_mut() {
        if let Some(e) = enemies
            .iter_mut()
            .find(|e| e.is_at(mine.pos) && e.is_alive())
        {
            e.health -= damage;
            mine.active = false;
            log.log_styled(
                &format!("Mine exploded! Enemy loses {damage} health."),
                LogStyle::HurtEnemy,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> Config {
        Config::default()
    }

    /// Config with one-tick projectile steps, so tests advance a cell per
    /// update call.
    fn fast_cfg() -> Config {
        Config {
            bullet_speed: 1,
            arrow_speed: 1,
            ..Config::default()
        }
    }

    fn bounds() -> Range {
        cfg().bounds()
    }

    #[test]
    fn bullet_path_is_bresenham() {
        let b = Projectile::bullet(Point::new(0, 0), Point::new(3, 3), &cfg());
        match &b {
            Projectile::Bullet { path, .. } => {
                assert_eq!(
                    *path,
                    vec![
                        Point::new(0, 0),
                        Point::new(1, 1),
                        Point::new(2, 2),
                        Point::new(3, 3),
                    ]
                );
            }
            _ => panic!("expected a bullet"),
        }
    }

    #[test]
    fn bullet_self_target_finishes_after_one_applied_step() {
        let mut log = GameLog::new();
        let mut enemies: Vec<Character> = Vec::new();
        let mut b = Projectile::bullet(Point::new(5, 5), Point::new(5, 5), &cfg());
        // Default speed is 5: four delay ticks, then the single applied step.
        for _ in 0..4 {
            b.update(&mut enemies, bounds(), &mut log);
            assert!(!b.is_finished());
        }
        b.update(&mut enemies, bounds(), &mut log);
        assert!(b.is_finished());
    }

    #[test]
    fn bullet_stops_on_first_hit() {
        let mut log = GameLog::new();
        let mut enemies = vec![
            Character::new(Point::new(2, 0), 5),
            Character::new(Point::new(4, 0), 5),
        ];
        let mut b = Projectile::bullet(Point::new(0, 0), Point::new(5, 0), &fast_cfg());
        // Steps check cells (0,0), (1,0), then hit at (2,0).
        b.update(&mut enemies, bounds(), &mut log);
        b.update(&mut enemies, bounds(), &mut log);
        assert!(!b.is_finished());
        b.update(&mut enemies, bounds(), &mut log);
        assert!(b.is_finished());
        assert_eq!(enemies[0].health, 3);
        // The enemy behind the hit is untouched, and further updates are
        // no-ops — damage never lands twice.
        assert_eq!(enemies[1].health, 5);
        b.update(&mut enemies, bounds(), &mut log);
        assert_eq!(enemies[0].health, 3);
    }

    #[test]
    fn arrow_travels_exactly_its_range() {
        let mut log = GameLog::new();
        let mut enemies: Vec<Character> = Vec::new();
        let mut a = Projectile::arrow(Point::new(10, 10), Point::new(1, 0), &fast_cfg());
        for _ in 0..14 {
            a.update(&mut enemies, bounds(), &mut log);
            assert!(!a.is_finished());
        }
        a.update(&mut enemies, bounds(), &mut log);
        assert!(a.is_finished());
        assert_eq!(a.render_pos(), None);
        match a {
            Projectile::Arrow { pos, traveled, .. } => {
                assert_eq!(pos, Point::new(25, 10));
                assert_eq!(traveled, 15);
            }
            _ => panic!("expected an arrow"),
        }
    }

    #[test]
    fn arrow_pierces_through_enemies() {
        let mut log = GameLog::new();
        let mut enemies = vec![
            Character::new(Point::new(12, 10), 5),
            Character::new(Point::new(14, 10), 5),
        ];
        let mut a = Projectile::arrow(Point::new(10, 10), Point::new(1, 0), &fast_cfg());
        for _ in 0..6 {
            a.update(&mut enemies, bounds(), &mut log);
        }
        // Both enemies on the flight path were hit once each; the arrow
        // kept flying.
        assert_eq!(enemies[0].health, 4);
        assert_eq!(enemies[1].health, 4);
        assert!(!a.is_finished());
    }

    #[test]
    fn arrow_finishes_at_grid_edge() {
        let mut log = GameLog::new();
        let mut enemies: Vec<Character> = Vec::new();
        let mut a = Projectile::arrow(Point::new(28, 10), Point::new(1, 0), &fast_cfg());
        a.update(&mut enemies, bounds(), &mut log);
        assert!(!a.is_finished());
        a.update(&mut enemies, bounds(), &mut log);
        assert!(a.is_finished());
        match a {
            Projectile::Arrow { traveled, .. } => assert_eq!(traveled, 1),
            _ => panic!("expected an arrow"),
        }
    }

    #[test]
    fn area_effect_counts_down() {
        let mut fx = AreaEffect::Spell {
            center: Point::new(7, 7),
            radius: 2,
            ticks_left: 3,
        };
        fx.update();
        fx.update();
        assert!(!fx.is_finished());
        fx.update();
        assert!(fx.is_finished());
    }

    #[test]
    fn mine_inert_until_occupied_then_detonates_once() {
        let mut log = GameLog::new();
        let mut mines = vec![Mine {
            pos: Point::new(3, 3),
            active: true,
        }];
        let mut enemies = vec![Character::new(Point::new(9, 9), 5)];

        check_mines(&mut mines, &mut enemies, 3, &mut log);
        assert_eq!(enemies[0].health, 5);
        assert!(mines[0].active);

        enemies[0].pos = Point::new(3, 3);
        check_mines(&mut mines, &mut enemies, 3, &mut log);
        assert_eq!(enemies[0].health, 2);
        assert!(!mines[0].active);
        assert_eq!(mines.len(), 1);

        // Next sweep purges the spent mine and never re-applies damage.
        check_mines(&mut mines, &mut enemies, 3, &mut log);
        assert!(mines.is_empty());
        assert_eq!(enemies[0].health, 2);
    }
}
