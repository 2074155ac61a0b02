//! Session configuration.
//!
//! Every tunable of a game session lives in one [`Config`] value supplied
//! at session start; nothing reads module-level globals.

use gridui_core::{Point, Range};

/// Fixed configuration constants for one game session.
#[derive(Debug, Clone)]
pub struct Config {
    /// Grid width in cells.
    pub cols: i32,
    /// Grid height in cells.
    pub rows: i32,
    /// Number of enemies seeded at session start.
    pub enemy_count: usize,
    pub player_health: i32,
    pub enemy_health: i32,

    /// Melee damage to the struck enemy (the actor takes none).
    pub sword_damage: i32,
    pub bullet_damage: i32,
    /// Ticks per bullet path step.
    pub bullet_speed: u32,
    pub arrow_damage: i32,
    /// Ticks per arrow step.
    pub arrow_speed: u32,
    /// Maximum cells an arrow travels.
    pub arrow_range: i32,
    pub spell_damage: i32,
    /// Euclidean radius of the spell blast.
    pub spell_radius: i32,
    /// Ticks the spell visual lingers.
    pub spell_effect_ticks: i32,
    pub mine_damage: i32,
    pub laser_damage: i32,
    /// Ticks the laser visual lingers.
    pub laser_effect_ticks: i32,
    /// Damage each party takes when movement collides with an occupant.
    pub collision_damage: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cols: 30,
            rows: 30,
            enemy_count: 5,
            player_health: 10,
            enemy_health: 5,
            sword_damage: 2,
            bullet_damage: 2,
            bullet_speed: 5,
            arrow_damage: 1,
            arrow_speed: 3,
            arrow_range: 15,
            spell_damage: 2,
            spell_radius: 2,
            spell_effect_ticks: 30,
            mine_damage: 3,
            laser_damage: 2,
            laser_effect_ticks: 10,
            collision_damage: 1,
        }
    }
}

impl Config {
    /// The grid as a half-open range.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.cols, self.rows)
    }

    /// Whether `p` is a valid grid cell.
    #[inline]
    pub fn in_grid(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// The player's starting cell.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.cols / 2, self.rows / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_original_tuning() {
        let cfg = Config::default();
        assert_eq!((cfg.cols, cfg.rows), (30, 30));
        assert_eq!(cfg.enemy_count, 5);
        assert_eq!((cfg.player_health, cfg.enemy_health), (10, 5));
        assert_eq!(cfg.sword_damage, 2);
        assert_eq!((cfg.bullet_damage, cfg.bullet_speed), (2, 5));
        assert_eq!(
            (cfg.arrow_damage, cfg.arrow_speed, cfg.arrow_range),
            (1, 3, 15)
        );
        assert_eq!((cfg.spell_damage, cfg.spell_radius), (2, 2));
        assert_eq!(cfg.mine_damage, 3);
        assert_eq!(cfg.laser_damage, 2);
        assert_eq!(cfg.collision_damage, 1);
    }

    #[test]
    fn grid_helpers() {
        let cfg = Config::default();
        assert_eq!(cfg.center(), Point::new(15, 15));
        assert!(cfg.in_grid(Point::new(0, 0)));
        assert!(cfg.in_grid(Point::new(29, 29)));
        assert!(!cfg.in_grid(Point::new(30, 0)));
        assert!(!cfg.in_grid(Point::new(0, -1)));
    }
}
