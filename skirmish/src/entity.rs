//! Characters — the player and the enemies.

use gridui_core::Point;

use crate::weapons::Weapon;

/// A character on the grid: the player or one enemy.
///
/// Health may go negative transiently within a tick; a dead character is
/// purged from the live collections before the next phase begins.
#[derive(Debug, Clone)]
pub struct Character {
    pub pos: Point,
    pub health: i32,
    pub max_health: i32,
    /// Currently equipped weapon. Only read for the player.
    pub weapon: Weapon,
}

impl Character {
    pub fn new(pos: Point, health: i32) -> Self {
        Self {
            pos,
            health,
            max_health: health,
            weapon: Weapon::Sword,
        }
    }

    /// Whether the character occupies `p`.
    #[inline]
    pub fn is_at(&self, p: Point) -> bool {
        self.pos == p
    }

    /// Whether the character is still alive.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}
