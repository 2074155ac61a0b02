//! Weapon selection and player actions.
//!
//! Weapons and actions are closed enums dispatched by pattern matching in
//! the engine; there is no callback indirection between the input layer
//! and action resolution.

use gridui_core::Point;

/// The six selectable weapons. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weapon {
    Sword,
    Gun,
    Bow,
    Spell,
    Mine,
    Laser,
}

impl Weapon {
    /// All weapons in selection-bar order.
    pub const ALL: [Weapon; 6] = [
        Weapon::Sword,
        Weapon::Gun,
        Weapon::Bow,
        Weapon::Spell,
        Weapon::Mine,
        Weapon::Laser,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Weapon::Sword => "Sword",
            Weapon::Gun => "Gun",
            Weapon::Bow => "Bow",
            Weapon::Spell => "Spell",
            Weapon::Mine => "Mine",
            Weapon::Laser => "Laser",
        }
    }

    /// Whether this weapon is aimed by clicking a grid cell.
    pub fn aims_by_click(self) -> bool {
        matches!(self, Weapon::Gun | Weapon::Spell | Weapon::Mine)
    }
}

/// One player action, already bound to its target where one is needed.
///
/// `Move` is a step direction; `Bow` is a firing direction; the click-aimed
/// variants carry the clicked grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Move(Point),
    Sword,
    Gun(Point),
    Bow(Point),
    Spell(Point),
    Mine(Point),
    Laser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_bar_order() {
        assert_eq!(Weapon::ALL[0], Weapon::Sword);
        assert_eq!(Weapon::ALL.len(), 6);
        assert_eq!(Weapon::Laser.name(), "Laser");
    }

    #[test]
    fn click_aimed_weapons() {
        assert!(Weapon::Gun.aims_by_click());
        assert!(Weapon::Spell.aims_by_click());
        assert!(Weapon::Mine.aims_by_click());
        assert!(!Weapon::Sword.aims_by_click());
        assert!(!Weapon::Bow.aims_by_click());
        assert!(!Weapon::Laser.aims_by_click());
    }
}
