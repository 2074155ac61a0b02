//! Colour palette for a dark terminal background.

use gridui_core::style::Color;

/// Default terminal background (reset).
pub const BG: Color = Color::DEFAULT;
/// Default terminal foreground (reset).
pub const FG: Color = Color::DEFAULT;
/// Dimmed foreground for the floor and the message log.
pub const FG_DIM: Color = Color::from_rgb(98, 100, 106);
/// Bright white for emphasis.
pub const FG_EMPH: Color = Color::from_rgb(248, 248, 242);

pub const RED: Color = Color::from_rgb(220, 60, 60);
pub const GREEN: Color = Color::from_rgb(80, 200, 80);
pub const YELLOW: Color = Color::from_rgb(230, 210, 60);
pub const BLUE: Color = Color::from_rgb(90, 130, 255);
pub const MAGENTA: Color = Color::from_rgb(190, 90, 200);
pub const CYAN: Color = Color::from_rgb(80, 210, 210);
pub const ORANGE: Color = Color::from_rgb(230, 150, 50);
pub const WHITE: Color = Color::from_rgb(235, 235, 235);

/// Player '@'.
pub const PLAYER_FG: Color = BLUE;
/// Bullets in flight.
pub const BULLET_FG: Color = YELLOW;
/// Arrows in flight.
pub const ARROW_FG: Color = WHITE;
/// Spell blast footprint.
pub const SPELL_FG: Color = MAGENTA;
/// Laser beams.
pub const LASER_FG: Color = CYAN;
/// Armed mines.
pub const MINE_FG: Color = ORANGE;

/// Colour for a health value relative to its maximum: the terminal
/// stand-in for a health bar.
pub fn health_color(health: i32, max_health: i32) -> Color {
    let max = max_health.max(1);
    if health * 3 > max * 2 {
        GREEN
    } else if health * 3 > max {
        YELLOW
    } else {
        RED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_color_thresholds() {
        assert_eq!(health_color(10, 10), GREEN);
        assert_eq!(health_color(7, 10), GREEN);
        assert_eq!(health_color(5, 10), YELLOW);
        assert_eq!(health_color(4, 10), YELLOW);
        assert_eq!(health_color(3, 10), RED);
        assert_eq!(health_color(1, 10), RED);
    }
}
