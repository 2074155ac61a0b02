//! Skirmish — a turn-based arena roguelike built on gridui.

use std::time::Duration;

use gridui_core::app::{App, AppConfig};
use gridui_crossterm::CrosstermDriver;

use skirmish::{SkirmishModel, UI_HEIGHT, UI_WIDTH};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let model = SkirmishModel::new();
    let driver = CrosstermDriver::new();
    let mut app = App::new(AppConfig {
        model,
        driver,
        width: UI_WIDTH,
        height: UI_HEIGHT,
        // 60 ticks per second, matching the projectile step timings.
        tick_every: Some(Duration::from_micros(16_667)),
    });
    app.run()?;
    Ok(())
}
