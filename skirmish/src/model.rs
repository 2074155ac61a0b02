//! Elm-architecture Model implementation.

use gridui_core::{
    Cell, Point, Range,
    app::Effect,
    grid::Grid,
    messages::{Key, ModMask, MouseAction, Msg},
    style::{AttrMask, Style},
};
use gridui_paths::euclidean2;

use crate::colors::*;
use crate::effects::{AreaEffect, Projectile};
use crate::engine::{Outcome, Phase, Session};
use crate::weapons::{PlayerAction, Weapon};

/// Rows reserved for the message log above the grid.
const LOG_LINES: i32 = 2;
/// Rows below the grid: status line + weapon bar.
const FOOTER_LINES: i32 = 2;

pub const UI_WIDTH: i32 = 47;
pub const UI_HEIGHT: i32 = LOG_LINES + 30 + FOOTER_LINES;

/// Top-left of the grid on screen.
const MAP_ORIGIN: Point = Point::new(0, LOG_LINES);

const HELP_TEXT: &[&str] = &[
    "Skirmish",
    "",
    "Arrow keys move. Bumping an enemy hurts you both.",
    "Select a weapon with 1-6 or by clicking the bar.",
    "",
    "Sword: SPACE strikes an adjacent enemy.",
    "Gun:   click a cell to shoot a bullet.",
    "Bow:   arrow keys loose an arrow that way.",
    "Spell: click a cell to blast everything nearby.",
    "Mine:  click a cell to arm a mine.",
    "Laser: press L to fire in all four directions.",
    "",
    "? shows this screen again. Q or Esc quits.",
    "",
    "Press any key to start.",
];

/// UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Help,
    Playing,
    GameOver,
}

/// The Skirmish game model.
pub struct SkirmishModel {
    session: Session,
    mode: Mode,
}

impl SkirmishModel {
    pub fn new() -> Self {
        Self::with_session(Session::new(crate::config::Config::default()))
    }

    /// Build a model around an existing session (deterministic in tests).
    pub fn with_session(session: Session) -> Self {
        Self {
            session,
            mode: Mode::Help,
        }
    }
}

impl Default for SkirmishModel {
    fn default() -> Self {
        Self::new()
    }
}

impl gridui_core::app::Model for SkirmishModel {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        // Quit is honoured in every mode.
        if let Msg::KeyDown { key, modifiers, .. } = &msg {
            let ctrl_c = *key == Key::Char('c') && modifiers.contains(ModMask::CTRL);
            if ctrl_c || *key == Key::Escape || matches!(key, Key::Char('q' | 'Q')) {
                return Some(Effect::End);
            }
        }
        if matches!(msg, Msg::Quit) {
            return Some(Effect::End);
        }

        match self.mode {
            Mode::Help => self.update_help(msg),
            Mode::Playing => self.update_playing(msg),
            Mode::GameOver => None,
        }
    }

    fn draw(&self, grid: &mut Grid) {
        grid.fill(Cell::default());
        match self.mode {
            Mode::Help => self.draw_help(grid),
            _ => {
                self.draw_log(grid);
                self.draw_map(grid);
                self.draw_status(grid);
                self.draw_weapon_bar(grid);
            }
        }
    }
}

impl SkirmishModel {
    // -------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------

    fn update_help(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::KeyDown { .. }
            | Msg::Mouse {
                action: MouseAction::Main,
                ..
            } => {
                self.mode = Mode::Playing;
            }
            _ => {}
        }
        None
    }

    fn update_playing(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Tick { .. } => {
                self.session.tick();
                if self.session.is_over() {
                    self.mode = Mode::GameOver;
                }
            }
            Msg::KeyDown { key, .. } => self.handle_key(key),
            Msg::Mouse {
                action: MouseAction::Main,
                pos,
                ..
            } => self.handle_click(pos),
            _ => {}
        }
        None
    }

    fn handle_key(&mut self, key: Key) {
        // Mirrors the engine's own gate: input only lands on the player's
        // turn, and '?' is the one key that works while resolving too.
        if key == Key::Char('?') {
            self.mode = Mode::Help;
            return;
        }
        if self.session.phase != Phase::PlayerInput {
            return;
        }

        match key {
            Key::Char(c @ '1'..='6') => {
                let idx = (c as usize) - ('1' as usize);
                self.session.player.weapon = Weapon::ALL[idx];
            }
            Key::ArrowLeft | Key::ArrowRight | Key::ArrowUp | Key::ArrowDown => {
                let dir = match key {
                    Key::ArrowLeft => Point::new(-1, 0),
                    Key::ArrowRight => Point::new(1, 0),
                    Key::ArrowUp => Point::new(0, -1),
                    _ => Point::new(0, 1),
                };
                let action = if self.session.player.weapon == Weapon::Bow {
                    PlayerAction::Bow(dir)
                } else {
                    PlayerAction::Move(dir)
                };
                self.session.act(action);
            }
            Key::Char(' ') => {
                if self.session.player.weapon == Weapon::Sword {
                    self.session.act(PlayerAction::Sword);
                }
            }
            Key::Char('l' | 'L') => {
                if self.session.player.weapon == Weapon::Laser {
                    self.session.act(PlayerAction::Laser);
                }
            }
            _ => {}
        }
    }

    fn handle_click(&mut self, pos: Point) {
        if self.session.phase != Phase::PlayerInput {
            return;
        }

        // Weapon bar first: selection clicks never consume the turn.
        if pos.y == weapon_bar_y(&self.session) {
            for (x0, x1, weapon) in weapon_bar_spans() {
                if pos.x >= x0 && pos.x < x1 {
                    self.session.player.weapon = weapon;
                    return;
                }
            }
            return;
        }

        // Grid clicks aim the click-targeted weapons. Clicks outside the
        // grid are not an action.
        let cell = pos - MAP_ORIGIN;
        if !self.session.config.in_grid(cell) {
            return;
        }
        let action = match self.session.player.weapon {
            Weapon::Gun => PlayerAction::Gun(cell),
            Weapon::Spell => PlayerAction::Spell(cell),
            Weapon::Mine => PlayerAction::Mine(cell),
            _ => return,
        };
        self.session.act(action);
    }

    // -------------------------------------------------------------------
    // Drawing
    // -------------------------------------------------------------------

    fn draw_log(&self, grid: &mut Grid) {
        let style = Style::default().with_fg(FG_DIM);
        let lines = self
            .session
            .log
            .recent_lines(UI_WIDTH as usize - 1, LOG_LINES as usize);
        for (y, line) in lines.iter().enumerate() {
            put_str(grid, Point::new(0, y as i32), line, style);
        }
    }

    fn draw_map(&self, grid: &mut Grid) {
        let s = &self.session;
        // Slice for clipping; grid coordinates stay absolute, so game
        // cells are drawn at `MAP_ORIGIN + cell`.
        let area = grid.slice(Range::new(
            MAP_ORIGIN.x,
            MAP_ORIGIN.y,
            MAP_ORIGIN.x + s.config.cols,
            MAP_ORIGIN.y + s.config.rows,
        ));

        // Floor.
        let floor = Cell::default()
            .with_char('.')
            .with_style(Style::default().with_fg(FG_DIM));
        area.fill(floor);

        // Armed mines.
        for mine in s.mines.iter().filter(|m| m.active) {
            area.set(
                MAP_ORIGIN + mine.pos,
                Cell::default()
                    .with_char('*')
                    .with_style(Style::default().with_fg(MINE_FG)),
            );
        }

        // Area-effect footprints.
        for fx in &s.area_effects {
            match fx {
                AreaEffect::Spell { center, radius, .. } => {
                    let r2 = radius * radius;
                    for p in s.config.bounds().iter() {
                        if euclidean2(p, *center) <= r2 {
                            area.set(
                                MAP_ORIGIN + p,
                                Cell::default()
                                    .with_char('░')
                                    .with_style(Style::default().with_fg(SPELL_FG)),
                            );
                        }
                    }
                }
                AreaEffect::Laser { origin, paths, .. } => {
                    for p in paths.iter().flatten() {
                        let ch = if p.y == origin.y { '-' } else { '|' };
                        area.set(
                            MAP_ORIGIN + *p,
                            Cell::default()
                                .with_char(ch)
                                .with_style(Style::default().with_fg(LASER_FG)),
                        );
                    }
                }
            }
        }

        // Projectiles in flight.
        for proj in &s.projectiles {
            if let Some(p) = proj.render_pos() {
                let (ch, fg) = match proj {
                    Projectile::Bullet { .. } => ('*', BULLET_FG),
                    Projectile::Arrow { dir, .. } => {
                        (if dir.y == 0 { '-' } else { '|' }, ARROW_FG)
                    }
                };
                area.set(
                    MAP_ORIGIN + p,
                    Cell::default()
                        .with_char(ch)
                        .with_style(Style::default().with_fg(fg)),
                );
            }
        }

        // Enemies, coloured by remaining health.
        for e in &s.enemies {
            area.set(
                MAP_ORIGIN + e.pos,
                Cell::default()
                    .with_char('e')
                    .with_style(Style::default().with_fg(health_color(e.health, e.max_health))),
            );
        }

        // Player on top.
        if s.player.is_alive() {
            area.set(
                MAP_ORIGIN + s.player.pos,
                Cell::default().with_char('@').with_style(
                    Style::default()
                        .with_fg(PLAYER_FG)
                        .with_attrs(AttrMask::BOLD),
                ),
            );
        }
    }

    fn draw_status(&self, grid: &mut Grid) {
        let s = &self.session;
        let y = MAP_ORIGIN.y + s.config.rows;

        let hp_style =
            Style::default().with_fg(health_color(s.player.health.max(0), s.player.max_health));
        put_str(
            grid,
            Point::new(0, y),
            &format!("HP {:>2}/{}", s.player.health.max(0), s.player.max_health),
            hp_style,
        );

        let msg = match s.phase {
            Phase::Over(Outcome::Victory) => "*** VICTORY *** press Q to quit",
            Phase::Over(Outcome::Defeat) => "*** DEFEAT *** press Q to quit",
            Phase::PlayerInput => "your move",
            _ => "resolving...",
        };
        put_str(
            grid,
            Point::new(10, y),
            msg,
            Style::default().with_fg(FG_EMPH),
        );
    }

    fn draw_weapon_bar(&self, grid: &mut Grid) {
        let y = weapon_bar_y(&self.session);
        for (x0, x1, weapon) in weapon_bar_spans() {
            let selected = self.session.player.weapon == weapon;
            let style = if selected {
                Style::default().with_fg(FG_EMPH).with_attrs(AttrMask::REVERSE)
            } else {
                Style::default().with_fg(FG)
            };
            let label = format!("{}:{}", weapon_number(weapon), weapon.name());
            debug_assert_eq!(label.len() as i32, x1 - x0);
            put_str(grid, Point::new(x0, y), &label, style);
        }
    }

    fn draw_help(&self, grid: &mut Grid) {
        let style = Style::default().with_fg(FG);
        for (i, line) in HELP_TEXT.iter().enumerate() {
            put_str(grid, Point::new(1, 1 + i as i32), line, style);
        }
    }
}

/// Screen row of the weapon bar.
fn weapon_bar_y(session: &Session) -> i32 {
    MAP_ORIGIN.y + session.config.rows + 1
}

/// Selection-bar key for a weapon ('1'..'6').
fn weapon_number(weapon: Weapon) -> char {
    let idx = Weapon::ALL.iter().position(|w| *w == weapon).unwrap_or(0);
    (b'1' + idx as u8) as char
}

/// Horizontal spans `(start, end)` of the weapon-bar labels, for drawing
/// and click hit-testing alike.
fn weapon_bar_spans() -> [(i32, i32, Weapon); 6] {
    let mut spans = [(0, 0, Weapon::Sword); 6];
    let mut x = 0;
    for (i, &weapon) in Weapon::ALL.iter().enumerate() {
        let len = 2 + weapon.name().len() as i32;
        spans[i] = (x, x + len, weapon);
        x += len + 2;
    }
    spans
}

/// Write a string into `grid` starting at `p`, clipped to the grid bounds.
fn put_str(grid: &Grid, p: Point, text: &str, style: Style) {
    for (i, ch) in text.chars().enumerate() {
        grid.set(
            p.shift(i as i32, 0),
            Cell::default().with_char(ch).with_style(style),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::entity::Character;
    use gridui_core::app::Model;
    use rand::prelude::*;
    use rand::rngs::SmallRng;
    use std::time::Instant;

    fn model_with_enemies(positions: &[(i32, i32)]) -> SkirmishModel {
        let mut session = Session::with_rng(Config::default(), SmallRng::seed_from_u64(3));
        session.enemies = positions
            .iter()
            .map(|&(x, y)| Character::new(Point::new(x, y), session.config.enemy_health))
            .collect();
        let mut model = SkirmishModel::with_session(session);
        // Leave the tutorial screen.
        model.update(Msg::key(Key::Enter));
        assert_eq!(model.mode, Mode::Playing);
        model
    }

    fn click(pos: Point) -> Msg {
        Msg::Mouse {
            action: MouseAction::Main,
            pos,
            modifiers: ModMask::NONE,
            time: Instant::now(),
        }
    }

    #[test]
    fn quit_keys_end_the_app_in_any_mode() {
        let mut m = model_with_enemies(&[(0, 0)]);
        assert!(matches!(m.update(Msg::key(Key::Escape)), Some(Effect::End)));
        let mut m = SkirmishModel::with_session(Session::with_rng(
            Config::default(),
            SmallRng::seed_from_u64(3),
        ));
        assert!(matches!(
            m.update(Msg::key(Key::Char('q'))),
            Some(Effect::End)
        ));
    }

    #[test]
    fn number_keys_select_weapons() {
        let mut m = model_with_enemies(&[(0, 0)]);
        assert_eq!(m.session.player.weapon, Weapon::Sword);
        m.update(Msg::key(Key::Char('2')));
        assert_eq!(m.session.player.weapon, Weapon::Gun);
        m.update(Msg::key(Key::Char('6')));
        assert_eq!(m.session.player.weapon, Weapon::Laser);
        // Selection is not an action: the turn is still the player's.
        assert_eq!(m.session.phase, Phase::PlayerInput);
    }

    #[test]
    fn arrows_move_unless_the_bow_is_drawn() {
        let mut m = model_with_enemies(&[(0, 0)]);
        m.update(Msg::key(Key::ArrowRight));
        assert_eq!(m.session.player.pos, Point::new(16, 15));
        assert!(m.session.projectiles.is_empty());

        m.update(Msg::tick()); // enemy phase, turn comes back
        m.update(Msg::key(Key::Char('3')));
        m.update(Msg::key(Key::ArrowRight));
        assert_eq!(m.session.player.pos, Point::new(16, 15));
        assert_eq!(m.session.projectiles.len(), 1);
        assert_eq!(m.session.phase, Phase::ResolvingActions);
    }

    #[test]
    fn sword_swing_at_nothing_keeps_the_turn() {
        let mut m = model_with_enemies(&[(0, 0)]);
        m.update(Msg::key(Key::Char(' ')));
        assert_eq!(m.session.phase, Phase::PlayerInput);
    }

    #[test]
    fn grid_clicks_fire_the_selected_weapon() {
        let mut m = model_with_enemies(&[(0, 0)]);
        m.update(Msg::key(Key::Char('2')));
        m.update(click(Point::new(5, MAP_ORIGIN.y + 5)));
        assert_eq!(m.session.projectiles.len(), 1);
        assert_eq!(m.session.phase, Phase::ResolvingActions);
    }

    #[test]
    fn clicks_outside_the_grid_are_not_an_action() {
        let mut m = model_with_enemies(&[(0, 0)]);
        m.update(Msg::key(Key::Char('2')));
        m.update(click(Point::new(40, MAP_ORIGIN.y + 5)));
        assert!(m.session.projectiles.is_empty());
        assert_eq!(m.session.phase, Phase::PlayerInput);
    }

    #[test]
    fn weapon_bar_click_selects_without_acting() {
        let mut m = model_with_enemies(&[(0, 0)]);
        let y = weapon_bar_y(&m.session);
        let (x0, _, _) = weapon_bar_spans()[3];
        m.update(click(Point::new(x0, y)));
        assert_eq!(m.session.player.weapon, Weapon::Spell);
        assert_eq!(m.session.phase, Phase::PlayerInput);
    }

    #[test]
    fn victory_moves_to_game_over_mode() {
        let mut m = model_with_enemies(&[(14, 15)]);
        m.session.enemies[0].health = 2;
        m.update(Msg::key(Key::Char(' '))); // sword kills the last enemy
        m.update(Msg::tick());
        assert_eq!(m.mode, Mode::GameOver);
        assert_eq!(m.session.phase, Phase::Over(Outcome::Victory));
    }

    #[test]
    fn draw_renders_player_and_enemies() {
        use gridui_core::Grid;
        let m = model_with_enemies(&[(0, 0)]);
        let mut grid = Grid::new(UI_WIDTH, UI_HEIGHT);
        m.draw(&mut grid);
        assert_eq!(grid.at(Point::new(15, MAP_ORIGIN.y + 15)).ch, '@');
        assert_eq!(grid.at(Point::new(0, MAP_ORIGIN.y)).ch, 'e');
        // Weapon bar shows the default selection.
        assert_eq!(grid.at(Point::new(0, weapon_bar_y(&m.session))).ch, '1');
    }
}
