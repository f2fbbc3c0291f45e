use crate::app::{
    App, Area, Button, Checkbox, MainMenu, MenuItem, RoundSummary, Screen, SettingOption,
    SettingsForm,
};
use crate::game::GameState;

use super::cache::RenderCache;
use super::math::{MathError, TerminalMath};
use super::surface::DrawSurface;
use super::TextColor;

/// Rows reserved above the board for the question and HUD
pub const QUESTION_BAR_ROWS: u16 = 5;
/// Font size of the question prompt
pub const QUESTION_SIZE: u16 = 32;
/// Font size of the values printed on food
pub const FOOD_SIZE: u16 = 14;
/// Terminal columns per board cell
pub const CELL_COLUMNS: u16 = 2;

pub struct Renderer {
    cache: RenderCache<TerminalMath>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::with_cache(RenderCache::new(TerminalMath::default()))
    }

    pub fn with_cache(cache: RenderCache<TerminalMath>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &RenderCache<TerminalMath> {
        &self.cache
    }

    /// Draw the current screen of `app` onto `surface`
    pub fn render<S: DrawSurface>(&mut self, surface: &mut S, app: &App) -> Result<(), MathError> {
        match app.screen() {
            Screen::Menu(menu) => self.render_menu(surface, menu),
            Screen::Settings(form) => self.render_settings(surface, form),
            Screen::Playing(state) => self.render_game(surface, state, app)?,
            Screen::GameOver(summary) => self.render_game_over(surface, summary)?,
        }
        surface.present();
        Ok(())
    }

    fn render_menu<S: DrawSurface>(&self, surface: &mut S, menu: &MainMenu) {
        let (width, height) = surface.size();

        centered_text(surface, 2, "Unit Circle Snake Game", TextColor::Cyan, true);
        centered_text(
            surface,
            3,
            "eat the value of the function, dodge the rest",
            TextColor::Gray,
            false,
        );

        draw_button(surface, &menu.play, menu.focus == MenuItem::Play);
        draw_button(surface, &menu.settings, menu.focus == MenuItem::Settings);

        if width >= 70 && height >= 16 {
            draw_unit_circle(surface, (width / 2 + 24, height / 2), 5);
        }

        centered_text(
            surface,
            height.saturating_sub(2),
            "↑↓ select  Enter confirm  click works too  Q quit",
            TextColor::DarkGray,
            false,
        );
    }

    fn render_settings<S: DrawSurface>(&self, surface: &mut S, form: &SettingsForm) {
        centered_text(surface, 0, "Settings", TextColor::Cyan, true);

        let mut headers = [("Functions", None::<Area>), ("Quadrants", None)];
        for checkbox in &form.checkboxes {
            let slot = match checkbox.option {
                SettingOption::Function(_) => &mut headers[0].1,
                SettingOption::Quadrant(_) => &mut headers[1].1,
            };
            slot.get_or_insert(checkbox.area);
        }
        for (title, first) in headers {
            if let Some(area) = first {
                surface.text(area.x, area.y.saturating_sub(2), title, TextColor::White, true);
            }
        }

        for (i, checkbox) in form.checkboxes.iter().enumerate() {
            draw_checkbox(surface, checkbox, form.focus == i);
        }
        draw_button(surface, &form.back, form.is_back_focused());
    }

    fn render_game<S: DrawSurface>(
        &mut self,
        surface: &mut S,
        state: &GameState,
        app: &App,
    ) -> Result<(), MathError> {
        let (width, height) = surface.size();
        let board = board_area(state);

        let needed_height = board.height.saturating_add(QUESTION_BAR_ROWS + 1);

        if board.width > width || needed_height > height {
            let message = format!("Terminal too small: need {}x{needed_height}", board.width);
            centered_text(surface, height / 2, &message, TextColor::LightRed, true);
            return Ok(());
        }

        // Question bar
        let question = self
            .cache
            .get_or_render(&state.question.prompt, QUESTION_SIZE, TextColor::White)?;
        let question_x = width.saturating_sub(question.width) / 2;
        surface.blit(question, question_x, 1);

        let stats = app.stats();
        surface.text(1, 1, &format!("Score: {}", state.score), TextColor::Yellow, true);
        surface.text(1, 2, &stats.format_time(), TextColor::Gray, false);

        let hearts = vec!["♥"; state.lives as usize].join(" ");
        let hearts_x = width.saturating_sub(hearts.chars().count() as u16 + 1);
        surface.text(hearts_x, 1, &hearts, TextColor::Red, false);

        // Board
        let origin = Area {
            x: width.saturating_sub(board.width) / 2,
            y: QUESTION_BAR_ROWS,
            ..board
        };
        surface.stroke_rect(origin, TextColor::White);

        let cell = |x: i32, y: i32| {
            Area::new(
                origin.x + 1 + x as u16 * CELL_COLUMNS,
                origin.y + 1 + y as u16,
                CELL_COLUMNS,
                1,
            )
        };

        for (i, segment) in state.snake.body.iter().enumerate() {
            if !state.is_in_bounds(*segment) {
                continue;
            }
            let color = if i == 0 { TextColor::Cyan } else { TextColor::Green };
            surface.fill_rect(cell(segment.x, segment.y), color);
        }

        for food in &state.foods {
            let label = self
                .cache
                .get_or_render(&food.value, FOOD_SIZE, TextColor::Yellow)?;
            let target = cell(food.position.x, food.position.y);
            let center = target.x + CELL_COLUMNS / 2;
            surface.blit(label, center.saturating_sub(label.width / 2), target.y);
        }

        centered_text(
            surface,
            origin.bottom(),
            "↑↓←→ / WASD move  Q quit",
            TextColor::DarkGray,
            false,
        );
        Ok(())
    }

    fn render_game_over<S: DrawSurface>(
        &mut self,
        surface: &mut S,
        summary: &RoundSummary,
    ) -> Result<(), MathError> {
        let (_, height) = surface.size();
        let top = (height / 2).saturating_sub(6);

        centered_text(surface, top, "Game Over", TextColor::Red, true);
        centered_text(
            surface,
            top + 2,
            &format!("Score: {}", summary.score),
            TextColor::Yellow,
            true,
        );
        centered_text(
            surface,
            top + 3,
            &format!("You {} after {} steps", summary.reason, summary.steps),
            TextColor::Gray,
            false,
        );

        let accuracy = summary
            .accuracy
            .map_or_else(|| "-".to_string(), |a| format!("{:.0}%", a * 100.0));
        centered_text(
            surface,
            top + 4,
            &format!("Best: {}   Accuracy: {accuracy}", summary.best_score),
            TextColor::Gray,
            false,
        );

        let question = &summary.last_question;
        let reveal = format!("{} = {}", question.prompt, question.answer);
        let image = self
            .cache
            .get_or_render(&reveal, QUESTION_SIZE, TextColor::White)?;
        let (width, _) = surface.size();
        surface.blit(image, width.saturating_sub(image.width) / 2, top + 6);
        let below = top + 6 + image.height() + 1;

        centered_text(
            surface,
            below,
            "Press Enter to return to menu",
            TextColor::DarkGray,
            false,
        );
        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Outer size of the bordered board for `state`, clamped to `u16`
fn board_area(state: &GameState) -> Area {
    let cells = |dim: usize| u16::try_from(dim).unwrap_or(u16::MAX);
    Area::new(
        0,
        0,
        cells(state.grid_width)
            .saturating_mul(CELL_COLUMNS)
            .saturating_add(2),
        cells(state.grid_height).saturating_add(2),
    )
}

fn centered_text<S: DrawSurface>(surface: &mut S, y: u16, text: &str, color: TextColor, bold: bool) {
    let (width, _) = surface.size();
    let x = width.saturating_sub(text.chars().count() as u16) / 2;
    surface.text(x, y, text, color, bold);
}

fn draw_button<S: DrawSurface>(surface: &mut S, button: &Button, focused: bool) {
    let border = if focused { TextColor::Yellow } else { TextColor::White };
    surface.rounded_rect(button.area, None, border);

    let label_width = button.label.chars().count() as u16;
    let x = button.area.x + button.area.width.saturating_sub(label_width) / 2;
    surface.text(x, button.area.y + button.area.height / 2, button.label, border, focused);
}

fn draw_checkbox<S: DrawSurface>(surface: &mut S, checkbox: &Checkbox, focused: bool) {
    let area = checkbox.area;
    let border = if focused { TextColor::Yellow } else { TextColor::White };
    surface.rounded_rect(area, None, border);

    if checkbox.checked {
        surface.text(area.x + area.width / 2, area.y + 1, "✔", TextColor::Green, true);
    }
    surface.text(area.right() + 2, area.y + 1, &checkbox.label, TextColor::White, false);
}

/// Menu decoration: axes, a unit circle and the π/6 wedge
fn draw_unit_circle<S: DrawSurface>(surface: &mut S, (cx, cy): (u16, u16), radius: u16) {
    let angle = std::f32::consts::FRAC_PI_6;
    let tip = (
        cx + (f32::from(radius * 2) * angle.cos()).round() as u16,
        cy - (f32::from(radius) * angle.sin()).round() as u16,
    );
    surface.polygon(&[(cx, cy), (cx + radius * 2, cy), tip], TextColor::Yellow);

    let reach = radius + 1;
    surface.line_strip(&[(cx - reach * 2, cy), (cx + reach * 2, cy)], TextColor::DarkGray);
    surface.line_strip(&[(cx, cy - reach), (cx, cy + reach)], TextColor::DarkGray);
    surface.line_strip(&[(cx, cy), tip], TextColor::Magenta);

    surface.circle((cx, cy), radius, TextColor::Cyan, false);
    surface.text(cx + radius * 2 + 3, cy, "π/6", TextColor::Yellow, false);
}
