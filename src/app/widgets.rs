//! Menu and settings controls, laid out in terminal cells
//!
//! Hit-testing lives here rather than in the renderer so the state machine can
//! resolve clicks without a terminal.

use crate::game::{Quadrant, Settings, TrigFunction};

/// A rectangle of terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Area {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Area {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x && column < self.right() && row >= self.y && row < self.bottom()
    }

    /// Grow by `margin` cells on every side
    pub fn inflate(&self, margin: u16) -> Self {
        let x = self.x.saturating_sub(margin);
        let y = self.y.saturating_sub(margin);
        Self {
            x,
            y,
            width: self.right().saturating_add(margin) - x,
            height: self.bottom().saturating_add(margin) - y,
        }
    }

    /// A `width`x`height` area centered horizontally on `center_x` starting at row `y`
    pub fn centered_at(center_x: u16, y: u16, width: u16, height: u16) -> Self {
        Self::new(center_x.saturating_sub(width / 2), y, width, height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub area: Area,
    pub label: &'static str,
}

impl Button {
    pub fn is_clicked(&self, column: u16, row: u16) -> bool {
        self.area.contains(column, row)
    }
}

/// What a settings checkbox controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingOption {
    Function(TrigFunction),
    Quadrant(Quadrant),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkbox {
    pub area: Area,
    pub label: String,
    pub option: SettingOption,
    pub checked: bool,
}

impl Checkbox {
    /// Clickable region, one cell larger than the box on every side
    pub fn hitbox(&self) -> Area {
        self.area.inflate(1)
    }

    pub fn is_clicked(&self, column: u16, row: u16) -> bool {
        self.hitbox().contains(column, row)
    }

    pub fn toggle(&mut self) {
        self.checked = !self.checked;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Play,
    Settings,
}

/// Title screen with Play and Settings buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainMenu {
    pub play: Button,
    pub settings: Button,
    pub focus: MenuItem,
}

impl MainMenu {
    const BUTTON_WIDTH: u16 = 20;
    const BUTTON_HEIGHT: u16 = 3;

    pub fn new(viewport: (u16, u16)) -> Self {
        let mut menu = Self {
            play: Button {
                area: Area::default(),
                label: "Play",
            },
            settings: Button {
                area: Area::default(),
                label: "Settings",
            },
            focus: MenuItem::Play,
        };
        menu.relayout(viewport);
        menu
    }

    pub fn relayout(&mut self, (width, height): (u16, u16)) {
        let center = width / 2;
        let middle = height / 2;
        self.play.area = Area::centered_at(
            center,
            middle.saturating_sub(Self::BUTTON_HEIGHT),
            Self::BUTTON_WIDTH,
            Self::BUTTON_HEIGHT,
        );
        self.settings.area = Area::centered_at(
            center,
            middle + 1,
            Self::BUTTON_WIDTH,
            Self::BUTTON_HEIGHT,
        );
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<MenuItem> {
        if self.play.is_clicked(column, row) {
            Some(MenuItem::Play)
        } else if self.settings.is_clicked(column, row) {
            Some(MenuItem::Settings)
        } else {
            None
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            MenuItem::Play => MenuItem::Settings,
            MenuItem::Settings => MenuItem::Play,
        };
    }
}

/// Result of interacting with the settings form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Toggled(SettingOption),
    Back,
    Nothing,
}

/// Checkbox form editing a copy of the settings; nothing is applied until Back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    pub checkboxes: Vec<Checkbox>,
    pub back: Button,
    /// Index into `checkboxes`; `checkboxes.len()` is the Back button
    pub focus: usize,
}

impl SettingsForm {
    const BOX_WIDTH: u16 = 5;
    const BOX_HEIGHT: u16 = 3;
    const ROW_PITCH: u16 = 5;
    const FIRST_ROW: u16 = 4;

    pub fn new(settings: &Settings, viewport: (u16, u16)) -> Self {
        let functions = TrigFunction::ALL.into_iter().map(|function| Checkbox {
            area: Area::default(),
            label: function.name().to_string(),
            option: SettingOption::Function(function),
            checked: settings.is_function_enabled(function),
        });
        let quadrants = Quadrant::ALL.into_iter().map(|quadrant| Checkbox {
            area: Area::default(),
            label: quadrant.to_string(),
            option: SettingOption::Quadrant(quadrant),
            checked: settings.is_quadrant_enabled(quadrant),
        });

        let mut form = Self {
            checkboxes: functions.chain(quadrants).collect(),
            back: Button {
                area: Area::default(),
                label: "Back",
            },
            focus: 0,
        };
        form.relayout(viewport);
        form
    }

    /// Functions in a left column, quadrants in a right one, Back centered below
    pub fn relayout(&mut self, (width, height): (u16, u16)) {
        let center = width / 2;
        let left = center.saturating_sub(26);
        let right = center + 2;

        let mut function_row = 0;
        let mut quadrant_row = 0;
        for checkbox in &mut self.checkboxes {
            let (x, row) = match checkbox.option {
                SettingOption::Function(_) => (left, &mut function_row),
                SettingOption::Quadrant(_) => (right, &mut quadrant_row),
            };
            checkbox.area = Area::new(
                x,
                Self::FIRST_ROW + *row * Self::ROW_PITCH,
                Self::BOX_WIDTH,
                Self::BOX_HEIGHT,
            );
            *row += 1;
        }

        let below_boxes = Self::FIRST_ROW + 4 * Self::ROW_PITCH;
        let back_row = height.saturating_sub(4).max(below_boxes);
        self.back.area = Area::centered_at(center, back_row, 12, 3);
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % (self.checkboxes.len() + 1);
    }

    pub fn focus_previous(&mut self) {
        let slots = self.checkboxes.len() + 1;
        self.focus = (self.focus + slots - 1) % slots;
    }

    pub fn is_back_focused(&self) -> bool {
        self.focus == self.checkboxes.len()
    }

    /// Enter on the focused control
    pub fn activate_focused(&mut self) -> FormAction {
        match self.checkboxes.get_mut(self.focus) {
            Some(checkbox) => {
                checkbox.toggle();
                FormAction::Toggled(checkbox.option)
            }
            None => FormAction::Back,
        }
    }

    pub fn click(&mut self, column: u16, row: u16) -> FormAction {
        if self.back.is_clicked(column, row) {
            return FormAction::Back;
        }

        match self
            .checkboxes
            .iter_mut()
            .find(|checkbox| checkbox.is_clicked(column, row))
        {
            Some(checkbox) => {
                checkbox.toggle();
                FormAction::Toggled(checkbox.option)
            }
            None => FormAction::Nothing,
        }
    }

    /// Settings as currently ticked in the form
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();
        for checkbox in &self.checkboxes {
            match checkbox.option {
                SettingOption::Function(function) => {
                    settings.set_function(function, checkbox.checked)
                }
                SettingOption::Quadrant(quadrant) => {
                    settings.set_quadrant(quadrant, checkbox.checked)
                }
            }
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: (u16, u16) = (80, 30);

    #[test]
    fn test_area_contains_and_inflate() {
        let area = Area::new(10, 5, 5, 3);
        assert!(area.contains(10, 5));
        assert!(area.contains(14, 7));
        assert!(!area.contains(15, 7));
        assert!(!area.contains(9, 5));

        let grown = area.inflate(1);
        assert_eq!(grown, Area::new(9, 4, 7, 5));
        assert_eq!(Area::new(0, 0, 2, 2).inflate(1), Area::new(0, 0, 3, 3));
    }

    #[test]
    fn test_menu_hit_testing() {
        let menu = MainMenu::new(VIEWPORT);
        let play = menu.play.area;
        let settings = menu.settings.area;

        assert_eq!(menu.hit(play.x + 1, play.y + 1), Some(MenuItem::Play));
        assert_eq!(menu.hit(settings.x, settings.y), Some(MenuItem::Settings));
        assert_eq!(menu.hit(0, 0), None);
        assert!(play.bottom() <= settings.y);
    }

    #[test]
    fn test_form_reflects_settings() {
        let mut settings = Settings::default();
        settings.tan = false;
        settings.quadrants[3] = false;

        let form = SettingsForm::new(&settings, VIEWPORT);
        assert_eq!(form.checkboxes.len(), 7);
        assert!(!form.checkboxes[2].checked);
        assert!(!form.checkboxes[6].checked);
        assert_eq!(form.checkboxes[3].label, "Quadrant 1");
        assert_eq!(form.to_settings(), settings);
    }

    #[test]
    fn test_checkbox_hitbox_is_inflated() {
        let mut form = SettingsForm::new(&Settings::default(), VIEWPORT);
        let area = form.checkboxes[0].area;

        // one cell left of the box still toggles it
        let action = form.click(area.x - 1, area.y);
        assert_eq!(action, FormAction::Toggled(SettingOption::Function(TrigFunction::Sin)));
        assert!(!form.to_settings().sin);
    }

    #[test]
    fn test_checkboxes_do_not_overlap() {
        let form = SettingsForm::new(&Settings::default(), VIEWPORT);
        for (i, a) in form.checkboxes.iter().enumerate() {
            for b in &form.checkboxes[i + 1..] {
                let a = a.hitbox();
                let b = b.hitbox();
                let disjoint = a.right() <= b.x
                    || b.right() <= a.x
                    || a.bottom() <= b.y
                    || b.bottom() <= a.y;
                assert!(disjoint, "{a:?} overlaps {b:?}");
            }
            assert!(!a.hitbox().contains(form.back.area.x, form.back.area.y));
        }
    }

    #[test]
    fn test_keyboard_focus_wraps_to_back() {
        let mut form = SettingsForm::new(&Settings::default(), VIEWPORT);
        form.focus_previous();
        assert!(form.is_back_focused());
        assert_eq!(form.activate_focused(), FormAction::Back);

        form.focus_next();
        assert_eq!(form.focus, 0);
        assert_eq!(
            form.activate_focused(),
            FormAction::Toggled(SettingOption::Function(TrigFunction::Sin))
        );
    }

    #[test]
    fn test_click_back() {
        let mut form = SettingsForm::new(&Settings::default(), VIEWPORT);
        let back = form.back.area;
        assert_eq!(form.click(back.x, back.y), FormAction::Back);
        assert_eq!(form.click(0, 0), FormAction::Nothing);
    }
}
