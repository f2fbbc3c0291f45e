//! Screen state machine
//!
//! ```text
//! Menu ──play──▶ Playing ──crash / out of lives──▶ GameOver
//!  ▲ │                                                │
//!  │ └─settings─▶ Settings ──back (commit)──▶ Menu    │
//!  └──────────────────────────enter────────────────────┘
//! ```
//!
//! [`App::advance`] is the whole loop body: feed it the events gathered since
//! the last tick and it updates the screen and, while playing, moves the snake
//! one cell. It never touches the terminal, so sessions can be driven from tests
//! or replayed from a seed.

use std::time::Duration;

use crate::game::{
    Action, Direction, EndReason, GameConfig, GameEngine, GameResult, GameState, Question,
    Settings,
};
use crate::input::{InputEvent, Key};
use crate::metrics::SessionStats;

use super::widgets::{FormAction, MainMenu, MenuItem, SettingsForm};

/// Terminal size assumed until the first resize arrives
pub const DEFAULT_VIEWPORT: (u16, u16) = (80, 30);

/// Final numbers of a finished round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub score: u32,
    pub reason: EndReason,
    pub steps: u32,
    pub best_score: u32,
    pub accuracy: Option<f32>,
    /// The question that was on screen when the round ended
    pub last_question: Question,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Menu(MainMenu),
    Settings(SettingsForm),
    Playing(GameState),
    GameOver(RoundSummary),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Menu,
    Settings,
    Playing,
    GameOver,
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Menu(_) => ScreenKind::Menu,
            Screen::Settings(_) => ScreenKind::Settings,
            Screen::Playing(_) => ScreenKind::Playing,
            Screen::GameOver(_) => ScreenKind::GameOver,
        }
    }
}

/// Whether the outer loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

enum Command {
    StartRound,
    OpenSettings,
    CommitSettings(Settings),
    ReturnToMenu,
}

impl From<MenuItem> for Command {
    fn from(item: MenuItem) -> Self {
        match item {
            MenuItem::Play => Command::StartRound,
            MenuItem::Settings => Command::OpenSettings,
        }
    }
}

/// One process-lifetime game session: settings, engine, stats and the current screen
pub struct App {
    config: GameConfig,
    settings: Settings,
    engine: GameEngine,
    screen: Screen,
    stats: SessionStats,
    viewport: (u16, u16),
    pending_direction: Option<Direction>,
}

impl App {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        log::info!("session seed {seed}");
        Self {
            engine: GameEngine::new(config.clone(), seed),
            config,
            settings: Settings::default(),
            screen: Screen::Menu(MainMenu::new(DEFAULT_VIEWPORT)),
            stats: SessionStats::new(),
            viewport: DEFAULT_VIEWPORT,
            pending_direction: None,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn kind(&self) -> ScreenKind {
        self.screen.kind()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn viewport(&self) -> (u16, u16) {
        self.viewport
    }

    /// The running round, if any
    pub fn playing(&self) -> Option<&GameState> {
        match &self.screen {
            Screen::Playing(state) => Some(state),
            _ => None,
        }
    }

    pub fn playing_mut(&mut self) -> Option<&mut GameState> {
        match &mut self.screen {
            Screen::Playing(state) => Some(state),
            _ => None,
        }
    }

    /// Slow steps while playing, snappy polling everywhere else
    pub fn tick_interval(&self) -> Duration {
        match self.kind() {
            ScreenKind::Playing => self.config.play_tick(),
            _ => self.config.menu_tick(),
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
        match &mut self.screen {
            Screen::Menu(menu) => menu.relayout(self.viewport),
            Screen::Settings(form) => form.relayout(self.viewport),
            _ => {}
        }
    }

    /// Run one tick: apply `events` in order, then step the round if one was
    /// already running when the tick began.
    ///
    /// Quit stops processing immediately, from any screen.
    pub fn advance(&mut self, events: &[InputEvent]) -> GameResult<Flow> {
        let was_playing = self.kind() == ScreenKind::Playing;

        for &event in events {
            match event {
                InputEvent::Quit => return Ok(Flow::Quit),
                InputEvent::Resize { width, height } => self.resize(width, height),
                other => self.handle_input(other)?,
            }
        }

        if was_playing {
            self.step_round()?;
        }

        Ok(Flow::Continue)
    }

    fn handle_input(&mut self, event: InputEvent) -> GameResult<()> {
        let command = match (&mut self.screen, event) {
            (Screen::Menu(menu), InputEvent::Key(Key::Up | Key::Down)) => {
                menu.toggle_focus();
                None
            }
            (Screen::Menu(menu), InputEvent::Key(Key::Enter)) => Some(Command::from(menu.focus)),
            (Screen::Menu(menu), InputEvent::Click { column, row }) => {
                menu.hit(column, row).map(Command::from)
            }

            (Screen::Settings(form), InputEvent::Key(Key::Up)) => {
                form.focus_previous();
                None
            }
            (Screen::Settings(form), InputEvent::Key(Key::Down)) => {
                form.focus_next();
                None
            }
            (Screen::Settings(form), InputEvent::Key(Key::Enter)) => {
                let action = form.activate_focused();
                Self::form_command(form, action)
            }
            (Screen::Settings(form), InputEvent::Click { column, row }) => {
                let action = form.click(column, row);
                Self::form_command(form, action)
            }

            (Screen::Playing(state), InputEvent::Key(key)) => {
                // Latest non-reversing request wins; the engine applies it next step
                if let Some(direction) = key.direction() {
                    if !state.snake.direction.is_opposite(direction) {
                        self.pending_direction = Some(direction);
                    }
                }
                None
            }

            (Screen::GameOver(_), InputEvent::Key(Key::Enter)) => Some(Command::ReturnToMenu),

            _ => None,
        };

        match command {
            Some(command) => self.apply(command),
            None => Ok(()),
        }
    }

    fn form_command(form: &SettingsForm, action: FormAction) -> Option<Command> {
        match action {
            FormAction::Back => Some(Command::CommitSettings(form.to_settings())),
            FormAction::Toggled(option) => {
                log::debug!("settings form toggled {option:?}");
                None
            }
            FormAction::Nothing => None,
        }
    }

    fn apply(&mut self, command: Command) -> GameResult<()> {
        match command {
            Command::StartRound => {
                let state = self.engine.reset(&self.settings)?;
                self.pending_direction = None;
                self.stats.on_round_start();
                self.screen = Screen::Playing(state);
            }
            Command::OpenSettings => {
                self.screen = Screen::Settings(SettingsForm::new(&self.settings, self.viewport));
            }
            Command::CommitSettings(settings) => {
                log::info!(
                    "settings: functions {:?}, quadrants {:?}",
                    settings.enabled_functions(),
                    settings.enabled_quadrants()
                );
                self.settings = settings;
                self.screen = Screen::Menu(MainMenu::new(self.viewport));
            }
            Command::ReturnToMenu => {
                self.screen = Screen::Menu(MainMenu::new(self.viewport));
            }
        }
        Ok(())
    }

    fn step_round(&mut self) -> GameResult<()> {
        let Screen::Playing(state) = &mut self.screen else {
            return Ok(());
        };

        let action = Action::from(self.pending_direction.take());
        let result = self.engine.step(state, action, &self.settings)?;

        if let Some(pickup) = &result.info.pickup {
            self.stats.on_pickup(pickup);
        }
        self.stats.update();

        let (true, Some(reason)) = (result.terminated, result.info.end_reason) else {
            return Ok(());
        };

        self.stats.on_round_over(state.score);
        let summary = RoundSummary {
            score: state.score,
            reason,
            steps: state.steps,
            best_score: self.stats.best_score,
            accuracy: self.stats.accuracy(),
            last_question: state.question.clone(),
        };
        self.screen = Screen::GameOver(summary);
        Ok(())
    }
}
