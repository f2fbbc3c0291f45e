//! Headless mode: an autopilot plays through the same state machine as a human
//!
//! Useful for soak-testing food placement and the round lifecycle with a fixed
//! seed, without a terminal.

use anyhow::Result;

use crate::app::{App, Flow, ScreenKind};
use crate::game::{Direction, GameConfig, GameState, Position};
use crate::input::{InputEvent, Key};

/// Configuration for a headless run
#[derive(Debug, Clone)]
pub struct SimulateConfig {
    /// Ticks to run before stopping
    pub steps: usize,

    pub seed: u64,

    pub game_config: GameConfig,

    /// Print a progress line every N finished rounds (0 disables)
    pub log_frequency: usize,
}

impl SimulateConfig {
    pub fn new(steps: usize, seed: u64, game_config: GameConfig) -> Self {
        Self {
            steps,
            seed,
            game_config,
            log_frequency: 10,
        }
    }
}

/// Totals from a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationReport {
    pub ticks: usize,
    pub rounds_finished: u32,
    pub best_score: u32,
    pub correct_pickups: u32,
    pub wrong_pickups: u32,
}

/// Greedy steering: head for the correct food, stay in bounds, avoid the body
/// and avoid brushing past a wrong answer when there is any other choice.
pub struct Autopilot {
    cell_size: f32,
    pickup_radius: f32,
}

impl Autopilot {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            cell_size: config.cell_size_px,
            pickup_radius: config.pickup_radius_px,
        }
    }

    /// Direction to request this tick, or `None` to keep the heading
    pub fn choose(&self, state: &GameState) -> Option<Direction> {
        let heading = state.snake.direction;
        let head = state.snake.head();
        let target = state.correct_food().map(|food| food.position);

        let candidates: Vec<(Direction, Position)> = Direction::ALL
            .into_iter()
            .filter(|direction| !heading.is_opposite(*direction))
            .map(|direction| (direction, head.moved_in_direction(direction)))
            .filter(|(_, next)| state.is_in_bounds(*next) && !state.snake.occupies(*next))
            .collect();

        let clean: Vec<(Direction, Position)> = candidates
            .iter()
            .copied()
            .filter(|(_, next)| !self.touches_wrong_food(state, *next))
            .collect();

        let pool = if clean.is_empty() { &candidates } else { &clean };

        let best = pool.iter().min_by_key(|(direction, next)| {
            let distance = target.map_or(0, |target| next.manhattan_distance(target));
            // prefer going straight on ties
            (distance, *direction != heading)
        })?;

        Some(best.0)
    }

    fn touches_wrong_food(&self, state: &GameState, position: Position) -> bool {
        state.foods.iter().any(|food| {
            !food.is_correct
                && position.pixel_distance(food.position, self.cell_size) < self.pickup_radius
        })
    }
}

/// Drives an [`App`] with synthetic input
pub struct SimulateMode {
    app: App,
    autopilot: Autopilot,
    config: SimulateConfig,
}

impl SimulateMode {
    pub fn new(config: SimulateConfig) -> Self {
        Self {
            app: App::new(config.game_config.clone(), config.seed),
            autopilot: Autopilot::new(&config.game_config),
            config,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Run the configured number of ticks and print a summary
    pub fn run(&mut self) -> Result<SimulationReport> {
        self.print_header();

        let mut ticks = 0;
        let mut rounds_seen = 0;
        while ticks < self.config.steps {
            let events = self.next_events();
            ticks += 1;
            if self.app.advance(&events)? == Flow::Quit {
                break;
            }

            let rounds = self.app.stats().rounds_played;
            if rounds != rounds_seen {
                rounds_seen = rounds;
                if self.config.log_frequency > 0
                    && rounds as usize % self.config.log_frequency == 0
                {
                    self.print_progress(ticks);
                }
            }
        }

        let report = self.report(ticks);
        self.print_summary(&report);
        Ok(report)
    }

    /// What the autopilot presses this tick
    fn next_events(&self) -> Vec<InputEvent> {
        match self.app.kind() {
            // Menu focus starts on Play
            ScreenKind::Menu | ScreenKind::GameOver => vec![InputEvent::Key(Key::Enter)],
            ScreenKind::Playing => self
                .app
                .playing()
                .and_then(|state| self.autopilot.choose(state))
                .map(|direction| vec![InputEvent::Key(Key::from(direction))])
                .unwrap_or_default(),
            ScreenKind::Settings => Vec::new(),
        }
    }

    fn report(&self, ticks: usize) -> SimulationReport {
        let stats = self.app.stats();
        SimulationReport {
            ticks,
            rounds_finished: stats.rounds_played,
            best_score: stats.best_score,
            correct_pickups: stats.correct_pickups,
            wrong_pickups: stats.wrong_pickups,
        }
    }

    fn print_header(&self) {
        let game = &self.config.game_config;
        println!("{}", "=".repeat(60));
        println!("Unit Circle Snake - headless simulation");
        println!("{}", "=".repeat(60));
        println!("Ticks: {}", self.config.steps);
        println!("Seed: {}", self.config.seed);
        println!("Grid: {}x{}", game.grid_width, game.grid_height);
        println!("{}", "=".repeat(60));
        println!();
    }

    fn print_progress(&self, ticks: usize) {
        let stats = self.app.stats();
        println!(
            "[Tick {}/{}] rounds {} | best {} | correct {} | wrong {}",
            ticks,
            self.config.steps,
            stats.rounds_played,
            stats.best_score,
            stats.correct_pickups,
            stats.wrong_pickups
        );
    }

    fn print_summary(&self, report: &SimulationReport) {
        let accuracy = self
            .app
            .stats()
            .accuracy()
            .map_or_else(|| "-".to_string(), |a| format!("{:.1}%", a * 100.0));

        println!();
        println!("{}", "=".repeat(60));
        println!("Ticks run: {}", report.ticks);
        println!("Rounds finished: {}", report.rounds_finished);
        println!("Best score: {}", report.best_score);
        println!(
            "Pickups: {} correct, {} wrong ({accuracy})",
            report.correct_pickups, report.wrong_pickups
        );
        println!("{}", "=".repeat(60));
    }
}
