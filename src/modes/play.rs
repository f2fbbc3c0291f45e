use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};

use crate::app::{App, Flow};
use crate::game::GameConfig;
use crate::input::{InputEvent, InputHandler};
use crate::render::{BufferSurface, Renderer};

/// Interactive session in the terminal
pub struct PlayMode {
    app: App,
    renderer: Renderer,
    input_handler: InputHandler,
    /// Events received since the last tick
    pending_events: Vec<InputEvent>,
}

impl PlayMode {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            app: App::new(config, seed),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            pending_events: Vec::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let size = terminal.size().context("Failed to read terminal size")?;
        self.app.resize(size.width, size.height);

        let mut event_stream = EventStream::new();

        // Snake speed while playing, UI polling rate elsewhere
        let mut period = self.app.tick_interval();
        let mut tick_timer = ticker(period);

        self.draw(terminal)?;

        loop {
            tokio::select! {
                // Buffer terminal events until the next tick
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => match self.input_handler.translate(&event) {
                            // Quit does not wait for the tick
                            Some(InputEvent::Quit) => break,
                            Some(input) => self.pending_events.push(input),
                            None => {}
                        },
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => break,
                    }
                }

                _ = tick_timer.tick() => {
                    let events = std::mem::take(&mut self.pending_events);
                    if self.app.advance(&events)? == Flow::Quit {
                        break;
                    }
                    self.draw(terminal)?;

                    let next = self.app.tick_interval();
                    if next != period {
                        period = next;
                        tick_timer = ticker(period);
                    }
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    break;
                }
            }
        }

        log::info!(
            "session over: {} rounds, best score {}",
            self.app.stats().rounds_played,
            self.app.stats().best_score
        );
        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let mut rendered = Ok(());
        terminal
            .draw(|frame| {
                let mut surface = BufferSurface::new(frame.buffer_mut());
                rendered = self.renderer.render(&mut surface, &self.app);
            })
            .context("Failed to draw frame")?;
        rendered.context("Failed to typeset frame")
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

fn ticker(period: Duration) -> Interval {
    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}
