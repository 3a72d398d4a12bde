use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info};

use super::scheduler::TickScheduler;
use crate::game::{GameConfig, GameEngine, GameOutcome, RunState, TickSpeed};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::persistence::{FileHighScore, HighScoreStore};
use crate::render::Renderer;

/// How a handled key affects the tick timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerChange {
    Keep,
    /// Start a fresh interval from now
    Restart,
    Speed(TickSpeed),
}

pub struct HumanMode<S = FileHighScore> {
    engine: GameEngine,
    store: S,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    speed: TickSpeed,
    should_quit: bool,
}

impl<S: HighScoreStore> HumanMode<S> {
    /// Loads the high score from `store` right away
    pub fn new(config: GameConfig, speed: TickSpeed, store: S) -> Self {
        let mut engine = GameEngine::new(config);
        engine.set_high_score(store.load());

        Self {
            engine,
            store,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            speed,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
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
        let mut event_stream = EventStream::new();

        let mut scheduler = TickScheduler::new(self.speed);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        info!(speed = %self.speed, high_score = self.engine.state().high_score, "session started");

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        match self.handle_event(event) {
                            TimerChange::Keep => {}
                            TimerChange::Restart => scheduler.restart(),
                            TimerChange::Speed(speed) => scheduler.set_speed(speed),
                        }
                    }
                }

                // Game logic tick
                _ = scheduler.tick() => {
                    if self.engine.run_state().is_running() {
                        self.update_game();
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.engine.state(), &self.metrics, self.speed);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!(games = self.metrics.games_played, "session ended");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> TimerChange {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return TimerChange::Keep;
            }

            let action = self.input_handler.handle_key_event(key);
            return self.handle_action(action);
        }

        TimerChange::Keep
    }

    fn handle_action(&mut self, action: KeyAction) -> TimerChange {
        match action {
            KeyAction::Turn(direction) => {
                if matches!(self.engine.run_state(), RunState::Running | RunState::Paused) {
                    self.engine.request_direction(direction);
                }
                TimerChange::Keep
            }
            KeyAction::TogglePause => match self.engine.toggle_pause() {
                RunState::Paused => {
                    self.metrics.on_pause();
                    TimerChange::Keep
                }
                RunState::Running => {
                    self.metrics.on_resume();
                    TimerChange::Restart
                }
                _ => TimerChange::Keep,
            },
            KeyAction::Start => match self.engine.run_state() {
                RunState::NotStarted => {
                    self.engine.start();
                    self.on_new_game()
                }
                RunState::GameOver(_) => {
                    self.engine.restart();
                    self.on_new_game()
                }
                _ => TimerChange::Keep,
            },
            KeyAction::Restart => {
                self.engine.restart();
                self.on_new_game()
            }
            KeyAction::Faster => self.change_speed(self.speed.faster()),
            KeyAction::Slower => self.change_speed(self.speed.slower()),
            KeyAction::Quit => {
                self.should_quit = true;
                TimerChange::Keep
            }
            KeyAction::None => TimerChange::Keep,
        }
    }

    fn on_new_game(&mut self) -> TimerChange {
        self.metrics.on_game_start();
        // A board too small for more than the starting snake ends immediately
        if self.engine.run_state().is_game_over() {
            self.finish_game();
        }
        TimerChange::Restart
    }

    fn change_speed(&mut self, speed: TickSpeed) -> TimerChange {
        if speed == self.speed {
            return TimerChange::Keep;
        }
        debug!(from = %self.speed, to = %speed, "speed changed");
        self.speed = speed;
        TimerChange::Speed(speed)
    }

    fn update_game(&mut self) {
        let result = self.engine.step();

        if result.outcome.is_some() {
            self.finish_game();
        }
    }

    fn finish_game(&mut self) {
        let won = self.engine.run_state() == RunState::GameOver(GameOutcome::Won);
        let new_record = self.engine.record_game_over(&mut self.store);
        self.metrics.on_game_over(won, new_record);
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
