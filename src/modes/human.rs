use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::interval;

use super::terminal::{Tui, cleanup_terminal, setup_terminal};
use crate::game::Action;
use crate::input::{InputHandler, KeyAction};
use crate::metrics::RunStats;
use crate::render::Renderer;
use crate::rl::ChaseEnvironment;

/// Keyboard control of the agent, scored by the same reward function a policy sees
pub struct HumanMode {
    env: ChaseEnvironment,
    stats: RunStats,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    pending_action: Option<Action>,
}

impl HumanMode {
    pub fn new(mut env: ChaseEnvironment) -> Self {
        env.reset();

        Self {
            env,
            stats: RunStats::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_action: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;
        let result = self.run_game_loop(&mut terminal).await;
        cleanup_terminal(&mut terminal)?;

        log::info!("final score {} after {} moves", self.env.score(), self.stats.steps);
        result
    }

    async fn run_game_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Game ticks at 8 Hz (125ms per tick)
        let mut tick_timer = interval(Duration::from_millis(125));

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        while !self.should_quit {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.stats.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.env.state(), &self.stats, "mode: human");
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::GameAction(action) => self.pending_action = Some(action),
                KeyAction::Restart => self.reset_game(),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::TogglePause | KeyAction::Speed(_) | KeyAction::None => {}
            }
        }
    }

    /// The agent only moves on ticks where a key was pressed
    fn update_game(&mut self) {
        let Some(action) = self.pending_action.take() else {
            return;
        };

        let step = self.env.step(action.index());
        self.stats.record_step(&step);

        if step.terminated {
            self.stats.on_episode_start();
            self.env.reset();
        }
    }

    fn reset_game(&mut self) {
        self.env.reset();
        self.stats.on_episode_start();
        self.pending_action = None;
    }
}
