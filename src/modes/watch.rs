//! Watch mode: see a policy chase the target in the terminal
//!
//! The policy is queried on every tick; the renderer is called explicitly
//! after each step. Quitting (q, Esc, Ctrl+C) ends the loop on the next pass.
//!
//! # Controls
//!
//! - Space: Pause/unpause
//! - R: Reset episode
//! - 1-4: Speed control (1=slow, 2=normal, 3=fast, 4=very fast)
//! - Q/Esc: Quit

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::{Interval, interval};

use super::terminal::{Tui, cleanup_terminal, setup_terminal};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::RunStats;
use crate::render::Renderer;
use crate::rl::{ChaseEnvironment, Observation, Policy};

/// Tick speed settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickSpeed {
    /// Slow: 2 Hz (500ms per step)
    Slow,
    /// Normal: 8 Hz (125ms per step)
    Normal,
    /// Fast: 20 Hz (50ms per step)
    Fast,
    /// Very Fast: 60 Hz (16ms per step)
    VeryFast,
}

impl TickSpeed {
    /// Speed for a number key, 1 to 4
    pub fn from_preset(preset: u8) -> Option<Self> {
        match preset {
            1 => Some(Self::Slow),
            2 => Some(Self::Normal),
            3 => Some(Self::Fast),
            4 => Some(Self::VeryFast),
            _ => None,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(500),
            Self::Normal => Duration::from_millis(125),
            Self::Fast => Duration::from_millis(50),
            Self::VeryFast => Duration::from_millis(16),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
            Self::VeryFast => "Very Fast",
        }
    }
}

/// Terminal driver for a policy
pub struct WatchMode<P: Policy> {
    env: ChaseEnvironment,
    policy: P,
    renderer: Renderer,
    input_handler: InputHandler,
    stats: RunStats,
    observation: Observation,
    should_quit: bool,
    paused: bool,
    speed: TickSpeed,
}

impl<P: Policy> WatchMode<P> {
    pub fn new(mut env: ChaseEnvironment, policy: P) -> Self {
        let observation = env.reset();
        Self {
            env,
            policy,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            stats: RunStats::new(),
            observation,
            should_quit: false,
            paused: false,
            speed: TickSpeed::Normal,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;
        let result = self.run_loop(&mut terminal).await;
        cleanup_terminal(&mut terminal)?;

        log::info!(
            "watch finished: {} steps, {} captures, score {}",
            self.stats.steps,
            self.stats.captures,
            self.env.score()
        );
        result
    }

    async fn run_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.speed.tick_interval());

        // Render at 30 FPS
        let mut render_timer = interval(Duration::from_millis(33));

        while !self.should_quit {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut tick_timer);
                    }
                }

                _ = tick_timer.tick() => {
                    if !self.paused {
                        self.tick();
                    }
                }

                _ = render_timer.tick() => {
                    self.stats.update();
                    let status = self.status_line();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.env.state(), &self.stats, &status);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }
        }

        Ok(())
    }

    /// Query the policy once and advance the environment one step
    fn tick(&mut self) {
        let (action, _state) = self.policy.predict(&self.observation);
        let step = self.env.step(action);
        self.stats.record_step(&step);

        self.observation = if step.terminated {
            self.stats.on_episode_start();
            self.env.reset()
        } else {
            step.observation
        };
    }

    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::TogglePause => self.paused = !self.paused,
            KeyAction::Restart => {
                self.observation = self.env.reset();
                self.stats.on_episode_start();
            }
            KeyAction::Speed(preset) => {
                if let Some(speed) = TickSpeed::from_preset(preset) {
                    self.speed = speed;
                    tick_timer.reset_after(speed.tick_interval());
                }
            }
            // The policy drives; movement keys are ignored here
            KeyAction::GameAction(_) | KeyAction::None => {}
        }
    }

    fn status_line(&self) -> String {
        let mut status = format!(
            "policy: {} | speed: {} | episode: {} | captures: {}",
            self.policy.name(),
            self.speed.as_str(),
            self.stats.episodes,
            self.stats.captures
        );
        if self.paused {
            status.push_str(" | PAUSED");
        }
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{EnvConfig, Position};
    use crate::rl::GreedyPolicy;

    #[test]
    fn test_tick_speed() {
        assert_eq!(TickSpeed::Slow.tick_interval(), Duration::from_millis(500));
        assert_eq!(TickSpeed::Normal.tick_interval(), Duration::from_millis(125));
        assert_eq!(TickSpeed::Fast.tick_interval(), Duration::from_millis(50));
        assert_eq!(TickSpeed::VeryFast.tick_interval(), Duration::from_millis(16));

        assert_eq!(TickSpeed::from_preset(3), Some(TickSpeed::Fast));
        assert_eq!(TickSpeed::from_preset(0), None);
    }

    #[test]
    fn test_tick_moves_agent_toward_target() {
        let mut env = ChaseEnvironment::new(EnvConfig::seeded(12));
        env.set_target_position(Position::new(300, 100));
        let mut mode = WatchMode::new(env, GreedyPolicy::new());

        mode.tick();
        mode.tick();

        assert_eq!(mode.env.agent().position(), Position::new(20, 0));
        assert_eq!(mode.observation, mode.env.observation());
        assert_eq!(mode.stats.steps, 2);
    }

    #[test]
    fn test_status_line() {
        let env = ChaseEnvironment::new(EnvConfig::seeded(12));
        let mut mode = WatchMode::new(env, GreedyPolicy::new());

        assert!(mode.status_line().starts_with("policy: greedy | speed: Normal"));
        mode.paused = true;
        assert!(mode.status_line().ends_with("PAUSED"));
    }
}
