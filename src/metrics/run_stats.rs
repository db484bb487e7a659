use std::time::{Duration, Instant};

use crate::rl::EnvStep;

/// Running totals for a driver session
#[derive(Debug, Clone)]
pub struct RunStats {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub steps: u64,
    pub captures: u32,
    pub episodes: u32,
    pub total_reward: f64,
    pub last_reward: f32,
    /// Best score seen at any step
    pub high_score: u32,
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            steps: 0,
            captures: 0,
            episodes: 1,
            total_reward: 0.0,
            last_reward: 0.0,
            high_score: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn record_step(&mut self, step: &EnvStep) {
        self.steps += 1;
        self.total_reward += f64::from(step.reward);
        self.last_reward = step.reward;
        if step.info.captured {
            self.captures += 1;
        }
        self.high_score = self.high_score.max(step.info.score);
    }

    /// A new episode started (explicit reset or terminated capture)
    pub fn on_episode_start(&mut self) {
        self.episodes += 1;
    }

    pub fn mean_reward(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.total_reward / self.steps as f64
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}
