//! Headless driver: run a policy against the environment without a UI
//!
//! Each tick the driver asks the policy for an action, steps the
//! environment, renders it in the configured mode and logs the observation.
//! It stops when the step budget is spent or the stop predicate fires,
//! whichever comes first.
//!
//! # Example
//!
//! ```rust
//! use blob_chase::game::EnvConfig;
//! use blob_chase::modes::{HeadlessConfig, run_policy_loop};
//! use blob_chase::rl::{ChaseEnvironment, GreedyPolicy};
//!
//! let mut env = ChaseEnvironment::new(EnvConfig::seeded(1));
//! let mut policy = GreedyPolicy::new();
//! let config = HeadlessConfig { max_steps: 200, ..Default::default() };
//!
//! let stats = run_policy_loop(&mut env, &mut policy, &config, |_| false);
//! assert_eq!(stats.steps, 200);
//! ```

use crate::metrics::RunStats;
use crate::rl::{ChaseEnvironment, EnvStep, Policy, RenderMode};

/// Configuration for the headless driver
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Stop after this many steps
    pub max_steps: u64,

    /// Log the observation every N steps (0 disables)
    pub log_every: u64,

    /// Render mode used after every step; `Console` frames go to the debug log
    pub render_mode: RenderMode,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            log_every: 1,
            render_mode: RenderMode::Console,
        }
    }
}

/// Drive `policy` against `env` until the budget is spent or `should_stop`
/// returns true for a step. Terminated episodes are reset here.
pub fn run_policy_loop<P, F>(
    env: &mut ChaseEnvironment,
    policy: &mut P,
    config: &HeadlessConfig,
    mut should_stop: F,
) -> RunStats
where
    P: Policy,
    F: FnMut(&EnvStep) -> bool,
{
    let mut stats = RunStats::new();
    let mut obs = env.reset();

    log::info!(
        "running policy '{}' for up to {} steps",
        policy.name(),
        config.max_steps
    );

    while stats.steps < config.max_steps {
        let (action, _state) = policy.predict(&obs);
        let step = env.step(action);
        stats.record_step(&step);

        env.render(config.render_mode);

        if config.log_every > 0 && stats.steps % config.log_every == 0 {
            log::info!(
                "step {} obs {} reward {:+}",
                stats.steps,
                step.observation,
                step.reward
            );
        }

        let stop = should_stop(&step);

        obs = if step.terminated {
            stats.on_episode_start();
            env.reset()
        } else {
            step.observation
        };

        if stop {
            log::info!("stop requested after {} steps", stats.steps);
            break;
        }
    }

    stats.update();
    log::info!(
        "finished: {} steps, {} captures, {} episodes, mean reward {:.3}, high score {}, {}",
        stats.steps,
        stats.captures,
        stats.episodes,
        stats.mean_reward(),
        stats.high_score,
        stats.format_time()
    );

    stats
}
