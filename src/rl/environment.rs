use super::observation::{Observation, create_observation};
use super::spaces::{ActionSpace, ObservationSpace};
use crate::error::Result;
use crate::game::{
    Action, Agent, EnvConfig, GameEngine, GameState, Position, StepInfo, StepResult, Target,
};

/// How `render` presents the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Drawn by the terminal UI renderer; `render` itself returns nothing
    #[default]
    Human,
    /// One-line text snapshot
    Console,
}

/// Result of stepping the environment
#[derive(Debug, Clone, PartialEq)]
pub struct EnvStep {
    pub observation: Observation,
    pub reward: f32,
    pub terminated: bool,
    pub info: StepInfo,
}

impl EnvStep {
    fn new(observation: Observation, result: StepResult) -> Self {
        Self {
            observation,
            reward: result.reward,
            terminated: result.terminated,
            info: result.info,
        }
    }
}

/// Chase environment for reinforcement learning
///
/// Wraps the game engine and provides the standard RL interface:
/// - 5-feature observations (agent x/y, target x/y, distance)
/// - Discrete action space (4 actions: Left, Right, Up, Down)
/// - `reset`, `step`, `render`
///
/// The policy is not owned by the environment; drivers in `crate::modes`
/// take both as parameters.
pub struct ChaseEnvironment {
    engine: GameEngine,
    state: GameState,
}

impl ChaseEnvironment {
    /// Create a new environment. The target starts at a random position.
    ///
    /// The configuration is not validated here; use `try_new` for
    /// configurations that come from outside.
    ///
    /// # Panics
    ///
    /// Panics if the spawn range is empty, i.e. when `blob_size` is more
    /// than half of `board_size`.
    pub fn new(config: EnvConfig) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.initial_state();
        Self { engine, state }
    }

    /// Create a new environment after validating the configuration
    pub fn try_new(config: EnvConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Move the agent back to the origin and return the observation.
    ///
    /// The score is not reset; use `reset_score` for that.
    pub fn reset(&mut self) -> Observation {
        self.engine.reset(&mut self.state);
        self.observation()
    }

    /// Step the environment with a discrete action
    ///
    /// Actions:
    /// - 0: Left
    /// - 1: Right
    /// - 2: Up
    /// - 3: Down
    ///
    /// Any other index moves nothing and is scored as a move away from the
    /// target. Use `try_step` to reject it instead.
    pub fn step(&mut self, action_idx: usize) -> EnvStep {
        let action = Action::from_index(action_idx);
        if action.is_none() {
            log::debug!("ignoring out-of-range action {action_idx}");
        }

        let result = self.engine.step(&mut self.state, action);
        if result.info.captured {
            log::info!("target captured, score {}", result.info.score);
        }

        EnvStep::new(self.observation(), result)
    }

    /// Like `step`, but an out-of-range action is an error and leaves the state untouched
    pub fn try_step(&mut self, action_idx: usize) -> Result<EnvStep> {
        let action = Action::try_from(action_idx)?;
        Ok(self.step(action.index()))
    }

    /// Present the current frame
    ///
    /// `Console` returns a text snapshot; `Human` returns `None`, since the
    /// terminal renderer draws straight from `state()`.
    pub fn render(&self, mode: RenderMode) -> Option<String> {
        match mode {
            RenderMode::Human => None,
            RenderMode::Console => {
                let agent = self.state.agent.position();
                let target = self.state.target.position();
                let frame = format!(
                    "agent=({}, {}) target=({}, {}) distance={:.2} score={}",
                    agent.x,
                    agent.y,
                    target.x,
                    target.y,
                    self.state.distance(),
                    self.state.agent.score
                );
                log::debug!("{frame}");
                Some(frame)
            }
        }
    }

    /// Get current observation without stepping
    pub fn observation(&self) -> Observation {
        create_observation(&self.state)
    }

    pub fn action_space(&self) -> ActionSpace {
        ActionSpace::new()
    }

    pub fn observation_space(&self) -> ObservationSpace {
        ObservationSpace::for_config(self.engine.config())
    }

    pub fn config(&self) -> &EnvConfig {
        self.engine.config()
    }

    /// Get reference to current game state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn agent(&self) -> &Agent {
        &self.state.agent
    }

    pub fn target(&self) -> &Target {
        &self.state.target
    }

    pub fn score(&self) -> u32 {
        self.state.agent.score
    }

    pub fn reset_score(&mut self) {
        self.state.agent.score = 0;
    }

    /// Place the agent, for scripted scenarios
    pub fn set_agent_position(&mut self, position: Position) {
        self.state.agent.blob.position = position;
    }

    /// Place the target, for scripted scenarios
    pub fn set_target_position(&mut self, position: Position) {
        self.state.target.blob.position = position;
    }
}
