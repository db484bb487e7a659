use rand::{SeedableRng, rngs::StdRng};

use super::{
    action::Action,
    config::{CaptureMode, EnvConfig},
    geometry::Position,
    state::{Agent, GameState, Target},
};

/// Lower and upper (exclusive) distance band for the near reward
const NEAR_BAND: (f32, f32) = (25.0, 50.0);
/// Lower and upper (exclusive) distance band for the far reward
const FAR_BAND: (f32, f32) = (75.0, 150.0);

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Agent score after this step
    pub score: u32,
    /// Whether the agent captured the target this step
    pub captured: bool,
    /// Agent-target distance after this step
    pub distance: f32,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Reward for this step (distance ladder plus directional shaping)
    pub reward: f32,
    /// Whether the episode has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: EnvConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: EnvConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Build the initial world: agent at the origin, target at a random spot
    pub fn initial_state(&mut self) -> GameState {
        let agent = Agent::new(Position::new(0, 0), &self.config);
        let target = Target::spawn(&mut self.rng, &self.config);
        GameState::new(agent, target, self.config.board_size)
    }

    /// Put the agent back at the origin. The score and the target stay as they are.
    pub fn reset(&self, state: &mut GameState) {
        state.agent.blob.position = Position::new(0, 0);
        state.agent.state = None;
    }

    /// Execute one step of the game. `None` moves nothing but is still scored.
    pub fn step(&mut self, state: &mut GameState, action: Option<Action>) -> StepResult {
        if let Some(action) = action {
            state.agent.set_direction(action);
            state.agent.apply_move(&self.config);
        }

        let mut captured = false;
        let mut terminated = false;

        let mut reward = if state.distance() < self.config.collision_threshold {
            captured = true;
            state.agent.score += 1;
            state.target.reposition(&mut self.rng, &self.config);

            match self.config.capture_mode {
                CaptureMode::Continue => self.reset(state),
                CaptureMode::Terminate => terminated = true,
            }

            log::debug!(
                "capture, score {} target now at {:?}",
                state.agent.score,
                state.target.position()
            );
            self.config.capture_reward
        } else {
            distance_reward(state.distance(), &self.config)
        };

        // Shaping sees the positions after any capture reset
        if action.is_some_and(|a| moves_toward_target(state, a)) {
            reward += self.config.shaping_bonus;
        } else {
            reward -= self.config.shaping_bonus;
        }

        StepResult {
            reward,
            terminated,
            info: StepInfo {
                score: state.agent.score,
                captured,
                distance: state.distance(),
            },
        }
    }
}

/// Reward from the distance ladder for a non-capturing step
pub fn distance_reward(distance: f32, config: &EnvConfig) -> f32 {
    let in_band = |(lo, hi): (f32, f32)| distance > lo && distance < hi;

    if in_band(NEAR_BAND) {
        config.near_reward
    } else if in_band(FAR_BAND) {
        config.far_reward
    } else {
        0.0
    }
}

/// True if `action` heads toward the target along an axis where it is offset
pub fn moves_toward_target(state: &GameState, action: Action) -> bool {
    let agent = state.agent.position();
    let target = state.target.position();
    let dx = target.x - agent.x;
    let dy = target.y - agent.y;

    match action {
        Action::Right => dx > 0,
        Action::Left => dx < 0,
        Action::Down => dy > 0,
        Action::Up => dy < 0,
    }
}
