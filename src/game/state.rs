use rand::Rng;

use super::{
    action::Action,
    config::{BoundaryMode, EnvConfig},
    geometry::{Blob, Position, Size, distance},
};

/// The chasing agent
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub blob: Blob,
    /// Number of captures; survives episode resets
    pub score: u32,
    /// Pending direction, set right before a move and consumed by it
    pub state: Option<Action>,
}

impl Agent {
    pub fn new(position: Position, config: &EnvConfig) -> Self {
        Self {
            blob: Blob::new(position, config.agent_color)
                .with_size(Size::square(config.blob_size as u32)),
            score: 0,
            state: None,
        }
    }

    pub fn position(&self) -> Position {
        self.blob.position
    }

    /// Set the pending direction for the next `apply_move`
    pub fn set_direction(&mut self, action: Action) {
        self.state = Some(action);
    }

    /// Set the direction and move in one go
    pub fn move_in(&mut self, action: Action, config: &EnvConfig) {
        self.set_direction(action);
        self.apply_move(config);
    }

    /// Consume the pending direction and move one step that way.
    /// Does nothing when no direction is pending.
    ///
    /// The bound check looks at the coordinate before the move, so in
    /// `Lenient` mode an off-grid coordinate can end up past the edge.
    pub fn apply_move(&mut self, config: &EnvConfig) {
        let Some(direction) = self.state.take() else {
            return;
        };

        let board = config.board_size;
        let pos = self.blob.position;

        let can_move = match direction {
            Action::Left => pos.x > 0,
            Action::Right => pos.x < board,
            Action::Up => pos.y > 0,
            Action::Down => pos.y < board,
        };
        if !can_move {
            return;
        }

        let (dx, dy) = direction.delta();
        let mut next = pos.moved_by(dx * config.step_size, dy * config.step_size);

        if config.boundary_mode == BoundaryMode::Strict {
            next.x = next.x.clamp(0, board);
            next.y = next.y.clamp(0, board);
        }
        self.blob.position = next;
    }
}

/// The food the agent chases
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub blob: Blob,
}

impl Target {
    pub fn new(position: Position, config: &EnvConfig) -> Self {
        Self {
            blob: Blob::new(position, config.target_color)
                .with_size(Size::square(config.blob_size as u32)),
        }
    }

    /// Place a target uniformly at random inside the spawn rectangle
    pub fn spawn<R: Rng>(rng: &mut R, config: &EnvConfig) -> Self {
        let mut target = Self::new(Position::default(), config);
        target.reposition(rng, config);
        target
    }

    pub fn position(&self) -> Position {
        self.blob.position
    }

    /// Redraw both coordinates independently from
    /// `[blob_size, board_size - blob_size]`. The agent's position is not excluded.
    pub fn reposition<R: Rng>(&mut self, rng: &mut R, config: &EnvConfig) {
        let (lo, hi) = (config.spawn_min(), config.spawn_max());
        self.blob.position = Position::new(rng.gen_range(lo..=hi), rng.gen_range(lo..=hi));
    }
}

/// Complete world state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub agent: Agent,
    pub target: Target,
    pub board_size: i32,
}

impl GameState {
    pub fn new(agent: Agent, target: Target, board_size: i32) -> Self {
        Self {
            agent,
            target,
            board_size,
        }
    }

    /// Distance from the agent to the target
    pub fn distance(&self) -> f32 {
        distance(self.agent.position(), self.target.position())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_agent_moves_one_step() {
        let config = EnvConfig::default();
        let mut agent = Agent::new(Position::new(100, 100), &config);

        agent.move_in(Action::Right, &config);
        assert_eq!(agent.position(), Position::new(110, 100));
        agent.move_in(Action::Down, &config);
        assert_eq!(agent.position(), Position::new(110, 110));
        agent.move_in(Action::Left, &config);
        assert_eq!(agent.position(), Position::new(100, 110));
        agent.move_in(Action::Up, &config);
        assert_eq!(agent.position(), Position::new(100, 100));

        assert_eq!(agent.state, None);
    }

    #[test]
    fn test_apply_move_consumes_pending_direction() {
        let config = EnvConfig::default();
        let mut agent = Agent::new(Position::new(100, 100), &config);

        agent.apply_move(&config);
        assert_eq!(agent.position(), Position::new(100, 100));

        agent.set_direction(Action::Up);
        assert_eq!(agent.state, Some(Action::Up));
        agent.apply_move(&config);
        agent.apply_move(&config);
        assert_eq!(agent.position(), Position::new(100, 90));
    }

    #[test]
    fn test_agent_blocked_at_edges() {
        let config = EnvConfig::default();
        let mut agent = Agent::new(Position::new(0, 0), &config);

        agent.move_in(Action::Left, &config);
        agent.move_in(Action::Up, &config);
        assert_eq!(agent.position(), Position::new(0, 0));

        let mut agent = Agent::new(Position::new(500, 500), &config);
        agent.move_in(Action::Right, &config);
        agent.move_in(Action::Down, &config);
        assert_eq!(agent.position(), Position::new(500, 500));
    }

    #[test]
    fn test_lenient_bounds_can_overshoot() {
        let config = EnvConfig::default();

        let mut agent = Agent::new(Position::new(1, 499), &config);
        agent.move_in(Action::Left, &config);
        agent.move_in(Action::Down, &config);
        assert_eq!(agent.position(), Position::new(-9, 509));

        // Once past the edge, no further movement that way
        agent.move_in(Action::Left, &config);
        agent.move_in(Action::Down, &config);
        assert_eq!(agent.position(), Position::new(-9, 509));
    }

    #[test]
    fn test_step_size_scales_move() {
        let config = EnvConfig {
            step_size: 7,
            ..Default::default()
        };
        let mut agent = Agent::new(Position::new(497, 3), &config);

        agent.move_in(Action::Right, &config);
        agent.move_in(Action::Up, &config);
        assert_eq!(agent.position(), Position::new(504, -4));

        agent.move_in(Action::Left, &config);
        agent.move_in(Action::Down, &config);
        assert_eq!(agent.position(), Position::new(497, 3));
    }

    #[test]
    fn test_strict_bounds_clamp() {
        let config = EnvConfig {
            boundary_mode: BoundaryMode::Strict,
            ..Default::default()
        };

        let mut agent = Agent::new(Position::new(1, 499), &config);
        agent.move_in(Action::Left, &config);
        agent.move_in(Action::Down, &config);
        assert_eq!(agent.position(), Position::new(0, 500));
    }

    #[test]
    fn test_random_walk_stays_in_lenient_range() {
        let config = EnvConfig::default();
        let mut rng = StdRng::seed_from_u64(11);

        for start in [Position::new(0, 0), Position::new(3, 497), Position::new(251, 7)] {
            let mut agent = Agent::new(start, &config);
            for _ in 0..2_000 {
                let action = Action::ALL[rng.gen_range(0..Action::ALL.len())];
                agent.move_in(action, &config);
                let pos = agent.position();
                assert!((-9..=509).contains(&pos.x), "x out of range: {pos:?}");
                assert!((-9..=509).contains(&pos.y), "y out of range: {pos:?}");
            }
        }
    }

    #[test]
    fn test_reposition_in_margin() {
        let config = EnvConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut target = Target::spawn(&mut rng, &config);

        for _ in 0..5_000 {
            target.reposition(&mut rng, &config);
            let pos = target.position();
            assert!((25..=475).contains(&pos.x));
            assert!((25..=475).contains(&pos.y));
        }
    }

    #[test]
    fn test_entities_carry_config_colors() {
        let config = EnvConfig::default();
        let agent = Agent::new(Position::new(0, 0), &config);
        let target = Target::new(Position::new(50, 50), &config);

        assert_eq!(agent.blob.color, config.agent_color);
        assert_eq!(target.blob.color, config.target_color);
        assert_eq!(agent.blob.size, Size::square(25));
    }

    #[test]
    fn test_state_distance() {
        let config = EnvConfig::default();
        let state = GameState::new(
            Agent::new(Position::new(0, 0), &config),
            Target::new(Position::new(30, 40), &config),
            config.board_size,
        );

        assert_eq!(state.distance(), 50.0);
    }
}
