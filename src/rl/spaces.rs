//! Action and observation space descriptors
//!
//! Learners use these to size their input and output layers and to sample
//! exploratory actions.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::observation::{OBSERVATION_DIM, Observation};
use crate::game::{BoundaryMode, EnvConfig, NUM_ACTIONS};

/// Discrete action space with `n` actions, indexed `0..n`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpace {
    pub n: usize,
}

impl ActionSpace {
    pub fn new() -> Self {
        Self { n: NUM_ACTIONS }
    }

    pub fn contains(&self, action: usize) -> bool {
        action < self.n
    }

    /// Uniformly random action index
    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        rng.gen_range(0..self.n)
    }
}

impl Default for ActionSpace {
    fn default() -> Self {
        Self::new()
    }
}

/// Box-shaped observation space with per-feature bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationSpace {
    pub low: [f32; OBSERVATION_DIM],
    pub high: [f32; OBSERVATION_DIM],
}

impl ObservationSpace {
    /// Bounds for a board: coordinates in `[0, board_size]`, distance up to the diagonal.
    ///
    /// In `Lenient` mode the agent can overshoot an edge by up to
    /// `step_size - 1`, so its coordinates get that much slack on each side.
    pub fn for_config(config: &EnvConfig) -> Self {
        let board = config.board_size as f32;
        let slack = match config.boundary_mode {
            BoundaryMode::Lenient => (config.step_size - 1).max(0) as f32,
            BoundaryMode::Strict => 0.0,
        };
        let (lo, hi) = (-slack, board + slack);
        let diagonal = std::f32::consts::SQRT_2 * (hi - lo);

        Self {
            low: [lo, lo, 0.0, 0.0, 0.0],
            high: [hi, hi, board, board, diagonal],
        }
    }

    pub fn shape(&self) -> [usize; 1] {
        [OBSERVATION_DIM]
    }

    pub fn contains(&self, observation: &Observation) -> bool {
        observation
            .to_array()
            .iter()
            .zip(self.low.iter().zip(self.high.iter()))
            .all(|(&v, (&lo, &hi))| v >= lo && v <= hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;
    use crate::rl::ChaseEnvironment;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_action_space() {
        let space = ActionSpace::new();
        assert_eq!(space.n, 4);
        assert!(space.contains(0));
        assert!(space.contains(3));
        assert!(!space.contains(4));

        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..100 {
            assert!(space.contains(space.sample(&mut rng)));
        }
    }

    #[test]
    fn test_observation_space_bounds() {
        let space = ObservationSpace::for_config(&EnvConfig::default());
        assert_eq!(space.shape(), [5]);

        assert!(space.contains(&Observation::from([0.0, 0.0, 25.0, 475.0, 475.6])));
        assert!(space.contains(&Observation::from([500.0, 500.0, 0.0, 0.0, 707.1])));
        assert!(space.contains(&Observation::from([-9.0, 509.0, 25.0, 25.0, 484.1])));
        assert!(!space.contains(&Observation::from([-10.0, 0.0, 25.0, 25.0, 36.0])));
        assert!(!space.contains(&Observation::from([0.0, 0.0, 509.0, 25.0, 509.6])));
    }

    #[test]
    fn test_strict_observation_space_has_no_slack() {
        let config = EnvConfig {
            boundary_mode: BoundaryMode::Strict,
            ..Default::default()
        };
        let space = ObservationSpace::for_config(&config);

        assert!(space.contains(&Observation::from([500.0, 0.0, 25.0, 25.0, 475.7])));
        assert!(!space.contains(&Observation::from([-9.0, 0.0, 25.0, 25.0, 36.0])));
    }

    #[test]
    fn test_lenient_overshoot_stays_in_space() {
        let config = EnvConfig {
            step_size: 7,
            ..EnvConfig::seeded(3)
        };
        let space = ObservationSpace::for_config(&config);
        let mut env = ChaseEnvironment::new(config);
        env.set_target_position(Position::new(25, 25));
        env.set_agent_position(Position::new(497, 3));

        let right = env.step(1).observation;
        assert_eq!(right.agent_x, 504.0);
        assert!(space.contains(&right));

        let up = env.step(2).observation;
        assert_eq!(up.agent_y, -4.0);
        assert!(space.contains(&up));
    }
}
