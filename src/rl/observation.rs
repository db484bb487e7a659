use burn::tensor::{Tensor, TensorData, backend::Backend};
use serde::{Deserialize, Serialize};

use crate::game::GameState;

/// Number of features in an observation
pub const OBSERVATION_DIM: usize = 5;

/// Fixed-shape feature vector describing the world
///
/// Both `reset` and `step` return this same record.
///
/// Features, in order:
/// - 0: agent x
/// - 1: agent y
/// - 2: target x
/// - 3: target y
/// - 4: agent-target distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub agent_x: f32,
    pub agent_y: f32,
    pub target_x: f32,
    pub target_y: f32,
    pub distance: f32,
}

impl Observation {
    pub fn to_array(&self) -> [f32; OBSERVATION_DIM] {
        [
            self.agent_x,
            self.agent_y,
            self.target_x,
            self.target_y,
            self.distance,
        ]
    }

    /// Convert to a tensor with shape [5]
    pub fn to_tensor<B: Backend>(&self, device: &B::Device) -> Tensor<B, 1> {
        let data = TensorData::new(self.to_array().to_vec(), [OBSERVATION_DIM]);
        Tensor::<B, 1>::from_data(data, device)
    }
}

impl From<[f32; OBSERVATION_DIM]> for Observation {
    fn from(values: [f32; OBSERVATION_DIM]) -> Self {
        let [agent_x, agent_y, target_x, target_y, distance] = values;
        Self {
            agent_x,
            agent_y,
            target_x,
            target_y,
            distance,
        }
    }
}

impl std::fmt::Display for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:.1} {:.1} {:.1} {:.1} {:.3}]",
            self.agent_x, self.agent_y, self.target_x, self.target_y, self.distance
        )
    }
}

/// Create an observation from game state
pub fn create_observation(state: &GameState) -> Observation {
    let agent = state.agent.position();
    let target = state.target.position();

    Observation {
        agent_x: agent.x as f32,
        agent_y: agent.y as f32,
        target_x: target.x as f32,
        target_y: target.y as f32,
        distance: state.distance(),
    }
}

/// Stack observations into a batch tensor with shape [n, 5]
pub fn observations_to_batch<B: Backend>(
    observations: &[Observation],
    device: &B::Device,
) -> Tensor<B, 2> {
    let data: Vec<f32> = observations.iter().flat_map(|obs| obs.to_array()).collect();
    let tensor_data = TensorData::new(data, [observations.len(), OBSERVATION_DIM]);

    Tensor::<B, 2>::from_data(tensor_data, device)
}
