//! Feed-forward policy network for burn-based agents
//!
//! A small MLP that maps the 5-feature observation to one logit per action.
//! The environment does not train it; an external learner can, and
//! `NetworkPolicy` plays a trained (or freshly initialized) network greedily.
//!
//! # Architecture
//!
//! ```text
//! Input: [batch, 5]  (scaled by 1 / board_size)
//!   ↓ Linear(5 → hidden) + ReLU
//!   ↓ Linear(hidden → hidden) + ReLU
//!   ↓ Linear(hidden → 4) → Action logits
//! ```
//!
//! # Example
//!
//! ```rust
//! use blob_chase::rl::{PolicyNetworkConfig, default_device, InferenceBackend};
//! use burn::tensor::Tensor;
//!
//! let device = default_device();
//! let network = PolicyNetworkConfig::default().init::<InferenceBackend>(&device);
//!
//! let observations = Tensor::zeros([8, 5], &device);
//! let logits = network.forward(observations);
//! assert_eq!(logits.dims(), [8, 4]);
//! ```

use burn::{
    module::Module,
    nn::{Linear, LinearConfig},
    tensor::{Tensor, activation::relu, backend::Backend},
};
use serde::{Deserialize, Serialize};

use super::observation::{OBSERVATION_DIM, Observation};
use super::policy::Policy;
use crate::game::NUM_ACTIONS;

/// Configuration for the policy network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyNetworkConfig {
    /// Number of input features (default: 5)
    pub observation_dim: usize,

    /// Width of both hidden layers (default: 64)
    pub hidden_dim: usize,

    /// Number of actions the policy can output (default: 4)
    pub num_actions: usize,

    /// Observations are multiplied by this before the forward pass
    ///
    /// Default: 1 / 500, so board coordinates land in [0, 1]
    pub input_scale: f32,
}

impl PolicyNetworkConfig {
    pub fn new(hidden_dim: usize) -> Self {
        Self {
            observation_dim: OBSERVATION_DIM,
            hidden_dim,
            num_actions: NUM_ACTIONS,
            input_scale: 1.0 / 500.0,
        }
    }

    /// Initialize the network from this configuration
    pub fn init<B: Backend>(&self, device: &B::Device) -> PolicyNetwork<B> {
        PolicyNetwork {
            fc1: LinearConfig::new(self.observation_dim, self.hidden_dim).init(device),
            fc2: LinearConfig::new(self.hidden_dim, self.hidden_dim).init(device),
            actor_head: LinearConfig::new(self.hidden_dim, self.num_actions).init(device),
        }
    }
}

impl Default for PolicyNetworkConfig {
    fn default() -> Self {
        Self::new(64)
    }
}

/// MLP producing action logits
#[derive(Module, Debug)]
pub struct PolicyNetwork<B: Backend> {
    fc1: Linear<B>,
    fc2: Linear<B>,
    actor_head: Linear<B>,
}

impl<B: Backend> PolicyNetwork<B> {
    /// Forward pass: `[batch, 5]` observations to `[batch, 4]` logits
    pub fn forward(&self, observations: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = relu(self.fc1.forward(observations));
        let x = relu(self.fc2.forward(x));
        self.actor_head.forward(x)
    }
}

/// Greedy policy over a `PolicyNetwork`
///
/// The returned state is the raw logits for the chosen observation.
pub struct NetworkPolicy<B: Backend> {
    network: PolicyNetwork<B>,
    input_scale: f32,
    device: B::Device,
}

impl<B: Backend> NetworkPolicy<B> {
    pub fn new(network: PolicyNetwork<B>, config: &PolicyNetworkConfig, device: B::Device) -> Self {
        Self {
            network,
            input_scale: config.input_scale,
            device,
        }
    }

    /// Logits for a single observation
    pub fn logits(&self, observation: &Observation) -> Vec<f32> {
        let input: Tensor<B, 2> = observation
            .to_tensor::<B>(&self.device)
            .mul_scalar(self.input_scale)
            .unsqueeze_dim(0);

        match self.network.forward(input).into_data().to_vec::<f32>() {
            Ok(logits) => logits,
            Err(err) => {
                log::warn!("could not read network output: {err:?}");
                vec![0.0; NUM_ACTIONS]
            }
        }
    }
}

impl<B: Backend> Policy for NetworkPolicy<B> {
    type State = Vec<f32>;

    fn predict(&mut self, observation: &Observation) -> (usize, Vec<f32>) {
        let logits = self.logits(observation);
        (argmax_action(&logits), logits)
    }

    fn name(&self) -> &str {
        "network"
    }
}

/// Index of the largest value; 0 for an empty slice
pub fn argmax_action(values: &[f32]) -> usize {
    values
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}
