//! Reinforcement learning interface for the chase game
//!
//! Provides:
//! - 5-feature observations and their burn tensor form
//! - The `ChaseEnvironment` reset/step/render contract
//! - Action and observation space descriptors
//! - The `Policy` collaborator trait with random, greedy and network policies
//! - Saving and loading policy networks

pub mod backend;
pub mod environment;
pub mod network;
pub mod observation;
pub mod persistence;
pub mod policy;
pub mod spaces;

pub use backend::{InferenceBackend, default_device};
pub use environment::{ChaseEnvironment, EnvStep, RenderMode};
pub use network::{NetworkPolicy, PolicyNetwork, PolicyNetworkConfig, argmax_action};
pub use observation::{OBSERVATION_DIM, Observation, create_observation, observations_to_batch};
pub use persistence::{NetworkMetadata, load_network, save_network};
pub use policy::{GreedyPolicy, Policy, RandomPolicy};
pub use spaces::{ActionSpace, ObservationSpace};
