//! Saving and loading policy networks
//!
//! A network is stored as two files:
//! - `<path>` with its extension replaced by `.mpk` - weights (Burn named MessagePack record)
//! - `<path>` with its extension replaced by `.meta.json` - `NetworkMetadata` as JSON
//!
//! An external learner that trains a `PolicyNetwork` writes it with
//! `save_network`; the `network` policy of the CLI reads it back with
//! `load_network`.

use anyhow::{Context, Result};
use burn::{
    module::Module,
    record::{FullPrecisionSettings, NamedMpkFileRecorder, Recorder},
    tensor::backend::Backend,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::network::{PolicyNetwork, PolicyNetworkConfig};

/// Metadata saved next to the weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkMetadata {
    /// Architecture needed to rebuild the network before loading weights
    pub network: PolicyNetworkConfig,

    /// Crate version that wrote the file
    pub version: String,
}

impl NetworkMetadata {
    pub fn new(network: PolicyNetworkConfig) -> Self {
        Self {
            network,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

fn metadata_path(path: &Path) -> PathBuf {
    path.with_extension("meta.json")
}

/// Save a network and its metadata. Creates parent directories if needed.
pub fn save_network<B: Backend>(
    network: &PolicyNetwork<B>,
    config: &PolicyNetworkConfig,
    path: &Path,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
    recorder
        .record(network.clone().into_record(), path.to_path_buf())
        .context("Failed to save network weights")?;

    let meta_path = metadata_path(path);
    let meta_json = serde_json::to_string_pretty(&NetworkMetadata::new(config.clone()))
        .context("Failed to serialize metadata")?;
    std::fs::write(&meta_path, meta_json)
        .with_context(|| format!("Failed to write metadata to {:?}", meta_path))?;

    log::info!("saved policy network to {:?}", path);
    Ok(())
}

/// Load a network saved by `save_network`
pub fn load_network<B: Backend>(
    path: &Path,
    device: &B::Device,
) -> Result<(PolicyNetwork<B>, NetworkMetadata)> {
    let meta_path = metadata_path(path);
    let meta_json = std::fs::read_to_string(&meta_path)
        .with_context(|| format!("Failed to read metadata from {:?}", meta_path))?;
    let metadata: NetworkMetadata =
        serde_json::from_str(&meta_json).context("Failed to deserialize metadata")?;

    if metadata.version != env!("CARGO_PKG_VERSION") {
        log::warn!(
            "model was written by version {}, running {}",
            metadata.version,
            env!("CARGO_PKG_VERSION")
        );
    }

    let network = metadata.network.init::<B>(device);

    let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
    let record = recorder
        .load(path.to_path_buf(), device)
        .with_context(|| format!("Failed to load network weights from {:?}", path))?;

    Ok((network.load_record(record), metadata))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rl::{InferenceBackend, NetworkPolicy, Observation, Policy, default_device};
    use tempfile::TempDir;

    #[test]
    fn test_metadata_serialization() {
        let metadata = NetworkMetadata::new(PolicyNetworkConfig::new(32));

        let json = serde_json::to_string(&metadata).unwrap();
        let deserialized: NetworkMetadata = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, metadata);
        assert_eq!(deserialized.network.hidden_dim, 32);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let model_path = temp_dir.path().join("models").join("chaser.mpk");

        let device = default_device();
        let config = PolicyNetworkConfig::new(16);
        let network = config.init::<InferenceBackend>(&device);

        save_network(&network, &config, &model_path).unwrap();
        assert!(model_path.with_extension("meta.json").exists());

        let (loaded, metadata) = load_network::<InferenceBackend>(&model_path, &device).unwrap();
        assert_eq!(metadata.network, config);

        // Same weights, same decisions
        let obs = Observation::from([40.0, 10.0, 300.0, 220.0, 338.4]);
        let mut original = NetworkPolicy::new(network, &config, device.clone());
        let mut restored = NetworkPolicy::new(loaded, &metadata.network, device);
        let (a, logits_a) = original.predict(&obs);
        let (b, logits_b) = restored.predict(&obs);

        assert_eq!(a, b);
        for (x, y) in logits_a.iter().zip(logits_b.iter()) {
            assert!((x - y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_load_missing_model() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_network::<InferenceBackend>(
            &temp_dir.path().join("missing.mpk"),
            &default_device(),
        );

        assert!(result.is_err());
    }
}
