use serde::{Deserialize, Serialize};
use std::path::Path;

use super::geometry::Color;
use crate::error::{EnvError, Result};

/// How the agent's move is bounded at the board edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Check the bound on the pre-move coordinate only, so a move from an
    /// off-grid coordinate can overshoot the edge by up to `step_size - 1`
    #[default]
    Lenient,
    /// Same check, then clamp the coordinate into `[0, board_size]`
    Strict,
}

/// What a capture does to the episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMode {
    /// Reset the agent internally and keep the episode running (`terminated` stays false)
    #[default]
    Continue,
    /// Report `terminated` and leave the reset to the caller
    Terminate,
}

/// Configuration for the chase environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Width and height of the square board in pixels
    pub board_size: i32,
    /// Side length of the drawn squares; also the respawn margin for the target
    pub blob_size: i32,
    /// Distance the agent moves per step
    pub step_size: i32,
    /// Capture happens when the distance is strictly below this
    pub collision_threshold: f32,

    // Rewards
    /// Reward for capturing the target
    pub capture_reward: f32,
    /// Reward when 25 < distance < 50
    pub near_reward: f32,
    /// Reward when 75 < distance < 150
    pub far_reward: f32,
    /// Added when the action points toward the target, subtracted otherwise
    pub shaping_bonus: f32,

    pub boundary_mode: BoundaryMode,
    pub capture_mode: CaptureMode,

    /// Seed for target placement; `None` draws one from the OS
    pub seed: Option<u64>,

    pub agent_color: Color,
    pub target_color: Color,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            board_size: 500,
            blob_size: 25,
            step_size: 10,
            collision_threshold: 35.0,
            capture_reward: 10.0,
            near_reward: 5.0,
            far_reward: 1.0,
            shaping_bonus: 3.0,
            boundary_mode: BoundaryMode::Lenient,
            capture_mode: CaptureMode::Continue,
            seed: None,
            agent_color: Color::GREEN,
            target_color: Color::RED,
        }
    }
}

impl EnvConfig {
    /// Default configuration with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Lowest coordinate the target can respawn at
    pub fn spawn_min(&self) -> i32 {
        self.blob_size
    }

    /// Highest coordinate the target can respawn at
    pub fn spawn_max(&self) -> i32 {
        self.board_size - self.blob_size
    }

    /// Load a configuration from a JSON file and validate it
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: EnvConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.blob_size < 0 {
            return Err(EnvError::InvalidConfig(format!(
                "blob_size must be non-negative, got {}",
                self.blob_size
            )));
        }
        if self.board_size <= 2 * self.blob_size {
            return Err(EnvError::InvalidConfig(format!(
                "board_size {} leaves no room for blobs of size {}",
                self.board_size, self.blob_size
            )));
        }
        if self.step_size <= 0 {
            return Err(EnvError::InvalidConfig(format!(
                "step_size must be positive, got {}",
                self.step_size
            )));
        }
        if !(self.collision_threshold.is_finite() && self.collision_threshold > 0.0) {
            return Err(EnvError::InvalidConfig(format!(
                "collision_threshold must be positive, got {}",
                self.collision_threshold
            )));
        }

        let rewards = [
            ("capture_reward", self.capture_reward),
            ("near_reward", self.near_reward),
            ("far_reward", self.far_reward),
            ("shaping_bonus", self.shaping_bonus),
        ];
        if let Some((name, value)) = rewards.iter().find(|(_, v)| !v.is_finite()) {
            return Err(EnvError::InvalidConfig(format!(
                "{name} must be finite, got {value}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = EnvConfig::default();
        assert_eq!(config.board_size, 500);
        assert_eq!(config.blob_size, 25);
        assert_eq!(config.step_size, 10);
        assert_eq!(config.collision_threshold, 35.0);
        assert_eq!(config.spawn_min(), 25);
        assert_eq!(config.spawn_max(), 475);
        assert_eq!(config.capture_mode, CaptureMode::Continue);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = EnvConfig {
            step_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(EnvError::InvalidConfig(_))));

        let config = EnvConfig {
            board_size: 40,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EnvConfig {
            shaping_bonus: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"seed": 7, "capture_mode": "terminate", "boundary_mode": "strict"}}"#
        )
        .unwrap();

        let config = EnvConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.capture_mode, CaptureMode::Terminate);
        assert_eq!(config.boundary_mode, BoundaryMode::Strict);
        assert_eq!(config.board_size, 500);
    }

    #[test]
    fn test_invalid_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"step_size": -5}}"#).unwrap();
        assert!(matches!(
            EnvConfig::from_json_file(file.path()),
            Err(EnvError::InvalidConfig(_))
        ));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            EnvConfig::from_json_file(file.path()),
            Err(EnvError::Json(_))
        ));
    }
}
