//! Backend type alias and device management
//!
//! The environment's observations are five floats, so the CPU NdArray
//! backend is all the network policy needs.
//!
//! # Example
//!
//! ```rust
//! use blob_chase::rl::{InferenceBackend, PolicyNetworkConfig, default_device};
//!
//! let device = default_device();
//! let network = PolicyNetworkConfig::default().init::<InferenceBackend>(&device);
//! ```

use burn::backend::ndarray::{NdArray, NdArrayDevice};

/// Backend type for running policy networks
pub type InferenceBackend = NdArray<f32>;

/// Get the default device for computation (CPU)
pub fn default_device() -> NdArrayDevice {
    NdArrayDevice::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::tensor::Tensor;

    #[test]
    fn test_default_device_is_usable() {
        let device = default_device();
        let tensor = Tensor::<InferenceBackend, 1>::from_floats([1.0, 2.0], &device);
        assert_eq!(tensor.dims(), [2]);
    }
}
