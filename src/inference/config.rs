//! Configuration for schema inference

use serde::{Deserialize, Serialize};

/// Configuration for schema inference
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceConfig {
    /// Maximum number of samples to fold (0 = all)
    ///
    /// A resource bound for callers feeding unbounded streams; surplus
    /// samples are ignored, never an error.
    pub sample_size: usize,

    /// Enable format detection (date-time, uuid, email)
    pub detect_formats: bool,

    /// Maximum nesting depth; values below the cutoff classify as `any`
    pub max_depth: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            sample_size: 0, // All samples
            detect_formats: true,
            max_depth: 32,
        }
    }
}

impl InferenceConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> InferenceConfigBuilder {
        InferenceConfigBuilder::default()
    }
}

/// Builder for InferenceConfig
#[derive(Debug, Default)]
pub struct InferenceConfigBuilder {
    config: InferenceConfig,
}

impl InferenceConfigBuilder {
    /// Set the sample size (0 = all samples)
    pub fn sample_size(mut self, size: usize) -> Self {
        self.config.sample_size = size;
        self
    }

    /// Enable or disable format detection
    pub fn detect_formats(mut self, detect: bool) -> Self {
        self.config.detect_formats = detect;
        self
    }

    /// Set the maximum nesting depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Build the configuration
    pub fn build(self) -> InferenceConfig {
        self.config
    }
}
