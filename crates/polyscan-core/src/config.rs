//! Scan configuration loaded from TOML.
//!
//! ```toml
//! module_name = "GameAssembly.dll"
//! process_name = "Polytopia.exe"
//! hole_policy = "skip"
//!
//! [pacing]
//! mode = "jittered"
//! min_us = 69
//! max_us = 333
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::extract::HolePolicy;
use crate::memory::{
    DEFAULT_MODULE_NAME, DEFAULT_PROCESS_NAME, JitteredPacing, NoPacing, ReadPacing,
};

/// Delay policy applied before every remote read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PacingConfig {
    None,
    Jittered { min_us: u64, max_us: u64 },
}

impl Default for PacingConfig {
    fn default() -> Self {
        PacingConfig::Jittered {
            min_us: JitteredPacing::DEFAULT_MIN_US,
            max_us: JitteredPacing::DEFAULT_MAX_US,
        }
    }
}

impl PacingConfig {
    pub fn build(self) -> Box<dyn ReadPacing> {
        match self {
            PacingConfig::None => Box::new(NoPacing),
            PacingConfig::Jittered { min_us, max_us } => {
                Box::new(JitteredPacing::new(min_us, max_us))
            }
        }
    }
}

/// Configuration for a scan
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Module whose base address anchors the section chains
    pub module_name: String,
    /// Process name used when no pid is given
    pub process_name: String,
    pub pacing: PacingConfig,
    pub hole_policy: HolePolicy,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            module_name: DEFAULT_MODULE_NAME.to_string(),
            process_name: DEFAULT_PROCESS_NAME.to_string(),
            pacing: PacingConfig::default(),
            hole_policy: HolePolicy::default(),
        }
    }
}

impl ScanConfig {
    /// Create a new configuration builder
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ScanConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file, falling back to defaults when it does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path).map_err(Error::from) {
            Ok(content) => {
                debug!("Loading scan config from {}", path.display());
                Self::from_toml(&content)
            }
            Err(e) if e.is_not_found() => {
                warn!("Config file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    pub fn build_pacing(&self) -> Box<dyn ReadPacing> {
        self.pacing.build()
    }

    fn validate(&self) -> Result<()> {
        if self.module_name.is_empty() {
            return Err(Error::Config("module_name must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Builder for ScanConfig
#[derive(Debug, Clone, Default)]
pub struct ScanConfigBuilder {
    module_name: Option<String>,
    process_name: Option<String>,
    pacing: Option<PacingConfig>,
    hole_policy: Option<HolePolicy>,
}

impl ScanConfigBuilder {
    pub fn module_name<S: Into<String>>(mut self, name: S) -> Self {
        self.module_name = Some(name.into());
        self
    }

    pub fn process_name<S: Into<String>>(mut self, name: S) -> Self {
        self.process_name = Some(name.into());
        self
    }

    pub fn pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = Some(pacing);
        self
    }

    pub fn hole_policy(mut self, policy: HolePolicy) -> Self {
        self.hole_policy = Some(policy);
        self
    }

    /// Build the configuration
    pub fn build(self) -> ScanConfig {
        let default = ScanConfig::default();
        ScanConfig {
            module_name: self.module_name.unwrap_or(default.module_name),
            process_name: self.process_name.unwrap_or(default.process_name),
            pacing: self.pacing.unwrap_or(default.pacing),
            hole_policy: self.hole_policy.unwrap_or(default.hole_policy),
        }
    }
}
