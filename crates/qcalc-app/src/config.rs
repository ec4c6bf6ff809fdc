// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shell configuration file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use qcalc_core::AdaptationConfig;
use qcalc_core::error::Result;

#[cfg(not(target_os = "android"))]
use qcalc_bridge::stub::SimulatedDevice;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "QCALC_CONFIG";

/// Contents of `qcalc.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub adaptation: AdaptationConfig,
    /// URL reported for the simulated page load.
    pub start_url: Option<String>,
    /// Device the desktop host pretends to be.
    #[cfg(not(target_os = "android"))]
    pub device: SimulatedDevice,
}

impl ShellConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.adaptation.validate()?;
        Ok(config)
    }

    /// Load from `$QCALC_CONFIG` if set. A missing or broken file is logged
    /// and replaced by defaults; the shell always starts.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            info!("{CONFIG_ENV} not set; using default configuration");
            return Self::default();
        };
        let path = Path::new(&path);
        match Self::load(path) {
            Ok(config) => {
                info!(path = %path.display(), "configuration loaded");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "configuration unusable; using defaults");
                Self::default()
            }
        }
    }

    pub fn start_url(&self) -> &str {
        self.start_url.as_deref().unwrap_or("file:///android_asset/index.html")
    }
}
