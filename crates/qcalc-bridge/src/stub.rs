// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub host for desktop/CI builds where the mobile platform is unavailable.
//
// The stub simulates a device described by `SimulatedDevice`, so the bridge
// can be exercised off-device. Capabilities with no simulated value behave
// like an absent platform service and return `PlatformUnavailable` or
// `SettingNotFound`, which the bridge turns into its usual defaults.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use qcalc_core::error::{QCalcError, Result};
use qcalc_core::types::{
    ConfigOrientation, DeviceInfo, DisplayMetrics, OrientationLock, Rotation, ScreenSizeClass,
    WebViewSettings,
};

use crate::orientation::{NAVIGATION_BAR_HEIGHT_RESOURCE, NAVIGATION_MODE_SETTING};
use crate::traits::*;

/// Description of the device the stub pretends to be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatedDevice {
    pub metrics: DisplayMetrics,
    pub info: DeviceInfo,
    pub navigation_bar_height_px: Option<u32>,
    pub navigation_mode: Option<i32>,
    pub clipboard_text: Option<String>,
}

impl Default for SimulatedDevice {
    /// A 360×640dp phone at xxhdpi.
    fn default() -> Self {
        Self {
            metrics: DisplayMetrics {
                width_px: 1080,
                height_px: 1920,
                density: 3.0,
                size_class: ScreenSizeClass::Normal,
            },
            info: DeviceInfo {
                model: "Desktop Simulator".into(),
                api_level: 34,
            },
            navigation_bar_height_px: Some(144),
            navigation_mode: Some(2),
            clipboard_text: None,
        }
    }
}

/// Host that answers from a `SimulatedDevice`.
#[derive(Debug, Default)]
pub struct StubHost {
    device: SimulatedDevice,
    requested: Mutex<OrientationLock>,
}

impl StubHost {
    pub fn new(device: SimulatedDevice) -> Self {
        Self {
            device,
            requested: Mutex::new(OrientationLock::Unspecified),
        }
    }

    /// Last orientation constraint applied on the (simulated) UI thread.
    pub fn requested_orientation(&self) -> OrientationLock {
        *self.requested.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PlatformHost for StubHost {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl DisplayMetricsProvider for StubHost {
    fn display_metrics(&self) -> Result<DisplayMetrics> {
        Ok(self.device.metrics)
    }

    fn device_info(&self) -> Result<DeviceInfo> {
        Ok(self.device.info.clone())
    }
}

impl PlatformSettings for StubHost {
    fn dimension_px(&self, name: &str) -> Result<Option<u32>> {
        Ok(match name {
            NAVIGATION_BAR_HEIGHT_RESOURCE => self.device.navigation_bar_height_px,
            _ => None,
        })
    }

    fn secure_int(&self, key: &str) -> Result<i32> {
        match key {
            NAVIGATION_MODE_SETTING => self
                .device
                .navigation_mode
                .ok_or_else(|| QCalcError::SettingNotFound(key.into())),
            _ => Err(QCalcError::SettingNotFound(key.into())),
        }
    }
}

impl NativeClipboard for StubHost {
    fn primary_clip(&self) -> Result<Option<ClipData>> {
        match &self.device.clipboard_text {
            Some(text) => Ok(Some(ClipData::text(text.clone()))),
            None => {
                tracing::warn!("NativeClipboard::primary_clip called on stub host");
                Err(QCalcError::PlatformUnavailable)
            }
        }
    }
}

impl NativeOrientation for StubHost {
    fn set_requested_orientation(&self, lock: OrientationLock) -> Result<()> {
        *self.requested.lock().unwrap_or_else(PoisonError::into_inner) = lock;
        Ok(())
    }

    /// The simulated display follows the requested constraint instantly.
    fn rotation(&self) -> Result<Rotation> {
        Ok(match self.requested_orientation() {
            OrientationLock::Landscape => Rotation::Deg90,
            OrientationLock::ReversePortrait => Rotation::Deg180,
            OrientationLock::ReverseLandscape => Rotation::Deg270,
            OrientationLock::Portrait | OrientationLock::Unspecified => Rotation::Deg0,
        })
    }

    fn config_orientation(&self) -> Result<ConfigOrientation> {
        Ok(match self.rotation()? {
            Rotation::Deg90 | Rotation::Deg270 => ConfigOrientation::Landscape,
            Rotation::Deg0 | Rotation::Deg180 => ConfigOrientation::Portrait,
        })
    }
}

// ---------------------------------------------------------------------------
// Headless WebView
// ---------------------------------------------------------------------------

/// WebView stand-in that records what the bridge asks of it.
#[derive(Debug, Default)]
pub struct StubWebView {
    state: Mutex<StubWebViewState>,
}

#[derive(Debug, Default, Clone)]
pub struct StubWebViewState {
    pub settings: Option<WebViewSettings>,
    pub interfaces: Vec<String>,
    pub scripts: Vec<String>,
    /// When set, `evaluate_javascript` fails as if the page were gone.
    pub detached: bool,
}

impl StubWebView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> StubWebViewState {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set_detached(&self, detached: bool) {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).detached = detached;
    }
}

impl WebViewHost for StubWebView {
    fn apply_settings(&self, settings: &WebViewSettings) -> Result<()> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).settings = Some(*settings);
        Ok(())
    }

    fn add_javascript_interface(&self, name: &str) -> Result<()> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .interfaces
            .push(name.to_string());
        Ok(())
    }

    fn evaluate_javascript(&self, script: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.detached {
            return Err(QCalcError::Bridge("WebView detached".into()));
        }
        state.scripts.push(script.to_string());
        Ok(())
    }
}
