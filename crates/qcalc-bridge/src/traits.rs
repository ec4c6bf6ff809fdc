// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the host collaborators.
//
// The bridge never talks to a platform SDK directly. Everything it needs from
// the device (metrics, settings, clipboard, orientation) and from the WebView
// comes through these traits, implemented by the `android` module on device
// and by `stub` on desktop/CI.

use qcalc_core::error::Result;
use qcalc_core::types::{
    ConfigOrientation, DeviceInfo, DisplayMetrics, OrientationLock, Rotation, WebViewSettings,
};

/// Unified host that groups all native capabilities the bridge consumes.
pub trait PlatformHost:
    DisplayMetricsProvider + PlatformSettings + NativeClipboard + NativeOrientation + Send + Sync
{
    /// Human-readable platform name (e.g. "Android", "Desktop (stub)").
    fn platform_name(&self) -> &str;
}

/// Screen metrics and device identity.
pub trait DisplayMetricsProvider {
    /// Current screen size, density and size bucket.
    fn display_metrics(&self) -> Result<DisplayMetrics>;

    /// Model string and API level.
    fn device_info(&self) -> Result<DeviceInfo>;
}

/// Read-only access to platform resources and system settings.
pub trait PlatformSettings {
    /// Pixel size of a named platform dimension resource
    /// (e.g. `navigation_bar_height`). `Ok(None)` if the resource does not exist.
    fn dimension_px(&self, name: &str) -> Result<Option<u32>>;

    /// Integer from the secure settings table.
    /// Returns `QCalcError::SettingNotFound` if the key is absent.
    fn secure_int(&self, key: &str) -> Result<i32>;
}

/// System clipboard.
pub trait NativeClipboard {
    /// Current primary clip, or `None` if the clipboard is empty.
    fn primary_clip(&self) -> Result<Option<ClipData>>;
}

/// Orientation constraint and rotation. Must only be called on the UI thread.
pub trait NativeOrientation {
    /// Replace the requested orientation constraint.
    fn set_requested_orientation(&self, lock: OrientationLock) -> Result<()>;

    /// Current display rotation.
    fn rotation(&self) -> Result<Rotation>;

    /// Coarse orientation of the current configuration.
    fn config_orientation(&self) -> Result<ConfigOrientation>;
}

/// The WebView that hosts the calculator. Must only be called on the UI thread.
pub trait WebViewHost {
    /// Push settings onto the WebView.
    fn apply_settings(&self, settings: &WebViewSettings) -> Result<()>;

    /// Expose the bridge object to page scripts under `name`.
    fn add_javascript_interface(&self, name: &str) -> Result<()>;

    /// Queue `script` for evaluation in the page context. An `Ok` only means
    /// the request was handed over; the result is never reported back.
    fn evaluate_javascript(&self, script: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Clipboard payload
// ---------------------------------------------------------------------------

/// Contents of the primary clip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipData {
    pub items: Vec<ClipItem>,
}

/// A single clip item. `text` is `None` for non-text content (URIs, intents).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipItem {
    pub text: Option<String>,
}

impl ClipData {
    /// Clip with a single text item.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            items: vec![ClipItem {
                text: Some(text.into()),
            }],
        }
    }
}
