// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for device adaptation and the native/web bridge.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QCalcError;

// ---------------------------------------------------------------------------
// Display metrics
// ---------------------------------------------------------------------------

/// Coarse screen-size bucket reported by the platform configuration.
///
/// Ordered so that `>=` comparisons follow the platform's own ordering
/// (`Small < Normal < Large < XLarge`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenSizeClass {
    Undefined,
    Small,
    Normal,
    Large,
    XLarge,
}

impl ScreenSizeClass {
    /// `Configuration.SCREENLAYOUT_SIZE_MASK`.
    pub const SIZE_MASK: i32 = 0x0f;

    /// Decode the size bits of an Android `Configuration.screenLayout` value.
    pub fn from_screen_layout(screen_layout: i32) -> Self {
        match screen_layout & Self::SIZE_MASK {
            1 => Self::Small,
            2 => Self::Normal,
            3 => Self::Large,
            4 => Self::XLarge,
            _ => Self::Undefined,
        }
    }

    /// Whether the platform already considers this screen tablet-sized.
    pub fn is_large_or_above(self) -> bool {
        self >= Self::Large
    }
}

/// Raw screen metrics as sampled from the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayMetrics {
    pub width_px: u32,
    pub height_px: u32,
    /// Logical density (1.0 = mdpi, 160 dpi).
    pub density: f32,
    pub size_class: ScreenSizeClass,
}

impl DisplayMetrics {
    /// Density used for dp conversion. A zero, negative or non-finite
    /// density falls back to `1.0`.
    pub fn effective_density(&self) -> f32 {
        if self.density.is_finite() && self.density > 0.0 {
            self.density
        } else {
            1.0
        }
    }

    pub fn width_dp(&self) -> f32 {
        self.width_px as f32 / self.effective_density()
    }

    pub fn height_dp(&self) -> f32 {
        self.height_px as f32 / self.effective_density()
    }
}

/// Static device identity sampled once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Marketing model string (`Build.MODEL` on Android).
    pub model: String,
    /// Platform API level (`Build.VERSION.SDK_INT` on Android).
    pub api_level: u32,
}

// ---------------------------------------------------------------------------
// Device profile
// ---------------------------------------------------------------------------

/// Output of the device classifier.
///
/// Phone is always the negation of tablet; foldable is independent of both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceClass {
    is_tablet: bool,
    is_phone: bool,
    is_foldable: bool,
}

impl DeviceClass {
    pub fn new(is_tablet: bool, is_foldable: bool) -> Self {
        Self {
            is_tablet,
            is_phone: !is_tablet,
            is_foldable,
        }
    }

    pub fn is_tablet(&self) -> bool {
        self.is_tablet
    }

    pub fn is_phone(&self) -> bool {
        self.is_phone
    }

    pub fn is_foldable(&self) -> bool {
        self.is_foldable
    }
}

/// Navigation-bar height and navigation mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    pub navigation_bar_height_px: u32,
    pub is_gesture_navigation: bool,
}

/// System navigation mode as stored in the `navigation_mode` secure setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationMode {
    ThreeButton,
    TwoButton,
    Gesture,
}

impl NavigationMode {
    /// Decode the raw setting value. Unknown values yield `None`.
    pub fn from_setting(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::ThreeButton),
            1 => Some(Self::TwoButton),
            2 => Some(Self::Gesture),
            _ => None,
        }
    }

    pub fn is_gesture(self) -> bool {
        self == Self::Gesture
    }
}

/// Immutable snapshot of everything the web layer may ask about the device.
///
/// Computed once per bridge instance and replaced wholesale on
/// re-detection; never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceProfile {
    class: DeviceClass,
    text_zoom_percent: u32,
    api_level: u32,
    navigation: NavigationState,
}

impl DeviceProfile {
    pub fn new(
        class: DeviceClass,
        text_zoom_percent: u32,
        api_level: u32,
        navigation: NavigationState,
    ) -> Self {
        Self {
            class,
            text_zoom_percent,
            api_level,
            navigation,
        }
    }

    pub fn is_tablet(&self) -> bool {
        self.class.is_tablet()
    }

    pub fn is_phone(&self) -> bool {
        self.class.is_phone()
    }

    pub fn is_foldable(&self) -> bool {
        self.class.is_foldable()
    }

    pub fn text_zoom_percent(&self) -> u32 {
        self.text_zoom_percent
    }

    pub fn api_level(&self) -> u32 {
        self.api_level
    }

    pub fn navigation_bar_height_px(&self) -> u32 {
        self.navigation.navigation_bar_height_px
    }

    pub fn is_gesture_navigation(&self) -> bool {
        self.navigation.is_gesture_navigation
    }
}

/// Payload assigned to the page's global device-info object.
///
/// Field names are what the web layer reads, so they stay camelCase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InjectedDeviceInfo {
    pub is_tablet: bool,
    pub is_phone: bool,
    pub is_foldable: bool,
    pub text_zoom_level: u32,
}

impl From<&DeviceProfile> for InjectedDeviceInfo {
    fn from(profile: &DeviceProfile) -> Self {
        Self {
            is_tablet: profile.is_tablet(),
            is_phone: profile.is_phone(),
            is_foldable: profile.is_foldable(),
            text_zoom_level: profile.text_zoom_percent(),
        }
    }
}

// ---------------------------------------------------------------------------
// Orientation
// ---------------------------------------------------------------------------

/// Requested screen-orientation constraint.
///
/// Each request supersedes the previous one; nothing is stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationLock {
    Portrait,
    Landscape,
    #[default]
    Unspecified,
    ReversePortrait,
    ReverseLandscape,
}

impl OrientationLock {
    /// Matching `ActivityInfo.SCREEN_ORIENTATION_*` constant.
    pub fn android_constant(self) -> i32 {
        match self {
            Self::Unspecified => -1,
            Self::Landscape => 0,
            Self::Portrait => 1,
            Self::ReverseLandscape => 8,
            Self::ReversePortrait => 9,
        }
    }
}

/// Current display rotation relative to the natural orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Decode `Display.getRotation()` (`Surface.ROTATION_*`, 0..=3).
    /// Out-of-range values are treated as the natural orientation.
    pub fn from_surface(value: i32) -> Self {
        match value {
            1 => Self::Deg90,
            2 => Self::Deg180,
            3 => Self::Deg270,
            _ => Self::Deg0,
        }
    }
}

/// Screen Orientation API label for the current rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrientationType {
    PortraitPrimary,
    PortraitSecondary,
    LandscapePrimary,
    LandscapeSecondary,
}

impl OrientationType {
    pub fn from_rotation(rotation: Rotation) -> Self {
        match rotation {
            Rotation::Deg0 => Self::PortraitPrimary,
            Rotation::Deg90 => Self::LandscapePrimary,
            Rotation::Deg180 => Self::PortraitSecondary,
            Rotation::Deg270 => Self::LandscapeSecondary,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PortraitPrimary => "portrait-primary",
            Self::PortraitSecondary => "portrait-secondary",
            Self::LandscapePrimary => "landscape-primary",
            Self::LandscapeSecondary => "landscape-secondary",
        }
    }

    /// The orientation constraint that pins the screen to this label.
    pub fn lock(self) -> OrientationLock {
        match self {
            Self::PortraitPrimary => OrientationLock::Portrait,
            Self::PortraitSecondary => OrientationLock::ReversePortrait,
            Self::LandscapePrimary => OrientationLock::Landscape,
            Self::LandscapeSecondary => OrientationLock::ReverseLandscape,
        }
    }
}

impl fmt::Display for OrientationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrientationType {
    type Err = QCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "portrait-primary" => Ok(Self::PortraitPrimary),
            "portrait-secondary" => Ok(Self::PortraitSecondary),
            "landscape-primary" => Ok(Self::LandscapePrimary),
            "landscape-secondary" => Ok(Self::LandscapeSecondary),
            other => Err(QCalcError::Bridge(format!("unknown orientation type: {other}"))),
        }
    }
}

/// Coarse orientation from the platform configuration
/// (`Configuration.orientation`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigOrientation {
    #[default]
    Undefined,
    Portrait,
    Landscape,
}

impl ConfigOrientation {
    pub fn from_android(value: i32) -> Self {
        match value {
            1 => Self::Portrait,
            2 => Self::Landscape,
            _ => Self::Undefined,
        }
    }
}

// ---------------------------------------------------------------------------
// WebView settings
// ---------------------------------------------------------------------------

/// WebView HTTP cache behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheMode {
    Default,
    CacheElseNetwork,
    NoCache,
    CacheOnly,
}

impl CacheMode {
    /// Matching `WebSettings.LOAD_*` constant.
    pub fn android_constant(self) -> i32 {
        match self {
            Self::Default => -1,
            Self::CacheElseNetwork => 1,
            Self::NoCache => 2,
            Self::CacheOnly => 3,
        }
    }
}

/// Settings pushed onto the host WebView when the bridge is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebViewSettings {
    pub javascript_enabled: bool,
    pub dom_storage_enabled: bool,
    pub cache_mode: CacheMode,
    pub text_zoom_percent: u32,
}
