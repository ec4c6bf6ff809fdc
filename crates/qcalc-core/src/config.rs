// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Adaptation configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{QCalcError, Result};
use crate::policy::{TabletSizePolicy, ZoomPolicy};
use crate::types::CacheMode;

/// Name under which the bridge object is exposed to page scripts.
pub const DEFAULT_INTERFACE_NAME: &str = "AndroidInterface";

/// `window` property that receives the injected device snapshot.
pub const DEFAULT_GLOBAL_NAME: &str = "nativeDeviceInfo";

/// First API level with the `navigation_mode` secure setting (Android 10).
pub const GESTURE_NAVIGATION_MIN_API: u32 = 29;

/// Settings that steer device adaptation and the bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptationConfig {
    /// Size heuristic for tablet detection.
    pub tablet_policy: TabletSizePolicy,
    /// Text zoom heuristic.
    pub zoom_policy: ZoomPolicy,
    /// Case-insensitive model substrings that mark a foldable.
    pub foldable_keywords: Vec<String>,
    /// Lowest API level on which the navigation mode is queried.
    pub gesture_navigation_min_api: u32,
    /// Global name of the JavaScript interface object.
    pub interface_name: String,
    /// `window` property assigned on every page load.
    pub injected_global: String,
    /// Cache mode applied to the WebView.
    pub cache_mode: CacheMode,
    /// Pin phones to portrait right after the bridge is attached.
    pub lock_phone_to_portrait: bool,
}

impl Default for AdaptationConfig {
    fn default() -> Self {
        Self {
            tablet_policy: TabletSizePolicy::default(),
            zoom_policy: ZoomPolicy::default(),
            foldable_keywords: vec!["fold".into(), "flip".into()],
            gesture_navigation_min_api: GESTURE_NAVIGATION_MIN_API,
            interface_name: DEFAULT_INTERFACE_NAME.into(),
            injected_global: DEFAULT_GLOBAL_NAME.into(),
            cache_mode: CacheMode::NoCache,
            lock_phone_to_portrait: true,
        }
    }
}

impl AdaptationConfig {
    /// Read and validate a JSON config file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config = Self::from_json(&data)?;
        tracing::debug!(path = %path.display(), "adaptation config loaded");
        Ok(config)
    }

    /// Parse and validate a JSON document, e.g. one handed over by the
    /// host Activity.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.tablet_policy.validate()?;
        self.zoom_policy.validate()?;
        validate_js_identifier("interface_name", &self.interface_name)?;
        validate_js_identifier("injected_global", &self.injected_global)?;
        Ok(())
    }
}

/// Both names end up verbatim in generated script, so only plain
/// identifiers are accepted.
fn validate_js_identifier(field: &str, name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        Ok(())
    } else {
        Err(QCalcError::Config(format!(
            "{field} must be a JavaScript identifier, got {name:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AdaptationConfig::default();
        config.validate().expect("default config validates");
        assert_eq!(config.interface_name, "AndroidInterface");
        assert_eq!(config.zoom_policy, ZoomPolicy::REFERENCE_352X604);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("qcalc.json");
        std::fs::write(
            &path,
            r#"{ "tablet_policy": { "kind": "any_dimension", "min_dp": 600.0 } }"#,
        )
        .expect("write");

        let config = AdaptationConfig::load(&path).expect("load");
        assert_eq!(config.tablet_policy, TabletSizePolicy::ANY_DIMENSION_600);
        assert_eq!(config.zoom_policy, ZoomPolicy::default());
        assert!(config.lock_phone_to_portrait);
    }

    #[test]
    fn save_then_load_preserves_choices() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("qcalc.json");
        let config = AdaptationConfig {
            zoom_policy: ZoomPolicy::WIDTH_350,
            lock_phone_to_portrait: false,
            ..AdaptationConfig::default()
        };
        config.save(&path).expect("save");
        assert_eq!(AdaptationConfig::load(&path).expect("load"), config);
    }

    #[test]
    fn rejects_script_breaking_names() {
        let config = AdaptationConfig {
            injected_global: "x = 1; alert".into(),
            ..AdaptationConfig::default()
        };
        assert!(matches!(config.validate(), Err(QCalcError::Config(_))));
    }

    #[test]
    fn from_json_validates() {
        let config = AdaptationConfig::from_json("{}").expect("empty object");
        assert_eq!(config, AdaptationConfig::default());

        let inverted = r#"{ "zoom_policy": { "kind": "width_only", "base_width_dp": 350.0,
            "min_percent": 150, "max_percent": 100 } }"#;
        assert!(matches!(AdaptationConfig::from_json(inverted), Err(QCalcError::Config(_))));
        assert!(matches!(
            AdaptationConfig::from_json("not json"),
            Err(QCalcError::Serialization(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AdaptationConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, QCalcError::Io(_)));
    }
}
