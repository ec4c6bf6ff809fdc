// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Phone / tablet / foldable classification.

use tracing::debug;

use crate::config::AdaptationConfig;
use crate::policy::TabletSizePolicy;
use crate::types::{DeviceClass, ScreenSizeClass};

/// Derives the device class from screen size, the platform size bucket and
/// the model string. Pure: the same inputs always give the same class.
#[derive(Debug, Clone)]
pub struct DeviceClassifier {
    size_policy: TabletSizePolicy,
    /// Lower-cased once so each classification is a plain substring scan.
    foldable_keywords: Vec<String>,
}

impl DeviceClassifier {
    pub fn new(size_policy: TabletSizePolicy, foldable_keywords: &[String]) -> Self {
        Self {
            size_policy,
            foldable_keywords: foldable_keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    pub fn from_config(config: &AdaptationConfig) -> Self {
        Self::new(config.tablet_policy, &config.foldable_keywords)
    }

    /// Classify a device.
    ///
    /// Tablet when the platform size bucket is `Large` or above, or when the
    /// size policy says so. Phone is the negation of tablet. Foldable is a
    /// separate model-string check and never changes the tablet/phone split.
    pub fn classify(
        &self,
        width_dp: f32,
        height_dp: f32,
        size_class: ScreenSizeClass,
        model: &str,
    ) -> DeviceClass {
        let tablet_by_config = size_class.is_large_or_above();
        let tablet_by_size = self.size_policy.is_tablet_sized(width_dp, height_dp);
        let is_foldable = self.is_foldable_model(model);

        let class = DeviceClass::new(tablet_by_config || tablet_by_size, is_foldable);
        debug!(
            model,
            width_dp,
            height_dp,
            ?size_class,
            is_tablet = class.is_tablet(),
            is_phone = class.is_phone(),
            is_foldable = class.is_foldable(),
            "device class detected"
        );
        class
    }

    pub fn is_foldable_model(&self, model: &str) -> bool {
        let model = model.to_lowercase();
        self.foldable_keywords
            .iter()
            .any(|keyword| !keyword.is_empty() && model.contains(keyword.as_str()))
    }
}

impl Default for DeviceClassifier {
    fn default() -> Self {
        Self::from_config(&AdaptationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> DeviceClassifier {
        DeviceClassifier::default()
    }

    #[test]
    fn smallest_width_at_threshold_is_tablet() {
        let class = classifier().classify(660.0, 1000.0, ScreenSizeClass::Normal, "Generic");
        assert!(class.is_tablet());
        assert!(!class.is_phone());
    }

    #[test]
    fn below_threshold_with_normal_bucket_is_phone() {
        for (w, h) in [(659.9, 2000.0), (360.0, 640.0), (0.0, 0.0), (2000.0, 400.0)] {
            let class = classifier().classify(w, h, ScreenSizeClass::Normal, "Generic");
            assert!(class.is_phone(), "{w}x{h} should be a phone");
            assert!(!class.is_tablet());
        }
    }

    #[test]
    fn large_bucket_forces_tablet() {
        let class = classifier().classify(400.0, 600.0, ScreenSizeClass::Large, "Generic");
        assert!(class.is_tablet());
        let class = classifier().classify(400.0, 600.0, ScreenSizeClass::XLarge, "Generic");
        assert!(class.is_tablet());
    }

    #[test]
    fn foldable_is_independent_of_size() {
        let c = classifier();
        assert!(c.classify(360.0, 640.0, ScreenSizeClass::Normal, "Galaxy Fold3").is_foldable());
        assert!(c.classify(900.0, 1200.0, ScreenSizeClass::Normal, "Galaxy Fold3").is_foldable());
        assert!(!c.classify(360.0, 640.0, ScreenSizeClass::Normal, "Pixel 7").is_foldable());
        assert!(!c.classify(900.0, 1200.0, ScreenSizeClass::Normal, "Pixel 7").is_foldable());

        // Foldable must not influence the tablet/phone outcome.
        let fold = c.classify(360.0, 640.0, ScreenSizeClass::Normal, "Galaxy Z Flip5");
        assert!(fold.is_foldable());
        assert!(fold.is_phone());
    }

    #[test]
    fn foldable_match_is_case_insensitive() {
        assert!(classifier().is_foldable_model("SM-F946B GALAXY FOLD"));
        assert!(classifier().is_foldable_model("razr flip"));
    }

    #[test]
    fn tablet_scenario_sm_t510() {
        let class = classifier().classify(800.0, 1280.0, ScreenSizeClass::Normal, "SM-T510");
        assert!(class.is_tablet());
        assert!(!class.is_phone());
        assert!(!class.is_foldable());
    }

    #[test]
    fn looser_policy_changes_outcome() {
        let loose = DeviceClassifier::new(TabletSizePolicy::ANY_DIMENSION_600, &["fold".into()]);
        let class = loose.classify(411.0, 914.0, ScreenSizeClass::Normal, "Pixel 7");
        assert!(class.is_tablet());
        let class = classifier().classify(411.0, 914.0, ScreenSizeClass::Normal, "Pixel 7");
        assert!(class.is_phone());
    }
}
