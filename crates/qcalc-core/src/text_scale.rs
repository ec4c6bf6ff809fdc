// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text zoom derived from screen size.

use crate::config::AdaptationConfig;
use crate::policy::ZoomPolicy;
use crate::types::DisplayMetrics;

/// Turns screen dimensions into the WebView text zoom percentage.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextScaleCalculator {
    policy: ZoomPolicy,
}

impl TextScaleCalculator {
    pub fn new(policy: ZoomPolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &AdaptationConfig) -> Self {
        Self::new(config.zoom_policy)
    }

    /// Zoom percentage for the given dp dimensions, always inside the
    /// policy bounds. NaN and non-positive inputs land on the lower bound.
    pub fn scale(&self, width_dp: f32, height_dp: f32) -> u32 {
        let (min, max) = self.policy.bounds();
        let percent = (self.policy.scale_factor(width_dp, height_dp) * 100.0).round();
        // `f32::max` drops NaN. Not `clamp`: an unvalidated policy may carry
        // min > max, in which case the upper bound wins.
        percent.max(min as f32).min(max as f32) as u32
    }

    /// Convenience for raw metrics; density is applied before scaling.
    pub fn scale_metrics(&self, metrics: &DisplayMetrics) -> u32 {
        self.scale(metrics.width_dp(), metrics.height_dp())
    }
}
