// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Swappable heuristics for tablet detection and text zoom.
//
// Two generations of each heuristic exist. Both are kept as named policy
// values so the choice is made in configuration, not in code.

use serde::{Deserialize, Serialize};

use crate::error::{QCalcError, Result};

/// How screen size alone decides "tablet".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TabletSizePolicy {
    /// The smaller screen dimension must reach `min_dp`.
    SmallestWidth { min_dp: f32 },
    /// Either screen dimension reaching `min_dp` is enough.
    AnyDimension { min_dp: f32 },
}

impl TabletSizePolicy {
    /// Smallest width of at least 660dp.
    pub const SMALLEST_WIDTH_660: Self = Self::SmallestWidth { min_dp: 660.0 };

    /// Either side of at least 600dp. Classifies far more devices as tablets
    /// (every phone in landscape with a tall screen, for instance).
    pub const ANY_DIMENSION_600: Self = Self::AnyDimension { min_dp: 600.0 };

    pub fn is_tablet_sized(&self, width_dp: f32, height_dp: f32) -> bool {
        match *self {
            Self::SmallestWidth { min_dp } => width_dp.min(height_dp) >= min_dp,
            Self::AnyDimension { min_dp } => width_dp >= min_dp || height_dp >= min_dp,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let (Self::SmallestWidth { min_dp } | Self::AnyDimension { min_dp }) = *self;
        if min_dp.is_finite() && min_dp > 0.0 {
            Ok(())
        } else {
            Err(QCalcError::Config(format!("tablet threshold must be positive, got {min_dp}")))
        }
    }
}

impl Default for TabletSizePolicy {
    fn default() -> Self {
        Self::SMALLEST_WIDTH_660
    }
}

/// How screen size maps to a text zoom percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ZoomPolicy {
    /// Scale against a reference device box; whichever axis is relatively
    /// larger wins.
    ReferenceBox {
        base_width_dp: f32,
        base_height_dp: f32,
        min_percent: u32,
        max_percent: u32,
    },
    /// Scale by width only.
    WidthOnly {
        base_width_dp: f32,
        min_percent: u32,
        max_percent: u32,
    },
}

impl ZoomPolicy {
    /// 352×604dp reference device, clamped to 75–125%.
    pub const REFERENCE_352X604: Self = Self::ReferenceBox {
        base_width_dp: 352.0,
        base_height_dp: 604.0,
        min_percent: 75,
        max_percent: 125,
    };

    /// 350dp reference width, clamped to 50–200%.
    pub const WIDTH_350: Self = Self::WidthOnly {
        base_width_dp: 350.0,
        min_percent: 50,
        max_percent: 200,
    };

    /// Unclamped scale factor (1.0 = reference device).
    pub fn scale_factor(&self, width_dp: f32, height_dp: f32) -> f32 {
        match *self {
            Self::ReferenceBox {
                base_width_dp,
                base_height_dp,
                ..
            } => (width_dp / base_width_dp).max(height_dp / base_height_dp),
            Self::WidthOnly { base_width_dp, .. } => width_dp / base_width_dp,
        }
    }

    /// Inclusive `(min, max)` zoom percentage.
    pub fn bounds(&self) -> (u32, u32) {
        match *self {
            Self::ReferenceBox {
                min_percent,
                max_percent,
                ..
            }
            | Self::WidthOnly {
                min_percent,
                max_percent,
                ..
            } => (min_percent, max_percent),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let (min, max) = self.bounds();
        if min == 0 || min > max {
            return Err(QCalcError::Config(format!(
                "zoom bounds must satisfy 0 < min <= max, got {min}..={max}"
            )));
        }
        let bases: &[f32] = match self {
            Self::ReferenceBox {
                base_width_dp,
                base_height_dp,
                ..
            } => &[*base_width_dp, *base_height_dp],
            Self::WidthOnly { base_width_dp, .. } => &[*base_width_dp],
        };
        if bases.iter().any(|b| !b.is_finite() || *b <= 0.0) {
            return Err(QCalcError::Config("zoom reference dimensions must be positive".into()));
        }
        Ok(())
    }
}

impl Default for ZoomPolicy {
    fn default() -> Self {
        Self::REFERENCE_352X604
    }
}
