// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// QCalc shell: core types, policies and device adaptation shared across crates.

pub mod classify;
pub mod config;
pub mod error;
pub mod policy;
pub mod text_scale;
pub mod types;

pub use classify::DeviceClassifier;
pub use config::AdaptationConfig;
pub use error::QCalcError;
pub use policy::{TabletSizePolicy, ZoomPolicy};
pub use text_scale::TextScaleCalculator;
pub use types::*;
