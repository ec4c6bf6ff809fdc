// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Names of the methods exposed on the JavaScript interface object.

use std::fmt;
use std::str::FromStr;

use qcalc_core::error::QCalcError;

/// A method callable from page scripts on the bridge object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BridgeMethod {
    IsTablet,
    IsPhone,
    IsFoldable,
    GetTextZoom,
    GetApiLevel,
    GetNavigationBarHeight,
    IsGestureNavigation,
    GetFromClipboard,
    LockToPortrait,
    LockToLandscape,
    UnlockOrientation,
}

impl BridgeMethod {
    pub const ALL: [Self; 11] = [
        Self::IsTablet,
        Self::IsPhone,
        Self::IsFoldable,
        Self::GetTextZoom,
        Self::GetApiLevel,
        Self::GetNavigationBarHeight,
        Self::IsGestureNavigation,
        Self::GetFromClipboard,
        Self::LockToPortrait,
        Self::LockToLandscape,
        Self::UnlockOrientation,
    ];

    /// Name as seen from JavaScript.
    pub fn js_name(self) -> &'static str {
        match self {
            Self::IsTablet => "isTablet",
            Self::IsPhone => "isPhone",
            Self::IsFoldable => "isFoldable",
            Self::GetTextZoom => "getTextZoom",
            Self::GetApiLevel => "getApiLevel",
            Self::GetNavigationBarHeight => "getNavigationBarHeight",
            Self::IsGestureNavigation => "isGestureNavigation",
            Self::GetFromClipboard => "getFromClipboard",
            Self::LockToPortrait => "lockToPortrait",
            Self::LockToLandscape => "lockToLandscape",
            Self::UnlockOrientation => "unlockOrientation",
        }
    }
}

impl fmt::Display for BridgeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.js_name())
    }
}

impl FromStr for BridgeMethod {
    type Err = QCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.js_name() == s)
            .ok_or_else(|| QCalcError::UnknownMethod(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_method_parses_from_its_js_name() {
        for method in BridgeMethod::ALL {
            assert_eq!(method.js_name().parse::<BridgeMethod>().expect("parse"), method);
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        let err = "setTextZoom".parse::<BridgeMethod>().unwrap_err();
        assert!(matches!(err, QCalcError::UnknownMethod(name) if name == "setTextZoom"));
        assert!("IsTablet".parse::<BridgeMethod>().is_err());
    }
}
