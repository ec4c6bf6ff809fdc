// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Navigation-bar state, orientation locking and orientation tracking.

use std::sync::{Mutex, PoisonError};

use tracing::{debug, info, warn};

use qcalc_core::error::QCalcError;
use qcalc_core::types::{
    ConfigOrientation, NavigationMode, NavigationState, OrientationLock, OrientationType, Rotation,
};

use crate::traits::{NativeOrientation, PlatformSettings};
use crate::ui_queue::{UiCommand, UiDispatcher};

/// Platform dimension resource holding the navigation-bar height.
pub const NAVIGATION_BAR_HEIGHT_RESOURCE: &str = "navigation_bar_height";

/// Secure setting holding the navigation mode (0/1/2).
pub const NAVIGATION_MODE_SETTING: &str = "navigation_mode";

/// Tracks navigation and orientation state and issues orientation locks.
///
/// Locks go through the UI task queue; this type never touches the
/// platform orientation API itself, so it is safe to call from any thread.
#[derive(Debug)]
pub struct OrientationStateTracker {
    dispatcher: UiDispatcher,
    last_config: Mutex<ConfigOrientation>,
}

impl OrientationStateTracker {
    pub fn new(dispatcher: UiDispatcher) -> Self {
        Self {
            dispatcher,
            last_config: Mutex::new(ConfigOrientation::Undefined),
        }
    }

    // -- Detection -------------------------------------------------------------

    /// Read navigation-bar height and whether gesture navigation is active.
    ///
    /// Never fails: a missing resource gives height 0, and a missing or
    /// unreadable navigation mode gives `false`. Below `gesture_min_api` the
    /// setting is not queried at all.
    pub fn detect_navigation<S: PlatformSettings + ?Sized>(
        api_level: u32,
        settings: &S,
        gesture_min_api: u32,
    ) -> NavigationState {
        let navigation_bar_height_px = match settings.dimension_px(NAVIGATION_BAR_HEIGHT_RESOURCE) {
            Ok(Some(px)) => px,
            Ok(None) => 0,
            Err(e) => {
                warn!(error = %e, "navigation bar height unavailable; assuming 0");
                0
            }
        };

        let is_gesture_navigation = if api_level >= gesture_min_api {
            match settings.secure_int(NAVIGATION_MODE_SETTING) {
                Ok(raw) => NavigationMode::from_setting(raw).is_some_and(NavigationMode::is_gesture),
                Err(QCalcError::SettingNotFound(key)) => {
                    warn!(key = %key, "navigation mode setting not found; assuming button navigation");
                    false
                }
                Err(e) => {
                    warn!(error = %e, "navigation mode unreadable; assuming button navigation");
                    false
                }
            }
        } else {
            false
        };

        let state = NavigationState {
            navigation_bar_height_px,
            is_gesture_navigation,
        };
        debug!(
            api_level,
            height_px = state.navigation_bar_height_px,
            gesture = state.is_gesture_navigation,
            "navigation state detected"
        );
        state
    }

    // -- Locking ---------------------------------------------------------------

    pub fn lock_to_portrait(&self) {
        self.request(OrientationLock::Portrait);
    }

    pub fn lock_to_landscape(&self) {
        self.request(OrientationLock::Landscape);
    }

    pub fn unlock_orientation(&self) {
        self.request(OrientationLock::Unspecified);
    }

    /// Pin the screen to a specific orientation-type label.
    pub fn lock_to(&self, orientation: OrientationType) {
        self.request(orientation.lock());
    }

    fn request(&self, lock: OrientationLock) {
        info!(?lock, "orientation lock requested");
        self.dispatcher.post(UiCommand::SetOrientation(lock));
    }

    // -- Tracking --------------------------------------------------------------

    /// Orientation-type label for the current rotation. Falls back to
    /// `portrait-primary` if the rotation cannot be read.
    pub fn current_orientation_type<H: NativeOrientation + ?Sized>(&self, host: &H) -> OrientationType {
        let rotation = host.rotation().unwrap_or_else(|e| {
            warn!(error = %e, "display rotation unavailable; assuming natural orientation");
            Rotation::Deg0
        });
        OrientationType::from_rotation(rotation)
    }

    /// Edge detector over configuration changes: records `orientation` and
    /// reports whether it differs from the previously recorded one.
    pub fn has_orientation_changed(&self, orientation: ConfigOrientation) -> bool {
        let mut last = self.last_config.lock().unwrap_or_else(PoisonError::into_inner);
        if *last == orientation {
            false
        } else {
            debug!(from = ?*last, to = ?orientation, "configuration orientation changed");
            *last = orientation;
            true
        }
    }
}
