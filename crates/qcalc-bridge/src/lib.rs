// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// QCalc shell: native bridge between the hosted calculator page and the
// mobile platform.
//
// The traits in `traits` abstract the platform; `native_bridge` composes
// them into the object the page talks to. Platform implementations are
// selected at compile time.

pub mod clipboard;
pub mod method;
pub mod native_bridge;
pub mod orientation;
pub mod session;
pub mod traits;
pub mod ui_queue;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(target_os = "android"))]
pub mod stub;

use std::sync::Arc;

pub use clipboard::ClipboardAccessor;
pub use method::BridgeMethod;
pub use native_bridge::{InjectionRecord, NativeBridge};
pub use orientation::OrientationStateTracker;
pub use session::BridgeSession;
pub use traits::PlatformHost;
pub use ui_queue::{UiCommand, UiDispatcher, UiTaskPump, ui_queue};

/// Host implementation for the target operating system.
#[cfg(target_os = "android")]
pub fn platform_host() -> Arc<dyn PlatformHost> {
    // Android: JNI calls into the hosting Activity.
    Arc::new(android::AndroidHost::new())
}

/// Host implementation for the target operating system.
///
/// Off Android this is a simulated phone; use `stub::StubHost::new` to
/// simulate something else. There is no native iOS host.
#[cfg(not(target_os = "android"))]
pub fn platform_host() -> Arc<dyn PlatformHost> {
    // DESKTOP/CI/iOS: simulated device so non-Android builds run end to end.
    Arc::new(stub::StubHost::default())
}

#[cfg(all(test, not(target_os = "android")))]
mod tests {
    use super::*;
    use crate::traits::DisplayMetricsProvider;

    #[test]
    fn off_android_host_is_the_simulator() {
        let host = platform_host();
        assert_eq!(host.platform_name(), "Desktop (stub)");
        assert_eq!(host.device_info().expect("device info").model, "Desktop Simulator");
    }
}
