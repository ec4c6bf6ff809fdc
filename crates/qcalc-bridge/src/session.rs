// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// A bridge attached to one WebView, plus the UI queue that serves it.
//
// This is what a host keeps alive between platform callbacks: the Activity's
// page-finished, configuration-changed and UI-loop hooks all land here.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use qcalc_core::config::AdaptationConfig;
use qcalc_core::error::Result;
use qcalc_core::types::ConfigOrientation;

use crate::native_bridge::NativeBridge;
use crate::traits::{PlatformHost, WebViewHost};
use crate::ui_queue::{UiTaskPump, ui_queue};

pub struct BridgeSession<W> {
    host: Arc<dyn PlatformHost>,
    bridge: NativeBridge,
    webview: W,
    pump: Mutex<UiTaskPump>,
}

impl<W: WebViewHost> BridgeSession<W> {
    /// Build the bridge, attach it to `webview` and apply the startup
    /// commands. Must run on the UI thread, before the first page load.
    pub fn start(host: Arc<dyn PlatformHost>, webview: W, config: AdaptationConfig) -> Result<Self> {
        let (dispatcher, pump) = ui_queue();
        let bridge = NativeBridge::new(host.clone(), config, dispatcher)?;
        bridge.attach(&webview)?;

        let session = Self {
            host,
            bridge,
            webview,
            pump: Mutex::new(pump),
        };
        session.drain_ui_queue();
        session.observe_orientation();
        info!(platform = session.host.platform_name(), "bridge session started");
        Ok(session)
    }

    pub fn bridge(&self) -> &NativeBridge {
        &self.bridge
    }

    pub fn webview(&self) -> &W {
        &self.webview
    }

    /// Page-finished hook.
    pub fn on_page_finished(&self, url: &str) {
        self.bridge.on_page_finished(&self.webview, url);
    }

    /// Apply queued UI commands. UI thread only.
    pub fn drain_ui_queue(&self) -> usize {
        let mut pump = self.pump.lock().unwrap_or_else(PoisonError::into_inner);
        pump.drain(self.host.as_ref())
    }

    /// Configuration-changed hook. UI thread only.
    ///
    /// Re-detects the profile, pushes the new text zoom to the WebView and
    /// reports whether the coarse orientation changed.
    pub fn on_configuration_changed(&self) -> bool {
        let changed = self.observe_orientation();
        let profile = self.bridge.refresh_profile();
        if let Err(e) = self.webview.apply_settings(&self.bridge.webview_settings()) {
            warn!(error = %e, "could not re-apply WebView settings");
        }
        debug!(changed, text_zoom = profile.text_zoom_percent(), "configuration change handled");
        changed
    }

    fn observe_orientation(&self) -> bool {
        let orientation = self.host.config_orientation().unwrap_or_else(|e| {
            warn!(error = %e, "configuration orientation unavailable");
            ConfigOrientation::Undefined
        });
        self.bridge.orientation().has_orientation_changed(orientation)
    }
}
