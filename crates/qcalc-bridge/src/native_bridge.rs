// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The JavaScript-facing bridge object and page-load injection.
//
// `NativeBridge` is the composition root: it detects the device profile once
// from the host, answers the synchronous interface methods from that
// snapshot, forwards orientation locks to the UI queue, and on every
// page-finished event assigns the snapshot to a page global.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use tracing::{debug, info, instrument, warn};

use qcalc_core::config::AdaptationConfig;
use qcalc_core::error::Result;
use qcalc_core::types::{
    DeviceInfo, DeviceProfile, DisplayMetrics, InjectedDeviceInfo, OrientationType, ScreenSizeClass,
    WebViewSettings,
};
use qcalc_core::{DeviceClassifier, TextScaleCalculator};

use crate::clipboard::ClipboardAccessor;
use crate::method::BridgeMethod;
use crate::orientation::OrientationStateTracker;
use crate::traits::{ClipData, NativeClipboard, PlatformHost, WebViewHost};
use crate::ui_queue::UiDispatcher;

/// Record of the most recent injection, kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct InjectionRecord {
    pub info: InjectedDeviceInfo,
    pub url: String,
    pub injected_at: DateTime<Utc>,
}

/// Bridge object exposed to the hosted calculator.
pub struct NativeBridge {
    host: Arc<dyn PlatformHost>,
    config: AdaptationConfig,
    classifier: DeviceClassifier,
    scaler: TextScaleCalculator,
    profile: RwLock<Arc<DeviceProfile>>,
    orientation: OrientationStateTracker,
    clipboard: ClipboardAccessor,
    last_injection: Mutex<Option<InjectionRecord>>,
}

impl NativeBridge {
    /// Build the bridge and detect the device profile.
    ///
    /// Lock commands are posted to `dispatcher`; the caller keeps the
    /// matching pump and drains it on the UI thread. Fails only if `config`
    /// does not validate: its names end up verbatim in page script.
    pub fn new(
        host: Arc<dyn PlatformHost>,
        config: AdaptationConfig,
        dispatcher: UiDispatcher,
    ) -> Result<Self> {
        config.validate()?;
        let classifier = DeviceClassifier::from_config(&config);
        let scaler = TextScaleCalculator::from_config(&config);
        let profile = detect_profile(host.as_ref(), &config, &classifier, &scaler);
        info!(
            platform = host.platform_name(),
            is_tablet = profile.is_tablet(),
            is_foldable = profile.is_foldable(),
            text_zoom = profile.text_zoom_percent(),
            "native bridge created"
        );

        Ok(Self {
            clipboard: ClipboardAccessor::new(Arc::new(HostClipboard(host.clone()))),
            orientation: OrientationStateTracker::new(dispatcher),
            profile: RwLock::new(Arc::new(profile)),
            last_injection: Mutex::new(None),
            host,
            config,
            classifier,
            scaler,
        })
    }

    /// Name page scripts use to reach this object.
    pub fn interface_name(&self) -> &str {
        &self.config.interface_name
    }

    pub fn orientation(&self) -> &OrientationStateTracker {
        &self.orientation
    }

    /// Current profile snapshot.
    pub fn profile(&self) -> Arc<DeviceProfile> {
        self.profile.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Re-run detection (e.g. after a configuration change) and swap the
    /// snapshot. Readers see either the old or the new profile, never a mix.
    pub fn refresh_profile(&self) -> Arc<DeviceProfile> {
        let fresh = Arc::new(detect_profile(
            self.host.as_ref(),
            &self.config,
            &self.classifier,
            &self.scaler,
        ));
        *self.profile.write().unwrap_or_else(PoisonError::into_inner) = fresh.clone();
        info!(
            is_tablet = fresh.is_tablet(),
            text_zoom = fresh.text_zoom_percent(),
            "device profile refreshed"
        );
        fresh
    }

    // -- JavaScript interface --------------------------------------------------

    pub fn is_tablet(&self) -> bool {
        self.profile().is_tablet()
    }

    pub fn is_phone(&self) -> bool {
        self.profile().is_phone()
    }

    pub fn is_foldable(&self) -> bool {
        self.profile().is_foldable()
    }

    pub fn get_text_zoom(&self) -> u32 {
        self.profile().text_zoom_percent()
    }

    pub fn get_api_level(&self) -> u32 {
        self.profile().api_level()
    }

    pub fn get_navigation_bar_height(&self) -> u32 {
        self.profile().navigation_bar_height_px()
    }

    pub fn is_gesture_navigation(&self) -> bool {
        self.profile().is_gesture_navigation()
    }

    pub fn get_from_clipboard(&self) -> String {
        self.clipboard.get_from_clipboard()
    }

    pub fn lock_to_portrait(&self) {
        self.orientation.lock_to_portrait();
    }

    pub fn lock_to_landscape(&self) {
        self.orientation.lock_to_landscape();
    }

    pub fn unlock_orientation(&self) {
        self.orientation.unlock_orientation();
    }

    /// Orientation-type label for the current display rotation.
    pub fn current_orientation_type(&self) -> OrientationType {
        self.orientation.current_orientation_type(self.host.as_ref())
    }

    /// Dispatch a call by its JavaScript name, for hosts that route page
    /// calls as string messages. Void methods return `null`.
    pub fn invoke(&self, method: &str) -> Result<Value> {
        let method: BridgeMethod = method.parse()?;
        debug!(%method, "bridge method invoked");
        Ok(match method {
            BridgeMethod::IsTablet => json!(self.is_tablet()),
            BridgeMethod::IsPhone => json!(self.is_phone()),
            BridgeMethod::IsFoldable => json!(self.is_foldable()),
            BridgeMethod::GetTextZoom => json!(self.get_text_zoom()),
            BridgeMethod::GetApiLevel => json!(self.get_api_level()),
            BridgeMethod::GetNavigationBarHeight => json!(self.get_navigation_bar_height()),
            BridgeMethod::IsGestureNavigation => json!(self.is_gesture_navigation()),
            BridgeMethod::GetFromClipboard => json!(self.get_from_clipboard()),
            BridgeMethod::LockToPortrait => {
                self.lock_to_portrait();
                Value::Null
            }
            BridgeMethod::LockToLandscape => {
                self.lock_to_landscape();
                Value::Null
            }
            BridgeMethod::UnlockOrientation => {
                self.unlock_orientation();
                Value::Null
            }
        })
    }

    // -- WebView wiring --------------------------------------------------------

    /// Settings the WebView needs for the calculator.
    pub fn webview_settings(&self) -> WebViewSettings {
        WebViewSettings {
            javascript_enabled: true,
            dom_storage_enabled: true,
            cache_mode: self.config.cache_mode,
            text_zoom_percent: self.get_text_zoom(),
        }
    }

    /// Configure the WebView and expose the interface object. Call once on
    /// the UI thread, before the first page load.
    ///
    /// Phones are pinned to portrait afterwards when configured to.
    #[instrument(skip_all, fields(interface = %self.config.interface_name))]
    pub fn attach(&self, webview: &dyn WebViewHost) -> Result<()> {
        let settings = self.webview_settings();
        webview.apply_settings(&settings)?;
        webview.add_javascript_interface(&self.config.interface_name)?;
        info!(text_zoom = settings.text_zoom_percent, "bridge attached to WebView");

        if self.config.lock_phone_to_portrait && self.is_phone() {
            info!("phone detected; locking to portrait");
            self.lock_to_portrait();
        }
        Ok(())
    }

    /// Script that assigns the current snapshot to the page global.
    pub fn injection_script(&self) -> Result<String> {
        let info = InjectedDeviceInfo::from(self.profile().as_ref());
        Ok(render_script(&self.config.injected_global, &info)?)
    }

    /// Page-finished hook. Injects the snapshot once for this load.
    ///
    /// Best effort: a failed hand-over is logged, never reported. The page may
    /// already be gone by the time the script would run.
    pub fn on_page_finished(&self, webview: &dyn WebViewHost, url: &str) {
        let info = InjectedDeviceInfo::from(self.profile().as_ref());
        let script = match render_script(&self.config.injected_global, &info) {
            Ok(script) => script,
            Err(e) => {
                warn!(error = %e, "could not serialise device info");
                return;
            }
        };

        if let Err(e) = webview.evaluate_javascript(&script) {
            debug!(url, error = %e, "device info injection not delivered");
        } else {
            debug!(url, "device info injected");
        }

        *self.last_injection.lock().unwrap_or_else(PoisonError::into_inner) = Some(InjectionRecord {
            info,
            url: url.to_string(),
            injected_at: Utc::now(),
        });
    }

    /// Snapshot used by the most recent page-finished event.
    pub fn last_injection(&self) -> Option<InjectionRecord> {
        self.last_injection.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl std::fmt::Debug for NativeBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeBridge")
            .field("platform", &self.host.platform_name())
            .field("interface_name", &self.config.interface_name)
            .field("profile", &self.profile())
            .finish_non_exhaustive()
    }
}

/// Clipboard view of the host.
struct HostClipboard(Arc<dyn PlatformHost>);

impl NativeClipboard for HostClipboard {
    fn primary_clip(&self) -> Result<Option<ClipData>> {
        self.0.primary_clip()
    }
}

/// Sample the host and compute a profile. Host failures fall back to
/// defaults (phone, minimum zoom, API 0) rather than failing construction.
fn detect_profile(
    host: &dyn PlatformHost,
    config: &AdaptationConfig,
    classifier: &DeviceClassifier,
    scaler: &TextScaleCalculator,
) -> DeviceProfile {
    let metrics = host.display_metrics().unwrap_or_else(|e| {
        warn!(error = %e, "display metrics unavailable; using empty metrics");
        DisplayMetrics {
            width_px: 0,
            height_px: 0,
            density: 1.0,
            size_class: ScreenSizeClass::Undefined,
        }
    });
    let device = host.device_info().unwrap_or_else(|e| {
        warn!(error = %e, "device info unavailable");
        DeviceInfo {
            model: String::new(),
            api_level: 0,
        }
    });

    if metrics.effective_density() != metrics.density {
        warn!(density = metrics.density, "invalid display density; treating as 1.0");
    }

    let (width_dp, height_dp) = (metrics.width_dp(), metrics.height_dp());
    let class = classifier.classify(width_dp, height_dp, metrics.size_class, &device.model);
    let text_zoom = scaler.scale(width_dp, height_dp);
    let navigation = OrientationStateTracker::detect_navigation(
        device.api_level,
        host,
        config.gesture_navigation_min_api,
    );
    debug!(text_zoom, api_level = device.api_level, "device profile computed");

    DeviceProfile::new(class, text_zoom, device.api_level, navigation)
}

fn render_script(global: &str, info: &InjectedDeviceInfo) -> serde_json::Result<String> {
    Ok(format!("window.{global} = {};", serde_json::to_string(info)?))
}
