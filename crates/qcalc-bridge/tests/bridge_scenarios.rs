// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end bridge behaviour against simulated devices.

#![cfg(not(target_os = "android"))]

use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use qcalc_bridge::stub::{SimulatedDevice, StubHost, StubWebView};
use qcalc_bridge::traits::*;
use qcalc_bridge::{NativeBridge, UiTaskPump, ui_queue};
use qcalc_core::error::{QCalcError, Result};
use qcalc_core::types::{
    CacheMode, ConfigOrientation, DeviceInfo, DisplayMetrics, OrientationLock, OrientationType,
    Rotation, ScreenSizeClass,
};
use qcalc_core::{AdaptationConfig, TabletSizePolicy, ZoomPolicy};

fn galaxy_tab_a() -> SimulatedDevice {
    SimulatedDevice {
        metrics: DisplayMetrics {
            width_px: 1200,
            height_px: 1920,
            density: 1.5,
            // Size bucket alone would not make it a tablet; the 660dp rule must.
            size_class: ScreenSizeClass::Normal,
        },
        info: DeviceInfo {
            model: "SM-T510".into(),
            api_level: 29,
        },
        ..SimulatedDevice::default()
    }
}

fn pixel_4a() -> SimulatedDevice {
    SimulatedDevice {
        metrics: DisplayMetrics {
            width_px: 1080,
            height_px: 1920,
            density: 3.0,
            size_class: ScreenSizeClass::Normal,
        },
        info: DeviceInfo {
            model: "Pixel 4a".into(),
            api_level: 30,
        },
        ..SimulatedDevice::default()
    }
}

fn bridge_for(device: SimulatedDevice, config: AdaptationConfig) -> (NativeBridge, Arc<StubHost>, UiTaskPump) {
    let host = Arc::new(StubHost::new(device));
    let (dispatcher, pump) = ui_queue();
    let bridge = NativeBridge::new(host.clone(), config, dispatcher).expect("valid config");
    (bridge, host, pump)
}

fn no_startup_lock() -> AdaptationConfig {
    AdaptationConfig {
        lock_phone_to_portrait: false,
        ..AdaptationConfig::default()
    }
}

/// Parse the object literal out of `window.<global> = {...};`.
fn injected_object(script: &str, global: &str) -> Value {
    let prefix = format!("window.{global} = ");
    let body = script
        .strip_prefix(&prefix)
        .and_then(|rest| rest.strip_suffix(';'))
        .expect("script has the expected shape");
    serde_json::from_str(body).expect("injected object is JSON")
}

// ---------------------------------------------------------------------------
// Classification scenarios
// ---------------------------------------------------------------------------

#[test]
fn galaxy_tab_is_a_tablet_with_saturated_zoom() {
    let (bridge, host, mut pump) = bridge_for(galaxy_tab_a(), AdaptationConfig::default());

    assert!(bridge.is_tablet());
    assert!(!bridge.is_phone());
    assert!(!bridge.is_foldable());
    assert_eq!(bridge.get_text_zoom(), 125);
    assert_eq!(bridge.get_api_level(), 29);

    let webview = StubWebView::new();
    bridge.attach(&webview).expect("attach");
    assert_eq!(pump.drain(host.as_ref()), 0, "tablets are not pinned");
    assert_eq!(host.requested_orientation(), OrientationLock::Unspecified);
}

#[test]
fn pixel_phone_stays_near_baseline_and_is_pinned_to_portrait() {
    let (bridge, host, mut pump) = bridge_for(pixel_4a(), AdaptationConfig::default());

    assert!(bridge.is_phone());
    assert!(!bridge.is_tablet());
    let zoom = bridge.get_text_zoom();
    assert!((75..=125).contains(&zoom));
    assert_eq!(zoom, 106);

    let webview = StubWebView::new();
    bridge.attach(&webview).expect("attach");
    assert_eq!(pump.drain(host.as_ref()), 1);
    assert_eq!(host.requested_orientation(), OrientationLock::Portrait);

    let state = webview.snapshot();
    let settings = state.settings.expect("settings applied");
    assert!(settings.javascript_enabled);
    assert!(settings.dom_storage_enabled);
    assert_eq!(settings.cache_mode, CacheMode::NoCache);
    assert_eq!(settings.text_zoom_percent, 106);
    assert_eq!(state.interfaces, vec!["AndroidInterface".to_string()]);
}

#[test]
fn foldable_model_is_flagged_regardless_of_size() {
    let device = SimulatedDevice {
        info: DeviceInfo {
            model: "Galaxy Z Flip5".into(),
            api_level: 34,
        },
        ..pixel_4a()
    };
    let (bridge, _host, _pump) = bridge_for(device, no_startup_lock());
    assert!(bridge.is_phone());
    assert!(bridge.is_foldable());
}

#[test]
fn looser_tablet_policy_from_config_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("adaptation.json");
    std::fs::write(
        &path,
        r#"{ "tablet_policy": { "kind": "any_dimension", "min_dp": 600.0 } }"#,
    )
    .expect("write config");

    let config = AdaptationConfig::load(&path).expect("load config");
    assert_eq!(config.tablet_policy, TabletSizePolicy::ANY_DIMENSION_600);

    // 360x640dp: too narrow for the default policy, tall enough for this one.
    let (bridge, _host, _pump) = bridge_for(pixel_4a(), config);
    assert!(bridge.is_tablet());
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[test]
fn navigation_state_follows_api_level_and_setting() {
    let (bridge, _, _) = bridge_for(pixel_4a(), no_startup_lock());
    assert_eq!(bridge.get_navigation_bar_height(), 144);
    assert!(bridge.is_gesture_navigation());

    let old_api = SimulatedDevice {
        info: DeviceInfo {
            model: "Pixel 3".into(),
            api_level: 28,
        },
        ..pixel_4a()
    };
    let (bridge, _, _) = bridge_for(old_api, no_startup_lock());
    assert!(!bridge.is_gesture_navigation());

    let three_button = SimulatedDevice {
        navigation_mode: Some(0),
        ..pixel_4a()
    };
    let (bridge, _, _) = bridge_for(three_button, no_startup_lock());
    assert!(!bridge.is_gesture_navigation());

    let no_setting = SimulatedDevice {
        navigation_bar_height_px: None,
        navigation_mode: None,
        ..pixel_4a()
    };
    let (bridge, _, _) = bridge_for(no_setting, no_startup_lock());
    assert!(!bridge.is_gesture_navigation());
    assert_eq!(bridge.get_navigation_bar_height(), 0);
}

// ---------------------------------------------------------------------------
// Injection
// ---------------------------------------------------------------------------

#[test]
fn injected_info_agrees_with_interface_methods() {
    let (bridge, _host, _pump) = bridge_for(pixel_4a(), no_startup_lock());
    let webview = StubWebView::new();

    bridge.on_page_finished(&webview, "file:///android_asset/index.html");

    let scripts = webview.snapshot().scripts;
    assert_eq!(scripts.len(), 1);
    let injected = injected_object(&scripts[0], "nativeDeviceInfo");

    assert_eq!(injected["isTablet"], bridge.invoke("isTablet").expect("isTablet"));
    assert_eq!(injected["isPhone"], bridge.invoke("isPhone").expect("isPhone"));
    assert_eq!(injected["isFoldable"], bridge.invoke("isFoldable").expect("isFoldable"));
    assert_eq!(injected["textZoomLevel"], bridge.invoke("getTextZoom").expect("getTextZoom"));

    let record = bridge.last_injection().expect("injection recorded");
    assert_eq!(record.url, "file:///android_asset/index.html");
    assert_eq!(record.info.text_zoom_level, 106);
}

#[test]
fn every_page_load_injects_again() {
    let (bridge, _host, _pump) = bridge_for(galaxy_tab_a(), AdaptationConfig::default());
    let webview = StubWebView::new();

    bridge.on_page_finished(&webview, "file:///a.html");
    bridge.on_page_finished(&webview, "file:///b.html");

    let scripts = webview.snapshot().scripts;
    assert_eq!(scripts.len(), 2);
    assert_eq!(scripts[0], scripts[1]);
    assert_eq!(bridge.last_injection().expect("record").url, "file:///b.html");
}

#[test]
fn script_breaking_global_name_is_rejected() {
    let config = AdaptationConfig {
        injected_global: "x=1;alert(document.cookie);window.y".into(),
        ..no_startup_lock()
    };
    let (dispatcher, _pump) = ui_queue();
    let err = NativeBridge::new(Arc::new(StubHost::new(pixel_4a())), config, dispatcher).unwrap_err();
    assert!(matches!(err, QCalcError::Config(_)));
}

#[test]
fn inverted_zoom_bounds_are_rejected() {
    let config = AdaptationConfig {
        zoom_policy: ZoomPolicy::WidthOnly {
            base_width_dp: 350.0,
            min_percent: 150,
            max_percent: 100,
        },
        ..no_startup_lock()
    };
    let (dispatcher, _pump) = ui_queue();
    let err = NativeBridge::new(Arc::new(StubHost::new(pixel_4a())), config, dispatcher).unwrap_err();
    assert!(matches!(err, QCalcError::Config(_)));
}

#[test]
fn custom_global_name_is_used() {
    let config = AdaptationConfig {
        injected_global: "deviceInfo".into(),
        ..no_startup_lock()
    };
    let (bridge, _host, _pump) = bridge_for(pixel_4a(), config);
    let script = bridge.injection_script().expect("script");
    assert_eq!(injected_object(&script, "deviceInfo")["isPhone"], json!(true));
}

#[test]
fn detached_webview_does_not_break_page_finished() {
    let (bridge, _host, _pump) = bridge_for(pixel_4a(), no_startup_lock());
    let webview = StubWebView::new();
    webview.set_detached(true);

    bridge.on_page_finished(&webview, "about:blank");

    assert!(webview.snapshot().scripts.is_empty());
    assert!(bridge.last_injection().is_some());
}

// ---------------------------------------------------------------------------
// Orientation
// ---------------------------------------------------------------------------

#[test]
fn repeated_portrait_locks_settle_on_portrait() {
    let (bridge, host, mut pump) = bridge_for(pixel_4a(), no_startup_lock());

    bridge.lock_to_portrait();
    bridge.lock_to_portrait();
    bridge.lock_to_portrait();
    assert_eq!(host.requested_orientation(), OrientationLock::Unspecified, "nothing applied before drain");

    assert_eq!(pump.drain(host.as_ref()), 3);
    assert_eq!(host.requested_orientation(), OrientationLock::Portrait);

    bridge.unlock_orientation();
    pump.drain(host.as_ref());
    assert_eq!(host.requested_orientation(), OrientationLock::Unspecified);
}

#[test]
fn last_queued_lock_wins() {
    let (bridge, host, mut pump) = bridge_for(pixel_4a(), no_startup_lock());

    bridge.lock_to_landscape();
    bridge.lock_to_portrait();
    bridge.orientation().lock_to(OrientationType::LandscapeSecondary);
    pump.drain(host.as_ref());

    assert_eq!(host.requested_orientation(), OrientationLock::ReverseLandscape);
    assert_eq!(bridge.current_orientation_type(), OrientationType::LandscapeSecondary);
}

#[test]
fn orientation_change_edge_detection() {
    let (bridge, host, mut pump) = bridge_for(pixel_4a(), no_startup_lock());
    let tracker = bridge.orientation();

    let initial = host.config_orientation().expect("config orientation");
    assert_eq!(initial, ConfigOrientation::Portrait);
    assert!(tracker.has_orientation_changed(initial));
    assert!(!tracker.has_orientation_changed(initial));

    bridge.lock_to_landscape();
    pump.drain(host.as_ref());
    let rotated = host.config_orientation().expect("config orientation");
    assert!(tracker.has_orientation_changed(rotated));
    assert!(!tracker.has_orientation_changed(rotated));
}

#[tokio::test]
async fn async_pump_applies_locks_until_bridge_is_dropped() {
    let (bridge, host, pump) = bridge_for(pixel_4a(), no_startup_lock());

    bridge.lock_to_landscape();
    drop(bridge);

    pump.run(host.as_ref()).await;
    assert_eq!(host.requested_orientation(), OrientationLock::Landscape);
}

// ---------------------------------------------------------------------------
// Clipboard and dispatch
// ---------------------------------------------------------------------------

#[test]
fn clipboard_text_or_empty() {
    let (bridge, _, _) = bridge_for(pixel_4a(), no_startup_lock());
    assert_eq!(bridge.get_from_clipboard(), "");
    assert_eq!(bridge.invoke("getFromClipboard").expect("invoke"), json!(""));

    let with_clip = SimulatedDevice {
        clipboard_text: Some("3.14159".into()),
        ..pixel_4a()
    };
    let (bridge, _, _) = bridge_for(with_clip, no_startup_lock());
    assert_eq!(bridge.get_from_clipboard(), "3.14159");
}

#[test]
fn invoke_dispatches_by_js_name() {
    let (bridge, host, mut pump) = bridge_for(pixel_4a(), no_startup_lock());

    assert_eq!(bridge.invoke("getApiLevel").expect("invoke"), json!(30));
    assert_eq!(bridge.invoke("getNavigationBarHeight").expect("invoke"), json!(144));
    assert_eq!(bridge.invoke("isGestureNavigation").expect("invoke"), json!(true));

    assert_eq!(bridge.invoke("lockToLandscape").expect("invoke"), Value::Null);
    pump.drain(host.as_ref());
    assert_eq!(host.requested_orientation(), OrientationLock::Landscape);

    let err = bridge.invoke("reboot").unwrap_err();
    assert!(matches!(err, QCalcError::UnknownMethod(name) if name == "reboot"));
}

// ---------------------------------------------------------------------------
// Hosts whose answers change or fail
// ---------------------------------------------------------------------------

/// Host with mutable metrics and optional failure of every read.
struct FakeHost {
    metrics: Mutex<DisplayMetrics>,
    failing: bool,
}

impl FakeHost {
    fn new(metrics: DisplayMetrics) -> Self {
        Self {
            metrics: Mutex::new(metrics),
            failing: false,
        }
    }

    fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new(pixel_4a().metrics)
        }
    }

    fn check(&self) -> Result<()> {
        if self.failing {
            Err(QCalcError::Bridge("host gone".into()))
        } else {
            Ok(())
        }
    }
}

impl PlatformHost for FakeHost {
    fn platform_name(&self) -> &str {
        "fake"
    }
}

impl DisplayMetricsProvider for FakeHost {
    fn display_metrics(&self) -> Result<DisplayMetrics> {
        self.check()?;
        Ok(*self.metrics.lock().unwrap())
    }

    fn device_info(&self) -> Result<DeviceInfo> {
        self.check()?;
        Ok(DeviceInfo {
            model: "Resizable".into(),
            api_level: 33,
        })
    }
}

impl PlatformSettings for FakeHost {
    fn dimension_px(&self, _name: &str) -> Result<Option<u32>> {
        self.check()?;
        Ok(Some(63))
    }

    fn secure_int(&self, key: &str) -> Result<i32> {
        self.check()?;
        Err(QCalcError::SettingNotFound(key.into()))
    }
}

impl NativeClipboard for FakeHost {
    fn primary_clip(&self) -> Result<Option<ClipData>> {
        self.check()?;
        Ok(None)
    }
}

impl NativeOrientation for FakeHost {
    fn set_requested_orientation(&self, _lock: OrientationLock) -> Result<()> {
        self.check()
    }

    fn rotation(&self) -> Result<Rotation> {
        self.check()?;
        Ok(Rotation::Deg0)
    }

    fn config_orientation(&self) -> Result<ConfigOrientation> {
        self.check()?;
        Ok(ConfigOrientation::Portrait)
    }
}

#[test]
fn refresh_profile_picks_up_new_metrics() {
    let host = Arc::new(FakeHost::new(pixel_4a().metrics));
    let (dispatcher, _pump) = ui_queue();
    let bridge = NativeBridge::new(host.clone(), no_startup_lock(), dispatcher).expect("valid config");
    assert!(bridge.is_phone());
    let before = bridge.profile();

    *host.metrics.lock().unwrap() = galaxy_tab_a().metrics;
    let after = bridge.refresh_profile();

    assert!(after.is_tablet());
    assert!(bridge.is_tablet());
    assert!(before.is_phone(), "earlier snapshots are not mutated");

    let webview = StubWebView::new();
    bridge.on_page_finished(&webview, "file:///index.html");
    let injected = injected_object(&webview.snapshot().scripts[0], "nativeDeviceInfo");
    assert_eq!(injected["isTablet"], json!(true));
    assert_eq!(injected["textZoomLevel"], json!(125));
}

#[test]
fn failing_host_yields_default_profile() {
    let host = Arc::new(FakeHost::failing());
    let (dispatcher, mut pump) = ui_queue();
    let bridge =
        NativeBridge::new(host.clone(), AdaptationConfig::default(), dispatcher).expect("valid config");

    assert!(bridge.is_phone());
    assert!(!bridge.is_foldable());
    assert_eq!(bridge.get_text_zoom(), 75);
    assert_eq!(bridge.get_api_level(), 0);
    assert_eq!(bridge.get_navigation_bar_height(), 0);
    assert!(!bridge.is_gesture_navigation());
    assert_eq!(bridge.get_from_clipboard(), "");
    assert_eq!(bridge.current_orientation_type(), OrientationType::PortraitPrimary);

    // A failing UI-thread command is logged, not fatal.
    bridge.lock_to_portrait();
    assert_eq!(pump.drain(host.as_ref()), 1);
}
