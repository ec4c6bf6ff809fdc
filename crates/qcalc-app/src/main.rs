// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// QCalc shell
//
// Entry point. Initialises logging, loads configuration, builds the native
// bridge against the platform host and wires it to a WebView. Off-device the
// WebView is headless and the run ends with a JSON report of what the page
// would have been told.

mod config;

use serde::Serialize;

use qcalc_bridge::traits::PlatformHost;
use qcalc_bridge::NativeBridge;
use qcalc_core::error::Result;
use qcalc_core::types::{InjectedDeviceInfo, OrientationType};

use config::ShellConfig;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "QCalc shell starting");

    let config = ShellConfig::from_env();
    match run(&config) {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::error!(error = %e, "could not render report"),
        },
        Err(e) => {
            tracing::error!(error = %e, "shell failed");
            std::process::exit(1);
        }
    }
}

/// What the bridge detected and handed to the page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    platform: String,
    interface_name: String,
    device: InjectedDeviceInfo,
    api_level: u32,
    navigation_bar_height: u32,
    gesture_navigation: bool,
    orientation: OrientationType,
    injected_script: Option<String>,
}

impl Report {
    fn new(host: &dyn PlatformHost, bridge: &NativeBridge, injected_script: Option<String>) -> Self {
        let profile = bridge.profile();
        Self {
            platform: host.platform_name().to_string(),
            interface_name: bridge.interface_name().to_string(),
            device: InjectedDeviceInfo::from(profile.as_ref()),
            api_level: profile.api_level(),
            navigation_bar_height: profile.navigation_bar_height_px(),
            gesture_navigation: profile.is_gesture_navigation(),
            orientation: bridge.current_orientation_type(),
            injected_script,
        }
    }
}

/// Off Android: simulated device, headless WebView.
#[cfg(not(target_os = "android"))]
fn run(config: &ShellConfig) -> Result<Report> {
    use std::sync::Arc;

    use qcalc_bridge::BridgeSession;
    use qcalc_bridge::stub::{StubHost, StubWebView};

    let host = Arc::new(StubHost::new(config.device.clone()));
    let session = BridgeSession::start(host.clone(), StubWebView::new(), config.adaptation.clone())?;

    session.on_page_finished(config.start_url());
    let script = session.webview().snapshot().scripts.pop();

    Ok(Report::new(host.as_ref(), session.bridge(), script))
}

/// On Android the Activity owns the WebView and drives the bridge through
/// the JNI entry points in `qcalc_bridge::android`; here we only report
/// what detection found.
#[cfg(target_os = "android")]
fn run(config: &ShellConfig) -> Result<Report> {
    use qcalc_bridge::ui_queue;

    let host = qcalc_bridge::platform_host();
    let (dispatcher, _pump) = ui_queue();
    let bridge = NativeBridge::new(host.clone(), config.adaptation.clone(), dispatcher)?;
    let script = bridge.injection_script()?;
    Ok(Report::new(host.as_ref(), &bridge, Some(script)))
}
