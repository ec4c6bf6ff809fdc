// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JNI entry points for `app.qcalc.shell.AndroidInterface`.
//
// The Java class is the object registered with `addJavascriptInterface`.
// Each `@JavascriptInterface` method forwards to the matching `native*`
// method below; the Activity calls `nativeAttach` from `onCreate`,
// `nativeOnPageFinished` from its `WebViewClient`,
// `nativeOnConfigurationChanged` from `onConfigurationChanged`, and posts
// `nativeDrainUiQueue` to the main looper after every lock call:
//
//     private native boolean nativeAttach(WebView webView, String configJson);
//     private native void    nativeDetach();
//     private native boolean nativeIsTablet();
//     private native boolean nativeIsPhone();
//     private native boolean nativeIsFoldable();
//     private native int     nativeGetTextZoom();
//     private native int     nativeGetApiLevel();
//     private native int     nativeGetNavigationBarHeight();
//     private native boolean nativeIsGestureNavigation();
//     private native String  nativeGetFromClipboard();
//     private native void    nativeLockToPortrait();
//     private native void    nativeLockToLandscape();
//     private native void    nativeUnlockOrientation();
//     private native void    nativeOnPageFinished(String url);
//     private native int     nativeDrainUiQueue();
//     private native boolean nativeOnConfigurationChanged();

use std::sync::{Arc, Mutex, PoisonError};

use jni::JNIEnv;
use jni::objects::{JObject, JString};
use jni::sys::{JNI_FALSE, JNI_TRUE, jboolean, jint, jstring};
use tracing::{error, info, warn};

use qcalc_core::config::AdaptationConfig;
use qcalc_core::error::Result;

use super::{AndroidHost, AndroidWebView};
use crate::session::BridgeSession;

type Session = BridgeSession<AndroidWebView>;

/// The live session. Replaced on every `nativeAttach`, so a recreated
/// Activity gets a fresh bridge.
static SESSION: Mutex<Option<Arc<Session>>> = Mutex::new(None);

fn current() -> Option<Arc<Session>> {
    SESSION.lock().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Run `f` against the live session, or return `fallback` if the page
/// calls in before `nativeAttach` (or after `nativeDetach`).
fn with_session<R>(method: &str, fallback: R, f: impl FnOnce(&Session) -> R) -> R {
    match current() {
        Some(session) => f(&session),
        None => {
            warn!(method, "bridge called without an attached session");
            fallback
        }
    }
}

fn to_jboolean(value: bool) -> jboolean {
    if value { JNI_TRUE } else { JNI_FALSE }
}

fn to_jint(value: u32) -> jint {
    jint::try_from(value).unwrap_or(jint::MAX)
}

fn read_string(env: &mut JNIEnv, s: &JString) -> Option<String> {
    if s.is_null() {
        return None;
    }
    match env.get_string(s) {
        Ok(value) => Some(value.into()),
        Err(e) => {
            warn!(error = %e, "could not read Java string");
            None
        }
    }
}

fn start_session(
    env: &mut JNIEnv,
    interface_object: &JObject,
    webview: &JObject,
    config_json: Option<String>,
) -> Result<Session> {
    let config = match config_json.as_deref().map(str::trim) {
        Some(json) if !json.is_empty() => AdaptationConfig::from_json(json)?,
        _ => AdaptationConfig::default(),
    };
    let webview = AndroidWebView::new(env, webview, interface_object)?;
    BridgeSession::start(Arc::new(AndroidHost::new()), webview, config)
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
extern "system" fn Java_app_qcalc_shell_AndroidInterface_nativeAttach(
    mut env: JNIEnv,
    this: JObject,
    webview: JObject,
    config_json: JString,
) -> jboolean {
    let config_json = read_string(&mut env, &config_json);
    match start_session(&mut env, &this, &webview, config_json) {
        Ok(session) => {
            *SESSION.lock().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(session));
            info!("Android: bridge attached");
            JNI_TRUE
        }
        Err(e) => {
            error!(error = %e, "Android: bridge attach failed");
            JNI_FALSE
        }
    }
}

#[unsafe(no_mangle)]
extern "system" fn Java_app_qcalc_shell_AndroidInterface_nativeDetach(_env: JNIEnv, _this: JObject) {
    if SESSION.lock().unwrap_or_else(PoisonError::into_inner).take().is_some() {
        info!("Android: bridge detached");
    }
}

#[unsafe(no_mangle)]
extern "system" fn Java_app_qcalc_shell_AndroidInterface_nativeOnPageFinished(
    mut env: JNIEnv,
    _this: JObject,
    url: JString,
) {
    let url = read_string(&mut env, &url).unwrap_or_default();
    with_session("onPageFinished", (), |s| s.on_page_finished(&url));
}

#[unsafe(no_mangle)]
extern "system" fn Java_app_qcalc_shell_AndroidInterface_nativeDrainUiQueue(
    _env: JNIEnv,
    _this: JObject,
) -> jint {
    let applied = with_session("drainUiQueue", 0, |s| s.drain_ui_queue());
    jint::try_from(applied).unwrap_or(jint::MAX)
}

#[unsafe(no_mangle)]
extern "system" fn Java_app_qcalc_shell_AndroidInterface_nativeOnConfigurationChanged(
    _env: JNIEnv,
    _this: JObject,
) -> jboolean {
    to_jboolean(with_session("onConfigurationChanged", false, |s| {
        s.on_configuration_changed()
    }))
}

// ---------------------------------------------------------------------------
// JavaScript interface
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
extern "system" fn Java_app_qcalc_shell_AndroidInterface_nativeIsTablet(
    _env: JNIEnv,
    _this: JObject,
) -> jboolean {
    to_jboolean(with_session("isTablet", false, |s| s.bridge().is_tablet()))
}

#[unsafe(no_mangle)]
extern "system" fn Java_app_qcalc_shell_AndroidInterface_nativeIsPhone(
    _env: JNIEnv,
    _this: JObject,
) -> jboolean {
    to_jboolean(with_session("isPhone", true, |s| s.bridge().is_phone()))
}

#[unsafe(no_mangle)]
extern "system" fn Java_app_qcalc_shell_AndroidInterface_nativeIsFoldable(
    _env: JNIEnv,
    _this: JObject,
) -> jboolean {
    to_jboolean(with_session("isFoldable", false, |s| s.bridge().is_foldable()))
}

#[unsafe(no_mangle)]
extern "system" fn Java_app_qcalc_shell_AndroidInterface_nativeGetTextZoom(
    _env: JNIEnv,
    _this: JObject,
) -> jint {
    to_jint(with_session("getTextZoom", 100, |s| s.bridge().get_text_zoom()))
}

#[unsafe(no_mangle)]
extern "system" fn Java_app_qcalc_shell_AndroidInterface_nativeGetApiLevel(
    _env: JNIEnv,
    _this: JObject,
) -> jint {
    to_jint(with_session("getApiLevel", 0, |s| s.bridge().get_api_level()))
}

#[unsafe(no_mangle)]
extern "system" fn Java_app_qcalc_shell_AndroidInterface_nativeGetNavigationBarHeight(
    _env: JNIEnv,
    _this: JObject,
) -> jint {
    to_jint(with_session("getNavigationBarHeight", 0, |s| {
        s.bridge().get_navigation_bar_height()
    }))
}

#[unsafe(no_mangle)]
extern "system" fn Java_app_qcalc_shell_AndroidInterface_nativeIsGestureNavigation(
    _env: JNIEnv,
    _this: JObject,
) -> jboolean {
    to_jboolean(with_session("isGestureNavigation", false, |s| {
        s.bridge().is_gesture_navigation()
    }))
}

#[unsafe(no_mangle)]
extern "system" fn Java_app_qcalc_shell_AndroidInterface_nativeGetFromClipboard(
    env: JNIEnv,
    _this: JObject,
) -> jstring {
    let text = with_session("getFromClipboard", String::new(), |s| {
        s.bridge().get_from_clipboard()
    });
    match env.new_string(text) {
        Ok(s) => s.into_raw(),
        Err(e) => {
            warn!(error = %e, "could not hand clipboard text to Java");
            std::ptr::null_mut()
        }
    }
}

#[unsafe(no_mangle)]
extern "system" fn Java_app_qcalc_shell_AndroidInterface_nativeLockToPortrait(
    _env: JNIEnv,
    _this: JObject,
) {
    with_session("lockToPortrait", (), |s| s.bridge().lock_to_portrait());
}

#[unsafe(no_mangle)]
extern "system" fn Java_app_qcalc_shell_AndroidInterface_nativeLockToLandscape(
    _env: JNIEnv,
    _this: JObject,
) {
    with_session("lockToLandscape", (), |s| s.bridge().lock_to_landscape());
}

#[unsafe(no_mangle)]
extern "system" fn Java_app_qcalc_shell_AndroidInterface_nativeUnlockOrientation(
    _env: JNIEnv,
    _this: JObject,
) {
    with_session("unlockOrientation", (), |s| s.bridge().unlock_orientation());
}
