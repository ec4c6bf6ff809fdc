// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// android.webkit.WebView wrapper.
//
// All methods must be called on the UI thread; WebView throws otherwise.

use jni::JNIEnv;
use jni::objects::{GlobalRef, JObject, JValue};

use qcalc_core::error::Result;
use qcalc_core::types::WebViewSettings;

use super::{jni_err, with_jni_env};
use crate::traits::WebViewHost;

/// A WebView plus the Java object whose `@JavascriptInterface` methods
/// forward into the bridge.
pub struct AndroidWebView {
    webview: GlobalRef,
    interface_object: GlobalRef,
}

impl AndroidWebView {
    /// Pin both objects with global refs so they outlive the JNI frame they
    /// were handed to us in.
    pub fn new(env: &JNIEnv, webview: &JObject, interface_object: &JObject) -> Result<Self> {
        Ok(Self {
            webview: env
                .new_global_ref(webview)
                .map_err(|e| jni_err("WebView global ref", e))?,
            interface_object: env
                .new_global_ref(interface_object)
                .map_err(|e| jni_err("interface global ref", e))?,
        })
    }
}

impl WebViewHost for AndroidWebView {
    fn apply_settings(&self, settings: &WebViewSettings) -> Result<()> {
        with_jni_env("WebView.getSettings", |env, _activity| {
            let ws = env
                .call_method(
                    self.webview.as_obj(),
                    "getSettings",
                    "()Landroid/webkit/WebSettings;",
                    &[],
                )?
                .l()?;

            env.call_method(
                &ws,
                "setJavaScriptEnabled",
                "(Z)V",
                &[JValue::Bool(u8::from(settings.javascript_enabled))],
            )?;
            env.call_method(
                &ws,
                "setDomStorageEnabled",
                "(Z)V",
                &[JValue::Bool(u8::from(settings.dom_storage_enabled))],
            )?;
            env.call_method(
                &ws,
                "setCacheMode",
                "(I)V",
                &[JValue::Int(settings.cache_mode.android_constant())],
            )?;
            env.call_method(
                &ws,
                "setTextZoom",
                "(I)V",
                &[JValue::Int(settings.text_zoom_percent as i32)],
            )?;

            tracing::debug!(?settings, "Android: WebView settings applied");
            Ok(())
        })
    }

    fn add_javascript_interface(&self, name: &str) -> Result<()> {
        with_jni_env("addJavascriptInterface", |env, _activity| {
            let j_name = env.new_string(name)?;
            env.call_method(
                self.webview.as_obj(),
                "addJavascriptInterface",
                "(Ljava/lang/Object;Ljava/lang/String;)V",
                &[
                    JValue::Object(self.interface_object.as_obj()),
                    JValue::Object(&j_name),
                ],
            )?;
            tracing::info!(name, "Android: JavaScript interface registered");
            Ok(())
        })
    }

    fn evaluate_javascript(&self, script: &str) -> Result<()> {
        with_jni_env("evaluateJavascript", |env, _activity| {
            let j_script = env.new_string(script)?;
            let no_callback = JObject::null();
            env.call_method(
                self.webview.as_obj(),
                "evaluateJavascript",
                "(Ljava/lang/String;Landroid/webkit/ValueCallback;)V",
                &[JValue::Object(&j_script), JValue::Object(&no_callback)],
            )?;
            Ok(())
        })
    }
}
