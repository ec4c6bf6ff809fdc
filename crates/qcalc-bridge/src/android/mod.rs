// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform host via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Each trait method reads or drives the hosting
// Activity through JNI calls into the ART runtime.
//
// ## Architecture notes
//
// Metric, settings and clipboard reads are plain synchronous JNI calls and
// are safe from any attached thread. `setRequestedOrientation` and every
// WebView method must run on the UI thread; the bridge guarantees that for
// orientation by going through the UI task queue, and the host Activity
// drains that queue from its main looper via `nativeDrainUiQueue` (see
// `exports`).

#![cfg(target_os = "android")]

mod exports;
mod webview;

pub use webview::AndroidWebView;

use jni::JNIEnv;
use jni::objects::{JObject, JString, JValue};

use qcalc_core::error::{QCalcError, Result};
use qcalc_core::types::{
    ConfigOrientation, DeviceInfo, DisplayMetrics, OrientationLock, Rotation, ScreenSizeClass,
};

use crate::traits::*;

/// `Context.CLIPBOARD_SERVICE`.
const CLIPBOARD_SERVICE: &str = "clipboard";

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// Run `f` with an attached [`JNIEnv`] and the hosting Activity.
///
/// The `JavaVM*` and Activity `jobject` come from `ndk_context`, set by the
/// NDK glue code; the current thread is attached if it is not already.
/// Any JNI error is mapped to `QCalcError::Bridge` tagged with `context`.
fn with_jni_env<R>(
    context: &str,
    f: impl FnOnce(&mut JNIEnv, &JObject) -> std::result::Result<R, jni::errors::Error>,
) -> Result<R> {
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    let vm = unsafe { jni::JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| jni_err("failed to obtain JavaVM", e))?;
    let mut env = vm
        .attach_current_thread()
        .map_err(|e| jni_err("failed to attach JNI thread", e))?;

    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(QCalcError::Bridge(
            "Android context is null; activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    let activity = unsafe { JObject::from_raw(ptr.cast()) };

    let result = f(&mut *env, &activity);
    if result.is_err() {
        // A pending Java exception would poison every later JNI call on
        // this thread.
        let _ = env.exception_clear();
    }
    result.map_err(|e| jni_err(context, e))
}

/// Convenience: map any `jni::errors::Error` into `QCalcError::Bridge`.
pub(crate) fn jni_err(context: &str, e: jni::errors::Error) -> QCalcError {
    QCalcError::Bridge(format!("{context}: {e}"))
}

fn resources<'local>(
    env: &mut JNIEnv<'local>,
    activity: &JObject,
) -> std::result::Result<JObject<'local>, jni::errors::Error> {
    env.call_method(activity, "getResources", "()Landroid/content/res/Resources;", &[])?
        .l()
}

fn java_string(env: &mut JNIEnv, obj: JObject) -> std::result::Result<String, jni::errors::Error> {
    let s = JString::from(obj);
    let value: String = env.get_string(&s)?.into();
    env.delete_local_ref(s)?;
    Ok(value)
}

// ---------------------------------------------------------------------------
// Host struct
// ---------------------------------------------------------------------------

/// Android implementation of the platform host.
///
/// The struct is zero-sized; all state lives on the Java side.
pub struct AndroidHost;

impl AndroidHost {
    /// Create a new Android host.
    ///
    /// This does **not** touch JNI. The first JNI call happens lazily when
    /// a trait method is invoked.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AndroidHost {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformHost for AndroidHost {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

// ---------------------------------------------------------------------------
// DisplayMetricsProvider: Resources.getDisplayMetrics / Build
// ---------------------------------------------------------------------------

impl DisplayMetricsProvider for AndroidHost {
    fn display_metrics(&self) -> Result<DisplayMetrics> {
        with_jni_env("display_metrics", |env, activity| {
            let resources = resources(env, activity)?;

            let dm = env
                .call_method(&resources, "getDisplayMetrics", "()Landroid/util/DisplayMetrics;", &[])?
                .l()?;
            let width_px = env.get_field(&dm, "widthPixels", "I")?.i()?;
            let height_px = env.get_field(&dm, "heightPixels", "I")?.i()?;
            let density = env.get_field(&dm, "density", "F")?.f()?;

            let config = env
                .call_method(
                    &resources,
                    "getConfiguration",
                    "()Landroid/content/res/Configuration;",
                    &[],
                )?
                .l()?;
            let screen_layout = env.get_field(&config, "screenLayout", "I")?.i()?;

            let metrics = DisplayMetrics {
                width_px: width_px.max(0) as u32,
                height_px: height_px.max(0) as u32,
                density,
                size_class: ScreenSizeClass::from_screen_layout(screen_layout),
            };
            tracing::debug!(?metrics, "Android: display metrics sampled");
            Ok(metrics)
        })
    }

    fn device_info(&self) -> Result<DeviceInfo> {
        with_jni_env("device_info", |env, _activity| {
            let model = env
                .get_static_field("android/os/Build", "MODEL", "Ljava/lang/String;")?
                .l()?;
            let model = if model.is_null() {
                String::new()
            } else {
                java_string(env, model)?
            };
            let api_level = env
                .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")?
                .i()?;

            Ok(DeviceInfo {
                model,
                api_level: api_level.max(0) as u32,
            })
        })
    }
}

// ---------------------------------------------------------------------------
// PlatformSettings: Resources.getIdentifier / Settings.Secure
// ---------------------------------------------------------------------------

impl PlatformSettings for AndroidHost {
    /// Look up `android:dimen/<name>` and return its pixel size.
    fn dimension_px(&self, name: &str) -> Result<Option<u32>> {
        with_jni_env("dimension_px", |env, activity| {
            let resources = resources(env, activity)?;
            let j_name = env.new_string(name)?;
            let j_type = env.new_string("dimen")?;
            let j_package = env.new_string("android")?;

            let id = env
                .call_method(
                    &resources,
                    "getIdentifier",
                    "(Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;)I",
                    &[
                        JValue::Object(&j_name),
                        JValue::Object(&j_type),
                        JValue::Object(&j_package),
                    ],
                )?
                .i()?;
            if id <= 0 {
                return Ok(None);
            }

            let px = env
                .call_method(&resources, "getDimensionPixelSize", "(I)I", &[JValue::Int(id)])?
                .i()?;
            Ok(Some(px.max(0) as u32))
        })
    }

    /// `Settings.Secure.getInt(resolver, key)`. The throwing overload is
    /// used so an absent key is distinguishable from a stored zero.
    fn secure_int(&self, key: &str) -> Result<i32> {
        let value = with_jni_env("secure_int", |env, activity| {
            let resolver = env
                .call_method(
                    activity,
                    "getContentResolver",
                    "()Landroid/content/ContentResolver;",
                    &[],
                )?
                .l()?;
            let j_key = env.new_string(key)?;

            let result = env.call_static_method(
                "android/provider/Settings$Secure",
                "getInt",
                "(Landroid/content/ContentResolver;Ljava/lang/String;)I",
                &[JValue::Object(&resolver), JValue::Object(&j_key)],
            );
            match result {
                Ok(v) => Ok(Some(v.i()?)),
                // Settings.SettingNotFoundException
                Err(jni::errors::Error::JavaException) => {
                    env.exception_clear()?;
                    Ok(None)
                }
                Err(e) => Err(e),
            }
        })?;

        value.ok_or_else(|| QCalcError::SettingNotFound(key.into()))
    }
}

// ---------------------------------------------------------------------------
// NativeClipboard: android.content.ClipboardManager
// ---------------------------------------------------------------------------

impl NativeClipboard for AndroidHost {
    fn primary_clip(&self) -> Result<Option<ClipData>> {
        with_jni_env("primary_clip", |env, activity| {
            let j_service = env.new_string(CLIPBOARD_SERVICE)?;
            let manager = env
                .call_method(
                    activity,
                    "getSystemService",
                    "(Ljava/lang/String;)Ljava/lang/Object;",
                    &[JValue::Object(&j_service)],
                )?
                .l()?;
            if manager.is_null() {
                tracing::warn!("Android: clipboard service unavailable");
                return Ok(None);
            }

            if !env.call_method(&manager, "hasPrimaryClip", "()Z", &[])?.z()? {
                return Ok(None);
            }

            let clip = env
                .call_method(&manager, "getPrimaryClip", "()Landroid/content/ClipData;", &[])?
                .l()?;
            if clip.is_null() {
                return Ok(None);
            }

            // Only the first item is ever read, so only it crosses JNI.
            let count = env.call_method(&clip, "getItemCount", "()I", &[])?.i()?;
            if count <= 0 {
                return Ok(Some(ClipData::default()));
            }
            let item = env
                .call_method(&clip, "getItemAt", "(I)Landroid/content/ClipData$Item;", &[JValue::Int(0)])?
                .l()?;
            let text = env
                .call_method(&item, "getText", "()Ljava/lang/CharSequence;", &[])?
                .l()?;
            let text = if text.is_null() {
                None
            } else {
                let s = env
                    .call_method(&text, "toString", "()Ljava/lang/String;", &[])?
                    .l()?;
                let value = java_string(env, s)?;
                env.delete_local_ref(text)?;
                Some(value)
            };
            env.delete_local_ref(item)?;
            env.delete_local_ref(clip)?;
            env.delete_local_ref(manager)?;

            Ok(Some(ClipData {
                items: vec![ClipItem { text }],
            }))
        })
    }
}

// ---------------------------------------------------------------------------
// NativeOrientation: Activity.setRequestedOrientation / Display.getRotation
// ---------------------------------------------------------------------------

impl NativeOrientation for AndroidHost {
    fn set_requested_orientation(&self, lock: OrientationLock) -> Result<()> {
        with_jni_env("setRequestedOrientation", |env, activity| {
            env.call_method(
                activity,
                "setRequestedOrientation",
                "(I)V",
                &[JValue::Int(lock.android_constant())],
            )?;
            tracing::info!(?lock, "Android: requested orientation set");
            Ok(())
        })
    }

    fn rotation(&self) -> Result<Rotation> {
        with_jni_env("rotation", |env, activity| {
            let wm = env
                .call_method(activity, "getWindowManager", "()Landroid/view/WindowManager;", &[])?
                .l()?;
            let display = env
                .call_method(&wm, "getDefaultDisplay", "()Landroid/view/Display;", &[])?
                .l()?;
            let rotation = env.call_method(&display, "getRotation", "()I", &[])?.i()?;
            Ok(Rotation::from_surface(rotation))
        })
    }

    fn config_orientation(&self) -> Result<ConfigOrientation> {
        with_jni_env("config_orientation", |env, activity| {
            let resources = resources(env, activity)?;
            let config = env
                .call_method(
                    &resources,
                    "getConfiguration",
                    "()Landroid/content/res/Configuration;",
                    &[],
                )?
                .l()?;
            let orientation = env.get_field(&config, "orientation", "I")?.i()?;
            Ok(ConfigOrientation::from_android(orientation))
        })
    }
}
