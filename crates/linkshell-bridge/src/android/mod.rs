// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`.
//
// ## File picker round trip
//
// `pick_file` launches `ACTION_GET_CONTENT` through `startActivityForResult`
// and then blocks its (worker) thread on a channel. The host Activity must
// override `onActivityResult` for [`REQUEST_PICK_FILE`] and call
//
// ```java
// private static native void nativeOnFileChosen(String uriOrNull);
// ```
//
// with `data.getDataString()` on `RESULT_OK`, or `null` otherwise. That
// native method is exported below and completes the pending pick.
//
// `read_file` then streams the picked document through the activity's
// `ContentResolver` so the app can hand its bytes to the page.

#![cfg(target_os = "android")]

use std::sync::Mutex;
use std::sync::mpsc::{self, SyncSender};

use jni::JNIEnv;
use jni::objects::{JClass, JObject, JString, JValue};
use jni::sys::{jbyte, jsize};

use linkshell_core::error::{Result, ShellError};
use linkshell_core::types::{FileSelection, PickedFile};

use crate::traits::*;

/// Request code for the file chooser intent. The host Activity must
/// recognise it in its `onActivityResult` override.
pub const REQUEST_PICK_FILE: i32 = 1;

/// Title of the system chooser wrapping the picker intent.
const CHOOSER_TITLE: &str = "File Chooser";

/// Bytes copied per `InputStream.read` call.
const READ_CHUNK: jsize = 64 * 1024;

/// Sender for the pick currently waiting on `onActivityResult`.
///
/// JNI entry points have no receiver to hang state on, so the one pending
/// pick lives here. A newer pick resolves the older one with `None`.
static PENDING_PICK: Mutex<Option<SyncSender<Option<String>>>> = Mutex::new(None);

/// Obtain the process [`JavaVM`](jni::JavaVM) from the global Android context.
///
/// Callers attach with `vm.attach_current_thread()`; the guard detaches the
/// thread again when dropped.
fn java_vm() -> Result<jni::JavaVM> {
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is valid for the lifetime of the process.
    unsafe { jni::JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| ShellError::Bridge(format!("failed to obtain JavaVM: {e}")))
}

/// Obtain the hosting Android `Activity` as a [`JObject`].
fn activity() -> Result<JObject<'static>> {
    let ctx = ndk_context::android_context();
    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(ShellError::Bridge(
            "Android context is null — activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

/// Map any `jni::errors::Error` into `ShellError::Bridge`.
fn jni_err(context: &str, e: jni::errors::Error) -> ShellError {
    ShellError::Bridge(format!("{context}: {e}"))
}

/// Android implementation of the Linkshell platform bridge.
pub struct AndroidBridge;

impl AndroidBridge {
    /// Create a new Android bridge. No JNI call happens until a trait
    /// method is invoked.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AndroidBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for AndroidBridge {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

// ---------------------------------------------------------------------------
// NativeFilePicker — ACTION_GET_CONTENT
// ---------------------------------------------------------------------------

impl NativeFilePicker for AndroidBridge {
    /// Launch `ACTION_GET_CONTENT` (openable, single selection) wrapped in
    /// `Intent.createChooser`, then wait for `nativeOnFileChosen`.
    fn pick_file(&self, mime_types: &[&str]) -> Result<Option<String>> {
        let (tx, rx) = mpsc::sync_channel(1);
        {
            let mut pending = PENDING_PICK
                .lock()
                .map_err(|_| ShellError::Bridge("file picker state poisoned".into()))?;
            if let Some(stale) = pending.replace(tx) {
                tracing::debug!("Android: superseding pending file pick");
                let _ = stale.send(None);
            }
        }

        if let Err(e) = launch_picker(mime_types) {
            // Nothing will ever answer this pick.
            if let Ok(mut pending) = PENDING_PICK.lock() {
                pending.take();
            }
            return Err(e);
        }

        tracing::info!(
            request_code = REQUEST_PICK_FILE,
            "Android: file chooser dispatched — awaiting onActivityResult"
        );

        rx.recv()
            .map_err(|_| ShellError::Bridge("file picker result channel closed".into()))
    }

    /// Stream the document through `ContentResolver.openInputStream`.
    fn read_file(&self, uri: &str, max_bytes: u64) -> Result<PickedFile> {
        let vm = java_vm()?;
        let mut env = vm
            .attach_current_thread()
            .map_err(|e| jni_err("attach_current_thread", e))?;
        let activity = activity()?;

        let result = read_document(&mut env, &activity, uri, max_bytes);
        if result.is_err() && env.exception_check().unwrap_or(false) {
            let _ = env.exception_clear();
        }
        result
    }
}

fn file_err(context: &str, e: jni::errors::Error) -> ShellError {
    ShellError::FileRead(format!("{context}: {e}"))
}

fn read_document(env: &mut JNIEnv, activity: &JObject, uri: &str, max_bytes: u64) -> Result<PickedFile> {
    let resolver = env
        .call_method(activity, "getContentResolver", "()Landroid/content/ContentResolver;", &[])
        .and_then(|v| v.l())
        .map_err(|e| jni_err("getContentResolver", e))?;

    let j_uri_str: JString = env
        .new_string(uri)
        .map_err(|e| jni_err("new_string(uri)", e))?;
    let j_uri = env
        .call_static_method(
            "android/net/Uri",
            "parse",
            "(Ljava/lang/String;)Landroid/net/Uri;",
            &[JValue::Object(&j_uri_str)],
        )
        .and_then(|v| v.l())
        .map_err(|e| jni_err("Uri.parse", e))?;

    let mime_type = env
        .call_method(
            &resolver,
            "getType",
            "(Landroid/net/Uri;)Ljava/lang/String;",
            &[JValue::Object(&j_uri)],
        )
        .and_then(|v| v.l())
        .ok()
        .filter(|t| !t.is_null())
        .and_then(|t| env.get_string(&JString::from(t)).ok().map(String::from))
        .unwrap_or_default();
    let name = display_name(env, &resolver, &j_uri)
        .unwrap_or_else(|| FileSelection::new(uri).fallback_name().to_owned());

    let stream = env
        .call_method(
            &resolver,
            "openInputStream",
            "(Landroid/net/Uri;)Ljava/io/InputStream;",
            &[JValue::Object(&j_uri)],
        )
        .and_then(|v| v.l())
        .map_err(|e| file_err("openInputStream", e))?;
    if stream.is_null() {
        return Err(ShellError::FileRead("content provider returned no stream".into()));
    }

    let chunk = env
        .new_byte_array(READ_CHUNK)
        .map_err(|e| jni_err("new_byte_array", e))?;
    let mut buf: Vec<jbyte> = vec![0; READ_CHUNK as usize];
    let mut contents = Vec::new();
    let copied = loop {
        let n = match env
            .call_method(&stream, "read", "([B)I", &[JValue::Object(&chunk)])
            .and_then(|v| v.i())
        {
            Ok(n) if n < 0 => break Ok(()),
            Ok(n) => n as usize,
            Err(e) => break Err(file_err("InputStream.read", e)),
        };
        if let Err(e) = env.get_byte_array_region(&chunk, 0, &mut buf[..n]) {
            break Err(file_err("get_byte_array_region", e));
        }
        contents.extend(buf[..n].iter().map(|b| *b as u8));
        if contents.len() as u64 > max_bytes {
            break Err(ShellError::FileRead(format!("larger than {max_bytes} bytes")));
        }
    };

    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_clear();
    }
    let _ = env.call_method(&stream, "close", "()V", &[]);
    copied?;

    tracing::info!(bytes = contents.len(), %mime_type, "Android: picked file read");
    Ok(PickedFile {
        name,
        mime_type,
        contents,
    })
}

/// `OpenableColumns.DISPLAY_NAME` for the document, if the provider has one.
fn display_name(env: &mut JNIEnv, resolver: &JObject, uri: &JObject) -> Option<String> {
    let null = JObject::null();
    let cursor = env
        .call_method(
            resolver,
            "query",
            "(Landroid/net/Uri;[Ljava/lang/String;Ljava/lang/String;[Ljava/lang/String;Ljava/lang/String;)Landroid/database/Cursor;",
            &[
                JValue::Object(uri),
                JValue::Object(&null),
                JValue::Object(&null),
                JValue::Object(&null),
                JValue::Object(&null),
            ],
        )
        .and_then(|v| v.l())
        .ok()
        .filter(|c| !c.is_null());
    let Some(cursor) = cursor else {
        let _ = env.exception_clear();
        return None;
    };

    let name = (|| -> jni::errors::Result<Option<String>> {
        if !env.call_method(&cursor, "moveToFirst", "()Z", &[])?.z()? {
            return Ok(None);
        }
        let column: JString = env.new_string("_display_name")?;
        let idx = env
            .call_method(&cursor, "getColumnIndex", "(Ljava/lang/String;)I", &[JValue::Object(&column)])?
            .i()?;
        if idx < 0 {
            return Ok(None);
        }
        let value = env
            .call_method(&cursor, "getString", "(I)Ljava/lang/String;", &[JValue::Int(idx)])?
            .l()?;
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(env.get_string(&JString::from(value))?.into()))
    })();

    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_clear();
    }
    let _ = env.call_method(&cursor, "close", "()V", &[]);
    name.ok().flatten().filter(|n| !n.is_empty())
}

fn launch_picker(mime_types: &[&str]) -> Result<()> {
    let vm = java_vm()?;
    let mut env = vm
        .attach_current_thread()
        .map_err(|e| jni_err("attach_current_thread", e))?;
    let activity = activity()?;

    tracing::info!(?mime_types, "Android: launching ACTION_GET_CONTENT");

    let j_action: JString = env
        .new_string("android.intent.action.GET_CONTENT")
        .map_err(|e| jni_err("new_string(ACTION_GET_CONTENT)", e))?;

    let intent: JObject = env
        .new_object(
            "android/content/Intent",
            "(Ljava/lang/String;)V",
            &[JValue::Object(&j_action)],
        )
        .map_err(|e| jni_err("new Intent(GET_CONTENT)", e))?;

    let j_category: JString = env
        .new_string("android.intent.category.OPENABLE")
        .map_err(|e| jni_err("new_string(CATEGORY_OPENABLE)", e))?;

    env.call_method(
        &intent,
        "addCategory",
        "(Ljava/lang/String;)Landroid/content/Intent;",
        &[JValue::Object(&j_category)],
    )
    .map_err(|e| jni_err("addCategory(OPENABLE)", e))?;

    // Single type directly; several via */* plus EXTRA_MIME_TYPES.
    let base_type = match mime_types {
        [only] => *only,
        _ => ANY_MIME_TYPE,
    };
    let j_type: JString = env
        .new_string(base_type)
        .map_err(|e| jni_err("new_string(mime)", e))?;
    env.call_method(
        &intent,
        "setType",
        "(Ljava/lang/String;)Landroid/content/Intent;",
        &[JValue::Object(&j_type)],
    )
    .map_err(|e| jni_err("setType", e))?;

    if mime_types.len() > 1 {
        let string_class = env
            .find_class("java/lang/String")
            .map_err(|e| jni_err("find_class(String)", e))?;

        let mime_array = env
            .new_object_array(mime_types.len() as jsize, &string_class, JObject::null())
            .map_err(|e| jni_err("new_object_array(mimes)", e))?;

        for (i, mt) in mime_types.iter().enumerate() {
            let j_mt: JString = env
                .new_string(mt)
                .map_err(|e| jni_err("new_string(mime_type[i])", e))?;
            env.set_object_array_element(&mime_array, i as jsize, j_mt)
                .map_err(|e| jni_err("set_object_array_element", e))?;
        }

        let j_extra_key: JString = env
            .new_string("android.intent.extra.MIME_TYPES")
            .map_err(|e| jni_err("new_string(EXTRA_MIME_TYPES)", e))?;

        env.call_method(
            &intent,
            "putExtra",
            "(Ljava/lang/String;[Ljava/lang/String;)Landroid/content/Intent;",
            &[JValue::Object(&j_extra_key), JValue::Object(&mime_array)],
        )
        .map_err(|e| jni_err("putExtra(EXTRA_MIME_TYPES)", e))?;
    }

    // Intent.createChooser(intent, "File Chooser")
    let j_title: JString = env
        .new_string(CHOOSER_TITLE)
        .map_err(|e| jni_err("new_string(chooser title)", e))?;
    let chooser: JObject = env
        .call_static_method(
            "android/content/Intent",
            "createChooser",
            "(Landroid/content/Intent;Ljava/lang/CharSequence;)Landroid/content/Intent;",
            &[JValue::Object(&intent), JValue::Object(&j_title)],
        )
        .map_err(|e| jni_err("Intent.createChooser", e))?
        .l()
        .map_err(|e| jni_err("createChooser->l", e))?;

    env.call_method(
        &activity,
        "startActivityForResult",
        "(Landroid/content/Intent;I)V",
        &[JValue::Object(&chooser), JValue::Int(REQUEST_PICK_FILE)],
    )
    .map_err(|e| jni_err("startActivityForResult(GET_CONTENT)", e))?;

    Ok(())
}

/// Called by the host Activity's `onActivityResult` with the picked URI, or
/// `null` when the user cancelled.
#[unsafe(no_mangle)]
pub extern "system" fn Java_dev_dioxus_main_MainActivity_nativeOnFileChosen<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    uri: JString<'local>,
) {
    let uri: Option<String> = if uri.is_null() {
        None
    } else {
        match env.get_string(&uri) {
            Ok(s) => Some(s.into()),
            Err(e) => {
                tracing::error!(error = %e, "Android: unreadable file chooser URI");
                None
            }
        }
    };

    let Ok(mut pending) = PENDING_PICK.lock() else {
        tracing::error!("Android: file picker state poisoned");
        return;
    };
    match pending.take() {
        Some(tx) => {
            tracing::info!(picked = uri.is_some(), "Android: file chooser result");
            let _ = tx.send(uri);
        }
        None => tracing::warn!("Android: file chooser result with no pending pick"),
    }
}

// ---------------------------------------------------------------------------
// NativeLifecycle — Activity.finish()
// ---------------------------------------------------------------------------

impl NativeLifecycle for AndroidBridge {
    fn finish(&self) -> Result<()> {
        let vm = java_vm()?;
        let mut env = vm
            .attach_current_thread()
            .map_err(|e| jni_err("attach_current_thread", e))?;
        let activity = activity()?;

        tracing::info!("Android: finishing activity");
        env.call_method(&activity, "finish", "()V", &[])
            .map_err(|e| jni_err("Activity.finish", e))?;
        Ok(())
    }
}
