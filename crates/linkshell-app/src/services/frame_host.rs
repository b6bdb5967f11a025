// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Drives the widget frame: forwards UI events into the controller, runs the
// frame commands it queued, and relays page messages back in.
//
// Everything here runs on the Dioxus UI task. Signal writes are kept short
// and never held across an await.

use dioxus::prelude::*;
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

use linkshell_core::error::ShellError;
use linkshell_core::human_errors::humanize_error;
use linkshell_core::message::shim_script;
use linkshell_core::{BackAction, MessageOutcome, NotificationSink};

use crate::frame::{self, BackOutcome, FrameAction};
use crate::services::file_picker;
use crate::state::Shell;

/// Forward frame messages to the controller for as long as the app runs.
pub async fn listen(shell: Signal<Shell>) {
    let script = match frame::host_listener_script() {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "could not build frame listener");
            return;
        }
    };

    let mut listener = document::eval(&script);
    info!("frame listener installed");
    loop {
        match listener.recv::<serde_json::Value>().await {
            Ok(envelope) => dispatch(shell, &envelope),
            Err(e) => {
                warn!(error = ?e, "frame listener closed");
                break;
            }
        }
    }
}

fn dispatch(mut shell: Signal<Shell>, envelope: &serde_json::Value) {
    let outcome = shell.write().controller.handle_raw_message(envelope);
    if let Ok(MessageOutcome::OpenFileChooser { request_id, accept }) = outcome {
        open_file_chooser(shell, request_id, accept);
    }
}

/// Form submission.
pub fn submit(mut shell: Signal<Shell>, access_token: &str, data_request_id: &str) {
    // Both kinds of failure are already toasted by the controller.
    let result = shell.write().controller.submit(access_token, data_request_id);
    if let Err(e) = result {
        if !e.is_validation() {
            warn!(error = %e, "widget page did not start loading");
        }
    }
    flush(shell);
}

/// Back gesture, Escape key or the header's back button.
pub fn back(mut shell: Signal<Shell>) {
    let action = shell.write().controller.on_back();
    flush(shell);
    if action == BackAction::Default {
        exit_app();
    }
}

/// The frame element fired `load`: install the shim, then let the
/// controller inject the config.
pub fn on_frame_loaded(mut shell: Signal<Shell>) {
    let bridge_object = shell.read().controller.config().bridge_object.clone();
    let script = match shim_script(&bridge_object).and_then(|shim| frame::frame_loaded_script(&shim)) {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "could not build bridge shim");
            return;
        }
    };

    spawn(async move {
        let url = match document::eval(&script).join::<String>().await {
            Ok(url) => url,
            Err(e) => {
                error!(error = ?e, "could not install bridge shim");
                toast_error(shell, ShellError::ResourceLoad(format!("{e:?}")));
                return;
            }
        };

        {
            let mut state = shell.write();
            state.controller.view_mut().record_load(&url);
            // Failures are logged and toasted by the controller.
            let _ = state.controller.on_page_finished(&url);
        }
        flush(shell);
    });
}

/// Execute every command the controller queued on the frame, in order.
pub fn flush(mut shell: Signal<Shell>) {
    let commands = shell.write().controller.view_mut().drain();
    for command in commands {
        let action = match command.into_action() {
            Ok(action) => action,
            Err(e) => {
                error!(error = %e, "could not build frame script");
                continue;
            }
        };
        match action {
            FrameAction::Navigate(url) => {
                debug!(url = %url, "frame load");
                shell.write().frame_src = Some(url);
            }
            FrameAction::Inject(ref script) => {
                let eval = document::eval(script);
                spawn(async move {
                    if let Err(e) = eval.join::<serde_json::Value>().await {
                        error!(error = ?e, "config injection script failed");
                        if let Some(err) = action.failure(format!("{e:?}")) {
                            toast_error(shell, err);
                        }
                    }
                });
            }
            FrameAction::Back(ref script) => {
                let eval = document::eval(script);
                spawn(async move {
                    let outcome = match eval.join::<BackOutcome>().await {
                        Ok(outcome) => outcome,
                        Err(e) => {
                            warn!(error = ?e, "frame back step failed");
                            BackOutcome::Nothing
                        }
                    };
                    debug!(?outcome, "frame back settled");
                    shell.write().controller.view_mut().back_settled(outcome);
                });
            }
        }
    }
}

fn toast_error(mut shell: Signal<Shell>, err: ShellError) {
    shell
        .write()
        .controller
        .notifier_mut()
        .notify(humanize_error(&err).into_notification());
}

/// Register a file-chooser request, show the native picker, and answer the
/// page's `request_id` with the file (or with nothing when the request was
/// cancelled, superseded or the file could not be read).
fn open_file_chooser(mut shell: Signal<Shell>, request_id: u64, accept: Option<String>) {
    let (tx, rx) = oneshot::channel();
    let generation = shell.write().begin_file_chooser(tx);
    debug!(generation, request_id, ?accept, "opening file chooser");

    spawn(async move {
        let selection = rx.await.ok().flatten();
        let picked = match selection {
            Some(selection) => {
                let max_bytes = shell.read().controller.config().max_file_bytes;
                match file_picker::read_file(&selection, max_bytes).await {
                    Ok(file) => Some(file),
                    Err(e) => {
                        warn!(error = %e, "could not read picked file");
                        toast_error(shell, e);
                        None
                    }
                }
            }
            None => None,
        };
        match frame::file_result_script(request_id, picked.as_ref()) {
            Ok(script) => {
                if let Err(e) = document::eval(&script).join::<serde_json::Value>().await {
                    warn!(error = ?e, "could not deliver file chooser result");
                }
            }
            Err(e) => error!(error = %e, "could not build file result script"),
        }
    });

    spawn(async move {
        let selection = file_picker::pick_file().await;
        if !shell.write().finish_file_chooser(generation, selection) {
            debug!(generation, "dropping result of superseded file chooser");
        }
    });
}

fn exit_app() {
    info!("back on form, closing");
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    dioxus::desktop::window().close();

    #[cfg(any(target_os = "ios", target_os = "android"))]
    {
        use linkshell_bridge::traits::NativeLifecycle;
        if let Err(e) = linkshell_bridge::platform_bridge().finish() {
            warn!(error = %e, "could not finish activity");
        }
    }
}
