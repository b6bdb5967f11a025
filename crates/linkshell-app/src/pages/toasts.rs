// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Toast overlay — renders the controller's notifications and expires them.

use chrono::Utc;
use dioxus::prelude::*;

use linkshell_core::types::{Notification, NotificationLevel};

use crate::state::Shell;

/// Wall clock and the timer can disagree by a few milliseconds.
const EXPIRY_SLACK: std::time::Duration = std::time::Duration::from_millis(50);

#[component]
pub fn ToastOverlay() -> Element {
    let shell = use_context::<Signal<Shell>>();
    let toasts: Vec<Notification> = shell.read().controller.notifier().visible().to_vec();

    rsx! {
        div {
            style: "position: fixed; left: 0; right: 0; bottom: 32px; display: flex; flex-direction: column; align-items: center; gap: 8px; pointer-events: none;",
            for toast in toasts {
                ToastItem { key: "{toast.id}", toast: toast.clone() }
            }
        }
    }
}

#[component]
fn ToastItem(toast: Notification) -> Element {
    let mut shell = use_context::<Signal<Shell>>();
    let ttl = (toast.expires_at() - Utc::now()).to_std().unwrap_or_default();

    use_hook(move || {
        spawn(async move {
            tokio::time::sleep(ttl + EXPIRY_SLACK).await;
            shell.write().controller.notifier_mut().expire(Utc::now());
        });
    });

    let (bg, fg) = match toast.level {
        NotificationLevel::Info => ("#323232", "#ffffff"),
        NotificationLevel::Success => ("#186793", "#ffffff"),
        NotificationLevel::Error => ("#721c24", "#ffffff"),
    };

    rsx! {
        div {
            style: "max-width: 80%; padding: 10px 18px; border-radius: 20px; background: {bg}; color: {fg}; font-size: 14px; box-shadow: 0 2px 8px rgba(0,0,0,0.2);",
            "{toast.text}"
        }
    }
}
