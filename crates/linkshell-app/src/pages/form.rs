// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Credential form — access token and data request ID.
//
// The form stays mounted while the widget is showing so the fields keep
// their values when the user comes back.

use dioxus::prelude::*;

use crate::services::frame_host;
use crate::state::Shell;

#[component]
pub fn CredentialsForm(visible: bool) -> Element {
    let shell = use_context::<Signal<Shell>>();
    let placeholder = shell.read().controller.config().placeholder_token.clone();
    let mut access_token = use_signal(move || placeholder);
    let mut data_request_id = use_signal(String::new);

    let display = if visible { "flex" } else { "none" };

    rsx! {
        div {
            style: "display: {display}; flex-direction: column; gap: 12px; padding: 24px; max-width: 480px; margin: 0 auto;",
            h1 { style: "margin-bottom: 4px;", "Connect your data" }
            p { style: "color: #666; margin-top: 0;",
                "Enter the access token and data request ID issued for this session."
            }

            label { style: "font-size: 14px; color: #333;", r#for: "access-token", "Access token" }
            input {
                id: "access-token",
                r#type: "text",
                autocomplete: "off",
                spellcheck: "false",
                style: "padding: 12px; font-size: 16px; border: 1px solid #ccc; border-radius: 8px;",
                value: "{access_token}",
                oninput: move |evt| access_token.set(evt.value()),
            }

            label { style: "font-size: 14px; color: #333;", r#for: "data-request-id", "Data request ID" }
            input {
                id: "data-request-id",
                r#type: "text",
                autocomplete: "off",
                spellcheck: "false",
                style: "padding: 12px; font-size: 16px; border: 1px solid #ccc; border-radius: 8px;",
                value: "{data_request_id}",
                oninput: move |evt| data_request_id.set(evt.value()),
            }

            button {
                style: "margin-top: 8px; padding: 14px; border-radius: 12px; border: none; background: #186793; color: white; font-size: 17px; font-weight: bold;",
                onclick: move |_| {
                    let token = access_token.read().clone();
                    let id = data_request_id.read().clone();
                    frame_host::submit(shell, &token, &id);
                },
                "Load Widget"
            }
        }
    }
}
