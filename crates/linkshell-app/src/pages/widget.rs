// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Widget page — the embedded frame hosting the bundled widget HTML.

use dioxus::prelude::*;

use crate::frame::FRAME_ID;
use crate::services::frame_host;
use crate::state::Shell;

#[component]
pub fn WidgetFrame() -> Element {
    let shell = use_context::<Signal<Shell>>();
    let src = shell.read().frame_src.clone();

    rsx! {
        div { style: "display: flex; flex-direction: column; height: 100vh;",
            nav {
                style: "display: flex; align-items: center; padding: 8px 12px; border-bottom: 1px solid #e0e0e0; background: #fafafa;",
                button {
                    style: "padding: 6px 14px; border-radius: 6px; border: 1px solid #186793; color: #186793; background: white; font-size: 14px;",
                    onclick: move |_| frame_host::back(shell),
                    "Back"
                }
            }
            if let Some(src) = src {
                iframe {
                    id: FRAME_ID,
                    src: "{src}",
                    style: "flex: 1; width: 100%; border: none;",
                    onload: move |_| frame_host::on_frame_loaded(shell),
                }
            }
        }
    }
}
