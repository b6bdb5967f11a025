// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Linkshell — host shell for an embedded data-connection widget.
//
// Entry point. Initialises logging, loads the config, builds the shell
// state and launches the Dioxus UI.

mod frame;
mod pages;
mod services;
mod state;
mod toast;

use dioxus::prelude::*;

use linkshell_core::Screen;

use pages::form::CredentialsForm;
use pages::toasts::ToastOverlay;
use pages::widget::WidgetFrame;
use services::frame_host;
use state::Shell;

/// Bundled widget page, used unless the config names another entry point.
const WIDGET_PAGE: Asset = asset!("/assets/m1_widget.html");

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Linkshell starting");

    dioxus::launch(app);
}

/// Root component.
fn app() -> Element {
    let shell = use_context_provider(|| {
        let config = services::config_file::load_config();
        let entry_point = config
            .local_entry_point()
            .map(str::to_owned)
            .unwrap_or_else(|| WIDGET_PAGE.to_string());
        tracing::info!(entry_point = %entry_point, "shell initialised");
        Signal::new(Shell::new(config, entry_point))
    });

    // Page → host messages, for the lifetime of the app.
    use_future(move || frame_host::listen(shell));

    let screen = shell.read().controller.screen();

    rsx! {
        div { class: "app-container",
            tabindex: "0",
            style: "min-height: 100vh; outline: none; font-family: system-ui, -apple-system, sans-serif;",
            onkeydown: move |evt| {
                if matches!(evt.key(), Key::Escape | Key::BrowserBack) {
                    frame_host::back(shell);
                }
            },

            CredentialsForm { visible: screen == Screen::Form }
            if screen == Screen::Browser {
                WidgetFrame {}
            }
            ToastOverlay {}
        }
    }
}
