// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The shell controller — owns the screen flag, captured credentials and the
// pending file-chooser callback, and drives the browser frame and the
// notification sink through two small traits.
//
// All methods take `&mut self`; the host calls them from its UI thread.

use tracing::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::error::{Result, ShellError};
use crate::file_chooser::{FileChooserCallback, FileChooserSlot};
use crate::human_errors::humanize_error;
use crate::message::PageMessage;
use crate::types::{Credentials, FileSelection, Notification, Screen};
use crate::widget::{WidgetConfig, injection_script};

/// The embedded browser the controller drives.
pub trait BrowserView {
    /// Start loading `url`. Completion arrives via
    /// [`ShellController::on_page_finished`].
    fn load(&mut self, url: &str) -> Result<()>;

    /// Run a script in the loaded page. Fire-and-forget.
    fn evaluate_script(&mut self, script: String) -> Result<()>;

    /// Whether the page has its own history to step back through.
    fn can_go_back(&self) -> bool;

    /// Step back one entry in the page history.
    fn go_back(&mut self);
}

/// Where user-visible notifications go.
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

/// What the host should do after a back gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackAction {
    /// The page stepped back in its own history.
    NavigatedBack,
    /// The browser was hidden and the form shown again.
    ReturnedToForm,
    /// Nothing handled it; apply the platform default (usually exit).
    Default,
}

/// Result of relaying a page message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Exactly one notification was shown.
    Notified,
    /// Logged only.
    Logged,
    /// The page wants the native file chooser. The result must be sent back
    /// tagged with `request_id`.
    OpenFileChooser { request_id: u64, accept: Option<String> },
}

/// Single state object for the two-screen shell.
pub struct ShellController<V: BrowserView, N: NotificationSink> {
    config: AppConfig,
    entry_point: String,
    view: V,
    notifier: N,
    screen: Screen,
    credentials: Option<Credentials>,
    file_chooser: FileChooserSlot,
}

impl<V: BrowserView, N: NotificationSink> ShellController<V, N> {
    pub fn new(config: AppConfig, entry_point: impl Into<String>, view: V, notifier: N) -> Self {
        Self {
            config,
            entry_point: entry_point.into(),
            view,
            notifier,
            screen: Screen::Form,
            credentials: None,
            file_chooser: FileChooserSlot::new(),
        }
    }

    // -- Form ----------------------------------------------------------------

    /// Validate the form and, if valid, switch to the browser and load the
    /// widget page.
    pub fn submit(&mut self, access_token: &str, data_request_id: &str) -> Result<()> {
        let credentials =
            match Credentials::from_form(access_token, data_request_id, &self.config.placeholder_token) {
                Ok(c) => c,
                Err(e) => {
                    info!(reason = %e, "form rejected");
                    self.notifier.notify(humanize_error(&e).into_notification());
                    return Err(e);
                }
            };

        debug!(data_request_id = credentials.data_request_id(), "form accepted");
        self.credentials = Some(credentials);
        self.screen = Screen::Browser;
        info!(screen = ?self.screen, "screen changed");

        if let Err(e) = self.view.load(&self.entry_point) {
            error!(url = %self.entry_point, error = %e, "error loading widget page");
            let e = match e {
                ShellError::ResourceLoad(_) => e,
                other => ShellError::ResourceLoad(other.to_string()),
            };
            self.notifier.notify(humanize_error(&e).into_notification());
            return Err(e);
        }
        info!(url = %self.entry_point, "loading widget page");
        Ok(())
    }

    // -- Browser -------------------------------------------------------------

    /// Inject the widget config after a page load completes.
    pub fn on_page_finished(&mut self, url: &str) -> Result<()> {
        debug!(url, "page loaded");
        if self.screen != Screen::Browser {
            debug!(url, "page finished while form is showing, ignoring");
            return Ok(());
        }
        let Some(credentials) = self.credentials.as_ref() else {
            debug!(url, "no credentials captured, skipping injection");
            return Ok(());
        };

        let config = WidgetConfig::new(credentials, &self.config);
        let script = injection_script(&self.config.element_tag, &self.config.bridge_object, &config)?;

        if let Err(e) = self.view.evaluate_script(script) {
            error!(url, error = %e, "config injection failed");
            let e = match e {
                ShellError::ScriptEvaluation(_) => e,
                other => ShellError::ScriptEvaluation(other.to_string()),
            };
            self.notifier.notify(humanize_error(&e).into_notification());
            return Err(e);
        }
        Ok(())
    }

    /// Relay one decoded page message.
    pub fn handle_message(&mut self, message: PageMessage) -> MessageOutcome {
        match &message {
            PageMessage::ConfigInjected(config) => {
                debug!(bytes = config.len(), "configuration injected")
            }
            PageMessage::ConfigError(err) => error!(error = %err, "configuration error"),
            PageMessage::Message(text) => debug!(message = %text, "message from page"),
            PageMessage::DatasourceConnected(event) => debug!(event = %event, "datasource connected"),
            PageMessage::ShowNotification(text) => debug!(message = %text, "page toast"),
            PageMessage::FileChooserRequested { request_id, accept } => {
                info!(request_id, ?accept, "page requested file chooser");
                return MessageOutcome::OpenFileChooser {
                    request_id: *request_id,
                    accept: accept.clone(),
                };
            }
            PageMessage::Console(line) => {
                debug!(
                    level = %line.level,
                    line = ?line.line,
                    source = ?line.source,
                    "console: {}",
                    line.message
                );
                return MessageOutcome::Logged;
            }
        }

        match message.notification(self.config.max_message_chars) {
            Some(n) => {
                self.notifier.notify(n);
                MessageOutcome::Notified
            }
            None => MessageOutcome::Logged,
        }
    }

    /// Decode and relay a raw `{ kind, payload }` envelope.
    pub fn handle_raw_message(&mut self, envelope: &serde_json::Value) -> Result<MessageOutcome> {
        match PageMessage::from_envelope(envelope) {
            Ok(message) => {
                debug!(kind = message.kind(), "page message");
                Ok(self.handle_message(message))
            }
            Err(e) => {
                warn!(error = %e, "rejected page message");
                Err(e)
            }
        }
    }

    // -- File chooser --------------------------------------------------------

    /// Register the callback for a new file-chooser request.
    pub fn request_file_chooser(&mut self, callback: FileChooserCallback) {
        if self.file_chooser.open(callback) {
            info!("previous file chooser request resolved empty");
        }
    }

    /// Deliver the picker result to the pending request.
    pub fn resolve_file_chooser(&mut self, selection: Option<FileSelection>) {
        let picked = selection.is_some();
        if self.file_chooser.resolve(selection) {
            info!(picked, "file chooser resolved");
        } else {
            warn!("file chooser result with no pending request");
        }
    }

    pub fn has_pending_file_chooser(&self) -> bool {
        self.file_chooser.is_pending()
    }

    // -- Navigation ----------------------------------------------------------

    /// Handle a back gesture.
    pub fn on_back(&mut self) -> BackAction {
        let action = match self.screen {
            Screen::Browser if self.view.can_go_back() => {
                self.view.go_back();
                BackAction::NavigatedBack
            }
            Screen::Browser => {
                self.screen = Screen::Form;
                BackAction::ReturnedToForm
            }
            Screen::Form => BackAction::Default,
        };
        info!(?action, screen = ?self.screen, "back pressed");
        action
    }

    // -- Accessors -----------------------------------------------------------

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }
}
