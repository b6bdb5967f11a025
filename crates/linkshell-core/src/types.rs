// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Linkshell host.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, ShellError};

/// Which of the two mutually exclusive screens is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// The credential form.
    #[default]
    Form,
    /// The embedded browser frame hosting the widget page.
    Browser,
}

/// Credentials captured from the form at submission time.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_token: String,
    data_request_id: String,
}

impl Credentials {
    /// Validate and capture the two form fields.
    ///
    /// Both values are trimmed. The token must be non-empty and must differ
    /// from `placeholder`; the request id must be non-empty.
    pub fn from_form(access_token: &str, data_request_id: &str, placeholder: &str) -> Result<Self> {
        let access_token = access_token.trim();
        let data_request_id = data_request_id.trim();

        if access_token.is_empty() {
            return Err(ShellError::MissingAccessToken);
        }
        if access_token == placeholder {
            return Err(ShellError::PlaceholderAccessToken);
        }
        if data_request_id.is_empty() {
            return Err(ShellError::MissingDataRequestId);
        }

        Ok(Self {
            access_token: access_token.to_owned(),
            data_request_id: data_request_id.to_owned(),
        })
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn data_request_id(&self) -> &str {
        &self.data_request_id
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .field("data_request_id", &self.data_request_id)
            .finish()
    }
}

/// How long a toast stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToastDuration {
    Short,
    Long,
}

impl ToastDuration {
    pub fn as_duration(self) -> Duration {
        match self {
            Self::Short => Duration::from_millis(2000),
            Self::Long => Duration::from_millis(3500),
        }
    }
}

/// Styling hint for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// Unique identifier for a notification, used to key and expire toasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub Uuid);

impl NotificationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A transient, user-visible message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub text: String,
    pub duration: ToastDuration,
    pub level: NotificationLevel,
    pub issued_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(text: impl Into<String>, duration: ToastDuration, level: NotificationLevel) -> Self {
        Self {
            id: NotificationId::new(),
            text: text.into(),
            duration,
            level,
            issued_at: Utc::now(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, ToastDuration::Short, NotificationLevel::Info)
    }

    pub fn error(text: impl Into<String>, duration: ToastDuration) -> Self {
        Self::new(text, duration, NotificationLevel::Error)
    }

    /// When the toast should disappear.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.issued_at
            + chrono::Duration::from_std(self.duration.as_duration())
                .unwrap_or_else(|_| chrono::Duration::seconds(2))
    }
}

/// A file picked through the native chooser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSelection {
    /// `content://` URI on Android, `file://` URL on desktop.
    pub uri: String,
}

impl FileSelection {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    /// Last path segment of the URI, used when the platform offers no
    /// display name.
    pub fn fallback_name(&self) -> &str {
        let path = self.uri.split(['?', '#']).next().unwrap_or_default();
        match path.rsplit('/').next() {
            Some(name) if !name.is_empty() => name,
            _ => "file",
        }
    }
}

/// The bytes of a picked file, ready to be handed to the page's input.
#[derive(Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    /// Empty when unknown, as browsers do for unrecognised files.
    pub mime_type: String,
    pub contents: Vec<u8>,
}

impl std::fmt::Debug for PickedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickedFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.contents.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PLACEHOLDER_TOKEN;

    #[test]
    fn valid_credentials_are_trimmed() {
        let creds = Credentials::from_form("  tok_123 ", "\tdr_456\n", DEFAULT_PLACEHOLDER_TOKEN)
            .expect("valid");
        assert_eq!(creds.access_token(), "tok_123");
        assert_eq!(creds.data_request_id(), "dr_456");
    }

    #[test]
    fn empty_token_rejected_first() {
        let err = Credentials::from_form("   ", "", DEFAULT_PLACEHOLDER_TOKEN).unwrap_err();
        assert!(matches!(err, ShellError::MissingAccessToken));
    }

    #[test]
    fn placeholder_token_rejected() {
        let err = Credentials::from_form(" YOUR_ACCESS_TOKEN_HERE ", "dr_1", DEFAULT_PLACEHOLDER_TOKEN)
            .unwrap_err();
        assert!(matches!(err, ShellError::PlaceholderAccessToken));
    }

    #[test]
    fn empty_request_id_rejected() {
        let err = Credentials::from_form("tok", "  ", DEFAULT_PLACEHOLDER_TOKEN).unwrap_err();
        assert!(matches!(err, ShellError::MissingDataRequestId));
        assert!(err.is_validation());
    }

    #[test]
    fn debug_redacts_token() {
        let creds = Credentials::from_form("secret-token", "dr_1", DEFAULT_PLACEHOLDER_TOKEN)
            .expect("valid");
        let out = format!("{creds:?}");
        assert!(!out.contains("secret-token"));
        assert!(out.contains("dr_1"));
    }

    #[test]
    fn fallback_name_is_last_segment() {
        assert_eq!(FileSelection::new("file:///tmp/report.pdf").fallback_name(), "report.pdf");
        assert_eq!(FileSelection::new("content://docs/document/7?x=1").fallback_name(), "7");
        assert_eq!(FileSelection::new("content://docs/").fallback_name(), "file");
    }

    #[test]
    fn long_toast_outlives_short() {
        let short = Notification::info("a");
        let long = Notification::error("b", ToastDuration::Long);
        assert!(long.expires_at() - long.issued_at > short.expires_at() - short.issued_at);
    }
}
