// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// User-facing text for every error the shell can surface as a toast.

use crate::error::ShellError;
use crate::types::{Notification, NotificationLevel, ToastDuration};

/// A short, plain message suitable for a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HumanError {
    pub message: String,
    pub duration: ToastDuration,
}

impl HumanError {
    fn short(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration: ToastDuration::Short,
        }
    }

    fn long(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration: ToastDuration::Long,
        }
    }

    /// Turn into an error-level notification.
    pub fn into_notification(self) -> Notification {
        Notification::new(self.message, self.duration, NotificationLevel::Error)
    }
}

/// Map a `ShellError` to the message shown to the user.
pub fn humanize_error(err: &ShellError) -> HumanError {
    match err {
        // -- Form validation --
        ShellError::MissingAccessToken | ShellError::PlaceholderAccessToken => {
            HumanError::short("Please enter a valid access token")
        }
        ShellError::MissingDataRequestId => HumanError::short("Please enter a data request ID"),

        // -- Browser frame --
        ShellError::ResourceLoad(_) => HumanError::short("Error loading HTML file"),
        ShellError::ScriptEvaluation(_) => {
            HumanError::long("The widget could not be configured. Go back and try again.")
        }
        ShellError::UnknownMessage(_) => HumanError::short("The widget sent a message we don't understand"),
        ShellError::FileRead(_) => HumanError::short("The selected file could not be read"),

        // -- Persistence --
        ShellError::Io(_) | ShellError::Serialization(_) => {
            HumanError::short("Settings could not be read or saved")
        }

        // -- Platform --
        ShellError::Bridge(_) => HumanError::short("Something went wrong talking to the device"),
        ShellError::PlatformUnavailable => HumanError::short("Not available on this device"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages() {
        assert_eq!(
            humanize_error(&ShellError::MissingAccessToken).message,
            "Please enter a valid access token"
        );
        assert_eq!(
            humanize_error(&ShellError::PlaceholderAccessToken).message,
            "Please enter a valid access token"
        );
        assert_eq!(
            humanize_error(&ShellError::MissingDataRequestId).message,
            "Please enter a data request ID"
        );
    }

    #[test]
    fn load_failure_is_short_error_toast() {
        let n = humanize_error(&ShellError::ResourceLoad("404".into())).into_notification();
        assert_eq!(n.text, "Error loading HTML file");
        assert_eq!(n.duration, ToastDuration::Short);
        assert_eq!(n.level, NotificationLevel::Error);
    }

    #[test]
    fn details_are_not_leaked() {
        let human = humanize_error(&ShellError::ScriptEvaluation("secret detail".into()));
        assert!(!human.message.contains("secret detail"));
        assert_eq!(human.duration, ToastDuration::Long);

        let human = humanize_error(&ShellError::FileRead("/home/me/secret.pdf: denied".into()));
        assert_eq!(human.message, "The selected file could not be read");
    }
}
