// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Linkshell — Core types, configuration and the shell controller shared by
// the bridge and app crates.

pub mod config;
pub mod controller;
pub mod error;
pub mod file_chooser;
pub mod human_errors;
pub mod message;
pub mod types;
pub mod widget;

pub use config::AppConfig;
pub use controller::{BackAction, BrowserView, MessageOutcome, NotificationSink, ShellController};
pub use error::ShellError;
pub use types::*;
