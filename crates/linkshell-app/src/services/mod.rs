// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer — bridges the Dioxus UI to the controller, the webview and
// the native platform.

pub mod config_file;
pub mod data_dir;
pub mod file_picker;
pub mod frame_host;
