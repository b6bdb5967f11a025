// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.

use linkshell_core::error::Result;
use linkshell_core::types::PickedFile;

/// Unified bridge that groups all native capabilities.
///
/// Implementations are zero-sized handles; all state lives on the platform
/// side, so the bridge can be moved onto a blocking worker thread.
pub trait PlatformBridge: NativeFilePicker + NativeLifecycle + Send + Sync {
    /// Human-readable platform name (e.g. "Android").
    fn platform_name(&self) -> &str;
}

/// Pick files from the device storage.
pub trait NativeFilePicker {
    /// Show a single-selection picker filtered to the given MIME types.
    ///
    /// Blocks until the user chooses or cancels; call it off the UI thread.
    /// Returns the chosen file's URI, or `None` if cancelled.
    fn pick_file(&self, mime_types: &[&str]) -> Result<Option<String>>;

    /// Read the file behind a URI returned by [`pick_file`](Self::pick_file).
    ///
    /// Fails with `ShellError::FileRead` once more than `max_bytes` have
    /// been read. Blocks; call it off the UI thread.
    fn read_file(&self, uri: &str, max_bytes: u64) -> Result<PickedFile>;
}

/// Host activity / window lifecycle.
pub trait NativeLifecycle {
    /// Close the hosting activity (the platform's default back behaviour).
    fn finish(&self) -> Result<()>;
}

/// MIME filter for "any file".
pub const ANY_MIME_TYPE: &str = "*/*";
