// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where native mobile APIs are unavailable.

use linkshell_core::error::{Result, ShellError};
use linkshell_core::types::PickedFile;

use crate::traits::*;

/// No-op bridge returned on non-mobile platforms.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl NativeFilePicker for StubBridge {
    fn pick_file(&self, _mime_types: &[&str]) -> Result<Option<String>> {
        tracing::warn!("NativeFilePicker::pick_file called on stub bridge");
        Err(ShellError::PlatformUnavailable)
    }

    fn read_file(&self, _uri: &str, _max_bytes: u64) -> Result<PickedFile> {
        tracing::warn!("NativeFilePicker::read_file called on stub bridge");
        Err(ShellError::PlatformUnavailable)
    }
}

impl NativeLifecycle for StubBridge {
    fn finish(&self) -> Result<()> {
        tracing::warn!("NativeLifecycle::finish called on stub bridge");
        Err(ShellError::PlatformUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_reports_unavailable() {
        let bridge = crate::platform_bridge();
        assert_eq!(bridge.platform_name(), "Desktop (stub)");
        assert!(matches!(bridge.pick_file(&[ANY_MIME_TYPE]), Err(ShellError::PlatformUnavailable)));
        assert!(matches!(
            bridge.read_file("file:///tmp/x", 1024),
            Err(ShellError::PlatformUnavailable)
        ));
        assert!(matches!(bridge.finish(), Err(ShellError::PlatformUnavailable)));
    }
}
