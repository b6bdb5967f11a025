// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Linkshell — Native platform bridge abstractions.
//
// Defines the traits the app uses for native capabilities (file picking,
// activity lifecycle) and picks the implementation for the build target.

pub mod traits;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(target_os = "android"))]
pub mod stub;

/// Returns the bridge implementation for the target operating system.
pub fn platform_bridge() -> Box<dyn traits::PlatformBridge> {
    #[cfg(target_os = "android")]
    {
        Box::new(android::AndroidBridge::new())
    }
    #[cfg(not(target_os = "android"))]
    {
        // Desktop/CI: the app uses rfd and its own window handling instead.
        Box::new(stub::StubBridge)
    }
}
