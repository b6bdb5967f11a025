// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Linkshell.

use thiserror::Error;

/// Top-level error type for all Linkshell operations.
#[derive(Debug, Error)]
pub enum ShellError {
    // -- Form validation --
    #[error("access token is empty")]
    MissingAccessToken,

    #[error("access token is still the placeholder value")]
    PlaceholderAccessToken,

    #[error("data request id is empty")]
    MissingDataRequestId,

    // -- Browser frame --
    #[error("failed to load widget page: {0}")]
    ResourceLoad(String),

    #[error("script evaluation failed: {0}")]
    ScriptEvaluation(String),

    #[error("unknown page message: {0}")]
    UnknownMessage(String),

    #[error("picked file could not be read: {0}")]
    FileRead(String),

    // -- Persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

impl ShellError {
    /// Whether this error came from the credential form.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingAccessToken | Self::PlaceholderAccessToken | Self::MissingDataRequestId
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ShellError>;
