// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::widget::{BrandingStyles, WidgetOptions};

/// Sentinel shipped in the form's hint text; submitting it unchanged is
/// rejected.
pub const DEFAULT_PLACEHOLDER_TOKEN: &str = "YOUR_ACCESS_TOKEN_HERE";

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// API host the widget talks to.
    pub host_name: String,
    /// Tag name of the custom element that receives the `config` attribute.
    pub element_tag: String,
    /// Name of the callback object installed into the page window.
    pub bridge_object: String,
    /// Page to load instead of the bundled widget asset. Must be a path on
    /// the app's own origin; see [`AppConfig::local_entry_point`].
    pub entry_point: Option<String>,
    /// Token value treated as "not filled in".
    pub placeholder_token: String,
    /// Widget colours and sizing.
    pub branding: BrandingStyles,
    /// Widget feature flags.
    pub options: WidgetOptions,
    /// Display cap for text supplied by the page.
    pub max_message_chars: usize,
    /// Largest file handed to a page file input.
    pub max_file_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host_name: "api-stg.measureone.com".into(),
            element_tag: "m1-link".into(),
            bridge_object: "Android".into(),
            entry_point: None,
            placeholder_token: DEFAULT_PLACEHOLDER_TOKEN.into(),
            branding: BrandingStyles::default(),
            options: WidgetOptions::default(),
            max_message_chars: 512,
            max_file_bytes: 20 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    /// Read a config file. Missing fields take their defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Write the config as pretty JSON.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load `path`, falling back to defaults when it is absent or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Self::default()
            }
        }
    }

    /// The configured entry point, if it is a path on the app's origin.
    ///
    /// The shell scripts the frame through `contentWindow`, which the
    /// webview only allows for same-origin documents. Absolute URLs and
    /// protocol-relative references are refused with a warning and the
    /// bundled page is used instead.
    pub fn local_entry_point(&self) -> Option<&str> {
        let entry = self.entry_point.as_deref()?;
        if is_same_origin_path(entry) {
            Some(entry)
        } else {
            tracing::warn!(entry_point = entry, "entry point is not on the app origin, ignoring");
            None
        }
    }
}

/// Whether `url` is a relative reference that stays on the current origin.
fn is_same_origin_path(url: &str) -> bool {
    let url = url.trim();
    if url.is_empty() || url.starts_with("//") || url.starts_with('\\') || url.starts_with("/\\") {
        return false;
    }
    // A scheme is everything before the first ':' that precedes any of / ? #.
    match url.find([':', '/', '?', '#']) {
        Some(idx) => url.as_bytes()[idx] != b':',
        None => true,
    }
}
