// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Config file persistence.

use std::path::Path;

use linkshell_core::AppConfig;
use tracing::{info, warn};

const CONFIG_FILE: &str = "config.json";

/// Load `config.json` from the data directory.
///
/// On first run the defaults are written out so they can be edited.
pub fn load_config() -> AppConfig {
    load_config_in(&super::data_dir::data_dir())
}

fn load_config_in(dir: &Path) -> AppConfig {
    let path = dir.join(CONFIG_FILE);
    if path.exists() {
        let config = AppConfig::load_or_default(&path);
        info!(path = %path.display(), "config loaded");
        return config;
    }

    let config = AppConfig::default();
    match config.save_to(&path) {
        Ok(()) => info!(path = %path.display(), "default config written"),
        Err(e) => warn!(path = %path.display(), error = %e, "could not write default config"),
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_run_writes_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_config_in(dir.path());
        assert_eq!(config, AppConfig::default());
        assert!(dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn existing_file_is_used() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(CONFIG_FILE), r#"{ "bridge_object": "Host" }"#).expect("write");
        assert_eq!(load_config_in(dir.path()).bridge_object, "Host");
    }
}
