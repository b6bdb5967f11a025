// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Native single-file selection for the widget's file inputs.
//
// Desktop uses rfd's async dialog and reads the file with tokio. Mobile goes
// through the platform bridge, whose calls block, so they run on their own
// thread and report back over a oneshot channel. Cancel and failure of the
// dialog both come back as `None`.

use linkshell_core::error::Result;
use linkshell_core::types::{FileSelection, PickedFile};

/// Show an any-type, single-selection picker.
#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub async fn pick_file() -> Option<FileSelection> {
    let handle = rfd::AsyncFileDialog::new()
        .set_title("File Chooser")
        .pick_file()
        .await?;
    let path = handle.path();
    tracing::info!(file = %path.display(), "file picked");
    Some(FileSelection::new(format!("file://{}", path.display())))
}

/// Load the picked file so it can be handed to the page.
#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub async fn read_file(selection: &FileSelection, max_bytes: u64) -> Result<PickedFile> {
    use linkshell_core::error::ShellError;
    use std::path::Path;

    let path = selection
        .uri
        .strip_prefix("file://")
        .map(Path::new)
        .ok_or_else(|| ShellError::FileRead(format!("not a local file: {}", selection.uri)))?;

    let len = tokio::fs::metadata(path)
        .await
        .map_err(|e| ShellError::FileRead(e.to_string()))?
        .len();
    if len > max_bytes {
        return Err(ShellError::FileRead(format!("{len} bytes is over the {max_bytes} byte limit")));
    }
    let contents = tokio::fs::read(path)
        .await
        .map_err(|e| ShellError::FileRead(e.to_string()))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| selection.fallback_name().to_owned());
    let mime_type = mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_owned())
        .unwrap_or_default();

    tracing::debug!(bytes = contents.len(), %mime_type, "picked file read");
    Ok(PickedFile {
        name,
        mime_type,
        contents,
    })
}

/// Show an any-type, single-selection picker.
#[cfg(any(target_os = "ios", target_os = "android"))]
pub async fn pick_file() -> Option<FileSelection> {
    use linkshell_bridge::traits::{ANY_MIME_TYPE, NativeFilePicker};

    let (tx, rx) = tokio::sync::oneshot::channel();
    std::thread::spawn(move || {
        let bridge = linkshell_bridge::platform_bridge();
        let _ = tx.send(bridge.pick_file(&[ANY_MIME_TYPE]));
    });

    match rx.await {
        Ok(Ok(uri)) => uri.map(FileSelection::new),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "native file picker failed");
            None
        }
        Err(_) => {
            tracing::error!("native file picker thread exited without a result");
            None
        }
    }
}

/// Load the picked file so it can be handed to the page.
#[cfg(any(target_os = "ios", target_os = "android"))]
pub async fn read_file(selection: &FileSelection, max_bytes: u64) -> Result<PickedFile> {
    use linkshell_bridge::traits::NativeFilePicker;
    use linkshell_core::error::ShellError;

    let uri = selection.uri.clone();
    let (tx, rx) = tokio::sync::oneshot::channel();
    std::thread::spawn(move || {
        let bridge = linkshell_bridge::platform_bridge();
        let _ = tx.send(bridge.read_file(&uri, max_bytes));
    });

    rx.await
        .map_err(|_| ShellError::Bridge("file reader thread exited without a result".into()))?
}

#[cfg(all(test, not(any(target_os = "ios", target_os = "android"))))]
mod tests {
    use super::*;
    use linkshell_core::error::ShellError;

    fn selection_for(path: &std::path::Path) -> FileSelection {
        FileSelection::new(format!("file://{}", path.display()))
    }

    #[tokio::test]
    async fn reads_name_type_and_bytes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("statement.txt");
        std::fs::write(&path, b"balance: 42").expect("write");

        let file = read_file(&selection_for(&path), 1024).await.expect("read");
        assert_eq!(file.name, "statement.txt");
        assert_eq!(file.mime_type, "text/plain");
        assert_eq!(file.contents, b"balance: 42");
    }

    #[tokio::test]
    async fn oversized_file_is_refused() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("big.bin");
        std::fs::write(&path, vec![0u8; 64]).expect("write");

        let err = read_file(&selection_for(&path), 16).await.unwrap_err();
        assert!(matches!(err, ShellError::FileRead(_)));
    }

    #[tokio::test]
    async fn non_local_uri_is_refused() {
        let err = read_file(&FileSelection::new("content://docs/7"), 1024).await.unwrap_err();
        assert!(matches!(err, ShellError::FileRead(_)));
    }
}
