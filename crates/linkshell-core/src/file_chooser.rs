// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Single outstanding file-chooser request.

use tokio::sync::oneshot;

use crate::types::FileSelection;

/// Callback handed over with a file-chooser request.
pub type FileChooserCallback = oneshot::Sender<Option<FileSelection>>;

/// Holds at most one pending file-chooser callback.
///
/// A newer request resolves the older one with `None` before replacing it,
/// and dropping the slot resolves whatever is still pending.
#[derive(Debug, Default)]
pub struct FileChooserSlot {
    pending: Option<FileChooserCallback>,
}

impl FileChooserSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new callback. Returns `true` if a stale one was resolved.
    pub fn open(&mut self, callback: FileChooserCallback) -> bool {
        let superseded = match self.pending.take() {
            Some(stale) => {
                tracing::debug!("superseding pending file chooser request");
                // The receiver may already be gone; nothing else to do then.
                let _ = stale.send(None);
                true
            }
            None => false,
        };
        self.pending = Some(callback);
        superseded
    }

    /// Deliver the result to the pending callback, if any.
    ///
    /// Returns `false` when nothing was pending.
    pub fn resolve(&mut self, selection: Option<FileSelection>) -> bool {
        match self.pending.take() {
            Some(callback) => {
                if callback.send(selection).is_err() {
                    tracing::debug!("file chooser receiver dropped before result arrived");
                }
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Drop for FileChooserSlot {
    fn drop(&mut self) {
        if let Some(callback) = self.pending.take() {
            let _ = callback.send(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_delivers_selection() {
        let mut slot = FileChooserSlot::new();
        let (tx, mut rx) = oneshot::channel();
        assert!(!slot.open(tx));
        assert!(slot.is_pending());

        assert!(slot.resolve(Some(FileSelection::new("content://doc/1"))));
        assert_eq!(rx.try_recv().expect("resolved"), Some(FileSelection::new("content://doc/1")));
        assert!(!slot.is_pending());
    }

    #[test]
    fn second_request_resolves_first_with_none() {
        let mut slot = FileChooserSlot::new();
        let (first_tx, mut first_rx) = oneshot::channel();
        let (second_tx, mut second_rx) = oneshot::channel();

        slot.open(first_tx);
        assert!(slot.open(second_tx));

        assert_eq!(first_rx.try_recv().expect("stale resolved"), None);
        assert!(second_rx.try_recv().is_err(), "new request still pending");

        slot.resolve(None);
        assert_eq!(second_rx.try_recv().expect("cancelled"), None);
    }

    #[test]
    fn resolve_without_pending_is_noop() {
        let mut slot = FileChooserSlot::new();
        assert!(!slot.resolve(Some(FileSelection::new("file:///tmp/x"))));
    }

    #[test]
    fn drop_resolves_pending() {
        let (tx, mut rx) = oneshot::channel();
        {
            let mut slot = FileChooserSlot::new();
            slot.open(tx);
        }
        assert_eq!(rx.try_recv().expect("resolved on drop"), None);
    }

    #[test]
    fn dropped_receiver_does_not_panic() {
        let mut slot = FileChooserSlot::new();
        let (tx, rx) = oneshot::channel();
        slot.open(tx);
        drop(rx);
        assert!(slot.resolve(None));
    }
}
