// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state — one reactive signal wrapping the controller.

use linkshell_core::file_chooser::FileChooserCallback;
use linkshell_core::types::FileSelection;
use linkshell_core::{AppConfig, ShellController};

use crate::frame::FrameView;
use crate::toast::ToastQueue;

pub type Controller = ShellController<FrameView, ToastQueue>;

/// Shared state accessible to all pages via `use_context`.
pub struct Shell {
    /// Screen flag, credentials, pending file chooser.
    pub controller: Controller,
    /// URL the frame is showing; set by the controller's load.
    pub frame_src: Option<String>,
    /// Bumped on every file-chooser request; stale picker results are dropped.
    picker_generation: u64,
}

impl Shell {
    pub fn new(config: AppConfig, entry_point: String) -> Self {
        Self {
            controller: ShellController::new(config, entry_point, FrameView::new(), ToastQueue::new()),
            frame_src: None,
            picker_generation: 0,
        }
    }

    /// Hand a new chooser request to the controller and return the
    /// generation its native dialog must quote when it finishes.
    pub fn begin_file_chooser(&mut self, callback: FileChooserCallback) -> u64 {
        self.controller.request_file_chooser(callback);
        self.picker_generation += 1;
        self.picker_generation
    }

    /// Deliver a native dialog's result if its request is still the current
    /// one. Returns whether it was delivered.
    pub fn finish_file_chooser(&mut self, generation: u64, selection: Option<FileSelection>) -> bool {
        if generation != self.picker_generation {
            return false;
        }
        self.controller.resolve_file_chooser(selection);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    fn shell() -> Shell {
        Shell::new(AppConfig::default(), "/assets/m1_widget.html".into())
    }

    #[test]
    fn late_result_of_superseded_dialog_is_dropped() {
        let mut shell = shell();
        let (first_tx, mut first_rx) = oneshot::channel();
        let (second_tx, mut second_rx) = oneshot::channel();

        let first = shell.begin_file_chooser(first_tx);
        let second = shell.begin_file_chooser(second_tx);
        assert_ne!(first, second);
        assert_eq!(first_rx.try_recv().expect("superseded"), None);

        // The first dialog closes after the second opened.
        assert!(!shell.finish_file_chooser(first, Some(FileSelection::new("file:///old.pdf"))));
        assert!(second_rx.try_recv().is_err(), "second request still open");
        assert!(shell.controller.has_pending_file_chooser());

        assert!(shell.finish_file_chooser(second, Some(FileSelection::new("file:///new.pdf"))));
        assert_eq!(
            second_rx.try_recv().expect("delivered"),
            Some(FileSelection::new("file:///new.pdf"))
        );
        assert!(!shell.controller.has_pending_file_chooser());
    }

    #[test]
    fn cancelled_dialog_resolves_empty() {
        let mut shell = shell();
        let (tx, mut rx) = oneshot::channel();
        let generation = shell.begin_file_chooser(tx);

        assert!(shell.finish_file_chooser(generation, None));
        assert_eq!(rx.try_recv().expect("resolved"), None);
    }
}
