// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-app toast queue — the notification sink handed to the controller.

use chrono::{DateTime, Utc};

use linkshell_core::NotificationSink;
use linkshell_core::types::Notification;

/// Most toasts kept on screen at once; older ones are dropped first.
const MAX_VISIBLE: usize = 4;

#[derive(Debug, Default)]
pub struct ToastQueue {
    visible: Vec<Notification>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(&self) -> &[Notification] {
        &self.visible
    }

    /// Drop every toast whose duration has elapsed by `now`.
    pub fn expire(&mut self, now: DateTime<Utc>) {
        self.visible.retain(|n| n.expires_at() > now);
    }
}

impl NotificationSink for ToastQueue {
    fn notify(&mut self, notification: Notification) {
        tracing::debug!(id = %notification.id, text = %notification.text, "toast");
        self.visible.push(notification);
        if self.visible.len() > MAX_VISIBLE {
            let overflow = self.visible.len() - MAX_VISIBLE;
            self.visible.drain(..overflow);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use linkshell_core::types::ToastDuration;

    #[test]
    fn toasts_expire_after_their_duration() {
        let mut queue = ToastQueue::new();
        let short = Notification::info("short");
        let long = Notification::error("long", ToastDuration::Long);
        let issued = short.issued_at;
        queue.notify(short);
        queue.notify(long);

        queue.expire(issued);
        assert_eq!(queue.visible().len(), 2);

        queue.expire(issued + chrono::Duration::milliseconds(2500));
        assert_eq!(queue.visible().len(), 1);
        assert_eq!(queue.visible()[0].text, "long");

        queue.expire(issued + chrono::Duration::seconds(10));
        assert!(queue.visible().is_empty());
    }

    #[test]
    fn oldest_dropped_past_limit() {
        let mut queue = ToastQueue::new();
        for i in 0..6 {
            queue.notify(Notification::info(format!("t{i}")));
        }
        assert_eq!(queue.visible().len(), MAX_VISIBLE);
        assert_eq!(queue.visible()[0].text, "t2");
    }
}
