//! Toast notifications shown to the user.
//!
//! Confirmations ("Component Added") and business-rule denials ("Cannot
//! delete locked component") end up here; the UI draws whatever is queued
//! and drops entries once they expire.

use std::collections::VecDeque;

use bevy::prelude::*;

use crate::constants::{MAX_VISIBLE_NOTIFICATIONS, NOTIFICATION_LIFETIME_SECS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A single user-facing message
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Info,
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Success,
        }
    }

    fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Error,
        }
    }

    /// Standard wording for a rejected action on a locked component
    pub fn denied(description: impl Into<String>) -> Self {
        Self::error("Action Denied", description)
    }
}

/// A notice together with the time it was raised
#[derive(Debug, Clone)]
pub struct QueuedNotice {
    pub notice: Notice,
    /// Elapsed app time in seconds when the notice was queued
    pub created_at: f64,
}

/// Resource holding the toasts currently on screen
#[derive(Resource, Default)]
pub struct Notifications {
    queue: VecDeque<QueuedNotice>,
}

impl Notifications {
    pub fn push(&mut self, notice: Notice, now: f64) {
        match notice.severity {
            Severity::Error => warn!("{}: {}", notice.title, notice.description),
            _ => debug!("{}: {}", notice.title, notice.description),
        }
        self.queue.push_back(QueuedNotice {
            notice,
            created_at: now,
        });
        while self.queue.len() > MAX_VISIBLE_NOTIFICATIONS {
            self.queue.pop_front();
        }
    }

    /// Drops every notice older than the display lifetime
    pub fn expire(&mut self, now: f64) {
        self.queue
            .retain(|queued| now - queued.created_at < NOTIFICATION_LIFETIME_SECS);
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueuedNotice> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

/// System dropping expired toasts
pub fn expire_notifications(time: Res<Time>, mut notifications: ResMut<Notifications>) {
    if !notifications.is_empty() {
        notifications.expire(time.elapsed_secs_f64());
    }
}
