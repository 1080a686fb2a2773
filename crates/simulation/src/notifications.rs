//! Status text and arrival notifications.
//!
//! The session emits `StatusUpdate` and `Arrived` events; UI collaborators
//! read them (or the `StatusBoard` they are collected into) and never write
//! back into the session except through `SessionRequest`s.

use bevy::prelude::*;

use crate::venues::DestinationId;
use crate::NavigationSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLevel {
    #[default]
    Info,
    Success,
    Warning,
}

impl StatusLevel {
    pub fn label(&self) -> &'static str {
        match self {
            StatusLevel::Info => "INFO",
            StatusLevel::Success => "OK",
            StatusLevel::Warning => "WARNING",
        }
    }
}

/// Free-form status line for the control panel.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    pub message: String,
    pub level: StatusLevel,
}

impl StatusUpdate {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: StatusLevel::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: StatusLevel::Success,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: StatusLevel::Warning,
        }
    }
}

/// Fired once per journey when the vehicle reaches its destination.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrived {
    pub destination: DestinationId,
}

/// Latest status line plus a short history.
#[derive(Resource, Debug, Clone)]
pub struct StatusBoard {
    pub current: StatusUpdate,
    pub history: Vec<StatusUpdate>,
    /// Maximum history size before old entries are trimmed.
    pub max_history: usize,
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self {
            current: StatusUpdate::info("Pick a destination and generate a route"),
            history: Vec::new(),
            max_history: 32,
        }
    }
}

impl StatusBoard {
    pub fn push(&mut self, update: StatusUpdate) {
        self.history.push(update.clone());
        if self.history.len() > self.max_history {
            let excess = self.history.len() - self.max_history;
            self.history.drain(0..excess);
        }
        self.current = update;
    }
}

fn collect_status_updates(mut events: EventReader<StatusUpdate>, mut board: ResMut<StatusBoard>) {
    for event in events.read() {
        board.push(event.clone());
    }
}

pub struct NotificationsPlugin;

impl Plugin for NotificationsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StatusBoard>()
            .add_event::<StatusUpdate>()
            .add_event::<Arrived>()
            .add_systems(
                Update,
                collect_status_updates.in_set(NavigationSet::Present),
            );
    }
}
