//! ---
//! ipcmon_section: "02-simulation"
//! ipcmon_subsection: "module"
//! ipcmon_type: "source"
//! ipcmon_scope: "code"
//! ipcmon_description: "Bounded activity feed of simulated IPC events."
//! ipcmon_version: "v0.1.0"
//! ipcmon_owner: "tbd"
//! ---
use std::collections::VecDeque;

use chrono::{DateTime, Local, Utc};
use ipcmon_common::time::{clock_label, epoch_millis};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Maximum number of events retained by the feed.
pub const ACTIVITY_FEED_CAPACITY: usize = 10;

/// Messages an activity tick chooses from.
pub const ACTIVITY_MESSAGES: [&str; 5] = [
    "Data transferred via pipe channel",
    "Message received from queue",
    "Shared memory synchronized",
    "Process authentication successful",
    "IPC channel established",
];

/// IPC mechanism an event is attributed to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Pipe,
    Queue,
    Shm,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 3] = [ActivityKind::Pipe, ActivityKind::Queue, ActivityKind::Shm];

    pub fn label(self) -> &'static str {
        match self {
            ActivityKind::Pipe => "PIPE",
            ActivityKind::Queue => "QUEUE",
            ActivityKind::Shm => "SHM",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityEvent {
    /// Wall-clock milliseconds, bumped when two events share a millisecond.
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub message: String,
    pub timestamp: String,
}

/// Newest-first ring of recent events.
#[derive(Debug, Clone)]
pub struct ActivityFeed {
    events: VecDeque<ActivityEvent>,
    capacity: usize,
    last_id: u64,
}

impl Default for ActivityFeed {
    fn default() -> Self {
        Self::with_capacity(ACTIVITY_FEED_CAPACITY)
    }
}

impl ActivityFeed {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity + 1),
            capacity,
            last_id: 0,
        }
    }

    /// Feed pre-populated with the three startup events, pipe first.
    pub fn seeded(at: DateTime<Local>) -> Self {
        let mut feed = Self::default();
        feed.push(ActivityKind::Shm, "Shared memory segment shm_main updated", at);
        feed.push(
            ActivityKind::Queue,
            "Message enqueued to queue_main with priority 1",
            at,
        );
        feed.push(
            ActivityKind::Pipe,
            "Process A sent data to Process B via pipe_0",
            at,
        );
        feed
    }

    /// Prepend an event, evicting the oldest once the capacity is exceeded.
    pub fn push(
        &mut self,
        kind: ActivityKind,
        message: impl Into<String>,
        at: DateTime<Local>,
    ) -> &ActivityEvent {
        let millis = epoch_millis(&at.with_timezone(&Utc));
        let id = millis.max(self.last_id.saturating_add(1));
        self.last_id = id;
        self.events.push_front(ActivityEvent {
            id,
            kind,
            message: message.into(),
            timestamp: clock_label(&at),
        });
        self.events.truncate(self.capacity);
        &self.events[0]
    }

    /// Pick a kind and message uniformly at random and prepend the event.
    pub fn emit<R: Rng + ?Sized>(&mut self, rng: &mut R, at: DateTime<Local>) -> &ActivityEvent {
        let kind = ActivityKind::ALL[rng.gen_range(0..ActivityKind::ALL.len())];
        let message = ACTIVITY_MESSAGES[rng.gen_range(0..ACTIVITY_MESSAGES.len())];
        self.push(kind, message, at)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn latest(&self) -> Option<&ActivityEvent> {
        self.events.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActivityEvent> {
        self.events.iter()
    }

    pub fn to_vec(&self) -> Vec<ActivityEvent> {
        self.events.iter().cloned().collect()
    }
}
