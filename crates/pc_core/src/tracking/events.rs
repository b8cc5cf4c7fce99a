//! Event list
//!
//! Only the start frame and the team in possession matter to the model;
//! the rest is carried for consumers (plots, reports).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Team;
use crate::error::{PitchControlError, Result};
use crate::model::kinematics::Point;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub start_frame: u32,
    /// Team in possession
    pub team: Team,
    #[serde(default)]
    pub end_frame: Option<u32>,
    /// Vendor event type (`PASS`, `SHOT`, ...)
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub start: Option<Point>,
    #[serde(default)]
    pub end: Option<Point>,
}

impl Event {
    pub fn new(start_frame: u32, team: Team) -> Self {
        Self { start_frame, team, end_frame: None, kind: None, start: None, end: None }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

/// Events keyed by event id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventTable {
    events: BTreeMap<u32, Event>,
}

impl EventTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, event_id: u32, event: Event) -> Option<Event> {
        self.events.insert(event_id, event)
    }

    pub fn get(&self, event_id: u32) -> Result<&Event> {
        self.events
            .get(&event_id)
            .ok_or(PitchControlError::EventNotFound { event_id })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Event)> {
        self.events.iter().map(|(&id, event)| (id, event))
    }
}

impl FromIterator<(u32, Event)> for EventTable {
    fn from_iter<I: IntoIterator<Item = (u32, Event)>>(iter: I) -> Self {
        Self { events: iter.into_iter().collect() }
    }
}
