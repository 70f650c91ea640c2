use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::event::{Event, EventId};

/// All events for all months, in insertion order.
///
/// Insertion order is the only ordering; queries never sort by time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn add(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Replaces the event with the given id, keeping that id on the new record.
    /// Returns `false` and leaves the store untouched when nothing matches.
    pub fn update(&mut self, id: EventId, mut event: Event) -> bool {
        let Some(slot) = self.events.iter_mut().find(|e| e.id == id) else {
            tracing::warn!("update for unknown event {} ignored", id);
            return false;
        };
        event.id = id;
        *slot = event;
        true
    }

    pub fn remove(&mut self, id: EventId) -> Option<Event> {
        let index = self.events.iter().position(|e| e.id == id)?;
        Some(self.events.remove(index))
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn for_date(&self, date: NaiveDate) -> impl Iterator<Item = &Event> + Clone + '_ {
        self.events.iter().filter(move |e| e.date == date)
    }

    /// Events whose date falls in `year`/`month`, with `month` 1-based.
    pub fn for_month(&self, year: i32, month: u32) -> impl Iterator<Item = &Event> + Clone + '_ {
        self.events
            .iter()
            .filter(move |e| e.date.year() == year && e.date.month() == month)
    }

    pub fn has_events_on(&self, date: NaiveDate) -> bool {
        self.for_date(date).next().is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<'a> IntoIterator for &'a EventStore {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
