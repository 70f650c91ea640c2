use std::fmt;

use chrono::NaiveTime;
use thiserror::Error;

use crate::calendar::event::EventId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Start,
    End,
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeField::Start => f.write_str("Start"),
            TimeField::End => f.write_str("End"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Event name is required!")]
    EmptyName,
    #[error("Select a date before saving an event.")]
    NoDateSelected,
    #[error("{0} time is required.")]
    MissingTime(TimeField),
    #[error("End time {end} must be after start time {start}.", start = .start.format("%H:%M"), end = .end.format("%H:%M"))]
    InvalidTimeRange { start: NaiveTime, end: NaiveTime },
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Event times overlap with \"{name}\". Please choose different times.")]
pub struct OverlapError {
    pub conflicting: EventId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommitError {
    #[error("No event is being edited.")]
    NoDraft,
    #[error("Event {0} no longer exists.")]
    UnknownEvent(EventId),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Overlap(#[from] OverlapError),
}
