use crate::calendar::event::{Event, EventId};

/// First event in `existing` whose interval intersects `candidate` on the
/// candidate's date, skipping the record being edited.
///
/// Intervals are half-open: touching boundaries do not conflict. Start and end
/// are compared literally, so a degenerate candidate (`start >= end`) is not
/// rejected here.
pub fn find_conflict<'a, I>(candidate: &Event, existing: I, excluding: Option<EventId>) -> Option<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    existing
        .into_iter()
        .find(|e| Some(e.id) != excluding && candidate.overlaps(e))
}

pub fn conflicts<'a, I>(candidate: &Event, existing: I, excluding: Option<EventId>) -> bool
where
    I: IntoIterator<Item = &'a Event>,
{
    find_conflict(candidate, existing, excluding).is_some()
}
