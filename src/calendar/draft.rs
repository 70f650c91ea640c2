use chrono::{NaiveDate, NaiveTime};

use crate::calendar::error::{CommitError, OverlapError, TimeField, ValidationError};
use crate::calendar::event::{Category, Event, EventId};
use crate::calendar::overlap;
use crate::calendar::store::EventStore;

/// An uncommitted create or edit held by the event form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Draft {
    pub name: String,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub description: String,
    pub category: Category,
    editing: Option<EventId>,
}

/// Field-level changes applied to a [`Draft`]. `None` leaves a field as is.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DraftPatch {
    pub name: Option<String>,
    pub start_time: Option<Option<NaiveTime>>,
    pub end_time: Option<Option<NaiveTime>>,
    pub description: Option<String>,
    pub category: Option<Category>,
}

impl DraftPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    pub fn times(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start_time: Some(Some(start)),
            end_time: Some(Some(end)),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }
}

impl Draft {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn for_event(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            start_time: Some(event.start_time),
            end_time: Some(event.end_time),
            description: event.description.clone(),
            category: event.category,
            editing: Some(event.id),
        }
    }

    pub fn editing(&self) -> Option<EventId> {
        self.editing
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn apply(&mut self, patch: DraftPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(start) = patch.start_time {
            self.start_time = start;
        }
        if let Some(end) = patch.end_time {
            self.end_time = end;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
    }

    /// Builds the event this draft describes on `date`, without touching any store.
    pub fn to_event(&self, date: Option<NaiveDate>) -> Result<Event, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let date = date.ok_or(ValidationError::NoDateSelected)?;
        let start = self.start_time.ok_or(ValidationError::MissingTime(TimeField::Start))?;
        let end = self.end_time.ok_or(ValidationError::MissingTime(TimeField::End))?;
        if start >= end {
            return Err(ValidationError::InvalidTimeRange { start, end });
        }

        let mut event = Event::new(self.name.clone(), date, start, end)
            .with_description(self.description.clone())
            .with_category(self.category);
        if let Some(id) = self.editing {
            event.id = id;
        }
        Ok(event)
    }
}

/// Validates `draft` against `store` and writes it on success.
///
/// Edits replace the record they were opened from; new drafts are appended.
/// On any error the store is left unchanged.
pub fn commit(draft: &Draft, date: Option<NaiveDate>, store: &mut EventStore) -> Result<Event, CommitError> {
    let event = draft.to_event(date)?;

    if let Some(id) = draft.editing
        && store.get(id).is_none()
    {
        return Err(CommitError::UnknownEvent(id));
    }

    if let Some(existing) = overlap::find_conflict(&event, store.for_date(event.date), draft.editing) {
        return Err(OverlapError {
            conflicting: existing.id,
            name: existing.name.clone(),
        }
        .into());
    }

    match draft.editing {
        Some(id) => {
            store.update(id, event.clone());
            tracing::info!("Updated event {} on {}", id, event.date);
        }
        None => {
            store.add(event.clone());
            tracing::info!("Added event {} on {}", event.id, event.date);
        }
    }
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn june_2() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()
    }

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn draft(name: &str, start: NaiveTime, end: NaiveTime) -> Draft {
        let mut draft = Draft::blank();
        draft.apply(DraftPatch::name(name));
        draft.apply(DraftPatch::times(start, end));
        draft
    }

    fn store_with_standup() -> (EventStore, Event) {
        let standup = Event::new("Standup", june_2(), time(9, 0), time(9, 30));
        let mut store = EventStore::new();
        store.add(standup.clone());
        (store, standup)
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut d = draft("Standup", time(9, 0), time(9, 30));

        d.apply(DraftPatch::default().with_category(Category::Other));

        assert_eq!(d.name, "Standup");
        assert_eq!(d.start_time, Some(time(9, 0)));
        assert_eq!(d.category, Category::Other);
    }

    #[test]
    fn overlapping_save_is_rejected() {
        let (mut store, standup) = store_with_standup();

        let result = commit(&draft("Sync", time(9, 15), time(9, 45)), Some(june_2()), &mut store);

        assert_eq!(
            result,
            Err(CommitError::Overlap(OverlapError { conflicting: standup.id, name: "Standup".to_string() }))
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn touching_save_succeeds() {
        let (mut store, _) = store_with_standup();

        let saved = commit(&draft("Lunch", time(9, 30), time(10, 0)), Some(june_2()), &mut store).unwrap();

        assert_eq!(saved.date, june_2());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn empty_name_is_rejected_before_overlap() {
        let (mut store, _) = store_with_standup();

        let result = commit(&draft("  ", time(9, 0), time(9, 30)), Some(june_2()), &mut store);

        assert_eq!(result, Err(CommitError::Validation(ValidationError::EmptyName)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn editing_does_not_conflict_with_itself() {
        let (mut store, standup) = store_with_standup();
        let mut d = Draft::for_event(&standup);
        d.apply(DraftPatch { start_time: Some(Some(time(9, 5))), ..DraftPatch::default() });

        let saved = commit(&d, Some(june_2()), &mut store).unwrap();

        assert_eq!(saved.id, standup.id);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(standup.id).unwrap().start_time, time(9, 5));
    }

    #[test]
    fn degenerate_range_is_rejected() {
        let mut store = EventStore::new();

        let result = commit(&draft("Backwards", time(10, 0), time(9, 0)), Some(june_2()), &mut store);

        assert!(matches!(result, Err(CommitError::Validation(ValidationError::InvalidTimeRange { .. }))));
        assert!(store.is_empty());
    }

    #[test]
    fn missing_time_is_rejected() {
        let mut store = EventStore::new();
        let mut d = Draft::blank();
        d.apply(DraftPatch::name("No times"));

        let result = commit(&d, Some(june_2()), &mut store);

        assert_eq!(result, Err(CommitError::Validation(ValidationError::MissingTime(TimeField::Start))));
    }

    #[test]
    fn missing_date_is_rejected() {
        let mut store = EventStore::new();

        let result = commit(&draft("Floating", time(9, 0), time(10, 0)), None, &mut store);

        assert_eq!(result, Err(CommitError::Validation(ValidationError::NoDateSelected)));
    }

    #[test]
    fn editing_deleted_event_fails() {
        let (mut store, standup) = store_with_standup();
        let d = Draft::for_event(&standup);
        store.remove(standup.id);

        let result = commit(&d, Some(june_2()), &mut store);

        assert_eq!(result, Err(CommitError::UnknownEvent(standup.id)));
    }

    #[test]
    fn empty_name_wins_over_deleted_event() {
        let (mut store, standup) = store_with_standup();
        let mut d = Draft::for_event(&standup);
        d.apply(DraftPatch::name(""));
        store.remove(standup.id);

        let result = commit(&d, Some(june_2()), &mut store);

        assert_eq!(result, Err(CommitError::Validation(ValidationError::EmptyName)));
        assert!(store.is_empty());
    }

    #[test]
    fn error_messages_are_user_facing() {
        assert_eq!(ValidationError::EmptyName.to_string(), "Event name is required!");
        let overlap = OverlapError { conflicting: EventId::new(), name: "Standup".to_string() };
        assert_eq!(
            CommitError::from(overlap).to_string(),
            "Event times overlap with \"Standup\". Please choose different times."
        );
    }
}
