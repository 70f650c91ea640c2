use chrono::{NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;

use daybook::{
    AppState, Category, CommitError, EventStore, ExportFormat, Mode,
    calendar::{DraftPatch, ValidationError, export},
    storage::persistence::{SqliteStore, load_state, save_state},
};

fn june_2() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn schedule(state: &mut AppState, name: &str, start: NaiveTime, end: NaiveTime) -> Result<daybook::Event, CommitError> {
    state.begin_edit(None)?;
    state.update_draft(DraftPatch::name(name));
    state.update_draft(DraftPatch::times(start, end));
    state.commit()
}

fn state_with_standup() -> AppState {
    let mut state = AppState::restore(EventStore::new(), june_2(), Some(june_2()));
    schedule(&mut state, "Standup", time(9, 0), time(9, 30)).unwrap();
    state
}

#[test]
fn overlapping_event_is_rejected_and_form_stays_open() {
    let mut state = state_with_standup();

    let result = schedule(&mut state, "Sync", time(9, 15), time(9, 45));

    assert!(matches!(result, Err(CommitError::Overlap(_))));
    assert_eq!(state.mode, Mode::Insert);
    assert_eq!(state.events.len(), 1);
}

#[test]
fn touching_boundary_is_accepted() {
    let mut state = state_with_standup();

    let lunch = schedule(&mut state, "Lunch", time(9, 30), time(10, 0)).unwrap();

    assert_eq!(state.events.len(), 2);
    assert_eq!(state.events.get(lunch.id), Some(&lunch));
    assert_eq!(state.mode, Mode::Normal);
}

#[test]
fn empty_name_is_rejected_before_overlap() {
    let mut state = state_with_standup();

    let result = schedule(&mut state, "   ", time(9, 0), time(9, 30));

    assert!(matches!(result, Err(CommitError::Validation(ValidationError::EmptyName))));
}

#[test]
fn editing_an_event_does_not_conflict_with_itself() {
    let mut state = state_with_standup();
    let standup_id = state.events.iter().next().unwrap().id;

    state.begin_edit(Some(standup_id)).unwrap();
    state.update_draft(DraftPatch {
        start_time: Some(Some(time(9, 5))),
        ..DraftPatch::default()
    });
    let updated = state.commit().unwrap();

    assert_eq!(updated.id, standup_id);
    assert_eq!(updated.start_time, time(9, 5));
    assert_eq!(state.events.len(), 1);
}

#[test]
fn removing_an_event_leaves_identical_twin() {
    let mut state = AppState::restore(EventStore::new(), june_2(), Some(june_2()));
    let first = daybook::Event::new("Focus", june_2(), time(13, 0), time(14, 0));
    let twin = daybook::Event::new("Focus", june_2(), time(13, 0), time(14, 0));
    let twin_id = twin.id;
    state.add_event(first.clone());
    state.add_event(twin);

    state.delete_event(first.id).unwrap();

    assert_eq!(state.events.len(), 1);
    assert!(state.events.get(twin_id).is_some());
}

#[test]
fn empty_month_exports_empty_documents() {
    let state = AppState::restore(EventStore::new(), june_2(), None);

    assert_eq!(state.export(ExportFormat::Json).unwrap().body, "[]");
    assert_eq!(
        state.export(ExportFormat::Csv).unwrap().body,
        "Name,Date,Start Time,End Time,Description,Category"
    );
}

#[test]
fn json_export_parses_back_to_the_same_records() {
    let mut state = state_with_standup();
    state.begin_edit(None).unwrap();
    state.update_draft(
        DraftPatch::name("Dentist")
            .with_description("Bring card, \"insurance\"")
            .with_category(Category::Personal),
    );
    state.update_draft(DraftPatch::times(time(16, 0), time(16, 45)));
    state.commit().unwrap();

    let payload = state.export(ExportFormat::Json).unwrap();
    let records = export::parse_json(&payload.body).unwrap();

    assert_eq!(payload.file_name, "events-2024-6.json");
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].name, "Dentist");
    assert_eq!(records[1].category, Category::Personal);
}

#[test]
fn state_survives_a_reopen_of_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daybook.db");
    let state = state_with_standup();

    {
        let mut store = SqliteStore::open(&path).unwrap();
        save_state(&mut store, &state).unwrap();
    }

    let store = SqliteStore::open(&path).unwrap();
    let restored = load_state(&store, NaiveDate::from_ymd_opt(2030, 1, 1).unwrap());

    assert_eq!(restored.current_date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    assert_eq!(restored.selected_date, Some(june_2()));
    assert_eq!(restored.events, state.events);
}
