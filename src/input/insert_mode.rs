use crossterm::event::KeyCode;

use crate::app::{AppState, FormField};
use crate::calendar::DraftPatch;

const TIME_INPUT_MAX: usize = 5;

pub fn handle_key(key: KeyCode, state: &mut AppState) {
    let Some(field) = state.event_form.as_ref().map(|f| f.active_field.clone()) else {
        return;
    };

    match key {
        KeyCode::Esc => state.cancel(),
        KeyCode::Enter => save(state),
        KeyCode::Tab => {
            flush_times(state);
            if let Some(form) = state.event_form.as_mut() {
                form.next_field();
            }
        }
        KeyCode::BackTab => {
            flush_times(state);
            if let Some(form) = state.event_form.as_mut() {
                form.prev_field();
            }
        }
        KeyCode::Left if field == FormField::Category => cycle_category(state, false),
        KeyCode::Right if field == FormField::Category => cycle_category(state, true),
        KeyCode::Backspace => backspace(state, &field),
        KeyCode::Char(c) => type_char(state, &field, c),
        _ => {}
    }
}

fn save(state: &mut AppState) {
    flush_times(state);
    match state.commit() {
        Ok(event) => state.set_info(format!("Saved \"{}\" ({})", event.name, event.time_range_label())),
        Err(e) => state.set_error(e.to_string()),
    }
}

fn flush_times(state: &mut AppState) {
    if let Some(patch) = state.event_form.as_ref().map(|f| f.time_patch()) {
        state.update_draft(patch);
    }
}

fn cycle_category(state: &mut AppState, forward: bool) {
    let Some(current) = state.draft.as_ref().map(|d| d.category) else {
        return;
    };
    let category = if forward { current.next() } else { current.prev() };
    state.update_draft(DraftPatch::default().with_category(category));
}

fn backspace(state: &mut AppState, field: &FormField) {
    match field {
        FormField::Name => {
            if let Some(mut name) = state.draft.as_ref().map(|d| d.name.clone()) {
                name.pop();
                state.update_draft(DraftPatch::name(name));
            }
        }
        FormField::Description => {
            if let Some(mut description) = state.draft.as_ref().map(|d| d.description.clone()) {
                description.pop();
                state.update_draft(DraftPatch::default().with_description(description));
            }
        }
        FormField::StartTime => {
            if let Some(form) = state.event_form.as_mut() {
                form.start_input.pop();
            }
        }
        FormField::EndTime => {
            if let Some(form) = state.event_form.as_mut() {
                form.end_input.pop();
            }
        }
        FormField::Category => {}
    }
}

fn type_char(state: &mut AppState, field: &FormField, c: char) {
    match field {
        FormField::Name => {
            if let Some(mut name) = state.draft.as_ref().map(|d| d.name.clone()) {
                name.push(c);
                state.update_draft(DraftPatch::name(name));
            }
        }
        FormField::Description => {
            if let Some(mut description) = state.draft.as_ref().map(|d| d.description.clone()) {
                description.push(c);
                state.update_draft(DraftPatch::default().with_description(description));
            }
        }
        FormField::StartTime | FormField::EndTime => {
            if !(c.is_ascii_digit() || c == ':') {
                return;
            }
            if let Some(form) = state.event_form.as_mut() {
                let buffer = if *field == FormField::StartTime {
                    &mut form.start_input
                } else {
                    &mut form.end_input
                };
                if buffer.len() < TIME_INPUT_MAX {
                    buffer.push(c);
                }
            }
        }
        FormField::Category => {
            if c == ' ' {
                cycle_category(state, true);
            }
        }
    }
}
