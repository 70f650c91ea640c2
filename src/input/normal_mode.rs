use crossterm::event::KeyCode;

use crate::app::{AppState, Mode};
use crate::calendar::ValidationError;

pub fn handle_key(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Char('h') | KeyCode::Left => state.move_selection_by_days(-1),
        KeyCode::Char('l') | KeyCode::Right => state.move_selection_by_days(1),
        KeyCode::Char('j') | KeyCode::Down => state.move_selection_by_days(7),
        KeyCode::Char('k') | KeyCode::Up => state.move_selection_by_days(-7),
        KeyCode::Char('J') => state.move_event_selection_down(),
        KeyCode::Char('K') => state.move_event_selection_up(),
        KeyCode::Char('{') | KeyCode::Char('[') => state.previous_month(),
        KeyCode::Char('}') | KeyCode::Char(']') => state.next_month(),
        KeyCode::Char('t') => state.jump_to_today(),
        KeyCode::Char('a') => add_event(state),
        KeyCode::Char('e') | KeyCode::Enter => edit_selected_event(state),
        KeyCode::Char('x') => confirm_delete_selected_event(state),
        KeyCode::Char('/') => enter_search_mode(state),
        KeyCode::Char(':') => enter_command_mode(state),
        KeyCode::Char('?') => state.show_help = !state.show_help,
        KeyCode::Esc => state.close_sidebar(),
        _ => {}
    }
}

fn add_event(state: &mut AppState) {
    if state.selected_date.is_none() {
        state.set_error(ValidationError::NoDateSelected.to_string());
        return;
    }
    if let Err(e) = state.begin_edit(None) {
        state.set_error(e.to_string());
    }
}

fn edit_selected_event(state: &mut AppState) {
    let Some(id) = state.selected_event().map(|e| e.id) else {
        return;
    };
    if let Err(e) = state.begin_edit(Some(id)) {
        state.set_error(e.to_string());
    }
}

fn confirm_delete_selected_event(state: &mut AppState) {
    if let Some(event) = state.selected_event() {
        state.delete_confirmation_event_id = Some(event.id);
        state.mode = Mode::Confirm;
    }
}

fn enter_search_mode(state: &mut AppState) {
    if state.selected_date.is_some() {
        state.mode = Mode::Search;
    }
}

fn enter_command_mode(state: &mut AppState) {
    state.mode = Mode::Command;
    state.command_buffer = ":".to_string();
}
