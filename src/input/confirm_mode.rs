use crossterm::event::KeyCode;

use crate::app::{AppState, Mode};

pub fn handle_key(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(id) = state.delete_confirmation_event_id.take() {
                match state.delete_event(id) {
                    Some(event) => state.set_info(format!("Deleted \"{}\"", event.name)),
                    None => state.set_error("Event no longer exists."),
                }
            }
            state.mode = Mode::Normal;
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.delete_confirmation_event_id = None;
            state.mode = Mode::Normal;
        }
        _ => {}
    }
}
