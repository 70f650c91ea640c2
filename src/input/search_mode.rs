use crossterm::event::KeyCode;

use crate::app::{AppState, Mode};

pub fn handle_key(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Enter => state.mode = Mode::Normal,
        KeyCode::Esc => {
            state.search(String::new());
            state.mode = Mode::Normal;
        }
        KeyCode::Backspace => {
            let mut query = state.search_query.clone();
            query.pop();
            state.search(query);
        }
        KeyCode::Char(c) => {
            let query = format!("{}{}", state.search_query, c);
            state.search(query);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use crate::calendar::{Event, EventStore};

    fn setup_search_state() -> AppState {
        let day = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        let mut events = EventStore::new();
        for (name, hour) in [("Standup", 9), ("Lunch", 12)] {
            events.add(Event::new(
                name,
                day,
                NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(hour + 1, 0, 0).unwrap(),
            ));
        }
        let mut state = AppState::restore(events, day, Some(day));
        state.mode = Mode::Search;
        state
    }

    #[test]
    fn typing_filters_visible_events() {
        let mut state = setup_search_state();

        handle_key(KeyCode::Char('L'), &mut state);
        handle_key(KeyCode::Char('u'), &mut state);

        assert_eq!(state.search_query, "Lu");
        assert_eq!(state.visible_events().len(), 1);
    }

    #[test]
    fn backspace_widens_search() {
        let mut state = setup_search_state();
        state.search("Lx");

        handle_key(KeyCode::Backspace, &mut state);

        assert_eq!(state.search_query, "L");
    }

    #[test]
    fn enter_keeps_query() {
        let mut state = setup_search_state();
        state.search("stand");

        handle_key(KeyCode::Enter, &mut state);

        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.search_query, "stand");
    }

    #[test]
    fn esc_clears_query() {
        let mut state = setup_search_state();
        state.search("stand");

        handle_key(KeyCode::Esc, &mut state);

        assert_eq!(state.mode, Mode::Normal);
        assert!(state.search_query.is_empty());
        assert_eq!(state.visible_events().len(), 2);
    }
}
