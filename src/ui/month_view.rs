use chrono::{Datelike, Months, NaiveDate};
use crate::app::AppState;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub days: Vec<DayCell>,
}

/// One grid cell. Padding cells before day 1 and after the last day carry no date.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: Option<NaiveDate>,
    pub is_selected: bool,
    pub is_today: bool,
    pub has_events: bool,
}

impl DayCell {
    pub fn blank() -> Self {
        Self::new(None)
    }

    pub fn new(date: Option<NaiveDate>) -> Self {
        Self {
            date,
            is_selected: false,
            is_today: false,
            has_events: false,
        }
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.is_selected = selected;
        self
    }

    pub fn with_today(mut self, today: bool) -> Self {
        self.is_today = today;
        self
    }

    pub fn with_events(mut self, has_events: bool) -> Self {
        self.has_events = has_events;
        self
    }
}

/// Blank cells before day 1 in a Monday-first week.
pub fn leading_blanks(first_day: NaiveDate) -> u32 {
    (first_day.weekday().num_days_from_sunday() + 6) % 7
}

pub fn last_day_of_month(first_day: NaiveDate) -> Option<NaiveDate> {
    first_day
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
}

pub fn calculate_layout(state: &AppState) -> MonthLayout {
    calculate_layout_for(state, chrono::Local::now().date_naive())
}

pub fn calculate_layout_for(state: &AppState, today: NaiveDate) -> MonthLayout {
    let (year, month) = state.year_month();

    let Some(first_day) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return MonthLayout { year, month, weeks: Vec::new() };
    };
    let Some(last_day) = last_day_of_month(first_day) else {
        return MonthLayout { year, month, weeks: Vec::new() };
    };

    let mut cells: Vec<DayCell> = (0..leading_blanks(first_day)).map(|_| DayCell::blank()).collect();

    for day in first_day.iter_days().take_while(|d| *d <= last_day) {
        cells.push(
            DayCell::new(Some(day))
                .with_selected(state.selected_date == Some(day))
                .with_today(day == today)
                .with_events(state.events.has_events_on(day)),
        );
    }

    while cells.len() % 7 != 0 {
        cells.push(DayCell::blank());
    }

    let weeks = cells
        .chunks(7)
        .map(|chunk| Week { days: chunk.to_vec() })
        .collect();

    MonthLayout { year, month, weeks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use crate::calendar::{Event, EventStore};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn state_for(month_date: NaiveDate) -> AppState {
        AppState::restore(EventStore::new(), month_date, None)
    }

    fn dated_cells(layout: &MonthLayout) -> Vec<&DayCell> {
        layout.weeks.iter().flat_map(|w| &w.days).filter(|c| c.date.is_some()).collect()
    }

    #[test]
    fn month_layout_has_correct_year_and_month() {
        let layout = calculate_layout(&state_for(date(2025, 1, 15)));

        assert_eq!(layout.year, 2025);
        assert_eq!(layout.month, 1);
    }

    #[test]
    fn leading_blanks_align_to_monday() {
        // June 2024 starts on a Saturday, September 2024 on a Sunday, July 2024 on a Monday.
        assert_eq!(leading_blanks(date(2024, 6, 1)), 5);
        assert_eq!(leading_blanks(date(2024, 9, 1)), 6);
        assert_eq!(leading_blanks(date(2024, 7, 1)), 0);
    }

    #[test]
    fn first_week_starts_with_blanks() {
        let layout = calculate_layout(&state_for(date(2024, 6, 10)));

        let first_week = &layout.weeks[0];
        assert!(first_week.days[..5].iter().all(|c| c.date.is_none()));
        assert_eq!(first_week.days[5].date, Some(date(2024, 6, 1)));
    }

    #[test]
    fn layout_contains_every_day_of_month() {
        let layout = calculate_layout(&state_for(date(2024, 2, 1)));

        assert_eq!(dated_cells(&layout).len(), 29);
    }

    #[test]
    fn each_week_has_seven_days() {
        let layout = calculate_layout(&state_for(date(2025, 1, 15)));

        for week in &layout.weeks {
            assert_eq!(week.days.len(), 7);
        }
    }

    #[test]
    fn selected_date_is_marked_in_layout() {
        let mut state = state_for(date(2025, 1, 1));
        state.select_date(date(2025, 1, 15));

        let layout = calculate_layout(&state);

        let selected: Vec<_> = dated_cells(&layout).into_iter().filter(|c| c.is_selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].date, Some(date(2025, 1, 15)));
    }

    #[test]
    fn today_is_marked() {
        let state = state_for(date(2025, 1, 1));

        let layout = calculate_layout_for(&state, date(2025, 1, 20));

        let today: Vec<_> = dated_cells(&layout).into_iter().filter(|c| c.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, Some(date(2025, 1, 20)));
    }

    #[test]
    fn cells_with_events_are_marked() {
        let mut state = state_for(date(2025, 1, 1));
        let event_date = date(2025, 1, 10);
        state.events.add(Event::new(
            "Event",
            event_date,
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        ));

        let layout = calculate_layout(&state);

        let marked: Vec<_> = dated_cells(&layout).into_iter().filter(|c| c.has_events).collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].date, Some(event_date));
    }
}
