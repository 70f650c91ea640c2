use chrono::{Local, NaiveTime};
use daybook::{
    app::AppState,
    calendar::{Category, Event},
};

pub fn add_sample_events(app: &mut AppState) {
    if !app.events.is_empty() {
        tracing::info!("Skipping sample events, calendar already has {} events", app.events.len());
        return;
    }

    let today = Local::now().date_naive();

    let Some(tomorrow) = today.succ_opt() else { return };
    let Some(yesterday) = today.pred_opt() else { return };

    let events = vec![
        ("Morning Standup", today, (9, 0), (9, 30), "", Category::Work),
        ("Team Sync", today, (14, 0), (15, 0), "Conference Room A", Category::Work),
        ("Code Review", tomorrow, (10, 0), (11, 0), "", Category::Work),
        ("Dentist", tomorrow, (16, 0), (16, 45), "Bring insurance card", Category::Personal),
        ("1-on-1 with Manager", yesterday, (11, 0), (11, 30), "", Category::Work),
        ("Lunch with Team", yesterday, (12, 30), (13, 30), "Downtown Cafe", Category::Other),
    ];

    for (name, date, (start_h, start_m), (end_h, end_m), description, category) in events {
        let Some(start) = NaiveTime::from_hms_opt(start_h, start_m, 0) else { continue };
        let Some(end) = NaiveTime::from_hms_opt(end_h, end_m, 0) else { continue };

        let event = Event::new(name, date, start, end)
            .with_description(description)
            .with_category(category);

        app.add_event(event);
    }
}
