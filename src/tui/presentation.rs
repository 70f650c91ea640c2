use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use daybook::{
    app::{AppState, Mode, StatusMessage},
    storage::config::UiConfig,
};
use crate::tui::{calendar_views, dialogs};

pub fn ui(f: &mut Frame, app: &AppState, ui_config: &UiConfig) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55),
            Constraint::Percentage(45),
        ])
        .split(main_chunks[1]);

    let title_text = format!("daybook - {} - {:?} Mode",
        app.current_month.format("%B %Y"),
        app.mode
    );

    let title = Paragraph::new(title_text)
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, main_chunks[0]);

    calendar_views::month::render(f, app, content_chunks[0]);
    calendar_views::event_list::render(f, app, content_chunks[1], &ui_config.date_format);

    let (status_text, status_color) = match (&app.mode, &app.status) {
        (Mode::Command, _) => (app.command_buffer.clone(), app.theme.status_bar),
        (_, Some(StatusMessage::Error(message))) => (message.clone(), app.theme.error),
        (_, Some(StatusMessage::Info(message))) => (message.clone(), app.theme.success),
        (_, None) => (
            format!("Events: {} | Press 'q' to quit, '?' for help", app.events.len()),
            app.theme.status_bar,
        ),
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(if matches!(app.mode, Mode::Command) { Alignment::Left } else { Alignment::Center })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, main_chunks[2]);

    if app.show_help {
        dialogs::help::render(f, app);
    }

    if app.event_form.is_some() {
        dialogs::event_form::render(f, app);
    }

    if app.delete_confirmation_event_id.is_some() {
        dialogs::delete_confirmation::render(f, app);
    }
}
