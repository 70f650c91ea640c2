use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use chrono::Datelike;
use daybook::{
    app::AppState,
    ui::month_view,
};

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub fn render(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let layout = month_view::calculate_layout(app);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                app.current_month.format("%B %Y").to_string(),
                Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(
            WEEKDAYS
                .iter()
                .map(|day| Span::styled(format!(" {} ", day), Style::default().fg(app.theme.weekday_header)))
                .collect::<Vec<_>>(),
        ),
    ];

    for week in &layout.weeks {
        let mut day_spans = Vec::new();

        for day_cell in &week.days {
            let Some(date) = day_cell.date else {
                day_spans.push(Span::raw("     "));
                continue;
            };

            let mut style = Style::default();

            if day_cell.is_selected {
                style = style.bg(app.theme.selected_bg).fg(app.theme.selected_fg).add_modifier(Modifier::BOLD);
            } else if day_cell.is_today {
                style = style.fg(app.theme.today).add_modifier(Modifier::BOLD);
            }

            if day_cell.has_events {
                style = style.add_modifier(Modifier::UNDERLINED);
            }

            day_spans.push(Span::styled(format!(" {:>2}  ", date.day()), style));
        }

        lines.push(Line::from(day_spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("hjkl", Style::default().fg(Color::Cyan)),
        Span::raw(" = Select day | "),
        Span::styled("{ }", Style::default().fg(Color::Cyan)),
        Span::raw(" = Prev/next month | "),
        Span::styled("a", Style::default().fg(Color::Green)),
        Span::raw(" = Add event"),
    ]));

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}
