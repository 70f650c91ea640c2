use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use daybook::app::{AppState, Mode};

pub fn render(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect, date_format: &str) {
    let Some(selected_date) = app.selected_date else {
        let hint = Paragraph::new(vec![
            Line::from(Span::styled("No date selected", Style::default().fg(app.theme.muted))),
            Line::from(""),
            Line::from("Move with hjkl or press t for today."),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Events "));
        f.render_widget(hint, area);
        return;
    };

    let events = app.visible_events();

    let title = format!("Events on {}", selected_date.format(date_format));

    let mut lines = vec![
        Line::from(vec![
            Span::styled(title, Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)),
        ]),
    ];

    if app.mode == Mode::Search || !app.search_query.is_empty() {
        let cursor = if app.mode == Mode::Search { "_" } else { "" };
        lines.push(Line::from(vec![
            Span::styled("/", Style::default().fg(Color::Cyan)),
            Span::raw(format!("{}{}", app.search_query, cursor)),
        ]));
    }

    lines.push(Line::from(""));

    if events.is_empty() {
        let message = if app.search_query.is_empty() {
            "No events"
        } else {
            "No events match your search"
        };
        lines.push(Line::from(vec![
            Span::styled(message, Style::default().fg(app.theme.muted)),
        ]));
    } else {
        let selected_base = Style::default().bg(app.theme.selected_bg).add_modifier(Modifier::BOLD);

        for (idx, event) in events.iter().enumerate() {
            let is_selected = idx == app.selected_event_index;
            let category_color = app.theme.category_color(event.category);

            let (time_style, name_style) = if is_selected {
                (selected_base.fg(app.theme.selected_fg), selected_base.fg(app.theme.selected_fg))
            } else {
                (Style::default().fg(category_color), Style::default().fg(Color::White))
            };

            let cursor = if is_selected { ">" } else { " " };

            lines.push(Line::from(vec![
                Span::styled(cursor, Style::default().fg(app.theme.selected_bg)),
                Span::styled(event.time_range_label(), time_style),
                Span::raw(" "),
                Span::styled(&event.name, name_style),
                Span::raw(" "),
                Span::styled(format!("[{}]", event.category.label()), Style::default().fg(category_color)),
            ]));

            if !event.description.is_empty() {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(&event.description, Style::default().fg(app.theme.muted)),
                ]));
            }

            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![
            Span::styled("J/K", Style::default().fg(Color::Cyan)),
            Span::raw(" = Navigate | "),
            Span::styled("e", Style::default().fg(Color::Green)),
            Span::raw(" = Edit | "),
            Span::styled("x", Style::default().fg(Color::Red)),
            Span::raw(" = Delete"),
        ]));
    }

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}
