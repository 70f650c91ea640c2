use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use daybook::app::{AppState, FormField};

pub fn render(f: &mut Frame, app: &AppState) {
    let (Some(form), Some(draft)) = (&app.event_form, &app.draft) else {
        return;
    };

    let area = f.size();
    let form_width = 70;
    let form_height = 18;
    let x = (area.width.saturating_sub(form_width)) / 2;
    let y = (area.height.saturating_sub(form_height)) / 2;

    let form_area = ratatui::layout::Rect {
        x,
        y,
        width: form_width.min(area.width),
        height: form_height.min(area.height),
    };

    f.render_widget(Clear, form_area);

    let active_color = app.theme.selected_bg;
    let inactive_color = Color::DarkGray;
    let label_style = |field: FormField| {
        Style::default().fg(if form.active_field == field { active_color } else { inactive_color })
    };

    let form_title = if draft.is_editing() { "Edit Event" } else { "Add New Event" };
    let date_text = app
        .selected_date
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "(none)".to_string());

    let form_text = vec![
        Line::from(vec![Span::styled(form_title, Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Name: ", label_style(FormField::Name)),
            Span::raw(&draft.name),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Date: ", Style::default().fg(inactive_color)),
            Span::raw(date_text),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Start Time: ", label_style(FormField::StartTime)),
            Span::raw(&form.start_input),
            Span::styled(
                if form.active_field == FormField::StartTime { " (HH:MM or HHMM)" } else { "" },
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(vec![
            Span::styled("End Time: ", label_style(FormField::EndTime)),
            Span::raw(&form.end_input),
            Span::styled(
                if form.active_field == FormField::EndTime { " (HH:MM or HHMM)" } else { "" },
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Description: ", label_style(FormField::Description)),
            Span::raw(&draft.description),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Category: ", label_style(FormField::Category)),
            Span::styled(
                format!("< {} >", draft.category.label()),
                Style::default().fg(app.theme.category_color(draft.category)),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Tab", Style::default().fg(Color::Cyan)),
            Span::raw(" = Next field | "),
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(" = Save | "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" = Cancel"),
        ]),
    ];

    let block_title = if draft.is_editing() { " Edit Event " } else { " New Event " };

    let form_paragraph = Paragraph::new(form_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(block_title)
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(form_paragraph, form_area);
}
