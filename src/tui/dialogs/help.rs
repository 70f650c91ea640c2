use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use daybook::app::AppState;

pub fn render(f: &mut Frame, app: &AppState) {
    let area = f.size();
    let help_width = 60;
    let help_height = 23;
    let x = (area.width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = ratatui::layout::Rect {
        x,
        y,
        width: help_width.min(area.width),
        height: help_height.min(area.height),
    };

    f.render_widget(Clear, help_area);

    let section = Style::default().fg(app.theme.help_section);

    let help_text = vec![
        Line::from(vec![Span::styled("daybook Help", Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![Span::styled("Navigation:", section)]),
        Line::from("  h/l      - Previous/next day"),
        Line::from("  j/k      - Next/previous week"),
        Line::from("  t        - Jump to today"),
        Line::from("  { / }    - Previous/next month"),
        Line::from("  Esc      - Close the event sidebar"),
        Line::from(""),
        Line::from(vec![Span::styled("Events:", section)]),
        Line::from("  a        - Add event on the selected day"),
        Line::from("  J/K      - Select next/previous event"),
        Line::from("  e/Enter  - Edit selected event"),
        Line::from("  x        - Delete selected event"),
        Line::from("  /        - Search by name or description"),
        Line::from(""),
        Line::from(vec![Span::styled("Event Form:", section)]),
        Line::from("  Tab      - Next field (Shift-Tab back)"),
        Line::from("  Left/Right - Change category"),
        Line::from("  Enter    - Save"),
        Line::from("  Esc      - Cancel"),
        Line::from(""),
        Line::from(vec![Span::styled("Commands:", section)]),
        Line::from("  :q       - Quit"),
        Line::from("  :export  - Export month (:export json | :export csv)"),
        Line::from("  :goto    - Jump to date (:goto 2025-12-25)"),
        Line::from("  :today   - Jump to today"),
        Line::from("  :new     - Create event (:new [Meeting name])"),
        Line::from("  :theme   - Change theme (:theme gruvbox)"),
        Line::from("  :help    - Show this help"),
        Line::from(""),
    ];

    let visible_lines = help_height.saturating_sub(3) as usize;
    let total_lines = help_text.len();
    let max_scroll = total_lines.saturating_sub(visible_lines);
    let scroll = app.help_scroll.min(max_scroll);

    let scrolled_text: Vec<Line> = help_text
        .into_iter()
        .skip(scroll)
        .take(visible_lines)
        .collect();

    let help_paragraph = Paragraph::new(scrolled_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!(" Help (j/k to scroll, q to close) [{}/{}] ", scroll + 1, total_lines))
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(help_paragraph, help_area);
}
