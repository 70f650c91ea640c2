use std::path::Path;

use chrono::NaiveDate;
use crossterm::event::KeyCode;

use crate::app::{AppState, Mode};
use crate::calendar::{DraftPatch, ExportFormat};
use crate::ui::theme::Theme;

#[derive(Debug, PartialEq)]
pub enum Command {
    Quit,
    Export(ExportFormat),
    Goto(NaiveDate),
    Today,
    NewEvent(Option<String>),
    Theme(String),
    Help,
    Error(String),
}

#[derive(Debug, PartialEq)]
pub enum CommandOutcome {
    Continue,
    Quit,
}

pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();

    let Some(command_text) = trimmed.strip_prefix(':') else {
        return Command::Error("Commands must start with ':'".to_string());
    };

    let parts: Vec<&str> = command_text.split_whitespace().collect();

    if parts.is_empty() {
        return Command::Error("Empty command".to_string());
    }

    match parts[0] {
        "q" | "quit" => Command::Quit,
        "help" => Command::Help,
        "today" => Command::Today,
        "export" => match parts.get(1) {
            None => Command::Error("export requires a format (json or csv)".to_string()),
            Some(format) => match format.parse() {
                Ok(format) => Command::Export(format),
                Err(e) => Command::Error(e),
            },
        },
        "goto" => {
            if parts.len() < 2 {
                Command::Error("goto requires a date argument".to_string())
            } else if let Ok(date) = NaiveDate::parse_from_str(parts[1], "%Y-%m-%d") {
                Command::Goto(date)
            } else {
                Command::Error(format!("Invalid date format: {}", parts[1]))
            }
        }
        "new" => {
            if parts.len() < 2 {
                Command::NewEvent(None)
            } else {
                Command::NewEvent(Some(parts[1..].join(" ")))
            }
        }
        "theme" => {
            if parts.len() < 2 {
                Command::Error("theme requires a theme name".to_string())
            } else {
                Command::Theme(parts[1].to_string())
            }
        }
        _ => Command::Error(format!("Unknown command: {}", parts[0])),
    }
}

pub fn handle_key(key: KeyCode, state: &mut AppState, export_dir: &Path) -> CommandOutcome {
    match key {
        KeyCode::Enter => {
            let cmd = parse_command(&state.command_buffer);
            state.command_buffer.clear();
            state.mode = Mode::Normal;
            execute(cmd, state, export_dir)
        }
        KeyCode::Esc => {
            state.command_buffer.clear();
            state.mode = Mode::Normal;
            CommandOutcome::Continue
        }
        KeyCode::Backspace => {
            state.command_buffer.pop();
            if state.command_buffer.is_empty() {
                state.mode = Mode::Normal;
            }
            CommandOutcome::Continue
        }
        KeyCode::Char(c) => {
            state.command_buffer.push(c);
            CommandOutcome::Continue
        }
        _ => CommandOutcome::Continue,
    }
}

pub fn execute(cmd: Command, state: &mut AppState, export_dir: &Path) -> CommandOutcome {
    match cmd {
        Command::Quit => return CommandOutcome::Quit,
        Command::Export(format) => {
            let written = state
                .export(format)
                .and_then(|payload| payload.write_to(export_dir));
            match written {
                Ok(path) => state.set_info(format!("Exported to {}", path.display())),
                Err(e) => {
                    tracing::error!("Export failed: {}", e);
                    state.set_error(format!("Export failed: {}", e));
                }
            }
        }
        Command::Goto(date) => state.goto(date),
        Command::Today => state.jump_to_today(),
        Command::NewEvent(name) => {
            if state.selected_date.is_none() {
                state.set_error("Select a date before saving an event.");
            } else if let Err(e) = state.begin_edit(None) {
                state.set_error(e.to_string());
            } else if let Some(name) = name {
                state.update_draft(DraftPatch::name(name));
            }
        }
        Command::Theme(name) => {
            state.theme = Theme::get_by_name(&name);
            state.set_info(format!("Theme: {}", state.theme.name));
        }
        Command::Help => state.show_help = !state.show_help,
        Command::Error(message) => state.set_error(message),
    }
    CommandOutcome::Continue
}
