use std::{
    env,
    io::{self, Write},
    process::{Command, Stdio},
};

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};

use daybook::{
    calendar::{Event, ExportFormat, export},
    storage::{
        config::Config,
        persistence::{SqliteStore, load_state},
    },
};

const USAGE: &str = "Usage: daybook [--sample] [--agenda [YYYY-MM-DD]] [--export json|csv [YYYY-MM]]";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CliMode {
    Default { sample: bool },
    Export { format: ExportFormat, month: Option<(i32, u32)> },
    AgendaDate(NaiveDate),
}

pub fn usage() -> &'static str {
    USAGE
}

pub fn parse_cli_mode() -> Result<CliMode, String> {
    parse_args(env::args().skip(1), Local::now().date_naive())
}

fn parse_args<I: IntoIterator<Item = String>>(args: I, today: NaiveDate) -> Result<CliMode, String> {
    let mut sample = false;
    let mut agenda_date = None;
    let mut export_request = None;
    let mut args = args.into_iter().peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--sample" => {
                sample = true;
            }
            "--agenda" => {
                let target_date = match args.next_if(|next| !next.starts_with("--")) {
                    Some(date_str) => daybook::calendar::event::day_format::parse(&date_str)
                        .ok_or_else(|| format!("Invalid date '{}'. Use YYYY-MM-DD.", date_str))?,
                    None => today,
                };
                agenda_date = Some(target_date);
            }
            "--export" => {
                let format: ExportFormat = args
                    .next()
                    .ok_or_else(|| "--export requires a format (json or csv)".to_string())?
                    .parse()?;
                let month = match args.next_if(|next| !next.starts_with("--")) {
                    Some(month_str) => Some(parse_year_month(&month_str)?),
                    None => None,
                };
                export_request = Some((format, month));
            }
            "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    if let Some((format, month)) = export_request {
        Ok(CliMode::Export { format, month })
    } else if let Some(date) = agenda_date {
        Ok(CliMode::AgendaDate(date))
    } else {
        Ok(CliMode::Default { sample })
    }
}

fn parse_year_month(raw: &str) -> Result<(i32, u32), String> {
    NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d")
        .map(|date| (date.year(), date.month()))
        .map_err(|_| format!("Invalid month '{}'. Use YYYY-MM.", raw))
}

pub fn run_export_mode(config: &Config, format: ExportFormat, month: Option<(i32, u32)>) -> Result<()> {
    let store = SqliteStore::open(&config.storage.database_path)
        .with_context(|| format!("opening {}", config.storage.database_path.display()))?;
    let state = load_state(&store, Local::now().date_naive());

    let (year, month) = month.unwrap_or((state.current_date.year(), state.current_date.month()));
    let payload = export::export_month(&state.events, year, month, format)?;
    let path = payload
        .write_to(&config.export.directory)
        .with_context(|| format!("writing export to {}", config.export.directory.display()))?;

    println!("{}", path.display());
    Ok(())
}

pub fn run_agenda_mode(config: &Config, date: NaiveDate) -> Result<()> {
    let store = SqliteStore::open(&config.storage.database_path)
        .with_context(|| format!("opening {}", config.storage.database_path.display()))?;
    let state = load_state(&store, Local::now().date_naive());

    let mut events: Vec<&Event> = state.events.for_date(date).collect();
    events.sort_by_key(|event| (event.start_time, event.end_time));

    let agenda = format_agenda_text(date, &events);
    display_with_pager(&agenda)?;
    Ok(())
}

fn format_agenda_text(date: NaiveDate, events: &[&Event]) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Agenda for {}", date.format("%A, %B %d, %Y")));
    lines.push(String::new());

    if events.is_empty() {
        lines.push("No events scheduled.".to_string());
    } else {
        for event in events {
            lines.push(format!("- {}", build_agenda_line(event)));
        }
    }

    lines.join("\n")
}

fn build_agenda_line(event: &Event) -> String {
    let mut line = format!("{:<13} {} [{}]", event.time_range_label(), event.name, event.category.label());
    if !event.description.is_empty() {
        line.push_str(&format!(" ({})", event.description));
    }
    line
}

fn display_with_pager(text: &str) -> Result<(), io::Error> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let cmd = match parts.next() {
        Some(c) => c,
        None => {
            println!("{text}");
            return Ok(());
        }
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd)
        .args(&args)
        .stdin(Stdio::piped())
        .spawn()
    {
        Ok(mut child) => {
            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes())?;
            }
            let _ = child.wait();
        }
        Err(_) => {
            println!("{text}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use daybook::calendar::Category;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_starts_tui() {
        assert_eq!(parse_args(args(&[]), today()), Ok(CliMode::Default { sample: false }));
        assert_eq!(parse_args(args(&["--sample"]), today()), Ok(CliMode::Default { sample: true }));
    }

    #[test]
    fn agenda_defaults_to_today() {
        assert_eq!(parse_args(args(&["--agenda"]), today()), Ok(CliMode::AgendaDate(today())));
        assert_eq!(
            parse_args(args(&["--agenda", "--sample"]), today()),
            Ok(CliMode::AgendaDate(today()))
        );
    }

    #[test]
    fn agenda_accepts_iso_and_legacy_dates() {
        let expected = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        assert_eq!(parse_args(args(&["--agenda", "2025-12-25"]), today()), Ok(CliMode::AgendaDate(expected)));
        assert_eq!(parse_args(args(&["--agenda", "12/25/2025"]), today()), Ok(CliMode::AgendaDate(expected)));
        assert!(parse_args(args(&["--agenda", "someday"]), today()).is_err());
    }

    #[test]
    fn export_parses_format_and_optional_month() {
        assert_eq!(
            parse_args(args(&["--export", "csv"]), today()),
            Ok(CliMode::Export { format: ExportFormat::Csv, month: None })
        );
        assert_eq!(
            parse_args(args(&["--export", "JSON", "2024-03"]), today()),
            Ok(CliMode::Export { format: ExportFormat::Json, month: Some((2024, 3)) })
        );
    }

    #[test]
    fn export_rejects_bad_input() {
        assert!(parse_args(args(&["--export"]), today()).is_err());
        assert!(parse_args(args(&["--export", "xml"]), today()).is_err());
        assert!(parse_args(args(&["--export", "csv", "2024-13"]), today()).is_err());
    }

    #[test]
    fn unknown_argument_is_rejected() {
        assert_eq!(parse_args(args(&["--verbose"]), today()), Err("Unknown argument: --verbose".to_string()));
    }

    #[test]
    fn agenda_text_lists_events() {
        let event = Event::new(
            "Standup",
            today(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(9, 15, 0).unwrap(),
        )
        .with_category(Category::Work)
        .with_description("Daily");

        let text = format_agenda_text(today(), &[&event]);

        assert!(text.starts_with("Agenda for Sunday, June 02, 2024"));
        assert!(text.contains("Standup [Work] (Daily)"));
    }

    #[test]
    fn empty_agenda_says_so() {
        assert!(format_agenda_text(today(), &[]).ends_with("No events scheduled."));
    }
}
