use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::event::{Category, Event, clock_format, day_format, format_clock};
use crate::calendar::store::EventStore;

const CSV_HEADER: [&str; 6] = ["Name", "Date", "Start Time", "End Time", "Description", "Category"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("Unknown export format: {} (expected json or csv)", other)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// The exported shape of an event: every user-visible field, no id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub name: String,
    #[serde(with = "day_format")]
    pub date: NaiveDate,
    #[serde(with = "clock_format")]
    pub start_time: NaiveTime,
    #[serde(with = "clock_format")]
    pub end_time: NaiveTime,
    pub description: String,
    pub category: Category,
}

impl From<&Event> for ExportRecord {
    fn from(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            date: event.date,
            start_time: event.start_time,
            end_time: event.end_time,
            description: event.description.clone(),
            category: event.category,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportPayload {
    pub file_name: String,
    pub mime_type: &'static str,
    pub body: String,
}

impl ExportPayload {
    /// Writes the payload into `dir`, creating the directory if needed.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.body)?;
        tracing::info!("Exported {} bytes to {}", self.body.len(), path.display());
        Ok(path)
    }
}

pub fn file_name(year: i32, month: u32, format: ExportFormat) -> String {
    format!("events-{}-{}.{}", year, month, format.extension())
}

pub fn export<'a, I>(events: I, format: ExportFormat) -> Result<String, ExportError>
where
    I: IntoIterator<Item = &'a Event>,
{
    match format {
        ExportFormat::Json => to_json(events),
        ExportFormat::Csv => Ok(to_csv(events)),
    }
}

pub fn export_month(store: &EventStore, year: i32, month: u32, format: ExportFormat) -> Result<ExportPayload, ExportError> {
    let body = export(store.for_month(year, month), format)?;
    Ok(ExportPayload {
        file_name: file_name(year, month, format),
        mime_type: format.mime_type(),
        body,
    })
}

pub fn to_json<'a, I>(events: I) -> Result<String, ExportError>
where
    I: IntoIterator<Item = &'a Event>,
{
    let records: Vec<ExportRecord> = events.into_iter().map(ExportRecord::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

pub fn parse_json(body: &str) -> Result<Vec<ExportRecord>, ExportError> {
    Ok(serde_json::from_str(body)?)
}

pub fn to_csv<'a, I>(events: I) -> String
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut lines = vec![CSV_HEADER.join(",")];
    for event in events {
        let date = event.date.format(day_format::FORMAT).to_string();
        let start = format_clock(event.start_time);
        let end = format_clock(event.end_time);
        let row = [
            csv_field(&event.name),
            csv_field(&date),
            csv_field(&start),
            csv_field(&end),
            csv_field(&event.description),
            csv_field(event.category.as_str()),
        ];
        lines.push(row.join(","));
    }
    lines.join("\n")
}

// RFC 4180: quote when the value holds a delimiter, quote or line break.
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn sample_store() -> EventStore {
        let mut store = EventStore::new();
        store.add(Event::new("Standup", june(2), time(9, 0), time(9, 30)).with_description("daily"));
        store.add(
            Event::new("Dentist", june(14), time(15, 0), time(16, 0))
                .with_category(Category::Personal),
        );
        store.add(Event::new("Offsite", NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(), time(9, 0), time(17, 0)));
        store
    }

    #[test]
    fn file_name_uses_one_based_month() {
        assert_eq!(file_name(2024, 6, ExportFormat::Json), "events-2024-6.json");
        assert_eq!(file_name(2024, 12, ExportFormat::Csv), "events-2024-12.csv");
    }

    #[test]
    fn format_metadata() {
        assert_eq!(ExportFormat::Json.mime_type(), "application/json");
        assert_eq!(ExportFormat::Csv.mime_type(), "text/csv");
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert!("xml".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn json_export_keeps_field_order_and_indentation() {
        let store = sample_store();

        let body = to_json(store.for_date(june(2))).unwrap();

        let expected = r#"[
  {
    "name": "Standup",
    "date": "2024-06-02",
    "startTime": "09:00",
    "endTime": "09:30",
    "description": "daily",
    "category": "work"
  }
]"#;
        assert_eq!(body, expected);
    }

    #[test]
    fn json_round_trip_preserves_month_events_in_order() {
        let store = sample_store();

        let payload = export_month(&store, 2024, 6, ExportFormat::Json).unwrap();
        let parsed = parse_json(&payload.body).unwrap();

        let expected: Vec<ExportRecord> = store.for_month(2024, 6).map(ExportRecord::from).collect();
        assert_eq!(parsed, expected);
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn csv_export_writes_header_and_rows() {
        let store = sample_store();

        let payload = export_month(&store, 2024, 6, ExportFormat::Csv).unwrap();

        let expected = "Name,Date,Start Time,End Time,Description,Category\n\
                        Standup,2024-06-02,09:00,09:30,daily,work\n\
                        Dentist,2024-06-14,15:00,16:00,,personal";
        assert_eq!(payload.body, expected);
        assert_eq!(payload.mime_type, "text/csv");
        assert_eq!(payload.file_name, "events-2024-6.csv");
    }

    #[test]
    fn csv_quotes_fields_with_delimiters() {
        let events = vec![
            Event::new("Lunch, maybe", june(3), time(12, 0), time(13, 0))
                .with_description("say \"hi\"\nto Bob"),
        ];

        let body = to_csv(&events);

        let row = body.split_once('\n').map(|(_, rest)| rest).unwrap();
        assert_eq!(row, "\"Lunch, maybe\",2024-06-03,12:00,13:00,\"say \"\"hi\"\"\nto Bob\",work");
    }

    #[test]
    fn empty_month_exports_empty_array_or_header_only() {
        let store = sample_store();

        let json = export_month(&store, 2024, 1, ExportFormat::Json).unwrap();
        let csv = export_month(&store, 2024, 1, ExportFormat::Csv).unwrap();

        assert_eq!(json.body, "[]");
        assert_eq!(csv.body, "Name,Date,Start Time,End Time,Description,Category");
    }

    #[test]
    fn payload_is_written_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = sample_store();
        let payload = export_month(&store, 2024, 6, ExportFormat::Json).unwrap();

        let path = payload.write_to(&dir.path().join("exports")).unwrap();

        assert!(path.ends_with("events-2024-6.json"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), payload.body);
    }
}
