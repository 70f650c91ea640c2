use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of an [`Event`], assigned once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Work,
    Personal,
    Other,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Work, Category::Personal, Category::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Personal => "personal",
            Category::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::Other => "Other",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Category::Work => Category::Personal,
            Category::Personal => Category::Other,
            Category::Other => Category::Work,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Category::Work => Category::Other,
            Category::Personal => Category::Work,
            Category::Other => Category::Personal,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled item on a single calendar day.
///
/// Times are local wall-clock times at minute granularity. The wire form uses
/// camelCase keys (`startTime`, `endTime`) and `HH:MM` times. Records without
/// an `id` receive a fresh one when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub id: EventId,
    pub name: String,
    #[serde(with = "day_format")]
    pub date: NaiveDate,
    #[serde(with = "clock_format")]
    pub start_time: NaiveTime,
    #[serde(with = "clock_format")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
}

impl Event {
    pub fn new(name: impl Into<String>, date: NaiveDate, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            id: EventId::new(),
            name: name.into(),
            date,
            start_time,
            end_time,
            description: String::new(),
            category: Category::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn start_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    pub fn end_at(&self) -> NaiveDateTime {
        self.date.and_time(self.end_time)
    }

    /// Half-open intersection on the same date; touching boundaries do not
    /// overlap.
    pub fn overlaps(&self, other: &Event) -> bool {
        self.date == other.date && self.start_at() < other.end_at() && other.start_at() < self.end_at()
    }

    pub fn time_range_label(&self) -> String {
        format!("{} - {}", format_clock(self.start_time), format_clock(self.end_time))
    }
}

pub fn format_clock(time: NaiveTime) -> String {
    time.format(clock_format::FORMAT).to_string()
}

/// Parses loose clock input such as `9`, `930`, `0930` or `09:30`.
pub fn parse_time(input: &str) -> Option<NaiveTime> {
    let digits = input.trim().replace(':', "");
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let num: u32 = digits.parse().ok()?;
    match digits.len() {
        1 | 2 => NaiveTime::from_hms_opt(num, 0, 0),
        3 | 4 => NaiveTime::from_hms_opt(num / 100, num % 100, 0),
        _ => None,
    }
}

pub mod day_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub const FORMAT: &str = "%Y-%m-%d";
    const LEGACY_FORMAT: &str = "%m/%d/%Y";

    pub fn parse(value: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(value, FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(value, LEGACY_FORMAT))
            .ok()
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid date '{}'", raw)))
    }
}

pub mod clock_format {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(|_| D::Error::custom(format!("invalid time '{}'", raw)))
    }
}
