use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use rusqlite::{Connection, OptionalExtension, Result as SqliteResult};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::app::AppState;
use crate::calendar::EventStore;
use crate::calendar::event::day_format;

pub const CURRENT_DATE_KEY: &str = "currentDate";
pub const SELECTED_DATE_KEY: &str = "selectedDate";
pub const EVENTS_KEY: &str = "events";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Failed to prepare storage location: {0}")]
    IoError(#[from] std::io::Error),
}

/// Durable string-keyed storage for the widget state.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let store = Self::new(Connection::open(path)?);
        store.initialize()?;
        Ok(store)
    }

    pub fn initialize(&self) -> Result<(), StorageError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    pub fn table_exists(&self, table_name: &str) -> bool {
        let result: SqliteResult<i32> = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            [table_name],
            |row| row.get(0),
        );
        result.unwrap_or(0) > 0
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersistedState {
    pub current_date: NaiveDate,
    pub selected_date: Option<NaiveDate>,
    pub events: EventStore,
}

impl PersistedState {
    pub fn into_app_state(self) -> AppState {
        AppState::restore(self.events, self.current_date, self.selected_date)
    }
}

fn read_raw<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("Failed to read {} from storage: {}", key, e);
            None
        }
    }
}

/// Reads and decodes `key`, falling back to `default` when it is absent or
/// malformed. Malformed data is logged, never surfaced.
pub fn load_or_default<T, S>(store: &S, key: &str, default: T) -> T
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = read_raw(store, key) else {
        return default;
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Error parsing stored data for {}: {}", key, e);
            default
        }
    }
}

/// Accepts JSON date strings as well as bare ISO timestamps and `M/D/YYYY`.
/// Timestamps carrying an offset are read as local dates.
pub fn parse_stored_date(raw: &str) -> Option<NaiveDate> {
    parse_stored_date_in(raw, &Local)
}

/// [`parse_stored_date`] with timestamps converted into `tz`.
pub fn parse_stored_date_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDate> {
    let value = raw.trim().trim_matches('"');
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(tz).date_naive());
    }
    value
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, day_format::FORMAT).ok())
        .or_else(|| day_format::parse(value))
}

fn load_date<S, Tz>(store: &S, key: &str, tz: &Tz) -> Option<NaiveDate>
where
    S: KeyValueStore + ?Sized,
    Tz: TimeZone,
{
    let raw = read_raw(store, key)?;
    if raw.trim() == "null" {
        return None;
    }
    let parsed = parse_stored_date_in(&raw, tz);
    if parsed.is_none() {
        tracing::warn!("Error parsing stored date for {}: {:?}", key, raw);
    }
    parsed
}

pub fn load_state<S: KeyValueStore + ?Sized>(store: &S, today: NaiveDate) -> PersistedState {
    load_state_in(store, today, &Local)
}

/// [`load_state`] reading stored timestamps in `tz`.
pub fn load_state_in<S, Tz>(store: &S, today: NaiveDate, tz: &Tz) -> PersistedState
where
    S: KeyValueStore + ?Sized,
    Tz: TimeZone,
{
    let state = PersistedState {
        current_date: load_date(store, CURRENT_DATE_KEY, tz).unwrap_or(today),
        selected_date: load_date(store, SELECTED_DATE_KEY, tz),
        events: load_or_default(store, EVENTS_KEY, EventStore::new()),
    };
    tracing::info!(
        "Loaded {} events, viewing {}, selected {:?}",
        state.events.len(),
        state.current_date,
        state.selected_date
    );
    state
}

/// Writes every persisted key. Keys are written independently; a failure on
/// one does not stop the others, and the first error is returned.
pub fn save_state<S: KeyValueStore + ?Sized>(store: &mut S, state: &AppState) -> Result<(), StorageError> {
    let entries = [
        (EVENTS_KEY, serde_json::to_string(&state.events)?),
        (CURRENT_DATE_KEY, serde_json::to_string(&state.current_month)?),
        (SELECTED_DATE_KEY, serde_json::to_string(&state.selected_date)?),
    ];

    let mut first_error = None;
    for (key, value) in &entries {
        if let Err(e) = store.set(key, value) {
            tracing::error!("Failed to save {}: {}", key, e);
            first_error.get_or_insert(e);
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
