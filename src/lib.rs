pub mod app;
pub mod calendar;
pub mod input;
pub mod storage;
pub mod ui;

pub use app::{AppState, Mode, StatusMessage};
pub use calendar::{Category, CommitError, Event, EventId, EventStore, ExportFormat};
