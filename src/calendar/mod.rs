pub mod draft;
pub mod error;
pub mod event;
pub mod export;
pub mod filter;
pub mod overlap;
pub mod store;

pub use draft::{Draft, DraftPatch};
pub use error::{CommitError, OverlapError, TimeField, ValidationError};
pub use event::{Category, Event, EventId};
pub use export::{ExportError, ExportFormat, ExportPayload, ExportRecord};
pub use store::EventStore;
