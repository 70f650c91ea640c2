use chrono::{Datelike, Days, Local, Months, NaiveDate};

use crate::calendar::{
    self, CommitError, Draft, DraftPatch, Event, EventId, EventStore, ExportError, ExportFormat,
    ExportPayload, event::format_clock,
};
use crate::ui::theme::Theme;

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,
    Insert,
    Search,
    Command,
    Confirm,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Name,
    StartTime,
    EndTime,
    Description,
    Category,
}

/// Cursor and raw text buffers of the event form. The typed values live in
/// the [`Draft`].
#[derive(Debug, Clone)]
pub struct EventForm {
    pub active_field: FormField,
    pub start_input: String,
    pub end_input: String,
}

impl EventForm {
    pub fn for_draft(draft: &Draft) -> Self {
        Self {
            active_field: FormField::Name,
            start_input: draft.start_time.map(format_clock).unwrap_or_default(),
            end_input: draft.end_time.map(format_clock).unwrap_or_default(),
        }
    }

    pub fn next_field(&mut self) {
        self.active_field = match self.active_field {
            FormField::Name => FormField::StartTime,
            FormField::StartTime => FormField::EndTime,
            FormField::EndTime => FormField::Description,
            FormField::Description => FormField::Category,
            FormField::Category => FormField::Name,
        };
    }

    pub fn prev_field(&mut self) {
        self.active_field = match self.active_field {
            FormField::Name => FormField::Category,
            FormField::StartTime => FormField::Name,
            FormField::EndTime => FormField::StartTime,
            FormField::Description => FormField::EndTime,
            FormField::Category => FormField::Description,
        };
    }

    /// Parses both time buffers into a patch; unparseable input clears the time.
    pub fn time_patch(&self) -> DraftPatch {
        DraftPatch {
            start_time: Some(calendar::event::parse_time(&self.start_input)),
            end_time: Some(calendar::event::parse_time(&self.end_input)),
            ..DraftPatch::default()
        }
    }
}

/// The whole widget state: the event store plus everything the view needs.
///
/// Mutations of `events`, `current_month` or `selected_date` set a dirty flag
/// that the caller drains with [`AppState::take_dirty`] to decide when to
/// persist.
pub struct AppState {
    pub events: EventStore,
    pub current_month: NaiveDate,
    pub selected_date: Option<NaiveDate>,
    pub search_query: String,
    pub draft: Option<Draft>,
    pub event_form: Option<EventForm>,
    pub mode: Mode,
    pub command_buffer: String,
    pub status: Option<StatusMessage>,
    pub show_help: bool,
    pub help_scroll: usize,
    pub theme: Theme,
    pub selected_event_index: usize,
    pub delete_confirmation_event_id: Option<EventId>,
    dirty: bool,
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

impl AppState {
    pub fn new() -> Self {
        Self::restore(EventStore::new(), Local::now().date_naive(), None)
    }

    pub fn restore(events: EventStore, current_date: NaiveDate, selected_date: Option<NaiveDate>) -> Self {
        Self {
            events,
            current_month: first_of_month(current_date),
            selected_date,
            search_query: String::new(),
            draft: None,
            event_form: None,
            mode: Mode::Normal,
            command_buffer: String::new(),
            status: None,
            show_help: false,
            help_scroll: 0,
            theme: Theme::default(),
            selected_event_index: 0,
            delete_confirmation_event_id: None,
            dirty: false,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn year_month(&self) -> (i32, u32) {
        (self.current_month.year(), self.current_month.month())
    }

    pub fn previous_month(&mut self) {
        if let Some(prev) = self.current_month.checked_sub_months(Months::new(1)) {
            self.current_month = prev;
            self.dirty = true;
        }
    }

    pub fn next_month(&mut self) {
        if let Some(next) = self.current_month.checked_add_months(Months::new(1)) {
            self.current_month = next;
            self.dirty = true;
        }
    }

    /// Shows the month containing `date` and selects it.
    pub fn goto(&mut self, date: NaiveDate) {
        let month = first_of_month(date);
        if month != self.current_month {
            self.current_month = month;
            self.dirty = true;
        }
        self.select_date(date);
    }

    pub fn jump_to_today(&mut self) {
        self.goto(Local::now().date_naive());
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        if self.selected_date == Some(date) {
            return;
        }
        self.selected_date = Some(date);
        self.reset_event_selection();
        self.dirty = true;
    }

    pub fn close_sidebar(&mut self) {
        if self.selected_date.take().is_some() {
            self.reset_event_selection();
            self.dirty = true;
        }
    }

    /// Moves the selected date by `days`, starting from the first of the
    /// viewed month when nothing is selected yet.
    pub fn move_selection_by_days(&mut self, days: i64) {
        let base = self.selected_date.unwrap_or(self.current_month);
        let target = if days >= 0 {
            base.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            base.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        if let Some(date) = target {
            self.goto(date);
        }
    }

    pub fn search(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.reset_event_selection();
    }

    /// Events on the selected date that match the search query.
    pub fn visible_events(&self) -> Vec<&Event> {
        match self.selected_date {
            Some(date) => calendar::filter::filter(self.events.for_date(date), &self.search_query),
            None => Vec::new(),
        }
    }

    pub fn selected_event(&self) -> Option<&Event> {
        self.visible_events().get(self.selected_event_index).copied()
    }

    pub fn move_event_selection_down(&mut self) {
        let event_count = self.visible_events().len();
        if event_count > 0 && self.selected_event_index < event_count - 1 {
            self.selected_event_index += 1;
        }
    }

    pub fn move_event_selection_up(&mut self) {
        if self.selected_event_index > 0 {
            self.selected_event_index -= 1;
        }
    }

    pub fn reset_event_selection(&mut self) {
        self.selected_event_index = 0;
    }

    /// Opens the form on a blank draft, or on a copy of an existing event.
    pub fn begin_edit(&mut self, id: Option<EventId>) -> Result<(), CommitError> {
        let draft = match id {
            Some(id) => {
                let event = self.events.get(id).ok_or(CommitError::UnknownEvent(id))?;
                Draft::for_event(event)
            }
            None => Draft::blank(),
        };
        self.event_form = Some(EventForm::for_draft(&draft));
        self.draft = Some(draft);
        self.mode = Mode::Insert;
        Ok(())
    }

    pub fn update_draft(&mut self, patch: DraftPatch) {
        if let Some(draft) = self.draft.as_mut() {
            draft.apply(patch);
        }
    }

    /// Validates and stores the open draft. The form stays open on error.
    pub fn commit(&mut self) -> Result<Event, CommitError> {
        let draft = self.draft.as_ref().ok_or(CommitError::NoDraft)?;
        let event = calendar::draft::commit(draft, self.selected_date, &mut self.events)?;
        self.draft = None;
        self.event_form = None;
        self.mode = Mode::Normal;
        self.dirty = true;
        Ok(event)
    }

    pub fn cancel(&mut self) {
        self.draft = None;
        self.event_form = None;
        self.mode = Mode::Normal;
    }

    /// Appends an event without overlap checks, for seeding and imports.
    pub fn add_event(&mut self, event: Event) {
        self.events.add(event);
        self.dirty = true;
    }

    pub fn delete_event(&mut self, id: EventId) -> Option<Event> {
        let removed = self.events.remove(id)?;
        tracing::info!("Deleted event {} on {}", id, removed.date);
        let remaining = self.visible_events().len();
        if self.selected_event_index >= remaining {
            self.selected_event_index = remaining.saturating_sub(1);
        }
        self.dirty = true;
        Some(removed)
    }

    /// Exports the viewed month.
    pub fn export(&self, format: ExportFormat) -> Result<ExportPayload, ExportError> {
        let (year, month) = self.year_month();
        calendar::export::export_month(&self.events, year, month, format)
    }

    pub fn set_info(&mut self, message: impl Into<String>) {
        self.status = Some(StatusMessage::Info(message.into()));
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status = Some(StatusMessage::Error(message.into()));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
