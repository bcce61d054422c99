use arboard::Clipboard;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

use crate::dates::format_release_date;
use crate::domain::{AppConfig, AppError, Focus, HELP_TEXT, Message};
use crate::escape::escape_markup;
use crate::inputter::{InputResult, Inputter};
use crate::loader::{self, Record};
use crate::query::{Query, filter_dataset};
use crate::ui::{CARD_HEIGHT, CHROME_HEIGHT};

#[derive(Debug, PartialEq)]
pub enum Status {
    READY,
    QUITTING,
}

/// One record, projected into the exact strings the UI prints. All
/// fields have already been escaped and the date formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub name: String,
    pub version: String,
    pub date: String,
    pub sha256: String,
}

impl CardView {
    fn from_record(record: &Record) -> Self {
        CardView {
            name: escape_markup(&record.name),
            version: escape_markup(&record.version),
            date: escape_markup(&format_release_date(&record.date)),
            sha256: escape_markup(&record.sha256),
        }
    }
}

/// Snapshot of everything the renderer needs. Rebuilt by the model
/// after every change, read-only for the UI.
pub struct UIData {
    pub name_input: InputResult,
    pub hash_input: InputResult,
    pub focus: Focus,
    pub cards: Vec<CardView>,
    pub total_count: usize,
    pub selected: usize,
    pub scroll: usize,
    pub error: Option<String>,
    pub show_help: bool,
    pub help_text: &'static str,
    pub status_message: String,
}

impl UIData {
    fn empty() -> Self {
        UIData {
            name_input: InputResult::default(),
            hash_input: InputResult::default(),
            focus: Focus::Name,
            cards: Vec::new(),
            total_count: 0,
            selected: 0,
            scroll: 0,
            error: None,
            show_help: false,
            help_text: HELP_TEXT,
            status_message: String::new(),
        }
    }
}

pub struct Model {
    config: AppConfig,
    pub status: Status,
    dataset: Vec<Record>,
    filtered: Vec<usize>,
    name_input: Inputter,
    hash_input: Inputter,
    focus: Focus,
    dirty_since: Option<Instant>,
    selected: usize,
    scroll: usize,
    viewport_cards: usize,
    load_error: Option<String>,
    show_help: bool,
    status_message: String,
    clipboard: Option<Clipboard>,
    uidata: UIData,
}

impl Model {
    pub fn init(config: &AppConfig, ui_width: usize, ui_height: usize) -> Self {
        let mut model = Self {
            config: config.clone(),
            status: Status::READY,
            dataset: Vec::new(),
            filtered: Vec::new(),
            name_input: Inputter::default(),
            hash_input: Inputter::default(),
            focus: Focus::Name,
            dirty_since: None,
            selected: 0,
            scroll: 0,
            viewport_cards: Self::cards_that_fit(ui_height),
            load_error: None,
            show_help: false,
            status_message: "Loading ...".to_string(),
            clipboard: Clipboard::new().ok(),
            uidata: UIData::empty(),
        };
        trace!("Init model with ui size {}x{}", ui_width, ui_height);
        model.update_uidata();
        model
    }

    /// Load and merge all sources. Losing some sources only shrinks the
    /// dataset; losing every source raises the error banner, once.
    pub fn load_sources(&mut self, sources: &[PathBuf]) {
        let outcome = loader::merge_all(sources);
        if outcome.all_failed() {
            self.load_error = Some("Failed to load data. Restart to try again.".to_string());
        }
        self.set_status_message(format!(
            "Loaded {} records from {}/{} sources",
            outcome.records.len(),
            outcome.total - outcome.failed,
            outcome.total
        ));
        self.install_dataset(outcome.records);
    }

    fn install_dataset(&mut self, records: Vec<Record>) {
        self.dataset = records;
        self.filtered = (0..self.dataset.len()).collect();
        self.selected = 0;
        self.scroll = 0;
        self.update_uidata();
    }

    pub fn get_uidata(&self) -> &UIData {
        &self.uidata
    }

    pub fn help_visible(&self) -> bool {
        self.show_help
    }

    pub fn quit(&mut self) {
        self.status = Status::QUITTING;
    }

    pub fn update(&mut self, message: Option<Message>) -> Result<(), AppError> {
        self.maybe_fire_debounce(Instant::now());

        if let Some(msg) = message {
            match msg {
                Message::Quit => self.quit(),
                Message::ClearSearch => self.clear_search(),
                Message::SwitchFocus => self.switch_focus(),
                Message::RawKey(key) => self.raw_input(key),
                Message::MoveUp => self.move_selection_up(1),
                Message::MoveDown => self.move_selection_down(1),
                Message::MovePageUp => self.move_selection_up(self.viewport_cards),
                Message::MovePageDown => self.move_selection_down(self.viewport_cards),
                Message::MoveBeginning => self.move_selection_beginning(),
                Message::MoveEnd => self.move_selection_end(),
                Message::CopyHash => self.copy_selected_hash(),
                Message::Help => self.toggle_help(),
                Message::Resize(width, height) => self.ui_resize(width, height),
            }
        }
        Ok(())
    }

    // ------------------- search handling ------------------- //

    fn raw_input(&mut self, key: ratatui::crossterm::event::KeyEvent) {
        let inputter = match self.focus {
            Focus::Name => &mut self.name_input,
            Focus::Hash => &mut self.hash_input,
        };
        if let Some(result) = inputter.read(key) {
            trace!("Search input changed: {:?}", result.input);
            // every edit restarts the quiet window
            self.dirty_since = Some(Instant::now());
            self.update_uidata();
        }
    }

    /// Trailing-edge debounce: recompute only once input has been quiet
    /// for the configured window. A newer edit supersedes the pending
    /// recompute by re-stamping `dirty_since`.
    fn maybe_fire_debounce(&mut self, now: Instant) {
        let window = Duration::from_millis(self.config.debounce_ms);
        if let Some(stamp) = self.dirty_since
            && now.duration_since(stamp) >= window
        {
            self.dirty_since = None;
            self.recompute_filter();
        }
    }

    fn recompute_filter(&mut self) {
        let start_time = Instant::now();
        let query = Query::new(&self.name_input.get().input, &self.hash_input.get().input);
        self.filtered = filter_dataset(&self.dataset, &query);
        self.selected = 0;
        self.scroll = 0;
        debug!(
            "Filter matched {}/{} records in {}ms",
            self.filtered.len(),
            self.dataset.len(),
            start_time.elapsed().as_millis()
        );
        self.set_status_message(format!(
            "Showing {} of {} records",
            self.filtered.len(),
            self.dataset.len()
        ));
        self.update_uidata();
    }

    /// Reset both search fields, show the full dataset again and put the
    /// focus back on the name field. Bypasses the debounce window.
    fn clear_search(&mut self) {
        self.name_input.clear();
        self.hash_input.clear();
        self.dirty_since = None;
        self.focus = Focus::Name;
        self.filtered = (0..self.dataset.len()).collect();
        self.selected = 0;
        self.scroll = 0;
        self.set_status_message("Cleared search");
        self.update_uidata();
    }

    fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Name => Focus::Hash,
            Focus::Hash => Focus::Name,
        };
        self.update_uidata();
    }

    // ------------------- selection handling ------------------- //

    fn move_selection_up(&mut self, size: usize) {
        self.selected = self.selected.saturating_sub(size);
        self.scroll_selection_into_view();
        self.update_uidata();
    }

    fn move_selection_down(&mut self, size: usize) {
        if !self.filtered.is_empty() {
            self.selected = std::cmp::min(self.selected + size, self.filtered.len() - 1);
            self.scroll_selection_into_view();
            self.update_uidata();
        }
    }

    fn move_selection_beginning(&mut self) {
        self.selected = 0;
        self.scroll = 0;
        self.update_uidata();
    }

    fn move_selection_end(&mut self) {
        if !self.filtered.is_empty() {
            self.selected = self.filtered.len() - 1;
            self.scroll_selection_into_view();
            self.update_uidata();
        }
    }

    fn scroll_selection_into_view(&mut self) {
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + self.viewport_cards {
            self.scroll = self.selected + 1 - self.viewport_cards;
        }
    }

    // ------------------- misc handling ------------------- //

    fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.update_uidata();
    }

    fn ui_resize(&mut self, width: usize, height: usize) {
        trace!("UI was resized to {}x{}", width, height);
        self.viewport_cards = Self::cards_that_fit(height);
        self.scroll_selection_into_view();
        self.update_uidata();
    }

    fn cards_that_fit(ui_height: usize) -> usize {
        let results_height = ui_height.saturating_sub(CHROME_HEIGHT as usize);
        std::cmp::max(results_height / CARD_HEIGHT as usize, 1)
    }

    fn copy_selected_hash(&mut self) {
        let Some(&idx) = self.filtered.get(self.selected) else {
            self.set_status_message("Nothing to copy");
            return;
        };
        let record = &self.dataset[idx];
        match self.clipboard.as_mut() {
            Some(clipboard) => match clipboard.set_text(record.sha256.clone()) {
                Ok(_) => self.set_status_message(format!("Copied SHA256 of {}", record.name)),
                Err(e) => {
                    warn!("Error copying to clipboard: {:?}", e);
                    self.set_status_message("Clipboard error");
                }
            },
            None => self.set_status_message("Clipboard unavailable"),
        }
    }

    fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.uidata.status_message = self.status_message.clone();
    }

    fn update_uidata(&mut self) {
        self.uidata = UIData {
            name_input: self.name_input.get(),
            hash_input: self.hash_input.get(),
            focus: self.focus,
            cards: self
                .filtered
                .iter()
                .map(|&idx| CardView::from_record(&self.dataset[idx]))
                .collect(),
            total_count: self.dataset.len(),
            selected: self.selected,
            scroll: self.scroll,
            error: self.load_error.clone(),
            show_help: self.show_help,
            help_text: HELP_TEXT,
            status_message: self.status_message.clone(),
        };
    }
}
