use ratatui::crossterm::event::KeyEvent;
use std::io::Error;

#[derive(Debug)]
pub enum AppError {
    IoError(Error),
    FileNotFound,
    PermissionDenied,
    LoadingFailed(String),
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        AppError::IoError(err)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub event_poll_time: u64,
    pub debounce_ms: u64,
}

/// Which search field currently receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Name,
    Hash,
}

#[derive(Debug)]
pub enum Message {
    Quit,
    ClearSearch,
    SwitchFocus,
    RawKey(KeyEvent),
    MoveUp,
    MoveDown,
    MovePageUp,
    MovePageDown,
    MoveBeginning,
    MoveEnd,
    CopyHash,
    Help,
    Resize(usize, usize),
}

pub const HELP_TEXT: &str = "hashfind - package checksum search

Type         filter by name/version (or hash, depending on focus)
Tab          switch between the two search fields
Esc          clear both searches and show everything
Up/Down      move the card selection
PgUp/PgDn    move the selection by a page
Home/End     jump to the first/last card
Enter        copy the selected SHA256 to the clipboard
F1           toggle this help
Ctrl-q/c     quit";
