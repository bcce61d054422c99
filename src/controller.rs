use std::time::Duration;
use tracing::trace;

use crate::domain::{AppConfig, AppError, Message};
use crate::model::Model;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyModifiers};

pub struct Controller {
    event_poll_time: u64,
}

impl Controller {
    pub fn new(cfg: &AppConfig) -> Self {
        Self {
            event_poll_time: cfg.event_poll_time,
        }
    }

    pub fn handle_event(&self, model: &Model) -> Result<Option<Message>, AppError> {
        if event::poll(Duration::from_millis(self.event_poll_time))? {
            match event::read()? {
                Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                    return Ok(self.handle_key(key, model.help_visible()));
                }
                Event::Resize(width, height) => {
                    return Ok(Some(Message::Resize(width as usize, height as usize)));
                }
                _ => {}
            }
        }
        Ok(None)
    }

    fn handle_key(&self, key: event::KeyEvent, help_visible: bool) -> Option<Message> {
        // the help popup swallows the next key press
        if help_visible {
            return Some(Message::Help);
        }
        let message = match (key.code, key.modifiers) {
            (KeyCode::Char('q') | KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                Some(Message::Quit)
            }
            (KeyCode::Esc, _) => Some(Message::ClearSearch),
            (KeyCode::Tab | KeyCode::BackTab, _) => Some(Message::SwitchFocus),
            (KeyCode::Up, _) => Some(Message::MoveUp),
            (KeyCode::Down, _) => Some(Message::MoveDown),
            (KeyCode::PageUp, _) => Some(Message::MovePageUp),
            (KeyCode::PageDown, _) => Some(Message::MovePageDown),
            (KeyCode::Home, _) => Some(Message::MoveBeginning),
            (KeyCode::End, _) => Some(Message::MoveEnd),
            (KeyCode::Enter, _) => Some(Message::CopyHash),
            (KeyCode::F(1), _) => Some(Message::Help),
            _ => Some(Message::RawKey(key)),
        };
        trace!("Mapped: {key:?} => {message:?}");
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyEvent;

    fn controller() -> Controller {
        Controller::new(&AppConfig {
            event_poll_time: 100,
            debounce_ms: 300,
        })
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn escape_clears_regardless_of_focus() {
        let c = controller();
        assert!(matches!(
            c.handle_key(key(KeyCode::Esc, KeyModifiers::NONE), false),
            Some(Message::ClearSearch)
        ));
    }

    #[test]
    fn ctrl_q_and_ctrl_c_quit() {
        let c = controller();
        for code in [KeyCode::Char('q'), KeyCode::Char('c')] {
            assert!(matches!(
                c.handle_key(key(code, KeyModifiers::CONTROL), false),
                Some(Message::Quit)
            ));
        }
    }

    #[test]
    fn plain_q_is_search_text() {
        let c = controller();
        assert!(matches!(
            c.handle_key(key(KeyCode::Char('q'), KeyModifiers::NONE), false),
            Some(Message::RawKey(_))
        ));
    }

    #[test]
    fn tab_switches_focus() {
        let c = controller();
        assert!(matches!(
            c.handle_key(key(KeyCode::Tab, KeyModifiers::NONE), false),
            Some(Message::SwitchFocus)
        ));
    }

    #[test]
    fn enter_copies_hash() {
        let c = controller();
        assert!(matches!(
            c.handle_key(key(KeyCode::Enter, KeyModifiers::NONE), false),
            Some(Message::CopyHash)
        ));
    }

    #[test]
    fn any_key_dismisses_help() {
        let c = controller();
        assert!(matches!(
            c.handle_key(key(KeyCode::Char('x'), KeyModifiers::NONE), true),
            Some(Message::Help)
        ));
    }
}
