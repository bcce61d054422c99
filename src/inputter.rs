use ratatui::crossterm::event::{self, KeyCode, KeyModifiers};

/// Line editor state for one search field. Fields filter live, so there
/// is no enter/cancel termination, every edit is immediately visible.
#[derive(Default)]
pub struct Inputter {
    current_input: String,
    curser_pos: usize,
}

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct InputResult {
    pub input: String,
    pub curser_pos: usize,
}

impl Inputter {
    /// Apply one key event and return the new field state. Returns None
    /// for keys that do not edit the field.
    pub fn read(&mut self, key: event::KeyEvent) -> Option<InputResult> {
        match (key.code, key.modifiers) {
            (KeyCode::Backspace, KeyModifiers::NONE) => Some(self.backspace()),
            (KeyCode::Left, KeyModifiers::NONE) => Some(self.left()),
            (KeyCode::Right, KeyModifiers::NONE) => Some(self.right()),
            (kc, KeyModifiers::NONE | KeyModifiers::SHIFT) => self.key(kc),
            _ => None,
        }
    }

    pub fn get(&self) -> InputResult {
        InputResult {
            input: self.current_input.clone(),
            curser_pos: self.curser_pos,
        }
    }

    pub fn clear(&mut self) {
        self.current_input.clear();
        self.curser_pos = 0;
    }

    fn backspace(&mut self) -> InputResult {
        if self.curser_pos > 0 {
            self.curser_pos -= 1;
            let pos = self.getbytepos();
            self.current_input.remove(pos);
        }
        self.get()
    }

    fn left(&mut self) -> InputResult {
        self.curser_pos = self.curser_pos.saturating_sub(1);
        self.get()
    }

    fn right(&mut self) -> InputResult {
        if self.curser_pos < self.current_input.chars().count() {
            self.curser_pos += 1;
        }
        self.get()
    }

    fn key(&mut self, code: KeyCode) -> Option<InputResult> {
        let chr = code.as_char()?;
        let pos = self.getbytepos();
        self.current_input.insert(pos, chr);
        self.curser_pos += 1;
        Some(self.get())
    }

    fn getbytepos(&self) -> usize {
        self.current_input
            .char_indices()
            .nth(self.curser_pos)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.current_input.len())
    }
}
