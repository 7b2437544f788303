//! Single line text input used for renaming

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key did to the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Edited,
    Submit,
    Cancel,
    Ignored,
}

/// Text input state. The cursor counts characters, not bytes.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor_pos: usize,
}

impl TextInput {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor_pos: value.chars().count(),
        }
    }

    fn byte_offset(&self, char_pos: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor_pos);
        self.value.insert(at, c);
        self.cursor_pos += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos -= 1;
            let at = self.byte_offset(self.cursor_pos);
            self.value.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor_pos < self.char_len() {
            let at = self.byte_offset(self.cursor_pos);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor_pos < self.char_len() {
            self.cursor_pos += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_pos = self.char_len();
    }

    /// Apply a key. Enter submits and Escape cancels; the caller decides
    /// what that means for the item being renamed.
    pub fn handle_key(&mut self, key: KeyEvent) -> InputOutcome {
        match key.code {
            KeyCode::Enter => InputOutcome::Submit,
            KeyCode::Esc => InputOutcome::Cancel,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert(c);
                InputOutcome::Edited
            }
            KeyCode::Backspace => {
                self.backspace();
                InputOutcome::Edited
            }
            KeyCode::Delete => {
                self.delete();
                InputOutcome::Edited
            }
            KeyCode::Left => {
                self.move_left();
                InputOutcome::Edited
            }
            KeyCode::Right => {
                self.move_right();
                InputOutcome::Edited
            }
            KeyCode::Home => {
                self.move_home();
                InputOutcome::Edited
            }
            KeyCode::End => {
                self.move_end();
                InputOutcome::Edited
            }
            _ => InputOutcome::Ignored,
        }
    }
}
