/// Text being composed in the help modal
///
/// `cursor` is a byte offset that always sits on a char boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputText {
    buffer: String,
    cursor: usize,
}

impl InputText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor position counted in chars, for rendering
    pub fn cursor_chars(&self) -> usize {
        self.buffer[..self.cursor].chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Replace the whole buffer and park the cursor at the end
    pub fn set(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.cursor = self.buffer.len();
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.buffer.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.buffer[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn take(&mut self) -> String {
        let buffer = std::mem::take(&mut self.buffer);
        self.cursor = 0;
        buffer
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.buffer[..self.cursor].char_indices().next_back().map(|(idx, _)| idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut input = InputText::new();
        input.insert_char('h');
        input.insert_char('i');
        assert_eq!(input.as_str(), "hi");
        assert_eq!(input.cursor(), 2);

        input.backspace();
        assert_eq!(input.as_str(), "h");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut input = InputText::new();
        input.set("abc");
        input.move_home();
        input.backspace();
        assert_eq!(input.as_str(), "abc");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_cursor_movement_and_delete() {
        let mut input = InputText::new();
        input.set("abc");
        input.move_left();
        input.move_left();
        input.delete();
        assert_eq!(input.as_str(), "ac");

        input.move_end();
        input.delete();
        assert_eq!(input.as_str(), "ac");

        input.move_right();
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = InputText::new();
        input.insert_char('°');
        input.insert_char('C');
        assert_eq!(input.cursor_chars(), 2);

        input.move_left();
        input.move_left();
        assert_eq!(input.cursor(), 0);

        input.move_right();
        assert_eq!(input.cursor(), '°'.len_utf8());

        input.backspace();
        assert_eq!(input.as_str(), "C");
    }

    #[test]
    fn test_take_clears() {
        let mut input = InputText::new();
        input.set("question");
        assert_eq!(input.take(), "question");
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }
}
