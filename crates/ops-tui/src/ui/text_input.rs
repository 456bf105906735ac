/// Editable text with a char-indexed cursor. Multi-line content is allowed;
/// callers decide whether Enter inserts a newline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    /// Cursor position in chars, `0..=len`
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars() {
            // normalize pasted CRLF
            if c != '\r' {
                self.insert_char(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.value.chars().count() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Value with a block cursor glyph at the cursor position
    pub fn display_with_cursor(&self) -> String {
        let at = self.byte_index(self.cursor);
        let mut out = String::with_capacity(self.value.len() + 3);
        out.push_str(&self.value[..at]);
        out.push('▏');
        out.push_str(&self.value[at..]);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace_unicode() {
        let mut input = TextInput::new();
        for c in "héllo".chars() {
            input.insert_char(c);
        }
        input.move_left();
        input.move_left();
        input.backspace();
        assert_eq!(input.value(), "hélo");
        assert_eq!(input.display_with_cursor(), "hé▏lo");
    }

    #[test]
    fn test_delete_at_end_is_noop() {
        let mut input = TextInput::with_value("ab");
        input.delete();
        assert_eq!(input.value(), "ab");
        input.move_home();
        input.delete();
        assert_eq!(input.value(), "b");
    }

    #[test]
    fn test_paste_drops_carriage_returns() {
        let mut input = TextInput::new();
        input.insert_str("a\r\nb");
        assert_eq!(input.value(), "a\nb");
    }

    #[test]
    fn test_cursor_display() {
        let mut input = TextInput::with_value("ab");
        input.move_left();
        assert_eq!(input.display_with_cursor(), "a▏b");
    }

    #[test]
    fn test_blank() {
        assert!(TextInput::with_value("  ").is_blank());
        assert!(!TextInput::with_value(" x ").is_blank());
    }
}
