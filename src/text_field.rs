/// Single-line text entry, editable only at the end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    text: String,
    enabled: bool,
}

impl Default for TextField {
    fn default() -> Self {
        Self {
            text: String::new(),
            enabled: true,
        }
    }
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns true if the content changed
    pub fn insert(&mut self, c: char) -> bool {
        if !self.enabled || c.is_control() {
            return false;
        }
        self.text.push(c);
        true
    }

    pub fn backspace(&mut self) -> bool {
        self.enabled && self.text.pop().is_some()
    }

    /// Deletes back to the start of the previous word, including trailing whitespace
    pub fn delete_word(&mut self) -> bool {
        if !self.enabled || self.text.is_empty() {
            return false;
        }

        let trimmed_len = self.text.trim_end().len();
        let word_start = self.text[..trimmed_len]
            .rfind(char::is_whitespace)
            .map(|i| i + self.text[i..].chars().next().map_or(1, char::len_utf8))
            .unwrap_or(0);

        self.text.truncate(word_start);
        true
    }

    pub fn clear(&mut self) -> bool {
        if !self.enabled || self.text.is_empty() {
            return false;
        }
        self.text.clear();
        true
    }

    /// Empties the field and enables it again, regardless of its current state
    pub fn reset(&mut self) {
        self.text.clear();
        self.enabled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut field = TextField::new();

        assert!(field.insert('h'));
        assert!(field.insert('i'));
        assert_eq!(field.text(), "hi");

        assert!(field.backspace());
        assert_eq!(field.text(), "h");
        assert!(field.backspace());
        assert!(!field.backspace());
        assert!(field.is_empty());
    }

    #[test]
    fn test_insert_ignores_control_chars() {
        let mut field = TextField::new();
        assert!(!field.insert('\n'));
        assert!(!field.insert('\t'));
        assert!(field.is_empty());
    }

    #[test]
    fn test_delete_word() {
        let mut field = TextField::new();
        for c in "The quick brown".chars() {
            field.insert(c);
        }

        assert!(field.delete_word());
        assert_eq!(field.text(), "The quick ");

        assert!(field.delete_word());
        assert_eq!(field.text(), "The ");

        assert!(field.delete_word());
        assert_eq!(field.text(), "");

        assert!(!field.delete_word());
    }

    #[test]
    fn test_delete_word_multibyte() {
        let mut field = TextField::new();
        for c in "café crème".chars() {
            field.insert(c);
        }

        assert!(field.delete_word());
        assert_eq!(field.text(), "café ");
    }

    #[test]
    fn test_clear() {
        let mut field = TextField::new();
        assert!(!field.clear());

        field.insert('x');
        assert!(field.clear());
        assert!(field.is_empty());
    }

    #[test]
    fn test_disabled_field_rejects_edits() {
        let mut field = TextField::new();
        field.insert('a');
        field.set_enabled(false);

        assert!(!field.insert('b'));
        assert!(!field.backspace());
        assert!(!field.delete_word());
        assert!(!field.clear());
        assert_eq!(field.text(), "a");

        field.reset();
        assert!(field.is_enabled());
        assert!(field.is_empty());
    }
}
