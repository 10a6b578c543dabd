#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

/// State for the chat box text field.
///
/// The field is fully controlled: the rendered value always reflects
/// `input`, and every keystroke replaces it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatState {
    pub input: String,
}

impl ChatState {
    /// Replace the tracked text with the field's current value.
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Text a submit click hands to the diagnostic log.
    ///
    /// Submitting does not clear the field and does not validate it.
    #[must_use]
    pub fn submit(&self) -> &str {
        log::info!("{}", self.input);
        &self.input
    }
}
