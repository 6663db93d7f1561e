#![forbid(unsafe_code)]

//! The bound input element.
//!
//! A session never owns a widget. It talks to whatever the host binds
//! through [`InputElement`]: the raw value lives in the element and is
//! mutated in place, and focus is whatever the element reports.
//!
//! Focus requests (`focus`/`blur`) only change focus state. Delivering
//! the resulting focus or blur *event* back to the session's handlers is
//! the host's job, exactly as an event loop would.

/// A single-line text element that a session can bind to.
pub trait InputElement {
    /// Current raw value.
    fn value(&self) -> String;

    /// Replace the raw value.
    fn set_value(&mut self, value: &str);

    /// Whether the element currently holds input focus.
    fn is_focused(&self) -> bool;

    /// Request input focus.
    fn focus(&mut self);

    /// Give up input focus.
    fn blur(&mut self);
}

/// Headless in-memory element.
///
/// Used by terminal hosts that render the value themselves, and by tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryInput {
    value: String,
    focused: bool,
}

impl MemoryInput {
    /// Create an empty, unfocused element.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value (builder).
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Set whether the element starts focused (builder).
    #[must_use]
    pub fn with_focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Append typed text at the end of the value.
    pub fn type_text(&mut self, text: &str) {
        self.value.push_str(text);
    }

    /// Remove the last character, if any.
    pub fn backspace(&mut self) {
        self.value.pop();
    }

    /// Clear all text.
    pub fn clear(&mut self) {
        self.value.clear();
    }
}

impl InputElement for MemoryInput {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) {
        value.clone_into(&mut self.value);
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }
}
