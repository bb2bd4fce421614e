//! Accumulator for in-progress elements and committed Morse groups.
//!
//! Pure data; no timing logic lives here. Both trainers feed it.

use crate::codec;
use crate::types::Element;

/// The in-progress element sequence plus the committed, space-separated
/// buffer of Morse groups. `/` marks a word boundary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MorseBuffer {
    sequence: String,
    buffer: String,
}

impl MorseBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a dot or dash to the uncommitted sequence.
    pub fn add_element(&mut self, element: Element) {
        self.sequence.push(element.symbol());
    }

    /// Move the uncommitted sequence into the buffer as one group,
    /// followed by a space. Returns the committed group, or `None` if
    /// the sequence was empty.
    pub fn commit_sequence(&mut self) -> Option<String> {
        if self.sequence.is_empty() {
            return None;
        }
        let group = std::mem::take(&mut self.sequence);
        self.buffer.push_str(&group);
        self.buffer.push(' ');
        Some(group)
    }

    /// Commit any pending sequence, then ensure the buffer ends with
    /// exactly one `"/ "` word mark. Idempotent.
    pub fn add_word_separator(&mut self) {
        self.commit_sequence();
        if !self.buffer.ends_with("/ ") {
            self.buffer.push_str("/ ");
        }
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Decode the committed buffer to text.
    pub fn decoded(&self) -> String {
        codec::morse_to_text(&self.buffer)
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty() && self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.sequence.clear();
        self.buffer.clear();
    }
}
