//! Token values: text produced by the tokenizer or opaque payloads chosen
//! from the match list.

use std::fmt;

/// An opaque value that can be turned into a token.
pub trait Payload: Clone + fmt::Debug {
    /// Display title stamped into the buffer
    fn title(&self) -> String;

    /// Secondary line shown by match-list rows
    fn subtitle(&self) -> Option<String> {
        None
    }

    /// Text form used for duplicate detection.
    /// Payloads without one are never deduplicated.
    fn as_text(&self) -> Option<&str> {
        None
    }
}

impl Payload for String {
    fn title(&self) -> String {
        self.clone()
    }

    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

/// Value held for each token, parallel to the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValue<P> {
    /// Sanitized free text converted by the tokenizer
    Text(String),
    /// A payload appended by the host (typically a chosen match)
    Value(P),
}

impl<P: Payload> TokenValue<P> {
    /// Text form for duplicate detection
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenValue::Text(text) => Some(text),
            TokenValue::Value(value) => value.as_text(),
        }
    }

    /// The payload, if this token was appended from a value
    pub fn payload(&self) -> Option<&P> {
        match self {
            TokenValue::Text(_) => None,
            TokenValue::Value(value) => Some(value),
        }
    }
}
