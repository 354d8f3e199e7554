//! Notifications, edit decisions, and the delegate hooks of a token field.

use serde::Serialize;

use super::payload::Payload;

/// Notifications a token field emits, synchronously and fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldEvent {
    /// Buffer or token set changed
    Changed,
    /// Pending input was converted into a token
    TokenizedInput,
    /// A value (typically a chosen match) was appended as a token
    TokenizedMatch,
    /// The token at this index was removed
    TokenRemoved(usize),
    /// The match list became visible
    ShowMatches,
    /// The match list became hidden
    HideMatches,
    /// Return was pressed with no pending input
    Return,
}

/// Verdict on an edit the host proposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditDecision {
    /// The host applies the edit unmodified
    Apply,
    /// The host drops the edit (the field may have applied its own)
    Veto,
}

impl EditDecision {
    pub fn is_apply(self) -> bool {
        self == EditDecision::Apply
    }
}

/// Event sink plus pull-style query hooks. Every method has a default.
pub trait FieldDelegate<P: Payload> {
    /// Receive a notification
    fn notify(&mut self, event: FieldEvent) {
        let _ = event;
    }

    /// Clean up pending input before it is tokenized.
    /// `None` uses the raw input verbatim.
    fn sanitize(&mut self, input: &str) -> Option<String> {
        let _ = input;
        None
    }

    /// Title stamped for an appended value
    fn title_for(&self, value: &P) -> String {
        value.title()
    }
}

impl<P: Payload> FieldDelegate<P> for () {}
