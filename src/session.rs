//! Session: one token field hosted on an in-memory surface.
//!
//! The session plays the part of the host text view. It forwards proposed
//! edits to the field, applies the ones the field lets through, and reports
//! every selection mutation back through `selection_did_change`, including
//! mutations the field caused itself. That feedback path is what the field's
//! selection latch exists to absorb.

use std::ops::Range;

use crate::config::{FieldConfig, SanitizeMode};
use crate::contact::Contact;
use crate::field::{
    EditDecision, FieldDelegate, FieldEvent, FuzzyMatcher, MatchProvider, MemorySurface, Payload,
    StyledText, TextSurface, TokenField,
};
use crate::tracing::FieldSnapshot;
use crate::util::utf16_len;

/// Delegate that records every notification and applies a sanitize mode.
#[derive(Debug, Clone, Default)]
pub struct SessionDelegate {
    events: Vec<FieldEvent>,
    sanitize: SanitizeMode,
}

impl SessionDelegate {
    pub fn new(sanitize: SanitizeMode) -> Self {
        Self {
            events: Vec::new(),
            sanitize,
        }
    }

    pub fn events(&self) -> &[FieldEvent] {
        &self.events
    }
}

impl<P: Payload> FieldDelegate<P> for SessionDelegate {
    fn notify(&mut self, event: FieldEvent) {
        tracing::trace!(?event, "field event");
        self.events.push(event);
    }

    fn sanitize(&mut self, input: &str) -> Option<String> {
        self.sanitize.apply(input)
    }
}

/// A token field plus the surface it edits.
#[derive(Debug)]
pub struct Session<P: Payload = Contact> {
    field: TokenField<P, SessionDelegate>,
    surface: MemorySurface,
    focused: bool,
}

impl<P: Payload> Session<P> {
    /// Create a focused session with the caret after the prefix
    pub fn new(prefix: &str, sanitize: SanitizeMode) -> Self {
        let mut field = TokenField::new(prefix, SessionDelegate::new(sanitize));
        let mut surface = MemorySurface::new();
        field.attach(&mut surface);

        let mut session = Self {
            field,
            surface,
            focused: true,
        };
        let end = session.surface.len_utf16();
        session.set_selection(end..end);
        session
    }

    pub fn with_match_provider(mut self, provider: impl MatchProvider<P> + 'static) -> Self {
        self.field.set_match_provider(provider);
        self
    }

    pub fn field(&self) -> &TokenField<P, SessionDelegate> {
        &self.field
    }

    pub fn surface(&self) -> &MemorySurface {
        &self.surface
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Every notification delivered so far
    pub fn events(&self) -> &[FieldEvent] {
        self.field.delegate().events()
    }

    pub fn clear_events(&mut self) {
        self.field.delegate_mut().events.clear();
    }

    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot::capture(&self.field, &self.surface)
    }

    /// Propose an edit the way a host text view does: ask first, then apply
    /// the edit, move the caret past it, and report the change.
    pub fn propose(&mut self, range: Range<usize>, text: &str) -> EditDecision {
        let decision = self.field.text_will_change(&mut self.surface, range.clone(), text);
        self.deliver_selection_changes();
        if decision.is_apply() {
            self.surface.replace(range.clone(), &StyledText::plain(text));
            let caret = range.start + utf16_len(text);
            self.surface.set_selected_range(caret..caret);
            self.deliver_selection_changes();
            self.field.text_did_change(&mut self.surface);
            self.deliver_selection_changes();
        }
        decision
    }

    /// Move the cursor/selection as a user tap or drag would
    pub fn set_selection(&mut self, range: Range<usize>) {
        self.surface.set_selected_range(range);
        self.deliver_selection_changes();
    }

    pub fn focus(&mut self) {
        if self.focused {
            return;
        }
        self.focused = true;
        self.field.begin_editing();
    }

    pub fn blur(&mut self) {
        if !self.focused {
            return;
        }
        self.field.end_editing(&mut self.surface);
        self.deliver_selection_changes();
        self.focused = false;
    }

    /// Append match row `index` (panics on an invalid index)
    pub fn choose_match(&mut self, index: usize) {
        self.field.select_match(&mut self.surface, index);
        self.deliver_selection_changes();
    }

    /// Append a value directly
    pub fn append_value(&mut self, value: P) {
        self.field.append_value(&mut self.surface, value);
        self.deliver_selection_changes();
    }

    /// Remove token `index` (panics on an invalid index)
    pub fn remove_token(&mut self, index: usize) {
        self.field.remove_value(&mut self.surface, index);
        self.deliver_selection_changes();
    }

    /// Report pending selection mutations until the surface settles
    fn deliver_selection_changes(&mut self) {
        while self.surface.take_selection_changed() {
            self.field.selection_did_change(&mut self.surface);
        }
    }
}

impl Session<Contact> {
    /// Build a session from configuration, attaching a fuzzy match list
    /// when contacts are configured
    pub fn from_config(config: &FieldConfig) -> Self {
        let session = Self::new(&config.prefix, config.sanitize);
        if config.contacts.is_empty() {
            return session;
        }
        tracing::debug!(contacts = config.contacts.len(), "attaching match list");
        session.with_match_provider(FuzzyMatcher::new(config.contacts.clone()).with_limit(8))
    }
}
