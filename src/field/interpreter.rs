//! TokenField - the edit interpreter driving ledger, tokenizer, and selection.
//!
//! Buffer layout: `<prefix><spacer>` initially. Each appended token replaces
//! everything from the last boundary to the end with
//! `<marker><title><marker><spacer>`, so the new token's leading marker takes
//! the place of the old spacer and a fresh spacer trails the last token.
//! Pending input is everything after that spacer.
//!
//! The host reports three kinds of events: a proposed edit
//! ([`TokenField::text_will_change`]), an applied free-text edit
//! ([`TokenField::text_did_change`]), and any cursor/selection move
//! ([`TokenField::selection_did_change`]), including moves the field itself
//! caused. The latter are filtered by a one-shot [`SelectionLatch`].

use std::fmt;
use std::ops::Range;

use super::events::{EditDecision, FieldDelegate, FieldEvent};
use super::ledger::TokenLedger;
use super::matches::MatchProvider;
use super::payload::{Payload, TokenValue};
use super::selection::{SelectionController, SelectionLatch, SelectionState};
use super::spans::{styled_token, StyleClass, SPACER};
use super::surface::{StyledText, TextSurface};
use super::tokenizer;
use crate::util::utf16_len;

/// Replacement text that means "return was pressed"
pub const LINE_BREAK: &str = "\n";

/// Inline token entry state machine.
///
/// Generic over the payload type of appended values and the delegate that
/// receives notifications and answers the sanitize/title hooks.
pub struct TokenField<P: Payload = String, D: FieldDelegate<P> = ()> {
    prefix: String,
    ledger: TokenLedger,
    /// Parallel to the ledger: `values[i]` is the value of token `i`
    values: Vec<TokenValue<P>>,
    selection: SelectionController,
    latch: SelectionLatch,
    delegate: D,
    provider: Option<Box<dyn MatchProvider<P>>>,
    matches: Vec<P>,
    matches_visible: bool,
    collapsed: bool,
}

impl<P: Payload, D: FieldDelegate<P>> fmt::Debug for TokenField<P, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenField")
            .field("prefix", &self.prefix)
            .field("ledger", &self.ledger)
            .field("values", &self.values)
            .field("selection", &self.selection.state())
            .field("latch", &self.latch)
            .field("matches", &self.matches)
            .field("matches_visible", &self.matches_visible)
            .field("collapsed", &self.collapsed)
            .finish_non_exhaustive()
    }
}

impl<P: Payload, D: FieldDelegate<P>> TokenField<P, D> {
    /// Create a field with a fixed prefix. Call [`TokenField::attach`] to
    /// stamp the prefix into a surface.
    pub fn new(prefix: impl Into<String>, delegate: D) -> Self {
        let prefix = prefix.into();
        let origin = utf16_len(&prefix);
        Self {
            prefix,
            ledger: TokenLedger::new(origin),
            values: Vec::new(),
            selection: SelectionController::new(),
            latch: SelectionLatch::default(),
            delegate,
            provider: None,
            matches: Vec::new(),
            matches_visible: false,
            collapsed: false,
        }
    }

    /// Attach a match provider; matches are recomputed on free-text changes
    pub fn with_match_provider(mut self, provider: impl MatchProvider<P> + 'static) -> Self {
        self.set_match_provider(provider);
        self
    }

    pub fn set_match_provider(&mut self, provider: impl MatchProvider<P> + 'static) {
        self.provider = Some(Box::new(provider));
        self.matches.clear();
        self.matches_visible = false;
    }

    /// Reset the surface to `<prefix><spacer>` and forget all tokens
    pub fn attach<S: TextSurface + ?Sized>(&mut self, surface: &mut S) {
        let mut styled = StyledText::with_class(&self.prefix, StyleClass::Prefix);
        styled.push(&SPACER.to_string(), StyleClass::Plain);
        let end = surface.len_utf16();
        surface.replace(0..end, &styled);
        surface.set_capability_override(false);

        self.ledger.clear();
        self.values.clear();
        self.selection = SelectionController::new();
        self.matches.clear();
        self.matches_visible = false;
        self.collapsed = false;
        tracing::debug!(prefix = %self.prefix, "token field attached");
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn values(&self) -> &[TokenValue<P>] {
        &self.values
    }

    pub fn token_count(&self) -> usize {
        self.ledger.len()
    }

    /// Buffer range of token `index` (panics on an invalid index)
    pub fn token_range(&self, index: usize) -> Range<usize> {
        self.ledger.range_of(index)
    }

    pub fn ledger(&self) -> &TokenLedger {
        &self.ledger
    }

    /// Display title of token `index`
    pub fn token_title(&self, index: usize) -> String {
        match &self.values[index] {
            TokenValue::Text(text) => text.clone(),
            TokenValue::Value(value) => self.delegate.title_for(value),
        }
    }

    /// Display titles of all tokens in order
    pub fn titles(&self) -> Vec<String> {
        (0..self.values.len()).map(|i| self.token_title(i)).collect()
    }

    pub fn selection_state(&self) -> SelectionState {
        self.selection.state()
    }

    pub fn selected_token(&self) -> Option<usize> {
        self.selection.selected()
    }

    pub fn latch(&self) -> SelectionLatch {
        self.latch
    }

    /// Matches for the current pending input
    pub fn matches(&self) -> &[P] {
        &self.matches
    }

    pub fn matches_visible(&self) -> bool {
        self.matches_visible
    }

    pub fn has_match_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    /// First offset of pending input
    pub fn input_start(&self) -> usize {
        self.ledger.last_end() + SPACER.len_utf16()
    }

    /// Range of pending input in the surface
    pub fn input_range<S: TextSurface + ?Sized>(&self, surface: &S) -> Range<usize> {
        let end = surface.len_utf16();
        self.input_start().min(end)..end
    }

    /// Free text typed after the last token
    pub fn input_text<S: TextSurface + ?Sized>(&self, surface: &S) -> String {
        surface.slice(self.input_range(surface))
    }

    /// Whether the host's native contextual edit actions (cut/copy/paste)
    /// may run. False while a token is selected.
    pub fn can_perform_action(&self) -> bool {
        self.selection.can_perform_action()
    }

    /// Whether the host should draw its own selection highlight.
    /// A selected token is shown through its style spans instead.
    pub fn native_selection_visible(&self) -> bool {
        !self.selection.is_selected()
    }

    // =========================================================================
    // Host events
    // =========================================================================

    /// Classify an edit the host is about to apply and decide its fate.
    pub fn text_will_change<S: TextSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        range: Range<usize>,
        replacement: &str,
    ) -> EditDecision {
        if replacement == LINE_BREAK {
            if self.input_range(surface).is_empty() {
                tracing::debug!("return with empty input");
                self.delegate.notify(FieldEvent::Return);
            } else {
                self.tokenize_input(surface);
                self.delegate.notify(FieldEvent::Changed);
            }
            return EditDecision::Veto;
        }

        let is_delete = replacement.is_empty();
        match self.selection.selected() {
            None => {
                if is_delete && range.len() == 1 && range.start == self.ledger.last_end() {
                    // Backspace into the spacer selects the last token
                    if let Some(last) = self.ledger.len().checked_sub(1) {
                        self.select_token(surface, last);
                    }
                    return EditDecision::Veto;
                }
                self.latch.arm();
                EditDecision::Apply
            }
            Some(index) => {
                let token_range = self.ledger.range_of(index);
                if token_range != range {
                    tracing::debug!(
                        ?range,
                        ?token_range,
                        "edit over selected token retargeted to the token"
                    );
                }
                self.remove_token(surface, index);
                surface.replace(token_range, &StyledText::new());
                if !is_delete {
                    let end = surface.len_utf16();
                    surface.replace(end..end, &StyledText::plain(replacement));
                }
                self.move_cursor_to_end(surface);
                if is_delete {
                    self.delegate.notify(FieldEvent::Changed);
                } else {
                    self.text_did_change(surface);
                }
                EditDecision::Veto
            }
        }
    }

    /// Free text changed: refresh matches and notify.
    pub fn text_did_change<S: TextSurface + ?Sized>(&mut self, surface: &mut S) {
        if self.provider.is_some() {
            let input = self.input_text(surface);
            if let Some(provider) = self.provider.as_mut() {
                self.matches = provider.matches_for(&input);
            }
            if self.matches.is_empty() {
                self.hide_matches();
            } else {
                self.show_matches();
            }
        }
        self.delegate.notify(FieldEvent::Changed);
    }

    /// The host's cursor or selection moved.
    pub fn selection_did_change<S: TextSurface + ?Sized>(&mut self, surface: &mut S) {
        if self.latch.consume() {
            tracing::trace!("ignoring self-caused selection change");
            return;
        }

        let selected = surface.selected_range();
        if let Some(index) = self.ledger.index_containing(selected.start) {
            self.select_token(surface, index);
            return;
        }
        if self.selection.is_selected() {
            self.selection.deselect(&self.ledger, surface);
        }
        if selected.start <= self.ledger.last_end() {
            // Never leave the caret on a boundary or inside the prefix
            let start = self.input_start().min(surface.len_utf16());
            let end = (start + selected.len()).min(surface.len_utf16());
            tracing::debug!(from = selected.start, to = start, "clamping cursor");
            self.latch.arm();
            surface.set_selected_range(start..end);
        }
    }

    /// Focus left the field: finalize pending input and collapse.
    pub fn end_editing<S: TextSurface + ?Sized>(&mut self, surface: &mut S) {
        if self.selection.is_selected() {
            self.selection.deselect(&self.ledger, surface);
            self.move_cursor_to_end(surface);
        }
        if !self.input_range(surface).is_empty() {
            self.tokenize_input(surface);
        }
        if !self.ledger.is_empty() {
            self.collapsed = true;
            tracing::debug!(tokens = self.ledger.len(), "collapsed");
        }
    }

    /// Focus returned (e.g. the collapsed summary was tapped)
    pub fn begin_editing(&mut self) {
        self.collapsed = false;
    }

    /// Summary shown while collapsed: the buffer without its final trailing
    /// marker and spacer.
    pub fn collapsed_summary<S: TextSurface + ?Sized>(&self, surface: &S) -> String {
        let len = surface.len_utf16();
        surface.slice(0..len.saturating_sub(2))
    }

    // =========================================================================
    // Host commands
    // =========================================================================

    /// Append a value as a token, replacing the pending input.
    pub fn append_value<S: TextSurface + ?Sized>(&mut self, surface: &mut S, value: P) {
        let title = self.delegate.title_for(&value);
        self.values.push(TokenValue::Value(value));
        self.append_token(surface, &title);
        self.delegate.notify(FieldEvent::TokenizedMatch);
        self.delegate.notify(FieldEvent::Changed);
    }

    /// Append the match at `index` (panics on an invalid index)
    pub fn select_match<S: TextSurface + ?Sized>(&mut self, surface: &mut S, index: usize) {
        assert!(
            index < self.matches.len(),
            "match index {} out of bounds ({} matches)",
            index,
            self.matches.len()
        );
        let value = self.matches[index].clone();
        self.append_value(surface, value);
    }

    /// Remove token `index` and its text (panics on an invalid index)
    pub fn remove_value<S: TextSurface + ?Sized>(&mut self, surface: &mut S, index: usize) {
        let was_selected = self.selection.selected() == Some(index);
        let range = self.remove_token(surface, index);
        surface.replace(range, &StyledText::new());
        if was_selected {
            self.move_cursor_to_end(surface);
        }
        self.delegate.notify(FieldEvent::Changed);
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Commit pending input as a token, or clear it when it is rejected.
    fn tokenize_input<S: TextSurface + ?Sized>(&mut self, surface: &mut S) {
        let input = self.input_text(surface);
        let sanitized = self.delegate.sanitize(&input);
        match tokenizer::finalize(&input, sanitized, &self.values) {
            Ok(title) => {
                self.values.push(TokenValue::Text(title.clone()));
                self.append_token(surface, &title);
                self.delegate.notify(FieldEvent::TokenizedInput);
            }
            Err(rejection) => {
                tracing::debug!(%rejection, "input rejected");
                self.clear_input_text(surface);
            }
        }
    }

    fn clear_input_text<S: TextSurface + ?Sized>(&mut self, surface: &mut S) {
        let range = self.input_range(surface);
        surface.replace(range, &StyledText::new());
        if self.selection.is_selected() {
            self.selection.deselect(&self.ledger, surface);
            self.move_cursor_to_end(surface);
        }
        self.hide_matches();
        self.delegate.notify(FieldEvent::Changed);
    }

    /// Stamp a token over everything after the last boundary. The caller has
    /// already pushed the token's value.
    fn append_token<S: TextSurface + ?Sized>(&mut self, surface: &mut S, title: &str) {
        let start = self.ledger.last_end();
        let end = surface.len_utf16();
        let mut styled = styled_token(title);
        styled.push(&SPACER.to_string(), StyleClass::Plain);
        surface.replace(start..end, &styled);
        self.ledger.append(start + styled.len_utf16() - SPACER.len_utf16());
        tracing::debug!(index = self.ledger.len() - 1, title, "token appended");

        if self.selection.is_selected() {
            self.selection.deselect(&self.ledger, surface);
        }
        self.move_cursor_to_end(surface);
        self.hide_matches();
    }

    /// Drop token `index` from values and ledger together. The buffer text
    /// is left to the caller; returns the range it occupied.
    fn remove_token<S: TextSurface + ?Sized>(&mut self, surface: &mut S, index: usize) -> Range<usize> {
        assert!(
            index < self.values.len(),
            "token index {} out of bounds ({} tokens)",
            index,
            self.values.len()
        );
        self.values.remove(index);
        let range = self.ledger.remove_at(index);
        self.selection.token_removed(index, surface);
        tracing::debug!(index, ?range, "token removed");
        self.delegate.notify(FieldEvent::TokenRemoved(index));
        range
    }

    fn select_token<S: TextSurface + ?Sized>(&mut self, surface: &mut S, index: usize) {
        if self.selection.selected() == Some(index) {
            // Already selected: only make sure the cursor still covers it
            let range = self.ledger.range_of(index);
            if surface.selected_range() != range {
                self.latch.arm();
                surface.set_selected_range(range);
            }
            return;
        }
        self.latch.arm();
        self.selection.select(index, &self.ledger, surface);
    }

    fn move_cursor_to_end<S: TextSurface + ?Sized>(&mut self, surface: &mut S) {
        let end = surface.len_utf16();
        self.latch.arm();
        surface.set_selected_range(end..end);
    }

    fn show_matches(&mut self) {
        if self.provider.is_none() || self.matches_visible {
            return;
        }
        self.matches_visible = true;
        self.delegate.notify(FieldEvent::ShowMatches);
    }

    fn hide_matches(&mut self) {
        if self.provider.is_none() || !self.matches_visible {
            return;
        }
        self.matches_visible = false;
        self.delegate.notify(FieldEvent::HideMatches);
    }
}
