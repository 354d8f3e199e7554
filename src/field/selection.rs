//! Token selection controller and the self-notification latch.

use serde::Serialize;

use super::ledger::TokenLedger;
use super::spans::spans;
use super::surface::TextSurface;

/// Which token, if any, is selected. At most one token is selected at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    NoSelection,
    TokenSelected(usize),
}

impl SelectionState {
    /// Index of the selected token
    pub fn selected(self) -> Option<usize> {
        match self {
            SelectionState::NoSelection => None,
            SelectionState::TokenSelected(index) => Some(index),
        }
    }

    pub fn is_selected(self) -> bool {
        matches!(self, SelectionState::TokenSelected(_))
    }
}

/// One-shot latch that makes the field ignore the selection-change
/// notification caused by its own cursor moves.
///
/// Armed immediately before every programmatic selection mutation and
/// consumed by the very next selection-change callback, whatever its origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionLatch {
    armed: bool,
}

impl SelectionLatch {
    pub fn arm(&mut self) {
        self.armed = true;
    }

    /// Returns true if the latch was armed, disarming it
    pub fn consume(&mut self) -> bool {
        std::mem::take(&mut self.armed)
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

/// Tracks the selected token and keeps its highlight in sync with the surface.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn is_selected(&self) -> bool {
        self.state.is_selected()
    }

    /// Select token `index`: cover it with the cursor, move the highlight to
    /// it, and block native edit actions.
    ///
    /// Returns false (and does nothing) if it is already selected. Callers arm
    /// the latch first since this moves the cursor.
    pub fn select<S: TextSurface + ?Sized>(
        &mut self,
        index: usize,
        ledger: &TokenLedger,
        surface: &mut S,
    ) -> bool {
        if self.selected() == Some(index) {
            return false;
        }
        let range = ledger.range_of(index);
        surface.set_selected_range(range.clone());
        if let Some(previous) = self.selected() {
            paint(surface, ledger, previous, false);
        }
        self.state = SelectionState::TokenSelected(index);
        paint(surface, ledger, index, true);
        surface.set_capability_override(true);
        tracing::debug!(index, ?range, "token selected");
        true
    }

    /// Clear the highlight and return to `NoSelection`
    pub fn deselect<S: TextSurface + ?Sized>(&mut self, ledger: &TokenLedger, surface: &mut S) {
        let Some(index) = self.selected() else {
            return;
        };
        paint(surface, ledger, index, false);
        self.state = SelectionState::NoSelection;
        surface.set_capability_override(false);
        tracing::debug!(index, "token deselected");
    }

    /// Keep the selection coherent after the token at `removed` disappeared.
    /// No repaint: the removed token's text is gone.
    pub fn token_removed<S: TextSurface + ?Sized>(&mut self, removed: usize, surface: &mut S) {
        match self.state {
            SelectionState::TokenSelected(index) if index == removed => {
                self.state = SelectionState::NoSelection;
                surface.set_capability_override(false);
            }
            SelectionState::TokenSelected(index) if index > removed => {
                self.state = SelectionState::TokenSelected(index - 1);
            }
            _ => {}
        }
    }

    /// Whether the host's native contextual edit actions may run
    pub fn can_perform_action(&self) -> bool {
        !self.is_selected()
    }
}

fn paint<S: TextSurface + ?Sized>(
    surface: &mut S,
    ledger: &TokenLedger,
    index: usize,
    highlighted: bool,
) {
    for span in spans(ledger.range_of(index), highlighted).iter() {
        surface.set_style(span.range.clone(), span.class);
    }
}
