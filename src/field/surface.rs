//! Host text surface contract and an in-memory implementation.
//!
//! The core never owns the buffer. It reads through [`TextSurface`] and mutates
//! only through range-replace and restyle commands. All offsets are UTF-16 code
//! units, the unit host text views address their storage in.
//!
//! [`MemorySurface`] is a rope-backed surface used by the session layer, the
//! tests, and the demo binary.

use std::ops::Range;

use ropey::Rope;

use super::spans::{StyleClass, StyledRange};
use crate::util::utf16_len;

/// Text plus one style class per UTF-16 code unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    text: String,
    classes: Vec<StyleClass>,
}

impl StyledText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text styled entirely with [`StyleClass::Plain`]
    pub fn plain(text: &str) -> Self {
        Self::with_class(text, StyleClass::Plain)
    }

    /// Text styled entirely with one class
    pub fn with_class(text: &str, class: StyleClass) -> Self {
        Self {
            text: text.to_string(),
            classes: vec![class; utf16_len(text)],
        }
    }

    /// Append a run of text with a single class
    pub fn push(&mut self, text: &str, class: StyleClass) {
        self.text.push_str(text);
        self.classes.extend(std::iter::repeat(class).take(utf16_len(text)));
    }

    /// Restyle a sub-range (clamped to the text length)
    pub fn set_style(&mut self, range: Range<usize>, class: StyleClass) {
        let end = range.end.min(self.classes.len());
        let start = range.start.min(end);
        for c in &mut self.classes[start..end] {
            *c = class;
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in UTF-16 code units
    pub fn len_utf16(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Per-unit style classes
    pub fn classes(&self) -> &[StyleClass] {
        &self.classes
    }

    /// Coalesced runs of identical style
    pub fn runs(&self) -> Vec<StyledRange> {
        coalesce(&self.classes)
    }
}

fn coalesce(classes: &[StyleClass]) -> Vec<StyledRange> {
    let mut runs: Vec<StyledRange> = Vec::new();
    for (i, &class) in classes.iter().enumerate() {
        match runs.last_mut() {
            Some(run) if run.class == class => run.range.end = i + 1,
            _ => runs.push(StyledRange::new(i..i + 1, class)),
        }
    }
    runs
}

/// Capability set the core needs from the host's mutable styled-text surface.
pub trait TextSurface {
    /// Current text content
    fn text(&self) -> String;

    /// Total length in UTF-16 code units
    fn len_utf16(&self) -> usize {
        utf16_len(&self.text())
    }

    /// Text in a UTF-16 range (clamped to the buffer)
    fn slice(&self, range: Range<usize>) -> String {
        let units: Vec<u16> = self.text().encode_utf16().collect();
        let end = range.end.min(units.len());
        let start = range.start.min(end);
        String::from_utf16_lossy(&units[start..end])
    }

    /// Replace a range with styled text
    fn replace(&mut self, range: Range<usize>, text: &StyledText);

    /// Restyle a range without changing its text
    fn set_style(&mut self, range: Range<usize>, class: StyleClass);

    /// Current cursor/selection range
    fn selected_range(&self) -> Range<usize>;

    /// Move the cursor/selection. Hosts report the move back through
    /// `TokenField::selection_did_change`.
    fn set_selected_range(&mut self, range: Range<usize>);

    /// Block (or restore) the host's native contextual edit actions
    fn set_capability_override(&mut self, blocked: bool);
}

/// Rope-backed in-memory surface.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    rope: Rope,
    /// One class per UTF-16 code unit
    classes: Vec<StyleClass>,
    selection: Range<usize>,
    capability_blocked: bool,
    /// Set by every `set_selected_range`, cleared by the host loop
    selection_changed: bool,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface holding plain text, cursor at the end
    pub fn from_text(text: &str) -> Self {
        let len = utf16_len(text);
        Self {
            rope: Rope::from_str(text),
            classes: vec![StyleClass::Plain; len],
            selection: len..len,
            capability_blocked: false,
            selection_changed: false,
        }
    }

    /// Full content with styles
    pub fn styled(&self) -> StyledText {
        StyledText {
            text: self.rope.to_string(),
            classes: self.classes.clone(),
        }
    }

    /// Style class at a UTF-16 offset
    pub fn class_at(&self, offset: usize) -> Option<StyleClass> {
        self.classes.get(offset).copied()
    }

    /// Coalesced style runs over the whole buffer
    pub fn runs(&self) -> Vec<StyledRange> {
        coalesce(&self.classes)
    }

    /// Whether native edit actions are currently blocked
    pub fn capability_blocked(&self) -> bool {
        self.capability_blocked
    }

    /// Returns true (once) if the selection was set since the last call
    pub fn take_selection_changed(&mut self) -> bool {
        std::mem::take(&mut self.selection_changed)
    }

    /// Offset of the character boundary before `offset`
    pub fn prev_boundary(&self, offset: usize) -> usize {
        let char_idx = self.char_index(offset);
        if char_idx == 0 {
            0
        } else {
            self.rope.char_to_utf16_cu(char_idx - 1)
        }
    }

    /// Convert a UTF-16 offset to a char index (clamped)
    fn char_index(&self, offset: usize) -> usize {
        self.rope
            .utf16_cu_to_char(offset.min(self.rope.len_utf16_cu()))
    }

    /// Round an offset down to the start of the character it falls in.
    /// Offsets inside a surrogate pair land before the pair.
    fn align(&self, offset: usize) -> usize {
        self.rope.char_to_utf16_cu(self.char_index(offset))
    }

    /// Clamp to the buffer and snap both ends to character boundaries, so
    /// the rope and the per-unit classes always cover the same units.
    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let start = self.align(range.start);
        let end = self.align(range.end).max(start);
        start..end
    }
}

/// Where an offset lands after `edit` was replaced by `inserted` units.
fn shift_offset(offset: usize, edit: &Range<usize>, inserted: usize) -> usize {
    if offset <= edit.start {
        offset
    } else if offset >= edit.end {
        offset - edit.len() + inserted
    } else {
        edit.start + inserted
    }
}

impl TextSurface for MemorySurface {
    fn text(&self) -> String {
        self.rope.to_string()
    }

    fn len_utf16(&self) -> usize {
        self.rope.len_utf16_cu()
    }

    fn slice(&self, range: Range<usize>) -> String {
        let range = self.clamp(range);
        let start = self.char_index(range.start);
        let end = self.char_index(range.end);
        self.rope.slice(start..end).to_string()
    }

    fn replace(&mut self, range: Range<usize>, text: &StyledText) {
        let range = self.clamp(range);
        let start = self.char_index(range.start);
        let end = self.char_index(range.end);
        self.rope.remove(start..end);
        self.rope.insert(start, text.as_str());
        self.classes
            .splice(range.clone(), text.classes().iter().copied());

        let inserted = text.len_utf16();
        let sel_start = shift_offset(self.selection.start, &range, inserted);
        let sel_end = shift_offset(self.selection.end, &range, inserted);
        self.selection = sel_start..sel_end.max(sel_start);
    }

    fn set_style(&mut self, range: Range<usize>, class: StyleClass) {
        let range = self.clamp(range);
        for c in &mut self.classes[range] {
            *c = class;
        }
    }

    fn selected_range(&self) -> Range<usize> {
        self.selection.clone()
    }

    fn set_selected_range(&mut self, range: Range<usize>) {
        self.selection = self.clamp(range);
        self.selection_changed = true;
    }

    fn set_capability_override(&mut self, blocked: bool) {
        self.capability_blocked = blocked;
    }
}
