//! Style span generation for rendered tokens.
//!
//! A token is always rendered as `<separator><title><trailing>`: a one-unit
//! leading marker, the title, and a one-unit trailing marker. Given only the
//! token's buffer range and a highlight flag, [`spans`] returns the three
//! sub-ranges together with the style class the host should paint on each.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::surface::StyledText;

/// Leading marker that opens every token.
pub const LEADING_MARKER: char = ' ';

/// Trailing marker that closes every token.
pub const TRAILING_MARKER: char = ',';

/// Plain spacer kept between the last boundary and the pending input.
pub const SPACER: char = ' ';

/// Length of each marker in UTF-16 code units.
pub const MARKER_LEN: usize = 1;

/// Named style classes the core asks the host to paint.
///
/// Colors are a host concern; the core only decides which class a range gets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleClass {
    /// Free text and spacers
    #[default]
    Plain,
    /// The fixed, non-editable header
    Prefix,
    /// Title of an unselected token (emphasis)
    Title,
    /// Markers of an unselected token (normal)
    Separator,
    /// Leading marker of the selected token (highlight background)
    SelectedMarker,
    /// Title of the selected token (inverted foreground on highlight)
    SelectedTitle,
    /// Trailing marker of the selected token (blends into highlight)
    SelectedSeparator,
}

impl StyleClass {
    /// Check if this class belongs to a highlighted token
    pub fn is_highlighted(self) -> bool {
        matches!(
            self,
            StyleClass::SelectedMarker | StyleClass::SelectedTitle | StyleClass::SelectedSeparator
        )
    }
}

/// A buffer range paired with the style class it should receive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyledRange {
    pub range: Range<usize>,
    pub class: StyleClass,
}

impl StyledRange {
    pub fn new(range: Range<usize>, class: StyleClass) -> Self {
        Self { range, class }
    }
}

/// The three named sub-ranges of a rendered token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSpans {
    /// Leading marker
    pub separator: StyledRange,
    /// Everything between the markers
    pub title: StyledRange,
    /// Trailing marker
    pub trailing: StyledRange,
}

impl TokenSpans {
    /// Iterate the spans in buffer order
    pub fn iter(&self) -> impl Iterator<Item = &StyledRange> {
        [&self.separator, &self.title, &self.trailing].into_iter()
    }
}

/// Split a token range into its styled sub-ranges.
///
/// Pure: consulted identically when a token is first stamped and whenever its
/// highlight is toggled.
pub fn spans(range: Range<usize>, highlighted: bool) -> TokenSpans {
    debug_assert!(
        range.len() >= 2 * MARKER_LEN,
        "token range {:?} cannot hold both markers",
        range
    );

    let title_start = (range.start + MARKER_LEN).min(range.end);
    let title_end = range.end.saturating_sub(MARKER_LEN).max(title_start);

    let (separator, title, trailing) = if highlighted {
        (
            StyleClass::SelectedMarker,
            StyleClass::SelectedTitle,
            StyleClass::SelectedSeparator,
        )
    } else {
        (StyleClass::Plain, StyleClass::Title, StyleClass::Separator)
    };

    TokenSpans {
        separator: StyledRange::new(range.start..title_start, separator),
        title: StyledRange::new(title_start..title_end, title),
        trailing: StyledRange::new(title_end..range.end, trailing),
    }
}

/// Raw text of a token with the given title.
pub fn token_text(title: &str) -> String {
    format!("{LEADING_MARKER}{title}{TRAILING_MARKER}")
}

/// Styled, unhighlighted text of a token ready to be stamped into the buffer.
pub fn styled_token(title: &str) -> StyledText {
    let mut styled = StyledText::plain(&token_text(title));
    for span in spans(0..styled.len_utf16(), false).iter() {
        styled.set_style(span.range.clone(), span.class);
    }
    styled
}
