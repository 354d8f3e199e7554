//! Tokenizer: turns pending free text into a token title.

use thiserror::Error;

use super::payload::{Payload, TokenValue};
use crate::util::eq_ignore_case;

/// Why pending input did not become a token. Rejected input is cleared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("pending input is empty after sanitizing")]
    Empty,
    #[error("a token titled {title:?} already exists")]
    Duplicate { title: String },
}

/// Decide the title for pending input.
///
/// `sanitized` is the delegate's cleaned-up input, if it provided one.
/// Only values with a text form take part in duplicate detection, compared
/// case-insensitively.
pub fn finalize<P: Payload>(
    pending: &str,
    sanitized: Option<String>,
    existing: &[TokenValue<P>],
) -> Result<String, Rejection> {
    let title = sanitized.unwrap_or_else(|| pending.to_string());
    if title.is_empty() {
        return Err(Rejection::Empty);
    }
    let duplicate = existing
        .iter()
        .filter_map(TokenValue::as_text)
        .any(|text| eq_ignore_case(text, &title));
    if duplicate {
        return Err(Rejection::Duplicate { title });
    }
    Ok(title)
}
