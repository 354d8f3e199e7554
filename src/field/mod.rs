//! Inline token entry for a single-line styled text surface.
//!
//! A [`TokenField`] turns typed free text into discrete "chips" stamped inline
//! after a fixed prefix, e.g. `To: Alice, Bob, car|`. The field never owns the
//! text buffer: it reads and mutates it through a host-provided
//! [`TextSurface`] and reports what happened to a [`FieldDelegate`].
//!
//! # Architecture
//!
//! - [`TokenLedger`]: ordered table of token boundaries over the buffer
//! - [`spans`]: the styled sub-ranges of a rendered token
//! - [`tokenizer`]: pending input to token title, with duplicate rejection
//! - [`SelectionController`] / [`SelectionLatch`]: single-token selection and
//!   the guard against self-caused selection callbacks
//! - [`TokenField`]: the edit interpreter tying the above together
//! - [`MatchProvider`] / [`FuzzyMatcher`]: optional autocomplete candidates
//! - [`MemorySurface`]: rope-backed in-memory host surface
//!
//! # Example
//!
//! ```ignore
//! use chipfield::field::{MemorySurface, TokenField};
//!
//! let mut surface = MemorySurface::new();
//! let mut field: TokenField = TokenField::new("To:", ());
//! field.attach(&mut surface);
//! field.append_value(&mut surface, "Alice".to_string());
//!
//! assert_eq!(field.titles(), vec!["Alice"]);
//! ```

mod events;
mod interpreter;
mod ledger;
mod matches;
mod payload;
mod selection;
pub mod spans;
mod surface;
pub mod tokenizer;

pub use events::{EditDecision, FieldDelegate, FieldEvent};
pub use interpreter::{TokenField, LINE_BREAK};
pub use ledger::TokenLedger;
pub use matches::{FuzzyMatcher, MatchProvider};
pub use payload::{Payload, TokenValue};
pub use selection::{SelectionController, SelectionLatch, SelectionState};
pub use spans::{StyleClass, StyledRange, TokenSpans};
pub use surface::{MemorySurface, StyledText, TextSurface};
pub use tokenizer::Rejection;
