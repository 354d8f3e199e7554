//! Utility modules

pub mod text;

pub use text::{eq_ignore_case, utf16_len};
