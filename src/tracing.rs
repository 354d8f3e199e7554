//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging and a serializable snapshot of field state
//! for diffing across updates.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=chipfield::field=trace` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/chipfield/logs/chipfield.log` with daily
//! rotation. File logging uses debug level by default.

use std::ops::Range;

use serde::Serialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::field::{FieldDelegate, Payload, SelectionState, TextSurface, TokenField};

/// Initialize tracing subscriber with console and file logging
///
/// Console output goes to stderr and respects RUST_LOG (default `warn`).
/// File logging writes to the config logs dir with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE_NAME);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of field state for diffing and JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSnapshot {
    pub text: String,
    pub tokens: Vec<TokenSnapshot>,
    pub input: String,
    pub selection: SelectionState,
    pub cursor: Range<usize>,
    pub collapsed: bool,
    pub matches_visible: bool,
    pub matches: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenSnapshot {
    pub title: String,
    pub range: Range<usize>,
}

impl FieldSnapshot {
    pub fn capture<P, D, S>(field: &TokenField<P, D>, surface: &S) -> Self
    where
        P: Payload,
        D: FieldDelegate<P>,
        S: TextSurface + ?Sized,
    {
        Self {
            text: surface.text(),
            tokens: field
                .titles()
                .into_iter()
                .zip(field.ledger().ranges())
                .map(|(title, range)| TokenSnapshot { title, range })
                .collect(),
            input: field.input_text(surface),
            selection: field.selection_state(),
            cursor: surface.selected_range(),
            collapsed: field.is_collapsed(),
            matches_visible: field.matches_visible(),
            matches: field.matches().iter().map(Payload::title).collect(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &FieldSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.tokens.len() != other.tokens.len() {
            changes.push(format!(
                "tokens: {} → {}",
                self.tokens.len(),
                other.tokens.len()
            ));
        }
        if self.input != other.input {
            changes.push(format!("input: {:?} → {:?}", self.input, other.input));
        }
        if self.selection != other.selection {
            changes.push(format!(
                "selection: {:?} → {:?}",
                self.selection, other.selection
            ));
        }
        if self.cursor != other.cursor {
            changes.push(format!("cursor: {:?} → {:?}", self.cursor, other.cursor));
        }
        if self.collapsed != other.collapsed {
            let status = if other.collapsed {
                "collapsed"
            } else {
                "expanded"
            };
            changes.push(status.to_string());
        }
        if self.matches_visible != other.matches_visible {
            let status = if other.matches_visible {
                "shown"
            } else {
                "hidden"
            };
            changes.push(format!("matches {}", status));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
