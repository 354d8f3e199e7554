//! Terminal rendering of a field and its match list.
//!
//! [`render_ansi`] paints each styled run with the theme's colors.
//! [`render_plain`] is the escape-free form: the caret shows as `|` and a
//! non-empty selection as `[...]`.

use std::fmt::Write;

use crate::field::{MemorySurface, Payload, TextSurface};
use crate::session::Session;
use crate::theme::{Color, Theme};

const RESET: &str = "\x1b[0m";

/// Render the surface's styled runs with ANSI colors
pub fn render_ansi(surface: &MemorySurface, theme: &Theme) -> String {
    let mut out = String::new();
    for run in surface.runs() {
        let style = theme.style(run.class);
        out.push_str(&style.fg.ansi_fg());
        if let Some(bg) = style.bg {
            out.push_str(&bg.ansi_bg());
        }
        out.push_str(&surface.slice(run.range));
        out.push_str(RESET);
    }
    out
}

/// Render the text with the caret or selection marked
pub fn render_plain(surface: &MemorySurface) -> String {
    let selection = surface.selected_range();
    let len = surface.len_utf16();
    let before = surface.slice(0..selection.start);
    let after = surface.slice(selection.end..len);
    if selection.is_empty() {
        format!("{}|{}", before, after)
    } else {
        format!("{}[{}]{}", before, surface.slice(selection), after)
    }
}

/// Render match rows: index and title, then the subtitle indented below
pub fn render_matches<P: Payload>(matches: &[P], theme: Option<&Theme>) -> Vec<String> {
    let paint = |color: Color, text: &str| match theme {
        Some(_) => format!("{}{}{}", color.ansi_fg(), text, RESET),
        None => text.to_string(),
    };
    let (title_color, subtitle_color) = theme
        .map(|t| (t.matches.title, t.matches.subtitle))
        .unwrap_or_default();

    let mut rows = Vec::with_capacity(matches.len());
    for (index, candidate) in matches.iter().enumerate() {
        let mut row = format!("  {:>2}  {}", index, paint(title_color, &candidate.title()));
        if let Some(subtitle) = candidate.subtitle() {
            let _ = write!(row, "\n      {}", paint(subtitle_color, &subtitle));
        }
        rows.push(row);
    }
    rows
}

/// Render a whole session frame: the field (or its collapsed summary)
/// followed by the visible match rows
pub fn render_session<P: Payload>(session: &Session<P>, theme: Option<&Theme>) -> String {
    let field = session.field();
    let surface = session.surface();

    let mut frame = if field.is_collapsed() {
        let summary = field.collapsed_summary(surface);
        match theme {
            Some(theme) => format!("{}{}{}", theme.field.foreground.ansi_fg(), summary, RESET),
            None => summary,
        }
    } else {
        match theme {
            Some(theme) => render_ansi(surface, theme),
            None => render_plain(surface),
        }
    };

    if field.matches_visible() {
        for row in render_matches(field.matches(), theme) {
            frame.push('\n');
            frame.push_str(&row);
        }
    }
    frame
}
