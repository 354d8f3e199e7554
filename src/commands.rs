//! Command types for the Elm-style architecture
//!
//! Commands represent side effects the host performs after an update.
//! An update that changes nothing returns no command at all.

/// Side effects requested by [`crate::update::update`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// The field or its match list changed and should be redrawn
    Redraw,
    /// Return was pressed with no pending input: the entry is complete
    Submit { titles: Vec<String> },
}

impl Cmd {
    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        matches!(self, Cmd::Redraw | Cmd::Submit { .. })
    }

    /// Titles carried by a submit
    pub fn submitted(&self) -> Option<&[String]> {
        match self {
            Cmd::Submit { titles } => Some(titles),
            Cmd::Redraw => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_redraw() {
        assert!(Cmd::Redraw.needs_redraw());
        assert!(Cmd::Submit { titles: Vec::new() }.needs_redraw());
    }

    #[test]
    fn test_submitted() {
        let cmd = Cmd::Submit {
            titles: vec!["a".to_string()],
        };
        assert_eq!(cmd.submitted(), Some(&["a".to_string()][..]));
        assert_eq!(Cmd::Redraw.submitted(), None);
    }
}
