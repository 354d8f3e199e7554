//! Update function for the Elm-style architecture
//!
//! All host gestures flow through [`update`], which turns each one into the
//! call sequence a host text view would produce against the field.

use crate::commands::Cmd;
use crate::field::{FieldEvent, Payload, TextSurface, LINE_BREAK};
use crate::messages::HostMsg;
use crate::session::Session;

/// Main update function
pub fn update<P: Payload>(session: &mut Session<P>, msg: HostMsg) -> Option<Cmd> {
    let before = session.snapshot();
    let first_event = session.events().len();
    tracing::debug!(?msg, "update");

    match msg {
        HostMsg::Type(text) => {
            session.focus();
            for ch in text.chars() {
                let range = session.surface().selected_range();
                session.propose(range, ch.encode_utf8(&mut [0; 4]));
            }
        }

        HostMsg::Paste(text) => {
            session.focus();
            let range = session.surface().selected_range();
            session.propose(range, &text);
        }

        HostMsg::Backspace => {
            session.focus();
            let selection = session.surface().selected_range();
            let range = if selection.is_empty() {
                if selection.start == 0 {
                    return None;
                }
                session.surface().prev_boundary(selection.start)..selection.start
            } else {
                selection
            };
            session.propose(range, "");
        }

        HostMsg::Return => {
            session.focus();
            let range = session.surface().selected_range();
            session.propose(range, LINE_BREAK);
        }

        HostMsg::Tap(offset) => {
            session.focus();
            session.set_selection(offset..offset);
        }

        HostMsg::Focus => session.focus(),

        HostMsg::Blur => session.blur(),

        HostMsg::ChooseMatch(index) => {
            let available = session.field().matches().len();
            if index >= available {
                tracing::warn!(index, available, "no such match row");
                return None;
            }
            session.choose_match(index);
        }

        HostMsg::RemoveToken(index) => {
            let count = session.field().token_count();
            if index >= count {
                tracing::warn!(index, count, "no such token");
                return None;
            }
            session.remove_token(index);
        }
    }

    let after = session.snapshot();
    if let Some(diff) = before.diff(&after) {
        tracing::debug!("field: {}", diff);
    }

    let fired = &session.events()[first_event..];
    if fired.contains(&FieldEvent::Return) {
        return Some(Cmd::Submit {
            titles: session.field().titles(),
        });
    }
    if !fired.is_empty() || before != after {
        Some(Cmd::Redraw)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SanitizeMode;

    fn session() -> Session<String> {
        Session::new("To:", SanitizeMode::Trim)
    }

    fn run(session: &mut Session<String>, script: &str) -> Vec<Option<Cmd>> {
        crate::messages::parse_script(script)
            .unwrap()
            .into_iter()
            .map(|msg| update(session, msg))
            .collect()
    }

    #[test]
    fn test_type_and_return() {
        let mut s = session();
        run(&mut s, "type:alice\nreturn\ntype:bob\nreturn");
        assert_eq!(s.surface().text(), "To: alice, bob, ");
        assert_eq!(s.field().ledger().ends(), &[10, 15]);
    }

    #[test]
    fn test_return_on_empty_input_submits() {
        let mut s = session();
        run(&mut s, "type:alice\nreturn");
        let cmd = update(&mut s, HostMsg::Return);
        assert_eq!(
            cmd,
            Some(Cmd::Submit {
                titles: vec!["alice".to_string()]
            })
        );
    }

    #[test]
    fn test_backspace_twice_deletes_last_token() {
        let mut s = session();
        run(&mut s, "type:alice\nreturn\ntype:bob\nreturn");
        update(&mut s, HostMsg::Backspace);
        assert_eq!(s.field().selected_token(), Some(1));
        assert_eq!(s.surface().text(), "To: alice, bob, ");
        update(&mut s, HostMsg::Backspace);
        assert_eq!(s.surface().text(), "To: alice, ");
        assert_eq!(s.field().selected_token(), None);
        assert_eq!(s.surface().selected_range(), 11..11);
    }

    #[test]
    fn test_invalid_indices_are_ignored() {
        let mut s = session();
        assert_eq!(update(&mut s, HostMsg::ChooseMatch(0)), None);
        assert_eq!(update(&mut s, HostMsg::RemoveToken(2)), None);
    }

    #[test]
    fn test_tap_without_change_needs_no_redraw() {
        let mut s = session();
        assert_eq!(update(&mut s, HostMsg::Tap(4)), None);
    }

    #[test]
    fn test_typing_requests_redraw() {
        let mut s = session();
        assert_eq!(update(&mut s, HostMsg::Type("a".into())), Some(Cmd::Redraw));
    }
}
