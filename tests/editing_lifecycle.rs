//! Focus, blur, collapse, submit, and remove-by-index tests

mod common;

use chipfield::commands::Cmd;
use chipfield::field::{FieldEvent, SelectionState, TextSurface};
use chipfield::messages::HostMsg;
use chipfield::update::update;
use common::{run, session_with_tokens, test_session};

// ========================================================================
// End of editing
// ========================================================================

#[test]
fn test_blur_tokenizes_pending_input_and_collapses() {
    let mut s = session_with_tokens(&["alice"]);
    run(&mut s, "type:bob\nblur");

    assert_eq!(s.field().titles(), vec!["alice", "bob"]);
    assert!(s.field().is_collapsed());
    assert_eq!(s.field().collapsed_summary(s.surface()), "To: alice, bob");
    assert!(!s.is_focused());
}

#[test]
fn test_blur_with_selected_token_deselects() {
    let mut s = session_with_tokens(&["alice"]);
    run(&mut s, "backspace\nblur");

    assert_eq!(s.field().selection_state(), SelectionState::NoSelection);
    assert_eq!(s.surface().selected_range(), 11..11);
    assert!(s.field().is_collapsed());
}

#[test]
fn test_blur_without_tokens_does_not_collapse() {
    let mut s = test_session();
    run(&mut s, "blur");
    assert!(!s.field().is_collapsed());
}

#[test]
fn test_blur_with_rejected_input_keeps_tokens() {
    let mut s = session_with_tokens(&["alice"]);
    run(&mut s, "type:ALICE\nblur");
    assert_eq!(s.field().token_count(), 1);
    assert_eq!(s.surface().text(), "To: alice, ");
    assert!(s.field().is_collapsed());
}

#[test]
fn test_focus_expands() {
    let mut s = session_with_tokens(&["alice"]);
    run(&mut s, "blur\nfocus");
    assert!(!s.field().is_collapsed());
    assert!(s.is_focused());
}

#[test]
fn test_typing_while_blurred_refocuses() {
    let mut s = session_with_tokens(&["alice"]);
    run(&mut s, "blur\ntype:b");
    assert!(s.is_focused());
    assert!(!s.field().is_collapsed());
    assert_eq!(s.field().input_text(s.surface()), "b");
}

// ========================================================================
// Submit
// ========================================================================

#[test]
fn test_return_on_empty_input_submits_titles() {
    let mut s = session_with_tokens(&["alice", "bob"]);
    let cmd = update(&mut s, HostMsg::Return);
    assert_eq!(
        cmd,
        Some(Cmd::Submit {
            titles: vec!["alice".to_string(), "bob".to_string()]
        })
    );
    assert_eq!(s.events(), &[FieldEvent::Return]);
}

#[test]
fn test_return_with_input_redraws() {
    let mut s = test_session();
    let cmds = run(&mut s, "type:a\nreturn");
    assert_eq!(cmds.last(), Some(&Some(Cmd::Redraw)));
}

// ========================================================================
// Remove by index
// ========================================================================

#[test]
fn test_interior_removal_reindexes() {
    let mut s = session_with_tokens(&["A", "Bob", "C"]);
    // "To: A, Bob, C, " ends [6, 11, 14]
    assert_eq!(s.field().ledger().ends(), &[6, 11, 14]);
    let removed = s.field().token_range(1).len();

    run(&mut s, "remove:1");

    assert_eq!(s.field().ledger().ends(), &[6, 14 - removed]);
    assert_eq!(s.field().titles(), vec!["A", "C"]);
    assert_eq!(s.surface().text(), "To: A, C, ");
    assert_eq!(
        s.events(),
        &[FieldEvent::TokenRemoved(1), FieldEvent::Changed]
    );
}

#[test]
fn test_append_then_remove_round_trips() {
    let mut s = test_session();
    let before_text = s.surface().text();
    let before_ledger = s.field().ledger().clone();

    s.append_value("Zed".to_string());
    s.remove_token(0);

    assert_eq!(s.surface().text(), before_text);
    assert_eq!(s.field().ledger(), &before_ledger);
    assert!(s.field().values().is_empty());
}

#[test]
fn test_remove_out_of_range_is_ignored() {
    let mut s = session_with_tokens(&["A"]);
    assert_eq!(update(&mut s, HostMsg::RemoveToken(1)), None);
    assert_eq!(s.field().token_count(), 1);
}
