//! Property-based invariant tests for the token field.
//!
//! 1. Ledger ranges stay ordered, non-overlapping, and contiguous from the
//!    prefix end through the last boundary, for any append/remove sequence.
//! 2. `values[i]` and the buffer text at `range_of(i)` describe the same
//!    token after any gesture sequence.
//! 3. At most one token is highlighted, and it is the selected one.
//! 4. The selection latch never stays armed once the host settles.
//! 5. Backspace at the pending-input start never changes the buffer.
//! 6. Appending then removing a value restores the buffer and ledger.

mod common;

use chipfield::field::{StyleClass, TextSurface, TokenLedger};
use chipfield::messages::HostMsg;
use chipfield::session::Session;
use chipfield::update::update;
use chipfield::util::eq_ignore_case;
use common::{session_with_tokens, test_session};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn gesture_strategy() -> impl Strategy<Value = HostMsg> {
    prop_oneof![
        4 => "[a-cA-C é😀]{1,3}".prop_map(HostMsg::Type),
        1 => "[a-c]{1,4}".prop_map(HostMsg::Paste),
        3 => Just(HostMsg::Backspace),
        2 => Just(HostMsg::Return),
        2 => (0usize..40).prop_map(HostMsg::Tap),
        1 => Just(HostMsg::Blur),
        1 => Just(HostMsg::Focus),
        1 => (0usize..6).prop_map(HostMsg::RemoveToken),
    ]
}

fn title_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z]{1,5}", 1..6).prop_map(|set| set.into_iter().collect())
}

fn check_field(session: &Session<String>) -> Result<(), TestCaseError> {
    let field = session.field();
    let surface = session.surface();
    let ledger = field.ledger();

    // Contiguous ranges from the origin
    let mut expected_start = ledger.origin();
    for range in ledger.ranges() {
        prop_assert_eq!(range.start, expected_start);
        prop_assert!(range.end > range.start);
        expected_start = range.end;
    }
    prop_assert_eq!(expected_start, ledger.last_end());

    // Values and ledger agree token by token
    prop_assert_eq!(field.values().len(), ledger.len());
    for (i, title) in field.titles().iter().enumerate() {
        prop_assert_eq!(surface.slice(field.token_range(i)), format!(" {},", title));
    }

    // The spacer after the last boundary is always there
    prop_assert_eq!(
        surface.slice(ledger.last_end()..ledger.last_end() + 1),
        " ".to_string()
    );
    prop_assert_eq!(surface.slice(0..ledger.origin()), field.prefix().to_string());

    // Highlight matches the selection state
    let highlighted: Vec<usize> = ledger
        .ranges()
        .enumerate()
        .filter(|(_, range)| surface.class_at(range.start) == Some(StyleClass::SelectedMarker))
        .map(|(i, _)| i)
        .collect();
    prop_assert!(highlighted.len() <= 1);
    prop_assert_eq!(highlighted.first().copied(), field.selected_token());
    if let Some(index) = field.selected_token() {
        prop_assert_eq!(surface.selected_range(), field.token_range(index));
    }

    prop_assert!(!field.latch().is_armed());

    // No two tokens share a title, ignoring case
    let titles = field.titles();
    for (i, a) in titles.iter().enumerate() {
        for b in &titles[i + 1..] {
            prop_assert!(!eq_ignore_case(a, b), "duplicate titles {:?} and {:?}", a, b);
        }
    }
    Ok(())
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Ledger boundary invariant
// ═════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
enum LedgerOp {
    Append(usize),
    Remove(usize),
}

fn ledger_op_strategy() -> impl Strategy<Value = LedgerOp> {
    prop_oneof![
        3 => (2usize..12).prop_map(LedgerOp::Append),
        2 => (0usize..8).prop_map(LedgerOp::Remove),
    ]
}

proptest! {
    #[test]
    fn ledger_stays_contiguous(ops in prop::collection::vec(ledger_op_strategy(), 0..40)) {
        let mut ledger = TokenLedger::new(3);
        let mut lengths: Vec<usize> = Vec::new();

        for op in ops {
            match op {
                LedgerOp::Append(len) => {
                    ledger.append(ledger.last_end() + len);
                    lengths.push(len);
                }
                LedgerOp::Remove(index) if index < lengths.len() => {
                    let range = ledger.remove_at(index);
                    prop_assert_eq!(range.len(), lengths.remove(index));
                }
                LedgerOp::Remove(_) => {}
            }

            let ranges: Vec<_> = ledger.ranges().collect();
            prop_assert_eq!(ranges.len(), lengths.len());
            let mut start = 3;
            for (range, len) in ranges.iter().zip(&lengths) {
                prop_assert_eq!(range.clone(), start..start + len);
                start += len;
            }
            prop_assert_eq!(ledger.last_end(), start);
        }
    }
}

proptest! {
    #[test]
    fn index_containing_agrees_with_ranges(
        lengths in prop::collection::vec(2usize..10, 0..10),
        offset in 0usize..100,
    ) {
        let mut ledger = TokenLedger::new(3);
        for len in &lengths {
            ledger.append(ledger.last_end() + len);
        }
        let expected = ledger.ranges().position(|range| range.contains(&offset));
        prop_assert_eq!(ledger.index_containing(offset), expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-4. Random gesture sequences keep the field coherent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn gestures_keep_field_coherent(gestures in prop::collection::vec(gesture_strategy(), 0..60)) {
        let mut session = test_session();
        for msg in gestures {
            update(&mut session, msg);
            check_field(&session)?;
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Backspace at the boundary selects without deleting
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn boundary_backspace_never_deletes(titles in title_strategy()) {
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let mut session = session_with_tokens(&refs);
        let before = session.surface().text();

        update(&mut session, HostMsg::Backspace);

        prop_assert_eq!(session.surface().text(), before);
        prop_assert_eq!(session.field().selected_token(), Some(titles.len() - 1));
        check_field(&session)?;
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Append then remove round-trips
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn append_remove_round_trip(titles in title_strategy(), value in "[A-Z][a-z]{0,6}") {
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let mut session = session_with_tokens(&refs);
        let text = session.surface().text();
        let ledger = session.field().ledger().clone();

        session.append_value(value);
        let index = session.field().token_count() - 1;
        session.remove_token(index);

        prop_assert_eq!(session.surface().text(), text);
        prop_assert_eq!(session.field().ledger(), &ledger);
        check_field(&session)?;
    }
}
