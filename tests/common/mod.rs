//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use chipfield::commands::Cmd;
use chipfield::config::{FieldConfig, SanitizeMode};
use chipfield::contact::Contact;
use chipfield::field::Payload;
use chipfield::messages::parse_script;
use chipfield::session::Session;
use chipfield::update::update;

/// Fresh `To:` session with string payloads and the trim sanitize mode
pub fn test_session() -> Session<String> {
    Session::new("To:", SanitizeMode::Trim)
}

/// Session holding the given tokens, typed and committed with return.
/// Events from building it are cleared.
pub fn session_with_tokens(titles: &[&str]) -> Session<String> {
    let mut session = test_session();
    for title in titles {
        run(&mut session, &format!("type:{}\nreturn", title));
    }
    session.clear_events();
    session
}

/// Replay a gesture script, returning each update's command
pub fn run<P: Payload>(session: &mut Session<P>, script: &str) -> Vec<Option<Cmd>> {
    parse_script(script)
        .expect("valid gesture script")
        .into_iter()
        .map(|msg| update(session, msg))
        .collect()
}

pub fn test_contacts() -> Vec<Contact> {
    vec![
        Contact::new("Alice Adams").with_email("alice@example.com"),
        Contact::new("Alicia Keys").with_email("alicia@example.com"),
        Contact::new("Bob Brown"),
        Contact::new("Carol White").with_email("carol@example.com"),
    ]
}

/// Session with a fuzzy match list over [`test_contacts`]
pub fn contact_session() -> Session<Contact> {
    let config = FieldConfig {
        contacts: test_contacts(),
        ..FieldConfig::default()
    };
    Session::from_config(&config)
}
