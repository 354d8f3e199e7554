//! chipfield - inline token ("chip") entry for styled text fields
//!
//! The [`field`] module holds the host-independent state machine. The rest of
//! the crate is a small Elm-style host around it: gestures ([`messages`]) are
//! applied to a [`session::Session`] by [`update::update`], which returns a
//! [`commands::Cmd`] for the host to act on.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod contact;
pub mod field;
pub mod messages;
pub mod render;
pub mod session;
pub mod theme;
pub mod tracing;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::FieldConfig;
pub use contact::Contact;
pub use field::{FieldEvent, TokenField};
pub use messages::HostMsg;
pub use session::Session;
pub use theme::Theme;
