//! Message types for the Elm-style architecture
//!
//! Every host gesture the demo session understands is a [`HostMsg`]. Gestures
//! can also be written as a small script, one per line or CLI argument:
//!
//! ```text
//! type:alice      insert text at the cursor, one character at a time
//! paste:a, b      insert text at the cursor in one edit
//! backspace       delete before the cursor (alias: bs)
//! return          press return (alias: enter)
//! tap:12          put the cursor at UTF-16 offset 12
//! focus / blur    begin or end editing
//! choose:0        append match row 0
//! remove:1        remove token 1
//! ```

use std::str::FromStr;

use thiserror::Error;

/// Host gestures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMsg {
    /// Type text character by character at the current selection
    Type(String),
    /// Insert text as a single edit at the current selection
    Paste(String),
    /// Delete backward (or delete the selection)
    Backspace,
    /// Press the return key
    Return,
    /// Tap at a UTF-16 offset
    Tap(usize),
    /// Field gained focus
    Focus,
    /// Field lost focus
    Blur,
    /// Choose a row of the match list
    ChooseMatch(usize),
    /// Remove a token by index
    RemoveToken(usize),
}

/// Gesture script parse failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMsgError {
    #[error("empty gesture")]
    Empty,
    #[error("unknown gesture {0:?}")]
    Unknown(String),
    #[error("gesture {gesture:?} needs an argument")]
    MissingArgument { gesture: String },
    #[error("invalid index {value:?} for {gesture:?}")]
    InvalidIndex { gesture: String, value: String },
}

fn index_arg(gesture: &str, arg: Option<&str>) -> Result<usize, ParseMsgError> {
    let value = arg.ok_or_else(|| ParseMsgError::MissingArgument {
        gesture: gesture.to_string(),
    })?;
    value
        .trim()
        .parse()
        .map_err(|_| ParseMsgError::InvalidIndex {
            gesture: gesture.to_string(),
            value: value.to_string(),
        })
}

fn text_arg(gesture: &str, arg: Option<&str>) -> Result<String, ParseMsgError> {
    match arg {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ParseMsgError::MissingArgument {
            gesture: gesture.to_string(),
        }),
    }
}

impl FromStr for HostMsg {
    type Err = ParseMsgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim_end_matches(['\r', '\n']);
        if s.trim().is_empty() {
            return Err(ParseMsgError::Empty);
        }

        // Text arguments keep their whitespace, only the gesture name is trimmed
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name.trim(), Some(arg)),
            None => (s.trim(), None),
        };

        match name.to_ascii_lowercase().as_str() {
            "type" => text_arg(name, arg).map(HostMsg::Type),
            "paste" => text_arg(name, arg).map(HostMsg::Paste),
            "backspace" | "bs" => Ok(HostMsg::Backspace),
            "return" | "enter" => Ok(HostMsg::Return),
            "tap" => index_arg(name, arg).map(HostMsg::Tap),
            "focus" => Ok(HostMsg::Focus),
            "blur" => Ok(HostMsg::Blur),
            "choose" => index_arg(name, arg).map(HostMsg::ChooseMatch),
            "remove" => index_arg(name, arg).map(HostMsg::RemoveToken),
            _ => Err(ParseMsgError::Unknown(name.to_string())),
        }
    }
}

/// Parse a multi-line gesture script, skipping blank lines and `#` comments
pub fn parse_script(script: &str) -> Result<Vec<HostMsg>, ParseMsgError> {
    script
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_gestures() {
        assert_eq!("backspace".parse(), Ok(HostMsg::Backspace));
        assert_eq!("BS".parse(), Ok(HostMsg::Backspace));
        assert_eq!("enter".parse(), Ok(HostMsg::Return));
        assert_eq!("focus".parse(), Ok(HostMsg::Focus));
        assert_eq!("blur".parse(), Ok(HostMsg::Blur));
    }

    #[test]
    fn test_parse_text_keeps_whitespace() {
        assert_eq!(
            "type: alice ".parse(),
            Ok(HostMsg::Type(" alice ".to_string()))
        );
        assert_eq!(
            "paste:a:b".parse(),
            Ok(HostMsg::Paste("a:b".to_string()))
        );
    }

    #[test]
    fn test_parse_indices() {
        assert_eq!("tap:12".parse(), Ok(HostMsg::Tap(12)));
        assert_eq!("choose: 0".parse(), Ok(HostMsg::ChooseMatch(0)));
        assert_eq!("remove:3".parse(), Ok(HostMsg::RemoveToken(3)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<HostMsg>(), Err(ParseMsgError::Empty));
        assert_eq!(
            "jump".parse::<HostMsg>(),
            Err(ParseMsgError::Unknown("jump".to_string()))
        );
        assert_eq!(
            "tap".parse::<HostMsg>(),
            Err(ParseMsgError::MissingArgument {
                gesture: "tap".to_string()
            })
        );
        assert!(matches!(
            "tap:x".parse::<HostMsg>(),
            Err(ParseMsgError::InvalidIndex { .. })
        ));
        assert!(matches!(
            "type:".parse::<HostMsg>(),
            Err(ParseMsgError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_parse_script_skips_comments() {
        let script = "# add two people\ntype:alice\nreturn\n\ntype:bob\n";
        let msgs = parse_script(script).unwrap();
        assert_eq!(
            msgs,
            vec![
                HostMsg::Type("alice".to_string()),
                HostMsg::Return,
                HostMsg::Type("bob".to_string()),
            ]
        );
    }
}
