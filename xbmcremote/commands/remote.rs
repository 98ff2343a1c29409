//! Virtual remote: menu navigation and text entry on the player's own UI.

use crate::client::Rpc;
use crate::error::RemoteError;
use crate::keys::names::{
    KeyCode, KEY_BACKSPACE, KEY_DOWN, KEY_ESCAPE, KEY_LEFT, KEY_RETURN, KEY_RIGHT, KEY_UP,
};
use log::debug;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteInput {
    Left,
    Right,
    Up,
    Down,
    Select,
    Back,
    Backspace,
    ContextMenu,
    Fullscreen,
    Osd,
    Text(char),
}

const NAMED: &[(&str, RemoteInput)] = &[
    ("left", RemoteInput::Left),
    ("right", RemoteInput::Right),
    ("up", RemoteInput::Up),
    ("down", RemoteInput::Down),
    ("select", RemoteInput::Select),
    ("back", RemoteInput::Back),
    ("backspace", RemoteInput::Backspace),
    ("context", RemoteInput::ContextMenu),
    ("fullscreen", RemoteInput::Fullscreen),
    ("osd", RemoteInput::Osd),
];

impl RemoteInput {
    pub fn from_name(name: &str) -> Option<Self> {
        NAMED
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
            .map(|(_, input)| *input)
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        NAMED.iter().map(|(n, _)| *n)
    }

    /// Navigation keys map to their input, printable keys type themselves.
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KEY_LEFT => Some(RemoteInput::Left),
            KEY_RIGHT => Some(RemoteInput::Right),
            KEY_UP => Some(RemoteInput::Up),
            KEY_DOWN => Some(RemoteInput::Down),
            KEY_RETURN => Some(RemoteInput::Select),
            KEY_ESCAPE => Some(RemoteInput::Back),
            KEY_BACKSPACE => Some(RemoteInput::Backspace),
            _ => match u8::try_from(code) {
                Ok(b) if (32..127).contains(&b) => Some(RemoteInput::Text(char::from(b))),
                _ => None,
            },
        }
    }

    fn request(self) -> (&'static str, Option<Value>) {
        match self {
            RemoteInput::Left => ("Input.Left", None),
            RemoteInput::Right => ("Input.Right", None),
            RemoteInput::Up => ("Input.Up", None),
            RemoteInput::Down => ("Input.Down", None),
            RemoteInput::Select => ("Input.Select", None),
            RemoteInput::Back => ("Input.Back", None),
            RemoteInput::Backspace => (
                "Input.ExecuteAction",
                Some(json!({ "action": "backspace" })),
            ),
            RemoteInput::ContextMenu => ("Input.ContextMenu", None),
            RemoteInput::Fullscreen => (
                "GUI.SetFullscreen",
                Some(json!({ "fullscreen": "toggle" })),
            ),
            RemoteInput::Osd => ("Input.ExecuteAction", Some(json!({ "action": "osd" }))),
            RemoteInput::Text(c) => (
                "Input.SendText",
                Some(json!({ "text": c.to_string(), "done": false })),
            ),
        }
    }
}

pub fn send<R: Rpc + ?Sized>(rpc: &R, input: RemoteInput) -> Result<(), RemoteError> {
    let (method, params) = input.request();
    debug!("Remote input {input:?}");
    rpc.call(method, params)?;
    Ok(())
}

/// Types `text` one character at a time; anything outside printable ASCII
/// is skipped.
pub fn send_text<R: Rpc + ?Sized>(rpc: &R, text: &str) -> Result<usize, RemoteError> {
    let mut sent = 0;
    for c in text.chars().filter(|c| c.is_ascii() && !c.is_ascii_control()) {
        send(rpc, RemoteInput::Text(c))?;
        sent += 1;
    }
    Ok(sent)
}
