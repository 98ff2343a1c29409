//! Input codes and their display names.
//!
//! Codes follow the Qt key numbering the remote has always written to its
//! config file, so files from older installs keep working.

pub type KeyCode = i32;

pub const KEY_SPACE: KeyCode = 0x20;
pub const KEY_ESCAPE: KeyCode = 0x0100_0000;
pub const KEY_TAB: KeyCode = 0x0100_0001;
pub const KEY_BACKSPACE: KeyCode = 0x0100_0003;
pub const KEY_RETURN: KeyCode = 0x0100_0004;
pub const KEY_ENTER: KeyCode = 0x0100_0005;
pub const KEY_INSERT: KeyCode = 0x0100_0006;
pub const KEY_DELETE: KeyCode = 0x0100_0007;
pub const KEY_PAUSE: KeyCode = 0x0100_0008;
pub const KEY_HOME: KeyCode = 0x0100_0010;
pub const KEY_END: KeyCode = 0x0100_0011;
pub const KEY_LEFT: KeyCode = 0x0100_0012;
pub const KEY_UP: KeyCode = 0x0100_0013;
pub const KEY_RIGHT: KeyCode = 0x0100_0014;
pub const KEY_DOWN: KeyCode = 0x0100_0015;
pub const KEY_PAGE_UP: KeyCode = 0x0100_0016;
pub const KEY_PAGE_DOWN: KeyCode = 0x0100_0017;
pub const KEY_F1: KeyCode = 0x0100_0030;

const NAMED: &[(KeyCode, &str)] = &[
    (KEY_SPACE, "Space"),
    (KEY_ESCAPE, "Esc"),
    (KEY_TAB, "Tab"),
    (KEY_BACKSPACE, "Backspace"),
    (KEY_RETURN, "Return"),
    (KEY_ENTER, "Enter"),
    (KEY_INSERT, "Ins"),
    (KEY_DELETE, "Del"),
    (KEY_PAUSE, "Pause"),
    (KEY_HOME, "Home"),
    (KEY_END, "End"),
    (KEY_LEFT, "Left"),
    (KEY_UP, "Up"),
    (KEY_RIGHT, "Right"),
    (KEY_DOWN, "Down"),
    (KEY_PAGE_UP, "PgUp"),
    (KEY_PAGE_DOWN, "PgDown"),
];

pub fn key_name(code: KeyCode) -> String {
    if let Some((_, name)) = NAMED.iter().find(|(c, _)| *c == code) {
        return (*name).to_string();
    }
    if (KEY_F1..KEY_F1 + 12).contains(&code) {
        return format!("F{}", code - KEY_F1 + 1);
    }
    match u8::try_from(code) {
        Ok(b) if b.is_ascii_graphic() => char::from(b).to_string(),
        _ => format!("0x{code:x}"),
    }
}

/// Accepts a display name (`Space`, `PgUp`, `F5`, `m`), a decimal code or a
/// `0x` prefixed hex code.
pub fn parse_key(text: &str) -> Option<KeyCode> {
    let text = text.trim();
    if let Some((code, _)) = NAMED.iter().find(|(_, n)| n.eq_ignore_ascii_case(text)) {
        return Some(*code);
    }
    if let Some(n) = text
        .strip_prefix('F')
        .or_else(|| text.strip_prefix('f'))
        .and_then(|n| n.parse::<KeyCode>().ok())
    {
        if (1..=12).contains(&n) {
            return Some(KEY_F1 + n - 1);
        }
    }
    if let Some(hex) = text.strip_prefix("0x") {
        return KeyCode::from_str_radix(hex, 16).ok();
    }
    let mut chars = text.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_graphic() {
            // Letter keys carry the upper-case code regardless of shift.
            return u8::try_from(c.to_ascii_uppercase()).ok().map(KeyCode::from);
        }
    }
    text.parse().ok()
}
