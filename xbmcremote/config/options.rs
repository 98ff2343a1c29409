use crate::keys::ACTIONS;
use crate::validate::{validate_address, validate_int, Validity};

/// How an option's text is interpreted by whoever consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Text,
    Address,
    Int { min: i64, max: i64 },
    KeyCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub name: &'static str,
    pub kind: OptionKind,
    pub default: String,
}

impl Descriptor {
    pub fn validate(&self, value: &str) -> Validity {
        match self.kind {
            OptionKind::Text if value.chars().any(char::is_control) => Validity::Invalid,
            OptionKind::Text => Validity::Acceptable,
            OptionKind::Address => validate_address(value),
            OptionKind::Int { min, max } => validate_int(value, min, max),
            OptionKind::KeyCode => {
                if value.trim().parse::<i32>().is_ok() {
                    Validity::Acceptable
                } else {
                    Validity::Invalid
                }
            }
        }
    }

    pub fn is_binding(&self) -> bool {
        is_binding(self.name)
    }
}

const GENERAL: &[(&str, OptionKind, &str)] = &[
    ("xbmc_ip", OptionKind::Address, "127.0.0.1"),
    ("xbmc_user", OptionKind::Text, ""),
    ("xbmc_pass", OptionKind::Text, ""),
    ("step_back", OptionKind::Int { min: 1, max: 86400 }, "10"),
    ("step_fore", OptionKind::Int { min: 1, max: 86400 }, "10"),
    ("def_plist", OptionKind::Int { min: 0, max: 3 }, "0"),
];

/// Binding options all start with this and are saved in their own group.
pub const BINDING_PREFIX: &str = "key";

pub fn is_binding(name: &str) -> bool {
    name.starts_with(BINDING_PREFIX)
}

/// The full default table: connection and step options, then one entry per
/// action.
pub fn descriptors() -> Vec<Descriptor> {
    let general = GENERAL.iter().map(|(name, kind, default)| Descriptor {
        name: *name,
        kind: *kind,
        default: (*default).to_string(),
    });
    let bindings = ACTIONS.iter().map(|spec| Descriptor {
        name: spec.option,
        kind: OptionKind::KeyCode,
        default: spec.default_code.to_string(),
    });
    general.chain(bindings).collect()
}

pub fn descriptor(name: &str) -> Option<Descriptor> {
    descriptors().into_iter().find(|d| d.name == name)
}

/// Option values keyed by name, kept in table order. Values are plain text;
/// consumers coerce them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionMap {
    entries: Vec<(String, String)>,
}

impl OptionMap {
    pub fn defaults() -> Self {
        Self {
            entries: descriptors()
                .into_iter()
                .map(|d| (d.name.to_string(), d.default))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Overwrites a known option. Names outside the default table are ignored.
    pub fn set(&mut self, name: &str, value: String) -> bool {
        match self.entries.iter_mut().find(|(k, _)| k == name) {
            Some(entry) => {
                entry.1 = value;
                true
            }
            None => false,
        }
    }

    /// Integer value of `name`, or its compiled default when the stored text
    /// does not parse or falls outside the option's range.
    pub fn get_int(&self, name: &str) -> Option<i64> {
        let desc = descriptor(name);
        let in_range = |v: &i64| match desc.as_ref().map(|d| d.kind) {
            Some(OptionKind::Int { min, max }) => (min..=max).contains(v),
            _ => true,
        };
        self.get(name)
            .and_then(|v| v.trim().parse().ok())
            .filter(in_range)
            .or_else(|| desc.and_then(|d| d.default.parse().ok()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Default for OptionMap {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_action() {
        let opts = OptionMap::defaults();
        assert_eq!(opts.get("xbmc_ip"), Some("127.0.0.1"));
        assert_eq!(opts.get("step_fore"), Some("10"));
        for spec in ACTIONS {
            assert_eq!(opts.get(spec.option), Some(spec.default_code.to_string().as_str()));
        }
    }

    #[test]
    fn set_ignores_unknown_names() {
        let mut opts = OptionMap::defaults();
        assert!(!opts.set("volume", "11".to_string()));
        assert_eq!(opts.get("volume"), None);
        assert!(opts.set("xbmc_user", "kodi".to_string()));
        assert_eq!(opts.get("xbmc_user"), Some("kodi"));
    }

    #[test]
    fn get_int_fails_closed() {
        let mut opts = OptionMap::defaults();
        opts.set("step_back", "30".to_string());
        opts.set("step_fore", "lots".to_string());
        assert_eq!(opts.get_int("step_back"), Some(30));
        assert_eq!(opts.get_int("step_fore"), Some(10));
        assert_eq!(opts.get_int("xbmc_user"), None);
    }

    #[test]
    fn get_int_rejects_out_of_range() {
        let mut opts = OptionMap::defaults();
        opts.set("step_fore", "-30".to_string());
        opts.set("step_back", "86401".to_string());
        opts.set("def_plist", "3".to_string());
        assert_eq!(opts.get_int("step_fore"), Some(10));
        assert_eq!(opts.get_int("step_back"), Some(10));
        assert_eq!(opts.get_int("def_plist"), Some(3));
    }

    #[test]
    fn descriptors_validate_by_kind() {
        let ip = descriptor("xbmc_ip").unwrap();
        assert_eq!(ip.validate("10.0.0.2:8080"), Validity::Acceptable);
        assert_eq!(ip.validate("kodi.local"), Validity::Invalid);
        let plist = descriptor("def_plist").unwrap();
        assert_eq!(plist.validate("3"), Validity::Acceptable);
        assert_eq!(plist.validate("4"), Validity::Invalid);
        let pass = descriptor("xbmc_pass").unwrap();
        assert_eq!(pass.validate(" spaced out "), Validity::Acceptable);
        assert_eq!(pass.validate("hunter2\nstep_back = 999"), Validity::Invalid);
        assert_eq!(pass.validate("tab\there"), Validity::Invalid);
        let key = descriptor("key_quit").unwrap();
        assert!(key.is_binding());
        assert_eq!(key.validate("16777216"), Validity::Acceptable);
    }
}
