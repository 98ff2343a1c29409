pub mod names;

use crate::commands::{Command, Direction, Jump};
use crate::config::OptionMap;
use crate::error::Conflict;
use log::{debug, warn};
use std::collections::HashMap;

pub use names::{key_name, parse_key, KeyCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Back,
    Pause,
    Fore,
    Prev,
    Stop,
    Next,
    VolumeDown,
    Mute,
    VolumeUp,
    Quit,
}

pub struct ActionSpec {
    pub action: Action,
    pub label: &'static str,
    pub option: &'static str,
    pub default_code: KeyCode,
    /// Drives an on-screen button rather than a background shortcut.
    pub control: bool,
}

/// Every action in button order. Option names are what the config file uses.
pub const ACTIONS: &[ActionSpec] = &[
    ActionSpec {
        action: Action::Back,
        label: "Back",
        option: "key_back",
        default_code: names::KEY_LEFT,
        control: true,
    },
    ActionSpec {
        action: Action::Pause,
        label: "Pause",
        option: "key_paus",
        default_code: names::KEY_SPACE,
        control: true,
    },
    ActionSpec {
        action: Action::Fore,
        label: "Fore",
        option: "key_fore",
        default_code: names::KEY_RIGHT,
        control: true,
    },
    ActionSpec {
        action: Action::Prev,
        label: "Prev",
        option: "key_prev",
        default_code: names::KEY_PAGE_UP,
        control: true,
    },
    ActionSpec {
        action: Action::Stop,
        label: "Stop",
        option: "key_stop",
        default_code: 0x53,
        control: true,
    },
    ActionSpec {
        action: Action::Next,
        label: "Next",
        option: "key_next",
        default_code: names::KEY_PAGE_DOWN,
        control: true,
    },
    ActionSpec {
        action: Action::VolumeDown,
        label: "Vol -",
        option: "key_vold",
        default_code: names::KEY_DOWN,
        control: true,
    },
    ActionSpec {
        action: Action::Mute,
        label: "Mute",
        option: "key_mute",
        default_code: 0x4d,
        control: true,
    },
    ActionSpec {
        action: Action::VolumeUp,
        label: "Vol +",
        option: "key_volu",
        default_code: names::KEY_UP,
        control: true,
    },
    ActionSpec {
        action: Action::Quit,
        label: "Quit",
        option: "key_quit",
        default_code: names::KEY_ESCAPE,
        control: false,
    },
];

impl Action {
    pub fn spec(self) -> &'static ActionSpec {
        let index = match self {
            Action::Back => 0,
            Action::Pause => 1,
            Action::Fore => 2,
            Action::Prev => 3,
            Action::Stop => 4,
            Action::Next => 5,
            Action::VolumeDown => 6,
            Action::Mute => 7,
            Action::VolumeUp => 8,
            Action::Quit => 9,
        };
        &ACTIONS[index]
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }

    pub fn option(self) -> &'static str {
        self.spec().option
    }

    pub fn from_label(label: &str) -> Option<Self> {
        ACTIONS
            .iter()
            .find(|spec| spec.label.eq_ignore_ascii_case(label.trim()))
            .map(|spec| spec.action)
    }

    /// The playback command behind this action; `None` for `Quit`, which the
    /// shell handles itself.
    pub fn command(self) -> Option<Command> {
        match self {
            Action::Back => Some(Command::Seek(Direction::Backward)),
            Action::Pause => Some(Command::PlayPause),
            Action::Fore => Some(Command::Seek(Direction::Forward)),
            Action::Prev => Some(Command::Jump(Jump::Previous)),
            Action::Stop => Some(Command::Stop),
            Action::Next => Some(Command::Jump(Jump::Next)),
            Action::VolumeDown => Some(Command::Volume(Direction::Backward)),
            Action::Mute => Some(Command::Mute),
            Action::VolumeUp => Some(Command::Volume(Direction::Forward)),
            Action::Quit => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub action: Action,
    pub code: Option<KeyCode>,
    pub bound_to_control: bool,
}

/// Owns the action ⇄ input code mapping. No two actions share a code.
#[derive(Debug, Clone)]
pub struct KeyBindingRegistry {
    bindings: Vec<KeyBinding>,
    by_code: HashMap<KeyCode, Action>,
}

impl Default for KeyBindingRegistry {
    fn default() -> Self {
        let mut registry = Self::unbound();
        for spec in ACTIONS {
            registry.assign(spec.action, spec.default_code);
        }
        registry
    }
}

impl KeyBindingRegistry {
    fn unbound() -> Self {
        Self {
            bindings: ACTIONS
                .iter()
                .map(|spec| KeyBinding {
                    action: spec.action,
                    code: None,
                    bound_to_control: spec.control,
                })
                .collect(),
            by_code: HashMap::new(),
        }
    }

    /// Builds the registry from loaded options. Unparsable or colliding codes
    /// fall back to the built-in default; an action whose default is taken too
    /// stays unbound.
    pub fn from_options(opts: &OptionMap) -> Self {
        let mut registry = Self::unbound();

        for spec in ACTIONS {
            let Some(raw) = opts.get(spec.option) else {
                continue;
            };
            match raw.trim().parse::<KeyCode>() {
                Ok(code) => {
                    if let Some(owner) = registry.by_code.get(&code) {
                        warn!(
                            "{} = {} collides with {}, using the default",
                            spec.option,
                            code,
                            owner.label()
                        );
                    } else {
                        registry.assign(spec.action, code);
                    }
                }
                Err(_) => warn!("{} = {:?} is not a key code, using the default", spec.option, raw),
            }
        }

        for spec in ACTIONS {
            if registry.code_for(spec.action).is_some() {
                continue;
            }
            if registry.by_code.contains_key(&spec.default_code) {
                warn!("{} left unbound, its default key is taken", spec.label);
            } else {
                registry.assign(spec.action, spec.default_code);
            }
        }

        registry
    }

    fn assign(&mut self, action: Action, code: KeyCode) {
        if let Some(binding) = self.bindings.iter_mut().find(|b| b.action == action) {
            if let Some(old) = binding.code.replace(code) {
                self.by_code.remove(&old);
            }
            self.by_code.insert(code, action);
        }
    }

    pub fn resolve(&self, code: KeyCode) -> Option<Action> {
        self.by_code.get(&code).copied()
    }

    pub fn code_for(&self, action: Action) -> Option<KeyCode> {
        self.bindings
            .iter()
            .find(|b| b.action == action)
            .and_then(|b| b.code)
    }

    pub fn rebind(&mut self, action: Action, code: KeyCode) -> Result<(), Conflict> {
        match self.resolve(code) {
            Some(owner) if owner == action => Ok(()),
            Some(owner) => Err(Conflict {
                owner: owner.label().to_string(),
                key: key_name(code),
            }),
            None => {
                debug!("Binding {} to {}", action.label(), key_name(code));
                self.assign(action, code);
                Ok(())
            }
        }
    }

    /// Copies the current codes into their `key_*` options.
    pub fn write_to(&self, opts: &mut OptionMap) {
        for binding in &self.bindings {
            if let Some(code) = binding.code {
                opts.set(binding.action.option(), code.to_string());
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyBinding> {
        self.bindings.iter()
    }

    pub fn controls(&self) -> impl Iterator<Item = &KeyBinding> {
        self.bindings.iter().filter(|b| b.bound_to_control)
    }

    pub fn shortcuts(&self) -> impl Iterator<Item = &KeyBinding> {
        self.bindings.iter().filter(|b| !b.bound_to_control)
    }
}
