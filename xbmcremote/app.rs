use crate::client::{RemoteClient, Rpc};
use crate::commands::{CommandSet, PlaylistDisplay, Steps};
use crate::config::{self, descriptor, OptionMap};
use crate::error::{App, Conflict, RemoteError};
use crate::keys::{parse_key, Action, KeyBindingRegistry, KeyCode, ACTIONS};
use crate::validate::Validity;
use log::info;
use std::path::{Path, PathBuf};

/// What a key press amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Unbound,
    Quit,
    Status(String),
}

/// Options and bindings for one session. Owned by the single control path
/// handling user input, so mutation goes through `&mut self`.
pub struct AppState {
    config_path: PathBuf,
    options: OptionMap,
    bindings: KeyBindingRegistry,
}

impl AppState {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, App> {
        let config_path = path.into();
        let mut options = config::load(&config_path)?;
        let bindings = KeyBindingRegistry::from_options(&options);
        bindings.write_to(&mut options);
        info!("Loaded options from {}", config_path.display());
        Ok(Self {
            config_path,
            options,
            bindings,
        })
    }

    pub fn save(&self) -> Result<(), App> {
        config::save(&self.config_path, &self.options)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn options(&self) -> &OptionMap {
        &self.options
    }

    pub fn bindings(&self) -> &KeyBindingRegistry {
        &self.bindings
    }

    pub fn steps(&self) -> Steps {
        Steps::from_options(&self.options)
    }

    pub fn playlist_display(&self) -> PlaylistDisplay {
        PlaylistDisplay::from_options(&self.options)
    }

    pub fn client(&self) -> RemoteClient {
        RemoteClient::from_options(&self.options)
    }

    pub fn commands<'a, R: Rpc + ?Sized>(&self, rpc: &'a R) -> CommandSet<'a, R> {
        CommandSet::new(rpc, self.steps())
    }

    /// Stores `value` if the option's validator fully accepts it. Binding
    /// options are routed through `rebind`.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), App> {
        let desc = descriptor(name)
            .ok_or_else(|| App::InvalidInput(format!("Unknown option \"{name}\"")))?;

        if desc.is_binding() {
            let code = parse_key(value)
                .ok_or_else(|| App::InvalidInput(format!("\"{value}\" is not a key")))?;
            let action = ACTIONS
                .iter()
                .find(|spec| spec.option == desc.name)
                .map(|spec| spec.action)
                .ok_or_else(|| App::InvalidInput(format!("No action for {name}")))?;
            return Ok(self.rebind(action, code)?);
        }

        match desc.validate(value) {
            Validity::Acceptable => {
                self.options.set(desc.name, value.to_string());
                Ok(())
            }
            Validity::Intermediate => Err(App::InvalidInput(format!(
                "\"{value}\" is incomplete for {name}"
            ))),
            Validity::Invalid => Err(App::InvalidInput(format!(
                "\"{value}\" is not valid for {name}"
            ))),
        }
    }

    /// Rebinds `action` and mirrors the new code into the options.
    pub fn rebind(&mut self, action: Action, code: KeyCode) -> Result<(), Conflict> {
        self.bindings.rebind(action, code)?;
        self.options.set(action.option(), code.to_string());
        Ok(())
    }

    pub fn run_action<R: Rpc + ?Sized>(
        &self,
        rpc: &R,
        action: Action,
    ) -> Result<KeyOutcome, RemoteError> {
        match action.command() {
            Some(command) => Ok(KeyOutcome::Status(self.commands(rpc).execute(command)?)),
            None => Ok(KeyOutcome::Quit),
        }
    }

    pub fn dispatch<R: Rpc + ?Sized>(
        &self,
        rpc: &R,
        code: KeyCode,
    ) -> Result<KeyOutcome, RemoteError> {
        match self.bindings.resolve(code) {
            Some(action) => self.run_action(rpc, action),
            None => Ok(KeyOutcome::Unbound),
        }
    }
}
