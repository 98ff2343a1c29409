mod common;

use common::{FakeKodi, KodiState};
use std::fs;
use xbmcremote::keys::names::{KEY_ESCAPE, KEY_F1, KEY_SPACE};
use xbmcremote::keys::Action;
use xbmcremote::{App, AppState, KeyOutcome};

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn rebinding_survives_a_reload() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("remote.conf");

    let mut state = AppState::load(&path)?;
    state.rebind(Action::Pause, 0x50)?;
    state.save()?;

    let reloaded = AppState::load(&path)?;
    assert_eq!(reloaded.bindings().code_for(Action::Pause), Some(0x50));
    assert_eq!(reloaded.bindings().resolve(KEY_SPACE), None);
    assert_eq!(reloaded.options().get("key_paus"), Some("80"));
    Ok(())
}

#[test]
fn conflicting_rebind_changes_nothing() -> TestResult {
    let dir = tempfile::tempdir()?;
    let mut state = AppState::load(dir.path().join("remote.conf"))?;
    let before = state.options().clone();

    let conflict = state.rebind(Action::Pause, 0x53).unwrap_err();

    assert_eq!(conflict.owner, "Stop");
    assert_eq!(conflict.to_string(), "Key \"S\" is bound to \"Stop\"");
    assert_eq!(state.options(), &before);
    assert_eq!(state.bindings().code_for(Action::Pause), Some(KEY_SPACE));
    Ok(())
}

#[test]
fn set_option_validates_values() -> TestResult {
    let dir = tempfile::tempdir()?;
    let mut state = AppState::load(dir.path().join("remote.conf"))?;

    assert!(matches!(
        state.set_option("xbmc_ip", "kodi.local"),
        Err(App::InvalidInput(_))
    ));
    state.set_option("xbmc_ip", "192.168.1.5:8080")?;
    assert_eq!(state.options().get("xbmc_ip"), Some("192.168.1.5:8080"));

    assert!(state.set_option("def_plist", "5").is_err());
    state.set_option("step_fore", "30")?;
    assert_eq!(state.steps().fore, 30);

    assert!(matches!(
        state.set_option("key_mute", "Space"),
        Err(App::Conflict(_))
    ));
    state.set_option("key_mute", "F2")?;
    assert_eq!(state.bindings().resolve(KEY_F1 + 1), Some(Action::Mute));

    assert!(state.set_option("volume", "3").is_err());
    Ok(())
}

#[test]
fn text_options_survive_a_reload() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("remote.conf");
    let mut state = AppState::load(&path)?;

    assert!(matches!(
        state.set_option("xbmc_pass", "hunter2\nstep_back = 999"),
        Err(App::InvalidInput(_))
    ));
    assert_eq!(state.options().get("xbmc_pass"), Some(""));

    state.set_option("xbmc_pass", " secret ")?;
    state.save()?;

    let reloaded = AppState::load(&path)?;
    assert_eq!(reloaded.options(), state.options());
    assert_eq!(reloaded.options().get("xbmc_pass"), Some(" secret "));
    Ok(())
}

#[test]
fn dispatch_runs_bound_actions() -> TestResult {
    let dir = tempfile::tempdir()?;
    let state = AppState::load(dir.path().join("remote.conf"))?;
    let kodi = FakeKodi::new(KodiState::default());

    assert_eq!(
        state.dispatch(&kodi, KEY_SPACE)?,
        KeyOutcome::Status("Paused at 1:05 / 1:00:00".to_string())
    );
    assert_eq!(state.dispatch(&kodi, KEY_ESCAPE)?, KeyOutcome::Quit);
    assert_eq!(state.dispatch(&kodi, KEY_F1)?, KeyOutcome::Unbound);
    assert_eq!(
        state.run_action(&kodi, Action::VolumeUp)?,
        KeyOutcome::Status("Volume: 55%".to_string())
    );
    Ok(())
}

#[test]
fn malformed_binding_falls_back_to_default() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("remote.conf");
    fs::write(&path, "xbmc_ip = 127.0.0.1\n\nkey_paus = space\n")?;

    let state = AppState::load(&path)?;

    assert_eq!(state.bindings().code_for(Action::Pause), Some(KEY_SPACE));
    assert_eq!(state.options().get("key_paus"), Some("32"));
    Ok(())
}

#[test]
fn persisted_codes_win_over_defaults() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("remote.conf");
    fs::write(&path, "key_paus = oops\nkey_stop = 32\n")?;

    let state = AppState::load(&path)?;

    assert_eq!(state.bindings().code_for(Action::Stop), Some(KEY_SPACE));
    // Pause's default now belongs to Stop, so it is left without a key.
    assert_eq!(state.bindings().code_for(Action::Pause), None);
    assert_eq!(state.bindings().resolve(0x53), None);
    Ok(())
}
