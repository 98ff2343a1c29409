use clap::{Parser, Subcommand};
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, Naming};
use log::error;
use std::path::PathBuf;
use std::process;
use xbmcremote::client::PlayerState;
use xbmcremote::commands::remote::{self, RemoteInput};
use xbmcremote::commands::{Command, Direction, Jump, PlaylistDisplay, NOTHING_PLAYING};
use xbmcremote::keys::{key_name, parse_key, Action};
use xbmcremote::{App, AppState, KeyOutcome};

type StdResult<T> = std::result::Result<T, App>;

#[derive(Parser)]
#[command(
    name = "xr",
    about = "Control XBMC/Kodi through its JSON-RPC web interface.",
    version = "1.0.0"
)]
struct Cli {
    #[arg(short = 'c', long = "config", value_name = "FILE", help = "Path to the config file")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Toggle play/pause")]
    Pause,
    #[command(about = "Seek backward by step_back seconds")]
    Back,
    #[command(about = "Seek forward by step_fore seconds")]
    Fore,
    #[command(about = "Jump to the previous playlist item")]
    Prev,
    #[command(about = "Jump to the next playlist item")]
    Next,
    #[command(about = "Stop playback")]
    Stop,
    #[command(name = "vol-down", about = "Lower the volume")]
    VolDown,
    #[command(name = "vol-up", about = "Raise the volume")]
    VolUp,
    #[command(about = "Toggle mute")]
    Mute,
    #[command(about = "Run an action by its button label, e.g. \"Vol +\"")]
    Action { label: String },
    #[command(about = "Press a key: bound keys run their action, others go to the player's menus")]
    Key { key: String },
    #[command(about = "Show details about what is playing")]
    Info,
    #[command(about = "List the current playlist")]
    Playlist(PlaylistCommand),
    #[command(about = "Show a one-line player status")]
    Status,
    #[command(about = "Send a navigation input (left, right, up, down, select, back, backspace, context, fullscreen, osd)")]
    Remote { input: String },
    #[command(about = "Type text into the player's on-screen keyboard")]
    Text { text: String },
    #[command(subcommand, about = "Show or change key bindings")]
    Keys(KeysCommand),
    #[command(subcommand, about = "Show or change options")]
    Options(OptionsCommand),
}

#[derive(Parser)]
struct PlaylistCommand {
    #[arg(short = 'd', long = "display", help = "Full Path, Filename, Title, Album - Title, or 0-3")]
    display: Option<String>,
}

#[derive(Subcommand)]
enum KeysCommand {
    #[command(about = "List all key bindings")]
    List,
    #[command(about = "Bind an action to a key")]
    Bind { action: String, key: String },
}

#[derive(Subcommand)]
enum OptionsCommand {
    #[command(about = "List all options")]
    List,
    #[command(about = "Set an option")]
    Set { name: String, value: String },
}

fn main() -> StdResult<()> {
    let cli = Cli::parse();
    let home_dir = std::env::var("HOME")?;
    let base_dir = PathBuf::from(format!("{home_dir}/.config/xbmcremote"));
    std::fs::create_dir_all(base_dir.join("logs"))?;

    Logger::try_with_env_or_str("info")?
        .log_to_file(FileSpec::default().directory(base_dir.join("logs")))
        .rotate(
            Criterion::Size(1_000_000),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(3),
        )
        .duplicate_to_stderr(Duplicate::None)
        .start()?;

    let config_path = cli.config.clone().unwrap_or_else(|| base_dir.join("remote.conf"));
    let mut state = AppState::load(config_path)?;

    match handle_command(cli.command, &mut state) {
        Ok(()) => Ok(()),
        Err(App::Remote(e)) => {
            error!("{e}");
            eprintln!("{e}");
            process::exit(1);
        }
        Err(e) => Err(e),
    }
}

fn handle_command(command: Commands, state: &mut AppState) -> StdResult<()> {
    match command {
        Commands::Pause => run(state, Command::PlayPause),
        Commands::Back => run(state, Command::Seek(Direction::Backward)),
        Commands::Fore => run(state, Command::Seek(Direction::Forward)),
        Commands::Prev => run(state, Command::Jump(Jump::Previous)),
        Commands::Next => run(state, Command::Jump(Jump::Next)),
        Commands::Stop => run(state, Command::Stop),
        Commands::VolDown => run(state, Command::Volume(Direction::Backward)),
        Commands::VolUp => run(state, Command::Volume(Direction::Forward)),
        Commands::Mute => run(state, Command::Mute),
        Commands::Action { label } => {
            let action = Action::from_label(&label)
                .ok_or_else(|| App::InvalidInput(format!("No action called \"{label}\"")))?;
            let client = state.client();
            report(state.run_action(&client, action)?);
            Ok(())
        }
        Commands::Key { key } => {
            let code =
                parse_key(&key).ok_or_else(|| App::InvalidInput(format!("Unknown key \"{key}\"")))?;
            let client = state.client();
            match (state.dispatch(&client, code)?, RemoteInput::from_key(code)) {
                // Keys without an action drive the player's menus instead.
                (KeyOutcome::Unbound, Some(input)) => remote::send(&client, input)?,
                (outcome, _) => report(outcome),
            }
            Ok(())
        }
        Commands::Info => show_info(state),
        Commands::Playlist(cmd) => show_playlist(state, cmd.display.as_deref()),
        Commands::Status => show_status(state),
        Commands::Remote { input } => {
            let input = RemoteInput::from_name(&input).ok_or_else(|| {
                let known: Vec<_> = RemoteInput::names().collect();
                App::InvalidInput(format!("Unknown input \"{input}\", try one of {}", known.join(", ")))
            })?;
            remote::send(&state.client(), input)?;
            Ok(())
        }
        Commands::Text { text } => {
            let sent = remote::send_text(&state.client(), &text)?;
            println!("Sent {sent} characters");
            Ok(())
        }
        Commands::Keys(KeysCommand::List) => {
            list_keys(state);
            Ok(())
        }
        Commands::Keys(KeysCommand::Bind { action, key }) => bind_key(state, &action, &key),
        Commands::Options(OptionsCommand::List) => {
            for (name, value) in state.options().iter() {
                println!("{name} = {value}");
            }
            Ok(())
        }
        Commands::Options(OptionsCommand::Set { name, value }) => {
            state.set_option(&name, &value)?;
            state.save()?;
            println!("{name} = {value}");
            Ok(())
        }
    }
}

fn run(state: &AppState, command: Command) -> StdResult<()> {
    let client = state.client();
    println!("{}", state.commands(&client).execute(command)?);
    Ok(())
}

fn report(outcome: KeyOutcome) {
    match outcome {
        KeyOutcome::Status(status) => println!("{status}"),
        KeyOutcome::Quit => println!("Quit"),
        KeyOutcome::Unbound => eprintln!("Key is not bound"),
    }
}

fn show_info(state: &AppState) -> StdResult<()> {
    let client = state.client();
    let info = state.commands(&client).media_info()?;
    let width = info.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (label, value) in info {
        println!("{:>width$}: {value}", label);
    }
    Ok(())
}

fn show_playlist(state: &AppState, display: Option<&str>) -> StdResult<()> {
    let mode = match display {
        Some(text) => PlaylistDisplay::parse(text)
            .ok_or_else(|| App::InvalidInput(format!("Unknown display mode \"{text}\"")))?,
        None => state.playlist_display(),
    };
    let client = state.client();
    let playlist = state.commands(&client).playlist_info(mode)?;
    println!("{}", playlist.header());
    for line in &playlist.lines {
        println!("{line}");
    }
    Ok(())
}

fn show_status(state: &AppState) -> StdResult<()> {
    let client = state.client();
    let player = PlayerState::fetch(&client)?;
    match player.player_id {
        None => println!("{NOTHING_PLAYING}"),
        Some(id) => println!(
            "Player {id}: {:?} {}s / {}s, item {} / {}",
            player.speed,
            player.position_seconds,
            player.total_seconds,
            player.playlist_position,
            player.playlist_size
        ),
    }
    Ok(())
}

fn list_keys(state: &AppState) {
    for binding in state.bindings().iter() {
        let key = binding.code.map_or_else(|| "(unbound)".to_string(), key_name);
        let kind = if binding.bound_to_control { "" } else { " (shortcut)" };
        println!("{} = {key}{kind}", binding.action.label());
    }
}

fn bind_key(state: &mut AppState, action: &str, key: &str) -> StdResult<()> {
    let action = Action::from_label(action)
        .ok_or_else(|| App::InvalidInput(format!("No action called \"{action}\"")))?;
    let code = parse_key(key).ok_or_else(|| App::InvalidInput(format!("Unknown key \"{key}\"")))?;
    if let Err(conflict) = state.rebind(action, code) {
        eprintln!("{conflict}");
        return Ok(());
    }
    state.save()?;
    println!("{} = {}", action.label(), key_name(code));
    Ok(())
}
