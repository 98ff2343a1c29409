pub mod remote;

use crate::client::player::{self, decode};
use crate::client::Rpc;
use crate::config::OptionMap;
use crate::error::RemoteError;
use crate::time::{clamp_to, Duration};
use log::info;
use serde::Deserialize;
use serde_json::json;

pub const NOTHING_PLAYING: &str = "Nothing playing.";
pub const VOLUME_STEP: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jump {
    Previous,
    Next,
}

/// Everything a button or shortcut can ask of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    PlayPause,
    Seek(Direction),
    Stop,
    Jump(Jump),
    Mute,
    Volume(Direction),
}

/// Seek step sizes in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Steps {
    pub back: i64,
    pub fore: i64,
}

impl Default for Steps {
    fn default() -> Self {
        Self { back: 10, fore: 10 }
    }
}

impl Steps {
    pub fn from_options(opts: &OptionMap) -> Self {
        let fallback = Self::default();
        Self {
            back: opts.get_int("step_back").unwrap_or(fallback.back),
            fore: opts.get_int("step_fore").unwrap_or(fallback.fore),
        }
    }

    pub fn for_direction(self, direction: Direction) -> i64 {
        match direction {
            Direction::Backward => self.back,
            Direction::Forward => self.fore,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistDisplay {
    FullPath,
    Filename,
    Title,
    AlbumTitle,
}

impl PlaylistDisplay {
    pub const ALL: [PlaylistDisplay; 4] = [
        PlaylistDisplay::FullPath,
        PlaylistDisplay::Filename,
        PlaylistDisplay::Title,
        PlaylistDisplay::AlbumTitle,
    ];

    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    pub fn from_options(opts: &OptionMap) -> Self {
        opts.get_int("def_plist")
            .and_then(Self::from_index)
            .unwrap_or(PlaylistDisplay::FullPath)
    }

    /// Index or label, case-insensitive.
    pub fn parse(text: &str) -> Option<Self> {
        if let Ok(index) = text.trim().parse() {
            return Self::from_index(index);
        }
        Self::ALL
            .into_iter()
            .find(|mode| mode.label().eq_ignore_ascii_case(text.trim()))
    }

    pub fn label(self) -> &'static str {
        match self {
            PlaylistDisplay::FullPath => "Full Path",
            PlaylistDisplay::Filename => "Filename",
            PlaylistDisplay::Title => "Title",
            PlaylistDisplay::AlbumTitle => "Album - Title",
        }
    }

    fn render(self, item: &player::MediaItem) -> String {
        match self {
            PlaylistDisplay::FullPath => or_default(&item.file, "unknown.xyz").to_string(),
            PlaylistDisplay::Filename => or_default(&item.label, "unknown.xyz").to_string(),
            PlaylistDisplay::Title => or_default(&item.title, "Unknown").to_string(),
            PlaylistDisplay::AlbumTitle => format!(
                "{} - {}",
                or_default(&item.album, "Unknown"),
                or_default(&item.title, "Unknown")
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaylistReport {
    /// 1-based, 0 for an empty report.
    pub current: i64,
    pub shuffled: bool,
    pub lines: Vec<String>,
}

impl PlaylistReport {
    pub fn header(&self) -> String {
        let mut header = format!("Current item: {} / {}", self.current, self.lines.len());
        if self.shuffled {
            header.push_str(" (Shuffled)");
        }
        header
    }
}

/// Ordered label/value pairs.
pub type InfoReport = Vec<(String, String)>;

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => "Unknown".to_string(),
    }
}

fn remaining(timing: &player::Timing) -> Duration {
    let left = timing.totaltime.to_seconds() - timing.time.to_seconds();
    Duration::from_seconds(u64::try_from(left).unwrap_or(0))
}

#[derive(Deserialize)]
struct Toggled {
    speed: i64,
}

/// Playback commands. Each returns the status line to show, or the
/// transport/protocol failure unchanged.
pub struct CommandSet<'a, R: Rpc + ?Sized> {
    rpc: &'a R,
    steps: Steps,
}

impl<'a, R: Rpc + ?Sized> CommandSet<'a, R> {
    pub fn new(rpc: &'a R, steps: Steps) -> Self {
        Self { rpc, steps }
    }

    pub fn execute(&self, command: Command) -> Result<String, RemoteError> {
        info!("Running {command:?}");
        match command {
            Command::PlayPause => self.play_pause(),
            Command::Seek(direction) => {
                self.seek_relative(direction, self.steps.for_direction(direction))
            }
            Command::Stop => self.stop(),
            Command::Jump(direction) => self.jump(direction),
            Command::Mute => self.mute_toggle(),
            Command::Volume(direction) => self.volume_adjust(direction, VOLUME_STEP),
        }
    }

    pub fn play_pause(&self) -> Result<String, RemoteError> {
        let Some(pid) = self.rpc.active_player_id()? else {
            return Ok(NOTHING_PLAYING.to_string());
        };
        let result = self
            .rpc
            .call("Player.PlayPause", Some(json!({ "playerid": pid })))?;
        let toggled: Toggled = decode("Player.PlayPause", result)?;

        let timing = player::timing(self.rpc, pid)?;
        let total = timing.totaltime.format()?;
        if toggled.speed == 0 {
            Ok(format!("Paused at {} / {}", timing.time.format()?, total))
        } else {
            Ok(format!(
                "Playing with {} / {} left",
                remaining(&timing).format()?,
                total
            ))
        }
    }

    /// Moves `step` seconds from the current time, never past either end.
    pub fn seek_relative(&self, direction: Direction, step: i64) -> Result<String, RemoteError> {
        let Some(pid) = self.rpc.active_player_id()? else {
            return Ok(NOTHING_PLAYING.to_string());
        };
        let timing = player::timing(self.rpc, pid)?;
        let offset = match direction {
            Direction::Backward => -step,
            Direction::Forward => step,
        };
        let target = clamp_to(
            timing.time.to_seconds() + offset,
            timing.totaltime.to_seconds(),
        );

        self.rpc.call(
            "Player.Seek",
            Some(json!({ "playerid": pid, "value": target })),
        )?;
        Ok(format!("Seek to {}", target.format()?))
    }

    pub fn stop(&self) -> Result<String, RemoteError> {
        let Some(pid) = self.rpc.active_player_id()? else {
            return Ok(NOTHING_PLAYING.to_string());
        };
        self.rpc
            .call("Player.Stop", Some(json!({ "playerid": pid })))?;
        Ok("Stopped".to_string())
    }

    pub fn jump(&self, direction: Jump) -> Result<String, RemoteError> {
        let Some(pid) = self.rpc.active_player_id()? else {
            return Ok(NOTHING_PLAYING.to_string());
        };
        let size = player::playlist_size(self.rpc, pid)?;

        match direction {
            Jump::Previous => {
                self.rpc.call(
                    "Player.GoTo",
                    Some(json!({ "playerid": pid, "to": "previous" })),
                )?;
                if size == 0 {
                    return Ok("Jumped to beginning".to_string());
                }
            }
            Jump::Next => {
                if size == 0 {
                    return Ok("No playlist".to_string());
                }
                self.rpc.call(
                    "Player.GoTo",
                    Some(json!({ "playerid": pid, "to": "next" })),
                )?;
            }
        }

        let pos = player::position(self.rpc, pid)?;
        Ok(format!("Jumped to: {pos} / {size}"))
    }

    pub fn mute_toggle(&self) -> Result<String, RemoteError> {
        let result = self
            .rpc
            .call("Application.SetMute", Some(json!({ "mute": "toggle" })))?;
        let muted: bool = decode("Application.SetMute", result)?;
        Ok(if muted { "Muted" } else { "Unmuted" }.to_string())
    }

    pub fn volume_adjust(&self, direction: Direction, delta: i64) -> Result<String, RemoteError> {
        let current = player::volume(self.rpc)?;
        let target = match direction {
            Direction::Backward => current - delta,
            Direction::Forward => current + delta,
        }
        .clamp(0, 100);

        self.rpc.call(
            "Application.SetVolume",
            Some(json!({ "volume": target })),
        )?;
        Ok(format!("Volume: {target}%"))
    }

    pub fn media_info(&self) -> Result<InfoReport, RemoteError> {
        let Some(pid) = self.rpc.active_player_id()? else {
            return Ok(vec![("Info".to_string(), NOTHING_PLAYING.to_string())]);
        };
        let mut info = InfoReport::new();

        let item = player::current_item(self.rpc, pid)?;
        let artist = item.artist.first().map_or("", String::as_str);
        info.push(("Title".into(), or_default(&item.label, "Unknown").into()));
        info.push(("Artist".into(), or_default(artist, "Unknown").into()));
        info.push(("Album".into(), or_default(&item.album, "Unknown").into()));

        let players = player::active_players(self.rpc)?;
        let (id, kind) = players
            .first()
            .map_or((pid, ""), |p| (p.playerid, p.kind.as_str()));
        info.push(("Player ID".into(), id.to_string()));
        info.push(("Media".into(), title_case(kind)));

        let progress = player::progress(self.rpc, pid)?;
        let speed = if progress.speed == 0 { "Paused" } else { "Playing" };
        info.push(("Speed".into(), speed.into()));
        info.push(("Current Time".into(), progress.time.format()?));
        info.push(("Total Time".into(), progress.totaltime.format()?));

        let pos = player::position(self.rpc, pid)?;
        let size = player::playlist_size(self.rpc, pid)?;
        info.push(("Playlist".into(), format!("{pos} / {size}")));

        Ok(info)
    }

    pub fn playlist_info(&self, mode: PlaylistDisplay) -> Result<PlaylistReport, RemoteError> {
        let Some(pid) = self.rpc.active_player_id()? else {
            return Ok(PlaylistReport::default());
        };
        if player::playlist_size(self.rpc, pid)? == 0 {
            return Ok(PlaylistReport::default());
        }

        let current = player::position(self.rpc, pid)?;
        let items = player::playlist_items(self.rpc, pid)?;
        let shuffled = player::shuffled(self.rpc, pid)?;

        let width = items.len().to_string().len();
        let lines = items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{:0width$}   |   {}", i + 1, mode.render(item)))
            .collect();

        Ok(PlaylistReport {
            current,
            shuffled,
            lines,
        })
    }
}
