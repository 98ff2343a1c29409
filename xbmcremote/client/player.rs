use crate::client::Rpc;
use crate::error::RemoteError;
use crate::time::Duration;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

pub type PlayerId = i64;

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ActivePlayer {
    pub playerid: PlayerId,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Deserialize, Clone, Copy, Debug)]
pub struct Timing {
    pub time: Duration,
    pub totaltime: Duration,
}

#[derive(Deserialize, Clone, Copy, Debug)]
pub struct Progress {
    pub speed: i64,
    pub time: Duration,
    pub totaltime: Duration,
}

#[derive(Deserialize)]
struct Position {
    position: i64,
}

#[derive(Deserialize)]
struct Shuffled {
    shuffled: bool,
}

#[derive(Deserialize)]
struct PlaylistProperties {
    size: i64,
}

#[derive(Deserialize)]
struct Volume {
    volume: i64,
}

/// Item metadata as returned by `Player.GetItem` and `Playlist.GetItems`.
/// Whatever the service leaves out is empty.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct MediaItem {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub artist: Vec<String>,
}

#[derive(Deserialize)]
struct CurrentItem {
    item: MediaItem,
}

#[derive(Deserialize)]
struct PlaylistItems {
    #[serde(default)]
    items: Vec<MediaItem>,
}

pub(crate) fn decode<T: DeserializeOwned>(method: &str, value: Value) -> Result<T, RemoteError> {
    serde_json::from_value(value)
        .map_err(|e| RemoteError::Protocol(format!("Unexpected {method} result: {e}")))
}

pub fn active_players<R: Rpc + ?Sized>(rpc: &R) -> Result<Vec<ActivePlayer>, RemoteError> {
    decode(
        "Player.GetActivePlayers",
        rpc.call("Player.GetActivePlayers", None)?,
    )
}

pub fn properties<T: DeserializeOwned, R: Rpc + ?Sized>(
    rpc: &R,
    pid: PlayerId,
    names: &[&str],
) -> Result<T, RemoteError> {
    let result = rpc.call(
        "Player.GetProperties",
        Some(json!({ "playerid": pid, "properties": names })),
    )?;
    decode("Player.GetProperties", result)
}

pub fn timing<R: Rpc + ?Sized>(rpc: &R, pid: PlayerId) -> Result<Timing, RemoteError> {
    properties(rpc, pid, &["time", "totaltime"])
}

pub fn progress<R: Rpc + ?Sized>(rpc: &R, pid: PlayerId) -> Result<Progress, RemoteError> {
    properties(rpc, pid, &["speed", "time", "totaltime"])
}

/// 1-based position of the current item in the playlist.
pub fn position<R: Rpc + ?Sized>(rpc: &R, pid: PlayerId) -> Result<i64, RemoteError> {
    let p: Position = properties(rpc, pid, &["position"])?;
    Ok(p.position + 1)
}

pub fn shuffled<R: Rpc + ?Sized>(rpc: &R, pid: PlayerId) -> Result<bool, RemoteError> {
    let s: Shuffled = properties(rpc, pid, &["shuffled"])?;
    Ok(s.shuffled)
}

/// Size of the playlist attached to player `pid`; playlist ids mirror
/// player ids.
pub fn playlist_size<R: Rpc + ?Sized>(rpc: &R, pid: PlayerId) -> Result<i64, RemoteError> {
    let result = rpc.call(
        "Playlist.GetProperties",
        Some(json!({ "playlistid": pid, "properties": ["size"] })),
    )?;
    let props: PlaylistProperties = decode("Playlist.GetProperties", result)?;
    Ok(props.size)
}

pub fn playlist_items<R: Rpc + ?Sized>(
    rpc: &R,
    pid: PlayerId,
) -> Result<Vec<MediaItem>, RemoteError> {
    let result = rpc.call(
        "Playlist.GetItems",
        Some(json!({ "playlistid": pid, "properties": ["title", "file", "album"] })),
    )?;
    let list: PlaylistItems = decode("Playlist.GetItems", result)?;
    Ok(list.items)
}

pub fn current_item<R: Rpc + ?Sized>(rpc: &R, pid: PlayerId) -> Result<MediaItem, RemoteError> {
    let result = rpc.call(
        "Player.GetItem",
        Some(json!({ "playerid": pid, "properties": ["artist", "album"] })),
    )?;
    let current: CurrentItem = decode("Player.GetItem", result)?;
    Ok(current.item)
}

pub fn volume<R: Rpc + ?Sized>(rpc: &R) -> Result<i64, RemoteError> {
    let result = rpc.call(
        "Application.GetProperties",
        Some(json!({ "properties": ["volume"] })),
    )?;
    let v: Volume = decode("Application.GetProperties", result)?;
    Ok(v.volume)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    Stopped,
    Playing,
}

impl Speed {
    pub fn from_rate(rate: i64) -> Self {
        if rate == 0 {
            Speed::Stopped
        } else {
            Speed::Playing
        }
    }
}

/// Snapshot of the player, read in one go. Never cached: the service is the
/// source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerState {
    pub player_id: Option<PlayerId>,
    pub position_seconds: i64,
    pub total_seconds: i64,
    pub speed: Speed,
    pub playlist_size: i64,
    /// 1-based, 0 when nothing is playing.
    pub playlist_position: i64,
}

impl PlayerState {
    pub fn idle() -> Self {
        Self {
            player_id: None,
            position_seconds: 0,
            total_seconds: 0,
            speed: Speed::Stopped,
            playlist_size: 0,
            playlist_position: 0,
        }
    }

    pub fn fetch<R: Rpc + ?Sized>(rpc: &R) -> Result<Self, RemoteError> {
        let Some(pid) = rpc.active_player_id()? else {
            return Ok(Self::idle());
        };
        let p = progress(rpc, pid)?;
        Ok(Self {
            player_id: Some(pid),
            position_seconds: p.time.to_seconds(),
            total_seconds: p.totaltime.to_seconds(),
            speed: Speed::from_rate(p.speed),
            playlist_size: playlist_size(rpc, pid)?,
            playlist_position: position(rpc, pid)?,
        })
    }
}
