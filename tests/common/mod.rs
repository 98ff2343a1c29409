#![allow(dead_code)]

use serde_json::{json, Map, Value};
use std::cell::RefCell;
use xbmcremote::{RemoteError, Rpc};

/// In-memory stand-in for the player's JSON-RPC service. Records every call
/// and keeps just enough state for the commands to observe their effects.
pub struct FakeKodi {
    pub state: RefCell<KodiState>,
    pub calls: RefCell<Vec<(String, Option<Value>)>>,
    pub fail: Option<(&'static str, RemoteError)>,
}

pub struct KodiState {
    pub player: Option<(i64, &'static str)>,
    pub speed: i64,
    pub time: i64,
    pub total: i64,
    /// 0-based, as the service reports it.
    pub position: i64,
    pub items: Vec<Value>,
    pub shuffled: bool,
    pub volume: i64,
    pub muted: bool,
    pub item: Value,
}

impl Default for KodiState {
    fn default() -> Self {
        Self {
            player: Some((0, "audio")),
            speed: 1,
            time: 65,
            total: 3600,
            position: 0,
            items: Vec::new(),
            shuffled: false,
            volume: 50,
            muted: false,
            item: json!({ "label": "So What", "artist": ["Miles Davis"], "album": "Kind of Blue" }),
        }
    }
}

pub fn hms(total: i64) -> Value {
    json!({
        "hours": total / 3600,
        "minutes": (total % 3600) / 60,
        "seconds": total % 60,
        "milliseconds": 0
    })
}

fn seconds_of(value: &Value) -> i64 {
    value["hours"].as_i64().unwrap_or(0) * 3600
        + value["minutes"].as_i64().unwrap_or(0) * 60
        + value["seconds"].as_i64().unwrap_or(0)
}

impl FakeKodi {
    pub fn new(state: KodiState) -> Self {
        Self {
            state: RefCell::new(state),
            calls: RefCell::new(Vec::new()),
            fail: None,
        }
    }

    pub fn failing(state: KodiState, method: &'static str, error: RemoteError) -> Self {
        Self {
            fail: Some((method, error)),
            ..Self::new(state)
        }
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(m, _)| m.clone()).collect()
    }

    pub fn params_of(&self, method: &str) -> Vec<Value> {
        self.calls
            .borrow()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, p)| p.clone().unwrap_or(Value::Null))
            .collect()
    }
}

impl Rpc for FakeKodi {
    fn call(&self, method: &str, params: Option<Value>) -> Result<Value, RemoteError> {
        self.calls
            .borrow_mut()
            .push((method.to_string(), params.clone()));
        if let Some((failing, error)) = &self.fail {
            if *failing == method {
                return Err(error.clone());
            }
        }

        let p = params.unwrap_or(Value::Null);
        let mut s = self.state.borrow_mut();
        let result = match method {
            "Player.GetActivePlayers" => match s.player {
                Some((id, kind)) => json!([{ "playerid": id, "type": kind }]),
                None => json!([]),
            },
            "Player.PlayPause" => {
                s.speed = i64::from(s.speed == 0);
                json!({ "speed": s.speed })
            }
            "Player.GetProperties" => {
                let mut out = Map::new();
                for name in p["properties"].as_array().into_iter().flatten() {
                    let value = match name.as_str().unwrap_or_default() {
                        "time" => hms(s.time),
                        "totaltime" => hms(s.total),
                        "speed" => json!(s.speed),
                        "position" => json!(s.position),
                        "shuffled" => json!(s.shuffled),
                        _ => Value::Null,
                    };
                    out.insert(name.as_str().unwrap_or_default().to_string(), value);
                }
                Value::Object(out)
            }
            "Player.Seek" => {
                s.time = seconds_of(&p["value"]);
                json!({ "time": hms(s.time), "totaltime": hms(s.total) })
            }
            "Player.Stop" => {
                s.player = None;
                json!("OK")
            }
            "Player.GoTo" => {
                let last = i64::try_from(s.items.len()).unwrap_or(0) - 1;
                s.position = match p["to"].as_str() {
                    Some("next") => (s.position + 1).min(last.max(0)),
                    _ => (s.position - 1).max(0),
                };
                json!("OK")
            }
            "Player.GetItem" => json!({ "item": s.item }),
            "Playlist.GetProperties" => json!({ "size": s.items.len() }),
            "Playlist.GetItems" => json!({ "items": s.items }),
            "Application.SetMute" => {
                s.muted = !s.muted;
                json!(s.muted)
            }
            "Application.GetProperties" => json!({ "volume": s.volume }),
            "Application.SetVolume" => {
                s.volume = p["volume"].as_i64().unwrap_or(s.volume);
                json!(s.volume)
            }
            _ => json!("OK"),
        };
        Ok(result)
    }
}
