pub mod player;

use crate::config::OptionMap;
use crate::error::RemoteError;
use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use player::{PlayerId, PlayerState, Speed};

/// Something that can run a JSON-RPC method against the player.
pub trait Rpc {
    fn call(&self, method: &str, params: Option<Value>) -> Result<Value, RemoteError>;

    /// Id of the first active player. Asked fresh every time since playback
    /// can stop between two commands.
    fn active_player_id(&self) -> Result<Option<PlayerId>, RemoteError> {
        Ok(player::active_players(self)?
            .first()
            .map(|p| p.playerid))
    }
}

#[derive(Serialize)]
struct Request<'a> {
    jsonrpc: &'static str,
    id: u32,
    method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<&'a Value>,
}

#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<ErrorObject>,
}

#[derive(Deserialize)]
struct ErrorObject {
    #[serde(default)]
    code: i64,
    message: String,
}

/// Blocking JSON-RPC client for the player's web interface.
pub struct RemoteClient {
    http: Client,
    url: String,
    user: String,
    password: String,
}

impl RemoteClient {
    pub fn new(host: &str, user: &str, password: &str) -> Self {
        Self {
            http: Client::new(),
            url: format!("http://{host}/jsonrpc"),
            user: user.to_string(),
            password: password.to_string(),
        }
    }

    pub fn from_options(opts: &OptionMap) -> Self {
        Self::new(
            opts.get("xbmc_ip").unwrap_or("127.0.0.1"),
            opts.get("xbmc_user").unwrap_or_default(),
            opts.get("xbmc_pass").unwrap_or_default(),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Rpc for RemoteClient {
    fn call(&self, method: &str, params: Option<Value>) -> Result<Value, RemoteError> {
        let envelope = Request {
            jsonrpc: "2.0",
            id: 1,
            method,
            params: params.as_ref(),
        };
        let encoded = serde_json::to_string(&envelope)
            .map_err(|e| RemoteError::Protocol(format!("Failed to encode {method}: {e}")))?;
        debug!("-> {encoded}");

        let response = self
            .http
            .get(&self.url)
            .query(&[("request", encoded.as_str())])
            .header(CONTENT_TYPE, "application/json")
            .basic_auth(&self.user, Some(&self.password))
            .send()
            .map_err(|e| {
                warn!("{method} failed to reach {}: {e}", self.url);
                RemoteError::Transport(transport_cause(&e).to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("{method} answered with HTTP {status}");
            return Err(RemoteError::Http(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default().to_string(),
            ));
        }

        let body = response
            .text()
            .map_err(|e| RemoteError::Transport(transport_cause(&e).to_string()))?;
        debug!("<- {body}");
        let reply: Response = serde_json::from_str(&body)
            .map_err(|e| RemoteError::Protocol(format!("Malformed reply to {method}: {e}")))?;

        if let Some(error) = reply.error {
            warn!("{method} returned error {}: {}", error.code, error.message);
            return Err(RemoteError::Protocol(error.message));
        }
        Ok(reply.result.unwrap_or(Value::Null))
    }
}

fn transport_cause(error: &reqwest::Error) -> &'static str {
    if error.is_timeout() {
        "Timeout"
    } else if error.is_connect() {
        "ConnectionError"
    } else if error.is_builder() {
        "InvalidURL"
    } else if error.is_redirect() {
        "TooManyRedirects"
    } else if error.is_body() || error.is_decode() {
        "ContentDecodingError"
    } else {
        "RequestException"
    }
}
