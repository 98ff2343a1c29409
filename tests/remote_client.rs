use mockito::{Matcher, Server};
use serde_json::json;
use xbmcremote::{RemoteClient, RemoteError, Rpc};

const ACTIVE_PLAYERS: &str = r#"{"jsonrpc":"2.0","id":1,"method":"Player.GetActivePlayers"}"#;

#[test]
fn returns_the_result_field() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/jsonrpc")
        .match_query(Matcher::UrlEncoded(
            "request".into(),
            ACTIVE_PLAYERS.into(),
        ))
        .match_header("content-type", "application/json")
        .match_header("authorization", "Basic a29kaTpzZWNyZXQ=")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":1,"jsonrpc":"2.0","result":[{"playerid":1,"type":"video"}]}"#)
        .create();

    let client = RemoteClient::new(&server.host_with_port(), "kodi", "secret");
    let result = client.call("Player.GetActivePlayers", None).unwrap();

    assert_eq!(result, json!([{ "playerid": 1, "type": "video" }]));
    mock.assert();
}

#[test]
fn sends_params_inside_the_envelope() {
    let mut server = Server::new();
    let envelope = r#"{"jsonrpc":"2.0","id":1,"method":"Application.SetVolume","params":{"volume":40}}"#;
    let mock = server
        .mock("GET", "/jsonrpc")
        .match_query(Matcher::UrlEncoded("request".into(), envelope.into()))
        .with_status(200)
        .with_body(r#"{"id":1,"jsonrpc":"2.0","result":40}"#)
        .create();

    let client = RemoteClient::new(&server.host_with_port(), "", "");
    let result = client
        .call("Application.SetVolume", Some(json!({ "volume": 40 })))
        .unwrap();

    assert_eq!(result, json!(40));
    mock.assert();
}

#[test]
fn unauthorized_is_an_http_error() {
    let mut server = Server::new();
    server
        .mock("GET", "/jsonrpc")
        .match_query(Matcher::Any)
        .with_status(401)
        .create();

    let client = RemoteClient::new(&server.host_with_port(), "kodi", "wrong");
    let err = client.call("Player.GetActivePlayers", None).unwrap_err();

    assert_eq!(err, RemoteError::Http(401, "Unauthorized".to_string()));
    assert_eq!(err.to_string(), "HTTP 401 - Unauthorized");
}

#[test]
fn error_object_is_a_protocol_error() {
    let mut server = Server::new();
    server
        .mock("GET", "/jsonrpc")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"error":{"code":-32601,"message":"Method not found."},"id":1,"jsonrpc":"2.0"}"#,
        )
        .create();

    let client = RemoteClient::new(&server.host_with_port(), "", "");
    let err = client.call("Player.Rewind", None).unwrap_err();

    assert_eq!(err, RemoteError::Protocol("Method not found.".to_string()));
    assert_eq!(err.to_string(), "Method not found.");
}

#[test]
fn garbage_body_is_a_protocol_error() {
    let mut server = Server::new();
    server
        .mock("GET", "/jsonrpc")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create();

    let client = RemoteClient::new(&server.host_with_port(), "", "");
    let err = client.call("Player.GetActivePlayers", None).unwrap_err();
    assert!(matches!(err, RemoteError::Protocol(_)));
}

#[test]
fn unreachable_host_is_a_transport_error() {
    // Nothing listens on port 1.
    let client = RemoteClient::new("127.0.0.1:1", "", "");
    let err = client.call("Player.GetActivePlayers", None).unwrap_err();
    assert!(matches!(err, RemoteError::Transport(_)), "{err:?}");
}

#[test]
fn malformed_host_is_a_transport_error() {
    let client = RemoteClient::new("not a host:http", "", "");
    let err = client.call("Player.GetActivePlayers", None).unwrap_err();
    assert!(matches!(err, RemoteError::Transport(_)), "{err:?}");
}

#[test]
fn active_player_id_takes_the_first_player() {
    let mut server = Server::new();
    server
        .mock("GET", "/jsonrpc")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"id":1,"jsonrpc":"2.0","result":[{"playerid":1,"type":"video"},{"playerid":2,"type":"picture"}]}"#,
        )
        .create();

    let client = RemoteClient::new(&server.host_with_port(), "", "");
    assert_eq!(client.active_player_id().unwrap(), Some(1));
}

#[test]
fn active_player_id_is_none_when_idle() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/jsonrpc")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"id":1,"jsonrpc":"2.0","result":[]}"#)
        .expect(2)
        .create();

    let client = RemoteClient::new(&server.host_with_port(), "", "");
    assert_eq!(client.active_player_id().unwrap(), None);
    // Asked again rather than remembered.
    assert_eq!(client.active_player_id().unwrap(), None);
    mock.assert();
}
