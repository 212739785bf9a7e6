// End-to-end session lifecycle over real WebSockets.
//
// All tests share one server, so assertions check the presence or absence
// of this test's own player ids rather than exact world contents.

mod support;

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

// Upper bound on messages to scan for an expected one; gameState frames
// arrive every 50ms per connected session, so the queue moves quickly.
const SCAN_LIMIT: usize = 400;

async fn connect() -> WsClient {
    let (socket, _) = connect_async(support::ws_url())
        .await
        .expect("ws connect");
    socket
}

async fn next_json(socket: &mut WsClient) -> Value {
    loop {
        let msg = timeout(Duration::from_secs(5), socket.next())
            .await
            .expect("timed out waiting for message")
            .expect("stream ended")
            .expect("ws error");
        if let Message::Text(text) = msg {
            return serde_json::from_str(&text).expect("valid json");
        }
    }
}

// Reads until a message with the given type tag arrives, skipping the
// gameState frames interleaved with everything else.
async fn wait_for(socket: &mut WsClient, msg_type: &str) -> Value {
    for _ in 0..SCAN_LIMIT {
        let msg = next_json(socket).await;
        if msg["type"] == msg_type {
            return msg;
        }
    }
    panic!("no {msg_type} message arrived");
}

// Waits for a join/leave notification about one specific player; other
// tests' clients come and go on the shared server, so unrelated
// notifications are skipped.
async fn wait_for_notification(socket: &mut WsClient, msg_type: &str, player_id: &str) -> Value {
    for _ in 0..SCAN_LIMIT {
        let msg = wait_for(socket, msg_type).await;
        let id = if msg["data"].is_string() {
            msg["data"].clone()
        } else {
            msg["data"]["id"].clone()
        };
        if id == Value::String(player_id.to_string()) {
            return msg;
        }
    }
    panic!("no {msg_type} for player {player_id} arrived");
}

async fn wait_for_player_x(socket: &mut WsClient, player_id: &str, expected: i64) -> Value {
    for _ in 0..SCAN_LIMIT {
        let msg = next_json(socket).await;
        if msg["type"] == "gameState"
            && msg["data"]["players"][player_id]["x"].as_i64() == Some(expected)
        {
            return msg;
        }
    }
    panic!("player {player_id} never reached x={expected}");
}

async fn wait_for_player_gone(socket: &mut WsClient, player_id: &str) {
    for _ in 0..SCAN_LIMIT {
        let msg = next_json(socket).await;
        if msg["type"] == "gameState" && msg["data"]["players"].get(player_id).is_none() {
            return;
        }
    }
    panic!("player {player_id} never left the broadcast snapshots");
}

async fn send_move(socket: &mut WsClient, direction: &str) {
    let text = json!({"type": "movePlayer", "data": direction}).to_string();
    socket.send(Message::Text(text.into())).await.expect("send");
}

fn own_id(init: &Value) -> String {
    init["data"]["id"]
        .as_str()
        .expect("init carries the session id")
        .to_string()
}

#[tokio::test]
async fn init_describes_self_and_the_collectible_set() {
    let mut client = connect().await;
    let init = wait_for(&mut client, "init").await;
    let id = own_id(&init);

    let me = &init["data"]["players"][&id];
    assert_eq!(me["id"], Value::String(id.clone()));
    assert_eq!(me["x"], 0);
    assert_eq!(me["y"], 0);
    assert_eq!(me["score"], 0);
    assert_eq!(me["width"], 20);
    assert_eq!(me["height"], 20);

    let collectibles = init["data"]["collectibles"]
        .as_array()
        .expect("collectibles array");
    assert_eq!(collectibles.len(), 2);
    assert_eq!(collectibles[0]["id"], "col1");
    assert_eq!(collectibles[0]["value"], 1);
    assert_eq!(collectibles[0]["width"], 15);
    assert_eq!(collectibles[1]["id"], "col2");
    assert_eq!(collectibles[1]["x"], 300);
}

#[tokio::test]
async fn full_session_lifecycle_is_visible_to_peers() {
    let mut a = connect().await;
    let init_a = wait_for(&mut a, "init").await;
    let a_id = own_id(&init_a);

    let mut b = connect().await;
    let init_b = wait_for(&mut b, "init").await;
    let b_id = own_id(&init_b);

    // B's init already contains both players.
    assert!(init_b["data"]["players"].get(&a_id).is_some());
    assert!(init_b["data"]["players"].get(&b_id).is_some());
    // A's init predates B.
    assert!(init_a["data"]["players"].get(&b_id).is_none());

    // A hears about B joining, but not about itself.
    let joined = wait_for_notification(&mut a, "playerJoined", &b_id).await;
    assert_eq!(joined["data"]["player"]["x"], 0);
    assert_eq!(joined["data"]["player"]["width"], 20);

    // One step right becomes visible to both clients as exactly +5.
    send_move(&mut a, "right").await;
    wait_for_player_x(&mut a, &a_id, 5).await;
    wait_for_player_x(&mut b, &a_id, 5).await;

    // B leaves: A gets playerLeft and later snapshots drop B.
    b.close(None).await.expect("close");
    wait_for_notification(&mut a, "playerLeft", &b_id).await;
    wait_for_player_gone(&mut a, &b_id).await;
}

#[tokio::test]
async fn invalid_messages_leave_the_player_unmoved() {
    let mut client = connect().await;
    let init = wait_for(&mut client, "init").await;
    let id = own_id(&init);

    // Unknown direction token, then an entirely malformed payload.
    client
        .send(Message::Text(
            json!({"type": "movePlayer", "data": "diagonal"})
                .to_string()
                .into(),
        ))
        .await
        .expect("send");
    client
        .send(Message::Text("{not json".to_string().into()))
        .await
        .expect("send");

    // A valid step afterwards moves exactly one axis; the rejected
    // messages contributed nothing.
    send_move(&mut client, "down").await;
    for _ in 0..SCAN_LIMIT {
        let msg = next_json(&mut client).await;
        if msg["type"] == "gameState" && msg["data"]["players"][&id]["y"].as_i64() == Some(5) {
            assert_eq!(msg["data"]["players"][&id]["x"], 0);
            return;
        }
    }
    panic!("player never reached y=5");
}
