//! End-to-end WebSocket tests: topic subscriptions and change push.

#![allow(clippy::panic, clippy::indexing_slicing)]

mod common;

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_test::assert_ok;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use common::{TestServer, spawn_app};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn connect(server: &TestServer) -> Socket {
    let (socket, _) = assert_ok!(connect_async(server.ws_url()).await);
    socket
}

async fn send_command(socket: &mut Socket, id: &str, payload: Value) {
    let envelope = json!({
        "id": id,
        "type": "command",
        "timestamp": chrono::Utc::now(),
        "payload": payload,
    });
    assert_ok!(socket.send(Message::text(envelope.to_string())).await);
}

async fn next_json(socket: &mut Socket) -> Value {
    loop {
        let Ok(Some(Ok(frame))) = timeout(Duration::from_secs(5), socket.next()).await else {
            panic!("no frame received");
        };
        if let Message::Text(text) = frame {
            return serde_json::from_str(text.as_str()).unwrap_or_default();
        }
    }
}

#[tokio::test]
async fn subscribed_client_receives_wine_changes() {
    let server = spawn_app().await;
    let mut socket = connect(&server).await;

    send_command(&mut socket, "sub-1", json!({ "command": "subscribe", "topics": ["wines"] })).await;
    let reply = next_json(&mut socket).await;
    assert_eq!(reply["type"], "response");
    assert_eq!(reply["id"], "sub-1");
    assert_eq!(reply["payload"]["topics"], json!(["wines"]));

    // Not forwarded to a wines-only subscriber.
    let resp = assert_ok!(
        server
            .client
            .post(server.url("/api/v1/events"))
            .json(&json!({
                "title": "Barolo vertical",
                "description": "Five vintages side by side.",
                "location": "Chicago",
                "date": "2024-11-02",
                "start_time": "19:00",
                "end_time": "22:00"
            }))
            .send()
            .await
    );
    assert!(resp.status().is_success());

    let resp = assert_ok!(
        server
            .client
            .post(server.url("/api/v1/wines"))
            .json(&json!({ "name": "Barolo", "year": 2016, "region": "Piedmont, Italy" }))
            .send()
            .await
    );
    let created: Value = resp.json().await.unwrap_or_default();

    let event = next_json(&mut socket).await;
    assert_eq!(event["type"], "event");
    assert_eq!(event["payload"]["event_type"], "record_created");
    assert_eq!(event["payload"]["topic"], "wines");
    assert_eq!(event["payload"]["record_id"], created["id"]);
}

#[tokio::test]
async fn wildcard_receives_chat_reply() {
    let server = spawn_app().await;
    let mut socket = connect(&server).await;

    send_command(&mut socket, "sub-all", json!({ "command": "subscribe", "topics": ["*"] })).await;
    let reply = next_json(&mut socket).await;
    assert_eq!(reply["payload"]["wildcard"], true);

    let _ = assert_ok!(
        server
            .client
            .post(server.url("/api/v1/sommelier/messages"))
            .json(&json!({ "text": "Something for a picnic?" }))
            .send()
            .await
    );

    let posted = next_json(&mut socket).await;
    assert_eq!(posted["payload"]["event_type"], "message_posted");
    assert_eq!(posted["payload"]["message"]["sender"], "user");

    let reply = next_json(&mut socket).await;
    assert_eq!(reply["payload"]["event_type"], "message_posted");
    assert_eq!(reply["payload"]["message"]["sender"], "assistant");
}

#[tokio::test]
async fn bad_commands_get_error_envelopes() {
    let server = spawn_app().await;
    let mut socket = connect(&server).await;

    assert_ok!(socket.send(Message::text("not json")).await);
    let reply = next_json(&mut socket).await;
    assert_eq!(reply["type"], "error");

    send_command(&mut socket, "bad-topic", json!({ "command": "subscribe", "topics": ["pools"] })).await;
    let reply = next_json(&mut socket).await;
    assert_eq!(reply["type"], "error");
    assert_eq!(reply["id"], "bad-topic");
    assert_eq!(reply["payload"]["code"], 1001);
}
