//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! applying subscription commands and forwarding filtered change events.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::{SubscriptionManager, WILDCARD};
use crate::domain::{ChangeEvent, Topic};
use crate::error::WinestaError;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and applies them.
/// - Forwards events from the [`broadcast::Receiver`] whose topic matches.
pub async fn run_connection(socket: WebSocket, mut event_rx: broadcast::Receiver<ChangeEvent>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = handle_text_message(&text, &mut subs);
                        if let Some(json) = encode(&reply)
                            && ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            event = event_rx.recv() => {
                match event {
                    Ok(change) => {
                        if !subs.matches(change.topic()) {
                            continue;
                        }
                        let msg = WsMessage::server(
                            uuid::Uuid::new_v4().to_string(),
                            WsMessageType::Event,
                            serde_json::to_value(&change).unwrap_or_default(),
                        );
                        if let Some(json) = encode(&msg)
                            && ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind change bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

fn encode(msg: &WsMessage) -> Option<String> {
    serde_json::to_string(msg)
        .inspect_err(|e| tracing::error!(error = %e, "failed to encode ws message"))
        .ok()
}

/// Handles a text frame from the client, returning the reply envelope.
fn handle_text_message(text: &str, subs: &mut SubscriptionManager) -> WsMessage {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return WsMessage::error(String::new(), 1001, "malformed JSON");
    };
    if msg.msg_type != WsMessageType::Command {
        return WsMessage::error(msg.id, 1001, "expected a command message");
    }
    let command = match serde_json::from_value::<WsCommand>(msg.payload) {
        Ok(command) => command,
        Err(e) => return WsMessage::error(msg.id, 1001, format!("unknown command: {e}")),
    };

    match apply_command(command, subs) {
        Ok(payload) => WsMessage::server(msg.id, WsMessageType::Response, payload),
        Err(e) => WsMessage::error(msg.id, e.error_code(), e.to_string()),
    }
}

fn apply_command(
    command: WsCommand,
    subs: &mut SubscriptionManager,
) -> Result<serde_json::Value, WinestaError> {
    match command {
        WsCommand::Subscribe { topics } => {
            let (parsed, wildcard) = parse_topics(&topics)?;
            subs.subscribe(&parsed, wildcard);
            tracing::debug!(?parsed, wildcard, "ws subscribe");
            Ok(subscription_state("subscribe", subs))
        }
        WsCommand::Unsubscribe { topics } => {
            let (parsed, wildcard) = parse_topics(&topics)?;
            subs.unsubscribe(&parsed, wildcard);
            tracing::debug!(?parsed, wildcard, "ws unsubscribe");
            Ok(subscription_state("unsubscribe", subs))
        }
    }
}

/// Splits raw topic names into known topics and the wildcard flag.
fn parse_topics(raw: &[String]) -> Result<(Vec<Topic>, bool), WinestaError> {
    let mut topics = Vec::with_capacity(raw.len());
    let mut wildcard = false;
    for name in raw {
        if name == WILDCARD {
            wildcard = true;
        } else {
            topics.push(name.parse::<Topic>()?);
        }
    }
    Ok((topics, wildcard))
}

fn subscription_state(command: &str, subs: &SubscriptionManager) -> serde_json::Value {
    serde_json::json!({
        "command": command,
        "topics": subs.topics().iter().map(Topic::as_str).collect::<Vec<_>>(),
        "wildcard": subs.is_subscribed_all(),
    })
}
