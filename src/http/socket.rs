//! Socket transport: the same translator as `POST /api/translate`, driven
//! by `translate-message` events over a WebSocket.

use super::state::AppState;
use crate::translate::messages::{
    TRANSLATED_TEXT_EVENT, TRANSLATE_MESSAGE_EVENT, TRANSLATION_ERROR_EVENT,
};
use crate::translate::{ErrorResponse, SocketFrame, TranslateMessage, TranslatedText};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

const OUTGOING_BUFFER_SIZE: usize = 64;

/// GET /socket
/// Upgrade to the event socket
pub async fn socket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    info!("Client connected");

    let (mut sender, mut receiver) = socket.split();
    let (out_tx, mut out_rx) = mpsc::channel::<SocketFrame>(OUTGOING_BUFFER_SIZE);

    let sender_task = tokio::spawn(async move {
        while let Some(frame) = out_rx.recv().await {
            let json = match serde_json::to_string(&frame) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize socket frame: {}", e);
                    continue;
                }
            };
            if let Err(e) = sender.send(Message::Text(json)).await {
                warn!("Failed to send socket frame: {}", e);
                break;
            }
        }
    });

    while let Some(msg) = receiver.next().await {
        let text = match msg {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                warn!("Socket error: {}", e);
                break;
            }
        };

        let frame: SocketFrame = match serde_json::from_str(&text) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Ignoring malformed socket frame: {}", e);
                continue;
            }
        };

        if frame.event != TRANSLATE_MESSAGE_EVENT {
            warn!("Ignoring unknown socket event {}", frame.event);
            continue;
        }

        let message: TranslateMessage = match serde_json::from_value(frame.data) {
            Ok(message) => message,
            Err(e) => {
                warn!("Ignoring malformed {} payload: {}", TRANSLATE_MESSAGE_EVENT, e);
                continue;
            }
        };

        let translator = state.translator.clone();
        let out_tx = out_tx.clone();
        tokio::spawn(async move {
            let reply = match translator.translate(&message.text, &message.target_lang).await {
                Ok(text) => SocketFrame::new(
                    TRANSLATED_TEXT_EVENT,
                    &TranslatedText {
                        text,
                        lang: message.target_lang,
                    },
                ),
                Err(e) => {
                    error!("Translation Error: {}", e);
                    SocketFrame::new(
                        TRANSLATION_ERROR_EVENT,
                        &ErrorResponse {
                            error: "Translation failed".to_string(),
                        },
                    )
                }
            };

            match reply {
                Ok(frame) => {
                    let _ = out_tx.send(frame).await;
                }
                Err(e) => error!("Failed to build socket reply: {}", e),
            }
        });
    }

    info!("Client disconnected");
    sender_task.abort();
}
