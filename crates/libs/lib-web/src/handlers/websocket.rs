//! # WebSocket Handlers
//!
//! Live quote stream.
//!
//! ## Endpoints
//!
//! - `GET /ws/quotes` - WebSocket connection pushing quotes for one subscribed pair
//!
//! ## Protocol
//!
//! ```text
//! client → {"type":"subscribe_quote","data":{"tokenIn":"SUI","tokenOut":"DEEP","amountIn":"1"}}
//! server → {"type":"quote_update","data":{...},"timestamp":1700000000000}   immediately, then every 2s
//! server → {"type":"quote_error","error":"...","timestamp":1700000000000}    when pricing fails
//! client → {"type":"unsubscribe_quote"}
//! server → {"type":"unsubscribed"}
//! ```
//!
//! A connection holds at most one subscription; subscribing again replaces it.
//! Closing the socket drops the subscription.
//!
//! ```javascript
//! const ws = new WebSocket('ws://localhost:3001/ws/quotes');
//! ws.onopen = () => ws.send(JSON.stringify({
//!   type: 'subscribe_quote',
//!   data: { tokenIn: 'SUI', tokenOut: 'DEEP', amountIn: '1' },
//! }));
//! ws.onmessage = (event) => console.log(JSON.parse(event.data));
//! ```

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use lib_sui::SuiState;
use lib_utils::now_millis;
use serde::Serialize;
use shared::{ClientFrame, ServerFrame, StreamError};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::services::{QuoteParams, QuoteService};

/// Interval between pushes for an active subscription.
pub const QUOTE_PUSH_INTERVAL: Duration = Duration::from_secs(2);

/// Outgoing frames buffered per connection.
const OUTBOX_CAPACITY: usize = 32;

/// WebSocket handler for live quotes.
///
/// **Route**: `GET /ws/quotes`
pub async fn quote_stream_websocket(
    ws: WebSocketUpgrade,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(sui): State<SuiState>,
) -> Response {
    let client_id = Uuid::new_v4().to_string();
    let client_ip = headers
        .get("x-forwarded-for")
        .or_else(|| headers.get("x-real-ip"))
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| addr.ip().to_string());

    info!(
        client_id = %client_id,
        client_ip = %client_ip,
        path = "/ws/quotes",
        "[WS] CONNECT_ATTEMPT client_id={} ip={}",
        client_id,
        client_ip
    );

    let quotes = QuoteService::new(sui.deepbook);
    ws.on_upgrade(move |socket| handle_quote_websocket(socket, quotes, client_id, client_ip))
}

/// Drive one connection until either side closes.
async fn handle_quote_websocket(socket: WebSocket, quotes: QuoteService, client_id: String, client_ip: String) {
    let (mut sender, mut receiver) = socket.split();
    let connection_start = Instant::now();
    let messages_sent = Arc::new(AtomicU64::new(0));
    let messages_received = Arc::new(AtomicU64::new(0));
    let (outbox, mut outbox_rx) = mpsc::channel::<String>(OUTBOX_CAPACITY);

    info!(
        client_id = %client_id,
        client_ip = %client_ip,
        "[WS] CONNECTED client_id={} ip={} - WebSocket connection established",
        client_id,
        client_ip
    );

    let client_id_send = client_id.clone();
    let messages_sent_send = Arc::clone(&messages_sent);
    let mut send_task = tokio::spawn(async move {
        while let Some(json) = outbox_rx.recv().await {
            let message_size = json.len();
            if let Err(e) = sender.send(Message::Text(json.into())).await {
                warn!(
                    client_id = %client_id_send,
                    error = %e,
                    "[WS] SEND_ERROR client_id={} error={}",
                    client_id_send,
                    e
                );
                break;
            }
            let count = messages_sent_send.fetch_add(1, Ordering::Relaxed) + 1;
            debug!(
                client_id = %client_id_send,
                message_size,
                total_sent = count,
                "[WS] MESSAGE_SENT client_id={} size={} total={}",
                client_id_send,
                message_size,
                count
            );
        }
    });

    let client_id_recv = client_id.clone();
    let messages_received_recv = Arc::clone(&messages_received);
    let mut recv_task = tokio::spawn(async move {
        let mut stream = QuoteStream::new(quotes, outbox);
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    messages_received_recv.fetch_add(1, Ordering::Relaxed);
                    debug!(
                        client_id = %client_id_recv,
                        message = %text.as_str(),
                        "[WS] MESSAGE_RECEIVED client_id={} size={}",
                        client_id_recv,
                        text.len()
                    );
                    stream.handle_text(text.as_str()).await;
                }
                Ok(Message::Close(frame)) => {
                    let close_reason = frame
                        .as_ref()
                        .map(|f| f.code.to_string())
                        .unwrap_or_else(|| "unknown".to_string());
                    info!(
                        client_id = %client_id_recv,
                        reason = %close_reason,
                        "[WS] CLOSE_RECEIVED client_id={} reason={}",
                        client_id_recv,
                        close_reason
                    );
                    break;
                }
                Ok(Message::Binary(_)) => {
                    messages_received_recv.fetch_add(1, Ordering::Relaxed);
                    stream.reject(shared::FrameError::InvalidFormat).await;
                }
                // axum answers pings itself
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {}
                Err(e) => {
                    error!(
                        client_id = %client_id_recv,
                        error = %e,
                        "[WS] RECV_ERROR client_id={} error={}",
                        client_id_recv,
                        e
                    );
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    let duration = connection_start.elapsed();
    info!(
        client_id = %client_id,
        client_ip = %client_ip,
        duration_ms = duration.as_millis(),
        messages_sent = messages_sent.load(Ordering::Relaxed),
        messages_received = messages_received.load(Ordering::Relaxed),
        "[WS] DISCONNECTED client_id={} ip={} duration={:.2}s",
        client_id,
        client_ip,
        duration.as_secs_f64()
    );
}

// region:    --- QuoteStream

/// Per-connection subscription state. Frames go to `outbox` as JSON text.
///
/// Dropping the stream cancels its subscription.
pub struct QuoteStream {
    quotes: QuoteService,
    outbox: mpsc::Sender<String>,
    subscription: Option<JoinHandle<()>>,
}

impl QuoteStream {
    pub fn new(quotes: QuoteService, outbox: mpsc::Sender<String>) -> Self {
        Self {
            quotes,
            outbox,
            subscription: None,
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// React to one client text frame.
    pub async fn handle_text(&mut self, text: &str) {
        match ClientFrame::parse(text) {
            Ok(ClientFrame::SubscribeQuote { data }) => match QuoteParams::from_request(&data) {
                Some(params) => self.subscribe(params),
                None => {
                    send_json(
                        &self.outbox,
                        &StreamError {
                            error: "Missing required fields".to_string(),
                        },
                    )
                    .await;
                }
            },
            Ok(ClientFrame::UnsubscribeQuote) => {
                self.cancel();
                info!("[WS] Unsubscribed from quotes");
                send_json(&self.outbox, &ServerFrame::Unsubscribed).await;
            }
            Err(err) => self.reject(err).await,
        }
    }

    async fn reject(&self, err: shared::FrameError) {
        send_json(&self.outbox, &StreamError::from(err)).await;
    }

    fn subscribe(&mut self, params: QuoteParams) {
        self.cancel();
        info!(
            "[WS] Subscribing to quote: {} {} -> {}",
            params.amount_in, params.token_in, params.token_out
        );

        let quotes = self.quotes.clone();
        let outbox = self.outbox.clone();
        self.subscription = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(QUOTE_PUSH_INTERVAL);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let frame = match quotes.quote(&params).await {
                    Ok(quote) => ServerFrame::QuoteUpdate {
                        data: quote,
                        timestamp: now_millis(),
                    },
                    Err(err) => {
                        debug!(error = %err, "[WS] Quote failed");
                        ServerFrame::QuoteError {
                            error: err.user_message(),
                            timestamp: now_millis(),
                        }
                    }
                };
                if !send_json(&outbox, &frame).await {
                    break;
                }
            }
        }));
    }

    fn cancel(&mut self) {
        if let Some(task) = self.subscription.take() {
            task.abort();
        }
    }
}

impl Drop for QuoteStream {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Queue a frame; `false` once the connection is gone.
async fn send_json<T: Serialize>(outbox: &mpsc::Sender<String>, frame: &T) -> bool {
    match serde_json::to_string(frame) {
        Ok(json) => outbox.send(json).await.is_ok(),
        Err(e) => {
            error!(error = %e, "[WS] SERIALIZE_ERROR error={}", e);
            true
        }
    }
}

// endregion: --- QuoteStream

#[cfg(test)]
mod tests {
    use super::*;
    use lib_sui::deepbook::testing::deepbook_with_book;
    use serde_json::Value;

    fn stream() -> (QuoteStream, mpsc::Receiver<String>) {
        let deepbook = deepbook_with_book(&[("0.05", "1000")], &[("0.06", "1000")]);
        let (tx, rx) = mpsc::channel(OUTBOX_CAPACITY);
        (QuoteStream::new(QuoteService::new(Arc::new(deepbook)), tx), rx)
    }

    async fn next_frame(rx: &mut mpsc::Receiver<String>) -> Value {
        serde_json::from_str(&rx.recv().await.unwrap()).unwrap()
    }

    const SUBSCRIBE: &str =
        r#"{"type":"subscribe_quote","data":{"tokenIn":"deep","tokenOut":"sui","amountIn":"100"}}"#;

    #[tokio::test(start_paused = true)]
    async fn test_subscribe_pushes_immediately_then_on_interval() {
        // Arrange
        let (mut stream, mut rx) = stream();

        // Act
        stream.handle_text(SUBSCRIBE).await;
        let first = next_frame(&mut rx).await;
        let started = tokio::time::Instant::now();
        let second = next_frame(&mut rx).await;

        // Assert
        assert_eq!(first["type"], "quote_update");
        assert_eq!(first["data"]["tokenIn"], "DEEP");
        assert_eq!(first["data"]["estimatedAmountOut"], "5");
        assert!(first["timestamp"].is_i64());
        assert_eq!(second["type"], "quote_update");
        assert!(started.elapsed() >= QUOTE_PUSH_INTERVAL);
        assert!(stream.is_subscribed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unsubscribe_stops_pushes() {
        // Arrange
        let (mut stream, mut rx) = stream();
        stream.handle_text(SUBSCRIBE).await;
        next_frame(&mut rx).await;

        // Act
        stream.handle_text(r#"{"type":"unsubscribe_quote"}"#).await;
        tokio::time::sleep(QUOTE_PUSH_INTERVAL * 3).await;

        // Assert
        assert_eq!(next_frame(&mut rx).await, serde_json::json!({"type": "unsubscribed"}));
        assert!(rx.try_recv().is_err());
        assert!(!stream.is_subscribed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pricing_failure_is_a_quote_error() {
        let (mut stream, mut rx) = stream();

        stream
            .handle_text(r#"{"type":"subscribe_quote","data":{"tokenIn":"DOGE","tokenOut":"SUI","amountIn":"1"}}"#)
            .await;
        let frame = next_frame(&mut rx).await;

        assert_eq!(frame["type"], "quote_error");
        assert_eq!(frame["error"], "Invalid token symbol");
    }

    #[tokio::test]
    async fn test_rejected_frames() {
        let (mut stream, mut rx) = stream();

        stream.handle_text("{not json").await;
        stream.handle_text(r#"{"type":"ping"}"#).await;
        stream
            .handle_text(r#"{"type":"subscribe_quote","data":{"tokenIn":"SUI"}}"#)
            .await;

        assert_eq!(next_frame(&mut rx).await["error"], "Invalid message format");
        assert_eq!(next_frame(&mut rx).await["error"], "Unknown message type");
        assert_eq!(next_frame(&mut rx).await["error"], "Missing required fields");
        assert!(!stream.is_subscribed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_subscription() {
        let (mut stream, mut rx) = stream();
        stream.handle_text(SUBSCRIBE).await;
        next_frame(&mut rx).await;

        drop(stream);

        // Every sender is gone once the subscription task is aborted
        assert!(rx.recv().await.is_none());
    }
}
