//! Frames exchanged on `/ws/quotes`.
//!
//! ```text
//! client → {"type":"subscribe_quote","data":{"tokenIn":"SUI","tokenOut":"DEEP","amountIn":"1"}}
//! server → {"type":"quote_update","data":{...},"timestamp":1700000000000}
//! client → {"type":"unsubscribe_quote"}
//! server → {"type":"unsubscribed"}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::quote::{Quote, QuoteRequest};

/// Frame sent by a client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    SubscribeQuote { data: QuoteRequest },
    UnsubscribeQuote,
}

/// Why a client frame was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Not JSON, no `type`, or a known type with a malformed payload
    InvalidFormat,
    UnknownType,
}

impl FrameError {
    pub fn message(&self) -> &'static str {
        match self {
            FrameError::InvalidFormat => "Invalid message format",
            FrameError::UnknownType => "Unknown message type",
        }
    }
}

impl ClientFrame {
    /// Parse a text frame, telling unknown types apart from malformed input.
    pub fn parse(text: &str) -> Result<Self, FrameError> {
        let value: Value = serde_json::from_str(text).map_err(|_| FrameError::InvalidFormat)?;
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or(FrameError::InvalidFormat)?;

        match kind {
            "subscribe_quote" | "unsubscribe_quote" => {
                serde_json::from_value(value).map_err(|_| FrameError::InvalidFormat)
            }
            _ => Err(FrameError::UnknownType),
        }
    }
}

/// Frame sent by the server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    QuoteUpdate { data: Quote, timestamp: i64 },
    QuoteError { error: String, timestamp: i64 },
    Unsubscribed,
}

/// Reply to a rejected client frame: `{"error": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreamError {
    pub error: String,
}

impl From<FrameError> for StreamError {
    fn from(err: FrameError) -> Self {
        Self {
            error: err.message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subscribe() {
        let frame = ClientFrame::parse(
            r#"{"type":"subscribe_quote","data":{"tokenIn":"SUI","tokenOut":"DEEP","amountIn":"2"}}"#,
        )
        .unwrap();
        assert_eq!(
            frame,
            ClientFrame::SubscribeQuote {
                data: QuoteRequest::new("SUI", "DEEP", "2")
            }
        );
    }

    #[test]
    fn test_parse_unsubscribe() {
        assert_eq!(
            ClientFrame::parse(r#"{"type":"unsubscribe_quote"}"#).unwrap(),
            ClientFrame::UnsubscribeQuote
        );
    }

    #[test]
    fn test_parse_rejections() {
        assert_eq!(ClientFrame::parse("not json"), Err(FrameError::InvalidFormat));
        assert_eq!(ClientFrame::parse(r#"{"data":{}}"#), Err(FrameError::InvalidFormat));
        assert_eq!(
            ClientFrame::parse(r#"{"type":"subscribe_quote"}"#),
            Err(FrameError::InvalidFormat)
        );
        assert_eq!(ClientFrame::parse(r#"{"type":"ping"}"#), Err(FrameError::UnknownType));
    }

    #[test]
    fn test_server_frame_shape() {
        let json = serde_json::to_value(ServerFrame::QuoteError {
            error: "boom".into(),
            timestamp: 1,
        })
        .unwrap();
        assert_eq!(json["type"], "quote_error");
        assert_eq!(json["error"], "boom");
        assert_eq!(
            serde_json::to_value(ServerFrame::Unsubscribed).unwrap(),
            serde_json::json!({"type": "unsubscribed"})
        );
    }
}
