//! Polling fallback stream frames.
//!
//! The stream speaks a two-frame protocol: a `connected` frame once at
//! open, then a `messages` frame per poll tick that found new rows. A tick
//! with nothing new emits no frame at all (silence is not a signal).

use serde::{Deserialize, Serialize};

use super::http::MessageDto;

/// Frames emitted on the polling fallback stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamFrame {
    Connected,
    Messages { data: Vec<MessageDto> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::dto::websocket::UserDto;

    #[test]
    fn test_connected_frame_wire_format() {
        // テスト項目: connected フレームが規定のワイヤ形式で書き出される
        // given (前提条件):
        let frame = StreamFrame::Connected;

        // when (操作):
        let json = serde_json::to_string(&frame).unwrap();

        // then (期待する結果):
        assert_eq!(json, r#"{"type":"connected"}"#);
    }

    #[test]
    fn test_messages_frame_carries_data_array() {
        // テスト項目: messages フレームが data 配列を持つ
        // given (前提条件):
        let frame = StreamFrame::Messages {
            data: vec![MessageDto {
                id: "m1".to_string(),
                channel_id: "c1".to_string(),
                user: UserDto {
                    id: "u1".to_string(),
                    name: "Alice".to_string(),
                    image: None,
                },
                body: "hi".to_string(),
                created_at: 1_000,
            }],
        };

        // when (操作):
        let json = serde_json::to_string(&frame).unwrap();

        // then (期待する結果):
        assert!(json.starts_with(r#"{"type":"messages","data":["#));
        assert!(json.contains(r#""id":"m1""#));
    }
}
