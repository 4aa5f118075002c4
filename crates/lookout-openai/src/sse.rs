// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SSE stream parser for streaming assistant runs.
//!
//! Converts a reqwest response byte stream into [`RunEvent`]s using the
//! `eventsource-stream` crate for SSE protocol compliance.

use futures::stream::StreamExt;
use eventsource_stream::Eventsource;
use lookout_core::traits::RunEventStream;
use lookout_core::types::RunEvent;
use lookout_core::LookoutError;

use crate::types::{SseError, SseMessage, SseRun};

/// Parses a streaming run response into typed run events.
///
/// Only completed messages and terminal failures carry data; every other
/// event is passed through by name as [`RunEvent::Other`]. The `done`
/// sentinel is dropped.
pub fn parse_run_stream(response: reqwest::Response) -> RunEventStream {
    let event_stream = response.bytes_stream().eventsource();

    let mapped = event_stream.filter_map(|result| async move {
        match result {
            Ok(event) => map_event(&event.event, &event.data),
            Err(e) => Some(Err(LookoutError::Provider {
                message: format!("SSE stream error: {e}"),
                source: None,
            })),
        }
    });

    Box::pin(mapped)
}

/// Maps one SSE event to a run event. `None` means the event is dropped.
pub fn map_event(name: &str, data: &str) -> Option<Result<RunEvent, LookoutError>> {
    let parsed = match name {
        "thread.message.completed" => serde_json::from_str::<SseMessage>(data)
            .map(|msg| match msg.first_text() {
                Some(text) => RunEvent::MessageCompleted(text.to_string()),
                None => RunEvent::Other(name.to_string()),
            })
            .map_err(|e| parse_error(name, e)),
        "thread.run.failed" | "thread.run.cancelled" | "thread.run.expired" => {
            serde_json::from_str::<SseRun>(data)
                .map(|run| {
                    let reason = run
                        .last_error
                        .map(|e| match e.code {
                            Some(code) => format!("{code}: {}", e.message),
                            None => e.message,
                        })
                        .or(run.status)
                        .unwrap_or_else(|| name.to_string());
                    RunEvent::RunFailed(reason)
                })
                .map_err(|e| parse_error(name, e))
        }
        "error" => {
            let message = serde_json::from_str::<SseError>(data)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| data.to_string());
            Err(LookoutError::provider(format!("run stream error: {message}")))
        }
        "done" => return None,
        // Unnamed frames: the only one the API sends is the `[DONE]` sentinel.
        "" | "message" if data.trim() == "[DONE]" => return None,
        other => Ok(RunEvent::Other(other.to_string())),
    };
    Some(parsed)
}

fn parse_error(name: &str, e: serde_json::Error) -> LookoutError {
    LookoutError::Provider {
        message: format!("failed to parse {name}: {e}"),
        source: Some(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_message_yields_first_text_part() {
        let data = r#"{"id":"msg_1","object":"thread.message","status":"completed",
            "content":[{"type":"text","text":{"value":"Two incidents.","annotations":[]}}]}"#;
        let event = map_event("thread.message.completed", data).unwrap().unwrap();
        assert_eq!(event, RunEvent::MessageCompleted("Two incidents.".into()));
    }

    #[test]
    fn completed_message_without_text_is_other() {
        let data = r#"{"content":[{"type":"image_file","image_file":{"file_id":"file-1"}}]}"#;
        let event = map_event("thread.message.completed", data).unwrap().unwrap();
        assert!(matches!(event, RunEvent::Other(_)));
    }

    #[test]
    fn run_failed_carries_last_error() {
        let data = r#"{"id":"run_1","status":"failed",
            "last_error":{"code":"rate_limit_exceeded","message":"slow down"}}"#;
        let event = map_event("thread.run.failed", data).unwrap().unwrap();
        assert_eq!(
            event,
            RunEvent::RunFailed("rate_limit_exceeded: slow down".into())
        );
    }

    #[test]
    fn expired_run_without_error_uses_status() {
        let event = map_event("thread.run.expired", r#"{"status":"expired"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(event, RunEvent::RunFailed("expired".into()));
    }

    #[test]
    fn done_sentinel_is_dropped() {
        assert!(map_event("done", "[DONE]").is_none());
        assert!(map_event("", "[DONE]").is_none());
    }

    #[test]
    fn error_event_is_an_error() {
        let result = map_event("error", r#"{"message":"server_error"}"#).unwrap();
        assert!(result.unwrap_err().to_string().contains("server_error"));
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(map_event("thread.message.completed", "{not json").unwrap().is_err());
    }

    #[test]
    fn other_events_pass_through_by_name() {
        let event = map_event("thread.message.delta", "{}").unwrap().unwrap();
        assert_eq!(event, RunEvent::Other("thread.message.delta".into()));
    }
}
