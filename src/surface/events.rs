//! Incremental decoding of the agent event stream.
//!
//! The runtime speaks Server-Sent Events: one JSON event per `data:` line.
//! The decoder is fed raw body chunks and yields complete events; partial
//! lines are buffered until their newline arrives.

use crate::gateway::types::AgentEvent;

#[derive(Debug, Default)]
pub struct SseDecoder {
    buf: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one body chunk; returns every event completed by it.
    ///
    /// Malformed data lines are logged and skipped rather than failing the
    /// stream: a single bad event must not tear down the turn.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<AgentEvent> {
        self.buf.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(newline) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=newline).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(['\n', '\r']);

            let Some(data) = line.strip_prefix("data:") else {
                // Blank keep-alive lines and SSE comments are expected.
                continue;
            };
            let data = data.trim();
            if data.is_empty() {
                continue;
            }

            match serde_json::from_str::<AgentEvent>(data) {
                Ok(event) => events.push(event),
                Err(err) => {
                    tracing::warn!("Skipping malformed agent event: {err}");
                }
            }
        }
        events
    }
}

/// Encode one event as an SSE frame. Used by stub runtimes in tests and kept
/// next to the decoder so the framing stays in one place.
pub fn sse_frame(event: &AgentEvent) -> String {
    let json = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
    format!("data: {json}\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ToolLogStatus;

    #[test]
    fn decodes_complete_frames() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push(b"data: {\"type\":\"stream_chunk\",\"content\":\"Ol\xc3\xa1\"}\n\n");
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            AgentEvent::StreamChunk { ref content } if content == "Olá"
        ));
    }

    #[test]
    fn buffers_partial_lines_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: {\"type\":\"tool_log\",\"id\":1,").is_empty());
        let events =
            decoder.push(b"\"message\":\"Consultando\",\"status\":\"processing\"}\n");
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            AgentEvent::ToolLog {
                id: 1,
                status: ToolLogStatus::Processing,
                ..
            }
        ));
    }

    #[test]
    fn skips_comments_blank_lines_and_malformed_data() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push(
            b": keep-alive\n\ndata: not json\ndata: {\"type\":\"done\"}\n",
        );
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], AgentEvent::Done));
    }

    #[test]
    fn frame_and_decode_round_trip() {
        let frame = sse_frame(&AgentEvent::Error {
            message: "runtime indisponível".to_string(),
        });
        let mut decoder = SseDecoder::new();
        let events = decoder.push(frame.as_bytes());
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            AgentEvent::Error { ref message } if message == "runtime indisponível"
        ));
    }
}
