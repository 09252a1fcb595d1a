// SPDX-FileCopyrightText: 2026 Parsimon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SSE stream parser for streamed chat-completion responses.
//!
//! Converts a reqwest response byte stream into text fragments using the
//! `eventsource-stream` crate for SSE protocol compliance. Each event's
//! payload is either the literal `[DONE]` end-of-stream sentinel or a JSON
//! chunk carrying `choices[0].delta.content`.

use eventsource_stream::Eventsource;
use futures::future;
use futures::stream::StreamExt;
use parsimon_core::{ParsimonError, TextStream};
use tracing::debug;

use crate::types::ChatCompletionChunk;

/// Intermediate classification of one SSE event.
enum Frame {
    Text(String),
    Skip,
    Done,
    Failed(ParsimonError),
}

/// Parses a reqwest streaming response into a stream of text fragments.
///
/// The `[DONE]` sentinel terminates the stream. Payloads that are not valid
/// JSON, or chunks without delta content (role-only deltas, finish markers),
/// are skipped rather than treated as fatal. Transport errors surface as an
/// `Err` item and the stream ends with them.
pub fn parse_sse_stream(response: reqwest::Response) -> TextStream {
    let frames = response.bytes_stream().eventsource().map(|result| {
        match result {
            Ok(event) if event.data == "[DONE]" => Frame::Done,
            Ok(event) => match serde_json::from_str::<ChatCompletionChunk>(&event.data) {
                Ok(chunk) => chunk
                    .choices
                    .first()
                    .and_then(|choice| choice.delta.content.clone())
                    .map_or(Frame::Skip, Frame::Text),
                Err(e) => {
                    // Malformed payloads are skipped, not fatal.
                    debug!(error = %e, data = %event.data, "skipping malformed stream payload");
                    Frame::Skip
                }
            },
            Err(e) => Frame::Failed(ParsimonError::Provider {
                message: format!("SSE stream error: {e}"),
                source: None,
            }),
        }
    });

    let fragments = frames
        .take_while(|frame| future::ready(!matches!(frame, Frame::Done)))
        .filter_map(|frame| {
            future::ready(match frame {
                Frame::Text(text) => Some(Ok(text)),
                Frame::Failed(err) => Some(Err(err)),
                Frame::Skip | Frame::Done => None,
            })
        });

    Box::pin(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Serve raw SSE text through wiremock to get a real reqwest::Response.
    async fn mock_sse_response(sse_text: &str) -> reqwest::Response {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string(sse_text.to_string()),
            )
            .mount(&server)
            .await;

        reqwest::get(&server.uri()).await.unwrap()
    }

    async fn collect(sse_text: &str) -> Vec<Result<String, ParsimonError>> {
        let response = mock_sse_response(sse_text).await;
        parse_sse_stream(response).collect().await
    }

    #[tokio::test]
    async fn parses_delta_content_fragments() {
        let sse = concat!(
            "data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"}}]}\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"lo\"}}]}\n\n",
            "data: [DONE]\n\n",
        );
        let fragments = collect(sse).await;
        let text: String = fragments.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(text, "Hello");
    }

    #[tokio::test]
    async fn done_sentinel_terminates_stream() {
        let sse = concat!(
            "data: {\"choices\":[{\"delta\":{\"content\":\"before\"}}]}\n\n",
            "data: [DONE]\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"after\"}}]}\n\n",
        );
        let fragments = collect(sse).await;
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].as_deref().unwrap(), "before");
    }

    #[tokio::test]
    async fn malformed_json_lines_are_skipped() {
        let sse = concat!(
            "data: this is not json\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}\n\n",
            "data: [DONE]\n\n",
        );
        let fragments = collect(sse).await;
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].as_deref().unwrap(), "ok");
    }

    #[tokio::test]
    async fn chunks_without_content_are_skipped() {
        // Role-only delta and finish chunk carry no text.
        let sse = concat!(
            "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"text\"}}]}\n\n",
            "data: {\"choices\":[{\"delta\":{},\"finish_reason\":\"stop\"}]}\n\n",
            "data: [DONE]\n\n",
        );
        let fragments = collect(sse).await;
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].as_deref().unwrap(), "text");
    }

    #[tokio::test]
    async fn stream_without_done_ends_on_connection_close() {
        let sse = "data: {\"choices\":[{\"delta\":{\"content\":\"partial\"}}]}\n\n";
        let fragments = collect(sse).await;
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].as_deref().unwrap(), "partial");
    }
}
