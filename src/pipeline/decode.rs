//! Streaming decoders (Bytes -> typed JSON objects)
//!
//! The NDJSON decoder frames the body on `\n`, decodes each line on its own and
//! ends the sequence at the first terminal object, releasing the byte stream
//! without polling it again.

use super::Completion;
use crate::{BoxStream, Error, ErrorContext, Result};
use bytes::Bytes;
use futures::{stream, StreamExt};
use serde::de::DeserializeOwned;
use serde_json::Value;

const EXCERPT_LEN: usize = 200;

/// Largest unterminated line the decoder will buffer.
pub const DEFAULT_MAX_LINE_LEN: usize = 16 * 1024 * 1024;

/// Newline-delimited JSON decoder for streaming responses.
#[derive(Debug, Clone, Copy)]
pub struct NdjsonDecoder {
    status: u16,
    max_line_len: usize,
}

enum Phase {
    Reading(BoxStream<'static, Bytes>),
    /// Body ended before a terminal object.
    Exhausted,
    Finished,
}

struct DecodeState {
    phase: Phase,
    buf: Vec<u8>,
    received: usize,
}

impl NdjsonDecoder {
    /// `status` is the HTTP status the stream was delivered with; it is
    /// reported on in-band `{"error": ...}` lines.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            max_line_len: DEFAULT_MAX_LINE_LEN,
        }
    }

    /// Cap on bytes buffered while waiting for a `\n`. Exceeding it ends the
    /// stream with `MalformedResponse`.
    pub fn with_max_line_len(mut self, max_line_len: usize) -> Self {
        self.max_line_len = max_line_len;
        self
    }

    pub fn decode_stream<T>(&self, input: BoxStream<'static, Bytes>) -> BoxStream<'static, T>
    where
        T: DeserializeOwned + Completion + Send + 'static,
    {
        let status = self.status;
        let max_line_len = self.max_line_len;
        let state = DecodeState {
            phase: Phase::Reading(input),
            buf: Vec::new(),
            received: 0,
        };

        let stream = stream::unfold(state, move |mut st| async move {
            loop {
                match std::mem::replace(&mut st.phase, Phase::Finished) {
                    Phase::Finished => return None,
                    Phase::Exhausted => {
                        tracing::warn!(
                            received = st.received,
                            "stream ended without a terminal object"
                        );
                        return Some((
                            Err(Error::IncompleteStream {
                                received: st.received,
                            }),
                            st,
                        ));
                    }
                    Phase::Reading(mut input) => {
                        if let Some(idx) = st.buf.iter().position(|b| *b == b'\n') {
                            let line: Vec<u8> = st.buf.drain(..=idx).collect();
                            let line = trim_line(&line);
                            if line.is_empty() {
                                st.phase = Phase::Reading(input);
                                continue;
                            }
                            match decode_line::<T>(line, st.received, status) {
                                Ok(item) => {
                                    st.received += 1;
                                    if item.is_done() {
                                        // Terminal: `input` drops here, closing the body.
                                        st.buf.clear();
                                    } else {
                                        st.phase = Phase::Reading(input);
                                    }
                                    return Some((Ok(item), st));
                                }
                                Err(e) => return Some((Err(e), st)),
                            }
                        }

                        if st.buf.len() > max_line_len {
                            tracing::warn!(
                                buffered = st.buf.len(),
                                limit = max_line_len,
                                "stream line exceeds limit"
                            );
                            let err = oversized_line(&st.buf, st.received, max_line_len);
                            st.buf = Vec::new();
                            return Some((Err(err), st));
                        }

                        match input.next().await {
                            Some(Ok(chunk)) => {
                                st.buf.extend_from_slice(&chunk);
                                st.phase = Phase::Reading(input);
                            }
                            Some(Err(e)) => return Some((Err(e), st)),
                            None => {
                                drop(input);
                                let tail = std::mem::take(&mut st.buf);
                                let tail = trim_line(&tail);
                                st.phase = Phase::Exhausted;
                                if tail.is_empty() {
                                    continue;
                                }
                                // Unparseable tail: the connection closed mid-object.
                                let value = match serde_json::from_slice::<Value>(tail) {
                                    Ok(value) => value,
                                    Err(_) => continue,
                                };
                                match decode_value::<T>(value, tail, st.received, status) {
                                    Ok(item) => {
                                        st.received += 1;
                                        if item.is_done() {
                                            st.phase = Phase::Finished;
                                        }
                                        return Some((Ok(item), st));
                                    }
                                    Err(e) => {
                                        st.phase = Phase::Finished;
                                        return Some((Err(e), st));
                                    }
                                }
                            }
                        }
                    }
                }
            }
        });

        Box::pin(stream)
    }
}

/// Decode exactly one JSON object from a fully read body.
pub fn decode_buffered<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let body = trim_line(body);
    if body.is_empty() {
        return Err(Error::malformed_with_context(
            "response body is empty",
            ErrorContext::new().with_source("buffered_decoder"),
        ));
    }
    serde_json::from_slice(body).map_err(|e| {
        Error::malformed_with_context(
            format!("invalid response body: {}", e),
            ErrorContext::new()
                .with_details(excerpt(body))
                .with_source("buffered_decoder"),
        )
    })
}

fn decode_line<T: DeserializeOwned>(line: &[u8], index: usize, status: u16) -> Result<T> {
    let value: Value = serde_json::from_slice(line).map_err(|e| malformed_line(line, index, e))?;
    decode_value(value, line, index, status)
}

fn decode_value<T: DeserializeOwned>(
    value: Value,
    line: &[u8],
    index: usize,
    status: u16,
) -> Result<T> {
    if let Some(message) = value.get("error").and_then(Value::as_str) {
        return Err(Error::Remote {
            status,
            message: message.to_string(),
        });
    }
    tracing::trace!(line = index, "decoded stream object");
    serde_json::from_value(value).map_err(|e| malformed_line(line, index, e))
}

fn oversized_line(buf: &[u8], index: usize, limit: usize) -> Error {
    Error::malformed_with_context(
        format!("stream line exceeds {} bytes without a newline", limit),
        ErrorContext::new()
            .with_field_path(format!("line[{}]", index))
            .with_details(excerpt(buf))
            .with_source("ndjson_decoder"),
    )
}

fn malformed_line(line: &[u8], index: usize, e: serde_json::Error) -> Error {
    Error::malformed_with_context(
        format!("invalid stream object: {}", e),
        ErrorContext::new()
            .with_field_path(format!("line[{}]", index))
            .with_details(excerpt(line))
            .with_source("ndjson_decoder"),
    )
}

fn excerpt(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).chars().take(EXCERPT_LEN).collect()
}

fn trim_line(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}
