//! Incremental consumption of the generation endpoint's newline-delimited JSON stream.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// One decoded line of the stream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateChunk {
    #[serde(default)]
    pub model: Option<String>,
    /// Text delta for this fragment.
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub done: bool,
    /// Everything else the server sent (timings, token counts, context).
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

/// The final status object: the last valid fragment with its `response`
/// replaced by the full accumulated text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub model: Option<String>,
    pub response: String,
    pub done: bool,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

/// Accumulates text deltas from raw body chunks.
///
/// Lines may be split across chunk boundaries, so unterminated bytes are
/// buffered until the next newline (or until [`StreamAccumulator::finish`]).
#[derive(Debug, Default)]
pub struct StreamAccumulator {
    pending: Vec<u8>,
    text: String,
    last: Option<GenerateChunk>,
    fragments: usize,
    skipped: usize,
    finished: bool,
}

impl StreamAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one body chunk. Returns `true` once a fragment with `done: true`
    /// has been seen; anything after it is ignored.
    pub fn feed(&mut self, bytes: &[u8]) -> bool {
        if self.finished {
            return true;
        }

        self.pending.extend_from_slice(bytes);
        while let Some(newline) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=newline).collect();
            self.consume_line(&line);
            if self.finished {
                self.pending.clear();
                break;
            }
        }

        self.finished
    }

    pub fn fragments(&self) -> usize {
        self.fragments
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Ends the stream, parsing any trailing unterminated line.
    pub fn finish(mut self) -> GenerateResponse {
        if !self.finished && !self.pending.is_empty() {
            let line = std::mem::take(&mut self.pending);
            self.consume_line(&line);
        }

        let last = self.last.unwrap_or_default();
        GenerateResponse {
            model: last.model,
            response: self.text,
            done: last.done,
            metadata: last.metadata,
        }
    }

    fn consume_line(&mut self, line: &[u8]) {
        let line = trim_ascii(line);
        if line.is_empty() {
            return;
        }

        match serde_json::from_slice::<GenerateChunk>(line) {
            Ok(chunk) => {
                self.fragments += 1;
                if let Some(delta) = &chunk.response {
                    self.text.push_str(delta);
                }
                self.finished = chunk.done;
                self.last = Some(chunk);
            }
            Err(e) => {
                self.skipped += 1;
                warn!(
                    "Could not decode JSON chunk ({e}): {}",
                    String::from_utf8_lossy(line)
                );
            }
        }
    }
}

fn trim_ascii(bytes: &[u8]) -> &[u8] {
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
