//! Newline-delimited JSON accumulation for streamed generation responses
//!
//! Ollama streams one JSON object per line; each carries a `response` fragment.
//! The fragments, in arrival order, make up the full text.

/// Collects raw stream chunks and assembles the generated text at the end.
///
/// Bytes are decoded once, after the stream ends, so a multibyte character split
/// across two chunks still decodes correctly.
#[derive(Debug, Default)]
pub struct StreamBuffer {
    bytes: Vec<u8>,
}

impl StreamBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) {
        self.bytes.extend_from_slice(chunk);
    }

    /// Decode the buffer and concatenate every `response` fragment
    pub fn finish(self) -> String {
        collect_fragments(&String::from_utf8_lossy(&self.bytes))
    }
}

/// Concatenate the `response` field of every parseable line.
///
/// Blank lines are ignored. Lines that are not JSON are skipped with a warning;
/// records without a string `response` contribute nothing.
pub fn collect_fragments(buffer: &str) -> String {
    let mut output = String::new();

    for line in buffer.split('\n') {
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<serde_json::Value>(line) {
            Ok(record) => {
                if let Some(fragment) = record.get("response").and_then(|v| v.as_str()) {
                    output.push_str(fragment);
                }
            }
            Err(e) => {
                tracing::warn!(line, error = %e, "skipping unparseable stream line");
            }
        }
    }

    output
}
