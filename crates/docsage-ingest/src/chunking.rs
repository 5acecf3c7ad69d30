//! Overlapping, sentence-aware text chunking.
//!
//! Offsets are counted in characters, not bytes, so multi-byte text never
//! splits inside a code point.

use docsage_core::{Error, Result};

/// Default window size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;
/// Default overlap between consecutive windows.
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;
/// Chunks whose trimmed length is at or below this are dropped.
pub const MIN_CHUNK_CHARS: usize = 50;

/// One raw window of the scan, before the length filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkWindow {
    /// Character offset of the untrimmed window start.
    pub start: usize,
    /// Character offset just past the untrimmed window end.
    pub end: usize,
    /// Window text with surrounding whitespace trimmed.
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    size: usize,
    overlap: usize,
}

impl Chunker {
    /// Fails with `InvalidChunkConfig` when `size` is zero or `overlap >= size`.
    pub fn new(size: usize, overlap: usize) -> Result<Self> {
        if size == 0 || overlap >= size {
            return Err(Error::InvalidChunkConfig { size, overlap });
        }
        Ok(Self { size, overlap })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Scan `text` into windows.
    ///
    /// A window that would run past the end of the text is not searched for a
    /// sentence boundary, and the scan stops once a window reaches the end.
    pub fn windows(&self, text: &str) -> Result<Vec<ChunkWindow>> {
        let chars: Vec<char> = text.chars().collect();
        let len = chars.len();
        let mut windows = Vec::new();
        let mut start = 0;

        while start < len {
            let mut end = (start + self.size).min(len);
            if start + self.size < len {
                let last_period = chars[start..end].iter().rposition(|&c| c == '.');
                if let Some(p) = last_period {
                    if p as f64 > self.size as f64 * 0.5 {
                        end = start + p + 1;
                    }
                }
            }

            let raw: String = chars[start..end].iter().collect();
            windows.push(ChunkWindow {
                start,
                end,
                text: raw.trim().to_string(),
            });

            if end >= len {
                break;
            }
            let next = end.saturating_sub(self.overlap);
            if next <= start {
                return Err(Error::InvalidChunkConfig {
                    size: self.size,
                    overlap: self.overlap,
                });
            }
            start = next;
        }

        Ok(windows)
    }

    /// Chunk `text`, dropping windows of `MIN_CHUNK_CHARS` characters or fewer.
    pub fn chunk(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .windows(text)?
            .into_iter()
            .map(|w| w.text)
            .filter(|t| t.chars().count() > MIN_CHUNK_CHARS)
            .collect())
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}
