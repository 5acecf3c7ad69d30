//! Local term vectors used by the bundled index adapters.
//!
//! The pipeline treats vectorization as part of the external index. The
//! adapters here use feature-hashed term frequencies so they need no model
//! files; a learned embedder can be swapped in through [`Vectorizer`].

use ndarray::Array1;

/// Dimension of hashed term vectors.
pub const DEFAULT_DIMENSION: usize = 384;

/// Trait for turning text into a fixed-length, L2-normalized vector.
pub trait Vectorizer: Send + Sync {
    fn vectorize(&self, text: &str) -> Array1<f32>;

    fn dimension(&self) -> usize;
}

/// Feature-hashing bag-of-words vectorizer.
#[derive(Debug, Clone)]
pub struct HashedTermVectorizer {
    dim: usize,
}

impl HashedTermVectorizer {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }
}

impl Default for HashedTermVectorizer {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl Vectorizer for HashedTermVectorizer {
    fn vectorize(&self, text: &str) -> Array1<f32> {
        let mut v = Array1::<f32>::zeros(self.dim);
        for term in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let slot = (fnv1a(&term.to_lowercase()) % self.dim as u64) as usize;
            v[slot] += 1.0;
        }
        normalize(v)
    }

    fn dimension(&self) -> usize {
        self.dim
    }
}

fn fnv1a(s: &str) -> u64 {
    s.bytes().fold(0xcbf2_9ce4_8422_2325u64, |hash, b| {
        (hash ^ b as u64).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

fn normalize(v: Array1<f32>) -> Array1<f32> {
    let norm = v.dot(&v).sqrt();
    if norm > 0.0 {
        v / norm
    } else {
        v
    }
}

/// Cosine distance between two normalized vectors, in `[0, 2]`.
/// A zero vector is treated as orthogonal to everything.
pub fn cosine_distance(a: &Array1<f32>, b: &Array1<f32>) -> f64 {
    if a.len() != b.len() {
        return 1.0;
    }
    1.0 - a.dot(b) as f64
}

/// Little-endian f32 encoding for BLOB storage.
pub fn to_bytes(v: &Array1<f32>) -> Vec<u8> {
    v.iter().flat_map(|x| x.to_le_bytes()).collect()
}

pub fn from_bytes(bytes: &[u8]) -> Array1<f32> {
    bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}
