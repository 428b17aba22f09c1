//! Entropy sources and byte helpers used across the integration tests

use latsig_api::{EntropySource, Error, Result, RngEntropy};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Seeded ChaCha20 entropy, reproducible across runs
pub fn seeded(seed: u64) -> RngEntropy<ChaCha20Rng> {
    RngEntropy::new(ChaCha20Rng::seed_from_u64(seed))
}

/// A source that refuses every request
#[derive(Debug, Default)]
pub struct FailingEntropy {
    pub calls: usize,
}

impl EntropySource for FailingEntropy {
    fn fill_random(&mut self, _dest: &mut [u8]) -> Result<()> {
        self.calls += 1;
        Err(Error::EntropyError {
            context: "FailingEntropy",
            message: "source exhausted".into(),
        })
    }
}

/// Wraps another source and records how many bytes were drawn
#[derive(Debug)]
pub struct CountingEntropy<E> {
    inner: E,
    pub requests: Vec<usize>,
}

impl<E: EntropySource> CountingEntropy<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            requests: Vec::new(),
        }
    }

    pub fn total_bytes(&self) -> usize {
        self.requests.iter().sum()
    }
}

impl<E: EntropySource> EntropySource for CountingEntropy<E> {
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<()> {
        self.requests.push(dest.len());
        self.inner.fill_random(dest)
    }
}

/// Hands out a fixed byte string, repeating it as needed
#[derive(Debug, Clone)]
pub struct ReplayEntropy {
    bytes: Vec<u8>,
    pos: usize,
}

impl ReplayEntropy {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            pos: 0,
        }
    }
}

impl EntropySource for ReplayEntropy {
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<()> {
        if self.bytes.is_empty() {
            return Err(Error::EntropyError {
                context: "ReplayEntropy",
                message: "nothing to replay".into(),
            });
        }
        for b in dest.iter_mut() {
            *b = self.bytes[self.pos % self.bytes.len()];
            self.pos += 1;
        }
        Ok(())
    }
}

/// Returns a copy of `bytes` with bit `bit` inverted
pub fn flip_bit(bytes: &[u8], bit: usize) -> Vec<u8> {
    let mut out = bytes.to_vec();
    out[bit / 8] ^= 1 << (bit % 8);
    out
}
