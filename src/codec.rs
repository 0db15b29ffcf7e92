//! Index-to-candidate mapping
//!
//! A candidate of length `n` over a charset of `k` symbols is the mixed-radix
//! rendering of its index in base `k`, most significant digit first. For
//! `0 <= index < k^n` the mapping is a bijection onto the search space of that
//! length; callers are responsible for keeping indices inside that bound.

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};

use crate::config::Charset;

/// Render the candidate at `index`, most significant digit first
pub fn encode(index: u64, charset: &Charset, length: usize) -> Vec<u8> {
    let cs_len = charset.len() as u64;
    let mut buf = vec![0u8; length];
    let mut idx = index;
    for slot in buf.iter_mut().rev() {
        *slot = charset.symbol((idx % cs_len) as usize);
        idx /= cs_len;
    }
    buf
}

/// Total number of candidates of the given length: `cs_len^length`
///
/// Arbitrary precision: with 26 symbols the total stops fitting 63 bits
/// past length 13, and the printable preset overflows far earlier.
pub fn cardinality(length: usize, cs_len: usize) -> BigUint {
    let base = BigUint::from(cs_len);
    let mut total = BigUint::one();
    for _ in 0..length {
        total *= &base;
    }
    total
}

/// Odometer over consecutive candidates of one length
///
/// Seeking decomposes an arbitrary-precision index into digits once; from
/// there each step is a fixed-width carry walk, so the per-candidate loop
/// never touches big-integer arithmetic. Equivalent to calling [`encode`]
/// for every index in turn.
#[derive(Debug)]
pub struct CandidateCursor<'a> {
    charset: &'a Charset,
    digits: Vec<usize>,
    buf: Vec<u8>,
}

impl<'a> CandidateCursor<'a> {
    /// Cursor positioned at index 0 of the given length
    pub fn new(charset: &'a Charset, length: usize) -> Self {
        let digits = vec![0; length];
        let buf = vec![charset.symbol(0); length];
        Self {
            charset,
            digits,
            buf,
        }
    }

    /// Reposition the cursor at `index`. Callers keep `index < cardinality`.
    pub fn seek(&mut self, index: &BigUint) {
        let base = BigUint::from(self.charset.len());
        let mut rem = index.clone();
        for pos in (0..self.digits.len()).rev() {
            let digit = (&rem % &base).to_usize().unwrap_or(0);
            self.digits[pos] = digit;
            self.buf[pos] = self.charset.symbol(digit);
            rem /= &base;
        }
    }

    /// The candidate at the current index
    pub fn current(&self) -> &[u8] {
        &self.buf
    }

    /// Step to the next index. Past the end of the space the cursor wraps to
    /// all zeros; callers bound iteration by their task's span.
    pub fn advance(&mut self) {
        for pos in (0..self.digits.len()).rev() {
            self.digits[pos] += 1;
            if self.digits[pos] < self.charset.len() {
                self.buf[pos] = self.charset.symbol(self.digits[pos]);
                return;
            }
            self.digits[pos] = 0;
            self.buf[pos] = self.charset.symbol(0);
        }
    }
}
