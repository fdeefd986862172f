use heapless::Vec;

use crate::config::MAX_PARAMS;
use crate::error::SplitError;
use crate::input::tokenizer::Tokenizer;

/// Parameter substrings of the command currently being dispatched.
///
/// Entries borrow from the verified line, so a parameter reaches the
/// converter whole however long it is. Bounding happens only where text is
/// stored (`Text` slots). [`ParamScratch::fill`] clears all entries before
/// splitting, so nothing survives from one command to the next.
pub struct ParamScratch<'s> {
    params: Vec<&'s str, MAX_PARAMS>,
}

impl<'s> ParamScratch<'s> {
    /// Creates an empty scratch buffer.
    pub const fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Splits `remainder` into `expected` parameter substrings.
    ///
    /// - `expected > MAX_PARAMS` is rejected with `ParamCountInvalid`.
    /// - `expected == 0` succeeds without splitting anything.
    /// - Otherwise one tokenizer call per parameter; if the remainder runs out
    ///   early the trailing parameters stay empty (they later convert to zero).
    pub fn fill(&mut self, remainder: &'s str, delimiters: &str, expected: usize) -> Result<usize, SplitError> {
        if expected > MAX_PARAMS {
            return Err(SplitError::ParamCountInvalid { count: expected });
        }

        self.clear();

        let mut tok = Tokenizer::new(remainder);
        for _ in 0..expected {
            let param = tok.next_token(delimiters).unwrap_or("");
            // expected <= MAX_PARAMS, always fits
            let _ = self.params.push(param);
        }

        Ok(expected)
    }

    /// Parameter `index` of the last split, or `""` past the end.
    pub fn get(&self, index: usize) -> &'s str {
        self.params.get(index).copied().unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = &'s str> + '_ {
        self.params.iter().copied()
    }

    pub fn clear(&mut self) {
        self.params.clear();
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl Default for ParamScratch<'_> {
    fn default() -> Self {
        Self::new()
    }
}
