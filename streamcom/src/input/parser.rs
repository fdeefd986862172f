//! Line verification and command/remainder splitting.

use crate::input::tokenizer::Tokenizer;

/// Normalizes one raw input line.
///
/// Trims surrounding whitespace, then strips one trailing `"\r\n"` pair if
/// still present. Returns `None` for a line that ends up empty. No other
/// validation happens here; later stages accept any content.
pub fn verify(raw: &str) -> Option<&str> {
    let line = raw.trim();
    let line = line.strip_suffix("\r\n").unwrap_or(line);
    if line.is_empty() { None } else { Some(line) }
}

/// Splits a verified line into `(token, remainder)`.
///
/// Two sequential calls on one [`Tokenizer`]: the first yields the token,
/// the continuation yields the remainder. With the delimiter absent the
/// whole line is the token and the remainder is empty. With several command
/// delimiters only the first one separates the token; the remainder then
/// stops at the next one (`"A=1=2"` gives `("A", "1")`).
pub fn split_command<'s>(line: &'s str, delimiters: &str) -> (&'s str, &'s str) {
    let mut tok = Tokenizer::new(line);
    let token = tok.next_token(delimiters).unwrap_or("");
    let remainder = tok.next_token(delimiters).unwrap_or("");
    (token, remainder)
}
