/// Stateful single-string tokenizer.
///
/// The first `next_token` call consumes from the start of the source, every
/// following call continues where the previous one stopped. Semantics follow
/// the classic C `strtok`:
/// - `delimiters` is a *set* of characters, any of them ends a token;
/// - leading delimiters are skipped, so runs of delimiters never produce
///   empty tokens;
/// - the delimiter that ended a token is consumed;
/// - once the source is exhausted every call yields `None`.
///
/// The cursor owns no buffer; tokens borrow from the source.
#[derive(Debug, Clone)]
pub struct Tokenizer<'s> {
    rest: Option<&'s str>,
}

impl<'s> Tokenizer<'s> {
    pub fn new(source: &'s str) -> Self {
        Self { rest: Some(source) }
    }

    /// Returns the next token delimited by any character of `delimiters`.
    pub fn next_token(&mut self, delimiters: &str) -> Option<&'s str> {
        let is_delim = |c: char| delimiters.contains(c);

        let start = self.rest?.trim_start_matches(is_delim);
        if start.is_empty() {
            self.rest = None;
            return None;
        }

        match start.char_indices().find(|&(_, c)| is_delim(c)) {
            Some((end, delim)) => {
                self.rest = Some(&start[end + delim.len_utf8()..]);
                Some(&start[..end])
            }
            None => {
                self.rest = None;
                Some(start)
            }
        }
    }

    /// Unconsumed input, without skipping delimiters.
    pub fn remaining(&self) -> &'s str {
        self.rest.unwrap_or("")
    }
}
