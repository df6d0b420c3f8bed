//! # Fast string-stream concatenation accumulator
//!
//! Collects references to [`Str`] parts and, on [`FastStrStream::finish`],
//! allocates exactly one result buffer and `memcpy`s each part into it in
//! order. This avoids the quadratic reallocation a naive fold of `+` over
//! many short fragments would cause — the intended use is hot paths that
//! join many small pieces, such as disassembly rendering or error-message
//! construction (spec.md §4.E).
//!
//! Grounded on `examples/original_source/src/str.cpp`'s `FastStrStream`.

use crate::strval::Str;

/// Accumulates `&Str` parts for single-allocation concatenation.
#[derive(Default)]
pub struct FastStrStream<'a> {
    parts: Vec<&'a Str>,
}

impl<'a> FastStrStream<'a> {
    /// An empty stream.
    pub fn new() -> Self {
        FastStrStream { parts: Vec::new() }
    }

    /// Append a part. Returns `&mut Self` so calls can be chained.
    pub fn push(&mut self, s: &'a Str) -> &mut Self {
        self.parts.push(s);
        self
    }

    /// Finalize into a single `Str`: one allocation sized to the total
    /// length, with the ASCII flag propagated by conjunction over all parts.
    pub fn finish(&self) -> Str {
        let total: usize = self.parts.iter().map(|s| s.length()).sum();
        let is_ascii = self.parts.iter().all(|s| s.is_ascii());
        let mut out: Vec<u8> = Vec::with_capacity(total);
        for part in &self.parts {
            out.extend_from_slice(part.as_bytes());
        }
        debug_assert_eq!(out.len(), total);
        if is_ascii {
            Str::from_bytes_asserted_ascii(&out, true)
        } else {
            Str::from_bytes(&out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_parts_in_order_with_ascii_conjunction() {
        let a = Str::from("foo");
        let b = Str::from("bar");
        let c = Str::from("baz");
        let mut stream = FastStrStream::new();
        stream.push(&a).push(&b).push(&c);
        let joined = stream.finish();
        assert_eq!(joined.as_str(), "foobarbaz");
        assert!(joined.is_ascii());
    }

    #[test]
    fn empty_stream_yields_empty_string() {
        let stream = FastStrStream::new();
        assert_eq!(stream.finish().length(), 0);
    }
}
