// Position-tracked view over the source text.
//
// The converter indexes by byte offset but classifies by Unicode scalar, so
// every accessor here is scalar-safe: a probe that lands past the ends or in
// the middle of a multi-byte sequence yields the null scalar, which matches
// none of the markup characters.

/// Byte-indexed cursor over a document.
///
/// `pos()` is always on a character boundary while the main loop runs; the
/// peek/prev accessors are total functions and never panic.
pub(crate) struct CharCursor<'a> {
    src: &'a str,
    i: usize,
}

impl<'a> CharCursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, i: 0 }
    }

    /// The full source slice this cursor walks.
    pub fn src(&self) -> &'a str {
        self.src
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn set_pos(&mut self, pos: usize) {
        self.i = pos;
    }

    pub fn at_end(&self) -> bool {
        self.i >= self.src.len()
    }

    /// The scalar at the current position, or `'\0'` at the end.
    pub fn current(&self) -> char {
        self.peek(0)
    }

    /// The scalar starting `offset` bytes ahead of the current position.
    ///
    /// Returns `'\0'` past the end or when the probe lands inside a
    /// multi-byte sequence.
    pub fn peek(&self, offset: usize) -> char {
        self.src
            .get(self.i + offset..)
            .and_then(|s| s.chars().next())
            .unwrap_or('\0')
    }

    /// The `offset`-th scalar before the current position (1 = the scalar
    /// immediately preceding), or `'\0'` when the document starts sooner.
    pub fn prev(&self, offset: usize) -> char {
        debug_assert!(offset >= 1);
        self.src[..self.i]
            .chars()
            .rev()
            .nth(offset - 1)
            .unwrap_or('\0')
    }

    /// Bounded comparison of `literal` against the source `offset` bytes
    /// ahead of the current position.
    pub fn starts_with_at(&self, offset: usize, literal: &str) -> bool {
        self.src
            .get(self.i + offset..)
            .is_some_and(|s| s.starts_with(literal))
    }

    /// Move past the current scalar (one byte for ASCII, more for
    /// multi-byte sequences).
    pub fn advance(&mut self) {
        self.i += self.current().len_utf8();
    }
}
