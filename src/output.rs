// Append-only output sink with a verbatim-flush watermark.
//
// Emitted fragments are collected and concatenated once at the end. The
// `writepos` watermark marks the first source position not yet flushed:
// everything in `[writepos, i)` is plain text awaiting a verbatim
// (text-escaped) flush, unless a construct handler claims the range by
// moving the watermark past it.

use std::borrow::Cow;

use crate::escape;

pub(crate) struct OutputBuffer<'a> {
    src: &'a str,
    fragments: Vec<Cow<'a, str>>,
    total_len: usize,
    writepos: usize,
}

impl<'a> OutputBuffer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            fragments: Vec::new(),
            total_len: 0,
            writepos: 0,
        }
    }

    pub fn writepos(&self) -> usize {
        self.writepos
    }

    pub fn set_writepos(&mut self, pos: usize) {
        self.writepos = pos;
    }

    /// Append a pre-built fragment as-is, with no escaping.
    pub fn emit(&mut self, fragment: impl Into<Cow<'a, str>>) {
        let fragment = fragment.into();
        if fragment.is_empty() {
            return;
        }
        self.total_len += fragment.len();
        self.fragments.push(fragment);
    }

    /// Flush `source[writepos..upto]` text-escaped, then move the watermark
    /// to `resume_at`.
    ///
    /// A degenerate range (empty, inverted, or off a character boundary)
    /// flushes nothing; the watermark still moves.
    pub fn flush_verbatim(&mut self, upto: usize, resume_at: usize) {
        let src = self.src;
        if upto > self.writepos {
            if let Some(pending) = src.get(self.writepos..upto) {
                self.emit(escape::escape_text(pending));
            }
        }
        self.writepos = resume_at;
    }

    /// Concatenation of every emitted fragment, in emission order.
    pub fn into_string(self) -> String {
        let mut result = String::with_capacity(self.total_len);
        for fragment in &self.fragments {
            result.push_str(fragment);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_escapes_pending_text() {
        let src = "a&b‘";
        let mut out = OutputBuffer::new(src);
        out.flush_verbatim(3, 6);
        assert_eq!(out.writepos(), 6);
        assert_eq!(out.into_string(), "a&amp;b");
    }

    #[test]
    fn emit_is_verbatim() {
        let mut out = OutputBuffer::new("");
        out.emit("<b>");
        out.emit("&");
        assert_eq!(out.into_string(), "<b>&");
    }

    #[test]
    fn interleaves_in_source_order() {
        let src = "x*y";
        let mut out = OutputBuffer::new(src);
        out.flush_verbatim(1, 2);
        out.emit("<b>");
        out.flush_verbatim(3, 3);
        assert_eq!(out.into_string(), "x<b>y");
    }

    #[test]
    fn inverted_range_flushes_nothing() {
        let mut out = OutputBuffer::new("abc");
        out.set_writepos(2);
        out.flush_verbatim(1, 3);
        assert_eq!(out.writepos(), 3);
        assert_eq!(out.into_string(), "");
    }
}
