// The streaming single-pass converter.
//
// Walks the source exactly once, classifying each scalar by its context:
// what precedes it, what the ending-tags stack expects, and what follows.
// Construct handlers emit HTML fragments and move the verbatim watermark;
// inner text (link titles, blockquote bodies, aligned divs) is converted by
// recursing with the substring's base offset pushed on the outer-position
// stack, so error positions always resolve to the top-level document.

mod link;

use crate::cursor::CharCursor;
use crate::error::{ConvertError, ErrorKind, Fault};
use crate::escape;
use crate::output::OutputBuffer;
use crate::scan::{self, LSQ, QUOTE_LEN, RSQ};

/// Stack sentinel: the matching `’` closes a plain grouping and is emitted
/// as itself rather than as an HTML closer.
const PLAIN_QUOTE: &str = "\u{2019}";

const CYRILLIC_O: char = '\u{041E}';
const CYRILLIC_EN: char = '\u{041D}';

/// Replacement for the next `\n` in the input.
#[derive(Clone, Copy, PartialEq, Eq)]
enum NewLineTag {
    /// Default: `\n` emits `<br />` and a newline.
    Br,
    /// `\n` is consumed silently (set right after block-level output).
    Silent,
    /// `\n` emits this closer and a newline, then the slot resets.
    Closer(&'static str),
}

pub(crate) struct Converter<'a> {
    decorate: bool,
    top: &'a str,
    outer_pos: Vec<usize>,
}

impl<'a> Converter<'a> {
    pub fn new(top: &'a str, decorate: bool) -> Self {
        Self {
            decorate,
            top,
            outer_pos: Vec::new(),
        }
    }

    /// Convert one source slice. `outer_pos` is the slice's byte offset in
    /// the caller's source (0 for the top-level document).
    pub fn to_html(&mut self, source: &'a str, outer_pos: usize) -> Result<String, ConvertError> {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            len = source.len(),
            depth = self.outer_pos.len(),
            outer_pos,
            "conversion pass"
        );
        self.outer_pos.push(outer_pos);
        let html = Pass::new(self, source).run()?;
        self.outer_pos.pop();
        Ok(html)
    }

    /// Build an error whose position is translated from the current slice
    /// into the top-level document.
    fn fail(&self, kind: ErrorKind, pos: usize) -> ConvertError {
        let pos = pos + self.outer_pos.iter().sum::<usize>();
        let mut line = 1;
        let mut line_start = -1_isize;
        for (t, b) in self.top.bytes().enumerate().take(pos) {
            if b == b'\n' {
                line += 1;
                line_start = t as isize;
            }
        }
        ConvertError {
            kind,
            line,
            column: (pos as isize - line_start) as usize,
            pos,
        }
    }
}

/// Per-call state: one `Pass` per (possibly recursive) `to_html` call.
/// The cursor, buffer, ending-tags stack, and new-line slot are all local
/// to the call; only the outer-position stack lives in the `Converter`.
struct Pass<'c, 'a> {
    conv: &'c mut Converter<'a>,
    cur: CharCursor<'a>,
    out: OutputBuffer<'a>,
    ending_tags: Vec<&'static str>,
    new_line_tag: NewLineTag,
}

impl<'c, 'a> Pass<'c, 'a> {
    fn new(conv: &'c mut Converter<'a>, source: &'a str) -> Self {
        Self {
            conv,
            cur: CharCursor::new(source),
            out: OutputBuffer::new(source),
            ending_tags: Vec::new(),
            new_line_tag: NewLineTag::Br,
        }
    }

    fn fail(&self, kind: ErrorKind, pos: usize) -> ConvertError {
        self.conv.fail(kind, pos)
    }

    fn lift(&self, fault: Fault) -> ConvertError {
        self.conv.fail(fault.kind, fault.pos)
    }

    /// Flush up to the current (single-byte) scalar, skip it, and emit a
    /// replacement fragment in its place.
    fn emit_over_current(&mut self, fragment: &'static str) {
        let i = self.cur.pos();
        self.out.flush_verbatim(i, i + 1);
        self.out.emit(fragment);
    }

    fn run(mut self) -> Result<String, ConvertError> {
        while !self.cur.at_end() {
            let ch = self.cur.current();

            if self.at_block_start() {
                if ch == '.' && self.cur.peek(1) == ' ' {
                    self.emit_over_current("\u{2022}");
                    // '.' matches nothing below; the space is flushed as text.
                } else if (ch == '>' || ch == '<')
                    && (matches!(self.cur.peek(1), ' ' | '[')
                        || self.cur.starts_with_at(1, "\u{2018}"))
                {
                    self.open_quotation_block(ch)?;
                    let p = self.cur.pos();
                    self.cur.set_pos(p + 1);
                    self.cur.advance();
                    continue;
                }
            }

            if ch == LSQ {
                self.left_quote()?;
            } else if ch == RSQ {
                self.right_quote()?;
            } else if ch == '`' {
                self.code_span()?;
            } else if ch == '[' {
                self.open_bracket()?;
            } else if ch == ']' {
                self.emit_over_current(if self.conv.decorate {
                    "<span class=\"sq_brackets\">]</span></span>"
                } else {
                    "]"
                });
            } else if ch == '{' {
                self.emit_over_current(if self.conv.decorate {
                    "<span class=\"cu_brackets\" onclick=\"return spoiler(this, event)\"><span class=\"cu_brackets_b\">{</span><span>\u{2026}</span><span class=\"cu\" style=\"display: none\">"
                } else {
                    "{"
                });
            } else if ch == '}' {
                self.emit_over_current(if self.conv.decorate {
                    "</span><span class=\"cu_brackets_b\">}</span></span>"
                } else {
                    "}"
                });
            } else if ch == '\n' {
                self.newline();
            }

            self.cur.advance();
        }

        let len = self.cur.src().len();
        self.out.flush_verbatim(len, 0);
        if !self.ending_tags.is_empty() {
            return Err(self.fail(ErrorKind::UnclosedLeftQuote, len));
        }
        Ok(self.out.into_string())
    }

    /// Whether block-level constructs (`. `, `>`, `<`) may open here: at the
    /// document start, after a newline, or at the content start of a
    /// just-opened blockquote/div (`>‘`, `<‘`, `!‘` immediately behind).
    fn at_block_start(&self) -> bool {
        let i = self.cur.pos();
        if i == 0 || self.cur.prev(1) == '\n' {
            return true;
        }
        i == self.out.writepos()
            && matches!(
                self.ending_tags.last().copied(),
                Some("</blockquote>") | Some("</div>")
            )
            && [">\u{2018}", "<\u{2018}", "!\u{2018}"]
                .iter()
                .any(|t| self.cur.src().get(i.wrapping_sub(4)..i) == Some(*t))
    }

    /// Line-start `>`/`<` quotation block. Forms: `> single line`,
    /// `>‘body’`, `>‘title’[url]:‘body’`, `>‘Author’:‘body’`,
    /// `>[url]:‘body’`, `>[-N]:‘body’`.
    fn open_quotation_block(&mut self, ch: char) -> Result<(), ConvertError> {
        let src = self.cur.src();
        let i = self.cur.pos();
        self.out.flush_verbatim(i, i + 2);
        self.out.emit(if ch == '<' {
            "<blockquote class=\"re\">"
        } else {
            "<blockquote>"
        });

        if self.cur.peek(1) == ' ' {
            // Single-line body: the closer rides the next newline.
            self.new_line_tag = NewLineTag::Closer("</blockquote>");
            return Ok(());
        }

        if self.cur.peek(1) == '[' {
            if self.cur.peek(2) == '-' && self.cur.peek(3).is_ascii_digit() {
                // Numeric back-reference: skip it.
                let close = src[i + 4..]
                    .find(']')
                    .ok_or_else(|| self.fail(ErrorKind::UnterminatedComment, i + 1))?;
                self.cur.set_pos(i + 4 + close + 1);
            } else {
                // `>[url]:‘body’` — the URL itself is the citation line.
                self.cur.set_pos(i + 1);
                let endb =
                    scan::find_matching_rbracket(src, i + 1, 0).map_err(|f| self.lift(f))?;
                let mut cite = &src[i + 2..endb];
                if let Some(space) = cite.find(' ') {
                    cite = &cite[..space];
                }
                let display = link::truncate_display(cite);
                self.write_http_link(i + 1, i + 1, 0, Some(format!("<i>{display}</i>")))?;
                self.cur.set_pos(self.cur.pos() + 1);
                if !self.cur.starts_with_at(0, ":\u{2018}") {
                    return Err(
                        self.fail(ErrorKind::QuotationWithUrlMalformed, self.cur.pos())
                    );
                }
                self.out.emit(":<br />\n");
            }
        } else {
            let qstart = i + 1;
            let endqpos = scan::find_matching_rquote(src, qstart).map_err(|f| self.lift(f))?;
            match src.as_bytes().get(endqpos + QUOTE_LEN) {
                Some(b'[') => {
                    // `>‘title’[url]:‘body’` — linked citation line.
                    self.cur.set_pos(endqpos);
                    self.out.emit("<i>");
                    self.out.set_writepos(qstart);
                    self.write_http_link(qstart, endqpos, QUOTE_LEN, None)?;
                    self.out.emit("</i>");
                    self.cur.set_pos(self.cur.pos() + 1);
                    if !self.cur.starts_with_at(0, ":\u{2018}") {
                        return Err(
                            self.fail(ErrorKind::QuotationWithUrlMalformed, self.cur.pos())
                        );
                    }
                    self.out.emit(":<br />\n");
                }
                Some(b':') => {
                    // `>‘Author’:‘body’` — the name is emitted as-is.
                    self.out
                        .emit(format!("<i>{}</i>:<br />\n", &src[i + 4..endqpos]));
                    self.cur.set_pos(endqpos + QUOTE_LEN);
                    if !self.cur.starts_with_at(0, ":\u{2018}") {
                        return Err(
                            self.fail(ErrorKind::QuotationWithAuthorMalformed, self.cur.pos())
                        );
                    }
                }
                _ => {
                    // `>‘body’` — scanned inline, closed by its own `’`.
                }
            }
        }

        self.out.set_writepos(self.cur.pos() + 4);
        self.ending_tags.push("</blockquote>");
        Ok(())
    }

    /// `‘` dispatch: the construct is chosen by what immediately precedes
    /// the quote and what follows its matching `’`.
    fn left_quote(&mut self) -> Result<(), ConvertError> {
        let src = self.cur.src();
        let startqpos = self.cur.pos();

        let (mut prevc, mut prevci) = match src[..startqpos].chars().next_back() {
            Some(c) => (c, startqpos - c.len_utf8()),
            None => ('\0', 0),
        };

        let endqpos = scan::find_matching_rquote(src, startqpos).map_err(|f| self.lift(f))?;
        self.cur.set_pos(endqpos);

        // `(…)‘`: capture the parenthesized run, classify by the scalar
        // before the `(`.
        let mut str_in_p = "";
        if prevc == ')' {
            if let Some(openp) = src[..prevci].rfind('(') {
                if openp > 0 {
                    str_in_p = &src[openp + 1..startqpos - 1];
                    if let Some(c) = src[..openp].chars().next_back() {
                        prevc = c;
                        prevci = openp - c.len_utf8();
                    }
                }
            }
        }

        if self.cur.starts_with_at(QUOTE_LEN, "[http")
            || self.cur.starts_with_at(QUOTE_LEN, "[./")
        {
            return self.write_http_link(startqpos, endqpos, QUOTE_LEN, None);
        }

        if self.cur.starts_with_at(QUOTE_LEN, "[\u{2018}") {
            return self.write_abbr(startqpos, endqpos, QUOTE_LEN);
        }

        if prevc == '0' || prevc == 'O' || prevc == CYRILLIC_O {
            // Literal span: escape only, newlines become breaks, no recursion.
            self.out.flush_verbatim(prevci, endqpos + QUOTE_LEN);
            let inner = escape::escape_text(&src[startqpos + QUOTE_LEN..endqpos])
                .replace('\n', "<br />\n");
            self.out.emit(inner);
            return Ok(());
        }

        if (prevc == '<' || prevc == '>')
            && prevci >= 1
            && matches!(src.as_bytes()[prevci - 1], b'<' | b'>')
        {
            self.out.flush_verbatim(prevci - 1, endqpos + QUOTE_LEN);
            let align = match &src[prevci - 1..=prevci] {
                "<<" => "left",
                ">>" => "right",
                "><" => "center",
                _ => "justify",
            };
            let body = self
                .conv
                .to_html(&src[startqpos + QUOTE_LEN..endqpos], startqpos + QUOTE_LEN)?;
            self.out.emit(format!("<div align=\"{align}\">{body}</div>\n"));
            self.new_line_tag = NewLineTag::Silent;
            return Ok(());
        }

        if self.cur.starts_with_at(QUOTE_LEN, ":\u{2018}") {
            // `‘body’:‘author’<` — the probe scan participates in the
            // condition, and its failure is fatal.
            let endrq = scan::find_matching_rquote(src, endqpos + QUOTE_LEN + 1)
                .map_err(|f| self.lift(f))?;
            if src.as_bytes().get(endrq + QUOTE_LEN) == Some(&b'<') {
                let close = endrq + QUOTE_LEN;
                self.cur.set_pos(close);
                // Flush everything before the opening quote; at the start of
                // the slice there is nothing preceding it.
                let upto = if prevc == '\0' { 0 } else { prevci + 1 };
                self.out.flush_verbatim(upto, close + 1);
                let body = self
                    .conv
                    .to_html(&src[startqpos + QUOTE_LEN..endqpos], startqpos + QUOTE_LEN)?;
                let author = &src[endqpos + 2 * QUOTE_LEN + 1..endrq];
                self.out.emit(format!(
                    "<blockquote>{body}<br />\n<div align='right'><i>{author}</i></div></blockquote>"
                ));
                self.new_line_tag = NewLineTag::Silent;
                return Ok(());
            }
        }

        // No construct consumed the quote pair: a style marker, heading,
        // super/subscript, note, or a plain grouping.
        self.cur.set_pos(startqpos);
        let i = startqpos;
        match prevc {
            '*' | '_' | '-' | '~' => {
                self.out.flush_verbatim(i - 1, i + QUOTE_LEN);
                let (open, close) = match prevc {
                    '*' => ("<b>", "</b>"),
                    '_' => ("<u>", "</u>"),
                    '-' => ("<s>", "</s>"),
                    _ => ("<i>", "</i>"),
                };
                self.out.emit(open);
                self.ending_tags.push(close);
            }
            'H' | CYRILLIC_EN => {
                self.out.flush_verbatim(prevci, i + QUOTE_LEN);
                const OPEN: [&str; 6] = ["<h1>", "<h2>", "<h3>", "<h4>", "<h5>", "<h6>"];
                const CLOSE: [&str; 6] = ["</h1>", "</h2>", "</h3>", "</h4>", "</h5>", "</h6>"];
                let level = heading_level(str_in_p);
                self.out.emit(OPEN[level - 1]);
                self.ending_tags.push(CLOSE[level - 1]);
            }
            _ if prevci >= 1
                && matches!(src.get(prevci - 1..prevci + 1), Some("/\\") | Some("\\/")) =>
            {
                self.out.flush_verbatim(prevci - 1, i + QUOTE_LEN);
                if &src[prevci - 1..prevci + 1] == "/\\" {
                    self.out.emit("<sup>");
                    self.ending_tags.push("</sup>");
                } else {
                    self.out.emit("<sub>");
                    self.ending_tags.push("</sub>");
                }
            }
            '!' => {
                self.out.flush_verbatim(prevci, i + QUOTE_LEN);
                self.out.emit("<div class=\"note\">");
                self.ending_tags.push("</div>");
            }
            _ => self.ending_tags.push(PLAIN_QUOTE),
        }
        Ok(())
    }

    /// `’`: pop and emit the pending closer. A block closer followed by a
    /// newline absorbs it.
    fn right_quote(&mut self) -> Result<(), ConvertError> {
        let i = self.cur.pos();
        self.out.flush_verbatim(i, i + QUOTE_LEN);
        let Some(last) = self.ending_tags.pop() else {
            return Err(self.fail(ErrorKind::UnpairedRightQuote, i));
        };
        let block_closer =
            last.starts_with("</h") || last == "</blockquote>" || last == "</div>";
        if block_closer && self.cur.peek(QUOTE_LEN) == '\n' {
            self.out.emit(last);
            self.out.emit("\n");
            self.cur.set_pos(i + QUOTE_LEN);
            let wp = self.out.writepos();
            self.out.set_writepos(wp + 1);
        } else {
            self.out.emit(last);
        }
        Ok(())
    }

    /// A run of `n` backticks opens a code span closed by the next run of
    /// `n` backticks. Quotes inside still count toward stack balance.
    fn code_span(&mut self) -> Result<(), ConvertError> {
        let src = self.cur.src();
        let start = self.cur.pos();
        let mut open_end = start + 1;
        while open_end < src.len() && src.as_bytes()[open_end] == b'`' {
            open_end += 1;
        }
        let run = open_end - start;
        let delim = "`".repeat(run);
        let close = src[open_end..]
            .find(delim.as_str())
            .map(|p| open_end + p)
            .ok_or_else(|| self.fail(ErrorKind::UnterminatedCode, start))?;
        self.out.flush_verbatim(start, close + run);

        let body = &src[open_end..close];
        let mut delta = 0_i64;
        for ch in body.chars() {
            if ch == LSQ {
                delta += 1;
            } else if ch == RSQ {
                delta -= 1;
            }
        }
        if delta > 0 {
            for _ in 0..delta {
                self.ending_tags.push(PLAIN_QUOTE);
            }
        } else {
            for _ in 0..-delta {
                if self.ending_tags.last().copied() != Some(PLAIN_QUOTE) {
                    return Err(self.fail(ErrorKind::UnpairedQuoteInsideCode, start));
                }
                self.ending_tags.pop();
            }
        }

        let escaped = escape::escape_text(body);
        if escaped.contains('\n') {
            self.out.emit(format!("<pre>{escaped}</pre>\n"));
            self.new_line_tag = NewLineTag::Silent;
        } else {
            self.out.emit(format!("<pre class=\"inline_code\">{escaped}</pre>"));
        }
        self.cur.set_pos(close + run - 1);
        Ok(())
    }

    /// Bare `[`: a suffix-attached link/abbreviation, a `[[[…]]]` comment,
    /// or a literal bracket.
    fn open_bracket(&mut self) -> Result<(), ConvertError> {
        let src = self.cur.src();
        let i = self.cur.pos();

        let abbr = self.cur.starts_with_at(1, "\u{2018}")
            && !matches!(self.cur.prev(1), '\r' | '\n' | '\t' | ' ' | '\0');
        if self.cur.starts_with_at(1, "http") || self.cur.starts_with_at(1, "./") || abbr {
            // Suffix-attached: the text is the word running back to the
            // nearest whitespace or opener, opener excluded.
            let bytes = src.as_bytes();
            let wp = self.out.writepos();
            let mut startpos = i;
            while startpos > wp
                && !matches!(
                    bytes[startpos - 1],
                    b'\r' | b'\n' | b'\t' | b' ' | b'[' | b'{' | b'('
                )
            {
                startpos -= 1;
            }
            if abbr {
                self.write_abbr(startpos, i, 0)?;
            } else {
                self.write_http_link(startpos, i, 0, None)?;
            }
            return Ok(());
        }

        if self.cur.starts_with_at(1, "[[") {
            // `[[[…]]]` comment: skip it whole, but quotes inside still
            // participate in stack balance.
            let comment_start = i;
            let mut nesting = 0_usize;
            let mut pos = i;
            loop {
                let Some(ch) = src.get(pos..).and_then(|s| s.chars().next()) else {
                    return Err(self.fail(ErrorKind::UnterminatedComment, comment_start));
                };
                match ch {
                    '[' => nesting += 1,
                    ']' => {
                        nesting -= 1;
                        if nesting == 0 {
                            break;
                        }
                    }
                    LSQ => self.ending_tags.push(PLAIN_QUOTE),
                    RSQ => {
                        if self.ending_tags.last().copied() == Some(PLAIN_QUOTE) {
                            self.ending_tags.pop();
                        }
                    }
                    _ => {}
                }
                pos += ch.len_utf8();
            }
            self.out.flush_verbatim(comment_start, pos + 1);
            self.cur.set_pos(pos);
            return Ok(());
        }

        self.emit_over_current(if self.conv.decorate {
            "<span class=\"sq\"><span class=\"sq_brackets\">[</span>"
        } else {
            "["
        });
        Ok(())
    }

    fn newline(&mut self) {
        let i = self.cur.pos();
        self.out.flush_verbatim(i, i + 1);
        match self.new_line_tag {
            NewLineTag::Br => self.out.emit("<br />\n"),
            NewLineTag::Silent => {}
            NewLineTag::Closer(tag) => {
                self.out.emit(tag);
                self.out.emit("\n");
            }
        }
        self.new_line_tag = NewLineTag::Br;
    }
}

/// Heading level for `H‘…’` with an optional `(n)` adjustment: `3 - n`,
/// clamped to `1..=6`.
fn heading_level(str_in_p: &str) -> usize {
    let b = str_in_p.as_bytes();
    let digit = |at: usize| i32::from(b.get(at).copied().unwrap_or(0)) - i32::from(b'0');
    let h = if b.is_empty() {
        0
    } else if b[0] == b'-' {
        -digit(1)
    } else if b[0] == b'+' {
        digit(1)
    } else {
        digit(0)
    };
    (3 - h).clamp(1, 6) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_level_default_is_h3() {
        assert_eq!(heading_level(""), 3);
    }

    #[test]
    fn heading_level_signed_adjustments() {
        assert_eq!(heading_level("-1"), 4);
        assert_eq!(heading_level("-2"), 5);
        assert_eq!(heading_level("-3"), 6);
        assert_eq!(heading_level("+1"), 2);
        assert_eq!(heading_level("+2"), 1);
        assert_eq!(heading_level("1"), 2);
        assert_eq!(heading_level("2"), 1);
    }

    #[test]
    fn heading_level_clamps() {
        assert_eq!(heading_level("+9"), 1);
        assert_eq!(heading_level("-9"), 6);
    }

    #[test]
    fn quote_constants_are_three_bytes() {
        assert_eq!(LSQ.len_utf8(), QUOTE_LEN);
        assert_eq!(RSQ.len_utf8(), QUOTE_LEN);
        assert_eq!(PLAIN_QUOTE.len(), QUOTE_LEN);
    }
}
