// Hyperlink and abbreviation emission.
//
// Both constructs pair a text span with a bracketed payload. The payload is
// scanned in place, the watermark jumps the whole construct, and link text
// is converted recursively so nested markup keeps working inside it.

use std::borrow::Cow;

use super::Pass;
use crate::error::{ConvertError, ErrorKind};
use crate::escape;
use crate::scan::{self, LSQ, QUOTE_LEN};

impl<'c, 'a> Pass<'c, 'a> {
    /// Emit `<a href="…" …>…</a>` for a `[url]` payload.
    ///
    /// On entry the cursor sits four bytes before the first scanned URL
    /// character (at `’` of `’[` for the quoted form, at `[` otherwise).
    /// `startpos..endpos` bounds the link text and `q_offset` is the width
    /// of the opening quote inside it (0 when the text is bare). A prepared
    /// `text` (the citation-line form) suppresses both the recursive text
    /// conversion and the watermark jump.
    pub(super) fn write_http_link(
        &mut self,
        startpos: usize,
        endpos: usize,
        q_offset: usize,
        text: Option<String>,
    ) -> Result<(), ConvertError> {
        let src = self.cur.src();
        let mut i = self.cur.pos() + 4;
        let mut nesting = 0_usize;
        loop {
            if i >= src.len() {
                return Err(self.fail(ErrorKind::UnterminatedLink, endpos + q_offset));
            }
            match src.as_bytes()[i] {
                b'[' => nesting += 1,
                b']' if nesting == 0 => break,
                b']' => nesting -= 1,
                b' ' => break,
                _ => {}
            }
            i += 1;
        }

        let url = escape::escape_attr(&src[endpos + 1 + q_offset..i]);
        let mut tag = format!("<a href=\"{url}\"");
        if url.starts_with("./") {
            tag.push_str(" target=\"_self\"");
        }

        if src.as_bytes()[i] == b' ' {
            // A space splits URL from title: `‘…’]` or `…]` up to the
            // payload's matching bracket.
            tag.push_str(" title=\"");
            let title: Cow<'_, str> = if src[i + 1..].starts_with(LSQ) {
                let endq2 = scan::find_matching_rquote(src, i + 1).map_err(|f| self.lift(f))?;
                if src.as_bytes().get(endq2 + QUOTE_LEN) != Some(&b']') {
                    return Err(self.fail(ErrorKind::AbbrBracketExpected, endq2 + QUOTE_LEN));
                }
                let title = scan::strip_comments(
                    &src[i + 1 + QUOTE_LEN..endq2],
                    i + 1 + QUOTE_LEN,
                    3,
                )
                .map_err(|f| self.lift(f))?;
                i = endq2 + QUOTE_LEN;
                title
            } else {
                let endb = scan::find_matching_rbracket(src, endpos + q_offset, 0)
                    .map_err(|f| self.lift(f))?;
                let title =
                    scan::strip_comments(&src[i + 1..endb], i + 1, 3).map_err(|f| self.lift(f))?;
                i = endb;
                title
            };
            tag.push_str(&escape::escape_attr(&title));
            tag.push('"');
        }

        // Optional numeric back-reference `[-N]` right after the payload.
        if src.get(i + 1..).is_some_and(|s| s.starts_with("[-")) {
            let bytes = src.as_bytes();
            let mut j = i + 3;
            while j < src.len() {
                if bytes[j] == b']' {
                    i = j;
                    break;
                }
                if !bytes[j].is_ascii_digit() {
                    break;
                }
                j += 1;
            }
        }

        let text = match text {
            Some(text) => text,
            None => {
                self.out.flush_verbatim(startpos, i + 1);
                self.conv
                    .to_html(&src[startpos + q_offset..endpos], startpos + q_offset)?
            }
        };
        tag.push('>');
        if text.is_empty() {
            tag.push_str(&url);
        } else {
            tag.push_str(&text);
        }
        tag.push_str("</a>");
        self.out.emit(tag);
        self.cur.set_pos(i);
        Ok(())
    }

    /// Emit `<abbr title="…">…</abbr>` for a `[‘tooltip’]` payload.
    ///
    /// The cursor sits `q_offset` bytes before the `[`; both the tooltip
    /// and the displayed text pass through comment stripping.
    pub(super) fn write_abbr(
        &mut self,
        startpos: usize,
        endpos: usize,
        q_offset: usize,
    ) -> Result<(), ConvertError> {
        let src = self.cur.src();
        let i = self.cur.pos() + q_offset;
        let endq2 = scan::find_matching_rquote(src, i + 1).map_err(|f| self.lift(f))?;
        if src.as_bytes().get(endq2 + QUOTE_LEN) != Some(&b']') {
            return Err(self.fail(ErrorKind::AbbrBracketExpected, endq2 + QUOTE_LEN));
        }
        self.out.flush_verbatim(startpos, endq2 + QUOTE_LEN + 1);
        let tooltip = scan::strip_comments(&src[i + 1 + QUOTE_LEN..endq2], i + 1 + QUOTE_LEN, 3)
            .map_err(|f| self.lift(f))?;
        let text = scan::strip_comments(&src[startpos + q_offset..endpos], startpos + q_offset, 3)
            .map_err(|f| self.lift(f))?;
        self.out.emit(format!(
            "<abbr title=\"{}\">{}</abbr>",
            escape::escape_attr(&tooltip),
            escape::escape_text(&text)
        ));
        self.cur.set_pos(endq2 + QUOTE_LEN);
        Ok(())
    }
}

/// Shorten a URL for display in a citation line: past 57 scalars it
/// collapses to the prefix ending at the last `/` within the first 46
/// scalars, plus `...`.
pub(super) fn truncate_display(link: &str) -> Cow<'_, str> {
    let mut count = 0_usize;
    let mut pos46 = 0_usize;
    for (pos, ch) in link.char_indices() {
        count += 1;
        if count == 46 {
            pos46 = pos + ch.len_utf8();
        }
    }
    if count <= 57 {
        return Cow::Borrowed(link);
    }
    let cut = link.as_bytes()[..=pos46]
        .iter()
        .rposition(|&b| b == b'/')
        .map_or(0, |p| p + 1);
    Cow::Owned(format!("{}...", &link[..cut]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_urls_display_unchanged() {
        let url = "http://example.org/page";
        assert_eq!(truncate_display(url), url);
    }

    #[test]
    fn exactly_57_scalars_is_kept() {
        let url = format!("http://example.org/{}", "a".repeat(38));
        assert_eq!(url.chars().count(), 57);
        assert_eq!(truncate_display(&url), url.as_str());
    }

    #[test]
    fn long_urls_cut_at_last_slash_and_ellipsized() {
        // 19 scalars up to and including the host's trailing slash, then a
        // long path segment: the cut lands on the deepest slash within the
        // first 46 scalars.
        let url = format!("http://example.org/{}/{}", "a".repeat(20), "b".repeat(40));
        assert_eq!(truncate_display(&url), "http://example.org/aaaaaaaaaaaaaaaaaaaa/...");
    }

    #[test]
    fn long_url_without_slash_in_window_collapses() {
        let url = format!("x{}", "y".repeat(70));
        assert_eq!(truncate_display(&url), "...");
    }
}
