// Matching-delimiter scanners and comment stripping.
//
// Pure functions over a source slice; they never touch the output buffer.
// Fault positions are relative to the slice, plus an explicit `base` where
// the caller hands in a sub-slice of its own source.

use std::borrow::Cow;

use crate::error::{ErrorKind, Fault};

pub(crate) const LSQ: char = '\u{2018}';
pub(crate) const RSQ: char = '\u{2019}';

/// UTF-8 width of both `‘` and `’`.
pub(crate) const QUOTE_LEN: usize = 3;

/// Find the `’` matching the `‘` at `start`, honoring `‘`/`’` nesting.
///
/// Returns the byte position of the matching `’`.
pub(crate) fn find_matching_rquote(s: &str, start: usize) -> Result<usize, Fault> {
    debug_assert!(s[start..].starts_with(LSQ));
    let mut nesting = 0usize;
    for (pos, ch) in s[start..].char_indices() {
        if ch == LSQ {
            nesting += 1;
        } else if ch == RSQ {
            nesting -= 1;
            if nesting == 0 {
                return Ok(start + pos);
            }
        }
    }
    Err(Fault::new(ErrorKind::UnpairedLeftQuote, start))
}

/// Find the `]` matching the `[` at `start`, honoring `[`/`]` nesting.
///
/// Returns the byte position of the matching `]`.
pub(crate) fn find_matching_rbracket(s: &str, start: usize, base: usize) -> Result<usize, Fault> {
    debug_assert!(s[start..].starts_with('['));
    let mut nesting = 0usize;
    for (pos, ch) in s[start..].char_indices() {
        if ch == '[' {
            nesting += 1;
        } else if ch == ']' {
            nesting -= 1;
            if nesting == 0 {
                return Ok(start + pos);
            }
        }
    }
    Err(Fault::new(ErrorKind::UnterminatedComment, base + start))
}

/// Delete every `[[[…]]]` comment from `text`.
///
/// Each run of `level` consecutive `[` opens a comment ending at its
/// matching `]`; removal repeats until no opener remains. `base` is the
/// offset of `text` within the caller's source and is advanced past each
/// deletion so fault positions keep tracking the caller's coordinates.
pub(crate) fn strip_comments(
    text: &str,
    mut base: usize,
    level: usize,
) -> Result<Cow<'_, str>, Fault> {
    let opener = "[".repeat(level);
    if !text.contains(opener.as_str()) {
        return Ok(Cow::Borrowed(text));
    }

    let mut s = text.to_string();
    while let Some(j) = s.find(opener.as_str()) {
        let k = find_matching_rbracket(&s, j, base)? + 1;
        base += k - j;
        s.replace_range(j..k, "");
    }
    Ok(Cow::Owned(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rquote_simple_pair() {
        let s = "‘abc’";
        assert_eq!(find_matching_rquote(s, 0), Ok(s.len() - QUOTE_LEN));
    }

    #[test]
    fn rquote_skips_nested_pairs() {
        let s = "‘a‘b’c’d";
        // The match is the second ’, not the inner one.
        assert_eq!(find_matching_rquote(s, 0), Ok(12));
    }

    #[test]
    fn rquote_unpaired_reports_opener() {
        let s = "xx‘abc";
        assert_eq!(
            find_matching_rquote(s, 2),
            Err(Fault::new(ErrorKind::UnpairedLeftQuote, 2))
        );
    }

    #[test]
    fn rbracket_nesting() {
        let s = "[a[b]c]d";
        assert_eq!(find_matching_rbracket(s, 0, 0), Ok(6));
        assert_eq!(find_matching_rbracket(s, 2, 0), Ok(4));
    }

    #[test]
    fn rbracket_unterminated_adds_base() {
        let s = "[abc";
        assert_eq!(
            find_matching_rbracket(s, 0, 10),
            Err(Fault::new(ErrorKind::UnterminatedComment, 10))
        );
    }

    #[test]
    fn comments_removed() {
        assert_eq!(
            strip_comments("a[[[hidden]]]b", 0, 3).unwrap(),
            "ab"
        );
    }

    #[test]
    fn comments_with_nested_brackets() {
        assert_eq!(
            strip_comments("a[[[x[y]z]]]b", 0, 3).unwrap(),
            "ab"
        );
    }

    #[test]
    fn multiple_comments_removed() {
        assert_eq!(
            strip_comments("a[[[1]]]b[[[2]]]c", 0, 3).unwrap(),
            "abc"
        );
    }

    #[test]
    fn stripping_is_idempotent() {
        let once = strip_comments("x[[[c]]]y", 0, 3).unwrap().into_owned();
        let twice = strip_comments(&once, 0, 3).unwrap().into_owned();
        assert_eq!(once, twice);
    }

    #[test]
    fn clean_text_borrows() {
        assert!(matches!(
            strip_comments("no comments here", 0, 3).unwrap(),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn unterminated_comment_fault() {
        let err = strip_comments("a[[[oops", 4, 3).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnterminatedComment);
        // 4 (base) + 1 (offset of the run inside the text).
        assert_eq!(err.pos, 5);
    }
}
