// End-to-end API tests for pqmarkup-lite.

use pretty_assertions::assert_eq;
use pqmarkup_lite::{convert, convert_with, Options};

#[test]
fn test_empty_input() {
    assert_eq!(convert("").unwrap(), "");
}

#[test]
fn test_plain_text_passes_through() {
    assert_eq!(convert("Hello, world!").unwrap(), "Hello, world!");
}

#[test]
fn test_bold_span() {
    assert_eq!(convert("*\u{2018}bold\u{2019}").unwrap(), "<b>bold</b>");
}

#[test]
fn test_heading_absorbs_trailing_newline() {
    assert_eq!(convert("H\u{2018}Title\u{2019}\n").unwrap(), "<h3>Title</h3>\n");
}

#[test]
fn test_hyperlink_with_quoted_text() {
    assert_eq!(
        convert("\u{2018}x\u{2019}[http://a.test]").unwrap(),
        "<a href=\"http://a.test\">x</a>"
    );
}

#[test]
fn test_suffix_attached_abbreviation() {
    assert_eq!(
        convert("word[\u{2018}tooltip\u{2019}]").unwrap(),
        "<abbr title=\"tooltip\">word</abbr>"
    );
}

#[test]
fn test_blockquote_with_author() {
    assert_eq!(
        convert(">\u{2018}Einstein\u{2019}:\u{2018}E=mc^2\u{2019}").unwrap(),
        "<blockquote><i>Einstein</i>:<br />\nE=mc^2</blockquote>"
    );
}

#[test]
fn test_unterminated_quote_position() {
    let err = convert("\u{2018}unterminated").unwrap_err();
    assert_eq!(err.to_string(), "Unpaired left single quotation mark at line 1, column 1");
}

#[test]
fn test_decoration_mode_brackets() {
    let options = Options::new().with_decoration(true);
    assert_eq!(
        convert_with("[x]", &options).unwrap(),
        "<span class=\"sq\"><span class=\"sq_brackets\">[</span>x<span class=\"sq_brackets\">]</span></span>"
    );
}

#[test]
fn test_decoration_mode_spoiler() {
    let options = Options::new().with_decoration(true);
    assert_eq!(
        convert_with("{s}", &options).unwrap(),
        "<span class=\"cu_brackets\" onclick=\"return spoiler(this, event)\">\
<span class=\"cu_brackets_b\">{</span><span>\u{2026}</span>\
<span class=\"cu\" style=\"display: none\">s</span>\
<span class=\"cu_brackets_b\">}</span></span>"
    );
}

#[test]
fn test_non_decoration_mode_is_literal() {
    assert_eq!(convert("[x] {y}").unwrap(), "[x] {y}");
}

#[test]
fn test_decoration_does_not_change_inline_markup() {
    let options = Options::new().with_decoration(true);
    assert_eq!(
        convert_with("*\u{2018}b\u{2019}", &options).unwrap(),
        convert("*\u{2018}b\u{2019}").unwrap()
    );
}

#[test]
fn test_page_frame_wraps_fragment() {
    use pqmarkup_lite::page;
    let html = convert_with("x", &Options::new().with_decoration(true)).unwrap();
    let document = format!("{}{}{}", page::PROLOGUE, html, page::EPILOGUE);
    assert!(document.starts_with("<html>\n"));
    assert!(document.ends_with("</html>"));
    assert!(document.contains("<div id=\"main\" style=\"margin: 0 auto\">\nx</div>"));
}
