// pqmarkup-lite — lightweight markup to HTML converter.
//
// Architecture:
//   source string → Converter (single pass, recursing on inner text) → HTML fragment
//
// The markup uses typographic quotes ‘…’ as the universal span delimiter,
// square brackets for links/annotations, backticks for code, and curly
// braces for spoilers. The converter walks the source exactly once with a
// stack of pending ending tags and a verbatim-flush watermark; the driver
// (src/bin) wraps the fragment in the fixed page frame.

mod convert;
mod cursor;
mod error;
mod escape;
mod output;
pub mod page;
mod scan;
pub mod suite;

pub use error::{ConvertError, ErrorKind};

/// Conversion options.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Whether bare brackets and braces produce stylable decoration spans
    /// (document mode) instead of their literal characters (self-test mode).
    pub decorate: bool,
}

impl Options {
    /// Create a new Options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set decoration mode.
    pub fn with_decoration(mut self, decorate: bool) -> Self {
        self.decorate = decorate;
        self
    }
}

/// Convert a pqmarkup-lite document to an HTML fragment with default
/// options (decoration off).
///
/// # Examples
///
/// ```
/// let html = pqmarkup_lite::convert("*\u{2018}bold\u{2019}").unwrap();
/// assert_eq!(html, "<b>bold</b>");
/// ```
pub fn convert(source: &str) -> Result<String, ConvertError> {
    convert_with(source, &Options::default())
}

/// Convert a pqmarkup-lite document to an HTML fragment with custom options.
///
/// # Examples
///
/// ```
/// use pqmarkup_lite::{convert_with, Options};
///
/// let options = Options::new().with_decoration(true);
/// let html = convert_with("{hidden}", &options).unwrap();
/// assert!(html.contains("spoiler(this, event)"));
/// ```
pub fn convert_with(source: &str, options: &Options) -> Result<String, ConvertError> {
    #[cfg(feature = "tracing")]
    tracing::trace!(len = source.len(), decorate = options.decorate, "converting document");
    convert::Converter::new(source, options.decorate).to_html(source, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_empty() {
        let result = convert("").unwrap();
        assert_eq!(result, "");
    }

    #[test]
    fn test_convert_plain_text() {
        let result = convert("Hello, world!").unwrap();
        assert_eq!(result, "Hello, world!");
    }

    #[test]
    fn test_convert_escapes_text() {
        let result = convert("a & b < c").unwrap();
        assert_eq!(result, "a &amp; b &lt; c");
    }

    #[test]
    fn test_newline_becomes_break() {
        let result = convert("a\nb").unwrap();
        assert_eq!(result, "a<br />\nb");
    }

    #[test]
    fn test_options_builder() {
        let options = Options::new().with_decoration(true);
        assert!(options.decorate);
        assert!(!Options::default().decorate);
    }

    #[test]
    fn test_unpaired_quote_is_an_error() {
        let err = convert("\u{2018}unterminated").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnpairedLeftQuote);
        assert_eq!((err.line, err.column), (1, 1));
    }
}
