/// Ways a document can be rejected.
///
/// The `Display` strings are the converter's user-facing messages; the CLI
/// prints them followed by the source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    #[error("Unpaired left single quotation mark")]
    UnpairedLeftQuote,
    #[error("Unpaired right single quotation mark")]
    UnpairedRightQuote,
    #[error("Unclosed left single quotation mark somewhere")]
    UnclosedLeftQuote,
    #[error("Unended comment started")]
    UnterminatedComment,
    #[error("Unended link")]
    UnterminatedLink,
    #[error("Unended ` started")]
    UnterminatedCode,
    #[error("Quotation with url should always has :\u{2018}...\u{2019} after [http(s)://url]")]
    QuotationWithUrlMalformed,
    #[error("Quotation with author's name should be in the form >\u{2018}Author's name\u{2019}:\u{2018}Quoted text.\u{2019}")]
    QuotationWithAuthorMalformed,
    #[error("Bracket ] should follow after \u{2019}")]
    AbbrBracketExpected,
    #[error("Unpaired single quotation mark found inside code block/span beginning")]
    UnpairedQuoteInsideCode,
}

/// A fatal conversion error with its location in the top-level document.
///
/// `pos` is the absolute byte offset; `line` and `column` are 1-based and
/// derived from `pos` by counting newlines, so positions raised inside
/// recursive conversion of inner text still point into the outer document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {line}, column {column}")]
#[non_exhaustive]
pub struct ConvertError {
    pub kind: ErrorKind,
    pub line: usize,
    pub column: usize,
    pub pos: usize,
}

/// An error raised by a scanning helper before position translation.
///
/// `pos` is relative to the source slice the helper was handed; the converter
/// turns a `Fault` into a [`ConvertError`] by adding the outer-position stack
/// and recomputing `(line, column)` against the top-level document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fault {
    pub kind: ErrorKind,
    pub pos: usize,
}

impl Fault {
    pub fn new(kind: ErrorKind, pos: usize) -> Self {
        Self { kind, pos }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_includes_location() {
        let err = ConvertError {
            kind: ErrorKind::UnpairedLeftQuote,
            line: 3,
            column: 7,
            pos: 42,
        };
        assert_eq!(
            err.to_string(),
            "Unpaired left single quotation mark at line 3, column 7"
        );
    }
}
