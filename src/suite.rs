// Self-test corpus support.
//
// A corpus file is a sequence of records separated by the line `|\n\n|`;
// each record holds a source document and its expected HTML, joined by the
// infix ` (()) `. The CLI `-t` mode and the corpus tests share this parser.

use crate::Options;

/// One corpus record: a source document and the HTML it must produce in
/// non-decoration mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Case<'a> {
    pub input: &'a str,
    pub expected: &'a str,
}

const RECORD_SEPARATOR: &str = "|\n\n|";
const INFIX: &str = " (()) ";

/// Split a corpus into cases. A record missing the infix yields the whole
/// record as input with an empty expectation, which can never pass.
pub fn parse(corpus: &str) -> Vec<Case<'_>> {
    corpus
        .split(RECORD_SEPARATOR)
        .map(|record| match record.split_once(INFIX) {
            Some((input, expected)) => Case { input, expected },
            None => Case {
                input: record,
                expected: "",
            },
        })
        .collect()
}

/// Run every case in non-decoration mode.
///
/// Returns the number of passed cases, or the 1-based index of the first
/// failing one. A conversion error counts as a failure of its case.
pub fn run(corpus: &str) -> Result<usize, usize> {
    let options = Options::new();
    let cases = parse(corpus);
    for (idx, case) in cases.iter().enumerate() {
        match crate::convert_with(case.input, &options) {
            Ok(html) if html == case.expected => {}
            _ => return Err(idx + 1),
        }
    }
    Ok(cases.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_records_and_infix() {
        let corpus = "a (()) b|\n\n|c (()) d";
        assert_eq!(
            parse(corpus),
            vec![
                Case { input: "a", expected: "b" },
                Case { input: "c", expected: "d" },
            ]
        );
    }

    #[test]
    fn infix_only_splits_once() {
        let corpus = "a (()) b (()) c";
        assert_eq!(
            parse(corpus),
            vec![Case { input: "a", expected: "b (()) c" }]
        );
    }

    #[test]
    fn run_reports_first_failure() {
        let corpus = "plain (()) plain|\n\n|x (()) wrong";
        assert_eq!(run(corpus), Err(2));
    }

    #[test]
    fn run_counts_passes() {
        let corpus = "plain (()) plain|\n\n|*\u{2018}b\u{2019} (()) <b>b</b>";
        assert_eq!(run(corpus), Ok(2));
    }
}
