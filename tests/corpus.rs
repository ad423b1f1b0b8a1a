// Corpus round-trip tests — the self-test records the CLI `-t` mode runs.
//
// Each record is `input (()) expected-HTML`; records are separated by the
// line `|\n\n|`. Conversion runs in non-decoration mode and the comparison
// is byte-exact.

mod common;

use pretty_assertions::assert_eq;
use pqmarkup_lite::{convert, suite};

#[test]
fn corpus_round_trips_byte_exactly() {
    let corpus = common::load_fixture("corpus.txt");
    let cases = suite::parse(&corpus);
    assert!(cases.len() >= 40, "corpus unexpectedly small: {}", cases.len());

    for (idx, case) in cases.iter().enumerate() {
        let html = convert(case.input)
            .unwrap_or_else(|e| panic!("case #{}: conversion failed: {e}", idx + 1));
        assert_eq!(html, case.expected, "case #{}: {:?}", idx + 1, case.input);
    }
}

#[test]
fn suite_runner_passes_whole_corpus() {
    let corpus = common::load_fixture("corpus.txt");
    let count = suite::run(&corpus).expect("a corpus case failed");
    assert_eq!(count, corpus.split("|\n\n|").count());
}
