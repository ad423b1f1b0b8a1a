// Command-line driver.
//
//   pqmarkup_lite -t                      run the corpus self-test
//   pqmarkup_lite input-file output-file  convert one document

use std::env;
use std::fs;
use std::process::ExitCode;

use pqmarkup_lite::{convert_with, page, suite, Options};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    if args.len() == 2 && args[1] == "-t" {
        return self_test();
    }

    if args.len() < 3 {
        println!("Usage: pqmarkup_lite input-file output-file");
        return ExitCode::SUCCESS;
    }

    let text = match fs::read_to_string(&args[1]) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("Cannot read {}: {}", args[1], err);
            return ExitCode::FAILURE;
        }
    };
    let source = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let html = match convert_with(source, &Options::new().with_decoration(true)) {
        Ok(html) => html,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut document = String::with_capacity(page::PROLOGUE.len() + html.len() + page::EPILOGUE.len());
    document.push_str(page::PROLOGUE);
    document.push_str(&html);
    document.push_str(page::EPILOGUE);

    if let Err(err) = fs::write(&args[2], document) {
        eprintln!("Cannot write {}: {}", args[2], err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn self_test() -> ExitCode {
    // The historical layout keeps the corpus two directories up; a crate
    // checkout keeps it next to the binary's working directory.
    let corpus = ["../../tests.txt", "tests.txt"]
        .iter()
        .find_map(|path| fs::read_to_string(path).ok());
    let Some(corpus) = corpus else {
        eprintln!("Cannot read tests.txt");
        return ExitCode::FAILURE;
    };

    match suite::run(&corpus) {
        Ok(count) => {
            println!("All of {count} tests are passed!");
            ExitCode::SUCCESS
        }
        Err(index) => {
            eprintln!("Error in test #{index}");
            ExitCode::FAILURE
        }
    }
}
