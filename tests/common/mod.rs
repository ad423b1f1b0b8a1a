// Shared test helpers for pqmarkup-lite.

use std::fs;
use std::path::Path;

/// Load a fixture file from the `tests/` directory.
pub fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join(name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Missing fixture: {}", path.display()))
}
