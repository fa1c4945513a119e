//! Data-driven command scripts
//!
//! Each `.pixlab` file is run line by line through one fresh session. A line
//! ending in `#! error` must fail; every other line must succeed. Failures
//! never end the session, so later lines still see earlier state.

use datatest_stable::Utf8Path;
use pixlab::Session;

/// Marks a line that is expected to fail
const ERROR_MARKER: &str = "#! error";

fn run_script(path: &Utf8Path) -> datatest_stable::Result<()> {
    let source = std::fs::read_to_string(path)?;
    let mut session = Session::new();

    for (number, line) in source.lines().enumerate() {
        let number = number + 1;
        let (command, expect_error) = match line.split_once(ERROR_MARKER) {
            Some((command, _)) => (command, true),
            None => (line, false),
        };

        match (session.execute(command), expect_error) {
            (Ok(_), false) | (Err(_), true) => {}
            (Ok(outcome), true) => {
                return Err(format!(
                    "{path}:{number}: `{}` should have failed, got {outcome:?}",
                    command.trim()
                )
                .into());
            }
            (Err(err), false) => {
                return Err(format!("{path}:{number}: `{}` failed: {err}", command.trim()).into());
            }
        }
    }
    Ok(())
}

datatest_stable::harness! {
    { test = run_script, root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/scripts"), pattern = r"\.pixlab$" },
}
