//! Purpose: Single top-level dispatcher that owns stdout/stderr wording and exit codes.
//! Exports: `dispatch`, `dispatch_with`.
//! Role: Bridges the pure parser and the pipeline to the process boundary.
//! Invariants: Each failure produces exactly one diagnostic line on `stderr`.
//! Invariants: Usage text goes to `stdout`, for help and for argument errors alike.
use std::ffi::OsString;
use std::io::Write;

use tracing::debug;

use crate::args::{ParseOutcome, parse_args, usage_text};
use crate::core::error::{Error, to_exit_code};
use crate::pipeline::{self, Stage};
use crate::process::{KeyListing, Processor};

/// Runs the CLI with the default processor and returns the process exit code.
pub fn dispatch<I, T, O, E>(tokens: I, stdout: &mut O, stderr: &mut E) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
    O: Write + ?Sized,
    E: Write + ?Sized,
{
    dispatch_with(tokens, &KeyListing::new(), stdout, stderr)
}

pub fn dispatch_with<I, T, P, O, E>(tokens: I, processor: &P, stdout: &mut O, stderr: &mut E) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
    P: Processor + ?Sized,
    O: Write + ?Sized,
    E: Write + ?Sized,
{
    let options = match parse_args(tokens) {
        ParseOutcome::Run(options) => options,
        ParseOutcome::Help => {
            let _ = write!(stdout, "{}", usage_text());
            return 0;
        }
        ParseOutcome::Invalid(err) => {
            let err = Error::from(err).with_stage(Stage::ParsingArgs);
            report(&err, stderr);
            let _ = write!(stdout, "{}", usage_text());
            return to_exit_code(err.kind());
        }
    };

    match pipeline::run(&options, processor, stdout) {
        Ok(_) => 0,
        Err(err) => {
            report(&err, stderr);
            to_exit_code(err.kind())
        }
    }
}

fn report<E: Write + ?Sized>(err: &Error, stderr: &mut E) {
    debug!(error = %err, "run failed");
    let _ = writeln!(stderr, "{}", err.diagnostic());
}

#[cfg(test)]
mod tests {
    use super::{dispatch, dispatch_with};
    use crate::process::KeyListing;
    use time::OffsetDateTime;

    fn run(tokens: &[&str]) -> (i32, String, String) {
        let mut stdout = Vec::<u8>::new();
        let mut stderr = Vec::<u8>::new();
        let code = dispatch(tokens.iter().copied(), &mut stdout, &mut stderr);
        (
            code,
            String::from_utf8(stdout).expect("utf8"),
            String::from_utf8(stderr).expect("utf8"),
        )
    }

    #[test]
    fn help_prints_usage_and_succeeds() {
        let (code, stdout, stderr) = run(&["--bogus", "--help"]);
        assert_eq!(code, 0);
        assert!(stdout.contains("--input <path>"));
        assert!(stdout.ends_with('\n'));
        assert!(!stdout.ends_with("\n\n"), "trailing blank line: {stdout:?}");
        assert!(stderr.is_empty());
    }

    #[test]
    fn unknown_argument_reports_and_prints_usage() {
        let (code, stdout, stderr) = run(&["--nope"]);
        assert_eq!(code, 1);
        assert_eq!(stderr.trim_end(), "Unknown argument: --nope");
        assert!(stdout.contains("--output <path>"));
    }

    #[test]
    fn missing_required_reports_and_prints_usage() {
        let (code, stdout, stderr) = run(&["--input", "in.json"]);
        assert_eq!(code, 1);
        assert_eq!(
            stderr.trim_end(),
            "Error: --input and --output arguments are required"
        );
        assert!(stdout.contains("USAGE"));
    }

    #[test]
    fn missing_input_file_exits_one() {
        let temp = tempfile::tempdir().expect("tempdir");
        let input = temp.path().join("nope.json");
        let output = temp.path().join("out.json");
        let (code, stdout, stderr) = run(&[
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ]);
        assert_eq!(code, 1);
        assert!(stdout.is_empty());
        assert_eq!(stderr.lines().count(), 1);
        assert!(stderr.contains("does not exist"));
    }

    #[test]
    fn successful_run_with_custom_processor() {
        fn clock() -> OffsetDateTime {
            OffsetDateTime::from_unix_timestamp(0).expect("epoch")
        }
        let temp = tempfile::tempdir().expect("tempdir");
        let input = temp.path().join("in.json");
        let output = temp.path().join("out.json");
        std::fs::write(&input, r#"{"k":null}"#).expect("write");

        let mut stdout = Vec::<u8>::new();
        let mut stderr = Vec::<u8>::new();
        let code = dispatch_with(
            [
                "--verbose",
                "--input",
                input.to_str().unwrap(),
                "--output",
                output.to_str().unwrap(),
            ],
            &KeyListing::with_clock(clock),
            &mut stdout,
            &mut stderr,
        );
        assert_eq!(code, 0);
        assert!(stderr.is_empty());
        let stdout = String::from_utf8(stdout).expect("utf8");
        assert!(stdout.ends_with("Status: success\n"));
        let written = std::fs::read_to_string(&output).expect("read");
        assert!(written.contains("\"timestamp\": \"1970-01-01T00:00:00.000Z\""));
    }
}
