//! Purpose: Sequence validate → read → decode → process → encode → write for one run.
//! Exports: `Stage`, `run`.
//! Role: Orchestrator between the parsed options and the file system.
//! Invariants: Stages run strictly in order; the first failure ends the run.
//! Invariants: Every returned error records the stage it failed in.
//! Invariants: File handles are scoped to a single read or write call.
use std::fmt;
use std::fs;
use std::io::Write;

use serde_json::Value;
use tracing::debug;

use crate::args::Options;
use crate::core::error::{Error, ErrorKind};
use crate::core::validate::validate_input_path;
use crate::json::parse;
use crate::process::{Processor, ResultDocument};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    ParsingArgs,
    ValidatingInput,
    ReadingInput,
    DeserializingInput,
    Processing,
    SerializingOutput,
    WritingOutput,
    Done,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::ParsingArgs => "parsing-args",
            Stage::ValidatingInput => "validating-input",
            Stage::ReadingInput => "reading-input",
            Stage::DeserializingInput => "deserializing-input",
            Stage::Processing => "processing",
            Stage::SerializingOutput => "serializing-output",
            Stage::WritingOutput => "writing-output",
            Stage::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs every stage after argument parsing. Verbose progress lines go to `progress`.
pub fn run<P, W>(options: &Options, processor: &P, progress: &mut W) -> Result<ResultDocument, Error>
where
    P: Processor + ?Sized,
    W: Write + ?Sized,
{
    debug!(stage = %Stage::ValidatingInput, path = %options.input.display());
    validate_input_path(&options.input)?;

    debug!(stage = %Stage::ReadingInput, path = %options.input.display());
    let text = fs::read_to_string(&options.input).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to read input")
            .with_path(&options.input)
            .with_stage(Stage::ReadingInput)
            .with_source(err)
    })?;

    debug!(stage = %Stage::DeserializingInput, bytes = text.len());
    let input: Value = parse::from_str(&text).map_err(|err| {
        debug!(
            stage = %Stage::DeserializingInput,
            hint = %parse::location_hint(&err),
            "input rejected"
        );
        Error::new(ErrorKind::InvalidJson)
            .with_path(&options.input)
            .with_stage(Stage::DeserializingInput)
            .with_source(err)
    })?;

    if options.verbose {
        progress_line(progress, &format!("Processing {}...", options.input.display()))?;
    }

    debug!(stage = %Stage::Processing);
    let result = processor.process(&input);

    debug!(stage = %Stage::SerializingOutput, keys = result.input_keys.len());
    let encoded = serde_json::to_string_pretty(&result).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to encode result")
            .with_stage(Stage::SerializingOutput)
            .with_source(err)
    })?;

    debug!(stage = %Stage::WritingOutput, path = %options.output.display());
    fs::write(&options.output, encoded.as_bytes()).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to write output")
            .with_path(&options.output)
            .with_stage(Stage::WritingOutput)
            .with_source(err)
    })?;

    if options.verbose {
        // The output file is already written; a closed progress stream does not fail the run.
        let reported = progress_line(
            progress,
            &format!("Results written to {}", options.output.display()),
        )
        .and_then(|()| progress_line(progress, &format!("Status: {}", result.status.as_str())));
        if let Err(err) = reported {
            debug!(stage = %Stage::Done, error = %err, "progress not reported");
        }
    }

    debug!(stage = %Stage::Done);
    Ok(result)
}

fn progress_line<W: Write + ?Sized>(progress: &mut W, line: &str) -> Result<(), Error> {
    writeln!(progress, "{line}").map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to write progress")
            .with_source(err)
    })
}
