//! Purpose: Turn raw argument tokens into validated `Options`.
//! Exports: `Options`, `ParseOutcome`, `ArgumentError`, `parse_args`, `usage_text`.
//! Role: Pure tokenizer; never prints or exits (the dispatcher owns both).
//! Invariants: `ParseOutcome::Run` always carries non-empty input and output paths.
//! Invariants: A `--help` token anywhere wins over every other token.
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, ValueHint};

use crate::core::error::{Error, ErrorKind};

pub const BIN_NAME: &str = "jsonshape";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Options {
    pub input: PathBuf,
    pub output: PathBuf,
    pub verbose: bool,
}

#[derive(Debug, Eq, PartialEq)]
pub enum ParseOutcome {
    Run(Options),
    Help,
    Invalid(ArgumentError),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ArgumentError {
    Unknown(String),
    MissingRequired,
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentError::Unknown(token) => write!(f, "Unknown argument: {token}"),
            ArgumentError::MissingRequired => {
                write!(f, "Error: --input and --output arguments are required")
            }
        }
    }
}

impl From<ArgumentError> for Error {
    fn from(err: ArgumentError) -> Self {
        Error::new(ErrorKind::Usage).with_message(err.to_string())
    }
}

const HELP_FLAG: &str = "--help";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum PathFlag {
    Input,
    Output,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Flag {
    Path(PathFlag),
    Verbose,
}

impl Flag {
    const ALL: [Flag; 3] = [
        Flag::Path(PathFlag::Input),
        Flag::Path(PathFlag::Output),
        Flag::Verbose,
    ];

    fn long(self) -> &'static str {
        match self {
            Flag::Path(PathFlag::Input) => "--input",
            Flag::Path(PathFlag::Output) => "--output",
            Flag::Verbose => "--verbose",
        }
    }

    fn from_token(token: &OsStr) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| token == flag.long())
    }
}

#[derive(Clone, Copy, Debug)]
enum State {
    ExpectFlag,
    ExpectValue(PathFlag),
}

#[derive(Debug, Default)]
struct Paths {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl Paths {
    fn slot(&mut self, flag: PathFlag) -> &mut Option<PathBuf> {
        match flag {
            PathFlag::Input => &mut self.input,
            PathFlag::Output => &mut self.output,
        }
    }
}

/// Parses tokens, excluding the program name.
pub fn parse_args<I, T>(tokens: I) -> ParseOutcome
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let tokens: Vec<OsString> = tokens.into_iter().map(Into::into).collect();
    if tokens.iter().any(|token| token.as_os_str() == HELP_FLAG) {
        return ParseOutcome::Help;
    }

    let mut paths = Paths::default();
    let mut verbose = false;
    let mut state = State::ExpectFlag;

    for token in tokens {
        state = match state {
            State::ExpectFlag => match Flag::from_token(&token) {
                Some(Flag::Path(flag)) => State::ExpectValue(flag),
                Some(Flag::Verbose) => {
                    verbose = true;
                    State::ExpectFlag
                }
                None => {
                    return ParseOutcome::Invalid(ArgumentError::Unknown(
                        token.to_string_lossy().into_owned(),
                    ));
                }
            },
            State::ExpectValue(flag) => {
                // Empty values count as unset; a later occurrence overrides.
                *paths.slot(flag) = (!token.is_empty()).then(|| PathBuf::from(token));
                State::ExpectFlag
            }
        };
    }

    // A trailing path flag with no value leaves that path unset.
    if let State::ExpectValue(flag) = state {
        *paths.slot(flag) = None;
    }

    match paths {
        Paths {
            input: Some(input),
            output: Some(output),
        } => ParseOutcome::Run(Options {
            input,
            output,
            verbose,
        }),
        _ => ParseOutcome::Invalid(ArgumentError::MissingRequired),
    }
}

fn usage_command() -> Command {
    Command::new(BIN_NAME)
        .about("Read a JSON document, list its top-level keys, and write a JSON result")
        .help_template(
            r#"{about-with-newline}
USAGE
  {usage}

OPTIONS
{options}
"#,
        )
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("input")
                .long("input")
                .value_name("path")
                .value_hint(ValueHint::FilePath)
                .required(true)
                .help("Input file path (required)"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .value_name("path")
                .value_hint(ValueHint::FilePath)
                .required(true)
                .help("Output file path (required)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable verbose output"),
        )
        .arg(
            Arg::new("help")
                .long("help")
                .action(ArgAction::Help)
                .help("Show this help message"),
        )
}

pub fn usage_text() -> String {
    usage_command().render_help().to_string()
}
