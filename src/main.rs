//! Purpose: `jsonshape` CLI entry point.
//! Role: Binary crate root; installs logging, runs the dispatcher, exits with its code.
//! Invariants: Every path ends in an explicit exit; a panic is reported as an unexpected error.
use std::any::Any;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};

use jsonshape::core::error::{Error, ErrorKind, to_exit_code};
use jsonshape::dispatch::dispatch;
use jsonshape::logging::init_tracing;

fn main() {
    init_tracing();
    panic::set_hook(Box::new(|_| {}));

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let stdout = io::stdout();
        let stderr = io::stderr();
        dispatch(
            std::env::args_os().skip(1),
            &mut stdout.lock(),
            &mut stderr.lock(),
        )
    }));

    let exit_code = match outcome {
        Ok(code) => code,
        Err(payload) => {
            let err = Error::new(ErrorKind::Internal).with_message(panic_message(payload.as_ref()));
            let _ = writeln!(io::stderr(), "{}", err.diagnostic());
            to_exit_code(err.kind())
        }
    };
    let _ = io::stdout().flush();
    std::process::exit(exit_code);
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_string();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    "panic with non-string payload".to_string()
}
