//! Running external tools

use std::process::{Command, Output};
use crate::error::{Error, Result};

/// Run a command to completion, capturing its output.
///
/// A non-zero exit becomes [`Error::CommandFailed`] carrying the exit code and stderr.
pub fn run(command: &mut Command) -> Result<Output> {
    let program = program_name(command);
    log::debug!("running {:?}", command);

    let output = command.output().map_err(|source| Error::Spawn {
        program: program.clone(),
        source,
    })?;

    if !output.status.success() {
        return Err(Error::CommandFailed {
            program,
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(output)
}

/// Check whether a program starts and exits successfully with the given probe arguments.
pub fn probe(program: &str, args: &[&str]) -> bool {
    Command::new(program)
        .args(args)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn program_name(command: &Command) -> String {
    command.get_program().to_string_lossy().into_owned()
}
