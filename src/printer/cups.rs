//! CUPS command-line client (`lpstat` and `lp`)

use std::process::Command;
use crate::command;
use crate::error::{Error, Result};
use super::{PrintRequest, PrintSystem};

/// Print system backed by the CUPS command-line tools.
#[derive(Debug, Clone)]
pub struct Cups {
    lp: String,
    lpstat: String,
}

impl Cups {
    pub fn new(lp: impl Into<String>, lpstat: impl Into<String>) -> Self {
        Self {
            lp: lp.into(),
            lpstat: lpstat.into(),
        }
    }

    fn lp_command(&self, request: &PrintRequest) -> Command {
        let mut cmd = Command::new(&self.lp);
        cmd.arg("-d").arg(&request.printer);
        if let Some(title) = &request.title {
            cmd.arg("-t").arg(title);
        }
        cmd.arg("-o")
            .arg(format!("media={}", request.media))
            .arg(&request.document);
        cmd
    }
}

impl Default for Cups {
    fn default() -> Self {
        Self::new("lp", "lpstat")
    }
}

impl PrintSystem for Cups {
    fn has_printer(&self, name: &str) -> Result<bool> {
        match command::run(Command::new(&self.lpstat).arg("-p").arg(name)) {
            Ok(_) => Ok(true),
            Err(Error::CommandFailed { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn printers(&self) -> Result<Vec<String>> {
        // lpstat -p exits non-zero when no printers exist
        match command::run(Command::new(&self.lpstat).arg("-p")) {
            Ok(output) => Ok(parse_printer_names(&String::from_utf8_lossy(&output.stdout))),
            Err(Error::CommandFailed { .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    fn submit(&self, request: &PrintRequest) -> Result<Option<String>> {
        let output = command::run(&mut self.lp_command(request)).map_err(|e| match e {
            Error::CommandFailed { code, stderr, .. } => Error::SubmitFailed { code, stderr },
            other => other,
        })?;
        Ok(parse_request_id(&String::from_utf8_lossy(&output.stdout)))
    }

    fn describe(&self, request: &PrintRequest) -> String {
        let cmd = self.lp_command(request);
        std::iter::once(cmd.get_program())
            .chain(cmd.get_args())
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Printer names from `lpstat -p` output.
///
/// Only lines of the form `printer NAME ...` count; continuation lines are
/// indented and skipped.
pub fn parse_printer_names(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.strip_prefix("printer "))
        .filter_map(|rest| rest.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// Request id from `lp` output such as `request id is Office-42 (1 file(s))`.
pub fn parse_request_id(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| line.trim().strip_prefix("request id is "))
        .and_then(|rest| rest.split_whitespace().next())
        .map(str::to_string)
}
