//! Batch Print CLI tool
//!
//! Merges a set of PDFs into one job and sends it to a CUPS printer.

use anyhow::Context;
use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process;

use batch_print::pdf::default_backends;
use batch_print::printer::Cups;
use batch_print::{job, CleanupRegistry, Config, Tools};

/// Batch Print - merge files into one job and print it
#[derive(Parser)]
#[command(name = "batch-print")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Print two handouts on A4
    batch-print -p Office_Laser -s A4 intro.pdf exercises.pdf

    # Print everything listed in handouts.txt, then notes.pdf
    batch-print -p Office_Laser -s Letter -f handouts.txt notes.pdf

FILE LIST:
    One path per line. Empty lines and lines starting with # are ignored.")]
struct Cli {
    /// Printer name (see `lpstat -p`)
    #[arg(short = 'p', value_name = "PRINTER", value_parser = NonEmptyStringValueParser::new())]
    printer: String,

    /// Paper size, e.g. Letter, Legal, A4, A3, Tabloid
    #[arg(short = 's', value_name = "SIZE", value_parser = NonEmptyStringValueParser::new())]
    paper_size: String,

    /// File listing additional files to print, one per line (printed first)
    #[arg(short = 'f', value_name = "FILE_LIST")]
    file_list: Option<PathBuf>,

    /// Job title
    #[arg(short = 't', value_name = "TITLE")]
    title: Option<String>,

    /// Merge and show the print command without submitting it
    #[arg(short = 'n')]
    dry_run: bool,

    /// Verbose logging
    #[arg(short = 'v')]
    verbose: bool,

    /// CUPS submit command
    #[arg(long, env = "BATCH_PRINT_LP", default_value = "lp", hide_short_help = true)]
    lp: String,

    /// CUPS status command
    #[arg(long, env = "BATCH_PRINT_LPSTAT", default_value = "lpstat", hide_short_help = true)]
    lpstat: String,

    /// Ghostscript command
    #[arg(long, env = "BATCH_PRINT_GS", default_value = "gs", hide_short_help = true)]
    gs: String,

    /// Files to print, in order
    files: Vec<PathBuf>,
}

impl Cli {
    fn into_parts(self) -> (Config, Tools) {
        let config = Config {
            printer: self.printer,
            paper_size: self.paper_size,
            file_list: self.file_list,
            files: self.files,
            title: self.title,
            dry_run: self.dry_run,
        };
        let tools = Tools {
            lp: self.lp,
            lpstat: self.lpstat,
            gs: self.gs,
        };
        (config, tools)
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        let code = match e.downcast_ref::<batch_print::Error>() {
            Some(err) => {
                eprintln!("Error: {}", err);
                err.exit_code()
            }
            None => {
                eprintln!("Error: {:#}", e);
                1
            }
        };
        process::exit(code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init()
        .context("Failed to initialize logging")?;

    let (config, tools) = cli.into_parts();

    let registry = CleanupRegistry::new();
    registry.install_signal_handler()?;

    let print_system = Cups::new(tools.lp, tools.lpstat);
    let backends = default_backends(&tools.gs);

    job::run(&config, &print_system, &backends, &registry, &mut io::stdout(), &mut io::stderr())?;

    Ok(())
}
