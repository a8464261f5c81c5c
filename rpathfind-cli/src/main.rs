//! `find-rpath`: print the parent of the Python runtime's library directory.

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::missing_docs_in_private_items
)]

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use rpathfind::{Resolution, Resolver, ResolverConfig};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "FIND_RPATH_LOG";

#[derive(Parser)]
#[command(
    name = "find-rpath",
    version,
    about = "Print the installation base directory of the Python runtime (parent of LIBDIR)"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Python interpreter to query. Defaults to python3 / python on PATH.
    #[arg(long, env = "FIND_RPATH_PYTHON")]
    python: Option<PathBuf>,

    /// Configuration variable holding the library directory.
    #[arg(long = "var", default_value = rpathfind::LIBDIR)]
    variable: String,

    /// Output format.
    #[arg(long, default_value = "plain")]
    format: OutputFormat,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Generate shell completion scripts.
    Completion {
        /// Target shell.
        shell: Shell,
    },
}

/// Output format for the resolved directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    /// The base directory alone.
    #[default]
    Plain,
    /// Variable, library directory and base directory as one JSON object.
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(e) = cli.dispatch() {
        eprintln!("find-rpath: {e:#}");
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout carries only the result.
fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

impl Cli {
    fn dispatch(self) -> Result<()> {
        if let Some(Command::Completion { shell }) = self.command {
            clap_complete::generate(shell, &mut Self::command(), "find-rpath", &mut io::stdout());
            return Ok(());
        }

        let mut config = ResolverConfig::default();
        config.interpreter = self.python;
        config.variable = self.variable;

        let resolver =
            Resolver::from_config(config).context("cannot open installation configuration")?;
        let res = resolver.resolve().with_context(|| {
            format!(
                "cannot resolve base directory via {}",
                resolver.source().interpreter().display()
            )
        })?;

        emit(&res, self.format, &mut io::stdout().lock())
    }
}

/// Writes `res` as a single line.
fn emit(res: &Resolution, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Plain => {
            write_path(out, &res.base_dir)?;
            out.write_all(b"\n")?;
        }
        OutputFormat::Json => writeln!(
            out,
            "{}",
            serde_json::to_string(res).context("JSON output needs a UTF-8 path")?
        )?,
    }
    out.flush()?;
    Ok(())
}

/// Paths are written byte for byte.
#[cfg(unix)]
fn write_path(out: &mut impl Write, path: &Path) -> io::Result<()> {
    use std::os::unix::ffi::OsStrExt;
    out.write_all(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn write_path(out: &mut impl Write, path: &Path) -> io::Result<()> {
    write!(out, "{}", path.display())
}
