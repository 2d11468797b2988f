use anyhow::{Context as AnyhowContext, Result};
use clap::{Parser, ValueEnum};
use legacy_rules_graph::{InspectOptions, Report, RulesInspector};
use legacy_rules_scanner::{RuleTarget, ScanError, ScanOptions};
use std::io::{self, Write};
use std::path::PathBuf;

mod report;

pub use report::render_text_report;

fn print_stdout(text: &str) -> Result<()> {
    write_line(&mut io::stdout().lock(), text)
}

/// A reader that hung up early (`| head`) is not a failure
fn write_line(out: &mut impl Write, text: &str) -> Result<()> {
    if let Err(err) = out
        .write_all(text.as_bytes())
        .and_then(|_| out.write_all(b"\n"))
        .and_then(|_| out.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "legacy-rules-inspect")]
#[command(
    about = "Summarize base.includes, base.load and base.rules of a legacy rules folder",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Rule root directory, or a single rule file (its directory becomes the root)
    path: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Single-line JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Rule file extension (case-insensitive)
    #[arg(long, default_value = "rules")]
    extension: String,

    /// Maximum directory depth to walk below the root
    #[arg(long)]
    max_depth: Option<usize>,

    /// Stop walking after this many rule files
    #[arg(long)]
    max_files: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for the report)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

impl Cli {
    fn inspect_options(&self) -> InspectOptions {
        let defaults = ScanOptions::default();
        InspectOptions {
            scan: ScanOptions {
                extension: self.extension.trim_start_matches('.').to_string(),
                max_depth: self.max_depth.unwrap_or(defaults.max_depth),
                max_files: self.max_files.unwrap_or(defaults.max_files),
            },
            ..InspectOptions::default()
        }
    }
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let target = match RuleTarget::from_path(&cli.path) {
        Ok(target) => target,
        Err(err @ ScanError::InvalidRoot(_)) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
        Err(err) => return Err(err).context("Failed to resolve target path"),
    };

    let inspector =
        RulesInspector::new(cli.inspect_options()).context("Failed to prepare rule parsers")?;
    let report = inspector.inspect(&target);

    print_stdout(&render(&report, cli.format, cli.compact)?)
}

fn render(report: &Report, format: OutputFormat, compact: bool) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text_report(report)),
        OutputFormat::Json if compact => {
            serde_json::to_string(report).context("Failed to serialize report")
        }
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("Failed to serialize report")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("no space left"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn closed_reader_is_not_an_error() {
        assert!(write_line(&mut ClosedPipe, "{}").is_ok());
    }

    #[test]
    fn other_write_errors_propagate() {
        let err = write_line(&mut FullDisk, "{}").unwrap_err();
        assert!(err.to_string().contains("no space left"));
    }

    #[test]
    fn output_ends_with_newline() {
        let mut buf = Vec::new();
        write_line(&mut buf, "{\"root\":\"/r\"}").unwrap();
        assert_eq!(buf, b"{\"root\":\"/r\"}\n");
    }
}
