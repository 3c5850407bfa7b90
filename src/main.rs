//! sumfiles - live summary of disk usage by file extension or age.
//!
//! Usage:
//!   sf [OPTIONS] PATH           Summarize bytes per extension
//!   sf --time PATH              Summarize bytes per modification date
//!   sf --lines PATH             Summarize line counts of text files
//!   sf --log PATH               Also write file_summary.txt
//!   sf --help                   Show help

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use color_eyre::eyre::{Context, Result};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use sumfiles_core::{GroupMode, SummaryConfig};
use sumfiles_scan::Scanner;
use sumfiles_view::{
    LOG_FILE_NAME, Renderer, SummaryReport, ViewOptions, elide_root, terminal, write_log_file,
};

const DEBUG_FILTER: &str = "warn,sf=debug,sumfiles=debug,sumfiles_core=debug,\
                            sumfiles_scan=debug,sumfiles_analyze=debug,sumfiles_view=debug";

#[derive(Parser)]
#[command(
    name = "sumfiles",
    version,
    about = "Live summary of disk usage by extension or modification time",
    long_about = "sumfiles walks a directory tree and keeps a live, terminal-sized \
                  table of bytes (or lines) per file extension or per modification \
                  date while it scans."
)]
struct Cli {
    /// Directory to summarize
    path: Option<PathBuf>,

    /// Write the final summary to file_summary.txt in the working directory
    #[arg(short, long)]
    log: bool,

    /// Group by file extension (default)
    #[arg(short, long)]
    ext: bool,

    /// Group by modification time; wins over --ext
    #[arg(short, long)]
    time: bool,

    /// Count lines of text files
    #[arg(short = 'L', long)]
    lines: bool,

    /// Verbose diagnostics; frames scroll instead of redrawing in place
    #[arg(short = 'v', long)]
    debug: bool,

    /// Print the final summary as JSON
    #[arg(long)]
    json: bool,

    /// Skip entries whose name matches this glob (repeatable)
    #[arg(long = "exclude", value_name = "GLOB")]
    exclude: Vec<String>,

    /// Skip hidden files and directories
    #[arg(long)]
    no_hidden: bool,

    /// Follow symbolic links
    #[arg(long)]
    follow_links: bool,

    /// Stop once more than N files failed
    #[arg(long, value_name = "N")]
    max_errors: Option<u64>,

    /// Milliseconds between live redraws
    #[arg(long, value_name = "MS", default_value_t = 300)]
    interval: u64,

    /// Terminal width to render for
    #[arg(long, value_name = "N")]
    columns: Option<u16>,

    /// Grid rows to render
    #[arg(long, value_name = "N")]
    rows: Option<u16>,
}

impl Cli {
    fn mode(&self) -> GroupMode {
        match (self.time, self.ext) {
            (true, _) => GroupMode::Time,
            (false, _) => GroupMode::Extension,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.debug);

    let Some(path) = cli.path.clone() else {
        Cli::command().print_help()?;
        std::process::exit(1);
    };

    let config = build_config(&cli, path)?;
    run(&config)
}

fn init_tracing(debug: bool) {
    let default = if debug { DEBUG_FILTER } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn build_config(cli: &Cli, root: PathBuf) -> Result<SummaryConfig> {
    let terminal = match (cli.columns, cli.rows) {
        (None, None) => None,
        (cols, rows) => Some(terminal::resolve(cols, rows)),
    };

    SummaryConfig::builder()
        .root(root)
        .mode(cli.mode())
        .count_lines(cli.lines)
        .log(cli.log)
        .debug(cli.debug)
        .json(cli.json)
        .refresh_interval(Duration::from_millis(cli.interval))
        .terminal(terminal)
        .ignore_patterns(cli.exclude.clone())
        .include_hidden(!cli.no_hidden)
        .follow_symlinks(cli.follow_links)
        .max_errors(cli.max_errors)
        .build()
        .wrap_err("Invalid configuration")
}

/// Scan with live redraws, then render once more and write the outputs.
fn run(config: &SummaryConfig) -> Result<()> {
    let size = config.terminal.unwrap_or_else(terminal::detect);
    let scanner = Scanner::new(config.clone()).wrap_err("Failed to prepare scan")?;
    let opts = ViewOptions::from(config);

    let mut summary = scanner.new_summary();
    summary.root_display = elide_root(&summary.root_display, usize::from(size.cols));

    let mut renderer = Renderer::new(opts);
    let outcome = {
        let mut stdout = io::stdout().lock();
        let outcome = scanner.run(&mut summary, |live| {
            if let Err(err) = renderer.draw(&mut stdout, live, size) {
                warn!(error = %err, "live redraw failed");
            }
        });
        renderer
            .draw(&mut stdout, &summary, size)
            .wrap_err("Failed to write summary")?;
        if let Some(err) = &outcome.error {
            writeln!(stdout, "{err}")?;
        }
        outcome
    };

    if config.log {
        let cwd = std::env::current_dir().wrap_err("Cannot resolve working directory")?;
        write_log_file(&cwd, &summary, &opts).wrap_err("Failed to write summary log")?;
        println!("Wrote summary to {LOG_FILE_NAME}");
    }

    if config.json {
        println!("{}", SummaryReport::new(&summary, &opts).to_json()?);
    }

    let progress = &outcome.progress;
    eprintln!(
        "Scanned {} files ({}) in {:.2}s, {:.0} files/s",
        progress.files_scanned,
        format_size(summary.total),
        progress.elapsed.as_secs_f64(),
        progress.files_per_second()
    );

    Ok(())
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
