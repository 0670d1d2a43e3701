mod render;

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tspl_toolchain_core::{Connector, LabelJob, TsplError};
#[cfg(feature = "serial")]
use tspl_toolchain_print_client::SerialConnector;
#[cfg(feature = "tcp")]
use tspl_toolchain_print_client::TcpConnector;
use tspl_toolchain_print_client::{FileConnector, PrinterConfig};

use crate::render::{Format, error_envelope, render_job_error};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "tspl",
    version,
    about = "TSPL toolchain: encode and print label jobs for TSC-compatible printers"
)]
struct Cli {
    /// Output mode: "pretty" writes raw TSPL and human messages, "json"
    /// writes machine-readable JSON.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Log more (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Validate a job file and write its TSPL commands to stdout.
    Encode {
        /// Job file (JSON), or `-` for stdin.
        job: String,
    },

    /// Validate a job file and send it to a printer, file, or serial port.
    Print {
        /// Job file (JSON), or `-` for stdin.
        job: String,

        /// Printer address: IP, IP:PORT, hostname, or hostname:PORT
        /// (port defaults to 9100).
        #[cfg(feature = "tcp")]
        #[arg(long, short = 'p')]
        printer: Option<String>,

        /// Write to a file or device node instead (`-` for stdout).
        #[arg(long = "file", value_name = "PATH")]
        out_file: Option<String>,

        /// Serial port path (e.g. /dev/ttyUSB0, /dev/rfcomm0, COM3).
        #[cfg(feature = "serial")]
        #[arg(long, value_name = "PATH")]
        serial: Option<String>,

        /// Serial baud rate (default 9600).
        #[cfg(feature = "serial")]
        #[arg(long, requires = "serial")]
        baud: Option<u32>,

        /// Connect and write timeout in seconds.
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Printer configuration JSON (`{"timeouts": {...}, "trace_io": bool}`).
        #[arg(long, value_name = "PATH")]
        config: Option<String>,

        /// Log every payload sent to the printer at trace level.
        #[arg(long)]
        trace_io: bool,

        /// Validate the job and report what would be sent, without
        /// opening any connection.
        #[arg(long)]
        dry_run: bool,
    },

    /// Print a sample job file (a 38x20 mm price tag).
    Sample,
}

/// Where `print` sends the job.
#[derive(Debug)]
enum Target {
    #[cfg(feature = "tcp")]
    Printer(String),
    File(String),
    #[cfg(feature = "serial")]
    Serial { path: String, baud: Option<u32> },
}

impl Target {
    fn describe(&self) -> String {
        match self {
            #[cfg(feature = "tcp")]
            Target::Printer(addr) => addr.clone(),
            Target::File(path) if path == "-" => "stdout".to_string(),
            Target::File(path) => path.clone(),
            #[cfg(feature = "serial")]
            Target::Serial { path, .. } => path.clone(),
        }
    }
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let format = Format::resolve(cli.output.as_deref());

    if let Err(err) = run(cli.cmd, format) {
        match format {
            Format::Json => println!("{}", error_envelope(&err)),
            Format::Pretty => eprintln!("error: {err:#}"),
        }
        process::exit(1);
    }
}

fn run(cmd: Cmd, format: Format) -> Result<()> {
    match cmd {
        Cmd::Encode { job } => cmd_encode(&job, format),
        Cmd::Print {
            job,
            #[cfg(feature = "tcp")]
            printer,
            out_file,
            #[cfg(feature = "serial")]
            serial,
            #[cfg(feature = "serial")]
            baud,
            timeout,
            config,
            trace_io,
            dry_run,
        } => {
            let mut targets = Vec::new();
            #[cfg(feature = "tcp")]
            targets.extend(printer.map(Target::Printer));
            targets.extend(out_file.map(Target::File));
            #[cfg(feature = "serial")]
            targets.extend(serial.map(|path| Target::Serial { path, baud }));

            let config = resolve_config(config.as_deref(), timeout, trace_io)?;
            cmd_print(&job, targets, &config, dry_run, format)
        }
        Cmd::Sample => cmd_sample(),
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_encode(path: &str, format: Format) -> Result<()> {
    let job = load_job(path, format)?;
    let commands = job.to_commands()?;

    match format {
        Format::Json => {
            let out = serde_json::json!({ "commands": commands });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            let mut stdout = io::stdout().lock();
            for line in &commands {
                stdout.write_all(line.as_bytes())?;
            }
            stdout.flush()?;
        }
    }
    Ok(())
}

fn cmd_print(
    path: &str,
    targets: Vec<Target>,
    config: &PrinterConfig,
    dry_run: bool,
    format: Format,
) -> Result<()> {
    let job = load_job(path, format)?;
    // Validate in memory first: a rejected job never opens a connection.
    let commands = job.to_commands()?;
    let bytes: usize = commands.iter().map(String::len).sum();

    if dry_run {
        match format {
            Format::Json => {
                let out = serde_json::json!({
                    "success": true,
                    "dry_run": true,
                    "commands": commands,
                    "bytes": bytes,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            Format::Pretty => {
                eprintln!(
                    "dry run: {path} is valid ({} commands, {bytes} bytes), nothing sent",
                    commands.len()
                );
            }
        }
        return Ok(());
    }

    let mut targets = targets.into_iter();
    let target = match (targets.next(), targets.next()) {
        (Some(target), None) => target,
        (None, _) => bail!("no output target: pass --printer, --file, or --serial"),
        (Some(_), Some(_)) => bail!("only one of --printer, --file, or --serial may be given"),
    };
    config.validate()?;

    let dest = target.describe();
    tracing::debug!(target = %dest, "sending job");
    send_to(&job, target, config).with_context(|| format!("failed to print to {dest}"))?;

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "success": true,
                "target": dest,
                "commands": commands.len(),
                "bytes": bytes,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            eprintln!("sent {} commands ({bytes} bytes) to {dest}", commands.len());
        }
    }
    Ok(())
}

fn cmd_sample() -> Result<()> {
    println!("{}", LabelJob::price_tag_sample().to_json_pretty()?);
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Open the target's connector and run the job through it.
fn send_to(job: &LabelJob, target: Target, config: &PrinterConfig) -> Result<()> {
    match target {
        #[cfg(feature = "tcp")]
        Target::Printer(addr) => send(job, TcpConnector::connect(&addr, config.clone())?)?,
        Target::File(path) if path == "-" => send(job, FileConnector::stdout(config.clone()))?,
        Target::File(path) => send(job, FileConnector::create(&path, config.clone())?)?,
        #[cfg(feature = "serial")]
        Target::Serial { path, baud } => {
            let conn = match baud {
                Some(baud) => SerialConnector::open(&path, baud, config.clone())?,
                None => SerialConnector::open_default(&path, config.clone())?,
            };
            send(job, conn)?;
        }
    }
    Ok(())
}

fn send<C: Connector>(job: &LabelJob, connector: C) -> Result<(), TsplError<C::Error>> {
    let mut encoder = job.encode(connector)?;
    encoder.close()
}

/// Build the printer configuration: `--config` file first, then flags.
fn resolve_config(
    path: Option<&str>,
    timeout: Option<u64>,
    trace_io: bool,
) -> Result<PrinterConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {path}"))?;
            serde_json::from_str::<PrinterConfig>(&raw)
                .with_context(|| format!("invalid printer config {path}"))?
        }
        None => PrinterConfig::default(),
    };
    if let Some(secs) = timeout {
        config.timeouts.connect = Duration::from_secs(secs);
        config.timeouts.write = Duration::from_secs(secs);
    }
    config.trace_io |= trace_io;
    Ok(config)
}

/// Read a job file (or stdin for `-`) and parse it.
fn load_job(path: &str, format: Format) -> Result<LabelJob> {
    let source = read_input(path)?;
    LabelJob::from_json(&source).map_err(|err| {
        if format == Format::Pretty {
            render_job_error(&source, display_name(path), &err);
        }
        anyhow!(err).context(format!("invalid job file {}", display_name(path)))
    })
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read job from stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(Path::new(path)).with_context(|| format!("failed to read {path}"))
}

fn display_name(path: &str) -> &str {
    if path == "-" { "<stdin>" } else { path }
}
