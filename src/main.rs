use std::future::Future;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Parser};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use nagios_view::data::duration;
use nagios_view::{App, FileSource, FilterSet, Settings, TimeMode, ViewOptions};

#[derive(Parser, Debug)]
#[command(name = "nagios-view", version, disable_version_flag = true)]
#[command(about = "A simple CLI dashboard for Nagios using the status.dat file")]
#[command(arg(
    Arg::new("version")
        .short('v')
        .long("version")
        .action(ArgAction::Version)
        .help("Print version")
))]
struct Args {
    /// Path to status.dat [default: /var/spool/nagios/status.dat]
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only show problem services (not OK status)
    #[arg(short, long)]
    problems: bool,

    /// Update automatically every interval, indefinitely
    #[arg(short, long)]
    watch: bool,

    /// Delay between updates in watch mode (e.g. "10s", "1m") [default: 10s]
    #[arg(short, long, value_parser = parse_interval)]
    interval: Option<Duration>,

    /// Hide any services that have been acknowledged
    #[arg(short = 'H', long)]
    hide_acknowledged: bool,

    /// Only print the status lines at the bottom with totals
    #[arg(long)]
    status_only: bool,

    /// Don't print the header line at the top of the output
    #[arg(long)]
    no_header: bool,

    /// Don't print the status lines at the bottom with totals
    #[arg(long)]
    no_status: bool,

    /// Only print hosts, not services
    #[arg(long)]
    hosts_only: bool,

    /// Only print services, not hosts
    #[arg(long)]
    services_only: bool,

    /// Force color output (default: color if stdout is a TTY)
    #[arg(long, overrides_with = "no_color")]
    color: bool,

    /// Disable color output
    #[arg(long, overrides_with = "color")]
    no_color: bool,

    /// Print the time since last state change for all services and hosts
    #[arg(long, overrides_with = "no_times")]
    times: bool,

    /// Don't print the time since last state change for anything
    #[arg(long, overrides_with = "times")]
    no_times: bool,

    /// Only show services whose host or description contains every filter
    filters: Vec<String>,
}

fn parse_interval(s: &str) -> Result<Duration, String> {
    duration::parse_interval(s).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let settings = Settings::load(args.config.as_deref()).context("failed to load configuration")?;
    let options = view_options(&args, settings, io::stdout().is_terminal());
    debug!(?options, "starting");

    let source = Box::new(FileSource::new(&options.file));
    let mut app = App::new(source, options);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut err = io::stderr();
    runtime.block_on(app.run(&mut out, &mut err, shutdown_signal()))?;

    Ok(())
}

/// Resolves on Ctrl-C. If the handler cannot be installed, watch mode keeps
/// running until the process is killed.
async fn shutdown_signal() {
    until_signal(tokio::signal::ctrl_c()).await
}

async fn until_signal<F: Future<Output = io::Result<()>>>(signal: F) {
    if let Err(e) = signal.await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// Logs go to stderr so they never interleave with the rendered view.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Apply command-line flags on top of the loaded settings.
fn view_options(args: &Args, mut settings: Settings, stdout_is_tty: bool) -> ViewOptions {
    if let Some(file) = &args.file {
        settings.file = file.clone();
    }
    if let Some(interval) = args.interval {
        settings.interval = interval;
    }
    if args.times {
        settings.times = TimeMode::All;
    } else if args.no_times {
        settings.times = TimeMode::None;
    }
    if args.color {
        settings.color = Some(true);
    } else if args.no_color {
        settings.color = Some(false);
    }
    if args.no_header {
        settings.header = false;
    }
    if args.no_status {
        settings.status = false;
    }

    let base = ViewOptions::from_settings(&settings, stdout_is_tty);
    ViewOptions {
        status: base.status || args.status_only,
        status_only: args.status_only,
        hosts_only: args.hosts_only,
        services_only: args.services_only,
        problems_only: args.problems,
        hide_acknowledged: args.hide_acknowledged,
        watch: args.watch,
        filters: FilterSet::new(args.filters.iter().cloned()),
        ..base
    }
}
