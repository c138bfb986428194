//! WHOIS CLI Application
//!
//! A command-line WHOIS client. It picks the right server for a domain,
//! follows the registrar referral, and prints the answer raw, as labeled
//! fields, or as a table.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{CommandFactory, Parser};
use console::Term;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use whois_cli_lib::{
    extract_fields, known_servers, parse_duration, ConfigManager, Language, LookupConfig,
    OutputMode, Settings, WhoisClient, WhoisError,
};

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for whois-cli
#[derive(Parser, Debug)]
#[command(name = "whois-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Look up domain registration data over WHOIS")]
#[command(
    long_about = "Look up domain registration data over WHOIS.\n\nThe server is chosen from the domain suffix, registrar referrals are followed one hop, and the answer is shown raw, as labeled fields, or as a table."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Domain name to look up
    #[arg(value_name = "DOMAIN")]
    pub domains: Vec<String>,

    /// Print the server response as received
    #[arg(long = "raw", help_heading = "Output Format")]
    pub raw: bool,

    /// Print extracted fields as a table
    #[arg(long = "table", help_heading = "Output Format")]
    pub table: bool,

    /// Display language for field labels (en, ja)
    #[arg(
        short = 'l',
        long = "lang",
        value_name = "LANG",
        help_heading = "Output Format"
    )]
    pub lang: Option<String>,

    /// Disable colored output
    #[arg(long = "no-color", help_heading = "Output Format")]
    pub no_color: bool,

    /// Write output to a file instead of stdout
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help_heading = "Output Format"
    )]
    pub output: Option<String>,

    /// Query this server instead of the one chosen for the domain
    #[arg(
        short = 's',
        long = "server",
        value_name = "HOST[:PORT]",
        help_heading = "Query"
    )]
    pub server: Option<String>,

    /// Per-query timeout (e.g. 500ms, 8s, 1.5m, 1m30s, 1h; bare numbers are seconds)
    #[arg(
        short = 't',
        long = "timeout",
        value_name = "DURATION",
        help_heading = "Query"
    )]
    pub timeout: Option<String>,

    /// Do not follow registrar referrals
    #[arg(long = "no-follow", help_heading = "Query")]
    pub no_follow: bool,

    /// List the built-in WHOIS server table and exit
    #[arg(long = "list-servers", help_heading = "Query")]
    pub list_servers: bool,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    init_logging(args.verbose);

    // Handle --list-servers early
    if args.list_servers {
        ui::print_servers(&known_servers());
        return;
    }

    if args.domains.len() != 1 {
        print_usage();
        return;
    }

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Send diagnostics to stderr. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "whois_cli=debug,whois_cli_lib=debug"
    } else {
        "off"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}

fn print_usage() {
    let mut command = Args::command();
    // A closed stdout is not worth reporting here
    let _ = command.print_help();
}

/// Look up the domain and emit the rendered result.
async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let settings = build_settings(&args)?;
    debug!("settings: {:?}", settings);

    let mut lookup_config = LookupConfig::default()
        .with_timeout(settings.timeout)
        .with_follow_referral(settings.follow_referral);
    if let Some(server) = &args.server {
        lookup_config = lookup_config.with_server(server.as_str());
    }

    let client = WhoisClient::with_config(lookup_config);
    let result = client.lookup(&args.domains[0]).await?;
    debug!("answered by {}", result.answered_by());

    let fields = extract_fields(&result.raw, settings.language);
    let color = settings.color && args.output.is_none() && Term::stdout().is_term();
    let lines = ui::present(&result.raw, &fields, settings.output, color);

    match &args.output {
        Some(path) => write_file(Path::new(path), &lines)?,
        None => write_stdout(&lines)?,
    }

    Ok(())
}

/// Resolve settings: defaults < config files < environment < CLI flags.
fn build_settings(args: &Args) -> Result<Settings, WhoisError> {
    let config_manager = ConfigManager::new(args.verbose);
    let settings = config_manager.resolve(args.config.as_deref().map(Path::new));
    apply_cli_args(settings, args)
}

/// Apply CLI arguments to settings (highest precedence).
///
/// Boolean flags only ever switch a behavior off or pick a mode, so an
/// absent flag leaves the configured value alone.
fn apply_cli_args(mut settings: Settings, args: &Args) -> Result<Settings, WhoisError> {
    if args.raw {
        settings.output = OutputMode::Raw;
    } else if args.table {
        settings.output = OutputMode::Table;
    }

    if let Some(lang) = &args.lang {
        settings.language = Language::from_code(lang);
    }

    if args.no_color {
        settings.color = false;
    }

    if args.no_follow {
        settings.follow_referral = false;
    }

    if let Some(timeout) = &args.timeout {
        settings.timeout = parse_duration(timeout).ok_or_else(|| {
            WhoisError::config(format!(
                "Invalid timeout '{}', use a format like '500ms', '8s', '1m30s' or '1h'",
                timeout
            ))
        })?;
    }

    Ok(settings)
}

fn write_file(path: &Path, lines: &[String]) -> Result<(), WhoisError> {
    let mut content = lines.join("\n");
    content.push('\n');

    fs::write(path, content)
        .map_err(|e| WhoisError::file_error(path.to_string_lossy(), e.to_string()))
}

fn write_stdout(lines: &[String]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}
