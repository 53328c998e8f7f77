//! Argument parsing and command dispatch for the `parley` binary.

use clap::{Args, Parser, Subcommand, ValueEnum};
use parley_api_models::Language;
use parley_core::StatusFilter;
use parley_core::config::{DEFAULT_API_URL, parse_base_url, resolve_base_url};
use parley_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging, invocation_span};
use url::Url;
use tracing::Instrument;
use uuid::Uuid;

use crate::client::{AppContext, CliResult, HttpTicketApi, build_http_client};
use crate::commands::deliver::handle_deliver;
use crate::commands::history::{handle_history, handle_show};
use crate::commands::translate::handle_translate;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Parses CLI arguments, executes the requested command, and returns the
/// process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format.unwrap_or_else(LogFormat::infer),
        ..LoggingConfig::default()
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err:#}");
    }

    let request_id = Uuid::new_v4().to_string();
    let span = invocation_span(command_label(&cli.command), &request_id);

    match dispatch(cli, &request_id).instrument(span).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn dispatch(cli: Cli, request_id: &str) -> CliResult<()> {
    let client = build_http_client(cli.timeout, request_id)?;
    let ctx = AppContext {
        api: HttpTicketApi::new(client, &cli.api_url),
        output: cli.output,
    };

    match cli.command {
        Command::Translate(args) => handle_translate(&ctx, args).await,
        Command::History(args) => handle_history(&ctx, args).await,
        Command::Show(args) => handle_show(&ctx, args).await,
        Command::Deliver(args) => handle_deliver(&ctx, args).await,
    }
}

#[derive(Parser)]
#[command(name = "parley", about = "Submit, review, and deliver translation tickets")]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "PARLEY_API_URL",
        value_parser = parse_api_url,
        default_value = DEFAULT_API_URL
    )]
    pub(crate) api_url: Url,
    #[arg(
        long,
        global = true,
        env = "PARLEY_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub(crate) timeout: u64,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[arg(long, global = true, env = "PARLEY_LOG", default_value = DEFAULT_LOG_LEVEL)]
    pub(crate) log_level: String,
    #[arg(long, global = true, help = "Log format: json or pretty")]
    pub(crate) log_format: Option<LogFormat>,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Create a ticket, translate it, and show the result.
    Translate(TranslateArgs),
    /// List tickets, newest first.
    History(HistoryArgs),
    /// Show a single ticket.
    Show(ShowArgs),
    /// Deliver a translated ticket to the partner.
    Deliver(DeliverArgs),
}

#[derive(Args)]
pub(crate) struct TranslateArgs {
    #[arg(long = "from", default_value = "en", help = "Source language")]
    pub(crate) source: Language,
    #[arg(long = "to", default_value = "pt", help = "Target language")]
    pub(crate) target: Language,
    #[arg(
        required = true,
        trailing_var_arg = true,
        help = "Text to translate; multiple words are joined with spaces"
    )]
    pub(crate) text: Vec<String>,
}

impl TranslateArgs {
    pub(crate) fn joined_text(&self) -> String {
        self.text.join(" ")
    }
}

#[derive(Args, Default)]
pub(crate) struct HistoryArgs {
    #[arg(
        long,
        default_value_t = StatusFilter::All,
        help = "Scope: all, created, translated or failed"
    )]
    pub(crate) status: StatusFilter,
}

#[derive(Args)]
pub(crate) struct ShowArgs {
    #[arg(help = "Ticket identifier")]
    pub(crate) id: i64,
}

#[derive(Args)]
pub(crate) struct DeliverArgs {
    #[arg(help = "Ticket identifier")]
    pub(crate) id: i64,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Translate(_) => "translate",
        Command::History(_) => "history",
        Command::Show(_) => "show",
        Command::Deliver(_) => "deliver",
    }
}

fn parse_api_url(input: &str) -> Result<Url, String> {
    let resolved = resolve_base_url(Some(input));
    parse_base_url(&resolved).map_err(|err| err.to_string())
}
