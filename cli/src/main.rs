mod commands;
mod config;
mod interactive;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{config::ConfigCommand, entry::EntryCommand};
use std::time::Duration;
use tiny_client::{AuthScope, Client, ClientError};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "tiny")]
#[command(about = "cli for managing tiny url entries", long_about = None)]
struct Cli {
    /// Server url (overides config)
    #[arg(long, global = true, env = "TINY_SERVER_URL")]
    server: Option<String>,

    /// Token for read requests (overides config)
    #[arg(long, global = true, env = "TINY_READ_TOKEN", hide_env_values = true)]
    read_token: Option<String>,

    /// Token for write requests (overides config)
    #[arg(long, global = true, env = "TINY_WRITE_TOKEN", hide_env_values = true)]
    write_token: Option<String>,

    /// Request timeout, e.g. 10s or 1min (overides config)
    #[arg(long, global = true, value_parser = humantime::parse_duration)]
    timeout: Option<Duration>,

    /// Output format (table or json)
    #[arg(long, global = true, value_parser = ["table", "json"])]
    output: Option<String>,

    /// Log level written to stderr
    #[arg(long, global = true, default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone, Debug)]
enum Command {
    #[command(flatten)]
    Entry(EntryCommand),
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{}\n{:#}", "Error:".red().bold(), err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // logs go to stderr so json output stays parseable
    let _ = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(config::log_level(&cli.log).into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .try_init();

    match cli.command.clone() {
        Command::Config { command } => command.execute(),
        Command::Entry(command) => {
            let (client, output_format) = setup_client_and_format(&cli)?;
            let scope = command.scope();
            command
                .execute(&client, &output_format)
                .await
                .map_err(|err| with_auth_hint(err, scope))
        }
    }
}

fn setup_client_and_format(cli: &Cli) -> Result<(Client, config::OutputFormat)> {
    let cfg = config::load_config().context("Fail to load config")?;

    let server_url = cli.server.clone().unwrap_or(cfg.server_url.clone());
    let timeout = match cli.timeout {
        Some(timeout) => timeout,
        None => cfg.timeout()?,
    };
    debug!(server = server_url, timeout = ?timeout, "setup tiny url client");

    let mut builder = Client::builder(server_url).timeout(timeout);
    if let Some(token) = cli.read_token.clone().or(cfg.read_token.clone()) {
        builder = builder.read_token(token);
    }
    if let Some(token) = cli.write_token.clone().or(cfg.write_token.clone()) {
        builder = builder.write_token(token);
    }
    let client = builder.build().context("Fail create client")?;

    let output_format = cli
        .output
        .as_deref()
        .map(|fmt| match fmt {
            "json" => config::OutputFormat::Json,
            _ => config::OutputFormat::Table,
        })
        .unwrap_or(cfg.output_format);

    Ok((client, output_format))
}

/// A 401 can come from either token; name the one this command used.
fn with_auth_hint(err: anyhow::Error, scope: AuthScope) -> anyhow::Error {
    let unauthorized = err
        .chain()
        .filter_map(|e| e.downcast_ref::<ClientError>())
        .any(ClientError::is_unauthorized);
    if unauthorized {
        err.context(format!("unauthorized, {} access token may be invalid", scope))
    } else {
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_create_without_id() {
        let cli = Cli::try_parse_from(["tiny", "create", "http://example.com"]).unwrap();
        match cli.command {
            Command::Entry(EntryCommand::Create { id, url, .. }) => {
                assert!(id.is_none());
                assert_eq!(url.as_deref(), Some("http://example.com"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn cli_requires_id_unless_interactive() {
        assert!(Cli::try_parse_from(["tiny", "get"]).is_err());
        assert!(Cli::try_parse_from(["tiny", "get", "-i"]).is_ok());
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::try_parse_from([
            "tiny",
            "list",
            "--server",
            "http://tiny.local",
            "--timeout",
            "5s",
            "--output",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.server.as_deref(), Some("http://tiny.local"));
        assert_eq!(cli.timeout, Some(Duration::from_secs(5)));
        assert_eq!(cli.output.as_deref(), Some("json"));
    }

    #[test]
    fn unauthorized_errors_get_scope_hint() {
        let err = anyhow::Error::new(ClientError::Unauthorized).context("Fail list entries");
        let hinted = with_auth_hint(err, AuthScope::Read);
        assert_eq!(
            hinted.to_string(),
            "unauthorized, read access token may be invalid"
        );

        let err = anyhow::Error::new(ClientError::EntryNotFound).context("Fail get entry x1");
        let untouched = with_auth_hint(err, AuthScope::Write);
        assert_eq!(untouched.to_string(), "Fail get entry x1");
    }
}
