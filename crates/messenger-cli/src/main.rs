//! `messenger` command-line client.
//!
//! Connects to a service, validates a message and destination, and posts the
//! message over HTTP. The exit status is the messenger result code.
//!
//!   messenger send "Hi Jacob" --server 250.11.184.255:5000 --service 10.0.0.5:7000
//!   messenger check 42a3:5e8a:d8d3:6a87:c05b:ab38:7e88:ebf0:4520

mod config;

use clap::{Parser, Subcommand};
use config::{Config, resolve_service};
use messenger_client::{Connector, HttpTransport, Messenger};
use messenger_connector_http::{ReqwestTransport, TcpProbe};
use messenger_core::{CODE_FAILURE, CODE_INVALID, CODE_OK, Endpoint, MessengerError, ResultCodeExt};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "messenger", version, about = "Outbound messenger client")]
struct Cli {
    /// TOML config file (defaults to ./messenger.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Connect, validate and dispatch one message
    Send {
        message: String,
        /// Destination endpoint (host:port)
        #[arg(long, env = "MESSENGER_SERVER")]
        server: Option<String>,
        /// Service address probed before sending
        #[arg(long, env = "MESSENGER_SERVICE")]
        service: Option<String>,
        /// Validate and accept without dispatching
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate an endpoint without connecting
    Check { endpoint: String },
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => ExitCode::from(exit_status(code)),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(CODE_FAILURE as u8)
        }
    }
}

/// Process exit status for a result code.
///
/// Codes outside 0..=255 (negative or large connector statuses) exit with 1.
fn exit_status(code: i32) -> u8 {
    u8::try_from(code).unwrap_or_else(|_| {
        tracing::warn!(
            "Result code {} does not fit an exit status, exiting with {}",
            code,
            CODE_FAILURE
        );
        CODE_FAILURE as u8
    })
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let config = Config::load(cli.config.as_deref())?;
    init_tracing(&config)?;

    match cli.command {
        Command::Check { endpoint } => Ok(check(&endpoint)),
        Command::Send {
            message,
            server,
            service,
            dry_run,
        } => {
            let server = server
                .or_else(|| config.server.clone())
                .ok_or_else(|| anyhow::anyhow!("no destination: pass --server or set `server`"))?;
            let service = service
                .or_else(|| config.service.clone())
                .ok_or_else(|| anyhow::anyhow!("no service: pass --service or set `service`"))?;
            let service = resolve_service(&service)?;

            let mut messenger = Messenger::new(service, TcpProbe::new(config.connect_timeout()));
            let mut transport = if dry_run {
                None
            } else {
                Some(ReqwestTransport::new(config.request_timeout())?)
            };

            tracing::info!("Sending to {} via service {}", server, messenger.service());
            let result = deliver(&mut messenger, &message, &server, transport.as_mut());
            if let Err(e) = &result {
                tracing::error!("{}", e);
            }
            Ok(result.result_code())
        }
    }
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let filter = match &config.log_filter {
        Some(directives) => {
            EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(directives))?
        }
        None => EnvFilter::from_default_env().add_directive("messenger=info".parse()?),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Establish, send, then dispatch unless `transport` is `None`.
fn deliver<S, C, T>(
    messenger: &mut Messenger<S, C>,
    message: &str,
    server: &str,
    transport: Option<&mut T>,
) -> Result<(), MessengerError>
where
    C: Connector<S>,
    T: HttpTransport,
{
    messenger.establish()?;
    messenger.send(message, server)?;
    match transport {
        Some(transport) => messenger.dispatch(transport),
        None => {
            tracing::info!("Dry run: accepted, not dispatched");
            Ok(())
        }
    }
}

fn check(endpoint: &str) -> i32 {
    match endpoint.parse::<Endpoint>() {
        Ok(ep) => {
            let family = if ep.host().is_ipv6() { "IPv6" } else { "IPv4" };
            println!("{ep}: valid {family} endpoint, port {}", ep.port());
            CODE_OK
        }
        Err(e) => {
            println!("{endpoint}: invalid: {e}");
            CODE_INVALID
        }
    }
}
