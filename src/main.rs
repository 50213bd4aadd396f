use server::{Server, ServerCreationError};
use thiserror::Error;
use tracing::error;

use std::{path::PathBuf, sync::Arc, time::Duration};

use app::{App, AppCreationError};
use omdb::OmdbClient;
use transport::{IsahcTransport, TransportError};

mod app;
mod fetcher;
mod listing;
mod omdb;
mod pagination;
mod query;
mod server;
mod transport;
mod types;

const API_KEY_ENV: &str = "OMDB_API_KEY";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
enum ArgParseError {
    #[error("Unknown arg {0}")]
    UnknownArg(String),
    #[error("No port argument provided")]
    NoPort,
    #[error("Invalid port")]
    InvalidPort(#[source] std::num::ParseIntError),
    #[error("No api key provided, pass --api-key or set OMDB_API_KEY")]
    NoApiKey,
    #[error("Invalid timeout")]
    InvalidTimeout(#[source] std::num::ParseIntError),
}

#[derive(Error, Debug)]
enum RunError {
    #[error("failed to create http transport")]
    Transport(#[from] TransportError),
    #[error("failed to create app")]
    App(#[from] AppCreationError),
    #[error("failed to create server")]
    Server(#[from] ServerCreationError),
    #[error("server stopped")]
    Serve(#[source] std::io::Error),
}

struct Args {
    html_path: Option<PathBuf>,
    port: u16,
    api_key: String,
    timeout: Duration,
}

impl Args {
    fn parse() -> Result<Args, ArgParseError> {
        let mut args = std::env::args();
        let _process_name = args.next();

        let mut html_path = None;
        let mut port = None;
        let mut api_key = None;
        let mut timeout = None;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" => {
                    println!("{}", Self::help());
                    std::process::exit(1);
                }
                "--html-path" => {
                    html_path = args.next().map(Into::into);
                }
                "--port" => {
                    port = args.next().map(|s| s.parse());
                }
                "--api-key" => api_key = args.next(),
                "--timeout" => {
                    timeout = args.next().map(|s| s.parse());
                }
                _ => {
                    return Err(ArgParseError::UnknownArg(arg));
                }
            }
        }

        let port = port
            .ok_or(ArgParseError::NoPort)?
            .map_err(ArgParseError::InvalidPort)?;

        let api_key = api_key
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|k| !k.trim().is_empty())
            .ok_or(ArgParseError::NoApiKey)?;

        let timeout_secs = timeout
            .transpose()
            .map_err(ArgParseError::InvalidTimeout)?
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let ret = Args {
            html_path,
            port,
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        };

        Ok(ret)
    }

    fn help() -> String {
        let process_name = std::env::args()
            .next()
            .unwrap_or_else(|| "movie-finder".to_string());

        format!(
            "Browse movies and series from OMDb\n\
                \n\
                Usage: {process_name} [ARGS]\n\
                \n\
                Args:\n\
                --help: Show this help\n\
                --html-path: Optional path to filesystem to serve html files from. Useful for \
                debugging\n\
                --api-key: OMDb api key, falls back to ${API_KEY_ENV}\n\
                --timeout: Request timeout in seconds, defaults to {DEFAULT_TIMEOUT_SECS}\n\
                --port: Port to serve UI on\n\
                "
        )
    }
}

fn run(args: Args) -> Result<(), RunError> {
    let transport = IsahcTransport::new(args.timeout)?;
    let client = OmdbClient::new(args.api_key, Arc::new(transport));
    let app = App::new(types::default_featured_categories(), client)?;
    let server = Server::new(args.html_path.as_deref(), app)?;
    futures::executor::block_on(server.serve(args.port)).map_err(RunError::Serve)
}

fn main() {
    tracing_subscriber::fmt::init();

    let args = match Args::parse() {
        Ok(v) => v,
        Err(e) => {
            println!("{}", e);
            println!();
            println!("{}", Args::help());
            return;
        }
    };

    if let Err(e) = run(args) {
        error!("{e}");
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            error!("caused by: {cause}");
            source = std::error::Error::source(cause);
        }
        std::process::exit(1);
    }
}
