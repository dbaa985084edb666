use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use docserve::application::ServerData;
use docserve::config::{ServerConfig, DEFAULT_LOG_PATH, DEFAULT_POOL_SIZE, DEFAULT_SERVER_NAME};
use docserve::domain::log_entry::Clock;
use docserve::infrastructure::init_logging;
use docserve::infrastructure::server_impl::server::serve;
use docserve::AnyResult;

/// Serves the files under a document root over a one-request-per-connection
/// subset of HTTP/1.1.
#[derive(Debug, Parser)]
#[command(name = "docserve", version)]
struct Cli {
    /// Directory request paths are appended to
    document_root: String,

    /// TCP port to listen on
    port: u16,

    /// Number of connections served at the same time
    #[arg(long, env = "DOCSERVE_POOL_SIZE", default_value_t = DEFAULT_POOL_SIZE)]
    pool_size: usize,

    /// Connections allowed to wait for a worker before accepting pauses
    /// (unbounded when unset)
    #[arg(long, env = "DOCSERVE_QUEUE_BOUND")]
    queue_bound: Option<usize>,

    /// Value of the `Server` response header
    #[arg(long, env = "DOCSERVE_SERVER_NAME", default_value = DEFAULT_SERVER_NAME)]
    server_name: String,

    /// Request log, appended to
    #[arg(long, env = "DOCSERVE_LOG_PATH", default_value = DEFAULT_LOG_PATH)]
    log_path: PathBuf,
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        let mut config = ServerConfig::new(cli.document_root, cli.port);
        config.pool_size = cli.pool_size;
        config.queue_bound = cli.queue_bound;
        config.server_name = cli.server_name.into();
        config.log_path = cli.log_path;
        config
    }
}

fn main() -> ExitCode {
    // the local offset can only be read while we are still single threaded
    let clock = Clock::local();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
    };

    if let Err(e) = init_logging() {
        eprintln!("could not set up logging: {e}");
    }

    match run(cli.into(), clock) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: ServerConfig, clock: Clock) -> AnyResult<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let data = ServerData::new(config, clock);
    match runtime.block_on(serve(data))? {}
}
