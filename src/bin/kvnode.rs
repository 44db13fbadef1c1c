use std::process::exit;
use std::thread;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::{error, info};

use kvnode::{Node, NodeConfig, RayonThreadPool, Result, SharedQueueThreadPool, ThreadPool};

#[derive(Parser)]
#[command(name = "kvnode", version, about = "A key-value store node served over UDP")]
struct Cli {
    /// Host or IP address to bind
    host: String,

    /// UDP port to bind
    port: u16,

    /// Number of handler threads
    #[arg(long, default_value_t = NodeConfig::default().workers)]
    workers: u32,

    /// Milliseconds to wait for in-flight requests on shutdown
    #[arg(long, value_name = "MS", default_value_t = 5000)]
    grace_ms: u64,

    /// Receive buffer size; longer datagrams are truncated
    #[arg(long, value_name = "BYTES", default_value_t = NodeConfig::default().buffer_size)]
    buffer_size: usize,

    /// Thread pool implementation
    #[arg(long, value_enum, default_value_t = PoolKind::Shared)]
    pool: PoolKind,
}

#[derive(Clone, Copy, ValueEnum)]
enum PoolKind {
    /// Fixed workers on a shared crossbeam queue
    Shared,
    /// rayon's work-stealing pool
    Rayon,
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{e}");
        exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = NodeConfig {
        workers: cli.workers,
        grace_period: Duration::from_millis(cli.grace_ms),
        buffer_size: cli.buffer_size,
        ..NodeConfig::default()
    };

    info!("kvnode {}", env!("CARGO_PKG_VERSION"));

    let node = match cli.pool {
        PoolKind::Shared => {
            let pool = SharedQueueThreadPool::new(config.workers)?;
            Node::start_with_pool(&cli.host, cli.port, config, pool)?
        }
        PoolKind::Rayon => {
            let pool = RayonThreadPool::new(config.workers)?;
            Node::start_with_pool(&cli.host, cli.port, config, pool)?
        }
    };
    info!("Serving on {}", node.local_addr());

    // Signal handling is left to the environment; the node runs until the
    // process is terminated.
    loop {
        thread::park();
    }
}
