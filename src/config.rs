use std::time::Duration;

/// Default number of handler threads.
pub const DEFAULT_WORKERS: u32 = 10;
/// Default time `shutdown` waits for in-flight handlers.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(5);
/// Default receive buffer; longer datagrams are truncated.
pub const DEFAULT_BUFFER_SIZE: usize = 1024;
/// Default receive timeout between checks of the node state.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Tunables for a running node.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Number of handler threads in the pool.
    pub workers: u32,
    /// How long `shutdown` waits for in-flight handlers before abandoning them.
    pub grace_period: Duration,
    /// Size of the receive buffer in bytes.
    pub buffer_size: usize,
    /// How often the receive loop wakes up to check whether it should stop.
    pub poll_interval: Duration,
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig {
            workers: DEFAULT_WORKERS,
            grace_period: DEFAULT_GRACE_PERIOD,
            buffer_size: DEFAULT_BUFFER_SIZE,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}
