use log::error;

use super::ThreadPool;
use crate::{NodeError, Result};

/// A thread pool backed by the `rayon` library.
///
/// Jobs that panic are logged by the pool's panic handler instead of
/// aborting the process.
pub struct RayonThreadPool {
    pool: rayon::ThreadPool,
}

impl ThreadPool for RayonThreadPool {
    fn new(threads: u32) -> Result<Self> {
        if threads == 0 {
            return Err(NodeError::InvalidPoolSize);
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads as usize)
            .thread_name(|id| format!("kvnode-rayon-{id}"))
            .panic_handler(|_| error!("Handler panicked on rayon worker"))
            .build()
            .map_err(|e| NodeError::Pool(e.to_string()))?;
        Ok(RayonThreadPool { pool })
    }

    fn spawn<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.pool.spawn(job);
    }
}
