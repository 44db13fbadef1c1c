use crate::Result;

/// A bounded pool of worker threads that handler jobs run on.
///
/// Submitting a job never blocks: jobs that find every worker busy wait in
/// the pool's queue until one frees up.
pub trait ThreadPool {
    /// Creates a new thread pool with the given number of threads.
    ///
    /// # Errors
    ///
    /// Returns an error if `threads` is zero or the workers cannot be started.
    fn new(threads: u32) -> Result<Self>
    where
        Self: Sized;

    /// Queues a job to run on one of the pool's threads.
    fn spawn<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static;
}

mod rayon_pool;
mod shared_queue;

pub use self::rayon_pool::RayonThreadPool;
pub use self::shared_queue::SharedQueueThreadPool;
