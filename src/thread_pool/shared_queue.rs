use std::panic::{self, AssertUnwindSafe};
use std::thread;

use crossbeam::channel::{self, Receiver, Sender};
use log::{debug, error};

use super::ThreadPool;
use crate::{NodeError, Result};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A fixed set of workers pulling jobs from one shared queue.
///
/// The queue is unbounded, so `spawn` never blocks the caller. A job that
/// panics is logged and the worker moves on to the next one. Dropping the
/// pool closes the queue; workers finish what is already queued, then exit.
pub struct SharedQueueThreadPool {
    tx: Sender<Job>,
}

impl ThreadPool for SharedQueueThreadPool {
    fn new(threads: u32) -> Result<Self> {
        if threads == 0 {
            return Err(NodeError::InvalidPoolSize);
        }
        let (tx, rx) = channel::unbounded::<Job>();

        for id in 0..threads {
            spawn_worker(id, rx.clone())?;
        }

        Ok(SharedQueueThreadPool { tx })
    }

    fn spawn<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        // Workers hold the receiving side until the pool is dropped.
        if self.tx.send(Box::new(job)).is_err() {
            error!("Thread pool has no workers left, job dropped");
        }
    }
}

fn spawn_worker(id: u32, rx: Receiver<Job>) -> Result<()> {
    thread::Builder::new()
        .name(format!("kvnode-worker-{id}"))
        .spawn(move || {
            for job in rx.iter() {
                if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                    error!("Worker {id}: handler panicked, continuing");
                }
            }
            debug!("Worker {id}: queue closed, exiting");
        })?;
    Ok(())
}
