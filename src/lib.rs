#![deny(missing_docs)]

//! An in-memory key-value store served over UDP.
//!
//! A [`Node`] binds a datagram socket and answers text commands
//! (`PUT key value`, `GET key`, `DELETE key`), one response datagram per
//! request. Requests are handled concurrently on a bounded thread pool
//! against a shared, concurrency-safe [`Store`].

mod client;
mod common;
mod config;
mod dispatcher;
mod error;
mod interpreter;
mod node;
mod store;
/// Thread pool implementations for concurrent request handling.
pub mod thread_pool;

pub use client::{NodeClient, DEFAULT_TIMEOUT};
pub use common::{Request, Response};
pub use config::NodeConfig;
pub use dispatcher::{Dispatcher, NodeState};
pub use error::{CommandError, NodeError, Result};
pub use interpreter::{execute, interpret};
pub use node::Node;
pub use store::Store;
pub use thread_pool::{RayonThreadPool, SharedQueueThreadPool, ThreadPool};
