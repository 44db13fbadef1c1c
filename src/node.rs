use std::net::{SocketAddr, UdpSocket};

use log::info;

use crate::config::NodeConfig;
use crate::dispatcher::{Dispatcher, NodeState};
use crate::interpreter::interpret;
use crate::store::Store;
use crate::thread_pool::{SharedQueueThreadPool, ThreadPool};
use crate::{NodeError, Result};

/// A key-value node answering text commands over UDP.
///
/// The store is created empty when the node starts and is discarded when
/// the node is dropped. Dropping a running node shuts it down.
pub struct Node {
    store: Store,
    dispatcher: Dispatcher,
}

impl Node {
    /// Binds `host:port` and starts serving with the default configuration.
    pub fn start(host: &str, port: u16) -> Result<Node> {
        Node::start_with_config(host, port, NodeConfig::default())
    }

    /// Binds `host:port` and starts serving on a shared-queue thread pool.
    pub fn start_with_config(host: &str, port: u16, config: NodeConfig) -> Result<Node> {
        let pool = SharedQueueThreadPool::new(config.workers)?;
        Node::start_with_pool(host, port, config, pool)
    }

    /// Binds `host:port` and starts serving on the given thread pool.
    ///
    /// # Errors
    ///
    /// Returns `NodeError::Bind` if the host cannot be resolved or the
    /// address cannot be bound.
    pub fn start_with_pool<P>(host: &str, port: u16, config: NodeConfig, pool: P) -> Result<Node>
    where
        P: ThreadPool + Send + 'static,
    {
        let socket = UdpSocket::bind((host, port)).map_err(|source| NodeError::Bind {
            addr: format!("{host}:{port}"),
            source,
        })?;

        let store = Store::new();
        let handler_store = store.clone();
        let dispatcher = Dispatcher::start(
            socket,
            pool,
            move |line: &str| interpret(line, &handler_store),
            &config,
        )?;
        info!(
            "Node started on {} with {} workers",
            dispatcher.local_addr(),
            config.workers
        );

        Ok(Node { store, dispatcher })
    }

    /// The address the node is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.dispatcher.local_addr()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> NodeState {
        self.dispatcher.state()
    }

    /// The node's store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Stops accepting datagrams and drains in-flight handlers.
    ///
    /// See [`Dispatcher::shutdown`].
    pub fn shutdown(&mut self) {
        self.dispatcher.shutdown();
    }
}
