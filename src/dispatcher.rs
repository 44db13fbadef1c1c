use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};
use log::{debug, error, info, warn};

use crate::config::NodeConfig;
use crate::thread_pool::ThreadPool;
use crate::Result;

/// Lifecycle state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Not receiving; either never started or fully shut down.
    Stopped,
    /// The receive loop is accepting datagrams.
    Running,
    /// No new datagrams are accepted; in-flight handlers are draining.
    ShuttingDown,
}

/// A `NodeState` shared between the dispatcher and its receive loop.
struct SharedState(AtomicU8);

impl SharedState {
    fn new(state: NodeState) -> Self {
        SharedState(AtomicU8::new(state as u8))
    }

    fn load(&self) -> NodeState {
        match self.0.load(Ordering::Acquire) {
            1 => NodeState::Running,
            2 => NodeState::ShuttingDown,
            _ => NodeState::Stopped,
        }
    }

    fn store(&self, state: NodeState) {
        self.0.store(state as u8, Ordering::Release);
    }
}

/// Send side of the socket, shared by handlers until shutdown closes it.
///
/// Handlers never hold a socket handle of their own, so emptying the slot
/// releases the address even while abandoned handlers are still running.
#[derive(Clone)]
struct Outbound(Arc<RwLock<Option<UdpSocket>>>);

impl Outbound {
    fn new(socket: UdpSocket) -> Self {
        Outbound(Arc::new(RwLock::new(Some(socket))))
    }

    fn send_to(&self, buf: &[u8], peer: SocketAddr) -> io::Result<usize> {
        match &*self.0.read().unwrap_or_else(PoisonError::into_inner) {
            Some(socket) => socket.send_to(buf, peer),
            None => Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "socket closed by shutdown",
            )),
        }
    }

    /// Drops the socket once no send is in progress.
    fn close(&self) {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

/// Receives request datagrams and answers each one from a thread pool.
///
/// The dispatcher owns a single receive thread. Every datagram it reads is
/// handed to the pool together with the sender's address; the handler's
/// return value is sent back to that address as one datagram.
pub struct Dispatcher {
    local_addr: SocketAddr,
    state: Arc<SharedState>,
    receiver: Option<JoinHandle<()>>,
    outbound: Outbound,
    // Disconnects once every submitted handler has finished.
    in_flight: Receiver<()>,
    grace_period: Duration,
}

impl Dispatcher {
    /// Starts serving on an already bound socket.
    ///
    /// `handler` maps a decoded request line to the response line. The pool
    /// is moved into the receive thread and dropped when that thread exits.
    pub fn start<P, H>(socket: UdpSocket, pool: P, handler: H, config: &NodeConfig) -> Result<Self>
    where
        P: ThreadPool + Send + 'static,
        H: Fn(&str) -> String + Send + Sync + 'static,
    {
        let local_addr = socket.local_addr()?;
        let recv_socket = socket.try_clone()?;
        recv_socket.set_read_timeout(Some(config.poll_interval))?;

        let state = Arc::new(SharedState::new(NodeState::Running));
        let outbound = Outbound::new(socket);
        let (tracker, in_flight) = channel::bounded::<()>(0);

        let receive_loop = ReceiveLoop {
            socket: recv_socket,
            outbound: outbound.clone(),
            handler: Arc::new(handler),
            state: state.clone(),
            tracker,
            buffer_size: config.buffer_size,
        };
        let receiver = thread::Builder::new()
            .name("kvnode-receiver".to_owned())
            .spawn(move || receive_loop.run(pool))?;

        info!("Listening on {local_addr}");
        Ok(Dispatcher {
            local_addr,
            state,
            receiver: Some(receiver),
            outbound,
            in_flight,
            grace_period: config.grace_period,
        })
    }

    /// The address the socket is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Current lifecycle state.
    pub fn state(&self) -> NodeState {
        self.state.load()
    }

    /// Stops receiving, waits up to the grace period for in-flight handlers
    /// and closes the socket.
    ///
    /// Handlers still running at the deadline are abandoned; their responses
    /// fail to send. When this returns the address is free to bind again.
    /// Calling it again is a no-op.
    pub fn shutdown(&mut self) {
        let Some(receiver) = self.receiver.take() else {
            return;
        };
        let deadline = Instant::now() + self.grace_period;

        info!("Shutting down {}", self.local_addr);
        self.state.store(NodeState::ShuttingDown);
        if receiver.join().is_err() {
            error!("Receive loop panicked");
        }

        match self.in_flight.recv_deadline(deadline) {
            Err(RecvTimeoutError::Timeout) => warn!(
                "Abandoning handlers still running after {:?}",
                self.grace_period
            ),
            _ => debug!("All handlers finished"),
        }
        self.outbound.close();

        self.state.store(NodeState::Stopped);
        info!("Stopped {}", self.local_addr);
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

struct ReceiveLoop<H> {
    socket: UdpSocket,
    outbound: Outbound,
    handler: Arc<H>,
    state: Arc<SharedState>,
    // Cloned into every handler job; never sent on.
    tracker: Sender<()>,
    buffer_size: usize,
}

impl<H> ReceiveLoop<H>
where
    H: Fn(&str) -> String + Send + Sync + 'static,
{
    fn run<P: ThreadPool>(self, pool: P) {
        let mut buf = vec![0; self.buffer_size];

        while self.state.load() == NodeState::Running {
            match self.socket.recv_from(&mut buf) {
                Ok((len, peer)) => {
                    let payload = buf[..len].to_vec();
                    let outbound = self.outbound.clone();
                    let handler = self.handler.clone();
                    let guard = self.tracker.clone();
                    pool.spawn(move || {
                        let _guard = guard;
                        handle_datagram(&outbound, &*handler, &payload, peer);
                    });
                }
                Err(e) if is_poll_timeout(&e) => {}
                Err(e) if self.state.load() == NodeState::Running => {
                    error!("Error receiving datagram: {e}");
                }
                Err(e) => debug!("Receive interrupted by shutdown: {e}"),
            }
        }
        debug!("Receive loop exited");
    }
}

/// A read timeout surfaces as `WouldBlock` on Unix and `TimedOut` on Windows.
fn is_poll_timeout(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}

fn handle_datagram<H>(outbound: &Outbound, handler: &H, payload: &[u8], peer: SocketAddr)
where
    H: Fn(&str) -> String,
{
    let line = String::from_utf8_lossy(payload);
    debug!("Received {} bytes from {peer}", payload.len());

    let response = handler(&line);
    if let Err(e) = outbound.send_to(response.as_bytes(), peer) {
        error!("Error sending response to {peer}: {e}");
    }
}
