use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;

use crate::{NodeError, Result};

/// Default time to wait for a response datagram.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

const MAX_DATAGRAM: usize = 65_507;

/// A client sending commands to a node, one datagram per request.
pub struct NodeClient {
    socket: UdpSocket,
}

impl NodeClient {
    /// Opens a socket connected to the node at the given address.
    ///
    /// Only datagrams coming from that address are accepted as responses.
    pub fn connect(addr: impl ToSocketAddrs) -> Result<Self> {
        let server = addr.to_socket_addrs()?.next().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "no address to connect to")
        })?;
        let local = match server {
            SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
        };

        let socket = UdpSocket::bind(local)?;
        socket.connect(server)?;
        socket.set_read_timeout(Some(DEFAULT_TIMEOUT))?;
        Ok(Self { socket })
    }

    /// Changes how long to wait for each response.
    pub fn set_timeout(&self, timeout: Duration) -> Result<()> {
        self.socket.set_read_timeout(Some(timeout))?;
        Ok(())
    }

    /// Sends a raw request line and returns the response text.
    ///
    /// # Errors
    ///
    /// Returns `NodeError::Timeout` if no response arrives in time.
    pub fn request(&self, line: &str) -> Result<String> {
        self.socket.send(line.as_bytes())?;

        let mut buf = vec![0; MAX_DATAGRAM];
        let len = self.socket.recv(&mut buf).map_err(|e| match e.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => NodeError::Timeout,
            _ => NodeError::Io(e),
        })?;
        Ok(String::from_utf8_lossy(&buf[..len]).into_owned())
    }

    /// Sets a key-value pair.
    pub fn put(&self, key: &str, value: &str) -> Result<String> {
        self.request(&format!("PUT {key} {value}"))
    }

    /// Gets the value of a key.
    pub fn get(&self, key: &str) -> Result<String> {
        self.request(&format!("GET {key}"))
    }

    /// Removes a key.
    pub fn delete(&self, key: &str) -> Result<String> {
        self.request(&format!("DELETE {key}"))
    }
}
