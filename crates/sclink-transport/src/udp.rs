use std::io::Write;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};

use tracing::debug;

use crate::error::{Result, TransportError};

/// Resolve a `host:port` address string to a concrete socket address.
///
/// The first resolved address wins; no preference between IPv4 and IPv6
/// beyond the resolver's own ordering.
pub fn resolve(addr: &str) -> Result<SocketAddr> {
    let mut candidates = addr.to_socket_addrs().map_err(|e| TransportError::Resolve {
        addr: addr.to_string(),
        source: e,
    })?;
    candidates.next().ok_or_else(|| TransportError::NoAddress {
        addr: addr.to_string(),
    })
}

/// A UDP socket connected to a single peer.
///
/// Each `write` transmits exactly one datagram; `flush` is a no-op.
/// Dropping the channel closes the socket. The channel is exclusively
/// owned: there is no cloning and no sharing.
pub struct UdpChannel {
    socket: UdpSocket,
    peer: SocketAddr,
}

impl UdpChannel {
    /// Bind an ephemeral local port and connect it to `peer`.
    pub fn connect(peer: SocketAddr) -> Result<Self> {
        let socket = match peer {
            SocketAddr::V4(_) => UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)),
            SocketAddr::V6(_) => UdpSocket::bind((Ipv6Addr::UNSPECIFIED, 0)),
        }
        .map_err(TransportError::Bind)?;
        socket
            .connect(peer)
            .map_err(|e| TransportError::Connect { peer, source: e })?;
        debug!(%peer, "datagram channel connected");
        Ok(Self { socket, peer })
    }

    /// The peer this channel is connected to.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// The local address the socket is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.socket.local_addr().map_err(Into::into)
    }
}

impl Write for UdpChannel {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.socket.send(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl std::fmt::Debug for UdpChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UdpChannel").field("peer", &self.peer).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loopback_listener() -> (UdpSocket, SocketAddr) {
        let listener = UdpSocket::bind("127.0.0.1:0").unwrap();
        listener
            .set_read_timeout(Some(std::time::Duration::from_secs(2)))
            .unwrap();
        let addr = listener.local_addr().unwrap();
        (listener, addr)
    }

    #[test]
    fn resolve_numeric_address() {
        let addr = resolve("127.0.0.1:57110").unwrap();
        assert_eq!(addr.port(), 57110);
        assert!(addr.is_ipv4());
    }

    #[test]
    fn resolve_rejects_garbage() {
        let err = resolve("not an address").unwrap_err();
        assert!(matches!(err, TransportError::Resolve { .. }));
    }

    #[test]
    fn resolve_rejects_missing_port() {
        let err = resolve("127.0.0.1").unwrap_err();
        assert!(matches!(err, TransportError::Resolve { .. }));
    }

    #[test]
    fn each_write_is_one_datagram() {
        let (listener, addr) = loopback_listener();
        let mut channel = UdpChannel::connect(addr).unwrap();

        channel.write_all(b"first").unwrap();
        channel.write_all(b"second-datagram").unwrap();

        let mut buf = [0u8; 64];
        let n = listener.recv(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"first");
        let n = listener.recv(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"second-datagram");
    }

    #[test]
    fn connect_records_peer() {
        let (_listener, addr) = loopback_listener();
        let channel = UdpChannel::connect(addr).unwrap();
        assert_eq!(channel.peer_addr(), addr);
        assert_ne!(channel.local_addr().unwrap().port(), 0);
    }
}
