use std::net::SocketAddr;

/// Errors that can occur on the datagram transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The server address string failed to resolve.
    #[error("failed to resolve {addr:?}: {source}")]
    Resolve {
        addr: String,
        source: std::io::Error,
    },

    /// Resolution succeeded but yielded no usable address.
    #[error("no usable address for {addr:?}")]
    NoAddress { addr: String },

    /// Failed to bind a local UDP socket.
    #[error("failed to bind local UDP socket: {0}")]
    Bind(std::io::Error),

    /// Failed to connect the socket to the peer.
    #[error("failed to connect to {peer}: {source}")]
    Connect {
        peer: SocketAddr,
        source: std::io::Error,
    },

    /// An I/O error occurred on the channel.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;
