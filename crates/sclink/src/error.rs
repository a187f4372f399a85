use sclink_osc::OscError;
use sclink_transport::TransportError;

/// Errors that can occur on the control link.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level error (resolution, socket setup, datagram I/O).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Packet encoding error.
    #[error("encoding error: {0}")]
    Osc(#[from] OscError),

    /// `connect` was called while a link is already open.
    #[error("already connected to server")]
    AlreadyConnected,

    /// The operation requires an open link.
    #[error("not connected to server")]
    NotConnected,

    /// A control list meant as key/value pairs had an odd number of
    /// entries.
    #[error("{command} expects key/value control pairs, got {len} entries")]
    OddControlList { command: &'static str, len: usize },
}

pub type Result<T> = std::result::Result<T, ClientError>;
