/// Errors that can occur while encoding OSC packets.
#[derive(Debug, thiserror::Error)]
pub enum OscError {
    /// The message address is empty or does not start with `/`.
    #[error("invalid OSC address {0:?} (must start with '/')")]
    InvalidAddress(String),

    /// A string contains an embedded NUL and cannot be wire-encoded.
    #[error("string contains embedded NUL: {0:?}")]
    UnencodableString(String),

    /// An I/O error occurred while writing an encoded packet.
    #[error("OSC I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OscError>;
