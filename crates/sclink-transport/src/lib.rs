//! UDP datagram transport for synthesis-server control.
//!
//! The lowest layer of sclink: resolves `host:port` address strings and
//! provides [`UdpChannel`], a socket connected to a single peer where each
//! `write` transmits exactly one datagram. Reliable enough for LAN control
//! traffic; there is deliberately no retry or acknowledgment here.

pub mod error;
pub mod udp;

pub use error::{Result, TransportError};
pub use udp::{resolve, UdpChannel};
