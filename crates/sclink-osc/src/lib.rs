//! OSC message and bundle encoding.
//!
//! Implements the send side of the OSC 1.0 binary format: typed arguments,
//! address-pattern messages, and time-tagged bundles, all encodable to a
//! byte-exact wire representation. Everything is big-endian and padded to
//! 4-byte boundaries.
//!
//! This crate only encodes. Parsing server replies is out of scope for the
//! control link built on top of it.

pub mod arg;
pub mod bundle;
pub mod error;
pub mod message;

pub use arg::OscArg;
pub use bundle::{Bundle, TimeTag};
pub use error::{OscError, Result};
pub use message::Message;
