//! Control link for a remote audio-synthesis server.
//!
//! This is the "just works" layer: resolve the server's address, connect,
//! then drive it with high-level commands such as creating synths, setting
//! node controls, and freeing nodes. Commands are encoded as OSC messages
//! and sent over UDP, individually or batched into time-tagged bundles.
//!
//! Everything is fire-and-forget. Replies are never read and nothing is
//! retried; a single [`Server`] handle is meant to be driven from one
//! thread.

pub mod command;
pub mod error;
pub mod server;

pub use error::{ClientError, Result};
pub use server::{Server, FIRST_NODE_ID};

pub use sclink_osc::{Bundle, Message, OscArg, TimeTag};
