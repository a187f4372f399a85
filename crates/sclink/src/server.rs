use std::io::Write;
use std::net::SocketAddr;

use sclink_osc::{Bundle, Message, OscArg};
use sclink_transport::{resolve, TransportError, UdpChannel};
use tracing::{debug, trace};

use crate::command;
use crate::error::{ClientError, Result};

/// First node id handed out by a fresh [`Server`].
///
/// Ids below this are left to the server's own root group and to callers
/// that manage ids by hand.
pub const FIRST_NODE_ID: i32 = 1000;

// Placement is fixed: new nodes go to the head of the root group.
const ADD_TO_HEAD: i32 = 0;
const ROOT_GROUP: i32 = 0;

/// Handle to a remote synthesis server.
///
/// Owns the resolved server address, the optional datagram link, and the
/// node-id allocator. Not internally synchronized — drive one handle from
/// one thread, or serialize access externally.
#[derive(Debug)]
pub struct Server {
    addr: SocketAddr,
    link: Option<UdpChannel>,
    next_node_id: i32,
}

impl Server {
    /// Resolve `addr` (`host:port`) and create an unconnected handle.
    pub fn new(addr: &str) -> Result<Self> {
        let addr = resolve(addr)?;
        Ok(Self {
            addr,
            link: None,
            next_node_id: FIRST_NODE_ID,
        })
    }

    /// The resolved server address.
    pub fn peer_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Whether a link to the server is currently open.
    pub fn is_connected(&self) -> bool {
        self.link.is_some()
    }

    /// Open the datagram link to the server.
    ///
    /// Fails with [`ClientError::AlreadyConnected`] if a link is open; the
    /// existing link is left untouched.
    pub fn connect(&mut self) -> Result<()> {
        if self.link.is_some() {
            return Err(ClientError::AlreadyConnected);
        }
        let link = UdpChannel::connect(self.addr)?;
        debug!(peer = %self.addr, "connected to synthesis server");
        self.link = Some(link);
        Ok(())
    }

    /// Close the link to the server.
    ///
    /// Fails with [`ClientError::NotConnected`] if no link is open. On
    /// success the handle returns to the unconnected state and can connect
    /// again later.
    pub fn disconnect(&mut self) -> Result<()> {
        if self.link.take().is_none() {
            return Err(ClientError::NotConnected);
        }
        debug!(peer = %self.addr, "disconnected from synthesis server");
        Ok(())
    }

    /// Encode `msg` and send it as one datagram.
    ///
    /// Fails with [`ClientError::NotConnected`] before any encoding or I/O
    /// when no link is open.
    pub fn send_message(&mut self, msg: &Message) -> Result<()> {
        let link = self.link.as_mut().ok_or(ClientError::NotConnected)?;
        let packet = msg.to_bytes()?;
        link.write_all(&packet).map_err(TransportError::Io)?;
        trace!(address = msg.address(), bytes = packet.len(), "sent message");
        Ok(())
    }

    /// Encode `bundle` and send it as one datagram.
    ///
    /// Same contract as [`Server::send_message`].
    pub fn send_bundle(&mut self, bundle: &Bundle) -> Result<()> {
        let link = self.link.as_mut().ok_or(ClientError::NotConnected)?;
        let packet = bundle.to_bytes()?;
        link.write_all(&packet).map_err(TransportError::Io)?;
        trace!(
            messages = bundle.messages().len(),
            bytes = packet.len(),
            "sent bundle"
        );
        Ok(())
    }

    /// Toggle the server's echo of received commands.
    pub fn dump_osc(&mut self, enabled: bool) -> Result<()> {
        self.send_message(&Message::new(command::DUMP_OSC).arg(enabled))
    }

    /// Ask the server to print its node tree rooted at `node_id`
    /// (non-verbose).
    pub fn dump_tree(&mut self, node_id: i32) -> Result<()> {
        self.send_message(&Message::new(command::G_DUMP_TREE).arg(node_id).arg(0))
    }

    /// Create a synth from the definition `name` and return its node id.
    ///
    /// `controls` is a flat list of name/value pairs, e.g.
    /// `["freq", 440.0, "amp", 0.2]`. An odd-length list fails with
    /// [`ClientError::OddControlList`] without consuming an id or sending
    /// anything.
    pub fn new_synth(&mut self, name: &str, controls: &[OscArg]) -> Result<i32> {
        let (msg, id) = self.new_synth_msg(name, controls)?;
        self.send_message(&msg)?;
        Ok(id)
    }

    /// Build the synth-creation message without sending it.
    ///
    /// Allocates an id exactly like [`Server::new_synth`]; use this to
    /// batch several commands into one bundle.
    pub fn new_synth_msg(&mut self, name: &str, controls: &[OscArg]) -> Result<(Message, i32)> {
        check_controls(command::S_NEW, controls)?;
        let id = self.alloc_node_id();
        let msg = Message::new(command::S_NEW)
            .arg(name)
            .arg(id)
            .arg(ADD_TO_HEAD)
            .arg(ROOT_GROUP)
            .with_args(controls.iter().cloned());
        Ok((msg, id))
    }

    /// Set named controls on a running node.
    ///
    /// `controls` follows the same pair layout as [`Server::new_synth`].
    pub fn set_node_controls(&mut self, node_id: i32, controls: &[OscArg]) -> Result<()> {
        let msg = self.set_node_controls_msg(node_id, controls)?;
        self.send_message(&msg)
    }

    /// Build the control-set message without sending it.
    pub fn set_node_controls_msg(&self, node_id: i32, controls: &[OscArg]) -> Result<Message> {
        check_controls(command::N_SET, controls)?;
        Ok(Message::new(command::N_SET)
            .arg(node_id)
            .with_args(controls.iter().cloned()))
    }

    /// Release the given node.
    pub fn free_node(&mut self, node_id: i32) -> Result<()> {
        self.send_message(&Message::new(command::N_FREE).arg(node_id))
    }

    /// Create a new group at the head of the root group and return its
    /// node id. Group ids come from the same allocator as synth ids.
    pub fn new_group(&mut self) -> Result<i32> {
        let id = self.alloc_node_id();
        let msg = Message::new(command::G_NEW)
            .arg(id)
            .arg(ADD_TO_HEAD)
            .arg(ROOT_GROUP);
        self.send_message(&msg)?;
        Ok(id)
    }

    /// Free every node inside the given group, leaving the group itself.
    pub fn free_all(&mut self, group_id: i32) -> Result<()> {
        self.send_message(&Message::new(command::G_FREE_ALL).arg(group_id))
    }

    /// Pause (`false`) or resume (`true`) a node.
    pub fn run_node(&mut self, node_id: i32, running: bool) -> Result<()> {
        self.send_message(&Message::new(command::N_RUN).arg(node_id).arg(running))
    }

    /// Drop all bundles the server has scheduled but not yet executed.
    pub fn clear_schedule(&mut self) -> Result<()> {
        self.send_message(&Message::new(command::CLEAR_SCHED))
    }

    /// Ask the server process to exit. The link itself stays open until
    /// [`Server::disconnect`] is called.
    pub fn quit(&mut self) -> Result<()> {
        self.send_message(&Message::new(command::QUIT))
    }

    fn alloc_node_id(&mut self) -> i32 {
        let id = self.next_node_id;
        self.next_node_id += 1;
        id
    }
}

fn check_controls(command: &'static str, controls: &[OscArg]) -> Result<()> {
    if controls.len() % 2 != 0 {
        return Err(ClientError::OddControlList {
            command,
            len: controls.len(),
        });
    }
    Ok(())
}
