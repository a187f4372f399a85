use std::io::Write;

use bytes::{Bytes, BytesMut};

use crate::arg::{put_padded_str, OscArg};
use crate::error::{OscError, Result};

/// A single OSC command message: an address pattern plus ordered typed
/// arguments.
///
/// Built once per command, then encoded or written as a whole. Argument
/// order is positionally meaningful to the server, so the builder preserves
/// insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    address: String,
    args: Vec<OscArg>,
}

impl Message {
    /// Create a message for the given address pattern (e.g. `/s_new`).
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<OscArg>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a sequence of arguments in order.
    pub fn with_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<OscArg>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The address pattern.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The arguments, in wire order.
    pub fn args(&self) -> &[OscArg] {
        &self.args
    }

    /// Encode this message into `dst`.
    ///
    /// Wire layout: padded address, `,`-prefixed padded type-tag string,
    /// then each argument (big-endian, 4-byte aligned). On error `dst` may
    /// hold a partial packet; [`Message::to_bytes`] discards it.
    pub fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        if !self.address.starts_with('/') {
            return Err(OscError::InvalidAddress(self.address.clone()));
        }
        put_padded_str(&self.address, dst)?;

        let mut tags = String::with_capacity(1 + self.args.len());
        tags.push(',');
        for arg in &self.args {
            tags.push(arg.type_tag());
        }
        put_padded_str(&tags, dst)?;

        for arg in &self.args {
            arg.encode(dst)?;
        }
        Ok(())
    }

    /// Encode into a fresh buffer.
    pub fn to_bytes(&self) -> Result<Bytes> {
        let mut buf = BytesMut::new();
        self.encode(&mut buf)?;
        Ok(buf.freeze())
    }

    /// Encode and write the whole packet to `w` in a single write, so
    /// datagram sinks transmit it as one datagram. Returns bytes written.
    pub fn write_to(&self, w: &mut impl Write) -> Result<usize> {
        let buf = self.to_bytes()?;
        w.write_all(&buf)?;
        Ok(buf.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_no_args() {
        let bytes = Message::new("/quit").to_bytes().unwrap();
        assert_eq!(bytes.as_ref(), b"/quit\0\0\0,\0\0\0");
    }

    #[test]
    fn encode_mixed_args() {
        let msg = Message::new("/s_new")
            .arg("sine")
            .arg(1000)
            .arg(0)
            .arg(0)
            .arg("freq")
            .arg(440.0f32);
        let bytes = msg.to_bytes().unwrap();

        let expected: Vec<u8> = [
            &b"/s_new\0\0"[..],
            b",siiisf\0",
            b"sine\0\0\0\0",
            &1000i32.to_be_bytes(),
            &0i32.to_be_bytes(),
            &0i32.to_be_bytes(),
            b"freq\0\0\0\0",
            &440.0f32.to_be_bytes(),
        ]
        .concat();
        assert_eq!(bytes.as_ref(), expected.as_slice());
    }

    #[test]
    fn address_exactly_filling_pad_gets_own_terminator() {
        // 11 chars + NUL lands exactly on a 4-byte boundary.
        let bytes = Message::new("/g_dumpTree")
            .arg(5)
            .arg(0)
            .to_bytes()
            .unwrap();
        let expected: Vec<u8> = [
            &b"/g_dumpTree\0"[..],
            b",ii\0",
            &5i32.to_be_bytes(),
            &0i32.to_be_bytes(),
        ]
        .concat();
        assert_eq!(bytes.as_ref(), expected.as_slice());
    }

    #[test]
    fn with_args_preserves_order() {
        let msg = Message::new("/n_set")
            .arg(42)
            .with_args([OscArg::from("amp"), OscArg::from(0.5f32)]);
        assert_eq!(
            msg.args(),
            &[
                OscArg::Int(42),
                OscArg::Str("amp".into()),
                OscArg::Float(0.5)
            ]
        );
    }

    #[test]
    fn rejects_address_without_slash() {
        let err = Message::new("s_new").to_bytes().unwrap_err();
        assert!(matches!(err, OscError::InvalidAddress(_)));
    }

    #[test]
    fn rejects_empty_address() {
        let err = Message::new("").to_bytes().unwrap_err();
        assert!(matches!(err, OscError::InvalidAddress(_)));
    }

    #[test]
    fn rejects_string_arg_with_nul() {
        let err = Message::new("/n_set")
            .arg("a\0b")
            .to_bytes()
            .unwrap_err();
        assert!(matches!(err, OscError::UnencodableString(_)));
    }

    #[test]
    fn write_to_reports_packet_length() {
        let msg = Message::new("/dumpOSC").arg(1);
        let mut sink = Vec::new();
        let written = msg.write_to(&mut sink).unwrap();
        assert_eq!(written, sink.len());
        assert_eq!(sink, b"/dumpOSC\0\0\0\0,i\0\0\0\0\0\x01");
    }

    #[test]
    fn encoded_length_is_always_aligned() {
        let msg = Message::new("/n_free").arg(7);
        let bytes = msg.to_bytes().unwrap();
        assert_eq!(bytes.len() % 4, 0);
    }
}
