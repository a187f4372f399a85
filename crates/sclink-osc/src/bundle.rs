use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::Result;
use crate::message::Message;

/// NTP-format OSC time tag: seconds since 1900 in the high 32 bits,
/// fractional seconds in the low 32.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeTag(u64);

impl TimeTag {
    /// The reserved "execute on receipt" tag.
    pub const IMMEDIATE: TimeTag = TimeTag(1);

    /// Seconds between the NTP epoch (1900) and the Unix epoch (1970).
    const NTP_UNIX_OFFSET: u64 = 2_208_988_800;

    /// Wrap a raw 64-bit tag value.
    pub fn from_raw(raw: u64) -> Self {
        TimeTag(raw)
    }

    /// The raw 64-bit tag value.
    pub fn raw(self) -> u64 {
        self.0
    }

    /// Tag for an absolute wall-clock instant. Instants before the Unix
    /// epoch collapse to [`TimeTag::IMMEDIATE`].
    pub fn from_system_time(t: SystemTime) -> Self {
        match t.duration_since(UNIX_EPOCH) {
            Ok(d) => {
                let secs = d.as_secs() + Self::NTP_UNIX_OFFSET;
                let frac = (u64::from(d.subsec_nanos()) << 32) / 1_000_000_000;
                TimeTag((secs << 32) | frac)
            }
            Err(_) => TimeTag::IMMEDIATE,
        }
    }
}

/// An ordered set of messages dispatched as one packet.
///
/// The server executes the contents atomically at the bundle's time tag;
/// [`TimeTag::IMMEDIATE`] means on receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    time: TimeTag,
    messages: Vec<Message>,
}

impl Bundle {
    /// Create an empty bundle for the given dispatch time.
    pub fn new(time: TimeTag) -> Self {
        Self {
            time,
            messages: Vec::new(),
        }
    }

    /// Append a message. Server-side execution order follows insertion
    /// order.
    pub fn message(mut self, msg: Message) -> Self {
        self.messages.push(msg);
        self
    }

    /// The dispatch time tag.
    pub fn time(&self) -> TimeTag {
        self.time
    }

    /// The bundled messages, in dispatch order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Encode this bundle into `dst`.
    ///
    /// Wire layout: `#bundle\0`, the 8-byte time tag, then each message
    /// prefixed with its big-endian 32-bit byte count. On error `dst` may
    /// hold a partial packet; [`Bundle::to_bytes`] discards it.
    pub fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        dst.put_slice(b"#bundle\0");
        dst.put_u64(self.time.raw());
        for msg in &self.messages {
            let encoded = msg.to_bytes()?;
            dst.put_i32(encoded.len() as i32);
            dst.put_slice(&encoded);
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
    use crate::error::OscError;

    #[test]
    fn empty_bundle_is_header_and_tag() {
        let bytes = Bundle::new(TimeTag::IMMEDIATE).to_bytes().unwrap();
        let mut expected = b"#bundle\0".to_vec();
        expected.extend_from_slice(&1u64.to_be_bytes());
        assert_eq!(bytes.as_ref(), expected.as_slice());
    }

    #[test]
    fn elements_are_size_prefixed_in_order() {
        let first = Message::new("/n_free").arg(1000);
        let second = Message::new("/quit");
        let bundle = Bundle::new(TimeTag::IMMEDIATE)
            .message(first.clone())
            .message(second.clone());

        let bytes = bundle.to_bytes().unwrap();
        let first_bytes = first.to_bytes().unwrap();
        let second_bytes = second.to_bytes().unwrap();

        let mut expected = b"#bundle\0".to_vec();
        expected.extend_from_slice(&1u64.to_be_bytes());
        expected.extend_from_slice(&(first_bytes.len() as i32).to_be_bytes());
        expected.extend_from_slice(&first_bytes);
        expected.extend_from_slice(&(second_bytes.len() as i32).to_be_bytes());
        expected.extend_from_slice(&second_bytes);
        assert_eq!(bytes.as_ref(), expected.as_slice());
    }

    #[test]
    fn bad_message_fails_whole_bundle() {
        let bundle = Bundle::new(TimeTag::IMMEDIATE).message(Message::new("no-slash"));
        assert!(matches!(
            bundle.to_bytes(),
            Err(OscError::InvalidAddress(_))
        ));
    }

    #[test]
    fn time_tag_from_system_time_is_past_ntp_offset() {
        let tag = TimeTag::from_system_time(SystemTime::now());
        let secs = tag.raw() >> 32;
        assert!(secs > TimeTag::NTP_UNIX_OFFSET);
    }

    #[test]
    fn time_tag_fraction_scales_nanos() {
        let t = UNIX_EPOCH + std::time::Duration::new(1_700_000_000, 500_000_000);
        let tag = TimeTag::from_system_time(t);
        let frac = tag.raw() & 0xFFFF_FFFF;
        // Half a second is half the 32-bit fraction range.
        assert!((frac as i64 - 0x8000_0000i64).abs() < 8);
    }

    #[test]
    fn write_to_reports_packet_length() {
        let bundle = Bundle::new(TimeTag::IMMEDIATE).message(Message::new("/quit"));
        let mut sink = Vec::new();
        let written = bundle.write_to(&mut sink).unwrap();
        assert_eq!(written, sink.len());
        assert!(sink.starts_with(b"#bundle\0"));
    }
}
