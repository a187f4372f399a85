use bytes::{BufMut, BytesMut};

use crate::error::{OscError, Result};

/// A typed OSC argument.
///
/// Only the three types the synthesis-server command set needs are
/// supported: 32-bit integers, 32-bit floats, and strings.
#[derive(Debug, Clone, PartialEq)]
pub enum OscArg {
    Int(i32),
    Float(f32),
    Str(String),
}

impl OscArg {
    /// The OSC type-tag character for this argument.
    pub fn type_tag(&self) -> char {
        match self {
            OscArg::Int(_) => 'i',
            OscArg::Float(_) => 'f',
            OscArg::Str(_) => 's',
        }
    }

    pub(crate) fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        match self {
            OscArg::Int(v) => dst.put_i32(*v),
            OscArg::Float(v) => dst.put_f32(*v),
            OscArg::Str(s) => put_padded_str(s, dst)?,
        }
        Ok(())
    }
}

impl From<i32> for OscArg {
    fn from(v: i32) -> Self {
        OscArg::Int(v)
    }
}

impl From<f32> for OscArg {
    fn from(v: f32) -> Self {
        OscArg::Float(v)
    }
}

impl From<&str> for OscArg {
    fn from(v: &str) -> Self {
        OscArg::Str(v.to_string())
    }
}

impl From<String> for OscArg {
    fn from(v: String) -> Self {
        OscArg::Str(v)
    }
}

impl From<bool> for OscArg {
    fn from(v: bool) -> Self {
        OscArg::Int(i32::from(v))
    }
}

/// Append an OSC string: the bytes, a NUL terminator, then zero padding up
/// to the next 4-byte boundary.
pub(crate) fn put_padded_str(s: &str, dst: &mut BytesMut) -> Result<()> {
    if s.as_bytes().contains(&0) {
        return Err(OscError::UnencodableString(s.to_string()));
    }
    let padded = pad4(s.len() + 1);
    dst.reserve(padded);
    dst.put_slice(s.as_bytes());
    dst.put_bytes(0, padded - s.len());
    Ok(())
}

/// Round `len` up to a multiple of 4.
pub(crate) fn pad4(len: usize) -> usize {
    len.div_ceil(4) * 4
}
