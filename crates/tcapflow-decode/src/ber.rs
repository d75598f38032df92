// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thin raw-TLV helpers over `asn1-rs`.
//!
//! TCAP/ROS decoding only ever needs the tag and content bytes of each
//! BER value, never a schema-driven decode — the dialogue portion in
//! particular is captured and deliberately left unparsed. `asn1_rs::Any`
//! exposes exactly that: tag, length and raw content with no type
//! binding.

use asn1_rs::{Any, FromBer};

use crate::error::DecodeError;

pub(crate) struct Tlv<'a> {
    pub tag: u32,
    pub content: &'a [u8],
}

/// Read one raw TLV off the front of `data`, returning it and the
/// unconsumed remainder.
pub(crate) fn read_tlv<'a>(layer: &'static str, data: &'a [u8]) -> Result<(Tlv<'a>, &'a [u8]), DecodeError> {
    let (rest, any) = Any::from_ber(data).map_err(|_| DecodeError::malformed_ber(layer, "TLV"))?;
    let tag = any.header.tag().0;
    let content = any.data.as_ref();
    Ok((Tlv { tag, content }, rest))
}

/// Decode a BER INTEGER's content octets (big-endian two's complement).
pub(crate) fn integer(content: &[u8]) -> Option<i64> {
    if content.is_empty() || content.len() > 8 {
        return None;
    }
    let mut value: i64 = if content[0] & 0x80 != 0 { -1 } else { 0 };
    for &byte in content {
        value = (value << 8) | i64::from(byte);
    }
    Some(value)
}
