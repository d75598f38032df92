// SPDX-License-Identifier: Apache-2.0 OR MIT

//! M3UA (MTP3 User Adaptation, RFC 4666) unwrap.
//!
//! Fixed 8-byte header, followed by a TLV parameter list padded to
//! 4-byte boundaries. Only the Data message (class 11, type 1) carries
//! user traffic; everything else is ignored by this cascade.
//!
//! ```text
//! 0                   1                   2                   3
//! 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +---------------+---------------+---------------+---------------+
//! |    version    |    reserved   | message class | message type  |
//! +---------------+---------------+---------------+---------------+
//! |                      message length                          |
//! +---------------------------------------------------------------+
//! |  parameters (tag:2 length:2 value:length-4, padded to 4 bytes) |
//! +---------------------------------------------------------------+
//! ```

use crate::constants::{M3UA_ROUTING_LABEL_LEN, M3UA_TAG_PROTOCOL_DATA, MSG_CLASS_TRANSFER, MSG_TYPE_DATA};
use crate::error::DecodeError;

const HEADER_LEN: usize = 8;
const LAYER: &str = "m3ua";

/// Unwrap an M3UA frame, returning the SCCP payload carried in the
/// Protocol Data parameter (tag 528) once its 12-byte routing label is
/// stripped.
///
/// Returns `Ok(None)` for any message that is not Data class/type — the
/// cascade has nothing further to do with it, and that is not an error.
pub fn unwrap_m3ua(data: &[u8]) -> Result<Option<&[u8]>, DecodeError> {
    if data.len() < HEADER_LEN {
        return Err(DecodeError::truncated(LAYER, "header"));
    }

    let message_class = data[2];
    let message_type = data[3];
    if message_class != MSG_CLASS_TRANSFER || message_type != MSG_TYPE_DATA {
        return Ok(None);
    }

    let mut offset = HEADER_LEN;
    while offset + 4 <= data.len() {
        let tag = u16::from_be_bytes([data[offset], data[offset + 1]]);
        let length = u16::from_be_bytes([data[offset + 2], data[offset + 3]]) as usize;
        if length < 4 {
            return Err(DecodeError::malformed_ber(LAYER, "parameter length < 4"));
        }
        let value_start = offset + 4;
        let value_end = value_start + (length - 4);
        if value_end > data.len() {
            return Err(DecodeError::truncated(LAYER, "parameter value"));
        }
        let value = &data[value_start..value_end];

        if tag == M3UA_TAG_PROTOCOL_DATA {
            if value.len() < M3UA_ROUTING_LABEL_LEN {
                return Err(DecodeError::truncated(LAYER, "protocol data routing label"));
            }
            return Ok(Some(&value[M3UA_ROUTING_LABEL_LEN..]));
        }

        // advance past the padded parameter to the next TLV
        offset = value_end;
        let padded = (offset + 3) & !3;
        offset = padded;
    }

    Ok(None)
}
