// SPDX-License-Identifier: Apache-2.0 OR MIT

//! M2PA (MTP2 Peer-to-Peer Adaptation) unwrap.
//!
//! Fixed 17-byte header; only the Data message (class 11, type 1)
//! carries an MTP3 payload.
//!
//! ```text
//! version(1) spare(1) messageClass(1) messageType(1) length(4)
//! unused(1) bsn(3) unused(1) fsn(3) priority(1)
//! ```

use crate::constants::{MSG_CLASS_TRANSFER, MSG_TYPE_DATA};
use crate::error::DecodeError;

const HEADER_LEN: usize = 17;
const LAYER: &str = "m2pa";

/// Unwrap an M2PA frame, returning the MTP3 payload that follows the
/// fixed header when this is a Data message.
pub fn unwrap_m2pa(data: &[u8]) -> Result<Option<&[u8]>, DecodeError> {
    if data.len() < HEADER_LEN {
        return Err(DecodeError::truncated(LAYER, "header"));
    }

    let message_class = data[2];
    let message_type = data[3];
    if message_class != MSG_CLASS_TRANSFER || message_type != MSG_TYPE_DATA {
        return Ok(None);
    }

    Ok(Some(&data[HEADER_LEN..]))
}
