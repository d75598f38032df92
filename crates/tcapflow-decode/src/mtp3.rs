// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MTP3 (ITU-T Q.704) service-information unwrap.
//!
//! Only the 5-byte service-information-octet + routing-label header is
//! inspected; only traffic carrying SCCP (service indicator 3) is
//! handed further down the cascade.

use crate::constants::MTP3_SERVICE_SCCP;
use crate::error::DecodeError;

const HEADER_LEN: usize = 5;
const LAYER: &str = "mtp3";

/// Unwrap an MTP3 frame, returning the SCCP payload when the service
/// indicator selects SCCP.
pub fn unwrap_mtp3(data: &[u8]) -> Result<Option<&[u8]>, DecodeError> {
    if data.len() < HEADER_LEN {
        return Err(DecodeError::truncated(LAYER, "header"));
    }

    let service = data[0] & 0x0F;
    if service != MTP3_SERVICE_SCCP {
        return Ok(None);
    }

    Ok(Some(&data[HEADER_LEN..]))
}
