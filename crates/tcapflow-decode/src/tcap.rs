// SPDX-License-Identifier: Apache-2.0 OR MIT

//! TCAP (ITU-T Q.773) dialogue portion unwrap.
//!
//! The outer value is a CHOICE whose APPLICATION tag selects the
//! dialogue kind (Begin/End/Continue/Abort); the tag is preserved as-is
//! rather than mapped through a schema. Inside, a flat sequence of TLVs
//! carries the originating/destination transaction IDs, the (unparsed)
//! dialogue portion, and the ROS components.

use crate::ber::read_tlv;
use crate::constants::{TCAP_TAG_COMPONENTS, TCAP_TAG_DTID, TCAP_TAG_OTID};
use crate::error::DecodeError;

const LAYER: &str = "tcap";

/// Decoded TCAP message shell: dialogue kind plus the raw bytes needed
/// by the correlator and the ROS layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcapInfo<'a> {
    /// APPLICATION tag of the outer CHOICE: Begin=2, End=4, Continue=5, Abort=7.
    pub tag: i32,
    /// Originating transaction ID. Empty when absent (e.g. on End).
    pub otid: &'a [u8],
    /// Destination transaction ID. Empty when absent (e.g. on Begin).
    pub dtid: &'a [u8],
    /// Raw ROS components, handed unparsed to [`crate::ros::decode_ros`].
    pub components: &'a [u8],
}

/// Unwrap a TCAP message into its outer tag plus otid/dtid/components.
///
/// Missing tags (no dtid on Begin, no otid on End) are not errors — the
/// corresponding field is simply left empty.
pub fn decode_tcap(data: &[u8]) -> Result<TcapInfo<'_>, DecodeError> {
    let (outer, _) = read_tlv(LAYER, data)?;
    let tag = outer.tag as i32;

    let mut otid: &[u8] = &[];
    let mut dtid: &[u8] = &[];
    let mut components: &[u8] = &[];

    let mut rest = outer.content;
    while !rest.is_empty() {
        let (tlv, remainder) = read_tlv(LAYER, rest)?;
        match tlv.tag {
            t if t == TCAP_TAG_OTID => otid = tlv.content,
            t if t == TCAP_TAG_DTID => dtid = tlv.content,
            t if t == TCAP_TAG_COMPONENTS => components = tlv.content,
            _ => {} // dialogue portion (tag 11) and anything else: ignored
        }
        rest = remainder;
    }

    Ok(TcapInfo {
        tag,
        otid,
        dtid,
        components,
    })
}
