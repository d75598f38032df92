// SPDX-License-Identifier: Apache-2.0 OR MIT

//! ROS (Remote Operations Service, ITU-T X.880) component unwrap.
//!
//! Invoke and ReturnResult components are the only two kinds this
//! cascade cares about; everything else is ignored. A malformed
//! component is skipped rather than failing the whole packet — unlike
//! the layers above, ROS components are independent of one another.

use crate::ber::{integer, read_tlv};
use crate::constants::{ROS_TAG_INVOKE, ROS_TAG_RETURN_RESULT};

const LAYER: &str = "ros";

/// One decoded ROS component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosInfo {
    pub kind: RosKind,
    pub invoke_id: i64,
    /// -1 for ReturnResult, which carries no opCode.
    pub op_code: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosKind {
    Invoke,
    Result,
}

/// Decode the ROS components field into a list of [`RosInfo`], in
/// encountered order. Returns an empty list for empty input.
pub fn decode_ros(data: &[u8]) -> Vec<RosInfo> {
    let mut infos = Vec::new();
    let mut rest = data;

    while !rest.is_empty() {
        let (tlv, remainder) = match read_tlv(LAYER, rest) {
            Ok(v) => v,
            Err(_) => break, // malformed entry: stop, keep what we have
        };
        rest = remainder;

        let decoded = match tlv.tag {
            t if t == ROS_TAG_INVOKE => decode_invoke(tlv.content),
            t if t == ROS_TAG_RETURN_RESULT => decode_result(tlv.content),
            _ => None,
        };
        if let Some(info) = decoded {
            infos.push(info);
        }
    }

    infos
}

fn decode_invoke(content: &[u8]) -> Option<RosInfo> {
    let (invoke_id_tlv, rest) = read_tlv(LAYER, content).ok()?;
    let invoke_id = integer(invoke_id_tlv.content)?;
    let (op_code_tlv, _) = read_tlv(LAYER, rest).ok()?;
    let op_code = integer(op_code_tlv.content)?;
    Some(RosInfo {
        kind: RosKind::Invoke,
        invoke_id,
        op_code,
    })
}

fn decode_result(content: &[u8]) -> Option<RosInfo> {
    let (invoke_id_tlv, _) = read_tlv(LAYER, content).ok()?;
    let invoke_id = integer(invoke_id_tlv.content)?;
    Some(RosInfo {
        kind: RosKind::Result,
        invoke_id,
        op_code: -1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ber_tlv(tag_byte: u8, content: &[u8]) -> Vec<u8> {
        let mut out = vec![tag_byte, content.len() as u8];
        out.extend_from_slice(content);
        out
    }

    #[test]
    fn empty_components_yield_empty_list() {
        assert!(decode_ros(&[]).is_empty());
    }

    #[test]
    fn decodes_invoke_component() {
        let integer_5 = ber_tlv(0x02, &[5]);
        let integer_12 = ber_tlv(0x02, &[12]);
        let mut invoke_content = Vec::new();
        invoke_content.extend(integer_5);
        invoke_content.extend(integer_12);
        let invoke = ber_tlv(0x01, &invoke_content); // tag 1 = Invoke

        let infos = decode_ros(&invoke);
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].kind, RosKind::Invoke);
        assert_eq!(infos[0].invoke_id, 5);
        assert_eq!(infos[0].op_code, 12);
    }

    #[test]
    fn decodes_result_component_with_op_code_negative_one() {
        let integer_7 = ber_tlv(0x02, &[7]);
        let result = ber_tlv(0x02, &integer_7); // tag 2 = ReturnResult

        let infos = decode_ros(&result);
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].kind, RosKind::Result);
        assert_eq!(infos[0].invoke_id, 7);
        assert_eq!(infos[0].op_code, -1);
    }

    #[test]
    fn ignores_unknown_tags() {
        let unknown = ber_tlv(0x1F, &[0x01]);
        assert!(decode_ros(&unknown).is_empty());
    }

    #[test]
    fn malformed_entry_does_not_panic() {
        let truncated = vec![0x01, 0x10]; // claims 16 bytes, has none
        assert!(decode_ros(&truncated).is_empty());
    }
}
