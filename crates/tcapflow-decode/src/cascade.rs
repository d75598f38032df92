// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Top-level dispatch: SCTP payload protocol identifier through to a
//! fully decoded message, owning its bytes so it can outlive the
//! packet buffer on its way to the probe's normalization step.

use crate::constants::{PPID_M2PA, PPID_M2UA, PPID_M3UA, PPID_SUA};
use crate::error::DecodeError;
use crate::ros::{decode_ros, RosInfo};
use crate::sccp::SccpAddress;
use crate::{m2pa, m3ua, mtp3, sccp, tcap};

/// A fully decoded dialogue message, owned so it survives past the
/// packet buffer it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMessage {
    pub calling: SccpAddress,
    pub called: SccpAddress,
    /// TCAP outer tag: Begin=2, End=4, Continue=5, Abort=7.
    pub tag: i32,
    pub otid: Vec<u8>,
    pub dtid: Vec<u8>,
    pub ros: Vec<RosInfo>,
}

/// Run the SCTP payload through M2PA/M3UA, MTP3, SCCP, TCAP and ROS in
/// sequence, dispatching the adaptation layer by `protocol_id` (the
/// SCTP payload protocol identifier).
///
/// M3UA protocol data is already the SCCP payload and goes straight to
/// SCCP; only M2PA passes through MTP3 first.
///
/// M2UA and SUA are accepted discriminators with no decoder behind
/// them: `Ok(None)`, no error. Any other unrecognized identifier is
/// likewise `Ok(None)` — this cascade only concerns itself with the
/// four SIGTRAN adaptations above MTP3/SCCP.
pub fn decode_sctp_payload(protocol_id: u32, payload: &[u8]) -> Result<Option<DecodedMessage>, DecodeError> {
    let sccp_payload = match protocol_id {
        id if id == PPID_M3UA => match m3ua::unwrap_m3ua(payload)? {
            Some(bytes) => bytes,
            None => return Ok(None),
        },
        id if id == PPID_M2PA => {
            let mtp3_payload = match m2pa::unwrap_m2pa(payload)? {
                Some(bytes) => bytes,
                None => return Ok(None),
            };
            match mtp3::unwrap_mtp3(mtp3_payload)? {
                Some(bytes) => bytes,
                None => return Ok(None),
            }
        }
        id if id == PPID_M2UA || id == PPID_SUA => return Ok(None),
        _ => return Ok(None),
    };

    let udt = match sccp::unwrap_udt(sccp_payload)? {
        Some(udt) => udt,
        None => return Ok(None),
    };

    let info = tcap::decode_tcap(udt.tcap)?;
    let ros = decode_ros(info.components);

    Ok(Some(DecodedMessage {
        calling: udt.calling,
        called: udt.called,
        tag: info.tag,
        otid: info.otid.to_vec(),
        dtid: info.dtid.to_vec(),
        ros,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn m2ua_and_sua_are_a_silent_no_op() {
        assert_eq!(decode_sctp_payload(PPID_M2UA, &[1, 2, 3]).unwrap(), None);
        assert_eq!(decode_sctp_payload(PPID_SUA, &[1, 2, 3]).unwrap(), None);
    }

    #[test]
    fn unrecognized_protocol_id_is_a_silent_no_op() {
        assert_eq!(decode_sctp_payload(99, &[1, 2, 3]).unwrap(), None);
    }

    #[test]
    fn truncated_m3ua_payload_is_an_error() {
        assert!(decode_sctp_payload(PPID_M3UA, &[1, 0, 11]).is_err());
    }

    fn ber_tlv(tag_byte: u8, content: &[u8]) -> Vec<u8> {
        let mut out = vec![tag_byte, content.len() as u8];
        out.extend_from_slice(content);
        out
    }

    fn m3ua_tlv(tag: u16, value: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&tag.to_be_bytes());
        out.extend_from_slice(&((value.len() + 4) as u16).to_be_bytes());
        out.extend_from_slice(value);
        while out.len() % 4 != 0 {
            out.push(0);
        }
        out
    }

    fn build_udt(called: &[u8], calling: &[u8], tcap: &[u8]) -> Vec<u8> {
        let mut buf = vec![0x09u8, 0x80, 0, 0, 0];
        buf[2] = 3;
        let calling_offset = 5 + 1 + called.len();
        buf[3] = (calling_offset - 3) as u8;
        let data_offset = calling_offset + 1 + calling.len();
        buf[4] = (data_offset - 4) as u8;

        buf.push(called.len() as u8);
        buf.extend_from_slice(called);
        buf.push(calling.len() as u8);
        buf.extend_from_slice(calling);
        buf.push(tcap.len() as u8);
        buf.extend_from_slice(tcap);
        buf
    }

    /// A full M3UA frame carrying an SCCP UDT/TCAP Begin/ROS Invoke,
    /// decoded end-to-end. M3UA protocol data must land on SCCP
    /// directly — routing it through MTP3 first (as UDT's 0x09 leading
    /// byte would fail MTP3's service-indicator check) used to drop
    /// every M3UA packet silently.
    #[test]
    fn decodes_a_full_m3ua_frame_to_a_begin_with_one_invoke() {
        let integer_5 = ber_tlv(0x02, &[5]);
        let integer_12 = ber_tlv(0x02, &[12]);
        let mut invoke_content = Vec::new();
        invoke_content.extend(integer_5);
        invoke_content.extend(integer_12);
        let invoke = ber_tlv(0x01, &invoke_content);

        let otid = [0x01, 0x02, 0x03, 0x04];
        let mut tcap_inner = Vec::new();
        tcap_inner.extend(ber_tlv(0x88, &otid));
        tcap_inner.extend(ber_tlv(0x8C, &invoke));
        let tcap_outer = ber_tlv(0x62, &tcap_inner); // Begin

        let called = vec![0x80, 2, 0, 0x10, 1, 0x21, 0x43];
        let calling = vec![0x80, 1, 0, 0x10, 1, 0x21, 0x43];
        let udt = build_udt(&called, &calling, &tcap_outer);

        let mut routing_label_and_sccp = vec![0u8; 12];
        routing_label_and_sccp.extend_from_slice(&udt);
        let mut frame = vec![1, 0, 11, 1, 0, 0, 0, 0]; // header: class=11 Transfer, type=1 Data
        frame.extend(m3ua_tlv(528, &routing_label_and_sccp));

        let decoded = decode_sctp_payload(PPID_M3UA, &frame).unwrap().expect("decoded message");
        assert_eq!(decoded.tag, 2);
        assert_eq!(decoded.otid, otid);
        assert!(decoded.dtid.is_empty());
        assert_eq!(decoded.calling.ssn, 1);
        assert_eq!(decoded.called.ssn, 2);
        assert_eq!(decoded.ros.len(), 1);
        assert_eq!(decoded.ros[0].invoke_id, 5);
        assert_eq!(decoded.ros[0].op_code, 12);
    }
}
