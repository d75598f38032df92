// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Converts a decoded dialogue message plus its packet capture
//! timestamp into the wire [`tcapflow_proto::StateMessage`].

use std::time::Duration;

use prost_types::Timestamp;
use tcapflow_decode::{DecodedMessage, RosKind, SccpAddress};
use tcapflow_proto::{Address, RosComponent, StateMessage, TcapInfo};

pub fn to_state_message(msg: DecodedMessage, capture_time: Duration) -> StateMessage {
    StateMessage {
        capture_time: Some(Timestamp {
            seconds: capture_time.as_secs() as i64,
            nanos: capture_time.subsec_nanos() as i32,
        }),
        calling: Some(to_address(msg.calling)),
        called: Some(to_address(msg.called)),
        tcap: Some(TcapInfo {
            tag: msg.tag,
            otid: msg.otid,
            dtid: msg.dtid,
        }),
        ros: msg
            .ros
            .into_iter()
            .map(|r| RosComponent {
                kind: match r.kind {
                    RosKind::Invoke => 1,
                    RosKind::Result => 2,
                },
                invoke_id: r.invoke_id as i32,
                op_code: r.op_code as i32,
            })
            .collect(),
    }
}

fn to_address(addr: SccpAddress) -> Address {
    Address {
        ssn: addr.ssn as u32,
        ton: addr.ton as u32,
        npi: addr.npi as u32,
        digits: addr.digits,
    }
}
