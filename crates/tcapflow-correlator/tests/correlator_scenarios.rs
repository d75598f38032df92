// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end scenarios driven through the `AddState` RPC surface
//! rather than the table internals, so validation (missing fields)
//! and metrics wiring are exercised along with the pairing logic.

use std::sync::Arc;
use std::time::Duration;

use prost_types::Timestamp;
use tcapflow_correlator::tables::{TC_ABORT, TC_BEGIN, TC_CONTINUE, TC_END};
use tcapflow_correlator::{CorrelatorService, DialogueTables, ExpiryBudgets};
use tcapflow_metrics::Metrics;
use tcapflow_proto::correlator_server::Correlator;
use tcapflow_proto::{Address, StateMessage, TcapInfo};
use tonic::Request;

fn service() -> CorrelatorService {
    CorrelatorService::new(
        Arc::new(DialogueTables::new()),
        Arc::new(Metrics::new("")),
        ExpiryBudgets {
            session: Duration::from_secs(10),
            pending: Duration::from_secs(2),
            ended: Duration::from_secs(10),
        },
        1,
    )
}

fn address(ssn: u32, digits: &str) -> Address {
    Address {
        ssn,
        ton: 23,
        npi: 23,
        digits: digits.to_string(),
    }
}

fn begin() -> StateMessage {
    StateMessage {
        capture_time: Some(Timestamp { seconds: 0, nanos: 0 }),
        calling: Some(address(1, "vlr")),
        called: Some(address(2, "hlr")),
        tcap: Some(TcapInfo {
            tag: TC_BEGIN,
            otid: vec![1, 2, 3, 4],
            dtid: vec![],
        }),
        ros: vec![],
    }
}

fn end() -> StateMessage {
    StateMessage {
        capture_time: Some(Timestamp { seconds: 1, nanos: 0 }),
        calling: Some(address(2, "hlr")),
        called: Some(address(1, "vlr")),
        tcap: Some(TcapInfo {
            tag: TC_END,
            otid: vec![],
            dtid: vec![1, 2, 3, 4],
        }),
        ros: vec![],
    }
}

fn tc_continue() -> StateMessage {
    StateMessage {
        capture_time: Some(Timestamp { seconds: 1, nanos: 0 }),
        calling: Some(address(2, "hlr")),
        called: Some(address(1, "vlr")),
        tcap: Some(TcapInfo {
            tag: TC_CONTINUE,
            otid: vec![4, 3, 2, 1],
            dtid: vec![1, 2, 3, 4],
        }),
        ros: vec![],
    }
}

#[tokio::test]
async fn begin_then_end_pairs_successfully() {
    let service = service();
    service.add_state(Request::new(begin())).await.unwrap();
    service.add_state(Request::new(end())).await.unwrap();
}

#[tokio::test]
async fn begin_then_continue_then_end_pairs_successfully() {
    let service = service();
    service.add_state(Request::new(begin())).await.unwrap();
    service.add_state(Request::new(tc_continue())).await.unwrap();
    service.add_state(Request::new(end())).await.unwrap();
}

#[tokio::test]
async fn out_of_order_arrival_still_pairs() {
    let service = service();
    service.add_state(Request::new(end())).await.unwrap();
    service.add_state(Request::new(begin())).await.unwrap();
}

#[tokio::test]
async fn abort_is_accepted_like_an_end() {
    let service = service();
    let mut abort = end();
    abort.tcap.as_mut().unwrap().tag = TC_ABORT;

    service.add_state(Request::new(begin())).await.unwrap();
    service.add_state(Request::new(abort)).await.unwrap();
}

#[tokio::test]
async fn a_state_message_missing_a_top_level_field_is_accepted_and_dropped() {
    let service = service();
    let mut malformed = begin();
    malformed.calling = None;

    let response = service.add_state(Request::new(malformed)).await;
    assert!(response.is_ok(), "missing fields must not be an RPC error");
}

#[tokio::test]
async fn a_state_message_missing_capture_time_is_accepted_and_dropped() {
    let service = service();
    let mut malformed = begin();
    malformed.capture_time = None;

    assert!(service.add_state(Request::new(malformed)).await.is_ok());
}
