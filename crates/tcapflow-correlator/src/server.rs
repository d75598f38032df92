// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `Correlator` gRPC service: validates an incoming `StateMessage` and
//! hands it to the dialogue tables. All reporting happens after the
//! table lock is released.

use std::sync::Arc;
use std::time::Duration;

use tcapflow_metrics::Metrics;
use tcapflow_proto::correlator_server::Correlator;
use tcapflow_proto::{Empty, StateMessage};
use tonic::{Request, Response, Status};
use tracing::debug;

use crate::tables::{DialogueMessage, DialogueTables, ExpiryBudgets};

pub struct CorrelatorService {
    tables: Arc<DialogueTables>,
    metrics: Arc<Metrics>,
    budgets: ExpiryBudgets,
    scale: u64,
}

impl CorrelatorService {
    pub fn new(tables: Arc<DialogueTables>, metrics: Arc<Metrics>, budgets: ExpiryBudgets, scale: u64) -> Self {
        Self {
            tables,
            metrics,
            budgets,
            scale,
        }
    }
}

#[tonic::async_trait]
impl Correlator for CorrelatorService {
    async fn add_state(&self, request: Request<StateMessage>) -> Result<Response<Empty>, Status> {
        let state = request.into_inner();

        let message = match to_dialogue_message(state) {
            Some(message) => message,
            None => {
                debug!("dropping StateMessage with a missing top-level field");
                self.metrics.rpc_missing_fields();
                return Ok(Response::new(Empty {}));
            }
        };

        let outcome = self.tables.add_state(message, &self.budgets);

        if outcome.new_state {
            self.metrics.new_state();
        }
        if let Some(latency) = outcome.del_state_latency {
            self.metrics.del_state();
            self.metrics.latency(scaled(latency, self.scale));
        }
        if outcome.tc_abort {
            self.metrics.tc_abort();
        }
        for _ in 0..outcome.expired_state {
            self.metrics.expired_state();
        }
        for _ in 0..outcome.expired_early_pending {
            self.metrics.expired_early_pending();
        }
        for _ in 0..outcome.removed_old_state {
            self.metrics.removed_old_state();
        }

        Ok(Response::new(Empty {}))
    }
}

fn scaled(latency: Duration, scale: u64) -> Duration {
    Duration::from_nanos((latency.as_nanos() as u64) / scale.max(1))
}

fn to_dialogue_message(state: StateMessage) -> Option<DialogueMessage> {
    let calling = state.calling?;
    let called = state.called?;
    let tcap = state.tcap?;
    let capture_time = state.capture_time?;

    Some(DialogueMessage {
        capture_time: Duration::new(capture_time.seconds.max(0) as u64, capture_time.nanos.max(0) as u32),
        calling_digits: calling.digits,
        calling_ssn: calling.ssn,
        called_digits: called.digits,
        called_ssn: called.ssn,
        tcap,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcapflow_proto::{Address, TcapInfo};

    fn full_state() -> StateMessage {
        StateMessage {
            capture_time: Some(prost_types::Timestamp { seconds: 1, nanos: 0 }),
            calling: Some(Address {
                ssn: 1,
                ton: 0,
                npi: 0,
                digits: "vlr".into(),
            }),
            called: Some(Address {
                ssn: 2,
                ton: 0,
                npi: 0,
                digits: "hlr".into(),
            }),
            tcap: Some(TcapInfo {
                tag: crate::tables::TC_BEGIN,
                otid: vec![1, 2, 3, 4],
                dtid: vec![],
            }),
            ros: vec![],
        }
    }

    #[test]
    fn missing_calling_is_rejected() {
        let mut state = full_state();
        state.calling = None;
        assert!(to_dialogue_message(state).is_none());
    }

    #[test]
    fn missing_capture_time_is_rejected() {
        let mut state = full_state();
        state.capture_time = None;
        assert!(to_dialogue_message(state).is_none());
    }

    #[test]
    fn complete_message_converts() {
        let message = to_dialogue_message(full_state()).expect("complete message");
        assert_eq!(message.calling_digits, "vlr");
        assert_eq!(message.tcap.tag, crate::tables::TC_BEGIN);
    }

    #[test]
    fn scale_of_zero_is_treated_as_one() {
        assert_eq!(scaled(Duration::from_nanos(100), 0), Duration::from_nanos(100));
        assert_eq!(scaled(Duration::from_nanos(100), 10), Duration::from_nanos(10));
    }
}
