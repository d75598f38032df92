// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The three-table dialogue correlator: `Sessions`, `EarlyPending` and
//! `Old`, all behind one mutex. No operation here may block while
//! holding the lock — metrics are reported by the caller, after the
//! lock is released.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tcapflow_proto::TcapInfo;

pub const TC_BEGIN: i32 = 2;
pub const TC_END: i32 = 4;
pub const TC_CONTINUE: i32 = 5;
pub const TC_ABORT: i32 = 7;

/// A normalized dialogue message, decoupled from the wire representation.
#[derive(Debug, Clone)]
pub struct DialogueMessage {
    pub capture_time: Duration,
    pub calling_digits: String,
    pub calling_ssn: u32,
    pub called_digits: String,
    pub called_ssn: u32,
    pub tcap: TcapInfo,
}

struct Session {
    added_time: Instant,
    capture_time: Duration,
}

struct EarlyPending {
    message: DialogueMessage,
    added_time: Instant,
}

struct Old {
    ended_time: Instant,
}

/// Outcome of a single `add_state` call, reported by the caller as
/// metrics once the lock is released.
#[derive(Debug, Default)]
pub struct AddStateOutcome {
    pub new_state: bool,
    pub del_state_latency: Option<Duration>,
    pub tc_abort: bool,
    pub expired_state: u32,
    pub expired_early_pending: u32,
    pub removed_old_state: u32,
}

#[derive(Default)]
pub struct DialogueTables {
    sessions: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    sessions: HashMap<String, Session>,
    early_pending: HashMap<String, EarlyPending>,
    old: HashMap<String, Old>,
}

pub struct ExpiryBudgets {
    pub session: Duration,
    pub pending: Duration,
    pub ended: Duration,
}

impl DialogueTables {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn session_count(&self) -> usize {
        self.sessions.lock().unwrap().sessions.len()
    }

    #[cfg(test)]
    pub fn early_pending_count(&self) -> usize {
        self.sessions.lock().unwrap().early_pending.len()
    }

    #[cfg(test)]
    pub fn old_count(&self) -> usize {
        self.sessions.lock().unwrap().old.len()
    }

    pub fn add_state(&self, msg: DialogueMessage, budgets: &ExpiryBudgets) -> AddStateOutcome {
        let mut inner = self.sessions.lock().expect("dialogue table mutex poisoned");
        let mut outcome = AddStateOutcome::default();

        if msg.tcap.tag == TC_BEGIN {
            begin(&mut inner, msg, &mut outcome);
            sweep(&mut inner, budgets, &mut outcome);
        } else {
            if msg.tcap.tag == TC_ABORT {
                outcome.tc_abort = true;
            }
            terminate(&mut inner, msg, &mut outcome);
        }

        outcome
    }
}

fn key(digits: &str, ssn: u32, tid: &[u8]) -> String {
    let mut hex = String::with_capacity(tid.len() * 2);
    for byte in tid {
        hex.push_str(&format!("{byte:02x}"));
    }
    format!("{digits}-{ssn}-{hex}")
}

fn begin(inner: &mut Inner, msg: DialogueMessage, outcome: &mut AddStateOutcome) {
    let k = key(&msg.calling_digits, msg.calling_ssn, &msg.tcap.otid);

    inner.old.remove(&k);

    inner.sessions.insert(
        k.clone(),
        Session {
            added_time: Instant::now(),
            capture_time: msg.capture_time,
        },
    );
    outcome.new_state = true;

    if let Some(pending) = inner.early_pending.remove(&k) {
        // Replay the buffered terminator now that its Begin has arrived.
        do_remove_state(inner, &k, pending.message, outcome);
    }
}

/// Applies the terminator path: remove the matching Begin if present,
/// transition to `Old` or close out depending on the tag, and fall
/// back to buffering in `EarlyPending` when nothing matched.
fn terminate(inner: &mut Inner, msg: DialogueMessage, outcome: &mut AddStateOutcome) {
    let k = key(&msg.called_digits, msg.called_ssn, &msg.tcap.dtid);
    let tag = msg.tcap.tag;

    if inner.sessions.contains_key(&k) {
        do_remove_state(inner, &k, msg, outcome);
        return;
    }

    if inner.early_pending.contains_key(&k) {
        // A duplicate terminator while one is already pending is
        // silently dropped (idempotence).
        return;
    }

    if inner.old.contains_key(&k) {
        if tag == TC_END || tag == TC_ABORT {
            inner.old.remove(&k);
        }
        // Continue on an already-ended key: ignore, keep it in Old.
        return;
    }

    inner.early_pending.insert(
        k,
        EarlyPending {
            message: msg,
            added_time: Instant::now(),
        },
    );
}

/// Removes the Begin at `k` (assumed present), reports latency, and
/// applies the tag-specific post-condition (Old insertion for
/// Continue, nothing for End/Abort).
fn do_remove_state(inner: &mut Inner, k: &str, msg: DialogueMessage, outcome: &mut AddStateOutcome) {
    let Some(session) = inner.sessions.remove(k) else {
        return;
    };

    let latency = msg.capture_time.saturating_sub(session.capture_time);
    outcome.del_state_latency = Some(latency);
    inner.early_pending.remove(k);

    match msg.tcap.tag {
        TC_END | TC_ABORT => {}
        TC_CONTINUE => {
            inner.old.insert(
                k.to_string(),
                Old {
                    ended_time: Instant::now(),
                },
            );
        }
        _ => {} // Begin cannot reach this path
    }
}

fn sweep(inner: &mut Inner, budgets: &ExpiryBudgets, outcome: &mut AddStateOutcome) {
    let now = Instant::now();

    inner.sessions.retain(|_, session| {
        let expired = now.duration_since(session.added_time) > budgets.session;
        if expired {
            outcome.expired_state += 1;
        }
        !expired
    });

    inner.early_pending.retain(|_, pending| {
        let expired = now.duration_since(pending.added_time) > budgets.pending;
        if expired {
            outcome.expired_early_pending += 1;
        }
        !expired
    });

    inner.old.retain(|_, old| {
        let expired = now.duration_since(old.ended_time) > budgets.ended;
        if expired {
            outcome.removed_old_state += 1;
        }
        !expired
    });
}
