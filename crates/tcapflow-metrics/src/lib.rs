// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fire-and-forget statsd reporting.
//!
//! All counters and timings go through a [`cadence::QueuingMetricSink`]
//! so a slow or unreachable statsd collector never blocks the caller.
//! A send failure is logged once at debug level and otherwise ignored —
//! metrics are best-effort by design.

use std::net::UdpSocket;
use std::time::Duration;

use cadence::{
    BufferedUdpMetricSink, Counted, QueuingMetricSink, StatsdClient, Timed,
    DEFAULT_PORT,
};

/// Wraps a [`StatsdClient`] with the named counters and timers tcapflow
/// reports. Construction never fails: if the UDP socket cannot be
/// created, metrics are silently dropped rather than taking down the
/// probe or correlator.
pub struct Metrics {
    client: StatsdClient,
}

impl Metrics {
    /// Build a metrics client reporting to `127.0.0.1:8125` with the
    /// given prefix. An empty prefix is valid and simply omits the
    /// leading segment from every stat name.
    pub fn new(prefix: &str) -> Self {
        let client = build_client(prefix).unwrap_or_else(|err| {
            tracing::debug!(%err, "statsd client unavailable, metrics will be dropped");
            StatsdClient::from_sink(prefix, cadence::NopMetricSink)
        });
        Self { client }
    }

    pub fn new_state(&self) {
        self.fire(|c| c.count("newState", 1));
    }

    pub fn del_state(&self) {
        self.fire(|c| c.count("delState", 1));
    }

    pub fn expired_state(&self) {
        self.fire(|c| c.count("expiredState", 1));
    }

    pub fn expired_early_pending(&self) {
        self.fire(|c| c.count("expiredEarlyPending", 1));
    }

    pub fn removed_old_state(&self) {
        self.fire(|c| c.count("removedOldState", 1));
    }

    pub fn tc_abort(&self) {
        self.fire(|c| c.count("tcAbort", 1));
    }

    pub fn rpc_missing_fields(&self) {
        self.fire(|c| c.count("rpcMissingFields", 1));
    }

    pub fn rpc_error(&self) {
        self.fire(|c| c.count("rpcError", 1));
    }

    pub fn parse_error(&self) {
        self.fire(|c| c.count("parseError", 1));
    }

    /// Report a pairing latency, already scaled by the caller.
    pub fn latency(&self, scaled: Duration) {
        if let Err(err) = self.client.time("latency", scaled) {
            tracing::debug!(%err, "failed to report latency metric");
        }
    }

    fn fire<F, E>(&self, f: F)
    where
        F: FnOnce(&StatsdClient) -> Result<(), E>,
        E: std::fmt::Display,
    {
        if let Err(err) = f(&self.client) {
            tracing::debug!(%err, "failed to report counter metric");
        }
    }
}

fn build_client(prefix: &str) -> std::io::Result<StatsdClient> {
    let socket = UdpSocket::bind("0.0.0.0:0")?;
    socket.set_nonblocking(true)?;
    let host = ("127.0.0.1", DEFAULT_PORT);
    let sink = BufferedUdpMetricSink::from(host, socket)?;
    let queuing_sink = QueuingMetricSink::from(sink);
    Ok(StatsdClient::from_sink(prefix, queuing_sink))
}
