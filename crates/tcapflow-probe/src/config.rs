// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Probe CLI configuration. Unlike the correlator, the probe has no
//! file-based configuration surface — every original option was a
//! flag, and that remains true here.

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "tcapflow-probe", about = "Capture SIGTRAN traffic and forward decoded dialogues to a tcapflow correlator")]
pub struct Config {
    /// Read packets from a pcap capture file instead of a live device.
    #[arg(long = "pcap-file")]
    pub pcap_file: Option<String>,

    /// Device to sniff when `pcap-file` is not given.
    #[arg(long = "pcap-device", default_value = "any")]
    pub pcap_device: String,

    /// BPF filter applied to live captures.
    #[arg(long = "pcap-filter", default_value = "sctp")]
    pub pcap_filter: String,

    /// `host:port` of the correlator's RPC endpoint.
    #[arg(long = "remote-address")]
    pub remote_address: String,

    /// Prefix prepended to every statsd stat name.
    #[arg(long = "statsd-prefix", default_value = "")]
    pub statsd_prefix: String,
}
