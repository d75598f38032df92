// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Probe binary: captures SIGTRAN traffic, decodes TCAP dialogue
//! messages and forwards them to a correlator over gRPC.

mod config;
mod link;
mod normalize;
mod sctp;

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use pcap::{Activated, Capture};
use tcapflow_metrics::Metrics;
use tcapflow_proto::correlator_client::CorrelatorClient;
use tracing::{debug, warn};

use config::Config;
use link::LinkType;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let config = Config::parse();
    run(config).await
}

async fn run(config: Config) -> anyhow::Result<()> {
    let metrics = Metrics::new(&config.statsd_prefix);

    let mut client = CorrelatorClient::connect(format!("http://{}", config.remote_address))
        .await
        .with_context(|| format!("connecting to correlator at {}", config.remote_address))?;

    let mut capture = open_capture(&config)?;
    let link_type = LinkType::from_datalink(capture.get_datalink().0);

    loop {
        let packet = match capture.next_packet() {
            Ok(packet) => packet,
            Err(pcap::Error::NoMorePackets) => break,
            Err(err) => {
                warn!(%err, "capture error, stopping");
                break;
            }
        };

        let capture_time = Duration::new(
            packet.header.ts.tv_sec.max(0) as u64,
            (packet.header.ts.tv_usec.max(0) as u32).saturating_mul(1000),
        );

        let Some(sctp_payload) = link::sctp_payload(link_type, packet.data) else {
            continue;
        };

        for chunk in sctp::data_chunks(sctp_payload) {
            match tcapflow_decode::decode_sctp_payload(chunk.payload_protocol, chunk.payload) {
                Ok(Some(decoded)) => {
                    let state = normalize::to_state_message(decoded, capture_time);
                    if let Err(err) = client
                        .add_state(tonic::Request::new(state))
                        .await
                    {
                        warn!(%err, "RPC error sending state to correlator");
                        metrics.rpc_error();
                    }
                }
                Ok(None) => {}
                Err(err) => {
                    debug!(%err, "parse error decoding SCTP payload");
                    metrics.parse_error();
                }
            }
        }
    }

    Ok(())
}

fn open_capture(config: &Config) -> anyhow::Result<Capture<dyn Activated>> {
    if let Some(file) = &config.pcap_file {
        let capture = Capture::from_file(file).with_context(|| format!("opening pcap file {file}"))?;
        Ok(capture.into())
    } else {
        let mut capture = Capture::from_device(config.pcap_device.as_str())
            .with_context(|| format!("opening capture device {}", config.pcap_device))?
            .promisc(true)
            .open()
            .context("activating capture device")?;
        capture
            .filter(&config.pcap_filter, true)
            .context("applying BPF filter")?;
        Ok(capture.into())
    }
}
