// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Correlator binary: serves the `AddState` RPC and pairs TCAP
//! dialogue Begin/Continue/End/Abort messages into latency
//! observations.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tcapflow_correlator::tables::ExpiryBudgets;
use tcapflow_correlator::{CorrelatorConfig, CorrelatorService, DialogueTables};
use tcapflow_metrics::Metrics;
use tcapflow_proto::correlator_server::CorrelatorServer;
use tonic::transport::Server;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "tcapflow-correlator", about = "Pair TCAP dialogue messages and report latency")]
struct Args {
    /// TOML configuration file. CLI flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long = "expire-session")]
    expire_session_secs: Option<u64>,

    #[arg(long = "expire-pending")]
    expire_pending_secs: Option<u64>,

    #[arg(long = "expire-ended")]
    expire_ended_secs: Option<u64>,

    #[arg(long = "listen-address")]
    listen_address: Option<String>,

    #[arg(long = "statsd-prefix")]
    statsd_prefix: Option<String>,

    #[arg(long)]
    scale: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => CorrelatorConfig::from_file(path)?,
        None => CorrelatorConfig::default(),
    };
    if let Some(v) = args.expire_session_secs {
        config.expire_session_secs = v;
    }
    if let Some(v) = args.expire_pending_secs {
        config.expire_pending_secs = v;
    }
    if let Some(v) = args.expire_ended_secs {
        config.expire_ended_secs = v;
    }
    if let Some(v) = args.listen_address {
        config.listen_address = v;
    }
    if let Some(v) = args.statsd_prefix {
        config.statsd_prefix = v;
    }
    if let Some(v) = args.scale {
        config.scale = v;
    }
    config.validate()?;

    let addr = config.listen_address.parse()?;
    let tables = Arc::new(DialogueTables::new());
    let metrics = Arc::new(Metrics::new(&config.statsd_prefix));
    let budgets = ExpiryBudgets {
        session: config.expire_session(),
        pending: config.expire_pending(),
        ended: config.expire_ended(),
    };

    let service = CorrelatorService::new(tables, metrics, budgets, config.scale);

    info!(%addr, "tcapflow-correlator listening");
    Server::builder()
        .add_service(CorrelatorServer::new(service))
        .serve(addr)
        .await?;

    Ok(())
}
