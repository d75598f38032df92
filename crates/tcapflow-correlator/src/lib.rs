// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Correlator library: the dialogue tables and the gRPC service that
//! fronts them. `main.rs` just wires configuration, logging and the
//! tonic transport around [`CorrelatorService`].

pub mod config;
pub mod server;
pub mod tables;

pub use config::CorrelatorConfig;
pub use server::CorrelatorService;
pub use tables::{DialogueMessage, DialogueTables, ExpiryBudgets};
