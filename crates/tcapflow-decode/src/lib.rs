// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layered SIGTRAN/SS7/TCAP/ROS decoder cascade.
//!
//! Each module owns one layer's wire format and is independently
//! testable against synthetic frames. [`cascade::decode_sctp_payload`]
//! is the single entry point the probe drives per captured packet.

mod ber;
mod cascade;
mod constants;
mod error;
mod m2pa;
mod m3ua;
mod mtp3;
mod ros;
mod sccp;
mod tcap;

pub use cascade::{decode_sctp_payload, DecodedMessage};
pub use constants::{TCAP_TAG_ABORT, TCAP_TAG_BEGIN, TCAP_TAG_CONTINUE, TCAP_TAG_END};
pub use error::DecodeError;
pub use ros::{RosInfo, RosKind};
pub use sccp::{decode_address, encode_address, SccpAddress};
pub use tcap::TcapInfo;
