// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// A failure at any layer of the SIGTRAN/SS7/TCAP/ROS cascade.
///
/// Decoding is per-packet and adversarial: any [`DecodeError`] means the
/// current packet is dropped and the caller must continue with the next
/// one. No variant here is fatal to the process.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DecodeError {
    #[error("{layer}: truncated ({context})")]
    Truncated {
        layer: &'static str,
        context: &'static str,
    },

    #[error("{layer}: out of range ({context})")]
    OutOfRange {
        layer: &'static str,
        context: &'static str,
    },

    #[error("{layer}: malformed BER ({context})")]
    MalformedBer {
        layer: &'static str,
        context: &'static str,
    },
}

impl DecodeError {
    pub(crate) fn truncated(layer: &'static str, context: &'static str) -> Self {
        Self::Truncated { layer, context }
    }

    pub(crate) fn out_of_range(layer: &'static str, context: &'static str) -> Self {
        Self::OutOfRange { layer, context }
    }

    pub(crate) fn malformed_ber(layer: &'static str, context: &'static str) -> Self {
        Self::MalformedBer { layer, context }
    }
}
