// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generated gRPC types and client/server stubs for the `Correlator`
//! service. The wire contract lives in `proto/tcapflow.proto`; nothing
//! here is hand-written.

tonic::include_proto!("tcapflow");
