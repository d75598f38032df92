// SPDX-License-Identifier: Apache-2.0 OR MIT

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tonic_prost_build::compile_protos("proto/tcapflow.proto")?;
    println!("cargo:rerun-if-changed=proto/tcapflow.proto");
    Ok(())
}
