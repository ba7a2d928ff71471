/* -------------------------------------------------------------------------- *\
 *                |   █████╗ ██╗   ██╗██████╗  █████╗ ███████╗ |              *
 *                |  ██╔══██╗██║   ██║██╔══██╗██╔══██╗██╔════╝ |              *
 *                |  ███████║██║   ██║██████╔╝███████║█████╗   |              *
 *                |  ██╔══██║██║   ██║██╔══██╗██╔══██║██╔══╝   |              *
 *                |  ██║  ██║╚██████╔╝██║  ██║██║  ██║███████╗ |              *
 *                |  ╚═╝  ╚═╝ ╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═╝╚══════╝ |              *
 *                +--------------------------------------------+              *
 *                                                                            *
 *                         Distributed Systems Runtime                        *
 * -------------------------------------------------------------------------- *
 * Copyright 2022 - 2024, the aurae contributors                              *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

use anyhow::Result;

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=../api/v0/api_container");

    generate_grpc_code()?;

    Ok(())
}

fn generate_grpc_code() -> Result<()> {
    let mut tonic_builder = tonic_build::configure().build_server(false);

    // Wire messages can be dumped as JSON in logs and fixtures.
    tonic_builder = tonic_builder.type_attribute(
        ".api_container_api",
        "#[derive(::serde::Serialize, ::serde::Deserialize)]",
    );

    // Types generated from proto messages derive PartialEq without Eq. Add them here to suppress the warning.
    tonic_builder = tonic_builder.type_attribute(
        ".api_container_api",
        "#[allow(clippy::derive_partial_eq_without_eq)]",
    );

    tonic_builder.compile_protos(
        &["../api/v0/api_container/api_container.proto"],
        &["../api/v0/api_container/"],
    )?;

    Ok(())
}
