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

//! Generated Protobuf definitions for the enclave API container.
//!
//! The sources live in `api/v0/api_container` and are compiled by `build.rs`.

#![allow(clippy::derive_partial_eq_without_eq)]
#![allow(clippy::empty_docs)]
#![allow(clippy::match_single_binding)]
#![allow(clippy::doc_lazy_continuation)]
#![allow(clippy::needless_lifetimes)]

pub mod api_container {
    tonic::include_proto!("api_container_api");
}
