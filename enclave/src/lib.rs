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

//! Provisioning and network partitioning of services inside an enclave.
//!
//! An [EnclaveContext] talks to the enclave's API container through a
//! [BackendGateway]. Batches of services are started by the
//! [ServiceProvisioner], which removes again every service it cannot hand
//! back to the caller. Network partitions are described by a
//! [PartitionTopologyRequest] and sent as a complete [PartitionTopology].

// Lint groups: https://doc.rust-lang.org/rustc/lints/groups.html
#![warn(future_incompatible, nonstandard_style, unused)]
#![warn(
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    unconditional_recursion,
    unused_comparisons,
    while_true
)]
#![warn(missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_results
)]
#![warn(clippy::unwrap_used)]

pub use backend::{BackendError, BackendGateway, BackendResult};
pub use enclave_context::{EnclaveContext, ExecOutput};
pub use error::{EnclaveError, FailureReason, Result};
pub use module_context::ModuleContext;
pub use partitions::{
    ConnectionOverrides, ConnectionResolver, PartitionConnection, PartitionId,
    PartitionTopology, PartitionTopologyRequest, TopologyError,
};
pub use provisioner::{ServiceProvisioner, ServiceProvisioningResult};

pub mod backend;
mod enclave_context;
mod error;
pub mod logging;
mod module_context;
pub mod partitions;
mod provisioner;
pub mod services;
