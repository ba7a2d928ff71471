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

//! Services running inside an enclave and what it takes to start them.

pub use availability::HttpEndpointCheck;
pub use container_config::{ContainerConfig, ContainerConfigBuilder};
pub use port_spec::{PortProtocol, PortSpec, PortSpecError};
pub use service_context::{ServiceContext, ServiceInfoError};
pub use service_id::{FilesArtifactUuid, ModuleId, ServiceId};
pub use templates::TemplateAndData;

mod availability;
mod container_config;
mod port_spec;
mod service_context;
mod service_id;
mod templates;
