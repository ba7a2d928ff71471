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

use super::{PortSpec, PortSpecError, ServiceId};
use proto::api_container::{Port, ServiceInfo};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceInfoError {
    #[error("missing private IP")]
    MissingPrivateIp,
    #[error("empty public IP")]
    EmptyPublicIp,
    #[error("invalid port '{port_id}': {source}")]
    InvalidPort {
        port_id: String,
        #[source]
        source: PortSpecError,
    },
}

/// Handle to a service the API container reported as running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceContext {
    service_id: ServiceId,
    private_ip_addr: String,
    private_ports: BTreeMap<String, PortSpec>,
    public_ip_addr: Option<String>,
    public_ports: BTreeMap<String, PortSpec>,
}

impl ServiceContext {
    /// Validates what the API container reported for `service_id`.
    ///
    /// The private IP must be non-empty. A public IP may be absent but never
    /// present and empty. Every port must carry a `u16` number and a known
    /// protocol.
    pub(crate) fn from_service_info(
        service_id: ServiceId,
        info: ServiceInfo,
    ) -> Result<Self, ServiceInfoError> {
        let ServiceInfo {
            private_ip_addr,
            private_ports,
            maybe_public_ip_addr,
            maybe_public_ports,
        } = info;

        if private_ip_addr.is_empty() {
            return Err(ServiceInfoError::MissingPrivateIp);
        }

        if matches!(&maybe_public_ip_addr, Some(ip) if ip.is_empty()) {
            return Err(ServiceInfoError::EmptyPublicIp);
        }

        Ok(Self {
            service_id,
            private_ip_addr,
            private_ports: to_port_specs(&private_ports)?,
            public_ip_addr: maybe_public_ip_addr,
            public_ports: to_port_specs(&maybe_public_ports)?,
        })
    }

    pub fn service_id(&self) -> &ServiceId {
        &self.service_id
    }

    pub fn private_ip_addr(&self) -> &str {
        &self.private_ip_addr
    }

    pub fn private_ports(&self) -> &BTreeMap<String, PortSpec> {
        &self.private_ports
    }

    pub fn public_ip_addr(&self) -> Option<&str> {
        self.public_ip_addr.as_deref()
    }

    /// Empty when the service is not exposed outside the enclave.
    pub fn public_ports(&self) -> &BTreeMap<String, PortSpec> {
        &self.public_ports
    }
}

fn to_port_specs(
    ports: &HashMap<String, Port>,
) -> Result<BTreeMap<String, PortSpec>, ServiceInfoError> {
    ports
        .iter()
        .map(|(port_id, port)| {
            PortSpec::try_from(port)
                .map(|spec| (port_id.clone(), spec))
                .map_err(|source| ServiceInfoError::InvalidPort {
                    port_id: port_id.clone(),
                    source,
                })
        })
        .collect()
}
