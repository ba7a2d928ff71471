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

use proto::api_container::{port::TransportProtocol, Port};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortProtocol {
    Tcp,
    Udp,
}

impl From<PortProtocol> for TransportProtocol {
    fn from(protocol: PortProtocol) -> Self {
        match protocol {
            PortProtocol::Tcp => TransportProtocol::Tcp,
            PortProtocol::Udp => TransportProtocol::Udp,
        }
    }
}

impl From<TransportProtocol> for PortProtocol {
    fn from(protocol: TransportProtocol) -> Self {
        match protocol {
            TransportProtocol::Tcp => PortProtocol::Tcp,
            TransportProtocol::Udp => PortProtocol::Udp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortSpec {
    number: u16,
    protocol: PortProtocol,
}

impl PortSpec {
    pub fn new(number: u16, protocol: PortProtocol) -> Self {
        Self { number, protocol }
    }

    pub fn number(&self) -> u16 {
        self.number
    }

    pub fn protocol(&self) -> PortProtocol {
        self.protocol
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PortSpecError {
    #[error("port number {number} is out of range")]
    NumberOutOfRange { number: u32 },
    #[error("unknown transport protocol {protocol}")]
    UnknownProtocol { protocol: i32 },
}

impl From<PortSpec> for Port {
    fn from(spec: PortSpec) -> Self {
        Port {
            number: u32::from(spec.number),
            protocol: TransportProtocol::from(spec.protocol) as i32,
        }
    }
}

impl TryFrom<&Port> for PortSpec {
    type Error = PortSpecError;

    fn try_from(port: &Port) -> Result<Self, Self::Error> {
        let number = u16::try_from(port.number)
            .map_err(|_| PortSpecError::NumberOutOfRange { number: port.number })?;
        let protocol = TransportProtocol::try_from(port.protocol).map_err(|_| {
            PortSpecError::UnknownProtocol { protocol: port.protocol }
        })?;

        Ok(Self { number, protocol: protocol.into() })
    }
}
