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

use serde::de::{Error, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt::Formatter;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Where the enclave's API container lives and how to talk to it.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Socket to connect the client to. Can be a path (unix socket) or a network socket address.
    pub socket: ApiSocket,
    /// The enclave served by the API container behind `socket`.
    pub enclave_id: String,
    /// Deadline applied by the transport to every request. Unset means no deadline.
    #[serde(default)]
    pub request_timeout_millis: Option<u64>,
}

impl SystemConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_millis.map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiSocket {
    Path(PathBuf),
    Addr(SocketAddr),
}

impl<'de> Deserialize<'de> for ApiSocket {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_string(ApiSocketVisitor)
    }
}

struct ApiSocketVisitor;

impl<'de> Visitor<'de> for ApiSocketVisitor {
    type Value = ApiSocket;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a path (unix socket) or a network socket address")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        self.visit_string(v.to_string())
    }

    fn visit_borrowed_str<E>(self, v: &'de str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        self.visit_string(v.to_string())
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: Error,
    {
        if v.is_empty() {
            return Err(E::custom("socket must not be empty"));
        }

        Ok(match v.parse::<SocketAddr>() {
            Ok(addr) => ApiSocket::Addr(addr),
            Err(_) => ApiSocket::Path(PathBuf::from(v)),
        })
    }
}
