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

//! Configuration used to reach the API container of a single enclave.
//!
//! [`EnclaveConfig::try_default()`] follows an ordered priority for searching for
//! configuration on a client's machine.
//!
//! 1. ${HOME}/.enclave/config
//! 2. /etc/enclave/config
//! 3. /var/lib/enclave/config

pub use self::{
    auth_config::AuthConfig, cert_material::CertMaterial,
    system_config::ApiSocket, system_config::SystemConfig,
};
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use tracing::warn;

mod auth_config;
mod cert_material;
mod system_config;

/// Configuration for an enclave client
#[derive(Debug, Clone, Deserialize)]
pub struct EnclaveConfig {
    /// System configuration
    pub system: SystemConfig,
    /// Authentication material. Without it the connection is plaintext.
    #[serde(default)]
    pub auth: Option<AuthConfig>,
}

impl EnclaveConfig {
    /// Attempt to easy-load enclave configuration from well-known locations.
    pub fn try_default() -> Result<Self> {
        let mut search_paths = Vec::with_capacity(3);
        if let Ok(home) = std::env::var("HOME") {
            search_paths.push(format!("{home}/.enclave/config"));
        }
        search_paths.push("/etc/enclave/config".to_string());
        search_paths.push("/var/lib/enclave/config".to_string());

        for path in search_paths {
            match Self::parse_from_toml_file(&path) {
                Ok(config) => {
                    return Ok(config);
                }
                Err(e) => {
                    warn!("failed to parse config at {path}: {e}");
                    continue;
                }
            }
        }

        Err(anyhow!("unable to find valid config file"))
    }

    /// Attempt to parse a config file into memory.
    pub fn parse_from_toml_file<P: AsRef<Path>>(
        path: P,
    ) -> Result<EnclaveConfig> {
        let mut config_toml = String::new();
        let mut file = File::open(path)?;

        if file
            .read_to_string(&mut config_toml)
            .with_context(|| "could not read EnclaveConfig toml")?
            == 0
        {
            return Err(anyhow!("empty config"));
        }

        EnclaveConfig::parse_from_toml(&config_toml)
    }

    pub fn parse_from_toml(config_toml: &str) -> Result<EnclaveConfig> {
        Ok(toml::from_str(config_toml)?)
    }

    /// Create a new plaintext EnclaveConfig from given options
    ///
    /// # Arguments
    ///
    /// * `socket` - Path to the API container's unix socket
    /// * `enclave_id` - The enclave served behind `socket`
    pub fn from_options<S1: Into<String>, S2: Into<String>>(
        socket: S1,
        enclave_id: S2,
    ) -> Self {
        let socket: String = socket.into();
        let system = SystemConfig {
            socket: ApiSocket::Path(socket.into()),
            enclave_id: enclave_id.into(),
            request_timeout_millis: None,
        };
        Self { system, auth: None }
    }

    /// Require mutual TLS using the certificate material at the given paths.
    pub fn with_auth<S1: Into<String>, S2: Into<String>, S3: Into<String>>(
        mut self,
        ca_crt: S1,
        client_crt: S2,
        client_key: S3,
    ) -> Self {
        self.auth = Some(AuthConfig {
            ca_crt: ca_crt.into(),
            client_crt: client_crt.into(),
            client_key: client_key.into(),
        });
        self
    }
}
