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

use crate::AuthConfig;
use anyhow::Context;

#[derive(Debug)]
pub struct CertMaterial {
    pub server_root_ca_cert: Vec<u8>,
    pub client_cert: Vec<u8>,
    pub client_key: Vec<u8>,
}

impl CertMaterial {
    pub async fn from_config(config: &AuthConfig) -> anyhow::Result<Self> {
        let server_root_ca_cert =
            tokio::fs::read(config.ca_crt_path()).await.with_context(|| {
                format!(
                    "Failed to read server root CA certificate from path '{}'",
                    config.ca_crt_path().display()
                )
            })?;

        let client_cert =
            tokio::fs::read(config.client_crt_path()).await.with_context(|| {
                format!(
                    "Failed to read client certificate from path '{}'",
                    config.client_crt_path().display()
                )
            })?;

        let client_key =
            tokio::fs::read(config.client_key_path()).await.with_context(|| {
                format!(
                    "Failed to read client key from path '{}'",
                    config.client_key_path().display()
                )
            })?;

        Ok(Self { server_root_ca_cert, client_cert, client_key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_ca_crt_names_the_path() {
        let config = AuthConfig {
            ca_crt: "/nonexistent/enclave/pki/ca.crt".into(),
            client_crt: "/nonexistent/enclave/pki/client.crt".into(),
            client_key: "/nonexistent/enclave/pki/client.key".into(),
        };

        let err = CertMaterial::from_config(&config)
            .await
            .expect_err("reading missing cert material should fail");

        assert!(err.to_string().contains("/nonexistent/enclave/pki/ca.crt"));
    }
}
