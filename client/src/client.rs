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

//! An internally scoped rust client for the API container of an enclave.
//!
//! Manages connecting to the API container over a unix socket or TCP, with
//! optional mutual TLS, as well as searching the local filesystem for
//! configuration and authentication material.

use crate::config::{ApiSocket, CertMaterial, EnclaveConfig};
use hyper_util::rt::TokioIo;
use thiserror::Error;
use tokio::net::UnixStream;
use tonic::transport::{
    Certificate, Channel, ClientTlsConfig, Endpoint, Identity, Uri,
};
use tower::service_fn;
use tracing::debug;

const KNOWN_IGNORED_SOCKET_ADDR: &str = "hxxp://null";
const TLS_DOMAIN_NAME: &str = "api-container.enclave.local";

type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    ConnectionError(#[from] tonic::transport::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Instance of a single client for one enclave's API container.
#[derive(Debug, Clone)]
pub struct Client {
    /// The channel used for gRPC connections before encryption is handled.
    pub(crate) channel: Channel,
    enclave_id: String,
}

impl Client {
    pub async fn default() -> Result<Self> {
        Self::new(EnclaveConfig::try_default()?).await
    }

    /// Create a new Client.
    ///
    /// Note: the channel is established eagerly, so an unreachable API
    /// container is reported here rather than on the first request.
    pub async fn new(EnclaveConfig { system, auth }: EnclaveConfig) -> Result<Self> {
        let tls_config = match auth {
            Some(auth) => {
                let CertMaterial { server_root_ca_cert, client_cert, client_key } =
                    auth.to_cert_material().await?;

                Some(
                    ClientTlsConfig::new()
                        .domain_name(TLS_DOMAIN_NAME)
                        .ca_certificate(Certificate::from_pem(server_root_ca_cert))
                        .identity(Identity::from_pem(client_cert, client_key)),
                )
            }
            None => None,
        };

        let mut endpoint = match &system.socket {
            ApiSocket::Addr(addr) => Endpoint::from_shared(format!("http://{addr}"))?,
            ApiSocket::Path(_) => Endpoint::from_static(KNOWN_IGNORED_SOCKET_ADDR),
        };
        if let Some(timeout) = system.request_timeout() {
            endpoint = endpoint.timeout(timeout);
        }
        if let Some(tls_config) = tls_config {
            endpoint = endpoint.tls_config(tls_config)?;
        }

        debug!(
            "connecting to API container of enclave '{}' at {:?}",
            system.enclave_id, system.socket
        );

        // A socket address is dialed directly. A path is a UNIX socket, so the
        // endpoint's URI is ignored in favor of a custom connector.
        let channel = match system.socket {
            ApiSocket::Addr(_) => endpoint.connect().await,
            ApiSocket::Path(socket) => {
                endpoint
                    .connect_with_connector(service_fn(move |_: Uri| {
                        let socket = socket.clone();
                        async move {
                            let stream = UnixStream::connect(socket).await?;
                            Ok::<_, std::io::Error>(TokioIo::new(stream))
                        }
                    }))
                    .await
            }
        }?;

        Ok(Self { channel, enclave_id: system.enclave_id })
    }

    /// The enclave whose API container this client talks to.
    pub fn enclave_id(&self) -> &str {
        &self.enclave_id
    }
}
