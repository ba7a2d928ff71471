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

use crate::config::cert_material::CertMaterial;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The `[auth]` table of an enclave config: where the mutual TLS material
/// for the enclave's API container lives.
///
/// A path starting with `~/` is taken relative to `$HOME`. The files are read
/// each time a [crate::Client] connects, so certificates rotated on disk only
/// reach clients created afterwards.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AuthConfig {
    /// CA that signed the API container's certificate.
    pub ca_crt: String,
    /// Certificate presented to the API container.
    pub client_crt: String,
    pub client_key: String,
}

impl AuthConfig {
    /// Material laid out the way enclave PKI directories are:
    /// `ca.crt`, `client.crt` and `client.key` side by side.
    pub fn from_pki_dir(dir: impl AsRef<Path>) -> Self {
        let file = |name: &str| dir.as_ref().join(name).display().to_string();
        Self {
            ca_crt: file("ca.crt"),
            client_crt: file("client.crt"),
            client_key: file("client.key"),
        }
    }

    pub fn ca_crt_path(&self) -> PathBuf {
        expand_home(&self.ca_crt, home().as_deref())
    }

    pub fn client_crt_path(&self) -> PathBuf {
        expand_home(&self.client_crt, home().as_deref())
    }

    pub fn client_key_path(&self) -> PathBuf {
        expand_home(&self.client_key, home().as_deref())
    }

    pub async fn to_cert_material(&self) -> anyhow::Result<CertMaterial> {
        CertMaterial::from_config(self).await
    }
}

fn home() -> Option<String> {
    std::env::var("HOME").ok()
}

fn expand_home(path: &str, home: Option<&str>) -> PathBuf {
    match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => Path::new(home).join(rest),
        _ => PathBuf::from(path),
    }
}
