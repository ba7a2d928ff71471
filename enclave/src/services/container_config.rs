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

use super::{FilesArtifactUuid, PortSpec};
use proto::api_container::{Port, ServiceConfig};
use std::collections::{BTreeMap, HashMap};

/// Everything the API container needs to start one service.
///
/// Built once with [ContainerConfigBuilder] and consumed by the call that
/// starts the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerConfig {
    image: String,
    used_ports: BTreeMap<String, PortSpec>,
    public_ports: BTreeMap<String, PortSpec>,
    entrypoint_override_args: Vec<String>,
    cmd_override_args: Vec<String>,
    environment_variable_overrides: BTreeMap<String, String>,
    files_artifact_mountpoints: BTreeMap<FilesArtifactUuid, String>,
    cpu_allocation_millicpus: Option<u64>,
    memory_allocation_megabytes: Option<u64>,
    private_ip_addr_placeholder: Option<String>,
}

impl ContainerConfig {
    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn used_ports(&self) -> &BTreeMap<String, PortSpec> {
        &self.used_ports
    }

    pub fn public_ports(&self) -> &BTreeMap<String, PortSpec> {
        &self.public_ports
    }

    pub fn entrypoint_override_args(&self) -> &[String] {
        &self.entrypoint_override_args
    }

    pub fn cmd_override_args(&self) -> &[String] {
        &self.cmd_override_args
    }

    pub fn environment_variable_overrides(&self) -> &BTreeMap<String, String> {
        &self.environment_variable_overrides
    }

    pub fn files_artifact_mountpoints(
        &self,
    ) -> &BTreeMap<FilesArtifactUuid, String> {
        &self.files_artifact_mountpoints
    }

    pub fn cpu_allocation_millicpus(&self) -> Option<u64> {
        self.cpu_allocation_millicpus
    }

    pub fn memory_allocation_megabytes(&self) -> Option<u64> {
        self.memory_allocation_megabytes
    }

    pub fn private_ip_addr_placeholder(&self) -> Option<&str> {
        self.private_ip_addr_placeholder.as_deref()
    }
}

fn to_api_ports(ports: BTreeMap<String, PortSpec>) -> HashMap<String, Port> {
    ports.into_iter().map(|(port_id, spec)| (port_id, spec.into())).collect()
}

impl From<ContainerConfig> for ServiceConfig {
    fn from(config: ContainerConfig) -> Self {
        let ContainerConfig {
            image,
            used_ports,
            public_ports,
            entrypoint_override_args,
            cmd_override_args,
            environment_variable_overrides,
            files_artifact_mountpoints,
            cpu_allocation_millicpus,
            memory_allocation_megabytes,
            private_ip_addr_placeholder,
        } = config;

        ServiceConfig {
            container_image_name: image,
            private_ports: to_api_ports(used_ports),
            public_ports: to_api_ports(public_ports),
            entrypoint_args: entrypoint_override_args,
            cmd_args: cmd_override_args,
            env_vars: environment_variable_overrides.into_iter().collect(),
            files_artifact_mountpoints: files_artifact_mountpoints
                .into_iter()
                .collect(),
            cpu_allocation_millicpus,
            memory_allocation_megabytes,
            private_ip_addr_placeholder,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContainerConfigBuilder {
    config: ContainerConfig,
}

impl ContainerConfigBuilder {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            config: ContainerConfig {
                image: image.into(),
                used_ports: BTreeMap::new(),
                public_ports: BTreeMap::new(),
                entrypoint_override_args: Vec::new(),
                cmd_override_args: Vec::new(),
                environment_variable_overrides: BTreeMap::new(),
                files_artifact_mountpoints: BTreeMap::new(),
                cpu_allocation_millicpus: None,
                memory_allocation_megabytes: None,
                private_ip_addr_placeholder: None,
            },
        }
    }

    pub fn with_used_ports(
        mut self,
        used_ports: BTreeMap<String, PortSpec>,
    ) -> Self {
        self.config.used_ports = used_ports;
        self
    }

    /// Ports to expose outside the enclave, keyed like the used ports.
    pub fn with_public_ports(
        mut self,
        public_ports: BTreeMap<String, PortSpec>,
    ) -> Self {
        self.config.public_ports = public_ports;
        self
    }

    pub fn with_entrypoint_override(mut self, args: Vec<String>) -> Self {
        self.config.entrypoint_override_args = args;
        self
    }

    pub fn with_cmd_override(mut self, args: Vec<String>) -> Self {
        self.config.cmd_override_args = args;
        self
    }

    pub fn with_environment_variable_overrides(
        mut self,
        env_vars: BTreeMap<String, String>,
    ) -> Self {
        self.config.environment_variable_overrides = env_vars;
        self
    }

    /// Files artifacts to mount, keyed by artifact with the mount dirpath as value.
    pub fn with_files(
        mut self,
        mountpoints: BTreeMap<FilesArtifactUuid, String>,
    ) -> Self {
        self.config.files_artifact_mountpoints = mountpoints;
        self
    }

    pub fn with_cpu_allocation_millicpus(mut self, millicpus: u64) -> Self {
        self.config.cpu_allocation_millicpus = Some(millicpus);
        self
    }

    pub fn with_memory_allocation_megabytes(mut self, megabytes: u64) -> Self {
        self.config.memory_allocation_megabytes = Some(megabytes);
        self
    }

    /// A token the API container replaces with the service's own private IP
    /// wherever it appears in the entrypoint, cmd or environment.
    pub fn with_private_ip_addr_placeholder(
        mut self,
        placeholder: impl Into<String>,
    ) -> Self {
        self.config.private_ip_addr_placeholder = Some(placeholder.into());
        self
    }

    pub fn build(self) -> ContainerConfig {
        self.config
    }
}
