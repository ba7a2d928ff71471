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

//! Entry point for working with one enclave.

use crate::backend::BackendGateway;
use crate::error::{EnclaveError, Result};
use crate::module_context::ModuleContext;
use crate::partitions::{PartitionId, PartitionTopology, PartitionTopologyRequest};
use crate::provisioner::{ServiceProvisioner, ServiceProvisioningResult};
use crate::services::{
    ContainerConfig, FilesArtifactUuid, HttpEndpointCheck, ModuleId,
    ServiceContext, ServiceId, TemplateAndData,
};
use client::{Client, EnclaveConfig};
use proto::api_container::{
    self as api, ExecCommandArgs, GetModulesArgs, GetServicesArgs,
    LoadModuleArgs, PauseServiceArgs, RemoveServiceArgs,
    RenderTemplatesToFilesArtifactArgs, StoreFilesArtifactFromServiceArgs,
    StoreWebFilesArtifactArgs, UnloadModuleArgs, UnpauseServiceArgs,
    UploadFilesArtifactArgs,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Exit code and combined output of a command run inside a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    pub exit_code: i32,
    pub log_output: String,
}

/// Services, partitions, modules and files artifacts of one enclave.
///
/// Holds no state beyond the backend handle. Every call goes to the API
/// container, which owns the enclave's services and topology.
#[derive(Clone)]
pub struct EnclaveContext {
    backend: Arc<dyn BackendGateway>,
    enclave_id: String,
}

impl EnclaveContext {
    /// Connects to the enclave's API container as described by `config`.
    pub async fn connect(config: EnclaveConfig) -> Result<Self> {
        let client = Client::new(config).await?;
        let enclave_id = client.enclave_id().to_string();
        info!(%enclave_id, "connected to enclave");
        Ok(Self::new(Arc::new(client), enclave_id))
    }

    pub fn new(
        backend: Arc<dyn BackendGateway>,
        enclave_id: impl Into<String>,
    ) -> Self {
        Self { backend, enclave_id: enclave_id.into() }
    }

    pub fn enclave_id(&self) -> &str {
        &self.enclave_id
    }

    #[instrument(skip(self, serialized_params))]
    pub async fn load_module(
        &self,
        module_id: &str,
        image: &str,
        serialized_params: &str,
    ) -> Result<ModuleContext> {
        let args = LoadModuleArgs {
            module_id: module_id.to_string(),
            container_image: image.to_string(),
            serialized_params: serialized_params.to_string(),
        };
        self.backend.load_module(args).await?;
        Ok(ModuleContext::new(self.backend.clone(), module_id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn unload_module(&self, module_id: &str) -> Result<()> {
        let args = UnloadModuleArgs { module_id: module_id.to_string() };
        let _ = self.backend.unload_module(args).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_module_context(&self, module_id: &str) -> Result<ModuleContext> {
        let args = GetModulesArgs {
            ids: HashMap::from([(module_id.to_string(), true)]),
        };
        let response = self.backend.get_modules(args).await?;
        if !response.module_info.contains_key(module_id) {
            return Err(EnclaveError::ModuleNotFound {
                module_id: module_id.to_string(),
            });
        }
        Ok(ModuleContext::new(self.backend.clone(), module_id.to_string()))
    }

    /// Starts one service in the default partition.
    pub async fn add_service(
        &self,
        service_id: ServiceId,
        config: ContainerConfig,
    ) -> Result<ServiceContext> {
        self.add_service_to_partition(
            service_id,
            &PartitionId::default_partition(),
            config,
        )
        .await
    }

    /// Starts a batch of services in the default partition.
    pub async fn add_services(
        &self,
        configs: BTreeMap<ServiceId, ContainerConfig>,
    ) -> Result<ServiceProvisioningResult> {
        self.add_services_to_partition(configs, &PartitionId::default_partition())
            .await
    }

    /// Starts one service in `partition_id`.
    ///
    /// Unlike the batch variants, a service that fails to start is reported
    /// as [EnclaveError::ServiceStartFailed].
    pub async fn add_service_to_partition(
        &self,
        service_id: ServiceId,
        partition_id: &PartitionId,
        config: ContainerConfig,
    ) -> Result<ServiceContext> {
        let configs = BTreeMap::from([(service_id.clone(), config)]);
        let ServiceProvisioningResult { mut succeeded, mut failed } =
            self.add_services_to_partition(configs, partition_id).await?;

        if let Some(reason) = failed.remove(&service_id) {
            return Err(EnclaveError::ServiceStartFailed {
                service_id,
                partition_id: partition_id.clone(),
                reason,
            });
        }

        succeeded.remove(&service_id).ok_or_else(|| {
            EnclaveError::inconsistency(format!(
                "service '{service_id}' missing from provisioning result"
            ))
        })
    }

    pub async fn add_services_to_partition(
        &self,
        configs: BTreeMap<ServiceId, ContainerConfig>,
        partition_id: &PartitionId,
    ) -> Result<ServiceProvisioningResult> {
        ServiceProvisioner::new(&*self.backend)
            .provision(configs, partition_id)
            .await
    }

    /// Looks up a running service.
    ///
    /// The reported details are checked the same way as when the service
    /// was started.
    #[instrument(skip(self), fields(%service_id))]
    pub async fn get_service_context(
        &self,
        service_id: &ServiceId,
    ) -> Result<ServiceContext> {
        let args = GetServicesArgs {
            service_ids: HashMap::from([(service_id.to_string(), true)]),
        };
        let mut response = self.backend.get_services(args).await?;

        let info = response
            .service_info
            .remove(service_id.as_str())
            .ok_or_else(|| EnclaveError::ServiceNotFound {
                service_id: service_id.clone(),
            })?;

        ServiceContext::from_service_info(service_id.clone(), info).map_err(|e| {
            EnclaveError::inconsistency(format!("service '{service_id}': {e}"))
        })
    }

    #[instrument(skip(self), fields(%service_id))]
    pub async fn remove_service(&self, service_id: &ServiceId) -> Result<()> {
        let args = RemoveServiceArgs { service_id: service_id.to_string() };
        let _ = self.backend.remove_service(args).await?;
        debug!("removed service");
        Ok(())
    }

    /// Replaces the enclave's network topology.
    ///
    /// The request is validated before anything is sent.
    pub async fn repartition_network(
        &self,
        request: PartitionTopologyRequest,
    ) -> Result<()> {
        PartitionTopology::new(request)?.repartition(&*self.backend).await
    }

    #[instrument(skip(self, check), fields(%service_id, port = check.port, path = %check.path))]
    pub async fn wait_for_http_get_endpoint_availability(
        &self,
        service_id: &ServiceId,
        check: &HttpEndpointCheck,
    ) -> Result<()> {
        self.backend
            .wait_for_http_get_endpoint_availability(check.to_get_args(service_id))
            .await?;
        Ok(())
    }

    #[instrument(skip(self, check, request_body), fields(%service_id, port = check.port, path = %check.path))]
    pub async fn wait_for_http_post_endpoint_availability(
        &self,
        service_id: &ServiceId,
        check: &HttpEndpointCheck,
        request_body: &str,
    ) -> Result<()> {
        self.backend
            .wait_for_http_post_endpoint_availability(
                check.to_post_args(service_id, request_body),
            )
            .await?;
        Ok(())
    }

    /// IDs of every service in the enclave.
    pub async fn get_services(&self) -> Result<BTreeSet<ServiceId>> {
        let response = self.backend.get_services(GetServicesArgs::default()).await?;
        Ok(response.service_info.into_keys().map(ServiceId::from).collect())
    }

    /// IDs of every module loaded into the enclave.
    pub async fn get_modules(&self) -> Result<BTreeSet<ModuleId>> {
        let response = self.backend.get_modules(GetModulesArgs::default()).await?;
        Ok(response.module_info.into_keys().collect())
    }

    /// Stores an already built archive as a files artifact.
    pub async fn upload_files(&self, archive: Vec<u8>) -> Result<FilesArtifactUuid> {
        debug!(bytes = archive.len(), "uploading files artifact");
        let response = self
            .backend
            .upload_files_artifact(UploadFilesArtifactArgs { data: archive })
            .await?;
        Ok(response.uuid)
    }

    /// Has the API container download `url` into a files artifact.
    #[instrument(skip(self))]
    pub async fn store_web_files(&self, url: &str) -> Result<FilesArtifactUuid> {
        let _ = url::Url::parse(url).map_err(|source| EnclaveError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        let response = self
            .backend
            .store_web_files_artifact(StoreWebFilesArtifactArgs {
                url: url.to_string(),
            })
            .await?;
        Ok(response.uuid)
    }

    /// Copies `source_path` out of a service's container into a files
    /// artifact.
    #[instrument(skip(self), fields(%service_id))]
    pub async fn store_service_files(
        &self,
        service_id: &ServiceId,
        source_path: &str,
    ) -> Result<FilesArtifactUuid> {
        let args = StoreFilesArtifactFromServiceArgs {
            service_id: service_id.to_string(),
            source_path: source_path.to_string(),
        };
        let response = self.backend.store_files_artifact_from_service(args).await?;
        Ok(response.uuid)
    }

    #[instrument(skip(self), fields(%service_id))]
    pub async fn pause_service(&self, service_id: &ServiceId) -> Result<()> {
        let args = PauseServiceArgs { service_id: service_id.to_string() };
        self.backend.pause_service(args).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(%service_id))]
    pub async fn unpause_service(&self, service_id: &ServiceId) -> Result<()> {
        let args = UnpauseServiceArgs { service_id: service_id.to_string() };
        self.backend.unpause_service(args).await?;
        Ok(())
    }

    /// Renders templates into a single files artifact, keyed by the path of
    /// each rendered file relative to the artifact root.
    pub async fn render_templates(
        &self,
        templates: BTreeMap<String, TemplateAndData>,
    ) -> Result<FilesArtifactUuid> {
        if templates.is_empty() {
            return Err(EnclaveError::NoTemplates);
        }

        let mut templates_and_data_by_destination_rel_filepath = HashMap::new();
        for (path, TemplateAndData { template, data }) in templates {
            let data_as_json = serde_json::to_string(&data).map_err(|source| {
                EnclaveError::TemplateData { path: path.clone(), source }
            })?;
            let _ = templates_and_data_by_destination_rel_filepath
                .insert(path, api::TemplateAndData { template, data_as_json });
        }

        let args = RenderTemplatesToFilesArtifactArgs {
            templates_and_data_by_destination_rel_filepath,
        };
        let response =
            self.backend.render_templates_to_files_artifact(args).await?;
        Ok(response.uuid)
    }

    /// Runs a command inside a service's container and waits for it to exit.
    #[instrument(skip(self), fields(%service_id))]
    pub async fn exec_command(
        &self,
        service_id: &ServiceId,
        command: Vec<String>,
    ) -> Result<ExecOutput> {
        let args = ExecCommandArgs {
            service_id: service_id.to_string(),
            command_args: command,
        };
        let response = self.backend.exec_command(args).await?;
        Ok(ExecOutput {
            exit_code: response.exit_code,
            log_output: response.log_output,
        })
    }
}

impl std::fmt::Debug for EnclaveContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnclaveContext")
            .field("enclave_id", &self.enclave_id)
            .finish_non_exhaustive()
    }
}
