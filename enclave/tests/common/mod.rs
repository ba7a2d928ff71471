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

//! A scripted, call-recording stand-in for the API container.

#![allow(dead_code)]

use enclave::services::{ContainerConfig, ContainerConfigBuilder, PortProtocol, PortSpec, ServiceId};
use enclave::{BackendError, BackendGateway, BackendResult};
use proto::api_container::{
    ExecCommandArgs, ExecCommandResponse, ExecuteModuleArgs,
    ExecuteModuleResponse, FailedServices, GetModulesArgs, GetModulesResponse,
    GetServicesArgs, GetServicesResponse, LoadModuleArgs, ModuleInfo,
    PauseServiceArgs, Port, RemoveServiceArgs, RemoveServiceResponse,
    RenderTemplatesToFilesArtifactArgs, RenderTemplatesToFilesArtifactResponse,
    RepartitionArgs, ServiceInfo, StartServicesArgs, StartServicesResponse,
    StoreFilesArtifactFromServiceArgs, StoreFilesArtifactFromServiceResponse,
    StoreWebFilesArtifactArgs, StoreWebFilesArtifactResponse,
    SuccessfulServices, UnloadModuleArgs, UnloadModuleResponse,
    UnpauseServiceArgs, UploadFilesArtifactArgs, UploadFilesArtifactResponse,
    WaitForHttpGetEndpointAvailabilityArgs,
    WaitForHttpPostEndpointAvailabilityArgs,
};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tonic::Status;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    StartServices(StartServicesArgs),
    RemoveService(String),
    Repartition(RepartitionArgs),
    GetServices(GetServicesArgs),
    GetModules(GetModulesArgs),
    LoadModule(LoadModuleArgs),
    UnloadModule(String),
    ExecuteModule(ExecuteModuleArgs),
    ExecCommand(ExecCommandArgs),
    PauseService(String),
    UnpauseService(String),
    WaitForHttpGet(WaitForHttpGetEndpointAvailabilityArgs),
    WaitForHttpPost(WaitForHttpPostEndpointAvailabilityArgs),
    UploadFiles(usize),
    StoreWebFiles(String),
    StoreServiceFiles(StoreFilesArtifactFromServiceArgs),
    RenderTemplates(RenderTemplatesToFilesArtifactArgs),
}

#[derive(Debug, Default)]
struct State {
    start_responses: VecDeque<Result<StartServicesResponse, String>>,
    removal_failures: HashMap<String, String>,
    services: HashMap<String, ServiceInfo>,
    modules: HashMap<String, ModuleInfo>,
    calls: Vec<Call>,
}

#[derive(Debug, Default)]
pub struct FakeBackend {
    state: Mutex<State>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues the response of the next start call.
    pub fn respond_to_start(&self, response: StartServicesResponse) {
        self.state().start_responses.push_back(Ok(response));
    }

    /// Makes the next start call fail in transport.
    pub fn fail_start(&self, message: &str) {
        self.state().start_responses.push_back(Err(message.to_string()));
    }

    pub fn fail_removal_of(&self, service_id: &str, message: &str) {
        let _ = self
            .state()
            .removal_failures
            .insert(service_id.to_string(), message.to_string());
    }

    pub fn with_service(&self, service_id: &str, info: ServiceInfo) {
        let _ = self.state().services.insert(service_id.to_string(), info);
    }

    pub fn with_module(&self, module_id: &str) {
        let _ = self.state().modules.insert(
            module_id.to_string(),
            ModuleInfo {
                guid: format!("{module_id}-guid"),
                private_ip_addr: "172.16.0.9".to_string(),
                ..Default::default()
            },
        );
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn removed_services(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::RemoveService(service_id) => Some(service_id),
                _ => None,
            })
            .collect()
    }

    pub fn repartitions(&self) -> Vec<RepartitionArgs> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Repartition(args) => Some(args),
                _ => None,
            })
            .collect()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("fake backend state lock")
    }

    fn record(&self, call: Call) {
        self.state().calls.push(call);
    }
}

#[tonic::async_trait]
impl BackendGateway for FakeBackend {
    async fn start_services(
        &self,
        args: StartServicesArgs,
    ) -> BackendResult<StartServicesResponse> {
        self.record(Call::StartServices(args));
        match self.state().start_responses.pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(BackendError::new(
                "start_services",
                Status::unavailable(message),
            )),
            None => Err(BackendError::new(
                "start_services",
                Status::internal("no scripted start response"),
            )),
        }
    }

    async fn remove_service(
        &self,
        args: RemoveServiceArgs,
    ) -> BackendResult<RemoveServiceResponse> {
        self.record(Call::RemoveService(args.service_id.clone()));
        let mut state = self.state();
        if let Some(message) = state.removal_failures.get(&args.service_id) {
            return Err(BackendError::new(
                "remove_service",
                Status::unavailable(message.clone()),
            ));
        }
        let _ = state.services.remove(&args.service_id);
        Ok(RemoveServiceResponse {
            service_guid: format!("{}-{}", args.service_id, uuid::Uuid::new_v4()),
        })
    }

    async fn repartition(&self, args: RepartitionArgs) -> BackendResult<()> {
        self.record(Call::Repartition(args));
        Ok(())
    }

    async fn get_services(
        &self,
        args: GetServicesArgs,
    ) -> BackendResult<GetServicesResponse> {
        self.record(Call::GetServices(args.clone()));
        let state = self.state();
        let service_info = state
            .services
            .iter()
            .filter(|(service_id, _)| {
                args.service_ids.is_empty()
                    || args.service_ids.contains_key(*service_id)
            })
            .map(|(service_id, info)| (service_id.clone(), info.clone()))
            .collect();
        Ok(GetServicesResponse { service_info })
    }

    async fn get_modules(
        &self,
        args: GetModulesArgs,
    ) -> BackendResult<GetModulesResponse> {
        self.record(Call::GetModules(args.clone()));
        let state = self.state();
        let module_info = state
            .modules
            .iter()
            .filter(|(module_id, _)| {
                args.ids.is_empty() || args.ids.contains_key(*module_id)
            })
            .map(|(module_id, info)| (module_id.clone(), info.clone()))
            .collect();
        Ok(GetModulesResponse { module_info })
    }

    async fn load_module(&self, args: LoadModuleArgs) -> BackendResult<()> {
        self.record(Call::LoadModule(args.clone()));
        self.with_module(&args.module_id);
        Ok(())
    }

    async fn unload_module(
        &self,
        args: UnloadModuleArgs,
    ) -> BackendResult<UnloadModuleResponse> {
        self.record(Call::UnloadModule(args.module_id.clone()));
        let _ = self.state().modules.remove(&args.module_id);
        Ok(UnloadModuleResponse { module_guid: format!("{}-guid", args.module_id) })
    }

    async fn execute_module(
        &self,
        args: ExecuteModuleArgs,
    ) -> BackendResult<ExecuteModuleResponse> {
        let serialized_result = format!("{{\"echo\":{}}}", args.serialized_params);
        self.record(Call::ExecuteModule(args));
        Ok(ExecuteModuleResponse { serialized_result })
    }

    async fn exec_command(
        &self,
        args: ExecCommandArgs,
    ) -> BackendResult<ExecCommandResponse> {
        let log_output = args.command_args.join(" ");
        self.record(Call::ExecCommand(args));
        Ok(ExecCommandResponse { exit_code: 0, log_output })
    }

    async fn pause_service(&self, args: PauseServiceArgs) -> BackendResult<()> {
        self.record(Call::PauseService(args.service_id));
        Ok(())
    }

    async fn unpause_service(
        &self,
        args: UnpauseServiceArgs,
    ) -> BackendResult<()> {
        self.record(Call::UnpauseService(args.service_id));
        Ok(())
    }

    async fn wait_for_http_get_endpoint_availability(
        &self,
        args: WaitForHttpGetEndpointAvailabilityArgs,
    ) -> BackendResult<()> {
        self.record(Call::WaitForHttpGet(args));
        Ok(())
    }

    async fn wait_for_http_post_endpoint_availability(
        &self,
        args: WaitForHttpPostEndpointAvailabilityArgs,
    ) -> BackendResult<()> {
        self.record(Call::WaitForHttpPost(args));
        Ok(())
    }

    async fn upload_files_artifact(
        &self,
        args: UploadFilesArtifactArgs,
    ) -> BackendResult<UploadFilesArtifactResponse> {
        self.record(Call::UploadFiles(args.data.len()));
        Ok(UploadFilesArtifactResponse { uuid: uuid::Uuid::new_v4().to_string() })
    }

    async fn store_web_files_artifact(
        &self,
        args: StoreWebFilesArtifactArgs,
    ) -> BackendResult<StoreWebFilesArtifactResponse> {
        self.record(Call::StoreWebFiles(args.url));
        Ok(StoreWebFilesArtifactResponse {
            uuid: uuid::Uuid::new_v4().to_string(),
        })
    }

    async fn store_files_artifact_from_service(
        &self,
        args: StoreFilesArtifactFromServiceArgs,
    ) -> BackendResult<StoreFilesArtifactFromServiceResponse> {
        self.record(Call::StoreServiceFiles(args));
        Ok(StoreFilesArtifactFromServiceResponse {
            uuid: uuid::Uuid::new_v4().to_string(),
        })
    }

    async fn render_templates_to_files_artifact(
        &self,
        args: RenderTemplatesToFilesArtifactArgs,
    ) -> BackendResult<RenderTemplatesToFilesArtifactResponse> {
        self.record(Call::RenderTemplates(args));
        Ok(RenderTemplatesToFilesArtifactResponse {
            uuid: uuid::Uuid::new_v4().to_string(),
        })
    }
}

pub fn service_info(private_ip: &str) -> ServiceInfo {
    ServiceInfo {
        private_ip_addr: private_ip.to_string(),
        private_ports: HashMap::from([(
            "http".to_string(),
            Port { number: 8080, protocol: 0 },
        )]),
        maybe_public_ip_addr: None,
        maybe_public_ports: HashMap::new(),
    }
}

pub fn start_response(
    succeeded: Vec<(&str, ServiceInfo)>,
    failed: Vec<(&str, &str)>,
) -> StartServicesResponse {
    StartServicesResponse {
        successful_services: Some(SuccessfulServices {
            service_ids_to_service_info: succeeded
                .into_iter()
                .map(|(service_id, info)| (service_id.to_string(), info))
                .collect(),
        }),
        failed_services: Some(FailedServices {
            service_ids_to_errors: failed
                .into_iter()
                .map(|(service_id, message)| {
                    (service_id.to_string(), message.to_string())
                })
                .collect(),
        }),
    }
}

pub fn container_config() -> ContainerConfig {
    ContainerConfigBuilder::new("docker.io/library/nginx:1.25")
        .with_used_ports(BTreeMap::from([(
            "http".to_string(),
            PortSpec::new(8080, PortProtocol::Tcp),
        )]))
        .build()
}

pub fn container_configs(
    service_ids: &[&str],
) -> BTreeMap<ServiceId, ContainerConfig> {
    service_ids
        .iter()
        .map(|service_id| (ServiceId::from(*service_id), container_config()))
        .collect()
}
