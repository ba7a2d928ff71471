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

//! The operations an enclave needs from its API container.

use client::api_container::ApiContainerServiceClient;
use proto::api_container::{
    ExecCommandArgs, ExecCommandResponse, ExecuteModuleArgs,
    ExecuteModuleResponse, GetModulesArgs, GetModulesResponse, GetServicesArgs,
    GetServicesResponse, LoadModuleArgs, PauseServiceArgs, RemoveServiceArgs,
    RemoveServiceResponse, RenderTemplatesToFilesArtifactArgs,
    RenderTemplatesToFilesArtifactResponse, RepartitionArgs, StartServicesArgs,
    StartServicesResponse, StoreFilesArtifactFromServiceArgs,
    StoreFilesArtifactFromServiceResponse, StoreWebFilesArtifactArgs,
    StoreWebFilesArtifactResponse, UnloadModuleArgs, UnloadModuleResponse,
    UnpauseServiceArgs, UploadFilesArtifactArgs, UploadFilesArtifactResponse,
    WaitForHttpGetEndpointAvailabilityArgs,
    WaitForHttpPostEndpointAvailabilityArgs,
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("backend call '{operation}' failed ({code:?}): {message}", code = .status.code(), message = .status.message())]
pub struct BackendError {
    pub operation: &'static str,
    #[source]
    pub status: tonic::Status,
}

impl BackendError {
    pub fn new(operation: &'static str, status: tonic::Status) -> Self {
        Self { operation, status }
    }
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Operations against the API container.
///
/// Each call is attempted once. Nothing is retried and no call is assumed to
/// be idempotent.
#[tonic::async_trait]
pub trait BackendGateway: Send + Sync {
    async fn start_services(
        &self,
        args: StartServicesArgs,
    ) -> BackendResult<StartServicesResponse>;

    async fn remove_service(
        &self,
        args: RemoveServiceArgs,
    ) -> BackendResult<RemoveServiceResponse>;

    async fn repartition(&self, args: RepartitionArgs) -> BackendResult<()>;

    async fn get_services(
        &self,
        args: GetServicesArgs,
    ) -> BackendResult<GetServicesResponse>;

    async fn get_modules(
        &self,
        args: GetModulesArgs,
    ) -> BackendResult<GetModulesResponse>;

    async fn load_module(&self, args: LoadModuleArgs) -> BackendResult<()>;

    async fn unload_module(
        &self,
        args: UnloadModuleArgs,
    ) -> BackendResult<UnloadModuleResponse>;

    async fn execute_module(
        &self,
        args: ExecuteModuleArgs,
    ) -> BackendResult<ExecuteModuleResponse>;

    async fn exec_command(
        &self,
        args: ExecCommandArgs,
    ) -> BackendResult<ExecCommandResponse>;

    async fn pause_service(&self, args: PauseServiceArgs) -> BackendResult<()>;

    async fn unpause_service(&self, args: UnpauseServiceArgs)
        -> BackendResult<()>;

    async fn wait_for_http_get_endpoint_availability(
        &self,
        args: WaitForHttpGetEndpointAvailabilityArgs,
    ) -> BackendResult<()>;

    async fn wait_for_http_post_endpoint_availability(
        &self,
        args: WaitForHttpPostEndpointAvailabilityArgs,
    ) -> BackendResult<()>;

    async fn upload_files_artifact(
        &self,
        args: UploadFilesArtifactArgs,
    ) -> BackendResult<UploadFilesArtifactResponse>;

    async fn store_web_files_artifact(
        &self,
        args: StoreWebFilesArtifactArgs,
    ) -> BackendResult<StoreWebFilesArtifactResponse>;

    async fn store_files_artifact_from_service(
        &self,
        args: StoreFilesArtifactFromServiceArgs,
    ) -> BackendResult<StoreFilesArtifactFromServiceResponse>;

    async fn render_templates_to_files_artifact(
        &self,
        args: RenderTemplatesToFilesArtifactArgs,
    ) -> BackendResult<RenderTemplatesToFilesArtifactResponse>;
}

macro_rules! forward {
    ($($op:ident($args:ty) -> $response:ty;)*) => {
        #[tonic::async_trait]
        impl BackendGateway for client::Client {
            $(
                async fn $op(&self, args: $args) -> BackendResult<$response> {
                    ApiContainerServiceClient::$op(self, args)
                        .await
                        .map(tonic::Response::into_inner)
                        .map_err(|status| BackendError::new(stringify!($op), status))
                }
            )*
        }
    };
}

forward! {
    start_services(StartServicesArgs) -> StartServicesResponse;
    remove_service(RemoveServiceArgs) -> RemoveServiceResponse;
    repartition(RepartitionArgs) -> ();
    get_services(GetServicesArgs) -> GetServicesResponse;
    get_modules(GetModulesArgs) -> GetModulesResponse;
    load_module(LoadModuleArgs) -> ();
    unload_module(UnloadModuleArgs) -> UnloadModuleResponse;
    execute_module(ExecuteModuleArgs) -> ExecuteModuleResponse;
    exec_command(ExecCommandArgs) -> ExecCommandResponse;
    pause_service(PauseServiceArgs) -> ();
    unpause_service(UnpauseServiceArgs) -> ();
    wait_for_http_get_endpoint_availability(WaitForHttpGetEndpointAvailabilityArgs) -> ();
    wait_for_http_post_endpoint_availability(WaitForHttpPostEndpointAvailabilityArgs) -> ();
    upload_files_artifact(UploadFilesArtifactArgs) -> UploadFilesArtifactResponse;
    store_web_files_artifact(StoreWebFilesArtifactArgs) -> StoreWebFilesArtifactResponse;
    store_files_artifact_from_service(StoreFilesArtifactFromServiceArgs) -> StoreFilesArtifactFromServiceResponse;
    render_templates_to_files_artifact(RenderTemplatesToFilesArtifactArgs) -> RenderTemplatesToFilesArtifactResponse;
}
