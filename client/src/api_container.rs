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

//! Client side of `api_container_api.ApiContainerService`.

// One method per unary RPC, each opening a client on the shared channel.

#[::tonic::async_trait]
pub trait ApiContainerServiceClient {
    async fn load_module(
        &self,
        req: ::proto::api_container::LoadModuleArgs,
    ) -> Result<::tonic::Response<()>, ::tonic::Status>;
    async fn unload_module(
        &self,
        req: ::proto::api_container::UnloadModuleArgs,
    ) -> Result<::tonic::Response<::proto::api_container::UnloadModuleResponse>, ::tonic::Status>;
    async fn get_modules(
        &self,
        req: ::proto::api_container::GetModulesArgs,
    ) -> Result<::tonic::Response<::proto::api_container::GetModulesResponse>, ::tonic::Status>;
    async fn execute_module(
        &self,
        req: ::proto::api_container::ExecuteModuleArgs,
    ) -> Result<::tonic::Response<::proto::api_container::ExecuteModuleResponse>, ::tonic::Status>;
    async fn start_services(
        &self,
        req: ::proto::api_container::StartServicesArgs,
    ) -> Result<::tonic::Response<::proto::api_container::StartServicesResponse>, ::tonic::Status>;
    async fn get_services(
        &self,
        req: ::proto::api_container::GetServicesArgs,
    ) -> Result<::tonic::Response<::proto::api_container::GetServicesResponse>, ::tonic::Status>;
    async fn remove_service(
        &self,
        req: ::proto::api_container::RemoveServiceArgs,
    ) -> Result<::tonic::Response<::proto::api_container::RemoveServiceResponse>, ::tonic::Status>;
    async fn repartition(
        &self,
        req: ::proto::api_container::RepartitionArgs,
    ) -> Result<::tonic::Response<()>, ::tonic::Status>;
    async fn exec_command(
        &self,
        req: ::proto::api_container::ExecCommandArgs,
    ) -> Result<::tonic::Response<::proto::api_container::ExecCommandResponse>, ::tonic::Status>;
    async fn pause_service(
        &self,
        req: ::proto::api_container::PauseServiceArgs,
    ) -> Result<::tonic::Response<()>, ::tonic::Status>;
    async fn unpause_service(
        &self,
        req: ::proto::api_container::UnpauseServiceArgs,
    ) -> Result<::tonic::Response<()>, ::tonic::Status>;
    async fn wait_for_http_get_endpoint_availability(
        &self,
        req: ::proto::api_container::WaitForHttpGetEndpointAvailabilityArgs,
    ) -> Result<::tonic::Response<()>, ::tonic::Status>;
    async fn wait_for_http_post_endpoint_availability(
        &self,
        req: ::proto::api_container::WaitForHttpPostEndpointAvailabilityArgs,
    ) -> Result<::tonic::Response<()>, ::tonic::Status>;
    async fn upload_files_artifact(
        &self,
        req: ::proto::api_container::UploadFilesArtifactArgs,
    ) -> Result<::tonic::Response<::proto::api_container::UploadFilesArtifactResponse>, ::tonic::Status>;
    async fn store_web_files_artifact(
        &self,
        req: ::proto::api_container::StoreWebFilesArtifactArgs,
    ) -> Result<::tonic::Response<::proto::api_container::StoreWebFilesArtifactResponse>, ::tonic::Status>;
    async fn store_files_artifact_from_service(
        &self,
        req: ::proto::api_container::StoreFilesArtifactFromServiceArgs,
    ) -> Result<::tonic::Response<::proto::api_container::StoreFilesArtifactFromServiceResponse>, ::tonic::Status>;
    async fn render_templates_to_files_artifact(
        &self,
        req: ::proto::api_container::RenderTemplatesToFilesArtifactArgs,
    ) -> Result<::tonic::Response<::proto::api_container::RenderTemplatesToFilesArtifactResponse>, ::tonic::Status>;
}

#[::tonic::async_trait]
impl ApiContainerServiceClient for crate::client::Client {
    async fn load_module(
        &self,
        req: ::proto::api_container::LoadModuleArgs,
    ) -> Result<::tonic::Response<()>, ::tonic::Status> {
        let mut client =
            ::proto::api_container::api_container_service_client::ApiContainerServiceClient::new(
                self.channel.clone(),
            );
        client.load_module(req).await
    }

    async fn unload_module(
        &self,
        req: ::proto::api_container::UnloadModuleArgs,
    ) -> Result<::tonic::Response<::proto::api_container::UnloadModuleResponse>, ::tonic::Status> {
        let mut client =
            ::proto::api_container::api_container_service_client::ApiContainerServiceClient::new(
                self.channel.clone(),
            );
        client.unload_module(req).await
    }

    async fn get_modules(
        &self,
        req: ::proto::api_container::GetModulesArgs,
    ) -> Result<::tonic::Response<::proto::api_container::GetModulesResponse>, ::tonic::Status> {
        let mut client =
            ::proto::api_container::api_container_service_client::ApiContainerServiceClient::new(
                self.channel.clone(),
            );
        client.get_modules(req).await
    }

    async fn execute_module(
        &self,
        req: ::proto::api_container::ExecuteModuleArgs,
    ) -> Result<::tonic::Response<::proto::api_container::ExecuteModuleResponse>, ::tonic::Status> {
        let mut client =
            ::proto::api_container::api_container_service_client::ApiContainerServiceClient::new(
                self.channel.clone(),
            );
        client.execute_module(req).await
    }

    async fn start_services(
        &self,
        req: ::proto::api_container::StartServicesArgs,
    ) -> Result<::tonic::Response<::proto::api_container::StartServicesResponse>, ::tonic::Status> {
        let mut client =
            ::proto::api_container::api_container_service_client::ApiContainerServiceClient::new(
                self.channel.clone(),
            );
        client.start_services(req).await
    }

    async fn get_services(
        &self,
        req: ::proto::api_container::GetServicesArgs,
    ) -> Result<::tonic::Response<::proto::api_container::GetServicesResponse>, ::tonic::Status> {
        let mut client =
            ::proto::api_container::api_container_service_client::ApiContainerServiceClient::new(
                self.channel.clone(),
            );
        client.get_services(req).await
    }

    async fn remove_service(
        &self,
        req: ::proto::api_container::RemoveServiceArgs,
    ) -> Result<::tonic::Response<::proto::api_container::RemoveServiceResponse>, ::tonic::Status> {
        let mut client =
            ::proto::api_container::api_container_service_client::ApiContainerServiceClient::new(
                self.channel.clone(),
            );
        client.remove_service(req).await
    }

    async fn repartition(
        &self,
        req: ::proto::api_container::RepartitionArgs,
    ) -> Result<::tonic::Response<()>, ::tonic::Status> {
        let mut client =
            ::proto::api_container::api_container_service_client::ApiContainerServiceClient::new(
                self.channel.clone(),
            );
        client.repartition(req).await
    }

    async fn exec_command(
        &self,
        req: ::proto::api_container::ExecCommandArgs,
    ) -> Result<::tonic::Response<::proto::api_container::ExecCommandResponse>, ::tonic::Status> {
        let mut client =
            ::proto::api_container::api_container_service_client::ApiContainerServiceClient::new(
                self.channel.clone(),
            );
        client.exec_command(req).await
    }

    async fn pause_service(
        &self,
        req: ::proto::api_container::PauseServiceArgs,
    ) -> Result<::tonic::Response<()>, ::tonic::Status> {
        let mut client =
            ::proto::api_container::api_container_service_client::ApiContainerServiceClient::new(
                self.channel.clone(),
            );
        client.pause_service(req).await
    }

    async fn unpause_service(
        &self,
        req: ::proto::api_container::UnpauseServiceArgs,
    ) -> Result<::tonic::Response<()>, ::tonic::Status> {
        let mut client =
            ::proto::api_container::api_container_service_client::ApiContainerServiceClient::new(
                self.channel.clone(),
            );
        client.unpause_service(req).await
    }

    async fn wait_for_http_get_endpoint_availability(
        &self,
        req: ::proto::api_container::WaitForHttpGetEndpointAvailabilityArgs,
    ) -> Result<::tonic::Response<()>, ::tonic::Status> {
        let mut client =
            ::proto::api_container::api_container_service_client::ApiContainerServiceClient::new(
                self.channel.clone(),
            );
        client.wait_for_http_get_endpoint_availability(req).await
    }

    async fn wait_for_http_post_endpoint_availability(
        &self,
        req: ::proto::api_container::WaitForHttpPostEndpointAvailabilityArgs,
    ) -> Result<::tonic::Response<()>, ::tonic::Status> {
        let mut client =
            ::proto::api_container::api_container_service_client::ApiContainerServiceClient::new(
                self.channel.clone(),
            );
        client.wait_for_http_post_endpoint_availability(req).await
    }

    async fn upload_files_artifact(
        &self,
        req: ::proto::api_container::UploadFilesArtifactArgs,
    ) -> Result<::tonic::Response<::proto::api_container::UploadFilesArtifactResponse>, ::tonic::Status> {
        let mut client =
            ::proto::api_container::api_container_service_client::ApiContainerServiceClient::new(
                self.channel.clone(),
            );
        client.upload_files_artifact(req).await
    }

    async fn store_web_files_artifact(
        &self,
        req: ::proto::api_container::StoreWebFilesArtifactArgs,
    ) -> Result<::tonic::Response<::proto::api_container::StoreWebFilesArtifactResponse>, ::tonic::Status> {
        let mut client =
            ::proto::api_container::api_container_service_client::ApiContainerServiceClient::new(
                self.channel.clone(),
            );
        client.store_web_files_artifact(req).await
    }

    async fn store_files_artifact_from_service(
        &self,
        req: ::proto::api_container::StoreFilesArtifactFromServiceArgs,
    ) -> Result<::tonic::Response<::proto::api_container::StoreFilesArtifactFromServiceResponse>, ::tonic::Status> {
        let mut client =
            ::proto::api_container::api_container_service_client::ApiContainerServiceClient::new(
                self.channel.clone(),
            );
        client.store_files_artifact_from_service(req).await
    }

    async fn render_templates_to_files_artifact(
        &self,
        req: ::proto::api_container::RenderTemplatesToFilesArtifactArgs,
    ) -> Result<::tonic::Response<::proto::api_container::RenderTemplatesToFilesArtifactResponse>, ::tonic::Status> {
        let mut client =
            ::proto::api_container::api_container_service_client::ApiContainerServiceClient::new(
                self.channel.clone(),
            );
        client.render_templates_to_files_artifact(req).await
    }
}
