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

use crate::backend::BackendGateway;
use crate::error::Result;
use crate::services::ModuleId;
use proto::api_container::ExecuteModuleArgs;
use std::sync::Arc;
use tracing::instrument;

/// Handle to a module loaded into the enclave.
#[derive(Clone)]
pub struct ModuleContext {
    backend: Arc<dyn BackendGateway>,
    module_id: ModuleId,
}

impl ModuleContext {
    pub(crate) fn new(backend: Arc<dyn BackendGateway>, module_id: ModuleId) -> Self {
        Self { backend, module_id }
    }

    pub fn module_id(&self) -> &str {
        &self.module_id
    }

    /// Runs the module's execute command and returns its serialized result.
    /// The parameter and result formats are defined by the module.
    #[instrument(skip(self, serialized_params), fields(module_id = %self.module_id))]
    pub async fn execute(&self, serialized_params: &str) -> Result<String> {
        let args = ExecuteModuleArgs {
            module_id: self.module_id.clone(),
            serialized_params: serialized_params.to_string(),
        };
        let response = self.backend.execute_module(args).await?;
        Ok(response.serialized_result)
    }
}

impl std::fmt::Debug for ModuleContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleContext")
            .field("module_id", &self.module_id)
            .finish_non_exhaustive()
    }
}
