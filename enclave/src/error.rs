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

use crate::backend::BackendError;
use crate::partitions::{PartitionId, TopologyError};
use crate::services::{ModuleId, ServiceId};
use std::fmt::{Display, Formatter};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EnclaveError>;

#[derive(Debug, Error)]
pub enum EnclaveError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("backend inconsistency: {detail}")]
    BackendInconsistency { detail: String },
    #[error(
        "{source}; could not remove services that may still be running: {}",
        .unremoved.iter().map(ServiceId::as_str).collect::<Vec<_>>().join(", ")
    )]
    RollbackIncomplete {
        #[source]
        source: Box<EnclaveError>,
        unremoved: Vec<ServiceId>,
    },
    #[error(
        "service '{service_id}' could not be started in partition '{partition_id}': {reason}"
    )]
    ServiceStartFailed {
        service_id: ServiceId,
        partition_id: PartitionId,
        reason: FailureReason,
    },
    #[error("service '{service_id}' not found")]
    ServiceNotFound { service_id: ServiceId },
    #[error("module '{module_id}' not found")]
    ModuleNotFound { module_id: ModuleId },
    #[error("invalid partition topology: {0}")]
    InvalidTopology(#[from] TopologyError),
    #[error("at least one template is required to render a files artifact")]
    NoTemplates,
    #[error("data for template '{path}' could not be serialized: {source}")]
    TemplateData {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error(transparent)]
    Client(#[from] client::ClientError),
}

impl EnclaveError {
    pub(crate) fn inconsistency(detail: impl Into<String>) -> Self {
        Self::BackendInconsistency { detail: detail.into() }
    }
}

/// Why a single service of a provisioning batch did not end up running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The API container reported that the service failed to start.
    StartFailed(String),
    /// The API container reported the service as started, but what it
    /// reported about it was unusable.
    BackendInconsistency(String),
    /// The service had to be removed again and the removal failed too. The
    /// service may still be running.
    CleanupFailed { original: Box<FailureReason>, cleanup: String },
}

impl FailureReason {
    pub(crate) fn with_cleanup_failure(self, cleanup: impl Display) -> Self {
        Self::CleanupFailed {
            original: Box::new(self),
            cleanup: cleanup.to_string(),
        }
    }

    /// True when the service may have been left running.
    pub fn may_be_running(&self) -> bool {
        matches!(self, Self::CleanupFailed { .. })
    }
}

impl Display for FailureReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StartFailed(message) => f.write_str(message),
            Self::BackendInconsistency(detail) => {
                write!(f, "backend inconsistency: {detail}")
            }
            Self::CleanupFailed { original, cleanup } => {
                write!(f, "{original} AND {cleanup}")
            }
        }
    }
}
