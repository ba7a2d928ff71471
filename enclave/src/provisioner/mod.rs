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

//! Bulk service start with compensating rollback.

use crate::backend::BackendGateway;
use crate::error::{EnclaveError, FailureReason, Result};
use crate::partitions::PartitionId;
use crate::services::{ContainerConfig, ServiceContext, ServiceId};
use proto::api_container::{
    FailedServices, ServiceInfo, StartServicesArgs, StartServicesResponse,
    SuccessfulServices,
};
use rollback::Rollback;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, instrument, warn};

mod rollback;

/// Outcome of one provisioning call. Every requested service is in exactly
/// one of the two maps.
#[derive(Debug, Default)]
pub struct ServiceProvisioningResult {
    pub succeeded: BTreeMap<ServiceId, ServiceContext>,
    pub failed: BTreeMap<ServiceId, FailureReason>,
}

impl ServiceProvisioningResult {
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Starts batches of services and makes sure that every service it started
/// is either handed to the caller or removed again before it returns.
pub struct ServiceProvisioner<'a> {
    backend: &'a dyn BackendGateway,
}

impl<'a> ServiceProvisioner<'a> {
    pub fn new(backend: &'a dyn BackendGateway) -> Self {
        Self { backend }
    }

    /// Starts every configured service in `partition_id` with a single
    /// request.
    ///
    /// Services the API container fails to start, or reports unusable
    /// details for, are returned in `failed`. A response that cannot be
    /// matched against the request fails the whole call, after every
    /// service it started has been removed.
    #[instrument(skip_all, fields(%partition_id, services = configs.len()))]
    pub async fn provision(
        &self,
        configs: BTreeMap<ServiceId, ContainerConfig>,
        partition_id: &PartitionId,
    ) -> Result<ServiceProvisioningResult> {
        let requested: BTreeSet<ServiceId> = configs.keys().cloned().collect();
        let args = StartServicesArgs {
            service_ids_to_configs: configs
                .into_iter()
                .map(|(service_id, config)| {
                    (service_id.into_inner(), config.into())
                })
                .collect(),
            partition_id: partition_id.as_str().to_string(),
        };

        let StartServicesResponse { successful_services, failed_services } =
            self.backend.start_services(args).await?;

        let successful: Option<BTreeMap<ServiceId, ServiceInfo>> =
            successful_services.map(|SuccessfulServices { service_ids_to_service_info }| {
                service_ids_to_service_info
                    .into_iter()
                    .map(|(service_id, info)| (service_id.into(), info))
                    .collect()
            });
        let failed: Option<BTreeMap<ServiceId, String>> = failed_services.map(
            |FailedServices { service_ids_to_errors }| {
                service_ids_to_errors
                    .into_iter()
                    .map(|(service_id, message)| (service_id.into(), message))
                    .collect()
            },
        );

        let mut rollback = Rollback::new();
        for service_id in successful.iter().flat_map(BTreeMap::keys) {
            // Only services of this request are ours to remove.
            if requested.contains(service_id) {
                rollback.acquire(service_id.clone());
            }
        }

        let accounted = account(&requested, successful, failed, &mut rollback);
        if accounted.is_err() {
            rollback.reclaim_released();
        }
        let sweep = rollback.sweep(self.backend).await;

        let Accounting { succeeded, mut failed, mut downgraded } = match accounted
        {
            Ok(accounting) => accounting,
            Err(e) if sweep.failed.is_empty() => return Err(e),
            Err(e) => {
                return Err(EnclaveError::RollbackIncomplete {
                    source: Box::new(e),
                    unremoved: sweep.failed.into_keys().collect(),
                })
            }
        };

        for service_id in sweep.removed {
            let reason = downgraded
                .remove(&service_id)
                .unwrap_or_else(unaccounted_reason);
            let _ = failed.insert(service_id, reason);
        }
        for (service_id, cleanup_error) in sweep.failed {
            let reason = downgraded
                .remove(&service_id)
                .unwrap_or_else(unaccounted_reason)
                .with_cleanup_failure(&cleanup_error);
            let _ = failed.insert(service_id, reason);
        }

        info!(
            succeeded = succeeded.len(),
            failed = failed.len(),
            "provisioned services"
        );

        Ok(ServiceProvisioningResult { succeeded, failed })
    }
}

impl std::fmt::Debug for ServiceProvisioner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceProvisioner").finish_non_exhaustive()
    }
}

/// Sorting of one start response.
#[derive(Debug, Default)]
struct Accounting {
    succeeded: BTreeMap<ServiceId, ServiceContext>,
    failed: BTreeMap<ServiceId, FailureReason>,
    /// Reported as started, but unusable. These stay in the rollback.
    downgraded: BTreeMap<ServiceId, FailureReason>,
}

impl Accounting {
    fn contains(&self, service_id: &ServiceId) -> bool {
        self.succeeded.contains_key(service_id)
            || self.failed.contains_key(service_id)
            || self.downgraded.contains_key(service_id)
    }
}

fn account(
    requested: &BTreeSet<ServiceId>,
    successful: Option<BTreeMap<ServiceId, ServiceInfo>>,
    failed: Option<BTreeMap<ServiceId, String>>,
    rollback: &mut Rollback,
) -> Result<Accounting> {
    let successful = successful.ok_or_else(|| {
        EnclaveError::inconsistency("start response has no successful services")
    })?;
    let failed = failed.ok_or_else(|| {
        EnclaveError::inconsistency("start response has no failed services")
    })?;

    let mut accounting = Accounting::default();

    for (service_id, message) in failed {
        if !requested.contains(&service_id) {
            return Err(EnclaveError::inconsistency(format!(
                "failure reported for service '{service_id}' that was not requested"
            )));
        }
        if successful.contains_key(&service_id) {
            return Err(EnclaveError::inconsistency(format!(
                "service '{service_id}' reported as both started and failed"
            )));
        }
        let _ = accounting
            .failed
            .insert(service_id, FailureReason::StartFailed(message));
    }

    for (service_id, info) in successful {
        if !requested.contains(&service_id) {
            return Err(EnclaveError::inconsistency(format!(
                "service '{service_id}' reported as started but was not requested"
            )));
        }

        match ServiceContext::from_service_info(service_id.clone(), info) {
            Ok(context) => {
                rollback.release(&service_id);
                let _ = accounting.succeeded.insert(service_id, context);
            }
            Err(e) => {
                warn!(%service_id, "service reported as started is unusable: {e}");
                let _ = accounting.downgraded.insert(
                    service_id,
                    FailureReason::BackendInconsistency(e.to_string()),
                );
            }
        }
    }

    if let Some(service_id) =
        requested.iter().find(|service_id| !accounting.contains(service_id))
    {
        return Err(EnclaveError::inconsistency(format!(
            "service '{service_id}' was requested but not reported"
        )));
    }

    Ok(accounting)
}

fn unaccounted_reason() -> FailureReason {
    FailureReason::BackendInconsistency(
        "service was started but never accounted for".to_string(),
    )
}
