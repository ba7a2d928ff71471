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

use crate::backend::{BackendError, BackendGateway};
use crate::services::ServiceId;
use proto::api_container::RemoveServiceArgs;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, error};

/// Services this call started and is responsible for removing unless they
/// are handed to the caller.
///
/// Dropping a `Rollback` that still holds services logs them, since they
/// may now be running with nobody tracking them.
#[derive(Debug, Default)]
pub(crate) struct Rollback {
    pending: BTreeSet<ServiceId>,
    released: BTreeSet<ServiceId>,
}

#[derive(Debug, Default)]
pub(crate) struct Sweep {
    pub(crate) removed: Vec<ServiceId>,
    pub(crate) failed: BTreeMap<ServiceId, BackendError>,
}

impl Rollback {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn acquire(&mut self, service_id: ServiceId) {
        let _ = self.pending.insert(service_id);
    }

    /// Hands the service over to the caller.
    pub(crate) fn release(&mut self, service_id: &ServiceId) {
        if let Some(service_id) = self.pending.take(service_id) {
            let _ = self.released.insert(service_id);
        }
    }

    /// Takes back every released service. Used when the call fails and the
    /// caller will never see them.
    pub(crate) fn reclaim_released(&mut self) {
        self.pending.append(&mut self.released);
    }

    /// Removes every service still pending, one remove call each.
    pub(crate) async fn sweep(mut self, backend: &dyn BackendGateway) -> Sweep {
        let mut sweep = Sweep::default();

        while let Some(service_id) = self.pending.first().cloned() {
            let args = RemoveServiceArgs { service_id: service_id.to_string() };
            let removal = backend.remove_service(args).await;
            let _ = self.pending.remove(&service_id);

            match removal {
                Ok(_) => {
                    debug!(%service_id, "rolled back service");
                    sweep.removed.push(service_id);
                }
                Err(e) => {
                    error!(%service_id, "failed to roll back service: {e}");
                    let _ = sweep.failed.insert(service_id, e);
                }
            }
        }

        sweep
    }

    #[cfg(test)]
    pub(crate) fn pending(&self) -> &BTreeSet<ServiceId> {
        &self.pending
    }
}

impl Drop for Rollback {
    fn drop(&mut self) {
        if !self.pending.is_empty() {
            error!(
                services = ?self.pending,
                "services were started but never rolled back"
            );
        }
    }
}
