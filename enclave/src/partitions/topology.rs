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

use super::{
    ConnectionOverrides, ConnectionResolver, PartitionConnection, PartitionId,
    TopologyError,
};
use crate::backend::BackendGateway;
use crate::services::ServiceId;
use proto::api_container::{
    PartitionConnections, PartitionServices, RepartitionArgs,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, instrument};

/// What the caller wants the enclave's network to look like.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionTopologyRequest {
    /// Services placed in each partition. Services left out keep their
    /// current placement.
    pub membership: BTreeMap<PartitionId, BTreeSet<ServiceId>>,
    pub overrides: ConnectionOverrides,
    /// Applied to every pair of partitions without an override.
    pub default_connection: PartitionConnection,
}

impl PartitionTopologyRequest {
    pub fn new(
        membership: BTreeMap<PartitionId, BTreeSet<ServiceId>>,
        default_connection: PartitionConnection,
    ) -> Self {
        Self {
            membership,
            overrides: ConnectionOverrides::new(),
            default_connection,
        }
    }

    pub fn with_connection(
        mut self,
        partition_a: impl Into<PartitionId>,
        partition_b: impl Into<PartitionId>,
        connection: PartitionConnection,
    ) -> Self {
        let _ = self
            .overrides
            .entry(partition_a.into())
            .or_default()
            .insert(partition_b.into(), connection);
        self
    }
}

/// A validated [PartitionTopologyRequest].
///
/// Every pair of partitions named by the membership resolves to exactly one
/// connection. The default partition takes part only when the membership
/// names it.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionTopology {
    request: PartitionTopologyRequest,
}

impl PartitionTopology {
    pub fn new(request: PartitionTopologyRequest) -> Result<Self, TopologyError> {
        validate_membership(&request.membership)?;

        let known: BTreeSet<&PartitionId> = request.membership.keys().collect();
        for (partition_a, links) in &request.overrides {
            for (partition_b, connection) in links {
                if partition_a == partition_b {
                    return Err(TopologyError::SelfConnection {
                        partition_id: partition_a.clone(),
                    });
                }

                for partition_id in [partition_a, partition_b] {
                    if !known.contains(partition_id) {
                        return Err(TopologyError::UnknownPartition {
                            partition_id: partition_id.clone(),
                        });
                    }
                }

                connection.validate()?;

                let reverse = request
                    .overrides
                    .get(partition_b)
                    .and_then(|links| links.get(partition_a));
                if matches!(reverse, Some(reverse) if reverse != connection) {
                    let (first, second) = ordered(partition_a, partition_b);
                    return Err(TopologyError::ConflictingConnection {
                        partition_a: first.clone(),
                        partition_b: second.clone(),
                    });
                }
            }
        }

        request.default_connection.validate()?;

        Ok(Self { request })
    }

    pub fn membership(&self) -> &BTreeMap<PartitionId, BTreeSet<ServiceId>> {
        &self.request.membership
    }

    pub fn overrides(&self) -> &ConnectionOverrides {
        &self.request.overrides
    }

    pub fn default_connection(&self) -> PartitionConnection {
        self.request.default_connection
    }

    pub fn partitions(&self) -> BTreeSet<PartitionId> {
        self.request.membership.keys().cloned().collect()
    }

    pub fn resolver(&self) -> ConnectionResolver<'_> {
        ConnectionResolver::new(
            &self.request.overrides,
            self.request.default_connection,
        )
    }

    /// The connection of every unordered pair of partitions, keyed `(a, b)`
    /// with `a < b`.
    pub fn resolved_connections(
        &self,
    ) -> BTreeMap<(PartitionId, PartitionId), PartitionConnection> {
        let resolver = self.resolver();
        let partitions: Vec<PartitionId> = self.partitions().into_iter().collect();

        let mut resolved = BTreeMap::new();
        for (i, a) in partitions.iter().enumerate() {
            for b in &partitions[i + 1..] {
                let _ = resolved
                    .insert((a.clone(), b.clone()), resolver.resolve(a, b));
            }
        }
        resolved
    }

    /// The complete topology as the API container expects it.
    ///
    /// Connections are sent for every pair, keyed by the smaller partition,
    /// so nothing from an earlier topology survives on the other side.
    pub fn to_repartition_args(&self) -> RepartitionArgs {
        let partition_services = self
            .request
            .membership
            .iter()
            .map(|(partition_id, service_ids)| {
                let services = PartitionServices {
                    service_id_set: service_ids
                        .iter()
                        .map(ServiceId::to_string)
                        .collect(),
                };
                (partition_id.as_str().to_string(), services)
            })
            .collect();

        let mut partition_connections: HashMap<String, PartitionConnections> =
            HashMap::new();
        for ((partition_a, partition_b), connection) in self.resolved_connections()
        {
            let _ = partition_connections
                .entry(partition_a.into_inner())
                .or_default()
                .connection_info
                .insert(partition_b.into_inner(), connection.to_connection_info());
        }

        RepartitionArgs {
            partition_services,
            partition_connections,
            default_connection: Some(
                self.request.default_connection.to_connection_info(),
            ),
        }
    }

    /// Replaces the enclave's whole topology with this one.
    #[instrument(skip_all, fields(partitions = self.request.membership.len()))]
    pub async fn repartition(
        &self,
        backend: &dyn BackendGateway,
    ) -> crate::Result<()> {
        let args = self.to_repartition_args();
        debug!(
            connections = args
                .partition_connections
                .values()
                .map(|links| links.connection_info.len())
                .sum::<usize>(),
            "sending repartition"
        );
        backend.repartition(args).await?;
        Ok(())
    }
}

fn validate_membership(
    membership: &BTreeMap<PartitionId, BTreeSet<ServiceId>>,
) -> Result<(), TopologyError> {
    let mut placed: BTreeMap<&ServiceId, &PartitionId> = BTreeMap::new();
    for (partition_id, service_ids) in membership {
        for service_id in service_ids {
            if let Some(first) = placed.insert(service_id, partition_id) {
                return Err(TopologyError::ServiceInMultiplePartitions {
                    service_id: service_id.clone(),
                    first: first.clone(),
                    second: partition_id.clone(),
                });
            }
        }
    }
    Ok(())
}

fn ordered<'a>(
    a: &'a PartitionId,
    b: &'a PartitionId,
) -> (&'a PartitionId, &'a PartitionId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proto::api_container::PartitionConnectionInfo;
    use simple_test_case::test_case;

    fn services(ids: &[&str]) -> BTreeSet<ServiceId> {
        ids.iter().map(|id| ServiceId::from(*id)).collect()
    }

    fn three_partitions(default: PartitionConnection) -> PartitionTopologyRequest {
        PartitionTopologyRequest::new(
            BTreeMap::from([
                (PartitionId::from("frontend"), services(&["web"])),
                (PartitionId::from("backend"), services(&["api", "worker"])),
                (PartitionId::from("storage"), services(&["db"])),
            ]),
            default,
        )
    }

    #[test]
    fn blocked_default_blocks_every_pair_without_overrides() {
        let topology =
            PartitionTopology::new(three_partitions(PartitionConnection::Blocked))
                .expect("valid topology");

        let resolved = topology.resolved_connections();

        assert_eq!(resolved.len(), 3);
        assert!(resolved
            .values()
            .all(|connection| *connection == PartitionConnection::Blocked));
    }

    #[test]
    fn resolves_overrides_given_in_either_direction() {
        let request = three_partitions(PartitionConnection::Unblocked)
            .with_connection("storage", "backend", PartitionConnection::soft(5.0, 20))
            .with_connection("frontend", "storage", PartitionConnection::Blocked);
        let topology = PartitionTopology::new(request).expect("valid topology");

        let resolved = topology.resolved_connections();

        assert_eq!(
            resolved.get(&("backend".into(), "storage".into())),
            Some(&PartitionConnection::soft(5.0, 20))
        );
        assert_eq!(
            resolved.get(&("frontend".into(), "storage".into())),
            Some(&PartitionConnection::Blocked)
        );
        assert_eq!(
            resolved.get(&("backend".into(), "frontend".into())),
            Some(&PartitionConnection::Unblocked)
        );
    }

    #[test]
    fn accepts_identical_overrides_in_both_directions() {
        let request = three_partitions(PartitionConnection::Unblocked)
            .with_connection("frontend", "backend", PartitionConnection::Blocked)
            .with_connection("backend", "frontend", PartitionConnection::Blocked);

        assert!(PartitionTopology::new(request).is_ok());
    }

    #[test]
    fn override_may_name_the_default_partition_once_declared() {
        let mut request = three_partitions(PartitionConnection::Unblocked)
            .with_connection("", "storage", PartitionConnection::Blocked);
        let _ = request
            .membership
            .insert(PartitionId::default_partition(), BTreeSet::new());
        let topology = PartitionTopology::new(request).expect("valid topology");

        assert_eq!(
            topology
                .resolver()
                .resolve(&"storage".into(), &PartitionId::default_partition()),
            PartitionConnection::Blocked
        );
    }

    #[test_case(
        three_partitions(PartitionConnection::Unblocked)
            .with_connection("frontend", "backend", PartitionConnection::Blocked)
            .with_connection("backend", "frontend", PartitionConnection::Unblocked),
        TopologyError::ConflictingConnection { partition_a: "backend".into(), partition_b: "frontend".into() };
        "conflicting directions"
    )]
    #[test_case(
        three_partitions(PartitionConnection::Unblocked)
            .with_connection("frontend", "cache", PartitionConnection::Blocked),
        TopologyError::UnknownPartition { partition_id: "cache".into() };
        "unknown partition"
    )]
    #[test_case(
        three_partitions(PartitionConnection::Unblocked)
            .with_connection("", "storage", PartitionConnection::Blocked),
        TopologyError::UnknownPartition { partition_id: PartitionId::default_partition() };
        "undeclared default partition"
    )]
    #[test_case(
        three_partitions(PartitionConnection::Unblocked)
            .with_connection("frontend", "frontend", PartitionConnection::Blocked),
        TopologyError::SelfConnection { partition_id: "frontend".into() };
        "self connection"
    )]
    #[test_case(
        PartitionTopologyRequest::new(
            BTreeMap::from([
                (PartitionId::from("a"), services(&["shared"])),
                (PartitionId::from("b"), services(&["shared"])),
            ]),
            PartitionConnection::Unblocked,
        ),
        TopologyError::ServiceInMultiplePartitions { service_id: "shared".into(), first: "a".into(), second: "b".into() };
        "service placed twice"
    )]
    #[test_case(
        three_partitions(PartitionConnection::soft(150.0, 0)),
        TopologyError::InvalidPacketLoss { packet_loss_percentage: 150.0 };
        "default with invalid loss"
    )]
    fn rejects_invalid_requests(
        request: PartitionTopologyRequest,
        expected: TopologyError,
    ) {
        assert_eq!(PartitionTopology::new(request), Err(expected));
    }

    #[test]
    fn repartition_args_carry_every_declared_pair_and_the_default() {
        let request = PartitionTopologyRequest::new(
            BTreeMap::from([
                (PartitionId::from("isolated"), services(&["api"])),
                (PartitionId::default_partition(), services(&["web"])),
            ]),
            PartitionConnection::Unblocked,
        )
        .with_connection("isolated", "", PartitionConnection::Blocked);
        let topology = PartitionTopology::new(request).expect("valid topology");

        let args = topology.to_repartition_args();

        assert_eq!(
            args.partition_services.get("isolated").map(|s| &s.service_id_set),
            Some(&vec!["api".to_string()])
        );
        assert_eq!(args.partition_connections.len(), 1);
        assert_eq!(
            args.partition_connections
                .get("")
                .and_then(|links| links.connection_info.get("isolated")),
            Some(&PartitionConnectionInfo {
                is_blocked: Some(true),
                packet_loss_percentage: None,
                packet_delay_ms: None,
            })
        );
        assert_eq!(
            args.default_connection,
            Some(PartitionConnectionInfo::default())
        );
    }

    #[test]
    fn repartition_args_only_reference_declared_partitions() {
        let request = PartitionTopologyRequest::new(
            BTreeMap::from([
                (PartitionId::from("a"), services(&["s1"])),
                (PartitionId::from("b"), services(&["s2"])),
            ]),
            PartitionConnection::Blocked,
        );
        let topology = PartitionTopology::new(request).expect("valid topology");

        let args = topology.to_repartition_args();

        let declared: BTreeSet<&String> = args.partition_services.keys().collect();
        let referenced: BTreeSet<&String> = args
            .partition_connections
            .iter()
            .flat_map(|(from, links)| {
                std::iter::once(from).chain(links.connection_info.keys())
            })
            .collect();
        assert_eq!(referenced, declared);
        assert_eq!(
            args.partition_connections
                .get("a")
                .and_then(|links| links.connection_info.get("b"))
                .and_then(|info| info.is_blocked),
            Some(true)
        );
    }
}
