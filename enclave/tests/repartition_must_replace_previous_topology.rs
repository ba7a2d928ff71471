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

//! Repartitioning sends the complete topology every time, so an earlier
//! topology never leaks into a later one.

mod common;

use common::FakeBackend;
use enclave::services::ServiceId;
use enclave::{
    EnclaveContext, EnclaveError, PartitionConnection, PartitionId,
    PartitionTopologyRequest, TopologyError,
};
use pretty_assertions::assert_eq;
use proto::api_container::{PartitionConnectionInfo, RepartitionArgs};
use std::collections::{BTreeMap, BTreeSet};

fn membership() -> BTreeMap<PartitionId, BTreeSet<ServiceId>> {
    BTreeMap::from([
        (PartitionId::from("frontend"), BTreeSet::from([ServiceId::from("web")])),
        (
            PartitionId::from("backend"),
            BTreeSet::from([ServiceId::from("api"), ServiceId::from("worker")]),
        ),
    ])
}

fn link<'a>(
    args: &'a RepartitionArgs,
    partition_a: &str,
    partition_b: &str,
) -> Option<&'a PartitionConnectionInfo> {
    args.partition_connections
        .get(partition_a)
        .and_then(|links| links.connection_info.get(partition_b))
}

#[tokio::test]
async fn repartition_must_discard_overrides_that_are_not_resent() {
    let backend = FakeBackend::new();
    let enclave = EnclaveContext::new(backend.clone(), "test-enclave");

    enclave
        .repartition_network(
            PartitionTopologyRequest::new(membership(), PartitionConnection::Unblocked)
                .with_connection("frontend", "backend", PartitionConnection::Blocked),
        )
        .await
        .expect("first repartition");
    enclave
        .repartition_network(PartitionTopologyRequest::new(
            membership(),
            PartitionConnection::Unblocked,
        ))
        .await
        .expect("second repartition");

    let repartitions = backend.repartitions();
    assert_eq!(repartitions.len(), 2);
    assert_eq!(
        link(&repartitions[0], "backend", "frontend"),
        Some(&PartitionConnection::Blocked.to_connection_info())
    );
    assert_eq!(
        link(&repartitions[1], "backend", "frontend"),
        Some(&PartitionConnection::Unblocked.to_connection_info())
    );
}

#[tokio::test]
async fn repartition_must_send_identical_topology_for_identical_requests() {
    let backend = FakeBackend::new();
    let enclave = EnclaveContext::new(backend.clone(), "test-enclave");
    let request = PartitionTopologyRequest::new(membership(), PartitionConnection::Blocked)
        .with_connection("backend", "frontend", PartitionConnection::soft(10.0, 50));

    for _ in 0..2 {
        enclave
            .repartition_network(request.clone())
            .await
            .expect("repartition");
    }

    let repartitions = backend.repartitions();
    assert_eq!(repartitions.len(), 2);
    assert_eq!(repartitions[0], repartitions[1]);
}

#[tokio::test]
async fn repartition_must_block_every_pair_under_blocked_default() {
    let backend = FakeBackend::new();
    let enclave = EnclaveContext::new(backend.clone(), "test-enclave");

    enclave
        .repartition_network(PartitionTopologyRequest::new(
            membership(),
            PartitionConnection::Blocked,
        ))
        .await
        .expect("repartition");

    let repartitions = backend.repartitions();
    let args = &repartitions[0];
    let blocked = PartitionConnection::Blocked.to_connection_info();
    assert_eq!(link(args, "backend", "frontend"), Some(&blocked));
    assert_eq!(args.partition_connections.len(), 1);
    assert_eq!(args.default_connection, Some(blocked));
    assert_eq!(args.partition_services.len(), 2);
}

#[tokio::test]
async fn repartition_must_not_invent_the_default_partition() {
    let backend = FakeBackend::new();
    let enclave = EnclaveContext::new(backend.clone(), "test-enclave");

    let err = enclave
        .repartition_network(
            PartitionTopologyRequest::new(membership(), PartitionConnection::Unblocked)
                .with_connection("backend", "", PartitionConnection::Blocked),
        )
        .await
        .expect_err("undeclared default partition must be rejected");
    assert!(matches!(
        err,
        EnclaveError::InvalidTopology(TopologyError::UnknownPartition { .. })
    ));

    enclave
        .repartition_network(PartitionTopologyRequest::new(
            membership(),
            PartitionConnection::Blocked,
        ))
        .await
        .expect("repartition");

    let repartitions = backend.repartitions();
    let args = &repartitions[0];
    assert!(!args.partition_connections.contains_key(""));
    assert!(args
        .partition_connections
        .values()
        .all(|links| !links.connection_info.contains_key("")));
}

#[tokio::test]
async fn repartition_must_connect_a_declared_default_partition() {
    let backend = FakeBackend::new();
    let enclave = EnclaveContext::new(backend.clone(), "test-enclave");
    let mut membership = membership();
    let _ = membership.insert(
        PartitionId::default_partition(),
        BTreeSet::from([ServiceId::from("db")]),
    );

    enclave
        .repartition_network(
            PartitionTopologyRequest::new(membership, PartitionConnection::Unblocked)
                .with_connection("backend", "", PartitionConnection::Blocked),
        )
        .await
        .expect("repartition");

    let repartitions = backend.repartitions();
    let args = &repartitions[0];
    assert_eq!(
        link(args, "", "backend"),
        Some(&PartitionConnection::Blocked.to_connection_info())
    );
    assert_eq!(
        link(args, "", "frontend"),
        Some(&PartitionConnection::Unblocked.to_connection_info())
    );
    assert_eq!(args.partition_services.len(), 3);
}

#[tokio::test]
async fn repartition_must_keep_lossless_soft_link_distinct_from_unblocked() {
    let backend = FakeBackend::new();
    let enclave = EnclaveContext::new(backend.clone(), "test-enclave");

    enclave
        .repartition_network(
            PartitionTopologyRequest::new(membership(), PartitionConnection::Unblocked)
                .with_connection("frontend", "backend", PartitionConnection::soft(0.0, 0)),
        )
        .await
        .expect("repartition");

    let repartitions = backend.repartitions();
    let args = &repartitions[0];
    assert_eq!(
        link(args, "backend", "frontend"),
        Some(&PartitionConnectionInfo {
            is_blocked: None,
            packet_loss_percentage: Some(0.0),
            packet_delay_ms: Some(0),
        })
    );
    assert_eq!(args.partition_connections.len(), 1);
}

#[tokio::test]
async fn repartition_must_not_reach_backend_with_conflicting_overrides() {
    let backend = FakeBackend::new();
    let enclave = EnclaveContext::new(backend.clone(), "test-enclave");

    let err = enclave
        .repartition_network(
            PartitionTopologyRequest::new(membership(), PartitionConnection::Unblocked)
                .with_connection("frontend", "backend", PartitionConnection::Blocked)
                .with_connection("backend", "frontend", PartitionConnection::soft(5.0, 0)),
        )
        .await
        .expect_err("conflicting overrides must be rejected");

    assert!(matches!(
        err,
        EnclaveError::InvalidTopology(TopologyError::ConflictingConnection { .. })
    ));
    assert!(backend.calls().is_empty());
}
