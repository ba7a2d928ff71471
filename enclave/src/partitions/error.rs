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

use super::PartitionId;
use crate::services::ServiceId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TopologyError {
    #[error(
        "connection between '{partition_a}' and '{partition_b}' is given twice with different values"
    )]
    ConflictingConnection { partition_a: PartitionId, partition_b: PartitionId },
    #[error("connection override names unknown partition '{partition_id}'")]
    UnknownPartition { partition_id: PartitionId },
    #[error("partition '{partition_id}' cannot have a connection to itself")]
    SelfConnection { partition_id: PartitionId },
    #[error(
        "service '{service_id}' is placed in both '{first}' and '{second}'"
    )]
    ServiceInMultiplePartitions {
        service_id: ServiceId,
        first: PartitionId,
        second: PartitionId,
    },
    #[error(
        "packet loss {packet_loss_percentage}% is outside the range 0 to 100"
    )]
    InvalidPacketLoss { packet_loss_percentage: f32 },
}
