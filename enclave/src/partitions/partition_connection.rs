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

use super::TopologyError;
use proto::api_container::PartitionConnectionInfo;

/// Network conditions between two partitions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PartitionConnection {
    /// Full connectivity.
    #[default]
    Unblocked,
    /// All traffic between the two partitions is dropped.
    Blocked,
    /// A degraded link.
    Soft { packet_loss_percentage: f32, packet_delay_ms: u32 },
}

impl PartitionConnection {
    pub fn soft(packet_loss_percentage: f32, packet_delay_ms: u32) -> Self {
        Self::Soft { packet_loss_percentage, packet_delay_ms }
    }

    /// Projects the connection onto the wire record.
    ///
    /// `Soft { 0, 0 }` keeps its zero fields populated, so it never looks
    /// like `Unblocked`, whose fields are all absent.
    pub fn to_connection_info(&self) -> PartitionConnectionInfo {
        match *self {
            Self::Unblocked => PartitionConnectionInfo::default(),
            Self::Blocked => PartitionConnectionInfo {
                is_blocked: Some(true),
                ..Default::default()
            },
            Self::Soft { packet_loss_percentage, packet_delay_ms } => {
                PartitionConnectionInfo {
                    is_blocked: None,
                    packet_loss_percentage: Some(packet_loss_percentage),
                    packet_delay_ms: Some(packet_delay_ms),
                }
            }
        }
    }

    pub(crate) fn validate(&self) -> Result<(), TopologyError> {
        match *self {
            Self::Soft { packet_loss_percentage, .. }
                if !(0.0..=100.0).contains(&packet_loss_percentage) =>
            {
                Err(TopologyError::InvalidPacketLoss {
                    packet_loss_percentage,
                })
            }
            _ => Ok(()),
        }
    }
}
