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

use super::{PartitionConnection, PartitionId};
use std::collections::BTreeMap;

/// Sparse connection overrides, `overrides[a][b]` for the link between `a`
/// and `b`. The link is symmetric, so either direction may be given.
pub type ConnectionOverrides =
    BTreeMap<PartitionId, BTreeMap<PartitionId, PartitionConnection>>;

/// Resolves the connection between two partitions from the overrides,
/// falling back to the default connection.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionResolver<'a> {
    overrides: &'a ConnectionOverrides,
    default_connection: PartitionConnection,
}

impl<'a> ConnectionResolver<'a> {
    pub fn new(
        overrides: &'a ConnectionOverrides,
        default_connection: PartitionConnection,
    ) -> Self {
        Self { overrides, default_connection }
    }

    /// The override for the pair, checking `a -> b` before `b -> a`.
    pub fn explicit(
        &self,
        a: &PartitionId,
        b: &PartitionId,
    ) -> Option<PartitionConnection> {
        self.lookup(a, b).or_else(|| self.lookup(b, a))
    }

    pub fn resolve(&self, a: &PartitionId, b: &PartitionId) -> PartitionConnection {
        self.explicit(a, b).unwrap_or(self.default_connection)
    }

    pub fn default_connection(&self) -> PartitionConnection {
        self.default_connection
    }

    fn lookup(
        &self,
        from: &PartitionId,
        to: &PartitionId,
    ) -> Option<PartitionConnection> {
        self.overrides.get(from).and_then(|links| links.get(to)).copied()
    }
}
