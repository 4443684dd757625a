//! Snapshot of the cluster topology discovered on connect.

use std::fmt;
use std::net::SocketAddr;

use scylla::cluster::ClusterState;

/// Cluster name and the nodes known to the driver right after connecting.
///
/// This is a copy taken once; the driver keeps refreshing its own view
/// in the background, but the snapshot does not change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterInfo {
    /// Value of `cluster_name` in `system.local` of the contacted node.
    pub cluster_name: Option<String>,
    /// Every node the driver discovered.
    pub nodes: Vec<NodeInfo>,
}

/// Placement of a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    /// Datacenter of the node, if known.
    pub datacenter: Option<String>,
    /// Address the driver connects to.
    pub address: SocketAddr,
    /// Rack of the node, if known.
    pub rack: Option<String>,
}

impl ClusterInfo {
    pub(crate) fn new(cluster_name: Option<String>, state: &ClusterState) -> Self {
        let mut nodes: Vec<NodeInfo> = state
            .get_nodes_info()
            .iter()
            .map(|node| NodeInfo {
                datacenter: node.datacenter.clone(),
                address: SocketAddr::new(node.address.ip(), node.address.port()),
                rack: node.rack.clone(),
            })
            .collect();
        nodes.sort_by(|a, b| {
            (&a.datacenter, &a.rack, a.address).cmp(&(&b.datacenter, &b.rack, b.address))
        });

        ClusterInfo {
            cluster_name,
            nodes,
        }
    }
}

/// Prints the summary the demo shows after connecting:
/// the cluster name followed by one line per node.
impl fmt::Display for ClusterInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Connected to cluster: {}",
            self.cluster_name.as_deref().unwrap_or(UNKNOWN)
        )?;
        for node in &self.nodes {
            write!(f, "\n{node}")?;
        }
        Ok(())
    }
}

impl fmt::Display for NodeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Datacenter: {}; Host: {}; Rack: {}",
            self.datacenter.as_deref().unwrap_or(UNKNOWN),
            self.address,
            self.rack.as_deref().unwrap_or(UNKNOWN)
        )
    }
}

const UNKNOWN: &str = "<unknown>";
