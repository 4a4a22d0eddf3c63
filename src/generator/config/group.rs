//! Group generation utilities
//!
//! Fills the node-bearing proxy groups of a template from the node list.

use std::collections::HashMap;

use log::debug;

use super::classify::classify_node;
use crate::generator::yaml::clash::ClashProxyGroup;
use crate::models::{Proxy, RegionTag, AUTO_SELECT_GROUP};

/// Node names bucketed by region, each bucket in node-list order.
#[derive(Debug, Default)]
pub struct RegionNodes {
    all: Vec<String>,
    by_region: HashMap<RegionTag, Vec<String>>,
}

impl RegionNodes {
    /// Classify every node once.
    pub fn from_nodes(nodes: &[Proxy]) -> Self {
        let mut region_nodes = RegionNodes::default();
        for node in nodes {
            let region = classify_node(&node.name);
            region_nodes.all.push(node.name.clone());
            region_nodes
                .by_region
                .entry(region)
                .or_default()
                .push(node.name.clone());
        }
        region_nodes
    }

    pub fn all(&self) -> &[String] {
        &self.all
    }

    /// Names classified into `region`.
    pub fn region(&self, region: RegionTag) -> &[String] {
        self.by_region.get(&region).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Members of a region group.
    ///
    /// An empty region borrows the first node so the group stays usable; with
    /// no nodes at all the group is empty.
    pub fn region_members(&self, region: RegionTag) -> Vec<String> {
        let names = self.region(region);
        if names.is_empty() {
            self.all.iter().take(1).cloned().collect()
        } else {
            names.to_vec()
        }
    }
}

/// Generates the member list of every dynamic group in place.
///
/// The auto-select group gets all nodes, each region group gets its region's
/// nodes. Other groups reference group names and are left untouched.
pub fn group_generate(groups: &mut [ClashProxyGroup], region_nodes: &RegionNodes) {
    for group in groups.iter_mut() {
        if group.name == AUTO_SELECT_GROUP {
            group.proxies = region_nodes.all().to_vec();
        } else if let Some(region) = RegionTag::from_group_name(&group.name) {
            group.proxies = region_nodes.region_members(region);
            debug!(
                "Group {} ({}) has {} members",
                group.name,
                region,
                group.proxies.len()
            );
        }
    }
}
