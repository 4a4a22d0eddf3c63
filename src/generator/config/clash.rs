//! Clash configuration assembly
//!
//! Merges a node list into a template. The standard document fills the
//! dynamic groups; the Meta document adds geo data and sniffing on top.

use log::info;

use super::group::{group_generate, RegionNodes};
use crate::generator::exports::proxy_to_clash;
use crate::generator::yaml::clash::{
    ClashDocument, ClashGeoxUrl, ClashSniffProtocols, ClashSniffRule, ClashSniffer, SniffPort,
};
use crate::models::Proxy;

pub const GEOIP_URL: &str =
    "https://cdn.jsdelivr.net/gh/Loyalsoldier/v2ray-rules-dat@release/geoip.dat";
pub const GEOSITE_URL: &str =
    "https://cdn.jsdelivr.net/gh/Loyalsoldier/v2ray-rules-dat@release/geosite.dat";
pub const MMDB_URL: &str = "https://cdn.jsdelivr.net/gh/Loyalsoldier/geoip@release/Country.mmdb";

/// Assemble the standard document from `template` and `nodes`.
///
/// Proxies are replaced by `nodes` in order. The auto-select and region
/// groups receive node names; every other group keeps its template members.
pub fn generate_clash_config(template: ClashDocument, nodes: &[Proxy]) -> ClashDocument {
    let mut config = template;
    config.proxies = proxy_to_clash(nodes);

    let region_nodes = RegionNodes::from_nodes(nodes);
    group_generate(&mut config.proxy_groups, &region_nodes);

    info!(
        "Generated Clash config with {} proxies and {} groups",
        config.proxies.len(),
        config.proxy_groups.len()
    );
    config
}

fn meta_sniffer() -> ClashSniffer {
    let tls_ports = || vec![SniffPort::Port(443), SniffPort::Port(8443)];

    ClashSniffer {
        enable: true,
        sniff: ClashSniffProtocols {
            http: Some(ClashSniffRule {
                ports: vec![SniffPort::Port(80), SniffPort::Range("8080-8880".to_string())],
                override_destination: Some(true),
            }),
            tls: Some(ClashSniffRule {
                ports: tls_ports(),
                override_destination: None,
            }),
            quic: Some(ClashSniffRule {
                ports: tls_ports(),
                override_destination: None,
            }),
        },
        extra_options: Default::default(),
    }
}

/// Derive the Clash Meta document from a standard one.
///
/// Only the geo data and sniffer settings are set; proxies, groups and rules
/// are identical to `standard`.
pub fn generate_meta_config(standard: &ClashDocument) -> ClashDocument {
    let mut config = standard.clone();

    config.geodata_mode = Some(true);
    config.geox_url = Some(ClashGeoxUrl {
        geoip: GEOIP_URL.to_string(),
        geosite: GEOSITE_URL.to_string(),
        mmdb: MMDB_URL.to_string(),
    });
    config.sniffer = Some(meta_sniffer());

    config
}
