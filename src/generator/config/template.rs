//! Base configuration templates
//!
//! A template is a [`ClashDocument`] without proxies. It comes either from a
//! YAML file or from the built-in default below.

use std::io;
use std::path::Path;

use log::{debug, warn};
use serde_yaml::Mapping;
use thiserror::Error;

use crate::generator::yaml::clash::{ClashDns, ClashDnsFallbackFilter, ClashDocument, ClashProxyGroup};
use crate::models::proxy_group_config::{
    DEFAULT_TEST_INTERVAL, DEFAULT_TEST_URL, DIRECT_GROUP, FINAL_GROUP, NODE_SELECT_GROUP,
    REJECT_GROUP,
};
use crate::models::{RegionTag, AUTO_SELECT_GROUP};
use crate::utils::file_get;

/// Errors raised while loading a template file
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse template: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

const FAKE_IP_FILTER: &[&str] = &[
    "*.lan",
    "*.local",
    "*.localhost",
    "*.localhost.localdomain",
    "*.localdomain",
    "localhost.ptlogin2.qq.com",
    "+.stun.*.*",
    "+.stun.*.*.*",
    "+.stun.*.*.*.*",
    "+.stun.*.*.*.*.*",
    "lens.l.google.com",
    "stun.l.google.com",
    "time.windows.com",
    "time.nist.gov",
    "time.apple.com",
    "time.asia.apple.com",
    "ntp.ubuntu.com",
];

const NAMESERVERS: &[&str] = &["223.5.5.5", "119.29.29.29", "1.1.1.1", "8.8.8.8"];
const FALLBACK_NAMESERVERS: &[&str] = &["tls://1.1.1.1:853", "tls://8.8.8.8:853"];

const BASE_RULES: &[&str] = &[
    "DOMAIN-SUFFIX,local,🎯 全球直连",
    "IP-CIDR,127.0.0.0/8,🎯 全球直连",
    "IP-CIDR,172.16.0.0/12,🎯 全球直连",
    "IP-CIDR,192.168.0.0/16,🎯 全球直连",
    "IP-CIDR,10.0.0.0/8,🎯 全球直连",
    "GEOIP,CN,🎯 全球直连",
    "MATCH,🐟 漏网之鱼",
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn default_dns() -> ClashDns {
    ClashDns {
        enable: Some(true),
        ipv6: Some(false),
        enhanced_mode: Some("fake-ip".to_string()),
        fake_ip_range: Some("198.18.0.1/16".to_string()),
        fake_ip_filter: Some(strings(FAKE_IP_FILTER)),
        nameserver: Some(strings(NAMESERVERS)),
        fallback: Some(strings(FALLBACK_NAMESERVERS)),
        fallback_filter: Some(ClashDnsFallbackFilter {
            geoip: Some(true),
            geoip_code: Some("CN".to_string()),
            ipcidr: Some(vec!["240.0.0.0/4".to_string()]),
            domain: None,
            extra_options: Mapping::new(),
        }),
        extra_options: Mapping::new(),
    }
}

fn default_groups() -> Vec<ClashProxyGroup> {
    let region_groups: Vec<&str> = RegionTag::GROUPED
        .iter()
        .filter_map(|region| region.group_name())
        .collect();

    let mut node_select = vec![AUTO_SELECT_GROUP];
    node_select.extend(&region_groups);
    node_select.push("DIRECT");

    let mut groups = vec![
        ClashProxyGroup::select(NODE_SELECT_GROUP, &node_select),
        ClashProxyGroup::url_test(AUTO_SELECT_GROUP, DEFAULT_TEST_URL, DEFAULT_TEST_INTERVAL),
    ];
    groups.extend(
        region_groups
            .iter()
            .map(|name| ClashProxyGroup::url_test(name, DEFAULT_TEST_URL, DEFAULT_TEST_INTERVAL)),
    );
    groups.push(ClashProxyGroup::select(DIRECT_GROUP, &["DIRECT", NODE_SELECT_GROUP]));
    groups.push(ClashProxyGroup::select(REJECT_GROUP, &["REJECT", "DIRECT"]));
    groups.push(ClashProxyGroup::select(
        FINAL_GROUP,
        &[NODE_SELECT_GROUP, DIRECT_GROUP, AUTO_SELECT_GROUP],
    ));
    groups
}

/// The built-in template: listen ports, a fake-ip DNS block, the group
/// skeleton and the baseline rules.
pub fn default_template() -> ClashDocument {
    ClashDocument {
        port: Some(7890),
        socks_port: Some(7891),
        mixed_port: Some(7892),
        allow_lan: Some(true),
        bind_address: Some("*".to_string()),
        mode: Some("rule".to_string()),
        log_level: Some("info".to_string()),
        ipv6: Some(false),
        external_controller: Some("127.0.0.1:9090".to_string()),
        dns: Some(default_dns()),
        extra_options: Mapping::new(),
        proxies: Vec::new(),
        proxy_groups: default_groups(),
        rules: strings(BASE_RULES),
        geodata_mode: None,
        geox_url: None,
        sniffer: None,
    }
}

/// Parse template YAML. Proxies listed in the template are discarded.
pub fn parse_template(content: &str) -> Result<ClashDocument, TemplateError> {
    let mut template: ClashDocument = serde_yaml::from_str(content)?;
    template.extra_options.remove("proxies");
    Ok(template)
}

/// Load a template file.
pub fn load_template(path: impl AsRef<Path>) -> Result<ClashDocument, TemplateError> {
    let content = file_get(path)?;
    parse_template(&content)
}

/// Load a template file, falling back to [`default_template`] when the file
/// is absent or unparsable.
pub fn load_template_or_default(path: impl AsRef<Path>) -> ClashDocument {
    let path = path.as_ref();
    if !path.exists() {
        debug!("Template {} not found, using built-in default", path.display());
        return default_template();
    }

    match load_template(path) {
        Ok(template) => template,
        Err(e) => {
            warn!(
                "Failed to load template {}: {}, using built-in default",
                path.display(),
                e
            );
            default_template()
        }
    }
}
