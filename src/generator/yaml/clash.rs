use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

use crate::models::ProxyGroupType;

fn is_empty_option_string(s: &Option<String>) -> bool {
    s.as_deref().map_or(true, str::is_empty)
}

/// Represents a complete Clash configuration document
///
/// The same type holds a loaded template (with no proxies) and an assembled
/// output. Keys the typed fields do not cover are kept in `extra_options`,
/// in their original order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashDocument {
    // General settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socks_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mixed_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_lan: Option<bool>,
    #[serde(default, skip_serializing_if = "is_empty_option_string")]
    pub bind_address: Option<String>,
    #[serde(default, skip_serializing_if = "is_empty_option_string")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "is_empty_option_string")]
    pub log_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<bool>,
    #[serde(default, skip_serializing_if = "is_empty_option_string")]
    pub external_controller: Option<String>,

    // DNS settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns: Option<ClashDns>,

    #[serde(flatten)]
    pub extra_options: Mapping,

    // Proxy settings
    #[serde(default, skip_deserializing)]
    pub proxies: Vec<ClashProxy>,

    #[serde(default)]
    pub proxy_groups: Vec<ClashProxyGroup>,

    #[serde(default)]
    pub rules: Vec<String>,

    // Clash Meta settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geodata_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geox_url: Option<ClashGeoxUrl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sniffer: Option<ClashSniffer>,
}

impl ClashDocument {
    /// Serialize the document as YAML, keeping field order.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Find a proxy group by name.
    pub fn group(&self, name: &str) -> Option<&ClashProxyGroup> {
        self.proxy_groups.iter().find(|group| group.name == name)
    }
}

/// DNS configuration for Clash
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashDns {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<bool>,
    #[serde(default, skip_serializing_if = "is_empty_option_string")]
    pub enhanced_mode: Option<String>,
    #[serde(default, skip_serializing_if = "is_empty_option_string")]
    pub fake_ip_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fake_ip_filter: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nameserver: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_filter: Option<ClashDnsFallbackFilter>,
    #[serde(flatten)]
    pub extra_options: Mapping,
}

/// DNS fallback filter configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashDnsFallbackFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geoip: Option<bool>,
    #[serde(default, skip_serializing_if = "is_empty_option_string")]
    pub geoip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipcidr: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra_options: Mapping,
}

/// Remote geo database locations used by Clash Meta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClashGeoxUrl {
    pub geoip: String,
    pub geosite: String,
    pub mmdb: String,
}

/// Traffic sniffing settings of Clash Meta
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClashSniffer {
    #[serde(default)]
    pub enable: bool,
    #[serde(default)]
    pub sniff: ClashSniffProtocols,
    #[serde(flatten)]
    pub extra_options: Mapping,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClashSniffProtocols {
    #[serde(rename = "HTTP", default, skip_serializing_if = "Option::is_none")]
    pub http: Option<ClashSniffRule>,
    #[serde(rename = "TLS", default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<ClashSniffRule>,
    #[serde(rename = "QUIC", default, skip_serializing_if = "Option::is_none")]
    pub quic: Option<ClashSniffRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashSniffRule {
    pub ports: Vec<SniffPort>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_destination: Option<bool>,
}

/// A single port or a `start-end` range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SniffPort {
    Port(u16),
    Range(String),
}

/// Common proxy options that can be used across different proxy types
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CommonProxyOptions {
    pub name: String,
    pub server: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_cert_verify: Option<bool>,
}

/// Factory methods for CommonProxyOptions
impl CommonProxyOptions {
    /// Create a new CommonProxyOptions with default values
    pub fn new(name: String, server: String, port: u16) -> Self {
        Self {
            name,
            server,
            port,
            udp: None,
            tls: None,
            skip_cert_verify: None,
        }
    }

    /// Create a builder for CommonProxyOptions
    pub fn builder(name: String, server: String, port: u16) -> CommonProxyOptionsBuilder {
        CommonProxyOptionsBuilder {
            common: Self::new(name, server, port),
        }
    }
}

/// Builder for CommonProxyOptions
pub struct CommonProxyOptionsBuilder {
    common: CommonProxyOptions,
}

impl CommonProxyOptionsBuilder {
    /// Set UDP option
    pub fn udp(mut self, value: bool) -> Self {
        self.common.udp = Some(value);
        self
    }

    /// Set TLS option
    pub fn tls(mut self, value: bool) -> Self {
        self.common.tls = Some(value);
        self
    }

    /// Set skip_cert_verify option
    pub fn skip_cert_verify(mut self, value: bool) -> Self {
        self.common.skip_cert_verify = Some(value);
        self
    }

    /// Build the final CommonProxyOptions
    pub fn build(self) -> CommonProxyOptions {
        self.common
    }
}

/// `ws-opts` of a proxy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClashWsOpts {
    pub path: String,
    pub headers: ClashWsHeaders,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClashWsHeaders {
    #[serde(rename = "Host")]
    pub host: String,
}

/// `grpc-opts` of a proxy
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashGrpcOpts {
    pub grpc_service_name: String,
}

/// Represents a single proxy in Clash configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClashProxy {
    #[serde(rename = "vmess")]
    VMess {
        #[serde(flatten)]
        common: CommonProxyOptions,
        uuid: String,
        #[serde(rename = "alterId")]
        alter_id: u16,
        cipher: String,
        network: String,
        #[serde(rename = "ws-opts", skip_serializing_if = "Option::is_none")]
        ws_opts: Option<ClashWsOpts>,
        #[serde(rename = "grpc-opts", skip_serializing_if = "Option::is_none")]
        grpc_opts: Option<ClashGrpcOpts>,
        #[serde(skip_serializing_if = "Option::is_none")]
        servername: Option<String>,
    },
    #[serde(rename = "vless")]
    Vless {
        #[serde(flatten)]
        common: CommonProxyOptions,
        uuid: String,
        network: String,
        #[serde(rename = "ws-opts", skip_serializing_if = "Option::is_none")]
        ws_opts: Option<ClashWsOpts>,
        #[serde(rename = "grpc-opts", skip_serializing_if = "Option::is_none")]
        grpc_opts: Option<ClashGrpcOpts>,
        #[serde(skip_serializing_if = "Option::is_none")]
        servername: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        flow: Option<String>,
    },
    #[serde(rename = "ss")]
    Shadowsocks {
        #[serde(flatten)]
        common: CommonProxyOptions,
        cipher: String,
        password: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        plugin: Option<String>,
        #[serde(rename = "plugin-opts", skip_serializing_if = "Option::is_none")]
        plugin_opts: Option<Mapping>,
    },
    #[serde(rename = "trojan")]
    Trojan {
        #[serde(flatten)]
        common: CommonProxyOptions,
        password: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        sni: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        network: Option<String>,
        #[serde(rename = "ws-opts", skip_serializing_if = "Option::is_none")]
        ws_opts: Option<ClashWsOpts>,
        #[serde(rename = "grpc-opts", skip_serializing_if = "Option::is_none")]
        grpc_opts: Option<ClashGrpcOpts>,
    },
}

impl ClashProxy {
    /// Get a reference to the common options
    pub fn common(&self) -> &CommonProxyOptions {
        match self {
            ClashProxy::VMess { common, .. } => common,
            ClashProxy::Vless { common, .. } => common,
            ClashProxy::Shadowsocks { common, .. } => common,
            ClashProxy::Trojan { common, .. } => common,
        }
    }

    pub fn name(&self) -> &str {
        &self.common().name
    }
}

/// Represents a proxy group in Clash configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashProxyGroup {
    pub name: String,
    #[serde(rename = "type")]
    pub group_type: ProxyGroupType,
    #[serde(default, skip_serializing_if = "is_empty_option_string")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    #[serde(default)]
    pub proxies: Vec<String>,
    #[serde(flatten)]
    pub extra_options: Mapping,
}

impl ClashProxyGroup {
    /// Create a select group over `proxies`
    pub fn select(name: &str, proxies: &[&str]) -> Self {
        ClashProxyGroup {
            name: name.to_string(),
            group_type: ProxyGroupType::Select,
            url: None,
            interval: None,
            proxies: proxies.iter().map(|p| p.to_string()).collect(),
            extra_options: Mapping::new(),
        }
    }

    /// Create an empty url-test group probing `url` every `interval` seconds
    pub fn url_test(name: &str, url: &str, interval: u32) -> Self {
        ClashProxyGroup {
            name: name.to_string(),
            group_type: ProxyGroupType::URLTest,
            url: Some(url.to_string()),
            interval: Some(interval),
            proxies: Vec::new(),
            extra_options: Mapping::new(),
        }
    }
}
