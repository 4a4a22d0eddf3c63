//! Proxy model definitions
//!
//! Contains the canonical node record produced by the scheme decoders and
//! consumed by the Clash generator.

use serde::{Deserialize, Serialize};

/// Represents the scheme of a proxy.
/// The set is closed: only the four schemes a subscription line can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyType {
    VMess,
    Vless,
    Shadowsocks,
    Trojan,
}

impl ProxyType {
    /// Get a human-readable name of the scheme.
    pub fn as_str(self) -> &'static str {
        match self {
            ProxyType::VMess => "VMess",
            ProxyType::Vless => "VLESS",
            ProxyType::Shadowsocks => "SS",
            ProxyType::Trojan => "Trojan",
        }
    }

    /// Link prefix that identifies the scheme in a subscription line.
    pub fn prefix(self) -> &'static str {
        match self {
            ProxyType::VMess => "vmess://",
            ProxyType::Vless => "vless://",
            ProxyType::Shadowsocks => "ss://",
            ProxyType::Trojan => "trojan://",
        }
    }

    /// Display name used when the link does not carry one.
    pub fn default_remark(self) -> &'static str {
        match self {
            ProxyType::VMess => VMESS_DEFAULT_REMARK,
            ProxyType::Vless => VLESS_DEFAULT_REMARK,
            ProxyType::Shadowsocks => SS_DEFAULT_REMARK,
            ProxyType::Trojan => TROJAN_DEFAULT_REMARK,
        }
    }

    /// Port used when the link does not carry one.
    pub fn default_port(self) -> u16 {
        match self {
            ProxyType::Shadowsocks => SS_DEFAULT_PORT,
            _ => TLS_DEFAULT_PORT,
        }
    }

    /// All supported schemes, in dispatch order.
    pub fn all() -> [ProxyType; 4] {
        [
            ProxyType::VMess,
            ProxyType::Vless,
            ProxyType::Shadowsocks,
            ProxyType::Trojan,
        ]
    }

    /// Find the scheme whose prefix starts `link`.
    pub fn from_link(link: &str) -> Option<ProxyType> {
        Self::all()
            .into_iter()
            .find(|proxy_type| link.starts_with(proxy_type.prefix()))
    }
}

/// Scheme-specific credential of a node.
///
/// Serialized untagged: the field names alone tell the variants apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProxyAuth {
    /// VMess and VLESS user id. `alter_id` and `cipher` only apply to VMess.
    Uuid {
        uuid: String,
        #[serde(rename = "alterId", default, skip_serializing_if = "Option::is_none")]
        alter_id: Option<u16>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cipher: Option<String>,
    },
    /// Shadowsocks cipher and password.
    Shadowsocks { method: String, password: String },
    /// Trojan password.
    Password { password: String },
}

impl ProxyAuth {
    pub fn uuid(&self) -> Option<&str> {
        match self {
            ProxyAuth::Uuid { uuid, .. } => Some(uuid),
            _ => None,
        }
    }

    pub fn password(&self) -> Option<&str> {
        match self {
            ProxyAuth::Shadowsocks { password, .. } | ProxyAuth::Password { password } => {
                Some(password)
            }
            ProxyAuth::Uuid { .. } => None,
        }
    }

    pub fn method(&self) -> Option<&str> {
        match self {
            ProxyAuth::Shadowsocks { method, .. } => Some(method),
            _ => None,
        }
    }
}

/// WebSocket transport options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WsOptions {
    pub path: String,
    pub host: String,
}

/// gRPC transport options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrpcOptions {
    pub service_name: String,
}

/// Stream transport beneath the proxy protocol.
///
/// The options shape is fixed by the variant, so a tcp node can never carry
/// WebSocket or gRPC options.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Tcp,
    Ws { options: WsOptions },
    Grpc { options: GrpcOptions },
}

impl Transport {
    /// Network name as written in links and Clash configs.
    pub fn network(&self) -> &'static str {
        match self {
            Transport::Tcp => "tcp",
            Transport::Ws { .. } => "ws",
            Transport::Grpc { .. } => "grpc",
        }
    }

    pub fn is_tcp(&self) -> bool {
        matches!(self, Transport::Tcp)
    }

    /// Build a transport from a network name and its raw options.
    ///
    /// Missing ws options fall back to `/` and `default_host`; unknown
    /// network names are kept as plain tcp.
    pub fn from_network(
        network: &str,
        path: Option<String>,
        host: Option<String>,
        service_name: Option<String>,
        default_host: &str,
    ) -> Self {
        match network {
            "ws" => Transport::Ws {
                options: WsOptions {
                    path: path.unwrap_or_else(|| "/".to_string()),
                    host: host.unwrap_or_else(|| default_host.to_string()),
                },
            },
            "grpc" => Transport::Grpc {
                options: GrpcOptions {
                    service_name: service_name.unwrap_or_default(),
                },
            },
            _ => Transport::Tcp,
        }
    }
}

/// TLS settings. Only populated when the link explicitly asks for TLS.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsSettings {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
}

impl TlsSettings {
    pub fn enabled(server_name: Option<String>) -> Self {
        TlsSettings {
            enabled: true,
            server_name: server_name.filter(|s| !s.is_empty()),
        }
    }
}

/// Scheme-specific optional fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraFlags {
    /// VLESS flow control, e.g. `xtls-rprx-vision`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,
    /// Shadowsocks SIP003 plugin name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,
    /// Plugin options in the format of `key1=value1;key2=value2`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_opts: Option<String>,
    /// Trojan `allowInsecure`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_cert_verify: Option<bool>,
}

impl ExtraFlags {
    pub fn is_empty(&self) -> bool {
        self == &ExtraFlags::default()
    }
}

/// Represents one decoded proxy node.
///
/// Records are built once by a decoder and not modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proxy {
    pub kind: ProxyType,
    pub name: String,
    pub server: String,
    pub port: u16,
    pub auth: ProxyAuth,
    #[serde(default)]
    pub transport: Transport,
    #[serde(default)]
    pub tls: TlsSettings,
    #[serde(default, skip_serializing_if = "ExtraFlags::is_empty")]
    pub extra_flags: ExtraFlags,
}

impl Proxy {
    /// Create a node with tcp transport, no TLS and no extra flags.
    ///
    /// An empty `name` is replaced with the scheme's default remark.
    pub fn new(
        kind: ProxyType,
        name: impl Into<String>,
        server: impl Into<String>,
        port: u16,
        auth: ProxyAuth,
    ) -> Self {
        let name = name.into();
        Proxy {
            kind,
            name: if name.is_empty() {
                kind.default_remark().to_string()
            } else {
                name
            },
            server: server.into(),
            port,
            auth,
            transport: Transport::Tcp,
            tls: TlsSettings::default(),
            extra_flags: ExtraFlags::default(),
        }
    }

    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_tls(mut self, tls: TlsSettings) -> Self {
        self.tls = tls;
        self
    }

    pub fn with_extra_flags(mut self, extra_flags: ExtraFlags) -> Self {
        self.extra_flags = extra_flags;
        self
    }
}

/// Default remarks as constants.
pub const VMESS_DEFAULT_REMARK: &str = "VMess节点";
pub const VLESS_DEFAULT_REMARK: &str = "VLESS节点";
pub const SS_DEFAULT_REMARK: &str = "SS节点";
pub const TROJAN_DEFAULT_REMARK: &str = "Trojan节点";

pub const TLS_DEFAULT_PORT: u16 = 443;
pub const SS_DEFAULT_PORT: u16 = 8388;
pub const SS_DEFAULT_CIPHER: &str = "aes-128-gcm";
pub const VMESS_DEFAULT_CIPHER: &str = "auto";
