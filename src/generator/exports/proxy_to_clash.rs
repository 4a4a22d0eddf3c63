use std::collections::HashMap;

use serde_yaml::{Mapping, Value};

use crate::generator::yaml::clash::{
    ClashGrpcOpts, ClashProxy, ClashWsHeaders, ClashWsOpts, CommonProxyOptions,
};
use crate::models::{Proxy, ProxyAuth, ProxyType, Transport, SS_DEFAULT_CIPHER, VMESS_DEFAULT_CIPHER};

impl From<&Proxy> for ClashProxy {
    fn from(node: &Proxy) -> Self {
        match node.kind {
            ProxyType::VMess => handle_vmess(node),
            ProxyType::Vless => handle_vless(node),
            ProxyType::Shadowsocks => handle_shadowsocks(node),
            ProxyType::Trojan => handle_trojan(node),
        }
    }
}

/// Convert every node, keeping order.
pub fn proxy_to_clash(nodes: &[Proxy]) -> Vec<ClashProxy> {
    nodes.iter().map(ClashProxy::from).collect()
}

fn build_common_proxy_options(node: &Proxy) -> CommonProxyOptions {
    let mut builder =
        CommonProxyOptions::builder(node.name.clone(), node.server.clone(), node.port).udp(true);
    if node.kind != ProxyType::Trojan && node.tls.enabled {
        builder = builder.tls(true);
    }
    builder.build()
}

fn transport_opts(transport: &Transport) -> (Option<ClashWsOpts>, Option<ClashGrpcOpts>) {
    match transport {
        Transport::Tcp => (None, None),
        Transport::Ws { options } => (
            Some(ClashWsOpts {
                path: options.path.clone(),
                headers: ClashWsHeaders {
                    host: options.host.clone(),
                },
            }),
            None,
        ),
        Transport::Grpc { options } => (
            None,
            Some(ClashGrpcOpts {
                grpc_service_name: options.service_name.clone(),
            }),
        ),
    }
}

fn handle_vmess(node: &Proxy) -> ClashProxy {
    let (uuid, alter_id, cipher) = match &node.auth {
        ProxyAuth::Uuid {
            uuid,
            alter_id,
            cipher,
        } => (
            uuid.clone(),
            alter_id.unwrap_or(0),
            cipher
                .clone()
                .unwrap_or_else(|| VMESS_DEFAULT_CIPHER.to_string()),
        ),
        _ => (String::new(), 0, VMESS_DEFAULT_CIPHER.to_string()),
    };
    let (ws_opts, grpc_opts) = transport_opts(&node.transport);

    ClashProxy::VMess {
        common: build_common_proxy_options(node),
        uuid,
        alter_id,
        cipher,
        network: node.transport.network().to_string(),
        ws_opts,
        grpc_opts,
        servername: node.tls.server_name.clone(),
    }
}

fn handle_vless(node: &Proxy) -> ClashProxy {
    let (ws_opts, grpc_opts) = transport_opts(&node.transport);

    ClashProxy::Vless {
        common: build_common_proxy_options(node),
        uuid: node.auth.uuid().unwrap_or_default().to_string(),
        network: node.transport.network().to_string(),
        ws_opts,
        grpc_opts,
        servername: node.tls.server_name.clone(),
        flow: node.extra_flags.flow.clone(),
    }
}

fn handle_shadowsocks(node: &Proxy) -> ClashProxy {
    let (plugin, plugin_opts) = match node.extra_flags.plugin.as_deref() {
        Some(name) => {
            let options = parse_plugin_options(node.extra_flags.plugin_opts.as_deref());
            convert_plugin(name, &options)
        }
        None => (None, None),
    };

    ClashProxy::Shadowsocks {
        common: build_common_proxy_options(node),
        cipher: node
            .auth
            .method()
            .unwrap_or(SS_DEFAULT_CIPHER)
            .to_string(),
        password: node.auth.password().unwrap_or_default().to_string(),
        plugin,
        plugin_opts,
    }
}

fn handle_trojan(node: &Proxy) -> ClashProxy {
    let (ws_opts, grpc_opts) = transport_opts(&node.transport);
    let network = (!node.transport.is_tcp()).then(|| node.transport.network().to_string());

    let common = CommonProxyOptions::builder(node.name.clone(), node.server.clone(), node.port)
        .udp(true)
        .skip_cert_verify(node.extra_flags.skip_cert_verify.unwrap_or(false))
        .build();

    ClashProxy::Trojan {
        common,
        password: node.auth.password().unwrap_or_default().to_string(),
        sni: node.tls.server_name.clone(),
        network,
        ws_opts,
        grpc_opts,
    }
}

/// Split `key1=value1;key2=value2` plugin options; bare keys map to an empty value.
fn parse_plugin_options(options: Option<&str>) -> HashMap<String, String> {
    options
        .unwrap_or("")
        .split(';')
        .filter(|item| !item.is_empty())
        .map(|item| match item.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (item.to_string(), String::new()),
        })
        .collect()
}

/// Map a SIP003 plugin to the name and options Clash understands.
fn convert_plugin(
    name: &str,
    options: &HashMap<String, String>,
) -> (Option<String>, Option<Mapping>) {
    let mut opts = Mapping::new();
    let mut insert = |key: &str, value: Value| {
        opts.insert(Value::String(key.to_string()), value);
    };
    let get = |key: &str| options.get(key).filter(|v| !v.is_empty()).cloned();

    match name {
        "simple-obfs" | "obfs-local" => {
            insert("mode", Value::String(get("obfs").unwrap_or_default()));
            if let Some(host) = get("obfs-host") {
                insert("host", Value::String(host));
            }
            (Some("obfs".to_string()), Some(opts))
        }
        "v2ray-plugin" => {
            for key in ["mode", "host", "path"] {
                if let Some(value) = get(key) {
                    insert(key, Value::String(value));
                }
            }
            if options.contains_key("tls") {
                insert("tls", Value::Bool(true));
            }
            if options.contains_key("mux") {
                insert("mux", Value::Bool(true));
            }
            (Some("v2ray-plugin".to_string()), Some(opts))
        }
        other => (Some(other.to_string()), None),
    }
}
