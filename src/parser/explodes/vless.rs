use url::Url;

use super::ExplodeError;
use crate::models::{ExtraFlags, Proxy, ProxyAuth, ProxyType, TlsSettings, Transport, TLS_DEFAULT_PORT};
use crate::utils::url::{fragment_decoded, host_without_brackets, query_params, url_decode};

/// Parse a VLESS link into a Proxy object
///
/// Format: `vless://uuid@server:port?type=ws&security=tls&sni=..&flow=..#name`
pub fn explode_vless(vless: &str) -> Result<Proxy, ExplodeError> {
    if !vless.starts_with("vless://") {
        return Err(ExplodeError::UnsupportedScheme);
    }

    let url = Url::parse(vless)?;
    let params = query_params(&url);

    let server = host_without_brackets(&url);
    let port = url.port().unwrap_or(TLS_DEFAULT_PORT);
    let uuid = url_decode(url.username());

    let network = params.get("type").map(String::as_str).unwrap_or("tcp");
    let transport = Transport::from_network(
        network,
        params.get("path").cloned(),
        params.get("host").cloned(),
        params.get("serviceName").cloned(),
        &server,
    );

    let mut node = Proxy::new(
        ProxyType::Vless,
        fragment_decoded(&url),
        server.clone(),
        port,
        ProxyAuth::Uuid {
            uuid,
            alter_id: None,
            cipher: None,
        },
    )
    .with_transport(transport);

    if params.get("security").map(String::as_str) == Some("tls") {
        let sni = params
            .get("sni")
            .or_else(|| params.get("host"))
            .cloned()
            .unwrap_or(server);
        node = node.with_tls(TlsSettings::enabled(Some(sni)));
    }

    if let Some(flow) = params.get("flow") {
        node = node.with_extra_flags(ExtraFlags {
            flow: Some(flow.clone()),
            ..Default::default()
        });
    }

    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GrpcOptions, WsOptions};

    #[test]
    fn test_explode_vless_ws_tls() {
        let link = "vless://b831381d-6324-4d53-ad4f-8cda48b30811@example.com:8443?type=ws&path=%2Fray&host=cdn.example.com&security=tls#JP%2001";
        let node = explode_vless(link).unwrap();

        assert_eq!(node.kind, ProxyType::Vless);
        assert_eq!(node.name, "JP 01");
        assert_eq!(node.server, "example.com");
        assert_eq!(node.port, 8443);
        assert_eq!(
            node.auth.uuid(),
            Some("b831381d-6324-4d53-ad4f-8cda48b30811")
        );
        assert_eq!(
            node.transport,
            Transport::Ws {
                options: WsOptions {
                    path: "/ray".to_string(),
                    host: "cdn.example.com".to_string(),
                }
            }
        );
        assert!(node.tls.enabled);
        // no sni, so the host parameter is used
        assert_eq!(node.tls.server_name.as_deref(), Some("cdn.example.com"));
    }

    #[test]
    fn test_explode_vless_defaults() {
        let node = explode_vless("vless://uuid1@1.2.3.4").unwrap();

        assert_eq!(node.name, "VLESS节点");
        assert_eq!(node.port, 443);
        assert_eq!(node.transport, Transport::Tcp);
        assert_eq!(node.tls, TlsSettings::default());
        assert!(node.extra_flags.is_empty());
    }

    #[test]
    fn test_explode_vless_ws_defaults() {
        let node = explode_vless("vless://uuid1@a.com:443?type=ws#x").unwrap();
        assert_eq!(
            node.transport,
            Transport::Ws {
                options: WsOptions {
                    path: "/".to_string(),
                    host: "a.com".to_string(),
                }
            }
        );
    }

    #[test]
    fn test_explode_vless_grpc_flow_and_sni() {
        let link = "vless://uuid1@a.com:443?type=grpc&serviceName=svc&security=tls&sni=sni.a.com&flow=xtls-rprx-vision#x";
        let node = explode_vless(link).unwrap();

        assert_eq!(
            node.transport,
            Transport::Grpc {
                options: GrpcOptions {
                    service_name: "svc".to_string()
                }
            }
        );
        assert_eq!(node.tls.server_name.as_deref(), Some("sni.a.com"));
        assert_eq!(node.extra_flags.flow.as_deref(), Some("xtls-rprx-vision"));
    }

    #[test]
    fn test_explode_vless_tls_falls_back_to_server() {
        let node = explode_vless("vless://uuid1@a.com:443?security=tls&flow=").unwrap();
        assert_eq!(node.tls.server_name.as_deref(), Some("a.com"));
        assert_eq!(node.extra_flags.flow, None);
    }

    #[test]
    fn test_explode_vless_invalid_port() {
        assert!(matches!(
            explode_vless("vless://uuid1@a.com:99999"),
            Err(ExplodeError::InvalidUrl(_))
        ));
    }
}
