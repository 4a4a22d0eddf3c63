use url::Url;

use super::ExplodeError;
use crate::models::{ExtraFlags, Proxy, ProxyAuth, ProxyType, TlsSettings, Transport, TLS_DEFAULT_PORT};
use crate::utils::url::{fragment_decoded, host_without_brackets, query_params, url_decode};

/// Parse a Trojan link into a Proxy object
///
/// Format: `trojan://password@server:port?sni=..&type=ws&path=..#name`.
/// Trojan always runs over TLS, so the server name is recorded even when the
/// link carries neither `sni` nor `peer`.
pub fn explode_trojan(trojan: &str) -> Result<Proxy, ExplodeError> {
    if !trojan.starts_with("trojan://") {
        return Err(ExplodeError::UnsupportedScheme);
    }

    let url = Url::parse(trojan)?;
    let params = query_params(&url);

    let server = host_without_brackets(&url);
    let port = url.port().unwrap_or(TLS_DEFAULT_PORT);
    let password = url_decode(url.username());

    // Extract SNI - check for both "sni" and "peer" parameters
    let sni = params
        .get("sni")
        .or_else(|| params.get("peer"))
        .cloned()
        .unwrap_or_else(|| server.clone());

    let skip_cert_verify = params
        .get("allowInsecure")
        .map(|s| s == "1" || s.eq_ignore_ascii_case("true"));

    let network = params.get("type").map(String::as_str).unwrap_or("tcp");
    let transport = Transport::from_network(
        network,
        params.get("path").cloned(),
        params.get("host").cloned(),
        params.get("serviceName").cloned(),
        &server,
    );

    let node = Proxy::new(
        ProxyType::Trojan,
        fragment_decoded(&url),
        server,
        port,
        ProxyAuth::Password { password },
    )
    .with_transport(transport)
    .with_tls(TlsSettings::enabled(Some(sni)))
    .with_extra_flags(ExtraFlags {
        skip_cert_verify,
        ..Default::default()
    });

    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GrpcOptions, WsOptions};

    #[test]
    fn test_explode_trojan_basic() {
        let node = explode_trojan("trojan://secret@example.com:8443?sni=sni.example.com#US-01").unwrap();

        assert_eq!(node.kind, ProxyType::Trojan);
        assert_eq!(node.name, "US-01");
        assert_eq!(node.server, "example.com");
        assert_eq!(node.port, 8443);
        assert_eq!(node.auth.password(), Some("secret"));
        assert!(node.tls.enabled);
        assert_eq!(node.tls.server_name.as_deref(), Some("sni.example.com"));
        assert_eq!(node.transport, Transport::Tcp);
        assert_eq!(node.extra_flags.skip_cert_verify, None);
    }

    #[test]
    fn test_explode_trojan_sni_fallbacks() {
        let node = explode_trojan("trojan://pw@a.com?peer=peer.a.com").unwrap();
        assert_eq!(node.tls.server_name.as_deref(), Some("peer.a.com"));
        assert_eq!(node.port, 443);
        assert_eq!(node.name, "Trojan节点");

        let node = explode_trojan("trojan://pw@a.com:443").unwrap();
        assert_eq!(node.tls.server_name.as_deref(), Some("a.com"));
    }

    #[test]
    fn test_explode_trojan_transports() {
        let node =
            explode_trojan("trojan://pw@a.com:443?type=ws&path=%2Fws&host=cdn.a.com&allowInsecure=1#x")
                .unwrap();
        assert_eq!(
            node.transport,
            Transport::Ws {
                options: WsOptions {
                    path: "/ws".to_string(),
                    host: "cdn.a.com".to_string(),
                }
            }
        );
        assert_eq!(node.extra_flags.skip_cert_verify, Some(true));

        let node = explode_trojan("trojan://pw@a.com:443?type=grpc#x").unwrap();
        assert_eq!(
            node.transport,
            Transport::Grpc {
                options: GrpcOptions {
                    service_name: String::new()
                }
            }
        );
    }

    #[test]
    fn test_explode_trojan_percent_encoded_password() {
        let node = explode_trojan("trojan://p%40ss%3Aword@a.com:443").unwrap();
        assert_eq!(node.auth.password(), Some("p@ss:word"));
    }

    #[test]
    fn test_explode_trojan_invalid() {
        assert!(explode_trojan("trojan://pw@a.com:notaport").is_err());
        assert!(matches!(
            explode_trojan("vless://pw@a.com"),
            Err(ExplodeError::UnsupportedScheme)
        ));
    }
}
