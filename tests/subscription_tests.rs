use subclash::models::{ProxyAuth, Transport};
use subclash::parser::normalize_sub_content;
use subclash::utils::base64::base64_encode;
use subclash::{explode, parse_subscription, ExplodeError, ProxyType};

#[cfg(test)]
mod subscription_tests {
    use super::*;

    const VMESS: &str = "vmess://eyJhZGQiOiAiZXhhbXBsZS5jb20iLCAicG9ydCI6IDQ0MywgImlkIjogInV1aWQxIiwgIm5ldCI6ICJ3cyIsICJwYXRoIjogIi9wYXRoIn0=";
    const SS: &str = "ss://YWVzLTI1Ni1nY206cGFzcw==@1.2.3.4:8388#My-Node";
    const VLESS: &str =
        "vless://0b7c8f0e-1111-2222-3333-444455556666@v.example.com:8443?type=grpc&serviceName=svc&security=tls&sni=sni.example.com&flow=xtls-rprx-vision#%E6%97%A5%E6%9C%AC%2001";
    const TROJAN: &str = "trojan://secret@t.example.com:443?type=ws&path=%2Ftr#US%2001";

    #[test]
    fn test_vmess_end_to_end() {
        let node = explode(VMESS).unwrap();

        assert_eq!(node.kind, ProxyType::VMess);
        assert_eq!(node.server, "example.com");
        assert_eq!(node.port, 443);
        assert_eq!(node.auth.uuid(), Some("uuid1"));
        assert_eq!(node.transport.network(), "ws");
        match &node.transport {
            Transport::Ws { options } => {
                assert_eq!(options.path, "/path");
                assert_eq!(options.host, "example.com");
            }
            other => panic!("expected ws transport, got {:?}", other),
        }
        assert!(!node.tls.enabled);
    }

    #[test]
    fn test_ss_end_to_end() {
        let node = explode(SS).unwrap();

        assert_eq!(node.kind, ProxyType::Shadowsocks);
        assert_eq!(node.server, "1.2.3.4");
        assert_eq!(node.port, 8388);
        assert_eq!(
            node.auth,
            ProxyAuth::Shadowsocks {
                method: "aes-256-gcm".to_string(),
                password: "pass".to_string(),
            }
        );
        assert_eq!(node.name, "My-Node");
    }

    #[test]
    fn test_vless_and_trojan_fields() {
        let vless = explode(VLESS).unwrap();
        assert_eq!(vless.name, "日本 01");
        assert_eq!(vless.port, 8443);
        assert_eq!(vless.auth.uuid(), Some("0b7c8f0e-1111-2222-3333-444455556666"));
        assert_eq!(vless.transport.network(), "grpc");
        assert_eq!(vless.tls.server_name.as_deref(), Some("sni.example.com"));
        assert_eq!(vless.extra_flags.flow.as_deref(), Some("xtls-rprx-vision"));

        let trojan = explode(TROJAN).unwrap();
        assert_eq!(trojan.name, "US 01");
        assert_eq!(trojan.auth.password(), Some("secret"));
        assert!(trojan.tls.enabled);
        assert_eq!(trojan.tls.server_name.as_deref(), Some("t.example.com"));
    }

    #[test]
    fn test_bad_line_among_good_lines() {
        let plain = [VMESS, "vmess://%%%broken", SS, "http://not-a-proxy", VLESS, TROJAN].join("\n");
        let nodes = parse_subscription(&base64_encode(&plain));

        let kinds: Vec<ProxyType> = nodes.iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ProxyType::VMess,
                ProxyType::Shadowsocks,
                ProxyType::Vless,
                ProxyType::Trojan
            ]
        );
    }

    #[test]
    fn test_plain_content_is_unchanged() {
        let plain = format!("{}\n{}", SS, TROJAN);
        assert_eq!(normalize_sub_content(&plain), plain);
        assert_eq!(parse_subscription(&plain).len(), 2);
    }

    #[test]
    fn test_decoder_errors_do_not_escape() {
        assert!(matches!(explode("ssr://abc"), Err(ExplodeError::UnsupportedScheme)));
        assert!(explode("vmess://bm90IGpzb24=").is_err());
        assert!(explode("trojan://pw@[::1").is_err());
    }

    #[test]
    fn test_nodes_json_shape() {
        let nodes = parse_subscription(&format!("{}\n{}", VMESS, SS));
        let value = serde_json::to_value(&nodes).unwrap();

        assert_eq!(value[0]["kind"], "vmess");
        assert_eq!(value[0]["auth"]["uuid"], "uuid1");
        assert_eq!(value[0]["transport"]["kind"], "ws");
        assert_eq!(value[0]["transport"]["options"]["path"], "/path");
        assert_eq!(value[1]["kind"], "shadowsocks");
        assert_eq!(value[1]["auth"]["method"], "aes-256-gcm");
        assert_eq!(value[1]["transport"]["kind"], "tcp");
        assert!(value[1]["transport"].get("options").is_none());

        let back: Vec<subclash::Proxy> = serde_json::from_value(value).unwrap();
        assert_eq!(back, nodes);
    }
}
