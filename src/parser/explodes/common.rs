use log::{debug, info, warn};

use super::{ss, trojan, vless, vmess, ExplodeError};
use crate::models::{Proxy, ProxyType};
use crate::parser::normalize::normalize_sub_content;

/// Explode a proxy link into a Proxy object
///
/// The scheme prefix picks exactly one decoder.
pub fn explode(link: &str) -> Result<Proxy, ExplodeError> {
    let link = link.trim();
    match ProxyType::from_link(link) {
        Some(ProxyType::VMess) => vmess::explode_vmess(link),
        Some(ProxyType::Vless) => vless::explode_vless(link),
        Some(ProxyType::Shadowsocks) => ss::explode_ss(link),
        Some(ProxyType::Trojan) => trojan::explode_trojan(link),
        None => Err(ExplodeError::UnsupportedScheme),
    }
}

/// Explode normalized subscription content into a vector of Proxy objects
///
/// Blank lines and unknown schemes are skipped silently, links that fail to
/// decode are logged and skipped. Source order is preserved.
pub fn explode_sub(sub: &str) -> Vec<Proxy> {
    let mut nodes = Vec::new();

    for (index, line) in sub.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(proxy_type) = ProxyType::from_link(line) else {
            debug!("Skipping line {}: unsupported scheme", index + 1);
            continue;
        };

        match explode(line) {
            Ok(node) => nodes.push(node),
            Err(e) => warn!(
                "Failed to parse {} link on line {}: {}",
                proxy_type.as_str(),
                index + 1,
                e
            ),
        }
    }

    nodes
}

/// Normalize a raw subscription body and explode every link in it
pub fn parse_subscription(content: &str) -> Vec<Proxy> {
    let decoded = normalize_sub_content(content);
    let nodes = explode_sub(&decoded);
    info!("Parsed {} nodes from subscription", nodes.len());
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::base64::base64_encode;

    const VMESS: &str = "vmess://eyJhZGQiOiAiZXhhbXBsZS5jb20iLCAicG9ydCI6IDQ0MywgImlkIjogInV1aWQxIiwgIm5ldCI6ICJ3cyIsICJwYXRoIjogIi9wYXRoIn0=";
    const SS: &str = "ss://YWVzLTI1Ni1nY206cGFzcw==@1.2.3.4:8388#My-Node";
    const TROJAN: &str = "trojan://pw@t.example.com:443#TR";
    const VLESS: &str = "vless://uuid1@v.example.com:443?security=tls#VL";

    #[test]
    fn test_explode_dispatch() {
        assert_eq!(explode(VMESS).unwrap().kind, ProxyType::VMess);
        assert_eq!(explode(SS).unwrap().kind, ProxyType::Shadowsocks);
        assert_eq!(explode(TROJAN).unwrap().kind, ProxyType::Trojan);
        assert_eq!(explode(&format!("  {}  ", VLESS)).unwrap().kind, ProxyType::Vless);
        assert!(matches!(
            explode("ssr://abc"),
            Err(ExplodeError::UnsupportedScheme)
        ));
    }

    #[test]
    fn test_explode_sub_skips_bad_lines_in_order() {
        let sub = format!(
            "{}\r\n\nhysteria2://x@y:1\nvmess://not-base64!!\n{}\n   \n{}\n{}\n",
            VMESS, SS, TROJAN, VLESS
        );
        let nodes = explode_sub(&sub);

        let names: Vec<&str> = nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["example.com", "My-Node", "TR", "VL"]);
    }

    #[test]
    fn test_parse_subscription_base64_body() {
        let body = base64_encode(&format!("{}\n{}", SS, TROJAN));
        let nodes = parse_subscription(&body);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].server, "1.2.3.4");
        assert_eq!(nodes[1].server, "t.example.com");
    }

    #[test]
    fn test_parse_subscription_empty() {
        assert!(parse_subscription("").is_empty());
        assert!(parse_subscription("just some text").is_empty());
    }
}
