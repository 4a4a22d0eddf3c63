//! Subscription body normalization
//!
//! Providers serve the link list either as plain text or wrapped in one layer
//! of base64 (standard or URL-safe, padded or not). The helpers here undo that
//! wrapping so the caller always sees one link per line.

use log::debug;

use crate::models::ProxyType;
use crate::utils::base64::{base64_decode, url_safe_base64_decode};

/// Reverse the outer encoding of a subscription body.
///
/// 1. Standard padded base64, accepted only when the result starts with a
///    known link prefix.
/// 2. URL-safe or standard base64 with padding restored, accepted whatever
///    it contains.
/// 3. Otherwise the trimmed input is returned unchanged.
pub fn normalize_sub_content(content: &str) -> String {
    let content = content.trim();
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();

    if let Some(decoded) = base64_decode(&compact, false) {
        if starts_with_known_prefix(&decoded) {
            debug!("Subscription body is standard base64");
            return decoded;
        }
    }

    if !compact.is_empty() {
        if let Some(decoded) = url_safe_base64_decode(&compact) {
            debug!("Subscription body is base64 without a leading link");
            return decoded;
        }
    }

    content.to_string()
}

fn starts_with_known_prefix(text: &str) -> bool {
    ProxyType::all()
        .iter()
        .any(|proxy_type| text.starts_with(proxy_type.prefix()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::explodes::explode_sub;
    use crate::utils::base64::base64_encode;

    #[test]
    fn test_plain_text_is_returned_unchanged() {
        let plain = "trojan://pw@example.com:443#A\nss://YWVzLTI1Ni1nY206cGFzcw==@1.2.3.4:8388#B";
        assert_eq!(normalize_sub_content(plain), plain);
        assert_eq!(normalize_sub_content(&format!("  {}\n\n", plain)), plain);
    }

    #[test]
    fn test_standard_base64_body() {
        let links = "vmess://abc\ntrojan://pw@example.com:443";
        assert_eq!(normalize_sub_content(&base64_encode(links)), links);
    }

    #[test]
    fn test_wrapped_base64_body() {
        let links = "trojan://pw@example.com:443#HK\nvless://id@example.com:443#JP";
        let encoded = base64_encode(links);
        let wrapped = format!("{}\n{}", &encoded[..20], &encoded[20..]);
        assert_eq!(normalize_sub_content(&wrapped), links);
    }

    #[test]
    fn test_unpadded_url_safe_body() {
        let links = "trojan://pw@example.com:443?sni=a.b#x";
        let encoded = base64_encode(links)
            .replace('+', "-")
            .replace('/', "_")
            .trim_end_matches('=')
            .to_string();
        assert_eq!(normalize_sub_content(&encoded), links);
    }

    #[test]
    fn test_standard_base64_body_with_header_line() {
        let body = "STATUS=剩余流量:100GB\ntrojan://pw100@example.com:443?sni=a.b#HK-100";
        let encoded = base64_encode(body);
        assert!(encoded.contains('+') || encoded.contains('/'));

        let decoded = normalize_sub_content(&encoded);
        assert_eq!(decoded, body);
        let nodes = explode_sub(&decoded);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "HK-100");
    }

    #[test]
    fn test_base64_body_with_blank_first_line() {
        let body = "\ntrojan://pw@example.com:443?sni=a.b#HK\nss://YWVzLTI1Ni1nY206cGFzcw==@1.2.3.4:8388#B";
        let decoded = normalize_sub_content(&base64_encode(body));
        assert_eq!(decoded, body);
        assert_eq!(explode_sub(&decoded).len(), 2);
    }

    #[test]
    fn test_base64_body_with_unsupported_first_scheme() {
        let body = "ssr://c29tZXRoaW5nP2Vsc2U=\nvless://id@example.com:443?type=ws&path=%2Fws#JP";
        let decoded = normalize_sub_content(&base64_encode(body));
        assert_eq!(decoded, body);

        let nodes = explode_sub(&decoded);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "JP");
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(normalize_sub_content("   "), "");
    }
}
