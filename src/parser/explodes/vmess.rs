use serde_json::{Map, Value};

use super::{parse_port, ExplodeError};
use crate::models::{
    Proxy, ProxyAuth, ProxyType, TlsSettings, Transport, TLS_DEFAULT_PORT, VMESS_DEFAULT_CIPHER,
};
use crate::utils::base64::url_safe_base64_decode;

/// Parse a VMess link into a Proxy object
///
/// Format: `vmess://base64(json)` where the JSON object carries the v2rayN
/// share fields (`ps`, `add`, `port`, `id`, `aid`, `scy`, `net`, `host`,
/// `path`, `tls`, `sni`).
pub fn explode_vmess(vmess: &str) -> Result<Proxy, ExplodeError> {
    let encoded = vmess
        .strip_prefix("vmess://")
        .ok_or(ExplodeError::UnsupportedScheme)?;

    let decoded = url_safe_base64_decode(encoded.trim()).ok_or(ExplodeError::InvalidBase64)?;
    let json: Value = serde_json::from_str(&decoded)?;
    let config = json.as_object().ok_or(ExplodeError::NotAnObject)?;

    let add = json_string(config, "add").unwrap_or_default();
    let port = match json_string(config, "port") {
        Some(port) => parse_port(&port)?,
        None => TLS_DEFAULT_PORT,
    };
    let alter_id = match json_string(config, "aid") {
        Some(aid) => aid
            .trim()
            .parse::<u16>()
            .map_err(|_| ExplodeError::InvalidField {
                field: "aid",
                value: aid.clone(),
            })?,
        None => 0,
    };
    let id = json_string(config, "id").unwrap_or_default();
    let cipher = json_string(config, "scy").unwrap_or_else(|| VMESS_DEFAULT_CIPHER.to_string());
    let net = json_string(config, "net").unwrap_or_else(|| "tcp".to_string());
    let host = json_string(config, "host");
    let path = json_string(config, "path");

    let remark = json_string(config, "ps")
        .or_else(|| (!add.is_empty()).then(|| add.clone()))
        .unwrap_or_default();

    // vmess carries the grpc service name in `path`
    let transport = Transport::from_network(&net, path.clone(), host.clone(), path, &add);

    let mut node = Proxy::new(
        ProxyType::VMess,
        remark,
        add,
        port,
        ProxyAuth::Uuid {
            uuid: id,
            alter_id: Some(alter_id),
            cipher: Some(cipher),
        },
    )
    .with_transport(transport);

    if json_string(config, "tls").as_deref() == Some("tls") {
        let sni = json_string(config, "sni").or(host);
        node = node.with_tls(TlsSettings::enabled(sni));
    }

    Ok(node)
}

/// Reads a field that may be written as a string or a number.
///
/// Empty strings and `null` count as absent.
fn json_string(config: &Map<String, Value>, key: &str) -> Option<String> {
    match config.get(key)? {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => match n.as_u64() {
            Some(n) => Some(n.to_string()),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                .map(|f| (f as u64).to_string())
                .or_else(|| Some(n.to_string())),
        },
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
