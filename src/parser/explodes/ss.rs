use super::{parse_port, ExplodeError};
use crate::models::{ExtraFlags, Proxy, ProxyAuth, ProxyType, SS_DEFAULT_CIPHER, SS_DEFAULT_PORT};
use crate::utils::base64::url_safe_base64_decode;
use crate::utils::url::url_decode;

/// Parse a Shadowsocks link into a Proxy object
///
/// Two layouts are tried in order:
/// * SIP002, `ss://base64(method:password)@server:port[/?plugin=..][#name]`,
///   where the user info may also be written as plain `method:password`.
/// * Legacy, `ss://base64(method:password@server:port)[#name]`.
pub fn explode_ss(ss: &str) -> Result<Proxy, ExplodeError> {
    let mut content = ss
        .strip_prefix("ss://")
        .ok_or(ExplodeError::UnsupportedScheme)?;

    // Extract fragment (remark) if present
    let mut remark = String::new();
    if let Some((rest, fragment)) = content.rsplit_once('#') {
        remark = url_decode(fragment);
        content = rest;
    }

    let (method, password, server_info, query) = match content.rsplit_once('@') {
        Some((user_info, server_part)) => {
            let (method, password) = decode_user_info(user_info);
            let (server_info, query) = split_query(server_part);
            (method, password, server_info.to_string(), query)
        }
        None => {
            let (encoded, query) = split_query(content);
            let decoded = url_safe_base64_decode(encoded).ok_or(ExplodeError::InvalidBase64)?;
            let (user_info, server_info) = decoded
                .rsplit_once('@')
                .ok_or(ExplodeError::MalformedUserInfo)?;
            let (method, password) = user_info
                .split_once(':')
                .ok_or(ExplodeError::MalformedUserInfo)?;
            (
                method.to_string(),
                password.to_string(),
                server_info.to_string(),
                query,
            )
        }
    };

    let (server, port) = match server_info.rsplit_once(':') {
        Some((server, port)) => (server, parse_port(port)?),
        None => (server_info.as_str(), SS_DEFAULT_PORT),
    };
    let server = server.trim_start_matches('[').trim_end_matches(']');

    let node = Proxy::new(
        ProxyType::Shadowsocks,
        remark,
        server,
        port,
        ProxyAuth::Shadowsocks { method, password },
    )
    .with_extra_flags(plugin_flags(query));

    Ok(node)
}

/// Decode the user info of a SIP002 link into `(method, password)`.
///
/// Base64 is tried first; when that fails the text is taken literally, and a
/// literal without a colon is a bare password for the default cipher.
fn decode_user_info(user_info: &str) -> (String, String) {
    let user_info = url_decode(user_info);

    if let Some(decoded) = url_safe_base64_decode(&user_info) {
        if let Some((method, password)) = decoded.split_once(':') {
            return (method.to_string(), password.to_string());
        }
    }

    match user_info.split_once(':') {
        Some((method, password)) => (method.to_string(), password.to_string()),
        None => (SS_DEFAULT_CIPHER.to_string(), user_info),
    }
}

/// Split `host:port/?query` into `host:port` and the query.
fn split_query(content: &str) -> (&str, Option<&str>) {
    match content.split_once('?') {
        Some((head, query)) => (head.trim_end_matches('/'), Some(query)),
        None => (content.trim_end_matches('/'), None),
    }
}

/// Read the SIP003 `plugin` parameter, e.g. `obfs-local;obfs=http;obfs-host=a.com`.
fn plugin_flags(query: Option<&str>) -> ExtraFlags {
    let mut flags = ExtraFlags::default();
    let Some(query) = query else {
        return flags;
    };

    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if key != "plugin" || value.is_empty() {
            continue;
        }
        match value.split_once(';') {
            Some((plugin, opts)) => {
                flags.plugin = Some(plugin.to_string());
                if !opts.is_empty() {
                    flags.plugin_opts = Some(opts.to_string());
                }
            }
            None => flags.plugin = Some(value.into_owned()),
        }
        break;
    }
    flags
}
