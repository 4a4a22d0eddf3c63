//! The two run stages and their file handoff
//!
//! `parse` turns a subscription into `nodes.json`; `generate` turns
//! `nodes.json` into the Clash documents and the shareable subscription.

use std::path::Path;

use log::{info, warn};

use crate::error::{Error, Result};
use crate::generator::{
    generate_clash_config, generate_meta_config, load_template_or_default, ClashDocument,
};
use crate::models::Proxy;
use crate::parser::parse_subscription;
use crate::settings::Settings;
use crate::utils::base64::base64_encode;
use crate::utils::{file_exists, file_get, file_write, web_get};

const URL_LOG_LIMIT: usize = 50;

/// Shorten a URL for logging; subscription URLs usually embed a token.
fn truncate_url(url: &str) -> String {
    match url.char_indices().nth(URL_LOG_LIMIT) {
        Some((index, _)) => format!("{}...", &url[..index]),
        None => url.to_string(),
    }
}

/// Fetch the configured subscription body.
///
/// Fails before any network activity when no URL is configured.
pub fn fetch_subscription(settings: &Settings) -> Result<String> {
    let url = settings
        .subscription_url
        .as_deref()
        .ok_or(Error::MissingSubscriptionUrl)?;

    info!("Fetching subscription from {}", truncate_url(url));
    let body = web_get(url, &settings.fetch_options())?;
    info!("Fetched {} bytes", body.len());
    Ok(body)
}

/// Decode a raw subscription body, failing when nothing could be decoded.
pub fn decode_nodes(content: &str) -> Result<Vec<Proxy>> {
    let nodes = parse_subscription(content);
    if nodes.is_empty() {
        return Err(Error::NoNodes);
    }
    Ok(nodes)
}

/// Write the node list as a pretty JSON array.
pub fn write_nodes(path: impl AsRef<Path>, nodes: &[Proxy]) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(nodes)?;
    file_write(path, &json)?;
    info!("Saved {} nodes to {}", nodes.len(), path.display());
    Ok(())
}

/// Read a node list written by [`write_nodes`]. An empty list is an error.
pub fn read_nodes(path: impl AsRef<Path>) -> Result<Vec<Proxy>> {
    let path = path.as_ref();
    if !file_exists(path) {
        return Err(Error::NodesFileMissing(path.to_path_buf()));
    }

    let nodes: Vec<Proxy> = serde_json::from_str(&file_get(path)?)?;
    if nodes.is_empty() {
        return Err(Error::NoNodes);
    }
    Ok(nodes)
}

/// The standard and Meta documents built from one node list
#[derive(Debug, Clone)]
pub struct GeneratedConfigs {
    pub clash: ClashDocument,
    pub clash_meta: ClashDocument,
}

impl GeneratedConfigs {
    pub fn new(template: ClashDocument, nodes: &[Proxy]) -> Self {
        let clash = generate_clash_config(template, nodes);
        let clash_meta = generate_meta_config(&clash);
        GeneratedConfigs { clash, clash_meta }
    }

    /// Write `clash.yaml`, `clash_meta.yaml` and `subscription.txt`.
    ///
    /// The subscription is the standard base64 of `clash.yaml`'s text.
    pub fn write(&self, settings: &Settings) -> Result<()> {
        let clash_yaml = self.clash.to_yaml()?;
        let clash_path = settings.clash_path();
        file_write(&clash_path, &clash_yaml)?;
        info!("Generated {}", clash_path.display());

        let meta_path = settings.clash_meta_path();
        file_write(&meta_path, &self.clash_meta.to_yaml()?)?;
        info!("Generated {}", meta_path.display());

        let subscription_path = settings.subscription_path();
        file_write(&subscription_path, &base64_encode(&clash_yaml))?;
        info!("Generated {}", subscription_path.display());
        Ok(())
    }
}

/// Parse stage: fetch (or read `input`), decode and write `nodes.json`.
pub fn run_parse(settings: &Settings, input: Option<&Path>) -> Result<Vec<Proxy>> {
    let content = match input {
        Some(path) => {
            info!("Reading subscription from {}", path.display());
            file_get(path)?
        }
        None => fetch_subscription(settings)?,
    };

    let nodes = decode_nodes(&content)?;
    write_nodes(settings.nodes_path(), &nodes)?;
    Ok(nodes)
}

/// Generate stage: read the nodes file and write every output document.
pub fn run_generate(
    settings: &Settings,
    nodes_path: Option<&Path>,
    template_path: Option<&Path>,
) -> Result<GeneratedConfigs> {
    let nodes_path = nodes_path.map_or_else(|| settings.nodes_path(), Path::to_path_buf);
    let nodes = read_nodes(&nodes_path)?;
    info!("Generating Clash configs for {} nodes", nodes.len());

    let template_path = template_path.unwrap_or(settings.template_path.as_path());
    let template = load_template_or_default(template_path);
    if template.proxy_groups.is_empty() {
        warn!("Template {} defines no proxy groups", template_path.display());
    }

    let configs = GeneratedConfigs::new(template, &nodes);
    configs.write(settings)?;
    Ok(configs)
}
