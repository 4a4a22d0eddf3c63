use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::settings::SettingsError;
use crate::utils::HttpError;

/// Errors that end a run
#[derive(Debug, Error)]
pub enum Error {
    #[error("no subscription URL configured (set SUBSCRIPTION_URL or pass --url)")]
    MissingSubscriptionUrl,

    #[error("failed to fetch subscription: {0}")]
    Fetch(#[from] HttpError),

    #[error("no nodes could be decoded from the subscription")]
    NoNodes,

    #[error("nodes file not found: {}", .0.display())]
    NodesFileMissing(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

pub type Result<T> = std::result::Result<T, Error>;
