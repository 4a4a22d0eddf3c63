//! Core data models for the application
//!
//! This module contains the primary data structures used throughout the application,
//! separated from the logic that operates on them.
//!
//! # Usage
//!
//! ```rust
//! use subclash::models::{Proxy, ProxyAuth, ProxyType};
//!
//! let proxy = Proxy::new(
//!     ProxyType::Trojan,
//!     "HK-01",
//!     "example.com",
//!     443,
//!     ProxyAuth::Password { password: "secret".to_string() },
//! );
//! assert_eq!(proxy.port, 443);
//! ```

mod proxy;
pub mod proxy_group_config;
mod region;

pub use proxy::*;
pub use proxy_group_config::{ProxyGroupType, AUTO_SELECT_GROUP};
pub use region::RegionTag;
