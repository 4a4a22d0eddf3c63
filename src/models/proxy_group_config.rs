use serde::{Deserialize, Serialize};

/// Type of proxy group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProxyGroupType {
    #[serde(rename = "select")]
    Select,
    #[serde(rename = "url-test")]
    URLTest,
    #[serde(rename = "fallback")]
    Fallback,
    #[serde(rename = "load-balance")]
    LoadBalance,
    #[serde(rename = "relay")]
    Relay,
}

/// Name of the url-test group that receives every node.
pub const AUTO_SELECT_GROUP: &str = "♻️ 自动选择";
/// Manual selection group at the top of the skeleton.
pub const NODE_SELECT_GROUP: &str = "🚀 节点选择";
pub const DIRECT_GROUP: &str = "🎯 全球直连";
pub const REJECT_GROUP: &str = "🛑 全球拦截";
pub const FINAL_GROUP: &str = "🐟 漏网之鱼";

/// Probe target of the url-test groups
pub const DEFAULT_TEST_URL: &str = "http://www.gstatic.com/generate_204";
pub const DEFAULT_TEST_INTERVAL: u32 = 300;
