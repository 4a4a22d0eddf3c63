//! Region tags derived from node names

use std::fmt;

/// Coarse geographic classification of a node.
///
/// Tags are never stored on a node; they are recomputed from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegionTag {
    HongKong,
    Taiwan,
    Singapore,
    Japan,
    UnitedStates,
    Korea,
    Other,
}

impl RegionTag {
    /// Regions that own a dynamic proxy group, in classification order.
    pub const GROUPED: [RegionTag; 6] = [
        RegionTag::HongKong,
        RegionTag::Taiwan,
        RegionTag::Singapore,
        RegionTag::Japan,
        RegionTag::UnitedStates,
        RegionTag::Korea,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RegionTag::HongKong => "hk",
            RegionTag::Taiwan => "tw",
            RegionTag::Singapore => "sg",
            RegionTag::Japan => "jp",
            RegionTag::UnitedStates => "us",
            RegionTag::Korea => "kr",
            RegionTag::Other => "other",
        }
    }

    /// Name of the url-test group collecting this region's nodes.
    pub fn group_name(self) -> Option<&'static str> {
        match self {
            RegionTag::HongKong => Some("🇭🇰 香港节点"),
            RegionTag::Taiwan => Some("🇨🇳 台湾节点"),
            RegionTag::Singapore => Some("🇸🇬 狮城节点"),
            RegionTag::Japan => Some("🇯🇵 日本节点"),
            RegionTag::UnitedStates => Some("🇺🇸 美国节点"),
            RegionTag::Korea => Some("🇰🇷 韩国节点"),
            RegionTag::Other => None,
        }
    }

    /// Reverse lookup of [`RegionTag::group_name`].
    pub fn from_group_name(name: &str) -> Option<RegionTag> {
        Self::GROUPED
            .into_iter()
            .find(|tag| tag.group_name() == Some(name))
    }
}

impl fmt::Display for RegionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
