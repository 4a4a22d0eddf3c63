//! Region classification of nodes by display name

use crate::models::RegionTag;

/// Keywords per region, matched as lower-case substrings of a node name.
///
/// Order matters: a name matching several regions belongs to the first one.
pub const REGION_KEYWORDS: &[(RegionTag, &[&str])] = &[
    (RegionTag::HongKong, &["香港", "hk", "hongkong", "hong kong", "港"]),
    (RegionTag::Taiwan, &["台湾", "tw", "taiwan", "台"]),
    (RegionTag::Singapore, &["新加坡", "sg", "singapore", "狮城"]),
    (RegionTag::Japan, &["日本", "jp", "japan", "东京", "大阪"]),
    (RegionTag::UnitedStates, &["美国", "us", "usa", "united states", "美"]),
    (RegionTag::Korea, &["韩国", "kr", "korea", "首尔"]),
];

/// Classify a node name into exactly one region.
pub fn classify_node(name: &str) -> RegionTag {
    let name = name.to_lowercase();

    REGION_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| name.contains(keyword)))
        .map(|(region, _)| *region)
        .unwrap_or(RegionTag::Other)
}
