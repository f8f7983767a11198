use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// A tier marker: a digit immediately followed by a star glyph.
static TIER_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9](?:★|⭐)\x{FE0F}?").expect("tier boundary regex"));

static TIER_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^([0-9])(?:★|⭐)\x{FE0F}?\s*(.+)$").expect("tier segment regex")
});

/// Star level to text fragment for one description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TierMap(BTreeMap<u8, String>);

impl TierMap {
    pub fn get(&self, tier: u8) -> Option<&str> {
        self.0.get(&tier).map(String::as_str)
    }

    pub fn contains(&self, tier: u8) -> bool {
        self.0.contains_key(&tier)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Fragments in ascending tier order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> {
        self.0.iter().map(|(tier, text)| (*tier, text.as_str()))
    }
}

impl<S: Into<String>> FromIterator<(u8, S)> for TierMap {
    fn from_iter<I: IntoIterator<Item = (u8, S)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(t, s)| (t, s.into())).collect())
    }
}

/// Split a multi-tier description into per-tier fragments.
///
/// Each marker starts a new segment. Text before the first marker is dropped.
/// Segment text is trimmed and loses trailing `;`, `,` and `.`; a segment with
/// nothing after its marker is skipped. A tier that appears twice keeps the
/// later fragment. No markers at all gives an empty map.
pub fn split_by_tier(text: &str) -> TierMap {
    let starts: Vec<usize> = TIER_BOUNDARY.find_iter(text).map(|m| m.start()).collect();
    let mut tiers = BTreeMap::new();

    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(text.len());
        let segment = text[start..end].trim();

        let Some(caps) = TIER_SEGMENT.captures(segment) else {
            continue;
        };
        let Some(tier) = caps[1].parse::<u8>().ok() else {
            continue;
        };
        let fragment = caps[2]
            .trim_end()
            .trim_end_matches([';', ',', '.'])
            .trim_end();
        if fragment.is_empty() {
            continue;
        }
        tiers.insert(tier, fragment.to_string());
    }

    TierMap(tiers)
}
