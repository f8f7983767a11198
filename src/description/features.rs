use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::fold::fold;

static PERCENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)%").expect("percent regex"));

static TURNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s*luot").expect("turns regex"));

/// Tolerates clipped spellings of "lượt".
static TURNS_LOOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s*l").expect("loose turns regex"));

static TARGETS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+)\s*(?:dong minh|muc tieu|ke dich)").expect("targets regex")
});

const GLOBAL_PHRASES: [&str; 2] = ["toan doi", "toan bo"];

/// Most fragments name at most a buff duration and a damage-over-time duration.
const MAX_TURN_VALUES: usize = 2;

/// Numeric claims found in one tier fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFeature {
    /// Percent values as written, repeats kept.
    pub percentages: Vec<u32>,
    /// First two turn durations.
    pub turns: Vec<u32>,
    /// Ally, target and enemy counts.
    pub targets: Vec<u32>,
    /// Whole team or whole board.
    pub global: bool,
}

impl ExtractedFeature {
    pub fn is_empty(&self) -> bool {
        self.percentages.is_empty() && self.turns.is_empty() && self.targets.is_empty() && !self.global
    }
}

/// Extract numeric claims from a tier fragment.
///
/// Percentages are read from the raw text; turn, target and scope phrases are
/// matched on the folded text so accented and ASCII spellings agree.
pub fn extract_features(tier_text: &str) -> ExtractedFeature {
    let folded = fold(tier_text);

    let percentages = numbers(&PERCENT, tier_text).collect();

    let mut turns: Vec<u32> = numbers(&TURNS, &folded).take(MAX_TURN_VALUES).collect();
    if turns.is_empty() {
        turns = numbers(&TURNS_LOOSE, &folded).take(MAX_TURN_VALUES).collect();
    }

    let targets = numbers(&TARGETS, &folded).collect();
    let global = GLOBAL_PHRASES.iter().any(|phrase| folded.contains(phrase));

    ExtractedFeature {
        percentages,
        turns,
        targets,
        global,
    }
}

fn numbers<'t>(pattern: &'t Regex, text: &'t str) -> impl Iterator<Item = u32> + 't {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
}
