//! Tier-aware parsing of localized skill descriptions.
//!
//! Descriptions carry one fragment per star level ("1★ ...; 2★ ...").
//! Numbers pulled from those fragments are hints for review only; structured
//! fields stay authoritative.

pub mod features;
pub mod fold;
pub mod tiers;

pub use features::{ExtractedFeature, extract_features};
pub use fold::fold;
pub use tiers::{TierMap, split_by_tier};
