use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

use crate::filters::{filter_listings, FilterCriteria};
use crate::geo::{LocationResolver, Taxonomy};
use crate::models::NormalizedListing;
use crate::normalize::normalize_payload;
use crate::ranking::{partition, RankedListings};

/// Raw search payload → filtered listings split into tiers.
///
/// Pure function of its inputs; safe to call with an empty or malformed
/// payload, which yields empty groups.
pub fn run(
    payload: &Value,
    criteria: &FilterCriteria,
    taxonomy: &Taxonomy,
    now: DateTime<Utc>,
) -> RankedListings {
    rank(normalize_payload(payload, now), criteria, taxonomy)
}

/// Filter and partition already-normalized listings.
pub fn rank(
    listings: Vec<NormalizedListing>,
    criteria: &FilterCriteria,
    taxonomy: &Taxonomy,
) -> RankedListings {
    let total = listings.len();
    let resolver = LocationResolver::new(taxonomy);
    let ranked = partition(filter_listings(listings, criteria, &resolver));

    debug!(
        total,
        boosted = ranked.boosted.len(),
        vip = ranked.vip.len(),
        regular = ranked.regular.len(),
        "Ranked listings"
    );
    ranked
}
