use crate::filters::criteria::{DEFAULT_MAX_AGE, DEFAULT_MIN_AGE};
use crate::filters::FilterCriteria;
use crate::geo::LocationResolver;
use crate::models::{GenderCategory, NormalizedListing};
use crate::text::contains_folded;

/// Age assumed for listings that do not state one
pub const DEFAULT_LISTING_AGE: u32 = 25;

/// Whether `listing` passes every active criterion.
///
/// Checks run cheapest first and stop at the first failure. Never panics.
pub fn matches(
    listing: &NormalizedListing,
    criteria: &FilterCriteria,
    resolver: &LocationResolver<'_>,
) -> bool {
    matches_keyword(listing, &criteria.keyword)
        && matches_gender(listing, criteria)
        && resolver.matches(listing, criteria)
        && matches_zone(listing, &criteria.specific_zone_text)
        && matches_age(listing, criteria)
        && matches_price(listing, criteria)
        && matches_trust_flags(listing, criteria)
}

/// Keep the listings that pass `criteria`, in input order.
pub fn filter_listings(
    listings: Vec<NormalizedListing>,
    criteria: &FilterCriteria,
    resolver: &LocationResolver<'_>,
) -> Vec<NormalizedListing> {
    listings
        .into_iter()
        .filter(|l| matches(l, criteria, resolver))
        .collect()
}

fn matches_keyword(listing: &NormalizedListing, keyword: &str) -> bool {
    if keyword.trim().is_empty() {
        return true;
    }

    let detail = &listing.location_detail;
    [
        Some(listing.display_name.as_str()),
        Some(listing.biography.as_str()),
        Some(listing.city_label.as_str()),
        detail.sub_locality.as_deref(),
        detail.sub_zone.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| contains_folded(field, keyword))
}

fn matches_gender(listing: &NormalizedListing, criteria: &FilterCriteria) -> bool {
    let Some(wanted) = criteria.gender_filter() else {
        return true;
    };

    match (GenderCategory::from_token(wanted), &listing.gender_category) {
        (GenderCategory::Other(wanted), GenderCategory::Other(actual)) => {
            crate::text::eq_folded(&wanted, actual)
        }
        (wanted, actual) => wanted == *actual,
    }
}

fn matches_zone(listing: &NormalizedListing, zone: &str) -> bool {
    if zone.trim().is_empty() {
        return true;
    }

    let detail = &listing.location_detail;
    [
        detail.sub_zone.as_deref(),
        detail.sub_locality.as_deref(),
        Some(listing.city_label.as_str()),
    ]
    .into_iter()
    .flatten()
    .any(|field| contains_folded(field, zone))
}

/// Each bound left at its default is inactive.
fn matches_age(listing: &NormalizedListing, criteria: &FilterCriteria) -> bool {
    let age = listing.age.unwrap_or(DEFAULT_LISTING_AGE);
    (criteria.min_age == DEFAULT_MIN_AGE || age >= criteria.min_age)
        && (criteria.max_age == DEFAULT_MAX_AGE || age <= criteria.max_age)
}

fn matches_price(listing: &NormalizedListing, criteria: &FilterCriteria) -> bool {
    let price = listing.base_price_minor_units;
    if price < criteria.min_price {
        return false;
    }
    !criteria.has_price_cap() || price <= criteria.max_price
}

fn matches_trust_flags(listing: &NormalizedListing, criteria: &FilterCriteria) -> bool {
    (!criteria.only_verified || listing.is_verified)
        && (!criteria.only_online || listing.is_online)
        && (!criteria.only_premium || listing.is_premium_active || listing.is_vip_active)
}
