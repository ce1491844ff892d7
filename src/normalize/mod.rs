//! Raw backend records → `NormalizedListing`.

pub mod format;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::raw::{RawListingRecord, RawPhoto};
use crate::models::{Availability, GenderCategory, LocationDetail, NormalizedListing, PlanTier};

/// Map one raw record to its canonical shape.
///
/// Total: missing or malformed fields fall back to empty strings, zero,
/// empty lists or `false`. Promotional flags are evaluated against `now`.
pub fn normalize(raw: &RawListingRecord, now: DateTime<Utc>) -> NormalizedListing {
    let owner = raw.user.clone().unwrap_or_default();
    let location = raw.location.clone().unwrap_or_default();
    let photos = raw.photos.as_deref().unwrap_or_default();

    let location_detail = LocationDetail {
        region: clean(location.department.as_deref()),
        locality: clean(location.city.as_deref()),
        sub_locality: clean(location.neighborhood.as_deref()),
        sub_zone: clean(location.zone.as_deref()),
    };
    let city_label = format::compose_city_label(
        location_detail.locality.as_deref(),
        location_detail.region.as_deref(),
    );

    let base_price = raw
        .pricing
        .as_ref()
        .and_then(|p| p.base_price)
        .unwrap_or(0)
        .max(0);

    let promotion = Promotion::evaluate(raw, owner.premium_until, now);

    NormalizedListing {
        id: text(raw.id.as_deref()),
        owner_id: text(owner.id.as_deref()),
        display_name: text(raw.name.as_deref().or(owner.name.as_deref())),
        biography: text(raw.description.as_deref()),
        gender_category: GenderCategory::from_token(raw.category.as_deref().unwrap_or_default()),
        age: raw
            .age
            .or(owner.age)
            .and_then(|a| u32::try_from(a).ok())
            .filter(|a| *a > 0),
        primary_image_url: primary_image(photos),
        gallery_urls: photos.iter().filter_map(photo_url).collect(),
        city_label,
        location_detail,
        base_price_minor_units: base_price,
        formatted_price: format::format_price(base_price),
        services: merge_services(raw),
        availability: availability(raw),
        is_verified: raw.is_verified.or(owner.is_verified).unwrap_or(false),
        is_online: raw.is_online.or(owner.is_online).unwrap_or(false),
        plan_tier: promotion.plan_tier,
        is_premium_active: promotion.premium,
        is_vip_active: promotion.vip,
        is_boost_active: promotion.boost,
        priority: raw.priority.unwrap_or(0),
    }
}

/// Normalize a whole search response.
///
/// Accepts a bare array, or an object wrapping one under `data` or
/// `listings`. Any other payload is treated as empty. Array entries that
/// are not objects are skipped.
pub fn normalize_payload(payload: &Value, now: DateTime<Utc>) -> Vec<NormalizedListing> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(map) => match ["data", "listings"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array))
        {
            Some(items) => items,
            None => {
                warn!("Listing payload object has no listing array, treating as empty");
                return Vec::new();
            }
        },
        other => {
            warn!("Listing payload is not an array ({}), treating as empty", kind(other));
            return Vec::new();
        }
    };

    let listings: Vec<NormalizedListing> = items
        .iter()
        .filter(|item| {
            let keep = item.is_object();
            if !keep {
                warn!("Skipping non-object listing entry ({})", kind(item));
            }
            keep
        })
        .map(|item| normalize(&RawListingRecord::from_value(item), now))
        .collect();

    debug!("Normalized {} listings", listings.len());
    listings
}

/// Promotional state at a given instant
struct Promotion {
    plan_tier: PlanTier,
    premium: bool,
    vip: bool,
    boost: bool,
}

impl Promotion {
    fn evaluate(
        raw: &RawListingRecord,
        premium_until: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        let is_vip_flag = raw.is_vip.unwrap_or(false);
        let mut plan_tier = PlanTier::from_token(raw.plan.as_deref().unwrap_or_default());
        // A VIP flag with no recognised plan still means a VIP subscription
        if is_vip_flag && plan_tier == PlanTier::None {
            plan_tier = PlanTier::Vip;
        }

        let window_open = premium_until.map_or(true, |until| until > now);
        let premium = plan_tier.is_paid() && window_open;
        let vip = window_open && (plan_tier.includes_vip() || (is_vip_flag && plan_tier.is_paid()));
        let boost = raw.is_boosted.unwrap_or(false)
            && raw.boosted_until.map_or(false, |until| until > now);

        Self {
            plan_tier,
            premium,
            vip,
            boost,
        }
    }
}

fn primary_image(photos: &[RawPhoto]) -> String {
    photos
        .iter()
        .filter(|p| p.is_primary.unwrap_or(false))
        .find_map(photo_url)
        .or_else(|| photos.iter().find_map(photo_url))
        .unwrap_or_default()
}

fn photo_url(photo: &RawPhoto) -> Option<String> {
    clean(photo.url.as_deref())
}

/// Predefined services first, then custom ones, without duplicates
fn merge_services(raw: &RawListingRecord) -> Vec<String> {
    let mut services: Vec<String> = Vec::new();
    let all = raw
        .services
        .iter()
        .flatten()
        .chain(raw.custom_services.iter().flatten());

    for service in all {
        let service = service.trim();
        if !service.is_empty() && !services.iter().any(|s| s.eq_ignore_ascii_case(service)) {
            services.push(service.to_string());
        }
    }
    services
}

fn availability(raw: &RawListingRecord) -> Availability {
    let Some(avail) = raw.availability.as_ref() else {
        return Availability::default();
    };

    Availability {
        days: avail
            .days
            .iter()
            .flatten()
            .filter(|d| !d.trim().is_empty())
            .map(|d| format::abbreviate_day(d.trim()))
            .collect(),
        start_time: text(avail.start_time.as_deref()),
        end_time: text(avail.end_time.as_deref()),
    }
}

fn clean(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn text(value: Option<&str>) -> String {
    clean(value).unwrap_or_default()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
