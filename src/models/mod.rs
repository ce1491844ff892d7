pub mod raw;

use serde::{Deserialize, Serialize};

pub use raw::RawListingRecord;

/// Normalized category of the advertiser
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GenderCategory {
    Woman,
    Man,
    Transgender,
    Gigolo,
    #[default]
    Unspecified,
    /// Upstream category with no mapping, kept so new categories stay visible
    Other(String),
}

impl GenderCategory {
    /// Map a localized upstream token ("mujer", "hombre", "trans", ...) or a
    /// canonical English name. Blank input is `Unspecified`; anything else
    /// unrecognized is passed through as `Other`.
    pub fn from_token(token: &str) -> Self {
        let token = token.trim();
        match crate::text::fold(token).as_str() {
            "" => Self::Unspecified,
            "mujer" | "woman" => Self::Woman,
            "hombre" | "man" => Self::Man,
            "trans" | "transgender" => Self::Transgender,
            "gigolo" => Self::Gigolo,
            "unspecified" => Self::Unspecified,
            _ => Self::Other(token.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Woman => "woman",
            Self::Man => "man",
            Self::Transgender => "transgender",
            Self::Gigolo => "gigolo",
            Self::Unspecified => "unspecified",
            Self::Other(tag) => tag,
        }
    }
}

/// Paid plan attached to a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    #[default]
    None,
    Premium,
    Gold,
    Vip,
    Diamond,
}

impl PlanTier {
    pub fn from_token(token: &str) -> Self {
        match crate::text::fold(token).as_str() {
            "premium" => Self::Premium,
            "gold" | "oro" => Self::Gold,
            "vip" => Self::Vip,
            "diamond" | "diamante" => Self::Diamond,
            _ => Self::None,
        }
    }

    /// Any paid plan
    pub fn is_paid(self) -> bool {
        self != Self::None
    }

    /// Plans that carry VIP placement on their own
    pub fn includes_vip(self) -> bool {
        matches!(self, Self::Vip | Self::Diamond)
    }
}

/// Location names as delivered by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LocationDetail {
    pub region: Option<String>,
    pub locality: Option<String>,
    pub sub_locality: Option<String>,
    pub sub_zone: Option<String>,
}

impl LocationDetail {
    /// All present parts, most specific first
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        [&self.sub_zone, &self.sub_locality, &self.locality, &self.region]
            .into_iter()
            .filter_map(|p| p.as_deref())
    }
}

/// Days and hours the advertiser is available
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Availability {
    pub days: Vec<String>,
    pub start_time: String,
    pub end_time: String,
}

/// Canonical listing used by filtering, ranking and presentation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NormalizedListing {
    pub id: String,
    pub owner_id: String,
    pub display_name: String,
    pub biography: String,
    pub gender_category: GenderCategory,
    pub age: Option<u32>,
    pub primary_image_url: String,
    pub gallery_urls: Vec<String>,
    pub city_label: String,
    pub location_detail: LocationDetail,
    pub base_price_minor_units: i64,
    pub formatted_price: String,
    pub services: Vec<String>,
    pub availability: Availability,
    pub is_verified: bool,
    pub is_online: bool,
    pub plan_tier: PlanTier,
    pub is_premium_active: bool,
    pub is_vip_active: bool,
    pub is_boost_active: bool,
    /// Tie-break within a tier, higher first
    pub priority: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_tokens_map_to_categories() {
        assert_eq!(GenderCategory::from_token("Mujer"), GenderCategory::Woman);
        assert_eq!(GenderCategory::from_token("hombre"), GenderCategory::Man);
        assert_eq!(GenderCategory::from_token("TRANS"), GenderCategory::Transgender);
        assert_eq!(GenderCategory::from_token("gigoló"), GenderCategory::Gigolo);
        assert_eq!(GenderCategory::from_token("  "), GenderCategory::Unspecified);
        assert_eq!(
            GenderCategory::from_token("pareja"),
            GenderCategory::Other("pareja".to_string())
        );
    }

    #[test]
    fn plan_tokens_map_to_tiers() {
        assert_eq!(PlanTier::from_token("VIP"), PlanTier::Vip);
        assert_eq!(PlanTier::from_token("diamante"), PlanTier::Diamond);
        assert_eq!(PlanTier::from_token("free"), PlanTier::None);
        assert!(PlanTier::Gold.is_paid());
        assert!(!PlanTier::Gold.includes_vip());
    }

    #[test]
    fn location_parts_skip_missing() {
        let detail = LocationDetail {
            region: Some("Antioquia".into()),
            locality: None,
            sub_locality: Some("El Poblado".into()),
            sub_zone: None,
        };
        assert_eq!(detail.parts().collect::<Vec<_>>(), vec!["El Poblado", "Antioquia"]);
    }
}
