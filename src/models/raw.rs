//! Backend listing shape as it arrives over the wire.
//!
//! Every field is optional and decoded leniently: a field of the wrong type
//! becomes `None` instead of failing the whole record. Alternate spellings of
//! a key are folded onto one canonical key before decoding, so a record that
//! carries both `name` and `display_name` keeps the first of them.

use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

/// Canonical key and the alternate spellings accepted for it
pub type KeyTable = &'static [(&'static str, &'static [&'static str])];

/// Raw shape decoded from a JSON object after its keys are canonicalized
pub trait RawObject: DeserializeOwned + Default {
    const KEYS: KeyTable;

    /// Decode a JSON object. Returns `None` for anything that is not an object.
    fn decode(value: Value) -> Option<Self> {
        let Value::Object(map) = value else {
            return None;
        };
        let map = canonicalize(map, Self::KEYS);
        match serde_json::from_value(Value::Object(map)) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!("Undecodable raw object, using defaults: {}", e);
                Some(Self::default())
            }
        }
    }
}

/// Move the first non-null value among each key's spellings onto the
/// canonical key and drop the other spellings.
fn canonicalize(mut map: Map<String, Value>, keys: KeyTable) -> Map<String, Value> {
    for (canonical, alternates) in keys {
        let mut chosen = None;
        for key in std::iter::once(canonical).chain(alternates.iter()) {
            if let Some(value) = map.remove(*key) {
                if chosen.is_none() && !value.is_null() {
                    chosen = Some(value);
                }
            }
        }
        if let Some(value) = chosen {
            map.insert(canonical.to_string(), value);
        }
    }
    map
}

/// Raw listing record from the search backend
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListingRecord {
    #[serde(default, deserialize_with = "de::string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de::object")]
    pub user: Option<RawOwner>,
    #[serde(default, deserialize_with = "de::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "de::integer")]
    pub age: Option<i64>,
    #[serde(default, deserialize_with = "de::object")]
    pub location: Option<RawLocation>,
    #[serde(default, deserialize_with = "de::object")]
    pub pricing: Option<RawPricing>,
    #[serde(default, deserialize_with = "de::objects")]
    pub photos: Option<Vec<RawPhoto>>,
    #[serde(default, deserialize_with = "de::list")]
    pub services: Option<Vec<String>>,
    #[serde(default, deserialize_with = "de::list")]
    pub custom_services: Option<Vec<String>>,
    #[serde(default, deserialize_with = "de::object")]
    pub availability: Option<RawAvailability>,
    #[serde(default, deserialize_with = "de::string")]
    pub plan: Option<String>,
    #[serde(default, deserialize_with = "de::flag")]
    pub is_vip: Option<bool>,
    #[serde(default, deserialize_with = "de::flag")]
    pub is_boosted: Option<bool>,
    #[serde(default, deserialize_with = "de::timestamp")]
    pub boosted_until: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::flag")]
    pub is_verified: Option<bool>,
    #[serde(default, deserialize_with = "de::flag")]
    pub is_online: Option<bool>,
    #[serde(default, deserialize_with = "de::integer")]
    pub priority: Option<i64>,
}

impl RawObject for RawListingRecord {
    const KEYS: KeyTable = &[
        ("id", &["_id"]),
        ("user", &["owner"]),
        ("name", &["display_name", "displayName"]),
        ("description", &["bio", "biography"]),
        ("category", &["gender"]),
        ("pricing", &["price"]),
        ("photos", &["images"]),
        ("custom_services", &["customServices"]),
        ("plan", &["plan_type", "planType"]),
        ("is_vip", &["isVip"]),
        ("is_boosted", &["isBoosted"]),
        ("boosted_until", &["boostedUntil"]),
        ("is_verified", &["isVerified"]),
        ("is_online", &["isOnline"]),
    ];
}

impl RawListingRecord {
    /// Decode one record from an arbitrary JSON value.
    ///
    /// Anything that is not an object yields an all-`None` record.
    pub fn from_value(value: &Value) -> Self {
        Self::decode(value.clone()).unwrap_or_default()
    }
}

/// Owner/advertiser attached to a listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOwner {
    #[serde(default, deserialize_with = "de::string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::integer")]
    pub age: Option<i64>,
    #[serde(default, deserialize_with = "de::timestamp")]
    pub premium_until: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::flag")]
    pub is_verified: Option<bool>,
    #[serde(default, deserialize_with = "de::flag")]
    pub is_online: Option<bool>,
}

impl RawObject for RawOwner {
    const KEYS: KeyTable = &[
        ("id", &["_id"]),
        ("premium_until", &["premiumUntil"]),
        ("is_verified", &["isVerified"]),
        ("is_online", &["isOnline"]),
    ];
}

/// Location names, already resolved server-side
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLocation {
    #[serde(default, deserialize_with = "de::string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "de::string")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "de::string")]
    pub neighborhood: Option<String>,
    #[serde(default, deserialize_with = "de::string")]
    pub zone: Option<String>,
}

impl RawObject for RawLocation {
    const KEYS: KeyTable = &[
        ("city", &["locality"]),
        ("department", &["region"]),
        ("neighborhood", &["sub_locality", "subLocality"]),
        ("zone", &["sub_zone", "specific_zone", "specificZone"]),
    ];
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPricing {
    #[serde(default, deserialize_with = "de::integer")]
    pub base_price: Option<i64>,
}

impl RawObject for RawPricing {
    const KEYS: KeyTable = &[("base_price", &["basePrice", "amount"])];
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPhoto {
    #[serde(default, deserialize_with = "de::string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "de::flag")]
    pub is_primary: Option<bool>,
}

impl RawObject for RawPhoto {
    const KEYS: KeyTable = &[("is_primary", &["isPrimary", "is_main"])];
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAvailability {
    #[serde(default, deserialize_with = "de::list")]
    pub days: Option<Vec<String>>,
    #[serde(default, deserialize_with = "de::string")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "de::string")]
    pub end_time: Option<String>,
}

impl RawObject for RawAvailability {
    const KEYS: KeyTable = &[
        ("start_time", &["startTime", "from"]),
        ("end_time", &["endTime", "to"]),
    ];
}

/// Field decoders that never fail: they read any JSON value and keep it only
/// when it has a usable shape.
mod de {
    use super::*;
    use serde::Deserializer;

    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(as_integer(&Value::deserialize(deserializer)?))
    }

    pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(b) => Some(b),
            Value::Number(n) => n.as_i64().map(|v| v != 0),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "si" => Some(true),
                "false" | "0" | "no" => Some(false),
                _ => None,
            },
            _ => None,
        })
    }

    /// RFC 3339 string or epoch milliseconds.
    pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            Value::Number(n) => n
                .as_i64()
                .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
            _ => None,
        })
    }

    pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: RawObject,
    {
        Ok(T::decode(Value::deserialize(deserializer)?))
    }

    /// List of raw objects; elements that are not objects are dropped.
    pub fn objects<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: RawObject,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => Some(items.into_iter().filter_map(T::decode).collect()),
            _ => None,
        })
    }

    /// Keeps the elements that decode and drops the rest.
    pub fn list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => Some(
                items
                    .into_iter()
                    .filter_map(|item| serde_json::from_value(item).ok())
                    .collect(),
            ),
            _ => None,
        })
    }

    fn as_integer(value: &Value) -> Option<i64> {
        match value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => {
                let digits: String = s
                    .trim()
                    .chars()
                    .filter(|c| c.is_ascii_digit() || *c == '-')
                    .collect();
                digits.parse().ok()
            }
            _ => None,
        }
    }
}
