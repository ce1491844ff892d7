use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default upper price bound. A `max_price` at or above this, or at or below
/// zero, disables the upper price check.
pub const PRICE_CAP: i64 = 10_000_000;
pub const DEFAULT_MIN_AGE: u32 = 18;
pub const DEFAULT_MAX_AGE: u32 = 65;

/// Gender value meaning "no gender filter"
pub const ALL_GENDERS: &str = "all";

/// User-selected filter values.
///
/// Immutable value object: every `with_*` method consumes the criteria and
/// returns an updated copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FilterCriteria {
    pub keyword: String,
    pub gender_category: String,
    pub region_id: String,
    pub locality_id: String,
    pub sub_locality_id: String,
    pub specific_zone_text: String,
    pub min_price: i64,
    pub max_price: i64,
    pub min_age: u32,
    pub max_age: u32,
    pub only_verified: bool,
    pub only_online: bool,
    pub only_premium: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            gender_category: String::new(),
            region_id: String::new(),
            locality_id: String::new(),
            sub_locality_id: String::new(),
            specific_zone_text: String::new(),
            min_price: 0,
            max_price: PRICE_CAP,
            min_age: DEFAULT_MIN_AGE,
            max_age: DEFAULT_MAX_AGE,
            only_verified: false,
            only_online: false,
            only_premium: false,
        }
    }
}

impl FilterCriteria {
    pub fn with_keyword(self, keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ..self
        }
    }

    pub fn with_gender(self, gender_category: impl Into<String>) -> Self {
        Self {
            gender_category: gender_category.into(),
            ..self
        }
    }

    /// Select a region, clearing the dependent locality and sub-locality.
    pub fn with_region(self, region_id: impl Into<String>) -> Self {
        Self {
            region_id: region_id.into(),
            locality_id: String::new(),
            sub_locality_id: String::new(),
            ..self
        }
    }

    /// Select a locality, clearing the dependent sub-locality.
    pub fn with_locality(self, locality_id: impl Into<String>) -> Self {
        Self {
            locality_id: locality_id.into(),
            sub_locality_id: String::new(),
            ..self
        }
    }

    pub fn with_sub_locality(self, sub_locality_id: impl Into<String>) -> Self {
        Self {
            sub_locality_id: sub_locality_id.into(),
            ..self
        }
    }

    pub fn with_zone_text(self, text: impl Into<String>) -> Self {
        Self {
            specific_zone_text: text.into(),
            ..self
        }
    }

    pub fn with_price_range(self, min_price: i64, max_price: i64) -> Self {
        Self {
            min_price,
            max_price,
            ..self
        }
    }

    pub fn with_age_range(self, min_age: u32, max_age: u32) -> Self {
        Self {
            min_age,
            max_age,
            ..self
        }
    }

    /// Minimum price typed by the user. Blank resets to 0; text that is not
    /// a number keeps the previous value.
    pub fn with_min_price_text(self, text: &str) -> Self {
        let min_price = coerce_price(text, self.min_price, 0);
        Self { min_price, ..self }
    }

    /// Maximum price typed by the user. Blank resets to 0, which disables
    /// the upper bound; text that is not a number keeps the previous value.
    pub fn with_max_price_text(self, text: &str) -> Self {
        let max_price = coerce_price(text, self.max_price, 0);
        Self { max_price, ..self }
    }

    pub fn with_min_age_text(self, text: &str) -> Self {
        let min_age = coerce_age(text, self.min_age, DEFAULT_MIN_AGE);
        Self { min_age, ..self }
    }

    pub fn with_max_age_text(self, text: &str) -> Self {
        let max_age = coerce_age(text, self.max_age, DEFAULT_MAX_AGE);
        Self { max_age, ..self }
    }

    pub fn with_only_verified(self, only_verified: bool) -> Self {
        Self {
            only_verified,
            ..self
        }
    }

    pub fn with_only_online(self, only_online: bool) -> Self {
        Self {
            only_online,
            ..self
        }
    }

    pub fn with_only_premium(self, only_premium: bool) -> Self {
        Self {
            only_premium,
            ..self
        }
    }

    /// Back to the defaults
    pub fn reset(self) -> Self {
        Self::default()
    }

    /// True when no criterion narrows the result set
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Whether the upper price bound is in effect
    pub fn has_price_cap(&self) -> bool {
        self.max_price > 0 && self.max_price < PRICE_CAP
    }

    /// Gender filter value, or `None` when blank or "all"
    pub fn gender_filter(&self) -> Option<&str> {
        let value = self.gender_category.trim();
        (!value.is_empty() && !value.eq_ignore_ascii_case(ALL_GENDERS)).then_some(value)
    }
}

fn coerce_price(text: &str, previous: i64, blank: i64) -> i64 {
    let digits: String = text
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | ' ' | '\u{a0}'))
        .collect();

    if digits.is_empty() {
        return blank;
    }
    match digits.parse::<i64>() {
        Ok(value) if value >= 0 => value,
        _ => {
            warn!("Ignoring non-numeric price input {:?}", text);
            previous
        }
    }
}

fn coerce_age(text: &str, previous: u32, blank: u32) -> u32 {
    let text = text.trim();
    if text.is_empty() {
        return blank;
    }
    text.parse().unwrap_or_else(|_| {
        warn!("Ignoring non-numeric age input {:?}", text);
        previous
    })
}
