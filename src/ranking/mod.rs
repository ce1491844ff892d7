//! Promotional tiers: Boosted, then VIP, then everything else.

use serde::{Deserialize, Serialize};

use crate::models::NormalizedListing;

/// Promotional priority class of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Boosted,
    Vip,
    Regular,
}

impl Tier {
    /// An active boost outranks an active VIP subscription.
    pub fn of(listing: &NormalizedListing) -> Self {
        if listing.is_boost_active {
            Tier::Boosted
        } else if listing.is_vip_active {
            Tier::Vip
        } else {
            Tier::Regular
        }
    }
}

/// Listings split by tier, each group in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedListings {
    pub boosted: Vec<NormalizedListing>,
    pub vip: Vec<NormalizedListing>,
    pub regular: Vec<NormalizedListing>,
}

impl RankedListings {
    pub fn len(&self) -> usize {
        self.boosted.len() + self.vip.len() + self.regular.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Boosted followed by VIP, as shown in the top rail
    pub fn elite_rail(&self) -> impl Iterator<Item = &NormalizedListing> {
        self.boosted.iter().chain(self.vip.iter())
    }

    pub fn tier(&self, tier: Tier) -> &[NormalizedListing] {
        match tier {
            Tier::Boosted => &self.boosted,
            Tier::Vip => &self.vip,
            Tier::Regular => &self.regular,
        }
    }

    /// Copy with each tier ordered by descending `priority`. Equal
    /// priorities keep their input order.
    pub fn sorted_by_priority(&self) -> Self {
        let sort = |group: &[NormalizedListing]| {
            let mut group = group.to_vec();
            group.sort_by(|a, b| b.priority.cmp(&a.priority));
            group
        };

        Self {
            boosted: sort(&self.boosted),
            vip: sort(&self.vip),
            regular: sort(&self.regular),
        }
    }
}

/// Stable single-pass split into tiers. Each listing lands in exactly one group.
pub fn partition<I>(listings: I) -> RankedListings
where
    I: IntoIterator<Item = NormalizedListing>,
{
    let mut ranked = RankedListings::default();
    for listing in listings {
        match Tier::of(&listing) {
            Tier::Boosted => ranked.boosted.push(listing),
            Tier::Vip => ranked.vip.push(listing),
            Tier::Regular => ranked.regular.push(listing),
        }
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: &str, boost: bool, vip: bool, priority: i64) -> NormalizedListing {
        NormalizedListing {
            id: id.to_string(),
            is_boost_active: boost,
            is_vip_active: vip,
            priority,
            ..Default::default()
        }
    }

    fn ids(group: &[NormalizedListing]) -> Vec<&str> {
        group.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn boost_takes_precedence_over_vip() {
        let ranked = partition(vec![listing("both", true, true, 0)]);
        assert_eq!(ids(&ranked.boosted), vec!["both"]);
        assert!(ranked.vip.is_empty());
        assert!(ranked.regular.is_empty());
    }

    #[test]
    fn partition_is_stable_exclusive_and_exhaustive() {
        let input: Vec<NormalizedListing> = (0..30)
            .map(|i| listing(&i.to_string(), i % 5 == 0, i % 3 == 0, 0))
            .collect();

        let ranked = partition(input.clone());
        assert_eq!(ranked.len(), input.len());

        for l in &input {
            let hits = [&ranked.boosted, &ranked.vip, &ranked.regular]
                .iter()
                .filter(|group| group.iter().any(|g| g.id == l.id))
                .count();
            assert_eq!(hits, 1, "listing {} appears {} times", l.id, hits);
            assert!(ranked.tier(Tier::of(l)).iter().any(|g| g.id == l.id));
        }

        // relative order within each tier follows input order
        for group in [&ranked.boosted, &ranked.vip, &ranked.regular] {
            let positions: Vec<usize> = group
                .iter()
                .map(|g| input.iter().position(|l| l.id == g.id).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn empty_input_gives_empty_groups() {
        let ranked = partition(Vec::new());
        assert!(ranked.is_empty());
        assert_eq!(ranked.elite_rail().count(), 0);
    }

    #[test]
    fn elite_rail_is_boosted_then_vip() {
        let ranked = partition(vec![
            listing("v1", false, true, 0),
            listing("r1", false, false, 0),
            listing("b1", true, false, 0),
            listing("v2", false, true, 0),
            listing("b2", true, true, 0),
        ]);

        let rail: Vec<&str> = ranked.elite_rail().map(|l| l.id.as_str()).collect();
        assert_eq!(rail, vec!["b1", "b2", "v1", "v2"]);
        assert_eq!(ids(&ranked.regular), vec!["r1"]);
    }

    #[test]
    fn priority_sort_is_stable_within_tier() {
        let ranked = partition(vec![
            listing("a", false, false, 1),
            listing("b", false, false, 5),
            listing("c", false, false, 1),
            listing("d", true, false, 0),
            listing("e", true, false, 2),
        ]);

        // partition alone never reorders
        assert_eq!(ids(&ranked.regular), vec!["a", "b", "c"]);

        let sorted = ranked.sorted_by_priority();
        assert_eq!(ids(&sorted.regular), vec!["b", "a", "c"]);
        assert_eq!(ids(&sorted.boosted), vec!["e", "d"]);
    }
}
