use super::{Locality, Region, SubLocality, Taxonomy};
use crate::filters::FilterCriteria;
use crate::models::NormalizedListing;
use crate::text::{contains_folded, eq_folded};

/// Read-only view over a taxonomy that turns criteria ids into names and
/// decides whether a listing sits in the selected location.
#[derive(Debug, Clone, Copy)]
pub struct LocationResolver<'a> {
    taxonomy: &'a Taxonomy,
}

/// Nodes found for the ids selected in a criteria object. A level is `None`
/// when its id is empty or not present in the taxonomy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedLocation<'a> {
    pub region: Option<&'a Region>,
    pub locality: Option<&'a Locality>,
    pub sub_locality: Option<&'a SubLocality>,
}

impl<'a> ResolvedLocation<'a> {
    pub fn region_name(&self) -> Option<&'a str> {
        self.region.map(|r| r.name.as_str())
    }

    pub fn locality_name(&self) -> Option<&'a str> {
        self.locality.map(|l| l.name.as_str())
    }

    pub fn sub_locality_name(&self) -> Option<&'a str> {
        self.sub_locality.map(|s| s.name.as_str())
    }
}

impl<'a> LocationResolver<'a> {
    pub fn new(taxonomy: &'a Taxonomy) -> Self {
        Self { taxonomy }
    }

    pub fn taxonomy(&self) -> &'a Taxonomy {
        self.taxonomy
    }

    /// Walk the tree for the criteria's region/locality/sub-locality ids.
    ///
    /// A locality selected without a resolvable region is looked up across
    /// all regions; the region itself stays unresolved.
    pub fn resolve(&self, criteria: &FilterCriteria) -> ResolvedLocation<'a> {
        let region = non_empty(&criteria.region_id).and_then(|id| self.taxonomy.region(id));

        let locality = non_empty(&criteria.locality_id).and_then(|id| match region {
            Some(r) => r.locality(id),
            None => self.taxonomy.find_locality(id).map(|(_, l)| l),
        });

        let sub_locality = non_empty(&criteria.sub_locality_id)
            .and_then(|id| locality.and_then(|l| l.sub_locality(id)));

        ResolvedLocation {
            region,
            locality,
            sub_locality,
        }
    }

    /// Whether `listing` lies in every selected location level.
    ///
    /// A level whose node resolved is decided by exact name against the
    /// listing's location detail. When that detail is missing, or the id is
    /// not in the taxonomy, it falls back to a permissive substring match of
    /// the node name (or the id turned into a label) against the city label.
    pub fn matches(&self, listing: &NormalizedListing, criteria: &FilterCriteria) -> bool {
        let resolved = self.resolve(criteria);
        let detail = &listing.location_detail;

        level_matches(
            &criteria.region_id,
            resolved.region_name(),
            detail.region.as_deref(),
            listing,
        ) && level_matches(
            &criteria.locality_id,
            resolved.locality_name(),
            detail.locality.as_deref(),
            listing,
        ) && level_matches(
            &criteria.sub_locality_id,
            resolved.sub_locality_name(),
            detail.sub_locality.as_deref(),
            listing,
        )
    }
}

fn level_matches(
    id: &str,
    node_name: Option<&str>,
    detail: Option<&str>,
    listing: &NormalizedListing,
) -> bool {
    let Some(id) = non_empty(id) else {
        return true;
    };

    match (node_name, non_empty_opt(detail)) {
        (Some(name), Some(detail)) => eq_folded(name, detail),
        (Some(name), None) => fallback_matches(name, &listing.city_label),
        (None, _) => fallback_matches(&fallback_label(id), &listing.city_label),
    }
}

/// Turn a taxonomy id into a matchable label: `"el_poblado"` → `"el poblado"`.
pub fn fallback_label(id: &str) -> String {
    id.trim().replace(['_', '-'], " ")
}

/// Case- and accent-insensitive containment of `label` in free-text `location`.
/// Prefers false positives over hiding listings; an empty label matches.
pub fn fallback_matches(label: &str, location: &str) -> bool {
    contains_folded(location, label)
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

fn non_empty_opt(s: Option<&str>) -> Option<&str> {
    s.and_then(non_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LocationDetail;

    fn listing(city_label: &str, detail: LocationDetail) -> NormalizedListing {
        NormalizedListing {
            city_label: city_label.to_string(),
            location_detail: detail,
            ..Default::default()
        }
    }

    fn medellin() -> NormalizedListing {
        listing(
            "Medellín, Antioquia",
            LocationDetail {
                region: Some("Antioquia".into()),
                locality: Some("Medellín".into()),
                sub_locality: Some("El Poblado".into()),
                sub_zone: Some("Provenza".into()),
            },
        )
    }

    #[test]
    fn resolve_returns_canonical_names() {
        let resolver = LocationResolver::new(Taxonomy::builtin());
        let criteria = FilterCriteria::default()
            .with_region("antioquia")
            .with_locality("medellin")
            .with_sub_locality("el_poblado");

        let resolved = resolver.resolve(&criteria);
        assert_eq!(resolved.region_name(), Some("Antioquia"));
        assert_eq!(resolved.locality_name(), Some("Medellín"));
        assert_eq!(resolved.sub_locality_name(), Some("El Poblado"));
    }

    #[test]
    fn resolve_finds_orphan_locality_across_regions() {
        let resolver = LocationResolver::new(Taxonomy::builtin());
        let criteria = FilterCriteria::default().with_locality("cali");

        let resolved = resolver.resolve(&criteria);
        assert_eq!(resolved.locality_name(), Some("Cali"));
        // region was not selected, so it is not reported
        assert_eq!(resolved.region_name(), None);
    }

    #[test]
    fn exact_path_compares_detail_names() {
        let resolver = LocationResolver::new(Taxonomy::builtin());

        let same = FilterCriteria::default().with_region("antioquia").with_locality("medellin");
        assert!(resolver.matches(&medellin(), &same));

        let other = FilterCriteria::default().with_region("cundinamarca");
        assert!(!resolver.matches(&medellin(), &other));

        let wrong_sub = same.clone().with_sub_locality("laureles");
        assert!(!resolver.matches(&medellin(), &wrong_sub));
    }

    #[test]
    fn fallback_path_uses_free_text_when_detail_missing() {
        let resolver = LocationResolver::new(Taxonomy::builtin());
        let free_text = listing("Bogota centro", LocationDetail::default());

        let criteria = FilterCriteria::default().with_region("cundinamarca").with_locality("bogota");
        // region name is not in the free text
        assert!(!resolver.matches(&free_text, &criteria));

        let criteria = FilterCriteria::default().with_locality("bogota");
        assert!(resolver.matches(&free_text, &criteria));
    }

    #[test]
    fn known_detail_that_differs_is_not_rescued_by_fallback() {
        let resolver = LocationResolver::new(Taxonomy::builtin());
        let antioquia = listing(
            "Medellín, Antioquia",
            LocationDetail {
                region: Some("Antioquia".into()),
                locality: Some("Medellín".into()),
                sub_zone: Some("Calle Bolívar".into()),
                ..Default::default()
            },
        );

        let criteria = FilterCriteria::default().with_region("bolivar");
        assert!(!resolver.matches(&antioquia, &criteria));

        let free_text = listing(
            "Medellin centro",
            LocationDetail {
                locality: Some("Medellin centro".into()),
                ..Default::default()
            },
        );
        let criteria = FilterCriteria::default().with_locality("medellin");
        assert!(!resolver.matches(&free_text, &criteria));
    }

    #[test]
    fn fallback_path_uses_id_label_for_unknown_nodes() {
        let resolver = LocationResolver::new(Taxonomy::builtin());
        let listing = listing(
            "Santa Marta, Magdalena",
            LocationDetail {
                sub_zone: Some("El Rodadero".into()),
                ..Default::default()
            },
        );

        let criteria = FilterCriteria::default().with_region("magdalena");
        assert!(resolver.matches(&listing, &criteria));

        // zone text is not part of the city label
        let criteria = FilterCriteria::default().with_region("el_rodadero");
        assert!(!resolver.matches(&listing, &criteria));

        let criteria = FilterCriteria::default().with_region("la_guajira");
        assert!(!resolver.matches(&listing, &criteria));
    }

    #[test]
    fn fallback_label_replaces_separators() {
        assert_eq!(fallback_label("valle_del_cauca"), "valle del cauca");
        assert_eq!(fallback_label("san-andres"), "san andres");
        assert!(fallback_matches("valle del cauca", "Cali, Valle del Cauca"));
    }

    #[test]
    fn no_selection_matches_everything() {
        let resolver = LocationResolver::new(Taxonomy::builtin());
        assert!(resolver.matches(&listing("", LocationDetail::default()), &FilterCriteria::default()));
    }
}
