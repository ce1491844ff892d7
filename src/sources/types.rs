use serde::{Deserialize, Serialize};

/// Server-side search parameters sent with a listing fetch
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SearchParams {
    /// Region id to pre-filter on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Locality id to pre-filter on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Category token as the backend expects it ("mujer", "hombre", ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Maximum number of records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl SearchParams {
    /// Query string pairs for the present parameters
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(region) = &self.region {
            pairs.push(("region", region.clone()));
        }
        if let Some(city) = &self.city {
            pairs.push(("city", city.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_present_params_are_sent() {
        assert!(SearchParams::default().query_pairs().is_empty());

        let params = SearchParams {
            city: Some("medellin".into()),
            limit: Some(50),
            ..Default::default()
        };
        assert_eq!(
            params.query_pairs(),
            vec![("city", "medellin".to_string()), ("limit", "50".to_string())]
        );
    }
}
