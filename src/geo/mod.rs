//! Static region → locality → sub-locality hierarchy.

pub mod resolver;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub use resolver::{LocationResolver, ResolvedLocation};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubLocality {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Locality {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sub_localities: Vec<SubLocality>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Region {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub localities: Vec<Locality>,
}

impl Region {
    pub fn locality(&self, id: &str) -> Option<&Locality> {
        self.localities.iter().find(|l| l.id == id)
    }
}

impl Locality {
    pub fn sub_locality(&self, id: &str) -> Option<&SubLocality> {
        self.sub_localities.iter().find(|s| s.id == id)
    }
}

/// Geographic taxonomy, immutable once built
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Taxonomy {
    pub regions: Vec<Region>,
}

impl Taxonomy {
    /// Built-in dataset, built on first use and shared for the process lifetime
    pub fn builtin() -> &'static Taxonomy {
        static TAXONOMY: OnceLock<Taxonomy> = OnceLock::new();
        TAXONOMY.get_or_init(|| Taxonomy {
            regions: BUILTIN
                .iter()
                .map(|(id, name, localities)| Region {
                    id: id.to_string(),
                    name: name.to_string(),
                    localities: localities
                        .iter()
                        .map(|(id, name, subs)| Locality {
                            id: id.to_string(),
                            name: name.to_string(),
                            sub_localities: subs
                                .iter()
                                .map(|(id, name)| SubLocality {
                                    id: id.to_string(),
                                    name: name.to_string(),
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        })
    }

    /// Load an alternate dataset: a JSON array of regions
    pub fn from_json(json: &str) -> Result<Self> {
        let regions: Vec<Region> =
            serde_json::from_str(json).context("Failed to parse taxonomy JSON")?;
        Ok(Self { regions })
    }

    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn locality(&self, region_id: &str, locality_id: &str) -> Option<&Locality> {
        self.region(region_id)?.locality(locality_id)
    }

    pub fn sub_locality(
        &self,
        region_id: &str,
        locality_id: &str,
        sub_locality_id: &str,
    ) -> Option<&SubLocality> {
        self.locality(region_id, locality_id)?
            .sub_locality(sub_locality_id)
    }

    /// Find a locality by id without knowing its region
    pub fn find_locality(&self, locality_id: &str) -> Option<(&Region, &Locality)> {
        self.regions
            .iter()
            .find_map(|r| r.locality(locality_id).map(|l| (r, l)))
    }
}

type SubTable = &'static [(&'static str, &'static str)];
type LocalityTable = &'static [(&'static str, &'static str, SubTable)];

const BUILTIN: &[(&str, &str, LocalityTable)] = &[
    (
        "cundinamarca",
        "Cundinamarca",
        &[
            (
                "bogota",
                "Bogotá",
                &[
                    ("chapinero", "Chapinero"),
                    ("usaquen", "Usaquén"),
                    ("teusaquillo", "Teusaquillo"),
                    ("suba", "Suba"),
                    ("kennedy", "Kennedy"),
                    ("fontibon", "Fontibón"),
                    ("engativa", "Engativá"),
                    ("la_candelaria", "La Candelaria"),
                ],
            ),
            ("soacha", "Soacha", &[]),
            ("chia", "Chía", &[]),
            ("zipaquira", "Zipaquirá", &[]),
        ],
    ),
    (
        "antioquia",
        "Antioquia",
        &[
            (
                "medellin",
                "Medellín",
                &[
                    ("el_poblado", "El Poblado"),
                    ("laureles", "Laureles"),
                    ("belen", "Belén"),
                    ("envigado_centro", "Envigado Centro"),
                    ("la_candelaria_med", "La Candelaria"),
                ],
            ),
            ("envigado", "Envigado", &[]),
            ("itagui", "Itagüí", &[]),
            ("bello", "Bello", &[]),
            ("rionegro", "Rionegro", &[]),
        ],
    ),
    (
        "valle_del_cauca",
        "Valle del Cauca",
        &[
            (
                "cali",
                "Cali",
                &[
                    ("granada", "Granada"),
                    ("san_fernando", "San Fernando"),
                    ("ciudad_jardin", "Ciudad Jardín"),
                ],
            ),
            ("palmira", "Palmira", &[]),
            ("buenaventura", "Buenaventura", &[]),
        ],
    ),
    (
        "atlantico",
        "Atlántico",
        &[
            (
                "barranquilla",
                "Barranquilla",
                &[("el_prado", "El Prado"), ("riomar", "Riomar")],
            ),
            ("soledad", "Soledad", &[]),
        ],
    ),
    (
        "bolivar",
        "Bolívar",
        &[
            (
                "cartagena",
                "Cartagena",
                &[
                    ("bocagrande", "Bocagrande"),
                    ("getsemani", "Getsemaní"),
                    ("centro_historico", "Centro Histórico"),
                ],
            ),
            ("turbaco", "Turbaco", &[]),
        ],
    ),
    (
        "santander",
        "Santander",
        &[
            ("bucaramanga", "Bucaramanga", &[("cabecera", "Cabecera del Llano")]),
            ("floridablanca", "Floridablanca", &[]),
        ],
    ),
    (
        "risaralda",
        "Risaralda",
        &[("pereira", "Pereira", &[("circunvalar", "Circunvalar")])],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lookups_walk_the_tree() {
        let taxonomy = Taxonomy::builtin();
        assert_eq!(taxonomy.region("antioquia").map(|r| r.name.as_str()), Some("Antioquia"));
        assert_eq!(
            taxonomy.locality("cundinamarca", "bogota").map(|l| l.name.as_str()),
            Some("Bogotá")
        );
        assert_eq!(
            taxonomy
                .sub_locality("antioquia", "medellin", "el_poblado")
                .map(|s| s.name.as_str()),
            Some("El Poblado")
        );
        assert!(taxonomy.locality("antioquia", "bogota").is_none());
        assert!(taxonomy.region("atlantis").is_none());
    }

    #[test]
    fn find_locality_searches_all_regions() {
        let (region, locality) = Taxonomy::builtin().find_locality("cali").unwrap();
        assert_eq!(region.id, "valle_del_cauca");
        assert_eq!(locality.name, "Cali");
    }

    #[test]
    fn builtin_is_shared() {
        assert!(std::ptr::eq(Taxonomy::builtin(), Taxonomy::builtin()));
    }

    #[test]
    fn from_json_loads_regions() {
        let taxonomy = Taxonomy::from_json(
            r#"[{ "id": "lima", "name": "Lima", "localities": [
                { "id": "miraflores", "name": "Miraflores" }
            ] }]"#,
        )
        .unwrap();
        assert_eq!(
            taxonomy.locality("lima", "miraflores").map(|l| l.sub_localities.len()),
            Some(0)
        );
        assert!(Taxonomy::from_json("{ not json").is_err());
    }
}
