use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A type tag attached to an entity, e.g. `Feu` with its badge image.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    pub name: String,
    pub image: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Stats {
    #[serde(rename = "HP")]
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
}

/// One catalog record as served by the API. Unknown wire fields are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Entity {
    pub id: u32,
    #[serde(rename = "pokedexId")]
    pub display_index: u32,
    pub name: String,
    pub image: String,
    #[serde(rename = "apiTypes", default)]
    pub categories: Vec<Category>,
    pub stats: Stats,
}

impl Entity {
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }
}

/// The full list of entities for a session, in the order the source returned them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    entities: Vec<Entity>,
}

impl Catalog {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Distinct categories across the catalog in first-seen order. Each name
    /// keeps the image of its first occurrence.
    pub fn available_categories(&self) -> Vec<&Category> {
        self.entities
            .iter()
            .flat_map(|e| e.categories.iter())
            .unique_by(|c| c.name.clone())
            .collect()
    }
}

impl FromIterator<Entity> for Catalog {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedEntity {
    pub index: usize,
    pub reason: String,
}

/// Result of validating a raw API array element by element.
#[derive(Clone, Debug, Default)]
pub struct DecodedCatalog {
    pub catalog: Catalog,
    pub rejected: Vec<RejectedEntity>,
}

/// Decodes every element on its own so one malformed record does not sink
/// the whole catalog. Rejected elements are reported with their array index.
pub fn decode_entities(values: Vec<serde_json::Value>) -> DecodedCatalog {
    let mut entities = Vec::with_capacity(values.len());
    let mut rejected = Vec::new();
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<Entity>(value) {
            Ok(entity) => entities.push(entity),
            Err(e) => {
                tracing::warn!(index, error = %e, "rejecting malformed catalog entry");
                rejected.push(RejectedEntity {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }
    DecodedCatalog {
        catalog: Catalog::new(entities),
        rejected,
    }
}

#[cfg(test)]
pub(crate) fn entity_for_tests(id: u32, name: &str, categories: &[&str]) -> Entity {
    Entity {
        id,
        display_index: id,
        name: name.to_string(),
        image: format!("https://img.example/{id}.png"),
        categories: categories
            .iter()
            .map(|c| Category {
                name: c.to_string(),
                image: format!("https://img.example/types/{c}.png"),
            })
            .collect(),
        stats: Stats {
            hp: 45,
            attack: 49,
            defense: 49,
        },
    }
}
