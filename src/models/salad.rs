use std::collections::BTreeSet;

use serde::Deserialize;

/// A salad entry as it appears in the catalog file, keyed by name.
#[derive(Debug, Clone, Deserialize)]
pub struct SaladRecord {
    #[serde(rename = "pris")]
    pub price: u32,

    #[serde(rename = "ingredienser")]
    pub ingredients: Vec<String>,
}

/// A catalog salad with its base price and required ingredients.
///
/// Ingredient names are canonical (as spelled in the ingredient table) and
/// unique, in the order the catalog declares them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Salad {
    pub name: String,
    pub price: u32,
    pub ingredients: Vec<String>,
}

impl Salad {
    pub fn new(name: impl Into<String>, price: u32, ingredients: Vec<String>) -> Self {
        Self {
            name: name.into(),
            price,
            ingredients,
        }
    }

    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Number of required ingredients present in the selection.
    pub fn overlap(&self, selection: &BTreeSet<String>) -> usize {
        self.ingredients
            .iter()
            .filter(|i| selection.contains(*i))
            .count()
    }

    /// Required ingredients absent from the selection.
    pub fn missing(&self, selection: &BTreeSet<String>) -> BTreeSet<String> {
        self.ingredients
            .iter()
            .filter(|i| !selection.contains(*i))
            .cloned()
            .collect()
    }

    /// True when every required ingredient is selected.
    pub fn is_covered_by(&self, selection: &BTreeSet<String>) -> bool {
        self.ingredients.iter().all(|i| selection.contains(i))
    }
}
