use std::collections::HashMap;

use strsim::jaro_winkler;

use crate::error::{Result, SaladError};
use crate::models::{Ingredient, Salad, SaladRecord};

/// Minimum Jaro-Winkler similarity for a name suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// The read-only ingredient table and salad catalog for a session.
///
/// Both lists keep the declaration order of the data files. Lookups are
/// case-insensitive.
#[derive(Debug, Clone)]
pub struct Catalog {
    ingredients: Vec<Ingredient>,
    salads: Vec<Salad>,
    /// Lowercase ingredient name -> index into `ingredients`.
    ingredient_index: HashMap<String, usize>,
    /// Lowercase salad name -> index into `salads`.
    salad_index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, validating that every salad is non-empty and only
    /// references known ingredients.
    ///
    /// Salad ingredient names are rewritten to the ingredient table's spelling
    /// and deduplicated.
    pub fn new(ingredients: Vec<Ingredient>, salads: Vec<(String, SaladRecord)>) -> Result<Self> {
        let mut ingredient_index = HashMap::new();
        for (idx, ingredient) in ingredients.iter().enumerate() {
            if ingredient_index.insert(ingredient.key(), idx).is_some() {
                return Err(SaladError::InvalidCatalog(format!(
                    "ingredient '{}' is listed more than once",
                    ingredient.name
                )));
            }
        }

        let mut resolved = Vec::with_capacity(salads.len());
        let mut salad_index = HashMap::new();
        for (name, record) in salads {
            if record.ingredients.is_empty() {
                return Err(SaladError::InvalidCatalog(format!(
                    "salad '{}' has no ingredients",
                    name
                )));
            }

            let mut required: Vec<String> = Vec::with_capacity(record.ingredients.len());
            for ingredient_name in &record.ingredients {
                let Some(&idx) = ingredient_index.get(&ingredient_name.to_lowercase()) else {
                    return Err(SaladError::InvalidCatalog(format!(
                        "salad '{}' requires unknown ingredient '{}'",
                        name, ingredient_name
                    )));
                };
                let canonical = &ingredients[idx].name;
                if !required.contains(canonical) {
                    required.push(canonical.clone());
                }
            }

            let salad = Salad::new(name, record.price, required);
            if salad_index.insert(salad.key(), resolved.len()).is_some() {
                return Err(SaladError::InvalidCatalog(format!(
                    "salad '{}' is listed more than once",
                    salad.name
                )));
            }
            resolved.push(salad);
        }

        Ok(Self {
            ingredients,
            salads: resolved,
            ingredient_index,
            salad_index,
        })
    }

    /// Build a catalog from the two JSON documents.
    pub fn from_json(ingredients_json: &str, salads_json: &str) -> Result<Self> {
        let ingredients = super::parse_ingredients(ingredients_json)?;
        let salads = super::parse_salads(salads_json)?;
        Self::new(ingredients, salads)
    }

    /// Get an ingredient by name (case-insensitive).
    pub fn ingredient(&self, name: &str) -> Option<&Ingredient> {
        self.ingredient_index
            .get(&name.to_lowercase())
            .map(|&idx| &self.ingredients[idx])
    }

    /// Get a salad by name (case-insensitive).
    pub fn salad(&self, name: &str) -> Option<&Salad> {
        self.salad_index
            .get(&name.to_lowercase())
            .map(|&idx| &self.salads[idx])
    }

    /// Like [`Catalog::ingredient`], but an unknown name is an error carrying
    /// the closest known name, if any.
    pub fn require_ingredient(&self, name: &str) -> Result<&Ingredient> {
        self.ingredient(name)
            .ok_or_else(|| SaladError::UnknownIngredient {
                name: name.to_string(),
                suggestion: self.suggest_ingredient(name).map(|i| i.name.clone()),
            })
    }

    pub fn require_salad(&self, name: &str) -> Result<&Salad> {
        self.salad(name)
            .ok_or_else(|| SaladError::UnknownSalad(name.to_string()))
    }

    /// Closest ingredient by Jaro-Winkler similarity, if any is close enough.
    pub fn suggest_ingredient(&self, input: &str) -> Option<&Ingredient> {
        let input = input.trim().to_lowercase();
        self.ingredients
            .iter()
            .map(|i| (i, jaro_winkler(&i.key(), &input)))
            .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
    }

    /// All ingredients in declaration order.
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// All salads in declaration order.
    pub fn salads(&self) -> &[Salad] {
        &self.salads
    }
}
