use std::fmt;
use std::fs;
use std::marker::PhantomData;
use std::path::Path;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::{Result, SaladError};
use crate::models::{Ingredient, SaladRecord};

/// Every key/value pair of a JSON object, in file order.
///
/// Repeated keys are all kept so the catalog can reject them.
struct Entries<V>(Vec<(String, V)>);

struct EntriesVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
    type Value = Entries<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, V>()? {
            entries.push((key, value));
        }
        Ok(Entries(entries))
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Entries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

/// Parse the ingredient table: `{"<name>": <price>, ...}` in file order.
pub fn parse_ingredients(json: &str) -> serde_json::Result<Vec<Ingredient>> {
    let Entries(entries) = serde_json::from_str::<Entries<u32>>(json)?;
    Ok(entries
        .into_iter()
        .map(|(name, price)| Ingredient::new(name, price))
        .collect())
}

/// Parse the salad catalog: `{"<name>": {"pris": .., "ingredienser": [..]}, ...}`
/// in file order.
pub fn parse_salads(json: &str) -> serde_json::Result<Vec<(String, SaladRecord)>> {
    let Entries(entries) = serde_json::from_str::<Entries<SaladRecord>>(json)?;
    Ok(entries)
}

fn read_data_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| SaladError::DataFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate both data files.
///
/// All-or-nothing: any missing file, malformed document or dangling
/// ingredient reference fails the whole load.
pub fn load_catalog<P: AsRef<Path>, Q: AsRef<Path>>(
    ingredients_path: P,
    salads_path: Q,
) -> Result<Catalog> {
    let ingredients_path = ingredients_path.as_ref();
    let salads_path = salads_path.as_ref();

    debug!(path = %ingredients_path.display(), "reading ingredient table");
    let ingredients = parse_ingredients(&read_data_file(ingredients_path)?).map_err(|source| {
        SaladError::MalformedData {
            path: ingredients_path.to_path_buf(),
            source,
        }
    })?;

    debug!(path = %salads_path.display(), "reading salad catalog");
    let salads = parse_salads(&read_data_file(salads_path)?).map_err(|source| {
        SaladError::MalformedData {
            path: salads_path.to_path_buf(),
            source,
        }
    })?;

    let catalog = Catalog::new(ingredients, salads)?;
    info!(
        ingredients = catalog.ingredients().len(),
        salads = catalog.salads().len(),
        "catalog loaded"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_ingredients_keeps_file_order() {
        let ingredients = parse_ingredients(r#"{"tomat": 5, "feta": 10, "oliver": 8}"#).unwrap();
        let names: Vec<&str> = ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["tomat", "feta", "oliver"]);
        assert_eq!(ingredients[1].price, 10);
    }

    #[test]
    fn test_parse_ingredients_rejects_negative_price() {
        assert!(parse_ingredients(r#"{"tomat": -5}"#).is_err());
    }

    #[test]
    fn test_parse_keeps_repeated_keys() {
        let ingredients = parse_ingredients(r#"{"feta": 10, "feta": 99}"#).unwrap();
        assert_eq!(ingredients.len(), 2);
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(parse_ingredients(r#"["feta"]"#).is_err());
    }

    #[test]
    fn test_exact_duplicate_ingredient_fails_load() {
        let ingredients = write_temp(r#"{"feta": 10, "feta": 99}"#);
        let salads = write_temp(r#"{}"#);

        let err = load_catalog(ingredients.path(), salads.path()).unwrap_err();
        assert!(matches!(err, SaladError::InvalidCatalog(_)));
        assert!(err.to_string().contains("feta"));
    }

    #[test]
    fn test_exact_duplicate_salad_fails_load() {
        let ingredients = write_temp(r#"{"feta": 10}"#);
        let salads = write_temp(
            r#"{
                "Grekisk": {"pris": 60, "ingredienser": ["feta"]},
                "Grekisk": {"pris": 1, "ingredienser": ["feta"]}
            }"#,
        );

        let err = load_catalog(ingredients.path(), salads.path()).unwrap_err();
        assert!(matches!(err, SaladError::InvalidCatalog(_)));
        assert!(err.to_string().contains("Grekisk"));
    }

    #[test]
    fn test_load_catalog_from_files() {
        let ingredients = write_temp(r#"{"feta": 10, "oliver": 8, "tomat": 5}"#);
        let salads = write_temp(
            r#"{"Grekisk": {"pris": 60, "ingredienser": ["feta", "oliver", "tomat"]}}"#,
        );

        let catalog = load_catalog(ingredients.path(), salads.path()).unwrap();
        assert_eq!(catalog.ingredients().len(), 3);
        assert_eq!(catalog.salad("grekisk").unwrap().price, 60);
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let salads = write_temp(r#"{}"#);
        let err = load_catalog("/nonexistent/ingredienser.json", salads.path()).unwrap_err();

        assert!(matches!(err, SaladError::DataFile { .. }));
        assert!(err.to_string().contains("ingredienser.json"));
    }

    #[test]
    fn test_malformed_salads_file() {
        let ingredients = write_temp(r#"{"feta": 10}"#);
        let salads = write_temp(r#"{"Grekisk": {"pris": 60}}"#);

        let err = load_catalog(ingredients.path(), salads.path()).unwrap_err();
        assert!(matches!(err, SaladError::MalformedData { .. }));
    }
}
