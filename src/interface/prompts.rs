use std::collections::BTreeSet;

use dialoguer::{Confirm, MultiSelect, Select};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::matcher::SaladMatch;

/// Checkbox list of every ingredient, pre-checking the current selection.
pub fn prompt_ingredients(catalog: &Catalog, selected: &BTreeSet<String>) -> Result<Vec<String>> {
    let labels: Vec<String> = catalog.ingredients().iter().map(|i| i.label()).collect();
    let defaults: Vec<bool> = catalog
        .ingredients()
        .iter()
        .map(|i| selected.contains(&i.name))
        .collect();

    let picked = MultiSelect::new()
        .with_prompt("Välj dina ingredienser (mellanslag markerar, Enter söker)")
        .items(&labels)
        .defaults(&defaults)
        .interact()?;

    Ok(picked
        .into_iter()
        .map(|idx| catalog.ingredients()[idx].name.clone())
        .collect())
}

/// Pick one salad when several cover the selection.
pub fn prompt_salad_choice(matches: &[SaladMatch]) -> Result<String> {
    let options: Vec<String> = matches
        .iter()
        .map(|m| format!("{} ({} kr)", m.salad.name, m.salad.price))
        .collect();

    let selection = Select::new()
        .with_prompt("Flera sallader passar, välj en")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(matches[selection].salad.name.clone())
}

/// Checkbox list of extra ingredients.
pub fn prompt_extras(catalog: &Catalog) -> Result<Vec<String>> {
    let labels: Vec<String> = catalog.ingredients().iter().map(|i| i.label()).collect();

    let picked = MultiSelect::new()
        .with_prompt("Lägg till extra ingredienser")
        .items(&labels)
        .interact()?;

    Ok(picked
        .into_iter()
        .map(|idx| catalog.ingredients()[idx].name.clone())
        .collect())
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
