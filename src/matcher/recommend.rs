use std::collections::BTreeSet;

use tracing::debug;

use crate::catalog::Catalog;
use crate::config::{MatchConfig, MatchPolicy, TieBreak};
use crate::models::Salad;

/// A salad matched against a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaladMatch<'a> {
    pub salad: &'a Salad,
    /// Required ingredients present in the selection.
    pub overlap: usize,
    /// Required ingredients absent from the selection.
    pub missing: BTreeSet<String>,
}

impl<'a> SaladMatch<'a> {
    fn new(salad: &'a Salad, selection: &BTreeSet<String>) -> Self {
        Self {
            salad,
            overlap: salad.overlap(selection),
            missing: salad.missing(selection),
        }
    }
}

/// Outcome of matching a selection against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation<'a> {
    /// The selection was empty.
    NothingSelected,
    /// No salad qualifies under the active policy.
    NoMatch,
    /// Best-overlap winner.
    Best(SaladMatch<'a>),
    /// Every fully covered salad, in catalog order. Never empty.
    Complete(Vec<SaladMatch<'a>>),
}

impl<'a> Recommendation<'a> {
    /// The matched salads; empty when there is no recommendation.
    pub fn matches(&self) -> &[SaladMatch<'a>] {
        match self {
            Recommendation::Best(m) => std::slice::from_ref(m),
            Recommendation::Complete(ms) => ms,
            Recommendation::NothingSelected | Recommendation::NoMatch => &[],
        }
    }

    pub fn is_match(&self) -> bool {
        !self.matches().is_empty()
    }
}

/// Match a selection of ingredient names against the catalog.
///
/// Names are matched case-insensitively; names missing from the ingredient
/// table never overlap any salad.
pub fn recommend<'a>(
    catalog: &'a Catalog,
    selection: &BTreeSet<String>,
    config: &MatchConfig,
) -> Recommendation<'a> {
    if selection.is_empty() {
        return Recommendation::NothingSelected;
    }

    let canonical: BTreeSet<String> = selection
        .iter()
        .map(|name| match catalog.ingredient(name) {
            Some(ingredient) => ingredient.name.clone(),
            None => name.clone(),
        })
        .collect();
    let selection = &canonical;

    let recommendation = match config.policy {
        MatchPolicy::BestOverlap => best_overlap(catalog.salads(), selection, config.tie_break),
        MatchPolicy::Subset => subset_matches(catalog.salads(), selection),
    };

    debug!(
        selected = selection.len(),
        matched = recommendation.matches().len(),
        policy = %config,
        "recommendation computed"
    );
    recommendation
}

fn best_overlap<'a>(
    salads: &'a [Salad],
    selection: &BTreeSet<String>,
    tie_break: TieBreak,
) -> Recommendation<'a> {
    let mut best: Option<(&Salad, usize)> = None;

    for salad in salads {
        let overlap = salad.overlap(selection);
        if overlap == 0 {
            continue;
        }

        let better = match best {
            None => true,
            Some((current, current_overlap)) => {
                overlap > current_overlap
                    || (overlap == current_overlap
                        && tie_break == TieBreak::Cheapest
                        && salad.price < current.price)
            }
        };

        if better {
            best = Some((salad, overlap));
        }
    }

    match best {
        Some((salad, _)) => Recommendation::Best(SaladMatch::new(salad, selection)),
        None => Recommendation::NoMatch,
    }
}

fn subset_matches<'a>(salads: &'a [Salad], selection: &BTreeSet<String>) -> Recommendation<'a> {
    let matches: Vec<SaladMatch> = salads
        .iter()
        .filter(|s| s.is_covered_by(selection))
        .map(|s| SaladMatch::new(s, selection))
        .collect();

    if matches.is_empty() {
        Recommendation::NoMatch
    } else {
        Recommendation::Complete(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"{"feta": 10, "olive": 8, "tomato": 5, "chicken": 20, "lettuce": 4, "egg": 6}"#,
            r#"{
                "Greek": {"pris": 60, "ingredienser": ["feta", "olive", "tomato"]},
                "Garden": {"pris": 50, "ingredienser": ["lettuce", "tomato", "olive"]},
                "Cobb": {"pris": 80, "ingredienser": ["chicken", "egg", "lettuce"]}
            }"#,
        )
        .unwrap()
    }

    fn selection(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn first() -> MatchConfig {
        MatchConfig::new(MatchPolicy::BestOverlap, TieBreak::First)
    }

    fn cheapest() -> MatchConfig {
        MatchConfig::new(MatchPolicy::BestOverlap, TieBreak::Cheapest)
    }

    fn best_name<'a>(rec: &Recommendation<'a>) -> &'a str {
        match rec {
            Recommendation::Best(m) => &m.salad.name,
            other => panic!("expected a best match, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_selection() {
        let catalog = catalog();
        let rec = recommend(&catalog, &BTreeSet::new(), &first());
        assert_eq!(rec, Recommendation::NothingSelected);
        assert!(!rec.is_match());
    }

    #[test]
    fn test_largest_overlap_wins() {
        let catalog = catalog();
        let rec = recommend(&catalog, &selection(&["feta", "olive"]), &first());

        assert_eq!(best_name(&rec), "Greek");
        assert_eq!(rec.matches()[0].overlap, 2);
        assert_eq!(rec.matches()[0].missing, selection(&["tomato"]));
    }

    #[test]
    fn test_selection_names_ignore_case() {
        let catalog = catalog();
        let rec = recommend(&catalog, &selection(&["Feta", "OLIVE"]), &first());

        assert_eq!(best_name(&rec), "Greek");
        assert_eq!(rec.matches()[0].overlap, 2);
        assert_eq!(rec.matches()[0].missing, selection(&["tomato"]));
    }

    #[test]
    fn test_tie_first_in_catalog_order() {
        let catalog = catalog();
        // Greek and Garden both share olive + tomato.
        let rec = recommend(&catalog, &selection(&["olive", "tomato"]), &first());
        assert_eq!(best_name(&rec), "Greek");
    }

    #[test]
    fn test_tie_cheapest() {
        let catalog = catalog();
        let rec = recommend(&catalog, &selection(&["olive", "tomato"]), &cheapest());
        assert_eq!(best_name(&rec), "Garden");
    }

    #[test]
    fn test_no_overlap() {
        let catalog = Catalog::from_json(
            r#"{"feta": 10, "olive": 8, "tomato": 5, "chicken": 20}"#,
            r#"{"Greek": {"pris": 60, "ingredienser": ["feta", "olive", "tomato"]}}"#,
        )
        .unwrap();

        let rec = recommend(&catalog, &selection(&["chicken"]), &first());
        assert_eq!(rec, Recommendation::NoMatch);
    }

    #[test]
    fn test_subset_lists_all_covered_salads() {
        let catalog = catalog();
        let config = MatchConfig::new(MatchPolicy::Subset, TieBreak::First);
        let sel = selection(&["feta", "olive", "tomato", "lettuce"]);

        let rec = recommend(&catalog, &sel, &config);
        let names: Vec<&str> = rec.matches().iter().map(|m| m.salad.name.as_str()).collect();
        assert_eq!(names, vec!["Greek", "Garden"]);
        assert!(rec.matches().iter().all(|m| m.missing.is_empty()));
    }

    #[test]
    fn test_subset_partial_is_no_match() {
        let catalog = catalog();
        let config = MatchConfig::new(MatchPolicy::Subset, TieBreak::First);

        let rec = recommend(&catalog, &selection(&["feta", "olive"]), &config);
        assert_eq!(rec, Recommendation::NoMatch);
    }
}
