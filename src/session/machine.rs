use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::config::MatchConfig;
use crate::error::{Result, SaladError};
use crate::matcher::{recommend, total_price, Recommendation};
use crate::models::{Receipt, Salad};

/// Where an order currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    SelectingIngredients,
    Recommending,
    SelectingExtras,
    Confirmed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::SelectingIngredients => "selecting ingredients",
            Stage::Recommending => "recommending",
            Stage::SelectingExtras => "selecting extras",
            Stage::Confirmed => "confirmed",
        };
        f.write_str(name)
    }
}

/// One customer's order, driven through explicit transitions.
///
/// The catalog is borrowed read-only; the selection, chosen salad and extras
/// are owned here. A renderer reads the accessors and calls the transitions,
/// it never mutates state directly.
#[derive(Debug)]
pub struct Session<'c> {
    catalog: &'c Catalog,
    config: MatchConfig,
    stage: Stage,
    selection: BTreeSet<String>,
    recommendation: Option<Recommendation<'c>>,
    chosen: Option<&'c Salad>,
    extras: Vec<String>,
    receipt: Option<Receipt>,
}

impl<'c> Session<'c> {
    pub fn new(catalog: &'c Catalog, config: MatchConfig) -> Self {
        Self {
            catalog,
            config,
            stage: Stage::SelectingIngredients,
            selection: BTreeSet::new(),
            recommendation: None,
            chosen: None,
            extras: Vec::new(),
            receipt: None,
        }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn selection(&self) -> &BTreeSet<String> {
        &self.selection
    }

    /// The latest search result, cleared when the selection is edited.
    pub fn recommendation(&self) -> Option<&Recommendation<'c>> {
        self.recommendation.as_ref()
    }

    pub fn chosen(&self) -> Option<&'c Salad> {
        self.chosen
    }

    pub fn extras(&self) -> &[String] {
        &self.extras
    }

    /// The receipt, once confirmed.
    pub fn receipt(&self) -> Option<&Receipt> {
        self.receipt.as_ref()
    }

    fn expect_stage(&self, allowed: &[Stage], action: &'static str) -> Result<()> {
        if allowed.contains(&self.stage) {
            Ok(())
        } else {
            Err(SaladError::InvalidTransition {
                stage: self.stage,
                action,
            })
        }
    }

    fn canonical_name(&self, name: &str) -> Result<String> {
        Ok(self.catalog.require_ingredient(name)?.name.clone())
    }

    /// Add an ingredient to the selection.
    pub fn select(&mut self, name: &str) -> Result<()> {
        self.expect_stage(&[Stage::SelectingIngredients], "select an ingredient")?;
        let name = self.canonical_name(name)?;
        self.selection.insert(name);
        Ok(())
    }

    /// Remove an ingredient from the selection. Unselected names are ignored.
    pub fn deselect(&mut self, name: &str) -> Result<()> {
        self.expect_stage(&[Stage::SelectingIngredients], "deselect an ingredient")?;
        let name = self.canonical_name(name)?;
        self.selection.remove(&name);
        Ok(())
    }

    /// Replace the whole selection. Nothing changes if any name is unknown.
    pub fn set_selection<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        self.expect_stage(&[Stage::SelectingIngredients], "change the selection")?;
        let selection = names
            .iter()
            .map(|n| self.canonical_name(n.as_ref()))
            .collect::<Result<BTreeSet<String>>>()?;
        self.selection = selection;
        Ok(())
    }

    /// Match the selection against the catalog.
    ///
    /// On a match the session moves to [`Stage::Recommending`] with the best
    /// (or first fully covered) salad chosen. Otherwise it stays in (or
    /// returns to) [`Stage::SelectingIngredients`] and the caller shows the
    /// outcome.
    pub fn search(&mut self) -> Result<&Recommendation<'c>> {
        self.expect_stage(
            &[Stage::SelectingIngredients, Stage::Recommending],
            "search for a salad",
        )?;

        let recommendation = recommend(self.catalog, &self.selection, &self.config);
        match recommendation.matches().first() {
            Some(best) => {
                info!(salad = %best.salad.name, "salad recommended");
                self.chosen = Some(best.salad);
                self.stage = Stage::Recommending;
            }
            None => {
                debug!(outcome = ?recommendation, "no recommendation");
                self.chosen = None;
                self.stage = Stage::SelectingIngredients;
            }
        }
        self.extras.clear();

        Ok(&*self.recommendation.insert(recommendation))
    }

    /// Pick one of the recommended salads.
    pub fn choose(&mut self, salad_name: &str) -> Result<&'c Salad> {
        self.expect_stage(&[Stage::Recommending], "choose a salad")?;
        let salad = self.catalog.require_salad(salad_name)?;

        let offered = self
            .recommendation
            .as_ref()
            .is_some_and(|r| r.matches().iter().any(|m| m.salad == salad));
        if !offered {
            return Err(SaladError::UnknownSalad(format!(
                "{} (not among the recommended salads)",
                salad.name
            )));
        }

        self.chosen = Some(salad);
        Ok(salad)
    }

    /// Move on to choosing extra ingredients.
    pub fn begin_extras(&mut self) -> Result<()> {
        self.expect_stage(&[Stage::Recommending], "add extra ingredients")?;
        self.stage = Stage::SelectingExtras;
        Ok(())
    }

    /// Replace the extras list. Duplicates are kept and charged per entry.
    pub fn set_extras<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        self.expect_stage(&[Stage::SelectingExtras], "change extra ingredients")?;
        let extras = names
            .iter()
            .map(|n| self.canonical_name(n.as_ref()))
            .collect::<Result<Vec<String>>>()?;
        self.extras = extras;
        Ok(())
    }

    /// Price the order and produce its receipt.
    pub fn confirm(&mut self) -> Result<&Receipt> {
        self.expect_stage(
            &[Stage::Recommending, Stage::SelectingExtras],
            "confirm the order",
        )?;
        let salad = self.chosen.ok_or(SaladError::InvalidTransition {
            stage: self.stage,
            action: "confirm without a salad",
        })?;

        let total = total_price(self.catalog, salad.price, self.extras.as_slice())?;
        let receipt = Receipt::new(salad.name.clone(), salad.price, self.extras.clone(), total);
        info!(salad = %salad.name, total, "order confirmed");

        self.stage = Stage::Confirmed;
        Ok(&*self.receipt.insert(receipt))
    }

    /// Go back to editing the selection, keeping it.
    pub fn edit_selection(&mut self) -> Result<()> {
        self.expect_stage(
            &[
                Stage::SelectingIngredients,
                Stage::Recommending,
                Stage::SelectingExtras,
            ],
            "edit the selection",
        )?;
        self.stage = Stage::SelectingIngredients;
        self.recommendation = None;
        self.chosen = None;
        self.extras.clear();
        Ok(())
    }

    /// Start a new order from scratch. Allowed from any stage.
    pub fn reset(&mut self) {
        self.stage = Stage::SelectingIngredients;
        self.selection.clear();
        self.recommendation = None;
        self.chosen = None;
        self.extras.clear();
        self.receipt = None;
    }
}
