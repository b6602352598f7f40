use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Default ingredient table path.
pub const DEFAULT_INGREDIENTS_FILE: &str = "ingredienser.json";

/// Default salad catalog path.
pub const DEFAULT_SALADS_FILE: &str = "sallader.json";

/// Default signed receipt path.
pub const DEFAULT_SIGNED_RECEIPT_FILE: &str = "kvitto.json";

/// Default plain text receipt path.
pub const DEFAULT_TEXT_RECEIPT_FILE: &str = "kvitto.txt";

/// How a selection is matched against the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// Pick the salad sharing the most ingredients with the selection.
    #[default]
    BestOverlap,
    /// List every salad whose ingredients are all selected.
    Subset,
}

/// Which salad wins when several share the best overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// First salad in catalog order.
    First,
    /// Lowest price, then catalog order.
    #[default]
    Cheapest,
}

/// Matching behaviour for recommendations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub policy: MatchPolicy,
    pub tie_break: TieBreak,
}

impl MatchConfig {
    pub fn new(policy: MatchPolicy, tie_break: TieBreak) -> Self {
        Self { policy, tie_break }
    }
}

impl fmt::Display for MatchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.policy {
            MatchPolicy::BestOverlap => write!(f, "best-overlap (tie-break: {:?})", self.tie_break),
            MatchPolicy::Subset => write!(f, "subset"),
        }
    }
}

/// How the receipt is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ReceiptFormat {
    /// JSON with an integrity hash, owner-only permissions.
    #[default]
    Signed,
    /// Human-readable summary.
    Text,
}

impl ReceiptFormat {
    pub fn default_path(&self) -> PathBuf {
        match self {
            ReceiptFormat::Signed => PathBuf::from(DEFAULT_SIGNED_RECEIPT_FILE),
            ReceiptFormat::Text => PathBuf::from(DEFAULT_TEXT_RECEIPT_FILE),
        }
    }
}

/// Everything a run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct Settings {
    pub ingredients_path: PathBuf,
    pub salads_path: PathBuf,
    pub matching: MatchConfig,
}
