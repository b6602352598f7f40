use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{
    MatchConfig, MatchPolicy, ReceiptFormat, Settings, TieBreak, DEFAULT_INGREDIENTS_FILE,
    DEFAULT_SALADS_FILE,
};

/// Salladsbaren: pick ingredients, get a salad, print a receipt.
#[derive(Parser, Debug)]
#[command(name = "salladsbaren")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the ingredient price table.
    #[arg(long, default_value = DEFAULT_INGREDIENTS_FILE, global = true)]
    pub ingredients: PathBuf,

    /// Path to the salad catalog.
    #[arg(long, default_value = DEFAULT_SALADS_FILE, global = true)]
    pub salads: PathBuf,

    /// How selections are matched against the catalog.
    #[arg(long, value_enum, default_value_t = MatchPolicy::default(), global = true)]
    pub policy: MatchPolicy,

    /// Tie-break between salads with the same overlap.
    #[arg(long, value_enum, default_value_t = TieBreak::default(), global = true)]
    pub tie_break: TieBreak,

    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings {
            ingredients_path: self.ingredients.clone(),
            salads_path: self.salads.clone(),
            matching: MatchConfig::new(self.policy, self.tie_break),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Place an order interactively and write a receipt.
    Order {
        /// Receipt output path (defaults to kvitto.json or kvitto.txt).
        #[arg(long)]
        receipt: Option<PathBuf>,

        /// Receipt format.
        #[arg(long, value_enum, default_value_t = ReceiptFormat::default())]
        format: ReceiptFormat,
    },

    /// Show the ingredient table and salad catalog.
    Menu,

    /// Recommend a salad for the given ingredients.
    Recommend {
        /// Selected ingredient (repeatable).
        #[arg(short = 'i', long = "ingredient", required = true)]
        selected: Vec<String>,
    },

    /// Price a salad with extra ingredients.
    Price {
        /// Salad name.
        #[arg(short, long)]
        salad: String,

        /// Extra ingredient (repeatable, duplicates are charged twice).
        #[arg(short, long = "extra")]
        extras: Vec<String>,
    },

    /// Check the integrity hash of a signed receipt.
    Verify {
        /// Receipt to check.
        #[arg(default_value = crate::config::DEFAULT_SIGNED_RECEIPT_FILE)]
        path: PathBuf,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Order {
            receipt: None,
            format: ReceiptFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_order() {
        let cli = Cli::parse_from(["salladsbaren"]);
        assert!(cli.command.is_none());
        assert!(matches!(Command::default(), Command::Order { receipt: None, .. }));
        assert_eq!(cli.settings().matching, MatchConfig::default());
    }

    #[test]
    fn test_recommend_args() {
        let cli = Cli::parse_from([
            "salladsbaren",
            "recommend",
            "-i",
            "feta",
            "--ingredient",
            "olive",
            "--policy",
            "subset",
        ]);

        match cli.command {
            Some(Command::Recommend { selected }) => {
                assert_eq!(selected, vec!["feta", "olive"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.policy, MatchPolicy::Subset);
    }

    #[test]
    fn test_price_args_allow_repeated_extras() {
        let cli = Cli::parse_from([
            "salladsbaren",
            "price",
            "--salad",
            "Greek",
            "-e",
            "feta",
            "-e",
            "feta",
        ]);

        match cli.command {
            Some(Command::Price { salad, extras }) => {
                assert_eq!(salad, "Greek");
                assert_eq!(extras, vec!["feta", "feta"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
