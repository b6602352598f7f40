use std::path::PathBuf;

use thiserror::Error;

use crate::session::Stage;

#[derive(Debug, Error)]
pub enum SaladError {
    #[error("Cannot read data file {}: {source}", .path.display())]
    DataFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed data file {}: {source}", .path.display())]
    MalformedData {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Unknown ingredient: {name}{}", suggestion_hint(.suggestion))]
    UnknownIngredient {
        name: String,
        suggestion: Option<String>,
    },

    #[error("Unknown salad: {0}")]
    UnknownSalad(String),

    #[error("Total price overflowed")]
    PriceOverflow,

    #[error("Cannot {action} while {stage}")]
    InvalidTransition { stage: Stage, action: &'static str },

    #[error("Receipt has no integrity hash")]
    UnsignedReceipt,

    #[error("Receipt hash mismatch: stored {stored}, computed {computed}")]
    TamperedReceipt { stored: String, computed: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{}'?)", s),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, SaladError>;
