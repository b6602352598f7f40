pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod matcher;
pub mod models;
pub mod receipt;
pub mod session;

pub use catalog::{load_catalog, Catalog};
pub use config::{MatchConfig, MatchPolicy, ReceiptFormat, TieBreak};
pub use error::{Result, SaladError};
pub use matcher::{recommend, total_price, Recommendation};
pub use models::{Ingredient, Receipt, Salad};
pub use session::{Session, Stage};
