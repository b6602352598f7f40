mod loader;
mod store;

pub use loader::{load_catalog, parse_ingredients, parse_salads};
pub use store::Catalog;
