pub mod ingredient;
pub mod receipt;
pub mod salad;

pub use ingredient::Ingredient;
pub use receipt::Receipt;
pub use salad::{Salad, SaladRecord};
