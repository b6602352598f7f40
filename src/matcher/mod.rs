pub mod pricing;
pub mod recommend;

pub use pricing::{extras_price, price_order, total_price};
pub use recommend::{recommend, Recommendation, SaladMatch};
