use crate::catalog::Catalog;
use crate::error::{Result, SaladError};

/// Sum of the extra ingredients' prices.
///
/// Fails on the first name missing from the ingredient table.
pub fn extras_price<S: AsRef<str>>(catalog: &Catalog, extras: &[S]) -> Result<u32> {
    extras.iter().try_fold(0u32, |sum, name| {
        let ingredient = catalog.require_ingredient(name.as_ref())?;
        sum.checked_add(ingredient.price)
            .ok_or(SaladError::PriceOverflow)
    })
}

/// Base price plus every extra ingredient.
pub fn total_price<S: AsRef<str>>(catalog: &Catalog, base_price: u32, extras: &[S]) -> Result<u32> {
    base_price
        .checked_add(extras_price(catalog, extras)?)
        .ok_or(SaladError::PriceOverflow)
}

/// Total for a salad looked up by name.
pub fn price_order<S: AsRef<str>>(catalog: &Catalog, salad_name: &str, extras: &[S]) -> Result<u32> {
    let salad = catalog.require_salad(salad_name)?;
    total_price(catalog, salad.price, extras)
}
