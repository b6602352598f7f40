/// An ingredient with its price in kronor.
///
/// Used both as a salad requirement and as an extra add-on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub name: String,
    pub price: u32,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, price: u32) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Checkbox label, e.g. "feta (10 kr)".
    pub fn label(&self) -> String {
        format!("{} ({} kr)", self.name, self.price)
    }
}
