//! Ingredient lists arrive either as one comma-delimited string or as a list
//! of separate entries; both normalize to the same stored shape.
//!
//! Commas cannot be escaped: `"salt, pepper"` is always two ingredients.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngredientsInput {
    /// A single string such as `"flour, milk , eggs"`.
    Delimited(String),
    /// Already split, one ingredient per entry.
    List(Vec<String>),
}

impl IngredientsInput {
    /// Trim every entry and drop the ones left empty.
    pub fn normalize(&self) -> Vec<String> {
        match self {
            IngredientsInput::Delimited(raw) => clean(raw.split(',')),
            IngredientsInput::List(items) => clean(items.iter().map(String::as_str)),
        }
    }
}

fn clean<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    items
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}
