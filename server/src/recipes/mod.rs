//! The recipe lifecycle: ownership, input normalization, favorites, and
//! keeping cover image files in step with recipe records.

pub mod ingredients;
mod service;

pub use ingredients::IngredientsInput;
pub use service::RecipeService;

use thiserror::Error;

use crate::models::{Recipe, User, UserId};
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("{0}")]
    Validation(String),

    #[error("recipe not found")]
    NotFound,

    #[error("not the owner of this recipe")]
    Forbidden,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to write cover image: {0}")]
    Image(#[from] std::io::Error),
}

/// Fields a client may send when creating or editing a recipe.
/// `None` and empty values mean "not supplied".
#[derive(Debug, Clone, Default)]
pub struct RecipeInput {
    pub title: Option<String>,
    pub ingredients: Option<IngredientsInput>,
    pub instructions: Option<String>,
}

/// Public view of a recipe's owner.
#[derive(Debug, Clone, PartialEq)]
pub struct Creator {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<User> for Creator {
    fn from(user: User) -> Self {
        Creator {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// A recipe together with its resolved creator. The creator is `None` only
/// if the owning user record has disappeared.
#[derive(Debug, Clone)]
pub struct RecipeView {
    pub recipe: Recipe,
    pub creator: Option<Creator>,
}
