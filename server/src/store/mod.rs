//! Persistence for users, sessions and recipes.
//!
//! Handlers and the recipe service only ever see the [`Store`] trait object;
//! which backend sits behind it is decided once at startup.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{NewRecipe, NewUser, Recipe, RecipeId, User, UserId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("migration failed: {0}")]
    Migration(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Which recipes a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeFilter {
    All,
    CreatedBy(UserId),
    FavoritedBy(UserId),
}

impl RecipeFilter {
    pub fn matches(&self, recipe: &Recipe) -> bool {
        match self {
            RecipeFilter::All => true,
            RecipeFilter::CreatedBy(user_id) => recipe.created_by == *user_id,
            RecipeFilter::FavoritedBy(user_id) => recipe.favorites.contains(user_id),
        }
    }
}

pub trait UserStore: Send + Sync {
    /// Insert a user. Fails with [`StoreError::DuplicateEmail`] if the email is taken.
    fn create_user(&self, new_user: NewUser<'_>) -> StoreResult<User>;

    fn get_user(&self, user_id: UserId) -> StoreResult<Option<User>>;

    /// Case-insensitive lookup.
    fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Fetch every user in `user_ids` that exists, in no particular order.
    fn get_users(&self, user_ids: &[UserId]) -> StoreResult<Vec<User>>;
}

pub trait SessionStore: Send + Sync {
    /// Record a new session. Sessions already expired at the time of the call
    /// are dropped first, so the table never grows past the live set.
    fn create_session(
        &self,
        user_id: UserId,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<()>;

    /// The user owning an unexpired session with this token hash.
    fn get_session_user(&self, token_hash: &str, now: DateTime<Utc>) -> StoreResult<Option<User>>;

    fn delete_session(&self, token_hash: &str) -> StoreResult<()>;
}

pub trait RecipeStore: Send + Sync {
    fn insert_recipe(&self, new_recipe: NewRecipe) -> StoreResult<Recipe>;

    fn get_recipe(&self, recipe_id: RecipeId) -> StoreResult<Option<Recipe>>;

    /// Recipes matching `filter`, oldest first.
    fn list_recipes(&self, filter: RecipeFilter) -> StoreResult<Vec<Recipe>>;

    /// Persist the mutable fields of `recipe` (title, cover image, ingredients,
    /// instructions, favorites) and bump `updated_at`. The creator is never
    /// written. Returns `None` if the recipe no longer exists.
    fn save_recipe(&self, recipe: &Recipe) -> StoreResult<Option<Recipe>>;

    /// Returns false if there was nothing to delete.
    fn delete_recipe(&self, recipe_id: RecipeId) -> StoreResult<bool>;
}

/// Everything the application needs from a backend.
pub trait Store: UserStore + SessionStore + RecipeStore {}

impl<T: UserStore + SessionStore + RecipeStore> Store for T {}
