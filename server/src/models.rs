use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Identity of a registered user. Ownership and favorites compare these by value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct RecipeId(pub Uuid);

impl RecipeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }
}

impl Default for RecipeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Always stored lower-cased.
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: UserId,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    /// Public path of the cover image, or empty when the recipe has none.
    pub cover_image: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub created_by: UserId,
    pub favorites: BTreeSet<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    pub fn is_owned_by(&self, identity: UserId) -> bool {
        self.created_by == identity
    }

    /// Flips `identity`'s membership in the favorites set.
    /// Returns true if the recipe is now a favorite of `identity`.
    pub fn toggle_favorite(&mut self, identity: UserId) -> bool {
        if self.favorites.remove(&identity) {
            false
        } else {
            self.favorites.insert(identity);
            true
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub title: String,
    pub cover_image: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub created_by: UserId,
}
