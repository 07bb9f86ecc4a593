//! In-memory storage, used by the test suite and when no database is configured.

use std::collections::{BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use super::{RecipeFilter, RecipeStore, SessionStore, StoreError, StoreResult, UserStore};
use crate::models::{NewRecipe, NewUser, Recipe, RecipeId, Session, User, UserId};

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<UserId, User>>,
    sessions: RwLock<HashMap<String, Session>>,
    // Kept in insertion order so listings come back oldest first.
    recipes: RwLock<Vec<Recipe>>,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for MemoryStore {
    fn create_user(&self, new_user: NewUser<'_>) -> StoreResult<User> {
        let email = new_user.email.to_lowercase();
        let mut users = write(&self.users);
        if users.values().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail);
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            name: new_user.name.to_string(),
            email,
            password_hash: new_user.password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    fn get_user(&self, user_id: UserId) -> StoreResult<Option<User>> {
        Ok(read(&self.users).get(&user_id).cloned())
    }

    fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let email = email.to_lowercase();
        Ok(read(&self.users)
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    fn get_users(&self, user_ids: &[UserId]) -> StoreResult<Vec<User>> {
        let users = read(&self.users);
        Ok(user_ids
            .iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .filter_map(|id| users.get(id).cloned())
            .collect())
    }
}

impl SessionStore for MemoryStore {
    fn create_session(
        &self,
        user_id: UserId,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let now = Utc::now();
        let session = Session {
            user_id,
            token_hash: token_hash.to_string(),
            expires_at,
            created_at: now,
        };

        let mut sessions = write(&self.sessions);
        sessions.retain(|_, s| s.expires_at > now);
        sessions.insert(session.token_hash.clone(), session);
        Ok(())
    }

    fn get_session_user(&self, token_hash: &str, now: DateTime<Utc>) -> StoreResult<Option<User>> {
        let user_id = match read(&self.sessions).get(token_hash) {
            Some(session) if session.expires_at > now => session.user_id,
            _ => return Ok(None),
        };
        self.get_user(user_id)
    }

    fn delete_session(&self, token_hash: &str) -> StoreResult<()> {
        write(&self.sessions).remove(token_hash);
        Ok(())
    }
}

impl RecipeStore for MemoryStore {
    fn insert_recipe(&self, new_recipe: NewRecipe) -> StoreResult<Recipe> {
        let now = Utc::now();
        let recipe = Recipe {
            id: RecipeId::new(),
            title: new_recipe.title,
            cover_image: new_recipe.cover_image,
            ingredients: new_recipe.ingredients,
            instructions: new_recipe.instructions,
            created_by: new_recipe.created_by,
            favorites: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        };
        write(&self.recipes).push(recipe.clone());
        Ok(recipe)
    }

    fn get_recipe(&self, recipe_id: RecipeId) -> StoreResult<Option<Recipe>> {
        Ok(read(&self.recipes)
            .iter()
            .find(|r| r.id == recipe_id)
            .cloned())
    }

    fn list_recipes(&self, filter: RecipeFilter) -> StoreResult<Vec<Recipe>> {
        Ok(read(&self.recipes)
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    fn save_recipe(&self, recipe: &Recipe) -> StoreResult<Option<Recipe>> {
        let mut recipes = write(&self.recipes);
        let Some(stored) = recipes.iter_mut().find(|r| r.id == recipe.id) else {
            return Ok(None);
        };

        stored.title = recipe.title.clone();
        stored.cover_image = recipe.cover_image.clone();
        stored.ingredients = recipe.ingredients.clone();
        stored.instructions = recipe.instructions.clone();
        stored.favorites = recipe.favorites.clone();
        stored.updated_at = Utc::now();

        Ok(Some(stored.clone()))
    }

    fn delete_recipe(&self, recipe_id: RecipeId) -> StoreResult<bool> {
        let mut recipes = write(&self.recipes);
        let before = recipes.len();
        recipes.retain(|r| r.id != recipe_id);
        Ok(recipes.len() != before)
    }
}
