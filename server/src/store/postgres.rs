//! PostgreSQL storage via diesel.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

use super::{RecipeFilter, RecipeStore, SessionStore, StoreError, StoreResult, UserStore};
use crate::db::DbPool;
use crate::models::{NewRecipe, NewUser, Recipe, RecipeId, User, UserId};
use crate::schema::{recipes, sessions, users};

#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId(row.id),
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = users)]
struct NewUserRow<'a> {
    id: Uuid,
    name: &'a str,
    email: &'a str,
    password_hash: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = sessions)]
struct NewSessionRow<'a> {
    user_id: Uuid,
    token_hash: &'a str,
    expires_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct RecipeRow {
    id: Uuid,
    title: String,
    cover_image: String,
    ingredients: Vec<String>,
    instructions: String,
    created_by: Uuid,
    favorites: Vec<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Recipe {
            id: RecipeId(row.id),
            title: row.title,
            cover_image: row.cover_image,
            ingredients: row.ingredients,
            instructions: row.instructions,
            created_by: UserId(row.created_by),
            favorites: row.favorites.into_iter().map(UserId).collect(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = recipes)]
struct NewRecipeRow<'a> {
    id: Uuid,
    title: &'a str,
    cover_image: &'a str,
    ingredients: &'a [String],
    instructions: &'a str,
    created_by: Uuid,
}

pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl UserStore for PgStore {
    fn create_user(&self, new_user: NewUser<'_>) -> StoreResult<User> {
        let mut conn = self.pool.get()?;
        let email = new_user.email.to_lowercase();
        let row = NewUserRow {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: &email,
            password_hash: new_user.password_hash,
        };

        match diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
        {
            Ok(user) => Ok(user.into()),
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                Err(StoreError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn get_user(&self, user_id: UserId) -> StoreResult<Option<User>> {
        let mut conn = self.pool.get()?;
        let user = users::table
            .find(user_id.0)
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(user.map(User::from))
    }

    fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let mut conn = self.pool.get()?;
        let user = users::table
            .filter(users::email.eq(email.to_lowercase()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(user.map(User::from))
    }

    fn get_users(&self, user_ids: &[UserId]) -> StoreResult<Vec<User>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get()?;
        let ids: Vec<Uuid> = user_ids.iter().map(|id| id.0).collect();
        let rows = users::table
            .filter(users::id.eq_any(ids))
            .select(UserRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(User::from).collect())
    }
}

impl SessionStore for PgStore {
    fn create_session(
        &self,
        user_id: UserId,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut conn = self.pool.get()?;
        conn.transaction(|conn| {
            let expired = sessions::table.filter(sessions::expires_at.le(Utc::now()));
            let pruned = diesel::delete(expired).execute(conn)?;
            if pruned > 0 {
                tracing::debug!(count = pruned, "pruned expired sessions");
            }

            diesel::insert_into(sessions::table)
                .values(&NewSessionRow {
                    user_id: user_id.0,
                    token_hash,
                    expires_at,
                })
                .execute(conn)?;
            Ok::<_, DieselError>(())
        })?;
        Ok(())
    }

    fn get_session_user(&self, token_hash: &str, now: DateTime<Utc>) -> StoreResult<Option<User>> {
        let mut conn = self.pool.get()?;
        let user = sessions::table
            .inner_join(users::table)
            .filter(sessions::token_hash.eq(token_hash))
            .filter(sessions::expires_at.gt(now))
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(user.map(User::from))
    }

    fn delete_session(&self, token_hash: &str) -> StoreResult<()> {
        let mut conn = self.pool.get()?;
        diesel::delete(sessions::table.filter(sessions::token_hash.eq(token_hash)))
            .execute(&mut conn)?;
        Ok(())
    }
}

impl RecipeStore for PgStore {
    fn insert_recipe(&self, new_recipe: NewRecipe) -> StoreResult<Recipe> {
        let mut conn = self.pool.get()?;
        let row = NewRecipeRow {
            id: Uuid::new_v4(),
            title: &new_recipe.title,
            cover_image: &new_recipe.cover_image,
            ingredients: &new_recipe.ingredients,
            instructions: &new_recipe.instructions,
            created_by: new_recipe.created_by.0,
        };

        let recipe = diesel::insert_into(recipes::table)
            .values(&row)
            .returning(RecipeRow::as_returning())
            .get_result(&mut conn)?;
        Ok(recipe.into())
    }

    fn get_recipe(&self, recipe_id: RecipeId) -> StoreResult<Option<Recipe>> {
        let mut conn = self.pool.get()?;
        let recipe = recipes::table
            .find(recipe_id.0)
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(recipe.map(Recipe::from))
    }

    fn list_recipes(&self, filter: RecipeFilter) -> StoreResult<Vec<Recipe>> {
        let mut conn = self.pool.get()?;
        let mut query = recipes::table
            .select(RecipeRow::as_select())
            .order((recipes::created_at.asc(), recipes::id.asc()))
            .into_boxed();

        query = match filter {
            RecipeFilter::All => query,
            RecipeFilter::CreatedBy(user_id) => query.filter(recipes::created_by.eq(user_id.0)),
            RecipeFilter::FavoritedBy(user_id) => {
                query.filter(recipes::favorites.contains(vec![user_id.0]))
            }
        };

        let rows = query.load(&mut conn)?;
        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    fn save_recipe(&self, recipe: &Recipe) -> StoreResult<Option<Recipe>> {
        let mut conn = self.pool.get()?;
        let favorites: Vec<Uuid> = recipe.favorites.iter().map(|id| id.0).collect();

        let saved = diesel::update(recipes::table.find(recipe.id.0))
            .set((
                recipes::title.eq(&recipe.title),
                recipes::cover_image.eq(&recipe.cover_image),
                recipes::ingredients.eq(&recipe.ingredients),
                recipes::instructions.eq(&recipe.instructions),
                recipes::favorites.eq(favorites),
                recipes::updated_at.eq(Utc::now()),
            ))
            .returning(RecipeRow::as_returning())
            .get_result(&mut conn)
            .optional()?;
        Ok(saved.map(Recipe::from))
    }

    fn delete_recipe(&self, recipe_id: RecipeId) -> StoreResult<bool> {
        let mut conn = self.pool.get()?;
        let deleted = diesel::delete(recipes::table.find(recipe_id.0)).execute(&mut conn)?;
        Ok(deleted > 0)
    }
}
