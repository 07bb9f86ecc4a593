use std::collections::HashMap;
use std::sync::Arc;

use super::{Creator, RecipeError, RecipeInput, RecipeView};
use crate::images::{ImageStore, ImageUpload};
use crate::models::{NewRecipe, Recipe, RecipeId, UserId};
use crate::store::{RecipeFilter, Store};

/// Owns every write to a recipe. Handlers call into this with an already
/// authenticated identity; it enforces ownership and keeps the cover image
/// file consistent with the stored path.
#[derive(Clone)]
pub struct RecipeService {
    store: Arc<dyn Store>,
    images: ImageStore,
}

impl RecipeService {
    pub fn new(store: Arc<dyn Store>, images: ImageStore) -> Self {
        Self { store, images }
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    pub fn list(&self) -> Result<Vec<RecipeView>, RecipeError> {
        self.list_matching(RecipeFilter::All)
    }

    pub fn list_by_creator(&self, identity: UserId) -> Result<Vec<RecipeView>, RecipeError> {
        self.list_matching(RecipeFilter::CreatedBy(identity))
    }

    pub fn list_favorites(&self, identity: UserId) -> Result<Vec<RecipeView>, RecipeError> {
        self.list_matching(RecipeFilter::FavoritedBy(identity))
    }

    pub fn get(&self, id: RecipeId) -> Result<RecipeView, RecipeError> {
        let recipe = self.load(id)?;
        self.view(recipe)
    }

    pub async fn create(
        &self,
        identity: UserId,
        input: RecipeInput,
        image: Option<ImageUpload>,
    ) -> Result<RecipeView, RecipeError> {
        let title = non_empty(input.title.as_deref())
            .ok_or_else(|| RecipeError::Validation("Please add a title".to_string()))?;
        let ingredients = input
            .ingredients
            .map(|i| i.normalize())
            .filter(|list| !list.is_empty())
            .ok_or_else(|| RecipeError::Validation("Please add ingredients".to_string()))?;
        let instructions = input
            .instructions
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| RecipeError::Validation("Please add instructions".to_string()))?;

        let cover_image = match image {
            Some(upload) => self.images.save(&upload).await?,
            None => String::new(),
        };

        let new_recipe = NewRecipe {
            title,
            cover_image: cover_image.clone(),
            ingredients,
            instructions,
            created_by: identity,
        };
        let recipe = self.store.insert_recipe(new_recipe).inspect_err(|e| {
            warn_orphaned(&cover_image, e);
        })?;

        tracing::info!(recipe_id = %recipe.id, user_id = %identity, "created recipe");
        self.view(recipe)
    }

    /// Partial update: only non-empty fields replace stored values. A new
    /// image is written before the record is saved and the superseded file is
    /// removed only after the save succeeded.
    pub async fn update(
        &self,
        identity: UserId,
        id: RecipeId,
        input: RecipeInput,
        image: Option<ImageUpload>,
    ) -> Result<RecipeView, RecipeError> {
        let mut recipe = self.load_owned(identity, id)?;

        if let Some(title) = non_empty(input.title.as_deref()) {
            recipe.title = title;
        }
        if let Some(ingredients) = input
            .ingredients
            .map(|i| i.normalize())
            .filter(|list| !list.is_empty())
        {
            recipe.ingredients = ingredients;
        }
        if let Some(instructions) = input.instructions.filter(|text| !text.trim().is_empty()) {
            recipe.instructions = instructions;
        }

        let superseded = match image {
            Some(upload) => {
                let new_path = self.images.save(&upload).await?;
                Some(std::mem::replace(&mut recipe.cover_image, new_path))
            }
            None => None,
        };

        let saved = match self.store.save_recipe(&recipe) {
            Ok(Some(saved)) => saved,
            Ok(None) => {
                // Deleted underneath us; nothing will ever point at the new file.
                if superseded.is_some() {
                    self.images.remove(&recipe.cover_image).await;
                }
                return Err(RecipeError::NotFound);
            }
            Err(e) => {
                if superseded.is_some() {
                    warn_orphaned(&recipe.cover_image, &e);
                }
                return Err(e.into());
            }
        };

        if let Some(old_path) = superseded {
            self.images.remove(&old_path).await;
        }

        tracing::info!(recipe_id = %saved.id, user_id = %identity, "updated recipe");
        self.view(saved)
    }

    /// Delete the record first, then its image file.
    pub async fn delete(&self, identity: UserId, id: RecipeId) -> Result<(), RecipeError> {
        let recipe = self.load_owned(identity, id)?;

        if !self.store.delete_recipe(recipe.id)? {
            return Err(RecipeError::NotFound);
        }
        self.images.remove(&recipe.cover_image).await;

        tracing::info!(recipe_id = %recipe.id, user_id = %identity, "deleted recipe");
        Ok(())
    }

    /// Any authenticated identity may favorite any recipe, its own included.
    pub fn toggle_favorite(
        &self,
        identity: UserId,
        id: RecipeId,
    ) -> Result<RecipeView, RecipeError> {
        let mut recipe = self.load(id)?;
        let favorited = recipe.toggle_favorite(identity);

        let saved = self
            .store
            .save_recipe(&recipe)?
            .ok_or(RecipeError::NotFound)?;

        tracing::debug!(recipe_id = %saved.id, user_id = %identity, favorited, "toggled favorite");
        self.view(saved)
    }

    fn load(&self, id: RecipeId) -> Result<Recipe, RecipeError> {
        self.store.get_recipe(id)?.ok_or(RecipeError::NotFound)
    }

    fn load_owned(&self, identity: UserId, id: RecipeId) -> Result<Recipe, RecipeError> {
        let recipe = self.load(id)?;
        if !recipe.is_owned_by(identity) {
            tracing::warn!(recipe_id = %id, user_id = %identity, "rejected change by non-owner");
            return Err(RecipeError::Forbidden);
        }
        Ok(recipe)
    }

    fn list_matching(&self, filter: RecipeFilter) -> Result<Vec<RecipeView>, RecipeError> {
        let recipes = self.store.list_recipes(filter)?;

        let mut creator_ids: Vec<UserId> = recipes.iter().map(|r| r.created_by).collect();
        creator_ids.sort_unstable();
        creator_ids.dedup();

        let creators: HashMap<UserId, Creator> = self
            .store
            .get_users(&creator_ids)?
            .into_iter()
            .map(|u| (u.id, Creator::from(u)))
            .collect();

        Ok(recipes
            .into_iter()
            .map(|recipe| RecipeView {
                creator: creators.get(&recipe.created_by).cloned(),
                recipe,
            })
            .collect())
    }

    fn view(&self, recipe: Recipe) -> Result<RecipeView, RecipeError> {
        let creator = self.store.get_user(recipe.created_by)?.map(Creator::from);
        Ok(RecipeView { recipe, creator })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

// A store failure after the image was written leaves the file behind.
fn warn_orphaned(cover_image: &str, error: &crate::store::StoreError) {
    if !cover_image.is_empty() {
        tracing::warn!(cover_image, error = %error, "recipe not saved, cover image left orphaned");
    }
}
