use std::sync::Arc;

use crate::images::ImageStore;
use crate::recipes::RecipeService;
use crate::store::Store;

/// Application state shared across all handlers
pub type AppState = Arc<AppContext>;

pub struct AppContext {
    pub store: Arc<dyn Store>,
    pub recipes: RecipeService,
}

impl AppContext {
    pub fn new(store: Arc<dyn Store>, images: ImageStore) -> AppState {
        let recipes = RecipeService::new(store.clone(), images);
        Arc::new(Self { store, recipes })
    }
}
