use chrono::{Duration, Utc};

use super::crypto::{generate_token, hash_token};
use crate::models::{User, UserId};
use crate::store::{Store, StoreResult};

pub const SESSION_LIFETIME_DAYS: i64 = 30;

/// Open a session for `user_id` and return the bearer token to hand back to the client.
pub fn create_session(store: &dyn Store, user_id: UserId) -> StoreResult<String> {
    let token = generate_token();
    let expires_at = Utc::now() + Duration::days(SESSION_LIFETIME_DAYS);
    store.create_session(user_id, &hash_token(&token), expires_at)?;
    Ok(token)
}

pub fn get_user_from_token(store: &dyn Store, token: &str) -> StoreResult<Option<User>> {
    store.get_session_user(&hash_token(token), Utc::now())
}

pub fn end_session(store: &dyn Store, token: &str) -> StoreResult<()> {
    store.delete_session(&hash_token(token))
}
