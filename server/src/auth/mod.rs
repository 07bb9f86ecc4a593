mod crypto;
mod extractor;
mod session;

pub use crypto::{hash_password, verify_password};
pub use extractor::{AuthError, AuthUser, BearerToken};
pub use session::{create_session, end_session, get_user_from_token};
