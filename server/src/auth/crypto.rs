use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::Rng;
use sha2::{Digest, Sha256};
use std::sync::LazyLock;

/// Use insecure (fast) password hashing for dev/test environments
static INSECURE_HASHING: LazyLock<bool> =
    LazyLock::new(|| std::env::var("INSECURE_PASSWORD_HASHING").is_ok());

/// A fresh bearer token: 32 random bytes, hex encoded.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    hex::encode(bytes)
}

/// Tokens are only ever stored as their SHA-256.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

fn get_argon2() -> Result<Argon2<'static>, argon2::Error> {
    if *INSECURE_HASHING {
        // Minimal params for fast dev/test - NOT SECURE FOR PRODUCTION
        let params = Params::new(1024, 1, 1, None)?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    } else {
        Ok(Argon2::default())
    }
}

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let argon2 = get_argon2()?;
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };
    let Ok(argon2) = get_argon2() else {
        return false;
    };
    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
