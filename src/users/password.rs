use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::error::PasswordError;

// verification reads the parameters back out of the stored PHC string,
// so only the hashing side depends on this
fn hasher() -> Argon2<'static> {
    Argon2::default()
}

/// Hash `plain` with Argon2id and a fresh salt. The PHC string carries the
/// algorithm, its parameters and the salt.
pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    hasher()
        .hash_password(plain.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(|e| {
            error!(error = %e, "password hashing failed");
            PasswordError::Hash(e.to_string())
        })
}

/// `Ok(false)` on mismatch; an unparseable stored hash is an error.
pub fn verify_password(plain: &str, stored: &str) -> Result<bool, PasswordError> {
    let phc = PasswordHash::new(stored).map_err(|e| {
        error!(error = %e, "stored password hash is not a PHC string");
        PasswordError::Parse(e.to_string())
    })?;
    Ok(hasher().verify_password(plain.as_bytes(), &phc).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_hash_names_argon2id_and_salt() {
        let stored = hash_password("secret123").unwrap();
        let phc = PasswordHash::new(&stored).unwrap();
        assert_eq!(phc.algorithm, Algorithm::Argon2id.ident());
        assert!(phc.salt.is_some());
        assert!(phc.params.iter().any(|(name, _)| name.as_str() == "m"));
    }

    #[test]
    fn same_password_gets_a_new_salt_each_time() {
        let first = hash_password("secret123").unwrap();
        let second = hash_password("secret123").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("secret123", &first).unwrap());
        assert!(verify_password("secret123", &second).unwrap());
        assert!(!first.contains("secret123"));
    }

    #[test]
    fn near_misses_do_not_verify() {
        let stored = hash_password("secret123").unwrap();
        for attempt in ["secret12", "secret1234", "Secret123", "", " secret123"] {
            assert!(!verify_password(attempt, &stored).unwrap(), "{attempt:?}");
        }
    }

    #[test]
    fn unicode_password_verifies() {
        let stored = hash_password("пароль-ключ-🔑").unwrap();
        assert!(verify_password("пароль-ключ-🔑", &stored).unwrap());
    }

    #[test]
    fn plaintext_in_password_column_is_a_parse_error() {
        // a row written without hashing must not verify by accident
        let err = verify_password("secret123", "secret123").unwrap_err();
        assert!(matches!(err, PasswordError::Parse(_)));
    }
}
