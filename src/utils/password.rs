use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;

use crate::types::error::AppError;

/// Salted argon2id digest in PHC string form.
pub fn hash(plaintext: &str) -> Result<String, AppError> {
    let mut rng = OsRng;
    let salt = SaltString::generate(&mut rng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// `false` on mismatch and on a digest that does not parse.
pub fn verify(plaintext: &str, digest: &str) -> bool {
    let parsed = match PasswordHash::new(digest) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("stored password digest is unreadable: {e}");
            return false;
        }
    };
    Argon2::default().verify_password(plaintext.as_bytes(), &parsed).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_own_hash() {
        for p in ["pw123", "", "correct horse battery staple", "密码"] {
            let digest = hash(p).unwrap();
            assert!(verify(p, &digest), "failed for {p:?}");
        }
    }

    #[test]
    fn verify_rejects_other_plaintext() {
        let digest = hash("pw123").unwrap();
        assert!(!verify("pw124", &digest));
        assert!(!verify("", &digest));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash("pw123").unwrap();
        let b = hash("pw123").unwrap();
        assert_ne!(a, b);
        assert!(!a.contains("pw123"));
    }

    #[test]
    fn garbage_digest_is_a_mismatch() {
        assert!(!verify("pw123", "not-a-phc-string"));
    }
}
