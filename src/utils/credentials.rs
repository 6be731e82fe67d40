use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use subtle::ConstantTimeEq;

/// Produces a PHC string suitable for `ADMIN_PASSWORD_HASH`.
pub fn hash_password(plain: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)?
        .to_string();
    Ok(password_hash)
}

pub fn verify_password(plain: &str, hashed: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hashed)?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Checks a login against the configured staff account. A malformed stored
/// hash counts as a mismatch.
pub fn staff_credentials_match(
    expected_username: &str,
    expected_hash: &str,
    username: &str,
    password: &str,
) -> bool {
    let username_ok: bool = expected_username
        .as_bytes()
        .ct_eq(username.as_bytes())
        .into();
    let password_ok = match verify_password(password, expected_hash) {
        Ok(ok) => ok,
        Err(err) => {
            tracing::error!(error = %err, "ADMIN_PASSWORD_HASH is not a valid PHC string");
            false
        }
    };
    username_ok && password_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_round_trips_through_verify() {
        let hash = hash_password("s3cret").unwrap();
        assert!(verify_password("s3cret", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn staff_match_requires_both_parts() {
        let hash = hash_password("s3cret").unwrap();
        assert!(staff_credentials_match("admin", &hash, "admin", "s3cret"));
        assert!(!staff_credentials_match("admin", &hash, "editor", "s3cret"));
        assert!(!staff_credentials_match("admin", &hash, "admin", "nope"));
        assert!(!staff_credentials_match("admin", "not-a-hash", "admin", "s3cret"));
    }
}
