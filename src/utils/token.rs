use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const STAFF_ROLES: [&str; 2] = ["admin", "editor"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: Option<String>,
}

impl Claims {
    pub fn is_staff(&self) -> bool {
        let role = self.role.as_deref().unwrap_or_default();
        STAFF_ROLES.iter().any(|r| r.eq_ignore_ascii_case(role))
    }
}

pub fn issue_token(secret: &str, subject: &str, role: &str, ttl: Duration) -> Result<String> {
    let claims = Claims {
        sub: subject.to_string(),
        exp: (Utc::now() + ttl).timestamp().max(0) as usize,
        role: Some(role.to_string()),
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn decode_token(secret: &str, token: &str) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_decodes_with_same_secret() {
        let token = issue_token("secret", "admin", "admin", Duration::hours(1)).unwrap();
        let claims = decode_token("secret", &token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert!(claims.is_staff());
    }

    #[test]
    fn wrong_secret_and_expired_tokens_are_rejected() {
        let token = issue_token("secret", "admin", "admin", Duration::hours(1)).unwrap();
        assert!(decode_token("other", &token).is_err());

        let expired = issue_token("secret", "admin", "admin", Duration::hours(-2)).unwrap();
        assert!(decode_token("secret", &expired).is_err());
    }

    #[test]
    fn unknown_roles_are_not_staff() {
        let claims = Claims {
            sub: "x".into(),
            exp: 0,
            role: Some("viewer".into()),
        };
        assert!(!claims.is_staff());
    }
}
