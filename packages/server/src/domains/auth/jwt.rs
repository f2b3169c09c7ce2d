use anyhow::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{OrganizationId, StaffRole};

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,                      // Subject (staff id)
    pub staff_id: String,                 // Employee identifier (audit fields)
    pub organization_id: OrganizationId,  // Organization the staff member belongs to
    pub role: StaffRole,                  // superadmin | staff
    pub exp: i64,                         // Expiration timestamp
    pub iat: i64,                         // Issued at timestamp
    pub iss: String,                      // Issuer
    pub jti: String,                      // JWT ID (unique token identifier)
}

/// JWT Service - creates and verifies staff tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl JwtService {
    /// Create new JWT service with secret and issuer
    pub fn new(secret: &str, issuer: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
        }
    }

    /// Create a new JWT token for a staff member
    ///
    /// Token expires after 12 hours (one working shift)
    pub fn create_token(
        &self,
        staff_id: &str,
        organization_id: OrganizationId,
        role: StaffRole,
    ) -> Result<String> {
        let now = chrono::Utc::now();
        let exp = now + chrono::Duration::hours(12);

        let claims = Claims {
            sub: staff_id.to_string(),
            staff_id: staff_id.to_string(),
            organization_id,
            role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Verify and decode a JWT token
    ///
    /// Returns claims if token is valid and not expired
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_verify_token() {
        let service = JwtService::new("test_secret_key", "test_issuer".to_string());

        let token = service
            .create_token("EMP-12", OrganizationId::new(3), StaffRole::Staff)
            .unwrap();

        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.staff_id, "EMP-12");
        assert_eq!(claims.organization_id, OrganizationId::new(3));
        assert_eq!(claims.role, StaffRole::Staff);
        assert_eq!(claims.iss, "test_issuer");
    }

    #[test]
    fn test_invalid_token() {
        let service = JwtService::new("test_secret_key", "test_issuer".to_string());
        assert!(service.verify_token("invalid_token").is_err());
    }

    #[test]
    fn test_wrong_secret() {
        let service1 = JwtService::new("secret1", "test_issuer".to_string());
        let service2 = JwtService::new("secret2", "test_issuer".to_string());

        let token = service1
            .create_token("root", OrganizationId::new(1), StaffRole::Superadmin)
            .unwrap();

        assert!(service2.verify_token(&token).is_err());
    }

    #[test]
    fn test_wrong_issuer() {
        let service1 = JwtService::new("secret", "issuer-a".to_string());
        let service2 = JwtService::new("secret", "issuer-b".to_string());

        let token = service1
            .create_token("EMP-1", OrganizationId::new(1), StaffRole::Staff)
            .unwrap();

        assert!(service2.verify_token(&token).is_err());
    }

    #[test]
    fn test_expiry_is_one_shift() {
        let service = JwtService::new("test_secret_key", "test_issuer".to_string());
        let token = service
            .create_token("EMP-12", OrganizationId::new(3), StaffRole::Staff)
            .unwrap();

        let claims = service.verify_token(&token).unwrap();

        let expires_in = claims.exp - chrono::Utc::now().timestamp();
        assert!(expires_in > 11 * 3600);
        assert!(expires_in <= 12 * 3600);
    }
}
