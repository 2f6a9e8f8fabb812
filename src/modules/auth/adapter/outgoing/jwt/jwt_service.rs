use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use std::fmt;

use crate::auth::application::ports::outgoing::token_provider::{
    TokenClaims, TokenError, TokenProvider, TokenSubject,
};

use super::jwt_config::JwtConfig;

#[derive(Clone)]
pub struct JwtTokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

#[cfg(not(tarpaulin_include))]
impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("issuer", &self.config.issuer)
            .field("access_token_expiry", &self.config.access_token_expiry)
            .finish()
    }
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 30;
        validation.validate_nbf = true;
        validation.set_issuer(&[self.config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation
    }
}

impl TokenProvider for JwtTokenService {
    fn generate_access_token(&self, subject: &TokenSubject) -> Result<String, TokenError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(self.config.access_token_expiry);

        let claims = TokenClaims {
            sub: subject.user_id,
            email: subject.email.clone(),
            role: subject.role,
            iss: self.config.issuer.clone(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingError(e.to_string()))
    }

    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let decoded =
            decode::<TokenClaims>(token, &self.decoding_key, &self.validation()).map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;

                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token verification failed: token expired");
                        TokenError::TokenExpired
                    }
                    ErrorKind::ImmatureSignature => {
                        tracing::warn!("Token verification failed: token not yet valid");
                        TokenError::TokenNotYetValid
                    }
                    ErrorKind::InvalidSignature => {
                        tracing::error!("Security alert: invalid token signature detected");
                        TokenError::InvalidSignature
                    }
                    ErrorKind::InvalidToken | ErrorKind::InvalidAlgorithm => {
                        tracing::error!("Security alert: malformed or invalid algorithm token");
                        TokenError::MalformedToken
                    }
                    ErrorKind::InvalidIssuer => {
                        tracing::warn!("Token verification failed: unexpected issuer");
                        TokenError::MalformedToken
                    }
                    ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
                        tracing::warn!("Token verification failed: malformed token");
                        TokenError::MalformedToken
                    }
                    _ => {
                        tracing::warn!("Token verification failed: {}", e);
                        TokenError::MalformedToken
                    }
                }
            })?;

        Ok(decoded.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::Role;
    use base64::Engine;
    use uuid::Uuid;

    fn config(expiry: i64) -> JwtConfig {
        JwtConfig {
            secret_key: "test_secret_key_for_testing_purposes_only".to_string(),
            issuer: "stock-shop".to_string(),
            access_token_expiry: expiry,
        }
    }

    fn create_test_jwt_service() -> JwtTokenService {
        JwtTokenService::new(config(3600))
    }

    fn subject(role: Role) -> TokenSubject {
        TokenSubject {
            user_id: Uuid::new_v4(),
            email: "ana@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_generate_and_verify_access_token() {
        let service = create_test_jwt_service();
        let subject = subject(Role::Employee);

        let token = service.generate_access_token(&subject).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.sub, subject.user_id);
        assert_eq!(claims.email, "ana@example.com");
        assert_eq!(claims.role, Role::Employee);
        assert_eq!(claims.iss, "stock-shop");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token() {
        // Beyond the 30s leeway
        let service = JwtTokenService::new(config(-35));

        let token = service.generate_access_token(&subject(Role::User)).unwrap();
        let result = service.verify_token(&token);

        assert_eq!(result.unwrap_err(), TokenError::TokenExpired);
    }

    #[test]
    fn test_invalid_signature() {
        let service = create_test_jwt_service();
        let token = service.generate_access_token(&subject(Role::User)).unwrap();

        let other = JwtTokenService::new(JwtConfig {
            secret_key: "another_secret_key_that_is_long_enough".to_string(),
            ..config(3600)
        });

        assert_eq!(
            other.verify_token(&token).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn test_wrong_issuer_is_rejected() {
        let service = create_test_jwt_service();
        let token = service.generate_access_token(&subject(Role::User)).unwrap();

        let other = JwtTokenService::new(JwtConfig {
            issuer: "someone-else".to_string(),
            ..config(3600)
        });

        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn test_malformed_token() {
        let service = create_test_jwt_service();

        assert_eq!(
            service.verify_token("not-a-jwt").unwrap_err(),
            TokenError::MalformedToken
        );
    }

    #[test]
    fn test_tampered_role_is_rejected() {
        let service = create_test_jwt_service();
        let token = service.generate_access_token(&subject(Role::User)).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
        let payload = String::from_utf8(engine.decode(parts[1]).unwrap()).unwrap();
        let forged = engine.encode(payload.replace("\"user\"", "\"admin\""));
        let tampered = format!("{}.{}.{}", parts[0], forged, parts[2]);

        assert_eq!(
            service.verify_token(&tampered).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn test_jwt_service_debug_hides_secret() {
        let debug = format!("{:?}", create_test_jwt_service());
        assert!(debug.contains("JwtTokenService"));
        assert!(!debug.contains("test_secret_key"));
    }
}
