use axum::http::{header::AUTHORIZATION, HeaderMap};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;

const BEARER_SCHEME: &str = "bearer";
const ADMIN_DISPLAY_NAME: &str = "QA Lead";
const ADMIN_ROLE: &str = "qa_lead";

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user_display_name: String,
    pub role: String,
}

/// Identity attached to an accepted bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    pub email: String,
    pub display_name: String,
    pub role: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("missing bearer token")]
    MissingCredentials,
    #[error("invalid bearer token")]
    InvalidToken,
    #[error("invalid email or password")]
    InvalidLogin,
}

/// Single-admin access stub: the shared secret doubles as the bearer token.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    admin_email: String,
    admin_password: String,
    secret_key: String,
}

impl AccessPolicy {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            admin_email: config.admin_email.clone(),
            admin_password: config.admin_password.clone(),
            secret_key: config.secret_key.clone(),
        }
    }

    pub fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AccessError> {
        let email_matches = request
            .email
            .trim()
            .eq_ignore_ascii_case(&self.admin_email);
        if !email_matches || request.password != self.admin_password {
            return Err(AccessError::InvalidLogin);
        }

        Ok(self.session())
    }

    /// Token response for the admin account.
    pub fn session(&self) -> LoginResponse {
        LoginResponse {
            access_token: self.secret_key.clone(),
            token_type: BEARER_SCHEME.to_string(),
            user_display_name: ADMIN_DISPLAY_NAME.to_string(),
            role: ADMIN_ROLE.to_string(),
        }
    }

    pub fn authorize(&self, headers: &HeaderMap) -> Result<Principal, AccessError> {
        let token = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or(AccessError::MissingCredentials)?;

        if token != self.secret_key {
            return Err(AccessError::InvalidToken);
        }

        Ok(Principal {
            email: self.admin_email.clone(),
            display_name: ADMIN_DISPLAY_NAME.to_string(),
            role: ADMIN_ROLE.to_string(),
        })
    }
}

/// Token part of an `Authorization` value; the scheme is matched case-insensitively.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
